use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while stepping, sampling, loading or writing.
///
/// The first four variants are the integrator's precondition failures. They
/// are never retried; the driver aborts the run on the first one it sees.
#[derive(Debug, Error)]
pub enum Error {
    #[error("destination body is missing")]
    OutputNull,

    #[error("body collection is missing")]
    CollectionNull,

    #[error("point of interest is not in range (index {index}, {len} bodies)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("time step is less than or equal to zero ({0})")]
    InvalidTimeStep(f64),

    #[error("steps per sample must be greater than zero")]
    InvalidSampleInterval,

    #[error("record buffer holds {actual} samples but the run produces {expected}")]
    RecordLengthMismatch { expected: usize, actual: usize },

    #[error("sampled body {index} is not in the collection ({len} bodies)")]
    SampleIndexOutOfRange { index: usize, len: usize },

    #[error("mass must be finite and greater than zero ({0})")]
    InvalidMass(f64),

    #[error("{seconds} s in steps of {step_size} s needs more steps than can be counted")]
    TooManySteps { seconds: f64, step_size: f64 },

    #[error("cannot allocate a record buffer of {samples} samples")]
    RecordAllocation { samples: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
