use crate::body::Body;
use crate::error::{Error, Result};
use crate::integrator::integrator_step;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

/// Collections at least this large are stepped on the rayon pool. Below it
/// the per-step fork/join costs more than the force sums.
pub const PARALLEL_THRESHOLD: usize = 64;

/// A reduced snapshot: simulated time plus the x/y positions of the two
/// selected bodies, taken before the step at that time is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub body_a: (f64, f64),
    pub body_b: (f64, f64),
}

/// Which collection indices end up in each [`Sample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSelector {
    pub body_a: usize,
    pub body_b: usize,
}

impl SampleSelector {
    pub fn new(body_a: usize, body_b: usize) -> Self {
        Self { body_a, body_b }
    }

    fn validate(&self, len: usize) -> Result<()> {
        for index in [self.body_a, self.body_b] {
            if index >= len {
                return Err(Error::SampleIndexOutOfRange { index, len });
            }
        }
        Ok(())
    }

    fn sample(&self, time: f64, bodies: &[Body]) -> Sample {
        Sample {
            time,
            body_a: bodies[self.body_a].planar_position(),
            body_b: bodies[self.body_b].planar_position(),
        }
    }
}

impl Default for SampleSelector {
    /// Moon then Earth in the default scenario.
    fn default() -> Self {
        Self::new(1, 0)
    }
}

/// Fixed-step driver. Every body of a step is computed from the same
/// snapshot; the new batch replaces the snapshot only once all of it
/// succeeded.
///
/// On the first integrator failure the run is aborted: the failing step's
/// partial batch is dropped, the caller's collection is left at the last
/// completed step, and the error is returned. `run` checks every integrator
/// precondition before the first step, so with the built-in stepper this path
/// only guards against a failure the checks did not foresee.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub time_step: f64,
    pub total_steps: u64,
    pub sample_interval: u64,
    pub selector: SampleSelector,
    show_progress: bool,
    parallel: Option<bool>,
}

impl Simulation {
    pub fn new(time_step: f64, total_steps: u64, sample_interval: u64) -> Self {
        Self {
            time_step,
            total_steps,
            sample_interval,
            selector: SampleSelector::default(),
            show_progress: false,
            parallel: None,
        }
    }

    pub fn with_selector(mut self, selector: SampleSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Forces the per-body loop onto (or off) the rayon pool instead of
    /// deciding from [`PARALLEL_THRESHOLD`].
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Number of samples a run produces: `total_steps / sample_interval`.
    /// Saturates at `usize::MAX`, which no buffer can hold.
    pub fn record_len(&self) -> usize {
        if self.sample_interval == 0 {
            0
        } else {
            usize::try_from(self.total_steps / self.sample_interval).unwrap_or(usize::MAX)
        }
    }

    /// A zeroed record buffer of exactly [`Self::record_len`] samples.
    pub fn allocate_record(&self) -> Result<Vec<Sample>> {
        let samples = self.record_len();
        let mut record = Vec::new();
        record
            .try_reserve_exact(samples)
            .map_err(|_| Error::RecordAllocation { samples })?;
        record.resize(samples, Sample::default());
        Ok(record)
    }

    fn validate(&self, bodies: &[Body], record: &[Sample]) -> Result<()> {
        if self.sample_interval == 0 {
            return Err(Error::InvalidSampleInterval);
        }
        if !(self.time_step > 0.0) {
            return Err(Error::InvalidTimeStep(self.time_step));
        }
        let expected = self.record_len();
        if record.len() != expected {
            return Err(Error::RecordLengthMismatch {
                expected,
                actual: record.len(),
            });
        }
        self.selector.validate(bodies.len())
    }

    /// Advances `bodies` by `total_steps` steps, filling `record`.
    ///
    /// Samples are taken at steps `k * sample_interval` for
    /// `k < record.len()`, so a trailing partial interval is never sampled.
    pub fn run(&self, bodies: &mut [Body], record: &mut [Sample]) -> Result<()> {
        self.validate(bodies, record)?;
        let parallel = self.parallel.unwrap_or(bodies.len() >= PARALLEL_THRESHOLD);
        let time_step = self.time_step;
        self.run_with(bodies, record, |_, snapshot, next| {
            if parallel {
                advance_parallel(snapshot, next, time_step)
            } else {
                advance(snapshot, next, time_step)
            }
        })
    }

    /// Drives an already validated run, calling `stepper(step, snapshot,
    /// next)` to fill the next-state buffer for each step.
    fn run_with<F>(&self, bodies: &mut [Body], record: &mut [Sample], stepper: F) -> Result<()>
    where
        F: FnMut(u64, &[Body], &mut [Body]) -> Result<()>,
    {
        let pb = if self.show_progress {
            let pb = ProgressBar::new(self.total_steps);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut current = bodies.to_vec();
        let mut next = current.clone();
        let outcome = self.step_all(&mut current, &mut next, record, &pb, stepper);

        bodies.copy_from_slice(&current);
        match &outcome {
            Ok(()) => pb.finish_with_message("Simulation complete"),
            Err(_) => pb.abandon_with_message("Simulation aborted"),
        }
        outcome
    }

    fn step_all<F>(
        &self,
        current: &mut Vec<Body>,
        next: &mut Vec<Body>,
        record: &mut [Sample],
        pb: &ProgressBar,
        mut stepper: F,
    ) -> Result<()>
    where
        F: FnMut(u64, &[Body], &mut [Body]) -> Result<()>,
    {
        for step in 0..self.total_steps {
            stepper(step, current.as_slice(), next.as_mut_slice())?;

            if step % self.sample_interval == 0 {
                let sample_idx = (step / self.sample_interval) as usize;
                if let Some(slot) = record.get_mut(sample_idx) {
                    *slot = self.selector.sample(step as f64 * self.time_step, current);
                }
                pb.set_position(step);
            }

            std::mem::swap(current, next);
        }
        pb.set_position(self.total_steps);
        Ok(())
    }
}

/// Writes every body of `snapshot`, one step forward, into the matching slot
/// of `next`. Stops at the first failure.
pub fn advance(snapshot: &[Body], next: &mut [Body], time_step: f64) -> Result<()> {
    for (i, slot) in next.iter_mut().enumerate() {
        integrator_step(Some(slot), Some(snapshot), i, time_step)?;
    }
    Ok(())
}

/// Same as [`advance`], with one rayon task per body. Each task reads the
/// shared snapshot and writes only its own slot; returning is the barrier.
pub fn advance_parallel(snapshot: &[Body], next: &mut [Body], time_step: f64) -> Result<()> {
    next.par_iter_mut()
        .enumerate()
        .try_for_each(|(i, slot)| integrator_step(Some(slot), Some(snapshot), i, time_step))
}

/// Free-function form of [`Simulation::run`].
pub fn run_simulation(
    bodies: &mut [Body],
    total_steps: u64,
    time_step: f64,
    record: &mut [Sample],
    sample_interval: u64,
    selector: SampleSelector,
) -> Result<()> {
    Simulation::new(time_step, total_steps, sample_interval)
        .with_selector(selector)
        .run(bodies, record)
}
