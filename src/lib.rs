//! Point masses under mutual Newtonian gravitation, advanced with
//! semi-implicit Euler and sampled at a fixed step cadence.

pub mod body;
pub mod config;
pub mod energy;
pub mod error;
pub mod integrator;
pub mod record;
pub mod scenario;
pub mod simulation;

pub use body::Body;
pub use error::{Error, Result};
pub use integrator::{integrator_step, step_body, G};
pub use simulation::{run_simulation, Sample, SampleSelector, Simulation};
