// src/body.rs

use crate::error::{Error, Result};
use nalgebra::Vector3;
use std::fmt;

/// A point mass. Mass is fixed at construction; position and velocity are
/// replaced once per completed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    mass: f64,
}

impl Body {
    pub fn new(mass: f64, position: Vector3<f64>, velocity: Vector3<f64>) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidMass(mass));
        }
        Ok(Body {
            position,
            velocity,
            mass,
        })
    }

    /// For the built-in scenarios, whose masses are known to be valid.
    pub(crate) fn from_constants(mass: f64, position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        debug_assert!(mass.is_finite() && mass > 0.0);
        Body {
            position,
            velocity,
            mass,
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Position projected onto the x/y plane, as recorded in samples.
    pub fn planar_position(&self) -> (f64, f64) {
        (self.position.x, self.position.y)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Body(m={:.2e}, p=[{:.2e}, {:.2e}, {:.2e}], v=[{:.2e}, {:.2e}, {:.2e}])",
            self.mass,
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z
        )
    }
}
