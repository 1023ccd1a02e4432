//! One body's gravitational step against a frozen snapshot.
//!
//! Semi-implicit (symplectic) Euler: every other body's pull is accumulated
//! into the velocity first, then the position is advanced with the updated
//! velocity.

use crate::body::Body;
use crate::error::{Error, Result};

/// Gravitational constant, m^3 kg^-1 s^-2.
pub const G: f64 = 6.673e-11;

pub const X: usize = 0;
pub const Y: usize = 1;
pub const Z: usize = 2;
const AXES: [usize; 3] = [X, Y, Z];

/// Computes body `index` of `bodies` one `time_step` forward.
///
/// Bodies at zero distance (including the body itself) contribute no
/// acceleration. The snapshot is only read, so calls for different indices
/// may run in any order or concurrently.
pub fn step_body(bodies: &[Body], index: usize, time_step: f64) -> Result<Body> {
    if index >= bodies.len() {
        return Err(Error::IndexOutOfRange {
            index,
            len: bodies.len(),
        });
    }
    // NaN fails this comparison too
    if !(time_step > 0.0) {
        return Err(Error::InvalidTimeStep(time_step));
    }

    let origin = bodies[index].position;
    let mut output = bodies[index];

    for other in bodies {
        let r_vec = other.position - origin;
        let r_sq = r_vec.norm_squared();
        let r = r_sq.sqrt();
        if r == 0.0 {
            continue;
        }
        let acceleration = G * other.mass() / r_sq;
        for axis in AXES {
            output.velocity[axis] += acceleration * time_step * (r_vec[axis] / r);
        }
    }

    for axis in AXES {
        output.position[axis] += output.velocity[axis] * time_step;
    }

    Ok(output)
}

/// Slot-writing form of [`step_body`]: validates that both the destination
/// and the collection are present, then writes the advanced body into
/// `output`. On error `output` is left untouched.
pub fn integrator_step(
    output: Option<&mut Body>,
    bodies: Option<&[Body]>,
    index: usize,
    time_step: f64,
) -> Result<()> {
    let output = output.ok_or(Error::OutputNull)?;
    let bodies = bodies.ok_or(Error::CollectionNull)?;
    *output = step_body(bodies, index, time_step)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn body(mass: f64, position: [f64; 3], velocity: [f64; 3]) -> Body {
        Body::new(mass, Vector3::from(position), Vector3::from(velocity)).unwrap()
    }

    #[test]
    fn lone_body_drifts_without_force() {
        let b = body(1.0e24, [1.0, 2.0, 3.0], [10.0, -4.0, 0.5]);
        let dt = 0.25;
        let next = step_body(&[b], 0, dt).unwrap();

        assert_eq!(next.velocity, b.velocity);
        assert_eq!(next.position.x, 1.0 + 10.0 * dt);
        assert_eq!(next.position.y, 2.0 + -4.0 * dt);
        assert_eq!(next.position.z, 3.0 + 0.5 * dt);
        assert_eq!(next.mass(), b.mass());
    }

    #[test]
    fn equal_masses_attract_each_other() {
        let bodies = [
            body(1.0e20, [-1.0e3, 0.0, 0.0], [0.0; 3]),
            body(1.0e20, [1.0e3, 0.0, 0.0], [0.0; 3]),
        ];
        let left = step_body(&bodies, 0, 1.0).unwrap();
        let right = step_body(&bodies, 1, 1.0).unwrap();

        assert!(left.position.x > -1.0e3 && left.position.x < 1.0e3);
        assert!(right.position.x < 1.0e3 && right.position.x > -1.0e3);
        assert_eq!(left.position.x, -right.position.x);
        assert_eq!(left.position.y, 0.0);
        assert_eq!(right.position.z, 0.0);
    }

    #[test]
    fn velocity_change_matches_inverse_square() {
        let bodies = [
            body(1.0, [0.0; 3], [0.0; 3]),
            body(5.0e10, [0.0, 10.0, 0.0], [0.0; 3]),
        ];
        let dt = 2.0;
        let next = step_body(&bodies, 0, dt).unwrap();
        let expected = G * 5.0e10 / 100.0 * dt;
        assert!((next.velocity.y - expected).abs() < 1e-15);
        // position uses the updated velocity
        assert_eq!(next.position.y, next.velocity.y * dt);
    }

    #[test]
    fn coincident_bodies_contribute_nothing() {
        let bodies = [
            body(1.0e30, [5.0, 5.0, 5.0], [1.0, 0.0, 0.0]),
            body(1.0e30, [5.0, 5.0, 5.0], [0.0; 3]),
        ];
        let next = step_body(&bodies, 0, 1.0).unwrap();
        assert_eq!(next.velocity, Vector3::new(1.0, 0.0, 0.0));
        assert!(next.position.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn index_past_end_is_rejected() {
        let bodies = [body(1.0, [0.0; 3], [0.0; 3])];
        for index in [1, 2, usize::MAX] {
            for dt in [1.0, -1.0, 0.0] {
                assert!(matches!(
                    step_body(&bodies, index, dt),
                    Err(Error::IndexOutOfRange { .. })
                ));
            }
        }
        assert!(matches!(
            step_body(&[], 0, 1.0),
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn non_positive_time_step_is_rejected() {
        let bodies = [body(1.0, [0.0; 3], [0.0; 3])];
        for dt in [0.0, -0.0, -1.0, f64::NEG_INFINITY, f64::NAN] {
            assert!(matches!(
                step_body(&bodies, 0, dt),
                Err(Error::InvalidTimeStep(_))
            ));
        }
    }

    #[test]
    fn slot_form_checks_destination_then_collection() {
        let bodies = [body(1.0, [0.0; 3], [1.0, 0.0, 0.0])];
        let mut slot = bodies[0];

        assert!(matches!(
            integrator_step(None, Some(&bodies), 0, 1.0),
            Err(Error::OutputNull)
        ));
        assert!(matches!(
            integrator_step(Some(&mut slot), None, 0, 1.0),
            Err(Error::CollectionNull)
        ));
        assert!(matches!(
            integrator_step(None, None, 7, -1.0),
            Err(Error::OutputNull)
        ));

        integrator_step(Some(&mut slot), Some(&bodies), 0, 1.0).unwrap();
        assert_eq!(slot.position.x, 1.0);
        assert_eq!(bodies[0].position.x, 0.0);
    }
}
