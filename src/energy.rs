use crate::body::Body;
use crate::integrator::G;
use itertools::Itertools;

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies
        .iter()
        .map(|b| 0.5 * b.mass() * b.velocity.norm_squared())
        .sum()
}

/// Pairwise gravitational potential. Coincident pairs are skipped, matching
/// the zero-force rule of the integrator.
pub fn potential_energy(bodies: &[Body]) -> f64 {
    bodies
        .iter()
        .tuple_combinations()
        .map(|(a, b)| {
            let r = (a.position - b.position).norm();
            if r > 0.0 {
                -G * a.mass() * b.mass() / r
            } else {
                0.0
            }
        })
        .sum()
}

pub fn total_energy(bodies: &[Body]) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies)
}

/// `(final - initial) / |initial|`; zero when the initial energy is zero.
pub fn relative_drift(initial: f64, current: f64) -> f64 {
    if initial == 0.0 {
        0.0
    } else {
        (current - initial) / initial.abs()
    }
}
