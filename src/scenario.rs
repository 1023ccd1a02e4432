// src/scenario.rs

use crate::body::Body;
use crate::error::Result;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const SUN_MASS: f64 = 1.9885e30;
pub const EARTH_MASS: f64 = 5.972e24;
pub const MOON_MASS: f64 = 7.34767309e22;

/// Earth at aphelion, 1.521e11 m from the Sun along +y.
const EARTH_POSITION: [f64; 3] = [0.0, 1.521e11, 0.0];
const EARTH_VELOCITY: [f64; 3] = [-2.929e4, 0.0, 0.0];
const MOON_POSITION: [f64; 3] = [4.054e8, 1.521e11, 0.0];
const MOON_VELOCITY: [f64; 3] = [-2.929e4, -964.0, 0.0];

/// Initial state of one body as stored in a scenario file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySpec {
    pub mass: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

impl BodySpec {
    pub fn build(&self) -> Result<Body> {
        Body::new(
            self.mass,
            Vector3::from(self.position),
            Vector3::from(self.velocity),
        )
    }
}

/// A JSON scenario file: `{ "bodies": [ { "mass", "position", "velocity" } ] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub bodies: Vec<BodySpec>,
}

impl ScenarioFile {
    pub fn build(&self) -> Result<Vec<Body>> {
        self.bodies.iter().map(BodySpec::build).collect()
    }
}

pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Vec<Body>> {
    let reader = BufReader::new(File::open(path)?);
    let file: ScenarioFile = serde_json::from_reader(reader)?;
    file.build()
}

fn fixed(mass: f64, position: [f64; 3], velocity: [f64; 3]) -> Body {
    Body::from_constants(mass, Vector3::from(position), Vector3::from(velocity))
}

/// Earth (0), Moon (1) and Sun (2).
pub fn moon_earth_sun() -> Vec<Body> {
    vec![
        fixed(EARTH_MASS, EARTH_POSITION, EARTH_VELOCITY),
        fixed(MOON_MASS, MOON_POSITION, MOON_VELOCITY),
        fixed(SUN_MASS, [0.0; 3], [0.0; 3]),
    ]
}

/// Sun (0) and Earth (1).
pub fn sun_earth() -> Vec<Body> {
    vec![
        fixed(SUN_MASS, [0.0; 3], [0.0; 3]),
        fixed(EARTH_MASS, EARTH_POSITION, EARTH_VELOCITY),
    ]
}

/// Display names for the bodies of the built-in scenarios.
pub fn labels(scenario: &[Body]) -> Vec<String> {
    scenario
        .iter()
        .enumerate()
        .map(|(i, b)| match b.mass() {
            m if m == SUN_MASS => "Sun".to_string(),
            m if m == EARTH_MASS => "Earth".to_string(),
            m if m == MOON_MASS => "Moon".to_string(),
            _ => format!("Body{i}"),
        })
        .collect()
}
