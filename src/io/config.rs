//! YAML job files describing a full variational run.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::basis::{common_basis, Basis, BasisFunction, BasisKind, DiffMode};
use crate::error::{BasisError, ConfigError};
use crate::DEF_POINTS;

/// Where the trial functions come from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasisSource {
    /// Explicit expression strings, e.g. `"sin(x) + 2"`.
    Expressions(Vec<String>),
    /// The first `count` members of a generated family.
    Generated { kind: BasisKind, count: usize },
}

/// A variational job.
///
/// Example job file:
///
/// ```yaml
/// basis:
///   expressions:
///     - "x - x^2"
///     - "x^2 - x^3"
/// domain: [0.0, 1.0]
/// mass: 1.0
/// potential: 0.0
/// points: 100
/// mode: analytic
/// orthonormalize: true
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    pub basis: BasisSource,
    /// Domain endpoints, in either order.
    pub domain: (f64, f64),
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default)]
    pub potential: f64,
    #[serde(default = "default_points")]
    pub points: usize,
    #[serde(default)]
    pub mode: DiffMode,
    #[serde(default = "default_true")]
    pub orthonormalize: bool,
}

fn default_mass() -> f64 {
    1.0
}

fn default_points() -> usize {
    DEF_POINTS
}

fn default_true() -> bool {
    true
}

impl JobSpec {
    /// Materialize the trial basis this job describes.
    pub fn build_basis(&self) -> Result<Basis, BasisError> {
        let (lower, upper) = self.domain;
        match &self.basis {
            BasisSource::Expressions(sources) => {
                let mut set = Vec::with_capacity(sources.len());
                for src in sources {
                    set.push(BasisFunction::parse_with_domain(src, lower, upper)?);
                }
                Basis::new(set)
            }
            BasisSource::Generated { kind, count } => common_basis(*kind, *count, lower, upper),
        }
    }
}

/// Read a job description from a YAML file.
pub fn read_job<P: AsRef<Path>>(path: P) -> Result<JobSpec, ConfigError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_yaml::from_reader(reader)?)
}
