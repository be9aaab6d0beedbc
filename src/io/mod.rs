//! IO module - job configuration and file handling.

mod config;

pub use config::{read_job, BasisSource, JobSpec};
