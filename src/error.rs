//! Configuration errors
//!
//! The simulation itself never fails; only building it from a bad description does.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("At least 2 spinners are required, got {0}")]
    TooFewSpinners(usize),
    #[error("Spinner {index}: {field} must be finite, got {value}")]
    NonFiniteOrbit {
        index: usize,
        field: &'static str,
        value: f64,
    },
    #[error("Spinner {index}: collision radius must be finite and positive, got {value}")]
    InvalidRadius { index: usize, value: f64 },
    #[error("Invalid tuning value for {field}: {value}")]
    InvalidTuning { field: &'static str, value: f64 },
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}
