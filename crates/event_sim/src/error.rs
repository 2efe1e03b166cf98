//! Error types for loading inputs and running simulations

use event_core::{EventError, ScheduleError};
use std::path::PathBuf;
use thiserror::Error;

/// Failures reading a roster or sort-order source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV")]
    Csv(#[from] csv::Error),

    #[error("source has no header row or no data rows")]
    EmptySource,

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Event(#[from] EventError),

    #[error("cannot read config {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize summary")]
    Json(#[from] serde_json::Error),

    #[error("cannot write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
