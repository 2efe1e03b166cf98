//! Error types for schedule resolution and event lifecycle

use std::path::PathBuf;
use thiserror::Error;

use crate::event::EventStage;

/// Failures resolving or parsing a schedule template.
///
/// All of these are configuration errors: the caller decides whether to abort.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("no schedule template exists for {teams} teams and {matches} matches")]
    TemplateNotFound { teams: usize, matches: usize },

    #[error("malformed schedule template at line {line}: {reason}")]
    MalformedTemplate { line: u64, reason: String },

    #[error("slot {slot} on template line {line} is outside a roster of {teams} teams")]
    SlotOutOfRange { line: u64, slot: usize, teams: usize },

    #[error("failed to read schedule template {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures driving an [`Event`](crate::event::Event) through its lifecycle.
#[derive(Debug, Error)]
pub enum EventError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("template is for {template} teams but the roster has {roster}")]
    RosterMismatch { template: usize, roster: usize },

    #[error("cannot {operation} an event that is {stage}")]
    OutOfOrder {
        operation: &'static str,
        stage: EventStage,
    },
}
