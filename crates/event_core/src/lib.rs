//! Qualification event core
//!
//! This crate provides the deterministic part of an event simulation:
//! - Teams carrying a bag of numeric attributes
//! - Alliance matches scored through a pluggable scoring function
//! - Schedule templates resolved from a read-only template store
//! - Event scoring and multi-key ranking
//!
//! Nothing here is random. Team-to-slot permutation and repeated trials
//! live in the `event_sim` crate.

pub mod error;
pub mod event;
pub mod matchup;
pub mod ranking;
pub mod schedule;
pub mod scoring;
pub mod team;

pub use error::*;
pub use event::*;
pub use matchup::*;
pub use ranking::*;
pub use schedule::*;
pub use scoring::*;
pub use team::*;
