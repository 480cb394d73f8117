//! Per-match scheduling failures.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a single fixture could not be placed
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictReason {
    #[error("No courts available for scheduling")]
    NoActiveCourts,

    #[error("Competitor {0} cannot play against themselves")]
    SameCompetitor(String),

    #[error("No slot inside working hours within {0} days")]
    BeyondHorizon(i64),
}

/// A fixture that was left unscheduled. Never fatal to the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConflict {
    /// 0-based index in processing order
    pub match_index: usize,
    pub home_id: String,
    pub away_id: String,
    pub reason: ConflictReason,
}

impl fmt::Display for SchedulingConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to schedule match {}: {}",
            self.match_index + 1,
            self.reason
        )
    }
}
