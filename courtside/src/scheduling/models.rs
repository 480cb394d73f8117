//! Scheduling constraints and result models.

use super::errors::SchedulingConflict;
use crate::{
    entities::{CompetitorId, Court, CourtId, Fixture},
    errors::{EngineError, EngineResult},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Venue and rest rules applied to every placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConstraints {
    /// Length of every match in minutes
    pub match_duration_minutes: u32,
    /// Minimum gap between a competitor's matches in minutes
    pub minimum_rest_minutes: u32,
    /// Court turnaround after each match in minutes
    pub buffer_minutes: u32,
    /// Per-competitor daily cap
    pub max_matches_per_day: Option<u32>,
    /// Opening hour (inclusive)
    pub working_hours_start: u32,
    /// Closing hour (exclusive)
    pub working_hours_end: u32,
}

impl Default for SchedulingConstraints {
    fn default() -> Self {
        Self {
            match_duration_minutes: 60,
            minimum_rest_minutes: 30,
            buffer_minutes: 0,
            max_matches_per_day: None,
            working_hours_start: 8,
            working_hours_end: 22,
        }
    }
}

impl SchedulingConstraints {
    /// Validate the constraint set
    ///
    /// # Errors
    ///
    /// * `EngineError::InvalidArgument` - zero duration, an empty or
    ///   out-of-range window, a match longer than the window, or a zero daily cap
    pub fn validate(&self) -> EngineResult<()> {
        if self.match_duration_minutes == 0 {
            return Err(EngineError::invalid("Match duration must be positive"));
        }

        if self.working_hours_end > 24 || self.working_hours_start >= self.working_hours_end {
            return Err(EngineError::invalid(format!(
                "Invalid working hours {}..{}",
                self.working_hours_start, self.working_hours_end
            )));
        }

        let window = (self.working_hours_end - self.working_hours_start) * 60;
        if self.match_duration_minutes > window {
            return Err(EngineError::invalid(format!(
                "Match duration {} min exceeds the {} min working window",
                self.match_duration_minutes, window
            )));
        }

        if self.max_matches_per_day == Some(0) {
            return Err(EngineError::invalid("Max matches per day must be positive"));
        }

        Ok(())
    }
}

/// A fixture placed on a court
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    /// `match-<n>` in processing order
    pub id: String,
    pub fixture: Fixture,
    pub court: Court,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ScheduledMatch {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Rest bookkeeping for one competitor, overwritten on every placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRestState {
    pub competitor_id: CompetitorId,
    pub last_match_end: NaiveDateTime,
    pub next_available: NaiveDateTime,
}

/// Scheduling output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub scheduled_matches: Vec<ScheduledMatch>,
    /// Minutes from the first start to the last end
    pub total_schedule_minutes: i64,
    /// Booked share of the schedule span per active court, as a percentage
    pub court_utilization: BTreeMap<CourtId, f64>,
    pub conflicts: Vec<SchedulingConflict>,
}

impl ScheduleResult {
    pub fn is_complete(&self) -> bool {
        self.conflicts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constraints_are_valid() {
        let constraints = SchedulingConstraints::default();
        assert!(constraints.validate().is_ok());
        assert_eq!(constraints.match_duration_minutes, 60);
        assert_eq!(constraints.minimum_rest_minutes, 30);
    }

    #[test]
    fn test_invalid_constraints() {
        let base = SchedulingConstraints::default();
        let cases = [
            SchedulingConstraints {
                match_duration_minutes: 0,
                ..base
            },
            SchedulingConstraints {
                working_hours_start: 22,
                working_hours_end: 8,
                ..base
            },
            SchedulingConstraints {
                working_hours_end: 25,
                ..base
            },
            SchedulingConstraints {
                working_hours_start: 8,
                working_hours_end: 9,
                match_duration_minutes: 90,
                ..base
            },
            SchedulingConstraints {
                max_matches_per_day: Some(0),
                ..base
            },
        ];
        for constraints in cases {
            assert!(constraints.validate().is_err(), "{constraints:?}");
        }
    }
}
