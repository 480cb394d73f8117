//! Engine configuration.
//!
//! Values are read from `COURTSIDE_*` environment variables. Missing or
//! unparsable values fall back to the defaults.

use crate::{
    errors::{EngineError, EngineResult},
    pairing::{DEFAULT_MAX_PAIRING_COMPETITORS, PairingEngine},
    round_robin::{PointsTable, RoundRobinOptions},
    scheduling::{SchedulingConstraints, SchedulingEngine},
};
use serde::{Deserialize, Serialize};

/// Tunables shared by the engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub scheduling: SchedulingConstraints,
    pub points: PointsTable,
    /// Largest field the pairing search accepts
    pub max_pairing_competitors: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scheduling: SchedulingConstraints::default(),
            points: PointsTable::default(),
            max_pairing_competitors: DEFAULT_MAX_PAIRING_COMPETITORS,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let scheduling = SchedulingConstraints {
            match_duration_minutes: parse_or(
                &lookup,
                "COURTSIDE_MATCH_DURATION_MINUTES",
                defaults.scheduling.match_duration_minutes,
            ),
            minimum_rest_minutes: parse_or(
                &lookup,
                "COURTSIDE_MIN_REST_MINUTES",
                defaults.scheduling.minimum_rest_minutes,
            ),
            buffer_minutes: parse_or(
                &lookup,
                "COURTSIDE_BUFFER_MINUTES",
                defaults.scheduling.buffer_minutes,
            ),
            max_matches_per_day: lookup("COURTSIDE_MAX_MATCHES_PER_DAY")
                .and_then(|v| v.parse().ok())
                .or(defaults.scheduling.max_matches_per_day),
            working_hours_start: parse_or(
                &lookup,
                "COURTSIDE_WORKING_HOURS_START",
                defaults.scheduling.working_hours_start,
            ),
            working_hours_end: parse_or(
                &lookup,
                "COURTSIDE_WORKING_HOURS_END",
                defaults.scheduling.working_hours_end,
            ),
        };

        let points = PointsTable {
            win: parse_or(&lookup, "COURTSIDE_WIN_POINTS", defaults.points.win),
            draw: parse_or(&lookup, "COURTSIDE_DRAW_POINTS", defaults.points.draw),
            loss: parse_or(&lookup, "COURTSIDE_LOSS_POINTS", defaults.points.loss),
        };

        Self {
            scheduling,
            points,
            max_pairing_competitors: parse_or(
                &lookup,
                "COURTSIDE_MAX_PAIRING_COMPETITORS",
                defaults.max_pairing_competitors,
            ),
        }
    }

    /// Validate configuration after loading
    ///
    /// # Errors
    ///
    /// * `EngineError::InvalidArgument` - invalid scheduling constraints or a
    ///   pairing bound below 2
    pub fn validate(&self) -> EngineResult<()> {
        self.scheduling.validate()?;

        if self.max_pairing_competitors < 2 {
            return Err(EngineError::invalid(
                "Max pairing competitors must be at least 2",
            ));
        }

        Ok(())
    }

    pub fn pairing_engine(&self) -> PairingEngine {
        PairingEngine::with_max_competitors(self.max_pairing_competitors)
    }

    pub fn scheduling_engine(&self) -> SchedulingEngine {
        SchedulingEngine::new(self.scheduling)
    }

    /// Standard round-robin options using the configured points table
    pub fn round_robin_options(&self) -> RoundRobinOptions {
        RoundRobinOptions::default().with_points(self.points)
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
