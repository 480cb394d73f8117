//! Round-robin options and result models.

use super::standings::{PointsTable, StandingRecord};
use crate::{
    entities::{Competitor, Fixture},
    errors::{EngineError, EngineResult},
};
use serde::{Deserialize, Serialize};

/// Progressive elimination between phases of rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicKnockout {
    /// Rounds played per phase before an elimination step
    pub elimination_frequency: u32,
    /// Competitors dropped per elimination step
    pub elimination_count: usize,
    /// Pool size at which eliminations stop and a final round robin is played
    pub min_players: usize,
}

impl DynamicKnockout {
    pub fn new(elimination_frequency: u32, elimination_count: usize, min_players: usize) -> Self {
        Self {
            elimination_frequency,
            elimination_count,
            min_players,
        }
    }

    /// Validate the elimination parameters
    pub fn validate(&self) -> EngineResult<()> {
        if self.elimination_frequency == 0 {
            return Err(EngineError::invalid(
                "Elimination frequency must be at least one round",
            ));
        }

        if self.elimination_count == 0 {
            return Err(EngineError::invalid(
                "Elimination count must be at least one competitor",
            ));
        }

        if self.min_players < 2 {
            return Err(EngineError::invalid(
                "Minimum players must be at least 2",
            ));
        }

        Ok(())
    }
}

/// Round-robin generation options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRobinOptions {
    /// Enables progressive elimination when set
    pub dynamic_knockout: Option<DynamicKnockout>,
    /// Points awarded per result
    pub points: PointsTable,
}

impl RoundRobinOptions {
    /// Options for a dynamic-knockout run
    pub fn dynamic(knockout: DynamicKnockout) -> Self {
        Self {
            dynamic_knockout: Some(knockout),
            points: PointsTable::default(),
        }
    }

    pub fn with_points(mut self, points: PointsTable) -> Self {
        self.points = points;
        self
    }
}

/// Round-robin output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRobinResult {
    /// Real fixtures per round; byes are never listed
    pub rounds: Vec<Vec<Fixture>>,
    /// Same-affiliation fixtures across all rounds
    pub total_penalty: u32,
    pub num_rounds: u32,
    /// Whether the starting field had an odd size
    pub has_odd_competitors: bool,
    /// Dropped competitors in elimination order (dynamic knockout only)
    pub eliminated_competitors: Vec<Competitor>,
    /// Ranked standings of the competitors still in the pool at the end
    pub standings: Vec<StandingRecord>,
}

/// Source of results for generated fixtures.
///
/// The engine never plays matches itself. In dynamic-knockout mode the
/// resolver supplies the scores that drive each elimination step.
pub trait MatchResolver {
    /// Return `(home_score, away_score)` for a played fixture, `None` otherwise
    fn resolve(&mut self, fixture: &Fixture) -> Option<(u32, u32)>;
}

impl<F> MatchResolver for F
where
    F: FnMut(&Fixture) -> Option<(u32, u32)>,
{
    fn resolve(&mut self, fixture: &Fixture) -> Option<(u32, u32)> {
        self(fixture)
    }
}

/// Resolver for fixtures that have not been played
#[derive(Debug, Clone, Copy, Default)]
pub struct Unplayed;

impl MatchResolver for Unplayed {
    fn resolve(&mut self, _fixture: &Fixture) -> Option<(u32, u32)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_knockout_validation() {
        assert!(DynamicKnockout::new(1, 1, 2).validate().is_ok());
        assert!(DynamicKnockout::new(0, 1, 2).validate().is_err());
        assert!(DynamicKnockout::new(1, 0, 2).validate().is_err());
        assert!(DynamicKnockout::new(1, 1, 1).validate().is_err());
    }

    #[test]
    fn test_closure_resolver() {
        let mut resolver = |fixture: &Fixture| (fixture.round == 1).then_some((2, 1));
        let fixture = Fixture::new(
            1,
            1,
            Competitor::new("a", "A", 20, "x"),
            Competitor::new("b", "B", 20, "y"),
        );
        assert_eq!(resolver.resolve(&fixture), Some((2, 1)));
        assert_eq!(Unplayed.resolve(&fixture), None);
    }
}
