//! Round-robin engine: standard and dynamic-knockout generation.

use super::{
    models::{DynamicKnockout, MatchResolver, RoundRobinOptions, RoundRobinResult, Unplayed},
    rotation::rotate,
    standings::Standings,
};
use crate::{
    entities::{Competitor, Fixture},
    errors::EngineResult,
};

/// Generates round-robin fixtures
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobinEngine;

impl RoundRobinEngine {
    pub fn new() -> Self {
        Self
    }

    /// Generate fixtures with no results
    ///
    /// In dynamic-knockout mode every competitor ties on zero points, so
    /// eliminations fall back to the name tie-break.
    ///
    /// # Errors
    ///
    /// * `EngineError::InvalidArgument` - invalid dynamic-knockout parameters
    pub fn generate(
        &self,
        competitors: &[Competitor],
        options: &RoundRobinOptions,
    ) -> EngineResult<RoundRobinResult> {
        self.generate_with_results(competitors, options, &mut Unplayed)
    }

    /// Generate fixtures, recording each result supplied by `resolver`
    ///
    /// # Arguments
    ///
    /// * `competitors` - Starting field
    /// * `options` - Points table and optional dynamic knockout
    /// * `resolver` - Score source consulted once per generated fixture
    ///
    /// # Returns
    ///
    /// Rounds, penalty total, eliminations in order and ranked standings of
    /// the final pool
    ///
    /// # Errors
    ///
    /// * `EngineError::InvalidArgument` - invalid dynamic-knockout parameters
    pub fn generate_with_results<R: MatchResolver + ?Sized>(
        &self,
        competitors: &[Competitor],
        options: &RoundRobinOptions,
        resolver: &mut R,
    ) -> EngineResult<RoundRobinResult> {
        if let Some(knockout) = &options.dynamic_knockout {
            knockout.validate()?;
        }

        let has_odd_competitors = competitors.len() % 2 == 1;
        let mut standings = Standings::new(options.points);
        for competitor in competitors {
            standings.register(competitor);
        }

        let mut pool = competitors.to_vec();
        let mut rounds = Vec::new();
        let mut eliminated_competitors = Vec::new();

        if let Some(knockout) = options.dynamic_knockout {
            while pool.len() > knockout.min_players {
                let phase = play_phase(&pool, &knockout, next_round(&rounds), resolver, &mut standings);
                rounds.extend(phase);

                let dropped = eliminate(&mut pool, &knockout, &standings);
                log::info!(
                    "Round {}: eliminated {} ({} remain)",
                    rounds.len(),
                    dropped
                        .iter()
                        .map(|c| c.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                    pool.len()
                );
                eliminated_competitors.extend(dropped);
            }
        }

        let mut closing = rotate(&pool, next_round(&rounds));
        resolve_all(&mut closing, resolver, &mut standings);
        rounds.extend(closing);

        let total_penalty = rounds.iter().flatten().map(|f| f.penalty).sum();
        let num_rounds = rounds.len() as u32;

        log::debug!(
            "Round robin for {} competitors: {} rounds, penalty {}, {} eliminated",
            competitors.len(),
            num_rounds,
            total_penalty,
            eliminated_competitors.len()
        );

        Ok(RoundRobinResult {
            rounds,
            total_penalty,
            num_rounds,
            has_odd_competitors,
            eliminated_competitors,
            standings: standings.ranked_among(&pool),
        })
    }
}

fn next_round(rounds: &[Vec<Fixture>]) -> u32 {
    rounds.len() as u32 + 1
}

fn resolve_all<R: MatchResolver + ?Sized>(
    rounds: &mut [Vec<Fixture>],
    resolver: &mut R,
    standings: &mut Standings,
) {
    for fixture in rounds.iter_mut().flatten() {
        if let Some((home, away)) = resolver.resolve(fixture) {
            fixture.record_result(home, away);
        }
        standings.record(fixture);
    }
}

/// Play the first `elimination_frequency` rounds of a fresh rotation over `pool`
fn play_phase<R: MatchResolver + ?Sized>(
    pool: &[Competitor],
    knockout: &DynamicKnockout,
    first_round: u32,
    resolver: &mut R,
    standings: &mut Standings,
) -> Vec<Vec<Fixture>> {
    let mut phase: Vec<Vec<Fixture>> = rotate(pool, first_round)
        .into_iter()
        .take(knockout.elimination_frequency as usize)
        .collect();
    resolve_all(&mut phase, resolver, standings);
    phase
}

/// Drop the lowest-ranked competitors of the pool, never going below the floor.
/// Returns them worst first.
fn eliminate(
    pool: &mut Vec<Competitor>,
    knockout: &DynamicKnockout,
    standings: &Standings,
) -> Vec<Competitor> {
    let count = knockout
        .elimination_count
        .min(pool.len().saturating_sub(knockout.min_players));

    let dropped: Vec<Competitor> = standings
        .ranked_among(pool)
        .into_iter()
        .rev()
        .take(count)
        .map(|record| record.competitor)
        .collect();

    pool.retain(|c| !dropped.iter().any(|d| d.id == c.id));
    dropped
}
