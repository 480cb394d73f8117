//! Single-elimination bracket skeletons.
//!
//! The engine only builds the tree and seed assignment. Advancing winners
//! into later rounds is left to the caller.

use crate::{
    entities::{Competitor, MatchStatus, seed_order},
    errors::{EngineError, EngineResult},
    round_robin::StandingRecord,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One match slot in a bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlot {
    /// Slot ID (`match-<round>-<position>`)
    pub id: String,
    /// Round number (1-indexed)
    pub round: u32,
    /// Position within the round (1-indexed)
    pub position: u32,
    pub home: Option<Competitor>,
    pub away: Option<Competitor>,
    /// 1-based seed of the home side
    pub home_seed: Option<u32>,
    /// 1-based seed of the away side
    pub away_seed: Option<u32>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub winner: Option<Competitor>,
    pub status: MatchStatus,
    /// Automatic pass: `home` advances without playing
    pub is_bye: bool,
}

impl BracketSlot {
    fn empty(round: u32, position: u32) -> Self {
        Self {
            id: format!("match-{round}-{position}"),
            round,
            position,
            home: None,
            away: None,
            home_seed: None,
            away_seed: None,
            home_score: None,
            away_score: None,
            winner: None,
            status: MatchStatus::Pending,
            is_bye: false,
        }
    }

    fn seeded(position: u32, home: (u32, &Competitor), away: (u32, &Competitor)) -> Self {
        Self {
            home: Some(home.1.clone()),
            away: Some(away.1.clone()),
            home_seed: Some(home.0),
            away_seed: Some(away.0),
            ..Self::empty(1, position)
        }
    }

    fn bye(position: u32, seed: u32, competitor: &Competitor) -> Self {
        Self {
            home: Some(competitor.clone()),
            home_seed: Some(seed),
            winner: Some(competitor.clone()),
            status: MatchStatus::Completed,
            is_bye: true,
            ..Self::empty(1, position)
        }
    }
}

/// A single-elimination bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub id: String,
    pub name: String,
    pub total_competitors: usize,
    pub num_rounds: u32,
    /// Slots per round; round `k + 1` has half the slots of round `k`
    pub rounds: Vec<Vec<BracketSlot>>,
    /// Competitors in seed order (seed = index + 1)
    pub seeds: Vec<Competitor>,
    pub winner: Option<Competitor>,
    pub is_complete: bool,
}

impl Bracket {
    /// Number of first-round byes
    pub fn bye_count(&self) -> usize {
        self.rounds
            .first()
            .map_or(0, |round| round.iter().filter(|slot| slot.is_bye).count())
    }

    /// 1-based seed of a competitor
    pub fn seed_of(&self, competitor_id: &str) -> Option<u32> {
        self.seeds
            .iter()
            .position(|c| c.id == competitor_id)
            .map(|idx| idx as u32 + 1)
    }
}

/// Builds bracket skeletons
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketEngine;

impl BracketEngine {
    pub fn new() -> Self {
        Self
    }

    /// Build a bracket from a raw competitor list
    ///
    /// Competitors are seeded by (affiliation, name). The top seeds receive
    /// the byes and the rest are paired in seed order.
    ///
    /// # Errors
    ///
    /// * `EngineError::InvalidArgument` - fewer than 2 competitors
    pub fn build_bracket(&self, competitors: &[Competitor], name: &str) -> EngineResult<Bracket> {
        let mut seeds = competitors.to_vec();
        seed_order(&mut seeds);
        assemble(name, seeds, |n| (0..n / 2).map(|i| (2 * i, 2 * i + 1)).collect())
    }

    /// Build a bracket from ranked qualifiers, best first
    ///
    /// The ranking is kept as the seed order. Byes go to the top seeds and the
    /// remaining seeds meet best-versus-worst.
    ///
    /// # Errors
    ///
    /// * `EngineError::InvalidArgument` - fewer than 2 qualifiers
    pub fn build_from_qualifiers(
        &self,
        name: &str,
        qualifiers: &[StandingRecord],
    ) -> EngineResult<Bracket> {
        let seeds = qualifiers.iter().map(|q| q.competitor.clone()).collect();
        assemble(name, seeds, |n| (0..n / 2).map(|i| (i, n - 1 - i)).collect())
    }
}

/// `pair` maps the number of non-bye seeds to index pairs into them.
fn assemble<F>(name: &str, seeds: Vec<Competitor>, pair: F) -> EngineResult<Bracket>
where
    F: Fn(usize) -> Vec<(usize, usize)>,
{
    let n = seeds.len();
    if n < 2 {
        return Err(EngineError::invalid(
            "At least 2 competitors required for a knockout bracket",
        ));
    }

    let size = n.next_power_of_two();
    let byes = size - n;
    let num_rounds = size.trailing_zeros();

    let seeded: Vec<(u32, &Competitor)> = seeds
        .iter()
        .enumerate()
        .map(|(idx, c)| (idx as u32 + 1, c))
        .collect();
    let (bye_seeds, playing) = seeded.split_at(byes);

    let mut first = Vec::with_capacity(size / 2);
    for (home, away) in pair(playing.len()) {
        let position = first.len() as u32 + 1;
        first.push(BracketSlot::seeded(position, playing[home], playing[away]));
    }
    for &(seed, competitor) in bye_seeds {
        let position = first.len() as u32 + 1;
        first.push(BracketSlot::bye(position, seed, competitor));
    }

    let mut rounds = vec![first];
    let mut slots = size / 2;
    for round in 2..=num_rounds {
        slots /= 2;
        rounds.push((1..=slots as u32).map(|p| BracketSlot::empty(round, p)).collect());
    }

    log::debug!(
        "Built bracket '{}': {} competitors, {} byes, {} rounds",
        name,
        n,
        byes,
        num_rounds
    );

    Ok(Bracket {
        id: format!("bracket-{}", Uuid::new_v4()),
        name: name.to_string(),
        total_competitors: n,
        num_rounds,
        rounds,
        seeds,
        winner: None,
        is_complete: false,
    })
}
