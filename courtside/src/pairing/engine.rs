//! Pairing engine entry point.

use super::search::PairingSearch;
use crate::{
    entities::{Competitor, Fixture, seed_order},
    errors::{EngineError, EngineResult},
};
use serde::{Deserialize, Serialize};

/// Largest field accepted by default. The search is worst-case exponential,
/// so callers must bound the input.
pub const DEFAULT_MAX_PAIRING_COMPETITORS: usize = 32;

/// Pairing output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingResult {
    /// Real matches (the bye is never listed here)
    pub matches: Vec<Fixture>,
    /// Number of same-affiliation matches
    pub total_penalty: u32,
    /// Competitor receiving the automatic pass, for odd fields
    pub bye: Option<Competitor>,
}

impl PairingResult {
    pub fn has_bye(&self) -> bool {
        self.bye.is_some()
    }
}

/// Pairs competitors minimizing same-affiliation matchups
#[derive(Debug, Clone)]
pub struct PairingEngine {
    max_competitors: usize,
}

impl Default for PairingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PairingEngine {
    /// Create a pairing engine with the default input bound
    pub fn new() -> Self {
        Self {
            max_competitors: DEFAULT_MAX_PAIRING_COMPETITORS,
        }
    }

    /// Create a pairing engine accepting at most `max_competitors`
    pub fn with_max_competitors(max_competitors: usize) -> Self {
        Self { max_competitors }
    }

    /// Pair a field of competitors
    ///
    /// Competitors are put into seeding order (affiliation, name) first, so the
    /// output is fully determined by the input set.
    ///
    /// # Errors
    ///
    /// * `EngineError::InvalidArgument` - more competitors than the configured bound
    /// * `EngineError::Infeasible` - the search produced no complete pairing
    pub fn pair(&self, competitors: &[Competitor]) -> EngineResult<PairingResult> {
        if competitors.len() < 2 {
            return Ok(PairingResult {
                matches: Vec::new(),
                total_penalty: 0,
                bye: competitors.first().cloned(),
            });
        }

        if competitors.len() > self.max_competitors {
            return Err(EngineError::invalid(format!(
                "Pairing accepts at most {} competitors, got {}",
                self.max_competitors,
                competitors.len()
            )));
        }

        let mut sorted = competitors.to_vec();
        seed_order(&mut sorted);

        let (best, nodes) = PairingSearch::new(&sorted).run();
        let Some(best) = best else {
            log::error!(
                "Pairing search over {} competitors found no complete solution",
                sorted.len()
            );
            return Err(EngineError::Infeasible(
                "Failed to generate pairings".to_string(),
            ));
        };

        let mut matches = Vec::with_capacity(best.slots.len());
        let mut bye = None;
        for (first, partner) in best.slots {
            match partner {
                Some(partner) => {
                    let position = matches.len() as u32 + 1;
                    matches.push(Fixture::new(
                        1,
                        position,
                        sorted[first].clone(),
                        sorted[partner].clone(),
                    ));
                }
                None => bye = Some(sorted[first].clone()),
            }
        }

        log::debug!(
            "Paired {} competitors: penalty {}, {} search nodes",
            sorted.len(),
            best.penalty,
            nodes
        );

        Ok(PairingResult {
            matches,
            total_penalty: best.penalty,
            bye,
        })
    }
}
