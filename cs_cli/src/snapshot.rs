//! Tournament snapshot loading.
//!
//! A snapshot is the JSON document the surrounding service hands to the
//! engines: the field, the available courts and any results recorded so far.

use anyhow::{Context, Result, bail};
use courtside::{Competitor, Court, Fixture};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};

/// A recorded score between two competitors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedResult {
    pub home_id: String,
    pub away_id: String,
    pub home_score: u32,
    pub away_score: u32,
}

/// Competitors, courts and known results for one tournament
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tournament_id: Option<String>,
    pub competitors: Vec<Competitor>,
    #[serde(default)]
    pub courts: Vec<Court>,
    #[serde(default)]
    pub results: Vec<RecordedResult>,
}

impl Snapshot {
    /// Read and parse a snapshot file
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid JSON, or lists the same
    /// competitor id twice
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;

        let mut seen = std::collections::HashSet::new();
        for competitor in &snapshot.competitors {
            if !seen.insert(competitor.id.as_str()) {
                bail!("Duplicate competitor id in snapshot: {}", competitor.id);
            }
        }

        Ok(snapshot)
    }

    /// Scores keyed by unordered competitor pair
    pub fn result_book(&self) -> ResultBook {
        let mut scores = HashMap::new();
        for result in &self.results {
            scores.insert(
                (result.home_id.clone(), result.away_id.clone()),
                (result.home_score, result.away_score),
            );
        }
        ResultBook { scores }
    }
}

/// Looks up recorded scores for generated fixtures
#[derive(Debug, Default)]
pub struct ResultBook {
    scores: HashMap<(String, String), (u32, u32)>,
}

impl ResultBook {
    /// Score for `fixture` from the home side's view, if recorded either way round
    pub fn lookup(&self, fixture: &Fixture) -> Option<(u32, u32)> {
        let home = fixture.home.id.clone();
        let away = fixture.away.id.clone();
        if let Some(&score) = self.scores.get(&(home.clone(), away.clone())) {
            return Some(score);
        }
        self.scores
            .get(&(away, home))
            .map(|&(away_score, home_score)| (home_score, away_score))
    }
}
