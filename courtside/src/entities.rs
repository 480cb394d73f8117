//! Shared tournament entities used by every engine.
//!
//! Competitor and court records are owned by the calling service and are only
//! ever read here. Engines clone them into their results but never mutate them.

use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

/// Competitor ID type
pub type CompetitorId = String;

/// Affiliation (club/team) ID type
pub type AffiliationId = String;

/// Court ID type
pub type CourtId = String;

/// A registered competitor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Competitor {
    /// Opaque identity
    pub id: CompetitorId,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Club or team the competitor plays for
    pub affiliation_id: AffiliationId,
}

impl Competitor {
    /// Create a new competitor
    pub fn new(
        id: impl Into<CompetitorId>,
        name: impl Into<String>,
        age: u32,
        affiliation_id: impl Into<AffiliationId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            affiliation_id: affiliation_id.into(),
        }
    }

    /// Deterministic seeding order: affiliation, then name, then id.
    pub fn seed_cmp(&self, other: &Self) -> Ordering {
        self.affiliation_id
            .cmp(&other.affiliation_id)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for Competitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.affiliation_id)
    }
}

/// Sort competitors into seeding order in place.
pub fn seed_order(competitors: &mut [Competitor]) {
    competitors.sort_by(Competitor::seed_cmp);
}

/// Penalty for a single matchup: 1 when both sides share an affiliation.
pub fn affiliation_penalty(a: &Competitor, b: &Competitor) -> u32 {
    u32::from(a.affiliation_id == b.affiliation_id)
}

/// A physical playing resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Court {
    /// Create an active court with no location
    pub fn new(id: impl Into<CourtId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: None,
            is_active: true,
        }
    }

    /// Set the court location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Mark the court as out of service
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// One side of an engine-internal matchup.
///
/// `Bye` is the automatic pass. It never leaves an engine: every public
/// result carries real [`Competitor`]s only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entrant {
    Competitor(Competitor),
    Bye,
}

impl Entrant {
    pub fn is_bye(&self) -> bool {
        matches!(self, Entrant::Bye)
    }

    pub fn competitor(&self) -> Option<&Competitor> {
        match self {
            Entrant::Competitor(c) => Some(c),
            Entrant::Bye => None,
        }
    }

    /// Seeding order with the bye sorted after every real competitor.
    pub fn seed_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Entrant::Competitor(a), Entrant::Competitor(b)) => a.seed_cmp(b),
            (Entrant::Competitor(_), Entrant::Bye) => Ordering::Less,
            (Entrant::Bye, Entrant::Competitor(_)) => Ordering::Greater,
            (Entrant::Bye, Entrant::Bye) => Ordering::Equal,
        }
    }
}

impl From<Competitor> for Entrant {
    fn from(competitor: Competitor) -> Self {
        Entrant::Competitor(competitor)
    }
}

/// Match lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Generated, no result yet
    Pending,
    /// Assigned a court and time slot
    Scheduled,
    /// Both scores recorded
    Completed,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Pending => write!(f, "pending"),
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A generated match between two real competitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// Round number (1-indexed)
    pub round: u32,
    /// Position within the round (1-indexed)
    pub position: u32,
    pub home: Competitor,
    pub away: Competitor,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub status: MatchStatus,
    /// Same-affiliation penalty (0 or 1)
    pub penalty: u32,
}

impl Fixture {
    /// Create a pending fixture, computing its penalty
    pub fn new(round: u32, position: u32, home: Competitor, away: Competitor) -> Self {
        let penalty = affiliation_penalty(&home, &away);
        Self {
            round,
            position,
            home,
            away,
            home_score: None,
            away_score: None,
            status: MatchStatus::Pending,
            penalty,
        }
    }

    /// Record a final score and mark the fixture completed
    pub fn record_result(&mut self, home_score: u32, away_score: u32) {
        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.status = MatchStatus::Completed;
    }

    /// Both scores, if the fixture has been played
    pub fn scores(&self) -> Option<(u32, u32)> {
        self.home_score.zip(self.away_score)
    }

    pub fn is_completed(&self) -> bool {
        self.scores().is_some()
    }

    /// Winner of a completed fixture; `None` for draws and unplayed fixtures
    pub fn winner(&self) -> Option<&Competitor> {
        let (home, away) = self.scores()?;
        match home.cmp(&away) {
            Ordering::Greater => Some(&self.home),
            Ordering::Less => Some(&self.away),
            Ordering::Equal => None,
        }
    }

    /// Whether the given competitor plays in this fixture
    pub fn involves(&self, competitor_id: &str) -> bool {
        self.home.id == competitor_id || self.away.id == competitor_id
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R{}#{} {} vs {}",
            self.round, self.position, self.home.name, self.away.name
        )
    }
}
