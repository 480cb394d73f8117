//! Shared match-code service for concurrent hosts.

use super::{
    errors::CodeValidationResult,
    match_code::{CodeStatistics, IssuedCode, MatchCodePayload, MatchCodeRegistry},
};
use crate::errors::EngineResult;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Cloneable handle to one registry.
///
/// Validation can evict expired entries, so every call except
/// [`statistics`](Self::statistics) takes the write lock. Consumption holds it
/// across validate-and-retire, so a code is retired by at most one caller.
#[derive(Debug, Clone, Default)]
pub struct MatchCodeService {
    registry: Arc<tokio::sync::RwLock<MatchCodeRegistry>>,
}

impl MatchCodeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a code for a match
    ///
    /// # Arguments
    ///
    /// * `match_id` - Match the code grants access to
    /// * `competitor_ids` - Both sides of the match, any order
    /// * `court_id` - Assigned court, if scheduled
    /// * `tournament_id` - Owning tournament
    ///
    /// # Errors
    ///
    /// * `EngineError::InvalidArgument` - empty match id, competitor list or tournament id
    pub async fn issue(
        &self,
        match_id: &str,
        competitor_ids: &[String],
        court_id: Option<&str>,
        tournament_id: &str,
    ) -> EngineResult<IssuedCode> {
        self.registry
            .write()
            .await
            .issue(match_id, competitor_ids, court_id, tournament_id)
    }

    pub async fn validate(&self, code: &str) -> CodeValidationResult<MatchCodePayload> {
        self.registry.write().await.validate(code)
    }

    pub async fn validate_at(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> CodeValidationResult<MatchCodePayload> {
        self.registry.write().await.validate_at(code, now)
    }

    pub async fn consume(&self, code: &str) -> CodeValidationResult<MatchCodePayload> {
        self.registry.write().await.consume(code)
    }

    /// Drop expired codes
    pub async fn sweep_expired(&self) -> usize {
        self.registry.write().await.sweep_expired(Utc::now())
    }

    pub async fn statistics(&self) -> CodeStatistics {
        self.registry.read().await.statistics()
    }
}
