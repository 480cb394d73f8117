//! Expiring, integrity-checked match access codes.

use super::errors::{CodeValidationError, CodeValidationResult};
use crate::errors::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use subtle::ConstantTimeEq;

/// Lifetime of an issued code
pub const CODE_TTL_MINUTES: i64 = 60;

/// Length of the random component
pub const CODE_LENGTH: usize = 32;

/// Hex characters of the digest kept in the code
pub const DIGEST_PREFIX_LEN: usize = 16;

const SALT: &str = "COURTSIDE_MATCH_CODE_SALT_2024";

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Identity data a code is bound to. Timestamps are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCodePayload {
    pub match_id: String,
    /// Sorted ascending
    pub competitor_ids: Vec<String>,
    pub court_id: Option<String>,
    pub tournament_id: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl MatchCodePayload {
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.expires_at
    }

    /// Key-sorted JSON encoding
    fn canonical(&self) -> Result<String, serde_json::Error> {
        // serde_json's object map is ordered by key
        Ok(serde_json::to_value(self)?.to_string())
    }
}

/// A freshly issued code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCode {
    pub code: String,
    pub payload: MatchCodePayload,
    pub expires_at: DateTime<Utc>,
}

/// Registry counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeStatistics {
    pub active_codes: usize,
    pub used_codes: usize,
    pub expiry_minutes: i64,
}

/// Active and used match codes.
///
/// Every mutating call takes `&mut self`; wrap the registry in
/// [`MatchCodeService`](super::MatchCodeService) when it is shared.
#[derive(Debug, Default)]
pub struct MatchCodeRegistry {
    active: HashMap<String, MatchCodePayload>,
    used: HashSet<String>,
}

impl MatchCodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a code for a match using the current time
    pub fn issue(
        &mut self,
        match_id: &str,
        competitor_ids: &[String],
        court_id: Option<&str>,
        tournament_id: &str,
    ) -> EngineResult<IssuedCode> {
        self.issue_at(match_id, competitor_ids, court_id, tournament_id, Utc::now())
    }

    /// Issue a code for a match as of `now`
    ///
    /// Expired entries are swept first.
    ///
    /// # Errors
    ///
    /// * `EngineError::InvalidArgument` - empty match id, competitor list or tournament id
    pub fn issue_at(
        &mut self,
        match_id: &str,
        competitor_ids: &[String],
        court_id: Option<&str>,
        tournament_id: &str,
        now: DateTime<Utc>,
    ) -> EngineResult<IssuedCode> {
        if match_id.is_empty() || competitor_ids.is_empty() || tournament_id.is_empty() {
            return Err(EngineError::invalid(
                "Invalid parameters for match code generation",
            ));
        }

        self.sweep_expired(now);

        let mut competitor_ids = competitor_ids.to_vec();
        competitor_ids.sort();

        let issued_at = now.timestamp();
        let payload = MatchCodePayload {
            match_id: match_id.to_string(),
            competitor_ids,
            court_id: court_id.map(str::to_string),
            tournament_id: tournament_id.to_string(),
            issued_at,
            expires_at: issued_at + CODE_TTL_MINUTES * 60,
        };

        let base = random_component();
        let digest = digest(&payload, &base).map_err(|e| {
            EngineError::Infeasible(format!("Failed to encode match code payload: {e}"))
        })?;
        let code = format!("{base}-{digest}");

        let expires_at = now + chrono::TimeDelta::minutes(CODE_TTL_MINUTES);
        self.active.insert(code.clone(), payload.clone());

        log::debug!("Issued match code for match {match_id}");

        Ok(IssuedCode {
            code,
            payload,
            expires_at,
        })
    }

    /// Validate a code using the current time
    pub fn validate(&mut self, code: &str) -> CodeValidationResult<MatchCodePayload> {
        self.validate_at(code, Utc::now())
    }

    /// Validate a code as of `now`, evicting it if it has expired
    ///
    /// # Errors
    ///
    /// Checked in order: `MissingCode`, `InvalidFormat`, `AlreadyUsed`,
    /// `UnknownCode`, `Expired`, `IntegrityCheckFailed`.
    pub fn validate_at(
        &mut self,
        code: &str,
        now: DateTime<Utc>,
    ) -> CodeValidationResult<MatchCodePayload> {
        if code.is_empty() {
            return Err(CodeValidationError::MissingCode);
        }

        let (base, hash) = split_code(code).ok_or(CodeValidationError::InvalidFormat)?;

        if self.used.contains(code) {
            return Err(CodeValidationError::AlreadyUsed);
        }

        let expired = self
            .active
            .get(code)
            .ok_or(CodeValidationError::UnknownCode)?
            .is_expired(now);
        if expired {
            self.active.remove(code);
            return Err(CodeValidationError::Expired);
        }

        let payload = self
            .active
            .get(code)
            .ok_or(CodeValidationError::UnknownCode)?;

        let expected =
            digest(payload, base).map_err(|_| CodeValidationError::IntegrityCheckFailed)?;
        if !bool::from(expected.as_bytes().ct_eq(hash.as_bytes())) {
            log::warn!("Match code integrity check failed for match {}", payload.match_id);
            return Err(CodeValidationError::IntegrityCheckFailed);
        }

        Ok(payload.clone())
    }

    /// Validate and permanently retire a code using the current time
    pub fn consume(&mut self, code: &str) -> CodeValidationResult<MatchCodePayload> {
        self.consume_at(code, Utc::now())
    }

    /// Validate and permanently retire a code as of `now`
    pub fn consume_at(
        &mut self,
        code: &str,
        now: DateTime<Utc>,
    ) -> CodeValidationResult<MatchCodePayload> {
        let payload = self.validate_at(code, now)?;
        self.active.remove(code);
        self.used.insert(code.to_string());
        Ok(payload)
    }

    /// Drop every active code that has expired by `now`. Returns how many were removed.
    pub fn sweep_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.active.len();
        self.active.retain(|_, payload| !payload.is_expired(now));
        let removed = before - self.active.len();
        if removed > 0 {
            log::debug!("Swept {removed} expired match codes");
        }
        removed
    }

    /// Reload an active code from external storage
    pub fn restore(&mut self, code: impl Into<String>, payload: MatchCodePayload) {
        self.active.insert(code.into(), payload);
    }

    /// Stored payload for an active code
    pub fn payload(&self, code: &str) -> Option<&MatchCodePayload> {
        self.active.get(code)
    }

    pub fn statistics(&self) -> CodeStatistics {
        CodeStatistics {
            active_codes: self.active.len(),
            used_codes: self.used.len(),
            expiry_minutes: CODE_TTL_MINUTES,
        }
    }
}

fn random_component() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| char::from(CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())]))
        .collect()
}

/// Truncated sha256 over canonical payload, random component and salt
fn digest(payload: &MatchCodePayload, base: &str) -> Result<String, serde_json::Error> {
    let mut hasher = Sha256::new();
    hasher.update(payload.canonical()?.as_bytes());
    hasher.update(base.as_bytes());
    hasher.update(SALT.as_bytes());
    let mut hex = hex::encode(hasher.finalize());
    hex.truncate(DIGEST_PREFIX_LEN);
    Ok(hex)
}

/// Split `<random>-<digest>`, checking alphabet and lengths
fn split_code(code: &str) -> Option<(&str, &str)> {
    let (base, hash) = code.split_once('-')?;
    let base_ok = base.len() == CODE_LENGTH
        && base
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
    let hash_ok = hash.len() == DIGEST_PREFIX_LEN
        && hash
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    (base_ok && hash_ok).then_some((base, hash))
}
