//! Knockout seeding from round-robin qualifiers.

use super::standings::StandingRecord;
use crate::{
    entities::Fixture,
    errors::{EngineError, EngineResult},
};

/// Seed a first knockout round best-versus-worst
///
/// Qualifier `i` (0-indexed, best first) meets qualifier `n - 1 - i`.
///
/// # Errors
///
/// * `EngineError::InvalidArgument` - fewer than two qualifiers, or a count
///   that is not a power of two
pub fn build_knockout_from_qualifiers(qualifiers: &[StandingRecord]) -> EngineResult<Vec<Fixture>> {
    let n = qualifiers.len();
    if n < 2 || !n.is_power_of_two() {
        return Err(EngineError::invalid(format!(
            "Knockout needs a power-of-two number of qualifiers (at least 2), got {n}"
        )));
    }

    Ok((0..n / 2)
        .map(|i| {
            Fixture::new(
                1,
                i as u32 + 1,
                qualifiers[i].competitor.clone(),
                qualifiers[n - 1 - i].competitor.clone(),
            )
        })
        .collect())
}
