//! Anti-cluster group distribution.
//!
//! Competitors are bucketed by affiliation, the buckets are visited largest
//! first, and members are dealt round-robin across the target groups. A single
//! dealing cursor runs across all buckets, so group sizes never differ by more
//! than one and a bucket no larger than the group count never shares a group.

use crate::{
    entities::{AffiliationId, Competitor},
    errors::{EngineError, EngineResult},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A group of competitors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group ID (`group-1`, `group-2`, ...)
    pub id: String,
    /// Members in placement order
    pub competitors: Vec<Competitor>,
    /// Members per affiliation
    pub affiliation_counts: BTreeMap<AffiliationId, usize>,
}

impl Group {
    fn new(index: usize) -> Self {
        Self {
            id: format!("group-{}", index + 1),
            competitors: Vec::new(),
            affiliation_counts: BTreeMap::new(),
        }
    }

    fn push(&mut self, competitor: Competitor) {
        *self
            .affiliation_counts
            .entry(competitor.affiliation_id.clone())
            .or_insert(0) += 1;
        self.competitors.push(competitor);
    }

    /// Each member beyond the first of an affiliation adds 1
    pub fn penalty(&self) -> u32 {
        self.affiliation_counts
            .values()
            .map(|&count| count.saturating_sub(1) as u32)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }
}

/// Grouping output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingResult {
    pub groups: Vec<Group>,
    pub total_penalty: u32,
}

/// Distributes competitors into balanced groups
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupingEngine;

impl GroupingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Split `competitors` into `num_groups` groups
    ///
    /// # Errors
    ///
    /// * `EngineError::InvalidArgument` - `num_groups` is zero
    pub fn group(
        &self,
        competitors: &[Competitor],
        num_groups: usize,
    ) -> EngineResult<GroupingResult> {
        if num_groups == 0 {
            return Err(EngineError::invalid("Number of groups must be positive"));
        }

        if competitors.is_empty() {
            return Ok(GroupingResult::default());
        }

        let mut groups: Vec<Group> = (0..num_groups).map(Group::new).collect();

        let mut cursor = 0;
        for (_, bucket) in bucket_by_affiliation(competitors) {
            for competitor in bucket {
                groups[cursor % num_groups].push(competitor.clone());
                cursor += 1;
            }
        }

        let total_penalty = groups.iter().map(Group::penalty).sum();
        log::debug!(
            "Grouped {} competitors into {} groups (penalty {})",
            competitors.len(),
            num_groups,
            total_penalty
        );

        Ok(GroupingResult {
            groups,
            total_penalty,
        })
    }
}

/// Buckets sorted by descending size, ties broken by affiliation id.
/// Members keep their input order.
fn bucket_by_affiliation(competitors: &[Competitor]) -> Vec<(&str, Vec<&Competitor>)> {
    let mut buckets: BTreeMap<&str, Vec<&Competitor>> = BTreeMap::new();
    for competitor in competitors {
        buckets
            .entry(competitor.affiliation_id.as_str())
            .or_default()
            .push(competitor);
    }

    let mut buckets: Vec<_> = buckets.into_iter().collect();
    // stable sort keeps the BTreeMap's id order among equal sizes
    buckets.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    buckets
}
