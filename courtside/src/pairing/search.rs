//! Branch-and-bound search state for a single pairing call.

use crate::entities::Competitor;
use std::collections::HashMap;

/// One decided slot: `(first, Some(partner))` or `(leftover, None)` for the bye.
pub(crate) type Slot = (usize, Option<usize>);

/// Best complete pairing found so far
#[derive(Debug, Clone)]
pub(crate) struct Incumbent {
    pub slots: Vec<Slot>,
    pub penalty: u32,
}

/// Search arena. Lives for exactly one top-level pairing call, so memoized
/// state can never leak between calls or threads.
pub(crate) struct PairingSearch<'a> {
    competitors: &'a [Competitor],
    /// Dense affiliation index per competitor
    affiliation: Vec<usize>,
    affiliation_count: usize,
    incumbent: Option<Incumbent>,
    /// Residual set -> lowest accumulated penalty it was entered with
    visited: HashMap<Vec<usize>, u32>,
    nodes: u64,
}

impl<'a> PairingSearch<'a> {
    /// `competitors` must already be in seeding order.
    pub fn new(competitors: &'a [Competitor]) -> Self {
        let mut ids: HashMap<&str, usize> = HashMap::new();
        let affiliation = competitors
            .iter()
            .map(|c| {
                let next = ids.len();
                *ids.entry(c.affiliation_id.as_str()).or_insert(next)
            })
            .collect();

        Self {
            competitors,
            affiliation,
            affiliation_count: ids.len(),
            incumbent: None,
            visited: HashMap::new(),
            nodes: 0,
        }
    }

    /// Run the search and hand back the best pairing, if any.
    pub fn run(mut self) -> (Option<Incumbent>, u64) {
        let all: Vec<usize> = (0..self.competitors.len()).collect();
        let mut chosen = Vec::with_capacity(all.len() / 2 + 1);
        self.explore(&all, &mut chosen, 0);
        (self.incumbent, self.nodes)
    }

    fn penalty(&self, a: usize, b: usize) -> u32 {
        u32::from(self.affiliation[a] == self.affiliation[b])
    }

    /// Admissible bound on the penalty still to be paid by `remaining`.
    ///
    /// Members of the largest affiliation can be absorbed by cross-affiliation
    /// partners (and by the bye when the count is odd); the surplus must be
    /// paired among itself.
    fn lower_bound(&self, remaining: &[usize]) -> u32 {
        let mut counts = vec![0usize; self.affiliation_count];
        for &idx in remaining {
            counts[self.affiliation[idx]] += 1;
        }
        let largest = counts.into_iter().max().unwrap_or(0);
        let n = remaining.len();
        let surplus = (2 * largest).saturating_sub(n + n % 2);
        (surplus / 2) as u32
    }

    fn explore(&mut self, remaining: &[usize], chosen: &mut Vec<Slot>, penalty: u32) {
        self.nodes += 1;

        if let Some(best) = &self.incumbent
            && penalty + self.lower_bound(remaining) >= best.penalty
        {
            return;
        }

        if remaining.is_empty() {
            self.incumbent = Some(Incumbent {
                slots: chosen.clone(),
                penalty,
            });
            return;
        }

        // `remaining` stays in seeding order, so it is its own canonical key
        if let Some(&seen) = self.visited.get(remaining)
            && seen <= penalty
        {
            return;
        }
        self.visited.insert(remaining.to_vec(), penalty);

        let first = remaining[0];
        let rest = &remaining[1..];

        if rest.is_empty() {
            chosen.push((first, None));
            self.explore(&[], chosen, penalty);
            chosen.pop();
            return;
        }

        for i in 0..rest.len() {
            let partner = rest[i];
            let next: Vec<usize> = rest[..i].iter().chain(&rest[i + 1..]).copied().collect();
            let cost = self.penalty(first, partner);

            chosen.push((first, Some(partner)));
            self.explore(&next, chosen, penalty + cost);
            chosen.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(clubs: &[&str]) -> Vec<Competitor> {
        clubs
            .iter()
            .enumerate()
            .map(|(i, club)| Competitor::new(i.to_string(), format!("p{i}"), 20, *club))
            .collect()
    }

    #[test]
    fn test_lower_bound_even() {
        let competitors = field(&["a", "a", "a", "a", "b", "c"]);
        let search = PairingSearch::new(&competitors);
        // 4 of 6 from "a": two can meet b and c, the other two must meet
        assert_eq!(search.lower_bound(&[0, 1, 2, 3, 4, 5]), 1);
        assert_eq!(search.lower_bound(&[0, 4]), 0);
    }

    #[test]
    fn test_lower_bound_odd_uses_bye() {
        let competitors = field(&["a", "a", "a", "b", "c"]);
        let search = PairingSearch::new(&competitors);
        assert_eq!(search.lower_bound(&[0, 1, 2, 3, 4]), 0);
        assert_eq!(search.lower_bound(&[0, 1, 2]), 1);
    }

    #[test]
    fn test_search_finds_zero_penalty() {
        let competitors = field(&["a", "a", "b", "b"]);
        let (best, nodes) = PairingSearch::new(&competitors).run();
        let best = best.unwrap();
        assert_eq!(best.penalty, 0);
        assert_eq!(best.slots.len(), 2);
        assert!(nodes > 0);
    }
}
