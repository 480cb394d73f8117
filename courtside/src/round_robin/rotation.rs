//! Circle-method fixture rotation.

use crate::entities::{Competitor, Entrant, Fixture};

/// Generate every round of a single round robin for `pool`.
///
/// Odd pools are padded with a bye. The first entrant in seeding order stays
/// fixed while the rest rotate one step clockwise per round. Fixtures against
/// the bye are dropped, and each round is ordered cross-affiliation first.
/// Rounds are numbered from `first_round`.
pub(crate) fn rotate(pool: &[Competitor], first_round: u32) -> Vec<Vec<Fixture>> {
    if pool.len() < 2 {
        return Vec::new();
    }

    let mut entrants: Vec<Entrant> = pool.iter().cloned().map(Entrant::from).collect();
    if entrants.len() % 2 == 1 {
        entrants.push(Entrant::Bye);
    }
    entrants.sort_by(Entrant::seed_cmp);

    let n = entrants.len();
    let fixed = entrants.remove(0);
    let mut rotating = entrants;

    let mut rounds = Vec::with_capacity(n - 1);
    for offset in 0..(n - 1) as u32 {
        let round = first_round + offset;

        let mut pairs = Vec::with_capacity(n / 2);
        pairs.push((&fixed, &rotating[0]));
        for i in 1..n / 2 {
            pairs.push((&rotating[i], &rotating[n - 1 - i]));
        }

        let mut fixtures: Vec<Fixture> = pairs
            .into_iter()
            .filter_map(|(home, away)| match (home, away) {
                (Entrant::Competitor(home), Entrant::Competitor(away)) => {
                    Some(Fixture::new(round, 0, home.clone(), away.clone()))
                }
                _ => None,
            })
            .collect();

        fixtures.sort_by_key(|f| f.penalty);
        for (idx, fixture) in fixtures.iter_mut().enumerate() {
            fixture.position = idx as u32 + 1;
        }
        rounds.push(fixtures);

        rotating.rotate_right(1);
    }

    rounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pool(n: usize) -> Vec<Competitor> {
        (0..n)
            .map(|i| Competitor::new(format!("c{i}"), format!("C{i}"), 20, format!("club{}", i % 2)))
            .collect()
    }

    #[test]
    fn test_even_pool_round_count() {
        let rounds = rotate(&pool(6), 1);
        assert_eq!(rounds.len(), 5);
        assert!(rounds.iter().all(|r| r.len() == 3));
        assert_eq!(rounds[0][0].round, 1);
        assert_eq!(rounds[4][0].round, 5);
    }

    #[test]
    fn test_odd_pool_drops_bye_fixtures() {
        let rounds = rotate(&pool(5), 1);
        assert_eq!(rounds.len(), 5);
        assert!(rounds.iter().all(|r| r.len() == 2));
    }

    #[test]
    fn test_every_pair_meets_once() {
        let rounds = rotate(&pool(7), 10);
        let mut seen = HashSet::new();
        for fixture in rounds.iter().flatten() {
            let key = if fixture.home.id < fixture.away.id {
                (fixture.home.id.clone(), fixture.away.id.clone())
            } else {
                (fixture.away.id.clone(), fixture.home.id.clone())
            };
            assert!(seen.insert(key), "pair met twice");
        }
        assert_eq!(seen.len(), 7 * 6 / 2);
        assert_eq!(rounds[0][0].round, 10);
    }

    #[test]
    fn test_round_orders_cross_affiliation_first() {
        for round in rotate(&pool(8), 1) {
            let penalties: Vec<_> = round.iter().map(|f| f.penalty).collect();
            let mut sorted = penalties.clone();
            sorted.sort();
            assert_eq!(penalties, sorted);
        }
    }

    #[test]
    fn test_tiny_pools() {
        assert!(rotate(&[], 1).is_empty());
        assert!(rotate(&pool(1), 1).is_empty());
        assert_eq!(rotate(&pool(2), 1).len(), 1);
    }
}
