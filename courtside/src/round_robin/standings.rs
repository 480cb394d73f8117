//! Standings table and tie-break ordering.
//!
//! Records are ranked by points, score differential, wins, points scored and
//! fewest conceded. Competitors identical on all five are split by their
//! head-to-head points against each other, then by name and id.

use crate::entities::{Competitor, CompetitorId, Fixture};
use serde::{Deserialize, Serialize};
use std::{
    cmp::{Ordering, Reverse},
    collections::{BTreeMap, HashMap},
};

/// Points awarded per result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsTable {
    pub win: i32,
    pub draw: i32,
    pub loss: i32,
}

impl Default for PointsTable {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

impl PointsTable {
    fn award(&self, scored: u32, conceded: u32) -> i32 {
        match scored.cmp(&conceded) {
            Ordering::Greater => self.win,
            Ordering::Equal => self.draw,
            Ordering::Less => self.loss,
        }
    }
}

/// One competitor's line in the standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRecord {
    pub competitor: Competitor,
    pub points: i32,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub scored: u32,
    pub conceded: u32,
    /// Points earned against each opponent
    pub head_to_head: BTreeMap<CompetitorId, i32>,
}

impl StandingRecord {
    pub fn new(competitor: Competitor) -> Self {
        Self {
            competitor,
            points: 0,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            scored: 0,
            conceded: 0,
            head_to_head: BTreeMap::new(),
        }
    }

    pub fn differential(&self) -> i64 {
        i64::from(self.scored) - i64::from(self.conceded)
    }

    fn apply(&mut self, opponent: &CompetitorId, scored: u32, conceded: u32, points: &PointsTable) {
        let earned = points.award(scored, conceded);
        self.played += 1;
        self.scored = self.scored.saturating_add(scored);
        self.conceded = self.conceded.saturating_add(conceded);
        self.points = self.points.saturating_add(earned);
        match scored.cmp(&conceded) {
            Ordering::Greater => self.won += 1,
            Ordering::Equal => self.drawn += 1,
            Ordering::Less => self.lost += 1,
        }
        let h2h = self.head_to_head.entry(opponent.clone()).or_insert(0);
        *h2h = h2h.saturating_add(earned);
    }

    /// Primary ranking key; larger sorts first
    fn primary_key(&self) -> (i32, i64, u32, u32, Reverse<u32>) {
        (
            self.points,
            self.differential(),
            self.won,
            self.scored,
            Reverse(self.conceded),
        )
    }

    fn head_to_head_against(&self, tied: &[StandingRecord]) -> i32 {
        tied.iter()
            .filter(|other| other.competitor.id != self.competitor.id)
            .filter_map(|other| self.head_to_head.get(&other.competitor.id))
            .sum()
    }
}

fn name_then_id(a: &StandingRecord, b: &StandingRecord) -> Ordering {
    a.competitor
        .name
        .cmp(&b.competitor.name)
        .then_with(|| a.competitor.id.cmp(&b.competitor.id))
}

/// Running standings accumulated over completed fixtures
#[derive(Debug, Clone)]
pub struct Standings {
    points: PointsTable,
    records: HashMap<CompetitorId, StandingRecord>,
}

impl Standings {
    pub fn new(points: PointsTable) -> Self {
        Self {
            points,
            records: HashMap::new(),
        }
    }

    /// Ensure a competitor has a row even before playing
    pub fn register(&mut self, competitor: &Competitor) {
        self.records
            .entry(competitor.id.clone())
            .or_insert_with(|| StandingRecord::new(competitor.clone()));
    }

    /// Fold a fixture into the table. Unplayed fixtures only register both sides.
    pub fn record(&mut self, fixture: &Fixture) {
        self.register(&fixture.home);
        self.register(&fixture.away);

        let Some((home, away)) = fixture.scores() else {
            return;
        };

        if let Some(record) = self.records.get_mut(&fixture.home.id) {
            record.apply(&fixture.away.id, home, away, &self.points);
        }
        if let Some(record) = self.records.get_mut(&fixture.away.id) {
            record.apply(&fixture.home.id, away, home, &self.points);
        }
    }

    /// Ranked rows for every registered competitor
    pub fn ranked(&self) -> Vec<StandingRecord> {
        rank(self.records.values().cloned().collect())
    }

    /// Ranked rows restricted to `pool`, with head-to-head counted only among them
    pub fn ranked_among(&self, pool: &[Competitor]) -> Vec<StandingRecord> {
        let rows = pool
            .iter()
            .map(|c| {
                self.records
                    .get(&c.id)
                    .cloned()
                    .unwrap_or_else(|| StandingRecord::new(c.clone()))
            })
            .collect();
        rank(rows)
    }
}

/// Order records best first.
pub fn rank(mut records: Vec<StandingRecord>) -> Vec<StandingRecord> {
    records.sort_by(|a, b| {
        b.primary_key()
            .cmp(&a.primary_key())
            .then_with(|| name_then_id(a, b))
    });

    let mut start = 0;
    while start < records.len() {
        let key = records[start].primary_key();
        let end = records[start..]
            .iter()
            .position(|r| r.primary_key() != key)
            .map_or(records.len(), |offset| start + offset);

        if end - start > 1 {
            let tied = records[start..end].to_vec();
            records[start..end].sort_by(|a, b| {
                b.head_to_head_against(&tied)
                    .cmp(&a.head_to_head_against(&tied))
                    .then_with(|| name_then_id(a, b))
            });
        }
        start = end;
    }

    records
}

/// Compute ranked standings from completed fixtures
///
/// Every competitor appearing in any fixture gets a row, played or not.
pub fn compute_standings(rounds: &[Vec<Fixture>], points: &PointsTable) -> Vec<StandingRecord> {
    let mut standings = Standings::new(*points);
    for fixture in rounds.iter().flatten() {
        standings.record(fixture);
    }
    standings.ranked()
}

/// Take the top `n` rows of ranked standings
pub fn pick_qualifiers(standings: &[StandingRecord], n: usize) -> Vec<StandingRecord> {
    standings.iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str, name: &str) -> Competitor {
        Competitor::new(id, name, 20, format!("club-{id}"))
    }

    fn played(round: u32, home: &Competitor, away: &Competitor, hs: u32, aws: u32) -> Fixture {
        let mut fixture = Fixture::new(round, 1, home.clone(), away.clone());
        fixture.record_result(hs, aws);
        fixture
    }

    #[test]
    fn test_points_and_counters() {
        let a = player("a", "Ann");
        let b = player("b", "Bea");
        let rounds = vec![vec![played(1, &a, &b, 3, 1)], vec![played(2, &b, &a, 2, 2)]];
        let table = compute_standings(&rounds, &PointsTable::default());

        assert_eq!(table[0].competitor.id, "a");
        assert_eq!(table[0].points, 4);
        assert_eq!((table[0].won, table[0].drawn, table[0].lost), (1, 1, 0));
        assert_eq!(table[0].differential(), 2);
        assert_eq!(table[1].points, 1);
        assert_eq!(table[1].played, 2);
    }

    #[test]
    fn test_unplayed_fixtures_register_rows() {
        let a = player("a", "Ann");
        let b = player("b", "Bea");
        let rounds = vec![vec![Fixture::new(1, 1, a, b)]];
        let table = compute_standings(&rounds, &PointsTable::default());
        assert_eq!(table.len(), 2);
        assert!(table.iter().all(|r| r.played == 0));
        // all zero: name order
        assert_eq!(table[0].competitor.name, "Ann");
    }

    #[test]
    fn test_differential_breaks_points_tie() {
        let a = player("a", "Ann");
        let b = player("b", "Bea");
        let c = player("c", "Cal");
        let d = player("d", "Dov");
        let rounds = vec![vec![played(1, &a, &c, 5, 0), played(1, &b, &d, 1, 0)]];
        let table = compute_standings(&rounds, &PointsTable::default());
        let order: Vec<_> = table.iter().map(|r| r.competitor.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn test_points_scored_breaks_tie() {
        let a = player("a", "Ann");
        let b = player("b", "Bea");
        let c = player("c", "Cal");
        let d = player("d", "Dov");
        let rounds = vec![vec![played(1, &a, &c, 2, 1), played(1, &b, &d, 3, 2)]];
        let table = compute_standings(&rounds, &PointsTable::default());
        // equal points, differential and wins; Bea scored more
        assert_eq!(table[0].competitor.id, "b");
        assert_eq!(table[1].competitor.id, "a");
    }

    #[test]
    fn test_head_to_head_breaks_identical_records() {
        let a = player("a", "Zed");
        let b = player("b", "Amy");
        let c = player("c", "Cal");
        // Zed beats Amy, Amy beats Cal, Cal beats Zed, all 1-0: a perfect cycle
        // for the head-to-head sums, so names decide
        let cycle = vec![vec![
            played(1, &a, &b, 1, 0),
            played(2, &b, &c, 1, 0),
            played(3, &c, &a, 1, 0),
        ]];
        let table = compute_standings(&cycle, &PointsTable::default());
        let names: Vec<_> = table.iter().map(|r| r.competitor.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Cal", "Zed"]);

        // Two identical records where one beat the other directly
        let d = player("d", "Dan");
        let e = player("e", "Eve");
        let rounds = vec![vec![
            played(1, &e, &d, 1, 0),
            played(2, &d, &a, 1, 0),
            played(3, &e, &b, 0, 1),
            played(4, &c, &d, 0, 0),
            played(5, &c, &e, 0, 0),
        ]];
        let table = compute_standings(&rounds, &PointsTable::default());
        let d_pos = table.iter().position(|r| r.competitor.id == "d").unwrap();
        let e_pos = table.iter().position(|r| r.competitor.id == "e").unwrap();
        assert_eq!(table[d_pos].primary_key(), table[e_pos].primary_key());
        assert!(e_pos < d_pos, "Eve won the direct meeting");
    }

    #[test]
    fn test_pick_qualifiers() {
        let a = player("a", "Ann");
        let b = player("b", "Bea");
        let table = compute_standings(&[vec![played(1, &a, &b, 0, 1)]], &PointsTable::default());
        let top = pick_qualifiers(&table, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].competitor.id, "b");
        assert_eq!(pick_qualifiers(&table, 10).len(), 2);
    }

    #[test]
    fn test_custom_points_table() {
        let a = player("a", "Ann");
        let b = player("b", "Bea");
        let points = PointsTable {
            win: 2,
            draw: 1,
            loss: -1,
        };
        let table = compute_standings(&[vec![played(1, &a, &b, 4, 2)]], &points);
        assert_eq!(table[0].points, 2);
        assert_eq!(table[1].points, -1);
    }

    #[test]
    fn test_huge_scores_saturate() {
        let a = player("a", "Ann");
        let b = player("b", "Bea");
        let rounds = vec![
            vec![played(1, &a, &b, u32::MAX, 0)],
            vec![played(2, &b, &a, 1, u32::MAX)],
        ];
        let table = compute_standings(&rounds, &PointsTable::default());

        assert_eq!(table[0].competitor.id, "a");
        assert_eq!(table[0].scored, u32::MAX);
        assert_eq!(table[0].points, 6);
        assert_eq!(table[1].conceded, u32::MAX);
        assert_eq!(table[1].scored, 1);
    }
}
