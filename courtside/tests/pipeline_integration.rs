//! End-to-end pipeline test
//!
//! Nine competitors from three clubs go through grouping, round robin,
//! scheduling and match-code issuance.

#[cfg(test)]
mod pipeline_tests {
    use chrono::NaiveDate;
    use courtside::{
        Competitor, Court, EngineConfig, GroupingEngine, MatchCodeRegistry, RoundRobinEngine,
    };

    fn nine_from_three_clubs() -> Vec<Competitor> {
        let clubs = ["harbor", "mill", "ridge"];
        clubs
            .iter()
            .flat_map(|club| {
                (1..=3).map(move |i| {
                    Competitor::new(format!("{club}-{i}"), format!("{club} #{i}"), 14, *club)
                })
            })
            .collect()
    }

    /// Round robin over consecutive chunks of the input, as given
    fn naive_chunked_penalty(field: &[Competitor], chunk: usize) -> u32 {
        field
            .chunks(chunk)
            .map(|group| {
                let mut penalty = 0;
                for (i, a) in group.iter().enumerate() {
                    for b in &group[i + 1..] {
                        penalty += u32::from(a.affiliation_id == b.affiliation_id);
                    }
                }
                penalty
            })
            .sum()
    }

    #[test]
    fn test_grouped_round_robin_beats_naive_split() {
        let field = nine_from_three_clubs();
        let config = EngineConfig::default();

        let groups = GroupingEngine::new().group(&field, 3).unwrap();
        assert_eq!(groups.total_penalty, 0);

        let engine = RoundRobinEngine::new();
        let mut total_penalty = 0;
        let mut fixtures = Vec::new();
        for group in &groups.groups {
            let result = engine
                .generate(&group.competitors, &config.round_robin_options())
                .unwrap();
            assert_eq!(result.num_rounds, 3);
            total_penalty += result.total_penalty;
            fixtures.extend(result.rounds.concat());
        }

        let naive = naive_chunked_penalty(&field, 3);
        assert_eq!(naive, 9);
        assert!(total_penalty < naive);
        assert_eq!(fixtures.len(), 9);

        let start = NaiveDate::from_ymd_opt(2025, 7, 19)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let courts = [Court::new("c1", "Court 1"), Court::new("c2", "Court 2")];
        let schedule = config
            .scheduling_engine()
            .schedule(&fixtures, &courts, start)
            .unwrap();
        assert!(schedule.conflicts.is_empty());
        assert_eq!(schedule.scheduled_matches.len(), 9);

        let mut registry = MatchCodeRegistry::new();
        for scheduled in &schedule.scheduled_matches {
            let ids = vec![
                scheduled.fixture.home.id.clone(),
                scheduled.fixture.away.id.clone(),
            ];
            let issued = registry
                .issue(&scheduled.id, &ids, Some(scheduled.court.id.as_str()), "club-day")
                .unwrap();
            let payload = registry.consume(&issued.code).unwrap();
            assert_eq!(payload.match_id, scheduled.id);
        }
        assert_eq!(registry.statistics().used_codes, 9);
    }

    #[test]
    fn test_full_round_robin_penalty_is_unavoidable_pairs() {
        let field = nine_from_three_clubs();
        let result = RoundRobinEngine::new()
            .generate(&field, &EngineConfig::default().round_robin_options())
            .unwrap();

        // every pair meets once: three same-club pairs per club
        assert_eq!(result.total_penalty, 9);
        assert_eq!(result.num_rounds, 9);
        // cross-club matches lead every round
        for round in &result.rounds {
            assert_eq!(round.len(), 4);
            assert_eq!(round[0].penalty, 0);
        }
    }
}
