//! Tournament Day Example
//!
//! Walks a small club day through every engine: grouping, group-stage round
//! robin, a seeded knockout from the group winners, court scheduling and
//! match-code issuance.

use chrono::NaiveDate;
use courtside::{
    BracketEngine, Competitor, Court, EngineConfig, Fixture, GroupingEngine, MatchCodeRegistry,
    RoundRobinEngine, round_robin::pick_qualifiers,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Club Day Example ===\n");

    let clubs = ["harbor", "mill", "ridge", "vale"];
    let competitors: Vec<Competitor> = clubs
        .iter()
        .flat_map(|club| {
            (1..=4).map(move |i| Competitor::new(format!("{club}-{i}"), format!("{club} {i}"), 12 + i, *club))
        })
        .collect();

    let config = EngineConfig::default();

    // Step 1: spread each club across four groups
    let grouping = GroupingEngine::new().group(&competitors, 4)?;
    println!("Step 1: {} groups, same-club penalty {}", grouping.groups.len(), grouping.total_penalty);

    // Step 2: round robin inside each group, scores from a toy rule
    let mut resolver = |f: &Fixture| Some((f.home.age, f.away.age));
    let mut fixtures = Vec::new();
    let mut winners = Vec::new();
    for group in &grouping.groups {
        let result = RoundRobinEngine::new().generate_with_results(
            &group.competitors,
            &config.round_robin_options(),
            &mut resolver,
        )?;
        println!("  {}: {} rounds, penalty {}", group.id, result.num_rounds, result.total_penalty);
        fixtures.extend(result.rounds.concat());
        winners.extend(pick_qualifiers(&result.standings, 1));
    }

    // Step 3: group winners into a knockout
    let bracket = BracketEngine::new().build_from_qualifiers("Finals", &winners)?;
    println!("\nStep 2: knockout with {} rounds", bracket.num_rounds);
    for slot in &bracket.rounds[0] {
        if let (Some(home), Some(away)) = (&slot.home, &slot.away) {
            println!("  {} vs {}", home.name, away.name);
        }
    }

    // Step 4: put the group stage on two courts
    let start = NaiveDate::from_ymd_opt(2025, 6, 14)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .ok_or("invalid start time")?;
    let courts = [Court::new("c1", "Court 1"), Court::new("c2", "Court 2")];
    let schedule = config.scheduling_engine().schedule(&fixtures, &courts, start)?;
    println!(
        "\nStep 3: {} matches over {} minutes",
        schedule.scheduled_matches.len(),
        schedule.total_schedule_minutes
    );
    for (court, percent) in &schedule.court_utilization {
        println!("  {court}: {percent:.1}% busy");
    }

    // Step 5: a code for the opening match
    if let Some(first) = schedule.scheduled_matches.first() {
        let mut registry = MatchCodeRegistry::new();
        let ids = [first.fixture.home.id.clone(), first.fixture.away.id.clone()];
        let issued = registry.issue(&first.id, &ids, Some(first.court.id.as_str()), "club-day")?;
        println!("\nStep 4: code for {} is {}", first.id, issued.code);
        let payload = registry.consume(&issued.code)?;
        println!("  consumed for players {:?}", payload.competitor_ids);
    }

    Ok(())
}
