//! Engine commands.
//!
//! Each command runs one engine over the loaded snapshot and returns its
//! result as JSON.

use crate::{config::CliConfig, logging::log_performance, snapshot::Snapshot};
use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use courtside::{
    BracketEngine, Competitor, Fixture, GroupingEngine, MatchCodeRegistry, RoundRobinEngine,
    round_robin::{DynamicKnockout, build_knockout_from_qualifiers, pick_qualifiers},
};
use serde_json::{Value, json};
use std::time::Instant;

/// A parsed subcommand with its flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Group {
        groups: usize,
    },
    Pair,
    RoundRobin {
        knockout: Option<DynamicKnockout>,
        qualifiers: Option<usize>,
    },
    Bracket {
        name: String,
    },
    Schedule {
        start: NaiveDateTime,
        groups: Option<usize>,
    },
    Code {
        match_id: String,
        competitor_ids: Vec<String>,
        court_id: Option<String>,
        tournament_id: Option<String>,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Group { .. } => "group",
            Command::Pair => "pair",
            Command::RoundRobin { .. } => "round_robin",
            Command::Bracket { .. } => "bracket",
            Command::Schedule { .. } => "schedule",
            Command::Code { .. } => "code",
        }
    }
}

/// Run `command` against `snapshot`
///
/// # Errors
///
/// Engine errors are returned with the command name as context
pub fn run(command: &Command, config: &CliConfig, snapshot: &Snapshot) -> Result<Value> {
    let started = Instant::now();
    let output = dispatch(command, config, snapshot)
        .with_context(|| format!("{} failed", command.name()))?;
    let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    log_performance(command.name(), elapsed, config.slow_run_ms);
    Ok(output)
}

fn dispatch(command: &Command, config: &CliConfig, snapshot: &Snapshot) -> Result<Value> {
    let competitors = &snapshot.competitors;
    let engine = &config.engine;

    let value = match command {
        Command::Group { groups } => {
            serde_json::to_value(GroupingEngine::new().group(competitors, *groups)?)?
        }
        Command::Pair => serde_json::to_value(engine.pairing_engine().pair(competitors)?)?,
        Command::RoundRobin {
            knockout,
            qualifiers,
        } => {
            let mut options = engine.round_robin_options();
            options.dynamic_knockout = *knockout;
            let book = snapshot.result_book();
            let mut resolver = |fixture: &Fixture| book.lookup(fixture);
            let result = RoundRobinEngine::new().generate_with_results(
                competitors,
                &options,
                &mut resolver,
            )?;

            match qualifiers {
                Some(n) => {
                    let knockout = build_knockout_from_qualifiers(&pick_qualifiers(
                        &result.standings,
                        *n,
                    ))?;
                    json!({ "round_robin": result, "knockout": knockout })
                }
                None => serde_json::to_value(result)?,
            }
        }
        Command::Bracket { name } => {
            serde_json::to_value(BracketEngine::new().build_bracket(competitors, name)?)?
        }
        Command::Schedule { start, groups } => {
            let fixtures = stage_fixtures(competitors, *groups, config)?;
            if snapshot.courts.is_empty() {
                bail!("Snapshot lists no courts to schedule on");
            }
            let result = engine
                .scheduling_engine()
                .schedule(&fixtures, &snapshot.courts, *start)?;
            for conflict in &result.conflicts {
                tracing::warn!(match_index = conflict.match_index, "{conflict}");
            }
            serde_json::to_value(result)?
        }
        Command::Code {
            match_id,
            competitor_ids,
            court_id,
            tournament_id,
        } => {
            let tournament_id = tournament_id
                .as_deref()
                .or(snapshot.tournament_id.as_deref())
                .context("A tournament id is required (--tournament-id or snapshot)")?;
            for id in competitor_ids {
                if !competitors.iter().any(|c| &c.id == id) {
                    bail!("Unknown competitor id: {id}");
                }
            }
            let mut registry = MatchCodeRegistry::new();
            let issued =
                registry.issue(match_id, competitor_ids, court_id.as_deref(), tournament_id)?;
            serde_json::to_value(issued)?
        }
    };

    Ok(value)
}

/// Round-robin fixtures for the whole field, or per group when `groups` is set
fn stage_fixtures(
    competitors: &[Competitor],
    groups: Option<usize>,
    config: &CliConfig,
) -> Result<Vec<Fixture>> {
    let options = config.engine.round_robin_options();
    let engine = RoundRobinEngine::new();

    let pools = match groups {
        Some(n) => GroupingEngine::new()
            .group(competitors, n)?
            .groups
            .into_iter()
            .map(|g| g.competitors)
            .collect(),
        None => vec![competitors.to_vec()],
    };

    let mut fixtures = Vec::new();
    for pool in &pools {
        fixtures.extend(engine.generate(pool, &options)?.rounds.concat());
    }
    Ok(fixtures)
}
