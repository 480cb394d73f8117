//! Command-line driver for the courtside engines.
//!
//! Loads a tournament snapshot, runs one engine over it and prints the result
//! as JSON on stdout. Logs go to stderr.

mod commands;
mod config;
mod logging;
mod snapshot;

use std::path::PathBuf;

use anyhow::{Error, bail};
use chrono::NaiveDateTime;
use courtside::round_robin::DynamicKnockout;
use pico_args::Arguments;

use crate::{
    commands::Command,
    config::CliConfig,
    snapshot::Snapshot,
};

const HELP: &str = "\
Run a courtside tournament engine over a JSON snapshot

USAGE:
  cs_cli <COMMAND> [OPTIONS]

COMMANDS:
  group          Split the field into balanced groups
  pair           Pair the field for one round
  round-robin    Generate a round robin, optionally with progressive elimination
  bracket        Build a seeded single-elimination bracket
  schedule       Generate round-robin fixtures and place them on courts
  code           Issue a match verification code

OPTIONS:
  --input          FILE     Snapshot file            [default: env COURTSIDE_SNAPSHOT]
  --groups         N        Number of groups (group, schedule)
  --qualifiers     N        Knockout qualifiers after a round robin
  --eliminate-every N       Rounds per elimination phase (round-robin)
  --eliminate-count N       Competitors dropped per phase  [default: 1]
  --min-players    N        Pool size for the closing round robin  [default: 4]
  --name           NAME     Bracket name  [default: Main Draw]
  --start          TIME     Schedule start, e.g. 2025-06-14T09:00:00
  --match-id       ID       Match to issue a code for
  --competitors    IDS      Comma-separated competitor ids
  --court          ID       Court the match is played on
  --tournament-id  ID       Tournament id  [default: snapshot tournament_id]

FLAGS:
  -h, --help                Print help information

ENVIRONMENT:
  COURTSIDE_SNAPSHOT        Snapshot file path
  COURTSIDE_SLOW_RUN_MS     Warn when an engine run takes longer  [default: 1000]
  COURTSIDE_*               Engine tunables (match duration, rest, hours, points)
  RUST_LOG                  Log filter  [default: info]
  (See .env.example for all configuration options)
";

struct Args {
    input: Option<PathBuf>,
    command: Command,
}

fn parse_args(mut pargs: Arguments) -> Result<Args, Error> {
    let subcommand = pargs.subcommand()?;
    let input = pargs.opt_value_from_str("--input")?;

    let command = match subcommand.as_deref() {
        Some("group") => Command::Group {
            groups: pargs.value_from_str("--groups")?,
        },
        Some("pair") => Command::Pair,
        Some("round-robin") => {
            let every: Option<u32> = pargs.opt_value_from_str("--eliminate-every")?;
            let count = pargs.opt_value_from_str("--eliminate-count")?.unwrap_or(1);
            let min_players = pargs.opt_value_from_str("--min-players")?.unwrap_or(4);
            Command::RoundRobin {
                knockout: every.map(|every| DynamicKnockout::new(every, count, min_players)),
                qualifiers: pargs.opt_value_from_str("--qualifiers")?,
            }
        }
        Some("bracket") => Command::Bracket {
            name: pargs
                .opt_value_from_str("--name")?
                .unwrap_or_else(|| "Main Draw".to_string()),
        },
        Some("schedule") => Command::Schedule {
            start: pargs.value_from_str::<_, NaiveDateTime>("--start")?,
            groups: pargs.opt_value_from_str("--groups")?,
        },
        Some("code") => {
            let competitors: String = pargs.value_from_str("--competitors")?;
            Command::Code {
                match_id: pargs.value_from_str("--match-id")?,
                competitor_ids: competitors
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(String::from)
                    .collect(),
                court_id: pargs.opt_value_from_str("--court")?,
                tournament_id: pargs.opt_value_from_str("--tournament-id")?,
            }
        }
        Some(other) => bail!("Unknown command: {other}\n\n{HELP}"),
        None => bail!("Missing command\n\n{HELP}"),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        bail!("Unexpected arguments: {remaining:?}");
    }

    Ok(Args { input, command })
}

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = parse_args(pargs)?;

    logging::init();

    let config = CliConfig::from_env(args.input)?;
    config.validate()?;

    tracing::info!(
        snapshot = %config.snapshot_path.display(),
        command = args.command.name(),
        "Running engine"
    );
    let snapshot = Snapshot::load(&config.snapshot_path)?;
    tracing::info!(
        competitors = snapshot.competitors.len(),
        courts = snapshot.courts.len(),
        "Snapshot loaded"
    );

    let output = commands::run(&args.command, &config, &snapshot)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
