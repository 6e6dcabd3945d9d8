use std::env;

use crate::alerts::{
    check_flights, render, render_json, CheckOptions, OutputMode, NOTHING_TO_CHECK,
};
use crate::availability::MockSeatSource;
use crate::seats::{SeatCandidate, TierPolicy};
use crate::trips::{Strictness, DEFAULT_FLIGHTS_PATH};
use crate::validate::validate_flights_file;

/// Overrides the default flights file when no path argument is given.
pub const FLIGHTS_PATH_ENV: &str = "SEAT_STALKER_FLIGHTS";

const CHECK_USAGE: &str = "usage: seat_stalker [check] [PATH] [--strict] \
    [--tier-policy explicit|suffix] [--alerts-only] [--json]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Check,
    Tier,
    Validate,
}

/// Returns the command and the index of its first argument. Anything that is not a
/// subcommand name (a path or a flag) is an argument to `check`.
pub fn parse_command(args: &[String]) -> (Command, usize) {
    match args.get(1).map(String::as_str) {
        Some("check") => (Command::Check, 2),
        Some("tier") => (Command::Tier, 2),
        Some("validate") => (Command::Validate, 2),
        _ => (Command::Check, 1),
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let (command, start) = parse_command(args);
    let rest = args.get(start..).unwrap_or_default();
    match command {
        Command::Check => handle_check(rest),
        Command::Tier => handle_tier(rest),
        Command::Validate => handle_validate(rest),
    }
}

fn default_flights_path() -> String {
    env::var(FLIGHTS_PATH_ENV).unwrap_or_else(|_| DEFAULT_FLIGHTS_PATH.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckArgs {
    pub path: Option<String>,
    pub strictness: Strictness,
    pub tier_policy: TierPolicy,
    pub output: OutputMode,
    pub json: bool,
}

pub fn parse_check_args(args: &[String]) -> Result<CheckArgs, String> {
    let mut parsed = CheckArgs {
        path: None,
        strictness: Strictness::Lenient,
        tier_policy: TierPolicy::Explicit,
        output: OutputMode::All,
        json: false,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--strict" => parsed.strictness = Strictness::Strict,
            "--alerts-only" => parsed.output = OutputMode::AlertsOnly,
            "--json" => parsed.json = true,
            "--tier-policy" => {
                let raw = iter
                    .next()
                    .ok_or_else(|| "--tier-policy needs a value".to_string())?;
                parsed.tier_policy = parse_policy(raw)?;
            }
            other if other.starts_with("--tier-policy=") => {
                parsed.tier_policy = parse_policy(&other["--tier-policy=".len()..])?;
            }
            other if other.starts_with("--") => return Err(format!("unknown flag '{other}'")),
            other => {
                if parsed.path.is_some() {
                    return Err(format!("unexpected argument '{other}'"));
                }
                parsed.path = Some(other.to_string());
            }
        }
    }
    Ok(parsed)
}

fn parse_policy(raw: &str) -> Result<TierPolicy, String> {
    TierPolicy::parse(raw).ok_or_else(|| format!("unknown tier policy '{raw}'"))
}

fn handle_check(args: &[String]) -> i32 {
    let parsed = match parse_check_args(args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("{CHECK_USAGE}");
            return 2;
        }
    };
    let path = parsed.path.clone().unwrap_or_else(default_flights_path);
    let options = CheckOptions {
        strictness: parsed.strictness,
        tier_policy: parsed.tier_policy,
        output: parsed.output,
    };
    let source = MockSeatSource::new(parsed.strictness);

    let alerts = match check_flights(&path, &options, &source) {
        Ok(alerts) => alerts,
        Err(err) => {
            eprintln!("check failed: {err}");
            return 1;
        }
    };

    if parsed.json {
        match render_json(&alerts) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize alerts: {err}");
                return 1;
            }
        }
    } else if alerts.is_empty() {
        println!("{NOTHING_TO_CHECK}");
    } else {
        println!("{}", render(&alerts));
    }
    0
}

fn handle_tier(args: &[String]) -> i32 {
    if args.is_empty() {
        eprintln!("usage: seat_stalker tier <SEAT>...");
        return 2;
    }
    for seat in args {
        let candidate = SeatCandidate::from_label(seat.as_str());
        println!("{}\t{}", candidate.seat, candidate.tier);
    }
    0
}

fn handle_validate(args: &[String]) -> i32 {
    let path = args.first().cloned().unwrap_or_else(default_flights_path);

    match validate_flights_file(&path) {
        Ok(report) if !report.has_errors() => {
            for diag in &report.diagnostics {
                eprintln!("- {diag}");
            }
            println!(
                "validation passed: {path} ({} active trip(s))",
                report.active_trips
            );
            0
        }
        Ok(report) => {
            eprintln!(
                "validation failed: {} issue(s), {} error(s)",
                report.diagnostics.len(),
                report.error_count()
            );
            for diag in report.diagnostics {
                eprintln!("- {diag}");
            }
            1
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}
