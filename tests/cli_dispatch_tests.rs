use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const FLIGHTS: &str = "\
# Seat tier primer: 14 = first class aisle ... 1 = regular middle
Airline,FlightNumber,FlightDate,Origin,Destination,CurrentSeat,CurrentTier,Active
AA,100,2024-06-10,JFK,LAX,24E,1,Y
AA,101,2024-06-11,JFK,LAX,24E,1,Y
AA,102,2024-06-12,JFK,LAX,24E,1,N
";

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_seat_stalker")
}

fn unique_temp_path(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("seat-stalker-{name}-{stamp}"))
}

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = unique_temp_path(name).with_extension("csv");
    fs::write(&path, contents).expect("fixture should be written");
    path
}

#[test]
fn check_command_prints_one_line_per_active_trip() {
    let path = write_fixture("check", FLIGHTS);

    let output = Command::new(bin())
        .args(["check", path.to_string_lossy().as_ref()])
        .output()
        .expect("check should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "🎉 AA 100 on 2024-06-10 JFK->LAX: better seat 3A (tier 13) vs current 24E (tier 1).",
            "AA 101 on 2024-06-11 JFK->LAX: no better seat than 24E (tier 1).",
        ]
    );

    let _ = fs::remove_file(path);
}

#[test]
fn no_arguments_reads_flights_csv_from_working_directory() {
    let dir = unique_temp_path("cwd");
    fs::create_dir_all(&dir).expect("temp dir should be created");
    fs::write(dir.join("flights.csv"), FLIGHTS).expect("fixture should be written");

    let output = Command::new(bin())
        .current_dir(&dir)
        .env_remove("SEAT_STALKER_FLIGHTS")
        .output()
        .expect("seat_stalker should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains("better seat 3A"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn env_var_selects_flights_file() {
    let path = write_fixture("env", FLIGHTS);

    let output = Command::new(bin())
        .args(["--alerts-only"])
        .env("SEAT_STALKER_FLIGHTS", &path)
        .output()
        .expect("seat_stalker should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("🎉 AA 100"));

    let _ = fs::remove_file(path);
}

#[test]
fn empty_run_says_nothing_to_check() {
    let path = write_fixture(
        "inactive",
        "Airline,FlightNumber,FlightDate,Origin,Destination,CurrentSeat,CurrentTier,Active\nAA,1,2024-06-10,JFK,LAX,24E,1,N\n",
    );

    let output = Command::new(bin())
        .args(["check", path.to_string_lossy().as_ref()])
        .output()
        .expect("check should run");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "No flights to check."
    );

    let _ = fs::remove_file(path);
}

#[test]
fn json_flag_emits_structured_alerts() {
    let path = write_fixture("json", FLIGHTS);

    let output = Command::new(bin())
        .args(["check", path.to_string_lossy().as_ref(), "--json"])
        .output()
        .expect("check should run");

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("check should emit json");
    let alerts = payload.as_array().expect("alerts should be an array");
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0]["better"]["seat"], "3A");
    assert_eq!(alerts[0]["better"]["tier"], 13);
    assert!(alerts[1]["better"].is_null());

    let _ = fs::remove_file(path);
}

#[test]
fn strict_check_fails_on_bad_tier() {
    let path = write_fixture(
        "strict",
        "Airline,FlightNumber,FlightDate,Origin,Destination,CurrentSeat,CurrentTier,Active\nAA,1,2024-06-10,JFK,LAX,24E,best,Y\n",
    );

    let lenient = Command::new(bin())
        .args(["check", path.to_string_lossy().as_ref()])
        .output()
        .expect("check should run");
    assert_eq!(lenient.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&lenient.stdout).contains("(tier 0)"));

    let strict = Command::new(bin())
        .args(["check", path.to_string_lossy().as_ref(), "--strict"])
        .output()
        .expect("check should run");
    assert_eq!(strict.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&strict.stderr);
    assert!(stderr.contains("invalid CurrentTier 'best'"));

    let _ = fs::remove_file(path);
}

#[test]
fn missing_file_is_a_runtime_failure() {
    let output = Command::new(bin())
        .args(["check", "/nonexistent/flights.csv"])
        .output()
        .expect("check should run");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("check failed"));
}

#[test]
fn tier_command_scores_seat_letters() {
    let output = Command::new(bin())
        .args(["tier", "7C", "12A", "24E"])
        .output()
        .expect("tier should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["7C\t10", "12A\t8", "24E\t5"]);
}

#[test]
fn tier_command_returns_usage_without_seats() {
    let output = Command::new(bin())
        .arg("tier")
        .output()
        .expect("tier should run");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("usage: seat_stalker tier"));
}

#[test]
fn bare_path_argument_runs_check() {
    let path = write_fixture("bare-path", FLIGHTS);

    let output = Command::new(bin())
        .arg(path.to_string_lossy().as_ref())
        .output()
        .expect("seat_stalker should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.starts_with("🎉 AA 100"));

    let _ = fs::remove_file(path);
}

#[test]
fn unknown_flag_returns_usage() {
    let output = Command::new(bin())
        .arg("--loud")
        .output()
        .expect("seat_stalker should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown flag '--loud'"));
    assert!(stderr.contains("usage: seat_stalker [check]"));
}

#[test]
fn validate_command_reports_bad_rows() {
    let path = write_fixture(
        "validate",
        "Airline,FlightNumber,FlightDate,Origin,Destination,CurrentSeat,CurrentTier,Active\nAA,1,2024-02-30,JFK,LAX,24E,1,Y\n",
    );

    let output = Command::new(bin())
        .args(["validate", path.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation failed: 1 issue(s)"));
    assert!(stderr.contains("2024-02-30"));

    let _ = fs::remove_file(path);
}

#[test]
fn validate_command_passes_clean_file() {
    let path = write_fixture("validate-ok", FLIGHTS);

    let output = Command::new(bin())
        .args(["validate", path.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validation passed"));
    assert!(stdout.contains("(2 active trip(s))"));

    let _ = fs::remove_file(path);
}
