//! Load booked trips from the flights CSV.
//!
//! Columns: Airline, FlightNumber, FlightDate, Origin, Destination, CurrentSeat,
//! CurrentTier, Active (header row required). Blank lines and lines starting with
//! `#` are dropped before the CSV reader sees them.

use std::fs;
use std::num::IntErrorKind;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, SeatStalkerError};

pub const DEFAULT_FLIGHTS_PATH: &str = "flights.csv";

pub const COL_AIRLINE: &str = "Airline";
pub const COL_FLIGHT_NUMBER: &str = "FlightNumber";
pub const COL_FLIGHT_DATE: &str = "FlightDate";
pub const COL_ORIGIN: &str = "Origin";
pub const COL_DESTINATION: &str = "Destination";
pub const COL_CURRENT_SEAT: &str = "CurrentSeat";
pub const COL_CURRENT_TIER: &str = "CurrentTier";
pub const COL_ACTIVE: &str = "Active";

pub const REQUIRED_COLUMNS: [&str; 8] = [
    COL_AIRLINE,
    COL_FLIGHT_NUMBER,
    COL_FLIGHT_DATE,
    COL_ORIGIN,
    COL_DESTINATION,
    COL_CURRENT_SEAT,
    COL_CURRENT_TIER,
    COL_ACTIVE,
];

/// How forgiving the loader is about malformed rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Missing text becomes empty, a bad tier becomes 0, bad dates get the fallback seats.
    #[default]
    Lenient,
    /// The first malformed active row aborts the run.
    Strict,
}

/// One active booking from the flights file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trip {
    /// 1-based line in the source file.
    pub line: usize,
    pub airline: String,
    pub flight_number: String,
    pub flight_date: String,
    pub origin: String,
    pub destination: String,
    pub current_seat: String,
    pub current_tier: i32,
}

/// A data record together with the line it came from.
#[derive(Debug, Clone)]
pub struct SourceRow {
    pub line: usize,
    pub record: csv::StringRecord,
}

impl SourceRow {
    pub fn cell(&self, col: Option<usize>) -> Option<&str> {
        col.and_then(|i| self.record.get(i)).map(str::trim)
    }

    /// Every cell, empty ones included, starts with `#`.
    pub fn is_comment(&self) -> bool {
        !self.record.is_empty() && self.record.iter().all(|f| f.trim().starts_with('#'))
    }
}

/// Column indices derived from the header row by name.
#[derive(Debug, Clone, Default)]
pub struct Columns {
    pub airline: Option<usize>,
    pub flight_number: Option<usize>,
    pub flight_date: Option<usize>,
    pub origin: Option<usize>,
    pub destination: Option<usize>,
    pub current_seat: Option<usize>,
    pub current_tier: Option<usize>,
    pub active: Option<usize>,
}

impl Columns {
    pub fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        Self {
            airline: find(COL_AIRLINE),
            flight_number: find(COL_FLIGHT_NUMBER),
            flight_date: find(COL_FLIGHT_DATE),
            origin: find(COL_ORIGIN),
            destination: find(COL_DESTINATION),
            current_seat: find(COL_CURRENT_SEAT),
            current_tier: find(COL_CURRENT_TIER),
            active: find(COL_ACTIVE),
        }
    }

    pub fn missing(&self) -> Vec<&'static str> {
        let present = [
            self.airline,
            self.flight_number,
            self.flight_date,
            self.origin,
            self.destination,
            self.current_seat,
            self.current_tier,
            self.active,
        ];
        REQUIRED_COLUMNS
            .iter()
            .zip(present)
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Parsed flights file: header columns plus data rows in file order.
#[derive(Debug, Clone)]
pub struct FlightRows {
    pub columns: Columns,
    pub rows: Vec<SourceRow>,
}

/// Drop blank and `#` lines, remembering which source line each kept line was.
fn strip_comment_lines(text: &str) -> (String, Vec<usize>) {
    let mut kept = String::with_capacity(text.len());
    let mut line_map = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        kept.push_str(line);
        kept.push('\n');
        line_map.push(idx + 1);
    }
    (kept, line_map)
}

/// Read the header and data rows. Ragged rows are allowed; cells are looked up by column.
pub fn read_rows(text: &str) -> Result<FlightRows> {
    let (kept, line_map) = strip_comment_lines(text);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(kept.as_bytes());

    let columns = Columns::from_headers(reader.headers()?);
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let kept_line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let line = kept_line
            .checked_sub(1)
            .and_then(|i| line_map.get(i))
            .copied()
            .unwrap_or(kept_line);
        rows.push(SourceRow { line, record });
    }
    Ok(FlightRows { columns, rows })
}

pub fn is_active(flag: Option<&str>) -> bool {
    flag.map(|f| f.trim().eq_ignore_ascii_case("Y")).unwrap_or(false)
}

fn text_field(
    row: &SourceRow,
    col: Option<usize>,
    name: &'static str,
    strictness: Strictness,
) -> Result<String> {
    match (row.cell(col), strictness) {
        (Some(value), _) => Ok(value.to_string()),
        (None, Strictness::Lenient) => Ok(String::new()),
        (None, Strictness::Strict) => Err(SeatStalkerError::MissingField {
            line: row.line,
            field: name,
        }),
    }
}

/// A `CurrentTier` cell as read from the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierCell {
    Value(i32),
    /// Numeric but beyond `i32`; saturated so it still compares above or below every seat.
    Clamped(i32),
    Invalid,
}

pub fn parse_tier(raw: &str) -> TierCell {
    match raw.trim().parse::<i32>() {
        Ok(tier) => TierCell::Value(tier),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => TierCell::Clamped(i32::MAX),
            IntErrorKind::NegOverflow => TierCell::Clamped(i32::MIN),
            _ => TierCell::Invalid,
        },
    }
}

fn tier_field(row: &SourceRow, col: Option<usize>, strictness: Strictness) -> Result<i32> {
    let raw = match (row.cell(col), strictness) {
        (Some(value), _) => value,
        (None, Strictness::Lenient) => return Ok(0),
        (None, Strictness::Strict) => {
            return Err(SeatStalkerError::MissingField {
                line: row.line,
                field: COL_CURRENT_TIER,
            })
        }
    };
    match (parse_tier(raw), strictness) {
        (TierCell::Value(tier), _) => Ok(tier),
        (TierCell::Clamped(tier), _) => {
            warn!(line = row.line, value = raw, tier, "CurrentTier out of range, clamping");
            Ok(tier)
        }
        (TierCell::Invalid, Strictness::Lenient) => {
            if !raw.is_empty() {
                warn!(line = row.line, value = raw, "invalid CurrentTier, treating as 0");
            }
            Ok(0)
        }
        (TierCell::Invalid, Strictness::Strict) => Err(SeatStalkerError::InvalidTier {
            line: row.line,
            value: raw.to_string(),
        }),
    }
}

/// Build a trip from an active row. Returns `Ok(None)` for inactive rows.
pub fn trip_from_row(
    row: &SourceRow,
    columns: &Columns,
    strictness: Strictness,
) -> Result<Option<Trip>> {
    if strictness == Strictness::Strict && row.cell(columns.active).is_none() {
        return Err(SeatStalkerError::MissingField {
            line: row.line,
            field: COL_ACTIVE,
        });
    }
    if !is_active(row.cell(columns.active)) {
        debug!(line = row.line, "skipping inactive trip");
        return Ok(None);
    }

    Ok(Some(Trip {
        line: row.line,
        airline: text_field(row, columns.airline, COL_AIRLINE, strictness)?,
        flight_number: text_field(row, columns.flight_number, COL_FLIGHT_NUMBER, strictness)?,
        flight_date: text_field(row, columns.flight_date, COL_FLIGHT_DATE, strictness)?,
        origin: text_field(row, columns.origin, COL_ORIGIN, strictness)?,
        destination: text_field(row, columns.destination, COL_DESTINATION, strictness)?,
        current_seat: text_field(row, columns.current_seat, COL_CURRENT_SEAT, strictness)?,
        current_tier: tier_field(row, columns.current_tier, strictness)?,
    }))
}

/// Parse flights CSV text into active trips, in file order.
pub fn parse_trips(text: &str, strictness: Strictness) -> Result<Vec<Trip>> {
    let FlightRows { columns, rows } = read_rows(text)?;
    let mut trips = Vec::new();
    for row in &rows {
        if strictness == Strictness::Strict && row.is_comment() {
            continue;
        }
        if let Some(trip) = trip_from_row(row, &columns, strictness)? {
            trips.push(trip);
        }
    }
    Ok(trips)
}

pub fn load_trips(path: impl AsRef<Path>, strictness: Strictness) -> Result<Vec<Trip>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SeatStalkerError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let trips = parse_trips(&text, strictness)?;
    debug!(path = %path.display(), count = trips.len(), "loaded active trips");
    Ok(trips)
}
