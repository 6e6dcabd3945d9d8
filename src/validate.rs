use std::fmt;
use std::fs;
use std::path::Path;

use crate::availability::is_valid_flight_date;
use crate::error::{Result, SeatStalkerError};
use crate::seats::PRIMER_TIERS;
use crate::trips::{
    is_active, parse_tier, read_rows, Columns, SourceRow, TierCell, COL_CURRENT_TIER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub active_trips: usize,
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == ValidationSeverity::Error)
            .count()
    }
}

fn check_row(row: &SourceRow, columns: &Columns, report: &mut ValidationReport) {
    let context = format!("line {}", row.line);
    let active = row.cell(columns.active);

    match active {
        Some(flag) if !flag.eq_ignore_ascii_case("Y") && !flag.eq_ignore_ascii_case("N") => {
            report.push(
                ValidationSeverity::Warning,
                &context,
                format!("Active is '{flag}', only 'Y' enables a trip"),
            );
        }
        _ => {}
    }
    if !is_active(active) {
        return;
    }
    report.active_trips += 1;

    let text_columns = [
        ("Airline", columns.airline),
        ("FlightNumber", columns.flight_number),
        ("Origin", columns.origin),
        ("Destination", columns.destination),
        ("CurrentSeat", columns.current_seat),
    ];
    for (name, col) in text_columns {
        if col.is_some() && row.cell(col).is_none() {
            report.push(ValidationSeverity::Error, &context, format!("missing {name}"));
        }
    }

    if columns.flight_date.is_some() {
        match row.cell(columns.flight_date) {
            None => report.push(ValidationSeverity::Error, &context, "missing FlightDate"),
            Some(date) if !is_valid_flight_date(date) => report.push(
                ValidationSeverity::Error,
                &context,
                format!("FlightDate '{date}' is not a YYYY-MM-DD date"),
            ),
            Some(_) => {}
        }
    }

    if columns.current_tier.is_some() {
        match row.cell(columns.current_tier).map(|raw| (raw, parse_tier(raw))) {
            None => report.push(
                ValidationSeverity::Error,
                &context,
                format!("missing {COL_CURRENT_TIER}"),
            ),
            Some((raw, TierCell::Invalid)) => report.push(
                ValidationSeverity::Error,
                &context,
                format!("{COL_CURRENT_TIER} '{raw}' is not an integer"),
            ),
            Some((raw, TierCell::Clamped(_))) => report.push(
                ValidationSeverity::Warning,
                &context,
                format!("{COL_CURRENT_TIER} '{raw}' does not fit a 32-bit tier"),
            ),
            Some((_, TierCell::Value(tier))) if !PRIMER_TIERS.contains(&tier) => report.push(
                ValidationSeverity::Warning,
                &context,
                format!(
                    "{COL_CURRENT_TIER} {tier} is outside {}..={}",
                    PRIMER_TIERS.start(),
                    PRIMER_TIERS.end()
                ),
            ),
            Some(_) => {}
        }
    }
}

/// Check every row of a flights file without stopping at the first problem.
pub fn validate_flights(text: &str) -> Result<ValidationReport> {
    let flights = read_rows(text)?;
    let mut report = ValidationReport::default();

    for name in flights.columns.missing() {
        report.push(
            ValidationSeverity::Error,
            "header",
            format!("missing column '{name}'"),
        );
    }
    for row in &flights.rows {
        if row.is_comment() {
            continue;
        }
        check_row(row, &flights.columns, &mut report);
    }
    Ok(report)
}

pub fn validate_flights_file(path: impl AsRef<Path>) -> Result<ValidationReport> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SeatStalkerError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    validate_flights(&text)
}
