//! Compare each active trip against available seats and build alert lines.
//!
//! A line starting with [`ALERT_MARKER`] is the signal the notification workflow
//! watches for; lines without it are informational only.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::availability::SeatSource;
use crate::error::Result;
use crate::seats::{SeatCandidate, TierPolicy};
use crate::trips::{load_trips, Strictness, Trip};

pub const ALERT_MARKER: &str = "🎉";

/// Printed when a run produced nothing to show.
pub const NOTHING_TO_CHECK: &str = "No flights to check.";

/// Which alerts a run reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// One line per active trip.
    #[default]
    All,
    /// Only trips with a better seat.
    AlertsOnly,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    pub strictness: Strictness,
    pub tier_policy: TierPolicy,
    pub output: OutputMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub airline: String,
    pub flight_number: String,
    pub flight_date: String,
    pub origin: String,
    pub destination: String,
    pub current_seat: String,
    pub current_tier: i32,
    pub better: Option<SeatCandidate>,
}

impl Alert {
    pub fn for_trip(trip: &Trip, better: Option<SeatCandidate>) -> Self {
        Self {
            airline: trip.airline.clone(),
            flight_number: trip.flight_number.clone(),
            flight_date: trip.flight_date.clone(),
            origin: trip.origin.clone(),
            destination: trip.destination.clone(),
            current_seat: trip.current_seat.clone(),
            current_tier: trip.current_tier,
            better,
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.better.is_some()
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route = format!(
            "{} {} on {} {}->{}",
            self.airline, self.flight_number, self.flight_date, self.origin, self.destination
        );
        match &self.better {
            Some(seat) => write!(
                f,
                "{ALERT_MARKER} {route}: better seat {} (tier {}) vs current {} (tier {}).",
                seat.seat, seat.tier, self.current_seat, self.current_tier
            ),
            None => write!(
                f,
                "{route}: no better seat than {} (tier {}).",
                self.current_seat, self.current_tier
            ),
        }
    }
}

/// Best candidate ranked strictly above `current_tier`. On equal ranks the earlier
/// candidate wins. The returned candidate carries its ranked tier.
pub fn best_upgrade(
    current_tier: i32,
    candidates: &[SeatCandidate],
    policy: TierPolicy,
) -> Option<SeatCandidate> {
    let mut best: Option<SeatCandidate> = None;
    let mut best_tier = current_tier;
    for candidate in candidates {
        let tier = policy.rank(candidate);
        if tier > best_tier {
            best_tier = tier;
            best = Some(SeatCandidate::new(candidate.seat.trim(), tier));
        }
    }
    best
}

pub fn evaluate_trip(trip: &Trip, source: &dyn SeatSource, policy: TierPolicy) -> Result<Alert> {
    let candidates = source.available_seats(trip)?;
    let better = best_upgrade(trip.current_tier, &candidates, policy);
    debug!(
        line = trip.line,
        candidates = candidates.len(),
        upgrade = better.as_ref().map(|c| c.seat.as_str()),
        "evaluated trip"
    );
    Ok(Alert::for_trip(trip, better))
}

pub fn check_trips(
    trips: &[Trip],
    options: &CheckOptions,
    source: &dyn SeatSource,
) -> Result<Vec<Alert>> {
    let mut alerts = Vec::with_capacity(trips.len());
    for trip in trips {
        let alert = evaluate_trip(trip, source, options.tier_policy)?;
        if options.output == OutputMode::AlertsOnly && !alert.is_actionable() {
            continue;
        }
        alerts.push(alert);
    }
    info!(
        trips = trips.len(),
        actionable = alerts.iter().filter(|a| a.is_actionable()).count(),
        "seat check complete"
    );
    Ok(alerts)
}

/// Load the flights file and check every active trip.
pub fn check_flights(
    path: impl AsRef<Path>,
    options: &CheckOptions,
    source: &dyn SeatSource,
) -> Result<Vec<Alert>> {
    let trips = load_trips(path, options.strictness)?;
    check_trips(&trips, options, source)
}

pub fn render(alerts: &[Alert]) -> String {
    alerts
        .iter()
        .map(Alert::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Alerts as a pretty-printed JSON array.
pub fn render_json(alerts: &[Alert]) -> Result<String> {
    Ok(serde_json::to_string_pretty(alerts)?)
}
