//! Seat desirability scoring.
//!
//! Tiers follow the tier primer: 14 is a first-class aisle, 1 a regular middle.
//! The seat-letter table below is coarser and only looks at the seat letter.

use serde::Serialize;

/// Tier for a seat whose letter is not in [`SEAT_LETTER_TIERS`].
pub const DEFAULT_SEAT_TIER: i32 = 5;

/// Seat letter to tier. Aisles first, then the window seats.
pub const SEAT_LETTER_TIERS: &[(char, i32)] = &[('C', 10), ('D', 9), ('A', 8), ('F', 8)];

/// Range covered by the tier primer; values outside it are accepted but suspicious.
pub const PRIMER_TIERS: std::ops::RangeInclusive<i32> = 1..=14;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatCandidate {
    pub seat: String,
    pub tier: i32,
}

impl SeatCandidate {
    pub fn new(seat: impl Into<String>, tier: i32) -> Self {
        Self {
            seat: seat.into(),
            tier,
        }
    }

    /// Candidate whose tier is derived from the seat letter.
    pub fn from_label(seat: impl Into<String>) -> Self {
        let seat = seat.into();
        let tier = tier_for_seat(&seat);
        Self { seat, tier }
    }
}

/// Score a seat label such as `7C` or `12a` by its trailing letter.
pub fn tier_for_seat(label: &str) -> i32 {
    let Some(letter) = label.trim().chars().last() else {
        return DEFAULT_SEAT_TIER;
    };
    let letter = letter.to_ascii_uppercase();
    SEAT_LETTER_TIERS
        .iter()
        .find(|(l, _)| *l == letter)
        .map(|(_, tier)| *tier)
        .unwrap_or(DEFAULT_SEAT_TIER)
}

/// How an available seat's tier is decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TierPolicy {
    /// Trust the tier reported by the availability source.
    #[default]
    Explicit,
    /// Ignore the reported tier and score the seat letter.
    SeatSuffix,
}

impl TierPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "explicit" => Some(Self::Explicit),
            "suffix" | "seat-suffix" => Some(Self::SeatSuffix),
            _ => None,
        }
    }

    pub fn rank(&self, candidate: &SeatCandidate) -> i32 {
        match self {
            Self::Explicit => candidate.tier,
            Self::SeatSuffix => tier_for_seat(&candidate.seat),
        }
    }
}
