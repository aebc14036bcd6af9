//! Derived report types. None of these are persisted; they are recomputed
//! on demand from the journal.

use serde::{Deserialize, Serialize};

use crate::domain::record::FluidRecord;

/// Unit attached to every derived balance figure.
pub const VOLUME_UNIT: &str = "mL";

/// Totals and net balance over an arbitrary record set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    pub total_in: f64,
    pub total_out: f64,
    /// `total_in - total_out`, rounded to 2 decimal places.
    pub balance: f64,
    pub unit: String,
}

impl BalanceReport {
    pub fn zero() -> Self {
        Self {
            total_in: 0.0,
            total_out: 0.0,
            balance: 0.0,
            unit: VOLUME_UNIT.into(),
        }
    }
}

/// Severity of today's intake relative to the configured daily limit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LimitLevel {
    Safe,
    Warning,
    Danger,
}

/// Today's intake measured against the daily limit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LimitStatus {
    /// Intake as a share of the limit, capped at 100.
    pub percent: f64,
    pub remaining: f64,
    pub limit: f64,
    pub level: LimitLevel,
}

/// One day of the fixed seven-day trend. Emitted even for days with no
/// records, zero-filled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Formatted `MM-DD`.
    pub date: String,
    /// Local day start, milliseconds since epoch.
    pub timestamp: i64,
    pub balance: f64,
    pub total_in: f64,
    pub total_out: f64,
}

/// One calendar day of a range report, carrying its raw records. Days with
/// no records produce no group at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayGroup {
    /// Local calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub records: Vec<FluidRecord>,
    pub daily_in: f64,
    pub daily_out: f64,
    pub daily_balance: f64,
}

/// Aggregation over a trailing window of whole calendar days ending today.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RangeReport {
    /// Display label, e.g. `"7 Days"`.
    pub period: String,
    pub start_date: String,
    pub end_date: String,
    pub total_in: f64,
    pub total_out: f64,
    pub net_balance: f64,
    /// `net_balance / days`, rounded to a whole number.
    pub avg_balance: f64,
    /// Most recent day first.
    pub day_groups: Vec<DayGroup>,
}
