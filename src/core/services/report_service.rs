use std::collections::BTreeMap;

use chrono::{DateTime, Local};

use crate::core::journal::{FluidJournal, DEFAULT_DAILY_LIMIT};
use crate::core::time::{local_date_key, local_day_start_ms, same_local_day, to_local, DAY_MS};
use crate::domain::record::{FluidRecord, FluidType};
use crate::domain::report::{
    BalanceReport, DayGroup, LimitLevel, LimitStatus, RangeReport, TrendPoint,
};

use super::BalanceService;

pub struct ReportService;

impl ReportService {
    /// Records on the same local calendar day as the reference timestamp,
    /// most recent first.
    pub fn day_records<'a>(journal: &'a FluidJournal, reference_ms: i64) -> Vec<&'a FluidRecord> {
        let mut records: Vec<&FluidRecord> = journal
            .records
            .iter()
            .filter(|record| same_local_day(record.timestamp, reference_ms))
            .collect();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    /// Balance aggregation over [`Self::day_records`].
    pub fn day_report(journal: &FluidJournal, reference_ms: i64) -> BalanceReport {
        BalanceService::aggregate(Self::day_records(journal, reference_ms).into_iter())
    }

    /// Today's intake measured against the configured daily limit, with a
    /// fallback of 2000 mL when the configured limit is not positive.
    pub fn limit_status(journal: &FluidJournal, now: DateTime<Local>) -> LimitStatus {
        let today = Self::day_report(journal, now.timestamp_millis());
        let limit = if journal.daily_limit > 0.0 {
            journal.daily_limit
        } else {
            DEFAULT_DAILY_LIMIT
        };
        let ratio = today.total_in / limit;
        let level = if ratio >= 1.0 {
            LimitLevel::Danger
        } else if ratio >= 0.8 {
            LimitLevel::Warning
        } else {
            LimitLevel::Safe
        };
        LimitStatus {
            percent: (ratio * 100.0).min(100.0),
            remaining: limit - today.total_in,
            limit,
            level,
        }
    }

    /// Fixed seven-day trend ending today: always exactly seven points,
    /// oldest first, zero-filled for days without records. Day bounds are
    /// local midnight-to-midnight; figures are rounded to whole numbers.
    pub fn weekly_trend(journal: &FluidJournal, now: DateTime<Local>) -> Vec<TrendPoint> {
        let today_start = local_day_start_ms(now.date_naive());
        let mut points = Vec::with_capacity(7);
        for offset in (0..7i64).rev() {
            let start = today_start - offset * DAY_MS;
            let end = start + DAY_MS;
            let mut total_in = 0.0;
            let mut total_out = 0.0;
            for record in &journal.records {
                if record.timestamp < start || record.timestamp >= end {
                    continue;
                }
                match record.kind {
                    FluidType::In => total_in += record.amount,
                    FluidType::Out => total_out += record.amount,
                }
            }
            let date = to_local(start)
                .map(|dt| dt.format("%m-%d").to_string())
                .unwrap_or_default();
            points.push(TrendPoint {
                date,
                timestamp: start,
                balance: (total_in - total_out).round(),
                total_in: total_in.round(),
                total_out: total_out.round(),
            });
        }
        points
    }

    /// Aggregation over an inclusive window of `days` whole calendar days
    /// ending today. Selected records are grouped by local calendar date;
    /// days without records produce no group, and groups come most recent
    /// first, each carrying its raw records.
    pub fn range_report(journal: &FluidJournal, days: u32, now: DateTime<Local>) -> RangeReport {
        let days = days.max(1);
        let end = local_day_start_ms(now.date_naive()) + DAY_MS - 1000;
        let start = end - i64::from(days) * DAY_MS + 1;

        let mut selected: Vec<&FluidRecord> = journal
            .records
            .iter()
            .filter(|record| record.timestamp >= start && record.timestamp <= end)
            .collect();
        selected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let mut total_in = 0.0;
        let mut total_out = 0.0;
        for record in &selected {
            match record.kind {
                FluidType::In => total_in += record.amount,
                FluidType::Out => total_out += record.amount,
            }
        }
        let net_balance = total_in - total_out;
        let avg_balance = (net_balance / f64::from(days)).round();

        let mut grouped: BTreeMap<String, Vec<FluidRecord>> = BTreeMap::new();
        for record in &selected {
            if let Some(key) = local_date_key(record.timestamp) {
                grouped.entry(key).or_default().push((*record).clone());
            }
        }
        // Date keys sort chronologically; reverse for most-recent-first.
        let day_groups = grouped
            .into_iter()
            .rev()
            .map(|(date, records)| {
                let daily_in: f64 = records
                    .iter()
                    .filter(|r| r.kind == FluidType::In)
                    .map(|r| r.amount)
                    .sum();
                let daily_out: f64 = records
                    .iter()
                    .filter(|r| r.kind == FluidType::Out)
                    .map(|r| r.amount)
                    .sum();
                DayGroup {
                    date,
                    records,
                    daily_in,
                    daily_out,
                    daily_balance: daily_in - daily_out,
                }
            })
            .collect();

        RangeReport {
            period: format!("{} Days", days),
            start_date: local_date_key(start).unwrap_or_default(),
            end_date: local_date_key(end).unwrap_or_default(),
            total_in,
            total_out,
            net_balance,
            avg_balance,
            day_groups,
        }
    }
}
