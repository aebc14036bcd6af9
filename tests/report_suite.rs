use chrono::{DateTime, Duration, Local, TimeZone};

use fluid_core::core::journal::FluidJournal;
use fluid_core::core::services::{BalanceService, ReportService};
use fluid_core::domain::record::{FluidRecord, FluidType};
use fluid_core::domain::report::LimitLevel;

// Noon anchors sidestep DST edges regardless of the host timezone.
fn noon(year: i32, month: u32, day: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

fn record_at(kind: FluidType, amount: f64, at: DateTime<Local>) -> FluidRecord {
    FluidRecord::new(kind, "sys_water", amount).with_timestamp(at.timestamp_millis())
}

fn journal_with(records: Vec<FluidRecord>) -> FluidJournal {
    let mut journal = FluidJournal::new();
    journal.records = records;
    journal
}

#[test]
fn same_day_in_and_out_yield_the_expected_current_day_report() {
    let now = noon(2026, 3, 10);
    let journal = journal_with(vec![
        record_at(FluidType::In, 500.0, now),
        record_at(FluidType::Out, 200.0, now),
    ]);
    let report = ReportService::day_report(&journal, now.timestamp_millis());
    assert_eq!(report.total_in, 500.0);
    assert_eq!(report.total_out, 200.0);
    assert_eq!(report.balance, 300.0);
    assert_eq!(report.unit, "mL");
}

#[test]
fn zero_record_policies_differ_between_trend_and_range_report() {
    let now = noon(2026, 3, 10);
    let journal = journal_with(vec![record_at(FluidType::In, 300.0, noon(2026, 3, 7))]);

    // The trend zero-fills all seven days...
    let trend = ReportService::weekly_trend(&journal, now);
    assert_eq!(trend.len(), 7);
    assert_eq!(trend.iter().filter(|p| p.total_in > 0.0).count(), 1);

    // ...while the range report omits empty days entirely.
    let report = ReportService::range_report(&journal, 7, now);
    assert_eq!(report.day_groups.len(), 1);
    assert_eq!(report.day_groups[0].date, "2026-03-07");
}

#[test]
fn trend_rounds_each_day_to_whole_numbers() {
    let now = noon(2026, 3, 10);
    let journal = journal_with(vec![
        record_at(FluidType::In, 100.4, now),
        record_at(FluidType::Out, 50.3, now),
    ]);
    let today = &ReportService::weekly_trend(&journal, now)[6];
    assert_eq!(today.total_in, 100.0);
    assert_eq!(today.total_out, 50.0);
    assert_eq!(today.balance, 50.0);
}

#[test]
fn range_totals_equal_the_sum_of_their_day_groups() {
    let now = noon(2026, 3, 10);
    let journal = journal_with(vec![
        record_at(FluidType::In, 500.0, now),
        record_at(FluidType::Out, 120.0, now),
        record_at(FluidType::In, 750.0, noon(2026, 3, 9)),
        record_at(FluidType::Out, 600.0, noon(2026, 3, 8)),
    ]);
    let report = ReportService::range_report(&journal, 7, now);

    let grouped_in: f64 = report.day_groups.iter().map(|d| d.daily_in).sum();
    let grouped_out: f64 = report.day_groups.iter().map(|d| d.daily_out).sum();
    assert_eq!(report.total_in, grouped_in);
    assert_eq!(report.total_out, grouped_out);
    assert_eq!(report.net_balance, report.total_in - report.total_out);
}

#[test]
fn aggregate_is_additive_across_disjoint_day_sets() {
    let now = noon(2026, 3, 10);
    let yesterday = noon(2026, 3, 9);
    let today_records = vec![
        record_at(FluidType::In, 500.0, now),
        record_at(FluidType::Out, 200.0, now),
    ];
    let yesterday_records = vec![record_at(FluidType::In, 321.5, yesterday)];
    let all: Vec<FluidRecord> = today_records
        .iter()
        .chain(yesterday_records.iter())
        .cloned()
        .collect();

    let whole = BalanceService::aggregate(&all);
    let left = BalanceService::aggregate(&today_records);
    let right = BalanceService::aggregate(&yesterday_records);
    assert_eq!(whole.total_in, left.total_in + right.total_in);
    assert_eq!(whole.total_out, left.total_out + right.total_out);
}

#[test]
fn range_average_is_the_rounded_daily_net() {
    let now = noon(2026, 3, 10);
    let journal = journal_with(vec![
        record_at(FluidType::In, 1234.0, now),
        record_at(FluidType::Out, 234.0, noon(2026, 3, 6)),
    ]);
    let report = ReportService::range_report(&journal, 7, now);
    assert_eq!(report.net_balance, 1000.0);
    assert_eq!(report.avg_balance, (1000.0_f64 / 7.0).round());
}

#[test]
fn day_view_sorts_most_recent_first_and_ignores_other_days() {
    let now = noon(2026, 3, 10);
    let journal = journal_with(vec![
        record_at(FluidType::In, 1.0, now - Duration::hours(4)),
        record_at(FluidType::In, 2.0, now),
        record_at(FluidType::In, 3.0, noon(2026, 3, 9)),
    ]);
    let records = ReportService::day_records(&journal, now.timestamp_millis());
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].amount, 2.0);
    assert_eq!(records[1].amount, 1.0);
}

#[test]
fn limit_levels_follow_the_80_and_100_percent_thresholds() {
    let now = noon(2026, 3, 10);
    let mut journal = journal_with(vec![record_at(FluidType::In, 1599.0, now)]);
    journal.daily_limit = 2000.0;
    assert_eq!(
        ReportService::limit_status(&journal, now).level,
        LimitLevel::Safe
    );

    journal.records.push(record_at(FluidType::In, 1.0, now));
    let status = ReportService::limit_status(&journal, now);
    assert_eq!(status.level, LimitLevel::Warning);
    assert_eq!(status.percent, 80.0);
    assert_eq!(status.remaining, 400.0);

    journal.records.push(record_at(FluidType::In, 400.0, now));
    let status = ReportService::limit_status(&journal, now);
    assert_eq!(status.level, LimitLevel::Danger);
    assert_eq!(status.percent, 100.0);
    assert_eq!(status.remaining, 0.0);
}
