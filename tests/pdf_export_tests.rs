use chrono::{DateTime, Local, TimeZone};

use fluid_core::core::journal::FluidJournal;
use fluid_core::core::services::ReportService;
use fluid_core::domain::record::{FluidRecord, FluidType};
use fluid_core::errors::FluidError;
use fluid_core::export::{FontProvider, PdfExporter, PdfReportData};

fn noon(year: i32, month: u32, day: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

fn sample_journal(now: DateTime<Local>) -> FluidJournal {
    let mut journal = FluidJournal::new();
    journal.records = vec![
        FluidRecord::new(FluidType::In, "sys_water", 250.0)
            .with_timestamp(now.timestamp_millis())
            .with_note("with meds"),
        FluidRecord::new(FluidType::Out, "sys_urine", 400.0)
            .with_timestamp(noon(2026, 3, 9).timestamp_millis()),
    ];
    journal
}

#[test]
fn shaping_orders_days_most_recent_first() {
    let now = noon(2026, 3, 10);
    let journal = sample_journal(now);
    let report = ReportService::range_report(&journal, 7, now);
    let data = PdfReportData::from_range_report(&journal, &report);

    assert_eq!(data.period, "7 Days");
    assert_eq!(data.days.len(), 2);
    assert_eq!(data.days[0].date, "2026-03-10");
    assert_eq!(data.days[1].date, "2026-03-09");

    let first_row = &data.days[0].records[0];
    assert_eq!(first_row[1], "IN");
    assert_eq!(first_row[2], "Water");
    assert_eq!(first_row[3], "250");
    assert_eq!(first_row[4], "with meds");
}

#[test]
fn shaping_is_independent_of_any_font_or_renderer() {
    let now = noon(2026, 3, 10);
    let journal = sample_journal(now);
    let report = ReportService::range_report(&journal, 7, now);

    // Shape twice; no renderer state is involved.
    let a = PdfReportData::from_range_report(&journal, &report);
    let b = PdfReportData::from_range_report(&journal, &report);
    assert_eq!(a, b);
}

struct UnreachableFonts;

impl FontProvider for UnreachableFonts {
    fn font_bytes(&self) -> Result<Vec<u8>, FluidError> {
        Err(FluidError::ExportError("font host unreachable".into()))
    }
}

#[test]
fn font_provider_failure_aborts_the_whole_export() {
    let now = noon(2026, 3, 10);
    let journal = sample_journal(now);
    let report = ReportService::range_report(&journal, 7, now);
    let data = PdfReportData::from_range_report(&journal, &report);

    let exporter = PdfExporter::new(UnreachableFonts);
    let err = exporter.render(&data).unwrap_err();
    assert!(err.to_string().contains("font host unreachable"));
}
