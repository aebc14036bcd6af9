//! Shapes a range report into the flat structure the PDF renderer consumes.
//! This stage is pure: category references are resolved here (through the
//! placeholder fallback) so the renderer never touches the journal.

use crate::core::journal::FluidJournal;
use crate::core::services::CategoryService;
use crate::core::time::to_local;
use crate::domain::report::RangeReport;

/// One detail table row: time, direction, item, amount, note.
pub type PdfRow = [String; 5];

#[derive(Debug, Clone, PartialEq)]
pub struct PdfDaySection {
    pub date: String,
    pub summary: String,
    pub records: Vec<PdfRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfReportData {
    pub period: String,
    pub start_date: String,
    pub end_date: String,
    pub total_in: f64,
    pub total_out: f64,
    pub net_balance: f64,
    pub avg_balance: f64,
    pub days: Vec<PdfDaySection>,
}

impl PdfReportData {
    pub fn from_range_report(journal: &FluidJournal, report: &RangeReport) -> Self {
        let days = report
            .day_groups
            .iter()
            .map(|group| {
                let summary = format!(
                    "In +{} / Out -{} / Net {} mL",
                    format_ml(group.daily_in),
                    format_ml(group.daily_out),
                    format_ml(group.daily_balance)
                );
                let records = group
                    .records
                    .iter()
                    .map(|record| {
                        let time = to_local(record.timestamp)
                            .map(|dt| dt.format("%H:%M").to_string())
                            .unwrap_or_default();
                        let category = CategoryService::resolve(journal, &record.category_id);
                        [
                            time,
                            record.kind.to_string(),
                            category.label,
                            format_ml(record.amount),
                            record.note.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                PdfDaySection {
                    date: group.date.clone(),
                    summary,
                    records,
                }
            })
            .collect();

        Self {
            period: report.period.clone(),
            start_date: report.start_date.clone(),
            end_date: report.end_date.clone(),
            total_in: report.total_in,
            total_out: report.total_out,
            net_balance: report.net_balance,
            avg_balance: report.avg_balance,
            days,
        }
    }
}

pub(crate) fn format_ml(value: f64) -> String {
    format!("{}", value)
}
