pub mod pdf;
pub mod report_data;

pub use pdf::{FileFontProvider, FontProvider, PdfExporter};
pub use report_data::{PdfDaySection, PdfReportData, PdfRow};
