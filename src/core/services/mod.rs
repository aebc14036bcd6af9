//! Stateless services deriving views from a [`crate::core::FluidJournal`].
//! Derivations are pure functions invoked on demand; none of them can fail.

pub mod balance_service;
pub mod category_service;
pub mod report_service;

pub use balance_service::BalanceService;
pub use category_service::CategoryService;
pub use report_service::ReportService;
