pub mod category;
pub mod common;
pub mod record;
pub mod report;

pub use category::Category;
pub use common::{Displayable, Identifiable};
pub use record::{FluidRecord, FluidType};
pub use report::{BalanceReport, DayGroup, LimitLevel, LimitStatus, RangeReport, TrendPoint};
