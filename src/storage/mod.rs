pub mod json_backend;

use crate::domain::{category::Category, record::FluidRecord};
use crate::errors::FluidError;

pub type Result<T> = std::result::Result<T, FluidError>;

/// Abstraction over persistence backends holding the three independent
/// state keys: records, categories, and the daily limit. Loads return
/// `None` for an absent key so callers can distinguish "never written"
/// from an explicit empty value.
pub trait StateStorage: Send + Sync {
    fn load_records(&self) -> Result<Option<Vec<FluidRecord>>>;
    fn save_records(&self, records: &[FluidRecord]) -> Result<()>;

    fn load_categories(&self) -> Result<Option<Vec<Category>>>;
    fn save_categories(&self, categories: &[Category]) -> Result<()>;

    fn load_limit(&self) -> Result<Option<f64>>;
    fn save_limit(&self, limit: f64) -> Result<()>;

    /// Removes every stored key.
    fn clear(&self) -> Result<()>;
}

pub use json_backend::JsonStorage;
