use crate::domain::category::{self, Category};
use crate::domain::record::FluidRecord;

/// Default daily intake ceiling in milliliters.
pub const DEFAULT_DAILY_LIMIT: f64 = 2000.0;

/// In-memory aggregate owning all logged records, the category registry,
/// and the configured daily intake limit. The journal is the single source
/// of truth for every derived report; persistence is layered on top by
/// [`crate::core::store::FluidStore`].
#[derive(Debug, Clone)]
pub struct FluidJournal {
    pub records: Vec<FluidRecord>,
    pub categories: Vec<Category>,
    pub daily_limit: f64,
}

impl FluidJournal {
    /// A journal seeded with the system default categories.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            categories: category::system_defaults(),
            daily_limit: DEFAULT_DAILY_LIMIT,
        }
    }

    /// A journal with nothing in it, the state before any storage load.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            categories: Vec::new(),
            daily_limit: DEFAULT_DAILY_LIMIT,
        }
    }

    /// Appends a record and returns its id.
    pub fn add_record(&mut self, record: FluidRecord) -> String {
        let id = record.id.clone();
        self.records.push(record);
        id
    }

    /// Removes a record by id. Returns false when no record matched.
    pub fn remove_record(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        self.records.len() != before
    }

    /// Appends a category and returns its id.
    pub fn add_category(&mut self, category: Category) -> String {
        let id = category.id.clone();
        self.categories.push(category);
        id
    }

    /// Removes a non-default category by id. Default categories are never
    /// removed; returns false and leaves the registry unchanged.
    pub fn remove_category(&mut self, id: &str) -> bool {
        match self.categories.iter().position(|c| c.id == id) {
            Some(index) if !self.categories[index].is_default => {
                self.categories.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

impl Default for FluidJournal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::FluidType;

    #[test]
    fn remove_record_reports_missing_ids() {
        let mut journal = FluidJournal::new();
        let id = journal.add_record(FluidRecord::new(FluidType::In, "sys_water", 100.0));
        assert!(!journal.remove_record("nope"));
        assert!(journal.remove_record(&id));
        assert_eq!(journal.record_count(), 0);
    }

    #[test]
    fn default_categories_survive_removal_attempts() {
        let mut journal = FluidJournal::new();
        assert!(!journal.remove_category("sys_urine"));
        assert_eq!(journal.categories.len(), 10);

        let custom = journal.add_category(Category::custom("Tea", FluidType::In, None));
        assert!(journal.remove_category(&custom));
        assert_eq!(journal.categories.len(), 10);
    }
}
