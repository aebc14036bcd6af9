use crate::core::journal::FluidJournal;
use crate::domain::category::Category;
use crate::domain::record::FluidType;

pub struct CategoryService;

impl CategoryService {
    /// Looks up a category by id, falling back to the synthetic placeholder
    /// for unresolved references. Never fails, so every record stays
    /// renderable even after its category was deleted.
    pub fn resolve(journal: &FluidJournal, id: &str) -> Category {
        journal
            .category(id)
            .cloned()
            .unwrap_or_else(Category::placeholder)
    }

    pub fn list(journal: &FluidJournal) -> Vec<&Category> {
        journal.categories.iter().collect()
    }

    pub fn of_kind(journal: &FluidJournal, kind: FluidType) -> Vec<&Category> {
        journal
            .categories
            .iter()
            .filter(|category| category.kind == kind)
            .collect()
    }
}
