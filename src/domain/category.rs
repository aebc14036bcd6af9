//! Domain types representing record categories.

use chrono::Utc;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Identifiable};
use crate::domain::record::FluidType;

/// Synthetic id substituted when a record references a deleted category.
pub const PLACEHOLDER_CATEGORY_ID: &str = "unknown";

/// Icon assigned to custom categories created without one.
pub const DEFAULT_CUSTOM_ICON: &str = "✨";

/// User-facing classification tag carrying a fixed flow direction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FluidType,
    pub icon: String,
    /// System defaults can never be removed from the registry.
    pub is_default: bool,
}

impl Category {
    /// Creates a user-defined category with a time-derived id.
    pub fn custom(label: impl Into<String>, kind: FluidType, icon: Option<&str>) -> Self {
        Self {
            id: format!("custom_{}", Utc::now().timestamp_millis()),
            label: label.into(),
            kind,
            icon: icon.unwrap_or(DEFAULT_CUSTOM_ICON).to_string(),
            is_default: false,
        }
    }

    /// Placeholder returned for unresolved category references, keeping
    /// every record renderable after its category was deleted.
    pub fn placeholder() -> Self {
        Self {
            id: PLACEHOLDER_CATEGORY_ID.into(),
            label: "Unknown".into(),
            kind: FluidType::In,
            icon: "❓".into(),
            is_default: true,
        }
    }

    fn system(id: &str, label: &str, kind: FluidType, icon: &str) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            icon: icon.into(),
            is_default: true,
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} {} ({})", self.icon, self.label, self.kind)
    }
}

static SYSTEM_DEFAULTS: Lazy<Vec<Category>> = Lazy::new(|| {
    vec![
        Category::system("sys_diet", "Diet", FluidType::In, "🥣"),
        Category::system("sys_water", "Water", FluidType::In, "🥤"),
        Category::system("sys_infusion", "Infusion", FluidType::In, "💉"),
        Category::system("sys_blood", "Transfusion", FluidType::In, "🩸"),
        Category::system("sys_urine", "Urine", FluidType::Out, "💧"),
        Category::system("sys_stool", "Stool", FluidType::Out, "💩"),
        Category::system("sys_vomit", "Vomit", FluidType::Out, "🤮"),
        Category::system("sys_sputum", "Sputum", FluidType::Out, "🫁"),
        Category::system("sys_drainage", "Drainage", FluidType::Out, "🧴"),
        Category::system("sys_other_out", "Other Output", FluidType::Out, "📉"),
    ]
});

/// The ten seeded system categories, freshly cloned.
pub fn system_defaults() -> Vec<Category> {
    SYSTEM_DEFAULTS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_ten_defaults_with_well_known_ids() {
        let defaults = system_defaults();
        assert_eq!(defaults.len(), 10);
        assert!(defaults.iter().all(|c| c.is_default));
        assert!(defaults.iter().any(|c| c.id == "sys_diet"));
        assert!(defaults.iter().any(|c| c.id == "sys_other_out"));
    }

    #[test]
    fn custom_categories_are_removable_and_time_tagged() {
        let category = Category::custom("Tea", FluidType::In, None);
        assert!(!category.is_default);
        assert!(category.id.starts_with("custom_"));
        assert_eq!(category.icon, DEFAULT_CUSTOM_ICON);
    }

    #[test]
    fn serializes_with_original_field_spelling() {
        let json = serde_json::to_value(Category::placeholder()).unwrap();
        assert_eq!(json["id"], "unknown");
        assert_eq!(json["type"], "IN");
        assert_eq!(json["isDefault"], true);
    }
}
