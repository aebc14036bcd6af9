use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::journal::{FluidJournal, DEFAULT_DAILY_LIMIT};
use crate::domain::category::{self, Category};
use crate::domain::record::{FluidRecord, FluidType};
use crate::errors::FluidError;
use crate::storage::StateStorage;

/// Version literal written into every backup envelope. Not negotiated on
/// import.
pub const BACKUP_VERSION: &str = "1.0.0";

/// Whole-state backup document. `records` and `categories` are required on
/// import; the envelope metadata and the limit are optional and unknown
/// fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupEnvelope {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub daily_limit: Option<f64>,
    pub categories: Vec<Category>,
    pub records: Vec<FluidRecord>,
}

/// Explicitly constructed state object coupling the journal with a storage
/// backend. Every mutation re-serializes the affected collection and writes
/// it through; derived views are explicit function calls over
/// [`Self::journal`], never cached.
pub struct FluidStore {
    journal: FluidJournal,
    storage: Box<dyn StateStorage>,
}

impl FluidStore {
    /// Opens a store over the given backend and loads whatever state it
    /// holds. Read or parse failures are logged and leave the affected
    /// piece of state at its empty default; an absent or empty category
    /// registry is reseeded with the system defaults and written back.
    pub fn open(storage: Box<dyn StateStorage>) -> Self {
        let mut journal = FluidJournal::empty();

        match storage.load_records() {
            Ok(Some(records)) => journal.records = records,
            Ok(None) => {}
            Err(err) => warn!("failed to load records: {err}"),
        }
        match storage.load_limit() {
            Ok(Some(limit)) => journal.daily_limit = limit,
            Ok(None) => {}
            Err(err) => warn!("failed to load daily limit: {err}"),
        }
        match storage.load_categories() {
            Ok(Some(categories)) if !categories.is_empty() => journal.categories = categories,
            Ok(_) => {
                journal.categories = category::system_defaults();
                if let Err(err) = storage.save_categories(&journal.categories) {
                    warn!("failed to persist seeded categories: {err}");
                }
                info!("seeded default categories");
            }
            Err(err) => warn!("failed to load categories: {err}"),
        }

        Self { journal, storage }
    }

    pub fn journal(&self) -> &FluidJournal {
        &self.journal
    }

    pub fn records(&self) -> &[FluidRecord] {
        &self.journal.records
    }

    pub fn categories(&self) -> &[Category] {
        &self.journal.categories
    }

    pub fn daily_limit(&self) -> f64 {
        self.journal.daily_limit
    }

    /// Appends a record and persists the record collection.
    pub fn add_record(&mut self, record: FluidRecord) -> Result<String, FluidError> {
        let id = self.journal.add_record(record);
        self.persist_records()?;
        Ok(id)
    }

    /// Removes a record by id, persisting only when something was removed.
    pub fn remove_record(&mut self, id: &str) -> Result<bool, FluidError> {
        if self.journal.remove_record(id) {
            self.persist_records()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Creates a custom category and persists the registry.
    pub fn add_custom_category(
        &mut self,
        label: &str,
        kind: FluidType,
        icon: Option<&str>,
    ) -> Result<Category, FluidError> {
        let created = Category::custom(label, kind, icon);
        self.journal.add_category(created.clone());
        self.persist_categories()?;
        Ok(created)
    }

    /// Removes a non-default category. Defaults are rejected with `false`
    /// and the registry stays unchanged.
    pub fn remove_category(&mut self, id: &str) -> Result<bool, FluidError> {
        if self.journal.remove_category(id) {
            self.persist_categories()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn set_daily_limit(&mut self, limit: f64) -> Result<(), FluidError> {
        self.journal.daily_limit = limit;
        self.storage.save_limit(limit)
    }

    /// Serializes the whole state as one backup document.
    pub fn export_json(&self) -> Result<String, FluidError> {
        let envelope = BackupEnvelope {
            version: Some(BACKUP_VERSION.into()),
            timestamp: Some(Utc::now().timestamp_millis()),
            daily_limit: Some(self.journal.daily_limit),
            categories: self.journal.categories.clone(),
            records: self.journal.records.clone(),
        };
        Ok(serde_json::to_string(&envelope)?)
    }

    /// Replaces the whole state from a backup document. The payload is
    /// parsed in full before anything is touched, so a malformed document
    /// leaves the current state intact.
    pub fn import_json(&mut self, payload: &str) -> Result<(), FluidError> {
        let envelope: BackupEnvelope = serde_json::from_str(payload)?;
        self.journal.records = envelope.records;
        self.journal.categories = envelope.categories;
        if let Some(limit) = envelope.daily_limit {
            self.journal.daily_limit = limit;
        }
        self.persist_records()?;
        self.persist_categories()?;
        self.storage.save_limit(self.journal.daily_limit)?;
        info!(
            records = self.journal.record_count(),
            categories = self.journal.categories.len(),
            "imported backup"
        );
        Ok(())
    }

    /// Clears all records, restores the default categories (dropping custom
    /// ones), resets the limit, wipes every storage key, then re-persists
    /// the categories only.
    pub fn reset(&mut self) -> Result<(), FluidError> {
        self.journal.records.clear();
        self.journal.categories = category::system_defaults();
        self.journal.daily_limit = DEFAULT_DAILY_LIMIT;
        self.storage.clear()?;
        self.persist_categories()?;
        Ok(())
    }

    fn persist_records(&self) -> Result<(), FluidError> {
        self.storage.save_records(&self.journal.records)
    }

    fn persist_categories(&self) -> Result<(), FluidError> {
        self.storage.save_categories(&self.journal.categories)
    }
}
