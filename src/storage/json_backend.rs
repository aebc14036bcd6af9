use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::{category::Category, record::FluidRecord};
use crate::utils::{app_data_dir, ensure_dir};

use super::{Result, StateStorage};

const RECORDS_KEY: &str = "records";
// The category schema was migrated once by renaming the key, not by
// transforming stored data; the versioned name is load-bearing.
const CATEGORIES_KEY: &str = "categories_v4";
const LIMIT_KEY: &str = "daily_limit";
const TMP_SUFFIX: &str = "tmp";

/// File-per-key JSON storage rooted in the application data directory.
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn read_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn write_key<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.key_path(key);
        let json = serde_json::to_string_pretty(value)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_key(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl StateStorage for JsonStorage {
    fn load_records(&self) -> Result<Option<Vec<FluidRecord>>> {
        self.read_key(RECORDS_KEY)
    }

    fn save_records(&self, records: &[FluidRecord]) -> Result<()> {
        self.write_key(RECORDS_KEY, &records)
    }

    fn load_categories(&self) -> Result<Option<Vec<Category>>> {
        self.read_key(CATEGORIES_KEY)
    }

    fn save_categories(&self, categories: &[Category]) -> Result<()> {
        self.write_key(CATEGORIES_KEY, &categories)
    }

    fn load_limit(&self) -> Result<Option<f64>> {
        self.read_key(LIMIT_KEY)
    }

    fn save_limit(&self, limit: f64) -> Result<()> {
        self.write_key(LIMIT_KEY, &limit)
    }

    fn clear(&self) -> Result<()> {
        self.remove_key(RECORDS_KEY)?;
        self.remove_key(CATEGORIES_KEY)?;
        self.remove_key(LIMIT_KEY)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category;
    use crate::domain::record::FluidType;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("json storage");
        (storage, temp)
    }

    #[test]
    fn absent_keys_load_as_none() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.load_records().expect("load").is_none());
        assert!(storage.load_categories().expect("load").is_none());
        assert!(storage.load_limit().expect("load").is_none());
    }

    #[test]
    fn records_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let records = vec![FluidRecord::new(FluidType::In, "sys_water", 250.0)];
        storage.save_records(&records).expect("save records");
        let loaded = storage.load_records().expect("load records").unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn categories_use_the_versioned_key() {
        let (storage, _guard) = storage_with_temp_dir();
        storage
            .save_categories(&category::system_defaults())
            .expect("save categories");
        assert!(storage.key_path("categories_v4").exists());
        assert!(!storage.key_path("categories").exists());
    }

    #[test]
    fn clear_removes_every_key() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.save_records(&[]).expect("save records");
        storage.save_limit(1500.0).expect("save limit");
        storage.clear().expect("clear");
        assert!(!storage.key_path(RECORDS_KEY).exists());
        assert!(!storage.key_path(LIMIT_KEY).exists());
    }

    #[test]
    fn corrupt_key_surfaces_a_parse_error() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(storage.key_path(RECORDS_KEY), "not json").expect("write junk");
        assert!(storage.load_records().is_err());
    }
}
