use std::{path::PathBuf, sync::Mutex};

use fluid_core::{core::store::FluidStore, storage::JsonStorage};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Registers a fresh temporary directory and returns its path.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Opens a store over a JSON backend rooted at `base`.
pub fn store_at(base: PathBuf) -> FluidStore {
    let storage = JsonStorage::new(Some(base)).expect("create json storage backend");
    FluidStore::open(Box::new(storage))
}

/// Creates an isolated store backed by its own temporary directory.
pub fn setup_store() -> FluidStore {
    store_at(temp_dir())
}
