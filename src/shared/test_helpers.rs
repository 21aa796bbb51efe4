use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::features::geo::datastore::DataStore;

/// Bundled dataset, loaded at most once per test binary. Mirrors the
/// production setup where one store is built before the server starts.
pub fn test_store() -> Arc<DataStore> {
    static STORE: OnceLock<Arc<DataStore>> = OnceLock::new();
    STORE
        .get_or_init(|| {
            let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
            Arc::new(DataStore::load(&dir).expect("bundled dataset must load"))
        })
        .clone()
}
