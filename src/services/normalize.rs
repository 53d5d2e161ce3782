use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{BuildError, Result};
use crate::model::license::{LicenseCatalog, LicenseRecord};
use crate::services::loader::LoadedDocument;

pub fn normalize(docs: Vec<LoadedDocument>) -> Result<LicenseCatalog> {
    let mut full: BTreeMap<String, LicenseRecord> = BTreeMap::new();
    let mut origin: BTreeMap<String, PathBuf> = BTreeMap::new();

    for doc in docs {
        let record = LicenseRecord::from_document(doc.front_matter, &doc.body);
        let key = record.key();

        if let Some(first) = origin.get(&key) {
            return Err(BuildError::DuplicateLicense {
                key,
                first: first.clone(),
                second: doc.path,
            });
        }

        if record.visibility.is_public() {
            tracing::info!(title = %record.title, key = %key, "processed license");
        } else {
            tracing::info!(title = %record.title, key = %key, "skipping hidden license");
        }

        origin.insert(key.clone(), doc.path);
        full.insert(key, record);
    }

    Ok(LicenseCatalog::new(full))
}
