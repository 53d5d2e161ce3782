use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{BuildError, Result};
use crate::model::license::LicenseCatalog;
use crate::services::metadata::DataFile;

pub const LICENSES_FILE: &str = "licenses.json";
pub const LICENSES_FULL_FILE: &str = "licenses-full.json";

/// Everything written for one language.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSet {
    pub licenses: LicenseCatalog,
    pub data: Vec<DataFile>,
}

pub fn write_json<T: Serialize + ?Sized>(dir: &Path, name: &str, value: &T) -> Result<PathBuf> {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(value).map_err(|source| BuildError::Json {
        path: path.clone(),
        source,
    })?;
    write_atomic(&path, json.as_bytes())?;
    Ok(path)
}

/// Writes licenses.json, licenses-full.json and every data file into `dir`.
pub fn emit(dir: &Path, set: &OutputSet) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| BuildError::io(dir, e))?;

    let mut written = vec![
        write_json(dir, LICENSES_FILE, set.licenses.public())?,
        write_json(dir, LICENSES_FULL_FILE, set.licenses.full())?,
    ];

    for file in &set.data {
        let path = dir.join(&file.json_name);
        let json = file.output.to_json().map_err(|source| BuildError::Json {
            path: path.clone(),
            source,
        })?;
        write_atomic(&path, json.as_bytes())?;
        written.push(path);
    }

    for path in &written {
        tracing::info!(path = %path.display(), "wrote");
    }

    Ok(written)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    }

    fs::write(&tmp, bytes).map_err(|e| BuildError::io(&tmp, e))?;

    if path.exists() {
        fs::remove_file(path).map_err(|e| BuildError::io(path, e))?;
    }

    fs::rename(&tmp, path).map_err(|e| BuildError::io(path, e))?;

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "output".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::license::{LicenseFrontMatter, LicenseRecord};
    use crate::model::metadata::DataOutput;
    use std::collections::BTreeMap;

    fn catalog() -> LicenseCatalog {
        let mut full = BTreeMap::new();
        for (spdx, hidden) in [("MIT", Some(false)), ("WTFPL", None)] {
            let rec = LicenseRecord::from_document(
                LicenseFrontMatter {
                    title: spdx.into(),
                    spdx_id: spdx.into(),
                    featured: None,
                    hidden: hidden.map(serde_yaml::Value::Bool),
                    description: "d".into(),
                    how: "h".into(),
                    permissions: vec!["commercial-use".into()],
                    conditions: vec![],
                    limitations: vec![],
                },
                "body",
            );
            full.insert(rec.key(), rec);
        }
        LicenseCatalog::new(full)
    }

    #[test]
    fn emits_license_and_data_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data").join("en");

        let mut fields = BTreeMap::new();
        fields.insert("year".to_string(), "The current year".to_string());
        let set = OutputSet {
            licenses: catalog(),
            data: vec![DataFile {
                json_name: "fields.json".into(),
                output: DataOutput::Fields(fields),
            }],
        };

        let written = emit(&out, &set).unwrap();
        assert_eq!(written.len(), 3);

        let public: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join(LICENSES_FILE)).unwrap()).unwrap();
        let full: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join(LICENSES_FULL_FILE)).unwrap()).unwrap();

        assert_eq!(public.as_object().unwrap().len(), 1);
        assert_eq!(public["mit"], full["mit"]);
        assert_eq!(full["wtfpl"]["hidden"], serde_json::json!(true));
        assert!(out.join("fields.json").exists());
        assert!(!out.join("licenses.json.tmp").exists());
    }

    #[test]
    fn output_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(dir.path(), "x.json", &serde_json::json!({ "a": 1 })).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "{\n  \"a\": 1\n}");
    }
}
