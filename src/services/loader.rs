use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};
use crate::model::license::LicenseFrontMatter;
use crate::parsers::front_matter;
use crate::services::encoding;

/// One license file after splitting and front-matter parsing.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub front_matter: LicenseFrontMatter,
    pub body: String,
}

/// Regular files of `dir`, sorted by file name.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| BuildError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BuildError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| BuildError::io(entry.path(), e))?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

pub fn load_document(path: &Path) -> Result<LoadedDocument> {
    let text = encoding::read_text(path)?;
    let doc = front_matter::split(path, &text)?;
    let front_matter = front_matter::parse_yaml(path, doc.front_matter)?;

    Ok(LoadedDocument {
        path: path.to_path_buf(),
        front_matter,
        body: doc.body.to_string(),
    })
}

/// Loads every license document; the first bad one aborts the whole batch.
pub fn load_dir(dir: &Path) -> Result<Vec<LoadedDocument>> {
    let files = list_files(dir)?;
    tracing::info!(dir = %dir.display(), count = files.len(), "reading license documents");

    files.iter().map(|p| load_document(p)).collect()
}
