use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{BuildError, Result};

pub const DELIMITER: &str = "---";

/// A license document split into its YAML block and its trimmed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    pub front_matter: &'a str,
    pub body: &'a str,
}

/// Splits on every `---` and drops empty segments; anything other than two
/// remaining segments is malformed.
pub fn split<'a>(path: &Path, text: &'a str) -> Result<Document<'a>> {
    let parts: Vec<&str> = text.split(DELIMITER).filter(|s| !s.is_empty()).collect();

    match parts.as_slice() {
        [front_matter, body] => Ok(Document {
            front_matter: front_matter.trim(),
            body: body.trim(),
        }),
        _ => Err(BuildError::MalformedDocument {
            path: path.to_path_buf(),
            sections: parts.len(),
        }),
    }
}

pub fn parse_yaml<T: DeserializeOwned>(path: &Path, text: &str) -> Result<T> {
    serde_yaml::from_str(text).map_err(|source| BuildError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}
