use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = BuildError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document did not split into exactly front matter + body.
    #[error("malformed license document {path}: expected 2 sections, found {sections}")]
    MalformedDocument { path: PathBuf, sections: usize },

    #[error("invalid yaml in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("duplicate license key `{key}` in {first} and {second}")]
    DuplicateLicense {
        key: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("failed to serialize {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("translation to {language} failed: {source}")]
    Translation {
        language: String,
        #[source]
        source: TranslateError,
    },

    #[error("translation unit for {language} panicked")]
    LanguageUnitPanicked { language: String },
}

impl BuildError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {}: {message}", .status.as_u16())]
    Status { status: StatusCode, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("unsupported provider `{0}`")]
    UnsupportedProvider(String),
}
