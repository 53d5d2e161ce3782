use std::collections::HashSet;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{BuildError, Result};
use crate::model::config::BuildConfig;
use crate::model::metadata::DataKind;

pub const API_KEY_ENV: &str = "LICENSE_DATA_API_KEY";

const LANGUAGE_CODE: &str = r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$";

/// Reads a JSON config file, or returns the defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<BuildConfig> {
    let Some(path) = path else {
        return Ok(BuildConfig::default());
    };

    let data = fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;

    serde_json::from_str::<BuildConfig>(&data)
        .map_err(|e| BuildError::Config(format!("invalid {}: {e}", path.display())))
}

pub fn apply_env(config: &mut BuildConfig) {
    if config.translator.api_key.trim().is_empty() {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.translator.api_key = key;
        }
    }
}

pub fn validate(config: &BuildConfig) -> Result<()> {
    let re = Regex::new(LANGUAGE_CODE).map_err(|e| BuildError::Config(e.to_string()))?;

    if !re.is_match(&config.source_language) {
        return Err(BuildError::Config(format!(
            "invalid source language `{}`",
            config.source_language
        )));
    }

    let mut seen = HashSet::new();
    for code in &config.languages {
        if !re.is_match(code) {
            return Err(BuildError::Config(format!("invalid language code `{code}`")));
        }
        if code.eq_ignore_ascii_case(&config.source_language) {
            return Err(BuildError::Config(format!(
                "target language `{code}` is the source language"
            )));
        }
        if !seen.insert(code.to_lowercase()) {
            return Err(BuildError::Config(format!("language `{code}` listed twice")));
        }
    }

    for name in &config.data_files {
        if DataKind::from_file_name(name).is_none() {
            return Err(BuildError::Config(format!("unknown data file `{name}`")));
        }
    }

    let t = &config.translator;
    match t.provider.as_str() {
        "google" => {}
        "openai" | "deepseek" => {
            if config.languages.is_empty() {
                return Ok(());
            }
            if t.model.trim().is_empty() {
                return Err(BuildError::Config(format!(
                    "provider `{}` requires a model",
                    t.provider
                )));
            }
            if t.api_key.trim().is_empty() {
                return Err(BuildError::Config(format!(
                    "provider `{}` requires an api key (set {API_KEY_ENV})",
                    t.provider
                )));
            }
        }
        other => return Err(BuildError::Config(format!("unsupported provider `{other}`"))),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = load(None).unwrap();
        assert_eq!(config.source_language, "en");
        assert_eq!(config.languages, vec!["zh-cn"]);
        assert_eq!(config.base_output_dir(), Path::new("data/en"));
        validate(&config).unwrap();
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.json");
        fs::write(&path, r#"{ "languages": ["ja", "zh-TW"], "output_dir": "out" }"#).unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.languages, vec!["ja", "zh-TW"]);
        assert_eq!(config.output_root, Path::new("out"));
        assert_eq!(config.translator.provider, "google");
        validate(&config).unwrap();
    }

    #[test]
    fn rejects_bad_languages() {
        let mut config = BuildConfig::default();
        config.languages = vec!["zh cn".into()];
        assert!(validate(&config).is_err());

        config.languages = vec!["EN".into()];
        assert!(validate(&config).is_err());

        config.languages = vec!["ja".into(), "JA".into()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn chat_provider_needs_credentials() {
        let mut config = BuildConfig::default();
        config.translator.provider = "openai".into();
        config.translator.model = "gpt-4o-mini".into();
        assert!(validate(&config).is_err());

        config.translator.api_key = "sk-test".into();
        validate(&config).unwrap();

        config.translator.provider = "babelfish".into();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn unknown_data_file_is_rejected() {
        let mut config = BuildConfig::default();
        config.data_files.push("colors.yml".into());
        assert!(validate(&config).is_err());
    }
}
