use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/94.0.4606.81 Safari/537.36";

fn default_licenses_dir() -> PathBuf {
    PathBuf::from("choosealicense.com/_licenses")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("choosealicense.com/_data")
}

fn default_output_root() -> PathBuf {
    PathBuf::from("data")
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_languages() -> Vec<String> {
    vec!["zh-cn".to_string()]
}

fn default_data_files() -> Vec<String> {
    ["rules.yml", "fields.yml", "meta.yml"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_provider() -> String {
    "google".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Deserialize, Clone)]
pub struct BuildConfig {
    #[serde(default = "default_licenses_dir")]
    pub licenses_dir: PathBuf,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_output_root", alias = "output_dir")]
    pub output_root: PathBuf,

    #[serde(default = "default_source_language", alias = "source_lang")]
    pub source_language: String,

    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    #[serde(default = "default_data_files")]
    pub data_files: Vec<String>,

    #[serde(default)]
    pub translator: TranslatorSettings,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            licenses_dir: default_licenses_dir(),
            data_dir: default_data_dir(),
            output_root: default_output_root(),
            source_language: default_source_language(),
            languages: default_languages(),
            data_files: default_data_files(),
            translator: TranslatorSettings::default(),
        }
    }
}

impl BuildConfig {
    pub fn base_output_dir(&self) -> PathBuf {
        self.language_output_dir(&self.source_language)
    }

    pub fn language_output_dir(&self, code: &str) -> PathBuf {
        self.output_root.join(code)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TranslatorSettings {
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        TranslatorSettings {
            provider: default_provider(),
            model: String::new(),
            api_key: String::new(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
