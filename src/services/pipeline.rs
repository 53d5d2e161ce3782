use std::path::PathBuf;

use crate::error::Result;
use crate::model::config::BuildConfig;
use crate::services::emit::{self, OutputSet};
use crate::services::fanout::{self, LanguageReport};
use crate::services::translate::Translator;
use crate::services::{loader, metadata, normalize};

#[derive(Debug)]
pub struct RunReport {
    pub licenses: usize,
    pub public_licenses: usize,
    pub base_files: Vec<PathBuf>,
    pub languages: Vec<LanguageReport>,
}

impl RunReport {
    pub fn failed_languages(&self) -> Vec<&str> {
        self.languages
            .iter()
            .filter(|r| !r.succeeded())
            .map(|r| r.language.as_str())
            .collect()
    }
}

/// Full rebuild: load, normalize, transform, write the base language, then
/// translate every configured language. All language units have finished
/// when this returns.
pub fn run(config: &BuildConfig, translator: &dyn Translator) -> Result<RunReport> {
    let docs = loader::load_dir(&config.licenses_dir)?;
    let licenses = normalize::normalize(docs)?;
    let data = metadata::transform_all(&config.data_dir, &config.data_files);

    let base = OutputSet { licenses, data };
    let base_files = emit::emit(&config.base_output_dir(), &base)?;

    let targets: Vec<(String, PathBuf)> = config
        .languages
        .iter()
        .map(|code| (code.clone(), config.language_output_dir(code)))
        .collect();

    let languages = fanout::fan_out(&base, translator, &config.source_language, &targets);

    Ok(RunReport {
        licenses: base.licenses.full().len(),
        public_licenses: base.licenses.public().len(),
        base_files,
        languages,
    })
}
