use std::path::{Path, PathBuf};
use std::thread;

use crate::error::{BuildError, Result, TranslateError};
use crate::model::license::LicenseCatalog;
use crate::model::metadata::DataOutput;
use crate::services::emit::{self, OutputSet};
use crate::services::translate::Translator;

#[derive(Debug)]
pub struct LanguageReport {
    pub language: String,
    pub calls: usize,
    pub files: Vec<PathBuf>,
    pub error: Option<BuildError>,
}

impl LanguageReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Replaces translatable strings in place, one call per field.
struct LanguageUnit<'a> {
    translator: &'a dyn Translator,
    source_lang: &'a str,
    target_lang: &'a str,
    calls: usize,
}

impl LanguageUnit<'_> {
    fn text(&mut self, s: &mut String) -> Result<(), TranslateError> {
        *s = self
            .translator
            .translate(s, self.source_lang, self.target_lang)?;
        self.calls += 1;
        Ok(())
    }

    // Public and full collections are separate copies; each gets its own calls.
    fn licenses(&mut self, catalog: &mut LicenseCatalog) -> Result<(), TranslateError> {
        for rec in catalog.records_mut() {
            self.text(&mut rec.description)?;
            self.text(&mut rec.how)?;
        }
        Ok(())
    }

    fn data(&mut self, output: &mut DataOutput) -> Result<(), TranslateError> {
        match output {
            DataOutput::Rules(rules) => {
                for group in rules.groups_mut() {
                    for rule in group.values_mut() {
                        self.text(&mut rule.label)?;
                        self.text(&mut rule.description)?;
                    }
                }
            }
            DataOutput::Fields(fields) => {
                for description in fields.values_mut() {
                    self.text(description)?;
                }
            }
            DataOutput::Meta(meta) => {
                for entry in meta.values_mut() {
                    self.text(&mut entry.description)?;
                }
            }
        }
        Ok(())
    }
}

/// Deep copy of `base` with every translatable field translated. Returns
/// the copy and the number of translate calls made.
pub fn localize(
    base: &OutputSet,
    translator: &dyn Translator,
    source_lang: &str,
    target_lang: &str,
) -> Result<(OutputSet, usize), TranslateError> {
    let mut set = base.clone();
    let mut unit = LanguageUnit {
        translator,
        source_lang,
        target_lang,
        calls: 0,
    };

    unit.licenses(&mut set.licenses)?;
    for file in set.data.iter_mut() {
        unit.data(&mut file.output)?;
    }

    Ok((set, unit.calls))
}

/// Translates everything for one language, then writes it. Nothing is
/// written if any call fails.
pub fn run_language(
    base: &OutputSet,
    translator: &dyn Translator,
    source_lang: &str,
    target_lang: &str,
    dir: &Path,
) -> (usize, Result<Vec<PathBuf>>) {
    let (set, calls) = match localize(base, translator, source_lang, target_lang) {
        Ok(v) => v,
        Err(source) => {
            return (
                0,
                Err(BuildError::Translation {
                    language: target_lang.to_string(),
                    source,
                }),
            )
        }
    };

    (calls, emit::emit(dir, &set))
}

/// Runs one unit per language on its own thread and waits for all of them.
/// A failing unit does not stop the others.
pub fn fan_out(
    base: &OutputSet,
    translator: &dyn Translator,
    source_lang: &str,
    languages: &[(String, PathBuf)],
) -> Vec<LanguageReport> {
    thread::scope(|s| {
        let handles: Vec<_> = languages
            .iter()
            .map(|(lang, dir)| {
                let handle = s.spawn(move || {
                    let _span = tracing::info_span!("translate", language = %lang).entered();
                    tracing::info!(dir = %dir.display(), "starting translation");
                    run_language(base, translator, source_lang, lang, dir)
                });
                (lang, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(lang, handle)| {
                let (calls, outcome) = match handle.join() {
                    Ok(v) => v,
                    Err(_) => (
                        0,
                        Err(BuildError::LanguageUnitPanicked {
                            language: lang.clone(),
                        }),
                    ),
                };

                match outcome {
                    Ok(files) => {
                        tracing::info!(language = %lang, calls, files = files.len(), "translation finished");
                        LanguageReport {
                            language: lang.clone(),
                            calls,
                            files,
                            error: None,
                        }
                    }
                    Err(e) => {
                        tracing::error!(language = %lang, error = %e, "translation failed");
                        LanguageReport {
                            language: lang.clone(),
                            calls,
                            files: Vec::new(),
                            error: Some(e),
                        }
                    }
                }
            })
            .collect()
    })
}
