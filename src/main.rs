use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;

use license_data::services::{config, pipeline, translate};

/// Builds JSON license data from choosealicense.com sources and translates
/// it into the configured languages.
#[derive(Parser, Debug)]
#[command(name = "license-data", version, about)]
struct Cli {
    /// JSON config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of license documents.
    #[arg(long)]
    licenses_dir: Option<PathBuf>,

    /// Directory holding rules.yml, fields.yml and meta.yml.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Root output directory; one subdirectory per language.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Target language code (repeatable); replaces the configured list.
    #[arg(long = "lang")]
    languages: Vec<String>,

    /// Translation provider: google, openai or deepseek.
    #[arg(long)]
    provider: Option<String>,

    /// Model name for chat providers.
    #[arg(long)]
    model: Option<String>,

    /// Only write the base language.
    #[arg(long)]
    skip_translation: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut cfg = config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.licenses_dir {
        cfg.licenses_dir = dir;
    }
    if let Some(dir) = cli.data_dir {
        cfg.data_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        cfg.output_root = dir;
    }
    if !cli.languages.is_empty() {
        cfg.languages = cli.languages;
    }
    if let Some(provider) = cli.provider {
        cfg.translator.provider = provider;
    }
    if let Some(model) = cli.model {
        cfg.translator.model = model;
    }
    if cli.skip_translation {
        cfg.languages.clear();
    }
    config::apply_env(&mut cfg);
    config::validate(&cfg)?;

    let translator = translate::from_settings(&cfg.translator)?;
    let report = pipeline::run(&cfg, translator.as_ref())?;

    tracing::info!(
        licenses = report.licenses,
        public = report.public_licenses,
        files = report.base_files.len(),
        "base language written"
    );

    let failed = report.failed_languages();
    if !failed.is_empty() {
        bail!("translation failed for: {}", failed.join(", "));
    }

    Ok(())
}
