//! Command line entry point for the translation store.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use serde::Serialize;
use translation_store::TranslationStore;
use translation_store::config::ConfigManager;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "translation-store", version, about = "Manage translation files")]
struct Cli {
    /// Workspace root containing `.translation-store.json`
    #[arg(long, short, default_value = ".")]
    workspace: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every language
    Languages,
    /// Print translations of one language, or of all languages
    Translations {
        lang: Option<String>,
        /// Only entries whose key or value contains this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Create an empty language
    AddLanguage { code: String },
    /// Add or update a translation
    AddTranslation {
        lang: String,
        key: String,
        value: String,
        /// Treat KEY as `group.path` and write to the group file
        #[arg(long)]
        group: bool,
    },
    /// Compare a source language against a target language
    Missing { source: String, target: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ConfigManager::new();
    config.load_settings(Some(cli.workspace))?;
    let store = TranslationStore::from_config(&config);
    tracing::debug!(root = %store.root().display(), "Using lang directory");

    match cli.command {
        Command::Languages => print_json(&store.all_languages()?),
        Command::Translations { lang: Some(lang), filter } => {
            print_json(&store.filter_translations_for(&lang, filter.as_deref())?)
        }
        Command::Translations { lang: None, .. } => print_json(&store.all_translations()?),
        Command::AddLanguage { code } => Ok(store.add_language(&code)?),
        Command::AddTranslation { lang, key, value, group: true } => {
            Ok(store.add_group_translation(&lang, &key, &value)?)
        }
        Command::AddTranslation { lang, key, value, group: false } => {
            Ok(store.add_single_translation(&lang, &key, &value)?)
        }
        Command::Missing { source, target } => {
            print_json(&store.source_language_translations_with(&source, &target)?)
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
