use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::sequencer::MonthFilter;

/// Directory under `$HOME` holding persisted parameters and logs.
pub const APP_DIR_NAME: &str = ".clinic-meetings";

/// Default number of contacts in the top-contacts list.
pub const DEFAULT_TOP_CONTACTS: usize = 5;

/// Default table cache lifetime in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Meeting summaries for dental clinics
#[derive(Parser, Debug, Clone)]
#[command(
    name = "clinic-meetings",
    about = "Meeting summaries for dental clinics",
    version
)]
pub struct Settings {
    /// Meetings table (comma-separated, UTF-8, with header)
    #[arg(long, default_value = "data/clinicas.csv")]
    pub data_file: PathBuf,

    /// Month to summarise, or "all"
    #[arg(long, default_value = "all")]
    pub month: MonthFilter,

    /// Number of contacts in the top-contacts list
    #[arg(long, default_value_t = DEFAULT_TOP_CONTACTS)]
    pub top: usize,

    /// Seconds before the loaded table is reloaded
    #[arg(long, default_value_t = DEFAULT_CACHE_TTL_SECS)]
    pub cache_ttl: u64,

    /// Write the filtered meetings as clinicas_<month>.csv into this directory
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Read month selections and refresh commands from stdin
    #[arg(long)]
    pub interactive: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.clinic-meetings/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(APP_DIR_NAME).join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with an explicit argument
    /// list and config path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        if settings.clear {
            // Runs before the tracing subscriber exists.
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                eprintln!(
                    "Warning: could not clear saved configuration {}: {e}",
                    config_path.display()
                );
            }
            return settings;
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins over persisted values.
        if !is_arg_explicitly_set(&matches, "data_file") {
            if let Some(v) = last.data_file {
                settings.data_file = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "month") {
            if let Some(filter) = last.month.and_then(|m| m.parse::<MonthFilter>().ok()) {
                settings.month = filter;
            }
        }

        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            tracing::debug!(error = %e, "could not persist last-used parameters");
        }

        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            data_file: Some(s.data_file.clone()),
            month: Some(s.month.as_str().to_string()),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
