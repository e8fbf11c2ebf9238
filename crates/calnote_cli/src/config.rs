//! Runtime configuration for the calnote binary.
//!
//! # Responsibility
//! - Resolve the database and log locations from flags, env and defaults.
//! - Prepare the directories those paths need.
//!
//! # Invariants
//! - The core crate never reads env vars; everything is resolved here.
//! - `log_dir` is always absolute once resolved.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "calnote";
const DB_FILE_NAME: &str = "calendar.db";
const LOG_DIR_NAME: &str = "logs";

/// Raw settings as collected by clap.
#[derive(Debug, Clone, Default)]
pub struct ConfigArgs {
    pub db: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// Resolves settings against the platform data directory.
    pub fn resolve(args: ConfigArgs) -> Result<Self> {
        let data_dir = app_data_dir();
        Self::resolve_with(args, data_dir.as_deref(), &current_dir()?)
    }

    /// Resolves settings with explicit roots.
    ///
    /// Relative paths are anchored at `cwd`; defaults live under `data_dir`,
    /// or under `cwd` when the platform has no data directory.
    pub fn resolve_with(args: ConfigArgs, data_dir: Option<&Path>, cwd: &Path) -> Result<Self> {
        let base = data_dir.unwrap_or(cwd);
        let db_path = args
            .db
            .map(|path| absolutize(path, cwd))
            .unwrap_or_else(|| base.join(DB_FILE_NAME));
        let log_dir = args
            .log_dir
            .map(|path| absolutize(path, cwd))
            .unwrap_or_else(|| base.join(LOG_DIR_NAME));
        let log_level = args
            .log_level
            .unwrap_or_else(|| calnote_core::default_log_level().to_string());

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }

    /// Creates the database's parent directory when missing.
    pub fn prepare_db_dir(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("could not create database directory {}", parent.display())
                })?;
            }
        }
        Ok(())
    }
}

fn app_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME))
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("could not determine current directory")
}

fn absolutize(path: PathBuf, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
