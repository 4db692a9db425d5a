//! # Configuration
//!
//! Settings are resolved by [`confique`] in priority order:
//! 1. **Environment variables**: `UGH_RULESET`, `UGH_METADATA_FOLDER`,
//!    `UGH_BACKUP_FILE`, `UGH_LANGUAGE`.
//! 2. **Project config**: `ugh.toml` in the working (or `--config-dir`) directory.
//! 3. **Global config**: `ugh.toml` in the OS config directory (via `directories`).
//! 4. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `ruleset` | none | Ruleset file (JSON or YAML) used to resolve types |
//! | `metadata_folder` | none | Folder holding one directory per process |
//! | `backup_file` | `meta.xml.bak` | Backup file name inside a process directory |
//! | `language` | `en` | Language for type labels |
//!
//! `ugh config` prints the resolved values, `ugh config gen` a commented
//! template.

use crate::backup::DEFAULT_BACKUP_FILE;
use crate::error::{Result, UghError};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "ugh.toml";

/// Configuration for ugh, stored in `ugh.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UghConfig {
    /// Ruleset file (JSON or YAML) declaring metadata, group and structure types.
    #[config(env = "UGH_RULESET")]
    pub ruleset: Option<PathBuf>,

    /// Folder holding one directory per process, each with its metadata backup.
    #[config(env = "UGH_METADATA_FOLDER")]
    pub metadata_folder: Option<PathBuf>,

    /// Name of the backup file inside a process directory.
    #[config(env = "UGH_BACKUP_FILE", default = "meta.xml.bak")]
    pub backup_file: String,

    /// Language used when printing type labels.
    #[config(env = "UGH_LANGUAGE", default = "en")]
    pub language: String,
}

impl Default for UghConfig {
    fn default() -> Self {
        Self {
            ruleset: None,
            metadata_folder: None,
            backup_file: DEFAULT_BACKUP_FILE.to_string(),
            language: "en".to_string(),
        }
    }
}

/// OS-appropriate directory for the global `ugh.toml`.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("org", "kitodo", "ugh").map(|dirs| dirs.config_dir().to_path_buf())
}

impl UghConfig {
    /// Resolve configuration from the environment, then the project
    /// directory, then the global directory. Missing files are skipped.
    pub fn load(project_dir: Option<&Path>, global_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(dir) = project_dir {
            builder = builder.file(dir.join(CONFIG_FILE));
        }
        if let Some(dir) = global_dir {
            builder = builder.file(dir.join(CONFIG_FILE));
        }
        let config = builder
            .load()
            .map_err(|e| UghError::Config(e.to_string()))?;
        tracing::debug!(?config, "configuration resolved");
        Ok(config)
    }

    /// A commented `ugh.toml` listing every setting.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }

    /// The ruleset path, relative paths taken against `base`.
    pub fn ruleset_path(&self, base: &Path) -> Option<PathBuf> {
        self.ruleset.as_ref().map(|p| base.join(p))
    }
}
