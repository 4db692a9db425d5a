//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for UI
//! clients.
//!
//! The facade:
//! - **Resolves context**: the ruleset and the backup folder come from
//!   [`UghConfig`] unless the caller overrides them
//! - **Dispatches** to the matching `commands::*::run`
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business logic.
//!
//! The registry is optional: `ugh backup` works without a ruleset, so a
//! missing ruleset only becomes an error once a command needs types.

use crate::backup::BackupValidator;
use crate::commands::{self, CmdResult};
use crate::config::UghConfig;
use crate::error::{Result, UghError};
use crate::prefs::{load_ruleset, FileFormat, TypeKind, TypeRegistry};
use std::path::{Path, PathBuf};

pub struct UghApi {
    registry: Option<TypeRegistry>,
    config: UghConfig,
}

impl UghApi {
    pub fn new(registry: Option<TypeRegistry>, config: UghConfig) -> Self {
        Self { registry, config }
    }

    /// Load the configured ruleset (if any), relative paths taken against `base_dir`.
    pub fn from_config(config: UghConfig, base_dir: &Path) -> Result<Self> {
        let registry = match config.ruleset_path(base_dir) {
            Some(path) => Some(load_ruleset(&path)?),
            None => None,
        };
        Ok(Self::new(registry, config))
    }

    pub fn config(&self) -> &UghConfig {
        &self.config
    }

    pub fn registry(&self) -> Result<&TypeRegistry> {
        self.registry.as_ref().ok_or_else(|| {
            UghError::Config(
                "no ruleset configured (use --ruleset, UGH_RULESET or `ruleset` in ugh.toml)"
                    .to_string(),
            )
        })
    }

    pub fn list_types(&self, kind: Option<TypeKind>) -> Result<CmdResult> {
        commands::types::run(self.registry()?, kind, &self.config.language)
    }

    pub fn check_document(&self, path: &Path) -> Result<CmdResult> {
        commands::check::run(self.registry()?, path)
    }

    pub fn describe_files(&self, path: &Path) -> Result<CmdResult> {
        commands::files::run(self.registry()?, path)
    }

    pub fn scaffold(&self, type_name: &str, format: FileFormat) -> Result<CmdResult> {
        commands::scaffold::run(self.registry()?, type_name, format)
    }

    /// Check backups below `folder`, or the configured metadata folder.
    pub fn validate_backups<S: AsRef<str>>(
        &self,
        folder: Option<&Path>,
        ids: &[S],
    ) -> Result<CmdResult> {
        let folder: PathBuf = match folder {
            Some(f) => f.to_path_buf(),
            None => self.config.metadata_folder.clone().ok_or_else(|| {
                UghError::Config(
                    "no metadata folder configured (use --folder or UGH_METADATA_FOLDER)"
                        .to_string(),
                )
            })?,
        };
        let validator = BackupValidator::new(folder).with_file_name(&self.config.backup_file);
        commands::backup::run(&validator, ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_registry, SAMPLE_RULESET_YAML};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn commands_needing_types_fail_without_ruleset() {
        let api = UghApi::new(None, UghConfig::default());
        assert!(matches!(api.list_types(None), Err(UghError::Config(_))));
        assert!(api.scaffold("Monograph", FileFormat::Yaml).is_err());
    }

    #[test]
    fn from_config_loads_relative_ruleset() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rules.yaml"), SAMPLE_RULESET_YAML).unwrap();
        let config = UghConfig {
            ruleset: Some(PathBuf::from("rules.yaml")),
            ..Default::default()
        };

        let api = UghApi::from_config(config, dir.path()).unwrap();
        let result = api.list_types(Some(TypeKind::Group)).unwrap();
        assert_eq!(result.listed_types[0].name, "Publisher");
    }

    #[test]
    fn backups_use_configured_folder_and_file_name() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("5")).unwrap();
        fs::write(dir.path().join("5").join("meta.bak"), "x").unwrap();
        let config = UghConfig {
            metadata_folder: Some(dir.path().to_path_buf()),
            backup_file: "meta.bak".into(),
            ..Default::default()
        };

        let api = UghApi::new(Some(sample_registry()), config);
        let result = api.validate_backups(None, &["5"]).unwrap();
        assert_eq!(result.backups.len(), 1);
    }

    #[test]
    fn backups_need_a_folder() {
        let api = UghApi::new(None, UghConfig::default());
        let err = api.validate_backups(None, &["5"]).unwrap_err();
        assert!(err.to_string().contains("metadata folder"));
    }
}
