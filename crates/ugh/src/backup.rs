//! Backup validation.
//!
//! Before a process rewrites a metadata file it leaves a backup copy next to
//! it: `<metadata folder>/<process id>/meta.xml.bak`. The validator checks
//! that this copy exists and is readable and non-empty; anything else means
//! the stored data is in an inconsistent state and is always reported.

use crate::error::{Result, UghError};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

pub const DEFAULT_BACKUP_FILE: &str = "meta.xml.bak";

/// What a successful check found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    pub id: String,
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct BackupValidator {
    base_folder: PathBuf,
    file_name: String,
}

impl BackupValidator {
    pub fn new(base_folder: impl Into<PathBuf>) -> Self {
        Self {
            base_folder: base_folder.into(),
            file_name: DEFAULT_BACKUP_FILE.to_string(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn base_folder(&self) -> &Path {
        &self.base_folder
    }

    pub fn backup_path(&self, id: &str) -> PathBuf {
        self.base_folder.join(id).join(&self.file_name)
    }

    /// Check the backup of one process.
    pub fn validate(&self, id: &str) -> Result<BackupReport> {
        let path = self.backup_path(id);
        match read_first_byte(&path) {
            Ok(file) => {
                let metadata = file.metadata().ok();
                let report = BackupReport {
                    id: id.to_string(),
                    size: metadata.as_ref().map(|m| m.len()).unwrap_or(0),
                    modified: metadata
                        .and_then(|m| m.modified().ok())
                        .map(DateTime::<Utc>::from),
                    path,
                };
                tracing::debug!(id, path = %report.path.display(), "backup ok");
                Ok(report)
            }
            Err(source) => {
                tracing::warn!(id, path = %path.display(), error = %source, "backup check failed");
                Err(UghError::BackupValidation { path, source })
            }
        }
    }

    /// One result per id, in the given order.
    pub fn validate_all<I, S>(&self, ids: I) -> Vec<Result<BackupReport>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .map(|id| self.validate(id.as_ref()))
            .collect()
    }
}

fn read_first_byte(path: &Path) -> io::Result<File> {
    let mut file = File::open(path)?;
    let mut buf = [0u8; 1];
    if file.read(&mut buf)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "backup file is empty",
        ));
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_backup(root: &Path, id: &str, name: &str, content: &[u8]) {
        let dir = root.join(id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn path_layout() {
        let validator = BackupValidator::new("/data/metadata");
        assert_eq!(
            validator.backup_path("42"),
            PathBuf::from("/data/metadata/42/meta.xml.bak")
        );
        let validator = validator.with_file_name("meta_anchor.xml.bak");
        assert_eq!(
            validator.backup_path("42"),
            PathBuf::from("/data/metadata/42/meta_anchor.xml.bak")
        );
    }

    #[test]
    fn readable_backup_passes() {
        let tmp = TempDir::new().unwrap();
        write_backup(tmp.path(), "17", DEFAULT_BACKUP_FILE, b"<mets/>");

        let report = BackupValidator::new(tmp.path()).validate("17").unwrap();
        assert_eq!(report.id, "17");
        assert_eq!(report.size, 7);
        assert!(report.modified.is_some());
    }

    #[test]
    fn missing_backup_wraps_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = BackupValidator::new(tmp.path()).validate("18").unwrap_err();
        match err {
            UghError::BackupValidation { path, source } => {
                assert!(path.ends_with("18/meta.xml.bak"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_backup_fails() {
        let tmp = TempDir::new().unwrap();
        write_backup(tmp.path(), "19", DEFAULT_BACKUP_FILE, b"");
        let err = BackupValidator::new(tmp.path()).validate("19").unwrap_err();
        assert!(matches!(
            err,
            UghError::BackupValidation { ref source, .. } if source.kind() == io::ErrorKind::UnexpectedEof
        ));
        assert!(err
            .to_string()
            .starts_with("backup of metafile not found, inconsistent data"));
    }

    #[test]
    fn validate_all_keeps_order() {
        let tmp = TempDir::new().unwrap();
        write_backup(tmp.path(), "1", DEFAULT_BACKUP_FILE, b"x");
        write_backup(tmp.path(), "3", DEFAULT_BACKUP_FILE, b"x");

        let results = BackupValidator::new(tmp.path()).validate_all(["1", "2", "3"]);
        let ok: Vec<bool> = results.iter().map(|r| r.is_ok()).collect();
        assert_eq!(ok, vec![true, false, true]);
    }
}
