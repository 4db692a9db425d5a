use super::Metadata;
use crate::capability::MetadataContainer;
use serde::{Deserialize, Serialize};
use std::fmt;

const LINE: &str =
    "--------------------------------------------------------------------------------";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentFile {
    pub identifier: String,
    pub location: String,
    pub mimetype: String,
}

impl ContentFile {
    pub fn new(
        identifier: impl Into<String>,
        location: impl Into<String>,
        mimetype: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            location: location.into(),
            mimetype: mimetype.into(),
        }
    }
}

/// A presentation-only grouping of files (e.g. "DEFAULT", "THUMBS").
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VirtualFileGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_to_files: Option<String>,
}

impl VirtualFileGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// The content files of a document plus loose file-level metadata.
///
/// Metadata here is not schema-checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: Vec<ContentFile>,
    metadata: Vec<Metadata>,
    removed_metadata: Vec<Metadata>,
    virtual_file_groups: Vec<VirtualFileGroup>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[ContentFile] {
        &self.files
    }

    /// Add a file unless an equal one is already present.
    pub fn add_file(&mut self, file: ContentFile) {
        if !self.files.contains(&file) {
            self.files.push(file);
        }
    }

    pub fn remove_file(&mut self, file: &ContentFile) {
        self.files.retain(|f| f != file);
    }

    pub fn add_metadata(&mut self, metadata: Metadata) {
        self.metadata.push(metadata);
    }

    /// Record the instance as removed, then drop the first equal instance.
    ///
    /// The record is written even when nothing equal was stored.
    pub fn remove_metadata(&mut self, metadata: &Metadata) {
        self.removed_metadata.push(metadata.clone());
        if let Some(pos) = self.metadata.iter().position(|m| m == metadata) {
            self.metadata.remove(pos);
        }
    }

    pub fn removed_metadata(&self) -> &[Metadata] {
        &self.removed_metadata
    }

    pub fn virtual_file_groups(&self) -> &[VirtualFileGroup] {
        &self.virtual_file_groups
    }

    pub fn add_virtual_file_group(&mut self, group: VirtualFileGroup) {
        self.virtual_file_groups.push(group);
    }

    pub fn remove_virtual_file_group(&mut self, group: &VirtualFileGroup) {
        if let Some(pos) = self.virtual_file_groups.iter().position(|g| g == group) {
            self.virtual_file_groups.remove(pos);
        }
    }

    pub fn set_virtual_file_groups(&mut self, groups: Vec<VirtualFileGroup>) {
        self.virtual_file_groups = groups;
    }

    /// Human-readable dump, for diagnostics only.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl MetadataContainer for FileSet {
    fn metadata_list(&self) -> &[Metadata] {
        &self.metadata
    }
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

impl fmt::Display for FileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", LINE)?;
        writeln!(f, "FileSet")?;
        writeln!(f, "{}", LINE)?;
        if self.files.is_empty() {
            writeln!(f, "NO FILES")?;
        }
        for file in &self.files {
            writeln!(
                f,
                "ContentFile ({}): '{}' ({})",
                file.identifier, file.location, file.mimetype
            )?;
        }

        writeln!(f, "{}", LINE)?;
        writeln!(f, "VirtualFileGroups")?;
        writeln!(f, "{}", LINE)?;
        if self.virtual_file_groups.is_empty() {
            writeln!(f, "NONE")?;
        }
        for group in &self.virtual_file_groups {
            writeln!(
                f,
                "NAME: {}, FILESUFFIX: {}, MIMETYPE: {}, IDSUFFIX: {}, PATH: {}",
                group.name,
                or_dash(&group.file_suffix),
                or_dash(&group.mimetype),
                or_dash(&group.id_suffix),
                or_dash(&group.path_to_files)
            )?;
        }
        Ok(())
    }
}
