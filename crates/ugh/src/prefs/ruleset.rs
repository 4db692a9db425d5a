//! Ruleset files.
//!
//! A ruleset is the on-disk declaration of a [`TypeRegistry`]. JSON and YAML
//! are supported; the format is picked from the file extension.
//!
//! ```yaml
//! metadata_types:
//!   - name: TitleDocMain
//!     labels: { en: Main title, de: Haupttitel }
//!   - name: Author
//!     person: true
//! group_types:
//!   - name: Publisher
//!     metadata:
//!       - { type: PublisherName, num: "1" }
//!       - { type: PlaceOfPublication, num: "0..n" }
//! doc_struct_types:
//!   - name: Monograph
//!     top_level: true
//!     metadata:
//!       - { type: TitleDocMain, num: "1m" }
//!     groups:
//!       - { type: Publisher, num: "0..1" }
//!     children: [Chapter]
//! ```

use super::cardinality::Cardinality;
use super::registry::{DocStructTypeDef, RegistryBuilder, TypeRegistry};
use super::types::{Labels, MetadataType};
use crate::error::{Result, UghError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serialization formats understood for rulesets and documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(FileFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(FileFormat::Yaml)
            }
            _ => Err(UghError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesetFile {
    #[serde(default)]
    pub metadata_types: Vec<MetadataTypeEntry>,
    #[serde(default)]
    pub group_types: Vec<ContainerTypeEntry>,
    #[serde(default)]
    pub doc_struct_types: Vec<DocStructTypeEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataTypeEntry {
    pub name: String,
    #[serde(default)]
    pub person: bool,
    #[serde(default)]
    pub identifier: bool,
    #[serde(default)]
    pub labels: Labels,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowedEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    pub num: Cardinality,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerTypeEntry {
    pub name: String,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub metadata: Vec<AllowedEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocStructTypeEntry {
    pub name: String,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub top_level: bool,
    #[serde(default)]
    pub metadata: Vec<AllowedEntry>,
    #[serde(default)]
    pub groups: Vec<AllowedEntry>,
    #[serde(default)]
    pub children: Vec<String>,
}

impl RulesetFile {
    /// Feed all declarations through a [`RegistryBuilder`].
    ///
    /// Metadata types go first, then groups, then structures, so the file
    /// order within each section is the only order that matters.
    pub fn into_registry(self) -> Result<TypeRegistry> {
        let mut builder = RegistryBuilder::new();

        for entry in self.metadata_types {
            builder.add_metadata_type(MetadataType {
                name: entry.name,
                is_person: entry.person,
                is_identifier: entry.identifier,
                labels: entry.labels,
            })?;
        }

        for entry in self.group_types {
            let children: Vec<(String, Cardinality)> = entry
                .metadata
                .into_iter()
                .map(|a| (a.type_name, a.num))
                .collect();
            builder.add_group_type(entry.name, entry.labels, &children)?;
        }

        for entry in self.doc_struct_types {
            builder.add_doc_struct_type(DocStructTypeDef {
                name: entry.name,
                labels: entry.labels,
                top_level: entry.top_level,
                metadata: entry
                    .metadata
                    .into_iter()
                    .map(|a| (a.type_name, a.num))
                    .collect(),
                groups: entry
                    .groups
                    .into_iter()
                    .map(|a| (a.type_name, a.num))
                    .collect(),
                children: entry.children,
            })?;
        }

        builder.build()
    }
}

pub fn parse_ruleset_str(text: &str, format: FileFormat) -> Result<TypeRegistry> {
    let file: RulesetFile = match format {
        FileFormat::Json => serde_json::from_str(text)?,
        FileFormat::Yaml => serde_yaml::from_str(text)?,
    };
    file.into_registry()
}

pub fn load_ruleset(path: &Path) -> Result<TypeRegistry> {
    let format = FileFormat::from_path(path)?;
    let text = fs::read_to_string(path)?;
    let registry = parse_ruleset_str(&text, format)?;
    tracing::debug!(path = %path.display(), types = registry.len(), "ruleset loaded");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::TypeKind;

    const YAML: &str = r#"
metadata_types:
  - name: TitleDocMain
    labels: { en: Main title }
  - name: PublisherName
  - name: Author
    person: true
group_types:
  - name: Publisher
    metadata:
      - { type: PublisherName, num: "1" }
      - { type: Author, num: "*" }
doc_struct_types:
  - name: Monograph
    top_level: true
    metadata:
      - { type: TitleDocMain, num: "1m" }
    groups:
      - { type: Publisher, num: "0..1" }
    children: [Chapter]
  - name: Chapter
"#;

    #[test]
    fn parses_yaml_ruleset() {
        let registry = parse_ruleset_str(YAML, FileFormat::Yaml).unwrap();
        let monograph = registry.resolve_doc_struct_type("Monograph").unwrap();
        assert!(monograph.top_level);
        assert_eq!(monograph.allowed_metadata[0].cardinality, Cardinality::ExactlyOne);
        assert_eq!(monograph.allowed_groups[0].entry.name, "Publisher");
        assert!(monograph.allows_child("Chapter"));
        assert_eq!(registry.label("TitleDocMain", "en"), "Main title");
    }

    #[test]
    fn parses_json_ruleset() {
        let json = r#"{
            "metadata_types": [{"name": "TitleDocMain"}],
            "doc_struct_types": [
                {"name": "Monograph", "metadata": [{"type": "TitleDocMain", "num": "0..1"}]}
            ]
        }"#;
        let registry = parse_ruleset_str(json, FileFormat::Json).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn bad_cardinality_is_reported() {
        let json = r#"{
            "metadata_types": [{"name": "TitleDocMain"}],
            "doc_struct_types": [
                {"name": "Monograph", "metadata": [{"type": "TitleDocMain", "num": "3"}]}
            ]
        }"#;
        let err = parse_ruleset_str(json, FileFormat::Json).unwrap_err();
        assert!(err.to_string().contains("invalid cardinality"));
    }

    #[test]
    fn unknown_reference_is_reported() {
        let json = r#"{
            "doc_struct_types": [
                {"name": "Monograph", "metadata": [{"type": "TitleDocMain", "num": "1"}]}
            ]
        }"#;
        let err = parse_ruleset_str(json, FileFormat::Json).unwrap_err();
        assert!(matches!(err, UghError::UnknownType { kind: TypeKind::Metadata, .. }));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.json")).unwrap(), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("a.YML")).unwrap(), FileFormat::Yaml);
        assert!(matches!(
            FileFormat::from_path(Path::new("ruleset.xml")),
            Err(UghError::UnsupportedFormat(_))
        ));
    }
}
