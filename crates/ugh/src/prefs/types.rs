//! Type descriptors.
//!
//! A ruleset declares three kinds of types. Metadata types are leaves; group
//! types and structure types list the types they may contain, each with a
//! [`Cardinality`]. The declared order of those lists is significant: it is
//! the order in which instances are created from the schema.

use super::cardinality::Cardinality;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// The three kinds of types a registry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Metadata,
    Group,
    DocStruct,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Metadata => write!(f, "metadata"),
            TypeKind::Group => write!(f, "metadata group"),
            TypeKind::DocStruct => write!(f, "structure"),
        }
    }
}

/// Language code to display label.
pub type Labels = BTreeMap<String, String>;

/// A leaf type: single values or persons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetadataType {
    pub name: String,
    /// Instances of person types carry name parts instead of a plain value.
    pub is_person: bool,
    /// Marks identifier fields such as catalogue IDs.
    pub is_identifier: bool,
    pub labels: Labels,
}

impl MetadataType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_person: false,
            is_identifier: false,
            labels: Labels::new(),
        }
    }

    pub fn person(name: impl Into<String>) -> Self {
        Self {
            is_person: true,
            ..Self::new(name)
        }
    }

    pub fn identifier(mut self) -> Self {
        self.is_identifier = true;
        self
    }

    pub fn with_label(mut self, language: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(language.into(), label.into());
        self
    }

    /// Label for `language`, falling back to the type name.
    pub fn label(&self, language: &str) -> &str {
        self.labels.get(language).map(String::as_str).unwrap_or(&self.name)
    }
}

/// A permitted entry in a container schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AllowedType<T> {
    pub entry: Arc<T>,
    pub cardinality: Cardinality,
}

impl<T> AllowedType<T> {
    pub fn new(entry: Arc<T>, cardinality: Cardinality) -> Self {
        Self { entry, cardinality }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetadataGroupType {
    pub name: String,
    pub labels: Labels,
    pub allowed: Vec<AllowedType<MetadataType>>,
}

impl MetadataGroupType {
    pub fn label(&self, language: &str) -> &str {
        self.labels.get(language).map(String::as_str).unwrap_or(&self.name)
    }

    /// Schema entry for a child type, if the group permits it.
    pub fn allowed_entry(&self, name: &str) -> Option<&AllowedType<MetadataType>> {
        self.allowed.iter().find(|a| a.entry.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocStructType {
    pub name: String,
    pub labels: Labels,
    /// May act as the logical root of a document.
    pub top_level: bool,
    pub allowed_metadata: Vec<AllowedType<MetadataType>>,
    pub allowed_groups: Vec<AllowedType<MetadataGroupType>>,
    pub allowed_children: Vec<String>,
}

impl DocStructType {
    pub fn label(&self, language: &str) -> &str {
        self.labels.get(language).map(String::as_str).unwrap_or(&self.name)
    }

    pub fn allowed_metadata_entry(&self, name: &str) -> Option<&AllowedType<MetadataType>> {
        self.allowed_metadata.iter().find(|a| a.entry.name == name)
    }

    pub fn allowed_group_entry(&self, name: &str) -> Option<&AllowedType<MetadataGroupType>> {
        self.allowed_groups.iter().find(|a| a.entry.name == name)
    }

    pub fn allows_child(&self, name: &str) -> bool {
        self.allowed_children.iter().any(|c| c == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_falls_back_to_name() {
        let md = MetadataType::new("TitleDocMain").with_label("de", "Haupttitel");
        assert_eq!(md.label("de"), "Haupttitel");
        assert_eq!(md.label("en"), "TitleDocMain");
    }

    #[test]
    fn person_constructor_sets_flag() {
        assert!(MetadataType::person("Author").is_person);
        assert!(!MetadataType::new("Title").is_person);
        assert!(MetadataType::new("CatalogIDDigital").identifier().is_identifier);
    }

    #[test]
    fn group_finds_allowed_entry_by_name() {
        let group = MetadataGroupType {
            name: "Publisher".into(),
            labels: Labels::new(),
            allowed: vec![AllowedType::new(
                Arc::new(MetadataType::new("PublisherName")),
                Cardinality::ExactlyOne,
            )],
        };
        assert!(group.allowed_entry("PublisherName").is_some());
        assert!(group.allowed_entry("PlaceOfPublication").is_none());
    }
}
