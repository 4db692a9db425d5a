//! The type registry.
//!
//! Types are declared through a [`RegistryBuilder`], which checks names,
//! duplicates and references while the ruleset is assembled. [`RegistryBuilder::build`]
//! publishes an immutable [`TypeRegistry`]; there is no API to change a
//! registry afterwards, so every document built against it sees the same
//! schema.
//!
//! Entries are handed out as `Arc`s: instances keep a reference to their type
//! descriptor, and a registry can be shared read-only across threads.

use super::cardinality::Cardinality;
use super::names::validate_type_name;
use super::types::{
    AllowedType, DocStructType, Labels, MetadataGroupType, MetadataType, TypeKind,
};
use crate::error::{Result, UghError};
use std::collections::HashMap;
use std::sync::Arc;

trait Named {
    fn name(&self) -> &str;
}

impl Named for MetadataType {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for MetadataGroupType {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for DocStructType {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Declaration-ordered table with name lookup.
#[derive(Debug, Clone)]
struct TypeTable<T> {
    kind: TypeKind,
    entries: Vec<Arc<T>>,
    by_name: HashMap<String, usize>,
}

impl<T: Named> TypeTable<T> {
    fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    fn insert(&mut self, entry: T) -> Result<Arc<T>> {
        let name = entry.name().to_string();
        validate_type_name(&name).map_err(|reason| UghError::InvalidTypeName {
            name: name.clone(),
            reason,
        })?;
        if self.by_name.contains_key(&name) {
            return Err(UghError::DuplicateType {
                kind: self.kind,
                name,
            });
        }
        let entry = Arc::new(entry);
        self.by_name.insert(name, self.entries.len());
        self.entries.push(Arc::clone(&entry));
        Ok(entry)
    }

    fn get(&self, name: &str) -> Option<&Arc<T>> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    fn resolve(&self, name: &str) -> Result<Arc<T>> {
        self.get(name).cloned().ok_or_else(|| UghError::UnknownType {
            kind: self.kind,
            name: name.to_string(),
        })
    }
}

/// Definition of a structure type by name references.
///
/// Metadata and group references are resolved when the definition is added;
/// child structure names are resolved in [`RegistryBuilder::build`], so
/// structure types may refer to each other in any order.
#[derive(Debug, Clone, Default)]
pub struct DocStructTypeDef {
    pub name: String,
    pub labels: Labels,
    pub top_level: bool,
    pub metadata: Vec<(String, Cardinality)>,
    pub groups: Vec<(String, Cardinality)>,
    pub children: Vec<String>,
}

impl DocStructTypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn top_level(mut self) -> Self {
        self.top_level = true;
        self
    }

    pub fn metadata(mut self, name: impl Into<String>, cardinality: Cardinality) -> Self {
        self.metadata.push((name.into(), cardinality));
        self
    }

    pub fn group(mut self, name: impl Into<String>, cardinality: Cardinality) -> Self {
        self.groups.push((name.into(), cardinality));
        self
    }

    pub fn child(mut self, name: impl Into<String>) -> Self {
        self.children.push(name.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    metadata: TypeTable<MetadataType>,
    groups: TypeTable<MetadataGroupType>,
    doc_structs: TypeTable<DocStructType>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self {
            metadata: TypeTable::new(TypeKind::Metadata),
            groups: TypeTable::new(TypeKind::Group),
            doc_structs: TypeTable::new(TypeKind::DocStruct),
        }
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_metadata_type(&mut self, md_type: MetadataType) -> Result<Arc<MetadataType>> {
        self.metadata.insert(md_type)
    }

    /// Declare a group type. Every child must already be a declared metadata type.
    pub fn add_group_type<S: AsRef<str>>(
        &mut self,
        name: impl Into<String>,
        labels: Labels,
        children: &[(S, Cardinality)],
    ) -> Result<Arc<MetadataGroupType>> {
        let allowed = children
            .iter()
            .map(|(child, cardinality)| {
                self.metadata
                    .resolve(child.as_ref())
                    .map(|entry| AllowedType::new(entry, *cardinality))
            })
            .collect::<Result<Vec<_>>>()?;

        self.groups.insert(MetadataGroupType {
            name: name.into(),
            labels,
            allowed,
        })
    }

    pub fn add_doc_struct_type(&mut self, def: DocStructTypeDef) -> Result<Arc<DocStructType>> {
        let allowed_metadata = def
            .metadata
            .iter()
            .map(|(name, cardinality)| {
                self.metadata
                    .resolve(name)
                    .map(|entry| AllowedType::new(entry, *cardinality))
            })
            .collect::<Result<Vec<_>>>()?;
        let allowed_groups = def
            .groups
            .iter()
            .map(|(name, cardinality)| {
                self.groups
                    .resolve(name)
                    .map(|entry| AllowedType::new(entry, *cardinality))
            })
            .collect::<Result<Vec<_>>>()?;

        self.doc_structs.insert(DocStructType {
            name: def.name,
            labels: def.labels,
            top_level: def.top_level,
            allowed_metadata,
            allowed_groups,
            allowed_children: def.children,
        })
    }

    /// Check outstanding references and publish the registry.
    pub fn build(self) -> Result<TypeRegistry> {
        for ds_type in &self.doc_structs.entries {
            for child in &ds_type.allowed_children {
                if self.doc_structs.get(child).is_none() {
                    return Err(UghError::UnknownType {
                        kind: TypeKind::DocStruct,
                        name: child.clone(),
                    });
                }
            }
        }

        tracing::debug!(
            metadata_types = self.metadata.entries.len(),
            group_types = self.groups.entries.len(),
            doc_struct_types = self.doc_structs.entries.len(),
            "type registry built"
        );

        Ok(TypeRegistry {
            metadata: self.metadata,
            groups: self.groups,
            doc_structs: self.doc_structs,
        })
    }
}

/// Immutable, published set of types.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    metadata: TypeTable<MetadataType>,
    groups: TypeTable<MetadataGroupType>,
    doc_structs: TypeTable<DocStructType>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self {
            metadata: TypeTable::new(TypeKind::Metadata),
            groups: TypeTable::new(TypeKind::Group),
            doc_structs: TypeTable::new(TypeKind::DocStruct),
        }
    }
}

impl TypeRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn resolve_metadata_type(&self, name: &str) -> Result<Arc<MetadataType>> {
        self.metadata.resolve(name)
    }

    pub fn resolve_group_type(&self, name: &str) -> Result<Arc<MetadataGroupType>> {
        self.groups.resolve(name)
    }

    pub fn resolve_doc_struct_type(&self, name: &str) -> Result<Arc<DocStructType>> {
        self.doc_structs.resolve(name)
    }

    pub fn metadata_types(&self) -> impl Iterator<Item = &Arc<MetadataType>> {
        self.metadata.entries.iter()
    }

    pub fn group_types(&self) -> impl Iterator<Item = &Arc<MetadataGroupType>> {
        self.groups.entries.iter()
    }

    pub fn doc_struct_types(&self) -> impl Iterator<Item = &Arc<DocStructType>> {
        self.doc_structs.entries.iter()
    }

    /// Structure types that may act as a document's logical root.
    pub fn top_level_types(&self) -> impl Iterator<Item = &Arc<DocStructType>> {
        self.doc_structs.entries.iter().filter(|t| t.top_level)
    }

    /// Display label of any type, falling back to the name itself.
    pub fn label<'a>(&'a self, name: &'a str, language: &str) -> &'a str {
        if let Some(t) = self.doc_structs.get(name) {
            return t.label(language);
        }
        if let Some(t) = self.groups.get(name) {
            return t.label(language);
        }
        if let Some(t) = self.metadata.get(name) {
            return t.label(language);
        }
        name
    }

    pub fn len(&self) -> usize {
        self.metadata.entries.len() + self.groups.entries.len() + self.doc_structs.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder_with_basics() -> RegistryBuilder {
        let mut builder = RegistryBuilder::new();
        builder
            .add_metadata_type(MetadataType::new("TitleDocMain"))
            .unwrap();
        builder
            .add_metadata_type(MetadataType::person("Author"))
            .unwrap();
        builder
    }

    #[test]
    fn resolves_declared_types() {
        let registry = builder_with_basics().build().unwrap();
        let title = registry.resolve_metadata_type("TitleDocMain").unwrap();
        assert_eq!(title.name, "TitleDocMain");
        assert!(registry.resolve_metadata_type("Author").unwrap().is_person);
    }

    #[test]
    fn unknown_type_is_an_error() {
        let registry = builder_with_basics().build().unwrap();
        let err = registry.resolve_metadata_type("Nope").unwrap_err();
        assert!(matches!(
            err,
            UghError::UnknownType { kind: TypeKind::Metadata, ref name } if name == "Nope"
        ));
        assert!(registry.resolve_group_type("TitleDocMain").is_err());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut builder = builder_with_basics();
        let err = builder
            .add_metadata_type(MetadataType::new("TitleDocMain"))
            .unwrap_err();
        assert!(matches!(err, UghError::DuplicateType { .. }));
    }

    #[test]
    fn same_name_in_different_kinds_is_fine() {
        let mut builder = builder_with_basics();
        builder
            .add_group_type("TitleDocMain", Labels::new(), &[("TitleDocMain", Cardinality::ExactlyOne)])
            .unwrap();
        assert!(builder.build().is_ok());
    }

    #[test]
    fn invalid_names_are_rejected() {
        let mut builder = RegistryBuilder::new();
        let err = builder
            .add_metadata_type(MetadataType::new("Title Doc"))
            .unwrap_err();
        assert!(matches!(err, UghError::InvalidTypeName { .. }));
    }

    #[test]
    fn group_children_must_exist() {
        let mut builder = builder_with_basics();
        let err = builder
            .add_group_type("Publisher", Labels::new(), &[("PublisherName", Cardinality::ExactlyOne)])
            .unwrap_err();
        assert!(matches!(err, UghError::UnknownType { kind: TypeKind::Metadata, .. }));
    }

    #[test]
    fn group_children_keep_declaration_order() {
        let mut builder = builder_with_basics();
        let group = builder
            .add_group_type(
                "Series",
                Labels::new(),
                &[
                    ("Author", Cardinality::ZeroOrMore),
                    ("TitleDocMain", Cardinality::ExactlyOne),
                ],
            )
            .unwrap();
        let names: Vec<_> = group.allowed.iter().map(|a| a.entry.name.as_str()).collect();
        assert_eq!(names, vec!["Author", "TitleDocMain"]);
    }

    #[test]
    fn child_structures_may_be_declared_later() {
        let mut builder = builder_with_basics();
        builder
            .add_doc_struct_type(DocStructTypeDef::new("Monograph").top_level().child("Chapter"))
            .unwrap();
        builder
            .add_doc_struct_type(DocStructTypeDef::new("Chapter"))
            .unwrap();
        let registry = builder.build().unwrap();
        assert_eq!(registry.top_level_types().count(), 1);
    }

    #[test]
    fn undeclared_child_structure_fails_build() {
        let mut builder = builder_with_basics();
        builder
            .add_doc_struct_type(DocStructTypeDef::new("Monograph").child("Chapter"))
            .unwrap();
        let err = builder.build().unwrap_err();
        assert!(matches!(
            err,
            UghError::UnknownType { kind: TypeKind::DocStruct, ref name } if name == "Chapter"
        ));
    }

    #[test]
    fn label_lookup_across_kinds() {
        let mut builder = RegistryBuilder::new();
        builder
            .add_metadata_type(MetadataType::new("TitleDocMain").with_label("de", "Haupttitel"))
            .unwrap();
        let registry = builder.build().unwrap();
        assert_eq!(registry.label("TitleDocMain", "de"), "Haupttitel");
        assert_eq!(registry.label("Unknown", "de"), "Unknown");
        assert_eq!(registry.len(), 1);
    }
}
