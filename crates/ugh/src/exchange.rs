//! Document interchange.
//!
//! [`DocumentFile`] is a plain serde tree referring to types by name. Import
//! resolves every name against a [`TypeRegistry`] and rebuilds the document
//! through the checked [`DocStruct`](crate::model::DocStruct) and
//! [`DigitalDocument`] operations, so a file that breaks the ruleset's
//! maximums or child rules fails to load. Minimum counts and empty values
//! are left to [`validate_document`](crate::validation::validate_document).
//!
//! ```yaml
//! logical:
//!   type: Monograph
//!   metadata:
//!     - { type: TitleDocMain, value: Faust }
//!   persons:
//!     - { type: Author, first_name: Johann Wolfgang, last_name: Goethe }
//!   children:
//!     - type: Chapter
//! files:
//!   - { identifier: FILE_0001, location: images/00000001.tif, mimetype: image/tiff }
//! ```

use crate::capability::{HasType, MetadataContainer};
use crate::error::Result;
use crate::model::{
    ContentFile, DigitalDocument, DocStructId, Metadata, MetadataGroup, Person, VirtualFileGroup,
};
use crate::prefs::{FileFormat, TypeRegistry};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical: Option<NodeEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical: Option<NodeEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<ContentFile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_metadata: Vec<MetadataEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub virtual_file_groups: Vec<VirtualFileGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub persons: Vec<PersonEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority_value: Option<String>,
}

/// A group instance. When both lists are empty the group keeps the one
/// empty instance per schema entry it was created with, unless `empty` is
/// set; export sets it for groups whose lists were cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub persons: Vec<PersonEntry>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub empty: bool,
}

impl DocumentFile {
    pub fn parse(text: &str, format: FileFormat) -> Result<Self> {
        Ok(match format {
            FileFormat::Json => serde_json::from_str(text)?,
            FileFormat::Yaml => serde_yaml::from_str(text)?,
        })
    }

    pub fn to_string(&self, format: FileFormat) -> Result<String> {
        Ok(match format {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }
}

fn import_metadata(registry: &TypeRegistry, entry: &MetadataEntry) -> Result<Metadata> {
    let mut metadata = Metadata::new(registry.resolve_metadata_type(&entry.type_name)?);
    metadata.set_value(entry.value.clone());
    Ok(metadata)
}

fn import_person(registry: &TypeRegistry, entry: &PersonEntry) -> Result<Person> {
    let mut person = Person::new(registry.resolve_metadata_type(&entry.type_name)?);
    if let Some(role) = &entry.role {
        person.set_role(role.clone());
    }
    person.set_first_name(entry.first_name.clone());
    person.set_last_name(entry.last_name.clone());
    person.set_display_name(entry.display_name.clone());
    person.set_institution(entry.institution.clone());
    person.set_authority_value(entry.authority_value.clone());
    Ok(person)
}

fn import_group(registry: &TypeRegistry, entry: &GroupEntry) -> Result<MetadataGroup> {
    let mut group = MetadataGroup::new(registry.resolve_group_type(&entry.type_name)?);
    if entry.empty || !entry.metadata.is_empty() || !entry.persons.is_empty() {
        group.set_metadata_list(
            entry
                .metadata
                .iter()
                .map(|m| import_metadata(registry, m))
                .collect::<Result<_>>()?,
        );
        group.set_person_list(
            entry
                .persons
                .iter()
                .map(|p| import_person(registry, p))
                .collect::<Result<_>>()?,
        );
    }
    Ok(group)
}

fn import_node(
    registry: &TypeRegistry,
    doc: &mut DigitalDocument,
    entry: &NodeEntry,
) -> Result<DocStructId> {
    let id = doc.create_doc_struct(registry.resolve_doc_struct_type(&entry.type_name)?);
    {
        let node = doc.doc_struct_mut(id)?;
        for m in &entry.metadata {
            node.add_metadata(import_metadata(registry, m)?)?;
        }
        for p in &entry.persons {
            node.add_person(import_person(registry, p)?)?;
        }
        for g in &entry.groups {
            node.add_metadata_group(import_group(registry, g)?)?;
        }
    }
    for child in &entry.children {
        let child_id = import_node(registry, doc, child)?;
        doc.add_child(id, child_id)?;
    }
    Ok(id)
}

/// Build a document from its interchange form.
pub fn import(registry: &TypeRegistry, file: &DocumentFile) -> Result<DigitalDocument> {
    let mut doc = DigitalDocument::new();

    if let Some(logical) = &file.logical {
        let root = import_node(registry, &mut doc, logical)?;
        doc.set_logical_root(root)?;
    }
    if let Some(physical) = &file.physical {
        let root = import_node(registry, &mut doc, physical)?;
        doc.set_physical_root(root)?;
    }

    let file_set = doc.file_set_mut();
    for content_file in &file.files {
        file_set.add_file(content_file.clone());
    }
    for m in &file.file_metadata {
        file_set.add_metadata(import_metadata(registry, m)?);
    }
    file_set.set_virtual_file_groups(file.virtual_file_groups.clone());

    tracing::debug!(
        nodes = doc.len(),
        files = doc.file_set().files().len(),
        "document imported"
    );
    Ok(doc)
}

/// Read a JSON or YAML document file, chosen by extension.
pub fn load_document(registry: &TypeRegistry, path: &Path) -> Result<DigitalDocument> {
    let format = FileFormat::from_path(path)?;
    let text = fs::read_to_string(path)?;
    let file = DocumentFile::parse(&text, format)?;
    tracing::debug!(path = %path.display(), "document file parsed");
    import(registry, &file)
}

fn export_metadata(metadata: &Metadata) -> MetadataEntry {
    MetadataEntry {
        type_name: metadata.type_name().to_string(),
        value: metadata.value().map(str::to_string),
    }
}

fn export_person(person: &Person) -> PersonEntry {
    PersonEntry {
        type_name: person.type_name().to_string(),
        role: (person.role() != person.type_name()).then(|| person.role().to_string()),
        first_name: person.first_name().map(str::to_string),
        last_name: person.last_name().map(str::to_string),
        display_name: person.explicit_display_name().map(str::to_string),
        institution: person.institution().map(str::to_string),
        authority_value: person.authority_value().map(str::to_string),
    }
}

fn export_node(doc: &DigitalDocument, id: DocStructId) -> Result<NodeEntry> {
    let node = doc.doc_struct(id)?;
    Ok(NodeEntry {
        type_name: node.type_name().to_string(),
        metadata: node.metadata_list().iter().map(export_metadata).collect(),
        persons: node.person_list().iter().map(export_person).collect(),
        groups: node
            .groups()
            .iter()
            .map(|g| GroupEntry {
                type_name: g.type_name().to_string(),
                metadata: g.metadata_list().iter().map(export_metadata).collect(),
                persons: g.person_list().iter().map(export_person).collect(),
                empty: g.metadata_list().is_empty() && g.person_list().is_empty(),
            })
            .collect(),
        children: node
            .children()
            .iter()
            .map(|&child| export_node(doc, child))
            .collect::<Result<_>>()?,
    })
}

/// The interchange form of a document. Detached nodes are not exported.
pub fn export(doc: &DigitalDocument) -> Result<DocumentFile> {
    let file_set = doc.file_set();
    Ok(DocumentFile {
        logical: doc.logical_root().map(|id| export_node(doc, id)).transpose()?,
        physical: doc.physical_root().map(|id| export_node(doc, id)).transpose()?,
        files: file_set.files().to_vec(),
        file_metadata: file_set.metadata_list().iter().map(export_metadata).collect(),
        virtual_file_groups: file_set.virtual_file_groups().to_vec(),
    })
}

/// A one-node document of the given type with every required entry present
/// but empty.
pub fn scaffold(registry: &TypeRegistry, type_name: &str) -> Result<DigitalDocument> {
    let mut doc = DigitalDocument::new();
    let root = doc.create_doc_struct(registry.resolve_doc_struct_type(type_name)?);
    doc.doc_struct_mut(root)?.add_required_metadata();
    if doc.doc_struct(root)?.doc_struct_type().top_level {
        doc.set_logical_root(root)?;
    } else {
        doc.set_physical_root(root)?;
    }
    Ok(doc)
}
