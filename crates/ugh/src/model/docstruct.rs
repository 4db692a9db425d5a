//! Structural nodes.
//!
//! Unlike [`MetadataGroup`], a [`DocStruct`] enforces its type's schema at
//! mutation time:
//!
//! - only metadata, persons and groups listed by the structure type may be
//!   attached ([`UghError::TypeNotAllowed`])
//! - an entry cannot be added once its maximum is reached
//!   ([`UghError::TooManyOccurrences`])
//! - an entry cannot be removed when that would fall below its minimum
//!   ([`UghError::MinOccurrences`])
//!
//! Removed instances are kept in per-kind "removed" lists so callers can
//! inspect or undo removals.
//!
//! Minimum counts are not enforced on *adding*: a freshly created node is
//! empty, and [`DocStruct::add_required_metadata`] or a later
//! [`validate_doc_struct`](crate::validation::validate_doc_struct) deal
//! with missing required entries.

use super::{DocStructId, Metadata, MetadataGroup, Person};
use crate::capability::{HasType, MetadataContainer};
use crate::error::{Result, UghError};
use crate::prefs::{DocStructType, MetadataGroupType, MetadataType, TypeKind};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DocStruct {
    id: DocStructId,
    ds_type: Arc<DocStructType>,
    metadata: Vec<Metadata>,
    persons: Vec<Person>,
    groups: Vec<MetadataGroup>,
    removed_metadata: Vec<Metadata>,
    removed_persons: Vec<Person>,
    removed_groups: Vec<MetadataGroup>,
    pub(super) parent: Option<DocStructId>,
    pub(super) children: Vec<DocStructId>,
}

impl DocStruct {
    pub(super) fn new(id: DocStructId, ds_type: Arc<DocStructType>) -> Self {
        Self {
            id,
            ds_type,
            metadata: Vec::new(),
            persons: Vec::new(),
            groups: Vec::new(),
            removed_metadata: Vec::new(),
            removed_persons: Vec::new(),
            removed_groups: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> DocStructId {
        self.id
    }

    pub fn doc_struct_type(&self) -> &Arc<DocStructType> {
        &self.ds_type
    }

    pub fn parent(&self) -> Option<DocStructId> {
        self.parent
    }

    pub fn children(&self) -> &[DocStructId] {
        &self.children
    }

    fn not_allowed(&self, kind: TypeKind, type_name: &str) -> UghError {
        UghError::TypeNotAllowed {
            kind,
            type_name: type_name.to_string(),
            parent: self.ds_type.name.clone(),
        }
    }

    fn too_many(&self, type_name: &str) -> UghError {
        UghError::TooManyOccurrences {
            type_name: type_name.to_string(),
            parent: self.ds_type.name.clone(),
        }
    }

    fn too_few(&self, type_name: &str) -> UghError {
        UghError::MinOccurrences {
            type_name: type_name.to_string(),
            parent: self.ds_type.name.clone(),
        }
    }

    /// Check that one more entry of a metadata type fits.
    fn check_metadata_slot(&self, md_type: &MetadataType) -> Result<()> {
        let allowed = self
            .ds_type
            .allowed_metadata_entry(&md_type.name)
            .ok_or_else(|| self.not_allowed(TypeKind::Metadata, &md_type.name))?;
        if !allowed
            .cardinality
            .allows_another(self.count_of_type(&md_type.name))
        {
            return Err(self.too_many(&md_type.name));
        }
        Ok(())
    }

    pub fn add_metadata(&mut self, mut metadata: Metadata) -> Result<()> {
        if metadata.md_type().is_person {
            return Err(self.not_allowed(TypeKind::Metadata, metadata.type_name()));
        }
        self.check_metadata_slot(metadata.md_type())?;
        metadata.set_doc_struct(Some(self.id));
        self.metadata.push(metadata);
        Ok(())
    }

    pub fn add_person(&mut self, mut person: Person) -> Result<()> {
        if !person.md_type().is_person {
            return Err(self.not_allowed(TypeKind::Metadata, person.type_name()));
        }
        self.check_metadata_slot(person.md_type())?;
        person.set_doc_struct(Some(self.id));
        self.persons.push(person);
        Ok(())
    }

    pub fn add_metadata_group(&mut self, mut group: MetadataGroup) -> Result<()> {
        let type_name = group.type_name().to_string();
        let allowed = self
            .ds_type
            .allowed_group_entry(&type_name)
            .ok_or_else(|| self.not_allowed(TypeKind::Group, &type_name))?;
        if !allowed
            .cardinality
            .allows_another(self.groups_by_type(&type_name).len())
        {
            return Err(self.too_many(&type_name));
        }
        group.set_doc_struct(Some(self.id));
        self.groups.push(group);
        Ok(())
    }

    /// Check that one entry of a metadata type may go.
    ///
    /// Types the structure no longer lists can always be removed.
    fn check_metadata_removal(&self, type_name: &str) -> Result<()> {
        if let Some(allowed) = self.ds_type.allowed_metadata_entry(type_name) {
            if !allowed
                .cardinality
                .allows_removal(self.count_of_type(type_name))
            {
                return Err(self.too_few(type_name));
            }
        }
        Ok(())
    }

    /// Remove the first equal instance. Returns `false` if none was present.
    pub fn remove_metadata(&mut self, metadata: &Metadata) -> Result<bool> {
        let Some(pos) = self.metadata.iter().position(|m| m == metadata) else {
            return Ok(false);
        };
        self.check_metadata_removal(metadata.type_name())?;
        let removed = self.metadata.remove(pos);
        self.removed_metadata.push(removed);
        Ok(true)
    }

    pub fn remove_person(&mut self, person: &Person) -> Result<bool> {
        let Some(pos) = self.persons.iter().position(|p| p == person) else {
            return Ok(false);
        };
        self.check_metadata_removal(person.type_name())?;
        let removed = self.persons.remove(pos);
        self.removed_persons.push(removed);
        Ok(true)
    }

    pub fn remove_metadata_group(&mut self, group: &MetadataGroup) -> Result<bool> {
        let Some(pos) = self.groups.iter().position(|g| g == group) else {
            return Ok(false);
        };
        let type_name = group.type_name();
        if let Some(allowed) = self.ds_type.allowed_group_entry(type_name) {
            if !allowed
                .cardinality
                .allows_removal(self.groups_by_type(type_name).len())
            {
                return Err(self.too_few(type_name));
            }
        }
        let removed = self.groups.remove(pos);
        self.removed_groups.push(removed);
        Ok(true)
    }

    pub fn groups(&self) -> &[MetadataGroup] {
        &self.groups
    }

    pub fn groups_by_type(&self, type_name: &str) -> Vec<&MetadataGroup> {
        self.groups
            .iter()
            .filter(|g| g.type_name() == type_name)
            .collect()
    }

    /// Set the value of the metadata entry at `index`. Returns `false` when
    /// there is no such entry.
    pub fn set_metadata_value(&mut self, index: usize, value: Option<String>) -> bool {
        match self.metadata.get_mut(index) {
            Some(metadata) => {
                metadata.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Edit the person at `index` in place. The owner is restored afterwards.
    pub fn edit_person(&mut self, index: usize, edit: impl FnOnce(&mut Person)) -> bool {
        let id = self.id;
        match self.persons.get_mut(index) {
            Some(person) => {
                edit(person);
                person.set_doc_struct(Some(id));
                true
            }
            None => false,
        }
    }

    /// Edit the contents of the group at `index`. Its type and owner are
    /// restored afterwards; group contents are checked by validation only.
    pub fn edit_group(&mut self, index: usize, edit: impl FnOnce(&mut MetadataGroup)) -> bool {
        let id = self.id;
        match self.groups.get_mut(index) {
            Some(group) => {
                let group_type = Arc::clone(group.group_type());
                edit(group);
                group.set_type(group_type);
                group.set_doc_struct(Some(id));
                true
            }
            None => false,
        }
    }

    pub fn removed_metadata(&self) -> &[Metadata] {
        &self.removed_metadata
    }

    pub fn removed_persons(&self) -> &[Person] {
        &self.removed_persons
    }

    pub fn removed_groups(&self) -> &[MetadataGroup] {
        &self.removed_groups
    }

    /// Metadata and person types that can still be added, in schema order.
    pub fn possible_metadata_types(&self) -> Vec<&Arc<MetadataType>> {
        self.ds_type
            .allowed_metadata
            .iter()
            .filter(|a| {
                a.cardinality
                    .allows_another(self.count_of_type(&a.entry.name))
            })
            .map(|a| &a.entry)
            .collect()
    }

    pub fn possible_group_types(&self) -> Vec<&Arc<MetadataGroupType>> {
        self.ds_type
            .allowed_groups
            .iter()
            .filter(|a| {
                a.cardinality
                    .allows_another(self.groups_by_type(&a.entry.name).len())
            })
            .map(|a| &a.entry)
            .collect()
    }

    /// Create empty instances for every required entry that is missing.
    /// Returns how many instances were created.
    pub fn add_required_metadata(&mut self) -> usize {
        let ds_type = Arc::clone(&self.ds_type);
        let mut created = 0;

        for allowed in ds_type.allowed_metadata.iter() {
            if !allowed.cardinality.is_required() || self.count_of_type(&allowed.entry.name) > 0 {
                continue;
            }
            if allowed.entry.is_person {
                let mut person = Person::new(Arc::clone(&allowed.entry));
                person.set_doc_struct(Some(self.id));
                self.persons.push(person);
            } else {
                let mut metadata = Metadata::new(Arc::clone(&allowed.entry));
                metadata.set_doc_struct(Some(self.id));
                self.metadata.push(metadata);
            }
            created += 1;
        }

        for allowed in ds_type.allowed_groups.iter() {
            if !allowed.cardinality.is_required()
                || !self.groups_by_type(&allowed.entry.name).is_empty()
            {
                continue;
            }
            let mut group = MetadataGroup::new(Arc::clone(&allowed.entry));
            group.set_doc_struct(Some(self.id));
            self.groups.push(group);
            created += 1;
        }

        created
    }
}

impl HasType for DocStruct {
    type Descriptor = DocStructType;

    fn descriptor(&self) -> &Arc<DocStructType> {
        &self.ds_type
    }

    fn type_name(&self) -> &str {
        &self.ds_type.name
    }
}

impl MetadataContainer for DocStruct {
    fn metadata_list(&self) -> &[Metadata] {
        &self.metadata
    }

    fn person_list(&self) -> &[Person] {
        &self.persons
    }
}
