use super::{DocStructId, Metadata, Person};
use crate::capability::{HasType, MetadataContainer};
use crate::error::{Result, UghError};
use crate::prefs::MetadataGroupType;
use std::fmt;
use std::sync::Arc;

/// An ordered collection of metadata instantiated from a group type.
///
/// Construction pre-creates exactly one instance per schema entry of the
/// group type, in schema order. Person-typed entries (judged by each child
/// type's own person flag) go to the person list, all others to the metadata
/// list.
///
/// The group is a plain aggregate: [`add_metadata`](Self::add_metadata),
/// [`add_person`](Self::add_person) and [`set_type`](Self::set_type) always
/// succeed and never re-check cardinalities. Callers that need the schema
/// enforced run [`validate_group`](crate::validation::validate_group).
///
/// Equality and hashing are structural over type, owner and both lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetadataGroup {
    group_type: Arc<MetadataGroupType>,
    owner: Option<DocStructId>,
    metadata_list: Vec<Metadata>,
    person_list: Vec<Person>,
}

impl MetadataGroup {
    pub fn new(group_type: Arc<MetadataGroupType>) -> Self {
        let mut metadata_list = Vec::new();
        let mut person_list = Vec::new();

        for allowed in &group_type.allowed {
            if allowed.entry.is_person {
                // Person::new already takes the child type name as role
                person_list.push(Person::new(Arc::clone(&allowed.entry)));
            } else {
                metadata_list.push(Metadata::new(Arc::clone(&allowed.entry)));
            }
        }

        Self {
            group_type,
            owner: None,
            metadata_list,
            person_list,
        }
    }

    pub fn try_new(group_type: Option<Arc<MetadataGroupType>>) -> Result<Self> {
        group_type
            .map(Self::new)
            .ok_or(UghError::NullType("MetadataGroup"))
    }

    pub fn group_type(&self) -> &Arc<MetadataGroupType> {
        &self.group_type
    }

    /// Replace the type. Existing contents are kept as they are.
    pub fn set_type(&mut self, group_type: Arc<MetadataGroupType>) -> bool {
        self.group_type = group_type;
        true
    }

    pub fn doc_struct(&self) -> Option<DocStructId> {
        self.owner
    }

    pub fn set_doc_struct(&mut self, owner: Option<DocStructId>) {
        self.owner = owner;
    }

    pub fn add_metadata(&mut self, metadata: Metadata) {
        self.metadata_list.push(metadata);
    }

    pub fn add_person(&mut self, person: Person) {
        self.person_list.push(person);
    }

    pub fn set_metadata_list(&mut self, metadata_list: Vec<Metadata>) {
        self.metadata_list = metadata_list;
    }

    pub fn set_person_list(&mut self, person_list: Vec<Person>) {
        self.person_list = person_list;
    }

    pub fn metadata_list_mut(&mut self) -> &mut Vec<Metadata> {
        &mut self.metadata_list
    }

    pub fn person_list_mut(&mut self) -> &mut Vec<Person> {
        &mut self.person_list
    }
}

impl HasType for MetadataGroup {
    type Descriptor = MetadataGroupType;

    fn descriptor(&self) -> &Arc<MetadataGroupType> {
        &self.group_type
    }

    fn type_name(&self) -> &str {
        &self.group_type.name
    }
}

impl MetadataContainer for MetadataGroup {
    fn metadata_list(&self) -> &[Metadata] {
        &self.metadata_list
    }

    fn person_list(&self) -> &[Person] {
        &self.person_list
    }
}

impl fmt::Display for MetadataGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MetadataGroup [type={}", self.group_type.name)?;
        match self.owner {
            Some(owner) => write!(f, ", docStruct={}", owner)?,
            None => write!(f, ", docStruct=-")?,
        }
        let metadata: Vec<String> = self.metadata_list.iter().map(|m| m.to_string()).collect();
        let persons: Vec<String> = self.person_list.iter().map(|p| p.to_string()).collect();
        write!(
            f,
            ", metadataList=[{}], personList=[{}]]",
            metadata.join(", "),
            persons.join(", ")
        )
    }
}
