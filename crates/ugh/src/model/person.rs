use super::DocStructId;
use crate::capability::HasType;
use crate::error::{Result, UghError};
use crate::prefs::MetadataType;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A person-typed metadata instance (author, editor, ...).
///
/// Instead of a single value a person carries name parts. The role defaults
/// to the name of the type the person was created from.
#[derive(Debug, Clone)]
pub struct Person {
    md_type: Arc<MetadataType>,
    role: String,
    first_name: Option<String>,
    last_name: Option<String>,
    display_name: Option<String>,
    institution: Option<String>,
    authority_value: Option<String>,
    owner: Option<DocStructId>,
}

impl Person {
    pub fn new(md_type: Arc<MetadataType>) -> Self {
        let role = md_type.name.clone();
        Self {
            md_type,
            role,
            first_name: None,
            last_name: None,
            display_name: None,
            institution: None,
            authority_value: None,
            owner: None,
        }
    }

    pub fn try_new(md_type: Option<Arc<MetadataType>>) -> Result<Self> {
        md_type.map(Self::new).ok_or(UghError::NullType("Person"))
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn set_role(&mut self, role: impl Into<String>) {
        self.role = role.into();
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn set_first_name(&mut self, first_name: Option<String>) {
        self.first_name = first_name;
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn set_last_name(&mut self, last_name: Option<String>) {
        self.last_name = last_name;
    }

    pub fn institution(&self) -> Option<&str> {
        self.institution.as_deref()
    }

    pub fn set_institution(&mut self, institution: Option<String>) {
        self.institution = institution;
    }

    pub fn authority_value(&self) -> Option<&str> {
        self.authority_value.as_deref()
    }

    pub fn set_authority_value(&mut self, authority_value: Option<String>) {
        self.authority_value = authority_value;
    }

    pub fn explicit_display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn set_display_name(&mut self, display_name: Option<String>) {
        self.display_name = display_name;
    }

    /// The explicit display name, else `"last, first"`, else whichever part exists.
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = self.display_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return Some(name.to_string());
        }
        let first = self.first_name.as_deref().filter(|n| !n.trim().is_empty());
        let last = self.last_name.as_deref().filter(|n| !n.trim().is_empty());
        match (last, first) {
            (Some(last), Some(first)) => Some(format!("{}, {}", last, first)),
            (Some(last), None) => Some(last.to_string()),
            (None, Some(first)) => Some(first.to_string()),
            (None, None) => None,
        }
    }

    /// True when any part of the name or an institution is present.
    pub fn has_value(&self) -> bool {
        self.display_name().is_some()
            || self
                .institution
                .as_deref()
                .is_some_and(|i| !i.trim().is_empty())
    }

    pub fn md_type(&self) -> &Arc<MetadataType> {
        &self.md_type
    }

    pub fn doc_struct(&self) -> Option<DocStructId> {
        self.owner
    }

    pub fn set_doc_struct(&mut self, owner: Option<DocStructId>) {
        self.owner = owner;
    }
}

impl HasType for Person {
    type Descriptor = MetadataType;

    fn descriptor(&self) -> &Arc<MetadataType> {
        &self.md_type
    }

    fn type_name(&self) -> &str {
        &self.md_type.name
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.md_type == other.md_type
            && self.role == other.role
            && self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.display_name == other.display_name
            && self.institution == other.institution
            && self.authority_value == other.authority_value
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.md_type.hash(state);
        self.role.hash(state);
        self.first_name.hash(state);
        self.last_name.hash(state);
        self.display_name.hash(state);
        self.institution.hash(state);
        self.authority_value.hash(state);
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) = {}",
            self.md_type.name,
            self.role,
            self.display_name().as_deref().unwrap_or("-")
        )
    }
}
