use super::DocStructId;
use crate::capability::HasType;
use crate::error::{Result, UghError};
use crate::prefs::MetadataType;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A single typed value.
///
/// Two instances are equal when they have the same type and value; the owning
/// structure is a back-reference and takes no part in identity, so a caller
/// can hold a copy and still find the stored instance again.
#[derive(Debug, Clone)]
pub struct Metadata {
    md_type: Arc<MetadataType>,
    value: Option<String>,
    owner: Option<DocStructId>,
}

impl Metadata {
    pub fn new(md_type: Arc<MetadataType>) -> Self {
        Self {
            md_type,
            value: None,
            owner: None,
        }
    }

    /// Construct from a possibly missing type, e.g. the result of a lookup.
    pub fn try_new(md_type: Option<Arc<MetadataType>>) -> Result<Self> {
        md_type
            .map(Self::new)
            .ok_or(UghError::NullType("Metadata"))
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    /// True when a non-blank value is present.
    pub fn has_value(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.trim().is_empty())
    }

    pub fn md_type(&self) -> &Arc<MetadataType> {
        &self.md_type
    }

    pub fn set_type(&mut self, md_type: Arc<MetadataType>) -> bool {
        self.md_type = md_type;
        true
    }

    pub fn doc_struct(&self) -> Option<DocStructId> {
        self.owner
    }

    pub fn set_doc_struct(&mut self, owner: Option<DocStructId>) {
        self.owner = owner;
    }
}

impl HasType for Metadata {
    type Descriptor = MetadataType;

    fn descriptor(&self) -> &Arc<MetadataType> {
        &self.md_type
    }

    fn type_name(&self) -> &str {
        &self.md_type.name
    }
}

impl PartialEq for Metadata {
    fn eq(&self, other: &Self) -> bool {
        self.md_type == other.md_type && self.value == other.value
    }
}

impl Eq for Metadata {}

impl Hash for Metadata {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.md_type.hash(state);
        self.value.hash(state);
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {}",
            self.md_type.name,
            self.value.as_deref().unwrap_or("-")
        )
    }
}
