//! The document model.
//!
//! A [`DigitalDocument`] owns every [`DocStruct`] in an arena; nodes refer to
//! each other (and metadata refers to its owning node) through [`DocStructId`]
//! indices rather than pointers.

pub mod docstruct;
pub mod document;
pub mod fileset;
pub mod group;
pub mod metadata;
pub mod person;

pub use docstruct::DocStruct;
pub use document::DigitalDocument;
pub use fileset::{ContentFile, FileSet, VirtualFileGroup};
pub use group::MetadataGroup;
pub use metadata::Metadata;
pub use person::Person;

use std::fmt;

/// Index of a [`DocStruct`] inside its [`DigitalDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocStructId(pub(crate) usize);

impl DocStructId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DocStructId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
