//! Capability traits shared by the model types.
//!
//! Rather than one deep hierarchy, every model type implements the small set
//! of capabilities it actually has:
//!
//! | Type | `HasType` | `MetadataContainer` |
//! |------|-----------|---------------------|
//! | [`Metadata`] | yes | |
//! | [`Person`] | yes | |
//! | [`MetadataGroup`](crate::model::MetadataGroup) | yes | yes |
//! | [`DocStruct`](crate::model::DocStruct) | yes | yes |
//! | [`FileSet`](crate::model::FileSet) | | yes |

use crate::model::{Metadata, Person};
use std::sync::Arc;

/// Something bound to a type descriptor from the registry.
pub trait HasType {
    type Descriptor;

    fn descriptor(&self) -> &Arc<Self::Descriptor>;

    fn type_name(&self) -> &str;
}

/// Something that owns a list of metadata and, possibly, persons.
pub trait MetadataContainer {
    fn metadata_list(&self) -> &[Metadata];

    fn person_list(&self) -> &[Person] {
        &[]
    }

    /// All metadata of the named type, in list order. Empty when none match.
    fn metadata_by_type(&self, type_name: &str) -> Vec<&Metadata> {
        self.metadata_list()
            .iter()
            .filter(|md| md.type_name() == type_name)
            .collect()
    }

    /// All persons of the named type, in list order. Empty when none match.
    fn persons_by_type(&self, type_name: &str) -> Vec<&Person> {
        self.person_list()
            .iter()
            .filter(|p| p.type_name() == type_name)
            .collect()
    }

    /// Count of metadata and persons of the named type.
    fn count_of_type(&self, type_name: &str) -> usize {
        self.metadata_list()
            .iter()
            .filter(|md| md.type_name() == type_name)
            .count()
            + self
                .person_list()
                .iter()
                .filter(|p| p.type_name() == type_name)
                .count()
    }
}
