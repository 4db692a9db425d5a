//! # Preferences: the type system
//!
//! Every metadata instance, group and structural node is bound to a type
//! descriptor declared in a ruleset (historically called "preferences").
//! This module holds that type system:
//!
//! - [`cardinality`]: how often a type may occur in its container
//! - [`names`]: the naming rules every type name obeys
//! - [`types`]: the descriptors themselves
//! - [`registry`]: building and resolving a frozen [`TypeRegistry`]
//! - [`ruleset`]: reading registries from JSON/YAML files

pub mod cardinality;
pub mod names;
pub mod registry;
pub mod ruleset;
pub mod types;

pub use cardinality::Cardinality;
pub use registry::{DocStructTypeDef, RegistryBuilder, TypeRegistry};
pub use ruleset::{load_ruleset, parse_ruleset_str, FileFormat, RulesetFile};
pub use types::{AllowedType, DocStructType, Labels, MetadataGroupType, MetadataType, TypeKind};
