//! # ugh
//!
//! A typed, cardinality-checked metadata model for digitized library
//! documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌─────────┐   ┌────────────┐
//! │ ugh (CLI)  │──▶│ api.rs  │──▶│ commands/* │
//! └────────────┘   └─────────┘   └─────┬──────┘
//!                                      │
//!            ┌────────────┬────────────┼─────────────┐
//!            ▼            ▼            ▼             ▼
//!        exchange     validation     backup        prefs
//!            │            │                          ▲
//!            └─────▶  model  ────────────────────────┘
//! ```
//!
//! - [`prefs`]: the type registry. A ruleset declares metadata types, group
//!   types and structure types together with [`Cardinality`] rules; once
//!   built, a [`TypeRegistry`] never changes.
//! - [`model`]: instances. [`Metadata`] and [`Person`] are typed values,
//!   [`MetadataGroup`] a permissive bundle of them, [`DocStruct`] a node that
//!   enforces its type at mutation time, [`DigitalDocument`] the arena that
//!   owns the node tree and the [`FileSet`].
//! - [`validation`]: explicit, collecting checks for groups, nodes and whole
//!   documents.
//! - [`exchange`]: JSON/YAML interchange for documents.
//! - [`backup`]: checks the metadata backup of a process.
//! - [`commands`] and [`api`]: the UI-agnostic command layer.
//!
//! ## Two Strictness Levels
//!
//! Structural nodes refuse disallowed types and excess entries immediately,
//! and refuse removals below a minimum. Groups and file sets accept anything.
//! Neither enforces minimums while a document is being assembled; run
//! [`validation::validate_document`] when it is finished.

pub mod api;
pub mod backup;
pub mod capability;
pub mod commands;
pub mod config;
pub mod error;
pub mod exchange;
pub mod model;
pub mod prefs;
pub mod validation;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use capability::{HasType, MetadataContainer};
pub use error::{Result, UghError};
pub use model::{
    ContentFile, DigitalDocument, DocStruct, DocStructId, FileSet, Metadata, MetadataGroup,
    Person, VirtualFileGroup,
};
pub use prefs::{Cardinality, TypeRegistry};
