use crate::prefs::names::TypeNameError;
use crate::prefs::TypeKind;
use crate::validation::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UghError {
    #[error("type descriptor must not be empty at {0} creation")]
    NullType(&'static str),

    #[error("unknown {kind} type: {name}")]
    UnknownType { kind: TypeKind, name: String },

    #[error("duplicate {kind} type: {name}")]
    DuplicateType { kind: TypeKind, name: String },

    #[error("invalid type name '{name}': {reason}")]
    InvalidTypeName { name: String, reason: TypeNameError },

    #[error("invalid cardinality '{0}' (expected 0..1, 1, 0..n or 1..n)")]
    InvalidCardinality(String),

    #[error("{kind} type '{type_name}' is not allowed in '{parent}'")]
    TypeNotAllowed {
        kind: TypeKind,
        type_name: String,
        parent: String,
    },

    #[error("'{parent}' already holds the maximum number of '{type_name}' entries")]
    TooManyOccurrences { type_name: String, parent: String },

    #[error("'{type_name}' is required in '{parent}' and cannot be removed")]
    MinOccurrences { type_name: String, parent: String },

    #[error("structure {0} is already attached to a parent")]
    AlreadyAttached(usize),

    #[error("attaching structure {child} below {parent} would create a cycle")]
    CyclicStructure { parent: usize, child: usize },

    #[error("structure {0} does not exist in this document")]
    DocStructNotFound(usize),

    #[error("backup of metafile not found, inconsistent data ({}): {source}", .path.display())]
    BackupValidation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, UghError>;
