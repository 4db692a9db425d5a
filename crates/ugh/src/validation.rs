//! Explicit schema validation.
//!
//! Structural nodes already refuse disallowed types and excess entries when
//! they are mutated, but nothing forces minimum counts or values to be
//! present while a document is being assembled, and groups accept anything.
//! The functions here check a finished group, node or document and collect
//! every problem they find instead of stopping at the first one.

use crate::capability::{HasType, MetadataContainer};
use crate::model::{DigitalDocument, DocStruct, MetadataGroup};
use crate::prefs::{AllowedType, Cardinality, MetadataType, TypeKind};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    TooFew {
        location: String,
        type_name: String,
        min: usize,
        found: usize,
    },
    TooMany {
        location: String,
        type_name: String,
        max: usize,
        found: usize,
    },
    NotAllowed {
        location: String,
        kind: TypeKind,
        type_name: String,
    },
    /// A required entry is present but carries no value (or, for persons, no name).
    EmptyValue { location: String, type_name: String },
    NotTopLevel { location: String, type_name: String },
}

impl ValidationIssue {
    pub fn location(&self) -> &str {
        match self {
            ValidationIssue::TooFew { location, .. }
            | ValidationIssue::TooMany { location, .. }
            | ValidationIssue::NotAllowed { location, .. }
            | ValidationIssue::EmptyValue { location, .. }
            | ValidationIssue::NotTopLevel { location, .. } => location,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::TooFew {
                location,
                type_name,
                min,
                found,
            } => write!(
                f,
                "{}: '{}' needs at least {}, found {}",
                location, type_name, min, found
            ),
            ValidationIssue::TooMany {
                location,
                type_name,
                max,
                found,
            } => write!(
                f,
                "{}: '{}' allows at most {}, found {}",
                location, type_name, max, found
            ),
            ValidationIssue::NotAllowed {
                location,
                kind,
                type_name,
            } => write!(f, "{}: {} type '{}' is not allowed here", location, kind, type_name),
            ValidationIssue::EmptyValue {
                location,
                type_name,
            } => write!(f, "{}: required '{}' has no value", location, type_name),
            ValidationIssue::NotTopLevel {
                location,
                type_name,
            } => write!(
                f,
                "{}: '{}' cannot be the top of a logical structure",
                location, type_name
            ),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} validation issue(s): {}", .issues.len(), summary(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn summary(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn into_result(issues: Vec<ValidationIssue>) -> Result<(), ValidationError> {
    if issues.is_empty() {
        Ok(())
    } else {
        tracing::warn!(issues = issues.len(), "validation failed");
        Err(ValidationError { issues })
    }
}

fn check_count(
    location: &str,
    type_name: &str,
    cardinality: Cardinality,
    found: usize,
    issues: &mut Vec<ValidationIssue>,
) {
    if found < cardinality.min() {
        issues.push(ValidationIssue::TooFew {
            location: location.to_string(),
            type_name: type_name.to_string(),
            min: cardinality.min(),
            found,
        });
    }
    if let Some(max) = cardinality.max() {
        if found > max {
            issues.push(ValidationIssue::TooMany {
                location: location.to_string(),
                type_name: type_name.to_string(),
                max,
                found,
            });
        }
    }
}

/// Counts, stray types and empty required values for one container.
fn container_issues<C: MetadataContainer>(
    container: &C,
    allowed: &[AllowedType<MetadataType>],
    location: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    for entry in allowed {
        let name = &entry.entry.name;
        check_count(
            location,
            name,
            entry.cardinality,
            container.count_of_type(name),
            issues,
        );

        if entry.cardinality.is_required() {
            let empty_metadata = container
                .metadata_by_type(name)
                .into_iter()
                .filter(|m| !m.has_value())
                .count();
            let empty_persons = container
                .persons_by_type(name)
                .into_iter()
                .filter(|p| !p.has_value())
                .count();
            for _ in 0..empty_metadata + empty_persons {
                issues.push(ValidationIssue::EmptyValue {
                    location: location.to_string(),
                    type_name: name.clone(),
                });
            }
        }
    }

    let stray = container
        .metadata_list()
        .iter()
        .map(|m| m.type_name())
        .chain(container.person_list().iter().map(|p| p.type_name()))
        .filter(|name| !allowed.iter().any(|a| a.entry.name == *name));
    for name in stray {
        issues.push(ValidationIssue::NotAllowed {
            location: location.to_string(),
            kind: TypeKind::Metadata,
            type_name: name.to_string(),
        });
    }
}

fn group_issues(group: &MetadataGroup, location: &str, issues: &mut Vec<ValidationIssue>) {
    container_issues(group, &group.group_type().allowed, location, issues);
}

fn doc_struct_issues(ds: &DocStruct, location: &str, issues: &mut Vec<ValidationIssue>) {
    let ds_type = ds.doc_struct_type();
    container_issues(ds, &ds_type.allowed_metadata, location, issues);

    for entry in &ds_type.allowed_groups {
        check_count(
            location,
            &entry.entry.name,
            entry.cardinality,
            ds.groups_by_type(&entry.entry.name).len(),
            issues,
        );
    }

    for group in ds.groups() {
        let group_location = format!("{}/{}", location, group.type_name());
        if ds_type.allowed_group_entry(group.type_name()).is_none() {
            issues.push(ValidationIssue::NotAllowed {
                location: location.to_string(),
                kind: TypeKind::Group,
                type_name: group.type_name().to_string(),
            });
        }
        group_issues(group, &group_location, issues);
    }
}

/// Check a group against its own type. Groups never do this themselves.
pub fn validate_group(group: &MetadataGroup) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    group_issues(group, group.type_name(), &mut issues);
    into_result(issues)
}

/// Check one node (and its groups); `location` prefixes every issue.
pub fn validate_doc_struct(ds: &DocStruct, location: &str) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    doc_struct_issues(ds, location, &mut issues);
    into_result(issues)
}

/// Check every node reachable from the logical root, then the physical root.
pub fn validate_document(doc: &DigitalDocument) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    if let Some(root) = doc.logical_root() {
        if let Ok(node) = doc.doc_struct(root) {
            if !node.doc_struct_type().top_level {
                issues.push(ValidationIssue::NotTopLevel {
                    location: node.type_name().to_string(),
                    type_name: node.type_name().to_string(),
                });
            }
        }
    }

    let roots = [doc.logical_root(), doc.physical_root()];
    for root in roots.into_iter().flatten() {
        for id in doc.descendants(root).unwrap_or_default() {
            let Ok(node) = doc.doc_struct(id) else {
                continue;
            };
            let location = doc.path(id).unwrap_or_else(|_| id.to_string());
            doc_struct_issues(node, &location, &mut issues);
        }
    }

    into_result(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metadata, Person};
    use crate::test_utils::sample_registry;
    use std::sync::Arc;

    fn publisher() -> MetadataGroup {
        MetadataGroup::new(sample_registry().resolve_group_type("Publisher").unwrap())
    }

    #[test]
    fn fresh_group_reports_empty_required_value() {
        let err = validate_group(&publisher()).unwrap_err();
        assert_eq!(
            err.issues,
            vec![ValidationIssue::EmptyValue {
                location: "Publisher".into(),
                type_name: "PublisherName".into(),
            }]
        );
    }

    #[test]
    fn filled_group_passes() {
        let mut group = publisher();
        group.metadata_list_mut()[0].set_value(Some("Cotta".into()));
        assert!(validate_group(&group).is_ok());
    }

    #[test]
    fn group_collects_every_issue() {
        let registry = sample_registry();
        let mut group = publisher();
        let name_type = registry.resolve_metadata_type("PublisherName").unwrap();
        group.metadata_list_mut()[0].set_value(Some("Cotta".into()));
        group.add_metadata(Metadata::new(name_type).with_value("Göschen"));
        group.add_metadata(
            Metadata::new(registry.resolve_metadata_type("PageNumber").unwrap()).with_value("1"),
        );

        let err = validate_group(&group).unwrap_err();
        assert_eq!(err.issues.len(), 2);
        assert!(matches!(
            err.issues[0],
            ValidationIssue::TooMany { max: 1, found: 2, .. }
        ));
        assert!(matches!(
            err.issues[1],
            ValidationIssue::NotAllowed { kind: TypeKind::Metadata, .. }
        ));
    }

    #[test]
    fn missing_required_metadata_on_node() {
        let registry = sample_registry();
        let mut doc = DigitalDocument::new();
        let id = doc.create_doc_struct(registry.resolve_doc_struct_type("Monograph").unwrap());
        let ds = doc.doc_struct_mut(id).unwrap();
        ds.add_metadata(
            Metadata::new(registry.resolve_metadata_type("TitleDocMain").unwrap())
                .with_value("Faust"),
        )
        .unwrap();

        let err = validate_doc_struct(ds, "Monograph").unwrap_err();
        let missing: Vec<_> = err
            .issues
            .iter()
            .filter_map(|i| match i {
                ValidationIssue::TooFew { type_name, .. } => Some(type_name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(missing, vec!["Author", "CatalogIDDigital"]);
    }

    #[test]
    fn nameless_required_person_is_empty() {
        let registry = sample_registry();
        let mut doc = DigitalDocument::new();
        let id = doc.create_doc_struct(registry.resolve_doc_struct_type("Monograph").unwrap());
        let ds = doc.doc_struct_mut(id).unwrap();
        ds.add_required_metadata();
        ds.set_metadata_value(0, Some("Faust".into()));
        ds.set_metadata_value(1, Some("PPN123".into()));

        let err = validate_doc_struct(ds, "Monograph").unwrap_err();
        assert_eq!(
            err.issues,
            vec![ValidationIssue::EmptyValue {
                location: "Monograph".into(),
                type_name: "Author".into(),
            }]
        );

        ds.edit_person(0, |p| p.set_last_name(Some("Goethe".into())));
        assert!(validate_doc_struct(ds, "Monograph").is_ok());
    }

    #[test]
    fn document_issues_carry_paths() {
        let registry = sample_registry();
        let mut doc = DigitalDocument::new();
        let book = doc.create_doc_struct(registry.resolve_doc_struct_type("BoundBook").unwrap());
        doc.set_physical_root(book).unwrap();
        let page_type = registry.resolve_doc_struct_type("page").unwrap();
        for n in 1..=2 {
            let page = doc.create_doc_struct(Arc::clone(&page_type));
            doc.add_child(book, page).unwrap();
            if n == 1 {
                doc.doc_struct_mut(page)
                    .unwrap()
                    .add_metadata(
                        Metadata::new(registry.resolve_metadata_type("PageNumber").unwrap())
                            .with_value("1"),
                    )
                    .unwrap();
            }
        }

        let err = validate_document(&doc).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].location(), "BoundBook/page[2]");
        assert!(err.to_string().contains("'PageNumber' needs at least 1, found 0"));
    }

    #[test]
    fn logical_root_must_be_top_level() {
        let registry = sample_registry();
        let mut doc = DigitalDocument::new();
        let chapter = doc.create_doc_struct(registry.resolve_doc_struct_type("Chapter").unwrap());
        doc.set_logical_root(chapter).unwrap();

        let err = validate_document(&doc).unwrap_err();
        assert!(matches!(err.issues[0], ValidationIssue::NotTopLevel { .. }));
    }

    #[test]
    fn complete_monograph_passes() {
        let registry = sample_registry();
        let mut doc = DigitalDocument::new();
        let root = doc.create_doc_struct(registry.resolve_doc_struct_type("Monograph").unwrap());
        doc.set_logical_root(root).unwrap();
        let ds = doc.doc_struct_mut(root).unwrap();
        for (name, value) in [("TitleDocMain", "Faust"), ("CatalogIDDigital", "PPN1")] {
            ds.add_metadata(
                Metadata::new(registry.resolve_metadata_type(name).unwrap()).with_value(value),
            )
            .unwrap();
        }
        ds.add_person(
            Person::new(registry.resolve_metadata_type("Author").unwrap())
                .with_name("Johann Wolfgang", "Goethe"),
        )
        .unwrap();

        assert!(validate_document(&doc).is_ok());
    }
}
