use crate::commands::{CmdMessage, CmdResult, TypeSummary};
use crate::error::Result;
use crate::prefs::{TypeKind, TypeRegistry};

/// List declared types, optionally only one kind, labelled in `language`.
pub fn run(registry: &TypeRegistry, kind: Option<TypeKind>, language: &str) -> Result<CmdResult> {
    let wants = |k: TypeKind| kind.is_none() || kind == Some(k);
    let mut listed = Vec::new();

    if wants(TypeKind::Metadata) {
        for t in registry.metadata_types() {
            let mut flags = Vec::new();
            if t.is_person {
                flags.push("person");
            }
            if t.is_identifier {
                flags.push("identifier");
            }
            listed.push(TypeSummary {
                kind: TypeKind::Metadata,
                name: t.name.clone(),
                label: t.label(language).to_string(),
                flags,
                entries: Vec::new(),
            });
        }
    }

    if wants(TypeKind::Group) {
        for t in registry.group_types() {
            listed.push(TypeSummary {
                kind: TypeKind::Group,
                name: t.name.clone(),
                label: t.label(language).to_string(),
                flags: Vec::new(),
                entries: t
                    .allowed
                    .iter()
                    .map(|a| format!("{} {}", a.entry.name, a.cardinality))
                    .collect(),
            });
        }
    }

    if wants(TypeKind::DocStruct) {
        for t in registry.doc_struct_types() {
            let entries = t
                .allowed_metadata
                .iter()
                .map(|a| format!("{} {}", a.entry.name, a.cardinality))
                .chain(
                    t.allowed_groups
                        .iter()
                        .map(|a| format!("{} {}", a.entry.name, a.cardinality)),
                )
                .chain(t.allowed_children.iter().map(|c| format!("> {}", c)))
                .collect();
            listed.push(TypeSummary {
                kind: TypeKind::DocStruct,
                name: t.name.clone(),
                label: t.label(language).to_string(),
                flags: if t.top_level { vec!["top level"] } else { Vec::new() },
                entries,
            });
        }
    }

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info("No types declared."));
    }
    Ok(result.with_listed_types(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_registry;

    #[test]
    fn lists_every_kind_in_declaration_order() {
        let result = run(&sample_registry(), None, "en").unwrap();
        let names: Vec<_> = result.listed_types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), 8 + 1 + 4);
        assert_eq!(names[0], "TitleDocMain");
        assert_eq!(names[8], "Publisher");
        assert_eq!(names[9], "Monograph");
        assert!(result.messages.is_empty());
    }

    #[test]
    fn kind_filter_and_labels() {
        let result = run(&sample_registry(), Some(TypeKind::Metadata), "de").unwrap();
        assert!(result
            .listed_types
            .iter()
            .all(|t| t.kind == TypeKind::Metadata));
        let author = result
            .listed_types
            .iter()
            .find(|t| t.name == "Author")
            .unwrap();
        assert_eq!(author.label, "Autor");
        assert_eq!(author.flags, vec!["person"]);
    }

    #[test]
    fn structure_entries_include_children() {
        let result = run(&sample_registry(), Some(TypeKind::DocStruct), "en").unwrap();
        let monograph = &result.listed_types[0];
        assert_eq!(monograph.flags, vec!["top level"]);
        assert!(monograph.entries.contains(&"Author 1..n".to_string()));
        assert!(monograph.entries.contains(&"Publisher 0..1".to_string()));
        assert_eq!(monograph.entries.last().map(String::as_str), Some("> Chapter"));
    }

    #[test]
    fn empty_registry_says_so() {
        let result = run(&TypeRegistry::default(), None, "en").unwrap();
        assert!(result.listed_types.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
