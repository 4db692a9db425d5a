use crate::prefs::{
    parse_ruleset_str, Cardinality, DocStructTypeDef, FileFormat, Labels, MetadataType,
    TypeRegistry,
};

/// A small monograph ruleset used across tests.
///
/// - `Monograph` (top level): `TitleDocMain` 1, `Author` 1..n,
///   `CatalogIDDigital` 1, `PlaceOfPublication` 0..n, group `Publisher` 0..1;
///   children `Chapter`
/// - `Chapter`: `TitleDocMain` 0..1, `Author` 0..n; children `Chapter`
/// - `BoundBook`: children `page`
/// - `page`: `PageNumber` 1
/// - `Publisher` group: `PublisherName` 1, `PlaceOfPublication` 0..n,
///   `Printer` 0..n
pub fn sample_registry() -> TypeRegistry {
    let mut builder = TypeRegistry::builder();
    for md_type in [
        MetadataType::new("TitleDocMain").with_label("de", "Haupttitel"),
        MetadataType::person("Author").with_label("de", "Autor"),
        MetadataType::new("CatalogIDDigital").identifier(),
        MetadataType::new("PlaceOfPublication"),
        MetadataType::new("PageNumber"),
        MetadataType::new("PublisherName"),
        MetadataType::person("Printer"),
        MetadataType::new("shelfmarksource"),
    ] {
        builder
            .add_metadata_type(md_type)
            .expect("sample metadata type");
    }

    builder
        .add_group_type(
            "Publisher",
            Labels::new(),
            &[
                ("PublisherName", Cardinality::ExactlyOne),
                ("PlaceOfPublication", Cardinality::ZeroOrMore),
                ("Printer", Cardinality::ZeroOrMore),
            ],
        )
        .expect("sample group type");

    for def in [
        DocStructTypeDef::new("Monograph")
            .top_level()
            .metadata("TitleDocMain", Cardinality::ExactlyOne)
            .metadata("Author", Cardinality::OneOrMore)
            .metadata("CatalogIDDigital", Cardinality::ExactlyOne)
            .metadata("PlaceOfPublication", Cardinality::ZeroOrMore)
            .group("Publisher", Cardinality::ZeroOrOne)
            .child("Chapter"),
        DocStructTypeDef::new("Chapter")
            .metadata("TitleDocMain", Cardinality::ZeroOrOne)
            .metadata("Author", Cardinality::ZeroOrMore)
            .child("Chapter"),
        DocStructTypeDef::new("BoundBook").child("page"),
        DocStructTypeDef::new("page").metadata("PageNumber", Cardinality::ExactlyOne),
    ] {
        builder
            .add_doc_struct_type(def)
            .expect("sample structure type");
    }

    builder.build().expect("sample registry")
}

/// The same ruleset as [`sample_registry`], in the YAML file format.
pub const SAMPLE_RULESET_YAML: &str = r#"
metadata_types:
  - name: TitleDocMain
    labels: { de: Haupttitel }
  - name: Author
    person: true
    labels: { de: Autor }
  - name: CatalogIDDigital
    identifier: true
  - name: PlaceOfPublication
  - name: PageNumber
  - name: PublisherName
  - name: Printer
    person: true
  - name: shelfmarksource
group_types:
  - name: Publisher
    metadata:
      - { type: PublisherName, num: "1" }
      - { type: PlaceOfPublication, num: "0..n" }
      - { type: Printer, num: "0..n" }
doc_struct_types:
  - name: Monograph
    top_level: true
    metadata:
      - { type: TitleDocMain, num: "1m" }
      - { type: Author, num: "+" }
      - { type: CatalogIDDigital, num: "1" }
      - { type: PlaceOfPublication, num: "*" }
    groups:
      - { type: Publisher, num: "1o" }
    children: [Chapter]
  - name: Chapter
    metadata:
      - { type: TitleDocMain, num: "0..1" }
      - { type: Author, num: "0..n" }
    children: [Chapter]
  - name: BoundBook
    children: [page]
  - name: page
    metadata:
      - { type: PageNumber, num: "1" }
"#;

pub fn sample_registry_from_yaml() -> TypeRegistry {
    parse_ruleset_str(SAMPLE_RULESET_YAML, FileFormat::Yaml).expect("sample ruleset loads")
}
