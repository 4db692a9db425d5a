//! The document arena.
//!
//! All structural nodes live in one `Vec` owned by the [`DigitalDocument`].
//! A node's `children` list is the owning direction of the tree; `parent` is
//! a plain index kept in sync by [`DigitalDocument::add_child`] and
//! [`DigitalDocument::remove_child`]. Detached nodes stay in the arena so
//! their ids remain valid.

use super::{DocStruct, DocStructId, FileSet};
use crate::capability::HasType;
use crate::error::{Result, UghError};
use crate::prefs::{DocStructType, TypeKind};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct DigitalDocument {
    nodes: Vec<DocStruct>,
    logical_root: Option<DocStructId>,
    physical_root: Option<DocStructId>,
    file_set: FileSet,
}

impl DigitalDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unattached node of the given type.
    pub fn create_doc_struct(&mut self, ds_type: Arc<DocStructType>) -> DocStructId {
        let id = DocStructId(self.nodes.len());
        self.nodes.push(DocStruct::new(id, ds_type));
        id
    }

    pub fn doc_struct(&self, id: DocStructId) -> Result<&DocStruct> {
        self.nodes
            .get(id.0)
            .ok_or(UghError::DocStructNotFound(id.0))
    }

    pub fn doc_struct_mut(&mut self, id: DocStructId) -> Result<&mut DocStruct> {
        self.nodes
            .get_mut(id.0)
            .ok_or(UghError::DocStructNotFound(id.0))
    }

    /// Every node in the arena, attached or not, in creation order.
    pub fn doc_structs(&self) -> impl Iterator<Item = &DocStruct> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn logical_root(&self) -> Option<DocStructId> {
        self.logical_root
    }

    /// A root must be unattached and cannot be the physical root as well.
    pub fn set_logical_root(&mut self, id: DocStructId) -> Result<()> {
        self.check_root_candidate(id, self.physical_root)?;
        self.logical_root = Some(id);
        Ok(())
    }

    pub fn physical_root(&self) -> Option<DocStructId> {
        self.physical_root
    }

    /// A root must be unattached and cannot be the logical root as well.
    pub fn set_physical_root(&mut self, id: DocStructId) -> Result<()> {
        self.check_root_candidate(id, self.logical_root)?;
        self.physical_root = Some(id);
        Ok(())
    }

    fn check_root_candidate(
        &self,
        id: DocStructId,
        other_root: Option<DocStructId>,
    ) -> Result<()> {
        if self.doc_struct(id)?.parent.is_some() || other_root == Some(id) {
            return Err(UghError::AlreadyAttached(id.0));
        }
        Ok(())
    }

    fn is_root(&self, id: DocStructId) -> bool {
        self.logical_root == Some(id) || self.physical_root == Some(id)
    }

    /// Attach `child` as the last child of `parent`.
    pub fn add_child(&mut self, parent: DocStructId, child: DocStructId) -> Result<()> {
        let child_node = self.doc_struct(child)?;
        let parent_node = self.doc_struct(parent)?;

        if child_node.parent.is_some() || self.is_root(child) {
            return Err(UghError::AlreadyAttached(child.0));
        }
        if child == parent || self.ancestors(parent).contains(&child) {
            return Err(UghError::CyclicStructure {
                parent: parent.0,
                child: child.0,
            });
        }
        if !parent_node.doc_struct_type().allows_child(child_node.type_name()) {
            return Err(UghError::TypeNotAllowed {
                kind: TypeKind::DocStruct,
                type_name: child_node.type_name().to_string(),
                parent: parent_node.type_name().to_string(),
            });
        }

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Detach `child` from `parent`. Returns `false` if it was not a child.
    pub fn remove_child(&mut self, parent: DocStructId, child: DocStructId) -> Result<bool> {
        let parent_node = self.doc_struct_mut(parent)?;
        let Some(pos) = parent_node.children.iter().position(|&c| c == child) else {
            return Ok(false);
        };
        parent_node.children.remove(pos);
        self.doc_struct_mut(child)?.parent = None;
        Ok(true)
    }

    pub fn parent(&self, id: DocStructId) -> Result<Option<DocStructId>> {
        Ok(self.doc_struct(id)?.parent)
    }

    pub fn children(&self, id: DocStructId) -> Result<&[DocStructId]> {
        Ok(self.doc_struct(id)?.children())
    }

    /// Ancestors from the direct parent upwards.
    fn ancestors(&self, id: DocStructId) -> Vec<DocStructId> {
        let mut out = Vec::new();
        let mut current = self.nodes.get(id.0).and_then(|n| n.parent);
        while let Some(parent) = current {
            out.push(parent);
            current = self.nodes.get(parent.0).and_then(|n| n.parent);
        }
        out
    }

    /// The subtree rooted at `id` in pre-order, starting with `id` itself.
    pub fn descendants(&self, id: DocStructId) -> Result<Vec<DocStructId>> {
        self.doc_struct(id)?;
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            // Reverse so the first child is visited first.
            stack.extend(self.nodes[current.0].children.iter().rev());
        }
        Ok(out)
    }

    /// Type names from the top of the tree down to `id`.
    ///
    /// A segment gets a 1-based `[n]` suffix when its parent has more than
    /// one child of the same type, e.g. `Monograph/Chapter[2]`.
    pub fn path(&self, id: DocStructId) -> Result<String> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.doc_struct(node_id)?;
            let name = node.type_name();
            let segment = match node.parent {
                Some(parent) => {
                    let same_type: Vec<DocStructId> = self.nodes[parent.0]
                        .children
                        .iter()
                        .copied()
                        .filter(|c| self.nodes[c.0].type_name() == name)
                        .collect();
                    match same_type.iter().position(|&c| c == node_id) {
                        Some(pos) if same_type.len() > 1 => format!("{}[{}]", name, pos + 1),
                        _ => name.to_string(),
                    }
                }
                None => name.to_string(),
            };
            segments.push(segment);
            current = node.parent;
        }
        segments.reverse();
        Ok(segments.join("/"))
    }

    pub fn file_set(&self) -> &FileSet {
        &self.file_set
    }

    pub fn file_set_mut(&mut self) -> &mut FileSet {
        &mut self.file_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_registry;

    struct Fixture {
        doc: DigitalDocument,
        monograph: DocStructId,
        chapters: Vec<DocStructId>,
    }

    fn fixture() -> Fixture {
        let registry = sample_registry();
        let mut doc = DigitalDocument::new();
        let monograph =
            doc.create_doc_struct(registry.resolve_doc_struct_type("Monograph").unwrap());
        doc.set_logical_root(monograph).unwrap();

        let chapter_type = registry.resolve_doc_struct_type("Chapter").unwrap();
        let mut chapters = Vec::new();
        for _ in 0..3 {
            let chapter = doc.create_doc_struct(Arc::clone(&chapter_type));
            doc.add_child(monograph, chapter).unwrap();
            chapters.push(chapter);
        }
        Fixture {
            doc,
            monograph,
            chapters,
        }
    }

    #[test]
    fn add_child_links_both_directions() {
        let f = fixture();
        assert_eq!(f.doc.children(f.monograph).unwrap(), f.chapters.as_slice());
        assert_eq!(f.doc.parent(f.chapters[1]).unwrap(), Some(f.monograph));
        assert_eq!(f.doc.parent(f.monograph).unwrap(), None);
    }

    #[test]
    fn disallowed_child_type_is_refused() {
        let mut f = fixture();
        let page = f
            .doc
            .create_doc_struct(sample_registry().resolve_doc_struct_type("page").unwrap());
        let err = f.doc.add_child(f.monograph, page).unwrap_err();
        assert!(matches!(
            err,
            UghError::TypeNotAllowed { kind: TypeKind::DocStruct, .. }
        ));
        assert_eq!(f.doc.parent(page).unwrap(), None);
    }

    #[test]
    fn attached_child_cannot_be_added_twice() {
        let mut f = fixture();
        let err = f.doc.add_child(f.chapters[0], f.chapters[1]).unwrap_err();
        assert!(matches!(err, UghError::AlreadyAttached(_)));
    }

    #[test]
    fn cycles_are_refused() {
        let mut f = fixture();
        let chapter_type = sample_registry().resolve_doc_struct_type("Chapter").unwrap();
        let sub = f.doc.create_doc_struct(chapter_type);
        f.doc.add_child(f.chapters[0], sub).unwrap();

        assert!(f.doc.remove_child(f.monograph, f.chapters[0]).unwrap());
        let err = f.doc.add_child(sub, f.chapters[0]).unwrap_err();
        assert!(matches!(err, UghError::CyclicStructure { .. }));

        let err = f.doc.add_child(f.chapters[0], f.chapters[0]).unwrap_err();
        assert!(matches!(err, UghError::CyclicStructure { .. }));
    }

    #[test]
    fn root_cannot_become_a_child() {
        let mut f = fixture();
        let err = f.doc.add_child(f.chapters[0], f.monograph).unwrap_err();
        assert!(matches!(err, UghError::AlreadyAttached(_)));
    }

    #[test]
    fn attached_node_cannot_become_a_root() {
        let mut f = fixture();
        let err = f.doc.set_physical_root(f.chapters[0]).unwrap_err();
        assert!(matches!(err, UghError::AlreadyAttached(_)));
        assert_eq!(f.doc.physical_root(), None);

        let err = f.doc.set_logical_root(f.chapters[2]).unwrap_err();
        assert!(matches!(err, UghError::AlreadyAttached(_)));
        assert_eq!(f.doc.logical_root(), Some(f.monograph));
    }

    #[test]
    fn one_node_cannot_root_both_trees() {
        let mut f = fixture();
        let err = f.doc.set_physical_root(f.monograph).unwrap_err();
        assert!(matches!(err, UghError::AlreadyAttached(_)));

        // Re-setting the same root and replacing it are fine.
        f.doc.set_logical_root(f.monograph).unwrap();
        assert!(f.doc.remove_child(f.monograph, f.chapters[0]).unwrap());
        f.doc.set_logical_root(f.chapters[0]).unwrap();
        f.doc.set_physical_root(f.monograph).unwrap();
        assert_eq!(f.doc.physical_root(), Some(f.monograph));
    }

    #[test]
    fn remove_child_detaches_but_keeps_node() {
        let mut f = fixture();
        assert!(f.doc.remove_child(f.monograph, f.chapters[1]).unwrap());
        assert!(!f.doc.remove_child(f.monograph, f.chapters[1]).unwrap());
        assert_eq!(f.doc.children(f.monograph).unwrap().len(), 2);
        assert_eq!(f.doc.parent(f.chapters[1]).unwrap(), None);
        assert_eq!(f.doc.len(), 4);
    }

    #[test]
    fn descendants_are_pre_order() {
        let mut f = fixture();
        let chapter_type = sample_registry().resolve_doc_struct_type("Chapter").unwrap();
        let sub = f.doc.create_doc_struct(chapter_type);
        f.doc.add_child(f.chapters[0], sub).unwrap();

        let order = f.doc.descendants(f.monograph).unwrap();
        assert_eq!(
            order,
            vec![f.monograph, f.chapters[0], sub, f.chapters[1], f.chapters[2]]
        );
    }

    #[test]
    fn path_indexes_repeated_siblings() {
        let mut f = fixture();
        assert_eq!(f.doc.path(f.monograph).unwrap(), "Monograph");
        assert_eq!(f.doc.path(f.chapters[1]).unwrap(), "Monograph/Chapter[2]");

        let chapter_type = sample_registry().resolve_doc_struct_type("Chapter").unwrap();
        let sub = f.doc.create_doc_struct(chapter_type);
        f.doc.add_child(f.chapters[2], sub).unwrap();
        assert_eq!(f.doc.path(sub).unwrap(), "Monograph/Chapter[3]/Chapter");
    }

    #[test]
    fn unknown_ids_are_reported() {
        let doc = DigitalDocument::new();
        let err = doc.doc_struct(DocStructId(5)).unwrap_err();
        assert!(matches!(err, UghError::DocStructNotFound(5)));
        assert!(doc.descendants(DocStructId(0)).is_err());
    }
}
