use crate::commands::CmdResult;
use crate::error::Result;
use crate::exchange::load_document;
use crate::prefs::TypeRegistry;
use std::path::Path;

/// Dump the file set of a document.
pub fn run(registry: &TypeRegistry, path: &Path) -> Result<CmdResult> {
    let doc = load_document(registry, path)?;
    Ok(CmdResult::default().with_text(doc.file_set().describe()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_registry;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn dumps_files_and_groups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.yaml");
        fs::write(
            &path,
            "files:\n  - { identifier: FILE_0001, location: a.tif, mimetype: image/tiff }\n",
        )
        .unwrap();

        let text = run(&sample_registry(), &path).unwrap().text.unwrap();
        assert!(text.contains("ContentFile (FILE_0001): 'a.tif' (image/tiff)"));
        assert!(text.contains("NONE"));
    }
}
