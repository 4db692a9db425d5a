use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::exchange::load_document;
use crate::prefs::TypeRegistry;
use crate::validation::validate_document;
use std::path::Path;

/// Load a document and validate it against the registry.
///
/// Load failures (unknown types, exceeded maximums, bad syntax) are errors;
/// validation issues come back as one error message each.
pub fn run(registry: &TypeRegistry, path: &Path) -> Result<CmdResult> {
    let doc = load_document(registry, path)?;
    let mut result = CmdResult::default();

    match validate_document(&doc) {
        Ok(()) => result.add_message(CmdMessage::success(format!(
            "{} is valid ({} structure(s), {} file(s)).",
            path.display(),
            doc.len(),
            doc.file_set().files().len()
        ))),
        Err(err) => {
            for issue in err.issues {
                result.add_message(CmdMessage::error(issue.to_string()));
            }
        }
    }

    Ok(result)
}
