use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::exchange;
use crate::prefs::{FileFormat, TypeRegistry};

/// Serialize an empty document of `type_name` with its required entries.
pub fn run(registry: &TypeRegistry, type_name: &str, format: FileFormat) -> Result<CmdResult> {
    let doc = exchange::scaffold(registry, type_name)?;
    let text = exchange::export(&doc)?.to_string(format)?;

    let mut result = CmdResult::default().with_text(text);
    let root_type = registry.resolve_doc_struct_type(type_name)?;
    if !root_type.top_level {
        result.add_message(CmdMessage::warning(format!(
            "'{}' is not a top-level type; scaffolded as a physical structure.",
            type_name
        )));
    }
    Ok(result)
}
