//! # Command Layer
//!
//! Each command lives in its own submodule as a plain function over the
//! registry, a document file or the backup validator.
//!
//! Commands:
//! - return a structured [`CmdResult`] (messages, listed types, text, backup reports)
//! - never print, never pick exit codes
//! - report per-item problems (validation issues, failed backups) as
//!   error-level messages and leave the final verdict to the caller via
//!   [`CmdResult::has_errors`]
//!
//! ## Command Modules
//!
//! - [`types`]: list the types of a ruleset
//! - [`check`]: load a document and validate it
//! - [`files`]: dump a document's file set
//! - [`scaffold`]: produce an empty document skeleton for a structure type
//! - [`backup`]: check process backups

use crate::backup::BackupReport;
use crate::prefs::TypeKind;
use serde::Serialize;

pub mod backup;
pub mod check;
pub mod files;
pub mod scaffold;
pub mod types;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One row of `ugh types`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSummary {
    pub kind: TypeKind,
    pub name: String,
    pub label: String,
    /// Short markers such as `person`, `identifier` or `top level`.
    pub flags: Vec<&'static str>,
    /// Allowed entries as `name cardinality`, children as `> name`.
    pub entries: Vec<String>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_types: Vec<TypeSummary>,
    pub backups: Vec<BackupReport>,
    /// Preformatted output (file dumps, scaffolds).
    pub text: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_types(mut self, types: Vec<TypeSummary>) -> Self {
        self.listed_types = types;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }

    pub fn error_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.level == MessageLevel::Error)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_mark_the_result() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("loaded"));
        result.add_message(CmdMessage::warning("odd"));
        assert!(!result.has_errors());

        result.add_message(CmdMessage::error("broken"));
        assert!(result.has_errors());
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn levels_serialize_lowercase() {
        let json = serde_json::to_string(&CmdMessage::success("ok")).unwrap();
        assert_eq!(json, r#"{"level":"success","content":"ok"}"#);
    }
}
