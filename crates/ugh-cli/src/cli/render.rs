//! # Rendering
//!
//! Plain-text rendering of command results. Columns are aligned by display
//! width (`unicode-width`), since type labels are often not ASCII.

use super::styles;
use ugh::backup::BackupReport;
use ugh::commands::{CmdMessage, MessageLevel, TypeSummary};
use ugh::prefs::TypeKind;
use unicode_width::UnicodeWidthStr;

const MAX_NAME_WIDTH: usize = 32;

/// Info and success go to stdout, warnings and errors to stderr.
pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", styles::info().apply_to(&message.content)),
            MessageLevel::Success => println!("{}", styles::success().apply_to(&message.content)),
            MessageLevel::Warning => eprintln!("{}", styles::warning().apply_to(&message.content)),
            MessageLevel::Error => eprintln!("{}", styles::error().apply_to(&message.content)),
        }
    }
}

fn pad_to(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

fn heading(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Metadata => "Metadata types",
        TypeKind::Group => "Metadata group types",
        TypeKind::DocStruct => "Structure types",
    }
}

/// One line per type: name, label (when it differs), flags, then entries
/// indented below.
pub fn format_types(types: &[TypeSummary]) -> String {
    let name_width = types
        .iter()
        .map(|t| t.name.width())
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_WIDTH);

    let mut out = String::new();
    let mut current: Option<TypeKind> = None;
    for summary in types {
        if current != Some(summary.kind) {
            if current.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("{}\n", styles::heading().apply_to(heading(summary.kind))));
            current = Some(summary.kind);
        }

        let mut line = format!(
            "  {}",
            styles::type_name().apply_to(pad_to(&summary.name, name_width))
        );
        if summary.label != summary.name {
            line.push_str(&format!("  {}", summary.label));
        }
        if !summary.flags.is_empty() {
            line.push_str(&format!(
                "  {}",
                styles::flag().apply_to(format!("[{}]", summary.flags.join(", ")))
            ));
        }
        out.push_str(line.trim_end());
        out.push('\n');

        for entry in &summary.entries {
            out.push_str(&format!("      {}\n", entry));
        }
    }
    out
}

pub fn format_backups(reports: &[BackupReport]) -> String {
    let id_width = reports.iter().map(|r| r.id.width()).max().unwrap_or(0);
    let mut out = String::new();
    for report in reports {
        let modified = report
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{}  {:>10} B  {}  {}\n",
            pad_to(&report.id, id_width),
            report.size,
            modified,
            report.path.display()
        ));
    }
    out
}
