//! CLI output formatting

use crate::render::IdAllocator;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");

/// Format the identifier table of one diagram
pub fn format_id_table(index: usize, ids: &IdAllocator) -> String {
    let mut out = format!(
        "{} Identifiers for diagram {} ({} allocated)",
        INFO,
        style(index + 1).bold(),
        style(ids.len()).cyan()
    );
    for (key, id) in ids.entries() {
        out.push_str(&format!("\n  {}  {}", style(format!("{:<5}", id)).cyan(), style(key).dim()));
    }
    out
}

/// Format a fatal error and its causes
pub fn format_error(error: &anyhow::Error) -> String {
    let mut out = format!("{} {}", CROSS, style(error).red());
    for cause in error.chain().skip(1) {
        out.push_str(&format!("\n  {} {}", style("caused by:").dim(), cause));
    }
    out
}
