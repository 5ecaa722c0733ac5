use crate::domain::models::CatalogEntry;
use std::io::{self, Write};

const RULE_HEAVY: &str = "==================================================";
const RULE_LIGHT: &str = "--------------------------------------------------";

/// Full inventory listing with the library banner. Reports an empty
/// result set instead of printing an empty table.
pub fn inventory<W: Write>(out: &mut W, entries: &[&CatalogEntry]) -> io::Result<()> {
    if entries.is_empty() {
        writeln!(out, "Inventory is empty.")?;
        return Ok(());
    }
    writeln!(out, "\n{}", RULE_HEAVY)?;
    writeln!(out, "LIBRARY INVENTORY")?;
    writeln!(out, "{}", RULE_HEAVY)?;
    for e in entries {
        writeln!(out, "{:3}. {}", e.id, e.title)?;
        writeln!(out, "     Authors: {}", e.authors)?;
        writeln!(out, "     Type: {} | Format: {}", e.kind, e.format)?;
        writeln!(out, "     Topic: {}", e.topic)?;
        writeln!(out, "     Publisher: {} ({})", e.publisher, e.year)?;
        if e.is_free_download() {
            writeln!(out, "     You can download this for free!")?;
        }
        writeln!(out, "{}", RULE_LIGHT)?;
    }
    Ok(())
}

/// Compact search-result rows; long author strings are truncated so the
/// rows stay on one line each.
pub fn search_results<W: Write>(
    out: &mut W,
    query: &str,
    entries: &[&CatalogEntry],
) -> io::Result<()> {
    if entries.is_empty() {
        writeln!(out, "No items found matching '{}'", query)?;
        return Ok(());
    }
    writeln!(out, "\nSearch results for '{}':", query)?;
    writeln!(out, "{}", RULE_LIGHT)?;
    for e in entries {
        writeln!(out, "{:3}. {}", e.id, e.title)?;
        writeln!(
            out,
            "     By: {} | Topic: {}",
            truncate(&e.authors, 50),
            e.topic
        )?;
        writeln!(out, "     Type: {} | Format: {}", e.kind, e.format)?;
        writeln!(out, "{}", RULE_LIGHT)?;
    }
    Ok(())
}

/// Single-item detail view.
pub fn detail<W: Write>(out: &mut W, entry: &CatalogEntry, free_download: bool) -> io::Result<()> {
    writeln!(out, "\nAccessing: {}", entry.title)?;
    writeln!(out, "Authors: {}", entry.authors)?;
    writeln!(out, "Type: {} | Format: {}", entry.kind, entry.format)?;
    writeln!(out, "Topic: {}", entry.topic)?;
    writeln!(out, "Publisher: {} ({})", entry.publisher, entry.year)?;
    if let Some(subtitle) = &entry.subtitle {
        writeln!(out, "Subtitle: {}", subtitle)?;
    }
    if free_download {
        writeln!(out, "This item is available as a free download!")?;
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
