//! Text presentation for shell command output

use crate::index::IndexStats;
use crate::namespace::{EntryInfo, EntryKind, Visit};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{CellAlignment, Table};
use owo_colors::OwoColorize;

fn directory_name(name: &str, color: bool) -> String {
    let label = format!("{}/", name);
    if color {
        format!("{}", label.blue().bold())
    } else {
        label
    }
}

fn display_name(name: &str, kind: EntryKind, color: bool) -> String {
    match kind {
        EntryKind::Directory => directory_name(name, color),
        EntryKind::File => name.to_string(),
    }
}

/// `ls`: names on one line, directories suffixed with `/`.
pub fn format_listing(entries: &[EntryInfo], color: bool) -> String {
    entries
        .iter()
        .map(|e| display_name(&e.name, e.kind, color))
        .collect::<Vec<_>>()
        .join("  ")
}

/// `ls -l`: one table row per entry.
pub fn format_long_listing(entries: &[EntryInfo], color: bool) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Mode", "Size", "Hash", "Name"]);
    for entry in entries {
        let kind_flag = match entry.kind {
            EntryKind::Directory => 'd',
            EntryKind::File => '-',
        };
        table.add_row(vec![
            format!("{}{}", kind_flag, entry.permissions),
            entry.size.to_string(),
            entry.hash.to_string(),
            display_name(&entry.name, entry.kind, color),
        ]);
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table.to_string()
}

/// `tree`: the root label followed by one connector line per visit.
pub fn format_tree(root_label: &str, visits: &[Visit], color: bool) -> String {
    let mut lines = vec![root_label.to_string()];
    for visit in visits {
        let mut line: String = visit
            .ancestors_last
            .iter()
            .map(|&last| if last { "    " } else { "│   " })
            .collect();
        line.push_str(if visit.is_last { "└── " } else { "├── " });
        line.push_str(&display_name(
            visit.entry.name(),
            visit.entry.kind(),
            color,
        ));
        line.push_str(&format!(
            " [{}] {{hash:{}}}",
            visit.entry.permissions(),
            visit.entry.name_hash()
        ));
        lines.push(line);
    }
    lines.join("\n")
}

/// `stats`: index diagnostics for one directory.
pub fn format_stats(path: &str, stats: &IndexStats) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Directory", path]);
    table.add_row(vec!["Entries".to_string(), stats.size.to_string()]);
    table.add_row(vec!["Height".to_string(), stats.height.to_string()]);
    table.add_row(vec!["Minimum height".to_string(), stats.min_height.to_string()]);
    table.add_row(vec![
        "Height bound".to_string(),
        format!("{:.2}", stats.height_bound),
    ]);
    table.add_row(vec![
        "Balance".to_string(),
        if stats.balanced { "OK" } else { "Warning" }.to_string(),
    ]);
    table.to_string()
}
