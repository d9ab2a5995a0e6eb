//! Listing presentation: aligned Type/Name/Size table with human sizes.

use crossterm::style::Stylize;

use crate::types::FileEntry;

const TYPE_WIDTH: usize = 6;
const NAME_WIDTH: usize = 40;
const SIZE_WIDTH: usize = 15;

/// Render a size in 1024 steps (B, KB, MB, GB, TB): plain bytes get no
/// decimal place, everything above gets one
pub fn human_size(size: u64) -> String {
    if size == 0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", size, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Render one listing as an aligned table. Directory rows are blue and sizes
/// cyan; the styling wraps already-padded cells so alignment is unaffected.
/// A directory's size is not computed and shows as a placeholder.
pub fn render_listing(title: &str, entries: &[FileEntry]) -> String {
    let rule = "-".repeat(TYPE_WIDTH + NAME_WIDTH + SIZE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("--- {} ---\n", title));
    out.push_str(&format!(
        "{:<tw$}{:<nw$}{:>sw$}\n",
        "Type",
        "Name",
        "Size",
        tw = TYPE_WIDTH,
        nw = NAME_WIDTH,
        sw = SIZE_WIDTH
    ));
    out.push_str(&rule);
    out.push('\n');

    for entry in entries {
        match entry {
            FileEntry::Directory { name } => {
                let cells = format!("{:<tw$}{:<nw$}", "DIR", name, tw = TYPE_WIDTH, nw = NAME_WIDTH);
                out.push_str(&format!(
                    "{}{:>sw$}\n",
                    cells.blue(),
                    "\u{2014}",
                    sw = SIZE_WIDTH
                ));
            }
            FileEntry::File { name, size } => {
                out.push_str(&format!(
                    "{:<tw$}{:<nw$}",
                    "FILE",
                    name,
                    tw = TYPE_WIDTH,
                    nw = NAME_WIDTH
                ));
                let size_cell = format!("{:>sw$}", human_size(*size), sw = SIZE_WIDTH);
                out.push_str(&format!("{}\n", size_cell.cyan()));
            }
        }
    }

    out.push_str(&rule);
    out
}
