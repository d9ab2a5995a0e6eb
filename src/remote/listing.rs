//! Parsing of raw `LIST` responses into file entries.
//!
//! Servers answer in the Unix `ls -l` shape: permissions, link count, owner,
//! group, size, three date/time fields, then the name to end of line. The
//! format varies enough across servers that a line which does not fit is kept
//! as a size-0 file named by the whole line rather than failing the listing.

use crate::types::{self, FileEntry};

/// Parse one listing line
pub fn parse_line(line: &str) -> FileEntry {
    parse_structured(line).unwrap_or_else(|| FileEntry::File {
        name: line.to_string(),
        size: 0,
    })
}

/// Parse a whole LIST response into sorted entries; FTP servers terminate
/// lines with CRLF, so carriage returns are stripped before parsing
pub fn parse_listing(raw: &str) -> Vec<FileEntry> {
    let mut entries: Vec<FileEntry> = raw
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect();
    types::sort_entries(&mut entries);
    entries
}

fn parse_structured(line: &str) -> Option<FileEntry> {
    let mut rest = line;
    let mut fields = [""; 8];
    for field in &mut fields {
        let (value, tail) = next_field(rest)?;
        *field = value;
        rest = tail;
    }
    // The name keeps its internal whitespace ("My File.txt", symlink arrows)
    let name = rest.trim_start();
    if name.is_empty() {
        return None;
    }

    let [permissions, links, _owner, _group, size, _month, _day, _time] = fields;
    if !permissions.starts_with(['d', 'l', '-', 'b', 'c', 'p', 's']) {
        return None;
    }
    if links.parse::<u32>().is_err() {
        return None;
    }
    let size = size.parse::<u64>().ok()?;

    if permissions.starts_with('d') {
        Some(FileEntry::Directory {
            name: name.to_string(),
        })
    } else {
        Some(FileEntry::File {
            name: name.to_string(),
            size,
        })
    }
}

/// Split one whitespace-run-separated field off the front of the line
fn next_field(rest: &str) -> Option<(&str, &str)> {
    let rest = rest.trim_start();
    if rest.is_empty() {
        return None;
    }
    match rest.find(char::is_whitespace) {
        Some(end) => Some((&rest[..end], &rest[end..])),
        None => Some((rest, "")),
    }
}
