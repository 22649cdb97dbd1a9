use crate::block_entry::BlockEntry;
use serde::Serialize;
use std::collections::BTreeSet;

/// Inclusive line range `[start, end]` (0-based) covering a marker pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockLine {
    Entry { entry: BlockEntry, raw: String },
    Comment { raw: String },
    Blank,
    NonConforming { line: usize, raw: String },
}

impl BlockLine {
    /// Classifies one line found between the markers. `line` is the 1-based
    /// line number in the hosts file, kept for diagnostics.
    pub fn classify(line: usize, raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return BlockLine::Blank;
        }
        if trimmed.starts_with('#') {
            return BlockLine::Comment {
                raw: trimmed.to_string(),
            };
        }
        match BlockEntry::parse_line(trimmed) {
            Some(entry) => BlockLine::Entry {
                entry,
                raw: trimmed.to_string(),
            },
            None => BlockLine::NonConforming {
                line,
                raw: raw.to_string(),
            },
        }
    }
}

/// The marker-delimited region owned by this tool, as found in a hosts file.
///
/// Normally there is exactly one span. Several spans mean the markers were
/// duplicated by an external edit; their lines are merged here in file order
/// and `apply` collapses them back into one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagedBlock {
    pub start_marker: String,
    pub end_marker: String,
    pub spans: Vec<LineSpan>,
    pub lines: Vec<BlockLine>,
    pub legacy_markers: bool,
}

impl ManagedBlock {
    pub fn entries(&self) -> impl Iterator<Item = &BlockEntry> {
        self.lines.iter().filter_map(|l| match l {
            BlockLine::Entry { entry, .. } => Some(entry),
            _ => None,
        })
    }

    pub fn entry_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                BlockLine::Entry { raw, .. } => Some(raw.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn non_conforming(&self) -> Vec<(usize, &str)> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                BlockLine::NonConforming { line, raw } => Some((*line, raw.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn entry_count(&self) -> usize {
        self.entries().count()
    }

    pub fn domains(&self) -> BTreeSet<String> {
        self.entries().map(|e| e.domain.to_string()).collect()
    }

    pub fn is_duplicated(&self) -> bool {
        self.spans.len() > 1
    }
}
