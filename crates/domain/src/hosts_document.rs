//! In-memory view of a hosts file and the marker scan-and-splice algorithm
//! that keeps the managed block in sync.
//!
//! Every line remembers its own terminator so that lines outside the managed
//! block are written back byte for byte, whatever mix of line endings the
//! file already had. Lines produced by this tool use the file's dominant
//! line ending.

use crate::block_entry::BlockEntry;
use crate::errors::{DomainError, MarkerLine};
use crate::managed_block::{BlockLine, LineSpan, ManagedBlock};
use crate::markers::{MarkerKind, MarkerSet};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::net::IpAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    pub fn platform_default() -> Self {
        if cfg!(windows) {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    /// The more frequent terminator in `content`; CRLF wins a tie.
    pub fn detect(content: &str) -> Self {
        let total = content.matches('\n').count();
        if total == 0 {
            return Self::platform_default();
        }
        let crlf = content.matches("\r\n").count();
        if crlf * 2 >= total {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    text: String,
    ending: Option<LineEnding>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsDocument {
    lines: Vec<Line>,
    line_ending: LineEnding,
}

impl HostsDocument {
    pub fn parse(content: &str) -> Self {
        let lines = content
            .split_inclusive('\n')
            .map(|raw| {
                if let Some(text) = raw.strip_suffix("\r\n") {
                    Line {
                        text: text.to_string(),
                        ending: Some(LineEnding::CrLf),
                    }
                } else if let Some(text) = raw.strip_suffix('\n') {
                    Line {
                        text: text.to_string(),
                        ending: Some(LineEnding::Lf),
                    }
                } else {
                    Line {
                        text: raw.to_string(),
                        ending: None,
                    }
                }
            })
            .collect();

        Self {
            lines,
            line_ending: LineEnding::detect(content),
        }
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.text.len() + 2).sum());
        for line in &self.lines {
            out.push_str(&line.text);
            if let Some(ending) = line.ending {
                out.push_str(ending.as_str());
            }
        }
        out
    }

    /// Scans for marker pairs.
    ///
    /// Returns `Ok(None)` when no marker is present, the merged block when
    /// one or more well-formed pairs exist, and `Corruption` when markers
    /// are unbalanced or interleaved.
    pub fn locate_block(
        &self,
        markers: &MarkerSet,
        path: &str,
    ) -> Result<Option<ManagedBlock>, DomainError> {
        let mut spans = Vec::new();
        let mut seen = Vec::new();
        let mut open: Option<usize> = None;
        let mut legacy = false;
        let mut problem: Option<&'static str> = None;

        for (idx, line) in self.lines.iter().enumerate() {
            let Some(kind) = markers.classify(&line.text) else {
                continue;
            };
            seen.push(MarkerLine {
                line: idx + 1,
                content: line.text.clone(),
            });
            match kind {
                MarkerKind::Start { legacy: l } => {
                    if open.is_some() {
                        problem.get_or_insert("start marker found inside an open block");
                    }
                    open = Some(idx);
                    legacy |= l;
                }
                MarkerKind::End { legacy: l } => match open.take() {
                    Some(start) => {
                        spans.push(LineSpan { start, end: idx });
                        legacy |= l;
                    }
                    None => {
                        problem.get_or_insert("end marker without a matching start marker");
                    }
                },
            }
        }

        if open.is_some() {
            problem.get_or_insert("start marker without a matching end marker");
        }

        if let Some(reason) = problem {
            return Err(DomainError::Corruption {
                path: path.to_string(),
                reason: reason.to_string(),
                markers: seen,
            });
        }

        let Some(first) = spans.first().copied() else {
            return Ok(None);
        };

        let mut lines = Vec::new();
        for span in &spans {
            for idx in span.start + 1..span.end {
                lines.push(BlockLine::classify(idx + 1, &self.lines[idx].text));
            }
        }

        Ok(Some(ManagedBlock {
            start_marker: self.lines[first.start].text.trim_end().to_string(),
            end_marker: self.lines[first.end].text.trim_end().to_string(),
            spans,
            lines,
            legacy_markers: legacy,
        }))
    }

    /// Replaces the first span of `existing` with `block_lines` and drops the
    /// other spans. Without an existing block, appends at end-of-file after
    /// one inserted blank separator line, which `remove_block` takes away
    /// again.
    pub fn splice_block(&mut self, existing: Option<&ManagedBlock>, block_lines: Vec<String>) {
        let ending = Some(self.line_ending);
        let new_lines: Vec<Line> = block_lines
            .into_iter()
            .map(|text| Line { text, ending })
            .collect();

        match existing {
            Some(block) if !block.spans.is_empty() => {
                let first = block.spans[0];
                for span in block.spans.iter().skip(1).rev() {
                    self.lines.drain(span.start..=span.end);
                }
                self.lines.splice(first.start..=first.end, new_lines);
            }
            _ => {
                if let Some(last) = self.lines.last_mut() {
                    if last.ending.is_none() {
                        last.ending = ending;
                    }
                    self.lines.push(Line {
                        text: String::new(),
                        ending,
                    });
                }
                self.lines.extend(new_lines);
            }
        }
    }

    /// Removes every span of `block`. A blank separator directly before a
    /// block that sits at end-of-file goes with it.
    pub fn remove_block(&mut self, block: &ManagedBlock) {
        for span in block.spans.iter().rev() {
            let at_tail = span.end + 1 == self.lines.len();
            self.lines.drain(span.start..=span.end);
            if at_tail
                && span.start > 0
                && self.lines[span.start - 1].text.trim().is_empty()
            {
                self.lines.pop();
            }
        }
    }
}

/// Validates the request and expands it into the ordered entry list:
/// domains sorted lexicographically, and for each domain one entry per
/// address in the configured order.
pub fn build_entries(
    domains: &BTreeSet<String>,
    addresses: &[String],
) -> Result<Vec<BlockEntry>, DomainError> {
    let mut invalid = Vec::new();

    let mut ips: Vec<IpAddr> = Vec::with_capacity(addresses.len());
    for address in addresses {
        match BlockEntry::validate_address(address) {
            Ok(ip) if ips.contains(&ip) => invalid.push(format!("{} (duplicate address)", address)),
            Ok(ip) => ips.push(ip),
            Err(e) => invalid.push(e),
        }
    }
    if ips.is_empty() && !domains.is_empty() && invalid.is_empty() {
        return Err(DomainError::Validation {
            reason: "at least one address mapping is required".to_string(),
            invalid: vec![],
        });
    }

    for domain in domains {
        if let Err(e) = BlockEntry::validate_domain(domain) {
            invalid.push(format!("'{}': {}", domain, e));
        }
    }

    if !invalid.is_empty() {
        return Err(DomainError::Validation {
            reason: format!("{} invalid value(s) in request", invalid.len()),
            invalid,
        });
    }

    Ok(domains
        .iter()
        .flat_map(|domain| {
            let domain: std::sync::Arc<str> = domain.as_str().into();
            ips.iter()
                .map(move |ip| BlockEntry::new(*ip, domain.clone()))
        })
        .collect())
}

pub fn header_line(entry_count: usize, generated_at: DateTime<Utc>) -> String {
    format!(
        "# Managed by hostguard - {} entries - generated {}",
        entry_count,
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

pub fn render_block(
    markers: &MarkerSet,
    entries: &[BlockEntry],
    generated_at: DateTime<Utc>,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(entries.len() + 3);
    lines.push(markers.current.start.clone());
    lines.push(header_line(entries.len(), generated_at));
    lines.extend(entries.iter().map(ToString::to_string));
    lines.push(markers.current.end.clone());
    lines
}

/// Outcome of planning a block rewrite. `content` is `None` when the file
/// already holds the desired block and nothing must be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockUpdate {
    pub content: Option<String>,
    pub entries_added: usize,
    pub entries_removed: usize,
    pub final_entry_count: usize,
    pub repaired_duplicates: bool,
    pub migrated_legacy_markers: bool,
}

fn entry_diff(old: &[BlockEntry], new: &[BlockEntry]) -> (usize, usize) {
    let old: HashSet<&BlockEntry> = old.iter().collect();
    let new: HashSet<&BlockEntry> = new.iter().collect();
    (new.difference(&old).count(), old.difference(&new).count())
}

pub fn plan_block_update(
    content: &str,
    path: &str,
    markers: &MarkerSet,
    entries: &[BlockEntry],
    generated_at: DateTime<Utc>,
) -> Result<BlockUpdate, DomainError> {
    let mut doc = HostsDocument::parse(content);
    let existing = doc.locate_block(markers, path)?;

    let old_entries: Vec<BlockEntry> = existing
        .as_ref()
        .map(|b| b.entries().cloned().collect())
        .unwrap_or_default();
    let (entries_added, entries_removed) = entry_diff(&old_entries, entries);

    let repaired_duplicates = existing.as_ref().is_some_and(|b| b.is_duplicated());
    let migrated_legacy_markers = existing.as_ref().is_some_and(|b| b.legacy_markers);

    let rendered: Vec<String> = entries.iter().map(ToString::to_string).collect();
    let unchanged = existing.as_ref().is_some_and(|b| {
        !b.is_duplicated()
            && !b.legacy_markers
            && b.non_conforming().is_empty()
            && b.entry_lines()
                .into_iter()
                .eq(rendered.iter().map(String::as_str))
    });

    if unchanged {
        return Ok(BlockUpdate {
            content: None,
            entries_added: 0,
            entries_removed: 0,
            final_entry_count: entries.len(),
            repaired_duplicates: false,
            migrated_legacy_markers: false,
        });
    }

    doc.splice_block(existing.as_ref(), render_block(markers, entries, generated_at));

    Ok(BlockUpdate {
        content: Some(doc.render()),
        entries_added,
        entries_removed,
        final_entry_count: entries.len(),
        repaired_duplicates,
        migrated_legacy_markers,
    })
}

pub fn plan_block_removal(
    content: &str,
    path: &str,
    markers: &MarkerSet,
) -> Result<BlockUpdate, DomainError> {
    let mut doc = HostsDocument::parse(content);
    let Some(existing) = doc.locate_block(markers, path)? else {
        return Ok(BlockUpdate {
            content: None,
            entries_added: 0,
            entries_removed: 0,
            final_entry_count: 0,
            repaired_duplicates: false,
            migrated_legacy_markers: false,
        });
    };

    doc.remove_block(&existing);

    Ok(BlockUpdate {
        content: Some(doc.render()),
        entries_added: 0,
        entries_removed: existing.entry_count(),
        final_entry_count: 0,
        repaired_duplicates: existing.is_duplicated(),
        migrated_legacy_markers: false,
    })
}
