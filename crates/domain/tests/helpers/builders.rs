#![allow(dead_code)]
use hostguard_domain::markers::{DEFAULT_END_MARKER, DEFAULT_START_MARKER};
use hostguard_domain::MarkerSet;
use std::collections::BTreeSet;

pub const SYSTEM_LINES: &[&str] = &[
    "# Static table lookup for hostnames.",
    "127.0.0.1 localhost",
    "::1 localhost ip6-localhost ip6-loopback",
    "192.168.1.10 nas.lan nas",
];

/// Builds hosts file content line by line.
pub struct HostsBuilder {
    lines: Vec<String>,
    ending: &'static str,
}

impl HostsBuilder {
    pub fn new() -> Self {
        Self {
            lines: vec![],
            ending: "\n",
        }
    }

    pub fn system() -> Self {
        Self::new().lines(SYSTEM_LINES)
    }

    pub fn crlf(mut self) -> Self {
        self.ending = "\r\n";
        self
    }

    pub fn line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn lines(mut self, lines: &[&str]) -> Self {
        self.lines.extend(lines.iter().map(|l| l.to_string()));
        self
    }

    pub fn start_marker(self) -> Self {
        self.line(DEFAULT_START_MARKER)
    }

    pub fn end_marker(self) -> Self {
        self.line(DEFAULT_END_MARKER)
    }

    pub fn block(self, entries: &[&str]) -> Self {
        self.start_marker().lines(entries).end_marker()
    }

    pub fn build(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push_str(self.ending);
        }
        out
    }
}

pub fn markers() -> MarkerSet {
    MarkerSet::default()
}

pub fn domains(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|d| d.to_string()).collect()
}

pub fn addresses(list: &[&str]) -> Vec<String> {
    list.iter().map(|a| a.to_string()).collect()
}

/// Lines strictly between the first start and end markers.
pub fn block_body(content: &str) -> Vec<String> {
    content
        .lines()
        .skip_while(|l| *l != DEFAULT_START_MARKER)
        .skip(1)
        .take_while(|l| *l != DEFAULT_END_MARKER)
        .map(str::to_string)
        .collect()
}

/// Lines outside every managed block.
pub fn outside_lines(content: &str) -> Vec<String> {
    let mut inside = false;
    let mut out = vec![];
    for line in content.lines() {
        if line == DEFAULT_START_MARKER {
            inside = true;
            continue;
        }
        if line == DEFAULT_END_MARKER {
            inside = false;
            continue;
        }
        if !inside {
            out.push(line.to_string());
        }
    }
    out
}
