use serde::{Deserialize, Serialize};

pub const DEFAULT_START_MARKER: &str = "# === HOSTGUARD BLOCKLIST START ===";
pub const DEFAULT_END_MARKER: &str = "# === HOSTGUARD BLOCKLIST END ===";

/// Markers written by the earlier blocker releases. Recognised on read and
/// rewritten to the current markers on the next apply.
pub const LEGACY_START_MARKER: &str = "# === ADULT CONTENT BLOCKER START ===";
pub const LEGACY_END_MARKER: &str = "# === ADULT CONTENT BLOCKER END ===";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerPair {
    pub start: String,
    pub end: String,
}

impl MarkerPair {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn legacy_default() -> Self {
        Self::new(LEGACY_START_MARKER, LEGACY_END_MARKER)
    }
}

impl Default for MarkerPair {
    fn default() -> Self {
        Self::new(DEFAULT_START_MARKER, DEFAULT_END_MARKER)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start { legacy: bool },
    End { legacy: bool },
}

/// The current marker pair plus the legacy pairs still recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    pub current: MarkerPair,
    pub legacy: Vec<MarkerPair>,
}

impl MarkerSet {
    pub fn new(current: MarkerPair, legacy: Vec<MarkerPair>) -> Self {
        Self { current, legacy }
    }

    /// Compares the line with trailing whitespace (and any `\r`) removed.
    pub fn classify(&self, line: &str) -> Option<MarkerKind> {
        let line = line.trim_end();
        if line == self.current.start {
            return Some(MarkerKind::Start { legacy: false });
        }
        if line == self.current.end {
            return Some(MarkerKind::End { legacy: false });
        }
        for pair in &self.legacy {
            if line == pair.start {
                return Some(MarkerKind::Start { legacy: true });
            }
            if line == pair.end {
                return Some(MarkerKind::End { legacy: true });
            }
        }
        None
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new(MarkerPair::default(), vec![MarkerPair::legacy_default()])
    }
}
