//! Anchor primitives for splicing text into a document.
//!
//! Every stage edits the page through these helpers rather than through
//! ad-hoc string surgery. Anchors are located explicitly: a literal anchor
//! that can occur more than once must say which occurrence it means.

use std::fmt;
use std::ops::Range;

use regex::{Regex, RegexBuilder};

/// Which occurrence of a literal anchor an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    First,
    Last,
    /// The anchor must occur exactly once; several matches is a miss.
    Only,
}

/// Why an anchor could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorMiss {
    Absent(String),
    Ambiguous { anchor: String, count: usize },
}

impl fmt::Display for AnchorMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorMiss::Absent(anchor) => write!(f, "anchor `{anchor}` not found"),
            AnchorMiss::Ambiguous { anchor, count } => {
                write!(f, "anchor `{anchor}` occurs {count} times")
            }
        }
    }
}

/// Byte offset where the chosen occurrence of `anchor` starts.
pub fn locate(text: &str, anchor: &str, occurrence: Occurrence) -> Result<usize, AnchorMiss> {
    let found = match occurrence {
        Occurrence::First => text.find(anchor),
        Occurrence::Last => text.rfind(anchor),
        Occurrence::Only => {
            let count = text.matches(anchor).count();
            if count > 1 {
                return Err(AnchorMiss::Ambiguous {
                    anchor: anchor.to_string(),
                    count,
                });
            }
            text.find(anchor)
        }
    };
    found.ok_or_else(|| AnchorMiss::Absent(anchor.to_string()))
}

/// Insert `fragment` immediately before the chosen occurrence of `anchor`.
pub fn insert_before(
    text: &str,
    anchor: &str,
    occurrence: Occurrence,
    fragment: &str,
) -> Result<String, AnchorMiss> {
    let at = locate(text, anchor, occurrence)?;
    Ok(splice(text, at..at, fragment))
}

/// Insert `fragment` right after the first match of `pattern`.
pub fn insert_after_match(text: &str, pattern: &Regex, fragment: &str) -> Option<String> {
    let m = pattern.find(text)?;
    Some(splice(text, m.end()..m.end(), fragment))
}

/// Insert `fragment` right before the first match of `pattern`.
pub fn insert_before_match(text: &str, pattern: &Regex, fragment: &str) -> Option<String> {
    let m = pattern.find(text)?;
    Some(splice(text, m.start()..m.start(), fragment))
}

/// Find a block that opens at the earliest of `starts` and runs up to (not
/// including) the earliest of `ends` after it, or to the end of `text` when
/// no end marker follows.
pub fn find_block(text: &str, starts: &[&str], ends: &[&str]) -> Option<Range<usize>> {
    let start = starts.iter().filter_map(|s| text.find(s)).min()?;
    let end = ends
        .iter()
        .filter_map(|e| text[start..].find(e).map(|i| start + i))
        .min()
        .unwrap_or(text.len());
    Some(start..end)
}

/// Replace `range` of `text` with `replacement`.
pub fn splice(text: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() - range.len() + replacement.len());
    out.push_str(&text[..range.start]);
    out.push_str(replacement);
    out.push_str(&text[range.end..]);
    out
}

/// Build a regex matching `literal` with every run of whitespace relaxed to
/// `\s+`, so reflowed markup still matches.
pub fn loose_literal(literal: &str, case_insensitive: bool) -> Result<Regex, regex::Error> {
    let pattern = literal
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    RegexBuilder::new(&pattern)
        .case_insensitive(case_insensitive)
        .build()
}
