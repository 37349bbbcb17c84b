//! Shared step-record vocabulary.
//!
//! Every generator embeds these plain-data records in its steps. They
//! carry no behavior: a step is a snapshot, and the collections here
//! (match lists, histories) are cumulative copies so that rendering one
//! step never requires having rendered another.

use crate::automaton::NodeId;

/// A bilingual human-readable description attached to every step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Desc {
    /// English description
    pub en: String,
    /// Chinese description
    pub zh: String,
}

impl Desc {
    /// Create a description from an English and a Chinese text.
    pub fn new(en: impl Into<String>, zh: impl Into<String>) -> Self {
        Desc {
            en: en.into(),
            zh: zh.into(),
        }
    }
}

/// An occurrence of a single-pattern match in the text.
///
/// Both bounds are inclusive character indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct MatchSpan {
    /// Index of the first matched character
    pub start: usize,
    /// Index of the last matched character
    pub end: usize,
}

/// One recorded character comparison (naive search history).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Comparison {
    /// Window start in the text
    pub i: usize,
    /// Offset inside the pattern
    pub j: usize,
    /// Text character at `i + j`
    pub text_char: char,
    /// Pattern character at `j`
    pub pattern_char: char,
    /// Whether the two characters were equal
    pub matched: bool,
}

/// Why a KMP jump happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "serialization", serde(rename_all = "snake_case"))]
pub enum JumpReason {
    /// The full pattern was consumed; jump to keep searching for
    /// overlapping occurrences.
    Match,
    /// A mismatch with `j > 0`; fall back through the LPS table.
    Mismatch,
}

/// One recorded KMP pattern-index jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Jump {
    /// Pattern index before the jump
    pub from: usize,
    /// Pattern index after the jump
    pub to: usize,
    /// What triggered the jump
    pub reason: JumpReason,
    /// Text position at the time of a mismatch jump. The position does
    /// not advance on such a jump; match jumps carry `None`.
    pub position: Option<usize>,
}

/// One recorded Rabin-Karp window hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct HashWindow {
    /// Window start in the text
    pub i: usize,
    /// Hash of the window
    pub hash: u64,
}

/// A match reported by the Aho-Corasick search, with provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct PatternMatch {
    /// The pattern that matched
    pub pattern: String,
    /// Index of the first matched character (inclusive)
    pub start: usize,
    /// Index of the last matched character (inclusive)
    pub end: usize,
    /// Index of the `match` step that reported this occurrence
    pub step_index: usize,
    /// Text index being read when the match fired
    pub char_index: usize,
    /// Automaton state whose output set produced the match
    pub state: NodeId,
}
