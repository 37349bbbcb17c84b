//! Knuth-Morris-Pratt trace generator.
//!
//! KMP never re-examines a matched text character. The trick is the
//! next table (LPS: longest proper prefix that is also a suffix),
//! computed once per pattern: on a mismatch the pattern index falls
//! back through the table instead of the text index rewinding.

use std::sync::Arc;

use crate::step::{Desc, Jump, JumpReason, MatchSpan};

/// What a single KMP step represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "serialization", serde(rename_all = "snake_case"))]
pub enum KmpStepKind {
    /// The next table was computed and the pointers reset.
    Init,
    /// One character comparison at `(i, j)`.
    Compare {
        /// Whether the compared characters were equal
        matched: bool,
    },
    /// The full pattern was consumed.
    Match,
    /// The pattern index fell back through the next table.
    Jump {
        /// Pattern index before the jump
        from: usize,
        /// Pattern index after the jump
        to: usize,
        /// What triggered the jump
        reason: JumpReason,
    },
    /// Mismatch at `j == 0`: only the text index advances.
    Shift,
}

impl KmpStepKind {
    /// Short lowercase tag for display.
    pub fn label(&self) -> &'static str {
        match self {
            KmpStepKind::Init => "init",
            KmpStepKind::Compare { .. } => "compare",
            KmpStepKind::Match => "match",
            KmpStepKind::Jump { .. } => "jump",
            KmpStepKind::Shift => "shift",
        }
    }
}

/// One step of a KMP run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct KmpStep {
    /// What happened at this step
    pub kind: KmpStepKind,
    /// Text index
    pub i: usize,
    /// Pattern index
    pub j: usize,
    /// The next (LPS) table, shared across all steps of the run
    pub next_table: Arc<Vec<usize>>,
    /// Comparisons performed so far, this step included
    pub comparisons: usize,
    /// Matches found so far
    pub matches: Vec<MatchSpan>,
    /// Every jump taken so far
    pub jump_history: Vec<Jump>,
    /// Human-readable description
    pub desc: Desc,
}

/// Compute the next (LPS) table for a pattern.
///
/// `lps[k]` is the length of the longest proper prefix of
/// `pattern[..=k]` that is also a suffix of it. Two-pointer linear
/// scan; the table is immutable once built.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(build_lps("aabaabaaa"), vec![0, 1, 0, 1, 2, 3, 4, 5, 2]);
/// ```
pub fn build_lps(pattern: &str) -> Vec<usize> {
    let pattern: Vec<char> = pattern.chars().collect();
    let m = pattern.len();
    let mut lps = vec![0usize; m];
    let mut len = 0usize;
    let mut i = 1usize;

    while i < m {
        if pattern[i] == pattern[len] {
            len += 1;
            lps[i] = len;
            i += 1;
        } else if len != 0 {
            len = lps[len - 1];
        } else {
            lps[i] = 0;
            i += 1;
        }
    }
    lps
}

/// Generate the full KMP trace for `pattern` over `text`.
///
/// An empty pattern yields an empty trace. Otherwise the trace opens
/// with an `init` step carrying the next table, even when the pattern
/// is longer than the text.
pub fn generate_kmp_steps(text: &str, pattern: &str) -> Vec<KmpStep> {
    let text_chars: Vec<char> = text.chars().collect();
    let pattern_chars: Vec<char> = pattern.chars().collect();
    let n = text_chars.len();
    let m = pattern_chars.len();

    let mut steps = Vec::new();
    if m == 0 {
        return steps;
    }

    let lps = Arc::new(build_lps(pattern));

    let mut i = 0usize;
    let mut j = 0usize;
    let mut comparisons = 0usize;
    let mut matches: Vec<MatchSpan> = Vec::new();
    let mut jump_history: Vec<Jump> = Vec::new();

    steps.push(KmpStep {
        kind: KmpStepKind::Init,
        i,
        j,
        next_table: Arc::clone(&lps),
        comparisons: 0,
        matches: Vec::new(),
        jump_history: Vec::new(),
        desc: Desc::new(
            "Initialize KMP. Calculate Next (LPS) table.",
            "初始化 KMP。计算 Next (最长公共前缀后缀) 表。",
        ),
    });

    while i < n {
        comparisons += 1;
        let matched = text_chars[i] == pattern_chars[j];
        steps.push(KmpStep {
            kind: KmpStepKind::Compare { matched },
            i,
            j,
            next_table: Arc::clone(&lps),
            comparisons,
            matches: matches.clone(),
            jump_history: jump_history.clone(),
            desc: Desc::new(
                format!(
                    "Compare T[{i}] ('{}') with P[{j}] ('{}').",
                    text_chars[i], pattern_chars[j]
                ),
                format!(
                    "比较 T[{i}] ('{}') 和 P[{j}] ('{}')。",
                    text_chars[i], pattern_chars[j]
                ),
            ),
        });

        if matched {
            i += 1;
            j += 1;
            if j == m {
                matches.push(MatchSpan {
                    start: i - j,
                    end: i - 1,
                });
                steps.push(KmpStep {
                    kind: KmpStepKind::Match,
                    i: i - j,
                    j: m - 1,
                    next_table: Arc::clone(&lps),
                    comparisons,
                    matches: matches.clone(),
                    jump_history: jump_history.clone(),
                    desc: Desc::new(
                        format!("Pattern found at index {}!", i - j),
                        format!("在索引 {} 处找到模式串！", i - j),
                    ),
                });

                // i is not reset: overlapping occurrences stay reachable.
                let from = j;
                j = lps[j - 1];
                jump_history.push(Jump {
                    from,
                    to: j,
                    reason: JumpReason::Match,
                    position: None,
                });
                steps.push(KmpStep {
                    kind: KmpStepKind::Jump {
                        from,
                        to: j,
                        reason: JumpReason::Match,
                    },
                    i,
                    j,
                    next_table: Arc::clone(&lps),
                    comparisons,
                    matches: matches.clone(),
                    jump_history: jump_history.clone(),
                    desc: Desc::new(
                        format!("Jump pattern index j to {j} (from Next table)."),
                        format!("根据 Next 表将模式串索引 j 跳转到 {j}。"),
                    ),
                });
            }
        } else if j > 0 {
            let from = j;
            j = lps[j - 1];
            jump_history.push(Jump {
                from,
                to: j,
                reason: JumpReason::Mismatch,
                position: Some(i),
            });
            steps.push(KmpStep {
                kind: KmpStepKind::Jump {
                    from,
                    to: j,
                    reason: JumpReason::Mismatch,
                },
                i,
                j,
                next_table: Arc::clone(&lps),
                comparisons,
                matches: matches.clone(),
                jump_history: jump_history.clone(),
                desc: Desc::new(
                    format!(
                        "Mismatch at P[{from}]. Jump j to {j} (Next[{}]). i stays at {i}.",
                        from - 1
                    ),
                    format!(
                        "P[{from}] 处不匹配。j 跳转到 {j} (Next[{}])。i 保持在 {i}。",
                        from - 1
                    ),
                ),
            });
        } else {
            i += 1;
            steps.push(KmpStep {
                kind: KmpStepKind::Shift,
                i,
                j,
                next_table: Arc::clone(&lps),
                comparisons,
                matches: matches.clone(),
                jump_history: jump_history.clone(),
                desc: Desc::new(
                    format!("Mismatch at start. Increment i to {i}."),
                    format!("起始位置不匹配。将 i 增加到 {i}。"),
                ),
            });
        }
    }

    steps
}
