//! Naive (brute-force) search trace generator.
//!
//! The simplest of the four: slide the pattern across every window of
//! the text and compare character by character, bailing out of a
//! window at the first mismatch.

use crate::step::{Comparison, Desc, MatchSpan};

/// What a single naive-search step represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "serialization", serde(rename_all = "snake_case"))]
pub enum NaiveStepKind {
    /// The pattern moved to a new window start.
    Shift,
    /// One character comparison inside the current window.
    Compare {
        /// Whether the compared characters were equal
        matched: bool,
    },
    /// The window was abandoned after a failed comparison.
    Mismatch,
    /// Every character of the window matched.
    Match,
}

impl NaiveStepKind {
    /// Short lowercase tag for display.
    pub fn label(&self) -> &'static str {
        match self {
            NaiveStepKind::Shift => "shift",
            NaiveStepKind::Compare { .. } => "compare",
            NaiveStepKind::Mismatch => "mismatch",
            NaiveStepKind::Match => "match",
        }
    }
}

/// One step of a naive-search run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct NaiveStep {
    /// What happened at this step
    pub kind: NaiveStepKind,
    /// Window start in the text
    pub i: usize,
    /// Offset inside the pattern
    pub j: usize,
    /// Text indices a renderer should highlight
    pub highlight: Vec<usize>,
    /// Comparisons performed so far, this step included
    pub comparisons: usize,
    /// Matches found so far
    pub matches: Vec<MatchSpan>,
    /// Every comparison performed so far
    pub comparison_history: Vec<Comparison>,
    /// Human-readable description
    pub desc: Desc,
}

/// Generate the full naive-search trace for `pattern` over `text`.
///
/// An empty pattern, or a pattern longer than the text, yields an
/// empty trace: there is no window to examine and naive search has no
/// initialization step to report.
pub fn generate_naive_steps(text: &str, pattern: &str) -> Vec<NaiveStep> {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let n = text.len();
    let m = pattern.len();

    let mut steps = Vec::new();
    if m == 0 || m > n {
        return steps;
    }

    let mut comparisons = 0usize;
    let mut matches: Vec<MatchSpan> = Vec::new();
    let mut history: Vec<Comparison> = Vec::new();

    for i in 0..=n - m {
        steps.push(NaiveStep {
            kind: NaiveStepKind::Shift,
            i,
            j: 0,
            highlight: Vec::new(),
            comparisons,
            matches: matches.clone(),
            comparison_history: history.clone(),
            desc: Desc::new(
                format!("Shift pattern to index {i}."),
                format!("将模式串移动到索引 {i}。"),
            ),
        });

        let mut window_matched = true;
        for j in 0..m {
            comparisons += 1;
            let matched = text[i + j] == pattern[j];
            history.push(Comparison {
                i,
                j,
                text_char: text[i + j],
                pattern_char: pattern[j],
                matched,
            });

            steps.push(NaiveStep {
                kind: NaiveStepKind::Compare { matched },
                i,
                j,
                highlight: vec![i + j],
                comparisons,
                matches: matches.clone(),
                comparison_history: history.clone(),
                desc: Desc::new(
                    format!(
                        "Compare T[{}] ('{}') with P[{}] ('{}').",
                        i + j,
                        text[i + j],
                        j,
                        pattern[j]
                    ),
                    format!(
                        "比较主串 T[{}] ('{}') 和模式串 P[{}] ('{}')。",
                        i + j,
                        text[i + j],
                        j,
                        pattern[j]
                    ),
                ),
            });

            if !matched {
                window_matched = false;
                steps.push(NaiveStep {
                    kind: NaiveStepKind::Mismatch,
                    i,
                    j,
                    highlight: vec![i + j],
                    comparisons,
                    matches: matches.clone(),
                    comparison_history: history.clone(),
                    desc: Desc::new("Mismatch found. Break loop.", "发现不匹配。跳出循环。"),
                });
                break;
            }
        }

        if window_matched {
            matches.push(MatchSpan {
                start: i,
                end: i + m - 1,
            });
            steps.push(NaiveStep {
                kind: NaiveStepKind::Match,
                i,
                j: m - 1,
                highlight: (i..i + m).collect(),
                comparisons,
                matches: matches.clone(),
                comparison_history: history.clone(),
                desc: Desc::new(
                    format!("Pattern found at index {i}!"),
                    format!("在索引 {i} 处找到模式串！"),
                ),
            });
        }
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_spans(steps: &[NaiveStep]) -> Vec<MatchSpan> {
        steps.last().map(|s| s.matches.clone()).unwrap_or_default()
    }

    #[test]
    fn test_empty_pattern_yields_no_steps() {
        assert!(generate_naive_steps("abc", "").is_empty());
    }

    #[test]
    fn test_pattern_longer_than_text_yields_no_steps() {
        assert!(generate_naive_steps("ab", "abc").is_empty());
    }

    #[test]
    fn test_single_match() {
        let steps = generate_naive_steps("xxabxx", "ab");
        assert_eq!(match_spans(&steps), vec![MatchSpan { start: 2, end: 3 }]);
    }

    #[test]
    fn test_overlapping_matches() {
        let steps = generate_naive_steps("aaa", "aa");
        assert_eq!(
            match_spans(&steps),
            vec![
                MatchSpan { start: 0, end: 1 },
                MatchSpan { start: 1, end: 2 }
            ]
        );
    }

    #[test]
    fn test_inner_loop_breaks_on_first_mismatch() {
        // Window at 0 mismatches on the very first character; only one
        // compare step may be emitted for it.
        let steps = generate_naive_steps("xa", "aa");
        let compares_at_zero = steps
            .iter()
            .filter(|s| matches!(s.kind, NaiveStepKind::Compare { .. }) && s.i == 0)
            .count();
        assert_eq!(compares_at_zero, 1);
    }

    #[test]
    fn test_comparison_counter_is_cumulative() {
        let steps = generate_naive_steps("abab", "ab");
        let last_compare = steps
            .iter()
            .rev()
            .find(|s| matches!(s.kind, NaiveStepKind::Compare { .. }))
            .unwrap();
        assert_eq!(last_compare.comparisons, last_compare.comparison_history.len());
    }
}
