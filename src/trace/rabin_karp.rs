//! Rabin-Karp trace generator.
//!
//! Compares a rolling polynomial hash of each text window against the
//! pattern hash, and verifies character by character whenever the
//! hashes agree. The modulus is deliberately tiny so that collisions
//! actually happen and the verification step earns its keep.

use crate::step::{Desc, HashWindow, MatchSpan};

/// Radix of the polynomial hash (the alphabet size constant `d`).
pub const HASH_BASE: u64 = 256;

/// Prime modulus `q`. Small on purpose: with 101 residues, distinct
/// windows collide often enough to demonstrate false positives.
pub const HASH_MODULUS: u64 = 101;

/// What a single Rabin-Karp step represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "serialization", serde(rename_all = "snake_case"))]
pub enum RkStepKind {
    /// Pattern hash, first window hash, and the multiplier were computed.
    Init,
    /// The window hash was compared against the pattern hash.
    CompareHash {
        /// Whether the hashes were equal
        matched: bool,
    },
    /// Hashes agreed; character verification begins.
    CheckChars,
    /// One character pair was verified.
    Verify {
        /// Offset inside the pattern
        j: usize,
        /// Whether the characters were equal
        matched: bool,
    },
    /// Verification succeeded: a real match.
    Match,
    /// The window hash was rolled one position to the right.
    Roll {
        /// Hash of the window before the roll
        prev_ht: u64,
        /// Character leaving the window
        removed: char,
        /// Character entering the window
        added: char,
    },
}

impl RkStepKind {
    /// Short lowercase tag for display.
    pub fn label(&self) -> &'static str {
        match self {
            RkStepKind::Init => "init",
            RkStepKind::CompareHash { .. } => "compare_hash",
            RkStepKind::CheckChars => "check_chars",
            RkStepKind::Verify { .. } => "verify",
            RkStepKind::Match => "match",
            RkStepKind::Roll { .. } => "roll",
        }
    }
}

/// One step of a Rabin-Karp run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct RkStep {
    /// What happened at this step
    pub kind: RkStepKind,
    /// Window start in the text
    pub i: usize,
    /// Pattern hash
    pub hp: u64,
    /// Current window hash
    pub ht: u64,
    /// Precomputed multiplier `d^(m-1) mod q`
    pub h: u64,
    /// Radix
    pub d: u64,
    /// Modulus
    pub q: u64,
    /// Matches found so far
    pub matches: Vec<MatchSpan>,
    /// Hash of every window examined so far
    pub hash_history: Vec<HashWindow>,
    /// Hash-equal-but-content-different events so far
    pub hash_collisions: usize,
    /// Human-readable description
    pub desc: Desc,
}

fn code(ch: char) -> u64 {
    ch as u32 as u64
}

/// Generate the full Rabin-Karp trace for `pattern` over `text`.
///
/// An empty pattern yields an empty trace. A pattern longer than the
/// text yields only the `init` step: the window loop has nothing to
/// examine, and the initial window hash covers however much text
/// exists.
pub fn generate_rk_steps(text: &str, pattern: &str) -> Vec<RkStep> {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let n = text.len();
    let m = pattern.len();

    let mut steps = Vec::new();
    if m == 0 {
        return steps;
    }

    let d = HASH_BASE;
    let q = HASH_MODULUS;

    let mut h = 1u64;
    for _ in 1..m {
        h = h * d % q;
    }

    let mut hp = 0u64;
    let mut ht = 0u64;
    for idx in 0..m {
        hp = (d * hp + code(pattern[idx])) % q;
        if idx < n {
            ht = (d * ht + code(text[idx])) % q;
        }
    }

    let mut matches: Vec<MatchSpan> = Vec::new();
    let mut hash_history: Vec<HashWindow> = Vec::new();
    let mut hash_collisions = 0usize;

    steps.push(RkStep {
        kind: RkStepKind::Init,
        i: 0,
        hp,
        ht,
        h,
        d,
        q,
        matches: Vec::new(),
        hash_history: Vec::new(),
        hash_collisions: 0,
        desc: Desc::new(
            format!("Calculate initial hashes. Hp(Pattern) = {hp}, Ht(Text window 0) = {ht}."),
            format!("计算初始哈希值。Hp(模式串) = {hp}，Ht(文本窗口0) = {ht}。"),
        ),
    });

    if m > n {
        return steps;
    }

    for i in 0..=n - m {
        hash_history.push(HashWindow { i, hash: ht });
        steps.push(RkStep {
            kind: RkStepKind::CompareHash { matched: hp == ht },
            i,
            hp,
            ht,
            h,
            d,
            q,
            matches: matches.clone(),
            hash_history: hash_history.clone(),
            hash_collisions,
            desc: Desc::new(
                format!("Window at {i}. Compare Hash: {hp} vs {ht}."),
                format!("窗口在 {i}。比较哈希值：{hp} vs {ht}。"),
            ),
        });

        if hp == ht {
            steps.push(RkStep {
                kind: RkStepKind::CheckChars,
                i,
                hp,
                ht,
                h,
                d,
                q,
                matches: matches.clone(),
                hash_history: hash_history.clone(),
                hash_collisions,
                desc: Desc::new(
                    "Hashes match! Check characters one by one.",
                    "哈希值匹配！逐个检查字符。",
                ),
            });

            let mut window_matched = true;
            for j in 0..m {
                let matched = text[i + j] == pattern[j];
                steps.push(RkStep {
                    kind: RkStepKind::Verify { j, matched },
                    i,
                    hp,
                    ht,
                    h,
                    d,
                    q,
                    matches: matches.clone(),
                    hash_history: hash_history.clone(),
                    hash_collisions,
                    desc: Desc::new(
                        format!("Checking T[{}] == P[{j}]...", i + j),
                        format!("检查 T[{}] == P[{j}]...", i + j),
                    ),
                });
                if !matched {
                    window_matched = false;
                    hash_collisions += 1;
                    break;
                }
            }

            if window_matched {
                matches.push(MatchSpan {
                    start: i,
                    end: i + m - 1,
                });
                steps.push(RkStep {
                    kind: RkStepKind::Match,
                    i,
                    hp,
                    ht,
                    h,
                    d,
                    q,
                    matches: matches.clone(),
                    hash_history: hash_history.clone(),
                    hash_collisions,
                    desc: Desc::new(
                        format!("Pattern found at index {i}."),
                        format!("在索引 {i} 处找到模式串。"),
                    ),
                });
            }
        }

        if i < n - m {
            let prev_ht = ht;
            let removed = text[i];
            let added = text[i + m];
            let rolled = (d as i64 * (ht as i64 - code(removed) as i64 * h as i64)
                + code(added) as i64)
                .rem_euclid(q as i64);
            ht = rolled as u64;

            steps.push(RkStep {
                kind: RkStepKind::Roll {
                    prev_ht,
                    removed,
                    added,
                },
                i: i + 1,
                hp,
                ht,
                h,
                d,
                q,
                matches: matches.clone(),
                hash_history: hash_history.clone(),
                hash_collisions,
                desc: Desc::new(
                    format!("Rolling Hash: Remove '{removed}', add '{added}'."),
                    format!("滚动哈希：移除 '{removed}'，添加 '{added}'。"),
                ),
            });
        }
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_hash(window: &[char]) -> u64 {
        window
            .iter()
            .fold(0u64, |acc, &c| (HASH_BASE * acc + code(c)) % HASH_MODULUS)
    }

    #[test]
    fn test_empty_pattern_yields_no_steps() {
        assert!(generate_rk_steps("abc", "").is_empty());
    }

    #[test]
    fn test_pattern_longer_than_text_yields_init_only() {
        let steps = generate_rk_steps("ab", "abc");
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].kind, RkStepKind::Init);
    }

    #[test]
    fn test_rolled_hash_matches_scratch_hash() {
        let text: Vec<char> = "the quick brown fox".chars().collect();
        let steps = generate_rk_steps("the quick brown fox", "ick");
        for step in &steps {
            if let RkStepKind::CompareHash { .. } = step.kind {
                assert_eq!(step.ht, scratch_hash(&text[step.i..step.i + 3]));
            }
        }
    }

    #[test]
    fn test_matches_found() {
        let steps = generate_rk_steps("abcabc", "abc");
        assert_eq!(
            steps.last().unwrap().matches,
            vec![
                MatchSpan { start: 0, end: 2 },
                MatchSpan { start: 3, end: 5 }
            ]
        );
    }

    #[test]
    fn test_collision_detected_and_counted_once() {
        // "ca" and "ah" share the hash (54*99 + 97) % 101 == (54*97 + 104) % 101 == 90.
        let steps = generate_rk_steps("caah", "ah");
        let last = steps.last().unwrap();
        assert_eq!(last.hash_collisions, 1);
        assert_eq!(last.matches, vec![MatchSpan { start: 2, end: 3 }]);

        // The colliding window emits a failing verify and no match step.
        let failed_verify = steps
            .iter()
            .any(|s| matches!(s.kind, RkStepKind::Verify { matched: false, .. }) && s.i == 0);
        assert!(failed_verify);
        assert!(!steps
            .iter()
            .any(|s| matches!(s.kind, RkStepKind::Match) && s.i == 0));
    }

    #[test]
    fn test_multiplier_value() {
        // d^(m-1) mod q for m = 3: 256^2 mod 101.
        let steps = generate_rk_steps("abcd", "abc");
        assert_eq!(steps[0].h, 256u64 * 256 % 101);
    }
}
