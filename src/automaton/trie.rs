//! Granular trie construction.
//!
//! Each pattern is threaded through the trie character by character,
//! reusing nodes along shared prefixes and forging new ones only where
//! transitions diverge. The existence check and the node creation are
//! reported as separate steps so a trace consumer can tell "found an
//! existing path" apart from "forged a new path".

use super::{Trie, ROOT};
use crate::step::Desc;
use crate::trace::aho_corasick::{AcStep, AcStepKind};

/// Insert one pattern, appending every construction step to `steps`.
///
/// Emits `insert_start` once, then per character `insert_char`,
/// an `insert_check`/`insert_create` pair when the transition is
/// missing, and `insert_move`; closes with `insert_output` once the
/// terminal node's output set has gained the pattern.
pub fn insert_pattern(
    trie: &mut Trie,
    pattern: &str,
    pattern_index: usize,
    steps: &mut Vec<AcStep>,
) {
    let mut u = ROOT;

    steps.push(AcStep::build_phase(
        trie,
        AcStepKind::InsertStart {
            pattern: pattern.to_string(),
            pattern_index,
            node: u,
        },
        Desc::new(
            format!("Inserting pattern \"{pattern}\" into trie."),
            format!("将模式串 \"{pattern}\" 插入 Trie。"),
        ),
    ));

    for (char_index, ch) in pattern.chars().enumerate() {
        steps.push(AcStep::build_phase(
            trie,
            AcStepKind::InsertChar {
                pattern: pattern.to_string(),
                pattern_index,
                node: u,
                char_index,
                ch,
            },
            Desc::new(
                format!(
                    "Processing character '{ch}' at position {char_index} of pattern \"{pattern}\"."
                ),
                format!("处理模式串 \"{pattern}\" 位置 {char_index} 的字符 '{ch}'。"),
            ),
        ));

        let next = match trie.transition(u, ch) {
            Some(existing) => existing,
            None => {
                steps.push(AcStep::build_phase(
                    trie,
                    AcStepKind::InsertCheck {
                        pattern: pattern.to_string(),
                        pattern_index,
                        node: u,
                        char_index,
                        ch,
                    },
                    Desc::new(
                        format!("No transition for '{ch}' from state {u}. Creating new node."),
                        format!("状态 {u} 没有 '{ch}' 的转移。创建新节点。"),
                    ),
                ));

                let new_node = trie.push_node();
                trie.node_mut(u).transitions.push((ch, new_node));

                steps.push(AcStep::build_phase(
                    trie,
                    AcStepKind::InsertCreate {
                        pattern: pattern.to_string(),
                        pattern_index,
                        node: u,
                        new_node,
                        char_index,
                        ch,
                    },
                    Desc::new(
                        format!(
                            "Created new state {new_node} for transition '{ch}' from state {u}."
                        ),
                        format!("为状态 {u} 的转移 '{ch}' 创建新状态 {new_node}。"),
                    ),
                ));

                new_node
            }
        };

        let prev_node = u;
        u = next;

        steps.push(AcStep::build_phase(
            trie,
            AcStepKind::InsertMove {
                pattern: pattern.to_string(),
                pattern_index,
                prev_node,
                node: u,
                char_index,
                ch,
            },
            Desc::new(
                format!("Move from state {prev_node} to state {u} via transition '{ch}'."),
                format!("通过转移 '{ch}' 从状态 {prev_node} 移动到状态 {u}。"),
            ),
        ));
    }

    trie.node_mut(u).outputs.push(pattern.to_string());

    let outputs = trie.node(u).outputs.join(", ");
    steps.push(AcStep::build_phase(
        trie,
        AcStepKind::InsertOutput {
            pattern: pattern.to_string(),
            pattern_index,
            node: u,
        },
        Desc::new(
            format!("Pattern \"{pattern}\" inserted. State {u} now has output: [{outputs}]."),
            format!("模式串 \"{pattern}\" 已插入。状态 {u} 现在有输出：[{outputs}]。"),
        ),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert_all(patterns: &[&str]) -> (Trie, Vec<AcStep>) {
        let mut trie = Trie::new();
        let mut steps = Vec::new();
        for (idx, pattern) in patterns.iter().enumerate() {
            insert_pattern(&mut trie, pattern, idx, &mut steps);
        }
        (trie, steps)
    }

    fn labels(steps: &[AcStep]) -> Vec<&'static str> {
        steps.iter().map(|s| s.kind.label()).collect()
    }

    #[test]
    fn test_single_pattern_step_sequence() {
        let (_, steps) = insert_all(&["ab"]);
        assert_eq!(
            labels(&steps),
            vec![
                "insert_start",
                "insert_char",
                "insert_check",
                "insert_create",
                "insert_move",
                "insert_char",
                "insert_check",
                "insert_create",
                "insert_move",
                "insert_output",
            ]
        );
    }

    #[test]
    fn test_shared_prefix_skips_creation() {
        let (_, steps) = insert_all(&["ab", "ac"]);
        // Second pattern: 'a' rides the existing edge (no check/create),
        // 'c' forges a new one.
        let second: Vec<_> = steps
            .iter()
            .filter(|s| match &s.kind {
                AcStepKind::InsertCheck { pattern_index, .. }
                | AcStepKind::InsertCreate { pattern_index, .. } => *pattern_index == 1,
                _ => false,
            })
            .collect();
        assert_eq!(second.len(), 2); // one check + one create, for 'c' only
    }

    #[test]
    fn test_snapshots_grow_monotonically() {
        let (_, steps) = insert_all(&["abc"]);
        let mut prev = 0;
        for step in &steps {
            assert!(step.trie.node_count() >= prev);
            prev = step.trie.node_count();
        }
    }

    #[test]
    fn test_check_snapshot_predates_creation() {
        let (_, steps) = insert_all(&["a"]);
        let check = steps
            .iter()
            .find(|s| matches!(s.kind, AcStepKind::InsertCheck { .. }))
            .unwrap();
        let create = steps
            .iter()
            .find(|s| matches!(s.kind, AcStepKind::InsertCreate { .. }))
            .unwrap();
        assert_eq!(check.trie.node_count() + 1, create.trie.node_count());
    }
}
