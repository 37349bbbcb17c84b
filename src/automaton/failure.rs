//! BFS failure-link computation and goto-table completion.
//!
//! The queue is processed in FIFO order, so every node at depth `k` is
//! fully resolved before any node at depth `k + 1`. That ordering is
//! the correctness invariant: a child's failure link is defined in
//! terms of its parent's already-resolved link, and a node's goto
//! entries copy from its failure target's already-completed table.
//!
//! Output sets are merged during the same pass. A node's outputs are
//! final by the time its children are processed, so appending the
//! failure target's outputs once — no deduplication — is enough.

use std::collections::VecDeque;

use super::{NodeId, Trie, ROOT};
use crate::step::Desc;
use crate::trace::aho_corasick::{AcStep, AcStepKind};

/// Every distinct character of the combined pattern set, in first
/// appearance order. This is the alphabet the goto tables are
/// completed over.
pub fn pattern_alphabet(patterns: &[String]) -> Vec<char> {
    let mut alphabet = Vec::new();
    for pattern in patterns {
        for ch in pattern.chars() {
            if !alphabet.contains(&ch) {
                alphabet.push(ch);
            }
        }
    }
    alphabet
}

/// Resolve every failure link and complete every goto table, appending
/// each sub-decision to `steps`.
///
/// After this pass every node has a transition entry for every
/// character in `alphabet`; the search never needs to follow failure
/// links for alphabet characters.
pub fn build_failure_links(trie: &mut Trie, alphabet: &[char], steps: &mut Vec<AcStep>) {
    steps.push(AcStep::build_phase(
        trie,
        AcStepKind::BuildFailInit,
        Desc::new(
            "Starting to build failure links. Root keeps no failure link of its own.",
            "开始构建失败链接。根节点自身不设失败链接。",
        ),
    ));

    let mut queue: VecDeque<NodeId> = VecDeque::new();

    // Depth 1: children of the root always fail back to the root.
    for (ch, child) in trie.node(ROOT).transitions.clone() {
        trie.node_mut(child).fail = ROOT;
        queue.push_back(child);
        steps.push(AcStep::build_phase(
            trie,
            AcStepKind::BuildFailQueue {
                node: child,
                parent: ROOT,
                ch,
            },
            Desc::new(
                format!("Set failure link for state {child} (child of root via '{ch}') to root (0)."),
                format!("将状态 {child}（通过 '{ch}' 从根的子节点）的失败链接设置为根（0）。"),
            ),
        ));
    }

    // The root's own table: characters without a child loop back to
    // the root itself.
    for &ch in alphabet {
        if trie.transition(ROOT, ch).is_none() {
            trie.node_mut(ROOT).transitions.push((ch, ROOT));
            steps.push(AcStep::build_phase(
                trie,
                AcStepKind::BuildFailOptimize {
                    node: ROOT,
                    ch,
                    target: ROOT,
                },
                Desc::new(
                    format!("Optimization: Pre-compute transition '{ch}' from state 0 to 0 (via fail link)."),
                    format!("优化：预计算状态 0 到 0 的转移 '{ch}'（通过失败链接）。"),
                ),
            ));
        }
    }

    while let Some(u) = queue.pop_front() {
        steps.push(AcStep::build_phase(
            trie,
            AcStepKind::BuildFailLoop {
                node: u,
                queue_len: queue.len(),
            },
            Desc::new(
                format!("Processing state {u} from queue. Building failure links for its children."),
                format!("处理队列中的状态 {u}。为其子节点构建失败链接。"),
            ),
        ));

        for &ch in alphabet {
            // Goto entries are only ever appended while processing the
            // node itself, and each character is visited once, so a
            // present entry here is an explicit trie child.
            let explicit = trie.transition(u, ch);

            steps.push(AcStep::build_phase(
                trie,
                AcStepKind::BuildFailCheck {
                    node: u,
                    ch,
                    has_transition: explicit.is_some(),
                },
                Desc::new(
                    format!(
                        "Checking transition '{ch}' from state {u}. {}",
                        if explicit.is_some() {
                            "Transition exists."
                        } else {
                            "Transition does not exist - will optimize."
                        }
                    ),
                    format!(
                        "检查状态 {u} 的转移 '{ch}'。{}",
                        if explicit.is_some() {
                            "转移存在。"
                        } else {
                            "转移不存在 - 将进行优化。"
                        }
                    ),
                ),
            ));

            match explicit {
                Some(child) => {
                    let mut candidate = trie.node(u).fail;
                    steps.push(AcStep::build_phase(
                        trie,
                        AcStepKind::BuildFailTraverse {
                            node: u,
                            child,
                            ch,
                            candidate,
                            prev_candidate: None,
                        },
                        Desc::new(
                            format!(
                                "State {child} exists. Traverse failure links from parent {u}'s fail ({candidate}) to find fallback."
                            ),
                            format!(
                                "状态 {child} 存在。从父节点 {u} 的失败链接（{candidate}）遍历失败链接以找到后备。"
                            ),
                        ),
                    ));

                    while candidate != ROOT && trie.transition(candidate, ch).is_none() {
                        let prev = candidate;
                        candidate = trie.node(prev).fail;
                        steps.push(AcStep::build_phase(
                            trie,
                            AcStepKind::BuildFailTraverse {
                                node: u,
                                child,
                                ch,
                                candidate,
                                prev_candidate: Some(prev),
                            },
                            Desc::new(
                                format!(
                                    "No transition '{ch}' from fail candidate {prev}. Follow fail link to {candidate}."
                                ),
                                format!("失败候选 {prev} 没有转移 '{ch}'。跟随失败链接到 {candidate}。"),
                            ),
                        ));
                    }

                    let target = trie.transition(candidate, ch).unwrap_or(ROOT);
                    trie.node_mut(child).fail = target;
                    let inherited = trie.node(target).outputs.clone();
                    trie.node_mut(child).outputs.extend(inherited);
                    queue.push_back(child);

                    let outputs = trie.node(child).outputs.join(", ");
                    steps.push(AcStep::build_phase(
                        trie,
                        AcStepKind::BuildFailSet {
                            node: u,
                            child,
                            ch,
                            target,
                        },
                        Desc::new(
                            format!("Set failure link for state {child} to {target}. Output: [{outputs}]."),
                            format!("将状态 {child} 的失败链接设置为 {target}。输出：[{outputs}]。"),
                        ),
                    ));
                }
                None => {
                    let fallback = trie.node(u).fail;
                    let target = trie.transition(fallback, ch).unwrap_or(ROOT);
                    trie.node_mut(u).transitions.push((ch, target));
                    steps.push(AcStep::build_phase(
                        trie,
                        AcStepKind::BuildFailOptimize {
                            node: u,
                            ch,
                            target,
                        },
                        Desc::new(
                            format!(
                                "Optimization: Pre-compute transition '{ch}' from state {u} to {target} (via fail link)."
                            ),
                            format!("优化：预计算状态 {u} 到 {target} 的转移 '{ch}'（通过失败链接）。"),
                        ),
                    ));
                }
            }
        }
    }
}
