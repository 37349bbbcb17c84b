//! Trie layout engine.
//!
//! Turns a trie snapshot into 2D coordinates for graph rendering:
//! breadth-first leveling assigns each node a depth, nodes of a level
//! are distributed evenly across the width, and failure links are
//! overlaid as a second edge class after placement.

use std::collections::VecDeque;

use crate::automaton::{NodeId, Trie, ROOT};

/// Vertical distance between depth levels.
pub const LEVEL_HEIGHT: f64 = 60.0;

/// Horizontal space reserved per node when sizing the canvas.
pub const NODE_SPACING: f64 = 70.0;

/// Minimum canvas width.
pub const MIN_WIDTH: f64 = 600.0;

/// A positioned node.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct LayoutNode {
    /// Node id in the trie arena
    pub id: NodeId,
    /// Breadth-first depth (root = 0)
    pub depth: usize,
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

/// What an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "serialization", serde(rename_all = "snake_case"))]
pub enum LinkKind {
    /// A labeled character transition discovered by the BFS
    Transition,
    /// A failure link
    Failure,
}

/// A renderable edge between two positioned nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct LayoutLink {
    /// Source node id
    pub source: NodeId,
    /// Target node id
    pub target: NodeId,
    /// Transition character; absent on failure links
    pub label: Option<char>,
    /// Edge class
    pub kind: LinkKind,
}

/// A computed layout: every node positioned, every edge classified.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TrieLayout {
    /// Positioned nodes, in id order
    pub nodes: Vec<LayoutNode>,
    /// Transition edges first, then failure edges
    pub links: Vec<LayoutLink>,
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
}

/// Compute the layout for a trie snapshot.
///
/// The BFS follows transition entries in insertion order and skips
/// targets it has already visited, so goto entries added by the
/// failure pass (which always point at previously-leveled nodes, or
/// at the root) never distort the tree shape. Failure links are added
/// for every non-root node whose failure target is not the root.
pub fn calculate_trie_layout(trie: &Trie) -> TrieLayout {
    let n = trie.node_count();

    let mut depths = vec![0usize; n];
    let mut visited = vec![false; n];
    let mut levels: Vec<Vec<NodeId>> = Vec::new();
    let mut links: Vec<LayoutLink> = Vec::new();

    let mut queue = VecDeque::new();
    queue.push_back((ROOT, 0usize));
    visited[ROOT] = true;

    while let Some((id, depth)) = queue.pop_front() {
        depths[id] = depth;
        if levels.len() <= depth {
            levels.push(Vec::new());
        }
        levels[depth].push(id);

        for &(ch, child) in &trie.node(id).transitions {
            if !visited[child] {
                visited[child] = true;
                queue.push_back((child, depth + 1));
                links.push(LayoutLink {
                    source: id,
                    target: child,
                    label: Some(ch),
                    kind: LinkKind::Transition,
                });
            }
        }
    }

    let max_level = levels.iter().map(Vec::len).max().unwrap_or(0);
    let width = MIN_WIDTH.max(max_level as f64 * NODE_SPACING + 100.0);
    let height = levels.len() as f64 * LEVEL_HEIGHT + 40.0;

    let mut xs = vec![0.0f64; n];
    let mut ys = vec![0.0f64; n];
    for (depth, level) in levels.iter().enumerate() {
        let step = width / (level.len() + 1) as f64;
        for (idx, &id) in level.iter().enumerate() {
            xs[id] = step * (idx + 1) as f64;
            ys[id] = depth as f64 * LEVEL_HEIGHT + 20.0;
        }
    }

    let nodes = (0..n)
        .map(|id| LayoutNode {
            id,
            depth: depths[id],
            x: xs[id],
            y: ys[id],
        })
        .collect();

    let mut layout = TrieLayout {
        nodes,
        links,
        width,
        height,
    };

    for (id, node) in trie.iter() {
        if id != ROOT && node.fail != ROOT {
            layout.links.push(LayoutLink {
                source: id,
                target: node.fail,
                label: None,
                kind: LinkKind::Failure,
            });
        }
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::build_automaton;

    fn build(patterns: &[&str]) -> Trie {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        build_automaton(&patterns).0
    }

    #[test]
    fn test_root_only_layout() {
        let layout = calculate_trie_layout(&Trie::new());
        assert_eq!(layout.nodes.len(), 1);
        assert!(layout.links.is_empty());
        assert_eq!(layout.width, 600.0);
        assert_eq!(layout.height, 100.0);
        assert_eq!((layout.nodes[0].x, layout.nodes[0].y), (300.0, 20.0));
    }

    #[test]
    fn test_small_trie_coordinates() {
        let trie = build(&["ab", "ac"]);
        let layout = calculate_trie_layout(&trie);

        // Levels: [root], [a], [b, c] -> width 600, height 3*60+40.
        assert_eq!(layout.width, 600.0);
        assert_eq!(layout.height, 220.0);

        let at = |id: usize| layout.nodes[id];
        assert_eq!((at(0).x, at(0).y), (300.0, 20.0));
        assert_eq!((at(1).x, at(1).y), (300.0, 80.0));
        assert_eq!((at(2).x, at(2).y), (200.0, 140.0));
        assert_eq!((at(3).x, at(3).y), (400.0, 140.0));
    }

    #[test]
    fn test_tree_links_only_from_bfs() {
        let trie = build(&["ab", "ac"]);
        let layout = calculate_trie_layout(&trie);
        let tree_links: Vec<_> = layout
            .links
            .iter()
            .filter(|l| l.kind == LinkKind::Transition)
            .collect();
        // Three tree edges despite the goto entries added by the
        // failure pass.
        assert_eq!(tree_links.len(), 3);
        assert!(tree_links.iter().all(|l| l.label.is_some()));
    }

    #[test]
    fn test_failure_links_to_root_are_omitted() {
        let trie = build(&["he", "she"]);
        let layout = calculate_trie_layout(&trie);
        let fail_links: Vec<_> = layout
            .links
            .iter()
            .filter(|l| l.kind == LinkKind::Failure)
            .collect();
        // Only "sh" -> "h" and "she" -> "he" fail into non-root nodes.
        assert_eq!(fail_links.len(), 2);
        for link in fail_links {
            assert_ne!(link.target, 0);
            assert!(link.label.is_none());
        }
    }

    #[test]
    fn test_wide_level_stretches_width() {
        // Ten root children: width = 10 * 70 + 100 = 800.
        let trie = build(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
        let layout = calculate_trie_layout(&trie);
        assert_eq!(layout.width, 800.0);
    }
}
