//! Aho-Corasick automaton construction.
//!
//! The automaton is a trie held in an arena: a single growable vector
//! owns every node, and all cross-references — child transitions,
//! failure links, goto entries — are plain integer indices into that
//! vector. No node owns another, so the cyclic overlay (failure links
//! point up and across the tree) needs no special ownership handling.
//!
//! Nodes are stored behind [`Arc`] and mutated through
//! [`Arc::make_mut`], which gives the builders copy-on-write
//! snapshots: cloning the trie copies one pointer per node, and nodes
//! untouched since the last snapshot stay structurally shared. Every
//! construction step holds such a snapshot, so a consumer can render
//! the trie "as of" any step without replaying the build.

use std::sync::Arc;

pub mod failure;
pub mod trie;

pub use failure::{build_failure_links, pattern_alphabet};
pub use trie::insert_pattern;

use crate::step::Desc;
use crate::trace::aho_corasick::{AcStep, AcStepKind};

/// Index of a node in the trie arena.
pub type NodeId = usize;

/// The root node. It exists before any insertion and never changes id.
pub const ROOT: NodeId = 0;

/// A single automaton state.
///
/// Transitions preserve insertion order, which keeps every traversal
/// over them (BFS construction, layout) deterministic. During trie
/// construction the list holds exactly the tree edges; the failure
/// pass appends goto entries so that every character of the pattern
/// alphabet has a target at every node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TrieNode {
    /// Outgoing transitions: (character, target node)
    pub transitions: Vec<(char, NodeId)>,
    /// Failure link. Defaults to the root; the root's own link is
    /// never followed.
    pub fail: NodeId,
    /// Patterns terminating at this node, including those inherited
    /// from the failure target during the BFS pass.
    pub outputs: Vec<String>,
}

impl TrieNode {
    fn new() -> Self {
        TrieNode {
            transitions: Vec::new(),
            fail: ROOT,
            outputs: Vec::new(),
        }
    }

    /// Look up the target of a transition on `ch`.
    pub fn transition(&self, ch: char) -> Option<NodeId> {
        self.transitions
            .iter()
            .find(|(label, _)| *label == ch)
            .map(|(_, target)| *target)
    }
}

/// The trie arena.
///
/// Cloning is cheap (one `Arc` clone per node) and yields an
/// independent snapshot: later mutations of this trie go through
/// [`Arc::make_mut`] and never touch nodes a snapshot still shares.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Trie {
    nodes: Vec<Arc<TrieNode>>,
}

impl Trie {
    /// Create a trie containing only the root node.
    pub fn new() -> Self {
        Trie {
            nodes: vec![Arc::new(TrieNode::new())],
        }
    }

    /// Number of nodes in the arena, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Borrow a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds. Ids handed out by this trie
    /// are permanent, so any id observed in a step stays valid for
    /// that step's snapshot.
    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id]
    }

    /// Target of the transition from `id` on `ch`, if present.
    pub fn transition(&self, id: NodeId, ch: char) -> Option<NodeId> {
        self.nodes[id].transition(ch)
    }

    /// Iterate over `(id, node)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TrieNode)> {
        self.nodes.iter().enumerate().map(|(id, n)| (id, &**n))
    }

    /// Snapshot the current state of the trie.
    ///
    /// O(nodes) pointer clones; node payloads are shared until the
    /// live trie mutates them.
    pub fn snapshot(&self) -> Trie {
        self.clone()
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TrieNode {
        Arc::make_mut(&mut self.nodes[id])
    }

    pub(crate) fn push_node(&mut self) -> NodeId {
        self.nodes.push(Arc::new(TrieNode::new()));
        self.nodes.len() - 1
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the full automaton for a pattern list, emitting every
/// construction step.
///
/// Inserts the patterns in order, then runs the BFS failure pass over
/// the combined pattern alphabet. The returned step sequence is the
/// complete build phase: the opening `build_init`, every insertion
/// step, every failure/goto step, and the closing `build_complete`.
pub fn build_automaton(patterns: &[String]) -> (Trie, Vec<AcStep>) {
    let mut trie = Trie::new();
    let mut steps = Vec::new();

    steps.push(AcStep::build_phase(
        &trie,
        AcStepKind::BuildInit { node: ROOT },
        Desc::new(
            "Initialize AC Automaton. Starting with root node.",
            "初始化 AC 自动机。从根节点开始。",
        ),
    ));

    for (pattern_index, pattern) in patterns.iter().enumerate() {
        insert_pattern(&mut trie, pattern, pattern_index, &mut steps);
    }

    let alphabet = pattern_alphabet(patterns);
    build_failure_links(&mut trie, &alphabet, &mut steps);

    steps.push(AcStep::build_phase(
        &trie,
        AcStepKind::BuildComplete,
        Desc::new(
            "AC Automaton construction complete! All patterns inserted and failure links built. Ready to search.",
            "AC 自动机构建完成！所有模式已插入，失败链接已构建。准备搜索。",
        ),
    ));

    (trie, steps)
}
