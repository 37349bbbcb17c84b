//! Aho-Corasick trace generator.
//!
//! Unlike the single-pattern generators, this trace covers two phases
//! concatenated into one sequence: the build phase (trie insertion,
//! BFS failure links, goto-table completion) and the search phase.
//! Every step carries a copy-on-write snapshot of the trie as of that
//! step plus the layout computed from it, so a renderer can draw the
//! automaton growing edge by edge and then animate the search over the
//! finished graph.

use crate::automaton::{build_automaton, NodeId, Trie, ROOT};
use crate::layout::{calculate_trie_layout, TrieLayout};
use crate::step::{Desc, PatternMatch};

/// Which phase of the run a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "serialization", serde(rename_all = "snake_case"))]
pub enum AcPhase {
    /// Automaton construction
    Build,
    /// Text scan over the finished automaton
    Search,
}

/// What a single Aho-Corasick step represents.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "serialization", serde(rename_all = "snake_case"))]
pub enum AcStepKind {
    /// The automaton was initialized with the root node.
    BuildInit {
        /// The root node
        node: NodeId,
    },
    /// Insertion of a pattern begins at the root.
    InsertStart {
        /// Pattern being inserted
        pattern: String,
        /// Position of the pattern in the input list
        pattern_index: usize,
        /// Current node (the root)
        node: NodeId,
    },
    /// One pattern character is about to be processed.
    InsertChar {
        /// Pattern being inserted
        pattern: String,
        /// Position of the pattern in the input list
        pattern_index: usize,
        /// Current node
        node: NodeId,
        /// Offset of the character inside the pattern
        char_index: usize,
        /// The character
        ch: char,
    },
    /// The existence check failed: no transition for the character.
    InsertCheck {
        /// Pattern being inserted
        pattern: String,
        /// Position of the pattern in the input list
        pattern_index: usize,
        /// Current node
        node: NodeId,
        /// Offset of the character inside the pattern
        char_index: usize,
        /// The character
        ch: char,
    },
    /// A fresh node was created for the missing transition.
    InsertCreate {
        /// Pattern being inserted
        pattern: String,
        /// Position of the pattern in the input list
        pattern_index: usize,
        /// Parent of the new node
        node: NodeId,
        /// The node just created
        new_node: NodeId,
        /// Offset of the character inside the pattern
        char_index: usize,
        /// The character
        ch: char,
    },
    /// The insertion cursor advanced along a transition.
    InsertMove {
        /// Pattern being inserted
        pattern: String,
        /// Position of the pattern in the input list
        pattern_index: usize,
        /// Node before the move
        prev_node: NodeId,
        /// Node after the move
        node: NodeId,
        /// Offset of the character inside the pattern
        char_index: usize,
        /// The character
        ch: char,
    },
    /// The pattern's last character was placed; the terminal node's
    /// output set gained the pattern.
    InsertOutput {
        /// Pattern just inserted
        pattern: String,
        /// Position of the pattern in the input list
        pattern_index: usize,
        /// Terminal node
        node: NodeId,
    },
    /// The failure-link pass is starting.
    BuildFailInit,
    /// A direct child of the root received failure link = root and was
    /// enqueued.
    BuildFailQueue {
        /// The child node
        node: NodeId,
        /// Its parent (the root)
        parent: NodeId,
        /// Transition character from the root
        ch: char,
    },
    /// A node was dequeued; its children are about to be resolved.
    BuildFailLoop {
        /// The dequeued node
        node: NodeId,
        /// Nodes left in the queue
        queue_len: usize,
    },
    /// The per-character existence check at the dequeued node.
    BuildFailCheck {
        /// The dequeued node
        node: NodeId,
        /// The character being checked
        ch: char,
        /// Whether an explicit child exists for it
        has_transition: bool,
    },
    /// One hop of the failure-chain walk while resolving a child.
    BuildFailTraverse {
        /// The dequeued node (parent of `child`)
        node: NodeId,
        /// The child whose failure link is being resolved
        child: NodeId,
        /// Transition character from `node` to `child`
        ch: char,
        /// Current candidate on the failure chain
        candidate: NodeId,
        /// Previous candidate, absent on the opening hop
        prev_candidate: Option<NodeId>,
    },
    /// A child's failure link was assigned and its output set merged.
    BuildFailSet {
        /// The dequeued node (parent of `child`)
        node: NodeId,
        /// The child whose failure link was set
        child: NodeId,
        /// Transition character from `node` to `child`
        ch: char,
        /// The failure target
        target: NodeId,
    },
    /// A missing transition was pre-computed from the failure target
    /// so the search never follows failure links for it.
    BuildFailOptimize {
        /// The node whose table gained the entry
        node: NodeId,
        /// The character
        ch: char,
        /// Where the entry leads
        target: NodeId,
    },
    /// Construction finished; the automaton is ready to search.
    BuildComplete,
    /// The search cursor was placed on the root.
    Init {
        /// The root node
        node: NodeId,
    },
    /// A text character was read.
    Input {
        /// Current node before consuming the character
        node: NodeId,
        /// Text index
        i: usize,
        /// The character read
        ch: char,
    },
    /// One failure-link hop (the character has no entry anywhere on
    /// the current node's table).
    Fail {
        /// Node after the hop
        node: NodeId,
        /// Node before the hop
        prev_node: NodeId,
        /// Text index
        i: usize,
        /// The conceptual failure walk for this character
        fail_path: Vec<NodeId>,
    },
    /// A transition was taken.
    Goto {
        /// Node after the transition
        node: NodeId,
        /// Node before the transition
        prev_node: NodeId,
        /// Text index
        i: usize,
        /// Transition character
        ch: char,
    },
    /// The landed node has a non-empty output set.
    Match {
        /// The node reporting output
        node: NodeId,
        /// Text index
        i: usize,
        /// The output set, in propagation order
        found: Vec<String>,
        /// Match records created at this step
        new_matches: Vec<PatternMatch>,
    },
}

impl AcStepKind {
    /// Short lowercase tag for display.
    pub fn label(&self) -> &'static str {
        match self {
            AcStepKind::BuildInit { .. } => "build_init",
            AcStepKind::InsertStart { .. } => "insert_start",
            AcStepKind::InsertChar { .. } => "insert_char",
            AcStepKind::InsertCheck { .. } => "insert_check",
            AcStepKind::InsertCreate { .. } => "insert_create",
            AcStepKind::InsertMove { .. } => "insert_move",
            AcStepKind::InsertOutput { .. } => "insert_output",
            AcStepKind::BuildFailInit => "build_fail_init",
            AcStepKind::BuildFailQueue { .. } => "build_fail_queue",
            AcStepKind::BuildFailLoop { .. } => "build_fail_loop",
            AcStepKind::BuildFailCheck { .. } => "build_fail_check",
            AcStepKind::BuildFailTraverse { .. } => "build_fail_traverse",
            AcStepKind::BuildFailSet { .. } => "build_fail_set",
            AcStepKind::BuildFailOptimize { .. } => "build_fail_optimize",
            AcStepKind::BuildComplete => "build_complete",
            AcStepKind::Init { .. } => "init",
            AcStepKind::Input { .. } => "input",
            AcStepKind::Fail { .. } => "fail",
            AcStepKind::Goto { .. } => "goto",
            AcStepKind::Match { .. } => "match",
        }
    }
}

/// One step of an Aho-Corasick run.
///
/// The trie snapshot and layout reflect the automaton exactly as of
/// this step. The cumulative search collections are empty on build
/// steps.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct AcStep {
    /// Phase the step belongs to
    pub phase: AcPhase,
    /// What happened at this step
    pub kind: AcStepKind,
    /// The trie as of this step
    pub trie: Trie,
    /// Layout of that trie
    pub layout: TrieLayout,
    /// Matches found so far (search phase)
    pub matches: Vec<PatternMatch>,
    /// Every state visited so far, starting at the root (search phase)
    pub state_history: Vec<NodeId>,
    /// Matches in the order they fired (search phase)
    pub match_history: Vec<PatternMatch>,
    /// Human-readable description
    pub desc: Desc,
}

impl AcStep {
    /// Assemble a build-phase step: snapshot the trie, lay it out,
    /// leave the search collections empty.
    pub(crate) fn build_phase(trie: &Trie, kind: AcStepKind, desc: Desc) -> Self {
        AcStep {
            phase: AcPhase::Build,
            kind,
            trie: trie.snapshot(),
            layout: calculate_trie_layout(trie),
            matches: Vec::new(),
            state_history: Vec::new(),
            match_history: Vec::new(),
            desc,
        }
    }
}

/// Split a comma-separated pattern list into trimmed, non-empty
/// patterns. Duplicates are kept: each occurrence inserts (and records
/// output) independently.
pub fn parse_patterns(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn search_step(
    trie: &Trie,
    layout: &TrieLayout,
    kind: AcStepKind,
    matches: &[PatternMatch],
    state_history: &[NodeId],
    match_history: &[PatternMatch],
    desc: Desc,
) -> AcStep {
    AcStep {
        phase: AcPhase::Search,
        kind,
        trie: trie.snapshot(),
        layout: layout.clone(),
        matches: matches.to_vec(),
        state_history: state_history.to_vec(),
        match_history: match_history.to_vec(),
        desc,
    }
}

/// Generate the full Aho-Corasick trace: automaton construction over
/// the comma-separated pattern list, then the search over `text`.
///
/// If no non-empty pattern survives the split, the trace is empty.
pub fn generate_ac_steps(text: &str, patterns_input: &str) -> Vec<AcStep> {
    let patterns = parse_patterns(patterns_input);
    if patterns.is_empty() {
        return Vec::new();
    }

    let (trie, mut steps) = build_automaton(&patterns);
    let layout = calculate_trie_layout(&trie);

    let mut u = ROOT;
    let mut matches: Vec<PatternMatch> = Vec::new();
    let mut state_history: Vec<NodeId> = vec![ROOT];
    let mut match_history: Vec<PatternMatch> = Vec::new();

    steps.push(search_step(
        &trie,
        &layout,
        AcStepKind::Init { node: ROOT },
        &matches,
        &state_history,
        &match_history,
        Desc::new("AC Automaton Built. Ready to search.", "AC 自动机已构建。准备搜索。"),
    ));

    for (i, ch) in text.chars().enumerate() {
        steps.push(search_step(
            &trie,
            &layout,
            AcStepKind::Input { node: u, i, ch },
            &matches,
            &state_history,
            &match_history,
            Desc::new(
                format!("Read character '{ch}'. Current State: {u}."),
                format!("读取字符 '{ch}'。当前状态：{u}。"),
            ),
        ));

        // The conceptual failure walk for this character, recorded up
        // front so every fail step can show the whole path.
        let mut fail_path: Vec<NodeId> = Vec::new();
        let mut probe = u;
        while probe != ROOT && trie.transition(probe, ch).is_none() {
            fail_path.push(probe);
            probe = trie.node(probe).fail;
        }
        fail_path.push(probe);

        // With the goto table completed over the pattern alphabet this
        // loop only runs for characters absent from every pattern.
        while u != ROOT && trie.transition(u, ch).is_none() {
            let prev = u;
            u = trie.node(u).fail;
            state_history.push(u);
            steps.push(search_step(
                &trie,
                &layout,
                AcStepKind::Fail {
                    node: u,
                    prev_node: prev,
                    i,
                    fail_path: fail_path.clone(),
                },
                &matches,
                &state_history,
                &match_history,
                Desc::new(
                    format!("No transition for '{ch}'. Follow Fail link {prev} -> {u}."),
                    format!("没有 '{ch}' 的转移。跟随失败链接 {prev} -> {u}。"),
                ),
            ));
        }

        if let Some(next) = trie.transition(u, ch) {
            let prev = u;
            u = next;
            state_history.push(u);
            steps.push(search_step(
                &trie,
                &layout,
                AcStepKind::Goto {
                    node: u,
                    prev_node: prev,
                    i,
                    ch,
                },
                &matches,
                &state_history,
                &match_history,
                Desc::new(
                    format!("Transition {prev} --{ch}--> {u}."),
                    format!("状态转移 {prev} --{ch}--> {u}。"),
                ),
            ));
        }

        let outputs = trie.node(u).outputs.clone();
        if !outputs.is_empty() {
            let mut new_matches: Vec<PatternMatch> = Vec::new();
            for pattern in &outputs {
                let len = pattern.chars().count();
                let entry = PatternMatch {
                    pattern: pattern.clone(),
                    start: i + 1 - len,
                    end: i,
                    step_index: steps.len(),
                    char_index: i,
                    state: u,
                };
                new_matches.push(entry.clone());
                matches.push(entry.clone());
                match_history.push(entry);
            }
            steps.push(search_step(
                &trie,
                &layout,
                AcStepKind::Match {
                    node: u,
                    i,
                    found: outputs.clone(),
                    new_matches,
                },
                &matches,
                &state_history,
                &match_history,
                Desc::new(
                    format!("Output at state {u}: {}.", outputs.join(", ")),
                    format!("状态 {u} 输出：{}。", outputs.join(", ")),
                ),
            ));
        }
    }

    steps
}
