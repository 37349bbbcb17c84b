//! # matchtrace
//!
//! Replayable step traces of classical string-search algorithms.
//!
//! This library animates four textbook algorithms — naive search,
//! Knuth-Morris-Pratt, Rabin-Karp, and Aho-Corasick — by emitting an
//! ordered sequence of step records for every micro-operation they
//! perform: character comparisons, hash rolls, failure-link hops,
//! automaton transitions. Each step is a self-sufficient snapshot, so a
//! presentation layer can render `steps[k]` for any `k`, scrub backward
//! and forward, and never replay earlier steps.
//!
//! For Aho-Corasick the trace covers both phases: automaton
//! construction (trie insertion, BFS failure links, output-set merging,
//! goto-table completion) and the search itself. A layout engine turns
//! any trie snapshot into 2D coordinates for graph rendering.
//!
//! ## Example
//!
//! ```rust,ignore
//! use matchtrace::prelude::*;
//!
//! let steps = generate_kmp_steps("ababcabcacbab", "abcac");
//! for step in &steps {
//!     println!("{}", step.desc.en);
//! }
//!
//! let ac = generate_ac_steps("arrows flew under the sun in a row", "arrows, row, sun, under");
//! let last = ac.last().unwrap();
//! println!("{} matches", last.matches.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod automaton;
pub mod layout;
pub mod step;
pub mod trace;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::automaton::{build_automaton, pattern_alphabet, NodeId, Trie, TrieNode, ROOT};
    pub use crate::layout::{calculate_trie_layout, LayoutLink, LayoutNode, LinkKind, TrieLayout};
    pub use crate::step::{
        Comparison, Desc, HashWindow, Jump, JumpReason, MatchSpan, PatternMatch,
    };
    pub use crate::trace::aho_corasick::{
        generate_ac_steps, parse_patterns, AcPhase, AcStep, AcStepKind,
    };
    pub use crate::trace::kmp::{build_lps, generate_kmp_steps, KmpStep, KmpStepKind};
    pub use crate::trace::naive::{generate_naive_steps, NaiveStep, NaiveStepKind};
    pub use crate::trace::rabin_karp::{
        generate_rk_steps, RkStep, RkStepKind, HASH_BASE, HASH_MODULUS,
    };
}
