//! Step-trace generators for the four search algorithms.
//!
//! Every generator is a pure function from its text and pattern inputs
//! to an ordered `Vec` of step records. Nothing is shared between calls: each
//! invocation builds its own tables, tries, and histories from scratch
//! and the returned steps are immutable snapshots. Calling a generator
//! twice with the same inputs yields deep-equal traces.

pub mod aho_corasick;
pub mod kmp;
pub mod naive;
pub mod rabin_karp;

pub use aho_corasick::generate_ac_steps;
pub use kmp::generate_kmp_steps;
pub use naive::generate_naive_steps;
pub use rabin_karp::generate_rk_steps;
