//! Sieve AC - Aho-Corasick keyword automaton
//!
//! This crate builds a deterministic automaton from a set of keywords and
//! scans text with it in a single left-to-right pass, reporting every
//! occurrence of every keyword (overlapping ones included).
//!
//! ## Overview
//!
//! Construction runs in two phases. The goto phase enters every keyword into
//! a trie, sharing common prefixes. The failure phase walks the trie
//! breadth-first and links every node to the node for its longest proper
//! suffix that is also a keyword prefix, inheriting that node's outputs.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │           AutomatonBuilder                      │
//! │  (validation, goto trie, failure links)         │
//! └──────────────┬──────────────────────────────────┘
//!                │
//!                v
//! ┌─────────────────────────────────────────────────┐
//! │         Automaton (immutable node arena)        │
//! │  - nodes: Vec<Node>                             │
//! │  - keywords: Vec<String>                        │
//! └──────────────┬──────────────────────────────────┘
//!                │
//!                v
//! ┌─────────────────────────────────────────────────┐
//! │         Matching                                │
//! │  - find_iter / find_all / contains_match        │
//! │  - Scanner (state carried across calls)         │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use sieve_ac::Automaton;
//!
//! let automaton = Automaton::new(["he", "she", "his", "hers"]).unwrap();
//! let found: Vec<_> = automaton
//!     .find_iter("ushers")
//!     .map(|m| (m.keyword(), m.start(), m.end()))
//!     .collect();
//!
//! assert_eq!(found, vec![("she", 1, 4), ("he", 2, 4), ("hers", 2, 6)]);
//! ```
//!
//! Offsets are measured in `char`s, the symbol unit the automaton runs on.

mod automaton;
mod builder;
mod match_result;
mod matcher;
mod node;

#[cfg(test)]
mod perf;

pub use automaton::{aho_corasick, Automaton, AutomatonStats, StringMatcher};
pub use builder::AutomatonBuilder;
pub use match_result::Match;
pub use matcher::{FindIter, Outputs, Scanner};
pub use node::{KeywordId, Node, NodeId};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while building an automaton
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AcError {
    #[error("No keywords provided")]
    NoKeywords,

    #[error("Keyword at position {index} is empty")]
    EmptyKeyword { index: usize },

    #[error("Keyword too long: {length} chars (max: {max})")]
    KeywordTooLong { length: usize, max: usize },

    #[error("Too many keywords: {count} (max: {max})")]
    TooManyKeywords { count: usize, max: usize },
}

/// Result type for automaton operations
pub type AcResult<T> = Result<T, AcError>;

/// Optional limits applied when building an automaton.
///
/// The default imposes no limit, so any non-empty set of non-empty keywords
/// builds. Limits are opt-in through [`AutomatonBuilder::with_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcConfig {
    /// Maximum number of distinct keywords (0 = unlimited)
    pub max_keywords: usize,

    /// Maximum keyword length in chars (0 = unlimited)
    pub max_keyword_length: usize,
}

impl AcConfig {
    /// Limits suited to untrusted keyword lists
    pub fn bounded() -> Self {
        Self {
            max_keywords: 10_000,
            max_keyword_length: 4096,
        }
    }
}
