// Automaton - the sealed, immutable keyword automaton
//
// Owns the node arena and the keyword table. Every query borrows it, so a
// single automaton can serve any number of concurrent scans.

use crate::builder::{self, AutomatonBuilder};
use crate::match_result::Match;
use crate::matcher::{FindIter, Scanner};
use crate::node::{KeywordId, Node, NodeId, ROOT};
use crate::AcResult;
use serde::Serialize;
use std::fmt;

/// Common interface of string matchers
pub trait StringMatcher {
    /// Every match in `text`, in scan order
    fn find_matches<'a>(&'a self, text: &str) -> Vec<Match<'a>>;

    /// Whether `text` contains at least one match
    fn contains_match(&self, text: &str) -> bool;
}

/// Build an Aho-Corasick automaton with the default configuration
pub fn aho_corasick<I, S>(keywords: I) -> AcResult<Automaton>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Automaton::new(keywords)
}

/// Size figures of a built automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutomatonStats {
    pub keywords: usize,
    pub nodes: usize,
    pub transitions: usize,
    pub max_depth: usize,
    /// Nodes with a non-empty output set
    pub accepting_nodes: usize,
}

/// An immutable Aho-Corasick automaton
#[derive(Clone)]
pub struct Automaton {
    nodes: Vec<Node>,

    /// Distinct keywords, in first insertion order
    keywords: Vec<String>,

    /// Keyword lengths in chars, indexed like `keywords`
    keyword_lens: Vec<usize>,
}

impl Automaton {
    /// Build an automaton from `keywords` with the default configuration
    pub fn new<I, S>(keywords: I) -> AcResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AutomatonBuilder::new().add_keywords(keywords).build()
    }

    pub fn builder() -> AutomatonBuilder {
        AutomatonBuilder::new()
    }

    /// Take ownership of fully linked nodes.
    ///
    /// # Panics
    ///
    /// Panics if any node is missing its failure link; that is a builder bug.
    pub(crate) fn seal(nodes: Vec<Node>, keywords: Vec<String>) -> Self {
        if let Some(id) = nodes.iter().position(|node| node.failure().is_none()) {
            panic!("automaton node {} has no failure link after construction", id);
        }

        let keyword_lens = keywords.iter().map(|k| k.chars().count()).collect();
        Self {
            nodes,
            keywords,
            keyword_lens,
        }
    }

    /// The keywords this automaton recognizes, duplicates removed
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn keyword(&self, id: KeywordId) -> Option<&str> {
        self.keywords.get(id).map(String::as_str)
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The state reached from `state` on `symbol`, following failure links
    /// as needed.
    ///
    /// # Panics
    ///
    /// Panics if `state` is not a node of this automaton.
    #[inline]
    pub fn next_state(&self, state: NodeId, symbol: char) -> NodeId {
        builder::next_state(&self.nodes, state, symbol)
    }

    #[inline]
    pub(crate) fn outputs_at(&self, state: NodeId) -> &[KeywordId] {
        self.nodes[state].outputs()
    }

    #[inline]
    pub(crate) fn make_match(&self, keyword_id: KeywordId, end: usize) -> Match<'_> {
        let start = end - self.keyword_lens[keyword_id];
        Match::new(keyword_id, &self.keywords[keyword_id], start, end)
    }

    /// Lazily iterate over every match in `text`
    pub fn find_iter<'a, 't>(&'a self, text: &'t str) -> FindIter<'a, 't> {
        FindIter::new(self, text)
    }

    /// Collect every match in `text`
    pub fn find_all(&self, text: &str) -> Vec<Match<'_>> {
        self.find_iter(text).collect()
    }

    /// The first match a full scan would report, without scanning further
    pub fn first_match(&self, text: &str) -> Option<Match<'_>> {
        self.find_iter(text).next()
    }

    /// Whether any keyword occurs in `text`; stops at the first match
    pub fn contains_match(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// A scanner positioned at the root
    pub fn scanner(&self) -> Scanner<'_> {
        Scanner::new(self)
    }

    pub fn stats(&self) -> AutomatonStats {
        AutomatonStats {
            keywords: self.keywords.len(),
            nodes: self.nodes.len(),
            transitions: self.nodes.iter().map(Node::transition_count).sum(),
            max_depth: self.nodes.iter().map(Node::depth).max().unwrap_or(0),
            accepting_nodes: self.nodes.iter().filter(|n| !n.outputs().is_empty()).count(),
        }
    }
}

impl StringMatcher for Automaton {
    fn find_matches<'a>(&'a self, text: &str) -> Vec<Match<'a>> {
        self.find_all(text)
    }

    fn contains_match(&self, text: &str) -> bool {
        Automaton::contains_match(self, text)
    }
}

impl fmt::Debug for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("keywords", &self.keywords)
            .field("node_count", &self.nodes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "These are the words she spoke. What's his is hers.";

    fn classic() -> Automaton {
        Automaton::new(["he", "she", "his", "hers"]).unwrap()
    }

    #[test]
    fn test_classic_scenario() {
        let ac = classic();
        let found: Vec<_> = ac
            .find_all(TEXT)
            .iter()
            .map(|m| (m.keyword(), m.start(), m.end()))
            .collect();

        assert_eq!(
            found,
            vec![
                ("he", 1, 3),
                ("he", 11, 13),
                ("she", 20, 23),
                ("he", 21, 23),
                ("his", 38, 41),
                ("he", 45, 47),
                ("hers", 45, 49),
            ]
        );
        assert!(ac.contains_match(TEXT));
    }

    #[test]
    fn test_keywords_accessor() {
        let ac = classic();
        assert_eq!(ac.keywords(), &["he", "she", "his", "hers"]);
        assert_eq!(ac.keyword(2), Some("his"));
        assert_eq!(ac.keyword(4), None);
    }

    #[test]
    fn test_empty_text() {
        let ac = classic();
        assert!(ac.find_all("").is_empty());
        assert!(!ac.contains_match(""));
        assert_eq!(ac.first_match(""), None);
    }

    #[test]
    fn test_first_match_agrees_with_find_all() {
        let ac = classic();
        let all = ac.find_all("ushers");
        assert_eq!(ac.first_match("ushers"), all.first().copied());
        assert_eq!(all[0].keyword(), "she");
    }

    #[test]
    fn test_duplicate_keywords_are_idempotent() {
        let ac = Automaton::new(["ab", "ab", "b"]).unwrap();
        assert_eq!(ac.keywords(), &["ab", "b"]);
        assert_eq!(ac.find_all("ab").len(), 2);
    }

    #[test]
    fn test_string_matcher_trait_object() {
        let matcher: Box<dyn StringMatcher> = Box::new(aho_corasick(["cat"]).unwrap());
        assert!(matcher.contains_match("concatenate"));
        assert!(!matcher.contains_match("dog"));
        assert_eq!(matcher.find_matches("cat cat").len(), 2);
    }

    #[test]
    fn test_root_failure_is_itself() {
        let ac = classic();
        let root = ac.node(ac.root()).unwrap();
        assert_eq!(root.fail(), ac.root());
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn test_stats() {
        let stats = classic().stats();
        // root, h, he, her, hers, hi, his, s, sh, she
        assert_eq!(stats.nodes, 10);
        assert_eq!(stats.transitions, 9);
        assert_eq!(stats.keywords, 4);
        assert_eq!(stats.max_depth, 4);
        assert_eq!(stats.accepting_nodes, 4);
    }

    #[test]
    fn test_automaton_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Automaton>();
    }

    #[test]
    #[should_panic(expected = "has no failure link")]
    fn test_seal_rejects_unlinked_nodes() {
        Automaton::seal(vec![Node::new(0)], vec!["x".to_string()]);
    }
}
