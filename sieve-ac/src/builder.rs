// Automaton Builder
//
// Validates a keyword set and turns it into a fully linked automaton:
// the goto phase builds the keyword trie, the failure phase links every
// node to its longest proper suffix that is also a trie prefix.

use crate::automaton::Automaton;
use crate::node::{KeywordId, Node, NodeId, ROOT};
use crate::{AcConfig, AcError, AcResult};
use ahash::AHashSet;
use smallvec::SmallVec;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Builder for constructing an [`Automaton`] from keywords
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    config: AcConfig,
    keywords: Vec<String>,
}

impl AutomatonBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::with_config(AcConfig::default())
    }

    /// Create a new builder with custom configuration
    pub fn with_config(config: AcConfig) -> Self {
        Self {
            config,
            keywords: Vec::new(),
        }
    }

    /// Add a single keyword
    pub fn add_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Add multiple keywords
    pub fn add_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Number of keywords added so far, duplicates included
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    pub fn config(&self) -> &AcConfig {
        &self.config
    }

    /// Validate the keywords and build the automaton.
    ///
    /// Nothing is allocated for the automaton until every keyword passed
    /// validation.
    pub fn build(self) -> AcResult<Automaton> {
        let keywords = validate(self.keywords, &self.config)?;

        let mut nodes = build_goto(&keywords);
        trace!(nodes = nodes.len(), "Goto function constructed");

        build_failure(&mut nodes);
        trace!("Failure function constructed");

        let automaton = Automaton::seal(nodes, keywords);
        debug!(
            keywords = automaton.keywords().len(),
            nodes = automaton.node_count(),
            "Built Aho-Corasick automaton"
        );

        Ok(automaton)
    }
}

/// Reject invalid input and drop duplicate keywords, keeping first occurrences
fn validate(keywords: Vec<String>, config: &AcConfig) -> AcResult<Vec<String>> {
    if keywords.is_empty() {
        return Err(AcError::NoKeywords);
    }

    if let Some(index) = keywords.iter().position(|k| k.is_empty()) {
        return Err(AcError::EmptyKeyword { index });
    }

    let mut seen = AHashSet::with_capacity(keywords.len());
    let mut unique = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        if seen.insert(keyword.clone()) {
            unique.push(keyword);
        }
    }

    if config.max_keywords > 0 && unique.len() > config.max_keywords {
        return Err(AcError::TooManyKeywords {
            count: unique.len(),
            max: config.max_keywords,
        });
    }

    if config.max_keyword_length > 0 {
        for keyword in &unique {
            let length = keyword.chars().count();
            if length > config.max_keyword_length {
                return Err(AcError::KeywordTooLong {
                    length,
                    max: config.max_keyword_length,
                });
            }
        }
    }

    Ok(unique)
}

/// Goto phase: enter every keyword into the trie, then make the root
/// loop to itself on every symbol it has no transition for.
fn build_goto(keywords: &[String]) -> Vec<Node> {
    let mut nodes = vec![Node::new(0)];

    for (id, keyword) in keywords.iter().enumerate() {
        enter(&mut nodes, keyword, id);
    }

    nodes[ROOT].set_default(ROOT);
    nodes
}

fn enter(nodes: &mut Vec<Node>, keyword: &str, id: KeywordId) {
    let mut state = ROOT;
    let mut symbols = keyword.chars().peekable();

    // Reuse the longest prefix already in the trie
    while let Some(&symbol) = symbols.peek() {
        match nodes[state].get_transition(symbol) {
            Some(next) => {
                state = next;
                symbols.next();
            }
            None => break,
        }
    }

    for symbol in symbols {
        let next = nodes.len();
        nodes.push(Node::new(nodes[state].depth() + 1));
        nodes[state].add_transition(symbol, next);
        state = next;
    }

    nodes[state].add_output(id);
}

/// Failure phase: breadth-first over the trie so that every node's failure
/// target is final before any of its children are linked.
fn build_failure(nodes: &mut [Node]) {
    let mut queue: VecDeque<NodeId> = VecDeque::with_capacity(nodes.len());

    nodes[ROOT].set_failure(ROOT);
    let depth_one = sorted_transitions(&nodes[ROOT]);
    for (_, child) in depth_one {
        nodes[child].set_failure(ROOT);
        queue.push_back(child);
    }

    while let Some(r) = queue.pop_front() {
        for (symbol, s) in sorted_transitions(&nodes[r]) {
            let target = next_state(nodes, nodes[r].fail(), symbol);
            nodes[s].set_failure(target);

            let inherited: SmallVec<[KeywordId; 4]> = SmallVec::from_slice(nodes[target].outputs());
            nodes[s].add_outputs(&inherited);

            queue.push_back(s);
        }
    }
}

/// Chase failure links from `state` until a goto transition on `symbol`
/// exists, then take it. Ends at the latest at the root, which has a
/// transition for every symbol once its default is set.
pub(crate) fn next_state(nodes: &[Node], mut state: NodeId, symbol: char) -> NodeId {
    loop {
        match nodes[state].go(symbol) {
            Some(next) => return next,
            None => state = nodes[state].fail(),
        }
    }
}

/// Transitions ordered by symbol so node numbering and traversal order do not
/// depend on hash iteration order.
fn sorted_transitions(node: &Node) -> SmallVec<[(char, NodeId); 8]> {
    let mut transitions: SmallVec<[(char, NodeId); 8]> = node.transitions().collect();
    transitions.sort_unstable();
    transitions
}
