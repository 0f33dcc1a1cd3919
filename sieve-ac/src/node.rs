// Automaton Node - a single state of the keyword automaton
//
// Nodes live in an arena owned by the automaton and refer to each other by
// index, so the root self-loop and the failure links need no shared ownership.

use ahash::AHashMap;
use smallvec::SmallVec;

/// Index of a node in the automaton arena
pub type NodeId = usize;

/// Index of a keyword in the automaton's keyword table
pub type KeywordId = usize;

/// The root is always the first node allocated
pub const ROOT: NodeId = 0;

/// A single automaton state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Distance from the root (root = 0)
    depth: usize,

    /// Goto transitions: symbol -> next node
    transitions: AHashMap<char, NodeId>,

    /// Failure transition, assigned during failure construction
    failure: Option<NodeId>,

    /// Keywords recognized on arrival, in discovery order
    outputs: SmallVec<[KeywordId; 2]>,

    /// Target for symbols without a goto transition (root only: itself)
    default: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(depth: usize) -> Self {
        Self {
            depth,
            transitions: AHashMap::default(),
            failure: None,
            outputs: SmallVec::new(),
            default: None,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Follow the goto function for `symbol`.
    ///
    /// Returns the registered transition, else the default target (the root
    /// loops to itself), else `None` meaning "no transition". `None` is never
    /// the same thing as a transition back to the root.
    #[inline]
    pub fn go(&self, symbol: char) -> Option<NodeId> {
        match self.transitions.get(&symbol) {
            Some(&next) => Some(next),
            None => self.default,
        }
    }

    /// The failure target.
    ///
    /// # Panics
    ///
    /// Panics if failure construction never reached this node. A sealed
    /// [`Automaton`](crate::Automaton) guarantees every node has one.
    #[inline]
    pub fn fail(&self) -> NodeId {
        match self.failure {
            Some(target) => target,
            None => panic!(
                "failure link read before construction completed (node depth {})",
                self.depth
            ),
        }
    }

    /// The failure target, if one has been assigned
    pub fn failure(&self) -> Option<NodeId> {
        self.failure
    }

    /// Keywords recognized at this node
    #[inline]
    pub fn outputs(&self) -> &[KeywordId] {
        &self.outputs
    }

    /// Iterate over the direct goto transitions (no particular order)
    pub fn transitions(&self) -> impl Iterator<Item = (char, NodeId)> + '_ {
        self.transitions.iter().map(|(&symbol, &next)| (symbol, next))
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Direct transition only, ignoring the default
    pub(crate) fn get_transition(&self, symbol: char) -> Option<NodeId> {
        self.transitions.get(&symbol).copied()
    }

    pub(crate) fn add_transition(&mut self, symbol: char, next: NodeId) {
        self.transitions.insert(symbol, next);
    }

    pub(crate) fn set_failure(&mut self, target: NodeId) {
        self.failure = Some(target);
    }

    pub(crate) fn set_default(&mut self, target: NodeId) {
        self.default = Some(target);
    }

    /// Add a keyword to the output set; already present ids are ignored
    pub(crate) fn add_output(&mut self, keyword: KeywordId) {
        if !self.outputs.contains(&keyword) {
            self.outputs.push(keyword);
        }
    }

    /// Append every keyword of `inherited`, keeping existing order
    pub(crate) fn add_outputs(&mut self, inherited: &[KeywordId]) {
        for &keyword in inherited {
            self.add_output(keyword);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = Node::new(3);
        assert_eq!(node.depth(), 3);
        assert_eq!(node.transition_count(), 0);
        assert!(node.outputs().is_empty());
        assert_eq!(node.failure(), None);
    }

    #[test]
    fn test_go_without_transition_is_absent() {
        let mut node = Node::new(1);
        node.add_transition('a', 2);

        assert_eq!(node.go('a'), Some(2));
        assert_eq!(node.go('b'), None);
    }

    #[test]
    fn test_default_self_loop() {
        let mut root = Node::new(0);
        root.add_transition('h', 1);
        root.set_default(ROOT);

        assert_eq!(root.go('h'), Some(1));
        assert_eq!(root.go('z'), Some(ROOT));
        assert_eq!(root.get_transition('z'), None);
    }

    #[test]
    fn test_outputs_keep_insertion_order_and_dedupe() {
        let mut node = Node::new(3);
        node.add_output(4);
        node.add_outputs(&[1, 4, 0]);

        assert_eq!(node.outputs(), &[4, 1, 0]);
    }

    #[test]
    fn test_fail_after_assignment() {
        let mut node = Node::new(2);
        node.set_failure(ROOT);
        assert_eq!(node.fail(), ROOT);
    }

    #[test]
    #[should_panic(expected = "failure link read before construction completed")]
    fn test_fail_before_assignment_panics() {
        Node::new(1).fail();
    }
}
