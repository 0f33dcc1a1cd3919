// Matcher - single pass scanning over a built automaton
//
// The only mutable scan state is the current node and the cursor, both kept
// in a `Scanner`. The automaton itself is only ever borrowed, so any number
// of scanners can run over it at once.

use crate::automaton::Automaton;
use crate::match_result::Match;
use crate::node::{KeywordId, NodeId};
use std::slice;
use std::str::Chars;

/// Incremental scanner that carries its state across calls.
///
/// Feeding a text in pieces reports exactly the matches a one-shot scan of
/// the concatenated text would, with offsets counted from the first symbol
/// fed since creation or the last [`reset`](Scanner::reset).
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    automaton: &'a Automaton,
    state: NodeId,
    position: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(automaton: &'a Automaton) -> Self {
        Self {
            automaton,
            state: automaton.root(),
            position: 0,
        }
    }

    /// Consume one symbol and return the matches ending at it
    #[inline]
    pub fn feed(&mut self, symbol: char) -> Outputs<'a> {
        self.state = self.automaton.next_state(self.state, symbol);
        self.position += 1;

        Outputs {
            automaton: self.automaton,
            keywords: self.automaton.outputs_at(self.state).iter(),
            end: self.position,
        }
    }

    /// Consume every symbol of `text`, collecting the matches
    pub fn feed_str(&mut self, text: &str) -> Vec<Match<'a>> {
        let mut matches = Vec::new();
        for symbol in text.chars() {
            matches.extend(self.feed(symbol));
        }
        matches
    }

    /// Go back to the root and restart offsets at zero
    pub fn reset(&mut self) {
        self.state = self.automaton.root();
        self.position = 0;
    }

    /// Number of symbols consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current automaton node
    pub fn state(&self) -> NodeId {
        self.state
    }

    pub fn automaton(&self) -> &'a Automaton {
        self.automaton
    }
}

/// Matches ending at a single position, in the node's output order
#[derive(Debug, Clone)]
pub struct Outputs<'a> {
    automaton: &'a Automaton,
    keywords: slice::Iter<'a, KeywordId>,
    end: usize,
}

impl<'a> Outputs<'a> {
    fn empty(automaton: &'a Automaton) -> Self {
        Self {
            automaton,
            keywords: slice::Iter::default(),
            end: 0,
        }
    }
}

impl<'a> Iterator for Outputs<'a> {
    type Item = Match<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let &keyword_id = self.keywords.next()?;
        Some(self.automaton.make_match(keyword_id, self.end))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keywords.size_hint()
    }
}

impl ExactSizeIterator for Outputs<'_> {}

/// Lazy iterator over every match in a text, in scan order.
///
/// Matches come out ordered by end offset; matches sharing an end offset come
/// out in the order their keywords were recorded at the node.
#[derive(Debug, Clone)]
pub struct FindIter<'a, 't> {
    scanner: Scanner<'a>,
    symbols: Chars<'t>,
    pending: Outputs<'a>,
}

impl<'a, 't> FindIter<'a, 't> {
    pub(crate) fn new(automaton: &'a Automaton, text: &'t str) -> Self {
        Self {
            scanner: Scanner::new(automaton),
            symbols: text.chars(),
            pending: Outputs::empty(automaton),
        }
    }
}

impl<'a> Iterator for FindIter<'a, '_> {
    type Item = Match<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(found) = self.pending.next() {
                return Some(found);
            }
            let symbol = self.symbols.next()?;
            self.pending = self.scanner.feed(symbol);
        }
    }
}
