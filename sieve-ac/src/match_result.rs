// Match Result - one located keyword occurrence

use crate::node::KeywordId;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// A keyword occurrence found by the automaton.
///
/// `start` and `end` are `char` offsets into the scanned text, `end` being
/// exclusive, so `end - start` is always the keyword's length in chars.
///
/// Offsets count Unicode scalar values, not bytes and not UTF-16 code units.
/// A character outside the Basic Multilingual Plane (most emoji, for
/// instance) advances offsets by 1, where a UTF-16 count would advance by 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Match<'a> {
    #[serde(skip)]
    keyword_id: KeywordId,
    keyword: &'a str,
    start: usize,
    end: usize,
}

impl<'a> Match<'a> {
    pub(crate) fn new(keyword_id: KeywordId, keyword: &'a str, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            keyword_id,
            keyword,
            start,
            end,
        }
    }

    /// The matched keyword
    pub fn keyword(&self) -> &'a str {
        self.keyword
    }

    /// Index of the keyword in [`Automaton::keywords`](crate::Automaton::keywords)
    pub fn keyword_id(&self) -> KeywordId {
        self.keyword_id
    }

    /// Offset of the first matched char
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset just past the last matched char
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} [{}..{})", self.keyword, self.start, self.end)
    }
}
