//! Indexed candidate queue.
//!
//! The candidate list is loaded once and never mutated; the queue only moves
//! a cursor over it. `index == len` is the exhausted state.

use serde::{Deserialize, Serialize};

/// Stable identity of a candidate, as seen by collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        CandidateId(s.to_string())
    }
}

/// Anything that can sit in the deck. The payload stays opaque.
pub trait Candidate {
    fn id(&self) -> CandidateId;
}

impl Candidate for CandidateId {
    fn id(&self) -> CandidateId {
        self.clone()
    }
}

impl Candidate for String {
    fn id(&self) -> CandidateId {
        CandidateId(self.clone())
    }
}

impl Candidate for &str {
    fn id(&self) -> CandidateId {
        CandidateId((*self).to_string())
    }
}

/// Cursor position over the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeSession {
    pub index: usize,
    pub length: usize,
}

impl SwipeSession {
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.length
    }
}

#[derive(Debug, Clone)]
pub struct CardQueue<C> {
    candidates: Vec<C>,
    index: usize,
}

impl<C: Candidate> CardQueue<C> {
    pub fn new(candidates: Vec<C>) -> Self {
        Self {
            candidates,
            index: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn session(&self) -> SwipeSession {
        SwipeSession {
            index: self.index,
            length: self.candidates.len(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.candidates.len()
    }

    /// Candidates not yet swiped, including the current one.
    pub fn remaining(&self) -> usize {
        self.candidates.len().saturating_sub(self.index)
    }

    /// The active candidate, or `None` once exhausted.
    pub fn current(&self) -> Option<&C> {
        self.candidates.get(self.index)
    }

    /// Move to the next candidate. Saturates at `len`.
    pub fn advance(&mut self) {
        if self.index < self.candidates.len() {
            self.index += 1;
        }
    }

    /// Back to the first candidate ("reload").
    pub fn reset(&mut self) {
        self.index = 0;
    }
}
