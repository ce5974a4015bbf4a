//! Swipe deck: the candidate queue plus the controller animating its
//! active card.
//!
//! The deck is the only place where the two meet. It translates gesture
//! input into controller calls and controller completions into queue
//! movement, and reports everything as [`Event`]s.
//!
//! ## Usage
//!
//! ```ignore
//! let mut deck = SwipeDeck::new(candidates, DeckConfig::default())?;
//! deck.begin();
//! deck.update(dx, dy);   // per pointer move
//! deck.release(dx, dy);
//! // In the animation loop:
//! deck.frame(16.0);      // returns events once the card lands
//! ```

use chrono::Utc;
use tracing::{debug, info};

use crate::animation::{AnimationController, AnimationPhase, Transform};
use crate::classify::Outcome;
use crate::error::ValidationError;
use crate::events::Event;
use crate::queue::{Candidate, CandidateId, CardQueue};
use crate::storage::DeckConfig;

#[derive(Debug, Clone)]
pub struct SwipeDeck<C> {
    queue: CardQueue<C>,
    controller: AnimationController,
}

impl<C: Candidate> SwipeDeck<C> {
    /// # Errors
    ///
    /// Fails if `config` does not validate.
    pub fn new(candidates: Vec<C>, config: DeckConfig) -> Result<Self, ValidationError> {
        Ok(Self {
            queue: CardQueue::new(candidates),
            controller: AnimationController::new(config)?,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn queue(&self) -> &CardQueue<C> {
        &self.queue
    }

    pub fn phase(&self) -> AnimationPhase {
        self.controller.phase()
    }

    pub fn transform(&self) -> Transform {
        self.controller.transform()
    }

    pub fn threshold(&self) -> f64 {
        self.controller.threshold()
    }

    /// The active candidate, `None` once the deck is exhausted.
    pub fn current(&self) -> Option<&C> {
        self.queue.current()
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_exhausted()
    }

    pub fn snapshot(&self) -> Event {
        Event::DeckSnapshot {
            phase: self.phase(),
            index: self.queue.index(),
            length: self.queue.len(),
            candidate_id: self.current_id(),
            transform: self.transform(),
            pending_outcome: self.controller.pending_outcome(),
            at: Utc::now(),
        }
    }

    fn current_id(&self) -> Option<CandidateId> {
        self.queue.current().map(Candidate::id)
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Pointer down on the active card.
    pub fn begin(&mut self) -> Option<Event> {
        let candidate_id = self.current_id()?;
        if !self.controller.begin() {
            return None;
        }
        Some(Event::GestureBegan {
            candidate_id,
            at: Utc::now(),
        })
    }

    pub fn update(&mut self, dx: f64, dy: f64) -> Option<Event> {
        let transform = self.controller.update(dx, dy)?;
        Some(Event::GestureMoved {
            transform,
            at: Utc::now(),
        })
    }

    pub fn release(&mut self, dx: f64, dy: f64) -> Option<Event> {
        let candidate_id = self.current_id()?;
        let (outcome, sample) = self.controller.release(dx, dy)?;
        info!(%candidate_id, %outcome, dx = sample.dx, dy = sample.dy, "gesture classified");
        Some(Event::GestureReleased {
            candidate_id,
            outcome,
            dx: sample.dx,
            dy: sample.dy,
            at: Utc::now(),
        })
    }

    /// Decision button: animate `outcome` without a drag.
    pub fn commit(&mut self, outcome: Outcome) -> Option<Event> {
        let candidate_id = self.current_id()?;
        if !self.controller.commit(outcome) {
            return None;
        }
        info!(%candidate_id, %outcome, "decision committed");
        Some(Event::GestureReleased {
            candidate_id,
            outcome,
            dx: 0.0,
            dy: 0.0,
            at: Utc::now(),
        })
    }

    /// Tap on the resting card asks navigation to open its detail.
    pub fn tap(&self) -> Option<Event> {
        if self.phase() != AnimationPhase::Idle {
            debug!(phase = ?self.phase(), "tap ignored");
            return None;
        }
        Some(Event::DetailRequested {
            candidate_id: self.current_id()?,
            at: Utc::now(),
        })
    }

    /// Reload from the first candidate. Only while no card is in motion.
    pub fn reset(&mut self) -> Option<Event> {
        if self.phase() != AnimationPhase::Idle {
            debug!(phase = ?self.phase(), "reset ignored");
            return None;
        }
        self.queue.reset();
        Some(Event::DeckReset { at: Utc::now() })
    }

    // ── Animation ────────────────────────────────────────────────────

    /// Step the running animation. Non-empty once the card has landed.
    pub fn frame(&mut self, dt_ms: f64) -> Vec<Event> {
        let candidate_id = self.current_id();
        let from_index = self.queue.index();
        match self.controller.frame(dt_ms, &mut self.queue) {
            Some(outcome) => self.landed(outcome, candidate_id, from_index),
            None => Vec::new(),
        }
    }

    /// Completion callback for hosts that animate the card themselves.
    pub fn complete(&mut self) -> Vec<Event> {
        let candidate_id = self.current_id();
        let from_index = self.queue.index();
        match self.controller.complete(&mut self.queue) {
            Some(outcome) => self.landed(outcome, candidate_id, from_index),
            None => Vec::new(),
        }
    }

    fn landed(
        &self,
        outcome: Outcome,
        candidate_id: Option<CandidateId>,
        from_index: usize,
    ) -> Vec<Event> {
        let at = Utc::now();
        let mut events = Vec::new();
        let Some(candidate_id) = candidate_id else {
            return events;
        };

        match outcome {
            Outcome::Cancel => {
                events.push(Event::CardSettled { candidate_id, at });
                return events;
            }
            Outcome::Invite => events.push(Event::InviteRequested { candidate_id, at }),
            Outcome::Like | Outcome::Reject => {}
        }

        events.push(Event::CardAdvanced {
            outcome,
            from_index,
            to_index: self.queue.index(),
            at,
        });
        if self.queue.is_exhausted() {
            info!(length = self.queue.len(), "deck exhausted");
            events.push(Event::DeckExhausted {
                length: self.queue.len(),
                at,
            });
        }
        events
    }
}
