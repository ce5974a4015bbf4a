use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationPhase, Transform};
use crate::classify::Outcome;
use crate::queue::CandidateId;

/// Every state change in the core produces an Event.
/// Renderers, navigation and alert collaborators consume them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    GestureBegan {
        candidate_id: CandidateId,
        at: DateTime<Utc>,
    },
    /// Live drag position for rendering.
    GestureMoved {
        transform: Transform,
        at: DateTime<Utc>,
    },
    /// Drag released (or a decision button pressed) and classified.
    GestureReleased {
        candidate_id: CandidateId,
        outcome: Outcome,
        dx: f64,
        dy: f64,
        at: DateTime<Utc>,
    },
    /// A cancelled gesture finished springing back to rest.
    CardSettled {
        candidate_id: CandidateId,
        at: DateTime<Utc>,
    },
    /// Outcome was Invite; the alert collaborator should confirm it.
    InviteRequested {
        candidate_id: CandidateId,
        at: DateTime<Utc>,
    },
    CardAdvanced {
        outcome: Outcome,
        from_index: usize,
        to_index: usize,
        at: DateTime<Utc>,
    },
    /// No candidates left; the renderer should offer a reload.
    DeckExhausted {
        length: usize,
        at: DateTime<Utc>,
    },
    DeckReset {
        at: DateTime<Utc>,
    },
    /// Tap on the resting active card: open its detail view.
    DetailRequested {
        candidate_id: CandidateId,
        at: DateTime<Utc>,
    },
    DeckSnapshot {
        phase: AnimationPhase,
        index: usize,
        length: usize,
        candidate_id: Option<CandidateId>,
        transform: Transform,
        /// Outcome of the card in flight, `None` unless animating.
        pending_outcome: Option<Outcome>,
        at: DateTime<Utc>,
    },
    /// Boost started. Carries the full duration for the "boosted" notice.
    BoostActivated {
        total_ms: u64,
        at: DateTime<Utc>,
    },
    BoostTicked {
        remaining_ms: u64,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
    /// Boost ran out on its own.
    BoostExpired {
        total_ms: u64,
        at: DateTime<Utc>,
    },
    /// Boost stopped early by an external cause.
    BoostDeactivated {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    BoostSnapshot {
        active: bool,
        remaining_ms: u64,
        total_ms: u64,
        progress_pct: f64,
        countdown: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Snake-case name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::GestureBegan { .. } => "gesture_began",
            Event::GestureMoved { .. } => "gesture_moved",
            Event::GestureReleased { .. } => "gesture_released",
            Event::CardSettled { .. } => "card_settled",
            Event::InviteRequested { .. } => "invite_requested",
            Event::CardAdvanced { .. } => "card_advanced",
            Event::DeckExhausted { .. } => "deck_exhausted",
            Event::DeckReset { .. } => "deck_reset",
            Event::DetailRequested { .. } => "detail_requested",
            Event::DeckSnapshot { .. } => "deck_snapshot",
            Event::BoostActivated { .. } => "boost_activated",
            Event::BoostTicked { .. } => "boost_ticked",
            Event::BoostExpired { .. } => "boost_expired",
            Event::BoostDeactivated { .. } => "boost_deactivated",
            Event::BoostSnapshot { .. } => "boost_snapshot",
        }
    }
}
