//! # Swipedeck Core Library
//!
//! Decision engine for a swipeable card deck, plus an independent timed
//! "boost" session. Rendering, navigation and dialogs are left to the host;
//! the core reports everything it does as [`Event`]s.
//!
//! ## Architecture
//!
//! - **Gesture tracking**: pointer deltas for the active card
//! - **Classification**: pure mapping from a released delta to an [`Outcome`]
//! - **Animation**: frame-driven controller that owns the card transform and
//!   advances the queue exactly once per committed outcome
//! - **Queue**: indexed, read-only candidate list with an exhausted state
//! - **Boost**: countdown state machine and its async tick driver
//!
//! Neither state machine runs its own thread. The deck is stepped by the
//! host's animation loop; the boost is stepped by [`BoostTimer`] or by any
//! caller of [`BoostSession::tick`].

pub mod animation;
pub mod boost;
pub mod classify;
pub mod deck;
pub mod error;
pub mod events;
pub mod gesture;
pub mod queue;
pub mod storage;

pub use animation::{AnimationController, AnimationPhase, Transform};
pub use boost::{BoostSession, BoostState, BoostTimer};
pub use classify::{classify, Outcome};
pub use deck::SwipeDeck;
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use gesture::{GestureSample, GestureTracker};
pub use queue::{Candidate, CandidateId, CardQueue, SwipeSession};
pub use storage::{BoostConfig, Config, DeckConfig, SpringConfig};
