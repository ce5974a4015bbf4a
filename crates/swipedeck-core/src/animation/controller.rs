//! Animation controller for the active card.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging -> Animating -> Idle
//!   \_________________/
//!        (button commit)
//! ```
//!
//! The controller is the only writer of the card transform. It is frame
//! driven: the host calls `frame(dt)` from its animation loop, or
//! `complete()` if it runs the motion itself and only reports the end.
//! Either way completion happens once, and only non-cancel outcomes advance
//! the queue.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::motion::{Motion, Offset};
use crate::classify::{classify, Outcome};
use crate::error::ValidationError;
use crate::gesture::{GestureSample, GestureTracker};
use crate::queue::{Candidate, CardQueue};
use crate::storage::DeckConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationPhase {
    Idle,
    Dragging,
    Animating,
}

/// What the renderer applies to the active card.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotate_deg: f64,
}

/// Rotation for a horizontal displacement: `[-w/2, 0, w/2]` maps linearly
/// to `[-max, 0, max]`, clamped outside that range.
pub fn rotation_for(translate_x: f64, viewport_width: f64, max_deg: f64) -> f64 {
    let half = viewport_width / 2.0;
    if half.is_nan() || half <= 0.0 || !translate_x.is_finite() {
        return 0.0;
    }
    (translate_x / half).clamp(-1.0, 1.0) * max_deg
}

#[derive(Debug, Clone)]
struct Flight {
    outcome: Outcome,
    motion: Motion,
}

#[derive(Debug, Clone)]
pub struct AnimationController {
    config: DeckConfig,
    phase: AnimationPhase,
    tracker: GestureTracker,
    offset: Offset,
    flight: Option<Flight>,
}

impl AnimationController {
    /// Build an idle controller.
    ///
    /// # Errors
    ///
    /// Returns the first field of `config` that fails validation. A zero
    /// viewport would make every drift a decision.
    pub fn new(config: DeckConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self {
            config,
            phase: AnimationPhase::Idle,
            tracker: GestureTracker::new(),
            offset: Offset::ORIGIN,
            flight: None,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Absolute pixel threshold used for classification.
    pub fn threshold(&self) -> f64 {
        self.config.threshold * self.config.viewport_width
    }

    /// Outcome of the animation in flight, if any.
    pub fn pending_outcome(&self) -> Option<Outcome> {
        self.flight.as_ref().map(|f| f.outcome)
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translate_x: self.offset.x,
            translate_y: self.offset.y,
            rotate_deg: rotation_for(
                self.offset.x,
                self.config.viewport_width,
                self.config.max_rotation_deg,
            ),
        }
    }

    /// Where a committed outcome sends the card.
    pub fn target_for(&self, outcome: Outcome) -> Offset {
        let margin = self.config.offscreen_margin;
        match outcome {
            Outcome::Like => Offset::new(self.config.viewport_width + margin, 0.0),
            Outcome::Reject => Offset::new(-self.config.viewport_width - margin, 0.0),
            Outcome::Invite => Offset::new(0.0, -self.config.viewport_height - margin),
            Outcome::Cancel => Offset::ORIGIN,
        }
    }

    // ── Gesture input ────────────────────────────────────────────────

    /// Start a drag. Ignored unless idle.
    pub fn begin(&mut self) -> bool {
        if self.phase != AnimationPhase::Idle {
            debug!(phase = ?self.phase, "begin ignored");
            return false;
        }
        self.tracker.begin();
        self.offset = Offset::ORIGIN;
        self.phase = AnimationPhase::Dragging;
        true
    }

    /// Follow the pointer. Returns the live transform while dragging.
    pub fn update(&mut self, dx: f64, dy: f64) -> Option<Transform> {
        if self.phase != AnimationPhase::Dragging {
            return None;
        }
        let sample = self.tracker.update(dx, dy)?;
        self.offset = Offset::new(sample.dx, sample.dy);
        Some(self.transform())
    }

    /// Finish the drag, classify it and start the matching animation.
    /// Every release animates, including a cancel.
    pub fn release(&mut self, dx: f64, dy: f64) -> Option<(Outcome, GestureSample)> {
        if self.phase != AnimationPhase::Dragging {
            debug!(phase = ?self.phase, "release ignored");
            return None;
        }
        let sample = self
            .tracker
            .release(dx, dy)
            .unwrap_or(GestureSample::ORIGIN);
        self.offset = Offset::new(sample.dx, sample.dy);
        let outcome = classify(sample.dx, sample.dy, self.threshold());
        self.launch(outcome);
        Some((outcome, sample))
    }

    /// Commit a decision without a drag (like/nope/invite buttons).
    /// A cancel has nothing to animate and is ignored.
    pub fn commit(&mut self, outcome: Outcome) -> bool {
        if self.phase != AnimationPhase::Idle || outcome == Outcome::Cancel {
            debug!(phase = ?self.phase, %outcome, "commit ignored");
            return false;
        }
        self.offset = Offset::ORIGIN;
        self.launch(outcome);
        true
    }

    fn launch(&mut self, outcome: Outcome) {
        let to = self.target_for(outcome);
        let motion = match outcome {
            Outcome::Cancel => Motion::spring(self.offset, to, self.config.spring),
            _ => Motion::timing(self.offset, to, self.config.animation_duration_ms),
        };
        self.flight = Some(Flight { outcome, motion });
        self.phase = AnimationPhase::Animating;
    }

    // ── Animation driving ────────────────────────────────────────────

    /// Advance the in-flight motion by `dt_ms`. When it finishes, completes
    /// the transition and returns the outcome.
    pub fn frame<C: Candidate>(&mut self, dt_ms: f64, queue: &mut CardQueue<C>) -> Option<Outcome> {
        let flight = self.flight.as_mut()?;
        self.offset = flight.motion.step(dt_ms);
        if flight.motion.is_finished() {
            self.complete(queue)
        } else {
            None
        }
    }

    /// Animation-completion callback. Advances the queue once for a
    /// committed outcome, then parks the transform at the origin.
    pub fn complete<C: Candidate>(&mut self, queue: &mut CardQueue<C>) -> Option<Outcome> {
        if self.phase != AnimationPhase::Animating {
            return None;
        }
        let flight = self.flight.take()?;
        if flight.outcome.advances() {
            queue.advance();
        }
        self.offset = Offset::ORIGIN;
        self.phase = AnimationPhase::Idle;
        Some(flight.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> AnimationController {
        AnimationController::new(DeckConfig {
            viewport_width: 400.0,
            viewport_height: 800.0,
            ..DeckConfig::default()
        })
        .unwrap()
    }

    fn run_to_end(c: &mut AnimationController, q: &mut CardQueue<&'static str>) -> Outcome {
        for _ in 0..1000 {
            if let Some(outcome) = c.frame(16.0, q) {
                return outcome;
            }
        }
        panic!("animation never completed");
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        let err = AnimationController::new(DeckConfig {
            viewport_width: 0.0,
            ..DeckConfig::default()
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidDimension {
            field: "deck.viewport_width".into(),
            value: 0.0,
        });
        assert!(matches!(
            AnimationController::new(DeckConfig {
                threshold: 0.0,
                ..DeckConfig::default()
            }),
            Err(ValidationError::ThresholdOutOfRange(_))
        ));
    }

    #[test]
    fn pending_outcome_follows_flight() {
        let mut c = controller();
        let mut q = CardQueue::new(vec!["A", "B"]);
        assert_eq!(c.pending_outcome(), None);
        c.begin();
        assert_eq!(c.pending_outcome(), None);
        c.release(0.0, -200.0);
        assert_eq!(c.pending_outcome(), Some(Outcome::Invite));
        c.complete(&mut q);
        assert_eq!(c.pending_outcome(), None);
    }

    #[test]
    fn threshold_is_fraction_of_width() {
        assert_eq!(controller().threshold(), 100.0);
    }

    #[test]
    fn like_flies_right_then_advances() {
        let mut c = controller();
        let mut q = CardQueue::new(vec!["A", "B", "C"]);
        assert!(c.begin());
        c.update(120.0, 5.0);
        let (outcome, _) = c.release(200.0, 0.0).unwrap();
        assert_eq!(outcome, Outcome::Like);
        assert_eq!(c.phase(), AnimationPhase::Animating);

        c.frame(125.0, &mut q);
        assert!(c.transform().translate_x > 200.0);
        assert_eq!(q.index(), 0);

        assert_eq!(run_to_end(&mut c, &mut q), Outcome::Like);
        assert_eq!(q.current(), Some(&"B"));
        assert_eq!(c.phase(), AnimationPhase::Idle);
        assert_eq!(c.transform(), Transform::default());
    }

    #[test]
    fn cancel_springs_back_without_advancing() {
        let mut c = controller();
        let mut q = CardQueue::new(vec!["A", "B"]);
        c.begin();
        let (outcome, _) = c.release(10.0, 10.0).unwrap();
        assert_eq!(outcome, Outcome::Cancel);
        assert_eq!(run_to_end(&mut c, &mut q), Outcome::Cancel);
        assert_eq!(q.index(), 0);
        assert_eq!(c.transform(), Transform::default());
    }

    #[test]
    fn completion_fires_once() {
        let mut c = controller();
        let mut q = CardQueue::new(vec!["A", "B", "C"]);
        c.begin();
        c.release(-300.0, 0.0);
        assert_eq!(c.complete(&mut q), Some(Outcome::Reject));
        assert_eq!(c.complete(&mut q), None);
        assert_eq!(c.frame(16.0, &mut q), None);
        assert_eq!(q.index(), 1);
    }

    #[test]
    fn begin_is_ignored_while_busy() {
        let mut c = controller();
        c.begin();
        assert!(!c.begin());
        c.release(300.0, 0.0);
        assert!(!c.begin());
        assert_eq!(c.phase(), AnimationPhase::Animating);
    }

    #[test]
    fn update_and_release_need_a_drag() {
        let mut c = controller();
        assert!(c.update(10.0, 0.0).is_none());
        assert!(c.release(300.0, 0.0).is_none());
        assert_eq!(c.phase(), AnimationPhase::Idle);
    }

    #[test]
    fn non_finite_release_is_a_cancel() {
        let mut c = controller();
        c.begin();
        let (outcome, sample) = c.release(f64::NAN, 0.0).unwrap();
        assert_eq!(outcome, Outcome::Cancel);
        assert_eq!(sample, GestureSample::ORIGIN);
        assert_eq!(c.phase(), AnimationPhase::Animating);
    }

    #[test]
    fn targets_per_outcome() {
        let c = controller();
        assert_eq!(c.target_for(Outcome::Like), Offset::new(500.0, 0.0));
        assert_eq!(c.target_for(Outcome::Reject), Offset::new(-500.0, 0.0));
        assert_eq!(c.target_for(Outcome::Invite), Offset::new(0.0, -900.0));
        assert_eq!(c.target_for(Outcome::Cancel), Offset::ORIGIN);
    }

    #[test]
    fn rotation_is_clamped_interpolation() {
        assert_eq!(rotation_for(0.0, 400.0, 10.0), 0.0);
        assert_eq!(rotation_for(100.0, 400.0, 10.0), 5.0);
        assert_eq!(rotation_for(-200.0, 400.0, 10.0), -10.0);
        assert_eq!(rotation_for(900.0, 400.0, 10.0), 10.0);
        assert_eq!(rotation_for(50.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn drag_transform_tracks_pointer() {
        let mut c = controller();
        c.begin();
        let t = c.update(100.0, -40.0).unwrap();
        assert_eq!(t.translate_x, 100.0);
        assert_eq!(t.translate_y, -40.0);
        assert_eq!(t.rotate_deg, 5.0);
    }

    #[test]
    fn button_commit_starts_from_idle_only() {
        let mut c = controller();
        let mut q = CardQueue::new(vec!["A", "B"]);
        assert!(!c.commit(Outcome::Cancel));
        assert!(c.commit(Outcome::Invite));
        assert!(!c.commit(Outcome::Like));
        assert_eq!(run_to_end(&mut c, &mut q), Outcome::Invite);
        assert_eq!(q.index(), 1);
    }
}
