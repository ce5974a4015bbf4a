//! Pointer tracking for the active card.
//!
//! Turns raw pointer callbacks into a cumulative displacement. Phase gating
//! lives in the animation controller; the tracker only knows whether a
//! gesture is open.

use serde::{Deserialize, Serialize};

/// Cumulative displacement since the gesture started, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GestureSample {
    pub dx: f64,
    pub dy: f64,
}

impl GestureSample {
    pub const ORIGIN: GestureSample = GestureSample { dx: 0.0, dy: 0.0 };

    /// Build a sample, collapsing non-finite deltas to the origin.
    pub fn new(dx: f64, dy: f64) -> Self {
        if dx.is_finite() && dy.is_finite() {
            Self { dx, dy }
        } else {
            Self::ORIGIN
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    sample: Option<GestureSample>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.sample.is_some()
    }

    /// Last reported displacement of the open gesture.
    pub fn sample(&self) -> Option<GestureSample> {
        self.sample
    }

    /// Open a gesture at the origin. Returns `false` if one is already open.
    pub fn begin(&mut self) -> bool {
        if self.sample.is_some() {
            return false;
        }
        self.sample = Some(GestureSample::ORIGIN);
        true
    }

    /// Record a live move. `None` when no gesture is open.
    pub fn update(&mut self, dx: f64, dy: f64) -> Option<GestureSample> {
        let slot = self.sample.as_mut()?;
        *slot = GestureSample::new(dx, dy);
        Some(*slot)
    }

    /// Close the gesture and return its final displacement.
    pub fn release(&mut self, dx: f64, dy: f64) -> Option<GestureSample> {
        self.sample.take()?;
        Some(GestureSample::new(dx, dy))
    }
}
