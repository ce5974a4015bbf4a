//! Boost session state machine.
//!
//! ```text
//! Inactive -> Active -> Inactive
//! ```
//!
//! Like the deck, the session has no internal thread. Whoever owns the
//! periodic schedule calls `tick()` once per `tick_interval_ms`; see
//! [`super::BoostTimer`] for the async driver.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::events::Event;
use crate::storage::BoostConfig;

/// Published boost state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostState {
    pub active: bool,
    pub remaining_ms: u64,
    pub total_ms: u64,
}

impl BoostState {
    /// 0.0 .. 100.0 elapsed share of the boost. Always 0 while inactive.
    pub fn progress_pct(&self) -> f64 {
        if !self.active || self.total_ms == 0 {
            return 0.0;
        }
        let elapsed = self.total_ms.saturating_sub(self.remaining_ms);
        elapsed as f64 / self.total_ms as f64 * 100.0
    }

    pub fn countdown(&self) -> String {
        format_countdown(self.remaining_ms)
    }
}

/// Render milliseconds as `m:ss`. Partial seconds are floored, not rounded,
/// so `1_500` reads `0:01`.
pub fn format_countdown(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    format!("{minutes}:{seconds:02}")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostSession {
    config: BoostConfig,
    active: bool,
    remaining_ms: u64,
}

impl BoostSession {
    /// Create an inactive session.
    ///
    /// # Errors
    ///
    /// Rejects a config that could never expire (zero tick or total) or
    /// whose tick is longer than the boost.
    pub fn new(config: BoostConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self::inactive(config))
    }

    fn inactive(config: BoostConfig) -> Self {
        Self {
            remaining_ms: config.total_ms,
            config,
            active: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.config.total_ms
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.config.tick_interval_ms
    }

    pub fn state(&self) -> BoostState {
        BoostState {
            active: self.active,
            remaining_ms: self.remaining_ms,
            total_ms: self.config.total_ms,
        }
    }

    pub fn progress_pct(&self) -> f64 {
        self.state().progress_pct()
    }

    pub fn snapshot(&self) -> Event {
        let state = self.state();
        Event::BoostSnapshot {
            active: state.active,
            remaining_ms: state.remaining_ms,
            total_ms: state.total_ms,
            progress_pct: state.progress_pct(),
            countdown: state.countdown(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the boost. Ignored if already active.
    pub fn activate(&mut self) -> Option<Event> {
        if self.active {
            debug!("boost already active");
            return None;
        }
        self.active = true;
        self.remaining_ms = self.config.total_ms;
        info!(total_ms = self.config.total_ms, "boost activated");
        Some(Event::BoostActivated {
            total_ms: self.config.total_ms,
            at: Utc::now(),
        })
    }

    /// One period elapsed. Returns `BoostExpired` when the countdown
    /// runs out; a tick while inactive does nothing.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.active {
            return None;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(self.config.tick_interval_ms);
        if self.remaining_ms == 0 {
            self.active = false;
            self.remaining_ms = self.config.total_ms;
            info!("boost expired");
            return Some(Event::BoostExpired {
                total_ms: self.config.total_ms,
                at: Utc::now(),
            });
        }
        Some(Event::BoostTicked {
            remaining_ms: self.remaining_ms,
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        })
    }

    /// Stop early. Ignored if inactive.
    pub fn deactivate(&mut self) -> Option<Event> {
        if !self.active {
            return None;
        }
        let remaining_ms = self.remaining_ms;
        self.active = false;
        self.remaining_ms = self.config.total_ms;
        info!(remaining_ms, "boost deactivated");
        Some(Event::BoostDeactivated {
            remaining_ms,
            at: Utc::now(),
        })
    }
}

impl Default for BoostSession {
    fn default() -> Self {
        Self::inactive(BoostConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive_with_full_remaining() {
        let session = BoostSession::default();
        assert!(!session.is_active());
        assert_eq!(session.remaining_ms(), 1_800_000);
        assert_eq!(session.progress_pct(), 0.0);
    }

    #[test]
    fn full_countdown_expires_and_resets() {
        let mut session = BoostSession::default();
        assert!(session.activate().is_some());

        let mut last = session.progress_pct();
        assert_eq!(last, 0.0);
        for _ in 0..1799 {
            match session.tick() {
                Some(Event::BoostTicked { .. }) => {}
                other => panic!("unexpected {other:?}"),
            }
            let p = session.progress_pct();
            assert!(p > last && p < 100.0);
            last = p;
        }
        assert_eq!(session.remaining_ms(), 1000);

        assert!(matches!(session.tick(), Some(Event::BoostExpired { .. })));
        assert!(!session.is_active());
        assert_eq!(session.remaining_ms(), session.total_ms());
        assert_eq!(session.progress_pct(), 0.0);
    }

    #[test]
    fn activate_twice_is_ignored() {
        let mut session = BoostSession::default();
        session.activate();
        session.tick();
        assert!(session.activate().is_none());
        assert_eq!(session.remaining_ms(), 1_799_000);
    }

    #[test]
    fn deactivate_resets_immediately() {
        let mut session = BoostSession::default();
        session.activate();
        session.tick();
        session.tick();
        match session.deactivate() {
            Some(Event::BoostDeactivated { remaining_ms, .. }) => {
                assert_eq!(remaining_ms, 1_798_000)
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(session.state(), BoostState {
            active: false,
            remaining_ms: 1_800_000,
            total_ms: 1_800_000,
        });
        assert!(session.deactivate().is_none());
    }

    #[test]
    fn tick_while_inactive_is_noop() {
        let mut session = BoostSession::default();
        assert!(session.tick().is_none());
        assert_eq!(session.remaining_ms(), 1_800_000);
    }

    #[test]
    fn uneven_tick_interval_still_expires() {
        let mut session = BoostSession::new(BoostConfig {
            total_ms: 2_500,
            tick_interval_ms: 1_000,
        })
        .unwrap();
        session.activate();
        session.tick();
        session.tick();
        assert!(matches!(session.tick(), Some(Event::BoostExpired { .. })));
    }

    #[test]
    fn countdown_format() {
        assert_eq!(format_countdown(1_800_000), "30:00");
        assert_eq!(format_countdown(65_000), "1:05");
        assert_eq!(format_countdown(59_999), "0:59");
        assert_eq!(format_countdown(0), "0:00");
    }

    #[test]
    fn countdown_floors_partial_seconds() {
        assert_eq!(format_countdown(1_500), "0:01");
        assert_eq!(format_countdown(90_999), "1:30");
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let err = BoostSession::new(BoostConfig {
            total_ms: 3_000,
            tick_interval_ms: 0,
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::ZeroDuration {
            field: "boost.tick_interval_ms".into(),
        });
    }

    #[test]
    fn invalid_totals_are_rejected() {
        assert!(BoostSession::new(BoostConfig {
            total_ms: 0,
            tick_interval_ms: 1_000,
        })
        .is_err());
        assert!(matches!(
            BoostSession::new(BoostConfig {
                total_ms: 500,
                tick_interval_ms: 1_000,
            }),
            Err(ValidationError::TickExceedsTotal { .. })
        ));
    }
}
