//! Outcome classification.
//!
//! Maps the final displacement of a gesture to a decision. Horizontal
//! outcomes are checked before vertical ones, so a diagonal swipe that
//! crosses both thresholds is always a `Like` or `Reject`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Like,
    Reject,
    Invite,
    Cancel,
}

impl Outcome {
    /// Whether completing this outcome consumes the active card.
    pub fn advances(self) -> bool {
        !matches!(self, Outcome::Cancel)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Outcome::Like => "like",
            Outcome::Reject => "reject",
            Outcome::Invite => "invite",
            Outcome::Cancel => "cancel",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "like" => Ok(Outcome::Like),
            "reject" | "nope" => Ok(Outcome::Reject),
            "invite" => Ok(Outcome::Invite),
            "cancel" => Ok(Outcome::Cancel),
            other => Err(format!("unknown outcome: {other}")),
        }
    }
}

/// Classify a released gesture.
///
/// `threshold` is an absolute pixel distance, normally
/// `threshold_fraction * viewport_width`. Non-finite inputs classify as
/// [`Outcome::Cancel`].
pub fn classify(dx: f64, dy: f64, threshold: f64) -> Outcome {
    if !dx.is_finite() || !dy.is_finite() || !threshold.is_finite() {
        return Outcome::Cancel;
    }
    let t = threshold.abs();
    if dx > t {
        Outcome::Like
    } else if dx < -t {
        Outcome::Reject
    } else if dy < -t {
        Outcome::Invite
    } else {
        Outcome::Cancel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn scenario_outcomes() {
        assert_eq!(classify(200.0, 0.0, 100.0), Outcome::Like);
        assert_eq!(classify(-150.0, 0.0, 100.0), Outcome::Reject);
        assert_eq!(classify(10.0, -150.0, 100.0), Outcome::Invite);
        assert_eq!(classify(10.0, 10.0, 100.0), Outcome::Cancel);
    }

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(classify(100.0, 0.0, 100.0), Outcome::Cancel);
        assert_eq!(classify(-100.0, 0.0, 100.0), Outcome::Cancel);
        assert_eq!(classify(0.0, -100.0, 100.0), Outcome::Cancel);
    }

    #[test]
    fn downward_swipe_is_cancel() {
        assert_eq!(classify(0.0, 500.0, 100.0), Outcome::Cancel);
    }

    #[test]
    fn horizontal_wins_over_vertical() {
        assert_eq!(classify(150.0, -400.0, 100.0), Outcome::Like);
        assert_eq!(classify(-150.0, -400.0, 100.0), Outcome::Reject);
    }

    #[test]
    fn non_finite_input_cancels() {
        assert_eq!(classify(f64::NAN, 0.0, 100.0), Outcome::Cancel);
        assert_eq!(classify(f64::INFINITY, 0.0, 100.0), Outcome::Cancel);
        assert_eq!(classify(0.0, f64::NEG_INFINITY, 100.0), Outcome::Cancel);
        assert_eq!(classify(500.0, 0.0, f64::NAN), Outcome::Cancel);
    }

    #[test]
    fn outcome_parses_button_names() {
        assert_eq!("nope".parse::<Outcome>().unwrap(), Outcome::Reject);
        assert_eq!("LIKE".parse::<Outcome>().unwrap(), Outcome::Like);
        assert!("maybe".parse::<Outcome>().is_err());
    }

    proptest! {
        #[test]
        fn priority_order_holds(
            dx in -2000.0f64..2000.0,
            dy in -2000.0f64..2000.0,
            t in 0.0f64..1000.0,
        ) {
            let expected = if dx > t {
                Outcome::Like
            } else if dx < -t {
                Outcome::Reject
            } else if dy < -t {
                Outcome::Invite
            } else {
                Outcome::Cancel
            };
            prop_assert_eq!(classify(dx, dy, t), expected);
        }

        #[test]
        fn vertical_never_beats_horizontal(
            dx in 101.0f64..2000.0,
            dy in -2000.0f64..-101.0,
            negate in any::<bool>(),
        ) {
            let dx = if negate { -dx } else { dx };
            let outcome = classify(dx, dy, 100.0);
            prop_assert!(matches!(outcome, Outcome::Like | Outcome::Reject));
        }
    }
}
