mod controller;
mod motion;

pub use controller::{rotation_for, AnimationController, AnimationPhase, Transform};
pub use motion::{ease_in_out, Motion, Offset};
