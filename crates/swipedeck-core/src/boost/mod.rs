mod session;
mod timer;

pub use session::{format_countdown, BoostSession, BoostState};
pub use timer::BoostTimer;
