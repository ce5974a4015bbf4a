use clap::Args;
use serde::Serialize;
use swipedeck_core::{classify, Config, Outcome};

#[derive(Args)]
pub struct ClassifyArgs {
    /// Horizontal displacement in pixels
    #[arg(long, allow_hyphen_values = true)]
    pub dx: f64,
    /// Vertical displacement in pixels (negative is up)
    #[arg(long, allow_hyphen_values = true, default_value = "0")]
    pub dy: f64,
    /// Absolute threshold in pixels (default: deck.threshold * deck.viewport_width)
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[derive(Serialize)]
struct Classification {
    dx: f64,
    dy: f64,
    threshold: f64,
    outcome: Outcome,
}

pub fn run(args: ClassifyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let threshold = match args.threshold {
        Some(t) => t,
        None => {
            let deck = Config::load_or_default().deck;
            deck.threshold * deck.viewport_width
        }
    };
    super::emit(&Classification {
        dx: args.dx,
        dy: args.dy,
        threshold,
        outcome: classify(args.dx, args.dy, threshold),
    })
}
