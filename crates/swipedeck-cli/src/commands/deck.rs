use clap::Subcommand;
use swipedeck_core::{AnimationPhase, Config, Event, Outcome, SwipeDeck};

/// Upper bound on frames per action; a spring caps out well before this.
const MAX_FRAMES: usize = 10_000;

#[derive(Subcommand)]
pub enum DeckAction {
    /// Run a sequence of actions against a deck and print events as JSON lines
    Play {
        /// Candidate ids, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        cards: Vec<String>,
        /// Frame length used to step animations
        #[arg(long, default_value = "16")]
        frame_ms: f64,
        /// Also print live drag events
        #[arg(long)]
        verbose: bool,
        /// Actions: `DX,DY` (drag and release), like, reject, invite, tap, reset
        #[arg(allow_hyphen_values = true)]
        actions: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Drag { dx: f64, dy: f64 },
    Button(Outcome),
    Tap,
    Reset,
}

fn parse_action(raw: &str) -> Result<Action, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "tap" => return Ok(Action::Tap),
        "reset" | "reload" => return Ok(Action::Reset),
        _ => {}
    }
    if let Some((dx, dy)) = raw.split_once(',') {
        let dx = dx
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid dx in '{raw}'"))?;
        let dy = dy
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid dy in '{raw}'"))?;
        return Ok(Action::Drag { dx, dy });
    }
    match raw.parse::<Outcome>()? {
        Outcome::Cancel => Err("cancel is not a button; drag below the threshold instead".into()),
        outcome => Ok(Action::Button(outcome)),
    }
}

pub fn run(action: DeckAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DeckAction::Play {
            cards,
            frame_ms,
            verbose,
            actions,
        } => {
            let actions = actions
                .iter()
                .map(|a| parse_action(a))
                .collect::<Result<Vec<_>, _>>()?;
            let config = Config::load_or_default();
            let mut deck = SwipeDeck::new(cards, config.deck)?;

            for action in actions {
                for event in perform(&mut deck, action, frame_ms, verbose) {
                    super::emit(&event)?;
                }
            }
            super::emit(&deck.snapshot())?;
        }
    }
    Ok(())
}

fn perform(
    deck: &mut SwipeDeck<String>,
    action: Action,
    frame_ms: f64,
    verbose: bool,
) -> Vec<Event> {
    let mut events = Vec::new();
    match action {
        Action::Drag { dx, dy } => {
            events.extend(deck.begin());
            let live = deck.update(dx / 2.0, dy / 2.0);
            if verbose {
                events.extend(live);
            }
            events.extend(deck.release(dx, dy));
        }
        Action::Button(outcome) => events.extend(deck.commit(outcome)),
        Action::Tap => events.extend(deck.tap()),
        Action::Reset => events.extend(deck.reset()),
    }

    let mut frames = 0;
    while deck.phase() == AnimationPhase::Animating && frames < MAX_FRAMES {
        events.extend(deck.frame(frame_ms));
        frames += 1;
    }
    if deck.phase() == AnimationPhase::Animating {
        events.extend(deck.complete());
    }
    events
}
