use clap::Subcommand;
use swipedeck_core::boost::format_countdown;
use swipedeck_core::{BoostConfig, BoostTimer, Config, Event};

#[derive(Subcommand)]
pub enum BoostAction {
    /// Activate a boost and print events until it expires
    Run {
        /// Override boost duration in milliseconds
        #[arg(long)]
        total_ms: Option<u64>,
        /// Override tick interval in milliseconds
        #[arg(long)]
        tick_ms: Option<u64>,
    },
    /// Format a remaining duration as m:ss
    Countdown {
        /// Remaining milliseconds
        ms: u64,
    },
}

pub fn run(action: BoostAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        BoostAction::Run { total_ms, tick_ms } => {
            let defaults = Config::load_or_default().boost;
            let config = BoostConfig {
                total_ms: total_ms.unwrap_or(defaults.total_ms),
                tick_interval_ms: tick_ms.unwrap_or(defaults.tick_interval_ms),
            };

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(run_boost(config))?;
        }
        BoostAction::Countdown { ms } => {
            println!("{}", format_countdown(ms));
        }
    }
    Ok(())
}

async fn run_boost(config: BoostConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut timer = BoostTimer::spawn(config)?;
    timer.activate();

    while let Some(event) = timer.next_event().await {
        super::emit(&event)?;
        if matches!(event, Event::BoostTicked { .. }) {
            tracing::debug!(countdown = %timer.state().countdown(), "boost tick");
        }
        if matches!(event, Event::BoostExpired { .. }) {
            break;
        }
    }
    timer.shutdown().await;
    Ok(())
}
