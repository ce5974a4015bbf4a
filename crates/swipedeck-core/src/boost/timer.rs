//! Async driver for a [`BoostSession`].
//!
//! A single task owns the session and the periodic tick schedule. The
//! schedule is an `Interval` that only exists while the boost is active: it
//! is created on activation and dropped on deactivation, on natural expiry
//! and on shutdown. Dropping the [`BoostTimer`] handle aborts the task, so
//! nothing can tick a torn-down session.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval};
use tracing::debug;

use super::session::{BoostSession, BoostState};
use crate::error::ValidationError;
use crate::events::Event;
use crate::storage::BoostConfig;

#[derive(Debug, Clone, Copy)]
enum Command {
    Activate,
    Deactivate,
    Shutdown,
}

enum Wake {
    Command(Command),
    Tick,
}

/// Handle to a running boost task.
pub struct BoostTimer {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<BoostState>,
    events: mpsc::UnboundedReceiver<Event>,
    task: JoinHandle<()>,
}

impl BoostTimer {
    /// Spawn the boost task on the current tokio runtime. Nothing is
    /// spawned if `config` does not validate.
    pub fn spawn(config: BoostConfig) -> Result<Self, ValidationError> {
        let session = BoostSession::new(config)?;
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(session.state());
        let (event_tx, events) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(session, command_rx, state_tx, event_tx));
        Ok(Self {
            commands,
            state,
            events,
            task,
        })
    }

    pub fn state(&self) -> BoostState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<BoostState> {
        self.state.clone()
    }

    /// Request activation. A no-op if already active or torn down.
    pub fn activate(&self) {
        let _ = self.commands.send(Command::Activate);
    }

    /// Request early stop. A no-op if inactive or torn down.
    pub fn deactivate(&self) {
        let _ = self.commands.send(Command::Deactivate);
    }

    /// Next event emitted by the session, `None` once the task has ended.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events.recv().await
    }

    /// Cancel any running boost and wait for the task to finish.
    pub async fn shutdown(mut self) {
        let _ = self.commands.send(Command::Shutdown);
        let _ = (&mut self.task).await;
    }
}

impl Drop for BoostTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    mut session: BoostSession,
    mut commands: mpsc::UnboundedReceiver<Command>,
    state: watch::Sender<BoostState>,
    events: mpsc::UnboundedSender<Event>,
) {
    let period = Duration::from_millis(session.tick_interval_ms());
    let mut schedule: Option<Interval> = None;

    let publish = |session: &BoostSession, event: Option<Event>| {
        state.send_replace(session.state());
        if let Some(event) = event {
            let _ = events.send(event);
        }
    };

    loop {
        let wake = tokio::select! {
            command = commands.recv() => Wake::Command(command.unwrap_or(Command::Shutdown)),
            _ = next_tick(&mut schedule) => Wake::Tick,
        };

        match wake {
            Wake::Command(Command::Activate) => {
                let event = session.activate();
                if event.is_some() {
                    schedule = Some(interval_at(Instant::now() + period, period));
                }
                publish(&session, event);
            }
            Wake::Command(Command::Deactivate) => {
                schedule = None;
                let event = session.deactivate();
                publish(&session, event);
            }
            Wake::Command(Command::Shutdown) => {
                let event = session.deactivate();
                publish(&session, event);
                break;
            }
            Wake::Tick => {
                let event = session.tick();
                if !session.is_active() {
                    schedule = None;
                }
                publish(&session, event);
            }
        }
    }
    debug!("boost task finished");
}

async fn next_tick(schedule: &mut Option<Interval>) {
    match schedule {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
