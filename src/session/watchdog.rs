//! Idle-timeout watchdog
//!
//! Runs beside the session loop and raises the shutdown signal once the
//! time budget is spent. It never touches session state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::info;

use crate::config::TimeoutScheme;

/// Shared "please stop" flag
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves once `rx` has seen the shutdown flag raised
pub async fn triggered(rx: &mut watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}

pub struct Watchdog {
    activity: watch::Sender<Instant>,
    task: JoinHandle<()>,
}

impl Watchdog {
    /// Start watching; the budget starts counting now
    pub fn spawn(budget: Duration, scheme: TimeoutScheme, shutdown: Shutdown) -> Self {
        let started = Instant::now();
        let (activity, activity_rx) = watch::channel(started);
        let task = tokio::spawn(watch_budget(budget, scheme, started, activity_rx, shutdown));
        Self { activity, task }
    }

    /// Record operator activity
    pub fn kick(&self) {
        self.activity.send_replace(Instant::now());
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn watch_budget(
    budget: Duration,
    scheme: TimeoutScheme,
    started: Instant,
    mut activity: watch::Receiver<Instant>,
    shutdown: Shutdown,
) {
    let mut stop = shutdown.subscribe();
    loop {
        let from = match scheme {
            TimeoutScheme::SinceStart => started,
            TimeoutScheme::SinceLastInput => *activity.borrow_and_update(),
        };

        tokio::select! {
            _ = sleep_until(from + budget) => {
                info!(?scheme, budget_secs = budget.as_secs(), "session time budget spent");
                shutdown.trigger();
                return;
            }
            changed = activity.changed() => {
                if changed.is_err() {
                    return;
                }
            }
            _ = triggered(&mut stop) => return,
        }
    }
}
