//! Background refresh of remote sessions.
//!
//! [`AutoRefresh`] repeatedly waits, then calls [`Clash::refresh_after`],
//! until the local side may act again, the record disappears, or the caller
//! cancels through its [`CancelHandle`].

use crate::{Clash, ClashError};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Progress report from a running poller.
#[derive(Debug, Clone)]
pub enum RefreshEvent {
    /// Storage had a newer game.
    Updated(Clash),
    /// Storage matched the local view.
    Unchanged,
    /// A refresh failed and polling continues.
    Failed(ClashError),
}

/// Why a poller stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The local side holds the turn.
    Available,
    /// The game is over.
    GameOver,
    /// The record was deleted; the returned session is unstarted.
    NotFound,
    /// The caller cancelled.
    Cancelled,
    /// The session cannot be polled at all.
    Unsupported(ClashError),
}

/// Final session and the reason polling stopped.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    /// Latest session.
    pub clash: Clash,
    /// Why the loop ended.
    pub reason: StopReason,
}

/// Cancels the poller it was created with. Dropping it cancels too.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Requests cancellation. The poller stops at its next suspension point.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Cancellable repeating refresh of a remote session.
#[derive(Debug)]
pub struct AutoRefresh {
    poll_interval: Duration,
    refresh_delay: Duration,
    cancel: watch::Receiver<bool>,
    events: Option<mpsc::UnboundedSender<RefreshEvent>>,
}

impl AutoRefresh {
    /// Creates a poller that waits `poll_interval` between attempts and
    /// passes `refresh_delay` to each [`Clash::refresh_after`].
    pub fn new(poll_interval: Duration, refresh_delay: Duration) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let poller = Self {
            poll_interval,
            refresh_delay,
            cancel: rx,
            events: None,
        };
        (poller, CancelHandle { tx })
    }

    /// Sends a [`RefreshEvent`] for every attempt.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<RefreshEvent>) -> Self {
        self.events = Some(events);
        self
    }

    fn cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    fn emit(&self, event: RefreshEvent) {
        if let Some(tx) = &self.events {
            // A closed receiver only means nobody is listening.
            let _ = tx.send(event);
        }
    }

    /// Waits for `fut` unless cancellation arrives first.
    async fn or_cancel<F: std::future::Future>(&mut self, fut: F) -> Option<F::Output> {
        tokio::select! {
            out = fut => Some(out),
            // A dropped handle counts as cancellation.
            _ = self.cancel.wait_for(|cancelled| *cancelled) => None,
        }
    }

    /// Polls until the session needs the local side again.
    #[instrument(skip(self, clash), fields(interval_ms = self.poll_interval.as_millis() as u64))]
    pub async fn run(mut self, clash: Clash) -> RefreshOutcome {
        let mut clash = clash;
        loop {
            if let Some(reason) = Self::settled(&clash) {
                info!(?reason, "Polling finished");
                return RefreshOutcome { clash, reason };
            }
            if self.cancelled() {
                return RefreshOutcome {
                    clash,
                    reason: StopReason::Cancelled,
                };
            }

            let interval = self.poll_interval;
            if self.or_cancel(tokio::time::sleep(interval)).await.is_none() {
                debug!("Cancelled while waiting");
                return RefreshOutcome {
                    clash,
                    reason: StopReason::Cancelled,
                };
            }

            let delay = self.refresh_delay;
            let attempt = {
                let current = clash.clone();
                self.or_cancel(async move { current.refresh_after(delay).await })
                    .await
            };

            match attempt {
                None => {
                    debug!("Cancelled while refreshing");
                    return RefreshOutcome {
                        clash,
                        reason: StopReason::Cancelled,
                    };
                }
                Some(Ok(next)) => {
                    self.emit(RefreshEvent::Updated(next.clone()));
                    clash = next;
                }
                Some(Err(ClashError::NoChange)) => self.emit(RefreshEvent::Unchanged),
                Some(Err(ClashError::GameNotFound)) => {
                    info!("Remote game disappeared");
                    return RefreshOutcome {
                        clash: clash.unstarted(),
                        reason: StopReason::NotFound,
                    };
                }
                Some(Err(e @ (ClashError::NotStarted | ClashError::UnsupportedOnLocal))) => {
                    return RefreshOutcome {
                        clash,
                        reason: StopReason::Unsupported(e),
                    };
                }
                Some(Err(e)) => {
                    warn!(error = %e, "Refresh failed, retrying");
                    self.emit(RefreshEvent::Failed(e));
                }
            }
        }
    }

    fn settled(clash: &Clash) -> Option<StopReason> {
        match clash.game() {
            Some(game) if game.is_over() => Some(StopReason::GameOver),
            Some(_) if clash.new_available() => Some(StopReason::Available),
            _ => None,
        }
    }
}
