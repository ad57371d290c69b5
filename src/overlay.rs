//! Overlay service: the floating caller bubble shown during a call.
//!
//! A single task owns the overlay state and is the only place that mutates it.
//! Lookups run on their own tasks and report back over a channel, tagged with
//! the service generation and the show that started them. Stopping the service
//! aborts whatever is still in flight and bumps the generation, so a late answer
//! from a torn-down service is dropped instead of reaching the overlay. Only the
//! most recent show may update the overlay; answers for earlier callers are dropped.

use crate::lookup_client::CallerLookupClient;
use crate::models::CallerDetails;
use crate::overlay_view::{render_overlay, OverlayView};
use crate::redact::number_fingerprint;
use crate::resolver::resolve;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Lookup key used when a show request carries no number.
pub const UNKNOWN_CALLER: &str = "Unknown Caller";

/// What the overlay window currently looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OverlayState {
    Hidden,
    Shown {
        /// Stays the same while the window remains attached.
        session_id: Uuid,
        view: OverlayView,
    },
}

impl OverlayState {
    pub fn is_shown(&self) -> bool {
        matches!(self, OverlayState::Shown { .. })
    }
}

#[derive(Debug)]
enum OverlayCommand {
    Show {
        caller_id: Option<String>,
    },
    LookupFinished {
        generation: u64,
        ticket: u64,
        outcome: Option<CallerDetails>,
    },
    ScheduleStop {
        delay: Duration,
    },
    DelayedStop {
        shows_seen: u64,
    },
    Close,
    Stop,
}

/// Cloneable handle to the overlay service task.
#[derive(Clone)]
pub struct OverlayHandle {
    commands: mpsc::UnboundedSender<OverlayCommand>,
    state: watch::Receiver<OverlayState>,
}

impl OverlayHandle {
    /// Start (or reuse) the overlay service and look up `caller_id`.
    pub fn show(&self, caller_id: Option<String>) {
        self.send(OverlayCommand::Show { caller_id });
    }

    /// Stop the service after `delay` unless another show arrives first.
    pub fn schedule_stop(&self, delay: Duration) {
        self.send(OverlayCommand::ScheduleStop { delay });
    }

    /// The close button on the bubble.
    pub fn close(&self) {
        self.send(OverlayCommand::Close);
    }

    /// Tear the service down immediately.
    pub fn stop(&self) {
        self.send(OverlayCommand::Stop);
    }

    pub fn current(&self) -> OverlayState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<OverlayState> {
        self.state.clone()
    }

    fn send(&self, command: OverlayCommand) {
        if let Err(e) = self.commands.send(command) {
            tracing::error!("Overlay service is gone, dropping {:?}", e.0);
        }
    }
}

/// State owned by the overlay task.
struct OverlayService {
    client: CallerLookupClient,
    /// Weak so the task ends once every handle is dropped.
    commands: mpsc::WeakUnboundedSender<OverlayCommand>,
    state: watch::Sender<OverlayState>,
    running: bool,
    generation: u64,
    shows_seen: u64,
    pending: Vec<JoinHandle<()>>,
}

/// Spawn the overlay service task on the current tokio runtime.
pub fn spawn_overlay_service(client: CallerLookupClient) -> OverlayHandle {
    let (commands_tx, mut commands_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(OverlayState::Hidden);

    let mut service = OverlayService {
        client,
        commands: commands_tx.downgrade(),
        state: state_tx,
        running: false,
        generation: 0,
        shows_seen: 0,
        pending: Vec::new(),
    };

    tokio::spawn(async move {
        while let Some(command) = commands_rx.recv().await {
            service.handle(command);
        }
        tracing::debug!("All overlay handles dropped, shutting down");
        service.stop();
    });

    OverlayHandle {
        commands: commands_tx,
        state: state_rx,
    }
}

impl OverlayService {
    fn handle(&mut self, command: OverlayCommand) {
        match command {
            OverlayCommand::Show { caller_id } => self.start_lookup(caller_id),
            OverlayCommand::LookupFinished {
                generation,
                ticket,
                outcome,
            } => self.apply_lookup(generation, ticket, outcome),
            OverlayCommand::ScheduleStop { delay } => self.schedule_stop(delay),
            OverlayCommand::DelayedStop { shows_seen } => {
                if shows_seen == self.shows_seen {
                    tracing::debug!("Delayed overlay stop fired");
                    self.stop();
                } else {
                    tracing::debug!("Delayed overlay stop superseded by a newer call");
                }
            }
            OverlayCommand::Close => {
                tracing::info!("Overlay closed by user");
                self.stop();
            }
            OverlayCommand::Stop => self.stop(),
        }
    }

    fn start_lookup(&mut self, caller_id: Option<String>) {
        let caller_id = caller_id
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_CALLER.to_string());

        if !self.running {
            tracing::info!("Overlay service started");
            self.running = true;
        }
        self.shows_seen += 1;
        self.pending.retain(|task| !task.is_finished());

        let client = self.client.clone();
        let commands = self.commands.clone();
        let generation = self.generation;
        let ticket = self.shows_seen;

        tracing::debug!(
            "Starting overlay lookup {} for {} (generation {})",
            ticket,
            number_fingerprint(&caller_id),
            generation
        );

        self.pending.push(tokio::spawn(async move {
            let outcome = match client.fetch_caller_details(&caller_id).await {
                Ok(details) => Some(details),
                Err(e) => {
                    tracing::warn!("Overlay lookup failed: {}", e);
                    None
                }
            };
            if let Some(commands) = commands.upgrade() {
                let _ = commands.send(OverlayCommand::LookupFinished {
                    generation,
                    ticket,
                    outcome,
                });
            }
        }));
    }

    fn apply_lookup(&mut self, generation: u64, ticket: u64, outcome: Option<CallerDetails>) {
        if generation != self.generation || !self.running {
            tracing::debug!(
                "Discarding lookup from stopped overlay service (generation {}, current {})",
                generation,
                self.generation
            );
            return;
        }
        if ticket != self.shows_seen {
            tracing::debug!(
                "Discarding lookup {} superseded by a newer call ({})",
                ticket,
                self.shows_seen
            );
            return;
        }

        let Some(details) = outcome else {
            // No data: do not show the overlay at all.
            self.stop();
            return;
        };

        let status = resolve(Some(&details), chrono::Local::now().naive_local());
        let view = render_overlay(&status);

        let session_id = match *self.state.borrow() {
            OverlayState::Shown { session_id, .. } => session_id,
            OverlayState::Hidden => Uuid::new_v4(),
        };

        tracing::info!("Overlay shown (session {})", session_id);
        self.state.send_replace(OverlayState::Shown { session_id, view });
    }

    fn schedule_stop(&self, delay: Duration) {
        let commands = self.commands.clone();
        let shows_seen = self.shows_seen;
        tracing::debug!("Scheduling overlay stop in {:?}", delay);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(commands) = commands.upgrade() {
                let _ = commands.send(OverlayCommand::DelayedStop { shows_seen });
            }
        });
    }

    fn stop(&mut self) {
        for task in self.pending.drain(..) {
            task.abort();
        }
        self.generation += 1;

        if self.running {
            tracing::info!("Overlay service stopped");
        }
        self.running = false;

        self.state.send_if_modified(|state| {
            if state.is_shown() {
                *state = OverlayState::Hidden;
                true
            } else {
                false
            }
        });
    }
}
