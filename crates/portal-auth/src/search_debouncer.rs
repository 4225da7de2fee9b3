use crate::{Candidate, IdentityResolver};

use portal_config::AuthConfig;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::debug;
use tokio::sync::{oneshot, watch};

/// Latest published state of search-as-you-type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No search showing: nothing typed yet, or the input was cleared.
    Idle { sequence: u64 },
    Results {
        sequence: u64,
        fragment: String,
        candidates: Vec<Candidate>,
    },
    Failed {
        sequence: u64,
        fragment: String,
        message: &'static str,
    },
}

impl SearchOutcome {
    pub fn sequence(&self) -> u64 {
        match self {
            Self::Idle { sequence }
            | Self::Results { sequence, .. }
            | Self::Failed { sequence, .. } => *sequence,
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        match self {
            Self::Results { candidates, .. } => candidates,
            _ => &[],
        }
    }
}

#[derive(Default)]
struct DebounceState {
    next_sequence: u64,
    /// Cancels the idle timer of the most recent input, if it has not fired.
    pending: Option<oneshot::Sender<()>>,
}

/// Issues a name search once typing has been idle for `delay`.
///
/// Each keystroke restarts the idle timer. Requests that already went out
/// are never cancelled; instead every lookup carries a sequence number and
/// a result older than the newest published outcome is dropped.
pub struct SearchDebouncer {
    resolver: Arc<IdentityResolver>,
    delay: Duration,
    state: Mutex<DebounceState>,
    outcomes: Arc<watch::Sender<SearchOutcome>>,
}

impl SearchDebouncer {
    pub fn new(resolver: Arc<IdentityResolver>, delay: Duration) -> Self {
        let (outcomes, _) = watch::channel(SearchOutcome::Idle { sequence: 0 });

        Self {
            resolver,
            delay,
            state: Mutex::new(DebounceState::default()),
            outcomes: Arc::new(outcomes),
        }
    }

    /// Uses `auth.debounce_ms` as the idle delay.
    pub fn from_config(resolver: Arc<IdentityResolver>, config: &AuthConfig) -> Self {
        Self::new(resolver, Duration::from_millis(config.debounce_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Registers a keystroke and returns the sequence number it was given.
    ///
    /// Must be called from within a tokio runtime.
    pub fn input(&self, fragment: &str) -> u64 {
        let fragment = fragment.trim().to_string();
        let (cancel_tx, cancel_rx) = oneshot::channel();

        let sequence = {
            let mut state = self.state();
            state.next_sequence += 1;
            // Replacing the sender drops the old one, which cancels its timer.
            state.pending = (!fragment.is_empty()).then_some(cancel_tx);
            state.next_sequence
        };

        if fragment.is_empty() {
            publish(&self.outcomes, SearchOutcome::Idle { sequence });
            return sequence;
        }

        let resolver = self.resolver.clone();
        let outcomes = self.outcomes.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = cancel_rx => {
                    debug!("Search #{sequence} superseded before it was sent");
                    return;
                }
            }

            let outcome = match resolver.search(&fragment).await {
                Ok(candidates) => SearchOutcome::Results {
                    sequence,
                    fragment,
                    candidates,
                },
                Err(e) => SearchOutcome::Failed {
                    sequence,
                    fragment,
                    message: e.user_message(),
                },
            };
            publish(&outcomes, outcome);
        });

        sequence
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchOutcome> {
        self.outcomes.subscribe()
    }

    pub fn current(&self) -> SearchOutcome {
        self.outcomes.borrow().clone()
    }

    fn state(&self) -> MutexGuard<'_, DebounceState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn publish(outcomes: &watch::Sender<SearchOutcome>, outcome: SearchOutcome) {
    let sequence = outcome.sequence();
    let applied = outcomes.send_if_modified(|current| {
        if sequence > current.sequence() {
            *current = outcome;
            true
        } else {
            false
        }
    });

    if !applied {
        debug!("Dropped out-of-order search result #{sequence}");
    }
}
