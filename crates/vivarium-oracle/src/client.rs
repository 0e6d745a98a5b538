//! Non-blocking oracle client for the tick loop.
//!
//! [`AsyncOracle`] spawns one task per request onto the tokio runtime and
//! funnels results back through an unbounded channel. The tick loop never
//! waits: it drains whatever has resolved at the start of each tick.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, warn};
use vivarium_core::DecisionOracle;
use vivarium_types::{BehaviorState, DecisionRequest, MinionId, OracleReply};

use crate::backend::OracleBackend;
use crate::error::OracleError;

/// Asynchronous [`DecisionOracle`] backed by an [`OracleBackend`].
///
/// Every failure (transport, status, parse) resolves to `WANDER`, so each
/// submitted request produces exactly one reply.
#[derive(Debug)]
pub struct AsyncOracle {
    backend: Arc<OracleBackend>,
    runtime: Handle,
    permits: Arc<Semaphore>,
    reply_tx: mpsc::UnboundedSender<OracleReply>,
    reply_rx: mpsc::UnboundedReceiver<OracleReply>,
}

impl AsyncOracle {
    /// Create a client that runs at most `max_concurrent` requests at once.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Config`] when called outside a tokio runtime.
    pub fn new(backend: OracleBackend, max_concurrent: usize) -> Result<Self, OracleError> {
        let runtime = Handle::try_current()
            .map_err(|e| OracleError::Config(format!("no tokio runtime available: {e}")))?;
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Ok(Self {
            backend: Arc::new(backend),
            runtime,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            reply_tx,
            reply_rx,
        })
    }

    /// Name of the underlying backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}

impl DecisionOracle for AsyncOracle {
    fn submit(&mut self, minion_id: MinionId, request: DecisionRequest) {
        let backend = Arc::clone(&self.backend);
        let permits = Arc::clone(&self.permits);
        let reply_tx = self.reply_tx.clone();

        self.runtime.spawn(async move {
            // The semaphore is never closed, so acquisition only fails on shutdown.
            let Ok(_permit) = permits.acquire_owned().await else {
                return;
            };

            let state = match backend.decide(&request).await {
                Ok(state) => {
                    debug!(minion_id = %minion_id, action = %state, "Oracle decided");
                    state
                }
                Err(e) => {
                    warn!(
                        minion_id = %minion_id,
                        backend = backend.name(),
                        error = %e,
                        "Oracle request failed, falling back to WANDER"
                    );
                    BehaviorState::Wander
                }
            };

            if reply_tx.send(OracleReply { minion_id, state }).is_err() {
                debug!(minion_id = %minion_id, "Oracle client dropped before reply arrived");
            }
        });
    }

    fn poll_replies(&mut self) -> Vec<OracleReply> {
        let mut replies = Vec::new();
        while let Ok(reply) = self.reply_rx.try_recv() {
            replies.push(reply);
        }
        replies
    }
}
