//! Decision oracle protocol and stub implementation.
//!
//! Each minion consults an external decision oracle on its own randomized
//! cadence. The tick loop must never block on it: requests are fire and
//! forget via [`DecisionOracle::submit`], and answers come back as
//! [`OracleReply`] messages collected with [`DecisionOracle::poll_replies`]
//! at the start of a later tick. Replies carry a stable [`MinionId`], so a
//! reply for a minion that has since died is simply dropped.
//!
//! Transport and decode failures never surface here. An implementation
//! answers [`BehaviorState::Wander`] instead.

use vivarium_types::{BehaviorState, DecisionRequest, MinionId, OracleReply};

/// A source of asynchronous behavior overrides.
pub trait DecisionOracle {
    /// Start a request for `minion_id`. Must not block.
    fn submit(&mut self, minion_id: MinionId, request: DecisionRequest);

    /// Drain every reply that has resolved since the last poll.
    fn poll_replies(&mut self) -> Vec<OracleReply>;
}

/// An in-process oracle for tests and offline runs.
///
/// Either never answers, or answers every request with a fixed behavior on
/// the next poll. Every submitted request is recorded.
#[derive(Debug, Clone, Default)]
pub struct StubOracle {
    answer: Option<BehaviorState>,
    queued: Vec<OracleReply>,
    requests: Vec<(MinionId, DecisionRequest)>,
}

impl StubOracle {
    /// An oracle that never replies. Minions run on local policy alone.
    pub const fn silent() -> Self {
        Self {
            answer: None,
            queued: Vec::new(),
            requests: Vec::new(),
        }
    }

    /// An oracle that answers every request with `state`.
    pub const fn always(state: BehaviorState) -> Self {
        Self {
            answer: Some(state),
            queued: Vec::new(),
            requests: Vec::new(),
        }
    }

    /// Every request submitted so far, oldest first.
    pub fn requests(&self) -> &[(MinionId, DecisionRequest)] {
        &self.requests
    }
}

impl DecisionOracle for StubOracle {
    fn submit(&mut self, minion_id: MinionId, request: DecisionRequest) {
        if let Some(state) = self.answer {
            self.queued.push(OracleReply { minion_id, state });
        }
        self.requests.push((minion_id, request));
    }

    fn poll_replies(&mut self) -> Vec<OracleReply> {
        std::mem::take(&mut self.queued)
    }
}
