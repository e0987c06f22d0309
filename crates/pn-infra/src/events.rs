//! Submission state fan-out over a tokio broadcast channel.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::trace;

use pn_core::ports::SubmissionEventPort;
use pn_core::signup::SubmissionState;

const DEFAULT_CAPACITY: usize = 16;

/// Delivers submission state changes to every current subscriber.
///
/// Subscribers that fall behind lose the oldest states; the latest one is
/// always delivered.
#[derive(Clone)]
pub struct BroadcastSubmissionEvents {
    sender: broadcast::Sender<SubmissionState>,
}

impl BroadcastSubmissionEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SubmissionState> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastSubmissionEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl SubmissionEventPort for BroadcastSubmissionEvents {
    async fn emit_submission_state_changed(&self, state: SubmissionState) {
        // No subscriber is not an error.
        if self.sender.send(state).is_err() {
            trace!("submission state dropped, no subscribers");
        }
    }
}
