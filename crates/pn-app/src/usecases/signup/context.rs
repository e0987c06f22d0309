use std::sync::Arc;

use pn_core::signup::WizardController;
use tokio::sync::Mutex;

/// Shared signup context holding the wizard and the banner error.
///
/// ## Lock Ordering
/// Acquire `wizard` before `last_error` when both are needed. Neither lock is
/// held across a network call.
#[derive(Clone)]
pub struct SignupContext {
    wizard: Arc<Mutex<WizardController>>,
    /// Message of the last fatal submission failure, cleared on the next submit.
    last_error: Arc<Mutex<Option<String>>>,
}

impl SignupContext {
    pub fn new(wizard: WizardController) -> Self {
        Self {
            wizard: Arc::new(Mutex::new(wizard)),
            last_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Run `f` with exclusive access to the wizard.
    pub async fn with_wizard<R>(&self, f: impl FnOnce(&mut WizardController) -> R) -> R {
        let mut guard = self.wizard.lock().await;
        f(&mut guard)
    }

    pub async fn last_error(&self) -> Option<String> {
        self.last_error.lock().await.clone()
    }

    pub async fn set_last_error(&self, message: Option<String>) {
        *self.last_error.lock().await = message;
    }
}

impl Default for SignupContext {
    fn default() -> Self {
        Self::new(WizardController::new())
    }
}
