use crate::signup::SubmissionState;

#[async_trait::async_trait]
pub trait SubmissionEventPort: Send + Sync {
    async fn emit_submission_state_changed(&self, state: SubmissionState);
}
