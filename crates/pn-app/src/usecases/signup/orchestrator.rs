//! Signup submission orchestrator.
//!
//! This module drives the submission state machine and its side effects:
//! register the account, create or join a workspace, then establish the
//! ownership relation on a best-effort basis.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, info_span, warn, Instrument};

use pn_core::account::{Role, SignedInIdentity, User};
use pn_core::ports::{
    AccountPort, IdentityStorePort, RelationPort, ServiceError, SubmissionEventPort, WorkspacePort,
};
use pn_core::signup::{
    SignupSubmission, SubmissionEvent, SubmissionState, SubmissionStateMachine, WorkspaceDraft,
    WorkspacePlan,
};
use pn_core::workspace::{CreateWorkspaceShape, Workspace, WorkspaceRelation};

use super::strategy::{self, AttemptResult, DEFAULT_CREATE_STRATEGIES};

/// Fatal submission failures. The session is kept and the user may resubmit.
///
/// The display text is shown in the page banner as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("{0}")]
    Registration(#[source] ServiceError),
    #[error("{0}")]
    WorkspaceCreation(#[source] ServiceError),
    #[error("{0}")]
    WorkspaceJoin(#[source] ServiceError),
    #[error("a signup submission is already in progress")]
    AlreadyInFlight,
}

/// Failure of a best-effort step. Logged, never reported as a failed signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionWarning {
    OwnershipRelationFailed {
        workspace_id: String,
        message: String,
    },
    IdentityPersistFailed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationOutcome {
    Established(WorkspaceRelation),
    /// The workspace exists; the relation can be re-established later.
    Warning(SubmissionWarning),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceMembership {
    Created {
        workspace: Workspace,
        ownership: RelationOutcome,
    },
    Joined {
        workspace_id: String,
        /// Only the student join route returns workspace details.
        workspace: Option<Workspace>,
        relation: WorkspaceRelation,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub user: User,
    pub membership: WorkspaceMembership,
    pub warnings: Vec<SubmissionWarning>,
}

/// Ports the orchestrator talks to.
#[derive(Clone)]
pub struct SubmissionDeps {
    pub accounts: Arc<dyn AccountPort>,
    pub workspaces: Arc<dyn WorkspacePort>,
    pub relations: Arc<dyn RelationPort>,
    pub identity_store: Arc<dyn IdentityStorePort>,
    pub event_port: Arc<dyn SubmissionEventPort>,
}

/// Orchestrator that drives submission state and side effects.
pub struct SubmissionOrchestrator {
    deps: SubmissionDeps,
    create_strategies: Vec<CreateWorkspaceShape>,
    state: Mutex<SubmissionState>,
    /// Account created by an earlier attempt that later failed.
    registered: Mutex<Option<User>>,
    in_flight: AtomicBool,
}

impl SubmissionOrchestrator {
    pub fn new(deps: SubmissionDeps) -> Self {
        Self {
            deps,
            create_strategies: DEFAULT_CREATE_STRATEGIES.to_vec(),
            state: Mutex::new(SubmissionState::Idle),
            registered: Mutex::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_create_strategies(mut self, strategies: Vec<CreateWorkspaceShape>) -> Self {
        self.create_strategies = strategies;
        self
    }

    pub async fn state(&self) -> SubmissionState {
        self.state.lock().await.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run the whole submission. A call made while another is running
    /// returns [`SubmissionError::AlreadyInFlight`] without touching any port.
    pub async fn submit(
        &self,
        submission: &SignupSubmission,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("signup submit ignored, another submission is in flight");
            return Err(SubmissionError::AlreadyInFlight);
        };

        let span = info_span!(
            "usecase.signup_submission.submit",
            role = %submission.role,
            creates_workspace = submission.plan.is_create(),
        );
        self.run(submission).instrument(span).await
    }

    async fn run(
        &self,
        submission: &SignupSubmission,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        self.apply(SubmissionEvent::Start).await;

        let user = match self.register(submission).await {
            Ok(user) => user,
            Err(err) => {
                error!(error = %err, "account registration failed");
                self.fail(&err).await;
                return Err(SubmissionError::Registration(err));
            }
        };
        self.apply(SubmissionEvent::Registered {
            creates_workspace: submission.plan.is_create(),
        })
        .await;

        let mut warnings = Vec::new();
        let membership = match &submission.plan {
            WorkspacePlan::Create(draft) => {
                let workspace = match self.create_workspace(draft, &user).await {
                    Ok(workspace) => workspace,
                    Err(err) => {
                        error!(error = %err, "workspace creation failed after all request shapes");
                        self.fail(&err).await;
                        return Err(SubmissionError::WorkspaceCreation(err));
                    }
                };
                self.apply(SubmissionEvent::WorkspaceCreated).await;

                let ownership = self.relate_ownership(&user, &workspace).await;
                if let RelationOutcome::Warning(warning) = &ownership {
                    warnings.push(warning.clone());
                }
                self.apply(SubmissionEvent::RelationSettled).await;

                WorkspaceMembership::Created {
                    workspace,
                    ownership,
                }
            }
            WorkspacePlan::Join { workspace_id } => {
                let membership = match self.join_workspace(submission.role, workspace_id, &user).await
                {
                    Ok(membership) => membership,
                    Err(err) => {
                        error!(error = %err, workspace_id = %workspace_id, "joining workspace failed");
                        self.fail(&err).await;
                        return Err(SubmissionError::WorkspaceJoin(err));
                    }
                };
                self.apply(SubmissionEvent::WorkspaceJoined).await;
                membership
            }
        };

        if let Some(warning) = self.persist_identity(&user).await {
            warnings.push(warning);
        }
        self.registered.lock().await.take();

        info!(
            user_id = %user.id,
            warnings = warnings.len(),
            "signup submission completed"
        );
        Ok(SubmissionOutcome {
            user,
            membership,
            warnings,
        })
    }

    async fn register(&self, submission: &SignupSubmission) -> Result<User, ServiceError> {
        let request = &submission.registration;
        let cached = {
            let guard = self.registered.lock().await;
            guard
                .as_ref()
                .filter(|user| user.email == request.email && user.username == request.username)
                .cloned()
        };
        if let Some(user) = cached {
            info!(user_id = %user.id, "reusing account registered by an earlier attempt");
            return Ok(user);
        }

        let user = self.deps.accounts.register(request).await?;
        info!(user_id = %user.id, "account registered");
        *self.registered.lock().await = Some(user.clone());
        Ok(user)
    }

    async fn create_workspace(
        &self,
        draft: &WorkspaceDraft,
        owner: &User,
    ) -> Result<Workspace, ServiceError> {
        let mut last_error = None;
        for (attempt, shape) in self.create_strategies.iter().copied().enumerate() {
            let request = strategy::build_request(shape, draft, &owner.id);
            debug!(%shape, attempt = attempt + 1, "creating workspace");

            match AttemptResult::classify(self.deps.workspaces.create_workspace(&request).await) {
                AttemptResult::Success(workspace) => {
                    info!(workspace_id = %workspace.id, %shape, "workspace created");
                    return Ok(workspace);
                }
                AttemptResult::Retryable(err) => {
                    warn!(%shape, error = %err, "workspace request shape rejected");
                    last_error = Some(err);
                }
                AttemptResult::Fatal(err) => {
                    warn!(%shape, error = %err, "workspace creation aborted");
                    return Err(err);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| {
            ServiceError::InvalidResponse("no workspace creation strategy configured".to_string())
        }))
    }

    async fn join_workspace(
        &self,
        role: Role,
        workspace_id: &str,
        user: &User,
    ) -> Result<WorkspaceMembership, ServiceError> {
        match role {
            Role::Student => {
                let joined = self
                    .deps
                    .workspaces
                    .join_workspace(workspace_id, &user.id)
                    .await?;
                info!(workspace_id = %workspace_id, "joined workspace as student");
                Ok(WorkspaceMembership::Joined {
                    workspace_id: workspace_id.to_string(),
                    workspace: Some(joined.workspace),
                    relation: joined.relation,
                })
            }
            Role::Lecturer => {
                let relation = self
                    .deps
                    .relations
                    .join_as_lecturer(&user.id, workspace_id)
                    .await?;
                info!(workspace_id = %workspace_id, "joined workspace as lecturer");
                Ok(WorkspaceMembership::Joined {
                    workspace_id: workspace_id.to_string(),
                    workspace: None,
                    relation,
                })
            }
        }
    }

    async fn relate_ownership(&self, user: &User, workspace: &Workspace) -> RelationOutcome {
        match self
            .deps
            .relations
            .create_owner_relation(&user.id, &workspace.id)
            .await
        {
            Ok(relation) => {
                debug!(relation_id = %relation.id, "ownership relation established");
                RelationOutcome::Established(relation)
            }
            Err(err) => {
                warn!(
                    workspace_id = %workspace.id,
                    error = %err,
                    "ownership relation failed, keeping workspace"
                );
                RelationOutcome::Warning(SubmissionWarning::OwnershipRelationFailed {
                    workspace_id: workspace.id.clone(),
                    message: err.to_string(),
                })
            }
        }
    }

    async fn persist_identity(&self, user: &User) -> Option<SubmissionWarning> {
        let identity = SignedInIdentity::now(user.clone());
        match self.deps.identity_store.save(&identity).await {
            Ok(()) => None,
            Err(err) => {
                warn!(error = %err, "failed to persist signed-in identity");
                Some(SubmissionWarning::IdentityPersistFailed {
                    message: err.to_string(),
                })
            }
        }
    }

    async fn fail(&self, err: &ServiceError) {
        self.apply(SubmissionEvent::Failed {
            reason: err.to_string(),
        })
        .await;
    }

    async fn apply(&self, event: SubmissionEvent) {
        let next = {
            let mut state = self.state.lock().await;
            let from = state.clone();
            let event_name = format!("{:?}", event);
            let next = SubmissionStateMachine::transition(from.clone(), event);
            info!(from = ?from, to = ?next, event = %event_name, "submission state transition");
            *state = next.clone();
            next
        };
        self.deps
            .event_port
            .emit_submission_state_changed(next)
            .await;
    }
}

/// Clears the in-flight flag when the submission future completes or is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use pn_core::account::{LoginRequest, RegisterRequest};
    use pn_core::security::SecretString;
    use pn_core::workspace::{CreateWorkspaceRequest, JoinedWorkspace, RelationRole};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

    mock! {
        pub Accounts {}

        #[async_trait]
        impl AccountPort for Accounts {
            async fn register(&self, request: &RegisterRequest) -> Result<User, ServiceError>;
            async fn login(&self, request: &LoginRequest) -> Result<User, ServiceError>;
        }
    }

    mock! {
        pub Workspaces {}

        #[async_trait]
        impl WorkspacePort for Workspaces {
            async fn create_workspace(
                &self,
                request: &CreateWorkspaceRequest,
            ) -> Result<Workspace, ServiceError>;
            async fn join_workspace(
                &self,
                workspace_id: &str,
                user_id: &str,
            ) -> Result<JoinedWorkspace, ServiceError>;
        }
    }

    mock! {
        pub Relations {}

        #[async_trait]
        impl RelationPort for Relations {
            async fn create_owner_relation(
                &self,
                user_id: &str,
                workspace_id: &str,
            ) -> Result<WorkspaceRelation, ServiceError>;
            async fn join_as_student(
                &self,
                user_id: &str,
                workspace_id: &str,
            ) -> Result<WorkspaceRelation, ServiceError>;
            async fn join_as_lecturer(
                &self,
                user_id: &str,
                workspace_id: &str,
            ) -> Result<WorkspaceRelation, ServiceError>;
        }
    }

    #[derive(Default)]
    struct RecordingEvents {
        emitted: tokio::sync::Mutex<Vec<SubmissionState>>,
    }

    impl RecordingEvents {
        async fn snapshot(&self) -> Vec<SubmissionState> {
            self.emitted.lock().await.clone()
        }
    }

    #[async_trait]
    impl SubmissionEventPort for RecordingEvents {
        async fn emit_submission_state_changed(&self, state: SubmissionState) {
            self.emitted.lock().await.push(state);
        }
    }

    #[derive(Default)]
    struct MemoryIdentityStore {
        saved: StdMutex<Option<SignedInIdentity>>,
        fail: bool,
    }

    #[async_trait]
    impl IdentityStorePort for MemoryIdentityStore {
        async fn load(&self) -> anyhow::Result<Option<SignedInIdentity>> {
            Ok(self.saved.lock().unwrap().clone())
        }

        async fn save(&self, identity: &SignedInIdentity) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("disk full");
            }
            *self.saved.lock().unwrap() = Some(identity.clone());
            Ok(())
        }

        async fn clear(&self) -> anyhow::Result<()> {
            self.saved.lock().unwrap().take();
            Ok(())
        }
    }

    fn user() -> User {
        User {
            id: "u-1".into(),
            name: "Ada Lovelace".into(),
            email: "a@b.com".into(),
            username: "ada_l".into(),
            role: "Student".into(),
        }
    }

    fn workspace(id: &str) -> Workspace {
        Workspace {
            id: id.into(),
            title: "Thesis".into(),
            description: Some("Final year thesis".into()),
            created_at: None,
        }
    }

    fn relation(role: RelationRole) -> WorkspaceRelation {
        WorkspaceRelation {
            id: "r-1".into(),
            user_id: "u-1".into(),
            workspace_id: "w-1".into(),
            role,
        }
    }

    fn submission(role: Role, plan: WorkspacePlan) -> SignupSubmission {
        SignupSubmission {
            registration: RegisterRequest {
                name: "Ada Lovelace".into(),
                email: "a@b.com".into(),
                username: "ada_l".into(),
                password: Some(SecretString::new("longenough1")),
                role,
            },
            role,
            plan,
        }
    }

    fn create_plan() -> WorkspacePlan {
        WorkspacePlan::Create(WorkspaceDraft {
            title: "Thesis".into(),
            description: "Final year thesis".into(),
            icon: "🚀".into(),
        })
    }

    fn join_plan() -> WorkspacePlan {
        WorkspacePlan::Join {
            workspace_id: "w-9".into(),
        }
    }

    struct Harness {
        events: Arc<RecordingEvents>,
        identity: Arc<MemoryIdentityStore>,
    }

    fn build(
        accounts: MockAccounts,
        workspaces: MockWorkspaces,
        relations: MockRelations,
        identity: MemoryIdentityStore,
    ) -> (SubmissionOrchestrator, Harness) {
        let events = Arc::new(RecordingEvents::default());
        let identity = Arc::new(identity);
        let orchestrator = SubmissionOrchestrator::new(SubmissionDeps {
            accounts: Arc::new(accounts),
            workspaces: Arc::new(workspaces),
            relations: Arc::new(relations),
            identity_store: identity.clone(),
            event_port: events.clone(),
        });
        (orchestrator, Harness { events, identity })
    }

    fn registering_accounts(times: usize) -> MockAccounts {
        let mut accounts = MockAccounts::new();
        accounts
            .expect_register()
            .times(times)
            .returning(|_| Ok(user()));
        accounts
    }

    #[tokio::test]
    async fn registration_failure_is_fatal_and_skips_workspace() {
        let mut accounts = MockAccounts::new();
        accounts
            .expect_register()
            .times(1)
            .returning(|_| Err(ServiceError::rejected(409, "Email already registered")));
        let mut workspaces = MockWorkspaces::new();
        workspaces.expect_create_workspace().times(0);
        let (orchestrator, harness) = build(
            accounts,
            workspaces,
            MockRelations::new(),
            MemoryIdentityStore::default(),
        );

        let err = orchestrator
            .submit(&submission(Role::Student, create_plan()))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Email already registered");
        assert_eq!(
            orchestrator.state().await,
            SubmissionState::Failed {
                reason: "Email already registered".into()
            }
        );
        assert!(harness.identity.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn simple_shape_fallback_succeeds_after_primary_rejection() {
        let mut workspaces = MockWorkspaces::new();
        workspaces
            .expect_create_workspace()
            .withf(|req| req.shape == CreateWorkspaceShape::Primary)
            .times(1)
            .returning(|_| Err(ServiceError::rejected(400, "unknown field icon")));
        workspaces
            .expect_create_workspace()
            .withf(|req| req.shape == CreateWorkspaceShape::Simple && req.owner_id == "u-1")
            .times(1)
            .returning(|_| Ok(workspace("w-simple")));
        let mut relations = MockRelations::new();
        relations
            .expect_create_owner_relation()
            .withf(|user_id, workspace_id| user_id == "u-1" && workspace_id == "w-simple")
            .times(1)
            .returning(|_, _| Ok(relation(RelationRole::Owner)));
        let (orchestrator, harness) = build(
            registering_accounts(1),
            workspaces,
            relations,
            MemoryIdentityStore::default(),
        );

        let outcome = orchestrator
            .submit(&submission(Role::Student, create_plan()))
            .await
            .expect("fallback shape should succeed");

        match outcome.membership {
            WorkspaceMembership::Created {
                workspace,
                ownership,
            } => {
                assert_eq!(workspace.id, "w-simple");
                assert!(matches!(ownership, RelationOutcome::Established(_)));
            }
            other => panic!("expected created workspace, got {other:?}"),
        }
        assert!(outcome.warnings.is_empty());
        assert_eq!(orchestrator.state().await, SubmissionState::Done);
        assert_eq!(
            harness.events.snapshot().await,
            vec![
                SubmissionState::Registering,
                SubmissionState::Creating,
                SubmissionState::RelatingOwnership,
                SubmissionState::Done,
            ]
        );
        assert_eq!(
            harness.identity.load().await.unwrap().map(|i| i.user.id),
            Some("u-1".to_string())
        );
    }

    #[tokio::test]
    async fn both_shapes_rejected_is_fatal() {
        let mut workspaces = MockWorkspaces::new();
        workspaces
            .expect_create_workspace()
            .times(2)
            .returning(|req| match req.shape {
                CreateWorkspaceShape::Primary => Err(ServiceError::rejected(400, "bad primary")),
                CreateWorkspaceShape::Simple => Err(ServiceError::rejected(400, "bad simple")),
            });
        let mut relations = MockRelations::new();
        relations.expect_create_owner_relation().times(0);
        let (orchestrator, _harness) = build(
            registering_accounts(1),
            workspaces,
            relations,
            MemoryIdentityStore::default(),
        );

        let err = orchestrator
            .submit(&submission(Role::Student, create_plan()))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SubmissionError::WorkspaceCreation(ServiceError::rejected(400, "bad simple"))
        );
        assert!(matches!(
            orchestrator.state().await,
            SubmissionState::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn transport_failure_does_not_try_the_simple_shape() {
        let mut workspaces = MockWorkspaces::new();
        workspaces
            .expect_create_workspace()
            .times(1)
            .returning(|_| Err(ServiceError::Transport("connection refused".into())));
        let (orchestrator, _harness) = build(
            registering_accounts(1),
            workspaces,
            MockRelations::new(),
            MemoryIdentityStore::default(),
        );

        let err = orchestrator
            .submit(&submission(Role::Student, create_plan()))
            .await
            .unwrap_err();

        assert!(matches!(err, SubmissionError::WorkspaceCreation(ServiceError::Transport(_))));
    }

    #[tokio::test]
    async fn ownership_relation_failure_is_a_warning() {
        let mut workspaces = MockWorkspaces::new();
        workspaces
            .expect_create_workspace()
            .times(1)
            .returning(|_| Ok(workspace("w-1")));
        let mut relations = MockRelations::new();
        relations
            .expect_create_owner_relation()
            .times(1)
            .returning(|_, _| Err(ServiceError::rejected(500, "relation table locked")));
        let (orchestrator, harness) = build(
            registering_accounts(1),
            workspaces,
            relations,
            MemoryIdentityStore::default(),
        );

        let outcome = orchestrator
            .submit(&submission(Role::Student, create_plan()))
            .await
            .expect("relation failure must not fail the submission");

        let expected = SubmissionWarning::OwnershipRelationFailed {
            workspace_id: "w-1".into(),
            message: "relation table locked".into(),
        };
        assert_eq!(outcome.warnings, vec![expected.clone()]);
        assert_eq!(
            outcome.membership,
            WorkspaceMembership::Created {
                workspace: workspace("w-1"),
                ownership: RelationOutcome::Warning(expected),
            }
        );
        assert_eq!(orchestrator.state().await, SubmissionState::Done);
        assert!(!harness
            .events
            .snapshot()
            .await
            .iter()
            .any(|s| matches!(s, SubmissionState::Failed { .. })));
    }

    #[tokio::test]
    async fn student_join_uses_workspace_join_route() {
        let mut workspaces = MockWorkspaces::new();
        workspaces.expect_create_workspace().times(0);
        workspaces
            .expect_join_workspace()
            .withf(|workspace_id, user_id| workspace_id == "w-9" && user_id == "u-1")
            .times(1)
            .returning(|_, _| {
                Ok(JoinedWorkspace {
                    workspace: workspace("w-9"),
                    relation: relation(RelationRole::Member),
                })
            });
        let (orchestrator, harness) = build(
            registering_accounts(1),
            workspaces,
            MockRelations::new(),
            MemoryIdentityStore::default(),
        );

        let outcome = orchestrator
            .submit(&submission(Role::Student, join_plan()))
            .await
            .unwrap();

        assert!(matches!(
            outcome.membership,
            WorkspaceMembership::Joined { workspace: Some(_), .. }
        ));
        assert_eq!(
            harness.events.snapshot().await,
            vec![
                SubmissionState::Registering,
                SubmissionState::Joining,
                SubmissionState::Done,
            ]
        );
    }

    #[tokio::test]
    async fn lecturer_join_uses_lecturer_relation_route() {
        let mut relations = MockRelations::new();
        relations
            .expect_join_as_lecturer()
            .withf(|user_id, workspace_id| user_id == "u-1" && workspace_id == "w-9")
            .times(1)
            .returning(|_, _| Ok(relation(RelationRole::Lecturer)));
        let mut workspaces = MockWorkspaces::new();
        workspaces.expect_join_workspace().times(0);
        let (orchestrator, _harness) = build(
            registering_accounts(1),
            workspaces,
            relations,
            MemoryIdentityStore::default(),
        );

        let outcome = orchestrator
            .submit(&submission(Role::Lecturer, join_plan()))
            .await
            .unwrap();

        match outcome.membership {
            WorkspaceMembership::Joined {
                workspace_id,
                workspace,
                relation,
            } => {
                assert_eq!(workspace_id, "w-9");
                assert!(workspace.is_none());
                assert_eq!(relation.role, RelationRole::Lecturer);
            }
            other => panic!("expected joined workspace, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejected_join_is_fatal() {
        let mut workspaces = MockWorkspaces::new();
        workspaces
            .expect_join_workspace()
            .times(1)
            .returning(|_, _| Err(ServiceError::rejected(404, "Workspace not found")));
        let (orchestrator, _harness) = build(
            registering_accounts(1),
            workspaces,
            MockRelations::new(),
            MemoryIdentityStore::default(),
        );

        let err = orchestrator
            .submit(&submission(Role::Student, join_plan()))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SubmissionError::WorkspaceJoin(ServiceError::rejected(404, "Workspace not found"))
        );
    }

    #[tokio::test]
    async fn resubmission_reuses_the_registered_account() {
        let mut workspaces = MockWorkspaces::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        workspaces
            .expect_join_workspace()
            .times(2)
            .returning(move |_, _| {
                if seen.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(ServiceError::Transport("timeout".into()))
                } else {
                    Ok(JoinedWorkspace {
                        workspace: workspace("w-9"),
                        relation: relation(RelationRole::Member),
                    })
                }
            });
        let (orchestrator, _harness) = build(
            registering_accounts(1),
            workspaces,
            MockRelations::new(),
            MemoryIdentityStore::default(),
        );
        let request = submission(Role::Student, join_plan());

        assert!(orchestrator.submit(&request).await.is_err());
        let outcome = orchestrator.submit(&request).await.unwrap();

        assert_eq!(outcome.user.id, "u-1");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failure_after_a_completed_submission_is_reported() {
        let mut accounts = MockAccounts::new();
        let attempts = AtomicUsize::new(0);
        accounts.expect_register().times(2).returning(move |_| {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(user())
            } else {
                Err(ServiceError::rejected(409, "Email already registered"))
            }
        });
        let mut workspaces = MockWorkspaces::new();
        workspaces
            .expect_join_workspace()
            .times(1)
            .returning(|_, _| {
                Ok(JoinedWorkspace {
                    workspace: workspace("w-9"),
                    relation: relation(RelationRole::Member),
                })
            });
        let (orchestrator, harness) = build(
            accounts,
            workspaces,
            MockRelations::new(),
            MemoryIdentityStore::default(),
        );
        let request = submission(Role::Student, join_plan());

        orchestrator.submit(&request).await.unwrap();
        assert_eq!(orchestrator.state().await, SubmissionState::Done);

        let err = orchestrator.submit(&request).await.unwrap_err();

        assert!(matches!(err, SubmissionError::Registration(_)));
        let failed = SubmissionState::Failed {
            reason: "Email already registered".into(),
        };
        assert_eq!(orchestrator.state().await, failed);
        assert_eq!(
            harness.events.snapshot().await,
            vec![
                SubmissionState::Registering,
                SubmissionState::Joining,
                SubmissionState::Done,
                SubmissionState::Registering,
                failed,
            ]
        );
    }

    #[tokio::test]
    async fn identity_persist_failure_is_a_warning() {
        let mut workspaces = MockWorkspaces::new();
        workspaces
            .expect_join_workspace()
            .returning(|_, _| {
                Ok(JoinedWorkspace {
                    workspace: workspace("w-9"),
                    relation: relation(RelationRole::Member),
                })
            });
        let (orchestrator, _harness) = build(
            registering_accounts(1),
            workspaces,
            MockRelations::new(),
            MemoryIdentityStore {
                fail: true,
                ..MemoryIdentityStore::default()
            },
        );

        let outcome = orchestrator
            .submit(&submission(Role::Student, join_plan()))
            .await
            .unwrap();

        assert_eq!(
            outcome.warnings,
            vec![SubmissionWarning::IdentityPersistFailed {
                message: "disk full".into()
            }]
        );
    }

    struct GatedAccounts {
        gate: Notify,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AccountPort for GatedAccounts {
        async fn register(&self, _request: &RegisterRequest) -> Result<User, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(user())
        }

        async fn login(&self, _request: &LoginRequest) -> Result<User, ServiceError> {
            unreachable!("login is not part of signup")
        }
    }

    #[tokio::test]
    async fn double_submit_registers_once() {
        let accounts = Arc::new(GatedAccounts {
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
        });
        let mut workspaces = MockWorkspaces::new();
        workspaces.expect_join_workspace().times(1).returning(|_, _| {
            Ok(JoinedWorkspace {
                workspace: workspace("w-9"),
                relation: relation(RelationRole::Member),
            })
        });
        let orchestrator = SubmissionOrchestrator::new(SubmissionDeps {
            accounts: accounts.clone(),
            workspaces: Arc::new(workspaces),
            relations: Arc::new(MockRelations::new()),
            identity_store: Arc::new(MemoryIdentityStore::default()),
            event_port: Arc::new(RecordingEvents::default()),
        });
        let request = submission(Role::Student, join_plan());

        let (first, second, ()) = tokio::join!(
            orchestrator.submit(&request),
            orchestrator.submit(&request),
            async {
                tokio::task::yield_now().await;
                accounts.gate.notify_one();
            }
        );

        assert!(first.is_ok());
        assert_eq!(second, Err(SubmissionError::AlreadyInFlight));
        assert_eq!(accounts.calls.load(Ordering::SeqCst), 1);
        assert!(!orchestrator.is_in_flight());
    }
}
