//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (HTTP services, identity file) / 创建 infra 层具体实现
//! - ✅ Inject them into the use cases through port traits / 通过 Port trait 注入用例
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! ❌ **No configuration validation / 禁止做配置验证**, beyond refusing an
//!    empty identity path
//!
//! > **This is the only place allowed to depend on pn-infra and pn-app simultaneously.**
//! > **这是唯一允许同时依赖 pn-infra 和 pn-app 的地方。**

use std::sync::Arc;

use pn_app::usecases::auth::{GetCurrentUser, LoginUser, LogoutUser};
use pn_app::usecases::signup::{SignupFlow, SubmissionDeps, SubmissionOrchestrator};
use pn_core::config::AppConfig;
use pn_core::ports::{AccountPort, IdentityStorePort, RelationPort, WorkspacePort};
use pn_infra::{
    ApiClient, BroadcastSubmissionEvents, FileIdentityRepository, HttpAccountService,
    HttpRelationService, HttpWorkspaceService,
};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClient(String),

    #[error("Identity storage is not configured")]
    IdentityPathMissing,
}

/// Everything a host needs to drive signup and sign-in.
pub struct AppServices {
    pub signup: SignupFlow,
    pub login: LoginUser,
    pub current_user: GetCurrentUser,
    pub logout: LogoutUser,
    /// Subscribe here to follow submission progress.
    pub submission_events: BroadcastSubmissionEvents,
}

pub fn build_services(config: &AppConfig) -> WiringResult<AppServices> {
    if config.identity_path.as_os_str().is_empty() {
        return Err(WiringError::IdentityPathMissing);
    }

    let client =
        ApiClient::from_config(config).map_err(|e| WiringError::HttpClient(format!("{e:#}")))?;
    let accounts: Arc<dyn AccountPort> = Arc::new(HttpAccountService::new(client.clone()));
    let workspaces: Arc<dyn WorkspacePort> = Arc::new(HttpWorkspaceService::new(client.clone()));
    let relations: Arc<dyn RelationPort> = Arc::new(HttpRelationService::new(client));
    let identity_store: Arc<dyn IdentityStorePort> =
        Arc::new(FileIdentityRepository::new(config.identity_path.clone()));
    let submission_events = BroadcastSubmissionEvents::default();

    let orchestrator = SubmissionOrchestrator::new(SubmissionDeps {
        accounts: accounts.clone(),
        workspaces,
        relations,
        identity_store: identity_store.clone(),
        event_port: Arc::new(submission_events.clone()),
    });

    tracing::info!(api = %config.api_base_url, "PaperNest services wired");

    Ok(AppServices {
        signup: SignupFlow::new(Arc::new(orchestrator)),
        login: LoginUser::new(accounts, identity_store.clone()),
        current_user: GetCurrentUser::new(identity_store.clone()),
        logout: LogoutUser::new(identity_store),
        submission_events,
    })
}
