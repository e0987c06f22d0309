//! PaperNest signup core
//!
//! 论文协作平台注册向导核心库
//!
//! Hosts call [`bootstrap::load_or_default`], [`bootstrap::init_tracing_subscriber`]
//! and [`bootstrap::build_services`], then drive the returned
//! [`AppServices`](bootstrap::AppServices).

pub mod bootstrap;

pub use pn_app::usecases::signup::{SignupFlow, SignupFlowError, WizardSnapshot};
pub use pn_core::config::AppConfig;
