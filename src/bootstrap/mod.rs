pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{default_data_dir, load_config, load_or_default};
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{build_services, AppServices, WiringError};
