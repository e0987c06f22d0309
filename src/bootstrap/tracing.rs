//! Tracing configuration for PaperNest
//!
//! Installs the global `tracing-subscriber` with an env filter, a stdout fmt
//! layer and, when a log directory is configured, a daily rolling file layer.

use std::path::Path;
use std::{fs, io, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

use pn_core::config::AppConfig;

const LOG_FILE_PREFIX: &str = "papernest.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// ## Behavior / 行为
/// - **Development**: debug level for PaperNest crates
/// - **Production**: info level for PaperNest crates
/// - HTTP client internals stay at warn in both
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        format!("papernest={level}"),
        format!("pn_core={level}"),
        format!("pn_app={level}"),
        format!("pn_infra={level}"),
        "hyper=warn".to_string(),
        "hyper_util=warn".to_string(),
        "reqwest=warn".to_string(),
        "rustls=warn".to_string(),
    ]
}

/// Initialize the tracing subscriber with appropriate configuration
///
/// `RUST_LOG` overrides the default directives. File logging is skipped when
/// `config.log_directory` is empty, and falls back to stdout only when the
/// directory cannot be created.
///
/// ## Errors / 错误
///
/// Returns `Err` if a global subscriber is already registered.
pub fn init_tracing_subscriber(config: &AppConfig) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let stdout_writer: BoxMakeWriter = BoxMakeWriter::new(io::stdout);
    let file_writer = if config.log_directory.as_os_str().is_empty() {
        None
    } else {
        match build_file_writer(&config.log_directory) {
            Ok(writer) => Some(writer),
            Err(err) => {
                eprintln!("Failed to initialize file logging, falling back to stdout: {err}");
                None
            }
        }
    };

    // "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(stdout_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(
                "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            ))
            .with_level(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer(log_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
