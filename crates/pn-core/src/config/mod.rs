//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic or policies / 禁止任何业务逻辑或策略**
//! ❌ **No validation logic / 禁止验证逻辑**
//!
//! > **This module contains data only, no policy, no validation.**

use std::path::PathBuf;

/// Development backend address.
pub const DEFAULT_API_BASE_URL: &str = "https://localhost:7208/api";

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the REST backend, e.g. `https://localhost:7208/api`.
    /// May be empty - this is a fact, not an error.
    pub api_base_url: String,

    /// Per-request timeout in seconds. Zero means "no timeout configured".
    pub request_timeout_secs: u64,

    /// File holding the signed-in identity record (path only, no existence check)
    /// 登录身份记录文件路径（仅路径信息，不检查文件是否存在）
    pub identity_path: PathBuf,

    /// Directory for log files. Empty disables file logging.
    pub log_directory: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// **Prohibited / 禁止**: This method must NOT contain any validation.
    /// Missing keys map to empty values.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            api_base_url: toml_value
                .get("api")
                .and_then(|a| a.get("base_url"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            request_timeout_secs: toml_value
                .get("api")
                .and_then(|a| a.get("timeout_secs"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0) as u64,
            identity_path: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("identity_path"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            log_directory: PathBuf::from(
                toml_value
                    .get("logging")
                    .and_then(|l| l.get("directory"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    /// 创建空的 AppConfig（所有字段为空/默认值）
    pub fn empty() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout_secs: 0,
            identity_path: PathBuf::new(),
            log_directory: PathBuf::new(),
        }
    }

    /// Create AppConfig with paths derived from a caller-provided data directory.
    ///
    /// The base directory should be computed by the caller (e.g. with the `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            identity_path: data_dir.join("identity.json"),
            log_directory: data_dir.join("logs"),
        }
    }
}
