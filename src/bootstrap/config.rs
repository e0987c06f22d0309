//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Parse TOML into AppConfig DTO / 将 TOML 解析为 AppConfig DTO
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No business rules / 禁止业务规则**

use anyhow::Context;
use std::path::{Path, PathBuf};

use pn_core::config::AppConfig;

pub const CONFIG_FILE_NAME: &str = "papernest.toml";
const APP_DIR_NAME: &str = "papernest";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// Empty strings and zero timeouts are accepted as-is; missing sections map
/// to empty values.
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Per-user data directory, e.g. `~/.local/share/papernest` on Linux.
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .context("Failed to resolve the local data directory")
}

/// Load `papernest.toml` from `data_dir` when present, else use the defaults
/// derived from `data_dir`.
pub fn load_or_default(data_dir: &Path) -> anyhow::Result<AppConfig> {
    let config_path = data_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        load_config(&config_path)
    } else {
        Ok(AppConfig::with_system_defaults(data_dir.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pn_core::config::DEFAULT_API_BASE_URL;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    /// Test that valid TOML is parsed correctly
    /// 测试有效 TOML 被正确解析
    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [api]
            base_url = "https://papernest.example/api"
            timeout_secs = 10

            [storage]
            identity_path = "/path/to/identity.json"

            [logging]
            directory = "/path/to/logs"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.api_base_url, "https://papernest.example/api");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.identity_path, PathBuf::from("/path/to/identity.json"));
        assert_eq!(config.log_directory, PathBuf::from("/path/to/logs"));
    }

    /// Test that invalid TOML is reported with context
    /// 测试无效 TOML 带上下文报错
    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[api\nbase_url = ").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_load_config_returns_io_error_on_file_not_found() {
        let result = load_config(Path::new("/this/path/does/not/exist/papernest.toml"));

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read config file"));
    }

    #[test]
    fn test_load_or_default_without_file_uses_data_dir() {
        let temp_dir = TempDir::new().unwrap();

        let config = load_or_default(temp_dir.path()).unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.identity_path, temp_dir.path().join("identity.json"));
    }

    #[test]
    fn test_load_or_default_prefers_config_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[api]\nbase_url = \"http://127.0.0.1:5000/api\"\n",
        )
        .unwrap();

        let config = load_or_default(temp_dir.path()).unwrap();

        assert_eq!(config.api_base_url, "http://127.0.0.1:5000/api");
        assert_eq!(config.identity_path, PathBuf::new());
    }
}
