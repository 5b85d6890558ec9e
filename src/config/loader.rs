//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SYSTTS_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SYSTTS_SERVER__HOST=127.0.0.1`
/// - `SYSTTS_SERVER__PORT=8080`
/// - `SYSTTS_ENGINE__URL=http://tts-engine:8000`
/// - `SYSTTS_PRESENCE__POLL_INTERVAL_SECS=5`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5070)?
        .set_default("engine.mode", "http")?
        .set_default("engine.url", "http://localhost:8000")?
        .set_default("engine.timeout_secs", 120)?
        .set_default("engine.max_retries", 0)?
        .set_default("engine.fake_latency_ms", 200)?
        .set_default("engine.fake_duration_ms", 1000)?
        .set_default("engine.fake_sample_rate", 16000)?
        .set_default("presence.poll_interval_secs", 5)?
        .set_default("lease.wake_ttl_secs", 20 * 60)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: SYSTTS_
    // 层级分隔符: __ (双下划线)
    // 例如: SYSTTS_ENGINE__URL=http://tts-engine:8000
    builder = builder.add_source(
        Environment::with_prefix("SYSTTS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    // 验证端口范围
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    // 验证引擎 URL
    if config.engine.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Engine URL cannot be empty".to_string(),
        ));
    }

    // 验证空闲轮询间隔
    if config.presence.poll_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Presence poll interval cannot be 0".to_string(),
        ));
    }

    // 验证唤醒锁时长
    if config.lease.wake_ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Wake lease TTL cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Engine Mode: {:?}", config.engine.mode);
    tracing::info!("Engine URL: {}", config.engine.url);
    tracing::info!("Engine Timeout: {}s", config.engine.timeout_secs);
    tracing::info!("Engine Max Retries: {}", config.engine.max_retries);
    tracing::info!("Presence Poll Interval: {}s", config.presence.poll_interval_secs);
    tracing::info!("Wake Lease TTL: {}s", config.lease.wake_ttl_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5070);
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_engine_url() {
        let mut config = AppConfig::default();
        config.engine.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_poll_interval() {
        let mut config = AppConfig::default();
        config.presence.poll_interval_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[engine]\nmode = \"fake\"\nmax_retries = 3\n\n[presence]\npoll_interval_secs = 2"
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.engine.mode, crate::config::EngineMode::Fake);
        assert_eq!(config.engine.max_retries, 3);
        assert_eq!(config.presence.poll_interval_secs, 2);
        // 未覆盖的键保持默认值
        assert_eq!(config.server.port, 5070);
    }
}
