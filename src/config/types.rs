//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 合成引擎配置
    #[serde(default)]
    pub engine: EngineConfig,

    /// 前台指示器配置
    #[serde(default)]
    pub presence: PresenceConfig,

    /// 资源租约配置
    #[serde(default)]
    pub lease: LeaseConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            engine: EngineConfig::default(),
            presence: PresenceConfig::default(),
            lease: LeaseConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 合成引擎模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    /// 调用外部 HTTP 合成服务
    Http,
    /// 进程内假引擎（本地运行/测试）
    Fake,
}

impl Default for EngineMode {
    fn default() -> Self {
        EngineMode::Http
    }
}

/// 合成引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// 引擎模式
    #[serde(default)]
    pub mode: EngineMode,

    /// 外部合成服务基础 URL
    #[serde(default = "default_engine_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,

    /// 最大重试次数
    #[serde(default)]
    pub max_retries: u32,

    /// Fake 引擎：模拟合成延迟（毫秒）
    #[serde(default = "default_fake_latency")]
    pub fake_latency_ms: u64,

    /// Fake 引擎：输出音频时长（毫秒）
    #[serde(default = "default_fake_duration")]
    pub fake_duration_ms: u64,

    /// Fake 引擎：输出采样率（Hz）
    #[serde(default = "default_fake_sample_rate")]
    pub fake_sample_rate: u32,
}

fn default_engine_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_engine_timeout() -> u64 {
    120
}

fn default_fake_latency() -> u64 {
    200
}

fn default_fake_duration() -> u64 {
    1000
}

fn default_fake_sample_rate() -> u32 {
    16000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: EngineMode::default(),
            url: default_engine_url(),
            timeout_secs: default_engine_timeout(),
            max_retries: 0,
            fake_latency_ms: default_fake_latency(),
            fake_duration_ms: default_fake_duration(),
            fake_sample_rate: default_fake_sample_rate(),
        }
    }
}

/// 前台指示器配置
#[derive(Debug, Clone, Deserialize)]
pub struct PresenceConfig {
    /// 空闲监视轮询间隔（秒）
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval() -> u64 {
    5
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

/// 资源租约配置
#[derive(Debug, Clone, Deserialize)]
pub struct LeaseConfig {
    /// 唤醒锁续期时长（秒）
    #[serde(default = "default_wake_ttl")]
    pub wake_ttl_secs: u64,
}

fn default_wake_ttl() -> u64 {
    20 * 60 // 20 分钟
}

impl Default for LeaseConfig {
    fn default() -> Self {
        Self {
            wake_ttl_secs: default_wake_ttl(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5070);
        assert_eq!(config.engine.mode, EngineMode::Http);
        assert_eq!(config.engine.url, "http://localhost:8000");
        assert_eq!(config.presence.poll_interval_secs, 5);
        assert_eq!(config.lease.wake_ttl_secs, 1200);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5070");
    }

    #[test]
    fn test_engine_mode_deserialize() {
        let config: EngineConfig = serde_json::from_str(r#"{"mode": "fake"}"#).unwrap();
        assert_eq!(config.mode, EngineMode::Fake);
    }
}
