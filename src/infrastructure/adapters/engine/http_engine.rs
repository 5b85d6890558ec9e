//! HTTP Synthesis Engine - 调用外部合成服务
//!
//! 实现 SynthesisEnginePort，通过 HTTP 调用外部合成服务
//!
//! 外部 API:
//! POST {base}/api/tts/infer
//! Request: {"text": "...", "language": "...", "country": "..."}  (JSON)
//! Response: audio/wav binary, metadata in headers

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tokio::sync::broadcast;

use super::EngineCore;
use crate::application::ports::{
    EngineAudio, EngineError, EngineEvent, EngineRequest, SynthesisEnginePort,
};
use crate::config::{load_config, EngineConfig};

/// 重试前的退避时间
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// 指示器错误标题
const ERROR_TITLE: &str = "合成失败";

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct InferHttpRequest<'a> {
    /// 要合成的文本
    text: &'a str,
    /// 语言（ISO 639-2）
    language: &'a str,
    /// 国家（ISO 3166 alpha-3）
    country: &'a str,
}

/// 引擎运行参数（可热加载）
#[derive(Debug, Clone)]
pub struct HttpEngineProfile {
    /// 合成服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 最大重试次数
    pub max_retries: u32,
}

impl Default for HttpEngineProfile {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 120,
            max_retries: 0,
        }
    }
}

impl From<&EngineConfig> for HttpEngineProfile {
    fn from(config: &EngineConfig) -> Self {
        Self {
            base_url: config.url.clone(),
            timeout_secs: config.timeout_secs,
            max_retries: config.max_retries,
        }
    }
}

/// HTTP 合成引擎
///
/// 通过 HTTP 调用外部合成服务。运行参数放在 `ArcSwap` 中，
/// reload-config 信号到达时原子替换，不影响进行中的请求。
pub struct HttpSynthesisEngine {
    client: Client,
    profile: ArcSwap<HttpEngineProfile>,
    core: EngineCore,
}

impl HttpSynthesisEngine {
    /// 创建新的 HTTP 合成引擎
    pub fn new(profile: HttpEngineProfile) -> Result<Self, EngineError> {
        let client = Client::builder()
            .build()
            .map_err(|e| EngineError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            profile: ArcSwap::from_pointee(profile),
            core: EngineCore::new(),
        })
    }

    /// 当前运行参数快照
    pub fn profile(&self) -> Arc<HttpEngineProfile> {
        self.profile.load_full()
    }

    /// 获取合成 URL
    fn infer_url(profile: &HttpEngineProfile) -> String {
        format!("{}/api/tts/infer", profile.base_url)
    }

    /// 单次合成请求
    async fn request_once(
        &self,
        profile: &HttpEngineProfile,
        request: &EngineRequest,
    ) -> Result<EngineAudio, EngineError> {
        let body = InferHttpRequest {
            text: &request.text,
            language: &request.locale_hint.language,
            country: &request.locale_hint.country,
        };

        tracing::debug!(
            url = %Self::infer_url(profile),
            text_len = request.text.len(),
            locale = %request.locale_hint,
            "Sending synthesis request"
        );

        let response = self
            .client
            .post(Self::infer_url(profile))
            .timeout(Duration::from_secs(profile.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::Timeout
                } else if e.is_connect() {
                    EngineError::NetworkError(format!("Cannot connect to synthesis service: {}", e))
                } else {
                    EngineError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EngineError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // 从 headers 提取元数据
        let headers = response.headers();
        let duration_ms = headers
            .get("X-TTS-Duration-Ms")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let sample_rate = headers
            .get("X-TTS-Sample-Rate")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| EngineError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        tracing::info!(
            duration_ms = ?duration_ms,
            sample_rate = ?sample_rate,
            audio_size = audio_data.len(),
            "Synthesis request completed"
        );

        Ok(EngineAudio {
            audio_data,
            duration_ms,
            sample_rate,
        })
    }
}

#[async_trait]
impl SynthesisEnginePort for HttpSynthesisEngine {
    fn is_synthesizing(&self) -> bool {
        self.core.is_busy()
    }

    async fn run(&self, request: EngineRequest) -> Result<EngineAudio, EngineError> {
        let (_busy, token) = self.core.begin_run()?;
        let profile = self.profile.load_full();

        let mut attempt: u32 = 0;
        let mut recovered = false;

        loop {
            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    tracing::info!("Synthesis cancelled cooperatively");
                    return Err(EngineError::Cancelled);
                }
                result = self.request_once(&profile, &request) => result,
            };

            match outcome {
                Ok(audio) => {
                    if recovered {
                        self.core.emit(EngineEvent::RetrySucceeded);
                    }
                    return Ok(audio);
                }
                Err(e) => {
                    tracing::warn!(attempt = attempt, error = %e, "Synthesis request failed");
                    self.core.emit(EngineEvent::Error {
                        title: ERROR_TITLE.to_string(),
                        detail: e.to_string(),
                    });

                    if attempt >= profile.max_retries {
                        return Err(e);
                    }
                    attempt += 1;
                    recovered = true;

                    // 退避期间仍可被取消
                    tokio::select! {
                        _ = token.cancelled() => return Err(EngineError::Cancelled),
                        _ = tokio::time::sleep(RETRY_BACKOFF) => {}
                    }
                }
            }
        }
    }

    fn stop(&self) {
        self.core.request_stop();
    }

    /// 热加载引擎配置
    ///
    /// 重新执行配置加载并原子替换运行参数；
    /// 加载失败保留旧参数，只记录日志。
    fn reload_config(&self) {
        match load_config() {
            Ok(config) => {
                let profile = HttpEngineProfile::from(&config.engine);
                tracing::info!(
                    url = %profile.base_url,
                    timeout_secs = profile.timeout_secs,
                    max_retries = profile.max_retries,
                    "Engine profile reloaded"
                );
                self.profile.store(Arc::new(profile));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Engine config reload failed, keeping previous profile");
            }
        }
    }

    fn subscribe_status(&self) -> broadcast::Receiver<EngineEvent> {
        self.core.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_default() {
        let profile = HttpEngineProfile::default();
        assert_eq!(profile.base_url, "http://localhost:8000");
        assert_eq!(profile.timeout_secs, 120);
        assert_eq!(profile.max_retries, 0);
    }

    #[test]
    fn test_profile_from_engine_config() {
        let config = EngineConfig {
            url: "http://engine:9000".to_string(),
            timeout_secs: 30,
            max_retries: 2,
            ..EngineConfig::default()
        };
        let profile = HttpEngineProfile::from(&config);
        assert_eq!(profile.base_url, "http://engine:9000");
        assert_eq!(profile.timeout_secs, 30);
        assert_eq!(profile.max_retries, 2);
    }

    #[test]
    fn test_infer_url() {
        let profile = HttpEngineProfile::default();
        assert_eq!(
            HttpSynthesisEngine::infer_url(&profile),
            "http://localhost:8000/api/tts/infer"
        );
    }

    #[test]
    fn test_engine_exposes_active_profile() {
        let engine = HttpSynthesisEngine::new(HttpEngineProfile {
            base_url: "http://engine:9000".to_string(),
            timeout_secs: 30,
            max_retries: 1,
        })
        .unwrap();

        assert_eq!(engine.profile().base_url, "http://engine:9000");
        assert_eq!(engine.profile().max_retries, 1);
    }

    #[tokio::test]
    async fn test_run_fails_fast_on_unreachable_service() {
        // 未监听的端口：连接错误立即返回，不重试
        let engine = HttpSynthesisEngine::new(HttpEngineProfile {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 1,
            max_retries: 0,
        })
        .unwrap();

        let result = engine
            .run(EngineRequest {
                text: "测试".to_string(),
                locale_hint: crate::domain::locale::Locale::default(),
            })
            .await;

        assert!(result.is_err());
        assert!(!engine.is_synthesizing());
    }
}
