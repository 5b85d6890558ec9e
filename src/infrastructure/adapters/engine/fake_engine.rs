//! Fake Synthesis Engine - 进程内假引擎
//!
//! 本地运行与联调用：不访问网络，按配置延迟后返回指定时长的
//! 静音 WAV。支持脚本化失败（前 N 次调用报错）来演练错误上报
//! 与恢复路径。

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::EngineCore;
use crate::application::ports::{
    EngineAudio, EngineError, EngineEvent, EngineRequest, SynthesisEnginePort,
};
use crate::config::EngineConfig;
use crate::domain::audio;

/// Fake 引擎配置
#[derive(Debug, Clone)]
pub struct FakeEngineConfig {
    /// 模拟合成延迟（毫秒）
    pub latency_ms: u64,
    /// 输出音频时长（毫秒）
    pub duration_ms: u64,
    /// 输出采样率（Hz）
    pub sample_rate: u32,
    /// 前 N 次调用报错（演练错误路径），0 表示总是成功
    pub fail_first: u32,
}

impl Default for FakeEngineConfig {
    fn default() -> Self {
        Self {
            latency_ms: 200,
            duration_ms: 1000,
            sample_rate: 16000,
            fail_first: 0,
        }
    }
}

impl From<&EngineConfig> for FakeEngineConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            latency_ms: config.fake_latency_ms,
            duration_ms: config.fake_duration_ms,
            sample_rate: config.fake_sample_rate,
            fail_first: 0,
        }
    }
}

/// Fake 合成引擎
pub struct FakeSynthesisEngine {
    config: FakeEngineConfig,
    calls: AtomicU32,
    core: EngineCore,
}

impl FakeSynthesisEngine {
    pub fn new(config: FakeEngineConfig) -> Self {
        tracing::info!(
            latency_ms = config.latency_ms,
            duration_ms = config.duration_ms,
            sample_rate = config.sample_rate,
            "FakeSynthesisEngine initialized"
        );
        Self {
            config,
            calls: AtomicU32::new(0),
            core: EngineCore::new(),
        }
    }
}

#[async_trait]
impl SynthesisEnginePort for FakeSynthesisEngine {
    fn is_synthesizing(&self) -> bool {
        self.core.is_busy()
    }

    async fn run(&self, request: EngineRequest) -> Result<EngineAudio, EngineError> {
        let (_busy, token) = self.core.begin_run()?;

        tracing::debug!(
            text_len = request.text.len(),
            locale = %request.locale_hint,
            "FakeSynthesisEngine: synthesizing"
        );

        // 模拟合成延迟，可被取消
        tokio::select! {
            _ = token.cancelled() => {
                tracing::info!("Fake synthesis cancelled");
                return Err(EngineError::Cancelled);
            }
            _ = tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)) => {}
        }

        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.config.fail_first {
            self.core.emit(EngineEvent::Error {
                title: "合成失败".to_string(),
                detail: format!("scripted failure {}/{}", call, self.config.fail_first),
            });
            return Err(EngineError::ServiceError("scripted failure".to_string()));
        }
        if self.config.fail_first > 0 && call == self.config.fail_first + 1 {
            // 脚本化失败结束后的首次成功，上报恢复事件
            self.core.emit(EngineEvent::RetrySucceeded);
        }

        Ok(EngineAudio {
            audio_data: audio::silent_wav(self.config.sample_rate, 1, self.config.duration_ms),
            duration_ms: Some(self.config.duration_ms),
            sample_rate: Some(self.config.sample_rate),
        })
    }

    fn stop(&self) {
        self.core.request_stop();
    }

    fn reload_config(&self) {
        tracing::debug!("Fake engine has no reloadable config");
    }

    fn subscribe_status(&self) -> broadcast::Receiver<EngineEvent> {
        self.core.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::locale::Locale;
    use std::sync::Arc;
    use std::time::Duration;

    fn request() -> EngineRequest {
        EngineRequest {
            text: "测试文本".to_string(),
            locale_hint: Locale::default(),
        }
    }

    fn config(latency_ms: u64) -> FakeEngineConfig {
        FakeEngineConfig {
            latency_ms,
            duration_ms: 100,
            sample_rate: 16000,
            fail_first: 0,
        }
    }

    #[tokio::test]
    async fn test_produces_wav_of_configured_duration() {
        let engine = FakeSynthesisEngine::new(config(1));

        let audio = engine.run(request()).await.unwrap();

        // 100ms @ 16kHz 单声道 16bit = 3200 字节 data + 44 头
        assert_eq!(audio.audio_data.len(), audio::WAV_HEADER_LEN + 3200);
        assert_eq!(audio.sample_rate, Some(16000));
        assert!(!engine.is_synthesizing());
    }

    #[tokio::test]
    async fn test_busy_during_run() {
        let engine = Arc::new(FakeSynthesisEngine::new(config(100)));

        let task = {
            let engine = engine.clone();
            tokio::spawn(async move { engine.run(request()).await })
        };
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(engine.is_synthesizing());
        task.await.unwrap().unwrap();
        assert!(!engine.is_synthesizing());
    }

    #[tokio::test]
    async fn test_stop_cancels_run() {
        let engine = Arc::new(FakeSynthesisEngine::new(config(500)));

        let task = {
            let engine = engine.clone();
            tokio::spawn(async move { engine.run(request()).await })
        };
        tokio::time::sleep(Duration::from_millis(30)).await;
        engine.stop();

        let result = task.await.unwrap();
        assert!(matches!(result, Err(EngineError::Cancelled)));
        assert!(!engine.is_synthesizing());
    }

    #[tokio::test]
    async fn test_scripted_failure_then_recovery_events() {
        let engine = FakeSynthesisEngine::new(FakeEngineConfig {
            latency_ms: 1,
            fail_first: 1,
            ..config(1)
        });
        let mut events = engine.subscribe_status();

        assert!(engine.run(request()).await.is_err());
        assert!(engine.run(request()).await.is_ok());

        assert!(matches!(
            events.try_recv().unwrap(),
            EngineEvent::Error { .. }
        ));
        assert!(matches!(
            events.try_recv().unwrap(),
            EngineEvent::RetrySucceeded
        ));
    }
}
