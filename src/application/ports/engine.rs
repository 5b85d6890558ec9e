//! Synthesis Engine Port - 合成引擎抽象
//!
//! 定义合成引擎的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::domain::locale::Locale;

/// 合成引擎错误
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Synthesis cancelled")]
    Cancelled,

    #[error("Engine busy")]
    Busy,
}

/// 合成请求
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// 要合成的文本内容
    pub text: String,
    /// 语言区域提示
    pub locale_hint: Locale,
}

/// 合成结果音频
#[derive(Debug, Clone)]
pub struct EngineAudio {
    /// 完整音频数据（WAV）
    pub audio_data: Vec<u8>,
    /// 音频时长（毫秒）
    pub duration_ms: Option<u64>,
    /// 采样率
    pub sample_rate: Option<u32>,
}

/// 引擎推送的状态事件
///
/// 推送语义：引擎在合成过程中单向上报，编排器订阅并
/// 映射到指示器内容。
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// 合成出错（标题 + 详情）
    Error { title: String, detail: String },
    /// 重试后恢复成功
    RetrySucceeded,
}

/// 引擎状态（编排器视角的快照）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineStatus {
    Idle,
    Synthesizing,
    Error { title: String, detail: String },
    RetriedOk,
}

impl EngineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Synthesizing => "synthesizing",
            Self::Error { .. } => "error",
            Self::RetriedOk => "retried_ok",
        }
    }
}

/// Synthesis Engine Port
///
/// 外部合成引擎的抽象接口
#[async_trait]
pub trait SynthesisEnginePort: Send + Sync {
    /// 是否正在合成
    fn is_synthesizing(&self) -> bool;

    /// 执行合成，阻塞直到产出音频或报告终态错误
    async fn run(&self, request: EngineRequest) -> Result<EngineAudio, EngineError>;

    /// 协作式停止当前合成
    ///
    /// 仅请求停止，引擎自行决定退出时机；无进行中合成时为 no-op。
    fn stop(&self);

    /// 热加载引擎配置
    ///
    /// 不触碰进行中的请求，可重复调用。
    fn reload_config(&self);

    /// 订阅引擎状态事件
    fn subscribe_status(&self) -> broadcast::Receiver<EngineEvent>;
}
