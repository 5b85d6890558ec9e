//! Request Orchestrator - 合成请求编排器
//!
//! 顶层协调者：
//! - 串行化合成调用（单飞：后到的调用阻塞等待，不拒绝）
//! - 每次调用前续期唤醒锁、确保指示器可见
//! - 静音输入短路，不触达引擎
//! - 委托引擎并吸收其失败：调用方永远收到完成信号
//! - 订阅引擎状态事件并反映到指示器内容
//!
//! 控制信号（cancel / reload-config / kill）走独立执行路径，
//! 不会被 `synthesize` 的单飞锁串行化。

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use crate::application::leases::LeaseManager;
use crate::application::ports::{
    EngineEvent, EngineRequest, EngineStatus, PresenceCard, SynthesisEnginePort,
};
use crate::application::presence::PresenceController;
use crate::domain::audio;
use crate::domain::locale::{self, Locale, LocaleAvailability};
use crate::domain::text;

/// 指示器"进行中"标题
pub const STATE_SYNTHESIZING: &str = "正在合成";

/// 一次合成调用的不可变载荷
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub request_id: Uuid,
    pub text: String,
    pub locale: Locale,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, locale: Locale) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            text: text.into(),
            locale,
        }
    }
}

/// 合成输出
///
/// 合成调用永远产出完整音频流并宣告完成；
/// 内部失败降级为空流，绝不向宿主抛错或挂起。
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    /// 完整 WAV 音频数据
    pub audio_data: Vec<u8>,
    /// 采样率
    pub sample_rate: u32,
    /// 音频时长（毫秒）
    pub duration_ms: Option<u64>,
}

impl SynthesisOutput {
    /// 空流输出（静音输入或失败降级）
    fn empty() -> Self {
        Self {
            audio_data: audio::empty_wav(),
            sample_rate: audio::SILENT_STREAM_SAMPLE_RATE,
            duration_ms: Some(0),
        }
    }
}

/// 合成请求编排器
pub struct SynthesisOrchestrator {
    engine: Arc<dyn SynthesisEnginePort>,
    leases: Arc<LeaseManager>,
    presence: Arc<PresenceController>,
    /// 单飞锁：任意时刻至多一个合成调用在执行
    call_lock: tokio::sync::Mutex<()>,
    /// 当前请求文本（重试成功后恢复指示器详情用）
    current_text: Mutex<String>,
    /// 引擎状态快照
    status: Mutex<EngineStatus>,
    /// 最近一次 locale 加载记录的三元组（记录"请求了什么"）
    pending_locale: Mutex<Locale>,
}

impl SynthesisOrchestrator {
    pub fn new(
        engine: Arc<dyn SynthesisEnginePort>,
        leases: Arc<LeaseManager>,
        presence: Arc<PresenceController>,
    ) -> Self {
        Self {
            engine,
            leases,
            presence,
            call_lock: tokio::sync::Mutex::new(()),
            current_text: Mutex::new(String::new()),
            status: Mutex::new(EngineStatus::Idle),
            pending_locale: Mutex::new(Locale::default()),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 执行一次合成调用
    ///
    /// 重叠调用被串行化：后到者阻塞等待前一个完成。
    /// 步骤顺序是约定的一部分：
    /// 租约续期 -> 指示器显示 -> 引擎调用 -> 完成。
    pub async fn synthesize(&self, request: SynthesisRequest) -> SynthesisOutput {
        let _call = self.call_lock.lock().await;

        // 1. 续期唤醒锁（失效时重新申请 + 内存回收提示）
        self.leases.ensure_wake();

        // 2. 显示指示器，以请求文本为详情
        let request_text = request.text.trim().to_string();
        *self.current_text.lock().unwrap() = request_text.clone();
        self.presence
            .ensure_shown(PresenceCard::new(STATE_SYNTHESIZING, request_text.clone()));

        // 3. 静音输入短路：空流 + 完成信号，不调用引擎
        if text::is_silent(&request_text) {
            tracing::debug!(
                request_id = %request.request_id,
                "Silent input, emitting empty stream"
            );
            return SynthesisOutput::empty();
        }

        // 4. 委托引擎并阻塞至终态
        self.set_status(EngineStatus::Synthesizing);
        let result = self
            .engine
            .run(EngineRequest {
                text: request_text,
                locale_hint: request.locale.clone(),
            })
            .await;
        self.set_status(EngineStatus::Idle);

        // 5. 失败被吸收：完成信号总是送达调用方
        match result {
            Ok(engine_audio) => {
                tracing::info!(
                    request_id = %request.request_id,
                    audio_size = engine_audio.audio_data.len(),
                    duration_ms = ?engine_audio.duration_ms,
                    "Synthesis completed"
                );
                SynthesisOutput {
                    sample_rate: engine_audio
                        .sample_rate
                        .unwrap_or(audio::SILENT_STREAM_SAMPLE_RATE),
                    duration_ms: engine_audio.duration_ms,
                    audio_data: engine_audio.audio_data,
                }
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %request.request_id,
                    error = %e,
                    "Synthesis failed, completing with empty stream"
                );
                SynthesisOutput::empty()
            }
        }
    }

    /// 状态转发任务
    ///
    /// 消费引擎状态事件，映射到指示器内容与存储状态。
    /// 与 `synthesize` 并发运行，随引擎状态通道关闭而退出。
    pub async fn run_status_relay(self: Arc<Self>) {
        let mut receiver = self.engine.subscribe_status();
        tracing::debug!("Engine status relay started");

        loop {
            match receiver.recv().await {
                Ok(EngineEvent::Error { title, detail }) => {
                    self.set_status(EngineStatus::Error {
                        title: title.clone(),
                        detail: detail.clone(),
                    });
                    self.presence.update(PresenceCard::new(title, detail));
                }
                Ok(EngineEvent::RetrySucceeded) => {
                    let current = self.current_text.lock().unwrap().clone();
                    self.set_status(EngineStatus::RetriedOk);
                    self.presence
                        .update(PresenceCard::new(STATE_SYNTHESIZING, current));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped = skipped, "Engine status events lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }

        tracing::debug!("Engine status relay stopped");
    }

    /// 协作式停止当前合成（宿主 stop 入口）
    pub fn stop(&self) {
        tracing::debug!("Stop requested");
        self.engine.stop();
    }

    /// 处理 cancel 信号
    ///
    /// 引擎忙碌 -> 协作式停止当前合成；
    /// 空闲 -> 立即隐藏指示器，不等待空闲监视间隔。
    pub fn handle_cancel(&self) {
        if self.engine.is_synthesizing() {
            tracing::info!("Cancel signal: stopping active synthesis");
            self.stop();
        } else {
            tracing::info!("Cancel signal: engine idle, hiding presence");
            self.presence.hide();
        }
    }

    /// 处理 reload-config 信号
    ///
    /// 转发给引擎的配置热加载入口，不触碰进行中的请求。
    pub fn reload_engine_config(&self) {
        self.engine.reload_config();
    }

    /// kill 信号的进程退出准备
    ///
    /// 租约释放先行，再隐藏指示器；随后由宿主入口无条件终止进程。
    pub fn prepare_process_exit(&self) {
        self.leases.release_all();
        self.presence.hide();
    }

    /// 检查语言可用性
    pub fn is_language_available(
        &self,
        language: &str,
        country: &str,
        variant: &str,
    ) -> LocaleAvailability {
        locale::check_availability(language, country, variant)
    }

    /// 当前记录的语言三元组
    pub fn get_language(&self) -> Locale {
        self.pending_locale.lock().unwrap().clone()
    }

    /// 加载语言
    ///
    /// 做与可用性检查相同的判定，但无论结果如何都用请求的
    /// 三元组覆盖记录（记录"请求了什么"，而非"批准了什么"）。
    pub fn load_language(
        &self,
        language: &str,
        country: &str,
        variant: &str,
    ) -> LocaleAvailability {
        let result = locale::check_availability(language, country, variant);
        *self.pending_locale.lock().unwrap() = Locale::new(language, country, variant);
        result
    }

    /// 引擎状态快照
    pub fn engine_status(&self) -> EngineStatus {
        self.status.lock().unwrap().clone()
    }

    fn set_status(&self, status: EngineStatus) {
        *self.status.lock().unwrap() = status;
    }
}
