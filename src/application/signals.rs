//! Control Signal Router - 异步控制信号路由
//!
//! 进程级广播信号（reload-config / cancel / kill）由独立的
//! 消费循环处理，与 `synthesize` 调用路径解耦：
//! cancel 必须能在 `synthesize` 阻塞于引擎时直达引擎的停止入口。
//!
//! 投递语义：至少一次，与合成调用无序。

use std::sync::Arc;

use tokio::sync::broadcast;

use super::orchestrator::SynthesisOrchestrator;

/// 进程级控制信号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// 热加载引擎配置
    ReloadConfig,
    /// 停止当前合成 / 关闭指示器
    Cancel,
    /// 无条件终止宿主进程
    Kill,
}

impl ControlSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReloadConfig => "reload_config",
            Self::Cancel => "cancel",
            Self::Kill => "kill",
        }
    }
}

/// 创建进程级信号通道
///
/// 发送端可克隆到任意执行上下文（HTTP 处理器、Unix 信号桥接等）。
pub fn signal_channel() -> (
    broadcast::Sender<ControlSignal>,
    broadcast::Receiver<ControlSignal>,
) {
    broadcast::channel(16)
}

/// 路由循环退出原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterExit {
    /// 收到 kill 信号，宿主应立即终止进程
    KillRequested,
    /// 信号通道已关闭
    ChannelClosed,
}

enum Dispatch {
    Continue,
    Exit,
}

/// 信号路由器
///
/// 专用消费循环，将信号分发到编排器的对应入口。
pub struct SignalRouter {
    receiver: broadcast::Receiver<ControlSignal>,
    orchestrator: Arc<SynthesisOrchestrator>,
}

impl SignalRouter {
    pub fn new(
        receiver: broadcast::Receiver<ControlSignal>,
        orchestrator: Arc<SynthesisOrchestrator>,
    ) -> Self {
        Self {
            receiver,
            orchestrator,
        }
    }

    /// 启动路由循环
    ///
    /// kill 信号处理完毕（租约已释放、指示器已隐藏）后返回，
    /// 由宿主入口无条件终止进程。
    pub async fn run(mut self) -> RouterExit {
        tracing::info!("Signal router started");

        loop {
            match self.receiver.recv().await {
                Ok(signal) => {
                    tracing::info!(signal = signal.as_str(), "Control signal received");
                    if let Dispatch::Exit = self.dispatch(signal) {
                        return RouterExit::KillRequested;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped = skipped, "Control signals lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Signal channel closed, router stopping");
                    return RouterExit::ChannelClosed;
                }
            }
        }
    }

    /// 分发单个信号
    fn dispatch(&self, signal: ControlSignal) -> Dispatch {
        match signal {
            ControlSignal::ReloadConfig => {
                self.orchestrator.reload_engine_config();
                Dispatch::Continue
            }
            ControlSignal::Cancel => {
                self.orchestrator.handle_cancel();
                Dispatch::Continue
            }
            ControlSignal::Kill => {
                // 租约释放与指示器隐藏先行，随后宿主无条件退出
                self.orchestrator.prepare_process_exit();
                Dispatch::Exit
            }
        }
    }
}
