//! Unix Signal Bridge - 宿主信号桥接
//!
//! 把宿主进程信号映射为进程级控制信号：
//! - SIGHUP  -> reload-config
//! - SIGUSR1 -> cancel
//! - SIGUSR2 -> kill

use tokio::sync::broadcast;

use crate::application::ControlSignal;

/// 启动信号桥接任务
#[cfg(unix)]
pub fn spawn_unix_signal_bridge(sender: broadcast::Sender<ControlSignal>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut hangup = match signal(SignalKind::hangup()) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGHUP handler");
                return;
            }
        };
        let mut usr1 = match signal(SignalKind::user_defined1()) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGUSR1 handler");
                return;
            }
        };
        let mut usr2 = match signal(SignalKind::user_defined2()) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGUSR2 handler");
                return;
            }
        };

        tracing::info!("Unix signal bridge started (SIGHUP/SIGUSR1/SIGUSR2)");

        loop {
            let control = tokio::select! {
                _ = hangup.recv() => ControlSignal::ReloadConfig,
                _ = usr1.recv() => ControlSignal::Cancel,
                _ = usr2.recv() => ControlSignal::Kill,
            };

            tracing::info!(signal = control.as_str(), "Unix signal mapped to control signal");

            if sender.send(control).is_err() {
                // 路由器已退出，桥接随之结束
                return;
            }
        }
    });
}

/// 非 Unix 平台：无宿主信号可桥接
#[cfg(not(unix))]
pub fn spawn_unix_signal_bridge(_sender: broadcast::Sender<ControlSignal>) {
    tracing::debug!("Unix signal bridge unavailable on this platform");
}
