//! Systts - 平台托管的语音合成后台服务
//!
//! 装配顺序：
//! - 配置与日志
//! - 宿主资源租约（网络保活锁启动即持有）
//! - 合成引擎（http | fake）
//! - 前台指示器 + 编排器 + 状态转发
//! - 控制信号通道 / 路由器 / Unix 信号桥接
//! - HTTP 宿主绑定（带优雅关闭）

use std::sync::Arc;
use std::time::Duration;

use systts::application::ports::{
    NetworkLeasePort, PresenceSinkPort, SynthesisEnginePort, WakeLeasePort,
};
use systts::application::{
    signal_channel, LeaseManager, PresenceController, RouterExit, SignalRouter,
    SynthesisOrchestrator,
};
use systts::config::{load_config, print_config, EngineMode};
use systts::infrastructure::adapters::{
    FakeEngineConfig, FakeSynthesisEngine, HttpEngineProfile, HttpSynthesisEngine,
    InProcessNetworkLease, InProcessWakeLease, LogPresenceSink,
};
use systts::infrastructure::http::{AppState, HttpServer, ServerConfig};
use systts::infrastructure::signal::spawn_unix_signal_bridge;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},systts={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Systts - 语音合成后台服务");
    print_config(&config);

    // 宿主资源租约：网络保活锁整个生命周期持有，唤醒锁按请求续期
    let wake: Arc<dyn WakeLeasePort> = Arc::new(InProcessWakeLease::new());
    let network: Arc<dyn NetworkLeasePort> = Arc::new(InProcessNetworkLease::new());
    let leases = LeaseManager::new(
        wake,
        network,
        Duration::from_secs(config.lease.wake_ttl_secs),
    )
    .arc();
    leases.acquire_network();
    leases.ensure_wake();

    // 合成引擎
    let engine: Arc<dyn SynthesisEnginePort> = match config.engine.mode {
        EngineMode::Http => Arc::new(
            HttpSynthesisEngine::new(HttpEngineProfile::from(&config.engine))
                .map_err(|e| anyhow::anyhow!("Failed to create engine: {}", e))?,
        ),
        EngineMode::Fake => Arc::new(FakeSynthesisEngine::new(FakeEngineConfig::from(
            &config.engine,
        ))),
    };

    // 前台指示器
    let sink: Arc<dyn PresenceSinkPort> = Arc::new(LogPresenceSink::new());
    let presence = PresenceController::new(
        sink,
        engine.clone(),
        Duration::from_secs(config.presence.poll_interval_secs),
    )
    .arc();

    // 编排器 + 引擎状态转发
    let orchestrator =
        SynthesisOrchestrator::new(engine, leases.clone(), presence.clone()).arc();
    tokio::spawn(orchestrator.clone().run_status_relay());

    // 控制信号：广播通道 + 路由器 + Unix 信号桥接
    let (signal_tx, signal_rx) = signal_channel();
    let mut router_task = tokio::spawn(SignalRouter::new(signal_rx, orchestrator.clone()).run());
    spawn_unix_signal_bridge(signal_tx.clone());

    // HTTP 宿主绑定
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(orchestrator, presence, leases.clone(), signal_tx);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 关闭条件：ctrl-c 优雅关闭，或 kill 信号无条件终止
    let shutdown = async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received shutdown signal");
            }
            exit = &mut router_task => {
                if let Ok(RouterExit::KillRequested) = exit {
                    // 路由器已释放租约并隐藏指示器，这里硬停
                    tracing::info!("Kill signal handled, terminating process");
                    std::process::exit(0);
                }
                tracing::warn!("Signal router stopped unexpectedly");
            }
        }
    };
    server.run_with_shutdown(shutdown).await?;

    // 所有关闭路径都释放租约
    leases.release_all();
    tracing::info!("Server shutdown complete");

    Ok(())
}
