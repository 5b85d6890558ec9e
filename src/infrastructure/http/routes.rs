//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping                GET   健康检查
//! - /api/status              GET   引擎/指示器/租约状态
//! - /api/tts/synthesize      POST  合成文本，返回 audio/wav
//! - /api/tts/stop            POST  停止入口（等价 cancel 信号）
//! - /api/language            GET   当前记录的语言三元组
//! - /api/language/available  GET   语言可用性检查
//! - /api/language/load       POST  加载语言（无条件覆盖记录）
//! - /api/signal/reload       POST  reload-config 信号
//! - /api/signal/cancel       POST  cancel 信号
//! - /api/signal/kill         POST  kill 信号

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/status", get(handlers::status))
        .route("/language", get(handlers::get_language))
        .route("/language/available", get(handlers::language_available))
        .route("/language/load", post(handlers::load_language))
        .nest("/tts", tts_routes())
        .nest("/signal", signal_routes())
}

/// TTS 路由
fn tts_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/synthesize", post(handlers::synthesize))
        .route("/stop", post(handlers::stop))
}

/// Signal 路由
fn signal_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reload", post(handlers::signal_reload))
        .route("/cancel", post(handlers::signal_cancel))
        .route("/kill", post(handlers::signal_kill))
}
