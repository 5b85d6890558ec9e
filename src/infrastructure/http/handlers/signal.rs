//! Signal Handlers - 控制信号面
//!
//! 把 HTTP 投递转换为进程级广播信号；实际处理在
//! application::signals 的路由循环里，与合成调用路径解耦。

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::application::ControlSignal;
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

fn publish(state: &AppState, signal: ControlSignal) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .signals
        .send(signal)
        .map_err(|_| ApiError::Internal("Signal router not running".to_string()))?;
    Ok(Json(ApiResponse::ok()))
}

/// reload-config 信号
pub async fn signal_reload(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    publish(&state, ControlSignal::ReloadConfig)
}

/// cancel 信号
pub async fn signal_cancel(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    publish(&state, ControlSignal::Cancel)
}

/// kill 信号
pub async fn signal_kill(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    publish(&state, ControlSignal::Kill)
}
