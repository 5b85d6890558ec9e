//! Status Handler - 服务状态快照

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::infrastructure::http::dto::{
    ApiResponse, LeaseStatus, PresenceStatus, StatusResponse,
};
use crate::infrastructure::http::state::AppState;

/// 引擎/指示器/租约状态
pub async fn status(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatusResponse>> {
    let presence = state.presence.state();
    let leases = state.leases.state();

    Json(ApiResponse::success(StatusResponse {
        engine: state.orchestrator.engine_status().as_str().to_string(),
        presence: PresenceStatus {
            shown: presence.shown,
            title: presence.last_title,
            detail: presence.last_detail,
        },
        leases: LeaseStatus {
            wake_held: leases.wake_held,
            network_held: leases.network_held,
        },
        time: Utc::now(),
    }))
}
