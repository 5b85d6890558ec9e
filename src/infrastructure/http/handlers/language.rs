//! Language Handlers - 语言协商入口

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use crate::infrastructure::http::dto::{
    ApiResponse, AvailabilityResponse, LanguageQuery, LanguageResponse,
};
use crate::infrastructure::http::state::AppState;

/// 当前记录的语言三元组
pub async fn get_language(State(state): State<Arc<AppState>>) -> Json<ApiResponse<LanguageResponse>> {
    let locale = state.orchestrator.get_language();
    Json(ApiResponse::success(LanguageResponse {
        language: locale.language,
        country: locale.country,
        variant: locale.variant,
    }))
}

/// 语言可用性检查
pub async fn language_available(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LanguageQuery>,
) -> Json<ApiResponse<AvailabilityResponse>> {
    let availability =
        state
            .orchestrator
            .is_language_available(&query.language, &query.country, &query.variant);

    Json(ApiResponse::success(AvailabilityResponse {
        availability: availability.as_str(),
        code: availability.code(),
    }))
}

/// 加载语言
///
/// 返回可用性判定；无论结果如何，请求的三元组都会覆盖记录。
pub async fn load_language(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LanguageQuery>,
) -> Json<ApiResponse<AvailabilityResponse>> {
    let availability =
        state
            .orchestrator
            .load_language(&req.language, &req.country, &req.variant);

    Json(ApiResponse::success(AvailabilityResponse {
        availability: availability.as_str(),
        code: availability.code(),
    }))
}
