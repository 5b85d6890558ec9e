//! TTS Handlers - 合成与停止入口

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::Response;
use axum::Json;

use crate::application::{ControlSignal, SynthesisRequest};
use crate::domain::locale::Locale;
use crate::infrastructure::http::dto::{ApiResponse, Empty, SynthesizeRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 音频响应分块大小
const AUDIO_CHUNK_SIZE: usize = 32 * 1024;

/// 合成文本
///
/// 永远以 200 + audio/wav 响应：内部失败降级为空流，
/// 调用方总能收到完整（可能为空）的音频与完成信号。
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SynthesizeRequest>,
) -> Response {
    // 缺省 locale 使用当前记录的三元组
    let locale = match req.language {
        Some(language) => Locale::new(
            language,
            req.country.unwrap_or_default(),
            req.variant.unwrap_or_default(),
        ),
        None => state.orchestrator.get_language(),
    };

    let request = SynthesisRequest::new(req.text, locale);
    let request_id = request.request_id;
    let output = state.orchestrator.synthesize(request).await;

    // 分块流式返回音频
    let chunks: Vec<Result<Bytes, Infallible>> = output
        .audio_data
        .chunks(AUDIO_CHUNK_SIZE)
        .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
        .collect();
    let body = Body::from_stream(futures_util::stream::iter(chunks));

    let mut builder = Response::builder()
        .header(CONTENT_TYPE, "audio/wav")
        .header("X-TTS-Request-Id", request_id.to_string())
        .header("X-TTS-Sample-Rate", output.sample_rate.to_string());
    if let Some(duration_ms) = output.duration_ms {
        builder = builder.header("X-TTS-Duration-Ms", duration_ms.to_string());
    }

    // 头部均为合法值，构建不会失败
    builder.body(body).unwrap_or_else(|_| Response::new(Body::empty()))
}

/// 停止入口（等价于 cancel 信号）
pub async fn stop(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .signals
        .send(ControlSignal::Cancel)
        .map_err(|_| ApiError::Internal("Signal router not running".to_string()))?;

    Ok(Json(ApiResponse::ok()))
}
