//! Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// TTS DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    pub text: String,
    /// 语言（ISO 639-2），缺省使用当前记录的三元组
    pub language: Option<String>,
    pub country: Option<String>,
    pub variant: Option<String>,
}

// ============================================================================
// Language DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LanguageQuery {
    pub language: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub variant: String,
}

#[derive(Debug, Serialize)]
pub struct LanguageResponse {
    pub language: String,
    pub country: String,
    pub variant: String,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub availability: &'static str,
    /// 宿主 TTS 数值代码（-2 / 0 / 1）
    pub code: i8,
}

// ============================================================================
// Status DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PresenceStatus {
    pub shown: bool,
    pub title: Option<String>,
    pub detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LeaseStatus {
    pub wake_held: bool,
    pub network_held: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub engine: String,
    pub presence: PresenceStatus,
    pub leases: LeaseStatus,
    pub time: DateTime<Utc>,
}
