//! Locale - 语言协商
//!
//! 基于固定允许列表的精确匹配，无模糊协商。
//! 语言/国家使用 ISO 639-2 / ISO 3166 alpha-3 代码。

use serde::{Deserialize, Serialize};

/// 支持的语言（ISO 639-2）
const SUPPORTED_LANGUAGES: &[&str] = &["zho", "eng"];

/// 支持的国家（ISO 3166 alpha-3）
const SUPPORTED_COUNTRIES: &[&str] = &["CHN", "USA"];

/// 语言区域三元组 (language, country, variant)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub language: String,
    pub country: String,
    pub variant: String,
}

impl Locale {
    pub fn new(
        language: impl Into<String>,
        country: impl Into<String>,
        variant: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            country: country.into(),
            variant: variant.into(),
        }
    }
}

impl Default for Locale {
    /// 默认区域：简体中文
    fn default() -> Self {
        Self::new("zho", "CHN", "")
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.variant.is_empty() {
            write!(f, "{}-{}", self.language, self.country)
        } else {
            write!(f, "{}-{}-{}", self.language, self.country, self.variant)
        }
    }
}

/// 语言可用性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleAvailability {
    /// 语言不支持
    NotSupported,
    /// 语言支持，国家不在列表中
    Available,
    /// 语言与国家均支持
    CountryAvailable,
}

impl LocaleAvailability {
    /// 平台数值代码（宿主 TTS 约定：-2 / 0 / 1）
    pub fn code(&self) -> i8 {
        match self {
            Self::NotSupported => -2,
            Self::Available => 0,
            Self::CountryAvailable => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotSupported => "not_supported",
            Self::Available => "available",
            Self::CountryAvailable => "country_available",
        }
    }
}

/// 检查语言可用性
///
/// 语言和国家分别与允许列表做精确匹配：
/// - 语言不在列表 → NotSupported
/// - 语言在列表、国家不在 → Available
/// - 语言与国家均在列表 → CountryAvailable
pub fn check_availability(language: &str, country: &str, _variant: &str) -> LocaleAvailability {
    if !SUPPORTED_LANGUAGES.contains(&language) {
        return LocaleAvailability::NotSupported;
    }
    if SUPPORTED_COUNTRIES.contains(&country) {
        LocaleAvailability::CountryAvailable
    } else {
        LocaleAvailability::Available
    }
}
