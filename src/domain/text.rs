//! Text - 静音文本判定

/// 判断文本是否为静音输入
///
/// 去除空白后为空的文本无需调用合成引擎，
/// 直接返回空音频流即可。
pub fn is_silent(text: &str) -> bool {
    text.trim().is_empty()
}
