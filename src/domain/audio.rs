//! Audio - WAV 音频流构造
//!
//! 16-bit PCM WAV 的头部与流构造。
//! 合成引擎返回完整 WAV；这里只负责本服务自行产出的流
//! （静音输入的空流）。

/// 静音输入空流的采样率（Hz）
pub const SILENT_STREAM_SAMPLE_RATE: u32 = 16000;

/// 静音输入空流的声道数
pub const SILENT_STREAM_CHANNELS: u16 = 1;

/// WAV 头部长度（RIFF + fmt + data chunk 头）
pub const WAV_HEADER_LEN: usize = 44;

/// 构造 16-bit PCM WAV 字节流
///
/// `pcm_data` 为小端 i16 采样的原始字节；传空切片得到
/// 仅含合法头部的空流。
pub fn wav_stream(sample_rate: u32, channels: u16, pcm_data: &[u8]) -> Vec<u8> {
    let bits_per_sample: u16 = 16;
    let byte_rate = sample_rate * channels as u32 * (bits_per_sample / 8) as u32;
    let block_align = channels * (bits_per_sample / 8);

    let data_size = pcm_data.len();
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(WAV_HEADER_LEN + data_size);

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(file_size as u32).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&(data_size as u32).to_le_bytes());
    wav.extend_from_slice(pcm_data);

    wav
}

/// 构造空 WAV 流（静音输入短路用）
///
/// 16kHz 单声道 16-bit PCM，data 段为空。
pub fn empty_wav() -> Vec<u8> {
    wav_stream(SILENT_STREAM_SAMPLE_RATE, SILENT_STREAM_CHANNELS, &[])
}

/// 生成指定时长的静音 PCM 并封装为 WAV（Fake 引擎用）
pub fn silent_wav(sample_rate: u32, channels: u16, duration_ms: u64) -> Vec<u8> {
    let num_samples = (sample_rate as u64 * duration_ms / 1000) as usize * channels as usize;
    let pcm = vec![0u8; num_samples * 2];
    wav_stream(sample_rate, channels, &pcm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_wav_is_header_only() {
        let wav = empty_wav();
        assert_eq!(wav.len(), WAV_HEADER_LEN);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");
        // data 段长度为 0
        assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 0);
    }

    #[test]
    fn test_empty_wav_format_fields() {
        let wav = empty_wav();
        // PCM format
        assert_eq!(u16::from_le_bytes([wav[20], wav[21]]), 1);
        // 单声道
        assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
        // 16kHz
        assert_eq!(
            u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]),
            16000
        );
        // 16 bit
        assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 16);
    }

    #[test]
    fn test_silent_wav_duration() {
        let wav = silent_wav(16000, 1, 1000);
        // 1 秒 16kHz 单声道 16bit = 32000 字节 data
        assert_eq!(wav.len(), WAV_HEADER_LEN + 32000);
        assert_eq!(
            u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]),
            32000
        );
    }

    #[test]
    fn test_wav_stream_sizes_consistent() {
        let pcm = vec![0u8; 256];
        let wav = wav_stream(22050, 2, &pcm);
        let riff_size = u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]) as usize;
        assert_eq!(riff_size, wav.len() - 8);
    }
}
