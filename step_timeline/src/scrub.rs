//! 进度条定位模块
//!
//! 音频进度条的一次性定位逻辑：位置限制在时长范围内并按网格量化。

use crate::quantize::quantize;

/// 将原始拖拽位置归一化为可提交的播放位置。
///
/// 量化可能把位置推过 duration，所以量化后再 clamp 一次。
pub fn scrub_time(raw_ms: i64, duration_ms: i64, quant_ms: i64) -> i64 {
    let duration = duration_ms.max(0);
    quantize(raw_ms.clamp(0, duration), quant_ms).clamp(0, duration)
}
