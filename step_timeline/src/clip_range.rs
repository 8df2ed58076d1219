//! 剪辑区间模块
//!
//! 区间编辑面板的一次性归一化逻辑。每个剪辑独立处理，
//! 不做任何跨剪辑排序约束。

use crate::structure::{ClipId, ClipRange, TrackId};

/// 将宿主提交的区间端点归一化：端点限制在 `[0, duration]`，
/// 并保证 `start <= end`（颠倒的端点直接交换）。
pub fn normalize_clip_range(
    track_id: TrackId,
    clip_id: ClipId,
    start_ms: i64,
    end_ms: i64,
    duration_ms: i64,
) -> ClipRange {
    let duration = duration_ms.max(0);
    let mut start = start_ms.clamp(0, duration);
    let mut end = end_ms.clamp(0, duration);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    ClipRange {
        track_id,
        clip_id,
        start_ms: start,
        end_ms: end,
    }
}
