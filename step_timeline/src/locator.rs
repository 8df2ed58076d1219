//! 标记命中测试模块
//!
//! 按投影像素距离查找最近的标记，供点击选中与悬停提示使用。

use crate::structure::{Step, StepId};
use crate::viewport::time_to_px;

fn nearest_with_distance(
    px: f32,
    steps: &[Step],
    width_px: f32,
    duration_ms: i64,
) -> Option<(StepId, f32)> {
    if !px.is_finite() {
        return None;
    }
    let mut best: Option<(StepId, f32)> = None;
    for step in steps {
        let dist = (time_to_px(step.time_ms, width_px, duration_ms) - px).abs();
        match best {
            // 距离相等时保留序列中靠前的标记
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((step.id, dist)),
        }
    }
    best
}

/// 返回投影位置离 `px` 最近的标记，空集合返回 `None`。
pub fn nearest(px: f32, steps: &[Step], width_px: f32, duration_ms: i64) -> Option<StepId> {
    nearest_with_distance(px, steps, width_px, duration_ms).map(|(id, _)| id)
}

/// 带像素半径阈值的最近标记查询；最近距离超出半径时返回 `None`。
pub fn nearest_within(
    px: f32,
    steps: &[Step],
    width_px: f32,
    duration_ms: i64,
    radius_px: f32,
) -> Option<StepId> {
    nearest_with_distance(px, steps, width_px, duration_ms)
        .filter(|&(_, dist)| dist <= radius_px)
        .map(|(id, _)| id)
}
