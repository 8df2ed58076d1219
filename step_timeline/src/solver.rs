//! 约束求解模块
//!
//! 将一次拖动产生的候选位置修正为同时满足排序、最小间隔与边界约束的
//! 完整标记配置。求解是纯函数：相同输入必然得到相同输出。

use crate::quantize::quantize;
use crate::structure::TimelineConfig;

/// 根据基线配置求解拖动后的完整时间数组。
///
/// `baseline` 必须按时间升序排列；输出与输入保持索引对应关系，
/// 调用方应整体应用返回的数组，而不是只取被拖动标记的值 —— 修复
/// 过程可能移动相邻标记。
///
/// 修复顺序是固定的：clamp + 量化候选值 → 可选 ripple 平移 →
/// 正向间隔修复 → clamp → 反向间隔修复 → clamp。
pub fn solve(
    baseline: &[i64],
    moved_index: usize,
    proposed_raw_ms: i64,
    config: &TimelineConfig,
) -> Vec<i64> {
    let mut out: Vec<i64> = baseline.to_vec();
    if baseline.is_empty() || moved_index >= baseline.len() {
        return out;
    }

    let duration = config.duration();
    let min_gap = config.min_gap();
    let n = out.len();

    if min_gap.saturating_mul(n as i64 - 1) > duration {
        // 间隔与边界无法同时满足，低端会在最终 clamp 中被压到 0
        log::debug!(
            "timeline overconstrained: min_gap {} over {} pairs exceeds duration {}",
            min_gap,
            n - 1,
            duration
        );
    }

    // 候选值先 clamp 再量化；量化可能越过 duration，后续 clamp 兜底
    let snapped = quantize(proposed_raw_ms.clamp(0, duration), config.quant_ms);
    let delta = snapped - baseline[moved_index];
    out[moved_index] = snapped;

    // Ripple：后续标记随拖动刚性平移，各自在边界处饱和。
    // Ripple 本身不负责间隔修复。
    if config.ripple_enabled && delta != 0 {
        for value in out.iter_mut().skip(moved_index + 1) {
            *value = value.saturating_add(delta).clamp(0, duration);
        }
    }

    // 正向修复：把后面的标记向右推开以恢复间隔，可能越过 duration
    for i in 1..n {
        if out[i] - out[i - 1] < min_gap {
            out[i] = out[i - 1].saturating_add(min_gap);
        }
    }

    for value in out.iter_mut() {
        *value = (*value).clamp(0, duration);
    }

    // 反向修复：clamp 把尾部压到上界后，相邻间隔可能塌缩，
    // 需要从后往前把前面的标记拉回来
    for i in (0..n.saturating_sub(1)).rev() {
        if out[i + 1] - out[i] < min_gap {
            out[i] = out[i + 1].saturating_sub(min_gap);
        }
    }

    for value in out.iter_mut() {
        *value = (*value).clamp(0, duration);
    }

    out
}
