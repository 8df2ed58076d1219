//! 数据结构模块
//!
//! 定义时间轴编辑引擎使用的核心数据结构，包括时间标记（step）、
//! 求解参数与剪辑区间。

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static STEP_ID_COUNTER: AtomicU64 = AtomicU64::new(1);
static TRACK_ID_COUNTER: AtomicU64 = AtomicU64::new(1);
static CLIP_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StepId(pub u64);

impl StepId {
    pub fn next() -> Self {
        StepId(STEP_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrackId(pub u64);

impl TrackId {
    pub fn next() -> Self {
        TrackId(TRACK_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClipId(pub u64);

impl ClipId {
    pub fn next() -> Self {
        ClipId(CLIP_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// 时间轴上的单个时间标记。
///
/// 标记序列由宿主持有并保持按时间升序；引擎不排序，只保持索引对应关系。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub time_ms: i64, // 绝对时间（毫秒）
}

impl Step {
    pub fn new(time_ms: i64) -> Self {
        Self::with_id(StepId::next(), time_ms)
    }

    pub fn with_id(id: StepId, time_ms: i64) -> Self {
        Self { id, time_ms }
    }
}

/// 时间轴求解参数。
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub duration_ms: i64,        // 总时长（毫秒），负值按 0 处理
    pub quant_ms: i64,           // 量化步长，<= 1 表示无网格
    pub min_gap_ms: Option<i64>, // 相邻标记最小间隔，None 表示等于量化步长
    pub ripple_enabled: bool,    // 拖动时是否联动平移后续标记
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            duration_ms: 10_000,
            quant_ms: 100,
            min_gap_ms: None,
            ripple_enabled: false,
        }
    }
}

impl TimelineConfig {
    /// 归一化后的总时长（不为负）。
    pub fn duration(&self) -> i64 {
        self.duration_ms.max(0)
    }

    /// 实际生效的最小间隔：显式值或量化步长，下限为 1。
    pub fn min_gap(&self) -> i64 {
        self.min_gap_ms.unwrap_or(self.quant_ms).max(1)
    }
}

/// 区间编辑面板使用的单个剪辑区间。
///
/// 各剪辑相互独立，引擎不做跨剪辑排序约束。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipRange {
    pub track_id: TrackId,
    pub clip_id: ClipId,
    pub start_ms: i64,
    pub end_ms: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_ids_unique() {
        let a = Step::new(0);
        let b = Step::new(0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_min_gap_defaults_to_quant_step() {
        let config = TimelineConfig {
            quant_ms: 250,
            min_gap_ms: None,
            ..TimelineConfig::default()
        };
        assert_eq!(config.min_gap(), 250);

        let explicit = TimelineConfig {
            quant_ms: 250,
            min_gap_ms: Some(400),
            ..TimelineConfig::default()
        };
        assert_eq!(explicit.min_gap(), 400);
    }

    #[test]
    fn test_min_gap_lower_bound() {
        // 无网格（quant <= 1）时默认间隔退化为 1
        let config = TimelineConfig {
            quant_ms: 0,
            min_gap_ms: None,
            ..TimelineConfig::default()
        };
        assert_eq!(config.min_gap(), 1);
    }

    #[test]
    fn test_negative_duration_normalized() {
        let config = TimelineConfig {
            duration_ms: -500,
            ..TimelineConfig::default()
        };
        assert_eq!(config.duration(), 0);
    }
}
