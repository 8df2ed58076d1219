//! 编辑命令和事件模块
//!
//! 定义时间轴引擎的命令系统和事件系统，用于与宿主应用交互。

use crate::structure::{ClipId, Step, StepId, TrackId};

/// 宿主可推送到引擎的命令
#[derive(Clone, Debug)]
pub enum StepEditorCommand {
    /// 整体替换标记序列（宿主负责按时间升序排序）
    SetSteps {
        steps: Vec<Step>,
    },
    SetDuration {
        duration_ms: i64,
    },
    SetQuantStep {
        quant_ms: i64,
    },
    /// `None` 表示最小间隔回退为量化步长
    SetMinGap {
        min_gap_ms: Option<i64>,
    },
    SetRipple {
        enabled: bool,
    },
    /// 宿主测量到的视口宽度（像素）
    SetViewportWidth {
        width_px: f32,
    },
    /// 播放头位置，仅用于显示，求解器不读取
    SetPlayhead {
        time_ms: i64,
    },
    SelectStep {
        step_id: StepId,
    },
    /// 宿主直接删除标记，与求解器无关
    DeleteStep {
        step_id: StepId,
    },
    /// 进度条定位：clamp + 量化后发出 `ScrubTo`
    Scrub {
        time_ms: i64,
    },
    /// 区间面板：按单个剪辑归一化后发出 `ClipRangeSet`
    SetClipRange {
        track_id: TrackId,
        clip_id: ClipId,
        start_ms: i64,
        end_ms: i64,
    },
}

/// 宿主可监听的引擎事件
#[derive(Clone, Debug)]
pub enum StepEditorEvent {
    StepSelected {
        step_id: StepId,
    },
    /// 拖动过程中每次求解后的连续更新
    StepMoved {
        step_id: StepId,
        time_ms: i64,
    },
    /// 拖动会话带最终指针位置结束时发出一次
    StepMoveEnded {
        step_id: StepId,
        time_ms: i64,
    },
    StepDeleted {
        step_id: StepId,
    },
    ScrubTo {
        time_ms: i64,
    },
    ClipRangeSet {
        track_id: TrackId,
        clip_id: ClipId,
        start_ms: i64,
        end_ms: i64,
    },
}
