//! # step_timeline
//!
//! 受约束的时间轴标记编辑引擎。
//!
//! ## 功能特性
//!
//! - **标记拖动**：指针按下/移动/抬起驱动的拖动状态机，会话基线快照保证量化不漂移
//! - **约束求解**：排序、最小间隔与边界约束的自动修复，可选 ripple 联动平移
//! - **坐标映射**：视口像素与时间（毫秒）双向转换，退化输入饱和为安全默认值
//! - **命中测试**：点击选中与带阈值的悬停查询
//!
//! ## 基本使用
//!
//! ```rust
//! use step_timeline::{Step, StepEditor, StepEditorCommand, StepEditorOptions};
//!
//! let mut editor = StepEditor::new(StepEditorOptions::default());
//! editor.execute_command(StepEditorCommand::SetDuration { duration_ms: 3000 });
//! editor.execute_command(StepEditorCommand::SetViewportWidth { width_px: 300.0 });
//!
//! let steps = vec![Step::new(0), Step::new(1000), Step::new(2000)];
//! let first = steps[0].id;
//! editor.execute_command(StepEditorCommand::SetSteps { steps });
//!
//! // 一次完整的拖动会话
//! editor.on_pointer_down(first, 0.0);
//! editor.on_pointer_move(50.0);
//! editor.on_pointer_up(Some(50.0));
//! ```
//!
//! ## 集成到宿主应用
//!
//! ```rust
//! use step_timeline::{StepEditor, StepEditorEvent, StepEditorOptions};
//!
//! let mut editor = StepEditor::new(StepEditorOptions::default());
//!
//! // 回调方式监听事件
//! editor.set_event_listener(Box::new(|event| {
//!     if let StepEditorEvent::StepMoved { step_id, time_ms } = event {
//!         println!("step {:?} moved to {} ms", step_id, time_ms);
//!     }
//! }));
//!
//! // 或者轮询方式取走事件
//! for event in editor.take_events() {
//!     println!("{:?}", event);
//! }
//! ```

pub mod clip_range;
pub mod editor;
pub mod interaction;
pub mod locator;
pub mod quantize;
pub mod scrub;
pub mod solver;
pub mod structure;
pub mod utils;
pub mod viewport;

pub use editor::{StepEditorCommand, StepEditorEvent};
pub use interaction::{StepEditor, StepEditorOptions};
pub use structure::{ClipId, ClipRange, Step, StepId, TimelineConfig, TrackId};
