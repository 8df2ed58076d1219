//! 交互模块
//!
//! 引擎的核心交互单元：指针事件驱动的拖动状态机、命令执行与事件分发。
//! 所有处理都在调用线程同步完成，一个外部指针事件对应一次完整的处理。

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::clip_range::normalize_clip_range;
use crate::editor::{StepEditorCommand, StepEditorEvent};
use crate::locator;
use crate::scrub::scrub_time;
use crate::solver::solve;
use crate::structure::{Step, StepId, TimelineConfig};
use crate::viewport::{px_to_time, time_to_px};

/// 交互选项
#[derive(Clone, Copy, Debug)]
pub struct StepEditorOptions {
    /// 悬停判定的像素半径，超出则不命中任何标记
    pub hover_radius_px: f32,
}

impl Default for StepEditorOptions {
    fn default() -> Self {
        Self {
            hover_radius_px: 8.0,
        }
    }
}

/// 拖动会话状态。
///
/// `Active` 携带会话基线快照：整个会话期间的 delta 都相对基线计算，
/// 基线绝不在会话中途刷新，避免量化取整在连续 move 事件间累积漂移。
#[derive(Clone, Debug)]
enum DragState {
    Idle,
    Active {
        step_id: StepId,
        moved_index: usize,
        origin_px: f32,
        baseline: Vec<i64>,
    },
}

pub struct StepEditor {
    steps: Vec<Step>,
    config: TimelineConfig,
    options: StepEditorOptions,
    viewport_width_px: f32,
    selected: Option<StepId>,
    playhead_ms: i64, // 仅显示用，求解器不读取

    // Interaction state
    drag: DragState,

    // Events
    pending_events: Vec<StepEditorEvent>,
    event_listener: Option<Box<dyn FnMut(&StepEditorEvent)>>,
    subscribers: Vec<Sender<StepEditorEvent>>,
}

impl StepEditor {
    pub fn new(options: StepEditorOptions) -> Self {
        Self {
            steps: Vec::new(),
            config: TimelineConfig::default(),
            options,
            viewport_width_px: 0.0,
            selected: None,
            playhead_ms: 0,
            drag: DragState::Idle,
            pending_events: Vec::new(),
            event_listener: None,
            subscribers: Vec::new(),
        }
    }

    pub fn set_event_listener(&mut self, listener: Box<dyn FnMut(&StepEditorEvent)>) {
        self.event_listener = Some(listener);
    }

    /// 取走所有待处理事件（宿主轮询用）。
    pub fn take_events(&mut self) -> Vec<StepEditorEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// 订阅事件通道；接收端被丢弃后会在下一次发送时自动清理。
    pub fn subscribe(&mut self) -> Receiver<StepEditorEvent> {
        let (sender, receiver) = unbounded();
        self.subscribers.push(sender);
        receiver
    }

    pub fn execute_command(&mut self, command: StepEditorCommand) {
        match command {
            StepEditorCommand::SetSteps { steps } => {
                // 结构性变更会使活动会话的基线失效，直接结束会话
                self.end_drag_on_structural_change("step set replaced");
                self.steps = steps;
                if let Some(selected) = self.selected {
                    if !self.steps.iter().any(|s| s.id == selected) {
                        self.selected = None;
                    }
                }
            }
            StepEditorCommand::SetDuration { duration_ms } => {
                self.config.duration_ms = duration_ms;
            }
            StepEditorCommand::SetQuantStep { quant_ms } => {
                self.config.quant_ms = quant_ms;
            }
            StepEditorCommand::SetMinGap { min_gap_ms } => {
                self.config.min_gap_ms = min_gap_ms;
            }
            StepEditorCommand::SetRipple { enabled } => {
                self.config.ripple_enabled = enabled;
            }
            StepEditorCommand::SetViewportWidth { width_px } => {
                self.viewport_width_px = width_px;
            }
            StepEditorCommand::SetPlayhead { time_ms } => {
                self.playhead_ms = time_ms;
            }
            StepEditorCommand::SelectStep { step_id } => {
                if self.steps.iter().any(|s| s.id == step_id) {
                    self.selected = Some(step_id);
                    self.emit_event(StepEditorEvent::StepSelected { step_id });
                } else {
                    log::trace!("select for unknown step {:?}, ignored", step_id);
                }
            }
            StepEditorCommand::DeleteStep { step_id } => {
                let Some(index) = self.steps.iter().position(|s| s.id == step_id) else {
                    log::trace!("delete for unknown step {:?}, ignored", step_id);
                    return;
                };
                self.end_drag_on_structural_change("step deleted");
                self.steps.remove(index);
                if self.selected == Some(step_id) {
                    self.selected = None;
                }
                self.emit_event(StepEditorEvent::StepDeleted { step_id });
            }
            StepEditorCommand::Scrub { time_ms } => {
                let time_ms = scrub_time(time_ms, self.config.duration(), self.config.quant_ms);
                self.emit_event(StepEditorEvent::ScrubTo { time_ms });
            }
            StepEditorCommand::SetClipRange {
                track_id,
                clip_id,
                start_ms,
                end_ms,
            } => {
                let range =
                    normalize_clip_range(track_id, clip_id, start_ms, end_ms, self.config.duration());
                self.emit_event(StepEditorEvent::ClipRangeSet {
                    track_id: range.track_id,
                    clip_id: range.clip_id,
                    start_ms: range.start_ms,
                    end_ms: range.end_ms,
                });
            }
        }
    }

    /// 指针在某个标记上按下：捕获基线快照并开启会话。
    ///
    /// 未知标记 id 是静默 no-op，不创建会话。
    pub fn on_pointer_down(&mut self, step_id: StepId, px: f32) {
        let Some(moved_index) = self.steps.iter().position(|s| s.id == step_id) else {
            log::trace!("pointer down on unknown step {:?}, ignored", step_id);
            return;
        };
        let baseline: Vec<i64> = self.steps.iter().map(|s| s.time_ms).collect();
        self.drag = DragState::Active {
            step_id,
            moved_index,
            origin_px: px,
            baseline,
        };
        self.selected = Some(step_id);
        self.emit_event(StepEditorEvent::StepSelected { step_id });
    }

    /// 指针移动：没有活动会话时忽略。
    ///
    /// 每次 move 都从会话基线重新求解，而不是从当前配置出发，
    /// 因此重复量化不会漂移。
    pub fn on_pointer_move(&mut self, px: f32) {
        let Some((step_id, moved_index, solved)) = self.solve_active(px) else {
            log::trace!("pointer move without active drag session, ignored");
            return;
        };
        let time_ms = solved[moved_index];
        self.apply_times(&solved);
        self.emit_event(StepEditorEvent::StepMoved { step_id, time_ms });
    }

    /// 指针抬起：带最终位置时追加一次求解并发出结束事件；
    /// 不带位置（会话被外部中断）时只清理会话，最后一次连续更新
    /// 即为提交状态。两种情况下会话都会被清理。
    pub fn on_pointer_up(&mut self, px: Option<f32>) {
        let finished = px.and_then(|x| self.solve_active(x));
        if matches!(self.drag, DragState::Active { .. }) && finished.is_none() && px.is_none() {
            log::trace!("drag session abandoned without final pointer position");
        }
        self.drag = DragState::Idle;
        if let Some((step_id, moved_index, solved)) = finished {
            let time_ms = solved[moved_index];
            self.apply_times(&solved);
            self.emit_event(StepEditorEvent::StepMoveEnded { step_id, time_ms });
        }
    }

    /// 点击选中策略：无条件取最近标记，空集合返回 `None`。
    pub fn click_select(&mut self, px: f32) -> Option<StepId> {
        let step_id = self.step_at_px(px)?;
        self.selected = Some(step_id);
        self.emit_event(StepEditorEvent::StepSelected { step_id });
        Some(step_id)
    }

    /// 无条件最近标记查询（点击选中用）。
    pub fn step_at_px(&self, px: f32) -> Option<StepId> {
        locator::nearest(px, &self.steps, self.viewport_width_px, self.config.duration())
    }

    /// 带悬停半径阈值的最近标记查询（悬停提示用）。
    pub fn hovered_step(&self, px: f32) -> Option<StepId> {
        locator::nearest_within(
            px,
            &self.steps,
            self.viewport_width_px,
            self.config.duration(),
            self.options.hover_radius_px,
        )
    }

    // Public getters
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn selected_step(&self) -> Option<StepId> {
        self.selected
    }

    pub fn playhead_ms(&self) -> i64 {
        self.playhead_ms
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Active { .. })
    }

    /// 从会话基线求解当前指针位置对应的完整配置。
    ///
    /// 被拖动标记的基线时间投影到像素后，叠加指针相对 origin 的偏移，
    /// 再经映射器换回时间，保证抓取点稳定。
    fn solve_active(&self, px: f32) -> Option<(StepId, usize, Vec<i64>)> {
        let DragState::Active {
            step_id,
            moved_index,
            origin_px,
            ref baseline,
        } = self.drag
        else {
            return None;
        };
        let width = self.viewport_width_px;
        let duration = self.config.duration();
        let anchor_px = time_to_px(baseline[moved_index], width, duration);
        let raw_ms = px_to_time(anchor_px + (px - origin_px), width, duration);
        let solved = solve(baseline, moved_index, raw_ms, &self.config);
        Some((step_id, moved_index, solved))
    }

    /// 整体应用求解结果，保持索引对应关系。
    fn apply_times(&mut self, times: &[i64]) {
        for (step, &time_ms) in self.steps.iter_mut().zip(times) {
            step.time_ms = time_ms;
        }
    }

    fn end_drag_on_structural_change(&mut self, reason: &str) {
        if matches!(self.drag, DragState::Active { .. }) {
            log::trace!("drag session ended: {}", reason);
            self.drag = DragState::Idle;
        }
    }

    fn emit_event(&mut self, event: StepEditorEvent) {
        if let Some(ref mut listener) = self.event_listener {
            listener(&event);
        }
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        self.pending_events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{ClipId, TrackId};

    // width 300 / duration 3000：1 px 对应 10 ms
    fn editor_with_steps(times: &[i64]) -> (StepEditor, Vec<StepId>) {
        let mut editor = StepEditor::new(StepEditorOptions::default());
        editor.execute_command(StepEditorCommand::SetDuration { duration_ms: 3000 });
        editor.execute_command(StepEditorCommand::SetQuantStep { quant_ms: 100 });
        editor.execute_command(StepEditorCommand::SetMinGap {
            min_gap_ms: Some(300),
        });
        editor.execute_command(StepEditorCommand::SetViewportWidth { width_px: 300.0 });
        let steps: Vec<Step> = times.iter().map(|&t| Step::new(t)).collect();
        let ids: Vec<StepId> = steps.iter().map(|s| s.id).collect();
        editor.execute_command(StepEditorCommand::SetSteps { steps });
        (editor, ids)
    }

    fn times(editor: &StepEditor) -> Vec<i64> {
        editor.steps().iter().map(|s| s.time_ms).collect()
    }

    #[test]
    fn test_full_drag_session() {
        let (mut editor, ids) = editor_with_steps(&[0, 1000, 2000]);
        editor.take_events();

        editor.on_pointer_down(ids[0], 0.0);
        assert!(editor.is_dragging());
        assert_eq!(editor.selected_step(), Some(ids[0]));

        editor.on_pointer_move(250.0);
        assert_eq!(times(&editor), vec![2400, 2700, 3000]);

        editor.on_pointer_up(Some(250.0));
        assert!(!editor.is_dragging());
        assert_eq!(times(&editor), vec![2400, 2700, 3000]);

        let events = editor.take_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], StepEditorEvent::StepSelected { step_id } if step_id == ids[0]));
        assert!(matches!(
            events[1],
            StepEditorEvent::StepMoved { step_id, time_ms } if step_id == ids[0] && time_ms == 2400
        ));
        assert!(matches!(
            events[2],
            StepEditorEvent::StepMoveEnded { step_id, time_ms } if step_id == ids[0] && time_ms == 2400
        ));
    }

    #[test]
    fn test_ripple_drag() {
        let (mut editor, ids) = editor_with_steps(&[0, 1000, 2000]);
        editor.execute_command(StepEditorCommand::SetRipple { enabled: true });
        editor.on_pointer_down(ids[0], 0.0);
        editor.on_pointer_move(50.0);
        assert_eq!(times(&editor), vec![500, 1500, 2500]);
        editor.on_pointer_up(Some(50.0));
    }

    #[test]
    fn test_repeated_moves_do_not_drift() {
        let (mut editor, ids) = editor_with_steps(&[0, 1000, 2000]);
        editor.on_pointer_down(ids[0], 0.0);
        editor.on_pointer_move(25.0);
        let first = times(&editor);
        for _ in 0..10 {
            editor.on_pointer_move(25.0);
        }
        assert_eq!(times(&editor), first);
    }

    #[test]
    fn test_unknown_step_down_is_noop() {
        let (mut editor, _ids) = editor_with_steps(&[0, 1000]);
        editor.take_events();
        editor.on_pointer_down(StepId(u64::MAX), 10.0);
        assert!(!editor.is_dragging());
        assert!(editor.take_events().is_empty());
    }

    #[test]
    fn test_move_without_session_ignored() {
        let (mut editor, _ids) = editor_with_steps(&[0, 1000]);
        editor.take_events();
        editor.on_pointer_move(120.0);
        assert_eq!(times(&editor), vec![0, 1000]);
        assert!(editor.take_events().is_empty());
    }

    #[test]
    fn test_abandoned_session_keeps_last_update() {
        let (mut editor, ids) = editor_with_steps(&[0, 1000, 2000]);
        editor.on_pointer_down(ids[1], 100.0);
        editor.on_pointer_move(130.0);
        let committed = times(&editor);
        editor.take_events();

        editor.on_pointer_up(None);
        assert!(!editor.is_dragging());
        assert_eq!(times(&editor), committed);
        // 中断的会话不发出结束事件
        assert!(editor.take_events().is_empty());
    }

    #[test]
    fn test_delete_ends_active_session() {
        let (mut editor, ids) = editor_with_steps(&[0, 1000, 2000]);
        editor.on_pointer_down(ids[0], 0.0);
        editor.execute_command(StepEditorCommand::DeleteStep { step_id: ids[2] });
        assert!(!editor.is_dragging());
        assert_eq!(editor.steps().len(), 2);

        // 会话已结束，后续 move 不再生效
        editor.take_events();
        editor.on_pointer_move(200.0);
        assert!(editor.take_events().is_empty());
    }

    #[test]
    fn test_delete_clears_selection() {
        let (mut editor, ids) = editor_with_steps(&[0, 1000]);
        editor.execute_command(StepEditorCommand::SelectStep { step_id: ids[1] });
        editor.execute_command(StepEditorCommand::DeleteStep { step_id: ids[1] });
        assert_eq!(editor.selected_step(), None);
    }

    #[test]
    fn test_click_select_policies() {
        let (mut editor, ids) = editor_with_steps(&[0, 1000, 2000]);
        editor.take_events();

        // 点击选中：无条件取最近
        assert_eq!(editor.click_select(120.0), Some(ids[1]));
        assert_eq!(editor.selected_step(), Some(ids[1]));
        let events = editor.take_events();
        assert!(matches!(events[0], StepEditorEvent::StepSelected { step_id } if step_id == ids[1]));

        // 悬停：超出半径返回 None
        assert_eq!(editor.hovered_step(104.0), Some(ids[1]));
        assert_eq!(editor.hovered_step(150.0), None);
    }

    #[test]
    fn test_click_select_empty_set() {
        let mut editor = StepEditor::new(StepEditorOptions::default());
        editor.execute_command(StepEditorCommand::SetDuration { duration_ms: 3000 });
        editor.execute_command(StepEditorCommand::SetViewportWidth { width_px: 300.0 });
        assert_eq!(editor.click_select(100.0), None);
        assert_eq!(editor.hovered_step(100.0), None);
    }

    #[test]
    fn test_scrub_command_emits_quantized_time() {
        let (mut editor, _ids) = editor_with_steps(&[0, 1000]);
        editor.take_events();
        editor.execute_command(StepEditorCommand::Scrub { time_ms: 1234 });
        let events = editor.take_events();
        assert!(matches!(events[0], StepEditorEvent::ScrubTo { time_ms } if time_ms == 1200));
    }

    #[test]
    fn test_clip_range_command_normalizes() {
        let (mut editor, _ids) = editor_with_steps(&[0]);
        editor.take_events();
        editor.execute_command(StepEditorCommand::SetClipRange {
            track_id: TrackId(7),
            clip_id: ClipId(9),
            start_ms: 5000,
            end_ms: -100,
        });
        let events = editor.take_events();
        assert!(matches!(
            events[0],
            StepEditorEvent::ClipRangeSet { track_id, clip_id, start_ms, end_ms }
                if track_id == TrackId(7) && clip_id == ClipId(9) && start_ms == 0 && end_ms == 3000
        ));
    }

    #[test]
    fn test_subscription_channel_receives_events() {
        let (mut editor, ids) = editor_with_steps(&[0, 1000]);
        let receiver = editor.subscribe();
        editor.execute_command(StepEditorCommand::SelectStep { step_id: ids[0] });
        let event = receiver.try_recv().expect("event should be delivered");
        assert!(matches!(event, StepEditorEvent::StepSelected { step_id } if step_id == ids[0]));

        // 丢弃接收端后发送端在下一次 emit 时被清理，不会报错
        drop(receiver);
        editor.execute_command(StepEditorCommand::SelectStep { step_id: ids[1] });
    }

    #[test]
    fn test_playhead_is_display_only() {
        let (mut editor, _ids) = editor_with_steps(&[0, 1000]);
        editor.execute_command(StepEditorCommand::SetPlayhead { time_ms: 777 });
        assert_eq!(editor.playhead_ms(), 777);
        assert_eq!(times(&editor), vec![0, 1000]);
    }
}
