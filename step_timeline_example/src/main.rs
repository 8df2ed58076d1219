use step_timeline::utils::format_time_ms;
use step_timeline::{
    ClipId, Step, StepEditor, StepEditorCommand, StepEditorOptions, TrackId,
};

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut editor = StepEditor::new(StepEditorOptions::default());
    editor.set_event_listener(Box::new(|event| {
        log::info!("[StepEditorEvent] {:?}", event);
    }));

    // 时间轴：3 秒，100ms 网格，最小间隔 300ms，视口 600px
    editor.execute_command(StepEditorCommand::SetDuration { duration_ms: 3000 });
    editor.execute_command(StepEditorCommand::SetQuantStep { quant_ms: 100 });
    editor.execute_command(StepEditorCommand::SetMinGap {
        min_gap_ms: Some(300),
    });
    editor.execute_command(StepEditorCommand::SetViewportWidth { width_px: 600.0 });

    let steps = vec![Step::new(0), Step::new(1000), Step::new(2000)];
    let first = steps[0].id;
    editor.execute_command(StepEditorCommand::SetSteps { steps });

    // 模拟一次拖动会话：把第一个标记拖向时间轴尾部
    // (600px / 3000ms = 0.2 px/ms)
    log::info!("-- drag session, ripple off --");
    editor.on_pointer_down(first, 0.0);
    for px in [120.0, 260.0, 410.0, 500.0] {
        editor.on_pointer_move(px);
    }
    editor.on_pointer_up(Some(500.0));
    dump_steps(&editor);

    // 同样的拖动，开启 ripple：后续标记整体平移
    let steps = vec![Step::new(0), Step::new(1000), Step::new(2000)];
    let first = steps[0].id;
    editor.execute_command(StepEditorCommand::SetSteps { steps });
    editor.execute_command(StepEditorCommand::SetRipple { enabled: true });

    log::info!("-- drag session, ripple on --");
    editor.on_pointer_down(first, 0.0);
    editor.on_pointer_move(100.0);
    editor.on_pointer_up(Some(100.0));
    dump_steps(&editor);

    // 命中测试：点击选中与悬停
    log::info!("-- hit testing --");
    if let Some(step_id) = editor.click_select(310.0) {
        log::info!("click at 310px selects {:?}", step_id);
    }
    match editor.hovered_step(95.0) {
        Some(step_id) => log::info!("hover at 95px hits {:?}", step_id),
        None => log::info!("hover at 95px hits nothing"),
    }

    // 外围协作方：进度条定位与剪辑区间面板
    log::info!("-- peripheral collaborators --");
    editor.execute_command(StepEditorCommand::Scrub { time_ms: 1234 });
    editor.execute_command(StepEditorCommand::SetClipRange {
        track_id: TrackId::next(),
        clip_id: ClipId::next(),
        start_ms: 2400,
        end_ms: 800,
    });
}

fn dump_steps(editor: &StepEditor) {
    for step in editor.steps() {
        log::info!("  step {:?} at {}", step.id, format_time_ms(step.time_ms));
    }
}
