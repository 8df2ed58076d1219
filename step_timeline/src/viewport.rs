//! 视口坐标映射模块
//!
//! 在指针像素偏移与时间（毫秒）之间转换。退化输入一律饱和为安全的 0，
//! 映射永远不会失败。

/// 将时间转换为视口内的 x 像素坐标。
///
/// 时长或视口宽度退化（<= 0 或非有限值）时返回 0。
pub fn time_to_px(time_ms: i64, width_px: f32, duration_ms: i64) -> f32 {
    if duration_ms <= 0 || !width_px.is_finite() || width_px <= 0.0 {
        return 0.0;
    }
    ((time_ms as f64 / duration_ms as f64) * width_px as f64) as f32
}

/// 将 x 像素坐标转换为时间（毫秒），结果取整到毫秒。
///
/// x 先被限制在 `[0, width]` 内；退化输入返回 0。
pub fn px_to_time(x_px: f32, width_px: f32, duration_ms: i64) -> i64 {
    if duration_ms <= 0 || !width_px.is_finite() || width_px <= 0.0 {
        return 0;
    }
    if !x_px.is_finite() {
        return 0;
    }
    let x = x_px.clamp(0.0, width_px);
    ((x as f64 / width_px as f64) * duration_ms as f64).round() as i64
}
