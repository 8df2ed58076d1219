//! 工具函数模块
//!
//! 包含通用的工具函数，如时间格式化等。

/// 将时间（毫秒）格式化为 "MM:SS.mmm" 格式
///
/// # 示例
///
/// ```
/// use step_timeline::utils::format_time_ms;
///
/// let formatted = format_time_ms(125_500);
/// assert_eq!(formatted, "02:05.500");
/// ```
pub fn format_time_ms(time_ms: i64) -> String {
    let total = time_ms.max(0);
    let minutes = total / 60_000;
    let seconds = (total / 1000) % 60;
    let milliseconds = total % 1000;
    format!("{:02}:{:02}.{:03}", minutes, seconds, milliseconds)
}
