//! 时间量化模块
//!
//! 将原始时间对齐到固定网格。步长 <= 1 视为没有网格。

/// 将时间（毫秒）对齐到最近的网格倍数。
///
/// `step_ms <= 1` 表示没有网格，原样返回。与两个倍数距离相等时，
/// 取靠正无穷方向的那一个。该函数是幂等的。
pub fn quantize(time_ms: i64, step_ms: i64) -> i64 {
    if step_ms <= 1 {
        return time_ms;
    }
    // 加半步后向下整除：等价于四舍五入，平局向上
    (time_ms + step_ms / 2).div_euclid(step_ms) * step_ms
}
