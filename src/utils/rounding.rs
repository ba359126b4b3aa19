//! 分数数值处理
//!
//! 所有对外暴露的分数统一保留两位小数，采用四舍五入（half-up）。

/// 保留两位小数，四舍五入
///
/// 分数均为非负数，f64::round 的 half-away-from-zero 即 half-up。
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 按满分推导百分比得分，保留两位小数
pub fn percentage_of(total: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    round2(total / max * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_truncates_to_two_decimals() {
        assert_eq!(round2(12.344), 12.34);
        assert_eq!(round2(12.346), 12.35);
        assert_eq!(round2(15.0), 15.0);
    }

    #[test]
    fn test_round2_half_up() {
        // 0.125 可被二进制精确表示，乘以 100 后恰为 12.5
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(4.5), 4.5);
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(15.0, 20.0), 75.0);
        assert_eq!(percentage_of(0.0, 20.0), 0.0);
        assert_eq!(percentage_of(20.0, 20.0), 100.0);
        assert_eq!(percentage_of(7.33, 20.0), 36.65);
    }

    #[test]
    fn test_percentage_of_zero_max() {
        assert_eq!(percentage_of(10.0, 0.0), 0.0);
    }
}
