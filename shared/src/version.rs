//! 语义化版本比较
//!
//! 支持 `major.minor.patch` 形式的版本号（如 "1.2.3"）。
//! 解析策略偏向放行：缺失的输入视为相等，非数字片段按 0 处理，
//! 不足三段的版本号补零后比较。

use std::cmp::Ordering;

/// 将版本字符串解析为 `[major, minor, patch]`
fn parse_parts(version: &str) -> [u64; 3] {
    let mut parts = [0u64; 3];
    for (i, piece) in version.trim().split('.').take(3).enumerate() {
        parts[i] = piece.trim().parse::<u64>().unwrap_or(0);
    }
    parts
}

/// 比较两个语义化版本
///
/// 任一输入为空时返回 `Equal`（放行，不触发更新）。
pub fn compare_versions(current: &str, required: &str) -> Ordering {
    if current.trim().is_empty() || required.trim().is_empty() {
        return Ordering::Equal;
    }

    parse_parts(current).cmp(&parse_parts(required))
}

/// 当前版本是否低于要求版本
pub fn is_update_required(current: &str, required: &str) -> bool {
    compare_versions(current, required) == Ordering::Less
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_versions() {
        assert_eq!(compare_versions("1.2.3", "1.2.3"), Ordering::Equal);
    }

    #[test]
    fn test_patch_difference() {
        assert_eq!(compare_versions("1.2.3", "1.2.4"), Ordering::Less);
        assert_eq!(compare_versions("1.2.5", "1.2.4"), Ordering::Greater);
    }

    #[test]
    fn test_minor_and_major_difference() {
        assert_eq!(compare_versions("1.3.0", "1.10.0"), Ordering::Less);
        assert_eq!(compare_versions("2.0.0", "1.99.99"), Ordering::Greater);
    }

    #[test]
    fn test_short_versions_are_zero_padded() {
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("1", "1.0.1"), Ordering::Less);
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        assert_eq!(compare_versions(" 1.2.3 ", "1.2.3"), Ordering::Equal);
    }

    #[test]
    fn test_non_numeric_segments_parse_as_zero() {
        assert_eq!(compare_versions("1.x.3", "1.0.3"), Ordering::Equal);
    }

    #[test]
    fn test_missing_input_fails_open() {
        assert_eq!(compare_versions("", "1.2.3"), Ordering::Equal);
        assert_eq!(compare_versions("1.2.3", "  "), Ordering::Equal);
        assert!(!is_update_required("", "9.9.9"));
    }

    #[test]
    fn test_is_update_required() {
        assert!(is_update_required("1.2.3", "1.3.0"));
        assert!(!is_update_required("1.3.0", "1.3.0"));
        assert!(!is_update_required("2.0.0", "1.3.0"));
    }
}
