//! 时间展示模块
//!
//! 后端返回的 `created_at` 可能带时区（RFC 3339），也可能是不带时区的
//! ISO 8601 本地时间（可含微秒）。这里统一解析为 `NaiveDateTime` 后格式化。

use chrono::{DateTime, NaiveDateTime};

const MISSING: &str = "N/A";

/// 解析后端时间字符串
///
/// 返回 None 如果两种格式都无法解析
pub fn parse(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// 表格中的日期列：`YYYY-MM-DD`
///
/// 缺失时显示 `N/A`，无法解析时原样显示。
pub fn format_date(value: Option<&str>) -> String {
    format_with(value, "%Y-%m-%d")
}

/// 详情中的时间：`YYYY-MM-DD HH:MM`
pub fn format_date_time(value: Option<&str>) -> String {
    format_with(value, "%Y-%m-%d %H:%M")
}

fn format_with(value: Option<&str>, pattern: &str) -> String {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => MISSING.to_string(),
        Some(raw) => parse(raw)
            .map(|dt| dt.format(pattern).to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}
