//! 用量窗口过滤
//!
//! 窗口以调用时刻的本地时间为锚点向前推 `days_back` 天，不按自然日切分。
//! 用量时间戳去掉末尾的 `Z` 后按本地无时区时间比较。

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::meraki::UsageRecord;

/// 解析用量时间戳，例如 `2024-05-01T13:00:00.000Z`
pub fn parse_usage_timestamp(ts: &str) -> Result<NaiveDateTime> {
    let trimmed = ts.trim_end_matches('Z');
    trimmed
        .parse::<NaiveDateTime>()
        .or_else(|_| trimmed.parse::<NaiveDate>().map(|d| d.and_time(NaiveTime::MIN)))
        .with_context(|| format!("无效的用量时间戳: {}", ts))
}

/// 以当前时刻为锚点过滤
pub fn filter_usage_history(history: &[UsageRecord], days_back: u32) -> Result<Vec<UsageRecord>> {
    filter_usage_history_at(history, days_back, Local::now().naive_local())
}

/// 保留时间戳 >= now - days_back 天的记录，边界上的记录保留
pub fn filter_usage_history_at(
    history: &[UsageRecord],
    days_back: u32,
    now: NaiveDateTime,
) -> Result<Vec<UsageRecord>> {
    let threshold = now - Duration::days(i64::from(days_back));

    let mut filtered = Vec::new();
    for entry in history {
        if parse_usage_timestamp(&entry.ts)? >= threshold {
            filtered.push(entry.clone());
        }
    }
    Ok(filtered)
}

/// 收发字节合计
pub fn total_usage(records: &[UsageRecord]) -> i64 {
    records.iter().map(UsageRecord::total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ts: &str, received: i64, sent: i64) -> UsageRecord {
        UsageRecord {
            ts: ts.to_string(),
            received: Some(received),
            sent: Some(sent),
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_usage_timestamp() {
        assert_eq!(parse_usage_timestamp("2024-05-01T13:00:00Z").unwrap(), at("2024-05-01T13:00:00"));
        assert_eq!(
            parse_usage_timestamp("2024-05-01T13:00:00.250Z").unwrap(),
            at("2024-05-01T13:00:00.250")
        );
        assert_eq!(parse_usage_timestamp("2024-05-01").unwrap(), at("2024-05-01T00:00:00"));
        assert!(parse_usage_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_filter_one_day_window() {
        let now = at("2024-05-02T10:30:00");
        let history = vec![
            record("2024-04-30T12:00:00Z", 1, 1),
            record("2024-05-01T10:29:59Z", 2, 2),
            record("2024-05-01T10:30:00Z", 3, 3),
            record("2024-05-02T09:00:00Z", 4, 4),
        ];

        let filtered = filter_usage_history_at(&history, 1, now).unwrap();
        assert_eq!(filtered, vec![history[2].clone(), history[3].clone()]);
    }

    #[test]
    fn test_filter_two_day_window() {
        let now = at("2024-05-02T10:30:00");
        let history = vec![
            record("2024-04-30T10:29:59Z", 1, 1),
            record("2024-04-30T10:30:00Z", 2, 2),
            record("2024-05-01T00:00:00Z", 3, 3),
        ];

        let filtered = filter_usage_history_at(&history, 2, now).unwrap();
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].ts, "2024-04-30T10:30:00Z");
    }

    #[test]
    fn test_filter_rejects_bad_timestamp() {
        let now = at("2024-05-02T10:30:00");
        let history = vec![record("not-a-time", 1, 1)];
        assert!(filter_usage_history_at(&history, 1, now).is_err());
    }

    #[test]
    fn test_filter_uses_current_time() {
        let recent = (Local::now().naive_local() - Duration::hours(1))
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();
        let old = (Local::now().naive_local() - Duration::days(3))
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();
        let history = vec![record(&recent, 1, 1), record(&old, 1, 1)];

        let filtered = filter_usage_history(&history, 1).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].ts, recent);
    }

    #[test]
    fn test_total_usage() {
        let records = vec![record("2024-05-01T00:00:00Z", 100, 50), record("2024-05-01T01:00:00Z", 10, 0)];
        assert_eq!(total_usage(&records), 160);
        assert_eq!(total_usage(&[]), 0);
    }
}
