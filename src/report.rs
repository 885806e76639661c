//! 考勤报表：发现网络 → 拉取客户端用量 → 按天汇总写库

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info};

use crate::attendance::{attendance_row, upsert_attendance, worksheet_name};
use crate::discovery::discover_target_networks;
use crate::meraki::DashboardApi;
use crate::usage::{filter_usage_history, total_usage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub networks: usize,
    pub rows_written: usize,
}

/// 回填第 `backfill_days` 天对应的日期，格式 YYYY-MM-DD
pub fn report_date(now: DateTime<Utc>, backfill_days: u32) -> String {
    (now - Duration::days(i64::from(backfill_days)))
        .format("%Y-%m-%d")
        .to_string()
}

/// 执行一次完整的报表
///
/// 所有写入在同一个事务里，结束时统一提交；任何 API 或数据库错误都会中止整次运行。
pub async fn run_report(
    api: &dyn DashboardApi,
    db: &DatabaseConnection,
    backfill_days: u32,
) -> Result<ReportSummary> {
    let targets = discover_target_networks(api).await?;
    info!("📡 共 {} 个含 MR/MS 设备的网络", targets.len());

    let txn = db.begin().await?;
    let mut rows_written = 0;

    for network in &targets {
        let network_name = worksheet_name(&network.name);
        let clients = api.get_network_clients(&network.id).await?;
        info!("网络 {} 有 {} 个客户端", network_name, clients.len());

        for backfill in 0..backfill_days {
            let current_day = report_date(Utc::now(), backfill);
            let mut day_rows = 0;

            for client in &clients {
                let history = api
                    .get_network_client_usage_history(&network.id, &client.id)
                    .await?;
                let filtered = filter_usage_history(&history, backfill + 1)?;
                if filtered.is_empty() {
                    continue;
                }

                let row = attendance_row(&network_name, &current_day, client, total_usage(&filtered));
                upsert_attendance(&txn, row).await?;
                day_rows += 1;
            }

            debug!("网络 {} {}: 写入 {} 行", network_name, current_day, day_rows);
            rows_written += day_rows;
        }
    }

    txn.commit().await?;

    Ok(ReportSummary {
        networks: targets.len(),
        rows_written,
    })
}
