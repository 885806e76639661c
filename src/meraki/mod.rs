//! Meraki Dashboard API
//!
//! `DashboardApi` 抽象出报表需要的五个只读接口，`MerakiClient` 是基于 HTTP 的实现。

pub mod client;
#[cfg(test)]
pub(crate) mod fake;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use client::MerakiClient;

/// 组织
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// 网络（站点）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
}

/// 网络内的设备，只关心型号
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub model: String,
}

impl Device {
    /// MR 无线 AP 或 MS 交换机
    pub fn is_access_point_or_switch(&self) -> bool {
        self.model.starts_with("MR") || self.model.starts_with("MS")
    }
}

/// 网络客户端
///
/// 缺失的 mac/ip/user 记为 "N/A"，显式 null 保留为 None。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkClient {
    pub id: String,
    #[serde(default = "not_available")]
    pub mac: Option<String>,
    #[serde(default = "not_available")]
    pub ip: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "not_available")]
    pub user: Option<String>,
}

fn not_available() -> Option<String> {
    Some("N/A".to_string())
}

impl NetworkClient {
    pub fn description_or_empty(&self) -> String {
        self.description.clone().unwrap_or_default()
    }
}

/// 客户端用量历史中的一条
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub ts: String,
    #[serde(default)]
    pub received: Option<i64>,
    #[serde(default)]
    pub sent: Option<i64>,
}

impl UsageRecord {
    pub fn total(&self) -> i64 {
        self.received.unwrap_or(0) + self.sent.unwrap_or(0)
    }
}

#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn get_organizations(&self) -> Result<Vec<Organization>>;

    async fn get_organization_networks(&self, organization_id: &str) -> Result<Vec<Network>>;

    async fn get_network_devices(&self, network_id: &str) -> Result<Vec<Device>>;

    /// 返回网络的全部客户端（跟随所有分页）
    async fn get_network_clients(&self, network_id: &str) -> Result<Vec<NetworkClient>>;

    async fn get_network_client_usage_history(
        &self,
        network_id: &str,
        client_id: &str,
    ) -> Result<Vec<UsageRecord>>;
}
