//! 测试用的内存 Dashboard

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{DashboardApi, Device, Network, NetworkClient, Organization, UsageRecord};

#[derive(Default)]
pub struct FakeDashboard {
    pub organizations: Vec<Organization>,
    pub networks: HashMap<String, Vec<Network>>,
    pub devices: HashMap<String, Vec<Device>>,
    pub clients: HashMap<String, Vec<NetworkClient>>,
    pub usage: HashMap<(String, String), Vec<UsageRecord>>,
    /// 请求这些客户端的用量时返回错误
    pub failing_clients: Vec<String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeDashboard {
    pub fn add_organization(&mut self, id: &str) {
        self.organizations.push(Organization {
            id: id.to_string(),
            name: format!("Org {}", id),
        });
    }

    pub fn add_network(&mut self, organization_id: &str, id: &str, name: &str, models: &[&str]) {
        self.networks
            .entry(organization_id.to_string())
            .or_default()
            .push(Network {
                id: id.to_string(),
                name: name.to_string(),
            });
        self.devices.insert(
            id.to_string(),
            models
                .iter()
                .map(|model| Device {
                    model: model.to_string(),
                })
                .collect(),
        );
    }

    pub fn add_client(&mut self, network_id: &str, client: NetworkClient, usage: Vec<UsageRecord>) {
        self.usage
            .insert((network_id.to_string(), client.id.clone()), usage);
        self.clients
            .entry(network_id.to_string())
            .or_default()
            .push(client);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DashboardApi for FakeDashboard {
    async fn get_organizations(&self) -> Result<Vec<Organization>> {
        self.record("organizations".to_string());
        Ok(self.organizations.clone())
    }

    async fn get_organization_networks(&self, organization_id: &str) -> Result<Vec<Network>> {
        self.record(format!("networks:{}", organization_id));
        Ok(self.networks.get(organization_id).cloned().unwrap_or_default())
    }

    async fn get_network_devices(&self, network_id: &str) -> Result<Vec<Device>> {
        self.record(format!("devices:{}", network_id));
        Ok(self.devices.get(network_id).cloned().unwrap_or_default())
    }

    async fn get_network_clients(&self, network_id: &str) -> Result<Vec<NetworkClient>> {
        self.record(format!("clients:{}", network_id));
        Ok(self.clients.get(network_id).cloned().unwrap_or_default())
    }

    async fn get_network_client_usage_history(
        &self,
        network_id: &str,
        client_id: &str,
    ) -> Result<Vec<UsageRecord>> {
        self.record(format!("usage:{}:{}", network_id, client_id));
        if self.failing_clients.iter().any(|id| id == client_id) {
            return Err(anyhow!("Dashboard API 返回错误 (429 Too Many Requests)"));
        }
        Ok(self
            .usage
            .get(&(network_id.to_string(), client_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
