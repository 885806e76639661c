use anyhow::Result;
use tracing::{debug, info};

use crate::meraki::{DashboardApi, Device, Network};

/// 遍历所有组织的网络，只保留含 MR/MS 设备的网络
pub async fn discover_target_networks(api: &dyn DashboardApi) -> Result<Vec<Network>> {
    let organizations = api.get_organizations().await?;
    info!("🏢 共 {} 个组织", organizations.len());

    let mut targets = Vec::new();
    for organization in &organizations {
        let networks = api.get_organization_networks(&organization.id).await?;
        debug!("组织 {} ({}) 下有 {} 个网络", organization.name, organization.id, networks.len());

        for network in networks {
            let devices = api.get_network_devices(&network.id).await?;
            if devices.iter().any(Device::is_access_point_or_switch) {
                targets.push(network);
            } else {
                debug!("跳过网络 {}：没有 MR/MS 设备", network.name);
            }
        }
    }

    Ok(targets)
}
