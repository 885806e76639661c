//! Dashboard API 的 HTTP 实现

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, LINK};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{DashboardApi, Device, Network, NetworkClient, Organization, UsageRecord};
use crate::config::Settings;

pub struct MerakiClient {
    base_url: String,
    per_page: u32,
    client: reqwest::Client,
}

impl MerakiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", settings.api_key))
            .with_context(|| "API 密钥包含非法字符")?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .timeout(settings.config.request_timeout())
            .user_agent(concat!("meraki-attendance/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: settings.config.base_url.trim_end_matches('/').to_string(),
            per_page: settings.config.per_page,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 请求一页，返回内容与下一页地址
    async fn get_page<T: DeserializeOwned>(&self, url: &str) -> Result<(T, Option<String>)> {
        debug!("GET {}", url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("无法连接到 Dashboard API: {}", url))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Dashboard API 返回错误 ({}) {}: {}", status, url, body));
        }

        let next = next_page_url(resp.headers());
        let body: T = resp
            .json()
            .await
            .with_context(|| format!("解析 Dashboard API 响应失败: {}", url))?;

        Ok((body, next))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let (body, _) = self.get_page(&self.url(path)).await?;
        Ok(body)
    }

    /// 跟随 Link: rel=next 取完所有分页
    async fn get_all_pages<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let mut url = format!("{}?perPage={}", self.url(path), self.per_page);
        let mut items = Vec::new();

        loop {
            let (page, next): (Vec<T>, Option<String>) = self.get_page(&url).await?;
            items.extend(page);

            match next {
                Some(next) if next != url => url = next,
                _ => break,
            }
        }

        Ok(items)
    }
}

/// 从 Link 头中取出 rel=next 的地址
pub fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;

    link.split(',').find_map(|part| {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();
        let target = target.strip_prefix('<')?.strip_suffix('>')?;

        let is_next = segments.any(|param| {
            let param = param.trim().replace(' ', "");
            param == "rel=next" || param == "rel=\"next\""
        });

        is_next.then(|| target.to_string())
    })
}

#[async_trait]
impl DashboardApi for MerakiClient {
    async fn get_organizations(&self) -> Result<Vec<Organization>> {
        self.get_json("/organizations").await
    }

    async fn get_organization_networks(&self, organization_id: &str) -> Result<Vec<Network>> {
        self.get_all_pages(&format!("/organizations/{}/networks", organization_id))
            .await
    }

    async fn get_network_devices(&self, network_id: &str) -> Result<Vec<Device>> {
        self.get_json(&format!("/networks/{}/devices", network_id))
            .await
    }

    async fn get_network_clients(&self, network_id: &str) -> Result<Vec<NetworkClient>> {
        self.get_all_pages(&format!("/networks/{}/clients", network_id))
            .await
    }

    async fn get_network_client_usage_history(
        &self,
        network_id: &str,
        client_id: &str,
    ) -> Result<Vec<UsageRecord>> {
        self.get_json(&format!(
            "/networks/{}/clients/{}/usageHistory",
            network_id, client_id
        ))
        .await
    }
}
