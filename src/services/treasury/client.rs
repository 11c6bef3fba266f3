//! TreasuryDirect 估值请求
//!
//! 对接 https://www.treasurydirect.gov/BC/SBCPrice

use reqwest::Client;

use super::common::CALCULATE_FIELD;
use crate::config::ServiceConfig;
use crate::error::{BondError, Result};
use crate::models::BondQuery;

/// 估值页面来源
///
/// 一次调用对应一次估值请求，返回原始 HTML
#[allow(async_fn_in_trait)]
pub trait PriceSource {
    async fn fetch(&self, query: &BondQuery) -> Result<String>;
}

/// TreasuryDirect 储蓄债券计算器客户端
pub struct TreasuryClient {
    client: Client,
    endpoint: String,
}

impl TreasuryClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// 构造估值表单参数
pub fn form_params(query: &BondQuery) -> [(&'static str, &str); 6] {
    [
        ("RedemptionDate", query.date()),
        ("Series", query.series()),
        ("SerialNumber", query.serial()),
        ("IssueDate", query.issue_date()),
        ("Denomination", query.denomination()),
        CALCULATE_FIELD,
    ]
}

impl PriceSource for TreasuryClient {
    async fn fetch(&self, query: &BondQuery) -> Result<String> {
        log::info!("📡 请求债券估值: {} ({})", query.serial(), query.series());

        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .form(&form_params(query))
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(BondError::Service { status });
        }

        Ok(response.text().await?)
    }
}
