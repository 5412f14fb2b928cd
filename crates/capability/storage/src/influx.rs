//! InfluxDB 1.x 批量写入实现
//!
//! 通过 HTTP `POST /write?db=<database>` 提交行协议正文，
//! 账号口令以 `u` / `p` 查询参数携带。

use crate::connection::http_client;
use crate::error::StorageError;
use crate::line_protocol::encode_batch;
use crate::traits::RecordSink;
use domain::StorageRecord;
use std::time::Duration;

/// 默认请求超时。
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// InfluxDB 连接配置。
#[derive(Debug, Clone)]
pub struct InfluxConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

impl InfluxConfig {
    pub fn new(host: impl Into<String>, port: u16, database: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            username: None,
            password: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_credentials(mut self, username: Option<String>, password: Option<String>) -> Self {
        self.username = username;
        self.password = password;
        self
    }
}

/// InfluxDB 写入存储
pub struct InfluxStore {
    client: reqwest::Client,
    write_url: String,
    params: Vec<(&'static str, String)>,
}

impl InfluxStore {
    pub fn new(config: InfluxConfig) -> Result<Self, StorageError> {
        let client = http_client(config.timeout)?;
        Ok(Self {
            client,
            write_url: format!("http://{}:{}/write", config.host, config.port),
            params: write_params(&config),
        })
    }

    /// 写入地址（不含查询参数）。
    pub fn write_url(&self) -> &str {
        &self.write_url
    }
}

fn write_params(config: &InfluxConfig) -> Vec<(&'static str, String)> {
    let mut params = vec![("db", config.database.clone())];
    if let Some(username) = &config.username {
        params.push(("u", username.clone()));
        params.push(("p", config.password.clone().unwrap_or_default()));
    }
    params
}

#[async_trait::async_trait]
impl RecordSink for InfluxStore {
    async fn write_batch(&self, records: &[StorageRecord]) -> Result<(), StorageError> {
        if records.is_empty() {
            return Ok(());
        }
        let body = encode_batch(records);
        let response = self
            .client
            .post(&self.write_url)
            .query(&self.params)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StorageError::new(format!(
                "influxdb write rejected: {} {}",
                status,
                detail.trim()
            )));
        }
        Ok(())
    }
}
