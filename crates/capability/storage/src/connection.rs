//! HTTP 客户端构建
//!
//! 提供 InfluxDB 写入使用的 HTTP 客户端：
//! - http_client：按请求超时构建 reqwest 客户端

use crate::error::StorageError;
use std::time::Duration;

/// 构建 HTTP 客户端
///
/// # 参数
/// - `timeout`：单次请求超时（包含连接与响应）
///
/// # 返回
/// - `Result<reqwest::Client, StorageError>`：客户端或错误
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, StorageError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()?;
    Ok(client)
}
