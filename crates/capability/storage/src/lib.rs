//! # Bridge Storage 模块
//!
//! 本模块提供时序存储的批量写入抽象，以及 InfluxDB 与内存两种实现。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：定义批量写入接口 `RecordSink`
//! 2. **编码层** (`line_protocol.rs`)：`StorageRecord` → InfluxDB 行协议
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **连接管理层** (`connection.rs`)：HTTP 客户端构建
//! 5. **实现层**：
//!    - `influx.rs`：InfluxDB 1.x `/write` 接口实现（生产环境使用）
//!    - `in_memory.rs`：内存实现（用于测试和演示）
//!
//! ## 写入语义
//!
//! - 一次 `write_batch` 对应一次 HTTP 请求，批内记录一行一条
//! - 不携带时间戳，由 InfluxDB 以接收时间落点
//! - 写入失败直接返回错误，不做重试（由调用方决定是否终止）
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use bridge_storage::{InfluxConfig, InfluxStore, RecordSink};
//!
//! let store = InfluxStore::new(InfluxConfig::new("localhost", 8086, "mqtt"))?;
//! store.write_batch(&records).await?;
//! ```

pub mod connection;
pub mod error;
pub mod in_memory;
pub mod influx;
pub mod line_protocol;
pub mod traits;

pub use connection::*;
pub use error::*;
pub use in_memory::InMemoryRecordStore;
pub use influx::{InfluxConfig, InfluxStore};
pub use line_protocol::{encode_batch, encode_record};
pub use traits::*;
