//! 桥接进程运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required value: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 桥接进程运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mqtt_host: String,
    pub mqtt_port: u16,
    pub mqtt_username: Option<String>,
    pub mqtt_password: Option<String>,
    pub influx_host: String,
    pub influx_port: u16,
    pub influx_database: String,
    pub influx_username: Option<String>,
    pub influx_password: Option<String>,
    /// 订阅的 topic 模式，如 `/devices/+/controls/+`。
    pub topic: String,
}

/// 命令行覆盖项：`Some` 的字段覆盖环境变量中的值。
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub mqtt_host: Option<String>,
    pub mqtt_port: Option<u16>,
    pub mqtt_username: Option<String>,
    pub mqtt_password: Option<String>,
    pub influx_host: Option<String>,
    pub influx_port: Option<u16>,
    pub influx_database: Option<String>,
    pub influx_username: Option<String>,
    pub influx_password: Option<String>,
    pub topic: Option<String>,
}

impl AppConfig {
    /// 从环境变量读取配置（topic 可由命令行补充，见 [`AppConfig::validate`]）。
    pub fn from_env() -> Result<Self, ConfigError> {
        let mqtt_host = env::var("BRIDGE_MQTT_HOST").unwrap_or_else(|_| "localhost".to_string());
        let mqtt_port = read_u16_with_default("BRIDGE_MQTT_PORT", 1883)?;
        let mqtt_username = read_optional("BRIDGE_MQTT_USERNAME");
        let mqtt_password = read_optional("BRIDGE_MQTT_PASSWORD");
        let influx_host =
            env::var("BRIDGE_INFLUX_HOST").unwrap_or_else(|_| "localhost".to_string());
        let influx_port = read_u16_with_default("BRIDGE_INFLUX_PORT", 8086)?;
        let influx_database =
            env::var("BRIDGE_INFLUX_DATABASE").unwrap_or_else(|_| "mqtt".to_string());
        let influx_username = read_optional("BRIDGE_INFLUX_USERNAME");
        let influx_password = read_optional("BRIDGE_INFLUX_PASSWORD");
        let topic = read_optional("BRIDGE_TOPIC").unwrap_or_default();

        Ok(Self {
            mqtt_host,
            mqtt_port,
            mqtt_username,
            mqtt_password,
            influx_host,
            influx_port,
            influx_database,
            influx_username,
            influx_password,
            topic,
        })
    }

    /// 应用命令行覆盖项。
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(value) = overrides.mqtt_host {
            self.mqtt_host = value;
        }
        if let Some(value) = overrides.mqtt_port {
            self.mqtt_port = value;
        }
        if overrides.mqtt_username.is_some() {
            self.mqtt_username = overrides.mqtt_username.filter(|value| !value.is_empty());
        }
        if overrides.mqtt_password.is_some() {
            self.mqtt_password = overrides.mqtt_password;
        }
        if let Some(value) = overrides.influx_host {
            self.influx_host = value;
        }
        if let Some(value) = overrides.influx_port {
            self.influx_port = value;
        }
        if let Some(value) = overrides.influx_database {
            self.influx_database = value;
        }
        if overrides.influx_username.is_some() {
            self.influx_username = overrides.influx_username.filter(|value| !value.is_empty());
        }
        if overrides.influx_password.is_some() {
            self.influx_password = overrides.influx_password;
        }
        if let Some(value) = overrides.topic {
            self.topic = value;
        }
        self
    }

    /// 校验必填项。
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.topic.trim().is_empty() {
            return Err(ConfigError::Missing("topic (BRIDGE_TOPIC)".to_string()));
        }
        if self.influx_database.is_empty() {
            return Err(ConfigError::Invalid(
                "BRIDGE_INFLUX_DATABASE".to_string(),
                self.influx_database,
            ));
        }
        Ok(self)
    }
}

fn read_u16_with_default(key: &str, default: u16) -> Result<u16, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u16>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
