//! 命令行参数。
//!
//! `-h` 用作 MQTT 主机，帮助信息改为仅 `--help`。

use bridge_config::ConfigOverrides;
use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(name = "mqtt-influx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Subscribe to an MQTT topic mask and store readings in InfluxDB")]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// MQTT host
    #[arg(short = 'h', long)]
    pub host: Option<String>,

    /// MQTT port
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// MQTT username
    #[arg(short = 'u', long)]
    pub username: Option<String>,

    /// MQTT password
    #[arg(short = 'P', long)]
    pub password: Option<String>,

    /// InfluxDB host
    #[arg(long)]
    pub influxdb_host: Option<String>,

    /// InfluxDB port
    #[arg(long)]
    pub influxdb_port: Option<u16>,

    /// InfluxDB username
    #[arg(long)]
    pub influxdb_username: Option<String>,

    /// InfluxDB password
    #[arg(long)]
    pub influxdb_password: Option<String>,

    /// InfluxDB database
    #[arg(long)]
    pub influxdb_database: Option<String>,

    /// Topic mask to subscribe to, e.g. "/devices/+/controls/+"
    pub topic: Option<String>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

impl Cli {
    pub fn into_overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            mqtt_host: self.host,
            mqtt_port: self.port,
            mqtt_username: self.username,
            mqtt_password: self.password,
            influx_host: self.influxdb_host,
            influx_port: self.influxdb_port,
            influx_database: self.influxdb_database,
            influx_username: self.influxdb_username,
            influx_password: self.influxdb_password,
            topic: self.topic,
        }
    }
}
