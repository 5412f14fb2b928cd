use bridge_config::{AppConfig, ConfigError, ConfigOverrides};

// 环境变量为进程级共享状态，相关断言集中在同一个测试中，避免并行测试互相干扰。
#[test]
fn load_config_from_env_and_overrides() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("BRIDGE_MQTT_HOST", "broker.local");
        std::env::set_var("BRIDGE_MQTT_PORT", "1884");
        std::env::set_var("BRIDGE_INFLUX_DATABASE", "telemetry");
        std::env::remove_var("BRIDGE_TOPIC");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.mqtt_host, "broker.local");
    assert_eq!(config.mqtt_port, 1884);
    assert_eq!(config.influx_host, "localhost");
    assert_eq!(config.influx_port, 8086);
    assert_eq!(config.influx_database, "telemetry");
    assert!(config.topic.is_empty());

    // 未提供 topic 时校验失败
    let err = config.clone().validate().expect_err("missing topic");
    assert!(matches!(err, ConfigError::Missing(_)));

    // 命令行覆盖环境变量
    let config = config
        .with_overrides(ConfigOverrides {
            mqtt_host: Some("10.0.0.5".to_string()),
            mqtt_username: Some("".to_string()),
            influx_port: Some(9086),
            topic: Some("/devices/+/controls/+".to_string()),
            ..ConfigOverrides::default()
        })
        .validate()
        .expect("valid");
    assert_eq!(config.mqtt_host, "10.0.0.5");
    assert_eq!(config.mqtt_port, 1884);
    assert!(config.mqtt_username.is_none());
    assert_eq!(config.influx_port, 9086);
    assert_eq!(config.topic, "/devices/+/controls/+");

    unsafe {
        std::env::set_var("BRIDGE_INFLUX_PORT", "not-a-port");
    }
    let err = AppConfig::from_env().expect_err("invalid port");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "BRIDGE_INFLUX_PORT"));

    unsafe {
        std::env::remove_var("BRIDGE_INFLUX_PORT");
    }
}
