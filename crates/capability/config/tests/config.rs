use domain::TransportKind;
use plant_config::{AppConfig, ConfigError, parse_gateways};

#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("PLANT_SOCKET_PORT", "9190");
        std::env::set_var("PLANT_IDLE_TIMEOUT_SECONDS", "30");
        std::env::set_var("PLANT_SEED", "7");
        std::env::set_var("PLANT_API_TOKEN", "token-1");
        std::env::set_var(
            "PLANT_GATEWAYS",
            "contsocket=socket@127.0.0.1:9190,plassb=http@http://127.0.0.1:8083#token-1",
        );
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.socket_port, 9190);
    assert_eq!(config.socket_host, "0.0.0.0");
    assert_eq!(config.idle_timeout_seconds, 30);
    assert_eq!(config.max_connections, 100);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.seed_days, 10);
    assert_eq!(config.require_api_token().expect("token"), "token-1");
    assert_eq!(config.gateways.len(), 2);
    assert_eq!(config.gateways[1].kind(), TransportKind::Http);
}

#[test]
fn gateways_list_skips_blank_entries() {
    let gateways = parse_gateways(" a=tcp@h:1 , ,b=rest@http://x ").expect("parse");
    assert_eq!(gateways.len(), 2);
    assert_eq!(gateways[0].display_name(), "a");
    assert_eq!(gateways[1].kind(), TransportKind::Http);
}

#[test]
fn gateways_list_rejects_unknown_kind() {
    let err = parse_gateways("a=carrier-pigeon@h:1").expect_err("invalid");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "PLANT_GATEWAYS"));
}
