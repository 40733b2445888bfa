use umbra_dns_domain::{CliOverrides, Config};

#[test]
fn test_defaults() {
    let config = Config::default();

    assert_eq!(config.server.listen, "127.0.0.1:53");
    assert_eq!(config.server.outbound_port, 853);
    assert!(config.cache.enabled);
    assert_eq!(config.cache.reap_interval_secs, 60);
    assert!(!config.blocking.enabled());
    assert_eq!(config.dns.queue_capacity, 128);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_parse_from_toml() {
    let config: Config = toml::from_str(
        r#"
        [server]
        listen = "127.0.0.1:5353"

        [cache]
        enabled = false

        [blocking]
        blocklist_file = "/etc/umbra-dns/hosts.txt"

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    assert_eq!(config.server.listen, "127.0.0.1:5353");
    assert!(!config.cache.enabled);
    assert!(config.blocking.enabled());
    assert_eq!(config.logging.level, "debug");
    // Unspecified sections keep their defaults.
    assert_eq!(config.server.outbound_port, 853);
    assert_eq!(config.dns.queue_capacity, 128);
}

#[test]
fn test_cli_overrides_win() {
    let overrides = CliOverrides {
        listen: Some("127.0.0.1:10053".to_string()),
        no_cache: true,
        blocklist_file: Some("hosts.txt".to_string()),
        resolvers_file: Some("resolvers.toml".to_string()),
        log_level: Some("trace".to_string()),
    };

    let config = Config::load(None, overrides).unwrap();

    assert_eq!(config.server.listen, "127.0.0.1:10053");
    assert!(!config.cache.enabled);
    assert_eq!(config.blocking.blocklist_file.as_deref(), Some("hosts.txt"));
    assert_eq!(
        config.dns.resolvers_file.as_deref(),
        Some("resolvers.toml")
    );
    assert_eq!(config.logging.level, "trace");
}

#[test]
fn test_validate_rejects_bad_listen_address() {
    let mut config = Config::default();
    config.server.listen = "not-an-address".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_queue_capacity() {
    let mut config = Config::default();
    config.dns.queue_capacity = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_accepts_defaults() {
    assert!(Config::default().validate().is_ok());
}
