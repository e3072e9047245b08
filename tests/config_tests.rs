// Config parsing and validation.

use devwatch::config::AppConfig;

#[test]
fn empty_config_uses_defaults() {
    let config = AppConfig::load_from_str("").expect("empty config should parse");
    assert_eq!(config.sampling.dashboard_interval_ms, 2000);
    assert_eq!(config.sampling.cpu_probe_delay_ms, 500);
    assert_eq!(config.sampling.data_mount, "/");
    assert_eq!(config.report.log_dir, "logs");
    assert_eq!(config.report.periodic_interval_secs, 0);
    assert_eq!(config.settings.path, "settings.json");
}

#[test]
fn partial_config_keeps_other_defaults() {
    let config = AppConfig::load_from_str(
        r#"
[sampling]
dashboard_interval_ms = 5000

[report]
log_dir = "/var/log/devwatch"
"#,
    )
    .expect("partial config should parse");
    assert_eq!(config.sampling.dashboard_interval_ms, 5000);
    assert_eq!(config.sampling.cpu_probe_delay_ms, 500);
    assert_eq!(config.report.log_dir, "/var/log/devwatch");
    assert_eq!(config.settings.path, "settings.json");
}

#[test]
fn full_config_round_trip() {
    let config = AppConfig::load_from_str(
        r#"
[sampling]
dashboard_interval_ms = 1000
cpu_probe_delay_ms = 250
data_mount = "/data"

[report]
log_dir = "reports"
periodic_interval_secs = 900

[settings]
path = "/etc/devwatch/settings.json"
"#,
    )
    .expect("full config should parse");
    assert_eq!(config.sampling.cpu_probe_delay_ms, 250);
    assert_eq!(config.sampling.data_mount, "/data");
    assert_eq!(config.report.periodic_interval_secs, 900);
    assert_eq!(config.settings.path, "/etc/devwatch/settings.json");
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let config = AppConfig::load_from_path("/nonexistent/devwatch-config.toml")
        .expect("missing file should mean defaults");
    assert_eq!(config.sampling.dashboard_interval_ms, 2000);
}

#[test]
fn rejects_zero_dashboard_interval() {
    let err = AppConfig::load_from_str("[sampling]\ndashboard_interval_ms = 0\n")
        .expect_err("zero interval should be rejected");
    assert!(err.to_string().contains("dashboard_interval_ms"));
}

#[test]
fn rejects_probe_delay_not_shorter_than_interval() {
    let err = AppConfig::load_from_str(
        "[sampling]\ndashboard_interval_ms = 500\ncpu_probe_delay_ms = 500\n",
    )
    .expect_err("delay equal to interval should be rejected");
    assert!(err.to_string().contains("cpu_probe_delay_ms"));
}

#[test]
fn rejects_empty_paths() {
    assert!(AppConfig::load_from_str("[sampling]\ndata_mount = \"\"\n").is_err());
    assert!(AppConfig::load_from_str("[report]\nlog_dir = \"\"\n").is_err());
    assert!(AppConfig::load_from_str("[settings]\npath = \"\"\n").is_err());
}

#[test]
fn rejects_malformed_toml() {
    assert!(AppConfig::load_from_str("[sampling\ndashboard_interval_ms = 2000").is_err());
    assert!(AppConfig::load_from_str("[sampling]\ndashboard_interval_ms = \"fast\"").is_err());
}
