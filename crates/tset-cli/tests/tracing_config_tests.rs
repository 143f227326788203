use crate::tracing_config::{LOG_FORMAT_VAR, LOG_VAR, LogFormat, TracingConfig};
use std::collections::HashMap;

fn config(vars: &[(&str, &str)]) -> Option<TracingConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|&(k, v)| (k.to_string(), v.to_string()))
        .collect();
    TracingConfig::from_vars(|name| vars.get(name).cloned())
}

#[test]
fn test_nothing_installed_without_filter() {
    assert_eq!(config(&[]), None);
    assert_eq!(config(&[(LOG_FORMAT_VAR, "tree")]), None);
}

#[test]
fn test_tset_log_wins_over_rust_log() {
    let cfg = config(&[(LOG_VAR, "tset_solver=trace"), ("RUST_LOG", "warn")]).unwrap();
    assert_eq!(cfg.directives, "tset_solver=trace");
    assert_eq!(cfg.format, LogFormat::Text);

    let cfg = config(&[("RUST_LOG", "warn")]).unwrap();
    assert_eq!(cfg.directives, "warn");
}

#[test]
fn test_format_selection() {
    let cfg = config(&[(LOG_VAR, "debug"), (LOG_FORMAT_VAR, " Tree ")]).unwrap();
    assert_eq!(cfg.format, LogFormat::Tree);
    let cfg = config(&[(LOG_VAR, "debug"), (LOG_FORMAT_VAR, "json")]).unwrap();
    assert_eq!(cfg.format, LogFormat::Json);
    let cfg = config(&[(LOG_VAR, "debug"), (LOG_FORMAT_VAR, "xml")]).unwrap();
    assert_eq!(cfg.format, LogFormat::Text, "unknown formats fall back to text");
}

#[test]
fn test_log_format_parse_errors_name_the_value() {
    let err = "yaml".parse::<LogFormat>().unwrap_err();
    assert!(err.contains("yaml"), "{err}");
    assert_eq!("".parse::<LogFormat>(), Ok(LogFormat::Text));
}
