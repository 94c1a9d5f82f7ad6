use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

#[test]
fn normalizes_server_url_with_trailing_slash() {
    assert_eq!(
        normalize_server_url(" http://localhost:8000/api "),
        "http://localhost:8000/api/"
    );
    assert_eq!(
        normalize_server_url("http://localhost:8000/api/"),
        "http://localhost:8000/api/"
    );
    assert_eq!(normalize_server_url("  "), ClientSettings::default().server_url);
}

#[test]
fn env_overrides_prefer_app_prefixed_names() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("SWIPE_SERVER_URL", "http://swipe.example/api/"),
        ("APP__SERVER_URL", "http://app.example/api/"),
        ("SWIPE_ACCESS_TOKEN", "token-1"),
        ("APP__REQUEST_TIMEOUT_SECS", "30"),
        ("APP__SWIPE_THRESHOLD", "not-a-number"),
    ]);
    let mut settings = ClientSettings::default();
    apply_env_overrides(&mut settings, |name| vars.get(name).map(|v| v.to_string()));

    assert_eq!(settings.server_url, "http://app.example/api/");
    assert_eq!(settings.access_token.as_deref(), Some("token-1"));
    assert_eq!(settings.request_timeout_secs, 30);
    assert_eq!(settings.swipe_threshold, SWIPE_THRESHOLD);
}

#[test]
fn rejects_non_positive_and_non_finite_numbers() {
    for (timeout, threshold) in [("0", "nan"), ("-5", "inf"), ("15s", "-40"), ("30", "0")] {
        let mut settings = ClientSettings::default();
        apply_env_overrides(&mut settings, |name| match name {
            "APP__REQUEST_TIMEOUT_SECS" => Some(timeout.to_string()),
            "APP__SWIPE_THRESHOLD" => Some(threshold.to_string()),
            _ => None,
        });
        assert_eq!(settings.swipe_threshold, SWIPE_THRESHOLD, "threshold {threshold}");
        if timeout == "30" {
            assert_eq!(settings.request_timeout_secs, 30);
        } else {
            assert_eq!(settings.request_timeout_secs, 15, "timeout {timeout}");
        }
    }

    let mut settings = ClientSettings::default();
    apply_file_settings(
        &mut settings,
        toml::from_str("request_timeout_secs = 0\nswipe_threshold = nan\n").expect("parse"),
    );
    assert_eq!(settings.request_timeout_secs, 15);
    assert_eq!(settings.swipe_threshold, SWIPE_THRESHOLD);
}

#[test]
fn blank_env_values_are_ignored() {
    let mut settings = ClientSettings::default();
    apply_env_overrides(&mut settings, |name| {
        (name == "APP__ACCESS_TOKEN").then(|| "   ".to_string())
    });
    assert!(settings.access_token.is_none());
}

#[test]
fn reads_settings_file_and_ignores_malformed_ones() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("swipe_client_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");

    let good = temp_root.join("swipe.toml");
    fs::write(
        &good,
        "server_url = \"http://events.test/api\"\nrequest_timeout_secs = 5\nswipe_threshold = 90.0\n",
    )
    .expect("write settings");
    let mut settings = ClientSettings::default();
    apply_file_settings(
        &mut settings,
        toml::from_str(&fs::read_to_string(&good).expect("read")).expect("parse"),
    );
    assert_eq!(settings.server_url, "http://events.test/api");
    assert_eq!(settings.request_timeout_secs, 5);
    assert_eq!(settings.swipe_threshold, 90.0);

    let bad = temp_root.join("broken.toml");
    fs::write(&bad, "server_url = [").expect("write broken settings");
    let loaded = load_settings(Some(bad.as_path()));
    assert!(loaded.server_url.ends_with('/'));

    fs::remove_dir_all(temp_root).expect("cleanup");
}
