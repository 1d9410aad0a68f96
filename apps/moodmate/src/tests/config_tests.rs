use super::{load_settings_with, Settings};

use std::{
    collections::HashMap,
    env, fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

fn temp_config(label: &str, contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("moodmate_config_{label}_{suffix}.toml"));
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config(
        "file_values",
        "server_url = \"http://mood.local:8080\"\nsession_cookie = \"session=abc\"\n",
    );

    let settings = load_settings_with(Some(&path), no_env).expect("settings");

    assert_eq!(settings.server_url, "http://mood.local:8080");
    assert_eq!(settings.session_cookie.as_deref(), Some("session=abc"));
    assert_eq!(settings.reveal_delay_ms, Settings::default().reveal_delay_ms);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let path = temp_config(
        "env_overrides",
        "server_url = \"http://from-file:5000\"\nreveal_delay_ms = 25\n",
    );
    let vars: HashMap<&str, &str> = HashMap::from([
        ("MOODMATE_SERVER_URL", "http://from-env:5000"),
        ("APP__SERVER_URL", "http://from-app-env:5000"),
        ("APP__REVEAL_DELAY_MS", "40"),
    ]);

    let settings =
        load_settings_with(Some(&path), |key| vars.get(key).map(|v| v.to_string()))
            .expect("settings");

    assert_eq!(settings.server_url, "http://from-app-env:5000");
    assert_eq!(settings.reveal_delay_ms, 40);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn unparseable_delay_override_is_ignored() {
    let settings = load_settings_with(None, |key| {
        (key == "APP__REVEAL_DELAY_MS").then(|| "soon".to_string())
    })
    .expect("settings");

    assert_eq!(settings.reveal_delay_ms, 10);
}

#[test]
fn explicit_missing_config_is_an_error() {
    let path = env::temp_dir().join("moodmate_config_test_does_not_exist.toml");

    let err = load_settings_with(Some(&path), no_env).expect_err("must fail");

    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn malformed_config_is_an_error() {
    let path = temp_config("malformed", "reveal_delay_ms = \"ten\"\n");

    let err = load_settings_with(Some(&path), no_env).expect_err("must fail");

    assert!(err.to_string().contains("failed to parse config file"));
    fs::remove_file(path).expect("cleanup");
}
