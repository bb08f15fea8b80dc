use chatbot_widget::config::AppConfig;
use serial_test::serial;
use std::env;
use std::fs;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("CHATBOT_SERVER__PORT");
        env::remove_var("CHATBOT_WIDGET__ENDPOINT");
        env::remove_var("CONFIG_FILE");
        env::remove_var("PORT");
        env::remove_var("CHAT_ENDPOINT");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args(["chatbot"]).expect("defaults should load");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.public_dir, "public");
    assert_eq!(config.server.request_timeout_secs, 60);
    assert_eq!(config.widget.endpoint, "http://127.0.0.1:3000");
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("CHATBOT_SERVER__PORT", "9090");
        env::set_var("CHATBOT_WIDGET__ENDPOINT", "http://chat.internal:8080");
    }

    let config = AppConfig::load_from_args(["chatbot"]).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.widget.endpoint, "http://chat.internal:8080");

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_override_beats_env() {
    clear_env_vars();
    unsafe {
        env::set_var("CHATBOT_SERVER__PORT", "9090");
    }

    let config = AppConfig::load_from_args(["chatbot", "serve", "--port", "4040", "--host", "127.0.0.1"])
        .expect("Failed to load config");
    assert_eq!(config.server.port, 4040);
    assert_eq!(config.server.host, "127.0.0.1");

    clear_env_vars();
}

#[test]
#[serial]
fn test_chat_endpoint_flag() {
    clear_env_vars();

    let config =
        AppConfig::load_from_args(["chatbot", "chat", "--endpoint", "http://localhost:5050"])
            .expect("Failed to load config");
    assert_eq!(config.widget.endpoint, "http://localhost:5050");
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = dir.path().join("chatbot.yaml");
    fs::write(
        &file_path,
        r#"
server:
  port: 7070
  public_dir: "/srv/chat"
"#,
    )
    .expect("Failed to write temp config");

    // Pass the file via env var, as the CLI would read it
    unsafe {
        env::set_var("CONFIG_FILE", &file_path);
    }

    let config = AppConfig::load_from_args(["chatbot"]).expect("Failed to load config from file");
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.server.public_dir, "/srv/chat");
    // Keys absent from the file keep their defaults
    assert_eq!(config.server.host, "0.0.0.0");

    clear_env_vars();
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args(["chatbot", "--config", "/definitely/not/here.yaml"]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_invalid_flag_is_an_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args(["chatbot", "serve", "--port", "not-a-port"]);
    assert!(result.is_err());
}
