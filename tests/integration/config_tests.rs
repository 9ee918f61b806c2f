//! Layered configuration loading

use gemini_image_gateway::config::{Config, Validate};
use gemini_image_gateway::GatewayError;
use std::io::Write;
use tempfile::NamedTempFile;

fn yaml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_file_then_env_layering() {
    let file = yaml_file(
        r#"
server:
  port: 9001
gemini:
  api_key: "file-key"
  model: "file-model"
"#,
    );

    let mut config = Config::from_file(file.path()).await.unwrap();
    config
        .apply_env_with(|name| match name {
            "GOOGLE_API_KEY" => Some("env-key".to_string()),
            "GEMINI_TIMEOUT" => Some("60".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(config.gemini().api_key, "env-key");
    assert_eq!(config.gemini().model, "file-model");
    assert_eq!(config.gemini().request_timeout, 60);
    assert_eq!(config.server().port, 9001);
    assert!(config.validate().is_ok());
}

#[tokio::test]
async fn test_invalid_yaml_is_config_error() {
    let file = yaml_file("server: [not, a, map");
    let err = Config::from_file(file.path()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Config(_)));
}

#[test]
fn test_missing_default_key_fails_validation() {
    let mut config = Config::default();
    config.apply_env_with(|_| None).unwrap();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("GOOGLE_API_KEY environment variable not set"));
}

#[test]
fn test_wildcard_cors_with_credentials_rejected() {
    let mut config = Config::default();
    config.gateway.gemini.api_key = "key".to_string();
    config.gateway.server.cors.allowed_origins = vec!["*".to_string()];

    assert!(Validate::validate(&config.gateway.server.cors).is_err());
    assert!(config.validate().is_err());
}
