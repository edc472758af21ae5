//! Integration tests for CLI commands routed through RunContext

use agentql_zap::cli::{AuthCommands, Commands, RunContext};
use agentql_zap::error::ApiError;
use tempfile::TempDir;

use crate::integration::test_utils::{fixture_path, offline_config};

fn context(workspace: &TempDir) -> RunContext {
    RunContext::with_config(workspace.path().to_path_buf(), offline_config()).unwrap()
}

#[test]
fn test_sample_json_output() {
    let temp = TempDir::new().unwrap();
    let output = context(&temp)
        .execute(&Commands::Sample {
            query: Some("{ nested { nested_id } }".to_string()),
            file: None,
            format: "json".to_string(),
        })
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["data"]["nested"]["nested_id"], "nested_id_0");
    assert_eq!(value["request_id"], "sample-request-id");
    assert_eq!(value["screenshot"], "a base64 encoded image");
}

#[test]
fn test_sample_from_file_text_output() {
    let temp = TempDir::new().unwrap();
    let output = context(&temp)
        .execute(&Commands::Sample {
            query: None,
            file: Some(fixture_path("drinks.agentql")),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.starts_with("drink_category:\n  -\n    category_name: category_name_0"));
}

#[test]
fn test_sample_counter_restarts_per_command() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);
    let command = Commands::Sample {
        query: Some("{ a }".to_string()),
        file: None,
        format: "json".to_string(),
    };
    assert_eq!(ctx.execute(&command).unwrap(), ctx.execute(&command).unwrap());
}

#[test]
fn test_sample_invalid_query() {
    let temp = TempDir::new().unwrap();
    let err = context(&temp)
        .execute(&Commands::Sample {
            query: Some("{ items[ }".to_string()),
            file: None,
            format: "json".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidQuery(_)));
}

#[test]
fn test_sample_rejects_deeply_nested_lists() {
    let temp = TempDir::new().unwrap();
    let depth = 40;
    let mut query = String::from("{ ");
    for i in 0..depth {
        query.push_str(&format!("level{}[] {{ ", i));
    }
    query.push_str("id ");
    query.push_str(&"} ".repeat(depth + 1));

    let err = context(&temp)
        .execute(&Commands::Sample {
            query: Some(query),
            file: None,
            format: "json".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidQuery(_)));
    assert!(err.to_string().contains("sample values"));
}

#[test]
fn test_sample_requires_query_source() {
    let temp = TempDir::new().unwrap();
    let err = context(&temp)
        .execute(&Commands::Sample {
            query: None,
            file: None,
            format: "json".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_resume_command() {
    let temp = TempDir::new().unwrap();
    let output = context(&temp)
        .execute(&Commands::Resume {
            payload: fixture_path("callback_success.json"),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["request_id"], "3f1c9a52-req");
}

#[test]
fn test_resume_relative_path_resolves_against_workspace() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("payload.json"),
        r#"{ "data": {"x": 1}, "metadata": { "request_id": "r" } }"#,
    )
    .unwrap();
    let output = context(&temp)
        .execute(&Commands::Resume {
            payload: "payload.json".into(),
        })
        .unwrap();
    assert!(output.contains("\"request_id\": \"r\""));
}

#[test]
fn test_definition_command() {
    let temp = TempDir::new().unwrap();
    let ctx = context(&temp);
    let json = ctx
        .execute(&Commands::Definition {
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["creates"][0]["noun"], "Query");

    let err = ctx
        .execute(&Commands::Definition {
            format: "yaml".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_query_rejects_unknown_mode() {
    let temp = TempDir::new().unwrap();
    let err = context(&temp)
        .execute(&Commands::Query {
            url: "https://example.com".to_string(),
            query: "{ title }".to_string(),
            webhook_url: "https://hooks.example/cb".to_string(),
            mode: "turbo".to_string(),
            screenshot: false,
            stealth: false,
        })
        .unwrap_err();
    assert!(err.to_string().contains("Unknown extraction mode"));
}

#[test]
fn test_auth_test_fails_offline() {
    let temp = TempDir::new().unwrap();
    let result = context(&temp).execute(&Commands::Auth {
        command: AuthCommands::Test,
    });
    // Either no key is configured or the offline host refuses the connection
    assert!(result.is_err());
}

#[test]
fn test_invalid_config_rejected() {
    let temp = TempDir::new().unwrap();
    let mut config = offline_config();
    config.api.host_url = "not-a-url".to_string();
    let err = RunContext::with_config(temp.path().to_path_buf(), config)
        .err()
        .unwrap();
    assert!(err.to_string().contains("Configuration validation failed"));
}
