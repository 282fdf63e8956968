//! Integration tests for loading the environment and handing it to its consumers

use coffeeshop_env::api::{ApiClient, ClientBuilder};
use coffeeshop_env::{
    environment, parse_callback_fragment, BuildProfile, ConfigLoader, ConfigurationError,
    EnvironmentConfig,
};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_compiled_environment_is_complete() {
    let env = environment();

    assert_eq!(env.profile(), BuildProfile::current());
    assert!(env.validate().is_ok());
    assert!(env.audience_matches_api());
    assert_eq!(env, &EnvironmentConfig::for_profile(BuildProfile::current()));
}

#[test]
fn test_saved_configuration_reloads_field_for_field() {
    let mut env = EnvironmentConfig::production();
    env.api_server_url = "https://api.coffee.example.com".to_string();
    env.auth0.audience = "https://api.coffee.example.com".to_string();
    env.auth0.callback_url = "https://app.coffee.example.com".to_string();

    let toml_file = temp_file(".toml", &env.to_toml().unwrap());
    let loaded = <EnvironmentConfig as ConfigLoader<_>>::load_from_file(toml_file.path()).unwrap();
    assert_eq!(loaded, env);

    let json_file = temp_file(".json", &env.to_json().unwrap());
    let loaded = EnvironmentConfig::load(Some(json_file.path())).unwrap();
    assert_eq!(loaded, env);
}

#[test]
fn test_invalid_file_is_reported() {
    let file = temp_file(".json", r#"{"apiServerUrl": "#);
    let result = EnvironmentConfig::load(Some(file.path()));
    assert!(matches!(result, Err(ConfigurationError::ParseError { .. })));
}

#[test]
fn test_login_round_trip_through_callback() {
    let env = EnvironmentConfig::development();
    let link = env
        .auth0
        .login_link()
        .callback_path("/tabs/user-page")
        .state("nonce-1")
        .build()
        .unwrap();
    assert!(link.as_str().starts_with("https://dev-11opmcqr.eu.auth0.com/authorize?"));

    let redirect = format!(
        "{}/tabs/user-page#access_token=abc.def.ghi&token_type=Bearer&expires_in=86400&state=nonce-1",
        env.auth0.callback_url
    );
    let token = parse_callback_fragment(&redirect).unwrap();
    assert_eq!(token.access_token, "abc.def.ghi");
    assert_eq!(token.state.as_deref(), Some("nonce-1"));
}

#[tokio::test]
async fn test_client_targets_configured_api_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/drinks-detail"))
        .and(header("Authorization", "Bearer abc.def.ghi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "drinks": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut env = EnvironmentConfig::development();
    env.api_server_url = mock_server.uri();
    env.auth0.audience = mock_server.uri();
    assert!(env.validate().is_ok());

    let client: ApiClient = ClientBuilder::from_environment(&env)
        .bearer_token("abc.def.ghi")
        .build()
        .unwrap();

    let drinks = client.get_drinks_detail().await.unwrap();
    assert!(drinks.is_empty());
}
