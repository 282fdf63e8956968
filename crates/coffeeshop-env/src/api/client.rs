//! HTTP client for the coffee shop drinks API
//!
//! Public routes (`GET /drinks`) work without credentials. Every other
//! route needs an Auth0 access token, sent as `Authorization: Bearer {token}`.

use super::endpoints::ApiEndpoints;
use super::error::{ApiError, Result};
use super::types::{
    id_to_string, DeletedResponse, Drink, DrinkPatch, DrinkResponse, DrinksResponse, ErrorBody,
    NewDrink,
};
use crate::environment::EnvironmentConfig;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default timeout in seconds for API requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the drinks API rooted at `apiServerUrl`
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    endpoints: ApiEndpoints,
    bearer_token: Option<String>,
}

impl ApiClient {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    /// Replace the access token used for protected routes
    pub fn set_bearer_token(&mut self, token: Option<String>) {
        self.bearer_token = token;
    }

    /// `GET /drinks`: all drinks with the short recipe
    pub async fn get_drinks(&self) -> Result<Vec<Drink>> {
        let url = self.endpoints.drinks()?;
        let request = self.apply_auth(self.http_client.get(url.clone()));
        let body: DrinksResponse = self.send(request, &url).await?;
        ensure_success(body.success, "GET /drinks")?;
        Ok(body.drinks)
    }

    /// `GET /drinks-detail`: all drinks with the detailed recipe
    pub async fn get_drinks_detail(&self) -> Result<Vec<Drink>> {
        let url = self.endpoints.drinks_detail()?;
        let request = self.require_auth(self.http_client.get(url.clone()))?;
        let body: DrinksResponse = self.send(request, &url).await?;
        ensure_success(body.success, "GET /drinks-detail")?;
        Ok(body.drinks)
    }

    /// `POST /drinks`
    pub async fn create_drink(&self, drink: &NewDrink) -> Result<Drink> {
        let url = self.endpoints.drinks()?;
        let request = self.require_auth(self.http_client.post(url.clone()).json(drink))?;
        let body: DrinkResponse = self.send(request, &url).await?;
        ensure_success(body.success, "POST /drinks")?;
        body.drink.ok_or_else(|| ApiError::Unsuccessful {
            message: "POST /drinks returned no drink".into(),
        })
    }

    /// `PATCH /drinks/{id}`
    pub async fn update_drink(&self, id: i64, patch: &DrinkPatch) -> Result<Drink> {
        let url = self.endpoints.drink(id)?;
        let request = self.require_auth(self.http_client.patch(url.clone()).json(patch))?;
        let body: DrinksResponse = self.send(request, &url).await?;
        ensure_success(body.success, &format!("PATCH /drinks/{id}"))?;
        body.drinks
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Unsuccessful {
                message: format!("PATCH /drinks/{id} returned no drink"),
            })
    }

    /// `DELETE /drinks/{id}`, returning the id the server reports as deleted
    pub async fn delete_drink(&self, id: i64) -> Result<String> {
        let url = self.endpoints.drink(id)?;
        let request = self.require_auth(self.http_client.delete(url.clone()))?;
        let body: DeletedResponse = self.send(request, &url).await?;
        ensure_success(body.success, &format!("DELETE /drinks/{id}"))?;
        body.drink
            .as_ref()
            .map(id_to_string)
            .ok_or_else(|| ApiError::Unsuccessful {
                message: format!("DELETE /drinks/{id} returned no drink id"),
            })
    }

    // ===== Private Helper Methods =====

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn require_auth(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        match &self.bearer_token {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Err(ApiError::MissingAuthentication {
                message: "this route requires an Auth0 access token".into(),
            }),
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, url: &Url) -> Result<T> {
        debug!("Sending request to {}", url);
        let response = request.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&text)?);
        }

        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.describe())
            .unwrap_or_else(|| {
                if text.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    text
                }
            });

        warn!(%status, "API request failed: {}", message);
        Err(ApiError::Http { status, message })
    }
}

fn ensure_success(success: bool, route: &str) -> Result<()> {
    if success {
        Ok(())
    } else {
        Err(ApiError::Unsuccessful {
            message: format!("{route} responded with success=false"),
        })
    }
}

/// Builder for constructing an [`ApiClient`]
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    bearer_token: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the `apiServerUrl` of an environment
    pub fn from_environment(env: &EnvironmentConfig) -> Self {
        Self::default().base_url(env.api_server_url.clone())
    }

    /// Set the base URL for the API
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the Auth0 access token sent to protected routes
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let base_url = self.base_url.ok_or_else(|| ApiError::InvalidRequest {
            message: "base_url is required".into(),
        })?;
        let endpoints = ApiEndpoints::new(&base_url)?;

        let mut client_builder = reqwest::Client::builder().timeout(
            self.timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        );

        if let Some(timeout) = self.connect_timeout {
            client_builder = client_builder.connect_timeout(timeout);
        }

        let http_client = client_builder.build()?;

        Ok(ApiClient {
            http_client,
            endpoints,
            bearer_token: self.bearer_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::RecipePart;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, token: Option<&str>) -> ApiClient {
        let mut builder = ClientBuilder::new().base_url(server.uri());
        if let Some(token) = token {
            builder = builder.bearer_token(token);
        }
        builder.build().unwrap()
    }

    #[tokio::test]
    async fn test_get_drinks_without_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/drinks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "drinks": [
                    {"id": 1, "title": "water", "recipe": [{"color": "blue", "parts": 1}]}
                ]
            })))
            .mount(&mock_server)
            .await;

        let drinks = client_for(&mock_server, None).get_drinks().await.unwrap();
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].title, "water");
    }

    #[tokio::test]
    async fn test_drinks_detail_sends_bearer_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/drinks-detail"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "drinks": [{
                    "id": 1,
                    "title": "water",
                    "recipe": [{"name": "water", "color": "blue", "parts": 1}]
                }]
            })))
            .mount(&mock_server)
            .await;

        let drinks = client_for(&mock_server, Some("test-token"))
            .get_drinks_detail()
            .await
            .unwrap();
        assert_eq!(drinks[0].recipe[0].name.as_deref(), Some("water"));
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let mock_server = MockServer::start().await;
        let result = client_for(&mock_server, None).get_drinks_detail().await;
        assert!(matches!(
            result,
            Err(ApiError::MissingAuthentication { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_drink() {
        let mock_server = MockServer::start().await;
        let new_drink = NewDrink {
            title: "latte".to_string(),
            recipe: vec![RecipePart {
                name: Some("milk".to_string()),
                color: "white".to_string(),
                parts: 3,
            }],
        };

        Mock::given(method("POST"))
            .and(path("/drinks"))
            .and(header("Authorization", "Bearer test-token"))
            .and(body_json(json!({
                "title": "latte",
                "recipe": [{"name": "milk", "color": "white", "parts": 3}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "drink": {
                    "id": 5,
                    "title": "latte",
                    "recipe": [{"name": "milk", "color": "white", "parts": 3}]
                }
            })))
            .mount(&mock_server)
            .await;

        let drink = client_for(&mock_server, Some("test-token"))
            .create_drink(&new_drink)
            .await
            .unwrap();
        assert_eq!(drink.id, 5);
    }

    #[tokio::test]
    async fn test_update_and_delete_drink() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/drinks/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "drinks": [{"id": 5, "title": "flat white", "recipe": []}]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/drinks/5"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "drink": "5"})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Some("test-token"));
        let patch = DrinkPatch {
            title: Some("flat white".to_string()),
            recipe: None,
        };
        let drink = client.update_drink(5, &patch).await.unwrap();
        assert_eq!(drink.title, "flat white");

        let deleted = client.delete_drink(5).await.unwrap();
        assert_eq!(deleted, "5");
    }

    #[tokio::test]
    async fn test_error_body_is_surfaced() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/drinks/9"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "error": "Drink cannot be deleted (#9 not found)"
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/drinks-detail"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "success": false,
                "error": 401,
                "message": "Token expired."
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Some("test-token"));

        let err = client.delete_drink(9).await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
        assert!(err.to_string().contains("#9 not found"));

        match client.get_drinks_detail().await.unwrap_err() {
            ApiError::Http { status, message } => {
                assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
                assert_eq!(message, "Token expired.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unsuccessful_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/drinks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server, None).get_drinks().await;
        assert!(matches!(result, Err(ApiError::Unsuccessful { .. })));
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = ClientBuilder::default().build();
        assert!(matches!(result, Err(ApiError::InvalidRequest { .. })));
    }

    #[test]
    fn test_builder_from_environment() {
        let client = ClientBuilder::from_environment(&EnvironmentConfig::development())
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap();

        assert_eq!(
            client.endpoints().drinks().unwrap().as_str(),
            "http://127.0.0.1:5000/drinks"
        );
    }

    #[tokio::test]
    async fn test_failed_create_and_delete_report_unsuccessful() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/drinks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": "An error occurred during drink data insertion"
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/drinks/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": "An error occurred during drink data deletion"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Some("test-token"));
        let new_drink = NewDrink {
            title: "mocha".to_string(),
            recipe: vec![],
        };

        let result = client.create_drink(&new_drink).await;
        assert!(matches!(result, Err(ApiError::Unsuccessful { .. })));

        let result = client.delete_drink(3).await;
        assert!(matches!(result, Err(ApiError::Unsuccessful { .. })));
    }

    #[tokio::test]
    async fn test_successful_create_without_drink_is_unsuccessful() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/drinks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&mock_server)
            .await;

        let new_drink = NewDrink {
            title: "mocha".to_string(),
            recipe: vec![],
        };
        let result = client_for(&mock_server, Some("test-token"))
            .create_drink(&new_drink)
            .await;
        assert!(matches!(result, Err(ApiError::Unsuccessful { .. })));
    }
}
