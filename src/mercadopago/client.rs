use failsafe::futures::CircuitBreaker as FuturesCircuitBreaker;
use failsafe::{backoff, failure_policy, Config, Error as FailsafeError, StateMachine};
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// All preferences are created in this currency; item prices arrive
/// without a currency and are assumed to be in it.
pub const CURRENCY_ID: &str = "ARS";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("provider rejected credentials: {0}")]
    Unauthorized(String),
    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("invalid response from provider: {0}")]
    InvalidResponse(String),
    #[error("circuit breaker open: {0}")]
    CircuitBreakerOpen(String),
}

/// One line of a preference request, as the provider expects it.
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceItem {
    pub title: String,
    pub quantity: u32,
    pub currency_id: String,
    pub unit_price: Decimal,
}

/// Body of POST /checkout/preferences.
#[derive(Debug, Clone, Serialize)]
pub struct PreferenceRequest {
    pub items: Vec<PreferenceItem>,
    pub external_reference: String,
    pub notification_url: String,
}

/// The fields of the provider's response this system depends on.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceResponse {
    pub id: String,
    pub init_point: String,
}

/// HTTP client for the MercadoPago checkout-preferences API
#[derive(Clone)]
pub struct PreferenceClient {
    client: Client,
    base_url: String,
    access_token: String,
    circuit_breaker: StateMachine<failure_policy::ConsecutiveFailures<backoff::EqualJittered>, ()>,
}

impl PreferenceClient {
    /// Creates a new client against the given API base URL
    pub fn new(base_url: String, access_token: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        let backoff = backoff::equal_jittered(Duration::from_secs(60), Duration::from_secs(120));
        let policy = failure_policy::consecutive_failures(3, backoff);
        let circuit_breaker = Config::new().failure_policy(policy).build();

        PreferenceClient {
            client,
            base_url,
            access_token,
            circuit_breaker,
        }
    }

    /// Creates a payment preference and returns the provider-assigned id
    /// plus the checkout URL.
    ///
    /// A 401/403 is surfaced as `Unauthorized` so callers can distinguish a
    /// broken credential from a transient provider failure.
    pub async fn create_preference(
        &self,
        request: &PreferenceRequest,
    ) -> Result<PreferenceResponse, ProviderError> {
        let url = format!(
            "{}/checkout/preferences",
            self.base_url.trim_end_matches('/')
        );
        let client = self.client.clone();
        let token = self.access_token.clone();
        let body = request.clone();

        let result = self
            .circuit_breaker
            .call(async move {
                let response = client
                    .post(&url)
                    .bearer_auth(&token)
                    .json(&body)
                    .send()
                    .await?;

                let status = response.status();
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                    let message = response.text().await.unwrap_or_default();
                    return Err(ProviderError::Unauthorized(message));
                }
                if !status.is_success() {
                    let message = response.text().await.unwrap_or_default();
                    return Err(ProviderError::Api {
                        status: status.as_u16(),
                        message,
                    });
                }

                let preference = response
                    .json::<PreferenceResponse>()
                    .await
                    .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
                Ok(preference)
            })
            .await;

        match result {
            Ok(preference) => Ok(preference),
            Err(FailsafeError::Rejected) => Err(ProviderError::CircuitBreakerOpen(
                "MercadoPago circuit breaker is open".to_string(),
            )),
            Err(FailsafeError::Inner(e)) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soda_request() -> PreferenceRequest {
        PreferenceRequest {
            items: vec![PreferenceItem {
                title: "Soda".to_string(),
                quantity: 2,
                currency_id: CURRENCY_ID.to_string(),
                unit_price: Decimal::from(15),
            }],
            external_reference: "M1".to_string(),
            notification_url: "https://relay.example.com/payment-webhook".to_string(),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = PreferenceClient::new(
            "https://api.mercadopago.com".to_string(),
            "TEST-TOKEN".to_string(),
        );
        assert_eq!(client.base_url, "https://api.mercadopago.com");
    }

    #[tokio::test]
    async fn test_create_preference_success() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/checkout/preferences")
            .match_header("authorization", "Bearer TEST-TOKEN")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "id": "PREF123",
                    "init_point": "https://www.mercadopago.com/checkout/v1/redirect?pref_id=PREF123",
                    "collector_id": 123456
                }"#,
            )
            .create_async()
            .await;

        let client = PreferenceClient::new(server.url(), "TEST-TOKEN".to_string());
        let preference = client.create_preference(&soda_request()).await.unwrap();

        assert_eq!(preference.id, "PREF123");
        assert!(preference.init_point.contains("pref_id=PREF123"));
    }

    #[tokio::test]
    async fn test_create_preference_unauthorized() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/checkout/preferences")
            .with_status(401)
            .with_body(r#"{"message":"invalid access token"}"#)
            .create_async()
            .await;

        let client = PreferenceClient::new(server.url(), "EXPIRED-TOKEN".to_string());
        let result = client.create_preference(&soda_request()).await;

        assert!(matches!(result, Err(ProviderError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_create_preference_server_error() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/checkout/preferences")
            .with_status(502)
            .create_async()
            .await;

        let client = PreferenceClient::new(server.url(), "TEST-TOKEN".to_string());
        let result = client.create_preference(&soda_request()).await;

        assert!(matches!(
            result,
            Err(ProviderError::Api { status: 502, .. })
        ));
    }

    #[tokio::test]
    async fn test_create_preference_malformed_body() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/checkout/preferences")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"unexpected":"shape"}"#)
            .create_async()
            .await;

        let client = PreferenceClient::new(server.url(), "TEST-TOKEN".to_string());
        let result = client.create_preference(&soda_request()).await;

        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }

    #[test]
    fn test_unit_price_serializes_as_number() {
        let request = soda_request();
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["items"][0]["unit_price"].is_number());
        assert_eq!(json["items"][0]["currency_id"], "ARS");
    }
}
