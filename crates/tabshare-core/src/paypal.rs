//! PayPal settlement client
//!
//! Thin client over the PayPal Orders v2 API for settling member
//! amounts. The client is a plain value constructed once at startup and
//! injected wherever it is needed. The OAuth access token is cached with
//! its expiry behind a `tokio::sync::Mutex`, so concurrent handlers
//! refresh it at most once.
//!
//! # Configuration
//!
//! Environment variables:
//! - `PAYPAL_CLIENT_ID` (required)
//! - `PAYPAL_CLIENT_SECRET` (required)
//! - `PAYPAL_BASE_URL` (default: sandbox)

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

const SANDBOX_BASE_URL: &str = "https://api-m.sandbox.paypal.com";

/// Refresh the token this long before PayPal says it expires.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// A created order awaiting payer approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreated {
    pub id: String,
    pub status: String,
    /// Link the payer opens to approve the payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approve_url: Option<String>,
}

/// A captured (settled) order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCaptured {
    pub id: String,
    pub status: String,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// PayPal Orders v2 client with a mutex-guarded token cache.
pub struct PayPalClient {
    http_client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<CachedToken>>,
}

impl PayPalClient {
    /// Create a client against an explicit API base URL.
    pub fn new(base_url: &str, client_id: &str, client_secret: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            token: Mutex::new(None),
        }
    }

    /// Create from environment variables, sandbox by default.
    ///
    /// Returns None when credentials are not configured; callers treat
    /// that as "payments disabled", not an error.
    pub fn from_env() -> Option<Self> {
        let client_id = std::env::var("PAYPAL_CLIENT_ID").ok()?;
        let client_secret = std::env::var("PAYPAL_CLIENT_SECRET").ok()?;
        let base_url =
            std::env::var("PAYPAL_BASE_URL").unwrap_or_else(|_| SANDBOX_BASE_URL.to_string());
        Some(Self::new(&base_url, &client_id, &client_secret))
    }

    /// API base URL (for logging).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get a valid access token, refreshing through the cache if needed.
    ///
    /// The mutex is held across the refresh request so overlapping
    /// handlers do not stampede the token endpoint.
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.access_token.clone());
            }
            debug!("cached PayPal token expired, refreshing");
        }

        let response = self
            .http_client
            .post(format!("{}/v1/oauth2/token", self.base_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Payment(format!(
                "PayPal token request failed {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response.json().await?;
        let expires_at = Instant::now()
            + Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at,
        });

        Ok(access_token)
    }

    /// Create an order for the given amount.
    pub async fn create_order(&self, value: &str, currency: &str) -> Result<OrderCreated> {
        let token = self.access_token().await?;

        let request = CreateOrderRequest {
            intent: "CAPTURE",
            purchase_units: vec![PurchaseUnit {
                amount: Amount {
                    currency_code: currency.to_string(),
                    value: value.to_string(),
                },
            }],
        };

        let response = self
            .http_client
            .post(format!("{}/v2/checkout/orders", self.base_url))
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "PayPal order creation failed");
            return Err(Error::Payment(format!(
                "PayPal order creation failed {}: {}",
                status, body
            )));
        }

        let order: OrderResponse = response.json().await?;
        info!(order_id = %order.id, status = %order.status, "PayPal order created");

        Ok(OrderCreated {
            approve_url: order.approve_link(),
            id: order.id,
            status: order.status,
        })
    }

    /// Capture a previously approved order.
    pub async fn capture_order(&self, order_id: &str) -> Result<OrderCaptured> {
        let token = self.access_token().await?;

        let response = self
            .http_client
            .post(format!(
                "{}/v2/checkout/orders/{}/capture",
                self.base_url, order_id
            ))
            .bearer_auth(&token)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(order_id = order_id, status = %status, "PayPal capture failed");
            return Err(Error::Payment(format!(
                "PayPal capture failed {}: {}",
                status, body
            )));
        }

        let order: OrderResponse = response.json().await?;
        info!(order_id = %order.id, status = %order.status, "PayPal order captured");

        Ok(OrderCaptured {
            id: order.id,
            status: order.status,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Serialize)]
struct CreateOrderRequest {
    intent: &'static str,
    purchase_units: Vec<PurchaseUnit>,
}

#[derive(Debug, Serialize)]
struct PurchaseUnit {
    amount: Amount,
}

#[derive(Debug, Serialize)]
struct Amount {
    currency_code: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    status: String,
    #[serde(default)]
    links: Vec<Link>,
}

impl OrderResponse {
    fn approve_link(&self) -> Option<String> {
        self.links
            .iter()
            .find(|l| l.rel == "approve")
            .map(|l| l.href.clone())
    }
}

#[derive(Debug, Deserialize)]
struct Link {
    href: String,
    rel: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_order_request_matches_api_shape() {
        let request = CreateOrderRequest {
            intent: "CAPTURE",
            purchase_units: vec![PurchaseUnit {
                amount: Amount {
                    currency_code: "USD".to_string(),
                    value: "12.69".to_string(),
                },
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["intent"], "CAPTURE");
        assert_eq!(json["purchase_units"][0]["amount"]["currency_code"], "USD");
        assert_eq!(json["purchase_units"][0]["amount"]["value"], "12.69");
    }

    #[test]
    fn approve_link_is_extracted_from_links() {
        let order: OrderResponse = serde_json::from_str(
            r#"{
                "id": "5O190127TN364715T",
                "status": "CREATED",
                "links": [
                    {"href": "https://api-m.sandbox.paypal.com/v2/checkout/orders/5O190127TN364715T", "rel": "self"},
                    {"href": "https://www.sandbox.paypal.com/checkoutnow?token=5O190127TN364715T", "rel": "approve"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            order.approve_link().as_deref(),
            Some("https://www.sandbox.paypal.com/checkoutnow?token=5O190127TN364715T")
        );
    }

    #[test]
    fn capture_response_without_links_parses() {
        let order: OrderResponse =
            serde_json::from_str(r#"{"id": "5O1", "status": "COMPLETED"}"#).unwrap();
        assert!(order.approve_link().is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = PayPalClient::new("https://api-m.sandbox.paypal.com/", "id", "secret");
        assert_eq!(client.base_url(), "https://api-m.sandbox.paypal.com");
    }
}
