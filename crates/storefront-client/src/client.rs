//! HTTP client for the storefront REST API.
//!
//! Wraps `reqwest` with typed request/response bodies and maps non-2xx
//! answers to [`ClientError::Rejected`], keeping the server's `"message"`
//! field when the body carries one. Nothing here retries; every failure is
//! returned to the caller.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use storefront_core::{
    AppConfig, CheckoutReceipt, Order, OrderRequest, OrderStatus, Product, StatusUpdate,
};

use crate::error::ClientError;

/// Client for the storefront API.
///
/// Cheap to clone: clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: Client,
    base_url: Url,
}

impl StorefrontClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// `timeout` bounds each whole request; `None` lets requests wait
    /// indefinitely.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "expected an absolute http(s) URL".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Creates a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout,
            &config.user_agent,
        )
    }

    /// Fetches the full product catalog (`GET /api/products`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Rejected`] on a non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not an array of products.
    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let url = self.endpoint(&["api", "products"])?;
        let products: Vec<Product> =
            Self::send_json(self.client.get(url), "list products").await?;
        tracing::debug!(count = products.len(), "fetched product catalog");
        Ok(products)
    }

    /// Fetches every order (`GET /api/orders/all`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Rejected`] on a non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not an array of orders.
    pub async fn list_orders(&self) -> Result<Vec<Order>, ClientError> {
        let url = self.endpoint(&["api", "orders", "all"])?;
        let orders: Vec<Order> = Self::send_json(self.client.get(url), "list orders").await?;
        tracing::debug!(count = orders.len(), "fetched order list");
        Ok(orders)
    }

    /// Submits an order (`POST /api/orders/checkout`) and returns the new
    /// order's id.
    ///
    /// No idempotency key is sent: submitting the same request twice creates
    /// two orders.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Rejected`] when the server refuses the order; its
    ///   `message` holds the server's explanation when provided.
    /// - [`ClientError::Deserialize`] if a 2xx body lacks `orderId`.
    pub async fn checkout(&self, order: &OrderRequest) -> Result<String, ClientError> {
        let url = self.endpoint(&["api", "orders", "checkout"])?;
        let receipt: CheckoutReceipt =
            Self::send_json(self.client.post(url).json(order), "checkout").await?;
        tracing::info!(order_id = %receipt.order_id, items = order.items.len(), "order placed");
        Ok(receipt.order_id)
    }

    /// Requests a status change (`PUT /api/orders/{id}/status`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Rejected`] on a non-2xx status.
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "orders", order_id, "status"])?;
        let request = self.client.put(url).json(&StatusUpdate { status });
        let response = request.send().await?;
        let http_status = response.status();
        if !http_status.is_success() {
            let url = response.url().to_string();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Rejected {
                status: http_status.as_u16(),
                url,
                message: error_message(&body),
            });
        }
        tracing::info!(order_id, %status, "order status updated");
        Ok(())
    }

    /// Builds an endpoint URL under the base URL, percent-encoding each
    /// path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request, maps non-2xx statuses to [`ClientError::Rejected`],
    /// and parses the body as `T`.
    async fn send_json<T: DeserializeOwned>(
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                url,
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Extracts the `"message"` field from a JSON error body, if any.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}
