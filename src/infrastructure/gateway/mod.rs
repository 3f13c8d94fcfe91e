//! HTTP gateway to the remote catalog service
//!
//! One round trip per operation, no retries. Every failure is swallowed
//! and logged: the remote side is a best-effort mirror, never a reason to
//! block a local mutation.

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::entities::Product;
use crate::domain::traits::{RemoteAck, RemoteCatalog};

pub struct HttpCatalogGateway {
    client: Client,
    base_url: String,
}

impl HttpCatalogGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn product_url(&self, id: u64) -> String {
        format!("{}/products/{}", self.base_url, id)
    }

    fn ack(op: &str, id: u64, result: Result<reqwest::Response, reqwest::Error>) -> RemoteAck {
        match result {
            Ok(response) if response.status().is_success() => RemoteAck::Confirmed,
            Ok(response) => {
                tracing::warn!("remote {} of {} answered {}", op, id, response.status());
                RemoteAck::Unconfirmed
            }
            Err(e) => {
                tracing::warn!("remote {} of {} failed: {}", op, id, e);
                RemoteAck::Unconfirmed
            }
        }
    }
}

#[async_trait]
impl RemoteCatalog for HttpCatalogGateway {
    async fn create(&self, product: &Product) -> RemoteAck {
        let result = self
            .client
            .post(self.products_url())
            .json(product)
            .send()
            .await;
        Self::ack("create", product.id, result)
    }

    async fn fetch_all(&self) -> Vec<Product> {
        let response = match self.client.get(self.products_url()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("remote fetch failed: {}", e);
                return Vec::new();
            }
        };
        if !response.status().is_success() {
            tracing::warn!("remote fetch answered {}", response.status());
            return Vec::new();
        }
        match response.json().await {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!("remote catalog did not parse: {}", e);
                Vec::new()
            }
        }
    }

    /// A non-2xx answer is a hard fetch failure here, unlike the write verbs
    async fn fetch_one(&self, id: u64) -> Option<Product> {
        let response = match self.client.get(self.product_url(id)).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("remote fetch of {} failed: {}", id, e);
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::warn!("remote fetch of {} answered {}", id, response.status());
            return None;
        }
        match response.json().await {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!("remote product {} did not parse: {}", id, e);
                None
            }
        }
    }

    async fn update(&self, id: u64, product: &Product) -> RemoteAck {
        let result = self
            .client
            .put(self.product_url(id))
            .json(product)
            .send()
            .await;
        Self::ack("update", id, result)
    }

    async fn remove(&self, id: u64) -> RemoteAck {
        let result = self.client.delete(self.product_url(id)).send().await;
        Self::ack("delete", id, result)
    }
}
