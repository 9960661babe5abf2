use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::Deserialize;

use crate::core::catalog::product::Product;

/// Demo API that serves the initial catalog.
pub const DEFAULT_ENDPOINT: &str = "https://fakestoreapi.com/products";

/// A product as the remote endpoint serves it: no like flag, and whatever
/// extra fields the payload carries (ratings etc.) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteProduct {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
}

impl RemoteProduct {
    /// Bring a remote item into the catalog, tagged not-liked.
    pub(super) fn into_product(self) -> Product {
        Product {
            id: self.id,
            title: self.title,
            description: self.description,
            price: self.price,
            image: self.image,
            category: self.category,
            is_liked: false,
            _guard: (),
        }
    }
}

/// Where seed data comes from when the durable slot is empty.
pub trait SeedSource {
    fn fetch(&self) -> impl Future<Output = anyhow::Result<Vec<RemoteProduct>>>;
}

/// HTTP seed source: one GET, one JSON array. No auth, no pagination, no
/// retries. Requests are capped at 30 seconds.
#[derive(Debug, Clone)]
pub struct HttpSeed {
    client: Client,
    endpoint: String,
}

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

impl HttpSeed {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpSeed {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl SeedSource for HttpSeed {
    async fn fetch(&self) -> anyhow::Result<Vec<RemoteProduct>> {
        let response = self
            .client
            .get(&self.endpoint)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("Failed to reach catalog endpoint {}", self.endpoint))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Catalog endpoint {} returned status {}",
                self.endpoint,
                response.status()
            );
        }

        let products = response
            .json::<Vec<RemoteProduct>>()
            .await
            .with_context(|| format!("Malformed catalog payload from {}", self.endpoint))?;
        Ok(products)
    }
}
