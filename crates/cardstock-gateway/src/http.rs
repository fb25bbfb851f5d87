//! reqwest-backed [`Gateway`] implementation.

use crate::decode;
use crate::{CardsFetch, CardsQuery, Gateway, GatewayError, GatewayResult};
use async_trait::async_trait;
use cardstock_model::{Card, CardId, Deck, DeckId};
use serde_json::Value;
use std::time::Duration;

/// Connection settings for the REST backend.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL the endpoint paths are joined to.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3030".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP gateway speaking to the flashcard REST backend.
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    /// Build a gateway from connection settings.
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Issue a GET and return the status plus the body parsed as JSON.
    ///
    /// Non-JSON bodies (error pages, empty 404 bodies) come back as `Null`;
    /// the per-endpoint decoders decide whether that matters.
    async fn get_json(&self, endpoint: &str) -> GatewayResult<(u16, Value)> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Ok((status, body))
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn deck(&self, id: DeckId) -> GatewayResult<Option<Deck>> {
        let endpoint = format!("/decks/{id}");
        let (status, body) = self.get_json(&endpoint).await?;
        decode::decode_deck(&endpoint, status, body)
    }

    async fn root_deck(&self) -> GatewayResult<DeckId> {
        let endpoint = "/decks/root";
        let (status, body) = self.get_json(endpoint).await?;
        decode::decode_root(endpoint, status, body)
    }

    async fn ancestors(&self, id: DeckId) -> GatewayResult<Vec<Deck>> {
        let endpoint = format!("/decks/{id}/ancestors");
        let (status, body) = self.get_json(&endpoint).await?;
        decode::decode_ancestors(&endpoint, status, body)
    }

    async fn card_count(&self, deck: DeckId, page: u64) -> GatewayResult<u64> {
        let endpoint = format!("/decks/{deck}/cards/count?page={page}");
        let (status, body) = self.get_json(&endpoint).await?;
        Ok(decode::decode_count(status, body))
    }

    async fn cards(&self, deck: DeckId, query: &CardsQuery) -> GatewayResult<CardsFetch> {
        let mut endpoint = format!(
            "/decks/{deck}/cards?page={}&per_page={}",
            query.page, query.per_page
        );
        if let Some(sort) = query.sort {
            endpoint.push_str("&sort=");
            endpoint.push_str(sort.as_str());
        }
        if let Some(order) = query.order {
            endpoint.push_str("&order=");
            endpoint.push_str(order.as_str());
        }
        let (status, body) = self.get_json(&endpoint).await?;
        decode::decode_cards(&endpoint, status, body)
    }

    async fn card(&self, id: CardId) -> GatewayResult<Option<Card>> {
        let endpoint = format!("/cards/{id}");
        let (status, body) = self.get_json(&endpoint).await?;
        decode::decode_card(&endpoint, status, body)
    }
}
