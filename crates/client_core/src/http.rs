use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Category, Decision, Event},
    error::ApiException,
    protocol::{CategoriesResponse, FeedResponse, SwipeAck, SwipeHistoryResponse, SwipeRecord},
};
use tracing::debug;
use url::Url;

use crate::{
    config::{normalize_server_url, ClientSettings},
    CategoryResolver, DecisionSink, FeedProvider,
};

const FEED_PATH: &str = "participants/feed/";
const SWIPES_PATH: &str = "participants/swipes/";
const SWIPE_HISTORY_PATH: &str = "participants/swipes/history/";
const CATEGORIES_PATH: &str = "public/categories/";

/// reqwest client for the events API. Implements every collaborator trait the
/// feed controller needs.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    base_url: Url,
    access_token: Option<String>,
}

impl HttpBackend {
    pub fn new(server_url: &str) -> Result<Self> {
        Ok(Self {
            http: Client::new(),
            base_url: parse_base_url(server_url)?,
            access_token: None,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            base_url: parse_base_url(&settings.server_url)?,
            access_token: settings.access_token.clone(),
        })
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("invalid endpoint path '{path}'"))?;
        let builder = self.http.request(method, url);
        Ok(match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    pub async fn swipe_history(&self) -> Result<Vec<SwipeRecord>> {
        let response = self
            .request(Method::GET, SWIPE_HISTORY_PATH)?
            .send()
            .await
            .context("failed to fetch swipe history")?;
        let body: SwipeHistoryResponse = read_json(response).await?;
        Ok(body.swipes)
    }
}

fn parse_base_url(server_url: &str) -> Result<Url> {
    let normalized = normalize_server_url(server_url);
    Url::parse(&normalized).with_context(|| format!("invalid server url '{server_url}'"))
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiException::from_response_body(status.as_u16(), &body).into())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    ensure_success(response)
        .await?
        .json::<T>()
        .await
        .context("failed to decode response body")
}

#[async_trait]
impl FeedProvider for HttpBackend {
    async fn fetch_feed(&self) -> Result<Vec<Event>> {
        let response = self
            .request(Method::GET, FEED_PATH)?
            .send()
            .await
            .context("failed to fetch feed")?;
        let body: FeedResponse = read_json(response).await?;
        debug!(count = body.events.len(), "http: feed fetched");
        Ok(body.events)
    }
}

#[async_trait]
impl DecisionSink for HttpBackend {
    async fn submit(&self, decision: Decision) -> Result<()> {
        let response = self
            .request(Method::POST, SWIPES_PATH)?
            .json(&decision)
            .send()
            .await
            .context("failed to submit swipe")?;
        // The acknowledgement body is informational only.
        let ack = ensure_success(response)
            .await?
            .json::<SwipeAck>()
            .await
            .unwrap_or_default();
        debug!(
            event_id = decision.event_id.0,
            liked = decision.liked,
            detail = %ack.detail,
            "http: swipe recorded"
        );
        Ok(())
    }
}

#[async_trait]
impl CategoryResolver for HttpBackend {
    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let response = self
            .request(Method::GET, CATEGORIES_PATH)?
            .send()
            .await
            .context("failed to fetch categories")?;
        let body: CategoriesResponse = read_json(response).await?;
        Ok(body.categories)
    }
}
