//! Client for the C4 backend API.
//!
//! The backend serves one JSON payload per view at
//! `{base_url}/{landscapes|contexts|containers|components}/{id}` and the list
//! of views at `{base_url}/views`. Successful view payloads can be cached in
//! memory; an entry older than the configured time-to-live is fetched again.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use log::{debug, info, warn};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use c4view_core::model::{View, ViewCatalog, ViewKind};

use crate::{C4ViewError, config::BackendConfig};

/// In-memory cache of view payloads keyed by kind and id.
///
/// Only successful responses are stored; failures are always retried on the
/// next request. Entries expire `ttl` after they were stored and are dropped
/// on the next lookup.
#[derive(Debug)]
pub struct QueryCache {
    ttl: Duration,
    views: RwLock<HashMap<(ViewKind, String), CachedView>>,
}

#[derive(Debug)]
struct CachedView {
    stored_at: Instant,
    view: View,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            views: RwLock::default(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached view, or `None` if it is missing or expired.
    pub async fn get(&self, kind: ViewKind, id: &str) -> Option<View> {
        let key = (kind, id.to_string());
        {
            let views = self.views.read().await;
            match views.get(&key) {
                Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                    return Some(entry.view.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Re-check under the write lock; another request may have refreshed it.
        let mut views = self.views.write().await;
        if views
            .get(&key)
            .is_some_and(|entry| entry.stored_at.elapsed() >= self.ttl)
        {
            debug!(kind:% = kind, id; "Dropping expired view");
            views.remove(&key);
        }
        None
    }

    pub async fn insert(&self, kind: ViewKind, id: &str, view: View) {
        self.views.write().await.insert(
            (kind, id.to_string()),
            CachedView {
                stored_at: Instant::now(),
                view,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.views.read().await.len()
    }

    pub async fn clear(&self) {
        self.views.write().await.clear();
    }
}

/// HTTP client for the backend.
#[derive(Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    cache: Option<QueryCache>,
}

impl BackendClient {
    /// Creates a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`C4ViewError::Config`] if the base URL is not a valid absolute
    /// URL, or [`C4ViewError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &BackendConfig) -> Result<Self, C4ViewError> {
        let base_url = config.base_url().to_string();
        parse_base_url(&base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| C4ViewError::new_http_error(&base_url, err))?;

        Ok(Self {
            http,
            base_url,
            cache: config
                .cache_enabled()
                .then(|| QueryCache::new(config.cache_ttl())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> Option<&QueryCache> {
        self.cache.as_ref()
    }

    /// URL of a view payload, with the id percent-encoded as a path segment.
    pub fn view_url(&self, kind: ViewKind, id: &str) -> Result<Url, C4ViewError> {
        self.endpoint(&[kind.api_segment(), id])
    }

    pub fn catalog_url(&self) -> Result<Url, C4ViewError> {
        self.endpoint(&["views"])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, C4ViewError> {
        let mut url = parse_base_url(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| {
                C4ViewError::Config(format!("backend URL `{}` cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fetches one view, from the cache when possible.
    ///
    /// # Errors
    ///
    /// Returns [`C4ViewError::Http`] on transport failures,
    /// [`C4ViewError::Status`] on non-success responses and
    /// [`C4ViewError::Decode`] if the payload is not a valid view.
    pub async fn fetch_view(&self, kind: ViewKind, id: &str) -> Result<View, C4ViewError> {
        if let Some(cache) = &self.cache {
            if let Some(view) = cache.get(kind, id).await {
                debug!(kind:% = kind, id; "View served from cache");
                return Ok(view);
            }
        }

        let url = self.view_url(kind, id)?;
        info!(kind:% = kind, id, url:% = url; "Fetching view");
        let view: View = self.get_json(url).await?;

        let dangling = view.dangling_relationships();
        if !dangling.is_empty() {
            warn!(kind:% = kind, id, dangling:? = dangling; "View has relationships to elements outside the view");
        }

        if let Some(cache) = &self.cache {
            cache.insert(kind, id, view.clone()).await;
        }
        Ok(view)
    }

    /// Fetches the list of views.
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::fetch_view`].
    pub async fn fetch_catalog(&self) -> Result<ViewCatalog, C4ViewError> {
        let url = self.catalog_url()?;
        info!(url:% = url; "Fetching view catalog");
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, C4ViewError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|err| C4ViewError::new_http_error(url.as_str(), err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(C4ViewError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| C4ViewError::new_http_error(url.as_str(), err))?;
        debug!(url:% = url, body_len = body.len(); "Response received");

        Ok(serde_json::from_slice(&body)?)
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, C4ViewError> {
    Url::parse(base_url)
        .map_err(|err| C4ViewError::Config(format!("invalid backend URL `{base_url}`: {err}")))
}
