//! Azure DevOps REST client
//!
//! Speaks the `_apis` surface of `dev.azure.com` (or an on-prem collection
//! URL) with `api-version=7.0`. Every request carries a timeout; transient
//! failures are retried with exponential backoff before being reported.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ProviderError;
use super::types::{ItemEntry, ListEnvelope, ProjectRef, RepositoryRef};
use super::ProviderClient;

const API_VERSION: &str = "7.0";
const CONTINUATION_HEADER: &str = "x-ms-continuationtoken";
const MAX_ERROR_BODY: usize = 512;

/// How requests are authenticated. The secret never appears in `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// `Authorization: Bearer <token>` (Entra ID access token)
    Bearer(String),
    /// Personal access token, sent as basic auth with an empty user
    Pat(String),
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Bearer(_) => f.write_str("Bearer(***)"),
            Credential::Pat(_) => f.write_str("Pat(***)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Overrides `https://dev.azure.com/{organization}`
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_backoff: Duration,
    /// `$top` for paged project listings
    pub page_size: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(60),
            max_retries: 2,
            retry_backoff: Duration::from_millis(500),
            page_size: 100,
        }
    }
}

/// One page of a list endpoint plus the token for the next page, if any.
struct Page<T> {
    items: Vec<T>,
    continuation: Option<String>,
}

pub struct AzureDevOpsClient {
    http: reqwest::Client,
    base_url: String,
    credential: Credential,
    options: ClientOptions,
}

impl AzureDevOpsClient {
    pub fn new(
        organization: &str,
        credential: Credential,
        options: ClientOptions,
    ) -> Result<Self, ProviderError> {
        let base_url = options
            .base_url
            .clone()
            .unwrap_or_else(|| format!("https://dev.azure.com/{}", organization));
        // Validate once so later endpoint construction only fails on bad segments
        Url::parse(&base_url).map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("adoscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ProviderError::Transport)?;

        Ok(Self {
            http,
            base_url,
            credential,
            options,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{segments...}?api-version=7.0`, with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        Ok(url)
    }

    /// GET with retry on transient failures
    async fn get_page<T: DeserializeOwned>(&self, url: &Url) -> Result<Page<T>, ProviderError> {
        with_retry(&self.options, url.path(), || self.send_once(url)).await
    }

    async fn send_once<T: DeserializeOwned>(&self, url: &Url) -> Result<Page<T>, ProviderError> {
        let request = self
            .http
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        let request = match &self.credential {
            Credential::Bearer(token) => request.bearer_auth(token),
            Credential::Pat(token) => request.basic_auth("", Some(token)),
        };

        let response = request.send().await.map_err(|e| classify(url, e))?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(url.path().to_string()));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ProviderError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            truncate_utf8(&mut body, MAX_ERROR_BODY);
            return Err(ProviderError::Status {
                url: url.path().to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let continuation = response
            .headers()
            .get(CONTINUATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned);

        let bytes = response.bytes().await.map_err(|e| classify(url, e))?;
        let envelope: ListEnvelope<T> =
            serde_json::from_slice(&bytes).map_err(|source| ProviderError::Decode {
                url: url.path().to_string(),
                source,
            })?;

        Ok(Page {
            items: envelope.value,
            continuation,
        })
    }
}

impl ProviderClient for AzureDevOpsClient {
    async fn list_projects(&self) -> Result<Vec<ProjectRef>, ProviderError> {
        collect_pages(|token| async move {
            let mut url = self.endpoint(&["_apis", "projects"])?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("$top", &self.options.page_size.to_string());
                if let Some(t) = &token {
                    query.append_pair("continuationToken", t);
                }
            }
            let page: Page<ProjectRef> = self.get_page(&url).await?;
            debug!(count = page.items.len(), "Fetched project page");
            Ok::<_, ProviderError>(page)
        })
        .await
    }

    async fn list_repositories(&self, project: &str) -> Result<Vec<RepositoryRef>, ProviderError> {
        let url = self.endpoint(&[project, "_apis", "git", "repositories"])?;
        Ok(self.get_page(&url).await?.items)
    }

    async fn list_items(
        &self,
        project: &str,
        repository_id: &str,
    ) -> Result<Vec<ItemEntry>, ProviderError> {
        let mut url =
            self.endpoint(&[project, "_apis", "git", "repositories", repository_id, "items"])?;
        url.query_pairs_mut().append_pair("recursionLevel", "Full");
        Ok(self.get_page(&url).await?.items)
    }
}

/// Run `attempt` until it succeeds or fails permanently. Transient errors
/// are retried up to `max_retries` times, doubling the delay each time.
async fn with_retry<T, F, Fut>(
    options: &ClientOptions,
    what: &str,
    mut attempt: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut retries: u32 = 0;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && retries < options.max_retries => {
                let delay = options.retry_backoff.saturating_mul(1 << retries.min(16));
                retries += 1;
                debug!(url = what, attempt = retries, ?delay, error = %err, "Retrying request");
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Follow continuation tokens, concatenating pages, until none is returned.
async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>, ProviderError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, ProviderError>>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page = fetch(token.clone()).await?;
        items.extend(page.items);
        match page.continuation {
            // A repeated token would loop forever
            Some(next) if token.as_deref() != Some(next.as_str()) => token = Some(next),
            _ => break,
        }
    }
    Ok(items)
}

fn classify(url: &Url, err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout {
            url: url.path().to_string(),
        }
    } else {
        ProviderError::Transport(err)
    }
}

fn truncate_utf8(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
}
