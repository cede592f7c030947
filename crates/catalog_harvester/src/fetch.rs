use std::sync::Arc;
use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use tokio::sync::Semaphore;

use crate::decode::decode_body;
use crate::{FailureKind, FetchError};

/// Some mirrors reject clients that do not look like a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub user_agent: String,
    /// Upper bound on concurrent requests against one mirror host.
    pub max_in_flight: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 8 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
                "text/plain".to_string(),
            ],
            user_agent: BROWSER_USER_AGENT.to_string(),
            max_in_flight: 4,
        }
    }
}

/// Retrieves one listing page as text. Each call is a single attempt.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    client: reqwest::Client,
    permits: Arc<Semaphore>,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = build_client(&settings)?;
        let permits = Arc::new(Semaphore::new(settings.max_in_flight.max(1)));
        Ok(Self {
            settings,
            client,
            permits,
        })
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "listing exceeds size limit",
        )
    }

    /// Listings are HTML, occasionally served as plain text. A missing
    /// header is tolerated.
    fn accept_content_type(&self, header: Option<&str>) -> Result<(), FetchError> {
        let Some(header) = header else {
            return Ok(());
        };
        let mime = header.split(';').next().unwrap_or(header).trim();
        let known = self
            .settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime));
        if known {
            Ok(())
        } else {
            Err(FetchError::new(
                FailureKind::UnsupportedContentType {
                    content_type: header.to_string(),
                },
                "not a directory listing",
            ))
        }
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let received = (body.len() + chunk.len()) as u64;
            if received > self.settings.max_bytes {
                return Err(self.too_large(received));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

fn build_client(settings: &FetchSettings) -> Result<reqwest::Client, FetchError> {
    let redirect_limit = settings.redirect_limit;
    let policy = reqwest::redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() >= redirect_limit {
            attempt.error("redirect limit exceeded")
        } else {
            attempt.follow()
        }
    });

    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .user_agent(settings.user_agent.clone())
        .redirect(policy)
        .build()
        .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let target = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        engine_debug!("GET {}", url);

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("{url} answered {status}"),
            ));
        }
        if let Some(declared) = response.content_length().filter(|len| *len > self.settings.max_bytes) {
            return Err(self.too_large(declared));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        self.accept_content_type(content_type.as_deref())?;

        let body = self.read_body(response).await?;
        Ok(decode_body(&body, content_type.as_deref()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
