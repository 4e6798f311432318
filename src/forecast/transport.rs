use crate::forecast::error::FetchError;
use crate::forecast::request::ForecastRequest;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Per-request I/O timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: StatusCode,
    pub body: String,
}

/// Performs one forecast GET.
///
/// Returns the reply for any status code; only failures below HTTP (connect,
/// timeout, broken body) are reported as [`FetchError::Transport`].
#[allow(async_fn_in_trait)]
pub trait ForecastTransport {
    async fn get(&self, request: &ForecastRequest) -> Result<HttpReply, FetchError>;
}

/// [`ForecastTransport`] backed by a shared `reqwest` connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, pool_size: usize) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(pool_size)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { client })
    }
}

impl ForecastTransport for HttpTransport {
    async fn get(&self, request: &ForecastRequest) -> Result<HttpReply, FetchError> {
        let transport_error = |e: reqwest::Error| FetchError::Transport {
            url: request.url(),
            source: Box::new(e),
        };

        let response = self
            .client
            .get(&request.base_url)
            .query(&request.query_pairs())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        Ok(HttpReply { status, body })
    }
}
