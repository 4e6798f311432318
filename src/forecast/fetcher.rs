use crate::circuits::circuit_name;
use crate::coordinator::DEFAULT_CONCURRENCY;
use crate::forecast::error::FetchError;
use crate::forecast::normalize::normalize;
use crate::forecast::request::{ForecastRequest, DEFAULT_HORIZON_DAYS};
use crate::forecast::transport::{ForecastTransport, HttpReply};
use crate::types::forecast::{ForecastPayload, ForecastRecord};
use crate::types::lat_lon::LatLon;
use bon::Builder;
use chrono::Local;
use futures_util::FutureExt;
use log::{debug, error, info, warn};
use reqwest::StatusCode;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::sync::Semaphore;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// How often and how patiently a single coordinate is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
    /// Wait after a transport failure.
    #[builder(default = Duration::from_secs(1))]
    pub transport_backoff: Duration,
    /// Wait after the first HTTP 429, doubled for every further attempt.
    #[builder(default = Duration::from_secs(1))]
    pub rate_limit_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RetryPolicy {
    /// `rate_limit_base * 2^attempt`, so 1s, 2s, 4s with the defaults.
    pub fn rate_limit_delay(&self, attempt: u32) -> Duration {
        self.rate_limit_base
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Fetches and normalizes forecasts.
///
/// Requests from every concurrent `fetch` share one pool of connection slots
/// (see [`ForecastFetcher::with_connection_limit`]). A slot is held only while a
/// request is on the wire, never during a backoff wait.
pub struct ForecastFetcher<T> {
    transport: T,
    retry: RetryPolicy,
    connections: Semaphore,
    connection_limit: usize,
    horizon_days: u64,
    base_url: Option<String>,
}

impl<T: ForecastTransport> ForecastFetcher<T> {
    pub fn new(transport: T, retry: RetryPolicy) -> Self {
        Self {
            transport,
            retry,
            connections: Semaphore::new(DEFAULT_CONCURRENCY),
            connection_limit: DEFAULT_CONCURRENCY,
            horizon_days: DEFAULT_HORIZON_DAYS,
            base_url: None,
        }
    }

    /// Caps the number of requests in flight at once, at least one.
    pub fn with_connection_limit(mut self, limit: usize) -> Self {
        let limit = limit.max(1);
        self.connections = Semaphore::new(limit);
        self.connection_limit = limit;
        self
    }

    pub fn connection_limit(&self) -> usize {
        self.connection_limit
    }

    pub fn with_horizon_days(mut self, horizon_days: u64) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    /// Points requests at a different endpoint than the public API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn request_for(&self, location: LatLon) -> ForecastRequest {
        let request =
            ForecastRequest::for_location(location, Local::now().date_naive(), self.horizon_days);
        match &self.base_url {
            Some(url) => request.with_base_url(url.clone()),
            None => request,
        }
    }

    /// Fetches the forecast for `location`, retrying transient failures.
    ///
    /// * `200` - body is parsed and normalized; a body that isn't valid JSON
    ///   fails without retrying.
    /// * `429` - waits [`RetryPolicy::rate_limit_delay`] and retries.
    /// * any other status - fails immediately.
    /// * transport failure - waits `transport_backoff` and retries.
    ///
    /// No wait follows the last attempt, so with three attempts the 429 waits
    /// are 1s and 2s; the 4s step of the schedule is never slept.
    pub async fn fetch(&self, location: LatLon) -> Result<ForecastRecord, FetchError> {
        let request = self.request_for(location);
        let max_attempts = self.retry.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 0..max_attempts {
            debug!(
                "Requesting forecast for {} (attempt {}/{})",
                location,
                attempt + 1,
                max_attempts
            );
            let (error, delay) = match self.send(&request).await {
                Ok(HttpReply { status, body }) if status == StatusCode::OK => {
                    return parse_and_normalize(&request, &body);
                }
                Ok(HttpReply { status, .. }) if status == StatusCode::TOO_MANY_REQUESTS => {
                    let delay = self.retry.rate_limit_delay(attempt);
                    warn!("Rate limited fetching {}, backing off {:?}", location, delay);
                    (FetchError::RateLimited { url: request.url() }, delay)
                }
                Ok(HttpReply { status, .. }) => {
                    return Err(FetchError::HttpStatus {
                        url: request.url(),
                        status,
                    });
                }
                Err(e) => {
                    warn!("Request for {} failed: {}", location, e);
                    (e, self.retry.transport_backoff)
                }
            };

            if attempt + 1 < max_attempts {
                tokio::time::sleep(delay).await;
            }
            last_error = Some(error);
        }

        Err(FetchError::RetriesExhausted {
            url: request.url(),
            attempts: max_attempts,
            last: Box::new(last_error.unwrap_or(FetchError::RateLimited { url: request.url() })),
        })
    }

    /// Performs one request while holding a connection slot.
    async fn send(&self, request: &ForecastRequest) -> Result<HttpReply, FetchError> {
        let _permit = self
            .connections
            .acquire()
            .await
            .map_err(|e| FetchError::Transport {
                url: request.url(),
                source: Box::new(e),
            })?;
        self.transport.get(request).await
    }

    /// Like [`ForecastFetcher::fetch`], but any failure (panics included) is
    /// logged against the coordinate and reported as `None`.
    pub async fn fetch_or_none(&self, location: LatLon) -> Option<ForecastRecord> {
        let site = circuit_name(location).unwrap_or("unnamed site");
        info!("Fetching weather data for {} ({})", location, site);

        let outcome = AssertUnwindSafe(self.fetch(location))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(FetchError::Panicked(panic_message(panic))));

        match outcome {
            Ok(record) => Some(record),
            Err(e) => {
                error!("Failed to fetch weather data for {} ({}): {}", location, site, e);
                None
            }
        }
    }
}

fn parse_and_normalize(request: &ForecastRequest, body: &str) -> Result<ForecastRecord, FetchError> {
    let payload: ForecastPayload =
        serde_json::from_str(body).map_err(|source| FetchError::JsonParse {
            url: request.url(),
            source,
        })?;
    Ok(normalize(payload))
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
