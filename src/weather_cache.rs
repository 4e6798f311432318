//! The main entry point: fetches forecasts for a set of coordinates and keeps
//! the on-disk cache up to date.

use crate::cache::writer::CacheWriter;
use crate::coordinator::{fetch_all, DEFAULT_CONCURRENCY};
use crate::error::WeatherCacheError;
use crate::forecast::fetcher::{ForecastFetcher, RetryPolicy};
use crate::forecast::request::DEFAULT_HORIZON_DAYS;
use crate::forecast::transport::{ForecastTransport, HttpTransport, DEFAULT_TIMEOUT};
use crate::types::lat_lon::LatLon;
use crate::utils::ensure_data_dir;
use bon::Builder;
use log::info;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Settings for a [`WeatherCache`].
///
/// # Examples
///
/// ```
/// use circuit_weather::{CacheSettings, RetryPolicy};
///
/// let settings = CacheSettings::builder()
///     .data_dir("data")
///     .concurrency(2)
///     .retry(RetryPolicy::builder().max_attempts(5).build())
///     .build();
/// assert_eq!(settings.horizon_days, 14);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct CacheSettings {
    /// Directory holding one JSON file per coordinate. Created if absent.
    #[builder(into)]
    pub data_dir: PathBuf,
    /// Maximum number of requests in flight.
    #[builder(default = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
    /// I/O timeout for each individual request.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    /// Days past today included in each forecast.
    #[builder(default = DEFAULT_HORIZON_DAYS)]
    pub horizon_days: u64,
    #[builder(default)]
    pub retry: RetryPolicy,
}

/// Summary of one [`WeatherCache::refresh`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshReport {
    pub written: Vec<PathBuf>,
    /// Coordinates whose fetch or write failed; their old files are untouched
    /// unless the write itself failed midway.
    pub failed: Vec<LatLon>,
    pub elapsed: Duration,
}

/// Fetches, normalizes and caches forecasts.
///
/// # Examples
///
/// ```no_run
/// use circuit_weather::{circuit_locations, CacheSettings, WeatherCache, WeatherCacheError};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), WeatherCacheError> {
/// let cache = WeatherCache::new(CacheSettings::builder().data_dir("data").build()).await?;
/// let report = cache.refresh(&circuit_locations()).await;
/// println!("Wrote {} files in {:?}", report.written.len(), report.elapsed);
/// # Ok(())
/// # }
/// ```
pub struct WeatherCache<T = HttpTransport> {
    fetcher: ForecastFetcher<T>,
    writer: CacheWriter,
}

impl WeatherCache<HttpTransport> {
    /// Creates the cache directory if needed and sets up the HTTP client.
    pub async fn new(settings: CacheSettings) -> Result<Self, WeatherCacheError> {
        let transport = HttpTransport::new(settings.timeout, settings.concurrency.max(1))?;
        Self::with_transport(settings, transport).await
    }
}

impl<T: ForecastTransport> WeatherCache<T> {
    /// Like [`WeatherCache::new`], with a caller supplied transport.
    pub async fn with_transport(
        settings: CacheSettings,
        transport: T,
    ) -> Result<Self, WeatherCacheError> {
        ensure_data_dir(&settings.data_dir).await?;
        Ok(Self {
            fetcher: ForecastFetcher::new(transport, settings.retry)
                .with_horizon_days(settings.horizon_days)
                .with_connection_limit(settings.concurrency),
            writer: CacheWriter::new(&settings.data_dir),
        })
    }

    pub fn data_dir(&self) -> &Path {
        self.writer.cache_dir()
    }

    /// Path of the cache file for `location`.
    pub fn cache_path(&self, location: LatLon) -> PathBuf {
        self.writer.path_for(location)
    }

    pub fn fetcher(&self) -> &ForecastFetcher<T> {
        &self.fetcher
    }

    /// Fetches every location, then writes every successful result.
    ///
    /// Never fails as a whole: per-coordinate problems are logged and listed in
    /// [`RefreshReport::failed`].
    pub async fn refresh(&self, locations: &[LatLon]) -> RefreshReport {
        let start = Instant::now();
        let results = fetch_all(&self.fetcher, locations).await;
        let report = self.writer.write_all(results).await;

        let mut failed = report.skipped;
        failed.extend(report.failed);
        let elapsed = start.elapsed();
        info!(
            "Cached {}/{} forecasts in {:?}",
            report.written.len(),
            locations.len(),
            elapsed
        );

        RefreshReport {
            written: report.written,
            failed,
            elapsed,
        }
    }
}
