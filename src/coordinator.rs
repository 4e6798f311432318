//! Runs the forecast fetcher for many coordinates at once.
//!
//! Every fetch is started up front and polled cooperatively on the calling
//! task. The fetcher's connection slots decide how many requests are actually
//! on the wire; a fetch waiting out a backoff does not hold one. Results keep
//! the order of the input.

use crate::forecast::fetcher::ForecastFetcher;
use crate::forecast::transport::ForecastTransport;
use crate::types::forecast::ForecastRecord;
use crate::types::lat_lon::LatLon;
use futures_util::future::join_all;
use log::info;

/// Default upper bound on simultaneous requests.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Fetches every location and waits for all of them to finish.
///
/// A failed fetch yields `None` in its slot and never affects the others.
pub async fn fetch_all<T: ForecastTransport>(
    fetcher: &ForecastFetcher<T>,
    locations: &[LatLon],
) -> Vec<(LatLon, Option<ForecastRecord>)> {
    info!(
        "Fetching {} forecasts, at most {} requests at a time",
        locations.len(),
        fetcher.connection_limit()
    );
    let results = join_all(
        locations
            .iter()
            .map(|&location| async move { (location, fetcher.fetch_or_none(location).await) }),
    )
    .await;

    let fetched = results.iter().filter(|(_, r)| r.is_some()).count();
    info!("Fetched {}/{} forecasts", fetched, locations.len());
    results
}
