mod cache;
mod circuits;
mod coordinator;
mod error;
mod forecast;
mod types;
mod utils;
mod weather_cache;

pub use error::WeatherCacheError;
pub use weather_cache::*;

pub use circuits::{circuit_locations, circuit_name, Circuit, CIRCUITS};
pub use coordinator::{fetch_all, DEFAULT_CONCURRENCY};

pub use cache::error::CacheWriteError;
pub use cache::writer::{CacheWriter, WriteReport};

pub use forecast::error::FetchError;
pub use forecast::fetcher::{ForecastFetcher, RetryPolicy, DEFAULT_MAX_ATTEMPTS};
pub use forecast::normalize::normalize;
pub use forecast::request::{ForecastRequest, DEFAULT_HORIZON_DAYS, FORECAST_URL};
pub use forecast::transport::{ForecastTransport, HttpReply, HttpTransport, DEFAULT_TIMEOUT};

pub use types::forecast::{CacheMetadata, ForecastPayload, ForecastRecord, TimeSeries};
pub use types::forecast_field::ForecastField;
pub use types::lat_lon::LatLon;

pub use utils::ensure_data_dir;
