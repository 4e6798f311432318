use argh::FromArgs;
use circuit_weather::{
    circuit_locations, CacheSettings, RetryPolicy, WeatherCache, DEFAULT_CONCURRENCY,
    DEFAULT_MAX_ATTEMPTS,
};
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(FromArgs)]
/// Refresh the cached 14-day forecasts for every circuit
struct Args {
    /// directory the forecast JSON files are written to
    #[argh(option, short = 'd', default = "PathBuf::from(\"data\")")]
    data_dir: PathBuf,

    /// maximum number of requests in flight
    #[argh(option, short = 'c', default = "DEFAULT_CONCURRENCY")]
    concurrency: usize,

    /// attempts per circuit before giving up
    #[argh(option, default = "DEFAULT_MAX_ATTEMPTS")]
    max_attempts: u32,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let args: Args = argh::from_env();

    let settings = CacheSettings::builder()
        .data_dir(args.data_dir)
        .concurrency(args.concurrency)
        .retry(RetryPolicy::builder().max_attempts(args.max_attempts).build())
        .build();

    let cache = match WeatherCache::new(settings).await {
        Ok(cache) => cache,
        Err(e) => {
            error!("Failed to set up weather cache: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let locations = circuit_locations();
    info!(
        "Updating {} circuits into {}",
        locations.len(),
        cache.data_dir().display()
    );

    let report = cache.refresh(&locations).await;
    for location in &report.failed {
        warn!("No fresh forecast for {}", location);
    }
    info!(
        "Weather cache update completed in {:.2} seconds",
        report.elapsed.as_secs_f64()
    );

    ExitCode::SUCCESS
}
