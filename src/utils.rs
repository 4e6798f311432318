use crate::error::WeatherCacheError;
use log::{debug, info};
use std::path::Path;

/// Prepares the forecast data directory, creating it and any missing parents.
///
/// Returns `true` when the directory had to be created and `false` when it was
/// already there. A regular file at `path` is an error.
pub async fn ensure_data_dir(path: &Path) -> Result<bool, WeatherCacheError> {
    let creation_error = |e| WeatherCacheError::CacheDirCreation(path.to_path_buf(), e);

    if tokio::fs::try_exists(path).await.map_err(creation_error)? {
        let metadata = tokio::fs::metadata(path).await.map_err(creation_error)?;
        if !metadata.is_dir() {
            return Err(WeatherCacheError::CacheDirNotADirectory(path.to_path_buf()));
        }
        debug!("Using existing data directory {}", path.display());
        return Ok(false);
    }

    tokio::fs::create_dir_all(path)
        .await
        .map_err(creation_error)?;
    info!("Created data directory {}", path.display());
    Ok(true)
}
