use crate::cache::error::CacheWriteError;
use crate::forecast::error::FetchError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherCacheError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    CacheWrite(#[from] CacheWriteError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Cache path exists but is not a directory: '{0}'")]
    CacheDirNotADirectory(PathBuf),
}
