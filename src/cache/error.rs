use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheWriteError {
    #[error("Failed to encode forecast for cache file '{0}'")]
    Serialize(PathBuf, #[source] serde_json::Error),

    #[error("Failed to write cache file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),
}
