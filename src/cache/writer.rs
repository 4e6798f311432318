use crate::cache::error::CacheWriteError;
use crate::types::forecast::{CacheMetadata, ForecastRecord};
use crate::types::lat_lon::LatLon;
use futures_util::future::join_all;
use log::{error, info};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Outcome of writing a batch of fetch results.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    /// Coordinates without a record; their cache files were left alone.
    pub skipped: Vec<LatLon>,
    pub failed: Vec<LatLon>,
}

/// Writes one JSON file per coordinate into a cache directory.
#[derive(Debug, Clone)]
pub struct CacheWriter {
    cache_dir: PathBuf,
}

impl CacheWriter {
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn path_for(&self, location: LatLon) -> PathBuf {
        self.cache_dir.join(location.cache_file_name())
    }

    /// Stamps `record` with metadata and replaces the coordinate's cache file.
    pub async fn write(
        &self,
        location: LatLon,
        record: ForecastRecord,
    ) -> Result<PathBuf, CacheWriteError> {
        let path = self.path_for(location);
        let record = record.with_metadata(CacheMetadata::now(location));

        let json = serde_json::to_vec_pretty(&record)
            .map_err(|e| CacheWriteError::Serialize(path.clone(), e))?;
        // Truncates any previous content.
        fs::write(&path, &json)
            .await
            .map_err(|e| CacheWriteError::Write(path.clone(), e))?;

        info!("Saved weather data to {}", path.display());
        Ok(path)
    }

    /// Writes every present record. Missing records and failed writes are
    /// reported without stopping the rest of the batch.
    pub async fn write_all(
        &self,
        results: Vec<(LatLon, Option<ForecastRecord>)>,
    ) -> WriteReport {
        let mut report = WriteReport::default();
        let mut pending = Vec::new();

        for (location, record) in results {
            match record {
                Some(record) => {
                    pending.push(async move { (location, self.write(location, record).await) })
                }
                None => report.skipped.push(location),
            }
        }

        for (location, outcome) in join_all(pending).await {
            match outcome {
                Ok(path) => report.written.push(path),
                Err(e) => {
                    error!("Failed to cache weather data for {}: {}", location, e);
                    report.failed.push(location);
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::normalize::normalize;
    use crate::types::forecast::ForecastPayload;
    use serde_json::{json, Value};

    fn record(temperature: f64) -> ForecastRecord {
        let payload: ForecastPayload = serde_json::from_value(json!({
            "timezone": "Australia/Melbourne",
            "hourly": {"time": ["2025-03-14T00:00"], "temperature_2m": [temperature]}
        }))
        .unwrap();
        normalize(payload)
    }

    #[tokio::test]
    async fn test_write_creates_named_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let writer = CacheWriter::new(dir.path());
        let melbourne = LatLon(-37.8373, 144.9666);

        let path = writer.write(melbourne, record(22.5)).await?;

        assert_eq!(path, dir.path().join("-37_8373_144_9666.json"));
        let text = std::fs::read_to_string(&path)?;
        assert!(text.contains("\n  \"has_minutely_15\": false"), "not indented: {text}");

        let stored: Value = serde_json::from_str(&text)?;
        assert_eq!(stored["metadata"]["latitude"], json!(-37.8373));
        assert_eq!(stored["metadata"]["longitude"], json!(144.9666));
        assert!(stored["metadata"]["cached_at"].is_string());
        assert_eq!(stored["hourly"]["temperature_2m"], json!([22.5]));
        assert_eq!(stored["hourly"]["visibility"], json!([10000]));
        assert_eq!(stored["timezone"], json!("Australia/Melbourne"));
        Ok(())
    }

    #[tokio::test]
    async fn test_write_replaces_previous_content() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let writer = CacheWriter::new(dir.path());
        let monaco = LatLon(43.7338, 7.4215);
        let path = writer.path_for(monaco);
        std::fs::write(&path, "x".repeat(100_000))?;

        writer.write(monaco, record(19.0)).await?;

        let stored: ForecastRecord = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(
            stored.hourly.unwrap().values["temperature_2m"],
            json!([19.0])
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_write_all_skips_missing_records() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let writer = CacheWriter::new(dir.path());
        let monaco = LatLon(43.7338, 7.4215);
        let monza = LatLon(45.6169, 9.2825);
        let previous = writer.path_for(monza);
        std::fs::write(&previous, "{\"stale\": true}")?;

        let report = writer
            .write_all(vec![(monaco, Some(record(20.0))), (monza, None)])
            .await;

        assert_eq!(report.written, vec![writer.path_for(monaco)]);
        assert_eq!(report.skipped, vec![monza]);
        assert!(report.failed.is_empty());
        assert_eq!(std::fs::read_to_string(&previous)?, "{\"stale\": true}");
        Ok(())
    }

    #[tokio::test]
    async fn test_write_all_reports_failures() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let writer = CacheWriter::new(&dir.path().join("does-not-exist"));
        let baku = LatLon(40.3699, 49.8433);

        let report = writer.write_all(vec![(baku, Some(record(25.0)))]).await;

        assert!(report.written.is_empty());
        assert_eq!(report.failed, vec![baku]);
        Ok(())
    }
}
