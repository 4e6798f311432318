//! Data structures for forecast responses as they come off the wire and as they
//! are stored in the cache after normalization.

use crate::types::lat_lon::LatLon;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One time series section of a forecast (hourly or 15-minutely).
///
/// `time` holds the local timestamps (`YYYY-MM-DDTHH:MM`), and `values` every
/// other array in the section keyed by its upstream name. Arrays are kept as raw
/// JSON values so that anything the API sends is written back unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(flatten)]
    pub values: BTreeMap<String, Value>,
}

impl TimeSeries {
    /// Returns the array stored for `name`, if present and actually an array.
    pub fn series(&self, name: &str) -> Option<&Vec<Value>> {
        self.values.get(name).and_then(Value::as_array)
    }

    /// True when `name` holds exactly one value per timestamp.
    pub fn is_complete(&self, name: &str) -> bool {
        self.series(name)
            .is_some_and(|values| !values.is_empty() && values.len() == self.time.len())
    }
}

/// The raw body of a successful forecast response.
///
/// Only the two time series sections are typed; every other top-level key
/// (timezone, elevation, units, ...) is carried in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly: Option<TimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutely_15: Option<TimeSeries>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Information attached to a record right before it is written to the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// Local time of the write, ISO-8601 with microseconds (sorts lexically).
    pub cached_at: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CacheMetadata {
    pub fn now(location: LatLon) -> Self {
        Self {
            cached_at: Local::now()
                .naive_local()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            latitude: location.latitude(),
            longitude: location.longitude(),
        }
    }
}

/// A normalized forecast: every requested field is present in each section and
/// has one value per timestamp.
///
/// Produced by [`crate::normalize`]. Serializes to the same shape as the upstream
/// body plus `has_minutely_15` and, once cached, `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly: Option<TimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutely_15: Option<TimeSeries>,
    /// Whether the API returned a 15-minute section at all.
    pub has_minutely_15: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CacheMetadata>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ForecastRecord {
    pub fn with_metadata(mut self, metadata: CacheMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Turns the record back into a payload, dropping the flag and metadata.
    pub fn into_payload(self) -> ForecastPayload {
        ForecastPayload {
            hourly: self.hourly,
            minutely_15: self.minutely_15,
            extra: self.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_keeps_unknown_keys() -> Result<(), serde_json::Error> {
        let body = json!({
            "latitude": 43.74,
            "timezone": "Europe/Monaco",
            "hourly_units": {"time": "iso8601"},
            "hourly": {
                "time": ["2025-05-25T00:00", "2025-05-25T01:00"],
                "temperature_2m": [18.1, 17.9],
                "is_day": [0, 0]
            }
        });
        let payload: ForecastPayload = serde_json::from_value(body.clone())?;

        assert!(payload.minutely_15.is_none());
        let hourly = payload.hourly.as_ref().expect("hourly section");
        assert_eq!(hourly.time.len(), 2);
        assert!(hourly.is_complete("temperature_2m"));
        assert!(hourly.is_complete("is_day"));
        assert_eq!(payload.extra["timezone"], json!("Europe/Monaco"));

        assert_eq!(serde_json::to_value(&payload)?, body);
        Ok(())
    }

    #[test]
    fn test_is_complete() {
        let mut series = TimeSeries {
            time: vec!["2025-05-25T00:00".into(), "2025-05-25T00:15".into()],
            values: BTreeMap::new(),
        };
        assert!(!series.is_complete("precipitation"));

        series.values.insert("precipitation".into(), json!([]));
        assert!(!series.is_complete("precipitation"));

        series.values.insert("precipitation".into(), Value::Null);
        assert!(!series.is_complete("precipitation"));

        series.values.insert("precipitation".into(), json!([0.1]));
        assert!(!series.is_complete("precipitation"));

        series.values.insert("precipitation".into(), json!([0.1, null]));
        assert!(series.is_complete("precipitation"));
    }

    #[test]
    fn test_record_serializes_metadata() -> Result<(), serde_json::Error> {
        let record = ForecastRecord {
            hourly: None,
            minutely_15: None,
            has_minutely_15: false,
            metadata: None,
            extra: Map::new(),
        }
        .with_metadata(CacheMetadata {
            cached_at: "2025-05-25T10:00:00.000000".into(),
            latitude: 43.7338,
            longitude: 7.4215,
        });

        let value = serde_json::to_value(&record)?;
        assert_eq!(
            value,
            json!({
                "has_minutely_15": false,
                "metadata": {
                    "cached_at": "2025-05-25T10:00:00.000000",
                    "latitude": 43.7338,
                    "longitude": 7.4215
                }
            })
        );
        Ok(())
    }

    #[test]
    fn test_cached_at_is_sortable_iso() {
        let metadata = CacheMetadata::now(LatLon(1.2857, 103.8575));
        // YYYY-MM-DDTHH:MM:SS.ffffff
        assert_eq!(metadata.cached_at.len(), 26);
        assert_eq!(&metadata.cached_at[10..11], "T");
        assert_eq!(metadata.latitude, 1.2857);
        assert_eq!(metadata.longitude, 103.8575);
    }
}
