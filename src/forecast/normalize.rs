//! Turns a raw forecast payload into a gap-free [`ForecastRecord`].
//!
//! The transform is pure: the payload is consumed and a new record returned, so
//! concurrent fetches never observe each other's partially filled data.
//!
//! Rules, applied per requested [`ForecastField`]:
//!
//! * Hourly: a field that is missing, empty or not one value per timestamp is
//!   replaced by (or padded/truncated with) its default.
//! * 15-minutely: an incomplete field is rebuilt from the hourly series by
//!   nearest timestamp. Fields the hourly series cannot provide fall back to
//!   defaults.
//! * A missing 15-minutely section stays missing and clears `has_minutely_15`.
//!
//! Fields outside [`ForecastField::ALL`] are left untouched. Running the
//! transform on its own output changes nothing.

use crate::types::forecast::{ForecastPayload, ForecastRecord, TimeSeries};
use crate::types::forecast_field::ForecastField;
use chrono::NaiveDateTime;
use serde_json::Value;

const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Keys owned by [`ForecastRecord`] that must not leak in through `extra`.
const RESERVED_KEYS: [&str; 2] = ["has_minutely_15", "metadata"];

pub fn normalize(payload: ForecastPayload) -> ForecastRecord {
    let ForecastPayload {
        hourly,
        minutely_15,
        mut extra,
    } = payload;

    for key in RESERVED_KEYS {
        extra.remove(key);
    }

    let hourly = hourly.map(fill_defaults);
    let has_minutely_15 = minutely_15.is_some();
    let minutely_15 = minutely_15.map(|fine| {
        let fine = match &hourly {
            Some(coarse) => interpolate_from(fine, coarse),
            None => fine,
        };
        fill_defaults(fine)
    });

    ForecastRecord {
        hourly,
        minutely_15,
        has_minutely_15,
        metadata: None,
        extra,
    }
}

/// Makes every requested field exactly one value per timestamp.
fn fill_defaults(mut section: TimeSeries) -> TimeSeries {
    let len = section.time.len();
    for field in ForecastField::ALL {
        let name = field.api_name();
        if section.is_complete(name) {
            continue;
        }
        let mut values = match section.values.remove(name) {
            Some(Value::Array(values)) => values,
            _ => Vec::new(),
        };
        values.resize(len, field.default_value());
        section.values.insert(name.to_string(), Value::Array(values));
    }
    section
}

/// Rebuilds incomplete fine-grained fields from the coarse series.
fn interpolate_from(mut fine: TimeSeries, coarse: &TimeSeries) -> TimeSeries {
    let missing: Vec<ForecastField> = ForecastField::ALL
        .into_iter()
        .filter(|field| !fine.is_complete(field.api_name()))
        .filter(|field| {
            coarse
                .series(field.api_name())
                .is_some_and(|values| !values.is_empty())
        })
        .collect();
    if missing.is_empty() {
        return fine;
    }

    let coarse_times: Vec<Option<NaiveDateTime>> =
        coarse.time.iter().map(|t| parse_time(t)).collect();
    let nearest: Vec<Option<usize>> = fine
        .time
        .iter()
        .map(|t| parse_time(t).and_then(|t| nearest_index(t, &coarse_times)))
        .collect();

    for field in missing {
        let Some(source) = coarse.series(field.api_name()) else {
            continue;
        };
        let values = nearest
            .iter()
            .map(|index| {
                index
                    .and_then(|i| source.get(i))
                    .cloned()
                    .unwrap_or_else(|| Value::from(0))
            })
            .collect();
        fine.values
            .insert(field.api_name().to_string(), Value::Array(values));
    }
    fine
}

/// Index of the coarse timestamp closest to `target`. Ties go to the earliest index.
fn nearest_index(target: NaiveDateTime, coarse_times: &[Option<NaiveDateTime>]) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (i, time) in coarse_times.iter().enumerate() {
        let Some(time) = time else { continue };
        let distance = (*time - target).num_seconds().abs();
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((i, distance));
        }
    }
    best.map(|(i, _)| i)
}

fn parse_time(value: &str) -> Option<NaiveDateTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
