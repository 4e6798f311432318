use crate::types::forecast_field::ForecastField;
use crate::types::lat_lon::LatLon;
use chrono::{Days, NaiveDate};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Number of days past today covered by each request.
pub const DEFAULT_HORIZON_DAYS: u64 = 14;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single GET against the forecast endpoint for one coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub location: LatLon,
    pub base_url: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ForecastRequest {
    /// Requests both the hourly and 15-minutely series from `today` through
    /// `today + horizon_days`, with the timezone resolved by the API.
    pub fn for_location(location: LatLon, today: NaiveDate, horizon_days: u64) -> Self {
        let end_date = today
            .checked_add_days(Days::new(horizon_days))
            .unwrap_or(NaiveDate::MAX);
        Self {
            location,
            base_url: FORECAST_URL.to_string(),
            start_date: today,
            end_date,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let fields = ForecastField::query_list();
        vec![
            ("latitude", self.location.latitude().to_string()),
            ("longitude", self.location.longitude().to_string()),
            ("hourly", fields.clone()),
            ("minutely_15", fields),
            ("timezone", "auto".to_string()),
            ("start_date", self.start_date.format(DATE_FORMAT).to_string()),
            ("end_date", self.end_date.format(DATE_FORMAT).to_string()),
        ]
    }

    /// Full URL, for log lines and error messages.
    pub fn url(&self) -> String {
        let query = self
            .query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.base_url, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_spans_fourteen_days() {
        let request =
            ForecastRequest::for_location(LatLon(43.7338, 7.4215), date(2025, 12, 25), 14);
        assert_eq!(request.start_date, date(2025, 12, 25));
        assert_eq!(request.end_date, date(2026, 1, 8));
    }

    #[test]
    fn test_query_pairs() {
        let request =
            ForecastRequest::for_location(LatLon(-37.8373, 144.9666), date(2025, 3, 14), 14);
        let pairs = request.query_pairs();

        assert_eq!(pairs[0], ("latitude", "-37.8373".to_string()));
        assert_eq!(pairs[1], ("longitude", "144.9666".to_string()));
        assert_eq!(pairs[2].1, ForecastField::query_list());
        assert_eq!(pairs[3].0, "minutely_15");
        assert_eq!(pairs[4], ("timezone", "auto".to_string()));
        assert_eq!(pairs[5], ("start_date", "2025-03-14".to_string()));
        assert_eq!(pairs[6], ("end_date", "2025-03-28".to_string()));
    }

    #[test]
    fn test_url() {
        let request = ForecastRequest::for_location(LatLon(1.2857, 103.8575), date(2025, 10, 3), 14)
            .with_base_url("http://localhost:8080/v1/forecast");
        let url = request.url();
        assert!(url.starts_with("http://localhost:8080/v1/forecast?latitude=1.2857&longitude=103.8575&hourly="));
        assert!(url.ends_with("&timezone=auto&start_date=2025-10-03&end_date=2025-10-17"));
    }
}
