//! Defines the set of weather fields requested from the forecast API and the
//! defaults used when the API leaves one of them out.

use serde_json::Value;
use std::fmt;

/// A weather variable requested for both the hourly and the 15-minute series.
///
/// Every variant maps to the upstream query/response name through
/// [`ForecastField::api_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastField {
    /// Air temperature at 2 meters, in °C.
    Temperature,
    /// WMO weather interpretation code.
    WeatherCode,
    /// Probability of precipitation, in percent.
    PrecipitationProbability,
    /// Total precipitation (rain, showers, snow), in mm.
    Precipitation,
    /// Wind speed at 10 meters, in km/h.
    WindSpeed,
    /// Wind gusts at 10 meters, in km/h.
    WindGusts,
    /// Visibility, in meters.
    Visibility,
    /// Relative humidity at 2 meters, in percent.
    RelativeHumidity,
    /// Apparent ("feels like") temperature, in °C.
    ApparentTemperature,
    /// Total cloud cover, in percent.
    CloudCover,
    /// Wind direction at 10 meters, in degrees.
    WindDirection,
}

impl ForecastField {
    /// All fields, in the order they are requested.
    pub const ALL: [ForecastField; 11] = [
        ForecastField::Temperature,
        ForecastField::WeatherCode,
        ForecastField::PrecipitationProbability,
        ForecastField::Precipitation,
        ForecastField::WindSpeed,
        ForecastField::WindGusts,
        ForecastField::Visibility,
        ForecastField::RelativeHumidity,
        ForecastField::ApparentTemperature,
        ForecastField::CloudCover,
        ForecastField::WindDirection,
    ];

    pub fn api_name(&self) -> &'static str {
        match self {
            ForecastField::Temperature => "temperature_2m",
            ForecastField::WeatherCode => "weathercode",
            ForecastField::PrecipitationProbability => "precipitation_probability",
            ForecastField::Precipitation => "precipitation",
            ForecastField::WindSpeed => "windspeed_10m",
            ForecastField::WindGusts => "windgusts_10m",
            ForecastField::Visibility => "visibility",
            ForecastField::RelativeHumidity => "relativehumidity_2m",
            ForecastField::ApparentTemperature => "apparent_temperature",
            ForecastField::CloudCover => "cloudcover",
            ForecastField::WindDirection => "winddirection_10m",
        }
    }

    /// Value synthesized when the API does not provide this field.
    ///
    /// Visibility defaults to 10 km of clear air, everything else to zero.
    pub fn default_value(&self) -> Value {
        match self {
            ForecastField::Visibility => Value::from(10_000),
            _ => Value::from(0),
        }
    }

    /// Comma separated list of all field names, as used in the request query.
    pub(crate) fn query_list() -> String {
        Self::ALL
            .iter()
            .map(ForecastField::api_name)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Formats a `ForecastField` using its upstream name.
///
/// # Examples
///
/// ```
/// use circuit_weather::ForecastField;
///
/// assert_eq!(ForecastField::WindGusts.to_string(), "windgusts_10m");
/// ```
impl fmt::Display for ForecastField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}
