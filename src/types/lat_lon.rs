//! Geographical coordinates and the cache file names derived from them.

use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`. Two coordinates are the same site only
/// when both values are exactly equal.
///
/// # Examples
///
/// ```
/// use circuit_weather::LatLon;
///
/// let monaco = LatLon(43.7338, 7.4215);
/// assert_eq!(monaco.0, 43.7338); // Latitude
/// assert_eq!(monaco.1, 7.4215); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    /// Returns the name of the cache file holding this coordinate's forecast.
    ///
    /// Each value is rendered in its shortest round-trip decimal form, always
    /// with a fractional part (`45.0`, never `45`). Every decimal point is then
    /// replaced by an underscore and the two parts are joined with an
    /// underscore. The sign is kept as-is.
    ///
    /// # Examples
    ///
    /// ```
    /// use circuit_weather::LatLon;
    ///
    /// assert_eq!(LatLon(43.7338, 7.4215).cache_file_name(), "43_7338_7_4215.json");
    /// assert_eq!(
    ///     LatLon(-37.8373, 144.9666).cache_file_name(),
    ///     "-37_8373_144_9666.json"
    /// );
    /// assert_eq!(LatLon(45.0, 9.0).cache_file_name(), "45_0_9_0.json");
    /// ```
    pub fn cache_file_name(&self) -> String {
        format!(
            "{}_{}.json",
            file_name_part(self.0),
            file_name_part(self.1)
        )
    }
}

fn file_name_part(value: f64) -> String {
    let mut text = value.to_string();
    // Integral values print without a fraction; keep one so the `_` separators stay unambiguous.
    if value.is_finite() && !text.contains(['.', 'e']) {
        text.push_str(".0");
    }
    text.replace('.', "_")
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::LatLon;

    #[test]
    fn test_cache_file_name_positive() {
        assert_eq!(
            LatLon(43.7338, 7.4215).cache_file_name(),
            "43_7338_7_4215.json"
        );
    }

    #[test]
    fn test_cache_file_name_keeps_sign() {
        assert_eq!(
            LatLon(-37.8373, 144.9666).cache_file_name(),
            "-37_8373_144_9666.json"
        );
        assert_eq!(
            LatLon(25.957764, -80.238835).cache_file_name(),
            "25_957764_-80_238835.json"
        );
    }

    #[test]
    fn test_cache_file_name_short_decimals() {
        // Shortest representation, no trailing zeros added.
        assert_eq!(LatLon(26.037, 50.5112).cache_file_name(), "26_037_50_5112.json");
        assert_eq!(LatLon(50.444, 5.9687).cache_file_name(), "50_444_5_9687.json");
    }

    #[test]
    fn test_cache_file_name_integral_values() {
        assert_eq!(LatLon(45.0, 9.0).cache_file_name(), "45_0_9_0.json");
        assert_eq!(LatLon(-0.0, 0.0).cache_file_name(), "-0_0_0_0.json");
        assert_eq!(LatLon(4.5, 9.0).cache_file_name(), "4_5_9_0.json");
        assert_eq!(LatLon(4.0, 5.9).cache_file_name(), "4_0_5_9.json");
    }

    #[test]
    fn test_cache_file_names_do_not_collide() {
        assert_ne!(
            LatLon(4.5, 9.0).cache_file_name(),
            LatLon(4.0, 5.9).cache_file_name()
        );
        assert_ne!(
            LatLon(1.0, 23.0).cache_file_name(),
            LatLon(12.0, 3.0).cache_file_name()
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(LatLon(1.2857, 103.8575).to_string(), "1.2857, 103.8575");
    }
}
