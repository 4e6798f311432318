//! The fixed list of race circuits whose forecasts are kept in the cache.

use crate::types::lat_lon::LatLon;

/// A named site in the registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circuit {
    pub name: &'static str,
    pub location: LatLon,
}

const fn circuit(name: &'static str, latitude: f64, longitude: f64) -> Circuit {
    Circuit {
        name,
        location: LatLon(latitude, longitude),
    }
}

/// All circuits, in calendar order.
pub const CIRCUITS: [Circuit; 24] = [
    circuit("Melbourne", -37.8373, 144.9666),
    circuit("Shanghai", 31.3807, 121.2498),
    circuit("Suzuka", 35.3689, 138.9256),
    circuit("Sakhir", 26.037, 50.5112),
    circuit("Jeddah", 21.485811, 39.192505),
    circuit("Miami", 25.957764, -80.238835),
    circuit("Imola", 44.344576, 11.713808),
    circuit("Monaco", 43.7338, 7.4215),
    circuit("Catalunya", 41.5638, 2.2585),
    circuit("Montreal", 45.5034, -73.5267),
    circuit("Spielberg", 47.2225, 14.7607),
    circuit("Silverstone", 52.0706, -1.0174),
    circuit("Spa-Francorchamps", 50.444, 5.9687),
    circuit("Budapest", 47.583, 19.2526),
    circuit("Zandvoort", 52.388408, 4.547122),
    circuit("Monza", 45.6169, 9.2825),
    circuit("Baku", 40.3699, 49.8433),
    circuit("Singapore", 1.2857, 103.8575),
    circuit("Austin", 30.1328, -97.6411),
    circuit("Mexico City", 19.4028, -99.0986),
    circuit("Sao Paulo", -23.7014, -46.6969),
    circuit("Las Vegas", 36.166747, -115.148708),
    circuit("Doha", 25.490292, 51.45303),
    circuit("Yas Marina", 24.4821, 54.3482),
];

/// The registry coordinates, in registry order.
pub fn circuit_locations() -> Vec<LatLon> {
    CIRCUITS.iter().map(|c| c.location).collect()
}

/// Looks up the circuit name for a coordinate, for log lines.
pub fn circuit_name(location: LatLon) -> Option<&'static str> {
    CIRCUITS
        .iter()
        .find(|c| c.location == location)
        .map(|c| c.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_order_and_size() {
        let locations = circuit_locations();
        assert_eq!(locations.len(), 24);
        assert_eq!(locations[0], LatLon(-37.8373, 144.9666));
        assert_eq!(locations[23], LatLon(24.4821, 54.3482));
    }

    #[test]
    fn test_cache_file_names_are_unique() {
        let names: HashSet<String> = CIRCUITS
            .iter()
            .map(|c| c.location.cache_file_name())
            .collect();
        assert_eq!(names.len(), CIRCUITS.len());
    }

    #[test]
    fn test_circuit_name() {
        assert_eq!(circuit_name(LatLon(43.7338, 7.4215)), Some("Monaco"));
        assert_eq!(circuit_name(LatLon(0.0, 0.0)), None);
    }
}
