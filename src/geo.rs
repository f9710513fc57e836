use crate::constants::EARTH_RADIUS_MILES;

/// A latitude/longitude pair in degrees.
///
/// No range validation is performed; callers are trusted to supply
/// sensible coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Great-circle distance between two positions in miles (haversine).
///
/// Symmetric, and zero iff the positions are equal.
pub fn geo_distance(p1: Position, p2: Position) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (p2.lon - p1.lon).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + (dlon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    2.0 * EARTH_RADIUS_MILES * a.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_zero_for_equal_positions() {
        let p = Position::new(37.0, -122.0);
        assert_eq!(geo_distance(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let sf = Position::new(37.78, -122.42);
        let ny = Position::new(40.71, -74.01);
        let d1 = geo_distance(sf, ny);
        let d2 = geo_distance(ny, sf);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn transcontinental_distance_is_plausible() {
        // SF to NYC is roughly 2,570 miles.
        let sf = Position::new(37.78, -122.42);
        let ny = Position::new(40.71, -74.01);
        let d = geo_distance(sf, ny);
        assert!(d > 2400.0 && d < 2700.0, "got {d}");
    }

    #[test]
    fn display_shows_lat_lon_pair() {
        let p = Position::new(38.0, -122.0);
        assert_eq!(p.to_string(), "(38, -122)");
    }
}
