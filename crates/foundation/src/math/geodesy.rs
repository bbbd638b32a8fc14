/// Mean Earth radius used for great-circle distances (kilometers).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Half the circumference of the sphere: no two points are farther apart.
pub const MAX_SURFACE_DISTANCE_KM: f64 = std::f64::consts::PI * EARTH_RADIUS_KM;

/// Geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn distance_km(self, other: GeoPoint) -> f64 {
        haversine_km(self, other)
    }

    /// Circular region membership: `distance(self, center) <= radius_km`.
    pub fn within_km(self, center: GeoPoint, radius_km: f64) -> bool {
        haversine_km(self, center) <= radius_km
    }
}

/// Great-circle distance between two points on a sphere of radius
/// [`EARTH_RADIUS_KM`].
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let sin_lat = (d_lat / 2.0).sin();
    let sin_lng = (d_lng / 2.0).sin();

    let h = sin_lat * sin_lat
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * sin_lng * sin_lng;
    // Rounding can push near-antipodal pairs just past 1.
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
