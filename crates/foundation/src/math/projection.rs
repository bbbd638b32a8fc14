use std::f64::consts::{FRAC_PI_4, PI};

use super::GeoPoint;
use crate::bounds::Aabb2;

/// Visible plot area in percent; markers never leave it.
pub const PLOT_AREA: Aabb2 = Aabb2::new([2.0, 2.0], [98.0, 98.0]);

/// Latitudes are pulled inside this bound before projecting, so the
/// logarithm always sees a positive argument.
const MAX_PROJECTED_LAT: f64 = 89.999_999;

/// Position on the map in percent of width/height, origin top-left.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MapPosition {
    pub x: f64,
    pub y: f64,
}

/// Mercator-style plot projection.
///
/// Longitude maps linearly onto `x`; latitude goes through
/// `ln(tan(π/4 + φ/2))` and is inverted so the north is at the top. The result
/// is clamped to [`PLOT_AREA`]. Latitudes at or beyond the poles are not
/// rejected: they land on the clamped edge. NaN input stays NaN.
pub fn project_mercator(point: GeoPoint) -> MapPosition {
    let x = (point.lng + 180.0) / 360.0 * 100.0;
    let lat_rad = point
        .lat
        .clamp(-MAX_PROJECTED_LAT, MAX_PROJECTED_LAT)
        .to_radians();
    let merc_n = (FRAC_PI_4 + lat_rad / 2.0).tan().ln();
    let y = (1.0 - merc_n / PI) * 50.0;

    let [x, y] = PLOT_AREA.clamp([x, y]);
    MapPosition { x, y }
}
