//! Continent-scale tinting: each region takes the mean intensity of the
//! records near its center, and the ocean reflects the global mean.

use compute::SpatialAnalysis;
use foundation::math::{EARTH_RADIUS_KM, GeoPoint, MAX_SURFACE_DISTANCE_KM};
use records::{Category, Snapshot};
use serde::Serialize;

use crate::encoding::VisualEncoding;
use crate::symbology::Rgb;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Region {
    pub name: &'static str,
    pub center: GeoPoint,
}

const fn region(name: &'static str, lat: f64, lng: f64) -> Region {
    Region {
        name,
        center: GeoPoint::new(lat, lng),
    }
}

pub const REGIONS: [Region; 7] = [
    region("North America", 45.0, -100.0),
    region("South America", -15.0, -60.0),
    region("Europe", 50.0, 10.0),
    region("Africa", 0.0, 20.0),
    region("Asia", 30.0, 100.0),
    region("Australia", -25.0, 135.0),
    region("Antarctica", -80.0, 0.0),
];

const REGION_ARC_DEG: f64 = 15.0;

/// Great-circle radius of a region: 15° of arc.
pub const REGION_RADIUS_KM: f64 = REGION_ARC_DEG * std::f64::consts::PI / 180.0 * EARTH_RADIUS_KM;

/// Covers every point on the sphere.
pub const GLOBAL_RADIUS_KM: f64 = MAX_SURFACE_DISTANCE_KM;

pub const EMPTY_OCEAN: Rgb = Rgb::hex(0x3b82f6);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionFill {
    pub name: &'static str,
    pub intensity: f64,
    pub color: Rgb,
}

/// Mean intensity of the records within `radius_km` of `center`, capped at 1.
/// Zero when no record is in range.
pub fn region_intensity<R: VisualEncoding>(records: &[R], center: GeoPoint, radius_km: f64) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for r in SpatialAnalysis::within_radius(records, center, radius_km) {
        sum += r.intensity();
        count += 1;
    }
    if count == 0 {
        return 0.0;
    }
    (sum / count as f64).min(1.0)
}

pub fn region_color(category: Category, intensity: f64) -> Rgb {
    let i = intensity.clamp(0.0, 1.0);
    let j = 1.0 - i;
    match category {
        Category::Temperature => Rgb::from_channels(255.0 * i, 120.0 * i + 180.0 * j, 255.0 * j),
        Category::Disasters => Rgb::from_channels(255.0 * i, 255.0 * j, 0.0),
        Category::Environmental => Rgb::from_channels(255.0 * i, 200.0 * j, 100.0 * j),
    }
}

pub fn region_fills<R: VisualEncoding>(records: &[R]) -> Vec<RegionFill> {
    REGIONS
        .iter()
        .map(|region| {
            let intensity = region_intensity(records, region.center, REGION_RADIUS_KM);
            RegionFill {
                name: region.name,
                intensity,
                color: region_color(R::CATEGORY, intensity),
            }
        })
        .collect()
}

/// Ocean tint for the active category, driven by the global mean intensity.
/// Falls back to [`EMPTY_OCEAN`] when the snapshot holds no records at all.
pub fn ocean_color(snapshot: &Snapshot, category: Category) -> Rgb {
    if snapshot.is_empty() {
        return EMPTY_OCEAN;
    }
    let origin = GeoPoint::new(0.0, 0.0);
    let i = match category {
        Category::Temperature => region_intensity(&snapshot.climate, origin, GLOBAL_RADIUS_KM),
        Category::Disasters => region_intensity(&snapshot.disasters, origin, GLOBAL_RADIUS_KM),
        Category::Environmental => {
            region_intensity(&snapshot.environmental, origin, GLOBAL_RADIUS_KM)
        }
    };
    match category {
        Category::Temperature => {
            Rgb::from_channels(60.0 + 80.0 * i, 120.0 + 80.0 * i, 220.0 - 60.0 * i)
        }
        Category::Disasters => {
            Rgb::from_channels(70.0 + 100.0 * i, 110.0 - 40.0 * i, 210.0 - 80.0 * i)
        }
        Category::Environmental => {
            Rgb::from_channels(60.0 + 80.0 * i, 130.0 + 60.0 * i, 200.0 - 60.0 * i)
        }
    }
}
