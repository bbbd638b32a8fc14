use foundation::math::{GeoPoint, haversine_km};
use records::Record;

pub struct SpatialAnalysis;

impl SpatialAnalysis {
    /// Records whose position lies within `radius_km` of `center`.
    pub fn within_radius<'a, R: Record>(
        records: &'a [R],
        center: GeoPoint,
        radius_km: f64,
    ) -> impl Iterator<Item = &'a R> + 'a {
        records
            .iter()
            .filter(move |r| r.point().within_km(center, radius_km))
    }

    /// Returns (index, distance in km) of the closest record. Ties keep the
    /// earlier record.
    pub fn nearest<R: Record>(records: &[R], target: GeoPoint) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, r) in records.iter().enumerate() {
            let d = haversine_km(r.point(), target);
            if best.map(|(_, bd)| d < bd).unwrap_or(true) {
                best = Some((i, d));
            }
        }
        best
    }
}
