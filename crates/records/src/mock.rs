//! Synthetic records: the dashboard's offline fallback and the server's seed
//! batches draw from the same generators.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::{
    ClimateRecord, DisasterRecord, EnvironmentalRecord, NewClimateRecord, NewDisasterRecord,
    NewEnvironmentalRecord, Severity,
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MockLocation {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

const fn loc(name: &'static str, lat: f64, lng: f64) -> MockLocation {
    MockLocation { name, lat, lng }
}

pub static LOCATIONS: [MockLocation; 15] = [
    loc("New York", 40.7128, -74.0060),
    loc("London", 51.5074, -0.1278),
    loc("Tokyo", 35.6762, 139.6503),
    loc("Sydney", -33.8688, 151.2093),
    loc("Cairo", 30.0444, 31.2357),
    loc("Mumbai", 19.0760, 72.8777),
    loc("São Paulo", -23.5505, -46.6333),
    loc("Lagos", 6.5244, 3.3792),
    loc("Beijing", 39.9042, 116.4074),
    loc("Mexico City", 19.4326, -99.1332),
    loc("Moscow", 55.7558, 37.6176),
    loc("Jakarta", -6.2088, 106.8456),
    loc("Delhi", 28.7041, 77.1025),
    loc("Manila", 14.5995, 120.9842),
    loc("Karachi", 24.8607, 67.0011),
];

const SEED_COUNT: usize = 10;

/// The server seeds from the first ten locations only.
pub fn seed_locations() -> &'static [MockLocation] {
    &LOCATIONS[..SEED_COUNT]
}

pub const DISASTER_TYPES: [&str; 10] = [
    "Earthquake",
    "Hurricane",
    "Wildfire",
    "Flood",
    "Tornado",
    "Tsunami",
    "Volcanic Activity",
    "Drought",
    "Blizzard",
    "Heatwave",
];

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn recent<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>, span_ms: i64) -> DateTime<Utc> {
    now - TimeDelta::milliseconds(rng.gen_range(0..span_ms))
}

fn temperature<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    round1(rng.gen_range(-10.0..30.0))
}

fn humidity<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0..=100) as f64
}

fn wind_speed<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    round1(rng.gen_range(0.0..50.0))
}

pub fn random_climate<R: Rng + ?Sized>(rng: &mut R, at: &MockLocation) -> NewClimateRecord {
    NewClimateRecord {
        location: at.name.to_string(),
        lat: at.lat,
        lng: at.lng,
        temperature: temperature(rng),
        humidity: humidity(rng),
        wind_speed: wind_speed(rng),
    }
}

/// Re-rolls the weather values of an existing reading and restamps it.
pub fn refresh_climate<R: Rng + ?Sized>(
    rng: &mut R,
    record: &mut ClimateRecord,
    now: DateTime<Utc>,
) {
    record.temperature = temperature(rng);
    record.humidity = humidity(rng);
    record.wind_speed = wind_speed(rng);
    record.timestamp = now;
}

/// Random disaster near one of `locations` (jittered by up to ±0.05°).
pub fn random_disaster<R: Rng + ?Sized>(
    rng: &mut R,
    locations: &[MockLocation],
) -> NewDisasterRecord {
    let at = locations.choose(rng).copied().unwrap_or(LOCATIONS[0]);
    let kind = DISASTER_TYPES.choose(rng).copied().unwrap_or(DISASTER_TYPES[0]);
    let severity = Severity::LEVELS
        .choose(rng)
        .cloned()
        .unwrap_or(Severity::Low);

    NewDisasterRecord {
        description: format!(
            "{severity} severity {} event in {}",
            kind.to_lowercase(),
            at.name
        ),
        kind: kind.to_string(),
        location: at.name.to_string(),
        lat: at.lat + rng.gen_range(-0.05..0.05),
        lng: at.lng + rng.gen_range(-0.05..0.05),
        severity,
    }
}

pub fn random_environmental<R: Rng + ?Sized>(
    rng: &mut R,
    at: &MockLocation,
) -> NewEnvironmentalRecord {
    NewEnvironmentalRecord {
        location: at.name.to_string(),
        lat: at.lat,
        lng: at.lng,
        air_quality: rng.gen_range(0..=300) as f64,
        co2_level: rng.gen_range(400..=500) as f64,
        pollution_index: round1(rng.gen_range(0.0..=10.0)),
    }
}

/// One reading per location, stamped within the last hour.
pub fn climate_records<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<ClimateRecord> {
    LOCATIONS
        .iter()
        .enumerate()
        .map(|(i, at)| {
            let ts = recent(rng, now, HOUR_MS);
            random_climate(rng, at).into_record(format!("climate-{i}"), ts)
        })
        .collect()
}

/// Three to ten disasters stamped within the last day.
pub fn disaster_records<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<DisasterRecord> {
    let count = rng.gen_range(3..=10);
    (0..count)
        .map(|i| {
            let ts = recent(rng, now, DAY_MS);
            random_disaster(rng, &LOCATIONS).into_record(format!("disaster-{i}"), ts)
        })
        .collect()
}

pub fn environmental_records<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<EnvironmentalRecord> {
    LOCATIONS
        .iter()
        .enumerate()
        .map(|(i, at)| {
            let ts = recent(rng, now, HOUR_MS);
            random_environmental(rng, at).into_record(format!("env-{i}"), ts)
        })
        .collect()
}

/// Timestamp for a seeded disaster: somewhere in the last day.
pub fn seed_disaster_time<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
    recent(rng, now, DAY_MS)
}
