//! Measuring stations: validation, city filtering and map lookups.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::readings::coerce_value;
use crate::error::{AirdashError, Result};
use crate::source::RawStation;

/// A validated measuring station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub address: String,
    /// WGS84 latitude (`dmX`)
    pub latitude: f64,
    /// WGS84 longitude (`dmY`)
    pub longitude: f64,
}

impl Station {
    /// Validate a raw station record.
    ///
    /// The name and both coordinates are required. A missing address is
    /// kept as an empty string, which simply never matches a city.
    pub fn from_raw(raw: &RawStation) -> Result<Self> {
        let name = raw
            .station_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AirdashError::parse("station record has no stationName"))?;

        let latitude = coerce_value(raw.dm_x.as_ref()).ok_or_else(|| {
            AirdashError::parse(format!("station {} has invalid dmX {:?}", name, raw.dm_x))
        })?;
        let longitude = coerce_value(raw.dm_y.as_ref()).ok_or_else(|| {
            AirdashError::parse(format!("station {} has invalid dmY {:?}", name, raw.dm_y))
        })?;

        Ok(Self {
            name: name.to_string(),
            address: raw.addr.clone().unwrap_or_default(),
            latitude,
            longitude,
        })
    }

    /// Manhattan distance on raw degrees.
    pub fn manhattan_distance(&self, lat: f64, lon: f64) -> f64 {
        (self.latitude - lat).abs() + (self.longitude - lon).abs()
    }
}

/// Validate a raw station list, skipping records that fail.
pub fn parse_stations(raw: &[RawStation]) -> Vec<Station> {
    raw.iter()
        .filter_map(|record| match Station::from_raw(record) {
            Ok(station) => Some(station),
            Err(e) => {
                warn!(error = %e, "Skipping station record");
                None
            }
        })
        .collect()
}

/// Whether an address belongs to a city.
///
/// Province-level names appear at the start of the address ("경기 수원시
/// ..."), while metropolitan cities are sometimes written in full ("부산광역시
/// ...") or with a bare 시 suffix, so all three forms are accepted.
pub fn address_matches_city(address: &str, city: &str) -> bool {
    address.starts_with(city)
        || address.contains(&format!("{}시", city))
        || address.contains(&format!("{}광역시", city))
}

/// Stations whose address matches `city`, sorted by name.
///
/// The sort is stable, so stations sharing a name keep their input order.
pub fn filter_by_city(stations: &[Station], city: &str) -> Vec<Station> {
    let mut matched: Vec<Station> = stations
        .iter()
        .filter(|station| address_matches_city(&station.address, city))
        .cloned()
        .collect();
    matched.sort_by(|a, b| a.name.cmp(&b.name));
    matched
}

/// The station closest to a point by Manhattan distance.
///
/// Ties go to the station listed first. Returns `None` for an empty list.
pub fn nearest_station(stations: &[Station], lat: f64, lon: f64) -> Option<&Station> {
    let mut best: Option<(&Station, f64)> = None;
    for station in stations {
        let distance = station.manhattan_distance(lat, lon);
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((station, distance));
        }
    }
    best.map(|(station, _)| station)
}

/// A map click reported by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapClick {
    pub lat: f64,
    pub lon: f64,
}

/// What the user currently has selected on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub city: String,
    /// Station picked from the list, if any
    pub station: Option<String>,
    /// Most recent map click, if any
    pub click: Option<MapClick>,
}

/// Decide which station is active for a selection.
///
/// A map click wins, then an explicitly chosen station that is still in the
/// list, then the first station of the list.
pub fn resolve_selection<'a>(
    stations: &'a [Station],
    selection: &Selection,
) -> Option<&'a Station> {
    if let Some(click) = selection.click {
        return nearest_station(stations, click.lat, click.lon);
    }

    selection
        .station
        .as_deref()
        .and_then(|name| stations.iter().find(|station| station.name == name))
        .or_else(|| stations.first())
}
