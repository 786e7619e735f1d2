// src/services/resolver.rs

//! Nearest-station lookup.

use crate::error::ResolveError;
use crate::models::{ReferenceLocation, StationRecord};

/// Mean Earth radius in kilometers (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance in kilometers between two `(lat, lng)` points in decimal degrees.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lng2) = (to.0.to_radians(), to.1.to_radians());

    let half_dlat = ((lat2 - lat1) / 2.0).sin();
    let half_dlng = ((lng2 - lng1) / 2.0).sin();
    let a = half_dlat * half_dlat + lat1.cos() * lat2.cos() * half_dlng * half_dlng;

    // Rounding can push `a` a hair past 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * a.min(1.0).sqrt().asin()
}

/// Find the station closest to `reference` and its distance in kilometers.
///
/// Exact ties go to the station that appears first in `stations`.
pub fn resolve<'a>(
    reference: ReferenceLocation,
    stations: &'a [StationRecord],
) -> Result<(&'a StationRecord, f64), ResolveError> {
    let origin = (reference.lat, reference.lng);
    let mut nearest: Option<(&StationRecord, f64)> = None;

    for station in stations {
        let distance = haversine_km(origin, (station.lat, station.lng));
        let closer = match nearest {
            None => true,
            Some((_, best)) => distance < best || (best.is_nan() && !distance.is_nan()),
        };
        if closer {
            nearest = Some((station, distance));
        }
    }

    nearest.ok_or(ResolveError::NoStations)
}
