use serde::{Deserialize, Serialize};

use crate::error::LocatorError;

/// Mean Earth radius in meters, used for the spherical-earth distance.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, specta::Type)]
pub struct Coordinate {
    pub lat: f64,
    pub long: f64,
}

impl Coordinate {
    /// Build a coordinate, checking the degree bounds. (0, 0) is a real
    /// point in the Gulf of Guinea, not a missing value.
    pub fn new(lat: f64, long: f64) -> Result<Self, LocatorError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(LocatorError::InvalidArgument(format!(
                "latitude out of range: {lat}"
            )));
        }
        if !long.is_finite() || !(-180.0..=180.0).contains(&long) {
            return Err(LocatorError::InvalidArgument(format!(
                "longitude out of range: {long}"
            )));
        }
        Ok(Self { lat, long })
    }
}

/// Great-circle surface distance between two coordinates in meters
/// (haversine over a sphere of [EARTH_RADIUS_M]).
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_long = (b.long - a.long).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_long / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}
