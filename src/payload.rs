//! Request payload wire types.

use serde::{Deserialize, Serialize};

/// A geographic point as `(longitude, latitude)` in degrees.
///
/// Serializes as a two-element array `[lon, lat]`, the coordinate order
/// the clustering endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint(pub f64, pub f64);

impl GeoPoint {
    pub fn lon(&self) -> f64 {
        self.0
    }

    pub fn lat(&self) -> f64 {
        self.1
    }
}

/// The order payload POSTed to the clustering endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPayload {
    pub points: Vec<GeoPoint>,
    /// Vehicle tag the endpoint uses to size its service zones.
    #[serde(rename = "veh")]
    pub vehicle: String,
}

impl OrderPayload {
    /// Assemble a payload. The point set and vehicle tag must be non-empty;
    /// no further validation is applied.
    pub fn new(points: Vec<GeoPoint>, vehicle: impl Into<String>) -> anyhow::Result<Self> {
        let vehicle = vehicle.into();
        if points.is_empty() {
            anyhow::bail!("payload must contain at least one point");
        }
        if vehicle.is_empty() {
            anyhow::bail!("vehicle tag must not be empty");
        }
        Ok(Self { points, vehicle })
    }
}
