use std::f64::consts::PI;

use log::debug;
use nalgebra::Vector3;

// Reference ellipsoid
pub const R_E_KM: f64 = 6378.1363; // equatorial radius (km)
pub const E_E: f64 = 0.081819221456; // eccentricity (unitless)

/// Origin of the topocentric SEZ frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticOrigin {
    pub latitude: f64,  // radians
    pub longitude: f64, // radians
    pub height_km: f64, // above ellipsoid
}

impl GeodeticOrigin {
    pub fn new(latitude: f64, longitude: f64, height_km: f64) -> Self {
        Self {
            latitude,
            longitude,
            height_km,
        }
    }

    pub fn from_degrees(lat_deg: f64, lon_deg: f64, height_km: f64) -> Self {
        Self::new(lat_deg * PI / 180.0, lon_deg * PI / 180.0, height_km)
    }

    // Convert origin location to ECEF coordinates (km)
    pub fn to_ecef(&self) -> Vector3<f64> {
        let denom = ellipsoid_denominator(E_E, self.latitude);

        // prime vertical radius of curvature and its meridional counterpart
        let c_e = R_E_KM / denom;
        let s_e = R_E_KM * (1.0 - E_E * E_E) / denom;

        let x = (c_e + self.height_km) * self.latitude.cos() * self.longitude.cos();
        let y = (c_e + self.height_km) * self.latitude.cos() * self.longitude.sin();
        let z = (s_e + self.height_km) * self.latitude.sin();

        debug!("origin ecef (km): x={} y={} z={}", x, y, z);

        Vector3::new(x, y, z)
    }
}

/// `sqrt(1 - e² sin²(lat))`, real and positive for any `ecc` in [0, 1).
pub fn ellipsoid_denominator(ecc: f64, lat_rad: f64) -> f64 {
    (1.0 - ecc.powi(2) * lat_rad.sin().powi(2)).sqrt()
}
