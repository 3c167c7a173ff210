use log::debug;
use nalgebra::{Matrix3, Vector3};

use crate::origin::GeodeticOrigin;

/// Topocentric offset from the origin (km).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SezVector {
    pub south: f64,
    pub east: f64,
    pub zenith: f64,
}

/// Earth-centered, earth-fixed position (km).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EcefVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SezVector {
    pub fn new(south: f64, east: f64, zenith: f64) -> Self {
        Self {
            south,
            east,
            zenith,
        }
    }

    /// Slant range from the origin (km).
    #[cfg(test)]
    pub fn range_km(&self) -> f64 {
        self.as_vector().norm()
    }

    fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.south, self.east, self.zenith)
    }
}

impl EcefVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for EcefVector {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
impl From<Vector3<f64>> for SezVector {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// First rotation: tilts the SEZ axes by the origin latitude.
pub fn latitude_rotation(lat_rad: f64) -> Matrix3<f64> {
    let (sin_lat, cos_lat) = lat_rad.sin_cos();

    Matrix3::new(
        sin_lat, 0.0, cos_lat, //
        0.0, 1.0, 0.0, //
        -cos_lat, 0.0, sin_lat,
    )
}

/// Second rotation: about the polar axis by the origin longitude.
pub fn longitude_rotation(lon_rad: f64) -> Matrix3<f64> {
    let (sin_lon, cos_lon) = lon_rad.sin_cos();

    Matrix3::new(
        cos_lon, -sin_lon, 0.0, //
        sin_lon, cos_lon, 0.0, //
        0.0, 0.0, 1.0,
    )
}

/// Rotate `sez` into the ECEF axes and translate it by the origin position.
pub fn sez_to_ecef(origin: &GeodeticOrigin, sez: &SezVector) -> EcefVector {
    let origin_ecef = origin.to_ecef();

    let ry_lat = latitude_rotation(origin.latitude);
    let rz_lon = longitude_rotation(origin.longitude);

    let rot_1 = ry_lat * sez.as_vector();
    let rot_2 = rz_lon * rot_1;

    debug!("rotated sez (km): {:?}", rot_2.as_slice());

    EcefVector::from(origin_ecef + rot_2)
}

/// Inverse of [`sez_to_ecef`]: express an ECEF point in the origin's SEZ frame.
#[cfg(test)]
pub fn ecef_to_sez(origin: &GeodeticOrigin, ecef: &EcefVector) -> SezVector {
    let range_vec = ecef.as_vector() - origin.to_ecef();

    // Both rotations are orthogonal, so the transposes undo them
    let ry_lat = latitude_rotation(origin.latitude);
    let rz_lon = longitude_rotation(origin.longitude);

    SezVector::from(ry_lat.transpose() * (rz_lon.transpose() * range_vec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::origin::R_E_KM;
    use rstest::*;

    fn assert_close(actual: &EcefVector, expected: &EcefVector, tol: f64) {
        let diff = actual.as_vector() - expected.as_vector();
        assert!(
            diff.norm() < tol,
            "{:?} differs from {:?} by {}",
            actual,
            expected,
            diff.norm()
        );
    }

    #[test]
    fn test_zero_offset_at_equator() {
        let origin = GeodeticOrigin::from_degrees(0.0, 0.0, 0.0);
        let ecef = sez_to_ecef(&origin, &SezVector::new(0.0, 0.0, 0.0));

        assert_close(&ecef, &EcefVector::new(R_E_KM, 0.0, 0.0), 1e-9);
    }

    #[rstest]
    #[case(0.0, 0.0, 0.0)]
    #[case(37.2299, -80.4142, 0.634)]
    #[case(-33.8688, 151.2093, 0.058)]
    #[case(89.9, 45.0, 2.5)]
    #[case(120.0, 400.0, -1.0)]
    fn test_zero_offset_returns_origin(#[case] lat: f64, #[case] lon: f64, #[case] hae: f64) {
        let origin = GeodeticOrigin::from_degrees(lat, lon, hae);
        let ecef = sez_to_ecef(&origin, &SezVector::new(0.0, 0.0, 0.0));

        assert_eq!(ecef, EcefVector::from(origin.to_ecef()));
    }

    #[test]
    fn test_zenith_at_equator_points_outward() {
        let origin = GeodeticOrigin::from_degrees(0.0, 0.0, 0.0);
        let ecef = sez_to_ecef(&origin, &SezVector::new(0.0, 0.0, 100.0));

        assert_close(&ecef, &EcefVector::new(R_E_KM + 100.0, 0.0, 0.0), 1e-9);
    }

    #[test]
    fn test_south_and_east_at_equator() {
        let origin = GeodeticOrigin::from_degrees(0.0, 0.0, 0.0);

        // south points toward -z, east toward +y
        let south = sez_to_ecef(&origin, &SezVector::new(10.0, 0.0, 0.0));
        assert_close(&south, &EcefVector::new(R_E_KM, 0.0, -10.0), 1e-9);

        let east = sez_to_ecef(&origin, &SezVector::new(0.0, 10.0, 0.0));
        assert_close(&east, &EcefVector::new(R_E_KM, 10.0, 0.0), 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let origin = GeodeticOrigin::from_degrees(51.4779, -0.0015, 0.045);
        let sez = SezVector::new(-12.5, 3.25, 0.75);

        let first = sez_to_ecef(&origin, &sez);
        let second = sez_to_ecef(&origin, &sez);

        assert_eq!(first.x.to_bits(), second.x.to_bits());
        assert_eq!(first.y.to_bits(), second.y.to_bits());
        assert_eq!(first.z.to_bits(), second.z.to_bits());
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.65)]
    #[case(-1.2)]
    #[case(3.0)]
    fn test_rotations_are_orthogonal(#[case] angle: f64) {
        let identity = Matrix3::<f64>::identity();

        for rot in [latitude_rotation(angle), longitude_rotation(angle)] {
            assert!((rot.transpose() * rot - identity).norm() < 1e-12);
            assert!((rot.determinant() - 1.0).abs() < 1e-12);
        }
    }

    #[rstest]
    #[case(37.2299, -80.4142, 0.634, 120.0, -45.0, 300.0)]
    #[case(-70.0, 10.0, 3.0, -1.5, 0.25, 0.0)]
    #[case(0.0, 180.0, 0.0, 0.0, 0.0, 35786.0)]
    fn test_inverse_round_trip(
        #[case] lat: f64,
        #[case] lon: f64,
        #[case] hae: f64,
        #[case] s: f64,
        #[case] e: f64,
        #[case] z: f64,
    ) {
        let origin = GeodeticOrigin::from_degrees(lat, lon, hae);
        let sez = SezVector::new(s, e, z);

        let back = ecef_to_sez(&origin, &sez_to_ecef(&origin, &sez));

        assert!((back.as_vector() - sez.as_vector()).norm() < 1e-9);
    }

    #[test]
    fn test_rotation_preserves_range() {
        let origin = GeodeticOrigin::from_degrees(48.8566, 2.3522, 0.035);
        let sez = SezVector::new(300.0, -150.0, 800.0);

        let ecef = sez_to_ecef(&origin, &sez);
        let offset = ecef.as_vector() - origin.to_ecef();

        assert!((offset.norm() - sez.range_km()).abs() < 1e-9);
    }
}
