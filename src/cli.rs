use clap::Parser;
use log::{debug, warn};
use std::ffi::OsString;
use thiserror::Error;

use crate::frames::SezVector;
use crate::origin::GeodeticOrigin;

pub const USAGE: &str = "sez-to-ecef o_lat_deg o_lon_deg o_hae_km s_km e_km z_km";

/// Convert SEZ components relative to a geodetic origin into ECEF components.
///
/// Two matrix rotations (latitude, then longitude) followed by a translation
/// by the origin's ECEF position. Angles in degrees, everything else in km.
#[derive(Debug, Parser)]
#[command(name = "sez-to-ecef", version, override_usage = USAGE)]
pub struct Args {
    /// o_lat_deg o_lon_deg o_hae_km s_km e_km z_km
    #[arg(value_name = "VALUE", num_args = 0.., allow_hyphen_values = true)]
    pub values: Vec<String>,
}

impl Args {
    /// Help and version are honoured only as the sole argument. Every other
    /// token, `--` and anything hyphenated included, is a positional value.
    pub fn from_argv<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();

        match argv.as_slice() {
            [_, flag] if is_info_flag(flag) => Self::try_parse_from(&argv),
            _ => Ok(Self {
                values: argv
                    .iter()
                    .skip(1)
                    .map(|arg| arg.to_string_lossy().into_owned())
                    .collect(),
            }),
        }
    }
}

fn is_info_flag(arg: &OsString) -> bool {
    matches!(
        arg.to_str(),
        Some("-h" | "--help" | "-V" | "--version")
    )
}

#[derive(Debug, PartialEq, Error)]
pub enum CliError {
    /// Anything other than exactly six positional values.
    #[error("{}", USAGE)]
    Usage,

    /// A positional value that is not a real number.
    #[error("Error: lat_deg, long_deg and hae_km must be numeric.")]
    Parse { value: String },
}

/// Parsed command line, ready for conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Input {
    pub origin: GeodeticOrigin,
    pub sez: SezVector,
}

impl Input {
    pub fn from_values(values: &[String]) -> Result<Self, CliError> {
        if values.len() != 6 {
            debug!("expected 6 values, got {}", values.len());
            return Err(CliError::Usage);
        }

        let parsed = values
            .iter()
            .map(|value| parse_value(value))
            .collect::<Result<Vec<_>, _>>()?;

        let parsed: [f64; 6] = parsed.try_into().map_err(|_| CliError::Usage)?;
        check_domain(&parsed);

        let [lat_deg, lon_deg, hae_km, s_km, e_km, z_km] = parsed;

        debug!(
            "origin: lat={}° lon={}° hae={} km, sez: s={} e={} z={} km",
            lat_deg, lon_deg, hae_km, s_km, e_km, z_km
        );

        Ok(Self {
            origin: GeodeticOrigin::from_degrees(lat_deg, lon_deg, hae_km),
            sez: SezVector::new(s_km, e_km, z_km),
        })
    }
}

fn parse_value(value: &str) -> Result<f64, CliError> {
    value.trim().parse::<f64>().map_err(|_| CliError::Parse {
        value: value.to_string(),
    })
}

// Out-of-range angles are still processed; trig is periodic.
fn check_domain(values: &[f64; 6]) {
    let (lat_deg, lon_deg) = (values[0], values[1]);

    if values.iter().any(|v| !v.is_finite()) {
        warn!("non-finite input, output will not be finite");
        return;
    }

    if !(-90.0..=90.0).contains(&lat_deg) {
        warn!("latitude {}° outside [-90, 90]", lat_deg);
    }

    if !(-180.0..=180.0).contains(&lon_deg) {
        warn!("longitude {}° outside [-180, 180]", lon_deg);
    }
}
