// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! Observer location.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geographic location on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLocation"))]
pub struct Location {
    latitude: f64,
    longitude: f64,
    elevation: f64,
}

impl Location {
    /// Validated location.
    ///
    /// * `latitude`: degrees, north positive, in `[-90, 90]`.
    /// * `longitude`: degrees, east positive, in `[-180, 180]`.
    /// * `elevation`: metres above the surrounding terrain, `>= 0`.
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::LongitudeOutOfRange(longitude));
        }
        if !elevation.is_finite() || elevation < 0.0 {
            return Err(Error::InvalidElevation(elevation));
        }
        Ok(Self::from_parts(latitude, longitude, elevation))
    }

    /// Sea-level location.
    pub fn at_sea_level(latitude: f64, longitude: f64) -> Result<Self> {
        Self::new(latitude, longitude, 0.0)
    }

    /// Unchecked constructor for compile-time tables.
    pub(crate) const fn from_parts(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
        }
    }

    #[inline]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    #[inline]
    pub const fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Sun depression below the horizon at sunrise/sunset, in degrees.
    ///
    /// 0.833° of refraction plus semi-diameter, deepened by the horizon dip
    /// seen from an elevated observer.
    pub fn rise_set_angle(&self) -> f64 {
        0.833 + 0.0347 * self.elevation.sqrt()
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawLocation {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    elevation: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLocation> for Location {
    type Error = Error;

    fn try_from(raw: RawLocation) -> Result<Self> {
        Location::new(raw.latitude, raw.longitude, raw.elevation)
    }
}
