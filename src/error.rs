// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! Construction-boundary errors.
//!
//! The computation pipeline itself never fails: unsolvable geometry is the
//! [`PrayerTime::Invalid`](crate::PrayerTime::Invalid) sentinel. These errors
//! are only produced when parsing configuration values or building a
//! [`Location`](crate::Location) / [`ObservationDate`](crate::ObservationDate),
//! and [`LenientParse`] turns the parse errors into documented defaults.

use log::warn;
use std::fmt::Debug;
use std::str::FromStr;

/// Result alias for fallible constructors in this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("unknown {kind} `{value}`")]
    UnknownValue { kind: &'static str, value: String },

    #[error("latitude {0}° is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0}° is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("elevation {0} m must be finite and non-negative")]
    InvalidElevation(f64),

    #[error("UTC offset {0} h cannot be represented as a fixed offset")]
    InvalidUtcOffset(f64),
}

impl Error {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Error::UnknownValue {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Parse a configuration string, falling back to the type's default.
///
/// Unrecognised input is never an error for callers of the engine; it is
/// logged at `warn` level and replaced.
pub trait LenientParse: Sized {
    fn parse_lenient(raw: &str) -> Self;
}

impl<T> LenientParse for T
where
    T: FromStr<Err = Error> + Default + Debug,
{
    fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|err| {
            let fallback = T::default();
            warn!("{err}; falling back to {fallback:?}");
            fallback
        })
    }
}
