// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! Salat
//!
//! Daily Islamic prayer times from a low-precision solar ephemeris.
//!
//! # Core types
//!
//! - [`PrayerTimesEngine`]: method registry plus the computation pipeline.
//! - [`ObservationDate`]: civil date with the caller-resolved UTC offset.
//! - [`Location`]: validated latitude, longitude and elevation.
//! - [`Configuration`]: method, school, high-latitude policy, output format
//!   and per-event minute offsets.
//! - [`ComputationResult`]: one [`FormattedTime`] per [`Prayer`].
//! - [`JulianDate`]: `Days`-backed Julian day used by the ephemeris.
//!
//! # Events
//!
//! | Event | Definition |
//! |-------|------------|
//! | Imsak | minutes before Fajr, or its own angle |
//! | Fajr | sun at the method's angle below the horizon, morning |
//! | Sunrise | upper limb on the horizon (0.833° plus elevation dip) |
//! | Dhuhr | solar transit, plus optional minutes |
//! | Asr | shadow length reaches the school factor plus the noon shadow |
//! | Sunset | upper limb on the horizon, evening |
//! | Maghrib | minutes after Sunset, or its own angle |
//! | Isha | sun at the method's angle, evening, or minutes after Maghrib |
//! | Midnight | halfway from Sunset to Sunrise (Fajr under Jafari) |
//! | Firstthird / Lastthird | one and two thirds of the same interval |
//!
//! Events without a geometric solution on a given day (polar day or night)
//! are [`PrayerTime::Invalid`] and render as [`INVALID_TIME`].
//!
//! # Example
//!
//! ```
//! use salat::{Configuration, Location, MethodKey, ObservationDate, Prayer, PrayerTimesEngine};
//!
//! let engine = PrayerTimesEngine::new();
//! let date = ObservationDate::from_ymd(2024, 3, 20)
//!     .unwrap()
//!     .with_utc_offset_hours(-5.0)
//!     .unwrap();
//! let location = Location::at_sea_level(39.7042, -86.3994).unwrap();
//! let times = engine.compute_times(&date, &location, &Configuration::new(MethodKey::Isna));
//!
//! assert_eq!(times.get(Prayer::Dhuhr).to_string(), "12:53");
//! ```

mod angles;
mod config;
mod date;
mod engine;
mod error;
mod format;
mod high_latitude;
mod julian_date;
mod location;
mod method;
mod prayer;
mod settings;
mod solar;
mod solver;
mod tune;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use config::{
    Configuration, LatitudeAdjustment, MidnightMode, School, Shafaq, TimeFormat, Tuning,
};
pub use date::ObservationDate;
pub use engine::{
    CalculationMeta, ComputationResult, Passthrough, PrayerTimesEngine, RecalcContext,
    Recalculation,
};
pub use error::{Error, LenientParse, Result};
pub use format::{format_time, FormattedTime};
pub use high_latitude::{adjust_time, night_portion};
pub use julian_date::JulianDate;
pub use location::Location;
pub use method::{
    builtin_method, MethodDescriptor, MethodKey, MethodParams, MethodRegistry, ParamValue,
    CUSTOM_METHOD_ID,
};
pub use prayer::{Prayer, PrayerTime, PrayerTimes, INVALID_TIME};
pub use settings::ResolvedSettings;
pub use solar::{solar_position, SolarPosition};
pub use solver::{Direction, TimeSolver};
