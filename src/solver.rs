// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! Hour-angle solving for a given sun altitude.
//!
//! All times produced here are in *local apparent* hours relative to the
//! longitude-adjusted Julian date; the engine shifts them to clock time
//! afterwards.

use crate::angles::{arccos, arccot, cos, fix_hour, sin, tan};
use crate::julian_date::JulianDate;
use crate::prayer::PrayerTime;
use crate::solar::solar_position;
use qtty::Days;

/// How far outside `[-1, 1]` a cosine may drift and still be treated as the
/// boundary case rather than as "no solution".
pub const COS_RANGE_TOLERANCE: f64 = 1e-6;

/// Which side of solar noon an event falls on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Morning events: Imsak, Fajr, Sunrise.
    Before,
    /// Evening events: Asr, Sunset, Maghrib, Isha.
    After,
}

/// Solver bound to one date and observer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimeSolver {
    julian_date: JulianDate,
    latitude: f64,
}

impl TimeSolver {
    /// `julian_date` is the date at 0h; it is shifted here by the observer's
    /// longitude so that day fractions are local.
    pub fn new(julian_date: JulianDate, latitude: f64, longitude: f64) -> Self {
        Self {
            julian_date: julian_date - Days::new(longitude / (15.0 * 24.0)),
            latitude,
        }
    }

    /// The longitude-adjusted Julian date.
    #[inline]
    pub const fn julian_date(&self) -> JulianDate {
        self.julian_date
    }

    /// Sun transit in local apparent hours, `[0, 24)`.
    pub fn mid_day(&self, day_fraction: Days) -> f64 {
        let eqt = solar_position(self.julian_date + day_fraction).equation_of_time;
        fix_hour(12.0 - eqt)
    }

    /// Time at which the sun is `angle` degrees below the horizon.
    ///
    /// Returns [`PrayerTime::Invalid`] when the sun never reaches that
    /// depression on this day (polar day or night for this angle).
    pub fn sun_angle_time(
        &self,
        angle: f64,
        day_fraction: Days,
        direction: Direction,
    ) -> PrayerTime {
        let decl = solar_position(self.julian_date + day_fraction).declination;
        let noon = self.mid_day(day_fraction);

        let cos_range =
            (-sin(angle) - sin(decl) * sin(self.latitude)) / (cos(decl) * cos(self.latitude));
        if !cos_range.is_finite() || cos_range.abs() > 1.0 + COS_RANGE_TOLERANCE {
            return PrayerTime::Invalid;
        }

        let t = arccos(cos_range.clamp(-1.0, 1.0)) / 15.0;
        PrayerTime::from_hours(match direction {
            Direction::Before => noon - t,
            Direction::After => noon + t,
        })
    }

    /// Time at which a shadow reaches `factor` times the object's length
    /// plus its noon shadow.
    pub fn asr_time(&self, factor: f64, day_fraction: Days) -> PrayerTime {
        let decl = solar_position(self.julian_date + day_fraction).declination;
        let angle = -arccot(factor + tan((self.latitude - decl).abs()));
        self.sun_angle_time(angle, day_fraction, Direction::After)
    }
}
