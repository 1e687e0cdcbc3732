// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! Julian Date instant used by the solar ephemeris.
//!
//! [`JulianDate`] stores a single [`Days`] quantity counted from the start of
//! the Julian Period.  Calendar dates are converted with the proleptic
//! Gregorian → Julian Day formula (Meeus, *Astronomical Algorithms*, ch. 7),
//! which yields the Julian Day at **0h** of the given date.

use chrono::{Datelike, NaiveDate};
use qtty::*;
use std::ops::{Add, Sub};

/// A point on the Julian Day axis.
///
/// `Copy` and layout-identical to a single `f64`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JulianDate {
    quantity: Days,
}

impl JulianDate {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// Create from a raw scalar (days since the Julian Period epoch).
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self { quantity: days }
    }

    /// Julian Day at 0h of a proleptic Gregorian calendar date.
    ///
    /// January and February are counted as months 13 and 14 of the
    /// previous year before applying the Gregorian century correction.
    pub fn from_calendar(year: i32, month: u32, day: u32) -> Self {
        let (year, month) = if month <= 2 {
            (f64::from(year) - 1.0, f64::from(month) + 12.0)
        } else {
            (f64::from(year), f64::from(month))
        };

        let a = (year / 100.0).floor();
        let b = 2.0 - a + (a / 4.0).floor();

        Self::new(
            (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + f64::from(day)
                + b
                - 1524.5,
        )
    }

    /// Julian Day at 0h of a `chrono` calendar date.
    #[inline]
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_calendar(date.year(), date.month(), date.day())
    }

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Days elapsed since J2000.0 (negative before the epoch).
    #[inline]
    pub fn days_since_j2000(&self) -> Days {
        *self - Self::J2000
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl std::fmt::Display for JulianDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Julian Day: {}", self.quantity)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Days> for JulianDate {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl Sub<Days> for JulianDate {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl Sub for JulianDate {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

impl From<Days> for JulianDate {
    #[inline]
    fn from(days: Days) -> Self {
        Self::from_days(days)
    }
}

impl From<JulianDate> for Days {
    #[inline]
    fn from(jd: JulianDate) -> Self {
        jd.quantity
    }
}

impl From<NaiveDate> for JulianDate {
    #[inline]
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}
