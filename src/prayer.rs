// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! Daily events and their fractional-hour values.
//!
//! - [`Prayer`] names the eleven events every computation yields.
//! - [`PrayerTime`] is a fractional hour or the [`PrayerTime::Invalid`]
//!   sentinel for events with no geometric solution (polar day/night).
//! - [`PrayerTimes`] is the fixed-size table the pipeline threads through
//!   its stages.

use crate::angles::fix_hour;
use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Text rendered in place of a time that could not be computed.
pub const INVALID_TIME: &str = "-----";

/// One of the daily solar/prayer events.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Prayer {
    Imsak,
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Sunset,
    Maghrib,
    Isha,
    Midnight,
    FirstThird,
    LastThird,
}

impl Prayer {
    /// All events in chronological order for a typical day.
    pub const ALL: [Prayer; 11] = [
        Prayer::Imsak,
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Sunset,
        Prayer::Maghrib,
        Prayer::Isha,
        Prayer::Midnight,
        Prayer::FirstThird,
        Prayer::LastThird,
    ];

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Prayer::Imsak => "Imsak",
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Sunset => "Sunset",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
            Prayer::Midnight => "Midnight",
            Prayer::FirstThird => "Firstthird",
            Prayer::LastThird => "Lastthird",
        }
    }

    /// Nominal hour used to seed the ephemeris for this event.
    ///
    /// Night subdivisions are derived, never solved, so they have no seed.
    pub const fn seed_hour(self) -> Option<f64> {
        match self {
            Prayer::Imsak | Prayer::Fajr => Some(5.0),
            Prayer::Sunrise => Some(6.0),
            Prayer::Dhuhr => Some(12.0),
            Prayer::Asr => Some(13.0),
            Prayer::Sunset | Prayer::Maghrib | Prayer::Isha => Some(18.0),
            Prayer::Midnight | Prayer::FirstThird | Prayer::LastThird => None,
        }
    }
}

impl std::fmt::Display for Prayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A time of day in fractional hours, or the invalid sentinel.
///
/// Arithmetic on [`PrayerTime::Invalid`] stays invalid; it is never coerced
/// into a number.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub enum PrayerTime {
    Valid(f64),
    Invalid,
}

impl PrayerTime {
    /// Wrap a raw value, mapping non-finite input to [`PrayerTime::Invalid`].
    #[inline]
    pub fn from_hours(hours: f64) -> Self {
        if hours.is_finite() {
            PrayerTime::Valid(hours)
        } else {
            PrayerTime::Invalid
        }
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        matches!(self, PrayerTime::Valid(_))
    }

    /// The raw hour value, if any.
    #[inline]
    pub const fn hours(self) -> Option<f64> {
        match self {
            PrayerTime::Valid(h) => Some(h),
            PrayerTime::Invalid => None,
        }
    }

    /// Shift by a number of hours.
    #[inline]
    pub fn shifted(self, hours: f64) -> Self {
        self.map(|h| h + hours)
    }

    /// Apply `f` to a valid value.
    #[inline]
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            PrayerTime::Valid(h) => PrayerTime::from_hours(f(h)),
            PrayerTime::Invalid => PrayerTime::Invalid,
        }
    }

    /// Wrapped into `[0, 24)`.
    #[inline]
    pub fn normalized(self) -> Self {
        self.map(fix_hour)
    }

    /// Forward distance in hours from `self` to `later`, in `[0, 24)`.
    #[inline]
    pub fn hours_until(self, later: PrayerTime) -> PrayerTime {
        match (self, later) {
            (PrayerTime::Valid(a), PrayerTime::Valid(b)) => PrayerTime::Valid(fix_hour(b - a)),
            _ => PrayerTime::Invalid,
        }
    }
}

impl From<f64> for PrayerTime {
    #[inline]
    fn from(hours: f64) -> Self {
        PrayerTime::from_hours(hours)
    }
}

/// One [`PrayerTime`] per [`Prayer`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PrayerTimes {
    values: [PrayerTime; 11],
}

impl PrayerTimes {
    /// Every entry invalid.
    pub const fn invalid() -> Self {
        Self {
            values: [PrayerTime::Invalid; 11],
        }
    }

    /// Iterate `(prayer, time)` pairs in [`Prayer::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, PrayerTime)> + '_ {
        Prayer::ALL.iter().map(move |&p| (p, self[p]))
    }

    /// Apply `f` to every entry.
    pub fn map_all(&mut self, mut f: impl FnMut(Prayer, PrayerTime) -> PrayerTime) {
        for prayer in Prayer::ALL {
            self[prayer] = f(prayer, self[prayer]);
        }
    }
}

impl Default for PrayerTimes {
    fn default() -> Self {
        Self::invalid()
    }
}

impl Index<Prayer> for PrayerTimes {
    type Output = PrayerTime;
    #[inline]
    fn index(&self, prayer: Prayer) -> &PrayerTime {
        &self.values[prayer as usize]
    }
}

impl IndexMut<Prayer> for PrayerTimes {
    #[inline]
    fn index_mut(&mut self, prayer: Prayer) -> &mut PrayerTime {
        &mut self.values[prayer as usize]
    }
}
