// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! Calendar date with the caller-resolved UTC offset.
//!
//! Resolving a timezone for a latitude/longitude is not this crate's job:
//! the offset arrives already computed, either explicitly or taken from a
//! `chrono::DateTime` in the caller's zone.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeZone};

/// The civil date a schedule is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationDate {
    date: NaiveDate,
    utc_offset: Option<FixedOffset>,
}

impl ObservationDate {
    /// Date without an offset; times come out in UTC.
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            utc_offset: None,
        }
    }

    /// Convenience constructor; `None` for an impossible calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::new)
    }

    /// Calendar date and offset of an instant in any `chrono` zone.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        Self {
            date: datetime.date_naive(),
            utc_offset: Some(datetime.offset().fix()),
        }
    }

    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = Some(offset);
        self
    }

    /// Attach an offset given in (possibly fractional) hours east of UTC.
    pub fn with_utc_offset_hours(self, hours: f64) -> Result<Self> {
        if !hours.is_finite() {
            return Err(Error::InvalidUtcOffset(hours));
        }
        let seconds = (hours * 3600.0).round();
        FixedOffset::east_opt(seconds as i32)
            .map(|offset| self.with_utc_offset(offset))
            .ok_or(Error::InvalidUtcOffset(hours))
    }

    #[inline]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub const fn utc_offset(&self) -> Option<FixedOffset> {
        self.utc_offset
    }

    /// Offset in hours, zero when none was supplied.
    pub fn utc_offset_hours(&self) -> f64 {
        self.utc_offset
            .map_or(0.0, |o| f64::from(o.local_minus_utc()) / 3600.0)
    }

    /// The supplied offset, or UTC.
    pub fn offset_or_utc(&self) -> FixedOffset {
        self.utc_offset.unwrap_or_else(|| Offset::fix(&chrono::Utc))
    }

    /// `"UTC"` or the offset rendered as `+HH:MM`.
    pub fn timezone_label(&self) -> String {
        self.utc_offset
            .map_or_else(|| "UTC".to_owned(), |o| o.to_string())
    }
}

impl From<NaiveDate> for ObservationDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}

impl<Tz: TimeZone> From<&DateTime<Tz>> for ObservationDate {
    fn from(datetime: &DateTime<Tz>) -> Self {
        Self::from_datetime(datetime)
    }
}
