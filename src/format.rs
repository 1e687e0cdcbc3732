// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! Rendering of fractional hours.
//!
//! | Format | Example |
//! |--------|---------|
//! | `24h` | `05:07` |
//! | `12h` | `5:07 am` |
//! | `12hNS` | `5:07` |
//! | `Float` | `5.1189` |
//! | `iso8601` | `2024-03-20T05:07:00-05:00` |
//!
//! Every string format rounds to the nearest minute by adding half a minute
//! before truncating. `Float` is never rounded.

use crate::angles::fix_hour;
use crate::config::TimeFormat;
use crate::date::ObservationDate;
use crate::prayer::{PrayerTime, INVALID_TIME};
use chrono::TimeDelta;
use log::warn;
use qtty::{Days, Second};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Half a minute, in hours.
const ROUNDING_BIAS: f64 = 0.5 / 60.0;

/// A formatted event time.
#[derive(Debug, Clone, PartialEq)]
pub enum FormattedTime {
    /// Any string format.
    Text(String),
    /// [`TimeFormat::Float`], in `[0, 24)`.
    Hours(f64),
    /// No geometric solution; renders as [`INVALID_TIME`].
    Invalid,
}

impl FormattedTime {
    #[inline]
    pub const fn is_valid(&self) -> bool {
        !matches!(self, FormattedTime::Invalid)
    }

    /// The text form, if this is a string format or invalid.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormattedTime::Text(s) => Some(s),
            FormattedTime::Invalid => Some(INVALID_TIME),
            FormattedTime::Hours(_) => None,
        }
    }

    #[inline]
    pub const fn as_hours(&self) -> Option<f64> {
        match self {
            FormattedTime::Hours(h) => Some(*h),
            _ => None,
        }
    }
}

impl std::fmt::Display for FormattedTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormattedTime::Text(s) => f.write_str(s),
            FormattedTime::Hours(h) => write!(f, "{h}"),
            FormattedTime::Invalid => f.write_str(INVALID_TIME),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for FormattedTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FormattedTime::Text(s) => serializer.serialize_str(s),
            FormattedTime::Hours(h) => serializer.serialize_f64(*h),
            FormattedTime::Invalid => serializer.serialize_str(INVALID_TIME),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for FormattedTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(h) => FormattedTime::Hours(h),
            Raw::Text(s) if s == INVALID_TIME => FormattedTime::Invalid,
            Raw::Text(s) => FormattedTime::Text(s),
        })
    }
}

/// Hour and minute of a value after rounding, wrapped into the day.
fn clock(hours: f64) -> (u32, u32) {
    let wrapped = fix_hour(hours + ROUNDING_BIAS);
    let h = wrapped.floor();
    let m = ((wrapped - h) * 60.0).floor();
    (h as u32, m as u32)
}

/// Render one event time.
///
/// `date` anchors [`TimeFormat::Iso8601`]; a value outside `[0, 24)` lands on
/// the previous or next calendar day there.
pub fn format_time(time: PrayerTime, format: TimeFormat, date: &ObservationDate) -> FormattedTime {
    let Some(hours) = time.hours() else {
        return FormattedTime::Invalid;
    };

    match format {
        TimeFormat::Float => FormattedTime::Hours(fix_hour(hours)),
        TimeFormat::H24 => {
            let (h, m) = clock(hours);
            FormattedTime::Text(format!("{h:02}:{m:02}"))
        }
        TimeFormat::H12 | TimeFormat::H12NoSuffix => {
            let (h, m) = clock(hours);
            let hour12 = (h + 11) % 12 + 1;
            if format == TimeFormat::H12 {
                let suffix = if h < 12 { "am" } else { "pm" };
                FormattedTime::Text(format!("{hour12}:{m:02} {suffix}"))
            } else {
                FormattedTime::Text(format!("{hour12}:{m:02}"))
            }
        }
        TimeFormat::Iso8601 => iso8601(hours, date),
    }
}

fn iso8601(hours: f64, date: &ObservationDate) -> FormattedTime {
    let offset = date.offset_or_utc();
    let since_midnight = Days::new((hours + ROUNDING_BIAS) / 24.0).to::<Second>();
    let minutes = (since_midnight.value() / 60.0).floor() as i64;

    let stamp = date
        .date()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.and_local_timezone(offset).single())
        .zip(TimeDelta::try_minutes(minutes))
        .and_then(|(midnight, delta)| midnight.checked_add_signed(delta));

    match stamp {
        Some(stamp) => FormattedTime::Text(stamp.to_rfc3339()),
        None => {
            warn!("{hours} h after {} is not representable", date.date());
            FormattedTime::Invalid
        }
    }
}
