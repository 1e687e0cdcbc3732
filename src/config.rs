// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! Caller configuration.
//!
//! [`Configuration`] is an immutable-by-convention snapshot handed to every
//! computation. Each enum parses from its canonical code with [`FromStr`]
//! and, through [`LenientParse`], from arbitrary text with a logged fallback
//! to its default.
//!
//! | Setting | Codes | Default |
//! |---------|-------|---------|
//! | [`School`] | `STANDARD`, `HANAFI` | `STANDARD` |
//! | [`MidnightMode`] | `STANDARD`, `JAFARI` | method-defined, else `STANDARD` |
//! | [`LatitudeAdjustment`] | `NONE`, `ANGLE_BASED`, `ONE_SEVENTH`, `MIDDLE_OF_THE_NIGHT` | `ANGLE_BASED` |
//! | [`TimeFormat`] | `24h`, `12h`, `12hNS`, `Float`, `iso8601` | `24h` |
//! | [`Shafaq`] | `general`, `ahmer`, `abyad` | `general` |

use crate::error::{Error, LenientParse};
use crate::method::MethodKey;
use crate::prayer::Prayer;
use log::warn;
use std::collections::BTreeMap;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Case- and separator-insensitive key used by every `FromStr` here.
fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

// Serde goes through the text codes and the lenient parser, so a bad value
// in a config file degrades to the default exactly like a bad setter call.
macro_rules! lenient_serde_via_code {
    ($ty:ty) => {
        impl From<String> for $ty {
            fn from(raw: String) -> Self {
                <$ty as LenientParse>::parse_lenient(&raw)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.code().to_owned()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}
pub(crate) use lenient_serde_via_code;

// ═══════════════════════════════════════════════════════════════════════════
// School
// ═══════════════════════════════════════════════════════════════════════════

/// Asr shadow-length convention.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum School {
    /// Shadow equals object length (Shafi'i, Maliki, Hanbali).
    #[default]
    Standard,
    /// Shadow equals twice the object length.
    Hanafi,
}

impl School {
    pub const fn code(self) -> &'static str {
        match self {
            School::Standard => "STANDARD",
            School::Hanafi => "HANAFI",
        }
    }

    pub const fn shadow_factor(self) -> f64 {
        match self {
            School::Standard => 1.0,
            School::Hanafi => 2.0,
        }
    }
}

impl FromStr for School {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Error> {
        match normalize(raw).as_str() {
            "standard" | "shafii" => Ok(School::Standard),
            "hanafi" => Ok(School::Hanafi),
            _ => Err(Error::unknown("school", raw)),
        }
    }
}

lenient_serde_via_code!(School);

// ═══════════════════════════════════════════════════════════════════════════
// MidnightMode
// ═══════════════════════════════════════════════════════════════════════════

/// Whether the night ends at Sunrise or at Fajr.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum MidnightMode {
    /// Sunset → Sunrise.
    #[default]
    Standard,
    /// Sunset → Fajr.
    Jafari,
}

impl MidnightMode {
    pub const fn code(self) -> &'static str {
        match self {
            MidnightMode::Standard => "STANDARD",
            MidnightMode::Jafari => "JAFARI",
        }
    }
}

impl FromStr for MidnightMode {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Error> {
        match normalize(raw).as_str() {
            "standard" => Ok(MidnightMode::Standard),
            "jafari" => Ok(MidnightMode::Jafari),
            _ => Err(Error::unknown("midnight mode", raw)),
        }
    }
}

lenient_serde_via_code!(MidnightMode);

// ═══════════════════════════════════════════════════════════════════════════
// LatitudeAdjustment
// ═══════════════════════════════════════════════════════════════════════════

/// Night-portion policy bounding twilight events at high latitudes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum LatitudeAdjustment {
    None,
    /// `angle / 60` of the night.
    #[default]
    AngleBased,
    /// One seventh of the night.
    OneSeventh,
    /// Half of the night.
    MiddleOfNight,
}

impl LatitudeAdjustment {
    pub const fn code(self) -> &'static str {
        match self {
            LatitudeAdjustment::None => "NONE",
            LatitudeAdjustment::AngleBased => "ANGLE_BASED",
            LatitudeAdjustment::OneSeventh => "ONE_SEVENTH",
            LatitudeAdjustment::MiddleOfNight => "MIDDLE_OF_THE_NIGHT",
        }
    }
}

impl FromStr for LatitudeAdjustment {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Error> {
        match normalize(raw).as_str() {
            "none" => Ok(LatitudeAdjustment::None),
            "anglebased" | "angle" => Ok(LatitudeAdjustment::AngleBased),
            "oneseventh" => Ok(LatitudeAdjustment::OneSeventh),
            "middleofthenight" | "middleofnight" | "motn" => Ok(LatitudeAdjustment::MiddleOfNight),
            _ => Err(Error::unknown("latitude adjustment", raw)),
        }
    }
}

lenient_serde_via_code!(LatitudeAdjustment);

// ═══════════════════════════════════════════════════════════════════════════
// TimeFormat
// ═══════════════════════════════════════════════════════════════════════════

/// Output representation of each time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum TimeFormat {
    /// `HH:MM`, zero padded.
    #[default]
    H24,
    /// `h:MM am` / `h:MM pm`.
    H12,
    /// `h:MM` without suffix.
    H12NoSuffix,
    /// Fractional hour in `[0, 24)`.
    Float,
    /// Full timestamp anchored to the observation date.
    Iso8601,
}

impl TimeFormat {
    pub const fn code(self) -> &'static str {
        match self {
            TimeFormat::H24 => "24h",
            TimeFormat::H12 => "12h",
            TimeFormat::H12NoSuffix => "12hNS",
            TimeFormat::Float => "Float",
            TimeFormat::Iso8601 => "iso8601",
        }
    }
}

impl FromStr for TimeFormat {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Error> {
        match normalize(raw).as_str() {
            "24h" => Ok(TimeFormat::H24),
            "12h" => Ok(TimeFormat::H12),
            "12hns" => Ok(TimeFormat::H12NoSuffix),
            "float" => Ok(TimeFormat::Float),
            "iso8601" => Ok(TimeFormat::Iso8601),
            _ => Err(Error::unknown("time format", raw)),
        }
    }
}

lenient_serde_via_code!(TimeFormat);

// ═══════════════════════════════════════════════════════════════════════════
// Shafaq
// ═══════════════════════════════════════════════════════════════════════════

/// Twilight glow used by the Moonsighting Committee convention.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum Shafaq {
    #[default]
    General,
    /// Red glow.
    Ahmer,
    /// White glow.
    Abyad,
}

impl Shafaq {
    pub const fn code(self) -> &'static str {
        match self {
            Shafaq::General => "general",
            Shafaq::Ahmer => "ahmer",
            Shafaq::Abyad => "abyad",
        }
    }
}

impl FromStr for Shafaq {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Error> {
        match normalize(raw).as_str() {
            "general" => Ok(Shafaq::General),
            "ahmer" => Ok(Shafaq::Ahmer),
            "abyad" => Ok(Shafaq::Abyad),
            _ => Err(Error::unknown("shafaq", raw)),
        }
    }
}

lenient_serde_via_code!(Shafaq);

// ═══════════════════════════════════════════════════════════════════════════
// Tuning
// ═══════════════════════════════════════════════════════════════════════════

/// Per-event minute offsets applied after all astronomy.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Tuning {
    pub imsak: f64,
    pub fajr: f64,
    pub sunrise: f64,
    pub dhuhr: f64,
    pub asr: f64,
    pub maghrib: f64,
    pub sunset: f64,
    pub isha: f64,
    pub midnight: f64,
}

impl Tuning {
    fn into_offsets(self) -> BTreeMap<Prayer, f64> {
        BTreeMap::from([
            (Prayer::Imsak, self.imsak),
            (Prayer::Fajr, self.fajr),
            (Prayer::Sunrise, self.sunrise),
            (Prayer::Dhuhr, self.dhuhr),
            (Prayer::Asr, self.asr),
            (Prayer::Maghrib, self.maghrib),
            (Prayer::Sunset, self.sunset),
            (Prayer::Isha, self.isha),
            (Prayer::Midnight, self.midnight),
        ])
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════

/// Everything a computation reads besides the date and location.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Configuration {
    pub method: MethodKey,
    pub school: School,
    /// Replaces the school's factor when set to a positive finite value.
    pub asr_shadow_factor: Option<f64>,
    /// `None` lets the method decide.
    pub midnight_mode: Option<MidnightMode>,
    pub latitude_adjustment: LatitudeAdjustment,
    pub time_format: TimeFormat,
    /// Only read by the Moonsighting method.
    pub shafaq: Shafaq,
    /// Minutes added to each event after all astronomy.
    pub offsets: BTreeMap<Prayer, f64>,
}

impl Configuration {
    pub fn new(method: MethodKey) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: MethodKey) -> Self {
        self.method = method;
        self
    }

    /// Unknown codes select MWL.
    pub fn with_method_str(self, raw: &str) -> Self {
        self.with_method(MethodKey::parse_lenient(raw))
    }

    pub fn with_school(mut self, school: School) -> Self {
        self.school = school;
        self
    }

    pub fn with_school_str(self, raw: &str) -> Self {
        self.with_school(School::parse_lenient(raw))
    }

    /// Non-positive or non-finite factors are ignored.
    pub fn with_asr_shadow_factor(mut self, factor: f64) -> Self {
        if factor.is_finite() && factor > 0.0 {
            self.asr_shadow_factor = Some(factor);
        } else {
            warn!("ignoring Asr shadow factor {factor}; using the school factor");
            self.asr_shadow_factor = None;
        }
        self
    }

    pub fn with_midnight_mode(mut self, mode: MidnightMode) -> Self {
        self.midnight_mode = Some(mode);
        self
    }

    pub fn with_midnight_mode_str(self, raw: &str) -> Self {
        self.with_midnight_mode(MidnightMode::parse_lenient(raw))
    }

    pub fn with_latitude_adjustment(mut self, adjustment: LatitudeAdjustment) -> Self {
        self.latitude_adjustment = adjustment;
        self
    }

    pub fn with_latitude_adjustment_str(self, raw: &str) -> Self {
        self.with_latitude_adjustment(LatitudeAdjustment::parse_lenient(raw))
    }

    pub fn with_time_format(mut self, format: TimeFormat) -> Self {
        self.time_format = format;
        self
    }

    pub fn with_time_format_str(self, raw: &str) -> Self {
        self.with_time_format(TimeFormat::parse_lenient(raw))
    }

    pub fn with_shafaq(mut self, shafaq: Shafaq) -> Self {
        self.shafaq = shafaq;
        self
    }

    /// Set one event's offset in minutes.
    pub fn with_offset(mut self, prayer: Prayer, minutes: f64) -> Self {
        self.offsets.insert(prayer, minutes);
        self
    }

    /// Replace every offset at once.
    pub fn tune(mut self, tuning: Tuning) -> Self {
        self.offsets = tuning.into_offsets();
        self
    }

    /// Offset for `prayer` in minutes, zero when unset.
    pub fn offset(&self, prayer: Prayer) -> f64 {
        self.offsets.get(&prayer).copied().unwrap_or(0.0)
    }
}
