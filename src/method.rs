// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! Calculation-method catalogue.
//!
//! The 23 built-in conventions live in a static table built at compile
//! time. A [`MethodRegistry`] adds one runtime-installable `Custom` slot on
//! top of it.
//!
//! | Key | Fajr | Isha | Maghrib | Midnight |
//! |-----|------|------|---------|----------|
//! | MWL | 18° | 17° | - | - |
//! | ISNA | 15° | 15° | - | - |
//! | Egypt | 19.5° | 17.5° | - | - |
//! | Makkah | 18.5° | 90 min | - | - |
//! | Karachi | 18° | 18° | - | - |
//! | Tehran | 17.7° | 14° | 4.5° | Jafari |
//! | Jafari | 16° | 14° | 4° | Jafari |
//! | Portugal | 18° | 77 min | 3 min | - |
//! | Jordan | 18° | 18° | 5 min | - |

use crate::config::{lenient_serde_via_code, MidnightMode};
use crate::error::{Error, LenientParse};
use crate::location::Location;
use crate::prayer::Prayer;
use log::warn;
use std::borrow::Cow;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ═══════════════════════════════════════════════════════════════════════════
// ParamValue
// ═══════════════════════════════════════════════════════════════════════════

/// A method parameter: a sun depression angle or a fixed minute offset.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParamValue {
    AngleDegrees(f64),
    MinutesOffset(f64),
}

impl ParamValue {
    /// Parse textual forms such as `"18"`, `"17.5"` or `"90 min"`.
    ///
    /// The leading numeric run is the magnitude; an empty or malformed run
    /// reads as zero. Text containing `min` is a minute offset.
    pub fn parse(raw: &str) -> Self {
        let magnitude = leading_number(raw);
        if raw.contains("min") {
            ParamValue::MinutesOffset(magnitude)
        } else {
            ParamValue::AngleDegrees(magnitude)
        }
    }

    /// The number regardless of its unit.
    pub const fn magnitude(self) -> f64 {
        match self {
            ParamValue::AngleDegrees(v) | ParamValue::MinutesOffset(v) => v,
        }
    }

    pub const fn minutes(self) -> Option<f64> {
        match self {
            ParamValue::MinutesOffset(m) => Some(m),
            ParamValue::AngleDegrees(_) => None,
        }
    }
}

fn leading_number(raw: &str) -> f64 {
    let text = raw.trim_start();
    let end = text
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
        .map_or(text.len(), |(i, _)| i);
    text[..end].parse().unwrap_or(0.0)
}

impl From<&str> for ParamValue {
    fn from(raw: &str) -> Self {
        ParamValue::parse(raw)
    }
}

impl From<f64> for ParamValue {
    fn from(degrees: f64) -> Self {
        ParamValue::AngleDegrees(degrees)
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::AngleDegrees(a) => write!(f, "{a}"),
            ParamValue::MinutesOffset(m) => write!(f, "{m} min"),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for ParamValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ParamValue::AngleDegrees(a) => serializer.serialize_f64(*a),
            ParamValue::MinutesOffset(_) => serializer.collect_str(self),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for ParamValue {
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
            Raw::Number(n) => ParamValue::AngleDegrees(n),
            Raw::Text(s) => ParamValue::parse(&s),
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MethodParams
// ═══════════════════════════════════════════════════════════════════════════

/// Per-event parameters of a method. Absent entries use the defaults of
/// [`ResolvedSettings`](crate::ResolvedSettings).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MethodParams {
    pub imsak: Option<ParamValue>,
    pub fajr: Option<ParamValue>,
    pub dhuhr: Option<ParamValue>,
    pub maghrib: Option<ParamValue>,
    pub isha: Option<ParamValue>,
    /// Midnight convention implied by the method.
    pub midnight: Option<MidnightMode>,
}

impl MethodParams {
    pub const EMPTY: Self = Self {
        imsak: None,
        fajr: None,
        dhuhr: None,
        maghrib: None,
        isha: None,
        midnight: None,
    };

    /// Fajr and Isha both as angles.
    pub const fn angles(fajr: f64, isha: f64) -> Self {
        Self {
            fajr: Some(ParamValue::AngleDegrees(fajr)),
            isha: Some(ParamValue::AngleDegrees(isha)),
            ..Self::EMPTY
        }
    }

    /// Fajr as an angle, Isha a fixed number of minutes after Maghrib.
    pub const fn angle_then_minutes(fajr: f64, isha_minutes: f64) -> Self {
        Self {
            fajr: Some(ParamValue::AngleDegrees(fajr)),
            isha: Some(ParamValue::MinutesOffset(isha_minutes)),
            ..Self::EMPTY
        }
    }

    pub const fn with_maghrib(self, maghrib: ParamValue) -> Self {
        Self {
            maghrib: Some(maghrib),
            ..self
        }
    }

    pub const fn with_midnight(self, midnight: MidnightMode) -> Self {
        Self {
            midnight: Some(midnight),
            ..self
        }
    }

    /// The parameter for an event, if the event takes one.
    pub fn get(&self, prayer: Prayer) -> Option<ParamValue> {
        match prayer {
            Prayer::Imsak => self.imsak,
            Prayer::Fajr => self.fajr,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
            _ => None,
        }
    }

    /// Set the parameter for an event. Events without a parameter slot are
    /// ignored with a warning.
    pub fn set(&mut self, prayer: Prayer, value: ParamValue) {
        let slot = match prayer {
            Prayer::Imsak => &mut self.imsak,
            Prayer::Fajr => &mut self.fajr,
            Prayer::Dhuhr => &mut self.dhuhr,
            Prayer::Maghrib => &mut self.maghrib,
            Prayer::Isha => &mut self.isha,
            other => {
                warn!("{other} takes no method parameter; ignoring {value}");
                return;
            }
        };
        *slot = Some(value);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MethodKey
// ═══════════════════════════════════════════════════════════════════════════

/// Identifier of a calculation method.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum MethodKey {
    #[default]
    Mwl,
    Isna,
    Egypt,
    Makkah,
    Karachi,
    Tehran,
    Jafari,
    Gulf,
    Kuwait,
    Qatar,
    Singapore,
    France,
    Turkey,
    Russia,
    Moonsighting,
    Dubai,
    Jakim,
    Tunisia,
    Algeria,
    Kemenag,
    Morocco,
    Portugal,
    Jordan,
    Custom,
}

impl MethodKey {
    /// Catalogue order; `Custom` last.
    pub const ALL: [MethodKey; 24] = [
        MethodKey::Mwl,
        MethodKey::Isna,
        MethodKey::Egypt,
        MethodKey::Makkah,
        MethodKey::Karachi,
        MethodKey::Tehran,
        MethodKey::Jafari,
        MethodKey::Gulf,
        MethodKey::Kuwait,
        MethodKey::Qatar,
        MethodKey::Singapore,
        MethodKey::France,
        MethodKey::Turkey,
        MethodKey::Russia,
        MethodKey::Moonsighting,
        MethodKey::Dubai,
        MethodKey::Jakim,
        MethodKey::Tunisia,
        MethodKey::Algeria,
        MethodKey::Kemenag,
        MethodKey::Morocco,
        MethodKey::Portugal,
        MethodKey::Jordan,
        MethodKey::Custom,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            MethodKey::Mwl => "MWL",
            MethodKey::Isna => "ISNA",
            MethodKey::Egypt => "EGYPT",
            MethodKey::Makkah => "MAKKAH",
            MethodKey::Karachi => "KARACHI",
            MethodKey::Tehran => "TEHRAN",
            MethodKey::Jafari => "JAFARI",
            MethodKey::Gulf => "GULF",
            MethodKey::Kuwait => "KUWAIT",
            MethodKey::Qatar => "QATAR",
            MethodKey::Singapore => "SINGAPORE",
            MethodKey::France => "FRANCE",
            MethodKey::Turkey => "TURKEY",
            MethodKey::Russia => "RUSSIA",
            MethodKey::Moonsighting => "MOONSIGHTING",
            MethodKey::Dubai => "DUBAI",
            MethodKey::Jakim => "JAKIM",
            MethodKey::Tunisia => "TUNISIA",
            MethodKey::Algeria => "ALGERIA",
            MethodKey::Kemenag => "KEMENAG",
            MethodKey::Morocco => "MOROCCO",
            MethodKey::Portugal => "PORTUGAL",
            MethodKey::Jordan => "JORDAN",
            MethodKey::Custom => "CUSTOM",
        }
    }
}

impl FromStr for MethodKey {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Error> {
        let wanted = raw.trim();
        MethodKey::ALL
            .into_iter()
            .find(|key| key.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::unknown("calculation method", raw))
    }
}

lenient_serde_via_code!(MethodKey);

// ═══════════════════════════════════════════════════════════════════════════
// MethodDescriptor
// ═══════════════════════════════════════════════════════════════════════════

/// Numeric id the `Custom` slot always carries.
pub const CUSTOM_METHOD_ID: u32 = 99;

/// A named calculation convention.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MethodDescriptor {
    pub key: MethodKey,
    pub id: u32,
    pub name: Cow<'static, str>,
    pub params: MethodParams,
    /// Where the convention is anchored, for display only.
    pub location: Option<Location>,
}

impl MethodDescriptor {
    const fn builtin(
        key: MethodKey,
        id: u32,
        name: &'static str,
        params: MethodParams,
        location: Option<Location>,
    ) -> Self {
        Self {
            key,
            id,
            name: Cow::Borrowed(name),
            params,
            location,
        }
    }

    /// Start a custom method: Fajr 15°, Isha 15°, everything else default.
    pub fn custom(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key: MethodKey::Custom,
            id: CUSTOM_METHOD_ID,
            name: name.into(),
            params: MethodParams::angles(15.0, 15.0),
            location: None,
        }
    }

    pub fn with_fajr_angle(mut self, degrees: f64) -> Self {
        self.params.fajr = Some(ParamValue::AngleDegrees(degrees));
        self
    }

    /// Maghrib as an angle or as minutes after Sunset.
    pub fn with_maghrib(mut self, value: impl Into<ParamValue>) -> Self {
        self.params.maghrib = Some(value.into());
        self
    }

    /// Isha as an angle or as minutes after Maghrib.
    pub fn with_isha(mut self, value: impl Into<ParamValue>) -> Self {
        self.params.isha = Some(value.into());
        self
    }

    pub fn with_param(mut self, prayer: Prayer, value: impl Into<ParamValue>) -> Self {
        self.params.set(prayer, value.into());
        self
    }

    pub fn with_midnight_mode(mut self, mode: MidnightMode) -> Self {
        self.params.midnight = Some(mode);
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

const fn at(latitude: f64, longitude: f64) -> Option<Location> {
    Some(Location::from_parts(latitude, longitude, 0.0))
}

/// Built-in methods, indexed by `MethodKey as usize`.
#[rustfmt::skip]
static BUILTIN_METHODS: [MethodDescriptor; 23] = [
    MethodDescriptor::builtin(MethodKey::Mwl, 3, "Muslim World League",
        MethodParams::angles(18.0, 17.0), at(51.519_468_2, -0.136_036_5)),
    MethodDescriptor::builtin(MethodKey::Isna, 2, "Islamic Society of North America (ISNA)",
        MethodParams::angles(15.0, 15.0), at(39.704_212_3, -86.399_438_7)),
    MethodDescriptor::builtin(MethodKey::Egypt, 5, "Egyptian General Authority of Survey",
        MethodParams::angles(19.5, 17.5), at(30.044_419_6, 31.235_711_6)),
    MethodDescriptor::builtin(MethodKey::Makkah, 4, "Umm Al-Qura University, Makkah",
        MethodParams::angle_then_minutes(18.5, 90.0), at(21.389_082_4, 39.857_911_8)),
    MethodDescriptor::builtin(MethodKey::Karachi, 1, "University of Islamic Sciences, Karachi",
        MethodParams::angles(18.0, 18.0), at(24.861_462_2, 67.009_938_8)),
    MethodDescriptor::builtin(MethodKey::Tehran, 7, "Institute of Geophysics, University of Tehran",
        MethodParams::angles(17.7, 14.0)
            .with_maghrib(ParamValue::AngleDegrees(4.5))
            .with_midnight(MidnightMode::Jafari),
        at(35.689_197_5, 51.388_973_6)),
    MethodDescriptor::builtin(MethodKey::Jafari, 0, "Shia Ithna-Ashari, Leva Institute, Qum",
        MethodParams::angles(16.0, 14.0)
            .with_maghrib(ParamValue::AngleDegrees(4.0))
            .with_midnight(MidnightMode::Jafari),
        at(34.641_576_4, 50.874_603_5)),
    MethodDescriptor::builtin(MethodKey::Gulf, 8, "Gulf Region",
        MethodParams::angle_then_minutes(19.5, 90.0), at(24.132_363_8, 53.319_952_7)),
    MethodDescriptor::builtin(MethodKey::Kuwait, 9, "Kuwait",
        MethodParams::angles(18.0, 17.5), at(29.375_859, 47.977_405_2)),
    MethodDescriptor::builtin(MethodKey::Qatar, 10, "Qatar",
        MethodParams::angle_then_minutes(18.0, 90.0), at(25.285_447_3, 51.531_039_8)),
    MethodDescriptor::builtin(MethodKey::Singapore, 11, "Majlis Ugama Islam Singapura, Singapore",
        MethodParams::angles(20.0, 18.0), at(1.352_083, 103.819_836)),
    MethodDescriptor::builtin(MethodKey::France, 12, "Union Organization Islamic de France",
        MethodParams::angles(12.0, 12.0), at(48.856_614, 2.352_221_9)),
    MethodDescriptor::builtin(MethodKey::Turkey, 13, "Diyanet İşleri Başkanlığı, Turkey (experimental)",
        MethodParams::angles(18.0, 17.0), at(39.933_363_5, 32.859_741_9)),
    MethodDescriptor::builtin(MethodKey::Russia, 14, "Spiritual Administration of Muslims of Russia",
        MethodParams::angles(16.0, 15.0), at(54.734_791, 55.957_855_5)),
    // Fajr/Isha are produced by the moonsighting recalculation hook.
    MethodDescriptor::builtin(MethodKey::Moonsighting, 15, "Moonsighting Committee Worldwide (Moonsighting.com)",
        MethodParams::EMPTY, None),
    MethodDescriptor::builtin(MethodKey::Dubai, 16, "Dubai (experimental)",
        MethodParams::angles(18.2, 18.2), at(25.076_267_7, 55.087_404)),
    MethodDescriptor::builtin(MethodKey::Jakim, 17, "Jabatan Kemajuan Islam Malaysia (JAKIM)",
        MethodParams::angles(20.0, 18.0), at(3.139_003, 101.686_855)),
    MethodDescriptor::builtin(MethodKey::Tunisia, 18, "Tunisia",
        MethodParams::angles(18.0, 18.0), at(36.806_494_8, 10.181_531_6)),
    MethodDescriptor::builtin(MethodKey::Algeria, 19, "Algeria",
        MethodParams::angles(18.0, 17.0), at(36.753_768, 3.058_756_1)),
    MethodDescriptor::builtin(MethodKey::Kemenag, 20, "Kementerian Agama Republik Indonesia",
        MethodParams::angles(20.0, 18.0), at(-6.208_763_4, 106.845_599)),
    MethodDescriptor::builtin(MethodKey::Morocco, 21, "Morocco",
        MethodParams::angles(19.0, 17.0), at(33.971_590_4, -6.849_812_9)),
    MethodDescriptor::builtin(MethodKey::Portugal, 22, "Comunidade Islamica de Lisboa",
        MethodParams::angle_then_minutes(18.0, 77.0)
            .with_maghrib(ParamValue::MinutesOffset(3.0)),
        at(38.722_252_4, -9.139_336_6)),
    MethodDescriptor::builtin(MethodKey::Jordan, 23, "Ministry of Awqaf, Islamic Affairs and Holy Places, Jordan",
        MethodParams::angles(18.0, 18.0)
            .with_maghrib(ParamValue::MinutesOffset(5.0)),
        at(31.946_122_2, 35.923_844)),
];

/// The built-in descriptor for `key`; `None` for [`MethodKey::Custom`].
pub fn builtin_method(key: MethodKey) -> Option<&'static MethodDescriptor> {
    BUILTIN_METHODS.get(key as usize)
}

// ═══════════════════════════════════════════════════════════════════════════
// MethodRegistry
// ═══════════════════════════════════════════════════════════════════════════

/// Built-in catalogue plus the runtime `Custom` slot.
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    custom: Option<MethodDescriptor>,
}

impl MethodRegistry {
    pub const fn new() -> Self {
        Self { custom: None }
    }

    /// Descriptor for `key`.
    ///
    /// An empty `Custom` slot falls back to MWL.
    pub fn lookup(&self, key: MethodKey) -> &MethodDescriptor {
        if key == MethodKey::Custom {
            return match &self.custom {
                Some(custom) => custom,
                None => {
                    warn!("no custom method installed; falling back to MWL");
                    &BUILTIN_METHODS[MethodKey::Mwl as usize]
                }
            };
        }
        &BUILTIN_METHODS[key as usize]
    }

    /// Descriptor for a textual key; unknown codes fall back to MWL.
    pub fn lookup_str(&self, raw: &str) -> &MethodDescriptor {
        self.lookup(MethodKey::parse_lenient(raw))
    }

    /// Every selectable key in catalogue order.
    pub fn keys(&self) -> &'static [MethodKey] {
        &MethodKey::ALL
    }

    /// Install or replace the `Custom` slot. The descriptor is re-keyed as
    /// `Custom` with id 99 whatever it carried before.
    pub fn install_custom(&mut self, mut descriptor: MethodDescriptor) {
        descriptor.key = MethodKey::Custom;
        descriptor.id = CUSTOM_METHOD_ID;
        self.custom = Some(descriptor);
    }

    pub fn custom(&self) -> Option<&MethodDescriptor> {
        self.custom.as_ref()
    }
}
