// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! The computation pipeline.
//!
//! [`PrayerTimesEngine::compute_times`] is a pure function of its three
//! arguments plus the engine's method registry:
//!
//! 1. resolve the method and its [`ResolvedSettings`];
//! 2. solve every event once at its nominal day fraction;
//! 3. shift local apparent hours to clock hours (`utc_offset - longitude/15`);
//! 4. bound twilight events at high latitudes;
//! 5. apply minute-offset parameters (Imsak, Maghrib, Isha, Dhuhr);
//! 6. derive Midnight and the night thirds;
//! 7. run the Moonsighting hook when that method is active;
//! 8. apply caller offsets;
//! 9. format.
//!
//! Unsolvable geometry travels through every step as
//! [`PrayerTime::Invalid`] and only shows at formatting.

use crate::config::{Configuration, LatitudeAdjustment, MidnightMode, School, Shafaq, TimeFormat};
use crate::date::ObservationDate;
use crate::format::{format_time, FormattedTime};
use crate::high_latitude::adjust_high_latitudes;
use crate::julian_date::JulianDate;
use crate::location::Location;
use crate::method::{MethodDescriptor, MethodKey, MethodRegistry};
use crate::prayer::{Prayer, PrayerTime, PrayerTimes};
use crate::settings::ResolvedSettings;
use crate::solver::{Direction, TimeSolver};
use crate::tune::apply_offsets;
use log::debug;
use qtty::Days;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// Moonsighting hook
// ═══════════════════════════════════════════════════════════════════════════

/// Inputs visible to a [`Recalculation`].
#[derive(Debug, Clone, Copy)]
pub struct RecalcContext<'a> {
    pub date: &'a ObservationDate,
    pub location: &'a Location,
    pub settings: &'a ResolvedSettings,
    pub shafaq: Shafaq,
}

/// Replacement step for Fajr and Isha under the Moonsighting Committee
/// convention. Runs after the night subdivisions and before caller offsets.
pub trait Recalculation {
    fn recalculate(&self, times: &mut PrayerTimes, ctx: &RecalcContext<'_>);
}

/// Leaves every time as computed.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl Recalculation for Passthrough {
    fn recalculate(&self, _times: &mut PrayerTimes, _ctx: &RecalcContext<'_>) {}
}

// ═══════════════════════════════════════════════════════════════════════════
// Results
// ═══════════════════════════════════════════════════════════════════════════

/// One formatted time per [`Prayer`].
///
/// Serializes as a map keyed by event name. The unformatted values are not
/// serialized; a deserialized result reports every raw value as invalid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ComputationResult {
    times: BTreeMap<Prayer, FormattedTime>,
    #[cfg_attr(feature = "serde", serde(skip))]
    raw: PrayerTimes,
}

impl ComputationResult {
    fn new(raw: PrayerTimes, format: TimeFormat, date: &ObservationDate) -> Self {
        let times = raw
            .iter()
            .map(|(prayer, time)| (prayer, format_time(time, format, date)))
            .collect();
        Self { times, raw }
    }

    /// Formatted time of `prayer`.
    pub fn get(&self, prayer: Prayer) -> &FormattedTime {
        static MISSING: FormattedTime = FormattedTime::Invalid;
        self.times.get(&prayer).unwrap_or(&MISSING)
    }

    /// `(prayer, formatted)` pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, &FormattedTime)> + '_ {
        self.times.iter().map(|(&p, t)| (p, t))
    }

    /// Clock hour of `prayer` in `[0, 24)`, regardless of the output format.
    pub fn hours(&self, prayer: Prayer) -> Option<f64> {
        self.raw[prayer].normalized().hours()
    }

    /// Value before formatting; may lie outside `[0, 24)`.
    pub fn raw(&self, prayer: Prayer) -> PrayerTime {
        self.raw[prayer]
    }
}

/// Description of the parameters a computation used.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalculationMeta {
    pub latitude: f64,
    pub longitude: f64,
    /// `"UTC"` or `+HH:MM`.
    pub timezone: String,
    pub method: MethodDescriptor,
    pub latitude_adjustment: LatitudeAdjustment,
    pub midnight_mode: MidnightMode,
    pub school: School,
    pub offsets: BTreeMap<Prayer, f64>,
    /// Only reported for Moonsighting.
    pub shafaq: Option<Shafaq>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Engine
// ═══════════════════════════════════════════════════════════════════════════

/// Method registry plus the Moonsighting hook.
///
/// Computation borrows the engine immutably; only
/// [`install_custom_method`](Self::install_custom_method) needs `&mut self`,
/// so a shared engine cannot change under an in-flight computation.
pub struct PrayerTimesEngine {
    registry: MethodRegistry,
    moonsighting: Box<dyn Recalculation + Send + Sync>,
}

impl std::fmt::Debug for PrayerTimesEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrayerTimesEngine")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Default for PrayerTimesEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PrayerTimesEngine {
    pub fn new() -> Self {
        Self {
            registry: MethodRegistry::new(),
            moonsighting: Box::new(Passthrough),
        }
    }

    /// Replace the Moonsighting recalculation.
    pub fn with_moonsighting_hook<R>(mut self, hook: R) -> Self
    where
        R: Recalculation + Send + Sync + 'static,
    {
        self.moonsighting = Box::new(hook);
        self
    }

    /// Descriptor the engine uses for `key`.
    pub fn describe_method(&self, key: MethodKey) -> &MethodDescriptor {
        self.registry.lookup(key)
    }

    /// Every selectable method key in catalogue order.
    pub fn list_method_keys(&self) -> &'static [MethodKey] {
        self.registry.keys()
    }

    /// Install or replace the `Custom` method.
    pub fn install_custom_method(&mut self, descriptor: MethodDescriptor) {
        debug!("installing custom method `{}`", descriptor.name);
        self.registry.install_custom(descriptor);
    }

    /// Compute and format one day's schedule.
    pub fn compute_times(
        &self,
        date: &ObservationDate,
        location: &Location,
        config: &Configuration,
    ) -> ComputationResult {
        let raw = self.compute_raw(date, location, config);
        ComputationResult::new(raw, config.time_format, date)
    }

    /// Steps 1-8 of the pipeline: unformatted clock hours, possibly outside
    /// `[0, 24)`.
    pub fn compute_raw(
        &self,
        date: &ObservationDate,
        location: &Location,
        config: &Configuration,
    ) -> PrayerTimes {
        let method = self.registry.lookup(config.method);
        let settings = ResolvedSettings::resolve(method, config);

        let mut times = solve_events(date, location, &settings);

        let shift = date.utc_offset_hours() - location.longitude() / 15.0;
        times.map_all(|_, t| t.shifted(shift));

        adjust_high_latitudes(&mut times, &settings, config.latitude_adjustment);
        apply_minute_parameters(&mut times, &settings);
        subdivide_night(&mut times, settings.midnight);

        if method.key == MethodKey::Moonsighting {
            debug!("running moonsighting recalculation (shafaq {})", config.shafaq);
            let ctx = RecalcContext {
                date,
                location,
                settings: &settings,
                shafaq: config.shafaq,
            };
            self.moonsighting.recalculate(&mut times, &ctx);
        }

        apply_offsets(&mut times, &config.offsets);
        times
    }

    /// Parameters a computation with these inputs would use.
    pub fn meta(
        &self,
        date: &ObservationDate,
        location: &Location,
        config: &Configuration,
    ) -> CalculationMeta {
        let method = self.registry.lookup(config.method);
        let settings = ResolvedSettings::resolve(method, config);
        let moonsighting = method.key == MethodKey::Moonsighting;

        CalculationMeta {
            latitude: location.latitude(),
            longitude: location.longitude(),
            timezone: date.timezone_label(),
            method: method.clone(),
            latitude_adjustment: if moonsighting {
                LatitudeAdjustment::None
            } else {
                config.latitude_adjustment
            },
            midnight_mode: settings.midnight,
            school: config.school,
            offsets: config.offsets.clone(),
            shafaq: moonsighting.then_some(config.shafaq),
        }
    }
}

/// Solve each event at its seed day fraction, in local apparent hours.
fn solve_events(
    date: &ObservationDate,
    location: &Location,
    settings: &ResolvedSettings,
) -> PrayerTimes {
    let solver = TimeSolver::new(
        JulianDate::from_date(date.date()),
        location.latitude(),
        location.longitude(),
    );
    let rise_set = location.rise_set_angle();
    let seed = |prayer: Prayer| Days::new(prayer.seed_hour().unwrap_or(0.0) / 24.0);

    let mut times = PrayerTimes::invalid();
    for prayer in Prayer::ALL {
        times[prayer] = match prayer {
            Prayer::Imsak => {
                solver.sun_angle_time(settings.imsak.magnitude(), seed(prayer), Direction::Before)
            }
            Prayer::Fajr => {
                solver.sun_angle_time(settings.fajr.magnitude(), seed(prayer), Direction::Before)
            }
            Prayer::Sunrise => solver.sun_angle_time(rise_set, seed(prayer), Direction::Before),
            Prayer::Dhuhr => PrayerTime::from_hours(solver.mid_day(seed(prayer))),
            Prayer::Asr => solver.asr_time(settings.asr_factor, seed(prayer)),
            Prayer::Sunset => solver.sun_angle_time(rise_set, seed(prayer), Direction::After),
            Prayer::Maghrib => {
                solver.sun_angle_time(settings.maghrib.magnitude(), seed(prayer), Direction::After)
            }
            Prayer::Isha => {
                solver.sun_angle_time(settings.isha.magnitude(), seed(prayer), Direction::After)
            }
            Prayer::Midnight | Prayer::FirstThird | Prayer::LastThird => PrayerTime::Invalid,
        };
    }
    times
}

/// Events defined as minutes from another event, then the Dhuhr offset.
fn apply_minute_parameters(times: &mut PrayerTimes, settings: &ResolvedSettings) {
    if let Some(minutes) = settings.imsak.minutes() {
        times[Prayer::Imsak] = times[Prayer::Fajr].shifted(-minutes / 60.0);
    }
    if let Some(minutes) = settings.maghrib.minutes() {
        times[Prayer::Maghrib] = times[Prayer::Sunset].shifted(minutes / 60.0);
    }
    if let Some(minutes) = settings.isha.minutes() {
        times[Prayer::Isha] = times[Prayer::Maghrib].shifted(minutes / 60.0);
    }
    times[Prayer::Dhuhr] = times[Prayer::Dhuhr].shifted(settings.dhuhr.magnitude() / 60.0);
}

/// Midnight and the night thirds, measured from Sunset to Sunrise or Fajr.
fn subdivide_night(times: &mut PrayerTimes, mode: MidnightMode) {
    let sunset = times[Prayer::Sunset];
    let end = match mode {
        MidnightMode::Standard => times[Prayer::Sunrise],
        MidnightMode::Jafari => times[Prayer::Fajr],
    };
    let Some(night) = sunset.hours_until(end).hours() else {
        return;
    };
    times[Prayer::Midnight] = sunset.shifted(night / 2.0);
    times[Prayer::FirstThird] = sunset.shifted(night / 3.0);
    times[Prayer::LastThird] = sunset.shifted(2.0 * (night / 3.0));
}
