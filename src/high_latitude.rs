// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! High-latitude bounding of twilight events.
//!
//! Near the poles twilight angles stop being reached (or are reached absurdly
//! far from sunrise/sunset). Each twilight event is bounded to a portion of
//! the night, measured backward from Sunrise for morning events and forward
//! from Sunset for evening ones.

use crate::config::LatitudeAdjustment;
use crate::prayer::{Prayer, PrayerTime, PrayerTimes};
use crate::settings::ResolvedSettings;
use crate::solver::Direction;
use log::debug;

/// Share of `night` hours allowed between the base event and a twilight
/// event with parameter `angle`.
pub fn night_portion(adjustment: LatitudeAdjustment, angle: f64, night: f64) -> f64 {
    match adjustment {
        LatitudeAdjustment::AngleBased => angle / 60.0 * night,
        LatitudeAdjustment::OneSeventh => night / 7.0,
        LatitudeAdjustment::MiddleOfNight | LatitudeAdjustment::None => night / 2.0,
    }
}

/// Bound one event to its night portion.
///
/// `Before` measures from `base` backward (Imsak, Fajr from Sunrise), `After`
/// forward (Maghrib, Isha from Sunset). An invalid `time`, or one further
/// than the portion, is replaced by `base ∓ portion`. A valid `time` is kept
/// when the night itself cannot be measured.
pub fn adjust_time(
    time: PrayerTime,
    base: PrayerTime,
    angle: f64,
    night: PrayerTime,
    adjustment: LatitudeAdjustment,
    direction: Direction,
) -> PrayerTime {
    let (Some(base_hours), Some(night)) = (base.hours(), night.hours()) else {
        return time;
    };
    let portion = night_portion(adjustment, angle, night);

    let distance = match direction {
        Direction::Before => time.hours_until(base),
        Direction::After => base.hours_until(time),
    };
    match distance.hours() {
        Some(d) if d <= portion => time,
        _ => PrayerTime::from_hours(match direction {
            Direction::Before => base_hours - portion,
            Direction::After => base_hours + portion,
        }),
    }
}

/// Apply the configured policy to Imsak, Fajr, Isha and Maghrib in place.
///
/// Minute-offset parameters contribute their magnitude as the angle; those
/// events are overwritten later by the offset rules anyway.
pub fn adjust_high_latitudes(
    times: &mut PrayerTimes,
    settings: &ResolvedSettings,
    adjustment: LatitudeAdjustment,
) {
    if adjustment == LatitudeAdjustment::None {
        return;
    }

    let sunrise = times[Prayer::Sunrise];
    let sunset = times[Prayer::Sunset];
    let night = sunset.hours_until(sunrise);

    let targets = [
        (Prayer::Imsak, settings.imsak, sunrise, Direction::Before),
        (Prayer::Fajr, settings.fajr, sunrise, Direction::Before),
        (Prayer::Isha, settings.isha, sunset, Direction::After),
        (Prayer::Maghrib, settings.maghrib, sunset, Direction::After),
    ];
    for (prayer, param, base, direction) in targets {
        let before = times[prayer];
        let after = adjust_time(before, base, param.magnitude(), night, adjustment, direction);
        if after != before {
            debug!("{prayer} bounded by {adjustment}: {before:?} -> {after:?}");
        }
        times[prayer] = after;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MidnightMode;
    use crate::method::ParamValue;

    const NIGHT: PrayerTime = PrayerTime::Valid(6.0);

    #[test]
    fn test_portions() {
        assert!((night_portion(LatitudeAdjustment::AngleBased, 18.0, 6.0) - 1.8).abs() < 1e-12);
        assert!((night_portion(LatitudeAdjustment::OneSeventh, 18.0, 7.0) - 1.0).abs() < 1e-12);
        assert_eq!(night_portion(LatitudeAdjustment::MiddleOfNight, 18.0, 6.0), 3.0);
    }

    #[test]
    fn test_time_within_portion_is_kept() {
        let fajr = PrayerTime::Valid(2.5);
        let sunrise = PrayerTime::Valid(4.0);
        let adjusted = adjust_time(
            fajr,
            sunrise,
            18.0,
            NIGHT,
            LatitudeAdjustment::AngleBased,
            Direction::Before,
        );
        assert_eq!(adjusted, fajr);
    }

    #[test]
    fn test_time_beyond_portion_is_clamped() {
        // 3h before sunrise with a 1.8h allowance.
        let adjusted = adjust_time(
            PrayerTime::Valid(1.0),
            PrayerTime::Valid(4.0),
            18.0,
            NIGHT,
            LatitudeAdjustment::AngleBased,
            Direction::Before,
        );
        assert!((adjusted.hours().unwrap() - 2.2).abs() < 1e-12);

        let isha = adjust_time(
            PrayerTime::Valid(23.5),
            PrayerTime::Valid(22.0),
            17.0,
            NIGHT,
            LatitudeAdjustment::OneSeventh,
            Direction::After,
        );
        assert!((isha.hours().unwrap() - (22.0 + 6.0 / 7.0)).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_time_is_filled_from_base() {
        let adjusted = adjust_time(
            PrayerTime::Invalid,
            PrayerTime::Valid(22.0),
            17.0,
            NIGHT,
            LatitudeAdjustment::MiddleOfNight,
            Direction::After,
        );
        assert_eq!(adjusted, PrayerTime::Valid(25.0));
    }

    #[test]
    fn test_unmeasurable_night_keeps_event() {
        let fajr = PrayerTime::Valid(6.5);
        let kept = adjust_time(
            fajr,
            PrayerTime::Invalid,
            18.0,
            PrayerTime::Invalid,
            LatitudeAdjustment::AngleBased,
            Direction::Before,
        );
        assert_eq!(kept, fajr);

        let still_invalid = adjust_time(
            PrayerTime::Invalid,
            PrayerTime::Invalid,
            18.0,
            PrayerTime::Invalid,
            LatitudeAdjustment::AngleBased,
            Direction::Before,
        );
        assert_eq!(still_invalid, PrayerTime::Invalid);
    }

    #[test]
    fn test_none_leaves_table_untouched() {
        let settings = ResolvedSettings {
            imsak: ParamValue::MinutesOffset(10.0),
            fajr: ParamValue::AngleDegrees(18.0),
            dhuhr: ParamValue::MinutesOffset(0.0),
            maghrib: ParamValue::MinutesOffset(0.0),
            isha: ParamValue::AngleDegrees(17.0),
            asr_factor: 1.0,
            midnight: MidnightMode::Standard,
        };
        let mut times = PrayerTimes::invalid();
        times[Prayer::Sunrise] = PrayerTime::Valid(4.0);
        times[Prayer::Sunset] = PrayerTime::Valid(22.0);

        let mut untouched = times;
        adjust_high_latitudes(&mut untouched, &settings, LatitudeAdjustment::None);
        assert_eq!(untouched, times);

        adjust_high_latitudes(&mut times, &settings, LatitudeAdjustment::AngleBased);
        assert!((times[Prayer::Fajr].hours().unwrap() - 2.2).abs() < 1e-12);
        assert!((times[Prayer::Isha].hours().unwrap() - 23.7).abs() < 1e-12);
        assert!((times[Prayer::Imsak].hours().unwrap() - 3.0).abs() < 1e-12);
        assert_eq!(times[Prayer::Maghrib], PrayerTime::Valid(22.0));
    }
}
