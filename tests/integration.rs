use salat::{
    Configuration, FormattedTime, LatitudeAdjustment, Location, MethodDescriptor, MethodKey,
    MethodRegistry, MidnightMode, ObservationDate, ParamValue, Prayer, PrayerTime,
    PrayerTimesEngine, School, TimeFormat, Tuning, CUSTOM_METHOD_ID, INVALID_TIME,
};

const ALL_FORMATS: [TimeFormat; 5] = [
    TimeFormat::H24,
    TimeFormat::H12,
    TimeFormat::H12NoSuffix,
    TimeFormat::Float,
    TimeFormat::Iso8601,
];

fn date(year: i32, month: u32, day: u32, utc_offset: f64) -> ObservationDate {
    ObservationDate::from_ymd(year, month, day)
        .unwrap()
        .with_utc_offset_hours(utc_offset)
        .unwrap()
}

fn raw_hours(
    engine: &PrayerTimesEngine,
    date: &ObservationDate,
    location: &Location,
    config: &Configuration,
    prayer: Prayer,
) -> f64 {
    engine.compute_raw(date, location, config)[prayer]
        .hours()
        .unwrap_or_else(|| panic!("{prayer} should be valid"))
}

#[test]
fn isna_equinox_in_indianapolis_matches_civil_tables() {
    let engine = PrayerTimesEngine::new();
    let day = date(2024, 3, 20, -5.0);
    let location = Location::at_sea_level(39.7042, -86.3994).unwrap();
    let config = Configuration::new(MethodKey::Isna);
    let times = engine.compute_times(&day, &location, &config);

    assert_eq!(times.get(Prayer::Sunrise).to_string(), "06:48");
    assert_eq!(times.get(Prayer::Dhuhr).to_string(), "12:53");
    assert_eq!(times.get(Prayer::Sunset).to_string(), "18:58");
    assert_eq!(times.get(Prayer::Fajr).to_string(), "05:34");
    assert_eq!(times.get(Prayer::Isha).to_string(), "20:13");

    // Solar noon at this longitude: 12h + 86.4°/15 - 5h + equation of time.
    let noon = times.hours(Prayer::Dhuhr).unwrap();
    assert!((noon - (12.0 + 86.3994 / 15.0 - 5.0 + 0.124)).abs() < 1.0 / 60.0);
}

#[test]
fn repeated_computation_is_deterministic() {
    let engine = PrayerTimesEngine::new();
    let day = date(2024, 9, 1, 3.0);
    let location = Location::new(21.4225, 39.8262, 277.0).unwrap();
    let config = Configuration::new(MethodKey::Makkah).with_school(School::Hanafi);

    let first = engine.compute_times(&day, &location, &config);
    for _ in 0..5 {
        assert_eq!(engine.compute_times(&day, &location, &config), first);
    }
}

#[test]
fn valid_float_outputs_stay_within_the_day() {
    let engine = PrayerTimesEngine::new();
    let location = Location::at_sea_level(59.9139, 10.7522).unwrap();
    for key in engine.list_method_keys().iter().copied() {
        let config = Configuration::new(key).with_time_format(TimeFormat::Float);
        let times = engine.compute_times(&date(2024, 6, 21, 2.0), &location, &config);
        for (prayer, time) in times.iter() {
            if let Some(h) = time.as_hours() {
                assert!((0.0..24.0).contains(&h), "{key} {prayer} = {h}");
            }
        }
    }
}

#[test]
fn events_are_ordered_through_the_day() {
    let engine = PrayerTimesEngine::new();
    let cases = [
        (MethodKey::Makkah, date(2024, 9, 1, 3.0), 21.4225, 39.8262),
        (MethodKey::Egypt, date(2024, 1, 15, 2.0), 30.0444, 31.2357),
        (MethodKey::Karachi, date(2024, 6, 10, 5.0), 24.8607, 67.0011),
        (MethodKey::Kemenag, date(2024, 11, 3, 7.0), -6.2088, 106.8456),
        (MethodKey::Mwl, date(2024, 12, 21, 0.0), 51.5074, -0.1278),
        (MethodKey::Mwl, date(2024, 6, 21, 1.0), 51.5074, -0.1278),
        (MethodKey::Tehran, date(2024, 3, 20, 3.5), 35.6892, 51.3890),
    ];

    for (key, day, lat, lon) in cases {
        let location = Location::at_sea_level(lat, lon).unwrap();
        let raw = engine.compute_raw(&day, &location, &Configuration::new(key));
        let h = |p: Prayer| raw[p].hours().unwrap();

        assert!(h(Prayer::Imsak) < h(Prayer::Fajr), "{key}");
        assert!(h(Prayer::Fajr) < h(Prayer::Sunrise), "{key}");
        assert!(h(Prayer::Sunrise) < h(Prayer::Dhuhr), "{key}");
        assert!(h(Prayer::Dhuhr) < h(Prayer::Asr), "{key}");
        assert!(h(Prayer::Asr) < h(Prayer::Sunset), "{key}");
        assert!(h(Prayer::Sunset) <= h(Prayer::Maghrib), "{key}");
        assert!(h(Prayer::Maghrib) < h(Prayer::Isha), "{key}");
        assert!(h(Prayer::FirstThird) < h(Prayer::Midnight), "{key}");
        assert!(h(Prayer::Midnight) < h(Prayer::LastThird), "{key}");
    }
}

#[test]
fn tuning_fajr_moves_only_fajr() {
    let engine = PrayerTimesEngine::new();
    let day = date(2024, 1, 15, 2.0);
    let location = Location::at_sea_level(30.0444, 31.2357).unwrap();
    let plain = Configuration::new(MethodKey::Egypt);
    let tuned = plain.clone().tune(Tuning {
        fajr: 5.0,
        ..Tuning::default()
    });

    let before = engine.compute_raw(&day, &location, &plain);
    let after = engine.compute_raw(&day, &location, &tuned);
    for prayer in Prayer::ALL {
        let delta = after[prayer].hours().unwrap() - before[prayer].hours().unwrap();
        let expected = if prayer == Prayer::Fajr { 5.0 / 60.0 } else { 0.0 };
        assert!((delta - expected).abs() < 1e-9, "{prayer}: {delta}");
    }
}

#[test]
fn jafari_midnight_is_measured_to_fajr() {
    let engine = PrayerTimesEngine::new();
    let day = date(2024, 3, 20, 3.5);
    let location = Location::at_sea_level(35.6892, 51.3890).unwrap();
    let jafari = Configuration::new(MethodKey::Tehran);
    let standard = jafari.clone().with_midnight_mode(MidnightMode::Standard);

    let h = |config: &Configuration, p| raw_hours(&engine, &day, &location, config, p);

    let sunset = h(&jafari, Prayer::Sunset);
    let to_fajr = h(&jafari, Prayer::Fajr) + 24.0 - sunset;
    let to_sunrise = h(&standard, Prayer::Sunrise) + 24.0 - sunset;
    assert!((h(&jafari, Prayer::Midnight) - (sunset + to_fajr / 2.0)).abs() < 1e-9);
    assert!((h(&standard, Prayer::Midnight) - (sunset + to_sunrise / 2.0)).abs() < 1e-9);

    let times = engine.compute_times(&day, &location, &jafari);
    assert_eq!(times.get(Prayer::Midnight).to_string(), "23:30");
    let times = engine.compute_times(&day, &location, &standard);
    assert_eq!(times.get(Prayer::Midnight).to_string(), "00:12");
}

#[test]
fn unknown_method_behaves_like_mwl() {
    let engine = PrayerTimesEngine::new();
    let day = date(2024, 12, 21, 0.0);
    let location = Location::at_sea_level(51.5074, -0.1278).unwrap();

    let unknown = Configuration::default().with_method_str("ATLANTIS");
    let mwl = Configuration::new(MethodKey::Mwl);
    assert_eq!(
        engine.compute_times(&day, &location, &unknown),
        engine.compute_times(&day, &location, &mwl)
    );

    // An empty Custom slot also resolves to MWL.
    let custom = Configuration::new(MethodKey::Custom);
    assert_eq!(
        engine.compute_times(&day, &location, &custom),
        engine.compute_times(&day, &location, &mwl)
    );
}

#[test]
fn polar_night_is_invalid_in_every_format() {
    let engine = PrayerTimesEngine::new();
    let day = date(2024, 12, 21, 0.0);
    let location = Location::at_sea_level(80.0, 0.0).unwrap();

    for format in ALL_FORMATS {
        let config = Configuration::new(MethodKey::Mwl).with_time_format(format);
        let times = engine.compute_times(&day, &location, &config);
        for prayer in [
            Prayer::Sunrise,
            Prayer::Sunset,
            Prayer::Maghrib,
            Prayer::Midnight,
            Prayer::FirstThird,
            Prayer::LastThird,
        ] {
            assert_eq!(times.get(prayer), &FormattedTime::Invalid, "{prayer} {format}");
            assert_eq!(times.get(prayer).to_string(), INVALID_TIME);
            assert_eq!(times.hours(prayer), None);
        }
        // The sun still dips to 18° below the horizon, so Fajr survives.
        assert!(times.get(Prayer::Fajr).is_valid(), "{format}");
    }
}

#[test]
fn high_latitude_summer_bounds_twilight() {
    let engine = PrayerTimesEngine::new();
    let day = date(2024, 6, 21, 2.0);
    let location = Location::at_sea_level(59.9139, 10.7522).unwrap();

    let none = Configuration::new(MethodKey::Mwl)
        .with_latitude_adjustment(LatitudeAdjustment::None);
    let raw = engine.compute_raw(&day, &location, &none);
    assert_eq!(raw[Prayer::Fajr], PrayerTime::Invalid);
    assert_eq!(raw[Prayer::Isha], PrayerTime::Invalid);
    assert_eq!(raw[Prayer::Imsak], PrayerTime::Invalid);

    let angle = Configuration::new(MethodKey::Mwl);
    let raw = engine.compute_raw(&day, &location, &angle);
    let h = |p: Prayer| raw[p].hours().unwrap();
    let night = h(Prayer::Sunrise) + 24.0 - h(Prayer::Sunset);
    assert!((h(Prayer::Fajr) - (h(Prayer::Sunrise) - 18.0 / 60.0 * night)).abs() < 1e-9);
    assert!((h(Prayer::Isha) - (h(Prayer::Sunset) + 17.0 / 60.0 * night)).abs() < 1e-9);
    assert!((h(Prayer::Imsak) - (h(Prayer::Fajr) - 10.0 / 60.0)).abs() < 1e-9);

    let seventh = Configuration::new(MethodKey::Mwl)
        .with_latitude_adjustment(LatitudeAdjustment::OneSeventh);
    let raw = engine.compute_raw(&day, &location, &seventh);
    let fajr = raw[Prayer::Fajr].hours().unwrap();
    assert!((fajr - (h(Prayer::Sunrise) - night / 7.0)).abs() < 1e-9);
}

#[test]
fn float_and_clock_formats_agree() {
    let engine = PrayerTimesEngine::new();
    let day = date(2024, 9, 1, 3.0);
    let location = Location::at_sea_level(21.4225, 39.8262).unwrap();
    let base = Configuration::new(MethodKey::Makkah);

    let float_config = base.clone().with_time_format(TimeFormat::Float);
    let floats = engine.compute_times(&day, &location, &float_config);
    let clocks = engine.compute_times(&day, &location, &base.with_time_format(TimeFormat::H24));

    for (prayer, value) in floats.iter() {
        let hours = value.as_hours().unwrap();
        let total = ((hours + 0.5 / 60.0) * 60.0).floor() as u32 % (24 * 60);
        let rederived = format!("{:02}:{:02}", total / 60, total % 60);
        assert_eq!(clocks.get(prayer).to_string(), rederived, "{prayer}");
    }
}

#[test]
fn custom_method_is_installed_and_used() {
    let mut engine = PrayerTimesEngine::new();
    let day = date(2024, 3, 20, 0.0);
    let location = Location::at_sea_level(51.5074, -0.1278).unwrap();

    engine.install_custom_method(
        MethodDescriptor::custom("Local mosque")
            .with_fajr_angle(18.0)
            .with_isha(ParamValue::AngleDegrees(17.0)),
    );
    let custom = engine.describe_method(MethodKey::Custom);
    assert_eq!(custom.id, CUSTOM_METHOD_ID);
    assert_eq!(custom.name, "Local mosque");

    // Same angles as MWL, so the same schedule.
    let mwl = engine.compute_times(&day, &location, &Configuration::new(MethodKey::Mwl));
    let mine = engine.compute_times(&day, &location, &Configuration::new(MethodKey::Custom));
    assert_eq!(mine, mwl);

    engine.install_custom_method(MethodDescriptor::custom("Fixed Isha").with_isha("90 min"));
    let raw = engine.compute_raw(&day, &location, &Configuration::new(MethodKey::Custom));
    let isha = raw[Prayer::Isha].hours().unwrap();
    let maghrib = raw[Prayer::Maghrib].hours().unwrap();
    assert!((isha - maghrib - 1.5).abs() < 1e-9);
}

#[test]
fn custom_method_carries_midnight_mode_and_location() {
    let day = date(2024, 3, 20, 3.5);
    let tehran = Location::at_sea_level(35.6892, 51.3890).unwrap();

    let mut registry = MethodRegistry::new();
    assert!(registry.custom().is_none());
    registry.install_custom(
        MethodDescriptor::custom("Neighbourhood")
            .with_fajr_angle(17.7)
            .with_isha(ParamValue::AngleDegrees(14.0))
            .with_midnight_mode(MidnightMode::Jafari)
            .with_location(tehran),
    );
    let installed = registry.custom().unwrap();
    assert_eq!(installed.key, MethodKey::Custom);
    assert_eq!(installed.location, Some(tehran));
    assert_eq!(installed.params.midnight, Some(MidnightMode::Jafari));

    let mut engine = PrayerTimesEngine::new();
    engine.install_custom_method(installed.clone());
    let config = Configuration::new(MethodKey::Custom);
    assert_eq!(engine.meta(&day, &tehran, &config).midnight_mode, MidnightMode::Jafari);

    // Midnight sits halfway from Sunset to Fajr, not to Sunrise.
    let raw = engine.compute_raw(&day, &tehran, &config);
    let h = |p: Prayer| raw[p].hours().unwrap();
    let expected = h(Prayer::Sunset) + (h(Prayer::Fajr) + 24.0 - h(Prayer::Sunset)) / 2.0;
    assert!((h(Prayer::Midnight) - expected).abs() < 1e-9);
}

#[test]
fn method_catalogue_is_complete() {
    let engine = PrayerTimesEngine::new();
    let keys = engine.list_method_keys();
    assert_eq!(keys.len(), 24);
    assert_eq!(keys.first(), Some(&MethodKey::Mwl));
    assert_eq!(keys.last(), Some(&MethodKey::Custom));

    let makkah = engine.describe_method(MethodKey::Makkah);
    assert_eq!(makkah.name, "Umm Al-Qura University, Makkah");
    assert_eq!(makkah.params.isha, Some(ParamValue::MinutesOffset(90.0)));
    assert!(engine.describe_method(MethodKey::Moonsighting).location.is_none());
}

#[test]
fn elevation_widens_the_day() {
    let engine = PrayerTimesEngine::new();
    let day = date(2024, 9, 1, 3.0);
    let sea = Location::at_sea_level(21.4225, 39.8262).unwrap();
    let hill = Location::new(21.4225, 39.8262, 900.0).unwrap();
    let config = Configuration::new(MethodKey::Makkah);

    let rise = |loc| raw_hours(&engine, &day, loc, &config, Prayer::Sunrise);
    let set = |loc| raw_hours(&engine, &day, loc, &config, Prayer::Sunset);
    assert!(rise(&hill) < rise(&sea));
    assert!(set(&hill) > set(&sea));
}

#[test]
fn iso8601_carries_date_and_offset() {
    let engine = PrayerTimesEngine::new();
    let day = date(2024, 3, 20, -5.0);
    let location = Location::at_sea_level(39.7042, -86.3994).unwrap();
    let config = Configuration::new(MethodKey::Isna).with_time_format(TimeFormat::Iso8601);
    let times = engine.compute_times(&day, &location, &config);

    assert_eq!(
        times.get(Prayer::Dhuhr).to_string(),
        "2024-03-20T12:53:00-05:00"
    );
    // Midnight falls after 24h and rolls onto the next day.
    assert_eq!(
        times.get(Prayer::Midnight).to_string(),
        "2024-03-21T00:53:00-05:00"
    );
}

#[cfg(feature = "serde")]
#[test]
fn configuration_loads_from_json() {
    let config: Configuration = serde_json::from_str(
        r#"{
            "method": "jafari",
            "school": "HANAFI",
            "latitude_adjustment": "ONE_SEVENTH",
            "time_format": "12h",
            "offsets": {"Fajr": 2.0}
        }"#,
    )
    .unwrap();
    assert_eq!(config.method, MethodKey::Jafari);
    assert_eq!(config.school, School::Hanafi);
    assert_eq!(config.latitude_adjustment, LatitudeAdjustment::OneSeventh);
    assert_eq!(config.offset(Prayer::Fajr), 2.0);
}

#[cfg(feature = "serde")]
#[test]
fn result_serializes_as_named_map() {
    let engine = PrayerTimesEngine::new();
    let location = Location::at_sea_level(80.0, 0.0).unwrap();
    let times = engine.compute_times(
        &date(2024, 12, 21, 0.0),
        &location,
        &Configuration::default(),
    );
    let json = serde_json::to_value(&times).unwrap();
    assert_eq!(json["Sunrise"], INVALID_TIME);
    assert_eq!(json["Dhuhr"], "11:58");

    let meta = engine.meta(&date(2024, 12, 21, 0.0), &location, &Configuration::default());
    let json = serde_json::to_value(&meta).unwrap();
    assert_eq!(json["method"]["name"], "Muslim World League");
    assert_eq!(json["midnight_mode"], "STANDARD");
    assert_eq!(json["timezone"], "+00:00");
}
