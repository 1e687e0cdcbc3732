// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! Caller minute offsets.

use crate::prayer::{Prayer, PrayerTimes};
use std::collections::BTreeMap;

/// Add `minutes / 60` hours to every event named in `offsets`.
///
/// Events missing from the map are untouched; invalid events stay invalid.
pub fn apply_offsets(times: &mut PrayerTimes, offsets: &BTreeMap<Prayer, f64>) {
    for (&prayer, &minutes) in offsets {
        times[prayer] = times[prayer].shifted(minutes / 60.0);
    }
}
