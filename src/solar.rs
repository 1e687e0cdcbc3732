// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! Low-precision solar ephemeris.
//!
//! Implements the USNO "approximate solar coordinates" algorithm, good to
//! about one arc-minute between 1950 and 2050, well inside the tolerance of
//! any prayer-time convention.
//!
//! ## References
//! * U.S. Naval Observatory, *Approximate Solar Coordinates*
//!   (aa.usno.navy.mil/faq/sun_approx)

use crate::angles::{arcsin, arctan2, cos, fix_angle, fix_hour, sin};
use crate::julian_date::JulianDate;

/// Apparent position of the Sun relevant to rise/transit/set solving.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolarPosition {
    /// Declination in degrees. Signed and never range-fixed.
    pub declination: f64,
    /// Equation of time in hours (apparent minus mean solar time).
    pub equation_of_time: f64,
}

/// Sun declination and equation of time at a Julian Date.
pub fn solar_position(jd: JulianDate) -> SolarPosition {
    let d = jd.days_since_j2000().value();

    // Mean anomaly and mean longitude (deg)
    let g = fix_angle(357.529 + 0.985_600_28 * d);
    let q = fix_angle(280.459 + 0.985_647_36 * d);
    // Apparent ecliptic longitude (deg)
    let l = fix_angle(q + 1.915 * sin(g) + 0.020 * sin(2.0 * g));

    // Mean obliquity of the ecliptic (deg)
    let e = 23.439 - 0.000_000_36 * d;

    // Right ascension in hours
    let ra = arctan2(cos(e) * sin(l), cos(l)) / 15.0;
    let declination = arcsin(sin(e) * sin(l));
    let equation_of_time = q / 15.0 - fix_hour(ra);

    SolarPosition {
        declination,
        equation_of_time,
    }
}
