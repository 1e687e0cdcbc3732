// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! Degree-based trigonometry and range normalisation.
//!
//! Every ephemeris formula in this crate is written in degrees; these helpers
//! convert to radians at the call boundary so the formulas read like their
//! published form.

#[inline]
pub fn sin(deg: f64) -> f64 {
    deg.to_radians().sin()
}

#[inline]
pub fn cos(deg: f64) -> f64 {
    deg.to_radians().cos()
}

#[inline]
pub fn tan(deg: f64) -> f64 {
    deg.to_radians().tan()
}

#[inline]
pub fn arcsin(x: f64) -> f64 {
    x.asin().to_degrees()
}

#[inline]
pub fn arccos(x: f64) -> f64 {
    x.acos().to_degrees()
}

#[inline]
pub fn arctan(x: f64) -> f64 {
    x.atan().to_degrees()
}

/// Arc-cotangent in degrees, `atan(1/x)`.
///
/// Follows the sign of `x`, so the result lies in `(-90, 90]`.
#[inline]
pub fn arccot(x: f64) -> f64 {
    arctan(1.0 / x)
}

#[inline]
pub fn arctan2(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Wrap `a` into `[0, b)`.
#[inline]
pub fn fix(a: f64, b: f64) -> f64 {
    let a = a - b * (a / b).floor();
    if a < 0.0 {
        a + b
    } else if a >= b {
        // tiny negative inputs round up to exactly `b`
        a - b
    } else {
        a
    }
}

/// Wrap an angle into `[0, 360)`.
#[inline]
pub fn fix_angle(a: f64) -> f64 {
    fix(a, 360.0)
}

/// Wrap an hour value into `[0, 24)`.
#[inline]
pub fn fix_hour(a: f64) -> f64 {
    fix(a, 24.0)
}
