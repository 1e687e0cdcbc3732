// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 The salat contributors

//! Per-computation settings resolved from a method and a configuration.

use crate::config::{Configuration, MidnightMode};
use crate::method::{MethodDescriptor, ParamValue};
use log::debug;

/// Concrete parameters for one computation.
///
/// Built once from the active [`MethodDescriptor`] and the caller's
/// [`Configuration`]; every absent method parameter is already replaced by
/// its default here.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub imsak: ParamValue,
    pub fajr: ParamValue,
    pub dhuhr: ParamValue,
    pub maghrib: ParamValue,
    pub isha: ParamValue,
    /// Shadow-length multiple used for Asr.
    pub asr_factor: f64,
    pub midnight: MidnightMode,
}

impl ResolvedSettings {
    pub const DEFAULT_IMSAK: ParamValue = ParamValue::MinutesOffset(10.0);
    pub const DEFAULT_FAJR: ParamValue = ParamValue::AngleDegrees(0.0);
    pub const DEFAULT_DHUHR: ParamValue = ParamValue::MinutesOffset(0.0);
    pub const DEFAULT_MAGHRIB: ParamValue = ParamValue::MinutesOffset(0.0);
    pub const DEFAULT_ISHA: ParamValue = ParamValue::AngleDegrees(0.0);

    pub fn resolve(method: &MethodDescriptor, config: &Configuration) -> Self {
        let params = &method.params;
        let asr_factor = config
            .asr_shadow_factor
            .filter(|f| f.is_finite() && *f > 0.0)
            .unwrap_or_else(|| config.school.shadow_factor());
        // An explicit caller choice wins over the method's own convention.
        let midnight = config
            .midnight_mode
            .or(params.midnight)
            .unwrap_or_default();

        let settings = Self {
            imsak: params.imsak.unwrap_or(Self::DEFAULT_IMSAK),
            fajr: params.fajr.unwrap_or(Self::DEFAULT_FAJR),
            dhuhr: params.dhuhr.unwrap_or(Self::DEFAULT_DHUHR),
            maghrib: params.maghrib.unwrap_or(Self::DEFAULT_MAGHRIB),
            isha: params.isha.unwrap_or(Self::DEFAULT_ISHA),
            asr_factor,
            midnight,
        };
        debug!("resolved settings for {}: {settings:?}", method.key);
        settings
    }
}
