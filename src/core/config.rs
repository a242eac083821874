//! Configuration for the view and input engines
//!
//! Options deserialize from JSON with every field optional; missing fields
//! take the Leaflet-derived defaults in [`crate::core::constants`].
//! Out-of-range values are clamped by [`MapOptions::sanitized`] rather than
//! rejected, except for combinations that have no sensible reading.

use crate::animation::EasingType;
use crate::core::bounds::GeoBounds;
use crate::core::constants::*;
use crate::prelude::Duration;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Camera and transition behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub tile_size: f64,
    /// Requested zooms are rounded to multiples of this (0 = free zoom)
    pub zoom_snap: f64,
    /// Step used by `zoom_in` / `zoom_out`
    pub zoom_delta: f64,
    pub max_bounds: Option<GeoBounds>,
    /// 0.0 = no resistance, 1.0 = hard clamp
    pub max_bounds_viscosity: f64,
    pub animation_duration_ms: u64,
    pub pan_duration_ms: u64,
    pub fly_duration_ms: u64,
    pub easing: EasingType,
    pub fly_easing: EasingType,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            tile_size: TILE_SIZE as f64,
            zoom_snap: DEFAULT_ZOOM_SNAP,
            zoom_delta: DEFAULT_ZOOM_DELTA,
            max_bounds: None,
            max_bounds_viscosity: 0.0,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            pan_duration_ms: DEFAULT_PAN_DURATION_MS,
            fly_duration_ms: DEFAULT_FLY_DURATION_MS,
            easing: EasingType::EaseOut,
            fly_easing: EasingType::EaseInOut,
        }
    }
}

impl ViewOptions {
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    pub fn pan_duration(&self) -> Duration {
        Duration::from_millis(self.pan_duration_ms)
    }

    pub fn fly_duration(&self) -> Duration {
        Duration::from_millis(self.fly_duration_ms)
    }

    /// Rejects contradictory values and clamps the rest into range
    pub fn sanitized(mut self) -> Result<Self> {
        if !(self.min_zoom.is_finite() && self.max_zoom.is_finite())
            || self.min_zoom > self.max_zoom
        {
            return Err(MapError::Config(format!(
                "min_zoom ({}) must not exceed max_zoom ({})",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(MapError::Config(format!(
                "tile_size must be positive, got {}",
                self.tile_size
            )));
        }

        if !(0.0..=1.0).contains(&self.max_bounds_viscosity) {
            #[cfg(feature = "debug")]
            log::warn!(
                "max_bounds_viscosity {} outside [0, 1], clamping",
                self.max_bounds_viscosity
            );
            self.max_bounds_viscosity = if self.max_bounds_viscosity.is_nan() {
                0.0
            } else {
                self.max_bounds_viscosity.clamp(0.0, 1.0)
            };
        }
        if !(self.zoom_snap.is_finite() && self.zoom_snap >= 0.0) {
            self.zoom_snap = 0.0;
        }
        if !(self.zoom_delta.is_finite() && self.zoom_delta > 0.0) {
            self.zoom_delta = DEFAULT_ZOOM_DELTA;
        }
        Ok(self)
    }
}

/// Which gestures are enabled and how they are tuned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputOptions {
    pub dragging: bool,
    pub scroll_wheel_zoom: bool,
    pub double_click_zoom: bool,
    pub touch_zoom: bool,
    pub keyboard: bool,
    pub inertia: bool,
    pub inertia_deceleration: f64,
    pub inertia_max_speed: f64,
    pub inertia_min_speed: f64,
    pub inertia_window_ms: u64,
    pub wheel_debounce_ms: u64,
    pub wheel_px_per_zoom_level: f64,
    pub double_tap_ms: u64,
    pub double_tap_tolerance: f64,
    pub tap_tolerance: f64,
    pub keyboard_pan_delta: f64,
    pub animate_zoom: bool,
    pub animate_keyboard_pan: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            dragging: true,
            scroll_wheel_zoom: true,
            double_click_zoom: true,
            touch_zoom: true,
            keyboard: true,
            inertia: true,
            inertia_deceleration: INERTIA_DECELERATION,
            inertia_max_speed: INERTIA_MAX_SPEED,
            inertia_min_speed: INERTIA_MIN_SPEED,
            inertia_window_ms: INERTIA_WINDOW_MS,
            wheel_debounce_ms: WHEEL_DEBOUNCE_MS,
            wheel_px_per_zoom_level: WHEEL_PX_PER_ZOOM_LEVEL,
            double_tap_ms: DOUBLE_TAP_MS,
            double_tap_tolerance: DOUBLE_TAP_TOLERANCE,
            tap_tolerance: TAP_TOLERANCE,
            keyboard_pan_delta: KEYBOARD_PAN_DELTA,
            animate_zoom: true,
            animate_keyboard_pan: true,
        }
    }
}

impl InputOptions {
    /// Clamps tuning values into usable ranges
    pub fn sanitized(mut self) -> Self {
        let defaults = InputOptions::default();
        let positive = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                #[cfg(feature = "debug")]
                log::warn!("input option {value} is not positive, using {fallback}");
                fallback
            }
        };

        self.inertia_deceleration =
            positive(self.inertia_deceleration, defaults.inertia_deceleration);
        self.inertia_max_speed = positive(self.inertia_max_speed, defaults.inertia_max_speed);
        self.wheel_px_per_zoom_level =
            positive(self.wheel_px_per_zoom_level, defaults.wheel_px_per_zoom_level);
        if !(self.inertia_min_speed.is_finite() && self.inertia_min_speed >= 0.0) {
            self.inertia_min_speed = defaults.inertia_min_speed;
        }
        self
    }
}

/// All engine options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub view: ViewOptions,
    pub input: InputOptions,
}

impl MapOptions {
    /// Parses options from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let options: MapOptions = serde_json::from_str(json)?;
        options.sanitized()
    }

    pub fn sanitized(self) -> Result<Self> {
        Ok(Self {
            view: self.view.sanitized()?,
            input: self.input.sanitized(),
        })
    }
}
