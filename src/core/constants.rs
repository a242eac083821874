//! Core constants derived from Leaflet defaults and common web-map conventions.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Zoom range used when no limits are configured.
pub const DEFAULT_MIN_ZOOM: f64 = 0.0;
pub const DEFAULT_MAX_ZOOM: f64 = 18.0;

/// Snap zoom levels to these quanta (1 → integer zooms, 0 → free zoom).
pub const DEFAULT_ZOOM_SNAP: f64 = 1.0;

/// Programmatic +/- zoom step when calling `zoom_in/zoom_out`.
pub const DEFAULT_ZOOM_DELTA: f64 = 1.0;

/// Durations of animated transitions, in milliseconds.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 250;
pub const DEFAULT_PAN_DURATION_MS: u64 = 250;
pub const DEFAULT_FLY_DURATION_MS: u64 = 1000;

/// Padding applied by `fit_bounds` when the caller gives none, in pixels.
pub const DEFAULT_FIT_PADDING: f64 = 0.0;

/// Inertia: releases slower than this do not fling (px/s).
pub const INERTIA_MIN_SPEED: f64 = 100.0;

/// Inertia: fling speed cap (px/s).
pub const INERTIA_MAX_SPEED: f64 = 1500.0;

/// Inertia: constant deceleration (px/s²).
pub const INERTIA_DECELERATION: f64 = 3000.0;

/// Inertia: drag samples older than this are dropped (ms).
pub const INERTIA_WINDOW_MS: u64 = 150;

/// Wheel: quiet period before accumulated delta is committed (ms).
pub const WHEEL_DEBOUNCE_MS: u64 = 40;

/// Wheel: pixels of wheel delta per zoom level.
pub const WHEEL_PX_PER_ZOOM_LEVEL: f64 = 60.0;

/// Maximum time between taps for a double tap (ms).
pub const DOUBLE_TAP_MS: u64 = 300;

/// Maximum distance between taps for a double tap (px).
pub const DOUBLE_TAP_TOLERANCE: f64 = 10.0;

/// A press that moves less than this is still a tap (px).
pub const TAP_TOLERANCE: f64 = 5.0;

/// Arrow-key pan step (px).
pub const KEYBOARD_PAN_DELTA: f64 = 80.0;

/// Zoom step multiplier when shift is held on +/- keys.
pub const KEYBOARD_SHIFT_ZOOM_FACTOR: f64 = 3.0;
