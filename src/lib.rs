//! # maplet-view
//!
//! The view and navigation engine of an interactive slippy map, inspired by
//! Leaflet.
//!
//! It converts between geographic coordinates, Web-Mercator world pixels and
//! viewport pixels ([`Transform`]), owns the camera and its animated
//! transitions ([`Viewport`]), and turns raw pointer, touch, wheel and
//! keyboard input into camera moves, including drag inertia
//! ([`InputEngine`]). Rendering, layers and tile loading are left to the host.

pub mod animation;
pub mod core;
pub mod input;
pub mod prelude;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::{Bounds, GeoBounds},
    config::{InputOptions, MapOptions, ViewOptions},
    events::{ListenerId, ViewEvent},
    geo::{GeoPoint, Point},
    projection::{SphericalMercator, TileCoord},
    transform::Transform,
    viewport::{AnimateOptions, FitBoundsOptions, Viewport},
};

pub use crate::animation::{
    AnimationHandle, EasingType, FrameClock, ManualFrameClock, SystemFrameClock,
};

pub use crate::input::{events::InputEvent, handler::InputEngine};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Animation cancelled")]
    AnimationCancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Initializes `env_logger` for the `log` output of this crate. Safe to call
/// more than once.
#[cfg(feature = "debug")]
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(cfg!(test))
        .try_init();
}
