//! Prelude module for common maplet-view types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use maplet_view::prelude::*;`

pub use crate::core::{
    bounds::{Bounds, GeoBounds},
    config::{InputOptions, MapOptions, ViewOptions},
    events::{ListenerId, ViewEvent},
    geo::{CoordinateLike, GeoPoint, Point},
    projection::{Projection, SphericalMercator, TileCoord},
    transform::Transform,
    viewport::{AnimateOptions, FitBoundsOptions, ViewState, Viewport},
};

pub use crate::animation::{
    AnimationHandle, AnimationOutcome, EasingType, FrameClock, FrameRequest, FrameToken,
    ManualFrameClock, SystemFrameClock,
};

pub use crate::input::{
    events::{EventHandled, InputEvent, KeyCode, KeyModifiers, TouchPoint},
    handler::{GestureState, InputEngine},
};

pub use crate::traits::{Lerp, PointMath};

pub use crate::{MapError, Result};

pub use instant::Instant;
pub use std::{collections::VecDeque, time::Duration};

pub use fxhash::FxHashMap as HashMap;
