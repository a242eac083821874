//! Stateful camera: a [`Transform`] plus animated transitions, zoom snapping,
//! max-bounds resistance and change notifications.
//!
//! Every mutator returns an [`AnimationHandle`]. Immediate changes hand back
//! an already-completed handle; animated ones resolve when the host has
//! ticked the animation to its end, or with a cancellation when a newer
//! request or [`Viewport::stop_animation`] supersedes it.

use crate::animation::handle::CompletionSender;
use crate::animation::{
    AnimationHandle, AnimationOutcome, EasingType, FrameClock, FrameRequest, SystemFrameClock,
};
use crate::core::bounds::GeoBounds;
use crate::core::config::ViewOptions;
use crate::core::constants::DEFAULT_FIT_PADDING;
use crate::core::events::{EventManager, ListenerId, ViewEvent};
use crate::core::geo::{clamp, GeoPoint, Point};
use crate::core::projection::SphericalMercator;
use crate::core::transform::Transform;
use crate::prelude::{Duration, Instant};
use crate::traits::Lerp;
use crate::Result;
use crossbeam_channel::Receiver;

/// Zoom differences below this are treated as "no change"
const ZOOM_EPSILON: f64 = 1e-9;

/// Degrees; center differences below this are treated as "no change"
const CENTER_EPSILON: f64 = 1e-12;

/// How a mutator applies its change
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimateOptions {
    pub animate: bool,
    /// Overrides the configured duration for this call
    pub duration: Option<Duration>,
    /// Overrides the configured easing for this call
    pub easing: Option<EasingType>,
}

impl AnimateOptions {
    pub fn immediate() -> Self {
        Self::default()
    }

    pub fn animated() -> Self {
        Self {
            animate: true,
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = Some(easing);
        self
    }
}

impl From<bool> for AnimateOptions {
    fn from(animate: bool) -> Self {
        Self {
            animate,
            ..Self::default()
        }
    }
}

/// Options for [`Viewport::fit_bounds`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBoundsOptions {
    /// Pixels kept free on every side
    pub padding: f64,
    /// Cap on the resulting zoom
    pub max_zoom: Option<f64>,
    pub animate: AnimateOptions,
}

impl Default for FitBoundsOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_FIT_PADDING,
            max_zoom: None,
            animate: AnimateOptions::immediate(),
        }
    }
}

/// Whether a transition is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Animating,
}

/// The single in-flight transition
#[derive(Debug)]
struct ActiveAnimation {
    start_center: GeoPoint,
    start_zoom: f64,
    target_center: GeoPoint,
    target_zoom: f64,
    start_time: Instant,
    duration: Duration,
    easing: EasingType,
    /// Extra zoom-out at the midpoint, used by `fly_to`
    arc: f64,
    completion: CompletionSender,
    frame: Option<FrameRequest>,
}

impl ActiveAnimation {
    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Center and zoom at normalized time `t`
    fn sample(&self, t: f64) -> (GeoPoint, f64) {
        if t >= 1.0 {
            return (self.target_center, self.target_zoom);
        }
        let eased = self.easing.apply(t);
        let center = self.start_center.lerp(&self.target_center, eased);
        let zoom = self.start_zoom.lerp(&self.target_zoom, eased)
            - self.arc * 4.0 * eased * (1.0 - eased);
        (center, zoom)
    }
}

/// Owns the camera of one map instance
pub struct Viewport {
    transform: Transform,
    options: ViewOptions,
    animation: Option<ActiveAnimation>,
    events: EventManager,
    clock: Box<dyn FrameClock>,
}

impl Viewport {
    /// Viewport with default options, driven by the wall clock
    pub fn new(center: GeoPoint, zoom: f64, width: f64, height: f64) -> Self {
        Self::build(
            center,
            zoom,
            width,
            height,
            ViewOptions::default(),
            Box::new(SystemFrameClock::new()),
        )
    }

    /// Viewport with explicit options and host clock
    pub fn with_options(
        center: GeoPoint,
        zoom: f64,
        width: f64,
        height: f64,
        options: ViewOptions,
        clock: impl FrameClock + 'static,
    ) -> Result<Self> {
        let options = options.sanitized()?;
        Ok(Self::build(center, zoom, width, height, options, Box::new(clock)))
    }

    /// Replaces the frame clock, stopping any running animation first
    pub fn set_clock(&mut self, clock: impl FrameClock + 'static) {
        self.stop_animation();
        self.clock = Box::new(clock);
    }

    fn build(
        center: GeoPoint,
        zoom: f64,
        width: f64,
        height: f64,
        options: ViewOptions,
        clock: Box<dyn FrameClock>,
    ) -> Self {
        let mut transform = Transform::new(center, zoom, width, height);
        transform.set_tile_size(options.tile_size);
        transform.set_zoom_limits(options.min_zoom, options.max_zoom);

        let mut viewport = Self {
            transform,
            options,
            animation: None,
            events: EventManager::new(),
            clock,
        };
        let zoom = viewport.snap_zoom(zoom);
        let center = viewport.constrain_center(center);
        viewport.transform.set_view(center, zoom);
        viewport
    }

    // --- Read access ---

    /// Coordinate conversions for renderers
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn get_center(&self) -> GeoPoint {
        self.transform.center()
    }

    pub fn get_zoom(&self) -> f64 {
        self.transform.zoom()
    }

    pub fn get_bounds(&self) -> GeoBounds {
        self.transform.get_bounds()
    }

    pub fn get_size(&self) -> Point {
        self.transform.size()
    }

    pub fn get_min_zoom(&self) -> f64 {
        self.transform.min_zoom()
    }

    pub fn get_max_zoom(&self) -> f64 {
        self.transform.max_zoom()
    }

    pub fn max_bounds(&self) -> Option<&GeoBounds> {
        self.options.max_bounds.as_ref()
    }

    /// Meters per pixel at the view center
    pub fn get_resolution(&self) -> f64 {
        SphericalMercator::resolution_at(
            self.transform.center().lat,
            self.transform.zoom(),
            self.transform.tile_size(),
        )
    }

    pub fn state(&self) -> ViewState {
        if self.animation.is_some() {
            ViewState::Animating
        } else {
            ViewState::Idle
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Current time on the host clock
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    // --- Notifications ---

    /// Register a callback invoked synchronously for every [`ViewEvent`]
    pub fn on<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&ViewEvent) + Send + 'static,
    {
        self.events.on(callback)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    /// Channel receiving every subsequent [`ViewEvent`]
    pub fn subscribe(&mut self) -> Receiver<ViewEvent> {
        self.events.subscribe()
    }

    // --- Configuration ---

    /// Resizes the viewport; the center stays put
    pub fn set_size(&mut self, width: f64, height: f64) {
        if width == self.transform.width() && height == self.transform.height() {
            return;
        }
        self.transform.set_size(width, height);
        self.events.emit(ViewEvent::Resize {
            width: self.transform.width(),
            height: self.transform.height(),
        });
    }

    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (old_center, old_zoom) = (self.transform.center(), self.transform.zoom());
        self.options.min_zoom = min_zoom.min(max_zoom);
        self.options.max_zoom = max_zoom.max(min_zoom);
        self.transform
            .set_zoom_limits(self.options.min_zoom, self.options.max_zoom);
        self.emit_change(old_center, old_zoom);
    }

    /// Sets (or clears) the pan limits and re-applies them to the current center
    pub fn set_max_bounds(&mut self, bounds: Option<GeoBounds>, viscosity: f64) {
        self.options.max_bounds = bounds;
        self.options.max_bounds_viscosity = if viscosity.is_nan() {
            0.0
        } else {
            viscosity.clamp(0.0, 1.0)
        };

        let (old_center, old_zoom) = (self.transform.center(), self.transform.zoom());
        let constrained = self.constrain_center(old_center);
        self.transform.set_center(constrained);
        self.emit_change(old_center, old_zoom);
    }

    pub fn set_zoom_snap(&mut self, zoom_snap: f64) {
        self.options.zoom_snap = if zoom_snap.is_finite() && zoom_snap >= 0.0 {
            zoom_snap
        } else {
            0.0
        };
    }

    pub fn set_zoom_delta(&mut self, zoom_delta: f64) {
        if zoom_delta.is_finite() && zoom_delta > 0.0 {
            self.options.zoom_delta = zoom_delta;
        }
    }

    // --- Mutators ---

    pub fn set_center(
        &mut self,
        center: GeoPoint,
        animate: impl Into<AnimateOptions>,
    ) -> AnimationHandle {
        let zoom = self.transform.zoom();
        self.change_view(center, zoom, animate.into(), self.options.pan_duration())
    }

    pub fn set_zoom(&mut self, zoom: f64, animate: impl Into<AnimateOptions>) -> AnimationHandle {
        let center = self.transform.center();
        let zoom = self.snap_zoom(zoom);
        self.change_view(center, zoom, animate.into(), self.options.animation_duration())
    }

    pub fn set_view(
        &mut self,
        center: GeoPoint,
        zoom: f64,
        animate: impl Into<AnimateOptions>,
    ) -> AnimationHandle {
        let zoom = self.snap_zoom(zoom);
        self.change_view(center, zoom, animate.into(), self.options.animation_duration())
    }

    /// Shifts the view by `(dx, dy)` container pixels
    pub fn pan_by(
        &mut self,
        dx: f64,
        dy: f64,
        animate: impl Into<AnimateOptions>,
    ) -> AnimationHandle {
        let center = self.transform.center_after_pan(dx, dy);
        let zoom = self.transform.zoom();
        self.change_view(center, zoom, animate.into(), self.options.pan_duration())
    }

    /// Zooms in by `delta` (default `zoom_delta`) around the view center
    pub fn zoom_in(
        &mut self,
        delta: Option<f64>,
        animate: impl Into<AnimateOptions>,
    ) -> AnimationHandle {
        let delta = delta.unwrap_or(self.options.zoom_delta);
        self.set_zoom(self.transform.zoom() + delta, animate)
    }

    pub fn zoom_out(
        &mut self,
        delta: Option<f64>,
        animate: impl Into<AnimateOptions>,
    ) -> AnimationHandle {
        let delta = delta.unwrap_or(self.options.zoom_delta);
        self.set_zoom(self.transform.zoom() - delta, animate)
    }

    /// Changes zoom by `delta`, keeping the geographic point under `anchor`
    /// (container pixels) fixed on screen
    pub fn zoom_around(
        &mut self,
        delta: f64,
        anchor: Point,
        animate: impl Into<AnimateOptions>,
    ) -> AnimationHandle {
        self.set_zoom_around(self.transform.zoom() + delta, anchor, animate)
    }

    /// Absolute-zoom form of [`Viewport::zoom_around`]
    pub fn set_zoom_around(
        &mut self,
        zoom: f64,
        anchor: Point,
        animate: impl Into<AnimateOptions>,
    ) -> AnimationHandle {
        if !zoom.is_finite() {
            return AnimationHandle::completed();
        }
        let zoom = self.transform.clamp_zoom(self.snap_zoom(zoom));
        let center = self.transform.center_for_zoom_around(zoom, anchor);
        self.change_view(center, zoom, animate.into(), self.options.animation_duration())
    }

    /// Immediate, unsnapped zoom around `anchor`, for continuous gestures
    pub fn set_zoom_free(&mut self, zoom: f64, anchor: Point) {
        if !zoom.is_finite() {
            return;
        }
        self.stop_animation();
        let zoom = self.transform.clamp_zoom(zoom);
        let center = self.transform.center_for_zoom_around(zoom, anchor);
        self.apply_view(center, zoom);
    }

    /// Zoom level at which `bounds` fits the viewport with `padding` pixels
    /// on every side
    pub fn get_bounds_zoom(&self, bounds: &GeoBounds, padding: f64) -> f64 {
        let nw = self.transform.latlng_to_world(&bounds.north_west());
        let se = self.transform.latlng_to_world(&bounds.south_east());
        let span = se.subtract(&nw);

        let available = Point::new(
            (self.transform.width() - 2.0 * padding).max(1.0),
            (self.transform.height() - 2.0 * padding).max(1.0),
        );
        let fit = |available: f64, span: f64| {
            let span = span.abs();
            if span > 0.0 {
                self.transform.zoom() + (available / span).log2()
            } else {
                f64::INFINITY
            }
        };
        let zoom = fit(available.x, span.x).min(fit(available.y, span.y));

        // Snap down so the bounds still fit
        self.transform.clamp_zoom(self.floor_snap_zoom(zoom))
    }

    /// Largest multiple of `zoom_snap` not above `zoom`
    fn floor_snap_zoom(&self, zoom: f64) -> f64 {
        let snap = self.options.zoom_snap;
        if snap > 0.0 && zoom.is_finite() {
            ((zoom / snap) + ZOOM_EPSILON).floor() * snap
        } else {
            zoom
        }
    }

    /// Centers on `bounds` at the largest zoom that shows all of it
    pub fn fit_bounds(&mut self, bounds: &GeoBounds, options: FitBoundsOptions) -> AnimationHandle {
        let mut zoom = self.get_bounds_zoom(bounds, options.padding);
        if let Some(max_zoom) = options.max_zoom {
            // A snapped cap, so the later snap in set_view cannot round past it
            zoom = zoom.min(self.floor_snap_zoom(max_zoom));
        }
        self.set_view(bounds.center(), zoom, options.animate)
    }

    /// Animated transition that zooms out mid-flight when the jump is longer
    /// than the viewport diagonal
    pub fn fly_to(
        &mut self,
        center: GeoPoint,
        zoom: Option<f64>,
        animate: impl Into<AnimateOptions>,
    ) -> AnimationHandle {
        let mut animate = animate.into();
        animate.animate = true;
        let easing = animate.easing.unwrap_or(self.options.fly_easing);
        let duration = animate.duration.unwrap_or(self.options.fly_duration());

        self.stop_animation();
        let target_zoom = self
            .transform
            .clamp_zoom(self.snap_zoom(zoom.unwrap_or(self.transform.zoom())));
        let target_center = self.constrain_center(center);

        let from_zoom = self.transform.zoom();
        let low_zoom = from_zoom.min(target_zoom);
        let from = self.transform.latlng_to_world_at(&self.transform.center(), low_zoom);
        let to = self.transform.latlng_to_world_at(&target_center, low_zoom);
        let diagonal = self.transform.width().hypot(self.transform.height());
        let distance = from.distance_to(&to);
        let arc = if diagonal > 0.0 && distance > diagonal {
            (distance / diagonal)
                .log2()
                .min(low_zoom - self.transform.min_zoom())
                .max(0.0)
        } else {
            0.0
        };

        self.start_animation(target_center, target_zoom, duration, easing, arc)
    }

    /// Cancels the running animation, leaving the view where it is.
    /// Safe to call at any time.
    pub fn stop_animation(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            drop(animation.frame.take());
            animation.completion.resolve(AnimationOutcome::Cancelled);

            #[cfg(feature = "debug")]
            log::debug!(
                "animation cancelled at center ({:.6}, {:.6}) zoom {:.3}",
                self.transform.center().lat,
                self.transform.center().lng,
                self.transform.zoom()
            );

            self.events.emit(ViewEvent::AnimationEnd { cancelled: true });
        }
    }

    /// Advances the running animation to the clock's current time. Hosts
    /// call this when a requested frame fires. Returns whether another
    /// frame is needed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        let (center, zoom, finished) = match &self.animation {
            Some(animation) => {
                let t = animation.progress(now);
                let (center, zoom) = animation.sample(t);
                (center, zoom, t >= 1.0)
            }
            None => return false,
        };

        #[cfg(feature = "debug")]
        log::trace!("animation frame zoom {:.4}", zoom);

        let old_zoom = self.transform.zoom();
        self.transform.set_view(center, zoom);
        self.emit_frame(old_zoom);

        if finished {
            if let Some(mut animation) = self.animation.take() {
                drop(animation.frame.take());
                animation.completion.resolve(AnimationOutcome::Completed);
            }

            #[cfg(feature = "debug")]
            log::debug!("animation completed at zoom {:.3}", self.transform.zoom());

            self.events.emit(ViewEvent::AnimationEnd { cancelled: false });
            false
        } else {
            let request = self.clock.request_frame();
            if let Some(animation) = self.animation.as_mut() {
                animation.frame = Some(request);
            }
            true
        }
    }

    // --- Internals ---

    /// Rounds to the nearest multiple of `zoom_snap` (no-op when 0)
    pub fn snap_zoom(&self, zoom: f64) -> f64 {
        let snap = self.options.zoom_snap;
        if snap > 0.0 && zoom.is_finite() {
            (zoom / snap).round() * snap
        } else {
            zoom
        }
    }

    /// Pulls a center outside `max_bounds` back toward the boundary:
    /// `boundary + (center - boundary) * (1 - viscosity)` per axis
    pub fn constrain_center(&self, center: GeoPoint) -> GeoPoint {
        let viscosity = self.options.max_bounds_viscosity;
        let bounds = match &self.options.max_bounds {
            Some(bounds) if bounds.is_valid() && viscosity > 0.0 => bounds,
            _ => return center,
        };
        if bounds.contains(&center) {
            return center;
        }

        let viscous_limit = |value: f64, min: f64, max: f64| {
            let boundary = clamp(value, min, max);
            boundary + (value - boundary) * (1.0 - viscosity)
        };
        GeoPoint::normalized(
            viscous_limit(center.lat, bounds.south(), bounds.north()),
            viscous_limit(center.lng, bounds.west(), bounds.east()),
            center.alt,
        )
    }

    /// Immediate or animated change to an already snapped zoom
    fn change_view(
        &mut self,
        center: GeoPoint,
        zoom: f64,
        animate: AnimateOptions,
        default_duration: Duration,
    ) -> AnimationHandle {
        if !animate.animate {
            self.stop_animation();
            self.apply_view(center, zoom);
            return AnimationHandle::completed();
        }

        self.stop_animation();
        let duration = animate.duration.unwrap_or(default_duration);
        let easing = animate.easing.unwrap_or(self.options.easing);
        let zoom = self.transform.clamp_zoom(zoom);
        let center = self.constrain_center(center);
        self.start_animation(center, zoom, duration, easing, 0.0)
    }

    fn apply_view(&mut self, center: GeoPoint, zoom: f64) {
        let (old_center, old_zoom) = (self.transform.center(), self.transform.zoom());
        let center = self.constrain_center(center);
        self.transform.set_view(center, zoom);
        self.emit_change(old_center, old_zoom);
    }

    /// Caller has already stopped any previous animation
    fn start_animation(
        &mut self,
        target_center: GeoPoint,
        target_zoom: f64,
        duration: Duration,
        easing: EasingType,
        arc: f64,
    ) -> AnimationHandle {
        let start_center = self.transform.center();
        let start_zoom = self.transform.zoom();

        if duration.is_zero() {
            self.apply_view(target_center, target_zoom);
            return AnimationHandle::completed();
        }
        if start_center.equals(&target_center, CENTER_EPSILON)
            && (start_zoom - target_zoom).abs() < ZOOM_EPSILON
        {
            return AnimationHandle::completed();
        }

        #[cfg(feature = "debug")]
        log::debug!(
            "animation start: zoom {:.3} -> {:.3} over {:?}",
            start_zoom,
            target_zoom,
            duration
        );

        let (completion, handle) = AnimationHandle::channel();
        let frame = self.clock.request_frame();
        self.animation = Some(ActiveAnimation {
            start_center,
            start_zoom,
            target_center,
            target_zoom,
            start_time: self.clock.now(),
            duration,
            easing,
            arc,
            completion,
            frame: Some(frame),
        });
        self.events.emit(ViewEvent::AnimationStart);
        handle
    }

    /// Zoom (if changed) then move, for a discrete change
    fn emit_change(&mut self, old_center: GeoPoint, old_zoom: f64) {
        let zoom_changed = (self.transform.zoom() - old_zoom).abs() > ZOOM_EPSILON;
        let center_changed = !self.transform.center().equals(&old_center, CENTER_EPSILON);
        if zoom_changed {
            self.emit_zoom();
        }
        if zoom_changed || center_changed {
            self.emit_move();
        }
    }

    /// Every animation frame produces a move
    fn emit_frame(&mut self, old_zoom: f64) {
        if (self.transform.zoom() - old_zoom).abs() > ZOOM_EPSILON {
            self.emit_zoom();
        }
        self.emit_move();
    }

    fn emit_zoom(&mut self) {
        self.events.emit(ViewEvent::Zoom {
            zoom: self.transform.zoom(),
            center: self.transform.center(),
            bounds: self.transform.get_bounds(),
        });
    }

    fn emit_move(&mut self) {
        self.events.emit(ViewEvent::Move {
            center: self.transform.center(),
            bounds: self.transform.get_bounds(),
        });
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(GeoPoint::default(), 0.0, 800.0, 600.0)
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("transform", &self.transform)
            .field("options", &self.options)
            .field("animation", &self.animation)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
