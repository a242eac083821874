use crate::{
    animation::EasingType,
    core::{
        config::InputOptions,
        constants::KEYBOARD_SHIFT_ZOOM_FACTOR,
        geo::Point,
        viewport::{AnimateOptions, Viewport},
    },
    input::{
        events::{EventHandled, InputEvent, KeyCode, KeyModifiers, TouchPoint},
        inertia::{DragSamples, InertiaConfig},
    },
    prelude::{Duration, HashMap, Instant},
};

/// Which continuous gesture owns the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging,
    Pinching,
}

#[derive(Debug, Clone, Copy)]
struct PinchStart {
    distance: f64,
    zoom: f64,
    /// Midpoint seen on the latest move, used to snap on release
    center: Point,
}

#[derive(Debug, Clone, Copy, Default)]
struct WheelAccumulator {
    delta: f64,
    position: Point,
    last_event: Option<Instant>,
}

/// Turns raw pointer, touch, wheel and keyboard primitives into viewport
/// operations (like Leaflet's drag, scroll-wheel, tap, touch-zoom and
/// keyboard handlers combined)
#[derive(Debug)]
pub struct InputEngine {
    options: InputOptions,
    inertia: InertiaConfig,
    enabled: bool,
    gesture: GestureState,

    // Drag
    press_position: Option<Point>,
    moved: bool,
    samples: DragSamples,

    // Touch
    touches: HashMap<u64, Point>,
    pinch: Option<PinchStart>,

    last_tap: Option<(Point, Instant)>,
    wheel: WheelAccumulator,
}

impl InputEngine {
    pub fn new() -> Self {
        Self::with_options(InputOptions::default())
    }

    pub fn with_options(options: InputOptions) -> Self {
        let options = options.sanitized();
        let inertia = InertiaConfig::from(&options);
        Self {
            samples: DragSamples::new(inertia.window),
            options,
            inertia,
            enabled: true,
            gesture: GestureState::Idle,
            press_position: None,
            moved: false,
            touches: HashMap::default(),
            pinch: None,
            last_tap: None,
            wheel: WheelAccumulator::default(),
        }
    }

    pub fn options(&self) -> &InputOptions {
        &self.options
    }

    /// Replaces the options; transient gesture state is dropped
    pub fn set_options(&mut self, options: InputOptions) {
        let enabled = self.enabled;
        *self = Self::with_options(options);
        self.enabled = enabled;
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling drops every in-progress gesture and pending wheel commit
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.reset();
        }
        self.enabled = enabled;
    }

    /// Clears all transient state
    pub fn reset(&mut self) {
        self.gesture = GestureState::Idle;
        self.press_position = None;
        self.moved = false;
        self.samples.clear();
        self.touches.clear();
        self.pinch = None;
        self.last_tap = None;
        self.wheel = WheelAccumulator::default();
    }

    /// When the host should call [`InputEngine::poll`] next, if anything is pending
    pub fn next_deadline(&self) -> Option<Instant> {
        self.wheel
            .last_event
            .map(|last| last + Duration::from_millis(self.options.wheel_debounce_ms))
    }

    /// Commits work whose quiet period has elapsed. Returns whether the
    /// viewport was changed.
    pub fn poll(&mut self, viewport: &mut Viewport) -> bool {
        match self.next_deadline() {
            Some(deadline) if viewport.now() >= deadline => self.commit_wheel(viewport),
            _ => false,
        }
    }

    /// Handle one input primitive
    pub fn handle_event(&mut self, viewport: &mut Viewport, event: InputEvent) -> EventHandled {
        if !self.enabled {
            return EventHandled::NotHandled;
        }
        let now = viewport.now();

        match event {
            InputEvent::PointerDown { position } => self.pointer_down(viewport, position, now),
            InputEvent::PointerMove { position } => self.pointer_move(viewport, position, now),
            InputEvent::PointerUp { position } => self.pointer_up(viewport, position, now),
            InputEvent::Wheel { delta, position } => {
                if !self.options.scroll_wheel_zoom || !delta.is_finite() || delta == 0.0 {
                    return EventHandled::NotHandled;
                }
                self.wheel.delta += delta;
                self.wheel.position = position;
                self.wheel.last_event = Some(now);
                EventHandled::Handled
            }
            InputEvent::TouchStart { touches } => self.touch_start(viewport, &touches, now),
            InputEvent::TouchMove { touches } => self.touch_move(viewport, &touches, now),
            InputEvent::TouchEnd { touches } => self.touch_end(viewport, &touches, now),
            InputEvent::KeyDown { key, modifiers } => self.key_down(viewport, key, modifiers),
            InputEvent::DoubleClick { position } => {
                if !self.options.double_click_zoom {
                    return EventHandled::NotHandled;
                }
                viewport.zoom_around(1.0, position, self.options.animate_zoom);
                EventHandled::Handled
            }
        }
    }

    fn pointer_down(
        &mut self,
        viewport: &mut Viewport,
        position: Point,
        now: Instant,
    ) -> EventHandled {
        // Catch a running fling or zoom
        viewport.stop_animation();

        self.press_position = Some(position);
        self.moved = false;
        self.samples.clear();
        self.samples.push(position, now);
        if self.options.dragging {
            self.gesture = GestureState::Dragging;
        }
        EventHandled::Handled
    }

    fn pointer_move(
        &mut self,
        viewport: &mut Viewport,
        position: Point,
        now: Instant,
    ) -> EventHandled {
        if self.gesture != GestureState::Dragging {
            return EventHandled::NotHandled;
        }

        if let Some(press) = self.press_position {
            if position.distance_to(&press) > self.options.tap_tolerance {
                self.moved = true;
            }
        }

        // Delta from the latest sample, not the press point
        if let Some(last) = self.samples.last() {
            let delta = position.subtract(&last);
            if delta.x != 0.0 || delta.y != 0.0 {
                viewport.pan_by(-delta.x, -delta.y, false);
            }
        }
        self.samples.push(position, now);
        EventHandled::Handled
    }

    fn pointer_up(
        &mut self,
        viewport: &mut Viewport,
        position: Point,
        now: Instant,
    ) -> EventHandled {
        let Some(press) = self.press_position.take() else {
            return EventHandled::NotHandled;
        };

        if self.gesture == GestureState::Dragging {
            if self.samples.last().is_some_and(|last| last != position) {
                self.pointer_move(viewport, position, now);
            }
            if position.distance_to(&press) > self.options.tap_tolerance {
                self.moved = true;
            }
            self.gesture = GestureState::Idle;

            if self.moved {
                self.launch_inertia(viewport, now);
            }
        }

        let is_tap = !self.moved && position.distance_to(&press) <= self.options.tap_tolerance;
        self.moved = false;
        self.samples.clear();
        if is_tap {
            self.register_tap(viewport, position, now);
        }
        EventHandled::Handled
    }

    fn launch_inertia(&mut self, viewport: &mut Viewport, now: Instant) {
        if !self.options.inertia {
            return;
        }
        if let Some(inertia) = self.samples.release(now, &self.inertia) {
            #[cfg(feature = "debug")]
            log::debug!(
                "inertia: {:.0} px/s, offset ({:.1}, {:.1}) over {:?}",
                inertia.speed,
                inertia.offset.x,
                inertia.offset.y,
                inertia.duration
            );

            viewport.pan_by(
                -inertia.offset.x,
                -inertia.offset.y,
                AnimateOptions::animated()
                    .with_duration(inertia.duration)
                    .with_easing(EasingType::EaseOut),
            );
        }
    }

    /// Second tap within the time window and tolerance zooms in
    fn register_tap(&mut self, viewport: &mut Viewport, position: Point, now: Instant) {
        if let Some((last_position, last_time)) = self.last_tap.take() {
            let within_time = now.saturating_duration_since(last_time)
                <= Duration::from_millis(self.options.double_tap_ms);
            let within_distance =
                position.distance_to(&last_position) <= self.options.double_tap_tolerance;

            if within_time && within_distance {
                if self.options.double_click_zoom {
                    viewport.zoom_around(1.0, position, self.options.animate_zoom);
                }
                return;
            }
        }
        self.last_tap = Some((position, now));
    }

    fn commit_wheel(&mut self, viewport: &mut Viewport) -> bool {
        let wheel = std::mem::take(&mut self.wheel);
        // Snapping happens in the viewport, on the resulting zoom
        let step = wheel.delta / self.options.wheel_px_per_zoom_level;
        if step == 0.0 || !step.is_finite() {
            return false;
        }

        #[cfg(feature = "debug")]
        log::debug!("wheel commit: {:+.3} zoom around {:?}", step, wheel.position);

        viewport.zoom_around(step, wheel.position, self.options.animate_zoom);
        true
    }

    fn touch_start(
        &mut self,
        viewport: &mut Viewport,
        touches: &[TouchPoint],
        now: Instant,
    ) -> EventHandled {
        for touch in touches {
            self.touches.insert(touch.id, touch.position);
        }

        if self.options.touch_zoom && self.touches.len() >= 2 {
            if self.gesture != GestureState::Pinching {
                self.start_pinch(viewport);
            }
            return EventHandled::Handled;
        }

        match (self.touches.len(), touches.first()) {
            (1, Some(touch)) => self.pointer_down(viewport, touch.position, now),
            _ => EventHandled::NotHandled,
        }
    }

    fn touch_move(
        &mut self,
        viewport: &mut Viewport,
        touches: &[TouchPoint],
        now: Instant,
    ) -> EventHandled {
        for touch in touches {
            if let Some(position) = self.touches.get_mut(&touch.id) {
                *position = touch.position;
            }
        }

        match self.gesture {
            GestureState::Pinching => {
                let (Some(pinch), Some((a, b))) = (self.pinch.as_mut(), pinch_pair(&self.touches))
                else {
                    return EventHandled::NotHandled;
                };
                let distance = a.distance_to(&b);
                let center = midpoint(a, b);
                pinch.center = center;
                if pinch.distance > 0.0 && distance > 0.0 {
                    let zoom = pinch.zoom + (distance / pinch.distance).log2();
                    viewport.set_zoom_free(zoom, center);
                }
                EventHandled::Handled
            }
            GestureState::Dragging if self.touches.len() == 1 => {
                match self.touches.values().next().copied() {
                    Some(position) => self.pointer_move(viewport, position, now),
                    None => EventHandled::NotHandled,
                }
            }
            _ => EventHandled::NotHandled,
        }
    }

    fn touch_end(
        &mut self,
        viewport: &mut Viewport,
        touches: &[TouchPoint],
        now: Instant,
    ) -> EventHandled {
        let mut lifted = None;
        for touch in touches {
            if let Some(position) = self.touches.remove(&touch.id) {
                lifted = Some(position);
            }
        }

        match self.gesture {
            GestureState::Pinching if self.touches.len() < 2 => {
                self.end_pinch(viewport);
                EventHandled::Handled
            }
            GestureState::Pinching => EventHandled::Handled,
            _ if self.touches.is_empty() => match lifted {
                Some(position) => self.pointer_up(viewport, position, now),
                None => EventHandled::NotHandled,
            },
            _ => EventHandled::NotHandled,
        }
    }

    fn start_pinch(&mut self, viewport: &mut Viewport) {
        let Some((a, b)) = pinch_pair(&self.touches) else {
            return;
        };
        viewport.stop_animation();

        // A pinch takes over from any drag and is never a tap
        self.samples.clear();
        self.press_position = None;
        self.moved = false;
        self.last_tap = None;

        self.gesture = GestureState::Pinching;
        self.pinch = Some(PinchStart {
            distance: a.distance_to(&b),
            zoom: viewport.get_zoom(),
            center: midpoint(a, b),
        });

        #[cfg(feature = "debug")]
        log::debug!("pinch start at zoom {:.3}", viewport.get_zoom());
    }

    fn end_pinch(&mut self, viewport: &mut Viewport) {
        self.gesture = GestureState::Idle;
        if let Some(pinch) = self.pinch.take() {
            #[cfg(feature = "debug")]
            log::debug!("pinch end at zoom {:.3}", viewport.get_zoom());

            // Settle onto a snapped zoom level
            viewport.set_zoom_around(viewport.get_zoom(), pinch.center, self.options.animate_zoom);
        }
    }

    fn key_down(
        &mut self,
        viewport: &mut Viewport,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> EventHandled {
        if !self.options.keyboard {
            return EventHandled::NotHandled;
        }
        let pan = self.options.keyboard_pan_delta;
        let animate_pan = self.options.animate_keyboard_pan;
        let zoom_step = viewport.options().zoom_delta
            * if modifiers.shift {
                KEYBOARD_SHIFT_ZOOM_FACTOR
            } else {
                1.0
            };

        match key {
            KeyCode::ArrowUp => viewport.pan_by(0.0, -pan, animate_pan),
            KeyCode::ArrowDown => viewport.pan_by(0.0, pan, animate_pan),
            KeyCode::ArrowLeft => viewport.pan_by(-pan, 0.0, animate_pan),
            KeyCode::ArrowRight => viewport.pan_by(pan, 0.0, animate_pan),
            KeyCode::Plus => viewport.zoom_in(Some(zoom_step), self.options.animate_zoom),
            KeyCode::Minus => viewport.zoom_out(Some(zoom_step), self.options.animate_zoom),
            KeyCode::Other(_) => return EventHandled::NotHandled,
        };
        EventHandled::Handled
    }
}

impl Default for InputEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The two lowest-id touches, so a third finger does not disturb the pinch
fn pinch_pair(touches: &HashMap<u64, Point>) -> Option<(Point, Point)> {
    let mut ids: Vec<u64> = touches.keys().copied().collect();
    ids.sort_unstable();
    match ids.as_slice() {
        [a, b, ..] => Some((*touches.get(a)?, *touches.get(b)?)),
        _ => None,
    }
}

fn midpoint(a: Point, b: Point) -> Point {
    a.add(&b).multiply(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ManualFrameClock;
    use crate::core::config::ViewOptions;
    use crate::core::geo::GeoPoint;

    fn setup() -> (InputEngine, Viewport, ManualFrameClock) {
        let clock = ManualFrameClock::new();
        let viewport = Viewport::with_options(
            GeoPoint::new(0.0, 0.0).unwrap(),
            10.0,
            800.0,
            600.0,
            ViewOptions::default(),
            clock.clone(),
        )
        .unwrap();
        let engine = InputEngine::with_options(InputOptions {
            animate_zoom: false,
            animate_keyboard_pan: false,
            ..InputOptions::default()
        });
        (engine, viewport, clock)
    }

    fn center_world(viewport: &Viewport) -> Point {
        viewport
            .transform()
            .latlng_to_world(&viewport.get_center())
    }

    fn pointer(
        engine: &mut InputEngine,
        viewport: &mut Viewport,
        event: fn(Point) -> InputEvent, x: f64, y: f64,
    ) {
        engine.handle_event(viewport, event(Point::new(x, y)));
    }

    fn down(position: Point) -> InputEvent {
        InputEvent::PointerDown { position }
    }

    fn moved(position: Point) -> InputEvent {
        InputEvent::PointerMove { position }
    }

    fn up(position: Point) -> InputEvent {
        InputEvent::PointerUp { position }
    }

    fn touch(id: u64, x: f64, y: f64) -> TouchPoint {
        TouchPoint::new(id, Point::new(x, y))
    }

    #[test]
    fn test_drag_pans_by_delta_from_last_sample() {
        let (mut engine, mut viewport, clock) = setup();
        let start = center_world(&viewport);

        pointer(&mut engine, &mut viewport, down, 100.0, 100.0);
        assert_eq!(engine.gesture(), GestureState::Dragging);
        clock.advance_ms(16);
        pointer(&mut engine, &mut viewport, moved, 130.0, 90.0);
        clock.advance_ms(16);
        pointer(&mut engine, &mut viewport, moved, 150.0, 90.0);

        let now = center_world(&viewport);
        assert!((now.x - (start.x - 50.0)).abs() < 1e-6);
        assert!((now.y - (start.y + 10.0)).abs() < 1e-6);
    }

    #[test]
    fn test_fast_release_launches_inertia() {
        let (mut engine, mut viewport, clock) = setup();

        pointer(&mut engine, &mut viewport, down, 100.0, 100.0);
        clock.advance_ms(50);
        pointer(&mut engine, &mut viewport, moved, 150.0, 100.0);
        clock.advance_ms(50);
        pointer(&mut engine, &mut viewport, moved, 200.0, 100.0);
        pointer(&mut engine, &mut viewport, up, 200.0, 100.0);

        assert_eq!(engine.gesture(), GestureState::Idle);
        assert!(viewport.is_animating());

        let before = center_world(&viewport);
        clock.advance_ms(1000);
        viewport.tick();
        let after = center_world(&viewport);
        // 1000 px/s -> t = 1/3 s, d = 1000 * t / 2
        assert!((before.x - after.x - 1000.0 / 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_slow_release_has_no_inertia() {
        let (mut engine, mut viewport, clock) = setup();
        pointer(&mut engine, &mut viewport, down, 100.0, 100.0);
        clock.advance_ms(100);
        pointer(&mut engine, &mut viewport, moved, 108.0, 100.0);
        pointer(&mut engine, &mut viewport, up, 108.0, 100.0);
        assert!(!viewport.is_animating());
    }

    #[test]
    fn test_pointer_down_catches_fling() {
        let (mut engine, mut viewport, clock) = setup();
        let mut fling = viewport.pan_by(300.0, 0.0, true);
        clock.advance_ms(10);
        pointer(&mut engine, &mut viewport, down, 10.0, 10.0);
        assert!(!viewport.is_animating());
        assert!(fling.is_cancelled());
    }

    #[test]
    fn test_double_tap_zooms_around_point() {
        let (mut engine, mut viewport, clock) = setup();
        let anchor = Point::new(603.0, 152.0);
        let under = viewport.transform().pixel_to_latlng(&anchor);

        pointer(&mut engine, &mut viewport, down, 600.0, 150.0);
        pointer(&mut engine, &mut viewport, up, 600.0, 150.0);
        clock.advance_ms(150);
        pointer(&mut engine, &mut viewport, down, 603.0, 152.0);
        pointer(&mut engine, &mut viewport, up, 603.0, 152.0);

        assert_eq!(viewport.get_zoom(), 11.0);
        let pixel = viewport.transform().latlng_to_pixel(&under);
        assert!(pixel.distance_to(&anchor) < 0.01);
    }

    #[test]
    fn test_slow_taps_are_not_a_double_tap() {
        let (mut engine, mut viewport, clock) = setup();
        pointer(&mut engine, &mut viewport, down, 10.0, 10.0);
        pointer(&mut engine, &mut viewport, up, 10.0, 10.0);
        clock.advance_ms(400);
        pointer(&mut engine, &mut viewport, down, 10.0, 10.0);
        pointer(&mut engine, &mut viewport, up, 10.0, 10.0);
        assert_eq!(viewport.get_zoom(), 10.0);
    }

    #[test]
    fn test_wheel_commits_after_quiet_period() {
        let (mut engine, mut viewport, clock) = setup();
        let position = Point::new(400.0, 300.0);

        engine.handle_event(&mut viewport, InputEvent::Wheel { delta: 30.0, position });
        clock.advance_ms(20);
        engine.handle_event(&mut viewport, InputEvent::Wheel { delta: 30.0, position });
        assert_eq!(engine.next_deadline(), Some(viewport.now() + Duration::from_millis(40)));

        clock.advance_ms(30);
        assert!(!engine.poll(&mut viewport));
        assert_eq!(viewport.get_zoom(), 10.0);

        clock.advance_ms(10);
        assert!(engine.poll(&mut viewport));
        assert_eq!(viewport.get_zoom(), 11.0);
        assert!(engine.next_deadline().is_none());
    }

    #[test]
    fn test_negative_wheel_zooms_out() {
        let (mut engine, mut viewport, clock) = setup();
        let wheel = |delta| InputEvent::Wheel {
            delta,
            position: Point::new(400.0, 300.0),
        };

        engine.handle_event(&mut viewport, wheel(-120.0));
        clock.advance_ms(40);
        engine.poll(&mut viewport);
        assert_eq!(viewport.get_zoom(), 8.0);

        // Less than half a level rounds back to the current zoom
        engine.handle_event(&mut viewport, wheel(-10.0));
        clock.advance_ms(40);
        engine.poll(&mut viewport);
        assert_eq!(viewport.get_zoom(), 8.0);
    }

    #[test]
    fn test_wheel_step_rounds_to_nearest_snap() {
        let (mut engine, mut viewport, clock) = setup();
        engine.handle_event(
            &mut viewport,
            InputEvent::Wheel {
                delta: 70.0,
                position: Point::new(400.0, 300.0),
            },
        );
        clock.advance_ms(40);
        assert!(engine.poll(&mut viewport));
        assert_eq!(viewport.get_zoom(), 11.0);
    }

    #[test]
    fn test_pinch_zoom_and_snap_on_release() {
        let (mut engine, mut viewport, _) = setup();

        engine.handle_event(
            &mut viewport,
            InputEvent::TouchStart {
                touches: vec![touch(1, 300.0, 300.0)],
            },
        );
        assert_eq!(engine.gesture(), GestureState::Dragging);
        engine.handle_event(
            &mut viewport,
            InputEvent::TouchStart {
                touches: vec![touch(2, 500.0, 300.0)],
            },
        );
        assert_eq!(engine.gesture(), GestureState::Pinching);

        // Distance 200 -> 300: log2(1.5) ≈ 0.585
        engine.handle_event(
            &mut viewport,
            InputEvent::TouchMove {
                touches: vec![touch(1, 250.0, 300.0), touch(2, 550.0, 300.0)],
            },
        );
        assert!((viewport.get_zoom() - (10.0 + 1.5_f64.log2())).abs() < 1e-9);

        engine.handle_event(
            &mut viewport,
            InputEvent::TouchEnd {
                touches: vec![touch(2, 550.0, 300.0)],
            },
        );
        assert_eq!(engine.gesture(), GestureState::Idle);
        assert_eq!(viewport.get_zoom(), 11.0);
    }

    #[test]
    fn test_keyboard() {
        let (mut engine, mut viewport, _) = setup();
        let start = center_world(&viewport);

        let key = |key| InputEvent::KeyDown {
            key,
            modifiers: KeyModifiers::default(),
        };
        engine.handle_event(&mut viewport, key(KeyCode::ArrowRight));
        assert!((center_world(&viewport).x - start.x - 80.0).abs() < 1e-6);

        engine.handle_event(&mut viewport, key(KeyCode::Plus));
        assert_eq!(viewport.get_zoom(), 11.0);
        engine.handle_event(
            &mut viewport,
            InputEvent::KeyDown {
                key: KeyCode::Minus,
                modifiers: KeyModifiers {
                    shift: true,
                    ..KeyModifiers::default()
                },
            },
        );
        assert_eq!(viewport.get_zoom(), 8.0);
        assert_eq!(
            engine.handle_event(&mut viewport, key(KeyCode::Other(13))),
            EventHandled::NotHandled
        );
    }

    #[test]
    fn test_disable_clears_gesture_state() {
        let (mut engine, mut viewport, _) = setup();
        pointer(&mut engine, &mut viewport, down, 100.0, 100.0);
        engine.handle_event(
            &mut viewport,
            InputEvent::Wheel {
                delta: 60.0,
                position: Point::new(0.0, 0.0),
            },
        );

        engine.set_enabled(false);
        assert_eq!(engine.gesture(), GestureState::Idle);
        assert!(engine.next_deadline().is_none());
        assert_eq!(
            engine.handle_event(&mut viewport, moved(Point::new(200.0, 100.0))),
            EventHandled::NotHandled
        );

        // Re-enabled: a stray move does not resume the old drag
        engine.set_enabled(true);
        let before = viewport.get_center();
        engine.handle_event(&mut viewport, moved(Point::new(300.0, 100.0)));
        assert_eq!(viewport.get_center(), before);
    }

    #[test]
    fn test_disabled_gestures_are_ignored() {
        let clock = ManualFrameClock::new();
        let mut viewport = Viewport::with_options(
            GeoPoint::new(0.0, 0.0).unwrap(),
            5.0,
            400.0,
            400.0,
            ViewOptions::default(),
            clock,
        )
        .unwrap();
        let mut engine = InputEngine::with_options(InputOptions {
            scroll_wheel_zoom: false,
            keyboard: false,
            ..InputOptions::default()
        });

        let wheel = InputEvent::Wheel {
            delta: 60.0,
            position: Point::new(0.0, 0.0),
        };
        assert_eq!(engine.handle_event(&mut viewport, wheel), EventHandled::NotHandled);
        let key = InputEvent::KeyDown {
            key: KeyCode::Plus,
            modifiers: KeyModifiers::default(),
        };
        assert_eq!(engine.handle_event(&mut viewport, key), EventHandled::NotHandled);
        assert_eq!(viewport.get_zoom(), 5.0);
    }
}
