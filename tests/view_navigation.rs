use futures::executor::block_on;
use maplet_view::prelude::*;
use std::sync::{Arc, Mutex};

/// End-to-end scenarios driving the viewport the way a host does: input
/// primitives in, frames ticked from a manual clock, events observed out
#[cfg(test)]
mod view_navigation_tests {
    use super::*;

    fn geo(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    fn host(options: MapOptions) -> (Viewport, InputEngine, ManualFrameClock) {
        let clock = ManualFrameClock::new();
        let viewport = Viewport::with_options(
            geo(51.505, -0.09),
            13.0,
            1024.0,
            768.0,
            options.view,
            clock.clone(),
        )
        .unwrap();
        (viewport, InputEngine::with_options(options.input), clock)
    }

    /// Fires requested frames every `frame_ms` until the viewport stops asking
    fn run_frames(viewport: &mut Viewport, clock: &ManualFrameClock, frame_ms: u64) -> usize {
        let mut frames = 0;
        while !clock.take_frames().is_empty() {
            clock.advance_ms(frame_ms);
            viewport.tick();
            frames += 1;
            assert!(frames < 10_000, "animation never finished");
        }
        frames
    }

    /// A fly-to runs to completion through host frames and resolves its handle
    #[test]
    fn test_fly_to_through_host_loop() {
        let (mut viewport, _, clock) = host(MapOptions::default());
        let events = viewport.subscribe();

        let handle = viewport.fly_to(geo(48.8566, 2.3522), Some(12.0), AnimateOptions::animated());
        let frames = run_frames(&mut viewport, &clock, 16);

        assert_eq!(frames, 63);
        assert!(!viewport.is_animating());
        assert!(block_on(handle).is_ok());
        assert!(viewport.get_center().equals(&geo(48.8566, 2.3522), 1e-9));
        assert_eq!(viewport.get_zoom(), 12.0);

        let received: Vec<ViewEvent> = events.try_iter().collect();
        assert_eq!(received.first(), Some(&ViewEvent::AnimationStart));
        assert_eq!(
            received.last(),
            Some(&ViewEvent::AnimationEnd { cancelled: false })
        );
        let moves = received
            .iter()
            .filter(|event| matches!(event, ViewEvent::Move { .. }))
            .count();
        assert_eq!(moves, frames);
    }

    /// Drag, release into a fling, then catch the fling with a new press
    #[test]
    fn test_drag_fling_and_catch() {
        let (mut viewport, mut input, clock) = host(MapOptions::default());
        let start = viewport.get_center();

        input.handle_event(
            &mut viewport,
            InputEvent::PointerDown {
                position: Point::new(500.0, 400.0),
            },
        );
        for step in 1..=5 {
            clock.advance_ms(20);
            input.handle_event(
                &mut viewport,
                InputEvent::PointerMove {
                    position: Point::new(500.0 - 30.0 * step as f64, 400.0),
                },
            );
        }
        input.handle_event(
            &mut viewport,
            InputEvent::PointerUp {
                position: Point::new(350.0, 400.0),
            },
        );

        // Dragging left moves the view east
        assert!(viewport.get_center().lng > start.lng);
        assert!(viewport.is_animating());

        clock.advance_ms(50);
        viewport.tick();
        let mid_fling = viewport.get_center();

        input.handle_event(
            &mut viewport,
            InputEvent::PointerDown {
                position: Point::new(10.0, 10.0),
            },
        );
        assert!(!viewport.is_animating());
        assert_eq!(viewport.get_center(), mid_fling);
        assert!(clock.pending_frames().is_empty());
    }

    /// Wheel input is debounced into one anchor-preserving zoom
    #[test]
    fn test_wheel_zoom_keeps_cursor_point() {
        let options = MapOptions::from_json(r#"{"input": {"animate_zoom": false}}"#).unwrap();
        let (mut viewport, mut input, clock) = host(options);
        let cursor = Point::new(900.0, 100.0);
        let under_cursor = viewport.transform().pixel_to_latlng(&cursor);

        for _ in 0..4 {
            input.handle_event(&mut viewport, InputEvent::Wheel { delta: 30.0, position: cursor });
            clock.advance_ms(10);
        }
        assert_eq!(viewport.get_zoom(), 13.0);

        let deadline = input.next_deadline().unwrap();
        clock.advance(deadline - viewport.now());
        assert!(input.poll(&mut viewport));

        assert_eq!(viewport.get_zoom(), 15.0);
        let pixel = viewport.transform().latlng_to_pixel(&under_cursor);
        assert!(pixel.distance_to(&cursor) < 0.01);
    }

    /// Fit a box, then pan against hard max bounds
    #[test]
    fn test_fit_bounds_then_pan_into_max_bounds() {
        let options = MapOptions::from_json(
            r#"{"view": {
                "max_bounds": {"south_west": {"lat": 51.28, "lng": -0.51},
                               "north_east": {"lat": 51.69, "lng": 0.33}},
                "max_bounds_viscosity": 1.0
            }}"#,
        )
        .unwrap();
        let (mut viewport, _, _) = host(options);
        let london = GeoBounds::from_coords(51.45, -0.2, 51.55, 0.0).unwrap();

        viewport.fit_bounds(
            &london,
            FitBoundsOptions {
                padding: 20.0,
                ..FitBoundsOptions::default()
            },
        );
        let zoom = viewport.get_zoom();
        assert_eq!(zoom, zoom.round());
        let shown = viewport.get_bounds();
        assert!(shown.contains_bounds(&london));

        viewport.pan_by(1.0e4, 0.0, false);
        assert!((viewport.get_center().lng - 0.33).abs() < 1e-9);
    }

    /// Every listener sees the cancellation before the replacement starts
    #[test]
    fn test_supersede_ordering_with_listeners() {
        let (mut viewport, _, clock) = host(MapOptions::default());
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        viewport.on(move |event| {
            if !matches!(event, ViewEvent::Move { .. } | ViewEvent::Zoom { .. }) {
                sink.lock().unwrap().push(event.clone());
            }
        });

        let first = viewport.set_view(geo(40.0, -74.0), 10.0, true);
        clock.advance_ms(100);
        viewport.tick();
        let second = viewport.zoom_in(None, true);
        run_frames(&mut viewport, &clock, 16);

        assert!(matches!(block_on(first), Err(MapError::AnimationCancelled)));
        assert!(block_on(second).is_ok());
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                ViewEvent::AnimationStart,
                ViewEvent::AnimationEnd { cancelled: true },
                ViewEvent::AnimationStart,
                ViewEvent::AnimationEnd { cancelled: false },
            ]
        );
    }

    /// Anchor-preserving zoom over a grid of anchors and deltas
    #[test]
    fn test_zoom_around_anchor_grid() {
        let options = ViewOptions {
            zoom_snap: 0.0,
            ..ViewOptions::default()
        };
        let clock = ManualFrameClock::new();
        let mut viewport =
            Viewport::with_options(geo(35.0, 139.0), 8.0, 640.0, 480.0, options, clock).unwrap();

        for &delta in &[-2.5, -0.3, 0.7, 1.0, 3.25] {
            for ix in 0..=4 {
                for iy in 0..=4 {
                    let anchor = Point::new(160.0 * ix as f64, 120.0 * iy as f64);
                    let under = viewport.transform().pixel_to_latlng(&anchor);

                    viewport.zoom_around(delta, anchor, false);
                    let pixel = viewport.transform().latlng_to_pixel(&under);
                    assert!(
                        pixel.distance_to(&anchor) < 0.01,
                        "anchor {anchor:?} drifted to {pixel:?} for delta {delta}"
                    );
                    viewport.zoom_around(-delta, anchor, false);
                }
            }
        }
    }

    /// Projection round trip away from the poles
    #[test]
    fn test_projection_round_trip() {
        let mercator = SphericalMercator;
        for lat in (-85..=85).step_by(5) {
            for lng in (-180..180).step_by(15) {
                let point = geo(lat as f64, lng as f64);
                let back = mercator.unproject(&mercator.project(&point));
                assert!(back.equals(&point, 1e-9), "{point:?} -> {back:?}");
            }
        }
    }

    /// Construction always normalizes into the valid range
    #[test]
    fn test_geo_point_normalization_range() {
        let mut value = -1000.0;
        while value <= 1000.0 {
            let point = geo(value, value * 1.7);
            assert!((-90.0..=90.0).contains(&point.lat));
            assert!((-180.0..180.0).contains(&point.lng));
            value += 13.37;
        }
    }

    /// Visible tiles cover the viewport with one tile of margin
    #[test]
    fn test_visible_tiles_cover_viewport() {
        let (viewport, _, _) = host(MapOptions::default());
        let transform = viewport.transform();
        let tiles = transform.visible_tiles();

        // 1024x768 at an integral zoom spans 4-5 x 3-4 tiles, plus margins
        assert!(tiles.len() >= 30 && tiles.len() <= 42, "{} tiles", tiles.len());
        assert!(tiles.iter().all(|tile| tile.z == 13 && tile.is_valid()));

        let center_tile = SphericalMercator::tile_index(&viewport.get_center(), 13);
        assert_eq!(tiles[0], center_tile);
    }
}
