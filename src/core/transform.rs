//! Pure mapping between geographic, world-pixel and container-pixel space
//! for one center / zoom / viewport size.
//!
//! *World pixels* are measured from the top-left of the whole projected world
//! at the current zoom. *Container pixels* are measured from the top-left of
//! the viewport.

use crate::core::bounds::{corner, Bounds, GeoBounds};
use crate::core::constants::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, TILE_SIZE};
use crate::core::geo::{clamp, GeoPoint, Point};
use crate::core::projection::{SphericalMercator, TileCoord, MAX_LATITUDE};

/// Camera state plus the values derived from it.
///
/// Every mutator ends with [`Transform::recompute`], so the derived fields
/// never lag behind the state that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    center: GeoPoint,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    width: f64,
    height: f64,
    tile_size: f64,
    projection: SphericalMercator,

    // Derived
    scale: f64,
    world_size: f64,
    center_world: Point,
    origin: Point,
}

impl Transform {
    pub fn new(center: GeoPoint, zoom: f64, width: f64, height: f64) -> Self {
        let mut transform = Self {
            center,
            zoom,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            width: width.max(0.0),
            height: height.max(0.0),
            tile_size: TILE_SIZE as f64,
            projection: SphericalMercator,
            scale: 1.0,
            world_size: TILE_SIZE as f64,
            center_world: Point::default(),
            origin: Point::default(),
        };
        transform.recompute();
        transform
    }

    /// Builder-style tile size override
    pub fn with_tile_size(mut self, tile_size: f64) -> Self {
        self.set_tile_size(tile_size);
        self
    }

    /// Brings every derived field in line with the current state
    fn recompute(&mut self) {
        self.zoom = clamp(self.zoom, self.min_zoom, self.max_zoom);
        self.center = GeoPoint::normalized(
            clamp(self.center.lat, -MAX_LATITUDE, MAX_LATITUDE),
            self.center.lng,
            self.center.alt,
        );
        self.scale = 2_f64.powf(self.zoom);
        self.world_size = self.scale * self.tile_size;
        self.center_world =
            self.projection.latlng_to_world(&self.center, self.zoom, self.tile_size);
        self.origin = self.center_world.subtract(&self.half_size());
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Viewport size in pixels
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    fn half_size(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// `2^zoom`
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Edge length of the world in pixels at the current zoom
    pub fn world_size(&self) -> f64 {
        self.world_size
    }

    pub fn center_world_pixel(&self) -> Point {
        self.center_world
    }

    /// World pixel of the viewport's top-left corner
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn set_center(&mut self, center: GeoPoint) {
        self.center = center;
        self.recompute();
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom;
        }
        self.recompute();
    }

    pub fn set_view(&mut self, center: GeoPoint, zoom: f64) {
        self.center = center;
        if zoom.is_finite() {
            self.zoom = zoom;
        }
        self.recompute();
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.recompute();
    }

    /// Sets the zoom limits; the current zoom is clamped into the new range
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom.min(max_zoom);
        self.max_zoom = max_zoom.max(min_zoom);
        self.recompute();
    }

    pub fn set_tile_size(&mut self, tile_size: f64) {
        if tile_size > 0.0 {
            self.tile_size = tile_size;
        }
        self.recompute();
    }

    /// Clamps a zoom into this transform's limits
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        clamp(zoom, self.min_zoom, self.max_zoom)
    }

    /// Scale factor between the current zoom and `to_zoom`
    pub fn zoom_scale(&self, to_zoom: f64) -> f64 {
        2_f64.powf(to_zoom - self.zoom)
    }

    /// Zoom reached by scaling the current view by `scale`
    pub fn scale_zoom(&self, scale: f64) -> f64 {
        self.zoom + scale.log2()
    }

    /// Geographic coordinate to world pixels at the current zoom
    pub fn latlng_to_world(&self, point: &GeoPoint) -> Point {
        self.projection.latlng_to_world(point, self.zoom, self.tile_size)
    }

    /// Geographic coordinate to world pixels at an arbitrary zoom
    pub fn latlng_to_world_at(&self, point: &GeoPoint, zoom: f64) -> Point {
        self.projection.latlng_to_world(point, zoom, self.tile_size)
    }

    /// World pixels at the current zoom to a geographic coordinate
    pub fn world_to_latlng(&self, world: &Point) -> GeoPoint {
        self.projection.world_to_latlng(world, self.zoom, self.tile_size)
    }

    /// World pixels to container pixels
    pub fn world_to_pixel(&self, world: &Point) -> Point {
        world.subtract(&self.origin)
    }

    /// Container pixels to world pixels
    pub fn pixel_to_world(&self, pixel: &Point) -> Point {
        pixel.add(&self.origin)
    }

    /// Converts a geographical coordinate to container pixel coordinates
    pub fn latlng_to_pixel(&self, point: &GeoPoint) -> Point {
        self.world_to_pixel(&self.latlng_to_world(point))
    }

    /// Converts container pixel coordinates back to geographical coordinates
    pub fn pixel_to_latlng(&self, pixel: &Point) -> GeoPoint {
        self.world_to_latlng(&self.pixel_to_world(pixel))
    }

    /// World-pixel rectangle covered by the viewport
    pub fn pixel_bounds(&self) -> Bounds {
        Bounds::new(self.origin, self.origin.add(&self.size()))
    }

    /// Geographic bounds of the viewport corners.
    ///
    /// Longitudes are taken before wrapping and clamped to the world, so a
    /// viewport wider than the world (or straddling the antimeridian) still
    /// yields a non-inverted box.
    pub fn get_bounds(&self) -> GeoBounds {
        let nw = self.pixel_to_latlng(&Point::new(0.0, 0.0));
        let se = self.pixel_to_latlng(&self.size());
        let unwrapped_lng = |world_x: f64| world_x / self.world_size * 360.0 - 180.0;
        let west = unwrapped_lng(self.origin.x);
        let east = unwrapped_lng(self.origin.x + self.width);

        GeoBounds::new(corner(se.lat, west), corner(nw.lat, east))
    }

    /// Tiles at `floor(zoom)` covering the viewport plus one tile of margin,
    /// nearest to the viewport center first
    pub fn visible_tiles(&self) -> Vec<TileCoord> {
        let tile_zoom = self.zoom.floor().max(0.0).min(u8::MAX as f64);
        let z = tile_zoom as u8;
        let n = 2_f64.powi(z as i32);
        let max_index = n - 1.0;

        let bounds = self.pixel_bounds().scaled(self.zoom_scale(tile_zoom));
        let tile_index = |v: f64| (v / self.tile_size).floor();

        let min_x = clamp(tile_index(bounds.min.x) - 1.0, 0.0, max_index) as u32;
        let max_x = clamp(tile_index(bounds.max.x) + 1.0, 0.0, max_index) as u32;
        let min_y = clamp(tile_index(bounds.min.y) - 1.0, 0.0, max_index) as u32;
        let max_y = clamp(tile_index(bounds.max.y) + 1.0, 0.0, max_index) as u32;

        let center_tile = bounds.center().divide(self.tile_size);
        let mut tiles: Vec<TileCoord> = (min_y..=max_y)
            .flat_map(|y| (min_x..=max_x).map(move |x| TileCoord::new(x, y, z)))
            .collect();

        tiles.sort_by(|a, b| {
            let da = Point::new(a.x as f64 + 0.5, a.y as f64 + 0.5).distance_to(&center_tile);
            let db = Point::new(b.x as f64 + 0.5, b.y as f64 + 0.5).distance_to(&center_tile);
            da.total_cmp(&db)
        });
        tiles
    }

    /// Changes zoom by `delta` while keeping the geographic point under
    /// `anchor` (container pixels) at the same pixel
    pub fn zoom_around(&mut self, delta: f64, anchor: Point) {
        self.zoom_to_around(self.zoom + delta, anchor);
    }

    /// Absolute-zoom form of [`Transform::zoom_around`]
    pub fn zoom_to_around(&mut self, zoom: f64, anchor: Point) {
        let center = self.center_for_zoom_around(zoom, anchor);
        self.set_view(center, zoom);
    }

    /// Center that keeps `anchor` fixed when the zoom becomes `zoom`,
    /// without mutating anything
    pub fn center_for_zoom_around(&self, zoom: f64, anchor: Point) -> GeoPoint {
        if !zoom.is_finite() {
            return self.center;
        }
        let target_zoom = self.clamp_zoom(zoom);
        let anchor_world = self.pixel_to_world(&anchor);
        let anchor_world_after = anchor_world.multiply(self.zoom_scale(target_zoom));
        let center_world_after = anchor_world_after.subtract(&anchor.subtract(&self.half_size()));

        self.projection.world_to_latlng(&center_world_after, target_zoom, self.tile_size)
    }

    /// Moves the view so the viewport midpoint shifts by `(dx, dy)` pixels
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let center = self.center_after_pan(dx, dy);
        self.set_center(center);
    }

    /// Center reached by panning `(dx, dy)` pixels, without mutating anything
    pub fn center_after_pan(&self, dx: f64, dy: f64) -> GeoPoint {
        if !dx.is_finite() || !dy.is_finite() {
            return self.center;
        }
        self.world_to_latlng(&self.center_world.add(&Point::new(dx, dy)))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(GeoPoint::default(), 0.0, 800.0, 600.0)
    }
}
