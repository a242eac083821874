//! Spherical (Web) Mercator projection and slippy-map tile math.
//!
//! Projected coordinates follow EPSG:3857: meters on a sphere of radius
//! 6378137, with the origin at (0°, 0°) and `y` growing northwards.

use crate::core::constants::TILE_SIZE;
use crate::core::geo::{clamp, GeoPoint, Point};
use crate::core::bounds::GeoBounds;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Web Mercator sphere radius
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude at which the projected world becomes square
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Half the projected world extent, `π · R`
pub const R_SHIFT: f64 = PI * EARTH_RADIUS;

/// Maps geographic coordinates onto a plane and back
pub trait Projection {
    /// Geographic coordinate to projected meters
    fn project(&self, point: &GeoPoint) -> Point;

    /// Projected meters to geographic coordinate
    fn unproject(&self, point: &Point) -> GeoPoint;
}

/// EPSG:3857
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SphericalMercator;

impl Projection for SphericalMercator {
    fn project(&self, point: &GeoPoint) -> Point {
        let lat = clamp(point.lat, -MAX_LATITUDE, MAX_LATITUDE);
        let x = point.lng * R_SHIFT / 180.0;
        let y = ((90.0 + lat) * PI / 360.0).tan().ln() * R_SHIFT / PI;
        Point::new(x, y)
    }

    fn unproject(&self, point: &Point) -> GeoPoint {
        let lng = point.x * 180.0 / R_SHIFT;
        let lat = (2.0 * (point.y * PI / R_SHIFT).exp().atan() - PI / 2.0).to_degrees();
        GeoPoint::normalized(lat, lng, None)
    }
}

impl SphericalMercator {
    /// Edge length of the world in pixels at `zoom`
    pub fn world_size(zoom: f64, tile_size: f64) -> f64 {
        tile_size * 2_f64.powf(zoom)
    }

    /// Geographic coordinate to world pixels (origin top-left, `y` down)
    pub fn latlng_to_world(&self, point: &GeoPoint, zoom: f64, tile_size: f64) -> Point {
        let projected = self.project(point);
        let world_size = Self::world_size(zoom, tile_size);
        Point::new(
            (projected.x + R_SHIFT) / (2.0 * R_SHIFT) * world_size,
            (R_SHIFT - projected.y) / (2.0 * R_SHIFT) * world_size,
        )
    }

    /// World pixels back to a geographic coordinate
    pub fn world_to_latlng(&self, pixel: &Point, zoom: f64, tile_size: f64) -> GeoPoint {
        let world_size = Self::world_size(zoom, tile_size);
        let projected = Point::new(
            pixel.x / world_size * (2.0 * R_SHIFT) - R_SHIFT,
            R_SHIFT - pixel.y / world_size * (2.0 * R_SHIFT),
        );
        self.unproject(&projected)
    }

    /// Tile containing `point` at `zoom`, clamped to the tile grid
    pub fn tile_index(point: &GeoPoint, zoom: u8) -> TileCoord {
        let n = 2_f64.powi(zoom as i32);
        let max_index = n - 1.0;
        let lat_rad = clamp(point.lat, -MAX_LATITUDE, MAX_LATITUDE).to_radians();

        let x = ((point.lng + 180.0) / 360.0 * n).floor();
        let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n).floor();

        TileCoord::new(
            clamp(x, 0.0, max_index) as u32,
            clamp(y, 0.0, max_index) as u32,
            zoom,
        )
    }

    /// North-west corner of tile `(x, y, z)`
    pub fn tile_to_point(x: u32, y: u32, z: u8) -> GeoPoint {
        Self::tile_corner(f64::from(x), f64::from(y), z)
    }

    fn tile_corner(x: f64, y: f64, z: u8) -> GeoPoint {
        let n = 2_f64.powi(z as i32);
        let lng = x / n * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees();
        GeoPoint::normalized(lat, lng, None)
    }

    /// Ground resolution in meters per pixel at `lat` and `zoom`
    pub fn resolution_at(lat: f64, zoom: f64, tile_size: f64) -> f64 {
        (2.0 * PI * EARTH_RADIUS * lat.to_radians().cos()) / (2_f64.powf(zoom) * tile_size)
    }

    /// Resolution for the default tile size
    pub fn resolution(lat: f64, zoom: f64) -> f64 {
        Self::resolution_at(lat, zoom, TILE_SIZE as f64)
    }
}

/// Represents a tile coordinate in the slippy map tile system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// North-west corner of the tile
    pub fn to_geo_point(&self) -> GeoPoint {
        SphericalMercator::tile_to_point(self.x, self.y, self.z)
    }

    /// Gets the bounds of the tile
    pub fn bounds(&self) -> GeoBounds {
        let nw = self.to_geo_point();
        let se = SphericalMercator::tile_corner(
            f64::from(self.x) + 1.0,
            f64::from(self.y) + 1.0,
            self.z,
        );
        let last_column = matches!(
            Self::grid_size(self.z),
            Some(size) if u64::from(self.x) + 1 >= size
        );
        let east = if last_column { 180.0 - 1e-9 } else { se.lng };

        GeoBounds::new(
            GeoPoint::normalized(se.lat, nw.lng, None),
            GeoPoint::normalized(nw.lat, east, None),
        )
    }

    /// Gets the parent tile at a lower zoom level
    pub fn parent(&self) -> Option<TileCoord> {
        if self.z == 0 {
            None
        } else {
            Some(TileCoord::new(self.x / 2, self.y / 2, self.z - 1))
        }
    }

    /// Gets the child tiles at the next zoom level, `None` when they would
    /// not fit the coordinate types
    pub fn children(&self) -> Option<[TileCoord; 4]> {
        let z = self.z.checked_add(1)?;
        let x = self.x.checked_mul(2).filter(|x| x.checked_add(1).is_some())?;
        let y = self.y.checked_mul(2).filter(|y| y.checked_add(1).is_some())?;
        Some([
            TileCoord::new(x, y, z),
            TileCoord::new(x + 1, y, z),
            TileCoord::new(x, y + 1, z),
            TileCoord::new(x + 1, y + 1, z),
        ])
    }

    /// Bing-style quadkey
    pub fn quadkey(&self) -> String {
        (1..=self.z)
            .rev()
            .map(|i| {
                // Levels above bit 31 are always zero for u32 coordinates
                let bit = |v: u32| v.checked_shr(u32::from(i - 1)).unwrap_or(0) & 1;
                (b'0' + bit(self.x) as u8 + 2 * bit(self.y) as u8) as char
            })
            .collect()
    }

    /// Checks if the tile is inside the grid for its zoom level
    pub fn is_valid(&self) -> bool {
        match Self::grid_size(self.z) {
            Some(size) => u64::from(self.x) < size && u64::from(self.y) < size,
            // Wider than any u32 coordinate
            None => true,
        }
    }

    /// Tiles per axis at `z`, `None` past what a `u64` holds
    fn grid_size(z: u8) -> Option<u64> {
        1u64.checked_shl(u32::from(z))
    }
}
