use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Mean Earth radius in meters, used for great-circle math
pub const EARTH_MEAN_RADIUS: f64 = 6_371_008.8;

/// Wraps `value` into the half-open range `[min, max)` using a true modulo
pub fn wrap(value: f64, min: f64, max: f64) -> f64 {
    if value >= min && value < max {
        return value;
    }
    let range = max - min;
    (value - min).rem_euclid(range) + min
}

/// Clamps `value` into the closed range `[min, max]`
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// A geographical coordinate with latitude, longitude and optional altitude.
///
/// Latitude is clamped to `[-90, 90]` and longitude wrapped into `[-180, 180)`
/// when the value is built, so every `GeoPoint` in circulation is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<f64>,
}

/// Unvalidated wire form; deserialization goes through [`GeoPoint::new`]
#[derive(Deserialize)]
struct RawGeoPoint {
    lat: f64,
    #[serde(alias = "lon")]
    lng: f64,
    #[serde(default)]
    alt: Option<f64>,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = MapError;

    fn try_from(raw: RawGeoPoint) -> Result<Self> {
        match raw.alt {
            Some(alt) => GeoPoint::with_alt(raw.lat, raw.lng, alt),
            None => GeoPoint::new(raw.lat, raw.lng),
        }
    }
}

impl GeoPoint {
    /// Creates a new coordinate, failing if either component is not finite
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(MapError::InvalidCoordinates(format!(
                "lat/lng must be finite numbers, got ({lat}, {lng})"
            )));
        }
        Ok(Self::normalized(lat, lng, None))
    }

    /// Creates a coordinate with an altitude in meters
    pub fn with_alt(lat: f64, lng: f64, alt: f64) -> Result<Self> {
        if !alt.is_finite() {
            return Err(MapError::InvalidCoordinates(format!(
                "altitude must be a finite number, got {alt}"
            )));
        }
        let point = Self::new(lat, lng)?;
        Ok(Self {
            alt: Some(alt),
            ..point
        })
    }

    /// Builds a point from values already known to be finite (results of
    /// internal math on valid points)
    pub(crate) fn normalized(lat: f64, lng: f64, alt: Option<f64>) -> Self {
        Self {
            lat: clamp(lat, -90.0, 90.0),
            lng: wrap(lng, -180.0, 180.0),
            alt,
        }
    }

    /// Returns a new point shifted by the given degrees
    pub fn offset(&self, dlat: f64, dlng: f64) -> Result<Self> {
        let point = Self::new(self.lat + dlat, self.lng + dlng)?;
        Ok(Self {
            alt: self.alt,
            ..point
        })
    }

    /// `(lat, lng)` in radians
    pub fn to_radians(&self) -> (f64, f64) {
        (self.lat.to_radians(), self.lng.to_radians())
    }

    /// Great-circle distance in meters (haversine)
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let (lat1_rad, _) = self.to_radians();
        let (lat2_rad, _) = other.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_MEAN_RADIUS * c
    }

    /// Initial bearing towards `other`, in degrees clockwise from north `[0, 360)`
    pub fn bearing_to(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let y = delta_lng.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();

        wrap(y.atan2(x).to_degrees(), 0.0, 360.0)
    }

    /// Point reached after travelling `distance_m` along `bearing_deg` on a sphere
    pub fn destination(&self, distance_m: f64, bearing_deg: f64) -> Result<Self> {
        if !distance_m.is_finite() || !bearing_deg.is_finite() {
            return Err(MapError::InvalidCoordinates(format!(
                "distance and bearing must be finite, got ({distance_m}, {bearing_deg})"
            )));
        }

        let angular = distance_m / EARTH_MEAN_RADIUS;
        let bearing = bearing_deg.to_radians();
        let lat1 = self.lat.to_radians();
        let lng1 = self.lng.to_radians();

        let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
        let lng2 = lng1
            + (bearing.sin() * angular.sin() * lat1.cos())
                .atan2(angular.cos() - lat1.sin() * lat2.sin());

        Ok(Self::normalized(lat2.to_degrees(), lng2.to_degrees(), self.alt))
    }

    /// Great-circle midpoint between two points
    pub fn midpoint(&self, other: &GeoPoint) -> GeoPoint {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let lng1 = self.lng.to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let bx = lat2.cos() * delta_lng.cos();
        let by = lat2.cos() * delta_lng.sin();
        let lat = (lat1.sin() + lat2.sin()).atan2(((lat1.cos() + bx).powi(2) + by * by).sqrt());
        let lng = lng1 + by.atan2(lat1.cos() + bx);

        Self::normalized(lat.to_degrees(), lng.to_degrees(), None)
    }

    /// Compares two points within `tolerance` degrees on each axis
    pub fn equals(&self, other: &GeoPoint, tolerance: f64) -> bool {
        (self.lat - other.lat).abs() <= tolerance
            && wrap(self.lng - other.lng, -180.0, 180.0).abs() <= tolerance
    }

    /// Arithmetic mean of every parsable coordinate; unparsable entries are skipped
    pub fn center<I, C>(points: I) -> Option<GeoPoint>
    where
        I: IntoIterator<Item = C>,
        C: CoordinateLike,
    {
        let (count, lat_sum, lng_sum) = points
            .into_iter()
            .filter_map(|p| p.to_geo_point())
            .fold((0usize, 0.0, 0.0), |(n, lat, lng), p| (n + 1, lat + p.lat, lng + p.lng));

        if count == 0 {
            return None;
        }
        Some(Self::normalized(lat_sum / count as f64, lng_sum / count as f64, None))
    }

    /// Total great-circle length of a path; unparsable entries are skipped
    pub fn path_distance<I, C>(points: I) -> f64
    where
        I: IntoIterator<Item = C>,
        C: CoordinateLike,
    {
        let mut previous: Option<GeoPoint> = None;
        let mut total = 0.0;
        for point in points.into_iter().filter_map(|p| p.to_geo_point()) {
            if let Some(prev) = previous {
                total += prev.distance_to(&point);
            }
            previous = Some(point);
        }
        total
    }

    /// Parses a loosely-typed JSON coordinate.
    ///
    /// Accepts `{lat, lng}`, `{lat, lon}`, `{latitude, longitude}` objects and
    /// `[lat, lng]` / `[lat, lng, alt]` arrays. Numeric strings are accepted.
    pub fn from_value(value: &serde_json::Value) -> Result<GeoPoint> {
        use serde_json::Value;

        fn number(value: Option<&Value>) -> Option<f64> {
            match value? {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }
        }

        let (lat, lng, alt) = match value {
            Value::Array(items) if items.len() >= 2 => {
                (number(items.first()), number(items.get(1)), number(items.get(2)))
            }
            Value::Object(map) => {
                let lat = number(map.get("lat")).or_else(|| number(map.get("latitude")));
                let lng = number(map.get("lng"))
                    .or_else(|| number(map.get("lon")))
                    .or_else(|| number(map.get("longitude")));
                (lat, lng, number(map.get("alt")))
            }
            _ => (None, None, None),
        };

        match (lat, lng) {
            (Some(lat), Some(lng)) => match alt {
                Some(alt) => GeoPoint::with_alt(lat, lng, alt),
                None => GeoPoint::new(lat, lng),
            },
            _ => Err(MapError::InvalidCoordinates(format!(
                "not a coordinate: {value}"
            ))),
        }
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::normalized(0.0, 0.0, None)
    }
}

impl From<GeoPoint> for geo_types::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo_types::Point::new(point.lng, point.lat)
    }
}

/// Anything that may be read as a geographic coordinate.
///
/// Batch helpers use this to accept heterogeneous input and silently drop
/// entries that do not parse.
pub trait CoordinateLike {
    fn to_geo_point(&self) -> Option<GeoPoint>;
}

impl CoordinateLike for GeoPoint {
    fn to_geo_point(&self) -> Option<GeoPoint> {
        Some(*self)
    }
}

impl<T: CoordinateLike + ?Sized> CoordinateLike for &T {
    fn to_geo_point(&self) -> Option<GeoPoint> {
        (**self).to_geo_point()
    }
}

/// `(lat, lng)`
impl CoordinateLike for (f64, f64) {
    fn to_geo_point(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.0, self.1).ok()
    }
}

/// `[lat, lng]`
impl CoordinateLike for [f64; 2] {
    fn to_geo_point(&self) -> Option<GeoPoint> {
        GeoPoint::new(self[0], self[1]).ok()
    }
}

impl CoordinateLike for serde_json::Value {
    fn to_geo_point(&self) -> Option<GeoPoint> {
        GeoPoint::from_value(self).ok()
    }
}

impl<T: CoordinateLike> CoordinateLike for Option<T> {
    fn to_geo_point(&self) -> Option<GeoPoint> {
        self.as_ref().and_then(CoordinateLike::to_geo_point)
    }
}

/// georust coordinates are `x = lng, y = lat`
impl CoordinateLike for geo_types::Coord<f64> {
    fn to_geo_point(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.y, self.x).ok()
    }
}

impl CoordinateLike for geo_types::Point<f64> {
    fn to_geo_point(&self) -> Option<GeoPoint> {
        self.0.to_geo_point()
    }
}

/// A planar point: world pixels, container pixels or projected meters
/// depending on context
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn divide(&self, scalar: f64) -> Point {
        Point::new(self.x / scalar, self.y / scalar)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Euclidean length of the vector from the origin
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn floor(&self) -> Point {
        Point::new(self.x.floor(), self.y.floor())
    }

    pub fn ceil(&self) -> Point {
        Point::new(self.x.ceil(), self.y.ceil())
    }

    pub fn round(&self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::add(&self, &rhs)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        self.subtract(&rhs)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        self.multiply(rhs)
    }
}
