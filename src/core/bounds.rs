use crate::core::geo::{clamp, CoordinateLike, GeoPoint, Point};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Largest longitude a bounds corner may take without wrapping to -180
const MAX_CORNER_LNG: f64 = 180.0 - 1e-9;

/// Builds a corner without letting longitude wrap across the antimeridian
pub(crate) fn corner(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::normalized(lat, clamp(lng, -180.0, MAX_CORNER_LNG), None)
}

/// An axis-aligned latitude/longitude box.
///
/// Construction does not check that `north_east` lies north-east of
/// `south_west`; an inverted box is a legitimate transient value and callers
/// ask [`GeoBounds::is_valid`] when it matters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl GeoBounds {
    pub fn new(south_west: GeoPoint, north_east: GeoPoint) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Result<Self> {
        Ok(Self::new(
            GeoPoint::new(south, west)?,
            GeoPoint::new(north, east)?,
        ))
    }

    /// Smallest box containing every parsable point, `None` if there is none
    pub fn from_points<I, C>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = C>,
        C: CoordinateLike,
    {
        points
            .into_iter()
            .filter_map(|p| p.to_geo_point())
            .fold(None, |acc: Option<GeoBounds>, p| match acc {
                Some(bounds) => Some(bounds.extend(&p)),
                None => Some(GeoBounds::new(p, p)),
            })
    }

    /// Box reaching `radius_m` meters north, south, east and west of `center`.
    ///
    /// Approximation from four cardinal destinations, not a geodesic buffer.
    pub fn from_center_radius(center: &GeoPoint, radius_m: f64) -> Result<Self> {
        let north = center.destination(radius_m, 0.0)?;
        let east = center.destination(radius_m, 90.0)?;
        let south = center.destination(radius_m, 180.0)?;
        let west = center.destination(radius_m, 270.0)?;

        Ok(Self::new(
            corner(south.lat, west.lng),
            corner(north.lat, east.lng),
        ))
    }

    /// Whether the box is non-inverted on both axes
    pub fn is_valid(&self) -> bool {
        self.north_east.lat >= self.south_west.lat && self.north_east.lng >= self.south_west.lng
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    pub fn north_west(&self) -> GeoPoint {
        GeoPoint::normalized(self.north(), self.west(), None)
    }

    pub fn south_east(&self) -> GeoPoint {
        GeoPoint::normalized(self.south(), self.east(), None)
    }

    /// Corners in `[south_west, south_east, north_east, north_west]` order
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            self.south_west,
            self.south_east(),
            self.north_east,
            self.north_west(),
        ]
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> GeoPoint {
        GeoPoint::normalized(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
            None,
        )
    }

    /// East-west extent in degrees
    pub fn width(&self) -> f64 {
        self.north_east.lng - self.south_west.lng
    }

    /// North-south extent in degrees
    pub fn height(&self) -> f64 {
        self.north_east.lat - self.south_west.lat
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Checks if `other` lies entirely inside these bounds
    pub fn contains_bounds(&self, other: &GeoBounds) -> bool {
        self.contains(&other.south_west) && self.contains(&other.north_east)
    }

    /// Checks if the bounds intersect with another bounds
    pub fn intersects(&self, other: &GeoBounds) -> bool {
        !(other.north_east.lat < self.south_west.lat
            || other.south_west.lat > self.north_east.lat
            || other.north_east.lng < self.south_west.lng
            || other.south_west.lng > self.north_east.lng)
    }

    /// Overlapping region, `None` when the boxes are disjoint
    pub fn intersection(&self, other: &GeoBounds) -> Option<GeoBounds> {
        if !self.intersects(other) {
            return None;
        }

        Some(GeoBounds::new(
            GeoPoint::normalized(
                self.south_west.lat.max(other.south_west.lat),
                self.south_west.lng.max(other.south_west.lng),
                None,
            ),
            GeoPoint::normalized(
                self.north_east.lat.min(other.north_east.lat),
                self.north_east.lng.min(other.north_east.lng),
                None,
            ),
        ))
    }

    /// Returns a new bounds grown to include a point
    pub fn extend(&self, point: &GeoPoint) -> GeoBounds {
        GeoBounds::new(
            GeoPoint::normalized(
                self.south_west.lat.min(point.lat),
                self.south_west.lng.min(point.lng),
                None,
            ),
            GeoPoint::normalized(
                self.north_east.lat.max(point.lat),
                self.north_east.lng.max(point.lng),
                None,
            ),
        )
    }

    /// Returns the union of this bounds with another bounds
    pub fn extend_bounds(&self, other: &GeoBounds) -> GeoBounds {
        self.extend(&other.south_west).extend(&other.north_east)
    }

    pub fn union(&self, other: &GeoBounds) -> GeoBounds {
        self.extend_bounds(other)
    }

    /// Grows every side by `ratio` times the box size on that axis
    pub fn pad(&self, ratio: f64) -> GeoBounds {
        let lat_buffer = self.height().abs() * ratio;
        let lng_buffer = self.width().abs() * ratio;

        GeoBounds::new(
            corner(
                self.south_west.lat - lat_buffer,
                self.south_west.lng - lng_buffer,
            ),
            corner(
                self.north_east.lat + lat_buffer,
                self.north_east.lng + lng_buffer,
            ),
        )
    }

    /// Compares corners within `tolerance` degrees
    pub fn equals(&self, other: &GeoBounds, tolerance: f64) -> bool {
        self.south_west.equals(&other.south_west, tolerance)
            && self.north_east.equals(&other.north_east, tolerance)
    }
}

/// A rectangle in pixel space (world or container pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates bounds from a center point and size
    pub fn from_center_and_size(center: Point, width: f64, height: f64) -> Self {
        let half = Point::new(width / 2.0, height / 2.0);
        Self::new(center - half, center + half)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Point {
        Point::new(self.width(), self.height())
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y)
    }

    /// Scales both corners, e.g. to move world pixels between zoom levels
    pub fn scaled(&self, factor: f64) -> Bounds {
        Bounds::new(self.min * factor, self.max * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bounds(south: f64, west: f64, north: f64, east: f64) -> GeoBounds {
        GeoBounds::from_coords(south, west, north, east).unwrap()
    }

    #[test]
    fn test_bounds_contains() {
        let b = bounds(40.0, -75.0, 41.0, -73.0);
        assert!(b.contains(&GeoPoint::new(40.5, -74.0).unwrap()));
        assert!(!b.contains(&GeoPoint::new(42.0, -74.0).unwrap()));
        assert!(b.contains_bounds(&bounds(40.2, -74.5, 40.8, -73.5)));
        assert!(!b.contains_bounds(&bounds(40.2, -74.5, 41.8, -73.5)));
    }

    #[test]
    fn test_derived_properties() {
        let b = bounds(10.0, 20.0, 30.0, 60.0);
        assert_eq!(b.width(), 40.0);
        assert_eq!(b.height(), 20.0);
        assert_eq!(b.center(), GeoPoint::new(20.0, 40.0).unwrap());
        assert_eq!(b.north_west(), GeoPoint::new(30.0, 20.0).unwrap());
        assert_eq!(b.south_east(), GeoPoint::new(10.0, 60.0).unwrap());
        assert_eq!(b.corners()[2], b.north_east);
    }

    #[test]
    fn test_inverted_bounds_are_constructible_but_invalid() {
        let b = bounds(30.0, 20.0, 10.0, 0.0);
        assert!(!b.is_valid());
        assert!(bounds(0.0, 0.0, 0.0, 0.0).is_valid());
    }

    #[test]
    fn test_intersection() {
        let a = bounds(0.0, 0.0, 10.0, 10.0);
        let b = bounds(5.0, 5.0, 15.0, 15.0);
        let c = bounds(20.0, 20.0, 25.0, 25.0);

        assert!(a.intersects(&b));
        assert!(a.intersection(&b).unwrap().equals(&bounds(5.0, 5.0, 10.0, 10.0), 1e-12));
        assert!(!a.intersects(&c));
        assert!(a.intersection(&c).is_none());
    }

    #[test]
    fn test_extend_returns_new_bounds() {
        let a = bounds(0.0, 0.0, 1.0, 1.0);
        let grown = a.extend(&GeoPoint::new(-2.0, 3.0).unwrap());

        assert_eq!(a, bounds(0.0, 0.0, 1.0, 1.0));
        assert!(grown.equals(&bounds(-2.0, 0.0, 1.0, 3.0), 1e-12));
        assert!(a
            .extend_bounds(&bounds(5.0, 5.0, 6.0, 6.0))
            .equals(&bounds(0.0, 0.0, 6.0, 6.0), 1e-12));
    }

    #[test]
    fn test_pad() {
        let padded = bounds(10.0, 10.0, 20.0, 30.0).pad(0.5);
        assert!(padded.equals(&bounds(5.0, 0.0, 25.0, 40.0), 1e-12));

        let clamped = bounds(-80.0, -170.0, 80.0, 170.0).pad(1.0);
        assert_eq!(clamped.south(), -90.0);
        assert_eq!(clamped.west(), -180.0);
        assert!(clamped.east() > 179.0);
        assert!(clamped.is_valid());
    }

    #[test]
    fn test_from_points() {
        let points = vec![
            json!([10.0, 20.0]),
            json!("garbage"),
            json!({"lat": -5.0, "lon": 40.0}),
        ];
        let b = GeoBounds::from_points(&points).unwrap();
        assert!(b.equals(&bounds(-5.0, 20.0, 10.0, 40.0), 1e-12));

        assert!(GeoBounds::from_points(Vec::<GeoPoint>::new()).is_none());
        assert!(GeoBounds::from_points(vec![json!({})]).is_none());
    }

    #[test]
    fn test_from_center_radius() {
        let center = GeoPoint::new(45.0, 7.0).unwrap();
        let b = GeoBounds::from_center_radius(&center, 10_000.0).unwrap();

        assert!(b.is_valid());
        assert!(b.contains(&center));
        let north = GeoPoint::new(b.north(), center.lng).unwrap();
        assert!((center.distance_to(&north) - 10_000.0).abs() < 1.0);
    }

    #[test]
    fn test_pixel_bounds() {
        let b = Bounds::from_center_and_size(Point::new(100.0, 100.0), 50.0, 20.0);
        assert_eq!(b.min, Point::new(75.0, 90.0));
        assert_eq!(b.size(), Point::new(50.0, 20.0));
        assert!(b.contains(&Point::new(100.0, 95.0)));
        assert_eq!(b.scaled(2.0).center(), Point::new(200.0, 200.0));
    }
}
