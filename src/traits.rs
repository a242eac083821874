//! Shared trait abstractions for interpolation and planar vector math

use crate::core::geo::{wrap, GeoPoint, Point};

/// Unified interpolation trait used by the animation slot
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Point {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }
}

/// Latitude and longitude are interpolated independently. Longitude takes
/// the short way around, so 170 -> -170 crosses the antimeridian instead of
/// sweeping through Greenwich.
impl Lerp for GeoPoint {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        let dlng = wrap(other.lng - self.lng, -180.0, 180.0);
        GeoPoint::normalized(
            self.lat.lerp(&other.lat, t),
            self.lng + dlng * t,
            match (self.alt, other.alt) {
                (Some(a), Some(b)) => Some(a.lerp(&b, t)),
                (_, alt) => alt,
            },
        )
    }
}

/// Vector operations on planar points
pub trait PointMath {
    fn dot(&self, other: &Self) -> f64;

    fn length_squared(&self) -> f64;

    /// Unit vector in the same direction, `None` for the zero vector
    fn normalize(&self) -> Option<Self>
    where
        Self: Sized;

    /// Same direction, magnitude capped at `max_length`
    fn clamp_length(&self, max_length: f64) -> Self;
}

impl PointMath for Point {
    fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    fn normalize(&self) -> Option<Self> {
        let length = self.length();
        if length > f64::EPSILON && length.is_finite() {
            Some(self.divide(length))
        } else {
            None
        }
    }

    fn clamp_length(&self, max_length: f64) -> Self {
        let length = self.length();
        if length > max_length && length > 0.0 {
            self.multiply(max_length / length)
        } else {
            *self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_f64() {
        assert_eq!(0.0_f64.lerp(&10.0, 0.25), 2.5);
        assert_eq!(4.0_f64.lerp(&8.0, 1.0), 8.0);
    }

    #[test]
    fn test_geo_lerp_crosses_antimeridian() {
        let a = GeoPoint::new(0.0, 170.0).unwrap();
        let b = GeoPoint::new(10.0, -170.0).unwrap();
        let mid = a.lerp(&b, 0.5);
        assert!((mid.lat - 5.0).abs() < 1e-9);
        assert!((mid.lng.abs() - 180.0).abs() < 1e-9);

        let end = a.lerp(&b, 1.0);
        assert!((end.lng - -170.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_math() {
        let v = Point::new(3.0, 4.0);
        assert_eq!(v.length_squared(), 25.0);
        let unit = v.normalize().unwrap();
        assert!((unit.x - 0.6).abs() < 1e-12);
        assert!(Point::new(0.0, 0.0).normalize().is_none());

        let capped = v.clamp_length(2.5);
        assert!((capped.length() - 2.5).abs() < 1e-12);
        assert_eq!(v.clamp_length(10.0), v);
    }
}
