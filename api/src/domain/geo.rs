//! Geodesic helpers

use ::geo::{GeodesicDistance, Point};

use crate::domain::entities::Coordinates;

impl From<Coordinates> for Point<f64> {
    fn from(c: Coordinates) -> Self {
        Point::new(c.lng, c.lat)
    }
}

/// Distance in meters on the WGS84 ellipsoid (Karney), the same measure the
/// store applies to its `geography` radius filter
pub fn distance_m(a: &Coordinates, b: &Coordinates) -> f64 {
    Point::<f64>::from(*a).geodesic_distance(&Point::from(*b))
}
