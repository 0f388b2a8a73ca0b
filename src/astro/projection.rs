//! Orthographic projection of a sphere seen from directly in front.

use crate::domain::{GeoPoint, ProjectedPoint};

/// Number of points produced by [`ortho_circle`], one per degree inclusive.
pub const RING_POINTS: usize = 361;

/// Projects a point on the sphere onto the disk of `radius`.
///
/// Back-face points (|longitude| > 90) land on the disk as well, mirrored
/// through the limb. Callers placing sunspots filter to the near side first.
pub fn project(longitude: f64, latitude: f64, radius: f64) -> ProjectedPoint {
    let lon = longitude.to_radians();
    let lat = latitude.to_radians();

    ProjectedPoint {
        x: lat.cos() * lon.sin() * radius,
        y: lat.sin() * radius,
    }
}

/// Like [`project`], but pins far-side longitudes to the limb.
///
/// Used for the day/night terminator, whose far-side vertices must not wrap
/// back over the visible hemisphere.
pub fn project_clamped(longitude: f64, latitude: f64, radius: f64) -> ProjectedPoint {
    let longitude = if longitude.abs() > 90.0 {
        90.0_f64.copysign(longitude)
    } else {
        longitude
    };
    project(longitude, latitude, radius)
}

pub fn project_point(point: GeoPoint, radius: f64) -> ProjectedPoint {
    project(point.longitude, point.latitude, radius)
}

/// Outline of a small circle of `dot_radius` degrees around a centre point.
///
/// The longitudinal radius is stretched by `1 / cos(latitude)` so the marker
/// keeps its shape towards the poles.
pub fn ortho_circle(
    center_longitude: f64,
    center_latitude: f64,
    dot_radius: f64,
    big_radius: f64,
) -> Vec<ProjectedPoint> {
    let radius_lon = dot_radius / center_latitude.to_radians().cos();
    let radius_lat = dot_radius;

    (0..RING_POINTS)
        .map(|i| {
            let angle = (i as f64).to_radians();
            project(
                center_longitude + radius_lon * angle.cos(),
                center_latitude + radius_lat * angle.sin(),
                big_radius,
            )
        })
        .collect()
}
