//! Distance functions used by segmenting and slot matching

use crate::types::GeoPoint;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters (haversine formula)
///
/// NaN coordinates yield NaN, which the matching code treats as
/// "infinitely far".
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let sin_phi = libm::sin(d_phi / 2.0);
    let sin_lambda = libm::sin(d_lambda / 2.0);
    let h = sin_phi * sin_phi + libm::cos(phi1) * libm::cos(phi2) * sin_lambda * sin_lambda;

    // Rounding can push h slightly above 1 for antipodal points; NaN passes through
    let h = if h.is_nan() { h } else { h.min(1.0) };
    2.0 * EARTH_RADIUS_M * libm::asin(libm::sqrt(h))
}

/// Euclidean distance between two planar points
pub fn euclidean_distance_2d(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    libm::sqrt(dx * dx + dy * dy)
}

/// Euclidean distance between two 3D points
pub fn euclidean_distance_3d(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    libm::sqrt(dx * dx + dy * dy + dz * dz)
}
