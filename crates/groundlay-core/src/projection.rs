//! Geographic-to-screen projection.
//!
//! The host map owns the real projection and it changes on every pan and zoom,
//! so overlays ask for it on each redraw and never hold on to it. Anything
//! that maps a [`LatLng`] to a [`PixelPoint`] can act as one, including plain
//! closures.
//!
//! [`WebMercator`] is a standalone implementation of the standard 256px-tile
//! spherical Mercator used by web maps. Hosts without their own projection can
//! use it directly, and it gives the rest of the crate a realistic y-down
//! projection to test against.

use std::f64::consts::PI;

use crate::geo::{LatLng, LatLngBounds, PixelPoint, PixelRect};

/// Tile edge in pixels at zoom 0.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Web Mercator world.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

/// Converts geographic points to pixels for the current view.
///
/// Returning `None` means the host cannot project right now (for example it
/// has not been laid out yet). Callers treat that as "skip this frame".
pub trait Projection {
    fn project(&self, point: LatLng) -> Option<PixelPoint>;
}

impl<F> Projection for F
where
    F: Fn(LatLng) -> Option<PixelPoint>,
{
    fn project(&self, point: LatLng) -> Option<PixelPoint> {
        self(point)
    }
}

/// Project a bounding box to its unrotated pixel rectangle.
///
/// Only the south-west and north-east corners are projected. The rectangle
/// takes the component-wise minimum as its top-left and the absolute
/// differences as its size, which holds whichever way the screen y axis runs.
/// Returns `None` if either corner cannot be projected or lands on a
/// non-finite pixel.
pub fn project_bounds<P: Projection + ?Sized>(
    projection: &P,
    bounds: &LatLngBounds,
) -> Option<PixelRect> {
    let sw = projection.project(bounds.south_west)?;
    let ne = projection.project(bounds.north_east)?;
    if !(sw.x.is_finite() && sw.y.is_finite() && ne.x.is_finite() && ne.y.is_finite()) {
        return None;
    }
    Some(PixelRect::from_corners(sw, ne))
}

/// Spherical Web Mercator at a fixed zoom, relative to a pixel origin.
///
/// World pixel coordinates grow east (x) and south (y). The origin is
/// subtracted so results are relative to the host's overlay layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercator {
    /// Zoom level; fractional zooms are allowed.
    pub zoom: f64,
    /// World pixel that maps to (0, 0) in layer space.
    pub origin: PixelPoint,
}

impl WebMercator {
    pub fn new(zoom: f64, origin: PixelPoint) -> Self {
        Self { zoom, origin }
    }

    /// Projection whose layer origin is the world's top-left corner.
    pub fn at_zoom(zoom: f64) -> Self {
        Self::new(zoom, PixelPoint::default())
    }

    /// Projection centered on `center` for a viewport of `width` x `height` pixels.
    pub fn centered(center: LatLng, zoom: f64, width: f64, height: f64) -> Self {
        let world = Self::at_zoom(zoom).world_pixel(center);
        Self::new(
            zoom,
            PixelPoint::new(world.x - width / 2.0, world.y - height / 2.0),
        )
    }

    /// Size of the world in pixels at this zoom.
    pub fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom)
    }

    fn world_pixel(&self, point: LatLng) -> PixelPoint {
        let scale = self.world_size();
        let lat = point
            .lat
            .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
            .to_radians();
        let x = (point.lng + 180.0) / 360.0 * scale;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
        PixelPoint::new(x, y)
    }
}

impl Projection for WebMercator {
    fn project(&self, point: LatLng) -> Option<PixelPoint> {
        if !point.is_finite() || !self.zoom.is_finite() {
            return None;
        }
        let world = self.world_pixel(point);
        Some(PixelPoint::new(
            world.x - self.origin.x,
            world.y - self.origin.y,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mercator_origin_of_world() {
        let proj = WebMercator::at_zoom(0.0);
        let p = proj.project(LatLng::new(0.0, 0.0)).unwrap();
        assert!((p.x - 128.0).abs() < 1e-9);
        assert!((p.y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_mercator_y_grows_south() {
        let proj = WebMercator::at_zoom(10.0);
        let north = proj.project(LatLng::new(51.51, -0.12)).unwrap();
        let south = proj.project(LatLng::new(51.50, -0.12)).unwrap();
        assert!(south.y > north.y);
    }

    #[test]
    fn test_mercator_centered_puts_center_mid_viewport() {
        let center = LatLng::new(51.505, -0.125);
        let proj = WebMercator::centered(center, 14.0, 800.0, 600.0);
        let p = proj.project(center).unwrap();
        assert!((p.x - 400.0).abs() < 1e-6);
        assert!((p.y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_mercator_rejects_nan() {
        let proj = WebMercator::at_zoom(3.0);
        assert!(proj.project(LatLng::new(f64::NAN, 0.0)).is_none());
    }

    #[test]
    fn test_closure_projection() {
        let proj = |p: LatLng| Some(PixelPoint::new(p.lng * 10.0, -p.lat * 10.0));
        let rect = project_bounds(&proj, &LatLngBounds::from_edges(1.0, 2.0, 3.0, 5.0)).unwrap();
        assert_eq!(rect.left, 20.0);
        assert_eq!(rect.top, -30.0);
        assert_eq!(rect.width, 30.0);
        assert_eq!(rect.height, 20.0);
    }

    #[test]
    fn test_project_bounds_unavailable() {
        let proj = |_: LatLng| -> Option<PixelPoint> { None };
        assert!(project_bounds(&proj, &LatLngBounds::from_edges(0.0, 0.0, 1.0, 1.0)).is_none());
    }

    #[test]
    fn test_project_bounds_non_finite_pixel() {
        let proj = |_: LatLng| Some(PixelPoint::new(f64::INFINITY, 0.0));
        assert!(project_bounds(&proj, &LatLngBounds::from_edges(0.0, 0.0, 1.0, 1.0)).is_none());
    }
}
