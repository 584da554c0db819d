//! Geographic primitives: positions, bounding regions, Web-Mercator projection
//! and the bounds-fit zoom used when refitting the view to a marker set.

use bevy::math::DVec2;
use serde::{Deserialize, Serialize};

/// Tile edge length in pixels at zoom 0.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Web-Mercator world.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

/// A latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned lat/lng rectangle enclosing a set of positions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl GeoBounds {
    pub fn from_point(point: LatLng) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Smallest bounds enclosing every point, or `None` for an empty input.
    pub fn from_points(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self::from_point(first);
        for point in points {
            bounds.extend(point);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    pub fn north_west(&self) -> LatLng {
        LatLng::new(self.north_east.lat, self.south_west.lng)
    }

    pub fn south_east(&self) -> LatLng {
        LatLng::new(self.south_west.lat, self.north_east.lng)
    }
}

fn scale(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Spherical Web-Mercator projection to pixel coordinates at `zoom`.
///
/// x grows eastward from the antimeridian, y grows southward from the top of
/// the world, matching slippy-map tile numbering.
pub fn project(position: LatLng, zoom: f64) -> DVec2 {
    let lat = position.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (position.lng + 180.0) / 360.0;
    let y = 0.5 - (lat.tan() + 1.0 / lat.cos()).ln() / (2.0 * std::f64::consts::PI);
    DVec2::new(x, y) * scale(zoom)
}

/// Inverse of [`project`].
pub fn unproject(point: DVec2, zoom: f64) -> LatLng {
    let normalized = point / scale(zoom);
    let lng = normalized.x * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * normalized.y);
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}

/// Center and zoom that frame a bounding region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewFit {
    pub center: LatLng,
    pub zoom: f64,
}

/// Largest whole zoom at which `bounds`, padded by `padding` pixels on every
/// side, still fits inside a viewport of `viewport` pixels.
pub fn bounds_zoom(bounds: &GeoBounds, viewport: DVec2, padding: f64, max_zoom: f64) -> f64 {
    let available = viewport - DVec2::splat(padding * 2.0);
    let span = project(bounds.south_east(), 0.0) - project(bounds.north_west(), 0.0);
    if span.x <= f64::EPSILON && span.y <= f64::EPSILON {
        return max_zoom;
    }
    if available.x <= 0.0 || available.y <= 0.0 {
        return 0.0;
    }

    let scale_x = if span.x > f64::EPSILON {
        available.x / span.x
    } else {
        f64::INFINITY
    };
    let scale_y = if span.y > f64::EPSILON {
        available.y / span.y
    } else {
        f64::INFINITY
    };
    let zoom = scale_x.min(scale_y).log2().floor();
    zoom.clamp(0.0, max_zoom)
}

/// Center and zoom that frame `bounds` inside the viewport.
///
/// The center is the midpoint of the projected corners, not the lat/lng
/// average, so the markers stay visually centered at high latitudes.
pub fn fit_bounds(bounds: &GeoBounds, viewport: DVec2, padding: f64, max_zoom: f64) -> ViewFit {
    let zoom = bounds_zoom(bounds, viewport, padding, max_zoom);
    let nw = project(bounds.north_west(), zoom);
    let se = project(bounds.south_east(), zoom);
    ViewFit {
        center: unproject((nw + se) / 2.0, zoom),
        zoom,
    }
}
