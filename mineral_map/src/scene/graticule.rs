//! Latitude/longitude grid drawn with gizmos. Gives the markers geographic
//! context while tile imagery is left to the map engine.

use bevy::prelude::*;

use crate::geo::{LatLng, MAX_LATITUDE};
use crate::render::{world_position, MapViewport};

const STEP_DEGREES: f64 = 5.0;
/// Segments per meridian; parallels are straight in Mercator space.
const MERIDIAN_SEGMENTS: usize = 32;
const GRID_COLOR: Color = Color::srgba(0.45, 0.55, 0.65, 0.25);
const EQUATOR_COLOR: Color = Color::srgba(0.85, 0.7, 0.3, 0.45);

pub fn graticule_plugin(app: &mut App) {
    app.add_systems(PostUpdate, draw_graticule);
}

fn draw_graticule(mut gizmos: Gizmos, viewport: Res<MapViewport>) {
    if !viewport.is_open() {
        return;
    }

    let mut lat = -80.0;
    while lat <= 80.0 {
        let west = world_position(LatLng::new(lat, -180.0));
        let east = world_position(LatLng::new(lat, 180.0));
        let color = if lat == 0.0 { EQUATOR_COLOR } else { GRID_COLOR };
        gizmos.line_2d(west, east, color);
        lat += STEP_DEGREES;
    }

    let mut lng = -180.0;
    while lng <= 180.0 {
        gizmos.linestrip_2d(meridian_points(lng), GRID_COLOR);
        lng += STEP_DEGREES;
    }
}

fn meridian_points(lng: f64) -> impl Iterator<Item = Vec2> {
    (0..=MERIDIAN_SEGMENTS).map(move |i| {
        let t = i as f64 / MERIDIAN_SEGMENTS as f64;
        let lat = -MAX_LATITUDE + t * 2.0 * MAX_LATITUDE;
        world_position(LatLng::new(lat, lng))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meridian_spans_the_mercator_world() {
        let points: Vec<_> = meridian_points(78.0).collect();
        assert_eq!(points.len(), MERIDIAN_SEGMENTS + 1);
        assert!(points.iter().all(|p| (p.x - points[0].x).abs() < 1e-4));
        assert!((points[0].y - -256.0).abs() < 1e-3);
        assert!(points[MERIDIAN_SEGMENTS].y.abs() < 1e-3);
    }
}
