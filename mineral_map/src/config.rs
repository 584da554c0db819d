//! Env parsing and defaults for the map view.

use tracing::warn;

use crate::data::{catalog, DEFAULT_MINERAL};
use crate::error::ConfigError;
use crate::render::TileLayer;
use crate::sync::ViewOptions;

pub const DEFAULT_MINERAL_VAR: &str = "MINERAL_MAP_DEFAULT";
pub const TILE_URL_VAR: &str = "MINERAL_MAP_TILE_URL";
pub const TILE_ATTRIBUTION_VAR: &str = "MINERAL_MAP_TILE_ATTRIBUTION";
pub const FIT_PADDING_VAR: &str = "MINERAL_MAP_FIT_PADDING";
pub const MARKER_ZOOM_VAR: &str = "MINERAL_MAP_MARKER_ZOOM";
pub const OVERVIEW_ZOOM_VAR: &str = "MINERAL_MAP_OVERVIEW_ZOOM";

const MAX_ZOOM: f64 = 18.0;

/// Builds view options from the environment. Invalid values are logged and
/// replaced by their defaults.
pub fn view_options() -> ViewOptions {
    let defaults = ViewOptions::default();

    let default_mineral = match std::env::var(DEFAULT_MINERAL_VAR) {
        Ok(id) if catalog().contains(&id) => id,
        Ok(id) => {
            warn!("{DEFAULT_MINERAL_VAR}: unknown mineral {id:?}, using {DEFAULT_MINERAL}");
            DEFAULT_MINERAL.to_string()
        }
        Err(_) => DEFAULT_MINERAL.to_string(),
    };

    ViewOptions {
        default_mineral,
        overview_zoom: number_or(OVERVIEW_ZOOM_VAR, defaults.overview_zoom, zoom_in_range),
        marker_zoom: number_or(MARKER_ZOOM_VAR, defaults.marker_zoom, zoom_in_range),
        fit_padding: number_or(FIT_PADDING_VAR, defaults.fit_padding, padding_in_range),
        tile_layer: tile_layer(),
        ..defaults
    }
}

/// Tile layer from `MINERAL_MAP_TILE_URL` / `MINERAL_MAP_TILE_ATTRIBUTION`.
pub fn tile_layer() -> TileLayer {
    let fallback = TileLayer::default();
    let Ok(template) = std::env::var(TILE_URL_VAR) else {
        return fallback;
    };
    let attribution =
        std::env::var(TILE_ATTRIBUTION_VAR).unwrap_or_else(|_| fallback.attribution.clone());
    match TileLayer::new(template, attribution) {
        Ok(layer) => layer,
        Err(err) => {
            warn!("{err}; using the OpenStreetMap layer");
            fallback
        }
    }
}

fn number_or(
    var: &'static str,
    default: f64,
    check: fn(&'static str, f64) -> Result<f64, ConfigError>,
) -> f64 {
    match parse_number(var).and_then(|value| value.map(|v| check(var, v)).transpose()) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(err) => {
            warn!("{err}; using {default}");
            default
        }
    }
}

fn parse_number(var: &'static str) -> Result<Option<f64>, ConfigError> {
    let Ok(raw) = std::env::var(var) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or(ConfigError::InvalidNumber { var, value: raw })
}

fn zoom_in_range(var: &'static str, zoom: f64) -> Result<f64, ConfigError> {
    if (0.0..=MAX_ZOOM).contains(&zoom) {
        Ok(zoom)
    } else {
        Err(ConfigError::OutOfRange {
            var,
            reason: format!("zoom {zoom} outside 0..={MAX_ZOOM}"),
        })
    }
}

fn padding_in_range(var: &'static str, padding: f64) -> Result<f64, ConfigError> {
    if padding >= 0.0 {
        Ok(padding)
    } else {
        Err(ConfigError::OutOfRange {
            var,
            reason: format!("padding {padding} is negative"),
        })
    }
}
