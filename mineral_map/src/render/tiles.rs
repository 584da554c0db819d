//! Templated raster tile source. Fetching and drawing tiles is left to the
//! map engine; this only describes the layer and resolves tile URLs.

use serde::Serialize;
use url::Url;

use crate::error::ConfigError;

pub const OSM_TILE_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

const SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TileLayer {
    pub template: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            template: OSM_TILE_TEMPLATE.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

impl TileLayer {
    /// Builds a layer after checking that the template resolves to a URL.
    pub fn new(
        template: impl Into<String>,
        attribution: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let layer = Self {
            template: template.into(),
            attribution: attribution.into(),
        };
        layer.tile_url(0, 0, 0)?;
        Ok(layer)
    }

    /// Concrete URL of one tile. `{s}` rotates over the a/b/c subdomains.
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> Result<Url, ConfigError> {
        let index = (u64::from(x) + u64::from(y)) % SUBDOMAINS.len() as u64;
        let subdomain = SUBDOMAINS[index as usize];
        let raw = self
            .template
            .replace("{s}", subdomain)
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string());
        Url::parse(&raw).map_err(|source| ConfigError::InvalidTileTemplate {
            template: self.template.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osm_tile_url_resolves() {
        let url = TileLayer::default().tile_url(5, 22, 14).unwrap();
        assert_eq!(url.as_str(), "https://a.tile.openstreetmap.org/5/22/14.png");
    }

    #[test]
    fn subdomains_rotate() {
        let layer = TileLayer::default();
        let hosts: Vec<_> = (0..3)
            .map(|x| layer.tile_url(1, x, 0).unwrap().host_str().unwrap().to_string())
            .collect();
        assert_eq!(
            hosts,
            [
                "a.tile.openstreetmap.org",
                "b.tile.openstreetmap.org",
                "c.tile.openstreetmap.org"
            ]
        );
    }

    #[test]
    fn subdomain_rotation_handles_max_tile_indices() {
        let url = TileLayer::default().tile_url(32, u32::MAX, u32::MAX).unwrap();
        // (2 * u32::MAX) % 3 == 0
        assert_eq!(url.host_str(), Some("a.tile.openstreetmap.org"));
    }

    #[test]
    fn relative_template_is_rejected() {
        let err = TileLayer::new("/tiles/{z}/{x}/{y}.png", "local").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTileTemplate { .. }));
    }
}
