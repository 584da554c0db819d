//! Mineral selection → visible marker set → view fit.
//!
//! [`MarkerViewSync`] owns the selected mineral and the handles of the
//! markers it has placed. Every selection change tears the marker layer down
//! and rebuilds it, then reframes the view. Unknown mineral ids degrade to an
//! empty marker set centered on the default view.

use tracing::{debug, info, warn};

use crate::data::{MineLocation, Mineral, MineralCatalog, DEFAULT_MINERAL};
use crate::geo::{GeoBounds, LatLng};
use crate::render::{MapCapability, PopupContent, TileLayer};

/// Geographic center of India.
pub const DEFAULT_CENTER: LatLng = LatLng::new(20.5937, 78.9629);
pub const OVERVIEW_ZOOM: f64 = 4.5;
pub const MARKER_ZOOM: f64 = 5.0;
pub const FIT_PADDING: f64 = 50.0;

/// Tunables for the synchronizer.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewOptions {
    pub default_mineral: String,
    pub default_center: LatLng,
    /// Zoom used when no markers are visible.
    pub overview_zoom: f64,
    /// Zoom used when centering on the first marker without bounds fitting.
    pub marker_zoom: f64,
    /// Pixels kept free on every side when fitting to the marker bounds.
    pub fit_padding: f64,
    /// Allows fit-to-bounds when the capability supports it.
    pub fit_to_markers: bool,
    pub tile_layer: TileLayer,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            default_mineral: DEFAULT_MINERAL.to_string(),
            default_center: DEFAULT_CENTER,
            overview_zoom: OVERVIEW_ZOOM,
            marker_zoom: MARKER_ZOOM,
            fit_padding: FIT_PADDING,
            fit_to_markers: true,
            tile_layer: TileLayer::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    Uninitialized,
    Ready,
}

pub struct MarkerViewSync<H> {
    catalog: &'static MineralCatalog,
    options: ViewOptions,
    state: ViewState,
    selected: String,
    visible: Vec<&'static MineLocation>,
    rendered: Vec<H>,
}

impl<H> MarkerViewSync<H> {
    pub fn new(catalog: &'static MineralCatalog, options: ViewOptions) -> Self {
        let selected = options.default_mineral.clone();
        let visible = catalog.mines_for(&selected);
        Self {
            catalog,
            options,
            state: ViewState::Uninitialized,
            selected,
            visible,
            rendered: Vec::new(),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn catalog(&self) -> &'static MineralCatalog {
        self.catalog
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// The selected mineral, or `None` when the selection is unknown.
    pub fn selected_mineral(&self) -> Option<&'static Mineral> {
        self.catalog.mineral(&self.selected)
    }

    /// Visible marker set, in catalog order.
    pub fn visible(&self) -> &[&'static MineLocation] {
        &self.visible
    }

    /// Number of markers currently placed on the map.
    pub fn rendered_count(&self) -> usize {
        self.rendered.len()
    }

    /// Marker handles, index-aligned with [`MarkerViewSync::visible`] while
    /// the view is ready.
    pub fn rendered(&self) -> &[H] {
        &self.rendered
    }

    /// Creates the view, adds the tile layer and renders the current
    /// selection. No-op once the view is ready.
    pub fn mount<M>(&mut self, map: &mut M)
    where
        M: MapCapability<Marker = H>,
    {
        if self.state == ViewState::Ready {
            return;
        }
        map.create_view(self.options.default_center, self.options.overview_zoom);
        map.add_tile_layer(&self.options.tile_layer);
        self.state = ViewState::Ready;
        info!(mineral = %self.selected, "map.mounted");
        self.render(map);
    }

    /// Switches the selection. Before mount only the id is recorded.
    pub fn select<M>(&mut self, mineral_id: &str, map: &mut M) -> &[&'static MineLocation]
    where
        M: MapCapability<Marker = H>,
    {
        if !self.catalog.contains(mineral_id) {
            warn!(mineral = %mineral_id, "unknown mineral selected, showing no markers");
        }
        self.selected = mineral_id.to_string();
        self.visible = self.catalog.mines_for(mineral_id);

        if self.state == ViewState::Ready {
            self.render(map);
        } else {
            debug!(mineral = %mineral_id, "selection recorded before mount");
        }
        &self.visible
    }

    /// Removes every marker and destroys the view.
    pub fn unmount<M>(&mut self, map: &mut M)
    where
        M: MapCapability<Marker = H>,
    {
        if self.state == ViewState::Uninitialized {
            return;
        }
        self.clear_markers(map);
        map.destroy_view();
        self.state = ViewState::Uninitialized;
        info!("map.unmounted");
    }

    fn clear_markers<M>(&mut self, map: &mut M)
    where
        M: MapCapability<Marker = H>,
    {
        for marker in self.rendered.drain(..) {
            map.remove_marker(marker);
        }
    }

    fn render<M>(&mut self, map: &mut M)
    where
        M: MapCapability<Marker = H>,
    {
        self.clear_markers(map);
        for mine in &self.visible {
            let handle = map.add_marker(mine.position, PopupContent::for_mine(mine));
            self.rendered.push(handle);
        }
        self.fit_view(map);
        debug!(
            mineral = %self.selected,
            markers = self.rendered.len(),
            "markers.rebuilt"
        );
    }

    fn fit_view<M>(&self, map: &mut M)
    where
        M: MapCapability<Marker = H>,
    {
        let Some(first) = self.visible.first() else {
            map.set_view(self.options.default_center, self.options.overview_zoom);
            return;
        };

        if self.options.fit_to_markers && map.supports_fit_bounds() {
            if let Some(bounds) = GeoBounds::from_points(self.visible.iter().map(|m| m.position)) {
                map.fit_bounds(&bounds, self.options.fit_padding);
                return;
            }
        }
        map.set_view(first.position, self.options.marker_zoom);
    }
}

/// Mounted synchronizer bound to a map. Unmounts when dropped, so the view
/// is released on every exit path.
pub struct MapView<'a, M: MapCapability> {
    sync: &'a mut MarkerViewSync<M::Marker>,
    map: &'a mut M,
}

impl<'a, M: MapCapability> MapView<'a, M> {
    pub fn mount(sync: &'a mut MarkerViewSync<M::Marker>, map: &'a mut M) -> Self {
        sync.mount(map);
        Self { sync, map }
    }

    pub fn select(&mut self, mineral_id: &str) -> &[&'static MineLocation] {
        self.sync.select(mineral_id, &mut *self.map)
    }

    pub fn sync(&self) -> &MarkerViewSync<M::Marker> {
        &*self.sync
    }

    pub fn map(&self) -> &M {
        &*self.map
    }
}

impl<M: MapCapability> Drop for MapView<'_, M> {
    fn drop(&mut self) {
        self.sync.unmount(&mut *self.map);
    }
}
