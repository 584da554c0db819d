//! SDK entry points and builder for composing the mineral map app.

use bevy::math::DVec2;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use serde::Serialize;
use tracing::{error, info};

use crate::config;
use crate::data::{catalog, MineralCatalog};
use crate::scene::{graticule_plugin, marker_plugin, picking_plugin, MineralView};
use crate::render::{RecordedMarker, RecordingMap, TileLayer, ViewSnapshot};
use crate::sync::{MapView, MarkerViewSync, ViewOptions};
use crate::ui::{hud_plugin, inspector_plugin, selector_plugin};

/// Headless snapshot of one selection: what the map would show.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportReport {
    pub mineral: String,
    /// False when the selection is not in the catalog.
    pub known: bool,
    pub markers: Vec<RecordedMarker>,
    pub view: Option<ViewSnapshot>,
    pub tile_layer: Option<TileLayer>,
}

/// Builder for constructing the mineral map app with customizable plugins.
pub struct MineralMapBuilder {
    catalog: &'static MineralCatalog,
    options: Option<ViewOptions>,
    default_mineral: Option<String>,
    fit_to_markers: bool,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    enable_selector: bool,
    enable_inspector: bool,
    enable_hud: bool,
    enable_graticule: bool,
}

impl Default for MineralMapBuilder {
    fn default() -> Self {
        Self {
            catalog: catalog(),
            options: None,
            default_mineral: None,
            fit_to_markers: true,
            window_title: "Mineral Atlas".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: Color::srgb(0.05, 0.06, 0.09),
            enable_selector: true,
            enable_inspector: true,
            enable_hud: true,
            enable_graticule: true,
        }
    }
}

impl MineralMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use explicit view options instead of reading the environment.
    pub fn options(mut self, options: ViewOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Load `.env` and read view options from environment variables.
    pub fn from_env(mut self) -> Self {
        let _ = dotenvy::dotenv();
        self.options = Some(config::view_options());
        self
    }

    /// Serve a different catalog, e.g. a reduced one for demos.
    pub fn catalog(mut self, catalog: &'static MineralCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Initial selection; wins over the configured default.
    pub fn default_mineral(mut self, mineral_id: impl Into<String>) -> Self {
        self.default_mineral = Some(mineral_id.into());
        self
    }

    /// Center on the first marker instead of fitting all markers.
    pub fn disable_fit(mut self) -> Self {
        self.fit_to_markers = false;
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_selector(mut self) -> Self {
        self.enable_selector = false;
        self
    }

    pub fn disable_inspector(mut self) -> Self {
        self.enable_inspector = false;
        self
    }

    pub fn disable_hud(mut self) -> Self {
        self.enable_hud = false;
        self
    }

    pub fn disable_graticule(mut self) -> Self {
        self.enable_graticule = false;
        self
    }

    /// Final view options after applying builder overrides.
    pub fn view_options(&self) -> ViewOptions {
        let mut options = self.options.clone().unwrap_or_default();
        if let Some(id) = &self.default_mineral {
            options.default_mineral = id.clone();
        }
        options.fit_to_markers &= self.fit_to_markers;
        options
    }

    /// Synchronizer for the configured catalog and options.
    pub fn sync<H>(&self) -> MarkerViewSync<H> {
        MarkerViewSync::new(self.catalog, self.view_options())
    }

    /// Mount the selection on a [`RecordingMap`] sized like the window and
    /// capture the result. The view is released before returning.
    pub fn export_report(&self) -> ExportReport {
        let mut sync = self.sync::<usize>();
        let (width, height) = self.window_resolution;
        let mut map = RecordingMap::new(sync.options().fit_to_markers)
            .with_viewport(DVec2::new(width as f64, height as f64));

        let view = MapView::mount(&mut sync, &mut map);
        info!(mineral = %view.sync().selected(), "exporting marker set");
        let report = ExportReport {
            mineral: view.sync().selected().to_string(),
            known: view.sync().selected_mineral().is_some(),
            markers: view.map().markers().to_vec(),
            view: view.map().view().cloned(),
            tile_layer: view.map().tile_layer().cloned(),
        };
        drop(view);
        report
    }

    /// Build the Bevy app with the selected configuration and plugins.
    pub fn build(self) -> App {
        if let Err(err) = self.catalog.validate() {
            error!("mineral catalog is inconsistent: {err}");
        }
        let view = MineralView(self.sync());

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(view)
        .add_plugins((marker_plugin, picking_plugin));

        if self.enable_selector {
            app.add_plugins(selector_plugin);
        }
        if self.enable_inspector {
            app.add_plugins(inspector_plugin);
        }
        if self.enable_hud {
            app.add_plugins(hud_plugin);
        }
        if self.enable_graticule {
            app.add_plugins(graticule_plugin);
        }

        app
    }
}
