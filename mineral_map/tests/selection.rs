use mineral_map::geo::LatLng;
use mineral_map::prelude::*;
use mineral_map::render::MapCommand;

fn sync(fit: bool) -> MarkerViewSync<usize> {
    MarkerViewSync::new(
        catalog(),
        ViewOptions {
            fit_to_markers: fit,
            ..ViewOptions::default()
        },
    )
}

fn names(map: &RecordingMap) -> Vec<&'static str> {
    map.markers().iter().map(|m| m.popup.name).collect()
}

#[test]
fn every_mineral_shows_its_mines_in_catalog_order() {
    let mut sync = sync(true);
    let mut map = RecordingMap::new(true);
    let mut view = MapView::mount(&mut sync, &mut map);

    for mineral in catalog().minerals() {
        let expected: Vec<_> = catalog()
            .mines()
            .iter()
            .filter(|m| m.mineral_id == mineral.id)
            .map(|m| m.name)
            .collect();
        view.select(mineral.id);
        assert!(!expected.is_empty(), "{} has no mines", mineral.id);
        assert_eq!(names(view.map()), expected);
    }
}

#[test]
fn aluminum_includes_nalco() {
    let mut sync = sync(true);
    let mut map = RecordingMap::new(true);
    let view = MapView::mount(&mut sync, &mut map);

    let markers = view.map().markers();
    assert_eq!(markers.len(), 4);
    let nalco = markers
        .iter()
        .find(|m| m.popup.name == "NALCO Mines")
        .unwrap();
    assert_eq!(nalco.position, LatLng::new(20.9517, 85.0985));
    assert_eq!(nalco.popup.region_line(), "Odisha, India");
}

#[test]
fn lithium_regions() {
    let mut sync = sync(true);
    let mut map = RecordingMap::new(true);
    let mut view = MapView::mount(&mut sync, &mut map);

    let regions: Vec<_> = view.select("lithium").iter().map(|m| m.region).collect();
    assert_eq!(regions, ["Karnataka", "Jammu & Kashmir"]);
    assert_eq!(view.map().markers().len(), 2);
}

#[test]
fn unknown_mineral_shows_nothing_at_default_center() {
    let mut sync = sync(true);
    let mut map = RecordingMap::new(true);
    let mut view = MapView::mount(&mut sync, &mut map);

    assert!(view.select("unknown-id").is_empty());
    assert!(view.map().markers().is_empty());
    let snapshot = view.map().view().unwrap();
    assert_eq!(snapshot.center, LatLng::new(20.5937, 78.9629));
    assert_eq!(snapshot.zoom, 4.5);
    assert!(snapshot.fitted.is_none());
}

#[test]
fn reselecting_does_not_duplicate_markers() {
    let mut sync = sync(true);
    let mut map = RecordingMap::new(true);
    let mut view = MapView::mount(&mut sync, &mut map);

    view.select("copper");
    view.select("copper");
    assert_eq!(view.map().markers().len(), 3);
}

#[test]
fn switching_back_restores_the_first_set() {
    let mut sync = sync(true);
    let mut map = RecordingMap::new(true);
    let mut view = MapView::mount(&mut sync, &mut map);

    view.select("gold");
    let first = names(view.map());
    view.select("silver");
    assert_ne!(names(view.map()), first);
    view.select("gold");
    assert_eq!(names(view.map()), first);
}

#[test]
fn fit_covers_every_visible_marker() {
    let mut sync = sync(true);
    let mut map = RecordingMap::new(true);
    let mut view = MapView::mount(&mut sync, &mut map);

    view.select("steel");
    let bounds = view.map().view().and_then(|v| v.fitted).unwrap();
    for marker in view.map().markers() {
        assert!(bounds.contains(marker.position));
    }
}

#[test]
fn without_fit_centers_on_first_marker() {
    let mut sync = sync(false);
    let mut map = RecordingMap::new(true);
    let mut view = MapView::mount(&mut sync, &mut map);

    view.select("copper");
    let snapshot = view.map().view().unwrap();
    assert_eq!(snapshot.center, LatLng::new(28.0, 75.8));
    assert_eq!(snapshot.zoom, 5.0);
}

#[test]
fn dropping_the_guard_releases_the_view() {
    let mut sync = sync(true);
    let mut map = RecordingMap::new(true);
    {
        let mut view = MapView::mount(&mut sync, &mut map);
        view.select("gold");
    }

    assert_eq!(sync.state(), ViewState::Uninitialized);
    assert_eq!(sync.rendered_count(), 0);
    assert!(map.markers().is_empty());
    assert!(map.view().is_none());
    assert_eq!(map.commands().last(), Some(&MapCommand::DestroyView));
}

#[test]
fn export_is_valid_json() {
    let mut sync = sync(true);
    let mut map = RecordingMap::new(true);
    let view = MapView::mount(&mut sync, &mut map);

    let json: serde_json::Value = serde_json::from_str(&view.map().to_json().unwrap()).unwrap();
    assert_eq!(json["markers"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["markers"][0]["popup"]["name"], "NALCO Mines");
}
