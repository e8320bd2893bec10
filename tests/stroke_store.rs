use egui::{Color32, Pos2};
use paint_canvas::{Point, StrokeEvent, StrokeStore};

// What the browser version of the app wrote to localStorage: sizes below ten
// were zero-padded strings, colours sometimes lacked the '#', and mouse
// movement between strokes produced empty records.
const BROWSER_SAVE: &str = r##"[
    {},
    {"x": 12, "y": 30, "size": 10, "color": "#A51DAB", "erase": false},
    {"x": 14.5, "y": 31, "size": 10, "color": "#A51DAB", "erase": false},
    {},
    {"x": 40, "y": 8, "size": "05", "color": "1d4fab", "erase": false},
    {"x": 41, "y": 9, "size": 50, "color": "#FFFFFF", "erase": true}
]"##;

#[test]
fn test_loads_browser_save() {
    let mut store = StrokeStore::new();
    store.deserialize(BROWSER_SAVE).unwrap();

    assert_eq!(store.len(), 6);
    assert!(store.events()[0].is_gap());
    assert!(store.events()[3].is_gap());
    assert_eq!(
        store.events()[4],
        StrokeEvent::Point(Point::new(Pos2::new(40.0, 8.0), 5.0, Color32::from_rgb(0x1D, 0x4F, 0xAB), false))
    );
    assert!(store.events()[5].as_point().unwrap().is_eraser);
}

#[test]
fn test_roundtrip_preserves_sequence() {
    let mut store = StrokeStore::new();
    store.deserialize(BROWSER_SAVE).unwrap();

    let text = store.serialize().unwrap();
    let mut restored = StrokeStore::new();
    restored.deserialize(&text).unwrap();

    assert_eq!(restored, store);
}

#[test]
fn test_failed_deserialize_keeps_existing_strokes() {
    let mut store = StrokeStore::new();
    store.deserialize(BROWSER_SAVE).unwrap();
    let before = store.clone();

    assert!(store.deserialize("").is_err());
    assert!(store.deserialize("{\"x\": 1}").is_err());
    assert!(store.deserialize("\"drawnArray\"").is_err());

    assert_eq!(store, before);
}

#[test]
fn test_deserialize_replaces_rather_than_appends() {
    let mut store = StrokeStore::new();
    store.append(StrokeEvent::Gap);
    store.append(StrokeEvent::Gap);

    store.deserialize("[]").unwrap();
    assert!(store.is_empty());
}
