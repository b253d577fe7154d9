use timetree::{Element, EventRecord, Layer, Length, PointerEvent, Scene, TextAnchor, TimeTree, Width};
use timetree_term::buffer::Buffer;
use timetree_term::raster::{self, cell_center};
use timetree_term::{colors, config};

fn records() -> Vec<EventRecord> {
    vec![
        EventRecord::new("Alpha", 0.0, 1000.0),
        EventRecord::new("Beta", 200.0, 600.0).parent(0),
        EventRecord::new("Gamma", 500.0, 900.0),
    ]
}

/// 80 columns: a 20-column label area and 60 columns of bars.
fn widget() -> TimeTree {
    let records = records();
    let options = config::for_terminal(config::defaults().width(Width::Fixed(640.0)), &records);
    let mut tt = TimeTree::new(options);
    tt.set_content(records);
    tt.update().unwrap();
    tt
}

fn draw(tt: &TimeTree) -> Buffer {
    let mut buffer = Buffer::new(80, 6);
    raster::draw(tt.scene(), &mut buffer);
    buffer
}

fn click(tt: &mut TimeTree, col: u16, row: u16) {
    let (x, y) = cell_center(col, row);
    tt.handle_pointer(PointerEvent::Click { x, y });
}

// ============================================================================
// Labels and links
// ============================================================================

#[test]
fn test_labels_follow_their_circles() {
    let buffer = draw(&widget());
    assert!(buffer.row_text(0).starts_with("  ▾Alpha"), "{:?}", buffer.row_text(0));
    assert!(buffer.row_text(2).starts_with("  •Gamma"), "{:?}", buffer.row_text(2));
}

#[test]
fn test_link_runs_from_parent_to_child() {
    let buffer = draw(&widget());
    assert!(buffer.row_text(1).starts_with("  └─•Beta"), "{:?}", buffer.row_text(1));
}

#[test]
fn test_collapsed_node_shows_closed_marker() {
    let mut tt = widget();
    click(&mut tt, 2, 0);
    let buffer = draw(&tt);
    assert!(buffer.row_text(0).starts_with("  ▸Alpha"), "{:?}", buffer.row_text(0));
    assert!(buffer.row_text(1).starts_with("  •Gamma"), "{:?}", buffer.row_text(1));
}

// ============================================================================
// Bars and rows
// ============================================================================

#[test]
fn test_bar_fills_its_cells() {
    let buffer = draw(&widget());
    // The scrubber rests at the left edge, crossing Alpha's bar only.
    assert_eq!(buffer.get(40, 0).unwrap().bg, colors::bar("", false, true));
    // Gamma spans 500..900ms: columns 50 to 74.
    assert_eq!(buffer.get(55, 2).unwrap().bg, colors::bar("", false, false));
    assert_eq!(buffer.get(45, 2).unwrap().bg, colors::ROW);
    assert_eq!(buffer.get(76, 2).unwrap().bg, colors::ROW);
}

#[test]
fn test_duration_label_sits_on_bar() {
    let buffer = draw(&widget());
    assert_eq!(buffer.get(20, 0).unwrap().char, '1');
    assert!(buffer.row_text(0).contains("1000ms"), "{:?}", buffer.row_text(0));
}

#[test]
fn test_selected_row_is_highlighted() {
    let mut tt = widget();
    click(&mut tt, 10, 1);
    let buffer = draw(&tt);
    assert_eq!(buffer.get(0, 1).unwrap().bg, colors::ROW_SELECTED);
    assert_eq!(buffer.get(0, 0).unwrap().bg, colors::ROW);
}

// ============================================================================
// Axis
// ============================================================================

#[test]
fn test_axis_ticks_and_labels() {
    let buffer = draw(&widget());
    // Domain along row 3, a tick every 200ms (96px, 12 columns).
    assert_eq!(buffer.get(32, 3).unwrap().char, '┬');
    assert_eq!(buffer.get(26, 3).unwrap().char, '─');
    let labels = buffer.row_text(4);
    assert!(labels.contains("0ms"), "{labels:?}");
    assert!(labels.contains("200ms"), "{labels:?}");
}

// ============================================================================
// Robustness
// ============================================================================

#[test]
fn test_unparseable_transform_draws_at_parent_origin() {
    let mut scene = Scene::new();
    let mut group = Element::group().child(Element::text("hi").with_text_layout(
        0.0,
        0.0,
        0.0,
        Length::Px(0.0),
        TextAnchor::Start,
    ));
    group.transform = Some("rotate(45)".to_string());
    scene.layer_mut(Layer::Labels).children.push(group);

    let mut buffer = Buffer::new(4, 1);
    raster::draw(&scene, &mut buffer);
    assert_eq!(buffer.row_text(0), "hi  ");
}

#[test]
fn test_drawing_clips_to_buffer() {
    let mut buffer = Buffer::new(10, 2);
    raster::draw(widget().scene(), &mut buffer);
    assert_eq!(buffer.width(), 10);
    assert!(buffer.row_text(0).starts_with("  ▾Alpha"));
}
