use timetree::{EventRecord, PointerEvent, Width};
use timetree_term::buffer::Buffer;
use timetree_term::input::Command;
use timetree_term::raster::cell_center;
use timetree_term::{config, App};

fn records() -> Vec<EventRecord> {
    vec![
        EventRecord::new("Alpha", 0.0, 1000.0),
        EventRecord::new("Beta", 200.0, 600.0).parent(0),
        EventRecord::new("Gamma", 500.0, 900.0),
    ]
}

fn app() -> App {
    let records = records();
    let options = config::for_terminal(config::defaults(), &records);
    let mut app = App::new(records, options);
    app.resize(80);
    app.update().unwrap();
    app
}

fn click(app: &mut App, col: u16, row: u16) {
    let (x, y) = cell_center(col, row);
    app.apply(Command::Pointer(PointerEvent::Click { x, y }));
}

// ============================================================================
// Container width
// ============================================================================

#[test]
fn test_terminal_columns_set_widget_width() {
    let mut app = app();
    assert_eq!(app.widget().geometry().width, 640.0);

    app.apply(Command::Resize {
        width: 100,
        height: 30,
    });
    app.update().unwrap();
    assert_eq!(app.widget().geometry().width, 800.0);
}

#[test]
fn test_fixed_width_ignores_terminal() {
    let records = records();
    let options = config::for_terminal(config::defaults().width(Width::Fixed(400.0)), &records);
    let mut app = App::new(records, options);
    app.resize(120);
    app.update().unwrap();
    assert_eq!(app.widget().geometry().width, 400.0);
}

// ============================================================================
// Status line
// ============================================================================

#[test]
fn test_selection_shows_in_status() {
    let mut app = app();
    click(&mut app, 10, 2);
    app.update().unwrap();
    assert_eq!(app.status(), "selected: Gamma");
}

#[test]
fn test_toggle_shows_in_status() {
    let mut app = app();
    click(&mut app, 2, 0);
    app.update().unwrap();
    assert_eq!(app.status(), "collapsed Alpha");

    click(&mut app, 2, 0);
    app.update().unwrap();
    assert_eq!(app.status(), "expanded Alpha");
}

#[test]
fn test_status_line_is_painted_last() {
    let app = app();
    let mut buffer = Buffer::new(80, 8);
    app.paint(&mut buffer);
    assert!(buffer.row_text(7).trim_start().starts_with("q quit"));
}

// ============================================================================
// Keys
// ============================================================================

#[test]
fn test_toggle_brushable() {
    let mut app = app();
    assert!(!app.widget().options().brushable);
    app.apply(Command::ToggleBrushable);
    app.update().unwrap();
    assert!(app.widget().options().brushable);
    assert!(app.widget().scene().brush().is_some());
    assert_eq!(app.status(), "brush on");
}

#[test]
fn test_brush_drag_reports_range() {
    let mut app = app();
    app.apply(Command::ToggleBrushable);
    app.update().unwrap();

    // Bars start at column 20.
    let (x0, y) = cell_center(30, 0);
    let (x1, _) = cell_center(50, 0);
    app.apply(Command::Pointer(PointerEvent::Down { x: x0, y }));
    app.apply(Command::Pointer(PointerEvent::Move { x: x1, y }));
    app.apply(Command::Pointer(PointerEvent::Up { x: x1, y }));
    app.update().unwrap();

    assert!(app.status().starts_with("brush: "), "{}", app.status());
    assert!(app.widget().brush_range().is_some());
}

#[test]
fn test_quit() {
    let mut app = app();
    assert!(app.is_running());
    app.apply(Command::Quit);
    assert!(!app.is_running());
}
