use tokio::sync::watch;

use timetree::{
    EventRecord, Layer, Notification, Options, PointerEvent, RecordId, TimeTree, TreeError, Width,
};

fn fixture() -> Vec<EventRecord> {
    vec![
        EventRecord::new("One", 0.0, 1000.0),
        EventRecord::new("Two", 200.0, 600.0),
        EventRecord::new("Three", 100.0, 400.0).parent(0),
        EventRecord::new("Four", 500.0, 900.0),
        EventRecord::new("Five", 1000.0, 1500.0),
        EventRecord::new("Six", 150.0, 300.0).parent(2),
        EventRecord::new("Seven", 300.0, 2500.0).parent(2),
        EventRecord::new("Eight", 1200.0, 1800.0),
        EventRecord::new("Nine", 1300.0, 2000.0).parent(7),
    ]
}

fn cyclic() -> Vec<EventRecord> {
    vec![
        EventRecord::new("a", 0.0, 1.0).parent(1),
        EventRecord::new("b", 0.0, 1.0).parent(0),
    ]
}

fn rendered(options: Options) -> TimeTree {
    let mut tt = TimeTree::new(options);
    tt.set_content(fixture());
    tt.update().unwrap();
    tt
}

// ============================================================================
// Update
// ============================================================================

#[test]
fn test_setters_coalesce_into_one_render() {
    let mut tt = TimeTree::default();
    tt.set_content(fixture());
    tt.set_row_height(20.0);
    tt.set_row_spacing(5.0);
    tt.set_width(Width::Fixed(900.0));
    tt.set_show_links(false);
    assert!(tt.is_dirty());
    assert_eq!(tt.render_count(), 0);

    assert!(tt.update().unwrap());
    assert_eq!(tt.render_count(), 1);
    assert_eq!(tt.geometry().width, 900.0);
    assert_eq!(tt.scene().select_all("bar").len(), 9);
}

#[test]
fn test_update_without_changes_does_nothing() {
    let mut tt = rendered(Options::default());
    assert!(!tt.is_dirty());
    assert!(!tt.update().unwrap());
    assert!(!tt.update().unwrap());
    assert_eq!(tt.render_count(), 1);
}

#[test]
fn test_recompute_with_same_inputs_is_idempotent() {
    let mut tt = rendered(Options::default());
    let geometry = tt.geometry().clone();
    let svg = tt.to_svg();

    tt.set_row_height(15.0);
    assert!(tt.update().unwrap());
    assert_eq!(tt.geometry(), &geometry);
    assert_eq!(tt.to_svg(), svg);
}

#[test]
fn test_first_update_renders_empty_scene() {
    let mut tt = TimeTree::default();
    assert!(tt.update().unwrap());
    assert_eq!(tt.render_count(), 1);
    assert!(tt.scene().select_all("bar").is_empty());
}

#[test]
fn test_update_reports_render() {
    let mut tt = rendered(Options::default());
    assert_eq!(
        tt.drain_notifications(),
        vec![Notification::Rendered { nodes: 9 }]
    );
    assert_eq!(tt.last_report().bars.entered, 9);
    assert!(tt.drain_notifications().is_empty());
}

// ============================================================================
// Content
// ============================================================================

#[test]
fn test_empty_content_clears_everything() {
    let mut tt = rendered(Options::default());
    tt.set_content(Vec::new());
    assert!(tt.update().unwrap());

    let scene = tt.scene();
    assert!(scene.select_all("bar").is_empty());
    assert!(scene.select_all("row").is_empty());
    assert!(scene.select_all("label").is_empty());
    assert!(scene.select_all("tick").is_empty());
    assert!(scene.layer(Layer::Axis).children.is_empty());
}

#[test]
fn test_cycle_error_keeps_previous_scene() {
    let mut tt = rendered(Options::default());
    let svg = tt.to_svg();

    tt.set_content(cyclic());
    assert!(matches!(tt.update(), Err(TreeError::CycleDetected { .. })));
    assert_eq!(tt.to_svg(), svg);
    assert_eq!(tt.render_count(), 1);
    // Still pending, so it fails the same way again.
    assert!(matches!(tt.update(), Err(TreeError::CycleDetected { .. })));

    tt.set_content(fixture());
    assert!(tt.update().unwrap());
}

#[test]
fn test_new_content_expands_everything() {
    let mut tt = rendered(Options::default());
    assert!(tt.toggle(&RecordId::Int(0)));
    assert!(tt.tree().nodes()[0].children.is_collapsed());

    tt.set_content(fixture());
    tt.update().unwrap();
    assert!(!tt.tree().nodes()[0].children.is_collapsed());
    assert_eq!(tt.scene().select_all("label").len(), 9);
}

#[test]
fn test_toggle_by_id() {
    let mut tt = rendered(Options::default());
    let renders = tt.render_count();
    assert!(tt.toggle(&RecordId::Int(2)));
    assert_eq!(tt.render_count(), renders + 1);
    assert_eq!(tt.scene().select_all("label").len(), 7);
    assert!(!tt.toggle(&RecordId::Int(1)));
    assert!(!tt.toggle(&RecordId::from("missing")));
    assert_eq!(tt.render_count(), renders + 1);
}

// ============================================================================
// Container width
// ============================================================================

#[test]
fn test_auto_width_follows_attached_container() {
    let (tx, rx) = watch::channel(640.0);
    let mut tt = TimeTree::new(Options::default().width(Width::Auto));
    tt.set_content(fixture());
    tt.attach(rx);
    tt.update().unwrap();
    assert_eq!(tt.geometry().width, 640.0);

    tx.send(900.0).unwrap();
    assert!(tt.update().unwrap());
    assert_eq!(tt.geometry().width, 900.0);
    assert!(!tt.update().unwrap());
}

#[test]
fn test_same_width_does_not_rerender() {
    let (tx, rx) = watch::channel(640.0);
    let mut tt = TimeTree::new(Options::default().width(Width::Auto));
    tt.attach(rx);
    tt.update().unwrap();
    tx.send(640.0).unwrap();
    assert!(!tt.update().unwrap());
}

#[test]
fn test_fixed_width_ignores_container() {
    let (tx, rx) = watch::channel(640.0);
    let mut tt = rendered(Options::default());
    tt.attach(rx);
    tt.update().unwrap();
    assert_eq!(tt.geometry().width, 750.0);

    tx.send(1200.0).unwrap();
    assert!(!tt.update().unwrap());
    assert_eq!(tt.container_width(), 1200.0);
}

#[test]
fn test_detach_stops_following() {
    let (tx, rx) = watch::channel(640.0);
    let mut tt = TimeTree::new(Options::default().width(Width::Auto));
    tt.attach(rx);
    tt.update().unwrap();

    tt.detach();
    // No receivers left, so the send fails.
    assert!(tx.send(1000.0).is_err());
    assert!(!tt.update().unwrap());
    assert_eq!(tt.geometry().width, 640.0);
}

#[test]
fn test_dropped_sender_keeps_last_width() {
    let (tx, rx) = watch::channel(640.0);
    let mut tt = TimeTree::new(Options::default().width(Width::Auto));
    tt.attach(rx);
    tt.update().unwrap();
    drop(tx);
    assert!(!tt.update().unwrap());
    assert_eq!(tt.geometry().width, 640.0);
}

// ============================================================================
// Pointer routing
// ============================================================================

#[test]
fn test_pointer_events_do_not_render() {
    let mut tt = rendered(Options::default());
    assert!(!tt.handle_pointer(PointerEvent::Move { x: 310.0, y: 30.0 }));
    assert!(!tt.handle_pointer(PointerEvent::Click { x: 310.0, y: 30.0 }));
    assert_eq!(tt.render_count(), 1);
    assert!(!tt.is_dirty());
}

#[test]
fn test_toggle_render_consumes_pending_layout() {
    let mut tt = rendered(Options::default());
    let height = tt.geometry().content_height;
    tt.set_row_height(30.0);

    // One's circle, still at its old position.
    assert!(tt.handle_pointer(PointerEvent::Click { x: 20.0, y: 12.5 }));
    assert_eq!(tt.render_count(), 2);
    assert!(tt.geometry().content_height > height);
    assert!(!tt.is_dirty());

    assert!(!tt.update().unwrap());
    assert_eq!(tt.render_count(), 2);
}

#[test]
fn test_toggle_leaves_content_rebuild_pending() {
    let mut tt = rendered(Options::default());
    tt.set_content(fixture());
    assert!(tt.toggle(&RecordId::Int(0)));
    assert!(tt.is_dirty());
    assert!(tt.update().unwrap());
    assert!(!tt.tree().nodes()[0].children.is_collapsed());
}
