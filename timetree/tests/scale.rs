use timetree::{
    AxisPosition, BandScale, EventRecord, Geometry, LinearScale, Margin, Options, Tree, Width,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn fixture_tree() -> Tree {
    Tree::build(&[
        EventRecord::new("One", 0.0, 1000.0),
        EventRecord::new("Two", 200.0, 600.0),
        EventRecord::new("Three", 100.0, 400.0).parent(0),
        EventRecord::new("Four", 500.0, 900.0),
        EventRecord::new("Five", 1000.0, 1500.0),
        EventRecord::new("Six", 150.0, 300.0).parent(2),
        EventRecord::new("Seven", 300.0, 2500.0).parent(2),
        EventRecord::new("Eight", 1200.0, 1800.0),
        EventRecord::new("Nine", 1300.0, 2000.0).parent(7),
    ])
    .unwrap()
}

// ============================================================================
// Linear Scale
// ============================================================================

#[test]
fn test_linear_scale_maps_and_inverts() {
    let scale = LinearScale::new([1000.0, 2000.0], [0.0, 500.0]);
    assert!(approx(scale.scale(1500.0), 250.0));
    assert!(approx(scale.invert(100.0), 1200.0));
}

#[test]
fn test_clamped_scale_pins_both_directions() {
    let scale = LinearScale::new([0.0, 100.0], [0.0, 500.0]).clamped(true);
    assert_eq!(scale.scale(-10.0), 0.0);
    assert_eq!(scale.scale(250.0), 500.0);
    assert_eq!(scale.invert(600.0), 100.0);
    assert_eq!(scale.invert(-1.0), 0.0);

    let free = LinearScale::new([0.0, 100.0], [0.0, 500.0]);
    assert!(approx(free.scale(200.0), 1000.0));
}

#[test]
fn test_zero_span_domain_maps_to_range_start() {
    let scale = LinearScale::new([5.0, 5.0], [10.0, 90.0]).clamped(true);
    assert_eq!(scale.scale(5.0), 10.0);
    assert_eq!(scale.scale(7.0), 10.0);
}

#[test]
fn test_ticks_are_round_and_inside_domain() {
    let scale = LinearScale::new([0.0, 2500.0], [0.0, 550.0]);
    assert_eq!(scale.ticks(5), vec![0.0, 500.0, 1000.0, 1500.0, 2000.0, 2500.0]);

    let scale = LinearScale::new([130.0, 970.0], [0.0, 1.0]);
    assert_eq!(scale.ticks(5), vec![200.0, 400.0, 600.0, 800.0]);
}

#[test]
fn test_ticks_for_degenerate_domain() {
    assert_eq!(LinearScale::new([3.0, 3.0], [0.0, 1.0]).ticks(5), vec![3.0]);
    assert!(LinearScale::new([0.0, 1.0], [0.0, 1.0]).ticks(0).is_empty());
}

// ============================================================================
// Band Scale
// ============================================================================

#[test]
fn test_round_bands_with_row_padding() {
    // 9 rows of 15px with 10px spacing.
    let band = BandScale::round_bands(9, [0.0, 225.0], 0.4, 0.2);
    assert_eq!(band.step(), 25.0);
    assert_eq!(band.bandwidth(), 15.0);
    assert_eq!(band.position(0), 5.0);
    assert_eq!(band.position(8), 205.0);
    assert_eq!(band.center(1), 37.5);
}

#[test]
fn test_round_bands_floor_step_and_center_leftover() {
    let band = BandScale::round_bands(3, [0.0, 100.0], 0.0, 0.0);
    assert_eq!(band.step(), 33.0);
    assert_eq!(band.bandwidth(), 33.0);
    assert_eq!(band.position(0), 1.0);
}

#[test]
fn test_band_index_at() {
    let band = BandScale::round_bands(4, [0.0, 100.0], 0.0, 0.0);
    assert_eq!(band.index_at(0.0), Some(0));
    assert_eq!(band.index_at(24.9), Some(0));
    assert_eq!(band.index_at(25.0), Some(1));
    assert_eq!(band.index_at(100.0), None);
    assert_eq!(band.index_at(-1.0), None);
}

#[test]
fn test_empty_band_scale() {
    let band = BandScale::round_bands(0, [0.0, 0.0], 0.4, 0.2);
    assert_eq!(band.count(), 0);
    assert_eq!(band.index_at(0.0), None);
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_default_geometry_for_fixture() {
    let geometry = Geometry::compute(&Options::default(), &fixture_tree(), 0.0);
    assert_eq!(geometry.width, 750.0);
    assert_eq!(geometry.content_width, 550.0);
    assert_eq!(geometry.bars_width, 550.0);
    assert_eq!(geometry.row_count, 9);
    assert_eq!(geometry.bars_height, 225.0);
    assert_eq!(geometry.content_height, 225.0);
    assert_eq!(geometry.height, 245.0);
    assert_eq!(geometry.content_top, 0.0);
    assert_eq!(geometry.axis_top, 225.0);
    assert_eq!(geometry.row.bandwidth(), 15.0);
    assert_eq!(geometry.full_row.bandwidth(), 25.0);

    let time = geometry.time.unwrap();
    assert_eq!(time.domain(), [0.0, 2500.0]);
    assert_eq!(time.range(), [0.0, 550.0]);
}

#[test]
fn test_width_clamps_to_minimum() {
    let options = Options::default().width(Width::Fixed(120.0));
    let geometry = Geometry::compute(&options, &fixture_tree(), 0.0);
    assert_eq!(geometry.min_width, 300.0);
    assert_eq!(geometry.width, 300.0);
    assert_eq!(geometry.bars_width, 100.0);
}

#[test]
fn test_auto_width_follows_container() {
    let options = Options::default().width(Width::Auto);
    let geometry = Geometry::compute(&options, &fixture_tree(), 1000.0);
    assert_eq!(geometry.width, 1000.0);
    let geometry = Geometry::compute(&options, &fixture_tree(), 10.0);
    assert_eq!(geometry.width, 300.0);
}

#[test]
fn test_margins_shrink_bars_and_grow_content() {
    let options = Options::default().content_margin(Margin::new(5.0, 20.0, 5.0, 30.0));
    let geometry = Geometry::compute(&options, &fixture_tree(), 0.0);
    assert_eq!(geometry.bars_width, 500.0);
    assert_eq!(geometry.content_height, 235.0);
    assert_eq!(geometry.time.unwrap().range(), [0.0, 500.0]);
}

#[test]
fn test_axis_on_top_pushes_content_down() {
    let options = Options::default().axis_position(AxisPosition::Top);
    let geometry = Geometry::compute(&options, &fixture_tree(), 0.0);
    assert_eq!(geometry.content_top, 20.0);
    assert_eq!(geometry.axis_top, 20.0);
}

#[test]
fn test_range_override_replaces_extent() {
    let options = Options::default().range([-500.0, 500.0]);
    let geometry = Geometry::compute(&options, &fixture_tree(), 0.0);
    assert_eq!(geometry.time.unwrap().domain(), [-500.0, 500.0]);
}

#[test]
fn test_resize_on_collapse_counts_visible_rows() {
    let mut tree = fixture_tree();
    tree.toggle(0);
    let fixed = Geometry::compute(&Options::default(), &tree, 0.0);
    assert_eq!(fixed.row_count, 9);

    let options = Options::default().resize_on_collapse(true);
    let resized = Geometry::compute(&options, &tree, 0.0);
    assert_eq!(resized.row_count, tree.visible_count());
}

#[test]
fn test_geometry_of_empty_tree_has_no_time_scale() {
    let geometry = Geometry::compute(&Options::default(), &Tree::default(), 0.0);
    assert!(geometry.time.is_none());
    assert_eq!(geometry.row_count, 0);
    assert_eq!(geometry.content_height, 0.0);
}

#[test]
fn test_geometry_is_idempotent() {
    let tree = fixture_tree();
    let options = Options::default();
    assert_eq!(
        Geometry::compute(&options, &tree, 640.0),
        Geometry::compute(&options, &tree, 640.0)
    );
}
