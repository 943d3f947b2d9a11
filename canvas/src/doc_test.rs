#![allow(clippy::float_cmp)]

use super::*;

fn make_element(kind: ElementKind) -> DesignElement {
    DesignElement::new(kind, "", 0.0, 0.0, 100.0, 80.0)
}

fn make_path(points: &[(f64, f64)]) -> DesignElement {
    let mut el = DesignElement::new(ElementKind::Path, "Path", 0.0, 0.0, 10.0, 10.0);
    el.path = Some(points.iter().map(|&(x, y)| Point::new(x, y)).collect());
    el
}

// =============================================================
// ElementKind / ShapeKind
// =============================================================

#[test]
fn kind_serde_all_variants() {
    let cases = [
        (ElementKind::Image, "\"image\""),
        (ElementKind::Text, "\"text\""),
        (ElementKind::Shape, "\"shape\""),
        (ElementKind::Path, "\"path\""),
    ];
    for (kind, expected) in cases {
        assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
        let back: ElementKind = serde_json::from_str(expected).unwrap();
        assert_eq!(back, kind);
    }
}

#[test]
fn kind_rejects_unknown() {
    assert!(serde_json::from_str::<ElementKind>("\"video\"").is_err());
}

#[test]
fn shape_kind_tags() {
    for shape in [ShapeKind::Rectangle, ShapeKind::Circle, ShapeKind::Triangle] {
        assert_eq!(ShapeKind::parse(shape.as_str()), Some(shape));
    }
    assert_eq!(ShapeKind::parse("hexagon"), None);
}

#[test]
fn shape_kind_only_for_shapes() {
    let mut el = make_element(ElementKind::Shape);
    el.content = "circle".into();
    assert_eq!(el.shape_kind(), Some(ShapeKind::Circle));

    let mut text = make_element(ElementKind::Text);
    text.content = "circle".into();
    assert_eq!(text.shape_kind(), None);
}

// =============================================================
// DesignElement
// =============================================================

#[test]
fn new_element_is_unlocked_and_unrotated() {
    let el = DesignElement::new(ElementKind::Text, "hello", 5.0, 6.0, 120.0, 40.0);
    assert!(!el.locked);
    assert_eq!(el.rotation, 0.0);
    assert!(el.path.is_none());
    assert_eq!(el.content, "hello");
}

#[test]
fn new_ids_are_unique() {
    let a = new_element_id();
    let b = new_element_id();
    assert_ne!(a, b);
    assert_eq!(a.get_version_num(), 7);
}

#[test]
fn center_is_box_midpoint() {
    let el = DesignElement::new(ElementKind::Shape, "rectangle", 10.0, 20.0, 100.0, 40.0);
    assert_eq!(el.center(), Point::new(60.0, 40.0));
}

#[test]
fn element_serde_omits_absent_path() {
    let el = make_element(ElementKind::Text);
    let json = serde_json::to_value(&el).unwrap();
    assert!(json.get("path").is_none());
    assert_eq!(json["kind"], "text");
    assert_eq!(json["locked"], false);
}

#[test]
fn element_serde_keeps_path_anchors() {
    let el = make_path(&[(1.0, 2.0), (3.0, 4.0)]);
    let json = serde_json::to_string(&el).unwrap();
    let back: DesignElement = serde_json::from_str(&json).unwrap();
    assert_eq!(back, el);
}

// =============================================================
// PartialElement
// =============================================================

#[test]
fn partial_default_is_empty() {
    assert!(PartialElement::default().is_empty());
    assert!(!PartialElement { x: Some(1.0), ..Default::default() }.is_empty());
}

#[test]
fn partial_serializes_only_present_fields() {
    let partial = PartialElement { rotation: Some(90.0), ..Default::default() };
    let json = serde_json::to_value(&partial).unwrap();
    assert_eq!(json, serde_json::json!({ "rotation": 90.0 }));
}

// =============================================================
// path_bounds
// =============================================================

#[test]
fn path_bounds_empty_is_none() {
    assert!(path_bounds(&[]).is_none());
}

#[test]
fn path_bounds_single_point() {
    let (min, max) = path_bounds(&[Point::new(4.0, 5.0)]).unwrap();
    assert_eq!(min, Point::new(4.0, 5.0));
    assert_eq!(max, Point::new(4.0, 5.0));
}

#[test]
fn path_bounds_is_per_axis_min_max() {
    let points = [Point::new(10.0, 10.0), Point::new(30.0, 10.0), Point::new(30.0, 40.0), Point::new(-5.0, 25.0)];
    let (min, max) = path_bounds(&points).unwrap();
    assert_eq!(min, Point::new(-5.0, 10.0));
    assert_eq!(max, Point::new(30.0, 40.0));
}

// =============================================================
// DocStore
// =============================================================

#[test]
fn store_starts_empty() {
    let store = DocStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.ordered().is_empty());
}

#[test]
fn insert_and_get() {
    let mut store = DocStore::new();
    let el = make_element(ElementKind::Shape);
    let id = el.id;
    store.insert(el);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&id).map(|e| e.id), Some(id));
}

#[test]
fn ordered_follows_insertion() {
    let mut store = DocStore::new();
    let a = make_element(ElementKind::Shape);
    let b = make_element(ElementKind::Text);
    let c = make_element(ElementKind::Image);
    let ids = [a.id, b.id, c.id];
    store.insert(a);
    store.insert(b);
    store.insert(c);
    let ordered: Vec<_> = store.ordered().iter().map(|e| e.id).collect();
    assert_eq!(ordered, ids);
    assert_eq!(store.ids(), &ids);
}

#[test]
fn replacing_keeps_position() {
    let mut store = DocStore::new();
    let a = make_element(ElementKind::Shape);
    let b = make_element(ElementKind::Text);
    let (a_id, b_id) = (a.id, b.id);
    let mut a_changed = a.clone();
    store.insert(a);
    store.insert(b);
    a_changed.x = 99.0;
    store.insert(a_changed);
    assert_eq!(store.len(), 2);
    assert_eq!(store.ids(), &[a_id, b_id]);
    assert_eq!(store.get(&a_id).map(|e| e.x), Some(99.0));
}

#[test]
fn remove_returns_element_and_drops_from_order() {
    let mut store = DocStore::new();
    let a = make_element(ElementKind::Shape);
    let b = make_element(ElementKind::Text);
    let (a_id, b_id) = (a.id, b.id);
    store.insert(a);
    store.insert(b);
    assert_eq!(store.remove(&a_id).map(|e| e.id), Some(a_id));
    assert_eq!(store.ids(), &[b_id]);
    assert!(store.remove(&a_id).is_none());
}

#[test]
fn apply_partial_missing_returns_false() {
    let mut store = DocStore::new();
    let partial = PartialElement { x: Some(1.0), ..Default::default() };
    assert!(!store.apply_partial(&new_element_id(), &partial));
}

#[test]
fn apply_partial_updates_present_fields_only() {
    let mut store = DocStore::new();
    let el = make_element(ElementKind::Text);
    let id = el.id;
    store.insert(el);
    let partial = PartialElement {
        x: Some(5.0),
        rotation: Some(45.0),
        content: Some("hi".into()),
        locked: Some(true),
        ..Default::default()
    };
    assert!(store.apply_partial(&id, &partial));
    let el = store.get(&id).unwrap();
    assert_eq!(el.x, 5.0);
    assert_eq!(el.y, 0.0);
    assert_eq!(el.width, 100.0);
    assert_eq!(el.rotation, 45.0);
    assert_eq!(el.content, "hi");
    assert!(el.locked);
}

#[test]
fn apply_partial_clamps_negative_size() {
    let mut store = DocStore::new();
    let el = make_element(ElementKind::Shape);
    let id = el.id;
    store.insert(el);
    store.apply_partial(&id, &PartialElement { width: Some(-5.0), height: Some(-1.0), ..Default::default() });
    let el = store.get(&id).unwrap();
    assert_eq!(el.width, 0.0);
    assert_eq!(el.height, 0.0);
}

#[test]
fn apply_partial_path_only_for_path_elements() {
    let mut store = DocStore::new();
    let shape = make_element(ElementKind::Shape);
    let path = make_path(&[(0.0, 0.0), (5.0, 5.0)]);
    let (shape_id, path_id) = (shape.id, path.id);
    store.insert(shape);
    store.insert(path);
    let anchors = vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
    let partial = PartialElement { path: Some(anchors.clone()), ..Default::default() };
    store.apply_partial(&shape_id, &partial);
    store.apply_partial(&path_id, &partial);
    assert!(store.get(&shape_id).unwrap().path.is_none());
    assert_eq!(store.get(&path_id).unwrap().path.as_deref(), Some(anchors.as_slice()));
}

#[test]
fn apply_partial_ignores_empty_path() {
    let mut store = DocStore::new();
    let path = make_path(&[(0.0, 0.0), (5.0, 5.0)]);
    let id = path.id;
    store.insert(path);
    store.apply_partial(&id, &PartialElement { path: Some(Vec::new()), ..Default::default() });
    assert_eq!(store.get(&id).unwrap().path.as_ref().map(Vec::len), Some(2));
}

#[test]
fn load_snapshot_replaces_everything() {
    let mut store = DocStore::new();
    store.insert(make_element(ElementKind::Shape));
    let a = make_element(ElementKind::Text);
    let b = make_element(ElementKind::Image);
    let ids = [a.id, b.id];
    store.load_snapshot(vec![a, b]);
    assert_eq!(store.len(), 2);
    assert_eq!(store.ids(), &ids);
}

#[test]
fn load_snapshot_clamps_and_drops_degenerate_elements() {
    let mut store = DocStore::new();
    let mut shape = make_element(ElementKind::Shape);
    shape.width = -5.0;
    shape.path = Some(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
    let shape_id = shape.id;
    let mut empty_path = make_path(&[]);
    empty_path.path = Some(Vec::new());
    let mut no_path = make_path(&[]);
    no_path.path = None;
    let single = make_path(&[(1.0, 1.0)]);
    let mut nan = make_element(ElementKind::Text);
    nan.x = f64::NAN;
    let good = make_path(&[(0.0, 0.0), (5.0, 5.0)]);
    let good_id = good.id;

    let dropped = store.load_snapshot(vec![shape, empty_path, no_path, single, nan, good]);
    assert_eq!(dropped, 4);
    assert_eq!(store.ids(), &[shape_id, good_id]);
    let shape = store.get(&shape_id).unwrap();
    assert_eq!(shape.width, 0.0);
    assert!(shape.path.is_none());
    assert_eq!(store.get(&good_id).unwrap().path.as_ref().map(Vec::len), Some(2));
}
