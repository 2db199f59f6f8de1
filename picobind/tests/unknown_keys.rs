// Keys without a declared field are consumed and dropped

use picobind::{from_str, record};

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Shape {
        name: String,
        origin: Point,
        tags: Vec<String>,
    }
}

fn shape(json: &str) -> Shape {
    from_str(json).unwrap().unwrap()
}

#[test]
fn test_unknown_scalars_skipped() {
    let s = shape(r#"{"color": "red", "name": "square", "sides": 4, "filled": true, "alpha": 0.5}"#);
    assert_eq!(s.name, "square");
}

#[test]
fn test_unknown_object_does_not_desync_siblings() {
    let s = shape(
        r#"{
            "style": {"stroke": {"width": 2, "dash": [1, 2, {"x": 9}]}, "name": "WRONG"},
            "name": "circle",
            "origin": {"x": 1, "meta": {"y": 100}, "y": 2}
        }"#,
    );
    assert_eq!(s.name, "circle");
    assert_eq!(s.origin, Point { x: 1, y: 2 });
}

#[test]
fn test_unknown_array_does_not_desync_siblings() {
    let s = shape(
        r#"{"history": [[{"name": "old"}], "name", {"tags": ["x"]}], "tags": ["a", "b"], "name": "tri"}"#,
    );
    assert_eq!(s.name, "tri");
    assert_eq!(s.tags, ["a", "b"]);
}

#[test]
fn test_string_value_is_never_a_key() {
    // "name" appears as a value of an unknown key; it must not become a key.
    let s = shape(r#"{"alias": "name", "name": "hexagon"}"#);
    assert_eq!(s.name, "hexagon");
}

#[test]
fn test_only_unknown_keys() {
    let s = shape(r#"{"a": 1, "b": [2], "c": {"d": null}}"#);
    assert_eq!(s, Shape::default());
}

#[test]
fn test_unknown_keys_deeper_than_depth_limit() {
    // Discarded values are skipped without counting against the limit.
    let options = picobind::BindOptions::new().with_max_depth(1);
    let point: Point = picobind::from_str_with_options(
        r#"{"deep": [[[[[[[[{"x": 5}]]]]]]]], "x": 3}"#,
        options,
    )
    .unwrap()
    .unwrap();
    assert_eq!(point, Point { x: 3, y: 0 });
}
