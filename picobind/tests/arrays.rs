// Array binding: lists of scalars, lists of records, nested arrays

use picobind::{from_str, record, Value};

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Item {
        id: u32,
        label: String,
    }
}

record! {
    #[derive(Debug, Default)]
    struct Catalog {
        items: Vec<Item>,
        scores: Vec<f64>,
        names: Vec<String>,
        maybe: Vec<Option<i64>>,
    }
}

#[test]
fn test_list_of_records_in_order() {
    let catalog: Catalog = from_str(
        r#"{"items": [
            {"id": 1, "label": "one"},
            {"id": 2, "label": "two"},
            {"label": "three", "id": 3}
        ]}"#,
    )
    .unwrap()
    .unwrap();
    let ids: Vec<u32> = catalog.items.iter().map(|item| item.id).collect();
    assert_eq!(ids, [1, 2, 3]);
    assert_eq!(catalog.items[2].label, "three");
}

#[test]
fn test_list_of_scalars() {
    let catalog: Catalog = from_str(r#"{"scores": [1.5, 2, -0.25e1], "names": ["a", "b"]}"#)
        .unwrap()
        .unwrap();
    assert_eq!(catalog.scores, [1.5, 2.0, -2.5]);
    assert_eq!(catalog.names, ["a", "b"]);
}

#[test]
fn test_nested_arrays_contribute_nothing() {
    let catalog: Catalog = from_str(
        r#"{"names": ["a", ["b", ["c"]], "d", []], "items": [[{"id": 9}], {"id": 4}]}"#,
    )
    .unwrap()
    .unwrap();
    assert_eq!(catalog.names, ["a", "d"]);
    assert_eq!(
        catalog.items,
        [Item {
            id: 4,
            label: String::new()
        }]
    );
}

#[test]
fn test_null_items_are_placeholders() {
    let catalog: Catalog = from_str(r#"{"maybe": [1, null, 3], "names": [null, "x"]}"#)
        .unwrap()
        .unwrap();
    assert_eq!(catalog.maybe, [Some(1), None, Some(3)]);
    assert_eq!(catalog.names, ["", "x"]);
}

#[test]
fn test_array_root() {
    let items: Vec<Item> = from_str(r#"[{"id": 7, "label": "seven"}, {"id": 8}]"#)
        .unwrap()
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].label, "seven");
    assert_eq!(items[1].id, 8);

    let empty: Vec<Item> = from_str("[]").unwrap().unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_array_root_of_scalars() {
    let words: Vec<String> = from_str(r#"["x", "y", ["z"]]"#).unwrap().unwrap();
    assert_eq!(words, ["x", "y"]);
}

#[test]
fn test_heterogeneous_values() {
    let values: Vec<Value> = from_str(r#"[1, "two", 3.5, true, null, {"k": "v"}, [0]]"#)
        .unwrap()
        .unwrap();
    assert_eq!(values.len(), 6);
    assert_eq!(values[1].as_str(), Some("two"));
    assert!(values[4].is_null());
    assert_eq!(values[5].get("k").and_then(Value::as_str), Some("v"));
}
