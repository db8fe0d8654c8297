//! End-to-end category materialization against an in-memory automation graph.

use proptest::prelude::*;
use wuapi_dispatch::{load_fixture, Call, InMemoryDispatch, ObjectRef, TransportError};
use wuapi_model::{CategoryIndex, CategoryRecord, MaterializeError, MaterializeOptions, Materializer};
use wuapi_variant::Variant;

fn leaf(d: &mut InMemoryDispatch, id: &str) -> ObjectRef {
    d.object([
        ("CategoryID", Variant::from(id)),
        ("Children", Variant::Empty),
        ("Description", Variant::from("")),
        ("Image", Variant::Empty),
        ("Name", Variant::from(id)),
        ("Order", Variant::I32(0)),
        ("Type", Variant::from("Product")),
    ])
}

fn security(d: &mut InMemoryDispatch, children: Variant<ObjectRef>) -> ObjectRef {
    d.object([
        ("CategoryID", Variant::from("CAT1")),
        ("Children", children),
        ("Description", Variant::from("")),
        ("Image", Variant::Empty),
        ("Name", Variant::from("Security")),
        ("Order", Variant::I32(5)),
        ("Type", Variant::from("Company")),
    ])
}

fn index_of(call: &Call) -> Option<i32> {
    match call {
        Call::Indexed { index, .. } => Some(*index),
        Call::Property { .. } => None,
    }
}

#[test]
fn two_leaf_children_materialize_in_order() {
    let mut d = InMemoryDispatch::new();
    let a = leaf(&mut d, "CAT1-A");
    let b = leaf(&mut d, "CAT1-B");
    let children = d.collection_of([a, b]);
    let root = security(&mut d, Variant::Object(children));

    let record = Materializer::new(&d).category(&root).unwrap();

    assert_eq!(record.category_id, "CAT1");
    assert_eq!(record.name, "Security");
    assert_eq!(record.description, "");
    assert_eq!(record.order, 5);
    assert_eq!(record.category_type, "Company");
    assert_eq!(record.image, None);
    assert_eq!(record.parent_id, None);
    assert!(record.updates.is_empty());

    let ids: Vec<&str> = record.children.iter().map(|c| c.category_id.as_str()).collect();
    assert_eq!(ids, vec!["CAT1-A", "CAT1-B"]);
    assert!(record.children.iter().all(CategoryRecord::is_leaf));
}

#[test]
fn absent_children_issue_no_count_or_item_reads() {
    let mut d = InMemoryDispatch::new();
    let root = security(&mut d, Variant::Empty);

    let record = Materializer::new(&d).category(&root).unwrap();

    assert!(record.children.is_empty());
    assert_eq!(d.calls_named("Count"), 0);
    assert_eq!(d.calls_named("Item"), 0);
}

#[test]
fn zero_count_collection_reads_count_only() {
    let mut d = InMemoryDispatch::new();
    let empty = d.collection([]);
    let root = security(&mut d, Variant::Object(empty));

    let record = Materializer::new(&d).category(&root).unwrap();

    assert!(record.children.is_empty());
    assert_eq!(d.calls_named("Count"), 1);
    assert_eq!(d.calls_named("Item"), 0);
}

#[test]
fn category_id_transport_error_stops_everything() {
    let mut d = InMemoryDispatch::new();
    let root = security(&mut d, Variant::Empty);
    let failure = TransportError::Exception {
        code: 0x8024_402C,
        description: "WU_E_PT_WINHTTP_NAME_NOT_RESOLVED".into(),
    };
    d.fail_property(root, "CategoryID", failure.clone()).unwrap();

    let err = Materializer::new(&d).category(&root).unwrap_err();

    assert_eq!(err, MaterializeError::Transport(failure));
    assert_eq!(d.calls().len(), 1);
}

#[test]
fn deep_trees_are_depth_first() {
    let mut d = InMemoryDispatch::new();
    let a1 = leaf(&mut d, "A1");
    let a_children = d.collection_of([a1]);
    let a = leaf(&mut d, "A");
    d.set_property(a, "Children", Variant::Object(a_children)).unwrap();
    let b = leaf(&mut d, "B");
    let root_children = d.collection_of([a, b]);
    let root = security(&mut d, Variant::Object(root_children));

    let record = Materializer::new(&d).category(&root).unwrap();
    let order: Vec<&str> = record.walk().map(|c| c.category_id.as_str()).collect();
    assert_eq!(order, vec!["CAT1", "A", "A1", "B"]);

    // A1's reads all happen before B's CategoryID is read.
    let ids: Vec<ObjectRef> = d
        .calls()
        .iter()
        .filter_map(|c| match c {
            Call::Property { object, name } if name == "CategoryID" => Some(*object),
            _ => None,
        })
        .collect();
    assert_eq!(ids, vec![root, a, a1, b]);
}

#[test]
fn fixture_graph_round_trips_through_index() {
    let json = r#"{
        "CategoryID": "MS",
        "Name": "Microsoft",
        "Description": "",
        "Image": {"AltText": "logo", "Height": {"$i64": 16}, "Source": "", "Width": {"$i64": 16}},
        "Order": 0,
        "Type": "Company",
        "Children": [
            {"CategoryID": "WIN", "Name": "Windows", "Description": "", "Image": null,
             "Order": 1, "Type": "ProductFamily", "Children": null}
        ]
    }"#;
    let mut d = InMemoryDispatch::new();
    let Variant::Object(root) = load_fixture(&mut d, json).unwrap() else {
        panic!("fixture root should be an object");
    };

    let record = Materializer::with_options(&d, MaterializeOptions::linked())
        .category(&root)
        .unwrap();
    assert_eq!(record.image.as_ref().map(|i| i.height), Some(16));

    let index = CategoryIndex::from_root(&record);
    let windows = index.get("WIN").unwrap();
    assert_eq!(index.resolve_parent(windows).unwrap().name, "Microsoft");
    assert_eq!(index.path("WIN"), vec!["Microsoft", "Windows"]);
}

proptest! {
    #[test]
    fn enumeration_reads_each_index_once_in_order(n in 0usize..12) {
        let mut d = InMemoryDispatch::new();
        let items: Vec<ObjectRef> = (0..n).map(|i| leaf(&mut d, &format!("C{i}"))).collect();
        let coll = d.collection_of(items);

        let records = Materializer::new(&d).categories(&coll).unwrap();

        let indices: Vec<i32> = d.calls().iter().filter_map(index_of).collect();
        prop_assert_eq!(indices, (0..n as i32).collect::<Vec<_>>());
        let ids: Vec<String> = records.into_iter().map(|r| r.category_id).collect();
        prop_assert_eq!(ids, (0..n).map(|i| format!("C{i}")).collect::<Vec<_>>());
    }

    #[test]
    fn failing_child_returns_exactly_its_error(n in 1usize..10, k_seed in any::<usize>()) {
        let k = k_seed % n;
        let mut d = InMemoryDispatch::new();
        let items: Vec<ObjectRef> = (0..n).map(|i| leaf(&mut d, &format!("C{i}"))).collect();
        let failure = TransportError::exception(format!("child {k} failed"));
        d.fail_property(items[k], "Name", failure.clone()).unwrap();
        let coll = d.collection_of(items);

        let result = Materializer::new(&d).categories(&coll);

        prop_assert_eq!(result, Err(MaterializeError::Transport(failure)));
        let last_item = d.calls().iter().filter_map(index_of).max();
        prop_assert_eq!(last_item, Some(k as i32));
    }
}
