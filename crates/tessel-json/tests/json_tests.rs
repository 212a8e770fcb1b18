use std::collections::BTreeMap;

use tessel_json::{parse, ErrorKind, Json, Kind, Object};

/// One sample of each kind.
fn samples() -> Vec<Json> {
    vec![
        Json::null(),
        Json::from(1.5),
        Json::from(true),
        Json::from("text"),
        parse("[1, 2]").unwrap(),
        parse(r#"{"k": 1}"#).unwrap(),
    ]
}

fn assert_invalid_type<T: std::fmt::Debug>(result: tessel_json::Result<T>, op: &str, kind: Kind) {
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidType, "{op} on {kind}");
    assert_eq!(
        err.root_message(),
        format!("invalid type: cannot call {op} on a JSON {kind}")
    );
    assert_eq!(err.offset(), 0);
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn default_and_null_are_null() {
    assert!(Json::default().is_null().unwrap());
    assert!(Json::null().is_null().unwrap());
    assert!(Json::from(()).is_null().unwrap());
}

#[test]
fn scalar_constructors() {
    assert_eq!(Json::from(7).get_number().unwrap(), 7.0);
    assert_eq!(Json::from(7_i64).get_number().unwrap(), 7.0);
    assert_eq!(Json::from(0.25_f32).get_number().unwrap(), 0.25);
    assert!(Json::from(true).get_bool().unwrap());
    assert_eq!(Json::from("s").get_string().unwrap(), "s");
    assert_eq!(Json::from(String::from("owned")).get_string().unwrap(), "owned");
}

#[test]
fn container_constructors() {
    let array = Json::from(vec![Json::from(1), Json::from("a")]);
    assert_eq!(array.kind().unwrap(), Kind::Array);
    assert_eq!(array.len().unwrap(), 2);

    let mut map = Object::new();
    map.insert("k".to_string(), Json::from(false));
    let object = Json::from(map);
    assert_eq!(object.kind().unwrap(), Kind::Object);
    assert!(!object.member("k").unwrap().get_bool().unwrap());

    assert!(Json::array().is_empty().unwrap());
    assert!(Json::object().is_empty().unwrap());
}

#[test]
fn collect_into_containers() {
    let array: Json = (1..=3).map(Json::from).collect();
    assert_eq!(array.dump().unwrap(), "[1, 2, 3]");

    let object: Json = [("b", Json::from(2)), ("a", Json::from(1))]
        .into_iter()
        .collect();
    assert_eq!(object.dump().unwrap(), "{\n\t\"a\" : 1,\n\t\"b\" : 2\n}");
}

// ============================================================================
// Typed access
// ============================================================================

#[test]
fn kind_predicates() {
    let kinds: Vec<Kind> = samples().iter().map(|j| j.kind().unwrap()).collect();
    assert_eq!(
        kinds,
        [Kind::Null, Kind::Number, Kind::Bool, Kind::String, Kind::Array, Kind::Object]
    );
    assert!(Json::from(1).is_number().unwrap());
    assert!(!Json::from(1).is_string().unwrap());
    assert!(Json::array().is_array().unwrap());
    assert!(Json::object().is_object().unwrap());
    assert!(Json::from(false).is_bool().unwrap());
}

#[test]
fn setters_update_in_place() {
    let mut n = Json::from(1234);
    n.set_number(99.111).unwrap();
    assert_eq!(n.get_number().unwrap(), 99.111);

    let mut b = Json::from(false);
    b.set_bool(true).unwrap();
    assert!(b.get_bool().unwrap());

    let mut s = Json::from("a");
    s.set_string("b").unwrap();
    assert_eq!(s.get_string().unwrap(), "b");

    let mut a = Json::array();
    a.set_array(vec![Json::null()]).unwrap();
    assert_eq!(a.len().unwrap(), 1);

    let mut o = Json::object();
    o.set_object(BTreeMap::from([("x".to_string(), Json::from(1))]))
        .unwrap();
    assert_eq!(o.member("x").unwrap().get_number().unwrap(), 1.0);
}

#[test]
fn foreign_operations_fail_with_invalid_type() {
    for mut value in samples() {
        let kind = value.kind().unwrap();
        if kind != Kind::Number {
            assert_invalid_type(value.get_number(), "get_number", kind);
            assert_invalid_type(value.set_number(1.0), "set_number", kind);
        }
        if kind != Kind::Bool {
            assert_invalid_type(value.get_bool(), "get_bool", kind);
            assert_invalid_type(value.set_bool(true), "set_bool", kind);
        }
        if kind != Kind::String {
            assert_invalid_type(value.get_string(), "get_string", kind);
            assert_invalid_type(value.set_string("x"), "set_string", kind);
        }
        if kind != Kind::Array {
            assert_invalid_type(value.get_array(), "get_array", kind);
            assert_invalid_type(value.set_array(Vec::new()), "set_array", kind);
            assert_invalid_type(value.add_to_array(1), "add_to_array", kind);
            assert_invalid_type(value.remove_from_array(0), "remove_from_array", kind);
            assert_invalid_type(value.at(0), "at", kind);
            assert_invalid_type(value.at_mut(0), "at_mut", kind);
            assert_invalid_type(value.array_iter(), "array_iter", kind);
            assert_invalid_type(value.array_iter_mut(), "array_iter_mut", kind);
        }
        if kind != Kind::Object {
            assert_invalid_type(value.get_object(), "get_object", kind);
            assert_invalid_type(value.set_object(Object::new()), "set_object", kind);
            assert_invalid_type(value.add_to_object("k", 1), "add_to_object", kind);
            assert_invalid_type(value.remove_from_object("k"), "remove_from_object", kind);
            assert_invalid_type(value.get("k"), "get", kind);
            assert_invalid_type(value.member("k"), "member", kind);
            assert_invalid_type(value.member_mut("k"), "member_mut", kind);
            assert_invalid_type(value.entry_or_null("k"), "entry_or_null", kind);
            assert_invalid_type(value.object_iter(), "object_iter", kind);
            assert_invalid_type(value.object_iter_mut(), "object_iter_mut", kind);
        }
        if kind != Kind::Array && kind != Kind::Object {
            assert_invalid_type(value.len(), "len", kind);
        }
    }
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn add_to_array_appends() {
    let mut array = Json::array();
    array.add_to_array(Json::null()).unwrap();
    array.add_to_array(Json::object()).unwrap();
    array.add_to_array(1).unwrap();
    array.add_to_array(true).unwrap();
    array.add_to_array("hello").unwrap();
    assert_eq!(array.dump().unwrap(), r#"[null, {}, 1, true, "hello"]"#);
}

#[test]
fn index_out_of_range() {
    let mut array = parse("[1]").unwrap();
    assert_eq!(array.at(1).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    assert_eq!(
        array.at_mut(5).unwrap_err().kind(),
        ErrorKind::IndexOutOfRange
    );
}

#[test]
fn at_mut_edits_element() {
    let mut array = parse("[1, 2]").unwrap();
    array.at_mut(1).unwrap().set_number(20.0).unwrap();
    assert_eq!(array.dump().unwrap(), "[1, 20]");
}

#[test]
fn remove_from_array_shifts_elements() {
    let mut array = parse(r#"["a", "b", "c", "d"]"#).unwrap();
    let removed = array.remove_from_array(1).unwrap();
    assert_eq!(removed.get_string().unwrap(), "b");
    assert_eq!(array.len().unwrap(), 3);
    assert_eq!(array.dump().unwrap(), r#"["a", "c", "d"]"#);
}

#[test]
fn remove_from_array_out_of_range_leaves_array_unchanged() {
    let mut array = parse("[1, 2, 3]").unwrap();
    let before = array.clone();
    let err = array.remove_from_array(3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
    assert_eq!(array, before);
}

#[test]
fn array_iteration_mutates_matching_elements() {
    let mut array = parse(r#"[null, 1, true, "hello", 1]"#).unwrap();
    for item in array.array_iter_mut().unwrap() {
        if item.is_number().unwrap() && item.get_number().unwrap() == 1.0 {
            item.set_number(123.0).unwrap();
        }
    }
    assert_eq!(array.dump().unwrap(), r#"[null, 123, true, "hello", 123]"#);
    let strings = array
        .array_iter()
        .unwrap()
        .filter(|j| j.is_string().unwrap())
        .count();
    assert_eq!(strings, 1);
}

// ============================================================================
// Objects
// ============================================================================

#[test]
fn add_to_object_overwrites_existing_key() {
    let mut object = parse(r#"{"a": 1, "b": 2}"#).unwrap();
    object.add_to_object("a", "replaced").unwrap();
    assert_eq!(object.len().unwrap(), 2);
    assert_eq!(object.member("a").unwrap().get_string().unwrap(), "replaced");
}

#[test]
fn remove_from_object_removes_exactly_one_entry() {
    let mut object = parse(r#"{"a": 1, "b": 2, "c": 3}"#).unwrap();
    let removed = object.remove_from_object("b").unwrap();
    assert_eq!(removed.get_number().unwrap(), 2.0);
    assert_eq!(object, parse(r#"{"a": 1, "c": 3}"#).unwrap());
}

#[test]
fn remove_from_object_missing_key_leaves_object_unchanged() {
    let mut object = parse(r#"{"a": 1}"#).unwrap();
    let before = object.clone();
    let err = object.remove_from_object("zzz").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyNotFound);
    assert_eq!(err.root_message(), "remove_from_object: key \"zzz\" does not exist");
    assert_eq!(object, before);
}

#[test]
fn lookup_does_not_insert() {
    let object = parse(r#"{"a": 1}"#).unwrap();
    assert!(object.get("missing").unwrap().is_none());
    assert_eq!(
        object.member("missing").unwrap_err().kind(),
        ErrorKind::KeyNotFound
    );
    assert_eq!(object.len().unwrap(), 1);
}

#[test]
fn member_mut_missing_key_fails() {
    let mut object = Json::object();
    assert_eq!(
        object.member_mut("k").unwrap_err().kind(),
        ErrorKind::KeyNotFound
    );
    assert!(object.is_empty().unwrap());
}

#[test]
fn entry_or_null_inserts_null_for_missing_key() {
    let mut object = Json::object();
    assert!(object.entry_or_null("k").unwrap().is_null().unwrap());
    assert_eq!(object.len().unwrap(), 1);

    *object.entry_or_null("k").unwrap() = Json::from(5);
    assert_eq!(object.len().unwrap(), 1);
    assert_eq!(object.member("k").unwrap().get_number().unwrap(), 5.0);
}

#[test]
fn object_iteration_is_in_key_order() {
    let mut object = Json::object();
    for key in ["key3", "key1", "key2"] {
        object.add_to_object(key, key).unwrap();
    }
    for (_, value) in object.object_iter_mut().unwrap() {
        let upper = value.get_string().unwrap().to_uppercase();
        value.set_string(upper).unwrap();
    }
    let pairs: Vec<(String, String)> = object
        .object_iter()
        .unwrap()
        .map(|(k, v)| (k.clone(), v.get_string().unwrap().to_string()))
        .collect();
    assert_eq!(
        pairs,
        [
            ("key1".to_string(), "KEY1".to_string()),
            ("key2".to_string(), "KEY2".to_string()),
            ("key3".to_string(), "KEY3".to_string()),
        ]
    );
}

// ============================================================================
// Value semantics
// ============================================================================

#[test]
fn clone_is_deep() {
    let original = parse(r#"{"list": [1, {"x": true}]}"#).unwrap();
    let mut copy = original.clone();
    copy.member_mut("list")
        .unwrap()
        .at_mut(1)
        .unwrap()
        .add_to_object("y", false)
        .unwrap();
    assert_ne!(copy, original);
    assert_eq!(
        original.member("list").unwrap().at(1).unwrap().len().unwrap(),
        1
    );
}

#[test]
fn take_leaves_empty_handle() {
    let mut source = Json::from("payload");
    let moved = source.take();
    assert_eq!(moved.get_string().unwrap(), "payload");
    assert!(!source.is_present());

    let errors = [
        source.kind().unwrap_err(),
        source.is_null().unwrap_err(),
        source.get_string().unwrap_err(),
        source.dump().unwrap_err(),
        source.len().unwrap_err(),
        source.add_to_array(1).unwrap_err(),
        source.equals(&moved).unwrap_err(),
        moved.less_than(&source).unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err.kind(), ErrorKind::NullHandle);
    }
}

#[test]
fn empty_handle_is_usable_after_reassignment() {
    let mut handle = Json::from(1);
    let _ = handle.take();
    handle = Json::from(2);
    assert_eq!(handle.get_number().unwrap(), 2.0);
}

#[test]
fn clone_of_empty_handle_is_null() {
    let mut handle = Json::from(1);
    let _ = handle.take();
    assert!(handle.clone().is_null().unwrap());
}

#[test]
fn empty_child_fails_dump() {
    let mut array = parse("[1, 2]").unwrap();
    let _ = array.at_mut(0).unwrap().take();
    assert_eq!(array.dump().unwrap_err().kind(), ErrorKind::NullHandle);
}

// ============================================================================
// Comparison
// ============================================================================

#[test]
fn equality_is_structural() {
    let a = parse(r#"{"a": [1, "x", null]}"#).unwrap();
    let b = parse(r#"{ "a" : [ 1 , "x" , null ] }"#).unwrap();
    assert_eq!(a, b);
    assert!(a.equals(&b).unwrap());
    assert!(a.equals(&a).unwrap());
    assert_ne!(a, parse(r#"{"a": [1, "x"]}"#).unwrap());
}

#[test]
fn different_kinds_are_never_equal() {
    assert_ne!(Json::from(0), Json::from(false));
    assert_ne!(Json::null(), Json::array());
    assert!(!Json::from("1").equals(&Json::from(1)).unwrap());
}

#[test]
fn different_kinds_order_by_kind() {
    let values = samples();
    for pair in values.windows(2) {
        assert!(pair[0] < pair[1], "{:?} < {:?}", pair[0], pair[1]);
        assert!(pair[0].less_than(&pair[1]).unwrap());
        assert!(pair[1] > pair[0]);
    }
}

#[test]
fn same_kind_ordering() {
    assert!(Json::from(1) < Json::from(2));
    assert!(Json::from(false) < Json::from(true));
    assert!(Json::from("abc") < Json::from("abd"));
    assert!(parse("[1, 2]").unwrap() < parse("[1, 3]").unwrap());
    assert!(parse("[1, 2]").unwrap() < parse("[1, 2, 0]").unwrap());
    assert!(parse(r#"{"a": 9}"#).unwrap() < parse(r#"{"b": 0}"#).unwrap());
    assert!(Json::null() <= Json::null());
    assert!(Json::null() >= Json::null());
    assert!(!(Json::null() < Json::null()));
}

#[test]
fn arrays_compare_elements_across_kinds() {
    assert!(parse("[null]").unwrap() < parse("[0]").unwrap());
    assert!(parse(r#"[[1], "z"]"#).unwrap() > parse(r#"["z", [1]]"#).unwrap());
}
