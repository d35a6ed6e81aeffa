use std::sync::Arc;

use pretty_assertions::assert_eq;
use smallvec::smallvec;

use super::*;

fn names(list: &[&str]) -> Vec<Name> {
    list.iter().map(|name| Arc::from(*name)).collect()
}

#[test]
fn lookup_by_name_returns_the_referenced_value() {
    let subject = (7_i64, String::from("seven"));
    let table = names(&["n", "s"]);
    let bindings = Bindings::new(&table, smallvec![Some(&subject.0 as &dyn Subject), Some(&subject.1 as &dyn Subject)]);

    assert!(std::ptr::eq(bindings.get_as::<i64>("n").unwrap(), &subject.0));
    assert_eq!(bindings.get_as::<String>("s").unwrap(), "seven");
    assert!(bindings.get("missing").is_none());
    assert_eq!(bindings.len(), 2);
}

#[test]
fn typed_lookup_rejects_other_types() {
    let value = 3_u8;
    let table = names(&["x"]);
    let bindings = Bindings::new(&table, smallvec![Some(&value as &dyn Subject)]);
    assert!(bindings.get_as::<i32>("x").is_none());
    assert_eq!(bindings.get_as::<u8>("x"), Some(&3));
}

#[test]
fn typed_lookup_sees_through_boxes() {
    let boxed: Box<dyn Subject> = Box::new(1.5_f64);
    let table = names(&["b"]);
    let bindings = Bindings::new(&table, smallvec![Some(&boxed as &dyn Subject)]);
    assert_eq!(bindings.get_as::<f64>("b"), Some(&1.5));
}

#[test]
fn iteration_skips_unfilled_slots() {
    let value = 'c';
    let table = names(&["a", "b"]);
    let bindings = Bindings::new(&table, smallvec![None, Some(&value as &dyn Subject)]);
    let listed: Vec<&str> = bindings.iter().map(|(name, _)| name).collect();
    assert_eq!(listed, vec!["b"]);
    assert_eq!(format!("{bindings:?}"), "{\"b\": 'c'}");
}

#[test]
fn empty_environment() {
    let bindings = Bindings::new(&[], Slots::new());
    assert!(bindings.is_empty());
    assert!(MatchResult::Success(bindings).is_success());
    assert!(MatchResult::Failure.into_bindings().is_none());
}
