use std::any::TypeId;

use super::*;

#[derive(Debug)]
struct Base {
    id: u32,
}

impl Subject for Base {}

#[derive(Debug)]
struct Derived {
    base: Base,
    extra: &'static str,
}

impl Subject for Derived {
    fn view(&self, target: TypeId) -> Option<&dyn Any> {
        (target == TypeId::of::<Base>()).then_some(&self.base as &dyn Any)
    }
}

#[derive(Debug)]
enum Slot {
    Empty,
    Full(i64),
}

impl Subject for Slot {
    fn active(&self) -> Result<Option<Active<'_>>, InvalidSubject> {
        match self {
            Slot::Empty => Err(InvalidSubject::valueless("Slot")),
            Slot::Full(value) => Ok(Some(Active::new(0, value))),
        }
    }
}

#[test]
fn tuple_components_borrow_in_order() {
    let pair = (1_i64, "two");
    let components = pair.components().unwrap().unwrap();
    assert_eq!(components.len(), 2);
    assert_eq!(downcast::<i64>(components[0]), Some(&1));
    assert_eq!(downcast::<&str>(components[1]), Some(&"two"));
    // Components alias the tuple's own storage.
    assert!(std::ptr::eq(downcast::<i64>(components[0]).unwrap(), &pair.0));
}

#[test]
fn unit_has_zero_components() {
    assert_eq!(().components().unwrap().map(|c| c.len()), Some(0));
}

#[test]
fn scalars_do_not_decompose() {
    assert!(5_i32.components().unwrap().is_none());
    assert!(5_i32.active().unwrap().is_none());
}

#[test]
fn option_active_alternative() {
    let some = Some(7_i64);
    let active = some.active().unwrap().unwrap();
    assert_eq!(active.index, 1);
    assert_eq!(downcast::<i64>(active.payload), Some(&7));

    let none: Option<i64> = None;
    assert_eq!(none.active().unwrap().unwrap().index, 0);
}

#[test]
fn result_active_alternative() {
    let err: Result<i64, String> = Err("bad".to_string());
    let active = err.active().unwrap().unwrap();
    assert_eq!(active.index, 1);
    assert_eq!(downcast::<String>(active.payload).map(String::as_str), Some("bad"));
}

#[test]
fn vec_components_have_dynamic_arity() {
    let items = vec![1_u8, 2, 3];
    assert_eq!(items.components().unwrap().unwrap().len(), 3);
}

#[test]
fn valueless_union_is_invalid() {
    let err = Slot::Empty.active().unwrap_err();
    assert_eq!(err.type_name, "Slot");
    assert!(err.to_string().contains("no active alternative"));
    assert!(Slot::Full(1).active().unwrap().is_some());
}

#[test]
fn boxed_subject_forwards_to_inner_value() {
    let boxed: Box<dyn Subject> = Box::new(Some(3_i64));
    assert_eq!(innermost(&boxed).type_name(), std::any::type_name::<Option<i64>>());
    assert_eq!(boxed.active().unwrap().unwrap().index, 1);
    assert_eq!(downcast::<Option<i64>>(&boxed), Some(&Some(3)));
}

#[test]
fn downcast_view_follows_declared_bases_only() {
    let derived = Derived {
        base: Base { id: 9 },
        extra: "x",
    };
    let boxed: Box<dyn Subject> = Box::new(derived);

    assert_eq!(downcast_view::<Derived>(&boxed).map(|d| d.extra), Some("x"));
    assert_eq!(downcast_view::<Base>(&boxed).map(|b| b.id), Some(9));
    // No cross-cast to an unrelated type.
    assert!(downcast_view::<String>(&boxed).is_none());
    // Exact downcast does not consult base views.
    assert!(downcast::<Base>(&boxed).is_none());
}
