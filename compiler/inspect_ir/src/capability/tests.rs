use super::*;

#[test]
fn literal_uses_partial_eq_on_subject_type() {
    let five = Literal::<i64>::new(5);
    assert!(five.matches(&5_i64));
    assert!(!five.matches(&6_i64));
    // A different dynamic type never compares equal.
    assert!(!five.matches(&5_i32));
    assert_eq!(five.describe(), "5");
}

#[test]
fn literal_across_types() {
    let hello = Literal::<&'static str, String>::new("hello");
    assert!(hello.matches(&"hello".to_string()));
    assert!(!hello.matches(&"bye".to_string()));
    assert_eq!(*hello.value(), "hello");
}

#[test]
fn custom_equality() {
    let ci = EqWith::new("ABC", |c: &&str, s: &dyn Subject| {
        downcast::<String>(s).is_some_and(|s| s.eq_ignore_ascii_case(c))
    });
    assert!(ci.matches(&"abc".to_string()));
    assert!(!ci.matches(&"abd".to_string()));
    assert_eq!(ci.describe(), "\"ABC\"");
}

#[test]
fn extract_as_produces_owned_values() {
    let parse = ExtractAs::new("int", |s: &String| s.parse::<i64>().ok());
    match parse.extract(&"42".to_string()) {
        Some(Extracted::Owned(value)) => assert_eq!(downcast::<i64>(&*value), Some(&42)),
        other => panic!("expected owned value, got {other:?}"),
    }
    assert!(parse.extract(&"x".to_string()).is_none());
    assert!(parse.extract(&42_i64).is_none());
    assert_eq!(parse.name(), "int");
    assert_eq!(parse.output_shape().kind(), "scalar");
}

#[test]
fn extract_fn_sees_any_subject() {
    let type_name = ExtractFn::new("type", |s: &dyn Subject| Some(s.type_name().to_string()));
    assert!(matches!(type_name.extract(&1_u8), Some(Extracted::Owned(_))));
}

#[derive(Debug)]
struct Point {
    x: i64,
    y: i64,
}

impl Subject for Point {}

#[test]
fn project_borrows_from_subject() {
    let x_of = Project::new("x", |p: &Point| Some(&p.x));
    let point = Point { x: 3, y: 4 };
    match x_of.extract(&point) {
        Some(Extracted::Borrowed(value)) => {
            assert!(std::ptr::eq(downcast::<i64>(value).unwrap(), &point.x));
        }
        other => panic!("expected borrowed value, got {other:?}"),
    }
    assert_eq!(point.y, 4);
}

#[test]
fn downcast_extractor() {
    let boxed: Box<dyn Subject> = Box::new(Point { x: 1, y: 2 });
    let to_point = Downcast::<Point>::new();
    assert!(to_point.extract(&boxed).is_some());
    assert!(Downcast::<String>::new().extract(&boxed).is_none());
    assert_eq!(to_point.name(), "Point");
    assert_eq!(format!("{to_point:?}"), "Downcast<Point>");
}
