use pretty_assertions::assert_eq;

use inspect_ir::PathStep;

use super::*;

#[test]
fn display_lists_location_notes_and_help() {
    let diag = duplicate_binding(Location::case(2).child(PathStep::Element(1)), "x");
    assert_eq!(
        diag.to_string(),
        "error [E3001]: `x` is bound more than once in the same case\n  \
         --> case 2, at [1]\n  \
         = help: rename one of the `x` bindings"
    );
}

#[test]
fn non_exhaustive_notes_every_witness() {
    let diag = non_exhaustive(&["None".to_string(), "Some(false)".to_string()]);
    assert_eq!(diag.code, ErrorCode::E3010);
    assert_eq!(
        diag.notes,
        vec!["not covered: None".to_string(), "not covered: Some(false)".to_string()]
    );
    assert_eq!(diag.location, Location::case_list());
}

#[test]
fn redundant_case_severity_follows_caller() {
    let warn = redundant_case(Location::case(1), Severity::Warning);
    assert!(!warn.is_error());
    assert_eq!(warn.code, ErrorCode::W3001);

    let deny = redundant_case(Location::case(1), Severity::Error);
    assert!(deny.is_error());
    assert!(deny.to_string().starts_with("error [W3001]: unreachable case"));
}

#[test]
fn arity_message_pluralizes() {
    assert_eq!(
        arity_mismatch(Location::case(0), 2, 1).message,
        "structural pattern has 1 element, but the subject has 2"
    );
    assert_eq!(
        arity_mismatch(Location::case(0), 2, 3).message,
        "structural pattern has 3 elements, but the subject has 2"
    );
}

#[test]
fn ambiguous_type_names_indices() {
    let diag = ambiguous_type(Location::case(0), "i32", &[0, 2]);
    assert_eq!(diag.notes, vec!["alternatives 0, 2 all carry it".to_string()]);
}

#[test]
fn index_out_of_domain_lists_declared_indices() {
    let diag = index_out_of_domain(Location::case(0), 1, &[0, 5]);
    assert_eq!(diag.code, ErrorCode::E3005);
    assert_eq!(diag.message, "no alternative has index 1");
    assert_eq!(diag.notes, vec!["valid indices are 0, 5".to_string()]);
}
