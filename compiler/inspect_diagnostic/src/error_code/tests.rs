use std::str::FromStr;

use super::*;

#[test]
fn codes_round_trip_through_strings() {
    for code in ErrorCode::ALL {
        assert_eq!(ErrorCode::from_str(code.as_str()), Ok(*code));
        assert_eq!(code.to_string(), code.as_str());
    }
}

#[test]
fn parse_is_case_insensitive() {
    assert_eq!("w3001".parse::<ErrorCode>(), Ok(ErrorCode::W3001));
    assert_eq!("E9999".parse::<ErrorCode>(), Err(()));
}

#[test]
fn only_w_codes_are_warnings() {
    let warnings: Vec<_> = ErrorCode::ALL.iter().filter(|c| c.is_warning()).collect();
    assert_eq!(warnings, vec![&ErrorCode::W3001]);
}

#[test]
fn every_code_has_a_description() {
    assert!(ErrorCode::ALL.iter().all(|c| !c.description().is_empty()));
}
