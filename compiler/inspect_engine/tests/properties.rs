//! Property-based tests for matching and dispatch.
//!
//! Each property is checked over generated subjects and case lists:
//! 1. Leaf patterns: wildcards, identifiers and constants
//! 2. Structural and alternative patterns are conjunctions
//! 3. Dispatch is deterministic and first-match
//! 4. Guards, silent no-match, extractors
//! 5. Strict mode accepts exactly the complete case lists

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use std::collections::BTreeSet;

use inspect_engine::{
    compile, DispatchError, InspectConfig, Inspector, MatchResult, Outcome, Pattern, Scope,
    Shape, Subject,
};
use inspect_ir::{Active, AltInfo, AltShape, InvalidSubject, ShapeOf};
use proptest::prelude::*;

// -- Helpers --

/// Whether `pattern` matches `subject`, after validating against `T`'s shape.
fn matches<T: Subject>(pattern: &Pattern, subject: &T) -> bool {
    let compiled = compile(pattern, &T::shape()).unwrap();
    let scope = Scope::new();
    let matched = compiled.matches(subject, &scope).unwrap().is_success();
    matched
}

/// `Some(c)` becomes a constant, `None` a wildcard.
fn constant_or_wild(constant: Option<i32>) -> Pattern {
    constant.map_or_else(Pattern::wildcard, Pattern::constant)
}

const SUITS: [&str; 4] = ["Clubs", "Diamonds", "Hearts", "Spades"];

/// A closed union with four payload-free alternatives.
#[derive(Debug, Clone, Copy)]
enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            _ => Suit::Spades,
        }
    }
}

impl Subject for Suit {
    fn shape() -> Shape {
        Shape::Union(
            SUITS
                .iter()
                .enumerate()
                .map(|(index, &name)| {
                    AltShape::new(AltInfo::new::<()>(index, name), ShapeOf::of::<()>())
                })
                .collect(),
        )
    }

    fn active(&self) -> Result<Option<Active<'_>>, InvalidSubject> {
        Ok(Some(Active::new(*self as usize, &())))
    }
}

// -- Property Tests --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// A wildcard matches every value and binds nothing.
    #[test]
    fn prop_wildcard_matches_anything(n in any::<i32>(), pair in any::<(i32, i32)>(), option in any::<Option<i32>>()) {
        let scope = Scope::new();
        let compiled = compile(&Pattern::wildcard(), &Shape::Unknown).unwrap();
        for subject in [&n as &dyn Subject, &pair, &option] {
            match compiled.matches(subject, &scope).unwrap() {
                MatchResult::Success(bindings) => prop_assert!(bindings.is_empty()),
                MatchResult::Failure => prop_assert!(false, "wildcard failed on {subject:?}"),
            }
        }
    }

    /// An identifier binds the subject itself, not a copy.
    #[test]
    fn prop_identifier_binds_the_subject(pair in any::<(i32, i32)>(), name in "[a-z]{1,8}") {
        let compiled = compile(&Pattern::ident(name.as_str()), &<(i32, i32)>::shape()).unwrap();
        let scope = Scope::new();
        let bindings = compiled.matches(&pair, &scope).unwrap().into_bindings().unwrap();
        prop_assert_eq!(bindings.len(), 1);
        let bound = bindings.get_as::<(i32, i32)>(&name).unwrap();
        prop_assert!(std::ptr::eq(bound, &pair));
    }

    /// A constant matches exactly the equal values.
    #[test]
    fn prop_constant_is_equality(c in any::<i32>(), v in any::<i32>()) {
        prop_assert_eq!(matches(&Pattern::constant(c), &v), c == v);
        prop_assert!(matches(&Pattern::constant(v), &v));
    }

    /// A structural pattern matches iff every element does.
    #[test]
    fn prop_structural_is_conjunction(
        pair in (-3i32..3, -3i32..3),
        first in proptest::option::of(-3i32..3),
        second in proptest::option::of(-3i32..3),
    ) {
        let pattern = Pattern::tuple([constant_or_wild(first), constant_or_wild(second)]);
        let expected = first.is_none_or(|c| c == pair.0) && second.is_none_or(|c| c == pair.1);
        prop_assert_eq!(matches(&pattern, &pair), expected);
    }

    /// Arity mismatch fails whatever the element patterns are.
    #[test]
    fn prop_arity_mismatch_fails(items in prop::collection::vec(any::<i32>(), 0..6), arity in 0usize..6) {
        let pattern = Pattern::tuple((0..arity).map(|_| Pattern::wildcard()));
        prop_assert_eq!(matches(&pattern, &items), arity == items.len());
    }

    /// Flipping the discriminant under a fixed payload flips an index selector.
    #[test]
    fn prop_alternative_needs_selector_and_payload(
        payload in -3i32..3,
        ok in any::<bool>(),
        selected in 0usize..2,
        inner in proptest::option::of(-3i32..3),
    ) {
        let subject: Result<i32, i32> = if ok { Ok(payload) } else { Err(payload) };
        let active = usize::from(!ok);
        let pattern = Pattern::index(selected, constant_or_wild(inner));
        let expected = selected == active && inner.is_none_or(|c| c == payload);
        prop_assert_eq!(matches(&pattern, &subject), expected);
    }

    /// Repeated dispatch selects the same case; swapping two matching cases
    /// swaps the winner.
    #[test]
    fn prop_dispatch_is_first_match(n in -3i32..3) {
        let constant_first = Inspector::<i32, char>::builder()
            .case(Pattern::constant(0_i32), |_| 'A')
            .case(Pattern::wildcard(), |_| 'B')
            .build()
            .unwrap();
        let wildcard_first = Inspector::<i32, char>::builder()
            .with_config(InspectConfig::default().with_redundancy(inspect_engine::LintLevel::Allow))
            .case(Pattern::wildcard(), |_| 'B')
            .case(Pattern::constant(0_i32), |_| 'A')
            .build()
            .unwrap();

        let once = constant_first.dispatch(&n).unwrap();
        prop_assert_eq!(&once, &constant_first.dispatch(&n).unwrap());
        prop_assert_eq!(once.value(), Some(if n == 0 { 'A' } else { 'B' }));
        prop_assert_eq!(wildcard_first.dispatch(&n).unwrap().value(), Some('B'));
    }

    /// A guard that fails passes control to the next case.
    #[test]
    fn prop_guard_falls_through(pair in (-2i32..2, -2i32..2)) {
        let inspector = Inspector::<(i32, i32), &str>::builder()
            .case_if(
                Pattern::tuple([Pattern::ident("x"), Pattern::ident("y")]),
                |env| env.get_as::<i32>("x") == env.get_as::<i32>("y"),
                |_| "equal",
            )
            .case(Pattern::wildcard(), |_| "other")
            .build()
            .unwrap();
        let expected = if pair.0 == pair.1 { "equal" } else { "other" };
        prop_assert_eq!(inspector.dispatch(&pair).unwrap().value(), Some(expected));
    }

    /// Without strict mode, no match is an ordinary outcome.
    #[test]
    fn prop_no_match_is_silent(n in any::<i32>().prop_filter("not one", |n| *n != 1)) {
        let inspector = Inspector::<i32, ()>::builder()
            .case(Pattern::constant(1_i32), |_| panic!("must not run"))
            .build()
            .unwrap();
        prop_assert_eq!(inspector.dispatch(&n).unwrap(), Outcome::NoMatch);
    }

    /// An extractor that is present only for even numbers.
    #[test]
    fn prop_extractor_selects_even_numbers(n in any::<i32>()) {
        let is_even = Pattern::extract_as(
            "is_even",
            |n: &i32| (n % 2 == 0).then_some(*n),
            Pattern::ident("x"),
        );
        let inspector = Inspector::<i32, Option<i32>>::builder()
            .case(is_even, |env| env.get_as::<i32>("x").copied())
            .case(Pattern::wildcard(), |_| None)
            .build()
            .unwrap();
        let expected = (n % 2 == 0).then_some(n);
        prop_assert_eq!(inspector.dispatch(&n).unwrap().value(), Some(expected));
    }

    /// Strict mode accepts a case list iff it names every alternative.
    #[test]
    fn prop_strict_mode_needs_every_alternative(covered in prop::collection::btree_set(0usize..4, 0..=4)) {
        let built = covered
            .iter()
            .fold(
                Inspector::<Suit, usize>::builder().with_config(InspectConfig::strict()),
                |builder, &index| builder.case(Pattern::index(index, Pattern::wildcard()), move |_| index),
            )
            .build();

        if covered.len() == SUITS.len() {
            let inspector = built.unwrap();
            for index in 0..SUITS.len() {
                prop_assert_eq!(inspector.dispatch(&Suit::from_index(index)).unwrap().value(), Some(index));
            }
        } else {
            let err = built.unwrap_err();
            let missing: BTreeSet<String> = err.diagnostics()[0]
                .notes
                .iter()
                .map(|note| note.trim_start_matches("not covered: ").to_string())
                .collect();
            // With no case at all there is no constructor to split on.
            let expected: BTreeSet<String> = if covered.is_empty() {
                BTreeSet::from(["_".to_string()])
            } else {
                (0..SUITS.len())
                    .filter(|index| !covered.contains(index))
                    .map(|index| SUITS[index].to_string())
                    .collect()
            };
            prop_assert_eq!(missing, expected);
        }
    }
}

#[test]
fn strict_dispatch_never_returns_no_match() {
    let inspector = Inspector::<Suit, ()>::builder()
        .with_config(InspectConfig::strict())
        .case(Pattern::wildcard(), |_| ())
        .build()
        .unwrap();
    for index in 0..SUITS.len() {
        let outcome: Result<Outcome<()>, DispatchError> = inspector.dispatch(&Suit::from_index(index));
        assert_eq!(outcome.unwrap().case(), Some(0));
    }
}
