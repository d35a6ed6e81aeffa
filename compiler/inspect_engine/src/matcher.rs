//! The match engine.
//!
//! Depth-first over the compiled tree, left to right, stopping at the first
//! failing node. Each structural or alternative node asks its subject for
//! components or the active alternative exactly once.

use inspect_ir::{AltInfo, Extracted, InvalidSubject, Subject};
use scoped_arena::Scope;
use smallvec::smallvec;

use crate::bindings::{Bindings, MatchResult, Slots};
use crate::compile::{AltTest, CompiledPattern, Node};
use crate::stack::ensure_sufficient_stack;

impl CompiledPattern {
    /// Match against `subject`.
    ///
    /// Values produced by extractors are moved into `scope` and bound by
    /// reference, so the returned bindings live no longer than the scope.
    /// An [`InvalidSubject`] anywhere in the subject aborts the match.
    pub fn matches<'s>(
        &'s self,
        subject: &'s dyn Subject,
        scope: &'s Scope<'s>,
    ) -> Result<MatchResult<'s>, InvalidSubject> {
        let mut slots: Slots<'s> = smallvec![None; self.names.len()];
        if match_node(&self.root, subject, scope, &mut slots)? {
            Ok(MatchResult::Success(Bindings::new(&self.names, slots)))
        } else {
            Ok(MatchResult::Failure)
        }
    }
}

fn match_node<'s>(
    node: &'s Node,
    subject: &'s dyn Subject,
    scope: &'s Scope<'s>,
    slots: &mut Slots<'s>,
) -> Result<bool, InvalidSubject> {
    ensure_sufficient_stack(|| match node {
        Node::Wildcard => Ok(true),
        Node::Bind(slot) => {
            set(slots, *slot, subject);
            Ok(true)
        }
        Node::Constant(constant) => Ok(constant.matches(subject)),
        Node::Structural(children) => {
            let Some(components) = subject.components()? else {
                return Ok(false);
            };
            if components.len() != children.len() {
                return Ok(false);
            }
            for (child, component) in children.iter().zip(components) {
                if !match_node(child, component, scope, slots)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Node::Alternative { test, inner } => {
            let Some(active) = subject.active()? else {
                return Ok(false);
            };
            let selected = match test {
                AltTest::Indices(indices) => indices.contains(&active.index),
                AltTest::Dynamic(selector) => {
                    selector.accepts(&AltInfo::of_payload(active.index, active.payload))
                }
            };
            if !selected {
                return Ok(false);
            }
            match_node(inner, active.payload, scope, slots)
        }
        Node::At { slot, inner } => {
            if match_node(inner, subject, scope, slots)? {
                set(slots, *slot, subject);
                Ok(true)
            } else {
                Ok(false)
            }
        }
        Node::Extractor { extractor, inner } => {
            let value: &'s dyn Subject = match extractor.extract(subject) {
                None => return Ok(false),
                Some(Extracted::Borrowed(part)) => part,
                Some(Extracted::Owned(owned)) => &**scope.to_scope(owned),
            };
            match_node(inner, value, scope, slots)
        }
        Node::Or(branches) => {
            for branch in branches.iter() {
                if match_node(branch, subject, scope, slots)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    })
}

fn set<'s>(slots: &mut Slots<'s>, slot: usize, value: &'s dyn Subject) {
    if let Some(entry) = slots.get_mut(slot) {
        *entry = Some(value);
    }
}
