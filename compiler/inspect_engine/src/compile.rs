//! Pattern validation and lowering.
//!
//! A [`Pattern`] is checked against the subject's static [`Shape`] and
//! lowered to a [`CompiledPattern`]: binding names become slot indices and
//! selectors over a known union become sets of discriminant indices. All of
//! this happens once per pattern, never per dispatch.
//!
//! Problems are collected rather than returned on first sight, so one build
//! reports every mistake in a case list.

use std::sync::Arc;

use inspect_diagnostic::diagnostic as diag;
use inspect_diagnostic::Diagnostic;
use inspect_ir::{
    AltShape, ConstantPattern, Extract, Location, Name, PathStep, Pattern, Selector, Shape,
};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::stack::ensure_sufficient_stack;
use crate::BuildError;

/// Index into a case's binding slots.
pub(crate) type Slot = usize;

/// Lowered pattern node.
#[derive(Clone, Debug)]
pub(crate) enum Node {
    Wildcard,
    Bind(Slot),
    Constant(Arc<dyn ConstantPattern>),
    Structural(Box<[Node]>),
    Alternative { test: AltTest, inner: Box<Node> },
    At { slot: Slot, inner: Box<Node> },
    Extractor { extractor: Arc<dyn Extract>, inner: Box<Node> },
    Or(Box<[Node]>),
}

/// Discriminant test of an alternative node.
#[derive(Clone, Debug)]
pub(crate) enum AltTest {
    /// Accepted discriminant indices, resolved against a known domain.
    Indices(SmallVec<[usize; 4]>),
    /// Selector tested against the active payload's dynamic type.
    Dynamic(Selector),
}

/// A validated pattern, ready to match.
#[derive(Clone, Debug)]
pub struct CompiledPattern {
    pub(crate) root: Node,
    pub(crate) names: Box<[Name]>,
    source: Pattern,
}

impl CompiledPattern {
    /// The pattern this was compiled from.
    pub fn pattern(&self) -> &Pattern {
        &self.source
    }

    /// Names the pattern binds, in order of first appearance.
    pub fn names(&self) -> &[Name] {
        &self.names
    }
}

/// Validate `pattern` against `shape` and lower it.
///
/// Pass [`Shape::Unknown`] to skip every static check.
pub fn compile(pattern: &Pattern, shape: &Shape) -> Result<CompiledPattern, BuildError> {
    let mut diagnostics = Vec::new();
    let compiled = lower_pattern(pattern, shape, &Location::case_list(), &mut diagnostics);
    if diagnostics.iter().any(Diagnostic::is_error) {
        Err(BuildError::new(diagnostics))
    } else {
        Ok(compiled)
    }
}

/// Lower the pattern of case `case`, pushing problems onto `diagnostics`.
pub(crate) fn lower_case(
    pattern: &Pattern,
    shape: &Shape,
    case: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> CompiledPattern {
    lower_pattern(pattern, shape, &Location::case(case), diagnostics)
}

/// Lower a pattern whose diagnostics are rooted at `root`.
fn lower_pattern(
    pattern: &Pattern,
    shape: &Shape,
    root: &Location,
    diagnostics: &mut Vec<Diagnostic>,
) -> CompiledPattern {
    let mut lowering = Lowering {
        names: Vec::new(),
        bound: FxHashSet::default(),
        diagnostics,
    };
    let root = lowering.lower(pattern, shape, root);
    CompiledPattern {
        root,
        names: lowering.names.into_boxed_slice(),
        source: pattern.clone(),
    }
}

struct Lowering<'d> {
    /// Slot table.
    names: Vec<Name>,
    /// Names bound so far on the current path through or-patterns.
    bound: FxHashSet<Name>,
    diagnostics: &'d mut Vec<Diagnostic>,
}

impl Lowering<'_> {
    fn lower(&mut self, pattern: &Pattern, shape: &Shape, at: &Location) -> Node {
        ensure_sufficient_stack(|| self.lower_inner(pattern, shape, at))
    }

    fn lower_inner(&mut self, pattern: &Pattern, shape: &Shape, at: &Location) -> Node {
        match pattern {
            Pattern::Wildcard => Node::Wildcard,
            Pattern::Identifier(name) => Node::Bind(self.bind(name, at)),
            Pattern::Constant(constant) => Node::Constant(Arc::clone(constant)),
            Pattern::Structural(elements) => self.lower_structural(elements, shape, at),
            Pattern::Alternative { selector, inner } => {
                self.lower_alternative(selector, inner, shape, at)
            }
            Pattern::Binding { name, inner } => {
                let slot = self.bind(name, at);
                let inner = self.lower(inner, shape, &at.child(PathStep::Binding(name.clone())));
                Node::At {
                    slot,
                    inner: Box::new(inner),
                }
            }
            Pattern::Extractor { extractor, inner } => {
                let output = extractor.output_shape();
                let here = at.child(PathStep::Extractor(extractor.name().to_owned()));
                Node::Extractor {
                    extractor: Arc::clone(extractor),
                    inner: Box::new(self.lower(inner, &output, &here)),
                }
            }
            Pattern::Or(branches) => self.lower_or(branches, shape, at),
        }
    }

    fn lower_structural(&mut self, elements: &[Pattern], shape: &Shape, at: &Location) -> Node {
        let element_shapes: Vec<Shape> = match shape {
            Shape::Tuple(fields) => {
                if fields.len() != elements.len() {
                    self.report(diag::arity_mismatch(at.clone(), fields.len(), elements.len()));
                }
                fields.iter().map(|field| field.get()).collect()
            }
            Shape::Scalar | Shape::Union(_) => {
                self.report(diag::not_decomposable(at.clone(), shape.kind()));
                Vec::new()
            }
            Shape::Unknown | Shape::Sequence => Vec::new(),
        };
        let children = elements
            .iter()
            .enumerate()
            .map(|(i, element)| {
                let element_shape = element_shapes.get(i).cloned().unwrap_or(Shape::Unknown);
                self.lower(element, &element_shape, &at.child(PathStep::Element(i)))
            })
            .collect();
        Node::Structural(children)
    }

    fn lower_alternative(
        &mut self,
        selector: &Selector,
        inner: &Pattern,
        shape: &Shape,
        at: &Location,
    ) -> Node {
        let here = at.child(PathStep::Alternative(selector.to_string()));
        match shape {
            Shape::Union(alts) => {
                let indices = self.resolve(selector, alts, at);
                // The payload shape is only known when exactly one alternative
                // can be active here.
                let payload = match indices.as_slice() {
                    [index] => alts
                        .iter()
                        .find(|alt| alt.info.index == *index)
                        .map_or(Shape::Unknown, |alt| alt.payload.get()),
                    _ => Shape::Unknown,
                };
                Node::Alternative {
                    test: AltTest::Indices(indices),
                    inner: Box::new(self.lower(inner, &payload, &here)),
                }
            }
            Shape::Unknown => Node::Alternative {
                test: AltTest::Dynamic(selector.clone()),
                inner: Box::new(self.lower(inner, &Shape::Unknown, &here)),
            },
            Shape::Scalar | Shape::Sequence | Shape::Tuple(_) => {
                self.report(diag::not_a_union(at.clone(), shape.kind()));
                Node::Alternative {
                    test: AltTest::Dynamic(selector.clone()),
                    inner: Box::new(self.lower(inner, &Shape::Unknown, &here)),
                }
            }
        }
    }

    /// Resolve a selector against a known domain.
    fn resolve(
        &mut self,
        selector: &Selector,
        alts: &[AltShape],
        at: &Location,
    ) -> SmallVec<[usize; 4]> {
        let accepted: SmallVec<[usize; 4]> = alts
            .iter()
            .filter(|alt| selector.accepts(&alt.info))
            .map(|alt| alt.info.index)
            .collect();
        match selector {
            Selector::Any => {}
            Selector::Index(index) => {
                if accepted.is_empty() {
                    let valid: Vec<usize> = alts.iter().map(|alt| alt.info.index).collect();
                    self.report(diag::index_out_of_domain(at.clone(), *index, &valid));
                }
            }
            Selector::Type(ty) => {
                if accepted.is_empty() {
                    let domain: Vec<&str> =
                        alts.iter().map(|alt| alt.info.short_type_name()).collect();
                    self.report(diag::type_out_of_domain(at.clone(), ty.short_name(), &domain));
                } else if accepted.len() > 1 {
                    self.report(diag::ambiguous_type(at.clone(), ty.short_name(), &accepted));
                }
            }
            Selector::Concept(concept) => {
                if accepted.is_empty() {
                    self.report(diag::empty_concept(at.clone(), concept.name));
                }
            }
        }
        accepted
    }

    fn lower_or(&mut self, branches: &[Pattern], shape: &Shape, at: &Location) -> Node {
        let before = self.bound.clone();
        let mut first: Option<Vec<Name>> = None;
        let mut after = before.clone();
        let mut nodes = Vec::with_capacity(branches.len());

        for (i, branch) in branches.iter().enumerate() {
            self.bound = before.clone();
            let here = at.child(PathStep::Branch(i));
            nodes.push(self.lower(branch, shape, &here));

            let mut introduced: Vec<Name> = self.bound.difference(&before).cloned().collect();
            introduced.sort();
            match &first {
                None => {
                    after = self.bound.clone();
                    first = Some(introduced);
                }
                Some(expected) if *expected != introduced => {
                    let expected: Vec<&str> = expected.iter().map(|name| &**name).collect();
                    let found: Vec<&str> = introduced.iter().map(|name| &**name).collect();
                    self.report(diag::or_binding_mismatch(here, &expected, &found));
                }
                Some(_) => {}
            }
        }

        self.bound = after;
        Node::Or(nodes.into_boxed_slice())
    }

    /// Record a binding of `name`, returning its slot.
    fn bind(&mut self, name: &Name, at: &Location) -> Slot {
        if !self.bound.insert(name.clone()) {
            self.report(diag::duplicate_binding(at.clone(), name));
        }
        match self.names.iter().position(|known| known == name) {
            Some(slot) => slot,
            None => {
                self.names.push(name.clone());
                self.names.len() - 1
            }
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(code = %diagnostic.code, location = %diagnostic.location, "pattern rejected");
        self.diagnostics.push(diagnostic);
    }
}
