//! Coverage analysis over compiled case lists.
//!
//! A row of patterns is *useful* with respect to a matrix of earlier rows if
//! some value matches the row and no row of the matrix. A case list is
//! exhaustive when a wildcard is no longer useful after all unguarded cases;
//! a case is redundant when it is not useful after the unguarded cases
//! before it.
//!
//! Only tuples and closed unions have a constructor signature. Constants,
//! extractors and anything whose shape is unknown, scalar or a sequence are
//! opaque: as matrix rows they cover nothing, as the query row they stand
//! for any value. Redundancy is therefore never over-reported, and
//! exhaustiveness may ask for a catch-all where value-level reasoning would
//! not need one.

use std::fmt;

use inspect_ir::{AltShape, Shape};
use rustc_hash::FxHashSet;

use crate::compile::{AltTest, Node};
use crate::stack::ensure_sufficient_stack;

static WILD: Node = Node::Wildcard;

/// Cap on reported missing patterns.
const MAX_WITNESSES: usize = 5;

type Row<'n> = Vec<&'n Node>;

/// Result of analysing one case list.
#[derive(Debug, Default)]
pub(crate) struct Coverage {
    /// Cases no value can reach.
    pub(crate) redundant: Vec<usize>,
    /// Rendered examples of values no unguarded case matches.
    pub(crate) missing: Vec<String>,
}

/// Analyse cases given as `(pattern, guarded)` in declaration order.
pub(crate) fn check(shape: &Shape, cases: &[(&Node, bool)]) -> Coverage {
    let shapes = [shape.clone()];
    let mut matrix: Vec<Row<'_>> = Vec::new();
    let mut redundant = Vec::new();

    for (index, &(node, guarded)) in cases.iter().enumerate() {
        let row = vec![node];
        if !useful(&matrix, &row, &shapes) {
            redundant.push(index);
        }
        if !guarded {
            matrix.push(row);
        }
    }

    let missing = uncovered(&matrix, &shapes)
        .into_iter()
        .take(MAX_WITNESSES)
        .map(|witness| {
            witness
                .into_iter()
                .next()
                .unwrap_or(Witness::Wild)
                .to_string()
        })
        .collect();

    Coverage { redundant, missing }
}

/// An example of an unmatched value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Witness {
    Wild,
    Alt {
        name: &'static str,
        payload: Box<Witness>,
    },
    Tuple(Vec<Witness>),
}

impl fmt::Display for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Witness::Wild => f.write_str("_"),
            Witness::Alt { name, payload } => match payload.as_ref() {
                Witness::Tuple(items) if items.is_empty() => f.write_str(name),
                Witness::Tuple(_) => write!(f, "{name}{payload}"),
                other => write!(f, "{name}({other})"),
            },
            Witness::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// First-column view of a node under a given shape.
enum Head<'n> {
    Wild,
    Opaque,
    Tuple(&'n [Node]),
    Alt { indices: &'n [usize], inner: &'n Node },
    Or(&'n [Node]),
}

fn head<'n>(node: &'n Node, shape: &Shape) -> Head<'n> {
    match node {
        Node::Wildcard | Node::Bind(_) => Head::Wild,
        Node::At { inner, .. } => head(inner, shape),
        Node::Or(branches) => Head::Or(branches),
        Node::Structural(children) if matches!(shape, Shape::Tuple(_)) => Head::Tuple(children),
        Node::Alternative {
            test: AltTest::Indices(indices),
            inner,
        } if matches!(shape, Shape::Union(_)) => Head::Alt {
            indices: &indices[..],
            inner,
        },
        Node::Constant(_)
        | Node::Extractor { .. }
        | Node::Structural(_)
        | Node::Alternative { .. } => Head::Opaque,
    }
}

/// Constructors present in the first column.
enum Signature<'a> {
    /// Every alternative of the union appears.
    Complete(&'a [AltShape]),
    /// A tuple pattern appears.
    Tuple(Vec<Shape>),
    /// Some alternatives are missing (listed), or there is no signature.
    Incomplete(Vec<&'a AltShape>),
}

fn signature<'a>(matrix: &[Row<'_>], shape: &'a Shape) -> Signature<'a> {
    match shape {
        Shape::Union(alts) => {
            let used: FxHashSet<usize> = matrix
                .iter()
                .filter_map(|row| match head(row.first()?, shape) {
                    Head::Alt { indices, .. } => Some(indices),
                    _ => None,
                })
                .flatten()
                .copied()
                .collect();
            if alts.iter().all(|alt| used.contains(&alt.info.index)) {
                Signature::Complete(alts)
            } else if used.is_empty() {
                Signature::Incomplete(Vec::new())
            } else {
                Signature::Incomplete(
                    alts.iter()
                        .filter(|alt| !used.contains(&alt.info.index))
                        .collect(),
                )
            }
        }
        Shape::Tuple(fields) => {
            let any_tuple = matrix
                .iter()
                .any(|row| row.first().is_some_and(|first| matches!(head(first, shape), Head::Tuple(_))));
            if any_tuple {
                Signature::Tuple(fields.iter().map(|field| field.get()).collect())
            } else {
                Signature::Incomplete(Vec::new())
            }
        }
        Shape::Unknown | Shape::Scalar | Shape::Sequence => Signature::Incomplete(Vec::new()),
    }
}

/// Replace rows whose first column is an or-pattern by one row per branch.
fn expand<'n>(matrix: &[Row<'n>], shape: &Shape) -> Vec<Row<'n>> {
    let mut out = Vec::with_capacity(matrix.len());
    for row in matrix {
        push_expanded(row.clone(), shape, &mut out);
    }
    out
}

fn push_expanded<'n>(row: Row<'n>, shape: &Shape, out: &mut Vec<Row<'n>>) {
    let Some(&first) = row.first() else {
        out.push(row);
        return;
    };
    if let Head::Or(branches) = head(first, shape) {
        for branch in branches {
            push_expanded(prepend(branch, &row[1..]), shape, out);
        }
    } else {
        out.push(row);
    }
}

fn prepend<'n>(first: &'n Node, rest: &[&'n Node]) -> Row<'n> {
    let mut row = Vec::with_capacity(rest.len() + 1);
    row.push(first);
    row.extend_from_slice(rest);
    row
}

fn concat<'n>(head: impl IntoIterator<Item = &'n Node>, rest: &[&'n Node]) -> Row<'n> {
    head.into_iter().chain(rest.iter().copied()).collect()
}

fn shapes_with(head: impl IntoIterator<Item = Shape>, rest: &[Shape]) -> Vec<Shape> {
    head.into_iter().chain(rest.iter().cloned()).collect()
}

/// Rows admitting alternative `index`, first column replaced by its payload.
fn specialize_alt<'n>(matrix: &[Row<'n>], shape: &Shape, index: usize) -> Vec<Row<'n>> {
    matrix
        .iter()
        .filter_map(|row| {
            let (first, rest) = row.split_first()?;
            match head(first, shape) {
                Head::Wild => Some(prepend(&WILD, rest)),
                Head::Alt { indices, inner } if indices.contains(&index) => {
                    Some(prepend(inner, rest))
                }
                _ => None,
            }
        })
        .collect()
}

/// Rows with the first column spread into `arity` component columns.
fn specialize_tuple<'n>(matrix: &[Row<'n>], shape: &Shape, arity: usize) -> Vec<Row<'n>> {
    matrix
        .iter()
        .filter_map(|row| {
            let (first, rest) = row.split_first()?;
            match head(first, shape) {
                Head::Wild => Some(concat(std::iter::repeat(&WILD).take(arity), rest)),
                Head::Tuple(children) if children.len() == arity => {
                    Some(concat(children.iter(), rest))
                }
                _ => None,
            }
        })
        .collect()
}

/// Rows whose first column matches anything, with that column dropped.
fn default_matrix<'n>(matrix: &[Row<'n>], shape: &Shape) -> Vec<Row<'n>> {
    matrix
        .iter()
        .filter_map(|row| {
            let (first, rest) = row.split_first()?;
            matches!(head(first, shape), Head::Wild).then(|| rest.to_vec())
        })
        .collect()
}

fn payload_shape(shape: &Shape, index: usize) -> Shape {
    shape
        .alternatives()
        .and_then(|alts| alts.iter().find(|alt| alt.info.index == index))
        .map_or(Shape::Unknown, |alt| alt.payload.get())
}

fn useful(matrix: &[Row<'_>], query: &[&Node], shapes: &[Shape]) -> bool {
    ensure_sufficient_stack(|| {
        let (Some((first, rest)), Some((shape, rest_shapes))) =
            (query.split_first(), shapes.split_first())
        else {
            return matrix.is_empty();
        };
        let matrix = expand(matrix, shape);

        match head(first, shape) {
            Head::Or(branches) => branches
                .iter()
                .any(|branch| useful(&matrix, &prepend(branch, rest), shapes)),
            Head::Alt { indices, inner } => indices.iter().any(|&index| {
                useful(
                    &specialize_alt(&matrix, shape, index),
                    &prepend(inner, rest),
                    &shapes_with([payload_shape(shape, index)], rest_shapes),
                )
            }),
            Head::Tuple(children) => {
                let fields = match shape {
                    Shape::Tuple(fields) => fields.iter().map(|field| field.get()).collect(),
                    _ => Vec::new(),
                };
                useful(
                    &specialize_tuple(&matrix, shape, children.len()),
                    &concat(children.iter(), rest),
                    &shapes_with(fields, rest_shapes),
                )
            }
            Head::Wild | Head::Opaque => match signature(&matrix, shape) {
                Signature::Complete(alts) => alts.iter().any(|alt| {
                    useful(
                        &specialize_alt(&matrix, shape, alt.info.index),
                        &prepend(&WILD, rest),
                        &shapes_with([alt.payload.get()], rest_shapes),
                    )
                }),
                Signature::Tuple(fields) => useful(
                    &specialize_tuple(&matrix, shape, fields.len()),
                    &concat(std::iter::repeat(&WILD).take(fields.len()), rest),
                    &shapes_with(fields, rest_shapes),
                ),
                Signature::Incomplete(_) => {
                    useful(&default_matrix(&matrix, shape), rest, rest_shapes)
                }
            },
        }
    })
}

/// Witnesses of values matched by no row, one column per shape.
fn uncovered(matrix: &[Row<'_>], shapes: &[Shape]) -> Vec<Vec<Witness>> {
    ensure_sufficient_stack(|| {
        let Some((shape, rest_shapes)) = shapes.split_first() else {
            return if matrix.is_empty() {
                vec![Vec::new()]
            } else {
                Vec::new()
            };
        };
        let matrix = expand(matrix, shape);

        match signature(&matrix, shape) {
            Signature::Complete(alts) => alts
                .iter()
                .flat_map(|alt| {
                    let payload = alt.payload.get();
                    uncovered(
                        &specialize_alt(&matrix, shape, alt.info.index),
                        &shapes_with([payload], rest_shapes),
                    )
                    .into_iter()
                    .map(move |witness| {
                        regroup(witness, 1, |mut inner| Witness::Alt {
                            name: alt.info.name,
                            payload: Box::new(inner.pop().unwrap_or(Witness::Wild)),
                        })
                    })
                })
                .collect(),
            Signature::Tuple(fields) => {
                let arity = fields.len();
                uncovered(
                    &specialize_tuple(&matrix, shape, arity),
                    &shapes_with(fields, rest_shapes),
                )
                .into_iter()
                .map(|witness| regroup(witness, arity, Witness::Tuple))
                .collect()
            }
            Signature::Incomplete(missing) => {
                let tails = uncovered(&default_matrix(&matrix, shape), rest_shapes);
                if tails.is_empty() {
                    return Vec::new();
                }
                let heads: Vec<Witness> = if missing.is_empty() {
                    vec![Witness::Wild]
                } else {
                    missing.iter().map(|&alt| placeholder(alt)).collect()
                };
                heads
                    .iter()
                    .flat_map(|first| {
                        tails.iter().map(move |tail| {
                            let mut witness = Vec::with_capacity(tail.len() + 1);
                            witness.push(first.clone());
                            witness.extend(tail.iter().cloned());
                            witness
                        })
                    })
                    .collect()
            }
        }
    })
}

/// Fold the first `arity` columns of a witness into one.
fn regroup(
    mut witness: Vec<Witness>,
    arity: usize,
    build: impl FnOnce(Vec<Witness>) -> Witness,
) -> Vec<Witness> {
    let tail = witness.split_off(arity.min(witness.len()));
    let mut out = Vec::with_capacity(tail.len() + 1);
    out.push(build(witness));
    out.extend(tail);
    out
}

/// A missing alternative with an arbitrary payload.
fn placeholder(alt: &AltShape) -> Witness {
    let payload = if alt.payload.get().arity() == Some(0) {
        Witness::Tuple(Vec::new())
    } else {
        Witness::Wild
    };
    Witness::Alt {
        name: alt.info.name,
        payload: Box::new(payload),
    }
}
