use crate::snapshot::{Content, NodeId, Snapshot};
use core::fmt::Display;
use itertools::Itertools;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Reason {
    #[strum(to_string = "types differ")]
    TypeMismatch,
    #[strum(to_string = "values differ")]
    ValueMismatch,
    #[strum(to_string = "variants differ")]
    VariantMismatch,
    #[strum(to_string = "lengths differ")]
    LengthMismatch,
    #[strum(to_string = "key missing")]
    MissingKey,
}

/// The first structural difference between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    /// Location of the difference, starting at `$`.
    pub path: String,
    pub reason: Reason,
    pub expected: String,
    pub actual: String,
}

impl Display for Difference {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Not equal at {}: {}\nexpected: {}\nactual  : {}",
            self.path, self.reason, self.expected, self.actual
        )
    }
}

/// Compares two snapshots depth-first in field, index and key order.
///
/// Decimal leaves always match here; they are compared by value during the
/// traversal pass. Pointer targets are paired coinductively: a pair already
/// under comparison is taken as equal, which ends the walk on cycles.
pub fn first_difference(
    expected: &Snapshot,
    actual: &Snapshot,
) -> Option<Difference> {
    let mut stack = vec![(expected.root(), actual.root(), "$".to_string())];
    let mut paired = HashSet::new();

    while let Some((e, a, path)) = stack.pop() {
        let (e_node, a_node) = (expected.node(e), actual.node(a));
        let mismatch = |reason| {
            Some(Difference {
                path: path.clone(),
                reason,
                expected: render(expected, e),
                actual: render(actual, a),
            })
        };

        if e_node.type_name != a_node.type_name {
            return mismatch(Reason::TypeMismatch);
        }

        match (&e_node.content, &a_node.content) {
            (Content::Zero, Content::Zero)
            | (Content::Decimal(_), Content::Decimal(_)) => {}
            (Content::Scalar(x), Content::Scalar(y)) => {
                if !x.same(y) {
                    return mismatch(Reason::ValueMismatch);
                }
            }
            (Content::Pointer(x), Content::Pointer(y)) => {
                if paired.insert((*x, *y)) {
                    stack.push((*x, *y, path.clone()));
                }
            }
            (
                Content::Record {
                    variant: x_variant,
                    fields: x_fields,
                },
                Content::Record {
                    variant: y_variant,
                    fields: y_fields,
                },
            ) => {
                if x_variant != y_variant {
                    return mismatch(Reason::VariantMismatch);
                }
                if x_fields.len() != y_fields.len() {
                    return mismatch(Reason::ValueMismatch);
                }
                for ((name, x), (_, y)) in x_fields.iter().zip(y_fields).rev() {
                    stack.push((*x, *y, format!("{path}.{name}")));
                }
            }
            (Content::Sequence(x), Content::Sequence(y)) => {
                if x.len() != y.len() {
                    return mismatch(Reason::LengthMismatch);
                }
                for (index, (x, y)) in x.iter().zip(y).enumerate().rev() {
                    stack.push((*x, *y, format!("{path}[{index}]")));
                }
            }
            (Content::Mapping(x), Content::Mapping(y)) => {
                if x.len() != y.len() {
                    return mismatch(Reason::LengthMismatch);
                }
                let mut children = Vec::with_capacity(x.len());
                for (key, x) in x {
                    let Some(y) = y.get(key) else {
                        return Some(Difference {
                            path: format!("{path}[{key}]"),
                            reason: Reason::MissingKey,
                            expected: render(expected, *x),
                            actual: "<missing>".to_string(),
                        });
                    };
                    children.push((*x, *y, format!("{path}[{key}]")));
                }
                stack.extend(children.into_iter().rev());
            }
            (Content::Wrapper(x), Content::Wrapper(y)) => {
                stack.push((*x, *y, path.clone()));
            }
            _ => return mismatch(Reason::ValueMismatch),
        }
    }
    None
}

/// One-line rendering of a node. Pointers render as their target type only,
/// so cyclic snapshots render finitely.
pub fn render(snapshot: &Snapshot, id: NodeId) -> String {
    let node = snapshot.node(id);
    let type_name = short_type_name(node.type_name);
    match &node.content {
        Content::Pending => format!("<{type_name}>"),
        Content::Zero => format!("{type_name}::default()"),
        Content::Decimal(value) => value.to_string(),
        Content::Scalar(value) => value.to_string(),
        Content::Pointer(target) => {
            format!("&{}", short_type_name(snapshot.node(*target).type_name))
        }
        Content::Record { variant, fields } => {
            let name = match variant {
                Some(variant) => format!("{type_name}::{variant}"),
                None => type_name,
            };
            if fields.is_empty() {
                name
            } else {
                format!(
                    "{name} {{ {} }}",
                    fields
                        .iter()
                        .map(|(field, value)| format!(
                            "{field}: {}",
                            render_leaf(snapshot, *value)
                        ))
                        .join(", ")
                )
            }
        }
        Content::Sequence(items) => format!("{type_name} (len {})", items.len()),
        Content::Mapping(entries) => {
            format!("{type_name} {{ {} }}", entries.keys().join(", "))
        }
        Content::Wrapper(inner) => {
            format!("{type_name}({})", render(snapshot, *inner))
        }
    }
}

/// Leaves render in full, composites are elided.
fn render_leaf(snapshot: &Snapshot, id: NodeId) -> String {
    match &snapshot.node(id).content {
        Content::Decimal(_) | Content::Scalar(_) | Content::Pointer(_) => {
            render(snapshot, id)
        }
        _ => "..".to_string(),
    }
}

/// Strips module paths: `alloc::vec::Vec<my_crate::Line>` becomes `Vec<Line>`.
pub fn short_type_name(name: &str) -> String {
    let mut short = String::with_capacity(name.len());
    let mut segment_start = 0;
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            short.truncate(segment_start);
            continue;
        }
        short.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = short.len();
        }
    }
    short
}
