pub mod diff;

use crate::fault::Fault;
use crate::traits::structural_eq::StructuralEq;
use crate::values::shape::{Pointer, PointerId, Scalar, Shape, Traverse};
use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use log::trace;
use std::collections::HashMap;

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub type_name: &'static str,
    pub content: Content,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Slot of a pointer target whose capture has not finished yet.
    Pending,
    /// A composite zero value, captured without its contents.
    Zero,
    /// Decimals are carried by value and never descended into.
    Decimal(BigDecimal),
    Scalar(Scalar<'static>),
    Pointer(NodeId),
    Record {
        variant: Option<&'static str>,
        fields: Vec<(&'static str, NodeId)>,
    },
    Sequence(Vec<NodeId>),
    Mapping(IndexMap<String, NodeId>),
    /// Interface values and borrowed cells.
    Wrapper(NodeId),
}

/// An owned, independent copy of a value graph.
///
/// Pointer targets are captured once per identity, so shared substructures
/// stay shared in the copy and cycles become cycles between node ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Snapshot {
    pub fn capture(value: &dyn Traverse) -> Result<Self, Fault> {
        let mut capture = Capture::default();
        let root = capture.push(value)?;
        trace!(
            "captured {} nodes for {}",
            capture.nodes.len(),
            value.type_name()
        );
        Ok(Snapshot {
            nodes: capture.nodes,
            root,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Two snapshots are structurally equal if no difference is found. Decimal
/// leaves are not compared.
impl StructuralEq for Snapshot {
    fn structural_eq(&self, other: &Self) -> bool {
        diff::first_difference(self, other).is_none()
    }
}

#[derive(Default)]
struct Capture {
    nodes: Vec<Node>,
    targets: HashMap<PointerId, NodeId>,
}

impl Capture {
    fn push(&mut self, value: &dyn Traverse) -> Result<NodeId, Fault> {
        let content = self.content(value)?;
        self.nodes.push(Node {
            type_name: value.type_name(),
            content,
        });
        Ok(self.nodes.len() - 1)
    }

    fn content(&mut self, value: &dyn Traverse) -> Result<Content, Fault> {
        let content = match value.shape() {
            Shape::Decimal(decimal) => Content::Decimal(decimal.clone()),
            Shape::Scalar(scalar) => Content::Scalar(scalar.into_owned()),
            _ if value.is_zero() => Content::Zero,
            Shape::Pointer(pointer) => Content::Pointer(self.target(pointer)?),
            Shape::Record(record) => {
                let mut fields = Vec::with_capacity(record.fields.len());
                for field in record.fields {
                    fields.push((field.name, self.push(field.value)?));
                }
                Content::Record {
                    variant: record.variant,
                    fields,
                }
            }
            Shape::Sequence(items) => {
                let mut ids = Vec::with_capacity(items.len());
                for item in items {
                    ids.push(self.push(item)?);
                }
                Content::Sequence(ids)
            }
            Shape::Mapping(map) => {
                let mut entries = IndexMap::with_capacity(map.len());
                for key in map.keys() {
                    if let Some(entry) = map.lookup(key.raw)? {
                        let id = self.push(entry)?;
                        if entries.contains_key(&key.label) {
                            return Err(Fault::DuplicateKey {
                                label: key.label,
                                type_name: value.type_name(),
                            });
                        }
                        entries.insert(key.label, id);
                    }
                }
                Content::Mapping(entries)
            }
            Shape::Interface(inner) => Content::Wrapper(self.push(inner)?),
            Shape::Guarded(guarded) => {
                let inner = guarded.borrow_inner()?;
                Content::Wrapper(self.push(&*inner)?)
            }
        };
        Ok(content)
    }

    fn target(&mut self, pointer: Pointer<'_>) -> Result<NodeId, Fault> {
        if let Some(&id) = self.targets.get(&pointer.id) {
            return Ok(id);
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            type_name: pointer.target.type_name(),
            content: Content::Pending,
        });
        self.targets.insert(pointer.id, id);
        let content = self.content(pointer.target)?;
        self.nodes[id].content = content;
        Ok(id)
    }
}
