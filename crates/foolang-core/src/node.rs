//! Parse tree nodes
//!
//! Trees are stored as an arena of `NodeData` owned by the unit they were
//! parsed into; `Node` is a cheap borrowed handle pairing a unit with an
//! arena index. The arena is immutable between parses, and indices are only
//! ever resolved with bounds checks, so a handle that survives a reparse
//! degrades to a lookup failure instead of undefined behavior.
//!
//! Copyright (c) 2025 Foolang Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use crate::error::{Error, Result};
use crate::text::SourceLocationRange;
use crate::unit::AnalysisUnit;

/// Kinds of foolang parse tree nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Root node: the list of items in a unit
    ItemList,
    /// An `example` item
    Example,
    /// A `null` item
    NullItem,
}

impl NodeKind {
    /// Stable name for display and C bindings
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::ItemList => "ItemList",
            NodeKind::Example => "Example",
            NodeKind::NullItem => "NullItem",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Index of a node in its unit's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Arena storage for one node
#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: NodeKind,
    pub sloc_range: SourceLocationRange,
    /// Byte range in the unit's source text
    pub start: usize,
    pub end: usize,
    pub children: Vec<NodeId>,
}

/// Borrowed handle on a node of a unit's parse tree
#[derive(Clone, Copy)]
pub struct Node<'u> {
    unit: &'u AnalysisUnit,
    id: NodeId,
}

impl<'u> Node<'u> {
    pub(crate) fn new(unit: &'u AnalysisUnit, id: NodeId) -> Self {
        Self { unit, id }
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn unit(self) -> &'u AnalysisUnit {
        self.unit
    }

    fn data(self) -> &'u NodeData {
        // A Node is only ever built from an id checked against this unit's
        // arena, and the arena does not shrink between parses of a handle's
        // lifetime (the borrow pins the unit).
        &self.unit.arena()[self.id.index()]
    }

    pub fn kind(self) -> NodeKind {
        self.data().kind
    }

    pub fn sloc_range(self) -> SourceLocationRange {
        self.data().sloc_range
    }

    /// This node's slice of the unit's source text
    pub fn text(self) -> &'u str {
        let data = self.data();
        &self.unit.text()[data.start..data.end]
    }

    pub fn children_count(self) -> usize {
        self.data().children.len()
    }

    pub fn child(self, index: usize) -> Option<Node<'u>> {
        let id = *self.data().children.get(index)?;
        Some(Node::new(self.unit, id))
    }

    pub fn children(self) -> impl Iterator<Item = Node<'u>> {
        let unit = self.unit;
        self.data()
            .children
            .iter()
            .map(move |&id| Node::new(unit, id))
    }

    /// Debug image, e.g. `<Example foo.txt:1:1-1:8>`
    pub fn image(self) -> String {
        format!(
            "<{} {}:{}>",
            self.kind().name(),
            self.unit.filename(),
            self.sloc_range()
        )
    }

    /// All items of an `ItemList`, in source order
    pub fn all_items(self) -> Result<Vec<Node<'u>>> {
        self.expect_kind(NodeKind::ItemList)?;
        Ok(self.children().collect())
    }

    /// Items of an `ItemList` that are `Example` nodes
    pub fn example_items(self) -> Result<Vec<Node<'u>>> {
        self.expect_kind(NodeKind::ItemList)?;
        Ok(self
            .children()
            .filter(|child| child.kind() == NodeKind::Example)
            .collect())
    }

    /// Serialize the subtree rooted here
    pub fn to_json(self) -> serde_json::Value {
        json!({
            "kind": self.kind().name(),
            "sloc_range": self.sloc_range(),
            "children": self.children().map(|c| c.to_json()).collect::<Vec<_>>(),
        })
    }

    fn expect_kind(self, expected: NodeKind) -> Result<()> {
        let actual = self.kind();
        if actual == expected {
            Ok(())
        } else {
            Err(Error::KindMismatch { expected, actual })
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.image())
    }
}

/// Number of items in a caller-supplied array of `Example` nodes
///
/// Mirrors the original API's argument checking: handing in an array that
/// contains anything other than `Example` nodes is a usage error, not a
/// silent zero.
pub fn count_examples(items: &[Node<'_>]) -> Result<usize> {
    for item in items {
        if item.kind() != NodeKind::Example {
            return Err(Error::KindMismatch {
                expected: NodeKind::Example,
                actual: item.kind(),
            });
        }
    }
    Ok(items.len())
}
