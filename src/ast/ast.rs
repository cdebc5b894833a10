use std::ops::{Index, IndexMut};

use crate::CodeLoc;

use super::nodes::{DataType, NodeKind, NodeType};

/// Handle of a node inside its `Ast` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Semantic facts attached by the external resolution/type-checking pass.
///
/// `value` is the IR operand naming the node's computed result. For variable
/// declarations and parameters it names the variable's storage slot. `slot` is
/// set on identifier references and assignments and names the storage slot of
/// the variable they resolve to.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub ty: DataType,
    pub value: String,
    pub slot: Option<String>,
}

impl Annotation {
    pub fn new(ty: DataType, value: impl Into<String>) -> Self {
        Annotation {
            ty,
            value: value.into(),
            slot: None,
        }
    }

    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = Some(slot.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub location: CodeLoc,
    children: Vec<NodeId>,
    /// Non-owning back-reference, `None` only for the root.
    parent: Option<NodeId>,
    pub annotation: Option<Annotation>,
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Arena holding one translation unit's tree. The first node added is the root.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Ast {
    pub fn new() -> Self {
        Ast { nodes: vec![] }
    }

    /// Allocates a node and appends it to `parent`'s children.
    pub fn add_node(&mut self, kind: NodeKind, location: CodeLoc, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            location,
            children: vec![],
            parent,
            annotation: None,
        });

        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }

        id
    }

    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId(0))
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn node_type(&self, id: NodeId) -> NodeType {
        self.nodes[id.0].node_type()
    }

    pub fn location(&self, id: NodeId) -> CodeLoc {
        self.nodes[id.0].location
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn child(&self, id: NodeId, n: usize) -> Option<NodeId> {
        self.nodes[id.0].children.get(n).copied()
    }

    /// First child of the given production type.
    pub fn child_of_type(&self, id: NodeId, node_type: NodeType) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| self.node_type(*child) == node_type)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// All nodes reachable from the root, parents before children, left to right.
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut pending: Vec<NodeId> = self.root().into_iter().collect();

        while let Some(id) = pending.pop() {
            order.push(id);
            pending.extend(self.children(id).iter().rev().copied());
        }

        order
    }

    pub fn find_all(&self, node_type: NodeType) -> Vec<NodeId> {
        self.pre_order()
            .into_iter()
            .filter(|id| self.node_type(*id) == node_type)
            .collect()
    }

    pub fn annotate(&mut self, id: NodeId, annotation: Annotation) {
        self.nodes[id.0].annotation = Some(annotation);
    }

    pub fn annotation(&self, id: NodeId) -> Option<&Annotation> {
        self.nodes[id.0].annotation.as_ref()
    }

    pub fn resolved_type(&self, id: NodeId) -> Option<DataType> {
        self.annotation(id).map(|annotation| annotation.ty)
    }

    pub fn result_value_name(&self, id: NodeId) -> Option<&str> {
        self.annotation(id).map(|annotation| annotation.value.as_str())
    }
}

impl Index<NodeId> for Ast {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for Ast {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.0]
    }
}
