//! An in-memory [`IndexCursor`] used only by this crate's own tests.
//!
//! Models the descriptor index as a depth-2 tree: a single internal
//! root node whose sub nodes are, in traversal order, the leaves given
//! to [`MockCursor::new`]. Enough to encode out-of-order parent
//! arrival, orphans, duplicate ids, and deep parent chains without
//! needing a real index page format.

use std::convert::Infallible;

use crate::cursor::{IndexCursor, IndexValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MockNode {
    Root,
    Leaf(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct MockLeaf {
    pub identifier: u32,
    pub parent_identifier: u32,
    pub data_identifier: u64,
    pub local_descriptors_identifier: u64,
    pub deleted: bool,
}

impl MockLeaf {
    pub fn new(identifier: u32, parent_identifier: u32) -> Self {
        MockLeaf {
            identifier,
            parent_identifier,
            data_identifier: 0,
            local_descriptors_identifier: 0,
            deleted: false,
        }
    }
}

pub(crate) struct MockCursor {
    leaves: Vec<MockLeaf>,
}

impl MockCursor {
    pub fn new(leaves: Vec<MockLeaf>) -> Self {
        MockCursor { leaves }
    }

    pub fn root(&self) -> MockNode {
        MockNode::Root
    }
}

impl IndexCursor for MockCursor {
    type Node = MockNode;
    type Error = Infallible;

    fn number_of_sub_nodes(&mut self, node: MockNode) -> Result<usize, Infallible> {
        Ok(match node {
            MockNode::Root => self.leaves.len(),
            MockNode::Leaf(_) => 0,
        })
    }

    fn sub_node_by_index(&mut self, node: MockNode, index: usize) -> Result<MockNode, Infallible> {
        match node {
            MockNode::Root => Ok(MockNode::Leaf(index)),
            MockNode::Leaf(_) => panic!("leaves have no sub nodes"),
        }
    }

    fn is_leaf(&mut self, node: MockNode) -> Result<bool, Infallible> {
        Ok(matches!(node, MockNode::Leaf(_)))
    }

    fn is_deleted(&mut self, node: MockNode) -> Result<bool, Infallible> {
        Ok(match node {
            MockNode::Root => false,
            MockNode::Leaf(index) => self.leaves[index].deleted,
        })
    }

    fn node_value(&mut self, node: MockNode) -> Result<IndexValue, Infallible> {
        let MockNode::Leaf(index) = node else {
            panic!("only leaves carry an index value")
        };
        let leaf = &self.leaves[index];
        Ok(IndexValue {
            identifier: leaf.identifier as u64,
            parent_identifier: leaf.parent_identifier,
            data_identifier: leaf.data_identifier,
            local_descriptors_identifier: leaf.local_descriptors_identifier,
        })
    }

    fn lookup_leaf_by_identifier(&mut self, id: u32) -> Result<Option<MockNode>, Infallible> {
        Ok(self
            .leaves
            .iter()
            .position(|leaf| leaf.identifier == id)
            .map(MockNode::Leaf))
    }
}
