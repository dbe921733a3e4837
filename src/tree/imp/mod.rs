//! Arena-backed item tree and the post-build navigation surface.
//!
//! The tree is modeled as a single arena (`Vec<Node>`) owned by
//! [`ItemTree`], with parent and child links stored as stable
//! [`NodeId`] indices rather than pointers, in place of the on-disk
//! format's raw child/parent tree-node pointers: it sidesteps
//! reference cycles entirely, and dropping the arena frees every node
//! and descriptor in one pass, so there is no hand-written recursive
//! free.
//!
//! Orphans (leaves whose parent could not be located, even after
//! read-ahead) live in the same arena as ordinary nodes: they simply
//! have no parent and are not reachable by descending from the root.
//! `ItemTree::orphans` tracks their ids separately so the two
//! populations stay distinguishable.

use std::cmp::Ordering;

use crate::descriptor::ItemDescriptor;
use crate::errors::TreeError;

/// Stable index of a node within an [`ItemTree`]'s arena.
///
/// `NodeId` values are only meaningful relative to the [`ItemTree`]
/// that produced them; indexing a different tree with one is a logic
/// error the API surfaces as [`TreeError::InvalidArgument`] rather than
/// a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// The synthetic root every [`ItemTree`] is created with.
pub const ROOT: NodeId = NodeId(0);

/// Result of an identifier search: `NotFound` is an ordinary, expected
/// outcome and never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Found(NodeId),
    NotFound,
}

impl Lookup {
    pub fn into_option(self) -> Option<NodeId> {
        match self {
            Lookup::Found(id) => Some(id),
            Lookup::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

struct Node {
    value: ItemDescriptor,
    parent: Option<NodeId>,
    /// Ascending by `value.descriptor_id()`, except for nodes attached
    /// via [`ItemTree::append_identifier_under_node`], which are always
    /// appended last regardless of order.
    children: Vec<NodeId>,
}

enum InsertOutcome {
    Inserted(NodeId),
    Duplicate,
}

/// The in-memory item tree reconstructed from an on-disk descriptor
/// index.
pub struct ItemTree {
    arena: Vec<Node>,
    orphans: Vec<NodeId>,
    root_folder: Option<NodeId>,
    corrupt: bool,
    max_recursion_depth: u32,
}

impl ItemTree {
    /// Creates an empty tree holding only the synthetic root
    /// (descriptor_id 0).
    pub fn new() -> Self {
        ItemTree::with_max_recursion_depth(crate::config::DEFAULT_MAX_RECURSION_DEPTH)
    }

    pub(crate) fn with_max_recursion_depth(max_recursion_depth: u32) -> Self {
        ItemTree {
            arena: vec![Node {
                value: ItemDescriptor::synthetic_root(),
                parent: None,
                children: Vec::new(),
            }],
            orphans: Vec::new(),
            root_folder: None,
            corrupt: false,
            max_recursion_depth,
        }
    }

    /// The synthetic root node. Always present, always [`ROOT`].
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// The node whose descriptor is self-parented in the source data,
    /// if one has been seen during build.
    pub fn root_folder(&self) -> Option<NodeId> {
        self.root_folder
    }

    /// Leaves whose parent could not be located even after read-ahead.
    pub fn orphans(&self) -> &[NodeId] {
        &self.orphans
    }

    /// Whether a subtree was skipped during build due to a tolerated
    /// cursor I/O error. A `true` value means the tree is usable but
    /// incomplete.
    pub fn is_corrupt(&self) -> bool {
        self.corrupt
    }

    pub(crate) fn mark_corrupt(&mut self) {
        self.corrupt = true;
    }

    pub(crate) fn set_max_recursion_depth(&mut self, depth: u32) {
        self.max_recursion_depth = depth;
    }

    pub(crate) fn max_recursion_depth(&self) -> u32 {
        self.max_recursion_depth
    }

    fn in_bounds(&self, node: NodeId) -> bool {
        (node.0 as usize) < self.arena.len()
    }

    fn check(&self, node: NodeId) -> Result<(), TreeError> {
        if self.in_bounds(node) {
            Ok(())
        } else {
            Err(TreeError::InvalidArgument("node id does not belong to this tree"))
        }
    }

    /// The descriptor carried by `node`.
    pub fn descriptor(&self, node: NodeId) -> Result<&ItemDescriptor, TreeError> {
        self.check(node)?;
        Ok(&self.arena[node.0 as usize].value)
    }

    /// The immediate children of `node`, sorted ascending by
    /// descriptor_id (except for any appended out-of-order via
    /// [`ItemTree::append_identifier_under_node`]).
    pub fn children(&self, node: NodeId) -> Result<&[NodeId], TreeError> {
        self.check(node)?;
        Ok(&self.arena[node.0 as usize].children)
    }

    /// The parent of `node`, or `None` for the root and for orphans.
    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>, TreeError> {
        self.check(node)?;
        Ok(self.arena[node.0 as usize].parent)
    }

    /// Allocates a new, unattached node carrying `value`.
    fn push_node(&mut self, value: ItemDescriptor) -> Result<NodeId, TreeError> {
        self.arena
            .try_reserve(1)
            .map_err(|_| TreeError::AllocationFailure)?;
        let id = NodeId(self.arena.len() as u32);
        self.arena.push(Node {
            value,
            parent: None,
            children: Vec::new(),
        });
        Ok(id)
    }

    /// Discards a node that was allocated but could not be attached
    /// anywhere. Only valid for the node most recently pushed, which
    /// is the only case the builder ever needs: a rejected duplicate
    /// insert frees the just-allocated node immediately.
    fn discard_unattached(&mut self, node: NodeId) {
        debug_assert_eq!(node.0 as usize, self.arena.len() - 1);
        self.arena.pop();
    }

    fn child_search(&self, parent: NodeId, descriptor_id: u32) -> Result<usize, usize> {
        self.arena[parent.0 as usize]
            .children
            .binary_search_by(|&id| self.arena[id.0 as usize].value.descriptor_id().cmp(&descriptor_id))
    }

    /// Inserts `child` under `parent` preserving the sorted-unique
    /// sibling invariant. If a sibling with the same descriptor_id
    /// already exists, `child` is discarded and `Duplicate` is
    /// returned; the caller is expected to report that as a successful
    /// no-op.
    fn insert_child_sorted(&mut self, parent: NodeId, child: NodeId) -> Result<InsertOutcome, TreeError> {
        let descriptor_id = self.arena[child.0 as usize].value.descriptor_id();
        match self.child_search(parent, descriptor_id) {
            Ok(_) => {
                self.discard_unattached(child);
                Ok(InsertOutcome::Duplicate)
            }
            Err(pos) => {
                self.arena[parent.0 as usize]
                    .children
                    .try_reserve(1)
                    .map_err(|_| TreeError::AllocationFailure)?;
                self.arena[parent.0 as usize].children.insert(pos, child);
                self.arena[child.0 as usize].parent = Some(parent);
                Ok(InsertOutcome::Inserted(child))
            }
        }
    }

    /// Attempts to insert a freshly-allocated leaf descriptor under
    /// `parent`. On a duplicate descriptor_id, the new node is freed
    /// and the insertion is reported as a successful no-op (returns
    /// the existing sibling's id).
    pub(crate) fn insert_leaf(&mut self, parent: NodeId, descriptor: ItemDescriptor) -> Result<NodeId, TreeError> {
        self.check(parent)?;
        let new_node = self.push_node(descriptor)?;
        match self.insert_child_sorted(parent, new_node)? {
            InsertOutcome::Inserted(id) => Ok(id),
            InsertOutcome::Duplicate => {
                // Identify the existing sibling so callers that need a
                // handle (the root-folder case) still get one.
                let pos = self
                    .child_search(parent, descriptor.descriptor_id())
                    .expect("duplicate search must locate the existing sibling");
                Ok(self.arena[parent.0 as usize].children[pos])
            }
        }
    }

    /// Allocates a standalone node and records it as an orphan: no
    /// parent, not reachable from the root.
    pub(crate) fn push_orphan(&mut self, descriptor: ItemDescriptor) -> Result<NodeId, TreeError> {
        let id = self.push_node(descriptor)?;
        self.orphans
            .try_reserve(1)
            .map_err(|_| TreeError::AllocationFailure)?;
        self.orphans.push(id);
        Ok(id)
    }

    pub(crate) fn set_root_folder(&mut self, node: NodeId) -> Result<(), TreeError> {
        if self.root_folder.is_some() {
            return Err(TreeError::DuplicateRoot);
        }
        self.root_folder = Some(node);
        Ok(())
    }

    /// Depth-first pre-order search for the node carrying `id`,
    /// starting at the synthetic root. `id == 0` returns the synthetic
    /// root itself.
    pub fn find_by_identifier(&self, id: u32) -> Result<Lookup, TreeError> {
        self.find_from(ROOT, id, 0)
    }

    pub(crate) fn find_node_by_descriptor_id(&self, id: u32) -> Result<Option<NodeId>, TreeError> {
        Ok(self.find_by_identifier(id)?.into_option())
    }

    fn find_from(&self, node: NodeId, id: u32, depth: u32) -> Result<Lookup, TreeError> {
        if depth > self.max_recursion_depth {
            return Err(TreeError::OutOfBounds(
                "recursion depth exceeded while searching the item tree",
            ));
        }
        if self.arena[node.0 as usize].value.descriptor_id() == id {
            return Ok(Lookup::Found(node));
        }
        for &child in &self.arena[node.0 as usize].children {
            if let Lookup::Found(found) = self.find_from(child, id, depth + 1)? {
                return Ok(Lookup::Found(found));
            }
        }
        Ok(Lookup::NotFound)
    }

    /// Single-level scan of `node`'s immediate children for `id`.
    /// Sorted children let the scan stop as soon as a sibling's
    /// descriptor_id exceeds `id`.
    pub fn find_direct_child_by_identifier(&self, node: NodeId, id: u32) -> Result<Lookup, TreeError> {
        self.check(node)?;
        for &child in &self.arena[node.0 as usize].children {
            let cid = self.arena[child.0 as usize].value.descriptor_id();
            match cid.cmp(&id) {
                Ordering::Equal => return Ok(Lookup::Found(child)),
                Ordering::Greater => break,
                Ordering::Less => {}
            }
        }
        Ok(Lookup::NotFound)
    }

    /// Attaches a new child under `node` unconditionally, at the end of
    /// its child list, without the sorted-unique check performed
    /// during build. Used by recovery / orphan-promotion paths outside
    /// the core build.
    pub fn append_identifier_under_node(
        &mut self,
        node: NodeId,
        descriptor_id: u32,
        data_id: u64,
        local_descriptors_id: u64,
        recovered: bool,
    ) -> Result<NodeId, TreeError> {
        self.check(node)?;
        let descriptor = ItemDescriptor::new(descriptor_id, data_id, local_descriptors_id, recovered);
        let child = self.push_node(descriptor)?;
        self.arena[node.0 as usize]
            .children
            .try_reserve(1)
            .map_err(|_| TreeError::AllocationFailure)?;
        self.arena[node.0 as usize].children.push(child);
        self.arena[child.0 as usize].parent = Some(node);
        Ok(child)
    }
}

impl Default for ItemTree {
    fn default() -> Self {
        ItemTree::new()
    }
}
