//! Depth-first construction of an [`ItemTree`] from a
//! [`crate::cursor::IndexCursor`].
//!
//! Mirrors `libpff_item_tree_create_node` / `libpff_item_tree_create_leaf_node`:
//! walk the on-disk descriptor index depth-first, skip deleted
//! subtrees, recurse into internal nodes, and hand leaves to
//! [`ItemTreeBuilder::process_leaf`], which does the actual item-tree
//! insertion, root-folder detection, read-ahead, and orphan collection.

use log::{debug, trace, warn};

use crate::config::BuildConfig;
use crate::cursor::IndexCursor;
use crate::descriptor::ItemDescriptor;
use crate::errors::{BuildError, TreeError};

use super::imp::ItemTree;

/// Builds an [`ItemTree`] by walking a [`IndexCursor`] depth-first.
///
/// A builder is single-use: construct one, call [`ItemTreeBuilder::build`]
/// once against an empty tree, and discard it.
pub struct ItemTreeBuilder<'c, C: IndexCursor> {
    cursor: &'c mut C,
    config: BuildConfig,
}

impl<'c, C: IndexCursor> ItemTreeBuilder<'c, C> {
    pub fn new(cursor: &'c mut C, config: BuildConfig) -> Self {
        ItemTreeBuilder { cursor, config }
    }

    /// Populates `tree` (which must be empty, i.e. freshly created via
    /// [`ItemTree::new`]) from the descriptor index reachable from
    /// `cursor_root`.
    ///
    /// On success, `tree.root_folder()` holds the self-parented root
    /// folder node if one was seen, and `tree.orphans()` holds every
    /// leaf whose parent could not be located. On a fatal error the
    /// tree may be partially populated; callers should drop it, which
    /// frees every node allocated so far.
    pub fn build(&mut self, tree: &mut ItemTree, cursor_root: C::Node) -> Result<(), BuildError<C::Error>> {
        tree.set_max_recursion_depth(self.config.max_recursion_depth);
        self.visit_index_node(tree, cursor_root, 0)
    }

    fn visit_index_node(
        &mut self,
        tree: &mut ItemTree,
        node: C::Node,
        depth: u32,
    ) -> Result<(), BuildError<C::Error>> {
        if depth > self.config.max_recursion_depth {
            return Err(TreeError::OutOfBounds("recursion depth exceeded while walking the descriptor index").into());
        }

        let number_of_sub_nodes = match self.cursor.number_of_sub_nodes(node) {
            Ok(count) => count,
            Err(error) => {
                // Corrupt-subtree tolerance: the probe at the top of a
                // subtree is the one cursor failure this builder
                // swallows. Everything below `node` is skipped; the
                // overall build continues.
                warn!(
                    "unable to retrieve number of sub nodes from descriptor index tree node, skipping subtree: {}",
                    error
                );
                tree.mark_corrupt();
                return Ok(());
            }
        };

        if self.cursor.is_deleted(node).map_err(BuildError::Cursor)? {
            return Ok(());
        }

        if self.cursor.is_leaf(node).map_err(BuildError::Cursor)? {
            self.process_leaf(tree, node, depth)
        } else {
            for index in 0..number_of_sub_nodes {
                let sub_node = self.cursor.sub_node_by_index(node, index).map_err(BuildError::Cursor)?;
                self.visit_index_node(tree, sub_node, depth + 1)?;
            }
            Ok(())
        }
    }

    /// Creates an item tree node from a descriptor index leaf. If the
    /// leaf's parent cannot be located, even after read-ahead, it is
    /// appended to the orphan list instead of failing the build.
    fn process_leaf(&mut self, tree: &mut ItemTree, node: C::Node, depth: u32) -> Result<(), BuildError<C::Error>> {
        let index_value = self.cursor.node_value(node).map_err(BuildError::Cursor)?;

        if index_value.identifier > u32::MAX as u64 {
            return Err(TreeError::OutOfBounds("descriptor index identifier value exceeds maximum").into());
        }

        // Copy out everything needed before any further cursor call,
        // per the IndexCursor contract (`node_value`'s result may be
        // invalidated by the cursor's next call).
        let identifier = index_value.identifier as u32;
        let parent_identifier = index_value.parent_identifier;
        let descriptor = ItemDescriptor::new(
            identifier,
            index_value.data_identifier,
            index_value.local_descriptors_identifier,
            false,
        );

        // The root folder index descriptor points to itself as its
        // parent; this short-circuits before the general parent search,
        // matching libpff_item_tree_create_leaf_node. `insert_leaf`'s
        // own duplicate-descriptor tolerance means read-ahead revisiting
        // this same leaf a second time (normal traversal catching up to
        // a root synthesized early) returns the same node id rather than
        // a new one; only a genuinely distinct self-parented leaf trips
        // `DuplicateRoot`.
        if identifier == parent_identifier {
            let root_node = tree.insert_leaf(tree.root(), descriptor)?;
            match tree.root_folder() {
                None => tree.set_root_folder(root_node)?,
                Some(existing) if existing == root_node => {}
                Some(_) => return Err(TreeError::DuplicateRoot.into()),
            }
            return Ok(());
        }

        if let Some(parent) = tree.find_node_by_descriptor_id(parent_identifier)? {
            tree.insert_leaf(parent, descriptor)?;
            return Ok(());
        }

        trace!("reading ahead for descriptor: {identifier} parent {parent_identifier}");

        let parent_leaf = self
            .cursor
            .lookup_leaf_by_identifier(parent_identifier)
            .map_err(BuildError::Cursor)?;

        if let Some(parent_leaf) = parent_leaf {
            self.visit_index_node(tree, parent_leaf, depth + 1)?;

            if let Some(parent) = tree.find_node_by_descriptor_id(parent_identifier)? {
                tree.insert_leaf(parent, descriptor)?;
                return Ok(());
            }
        }

        debug!("parent node: {parent_identifier} missing - found orphan node: {identifier}");
        tree.push_orphan(descriptor)?;
        Ok(())
    }
}
