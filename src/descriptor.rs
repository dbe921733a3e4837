//! The item descriptor value carried at every node of the item tree.

use std::cmp::Ordering;

/// Identifier triple for a single logical item (folder, message,
/// attachment, ...) plus the flag distinguishing items recovered from
/// deleted regions of the file.
///
/// Immutable once constructed; descriptor_id 0 is legal and is reserved
/// for the synthetic root of an [`crate::tree::ItemTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemDescriptor {
    descriptor_id: u32,
    data_id: u64,
    local_descriptors_id: u64,
    recovered: bool,
}

impl ItemDescriptor {
    /// Creates a new descriptor. Never fails: there is nothing to
    /// validate beyond what the caller already typed-checked.
    pub fn new(descriptor_id: u32, data_id: u64, local_descriptors_id: u64, recovered: bool) -> Self {
        ItemDescriptor {
            descriptor_id,
            data_id,
            local_descriptors_id,
            recovered,
        }
    }

    /// The synthetic root descriptor: id 0, no data, not recovered.
    pub(crate) fn synthetic_root() -> Self {
        ItemDescriptor::new(0, 0, 0, false)
    }

    pub fn descriptor_id(&self) -> u32 {
        self.descriptor_id
    }

    pub fn data_id(&self) -> u64 {
        self.data_id
    }

    pub fn local_descriptors_id(&self) -> u64 {
        self.local_descriptors_id
    }

    pub fn recovered(&self) -> bool {
        self.recovered
    }

    /// Total ordering by descriptor_id, used for the sorted-unique
    /// sibling insertion rule.
    pub fn compare(a: &ItemDescriptor, b: &ItemDescriptor) -> Ordering {
        a.descriptor_id.cmp(&b.descriptor_id)
    }
}

impl PartialOrd for ItemDescriptor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ItemDescriptor {
    fn cmp(&self, other: &Self) -> Ordering {
        ItemDescriptor::compare(self, other)
    }
}
