//! Recency List Module
//!
//! Doubly-linked list of cache entries ordered from most recently used
//! (front) to least recently used (back).
//!
//! Nodes live in an owning arena (`Vec<Node>`) and are addressed through
//! stable `NodeIndex` handles; links are indices rather than pointers, so
//! a handle held by the key index can never dangle. Freed slots are
//! recycled through a free list to avoid allocation churn.

use crate::cache::Entry;

// == Node Index ==
/// Stable handle to a node in the recency list.
///
/// Handles are only ever held by the key index, under the same lock that
/// guards the list, and are invalidated exactly when the index entry for
/// the same key is removed.
pub type NodeIndex = usize;

/// Sentinel value for null links.
const NULL_INDEX: NodeIndex = usize::MAX;

// == List Node ==
/// A node in the recency list: an entry plus its neighbor links.
#[derive(Debug, Clone)]
struct Node {
    /// The stored entry; `None` marks a recycled slot on the free list.
    entry: Option<Entry>,
    /// Index of the previous (more recently used) node.
    prev: NodeIndex,
    /// Index of the next (less recently used) node.
    next: NodeIndex,
}

// == Recency List ==
/// Recency-ordered doubly-linked list with O(1) structural operations.
///
/// Front = most recently used; back = next eviction candidate. The list
/// owns all entry storage: an entry exists exactly as long as its list
/// membership.
#[derive(Debug)]
pub struct RecencyList {
    /// Node arena — contiguous storage for all nodes.
    arena: Vec<Node>,
    /// Indices of recycled arena slots.
    free_list: Vec<NodeIndex>,
    /// Most recently used node, or `NULL_INDEX` when empty.
    head: NodeIndex,
    /// Least recently used node, or `NULL_INDEX` when empty.
    tail: NodeIndex,
    /// Number of live nodes.
    len: usize,
}

impl Default for RecencyList {
    fn default() -> Self {
        Self::new()
    }
}

impl RecencyList {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            free_list: Vec::new(),
            head: NULL_INDEX,
            tail: NULL_INDEX,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an entry at the front (most recently used position).
    ///
    /// Returns a stable handle for the key index. Capacity is enforced by
    /// the caller, not here; this operation cannot fail.
    pub fn push_front(&mut self, entry: Entry) -> NodeIndex {
        let idx = self.alloc_node(entry);
        self.link_front(idx);
        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Relocates an existing node to the front without reallocation.
    ///
    /// No-op if the node is already at the front.
    pub fn move_to_front(&mut self, idx: NodeIndex) {
        if self.head == idx {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    // == Remove ==
    /// Detaches a node and returns its entry, re-linking its neighbors.
    ///
    /// Head, tail, and interior removals are handled uniformly by the
    /// unlink step.
    pub fn remove(&mut self, idx: NodeIndex) -> Entry {
        self.unlink(idx);
        self.len -= 1;
        let entry = self.arena[idx]
            .entry
            .take()
            .expect("remove called on a freed list node");
        self.free_list.push(idx);
        entry
    }

    // == Back ==
    /// Returns the handle of the least recently used node, or `None` if
    /// the list is empty.
    pub fn back(&self) -> Option<NodeIndex> {
        if self.tail == NULL_INDEX {
            None
        } else {
            Some(self.tail)
        }
    }

    // == Accessors ==
    /// Returns the entry behind a handle.
    pub fn entry(&self, idx: NodeIndex) -> &Entry {
        self.arena[idx]
            .entry
            .as_ref()
            .expect("entry called on a freed list node")
    }

    /// Returns a mutable reference to the value behind a handle, for
    /// in-place overwrites. Position is preserved; promotion is a
    /// separate `move_to_front` call by the caller.
    pub fn value_mut(&mut self, idx: NodeIndex) -> &mut String {
        &mut self
            .arena[idx]
            .entry
            .as_mut()
            .expect("value_mut called on a freed list node")
            .value
    }

    // == Length ==
    /// Returns the number of entries in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    /// Returns true if the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Keys Front To Back ==
    /// Returns the keys in recency order, front (most recent) first.
    ///
    /// O(n); used by tests and debug invariant checks only.
    pub fn keys_front_to_back(&self) -> Vec<&str> {
        let mut keys = Vec::with_capacity(self.len);
        let mut idx = self.head;
        while idx != NULL_INDEX {
            let node = &self.arena[idx];
            keys.push(
                node.entry
                    .as_ref()
                    .expect("linked node without an entry")
                    .key
                    .as_str(),
            );
            idx = node.next;
        }
        keys
    }

    // == Internal: Node Management ==
    /// Allocates a slot from the free list or by growing the arena.
    fn alloc_node(&mut self, entry: Entry) -> NodeIndex {
        let node = Node {
            entry: Some(entry),
            prev: NULL_INDEX,
            next: NULL_INDEX,
        };
        if let Some(idx) = self.free_list.pop() {
            self.arena[idx] = node;
            idx
        } else {
            let idx = self.arena.len();
            self.arena.push(node);
            idx
        }
    }

    // == Internal: Linking ==
    /// Links a detached node in at the head position.
    fn link_front(&mut self, idx: NodeIndex) {
        self.arena[idx].prev = NULL_INDEX;
        self.arena[idx].next = self.head;
        if self.head != NULL_INDEX {
            self.arena[self.head].prev = idx;
        }
        self.head = idx;
        if self.tail == NULL_INDEX {
            self.tail = idx;
        }
    }

    /// Detaches a node from the list, keeping head and tail in lock-step.
    fn unlink(&mut self, idx: NodeIndex) {
        let prev = self.arena[idx].prev;
        let next = self.arena[idx].next;

        if prev != NULL_INDEX {
            self.arena[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NULL_INDEX {
            self.arena[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.arena[idx].prev = NULL_INDEX;
        self.arena[idx].next = NULL_INDEX;
    }
}
