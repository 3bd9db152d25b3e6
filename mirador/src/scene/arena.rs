//! Node arena
//!
//! Nodes live in a slot vector addressed by stable integer handles. Parents
//! store child handles; destroying a parent cascades through the subtree via
//! explicit arena cleanup, so there is no pointer ownership to get wrong.

use smallvec::SmallVec;

use crate::scene::Node;

/// Stable handle to a node in the arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

/// Slot-vector arena owning every node of a scene
#[derive(Default)]
pub struct NodeArena {
    slots: Vec<Option<Node>>,
    free: Vec<u32>,
    live: usize,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its handle
    pub fn insert(&mut self, node: Node) -> NodeId {
        self.live += 1;
        if let Some(slot) = self.free.pop() {
            self.slots[slot as usize] = Some(node);
            NodeId(slot)
        } else {
            let slot = self.slots.len() as u32;
            self.slots.push(Some(node));
            NodeId(slot)
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0 as usize).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.0 as usize)
            .and_then(|slot| slot.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Make `child` a child of `parent`
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Remove a node and its whole subtree
    pub fn remove(&mut self, id: NodeId) {
        let Some(slot) = self.slots.get_mut(id.0 as usize) else {
            return;
        };
        let Some(node) = slot.take() else {
            return;
        };
        self.live -= 1;
        self.free.push(id.0);
        for child in node.children {
            self.remove(child);
        }
    }

    /// Deep copy of a subtree
    ///
    /// The copy shares nothing with the original: geometry buffers,
    /// transform state and every descendant are cloned by value.
    pub fn clone_subtree(&mut self, id: NodeId) -> Option<NodeId> {
        let (copy, children) = {
            let node = self.get(id)?;
            let mut copy = node.clone();
            let children = std::mem::take(&mut copy.children);
            (copy, children)
        };
        let new_id = self.insert(copy);
        for child in children {
            if let Some(new_child) = self.clone_subtree(child) {
                self.attach_child(new_id, new_child);
            }
        }
        Some(new_id)
    }

    /// Advance motion state for a node and all its descendants
    pub fn update_subtree(&mut self, id: NodeId, dt: f32) {
        let children: SmallVec<[NodeId; 4]> = match self.get_mut(id) {
            Some(node) => {
                node.update(dt);
                node.children.clone()
            }
            None => return,
        };
        for child in children {
            self.update_subtree(child, dt);
        }
    }
}
