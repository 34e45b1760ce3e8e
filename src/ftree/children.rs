use std::collections::VecDeque;

use crate::ftree::node::NodeId;

/// The entries of a folder, newest first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChildDirectory {
    entries: VecDeque<NodeId>,
}

impl ChildDirectory {
    pub(crate) fn prepend(&mut self, id: NodeId) {
        self.entries.push_front(id);
    }

    pub(crate) fn remove(&mut self, id: NodeId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn position(&self, id: NodeId) -> Option<usize> {
        self.entries.iter().position(|entry| *entry == id)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
