// Definition of the in-memory file tree. Every node lives in a single arena
// owned by the tree; folders own their children through their child directory
// and parents are plain ids used only to walk upwards.
//
// The operations themselves are split by concern: resolve (path walking),
// mutate (mkdir/touch/rm/rmdir/rmrec), relocate (cp/mv) and print
// (ls/pwd/tree).

use std::collections::HashMap;

use tracing::instrument;

mod children;
mod mutate;
mod node;
mod print;
mod relocate;
mod resolve;

pub use children::ChildDirectory;
pub use node::{FileContent, NodeContent, NodeId, TreeNode};
pub use print::{Listing, TreeEntry, TreeReport};
pub use resolve::{AboveRoot, MissingLeaf, ResolveError, ResolvePolicy, Resolved};

#[derive(Debug)]
pub struct FileTree {
    nodes: HashMap<NodeId, TreeNode>,
    root: NodeId,
    next_id: u64,
}

impl FileTree {
    #[instrument]
    pub fn create_tree(root_name: &str) -> FileTree {
        let root = NodeId::new(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, TreeNode::folder(root_name.to_string(), None));
        tracing::debug!("Created tree rooted at {}", root_name);
        FileTree {
            nodes,
            root,
            next_id: 1,
        }
    }

    /// Releases every node of the tree and returns how many there were.
    #[instrument(skip(self))]
    pub fn free_tree(mut self) -> usize {
        let released = self.destroy(self.root);
        tracing::debug!("Released {} nodes", released);
        released
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Ids handed to the tree must be live; a stale id is a caller bug and panics.
    pub(crate) fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[&id]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        self.nodes
            .get_mut(&id)
            .unwrap_or_else(|| panic!("node {:?} is not part of this tree", id))
    }

    pub fn name(&self, id: NodeId) -> &str {
        self.node(id).name()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    pub fn is_folder(&self, id: NodeId) -> bool {
        self.node(id).is_folder()
    }

    pub fn is_file(&self, id: NodeId) -> bool {
        self.node(id).is_file()
    }

    /// Children of a folder in listing order. Files yield nothing.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match self.node(id).children() {
            Some(children) => children.iter().collect(),
            None => Vec::new(),
        }
    }

    pub fn child_names(&self, id: NodeId) -> Vec<&str> {
        match self.node(id).children() {
            Some(children) => children.iter().map(|child| self.name(child)).collect(),
            None => Vec::new(),
        }
    }

    pub fn file_text(&self, id: NodeId) -> Option<&str> {
        self.node(id).file_content().and_then(FileContent::text)
    }

    /// Looks `name` up among the direct children of `folder`.
    pub fn file_exist(&self, folder: NodeId, name: &str) -> Option<NodeId> {
        self.node(folder)
            .children()?
            .iter()
            .find(|child| self.name(*child) == name)
    }

    /// True when `node` is `ancestor` or lies somewhere below it.
    pub fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Stores `node` and makes it the first child of `parent`.
    pub(crate) fn insert_child(&mut self, parent: NodeId, mut node: TreeNode) -> NodeId {
        debug_assert!(self.is_folder(parent), "only folders take children");
        let id = self.allocate_id();
        node.parent = Some(parent);
        self.nodes.insert(id, node);
        self.link(parent, id);
        id
    }

    pub(crate) fn link(&mut self, parent: NodeId, id: NodeId) {
        if let Some(children) = self.node_mut(parent).children_mut() {
            children.prepend(id);
        }
        self.node_mut(id).parent = Some(parent);
    }

    pub(crate) fn unlink(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            if let Some(children) = self.node_mut(parent).children_mut() {
                children.remove(id);
            }
        }
    }

    /// Unlinks `id` and drops its whole subtree. Returns the number of nodes released.
    pub(crate) fn destroy(&mut self, id: NodeId) -> usize {
        self.unlink(id);
        let mut released = 0;
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                if let NodeContent::Folder(children) = node.content {
                    pending.extend(children.iter());
                }
                released += 1;
            }
        }
        released
    }

    pub(crate) fn file_content_mut(&mut self, id: NodeId) -> Option<&mut FileContent> {
        self.node_mut(id).file_content_mut()
    }
}
