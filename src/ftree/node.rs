use crate::ftree::children::ChildDirectory;

/// Handle to a node stored in a [`FileTree`](crate::ftree::FileTree).
///
/// Ids are handed out from a counter and never reused, so an id that
/// outlives its node can not silently point at a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn new(raw: u64) -> Self {
        NodeId(raw)
    }

    pub fn index(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContent {
    text: Option<String>,
}

impl FileContent {
    /// Empty input is stored as "no content".
    pub fn new(text: &str) -> Self {
        if text.is_empty() {
            Self { text: None }
        } else {
            Self {
                text: Some(text.to_string()),
            }
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub(crate) fn take(&mut self) -> Option<String> {
        self.text.take()
    }

    pub(crate) fn replace(&mut self, text: Option<String>) {
        self.text = text;
    }
}

impl From<Option<String>> for FileContent {
    fn from(text: Option<String>) -> Self {
        Self { text }
    }
}

#[derive(Debug)]
pub enum NodeContent {
    Folder(ChildDirectory),
    File(FileContent),
}

#[derive(Debug)]
pub struct TreeNode {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) content: NodeContent,
}

impl TreeNode {
    pub(crate) fn folder(name: String, parent: Option<NodeId>) -> Self {
        TreeNode {
            name,
            parent,
            content: NodeContent::Folder(ChildDirectory::default()),
        }
    }

    pub(crate) fn file(name: String, parent: NodeId, content: FileContent) -> Self {
        TreeNode {
            name,
            parent: Some(parent),
            content: NodeContent::File(content),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.content, NodeContent::Folder(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self.content, NodeContent::File(_))
    }

    pub fn children(&self) -> Option<&ChildDirectory> {
        match &self.content {
            NodeContent::Folder(children) => Some(children),
            NodeContent::File(_) => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut ChildDirectory> {
        match &mut self.content {
            NodeContent::Folder(children) => Some(children),
            NodeContent::File(_) => None,
        }
    }

    pub fn file_content(&self) -> Option<&FileContent> {
        match &self.content {
            NodeContent::File(content) => Some(content),
            NodeContent::Folder(_) => None,
        }
    }

    pub(crate) fn file_content_mut(&mut self) -> Option<&mut FileContent> {
        match &mut self.content {
            NodeContent::File(content) => Some(content),
            NodeContent::Folder(_) => None,
        }
    }
}
