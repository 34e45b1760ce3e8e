use tracing::instrument;

use crate::errors::{Result, ShellError, ShellErrorType};
use crate::ftree::{FileContent, FileTree, NodeId, TreeNode};

impl FileTree {
    #[instrument(skip(self))]
    pub fn mkdir(&mut self, cwd: NodeId, name: &str) -> Result<NodeId> {
        if self.file_exist(cwd, name).is_some() {
            tracing::info!("{} already exists in {}", name, self.name(cwd));
            return Err(ShellError::new(
                ShellErrorType::AlreadyExists,
                format!("mkdir: cannot create directory '{}': File exists", name),
            ));
        }
        let id = self.insert_child(cwd, TreeNode::folder(name.to_string(), Some(cwd)));
        tracing::debug!("Created folder {} in {}", name, self.name(cwd));
        Ok(id)
    }

    /// Creates an empty-or-filled file. An existing entry of that name is left
    /// untouched and returned, so this never fails.
    #[instrument(skip(self, content))]
    pub fn touch(&mut self, cwd: NodeId, name: &str, content: &str) -> Result<NodeId> {
        if let Some(existing) = self.file_exist(cwd, name) {
            return Ok(existing);
        }
        let id = self.insert_child(
            cwd,
            TreeNode::file(name.to_string(), cwd, FileContent::new(content)),
        );
        tracing::debug!("Created file {} in {}", name, self.name(cwd));
        Ok(id)
    }

    #[instrument(skip(self))]
    pub fn rm(&mut self, cwd: NodeId, name: &str) -> Result<()> {
        let Some(target) = self.file_exist(cwd, name) else {
            return Err(ShellError::new(
                ShellErrorType::NotFound,
                format!("rm: failed to remove '{}': No such file or directory", name),
            ));
        };
        if self.is_folder(target) {
            tracing::info!("Refusing to rm folder {}", name);
            return Err(ShellError::new(
                ShellErrorType::IsDirectory,
                format!("rm: cannot remove '{}': Is a directory", name),
            ));
        }
        self.destroy(target);
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn rmdir(&mut self, cwd: NodeId, name: &str) -> Result<()> {
        let Some(target) = self.file_exist(cwd, name) else {
            return Err(ShellError::new(
                ShellErrorType::NotFound,
                format!("rmdir: failed to remove '{}': No such file or directory", name),
            ));
        };
        match self.node(target).children() {
            None => Err(ShellError::new(
                ShellErrorType::NotDirectory,
                format!("rmdir: failed to remove '{}': Not a directory", name),
            )),
            Some(children) if !children.is_empty() => Err(ShellError::new(
                ShellErrorType::NotEmpty,
                format!("rmdir: failed to remove '{}': Directory not empty", name),
            )),
            Some(_) => {
                self.destroy(target);
                Ok(())
            }
        }
    }

    /// Removes an entry of either kind together with everything below it.
    /// Returns the number of nodes released.
    #[instrument(skip(self))]
    pub fn rmrec(&mut self, cwd: NodeId, name: &str) -> Result<usize> {
        let Some(target) = self.file_exist(cwd, name) else {
            return Err(ShellError::new(
                ShellErrorType::NotFound,
                format!("rmrec: failed to remove '{}': No such file or directory", name),
            ));
        };
        let released = self.destroy(target);
        tracing::debug!("Released {} nodes under {}", released, name);
        Ok(released)
    }
}
