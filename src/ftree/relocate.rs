use tracing::instrument;

use crate::errors::{Result, ShellError, ShellErrorType};
use crate::ftree::{FileContent, FileTree, NodeId, ResolvePolicy, Resolved, TreeNode};

impl FileTree {
    /// Copies a file. Returns the id of the file that now holds the copy.
    #[instrument(skip(self))]
    pub fn cp(&mut self, cwd: NodeId, source: &str, destination: &str) -> Result<NodeId> {
        let src = self
            .resolve_node(cwd, source, ResolvePolicy::WALK)
            .map_err(|_| {
                ShellError::new(
                    ShellErrorType::NotFound,
                    format!("cp: cannot stat '{}': No such file or directory", source),
                )
            })?;
        if self.is_folder(src) {
            tracing::info!("Refusing to copy folder {}", source);
            return Err(ShellError::new(
                ShellErrorType::IsDirectory,
                format!("cp: -r not specified; omitting directory '{}'", source),
            ));
        }
        let target = self
            .resolve(cwd, destination, ResolvePolicy::DESTINATION)
            .map_err(|_| not_a_directory("cp", destination))?;

        let text = self.file_text(src).map(str::to_string);
        match target {
            Resolved::Node(dest) if self.is_folder(dest) => {
                let name = self.name(src).to_string();
                match self.file_exist(dest, &name) {
                    Some(existing) if self.is_folder(existing) => Err(ShellError::new(
                        ShellErrorType::IsDirectory,
                        format!(
                            "cp: cannot overwrite directory '{}' with non-directory",
                            join_display(destination, &name)
                        ),
                    )),
                    Some(existing) => {
                        self.overwrite(existing, text);
                        Ok(existing)
                    }
                    None => Ok(self.insert_child(
                        dest,
                        TreeNode::file(name, dest, FileContent::from(text)),
                    )),
                }
            }
            Resolved::Node(dest) => {
                self.overwrite(dest, text);
                Ok(dest)
            }
            Resolved::Vacant { parent, name } => Ok(self.insert_child(
                parent,
                TreeNode::file(name.to_string(), parent, FileContent::from(text)),
            )),
        }
    }

    /// Moves a node. Into a folder (or a missing name inside one) the node is
    /// relinked and keeps its own name; onto an existing file only the content
    /// travels and the source node is dropped.
    #[instrument(skip(self))]
    pub fn mv(&mut self, cwd: NodeId, source: &str, destination: &str) -> Result<()> {
        let src = self
            .resolve_node(cwd, source, ResolvePolicy::WALK)
            .map_err(|_| {
                ShellError::new(
                    ShellErrorType::NotFound,
                    format!("mv: cannot stat '{}': No such file or directory", source),
                )
            })?;
        if self.parent(src).is_none() {
            return Err(ShellError::new(
                ShellErrorType::Busy,
                format!("mv: cannot move '{}': Device or resource busy", source),
            ));
        }
        let target = self
            .resolve(cwd, destination, ResolvePolicy::DESTINATION)
            .map_err(|_| not_a_directory("mv", destination))?;

        let folder = match target {
            Resolved::Node(dest) if self.is_file(dest) => {
                return self.merge_into_file(src, dest, source, destination);
            }
            Resolved::Node(dest) => dest,
            Resolved::Vacant { parent, .. } => parent,
        };

        if self.is_within(folder, src) {
            tracing::info!("Refusing to move {} below itself", source);
            return Err(ShellError::new(
                ShellErrorType::InvalidArgument,
                format!(
                    "mv: cannot move '{}' to a subdirectory of itself, '{}'",
                    source, destination
                ),
            ));
        }
        let replaced = self
            .file_exist(folder, self.name(src))
            .filter(|existing| *existing != src);
        if let Some(existing) = replaced {
            if self.is_within(src, existing) || self.is_within(cwd, existing) {
                return Err(ShellError::new(
                    ShellErrorType::Busy,
                    format!(
                        "mv: cannot move '{}' to '{}': Device or resource busy",
                        source, destination
                    ),
                ));
            }
            let released = self.destroy(existing);
            tracing::debug!("Replaced {} nodes at {}", released, destination);
        }

        self.unlink(src);
        self.link(folder, src);
        tracing::debug!("Moved {} into {}", source, self.name(folder));
        Ok(())
    }

    fn merge_into_file(
        &mut self,
        src: NodeId,
        dest: NodeId,
        source: &str,
        destination: &str,
    ) -> Result<()> {
        if src == dest {
            return Ok(());
        }
        if self.is_folder(src) {
            return Err(ShellError::new(
                ShellErrorType::IsDirectory,
                format!(
                    "mv: cannot overwrite non-directory '{}' with directory '{}'",
                    destination, source
                ),
            ));
        }
        let text = self.file_content_mut(src).and_then(FileContent::take);
        self.overwrite(dest, text);
        self.destroy(src);
        Ok(())
    }

    fn overwrite(&mut self, file: NodeId, text: Option<String>) {
        if let Some(content) = self.file_content_mut(file) {
            content.replace(text);
        }
    }
}

fn not_a_directory(command: &str, destination: &str) -> ShellError {
    ShellError::new(
        ShellErrorType::NotDirectory,
        format!("{}: failed to access '{}': Not a directory", command, destination),
    )
}

fn join_display(folder: &str, name: &str) -> String {
    let folder = folder.trim_end_matches('/');
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}
