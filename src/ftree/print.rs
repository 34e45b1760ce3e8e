use std::fmt;

use tracing::instrument;

use crate::errors::{Result, ShellError, ShellErrorType};
use crate::ftree::{FileTree, NodeId, ResolvePolicy};

const TREE_INDENT: usize = 4;

/// What `ls` prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Entries(Vec<String>),
    File {
        name: String,
        content: Option<String>,
    },
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Entries(names) => {
                for name in names {
                    writeln!(f, "{}", name)?;
                }
                Ok(())
            }
            Listing::File { name, content } => {
                writeln!(f, "{}: {}", name, content.as_deref().unwrap_or_default())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub depth: usize,
    pub name: String,
}

/// Pre-order dump of a folder together with its totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeReport {
    pub entries: Vec<TreeEntry>,
    pub directories: usize,
    pub files: usize,
}

impl fmt::Display for TreeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(
                f,
                "{:indent$}{}",
                "",
                entry.name,
                indent = entry.depth * TREE_INDENT
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{} directories, {} files", self.directories, self.files)
    }
}

impl FileTree {
    /// Root name followed by `/segment` for every level below it.
    pub fn pwd(&self, node: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            segments.push(self.name(id));
            current = self.parent(id);
        }
        segments.reverse();
        segments.join("/")
    }

    #[instrument(skip(self))]
    pub fn ls(&self, cwd: NodeId, arg: &str) -> Result<Listing> {
        let target = if arg.is_empty() {
            cwd
        } else {
            self.resolve_node(cwd, arg, ResolvePolicy::NAVIGATE)
                .map_err(|_| {
                    ShellError::new(
                        ShellErrorType::NotFound,
                        format!("ls: cannot access '{}': No such file or directory", arg),
                    )
                })?
        };

        let node = self.node(target);
        match node.file_content() {
            Some(content) => Ok(Listing::File {
                name: node.name().to_string(),
                content: content.text().map(str::to_string),
            }),
            None => Ok(Listing::Entries(
                self.child_names(target)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            )),
        }
    }

    #[instrument(skip(self))]
    pub fn tree(&self, cwd: NodeId, arg: &str) -> Result<TreeReport> {
        let cannot_open = || {
            ShellError::new(
                ShellErrorType::NotDirectory,
                format!("{} [error opening dir]\n\n0 directories, 0 files", arg),
            )
        };
        let origin = self
            .resolve_node(cwd, arg, ResolvePolicy::WALK)
            .map_err(|_| cannot_open())?;
        if self.is_file(origin) {
            return Err(cannot_open());
        }

        let mut report = TreeReport::default();
        let mut pending: Vec<(NodeId, usize)> = self
            .children(origin)
            .into_iter()
            .rev()
            .map(|child| (child, 0))
            .collect();
        while let Some((id, depth)) = pending.pop() {
            let node = self.node(id);
            report.entries.push(TreeEntry {
                depth,
                name: node.name().to_string(),
            });
            match node.children() {
                Some(children) => {
                    report.directories += 1;
                    pending.extend(children.iter().rev().map(|child| (child, depth + 1)));
                }
                None => report.files += 1,
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pwd_joins_ancestors() {
        let mut tree = FileTree::create_tree("home");
        let root = tree.root();
        let a = tree.mkdir(root, "a").unwrap();
        let b = tree.mkdir(a, "b").unwrap();
        assert_eq!(tree.pwd(root), "home");
        assert_eq!(tree.pwd(b), "home/a/b");
    }

    #[test]
    fn ls_lists_and_shows_files() {
        let mut tree = FileTree::create_tree("home");
        let root = tree.root();
        tree.touch(root, "f", "hello").unwrap();
        tree.mkdir(root, "a").unwrap();

        assert_eq!(tree.ls(root, "").unwrap().to_string(), "a\nf\n");
        assert_eq!(tree.ls(root, "f").unwrap().to_string(), "f: hello\n");
        assert_eq!(tree.ls(root, "a").unwrap(), Listing::Entries(vec![]));
        let err = tree.ls(root, "zzz").unwrap_err();
        assert_eq!(
            err.message,
            "ls: cannot access 'zzz': No such file or directory"
        );
    }

    #[test]
    fn ls_of_file_without_content() {
        let mut tree = FileTree::create_tree("home");
        let root = tree.root();
        tree.touch(root, "empty", "").unwrap();
        assert_eq!(tree.ls(root, "empty").unwrap().to_string(), "empty: \n");
    }

    #[test]
    fn ls_resolves_paths() {
        let mut tree = FileTree::create_tree("home");
        let root = tree.root();
        let a = tree.mkdir(root, "a").unwrap();
        tree.touch(a, "f", "deep").unwrap();
        assert_eq!(tree.ls(root, "a/f").unwrap().to_string(), "f: deep\n");
        assert_eq!(tree.ls(a, "..").unwrap().to_string(), "a\n");
        assert!(tree.ls(root, "..").is_err());
    }

    #[test]
    fn empty_tree_report() {
        let tree = FileTree::create_tree("home");
        let report = tree.tree(tree.root(), "").unwrap();
        assert_eq!(report.to_string(), "\n0 directories, 0 files\n");
    }

    #[test]
    fn tree_walks_pre_order() {
        let mut tree = FileTree::create_tree("home");
        let root = tree.root();
        tree.touch(root, "last", "").unwrap();
        let a = tree.mkdir(root, "a").unwrap();
        let b = tree.mkdir(a, "b").unwrap();
        tree.touch(b, "deep", "").unwrap();
        tree.touch(a, "g", "").unwrap();
        tree.mkdir(root, "z").unwrap();

        let report = tree.tree(root, "").unwrap();
        assert_eq!(
            report.to_string(),
            "z\na\n    g\n    b\n        deep\nlast\n\n3 directories, 3 files\n"
        );
    }

    #[test]
    fn tree_of_a_subfolder() {
        let mut tree = FileTree::create_tree("home");
        let root = tree.root();
        let a = tree.mkdir(root, "a").unwrap();
        tree.touch(a, "f", "").unwrap();
        tree.touch(root, "outside", "").unwrap();
        let report = tree.tree(root, "../a").unwrap();
        assert_eq!(report.to_string(), "f\n\n0 directories, 1 files\n");
    }

    #[test]
    fn tree_errors() {
        let mut tree = FileTree::create_tree("home");
        let root = tree.root();
        tree.touch(root, "f", "").unwrap();
        let err = tree.tree(root, "nope").unwrap_err();
        assert_eq!(
            err.message,
            "nope [error opening dir]\n\n0 directories, 0 files"
        );
        let err = tree.tree(root, "f").unwrap_err();
        assert_eq!(err.message, "f [error opening dir]\n\n0 directories, 0 files");
    }
}
