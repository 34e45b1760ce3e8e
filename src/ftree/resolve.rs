use tracing::instrument;

use crate::errors::{Result, ShellError, ShellErrorType};
use crate::ftree::{FileTree, NodeId};

const PARENT_DIR: &str = "..";

/// What `..` does when the walk is already at the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AboveRoot {
    Fail,
    Stay,
}

/// What a miss on the last segment means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingLeaf {
    Fail,
    /// The last segment names a slot to create inside the folder reached so far.
    Vacant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvePolicy {
    pub above_root: AboveRoot,
    pub missing_leaf: MissingLeaf,
}

impl ResolvePolicy {
    /// cd, ls
    pub const NAVIGATE: ResolvePolicy = ResolvePolicy {
        above_root: AboveRoot::Fail,
        missing_leaf: MissingLeaf::Fail,
    };
    /// tree, and the source side of cp/mv
    pub const WALK: ResolvePolicy = ResolvePolicy {
        above_root: AboveRoot::Stay,
        missing_leaf: MissingLeaf::Fail,
    };
    /// The destination side of cp/mv
    pub const DESTINATION: ResolvePolicy = ResolvePolicy {
        above_root: AboveRoot::Fail,
        missing_leaf: MissingLeaf::Vacant,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Node(NodeId),
    Vacant { parent: NodeId, name: &'a str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError<'a> {
    AboveRoot,
    Missing(&'a str),
}

impl FileTree {
    /// Walks `path` from `start`. Empty segments are skipped, so an empty path
    /// resolves to `start` itself.
    pub fn resolve<'a>(
        &self,
        start: NodeId,
        path: &'a str,
        policy: ResolvePolicy,
    ) -> std::result::Result<Resolved<'a>, ResolveError<'a>> {
        let mut current = start;
        let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();

        while let Some(segment) = segments.next() {
            if segment == PARENT_DIR {
                match (self.parent(current), policy.above_root) {
                    (Some(parent), _) => current = parent,
                    (None, AboveRoot::Stay) => {}
                    (None, AboveRoot::Fail) => return Err(ResolveError::AboveRoot),
                }
                continue;
            }

            match self.file_exist(current, segment) {
                Some(child) => current = child,
                None => {
                    let is_last = segments.peek().is_none();
                    if is_last
                        && policy.missing_leaf == MissingLeaf::Vacant
                        && self.is_folder(current)
                    {
                        return Ok(Resolved::Vacant {
                            parent: current,
                            name: segment,
                        });
                    }
                    return Err(ResolveError::Missing(segment));
                }
            }
        }
        Ok(Resolved::Node(current))
    }

    /// Resolves to an existing node, folding a vacant slot into a miss.
    pub fn resolve_node<'a>(
        &self,
        start: NodeId,
        path: &'a str,
        policy: ResolvePolicy,
    ) -> std::result::Result<NodeId, ResolveError<'a>> {
        match self.resolve(start, path, policy)? {
            Resolved::Node(id) => Ok(id),
            Resolved::Vacant { name, .. } => Err(ResolveError::Missing(name)),
        }
    }

    /// Returns the folder `path` leads to. On failure the caller keeps its
    /// current node.
    #[instrument(skip(self))]
    pub fn cd(&self, cwd: NodeId, path: &str) -> Result<NodeId> {
        let target = self
            .resolve_node(cwd, path, ResolvePolicy::NAVIGATE)
            .map_err(|_| {
                ShellError::new(
                    ShellErrorType::NotFound,
                    format!("cd: no such file or directory: {}", path),
                )
            })?;
        if self.is_file(target) {
            tracing::info!("Refusing to enter file {}", path);
            return Err(ShellError::new(
                ShellErrorType::NotDirectory,
                format!("cd: not a directory: {}", path),
            ));
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    // home/a/b, home/a/f
    fn sample() -> (FileTree, NodeId, NodeId, NodeId) {
        let mut tree = FileTree::create_tree("home");
        let root = tree.root();
        let a = tree.mkdir(root, "a").unwrap();
        let b = tree.mkdir(a, "b").unwrap();
        tree.touch(a, "f", "text").unwrap();
        (tree, root, a, b)
    }

    #[test]
    fn parent_segments_walk_upwards() {
        let (tree, root, a, b) = sample();
        assert_eq!(tree.resolve_node(root, "a/b/..", ResolvePolicy::NAVIGATE), Ok(a));
        assert_eq!(tree.resolve_node(b, "../..", ResolvePolicy::NAVIGATE), Ok(root));
    }

    #[rstest]
    #[case("")]
    #[case("/")]
    #[case("//")]
    fn empty_paths_resolve_to_start(#[case] path: &str) {
        let (tree, _, a, _) = sample();
        assert_eq!(tree.resolve(a, path, ResolvePolicy::NAVIGATE), Ok(Resolved::Node(a)));
    }

    #[test]
    fn repeated_separators_are_ignored() {
        let (tree, root, _, b) = sample();
        assert_eq!(tree.resolve_node(root, "a//b/", ResolvePolicy::NAVIGATE), Ok(b));
    }

    #[test]
    fn above_root_policy() {
        let (tree, root, a, _) = sample();
        assert_eq!(
            tree.resolve(root, "..", ResolvePolicy::NAVIGATE),
            Err(ResolveError::AboveRoot)
        );
        assert_eq!(tree.resolve_node(root, "../../a", ResolvePolicy::WALK), Ok(a));
        assert_eq!(
            tree.resolve(root, "../a", ResolvePolicy::DESTINATION),
            Err(ResolveError::AboveRoot)
        );
    }

    #[test]
    fn vacant_only_on_last_segment() {
        let (tree, root, a, _) = sample();
        assert_eq!(
            tree.resolve(root, "a/new", ResolvePolicy::DESTINATION),
            Ok(Resolved::Vacant {
                parent: a,
                name: "new"
            })
        );
        assert_eq!(
            tree.resolve(root, "nope/new", ResolvePolicy::DESTINATION),
            Err(ResolveError::Missing("nope"))
        );
        assert_eq!(
            tree.resolve(root, "a/new", ResolvePolicy::WALK),
            Err(ResolveError::Missing("new"))
        );
    }

    #[test]
    fn files_have_no_vacant_slots() {
        let (tree, root, _, _) = sample();
        assert_eq!(
            tree.resolve(root, "a/f/x", ResolvePolicy::DESTINATION),
            Err(ResolveError::Missing("x"))
        );
    }

    #[test]
    fn parent_of_a_file_is_its_folder() {
        let (tree, root, a, _) = sample();
        assert_eq!(tree.resolve_node(root, "a/f/..", ResolvePolicy::NAVIGATE), Ok(a));
    }

    #[test]
    fn cd_lands_on_folders_only() {
        let (tree, root, a, b) = sample();
        assert_eq!(tree.cd(root, "a/b/..").unwrap(), a);
        assert_eq!(tree.cd(b, "").unwrap(), b);

        let err = tree.cd(root, "a/zzz").unwrap_err();
        assert_eq!(err.message, "cd: no such file or directory: a/zzz");
        let err = tree.cd(root, "..").unwrap_err();
        assert_eq!(err.message, "cd: no such file or directory: ..");
        let err = tree.cd(root, "a/f").unwrap_err();
        assert_eq!(err.error_type, ShellErrorType::NotDirectory);
        assert_eq!(err.message, "cd: not a directory: a/f");
    }
}
