//! An in-memory folder/file tree and the shell commands that drive it.

pub mod commands;
pub mod errors;
pub mod ftree;
pub mod locations;
pub mod log;
pub mod session;

pub use commands::{parse_command, ShellCommand};
pub use errors::{Result, ShellError, ShellErrorType};
pub use ftree::{FileTree, NodeId};
pub use session::{Flow, Shell};
