use std::io::{BufRead, Write};

use tracing::instrument;

use crate::commands::{parse_command, ShellCommand};
use crate::errors::Result;
use crate::ftree::{FileTree, NodeId};

/// Whether the session keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// A tree plus the folder commands currently run in.
#[derive(Debug)]
pub struct Shell {
    tree: FileTree,
    cwd: NodeId,
}

impl Shell {
    pub fn new(root_name: &str) -> Shell {
        let tree = FileTree::create_tree(root_name);
        let cwd = tree.root();
        Shell { tree, cwd }
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn cwd(&self) -> NodeId {
        self.cwd
    }

    /// Runs one command. Failures are written to `out` like any other output;
    /// only a failing writer is returned as an error.
    #[instrument(skip(self, out))]
    pub fn execute<W: Write>(&mut self, command: &ShellCommand, out: &mut W) -> Result<Flow> {
        let cwd = self.cwd;
        let outcome = match command {
            ShellCommand::Ls(arg) => self.tree.ls(cwd, arg).map(|listing| listing.to_string()),
            ShellCommand::Pwd => Ok(format!("{}\n", self.tree.pwd(cwd))),
            ShellCommand::Cd(path) => self.tree.cd(cwd, path).map(|target| {
                self.cwd = target;
                String::new()
            }),
            ShellCommand::Tree(arg) => self.tree.tree(cwd, arg).map(|report| report.to_string()),
            ShellCommand::Mkdir(name) => self.tree.mkdir(cwd, name).map(|_| String::new()),
            ShellCommand::Touch(name, content) => {
                self.tree.touch(cwd, name, content).map(|_| String::new())
            }
            ShellCommand::Rm(name) => self.tree.rm(cwd, name).map(|_| String::new()),
            ShellCommand::Rmdir(name) => self.tree.rmdir(cwd, name).map(|_| String::new()),
            ShellCommand::Rmrec(name) => self.tree.rmrec(cwd, name).map(|_| String::new()),
            ShellCommand::Cp(source, destination) => self
                .tree
                .cp(cwd, source, destination)
                .map(|_| String::new()),
            ShellCommand::Mv(source, destination) => self
                .tree
                .mv(cwd, source, destination)
                .map(|_| String::new()),
            ShellCommand::Stop => return Ok(Flow::Stop),
        };

        match outcome {
            Ok(text) => out.write_all(text.as_bytes())?,
            Err(e) => {
                tracing::info!("{:?}: {}", e.error_type, e.message);
                writeln!(out, "{}", e)?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Feeds `input` line by line until it runs out or a `stop` arrives.
    /// Bytes that are not UTF-8 are replaced rather than ending the run.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for raw in input.split(b'\n') {
            let raw = raw?;
            let decoded = String::from_utf8_lossy(&raw);
            let line = decoded.strip_suffix('\r').unwrap_or(&decoded);
            match parse_command(line) {
                Ok(Some(command)) => {
                    if self.execute(&command, out)? == Flow::Stop {
                        break;
                    }
                }
                Ok(None) => continue,
                Err(e) => writeln!(out, "{}", e)?,
            }
            out.flush()?;
        }
        Ok(())
    }

    /// Tears the tree down and reports how many nodes were released.
    pub fn close(self) -> usize {
        self.tree.free_tree()
    }
}
