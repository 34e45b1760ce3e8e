use crate::errors::{Result, ShellError, ShellErrorType};

pub fn parse_command(line: &str) -> Result<Option<ShellCommand>> {
    // Commands are in the form of:
    // "COMMAND ARG1 ARG2 ... ARGN"
    // separated by any run of whitespace. A blank line is not a command.
    let mut parts = line.split_whitespace();
    let Some(cmd_name) = parts.next() else {
        return Ok(None);
    };
    let arguments = parts.collect::<Vec<&str>>();
    ShellCommand::parse(cmd_name, &arguments).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Ls(String),
    Pwd,
    Cd(String),
    Tree(String),
    Mkdir(String),
    Touch(String, String),
    Rm(String),
    Rmdir(String),
    Rmrec(String),
    Cp(String, String),
    Mv(String, String),
    Stop,
}

impl ShellCommand {
    pub(crate) fn parse(cmd_name: &str, arguments: &[&str]) -> Result<ShellCommand> {
        match cmd_name {
            "ls" => Ok(ShellCommand::Ls(optional(cmd_name, arguments)?)),
            "pwd" => {
                exact(cmd_name, arguments, 0)?;
                Ok(ShellCommand::Pwd)
            }
            "cd" => Ok(ShellCommand::Cd(optional(cmd_name, arguments)?)),
            "tree" => Ok(ShellCommand::Tree(optional(cmd_name, arguments)?)),
            "mkdir" => {
                exact(cmd_name, arguments, 1)?;
                Ok(ShellCommand::Mkdir(arguments[0].to_string()))
            }
            "touch" => {
                // Everything after the name is the file content
                let Some((name, content)) = arguments.split_first() else {
                    return Err(missing_operand(cmd_name));
                };
                Ok(ShellCommand::Touch(name.to_string(), content.join(" ")))
            }
            "rm" => {
                exact(cmd_name, arguments, 1)?;
                Ok(ShellCommand::Rm(arguments[0].to_string()))
            }
            "rmdir" => {
                exact(cmd_name, arguments, 1)?;
                Ok(ShellCommand::Rmdir(arguments[0].to_string()))
            }
            "rmrec" => {
                exact(cmd_name, arguments, 1)?;
                Ok(ShellCommand::Rmrec(arguments[0].to_string()))
            }
            "cp" => {
                exact(cmd_name, arguments, 2)?;
                Ok(ShellCommand::Cp(
                    arguments[0].to_string(),
                    arguments[1].to_string(),
                ))
            }
            "mv" => {
                exact(cmd_name, arguments, 2)?;
                Ok(ShellCommand::Mv(
                    arguments[0].to_string(),
                    arguments[1].to_string(),
                ))
            }
            "stop" => Ok(ShellCommand::Stop),
            _ => Err(ShellError::new(
                ShellErrorType::InvalidCommand,
                format!("{}: command not found", cmd_name),
            )),
        }
    }
}

fn optional(cmd_name: &str, arguments: &[&str]) -> Result<String> {
    match arguments {
        [] => Ok(String::new()),
        [arg] => Ok(arg.to_string()),
        _ => Err(too_many_arguments(cmd_name)),
    }
}

fn exact(cmd_name: &str, arguments: &[&str], count: usize) -> Result<()> {
    if arguments.len() < count {
        return Err(missing_operand(cmd_name));
    }
    if arguments.len() > count {
        return Err(too_many_arguments(cmd_name));
    }
    Ok(())
}

fn missing_operand(cmd_name: &str) -> ShellError {
    ShellError::new(
        ShellErrorType::InvalidCommand,
        format!("{}: missing operand", cmd_name),
    )
}

fn too_many_arguments(cmd_name: &str) -> ShellError {
    ShellError::new(
        ShellErrorType::InvalidCommand,
        format!("{}: too many arguments", cmd_name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("ls", ShellCommand::Ls(String::new()))]
    #[case("ls a/b", ShellCommand::Ls("a/b".into()))]
    #[case("  pwd  ", ShellCommand::Pwd)]
    #[case("cd ..", ShellCommand::Cd("..".into()))]
    #[case("tree", ShellCommand::Tree(String::new()))]
    #[case("mkdir docs", ShellCommand::Mkdir("docs".into()))]
    #[case("touch f", ShellCommand::Touch("f".into(), String::new()))]
    #[case("touch f hello   world", ShellCommand::Touch("f".into(), "hello world".into()))]
    #[case("rm f", ShellCommand::Rm("f".into()))]
    #[case("rmdir d", ShellCommand::Rmdir("d".into()))]
    #[case("rmrec d", ShellCommand::Rmrec("d".into()))]
    #[case("cp f g", ShellCommand::Cp("f".into(), "g".into()))]
    #[case("mv f d/", ShellCommand::Mv("f".into(), "d/".into()))]
    #[case("stop", ShellCommand::Stop)]
    fn parses_commands(#[case] line: &str, #[case] expected: ShellCommand) {
        assert_eq!(parse_command(line).unwrap(), Some(expected));
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_command("").unwrap(), None);
        assert_eq!(parse_command("   \t").unwrap(), None);
    }

    #[rstest]
    #[case("mkdir", "mkdir: missing operand")]
    #[case("touch", "touch: missing operand")]
    #[case("cp f", "cp: missing operand")]
    #[case("mv a b c", "mv: too many arguments")]
    #[case("cd a b", "cd: too many arguments")]
    #[case("format c:", "format: command not found")]
    fn rejects_malformed_lines(#[case] line: &str, #[case] message: &str) {
        let err = parse_command(line).unwrap_err();
        assert_eq!(err.error_type, ShellErrorType::InvalidCommand);
        assert_eq!(err.message, message);
    }
}
