use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use treefs::{locations, log, Shell, ShellError};

// Allow the shell to return its version with a --version flag
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
struct Opts {
    #[clap(short, long)]
    version: bool,
    #[clap(short, long)]
    debug: bool,
    /// Name of the root folder
    #[clap(short, long, default_value = "home")]
    root: String,
    /// Where log files are written
    #[clap(long)]
    log_dir: Option<PathBuf>,
    #[clap(long)]
    no_log: bool,
}

fn main() -> ExitCode {
    let opts: Opts = Opts::parse();
    if opts.version {
        println!("{}", VERSION);
        return ExitCode::SUCCESS;
    }

    let _guard = if opts.no_log {
        None
    } else {
        let level = if opts.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        let log_dir = match opts.log_dir {
            Some(dir) => Ok(dir),
            None => locations::get_default_log_dir(),
        };
        match log_dir.and_then(|dir| log::init_logging(&dir, level)) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Running without logs: {}", e);
                None
            }
        }
    };

    let mut shell = Shell::new(&opts.root);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let result = shell
        .run(stdin.lock(), &mut stdout)
        .and_then(|()| stdout.flush().map_err(ShellError::from));

    let released = shell.close();
    tracing::info!("Session closed, released {} nodes", released);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
