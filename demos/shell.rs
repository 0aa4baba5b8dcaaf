//! Interactive shell over a seeded `vfs-tree`.
//!
//! ```bash
//! cargo run --example shell -- --log-level debug
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::debug;
use vfs_tree::Tree;

const PASSWD: &str = "root:x:0:0:root:/root:/bin/bash\nuser:x:1000:1000::/home/user:/bin/bash\n";
const PLACEHOLDER: &str = "Placeholder text\n";

#[derive(Debug, Clone, ValueEnum, Default)]
enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    fn to_tracing_level(&self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(version)]
struct Cli {
    #[clap(long, short, default_value = "warn", value_enum)]
    log_level: LogLevel,

    /// Start from an empty tree instead of the sample layout
    #[clap(long)]
    empty: bool,
}

fn setup_tracing(cli_args: &Cli) {
    if let Some(level) = cli_args.log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .without_time()
            .compact()
            .init();
    }
}

fn seed(tree: &mut Tree) -> vfs_tree::Result<()> {
    for dir in ["/dev/disk", "/sys", "/etc", "/home/user/crab"] {
        tree.mkdir(dir)?;
    }
    tree.mkfile("/etc/passwd", PASSWD)?;
    Ok(())
}

/// Runs one command line. Returns false when the shell should exit.
fn execute(tree: &mut Tree, cwd: &mut String, line: &str) -> Result<bool> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(true);
    };
    if command == "q" {
        return Ok(false);
    }
    let path = words.next().unwrap_or(".");
    let target = if path == "." { cwd.clone() } else { path.to_string() };

    match command {
        "cd" => {
            if tree.is_dir(&target)? {
                *cwd = target;
            } else {
                println!("cd: {target} not a directory");
            }
        }
        "ls" => {
            println!("[{target}]");
            let names: Vec<_> = tree.ls(&target)?.map(|node| node.to_string()).collect();
            println!("{}", names.join(" "));
        }
        "tree" => print!("{}", tree.render()),
        "mkdir" => {
            tree.mkdir(&target)?;
        }
        "touch" => {
            tree.mkfile(&target, PLACEHOLDER)?;
        }
        "cat" => {
            let content = tree.read(&target)?;
            println!("{target}:\n{}", String::from_utf8_lossy(content));
        }
        "rm" => {
            tree.rm(&target)?;
            println!("removed {target}");
        }
        "mv" => {
            let Some(dest) = words.next() else {
                println!("usage: mv SRC DEST_DIR");
                return Ok(true);
            };
            tree.mv(&target, dest)?;
            println!("moved {target} -> {dest}");
        }
        _ => println!("invalid choice"),
    }
    Ok(true)
}

fn main() -> Result<()> {
    let cli_args = Cli::parse();
    setup_tracing(&cli_args);
    debug!("Parsed CLI arguments: {cli_args:?}");

    let mut tree = Tree::new();
    if !cli_args.empty {
        seed(&mut tree)?;
    }
    println!("Initial tree:");
    print!("{}", tree.render());
    println!();

    let mut cwd = String::from("/");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{cwd} > ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        match execute(&mut tree, &mut cwd, &line?) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("error: {e}"),
        }
    }

    let destroyed = tree.destroy();
    debug!(destroyed, "shutdown");
    Ok(())
}
