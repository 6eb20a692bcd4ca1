use clap::{ArgAction, Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;
use tagdiff_parser::Tree;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tagdiff")]
#[command(about = "tagdiff: level-wise structural diff for XML-like markup")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare two documents level by level
    Diff {
        /// First document (A)
        a: String,
        /// Second document (B)
        b: String,
    },

    /// Check a document for errors without comparing it
    Check {
        /// Input document
        path: String,
    },

    /// Print the token stream of a document
    Tokens {
        /// Input document
        path: String,
    },

    /// Print the canonical forms of a document, grouped by depth
    Tree {
        /// Input document
        path: String,
    },
}

/// Exit status when the documents differ.
const EXIT_DIFFERENT: u8 = 1;
/// Exit status for unreadable or malformed input.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Diff { a, b } => cmd_diff(&a, &b),
        Command::Check { path } => cmd_check(&path),
        Command::Tokens { path } => cmd_tokens(&path),
        Command::Tree { path } => cmd_tree(&path),
    };

    match result {
        Ok(code) => code,
        Err(code) => ExitCode::from(code),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &str) -> Result<String, u8> {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        return Err(EXIT_ERROR);
    }
    std::fs::read_to_string(p).map_err(|e| {
        eprintln!("Error reading {path}: {e}");
        EXIT_ERROR
    })
}

fn parse_file(path: &str) -> Result<Tree, u8> {
    let source = read_source(path)?;
    tagdiff_parser::parse_str(&source).map_err(|e| {
        eprintln!("{path}: {e}");
        EXIT_ERROR
    })
}

fn cmd_diff(a: &str, b: &str) -> Result<ExitCode, u8> {
    let tree_a = parse_file(a)?;
    let tree_b = parse_file(b)?;

    let report = match tagdiff_diff::diff(&tree_a, &tree_b) {
        Ok(report) => report,
        Err(e) => {
            // Depth mismatch: the documents differ but there is no per-level report.
            eprintln!("{e}");
            return Ok(ExitCode::from(EXIT_DIFFERENT));
        }
    };

    print!("{report}");

    if report.is_identical() {
        eprintln!("Identical: {a} {b}");
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_DIFFERENT))
    }
}

fn cmd_check(path: &str) -> Result<ExitCode, u8> {
    let tree = parse_file(path)?;
    tracing::debug!(nodes = tree.len(), levels = tree.depth(), "document checked");
    eprintln!("OK: {path}");
    Ok(ExitCode::SUCCESS)
}

fn cmd_tokens(path: &str) -> Result<ExitCode, u8> {
    let source = read_source(path)?;
    for token in tagdiff_lexer::tokenize(&source) {
        println!("{token}");
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_tree(path: &str) -> Result<ExitCode, u8> {
    let tree = parse_file(path)?;
    for (depth, level) in tagdiff_diff::canonical_levels(&tree).iter().enumerate() {
        println!("level {depth}:");
        for form in level {
            println!("  {form}");
        }
    }
    Ok(ExitCode::SUCCESS)
}
