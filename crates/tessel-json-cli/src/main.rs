//! `tessel` CLI: format, check, and query JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Re-indent a document (stdin → stdout)
//! echo '{"name":"tessel","tags":["json"]}' | tessel format
//!
//! # Compact output, file to file
//! tessel format --compact -i data.json -o data.min.json
//!
//! # Validate and report the root kind
//! tessel check -i data.json
//!
//! # Pull out a nested value by dot path
//! tessel get servers.0.host -i config.json
//!
//! # Raise the nesting limit and ignore anything after the document
//! tessel --max-depth 32 --allow-trailing check -i log.json
//! ```
//!
//! Set `TESSEL_LOG=debug` (or `RUST_LOG`) to see parser events on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tessel_json::{Json, Kind, ParseOptions, DEFAULT_MAX_DEPTH};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tessel", version, about = "Format, check and query JSON documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum container nesting depth (capped at 128)
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Ignore any content after the first complete document
    #[arg(long, global = true)]
    allow_trailing: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and print it re-indented
    Format {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Print compact single-line JSON instead
        #[arg(long)]
        compact: bool,
    },
    /// Parse a document and report its root kind
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the value at a dot-separated path (e.g. `a.0.b`)
    Get {
        /// Path to the value; numeric segments index arrays
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_depth: self.max_depth,
            allow_trailing: self.allow_trailing,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let options = cli.parse_options();

    match cli.command {
        Commands::Format {
            input,
            output,
            compact,
        } => {
            let doc = read_document(input.as_deref(), options)?;
            let rendered = if compact {
                serde_json::to_string(&doc).context("Failed to serialize compact JSON")?
            } else {
                doc.dump().context("Failed to format document")?
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Check { input } => {
            let doc = read_document(input.as_deref(), options)?;
            println!("{}", describe(&doc)?);
        }
        Commands::Get {
            path,
            input,
            output,
        } => {
            let doc = read_document(input.as_deref(), options)?;
            let value = resolve_path(&doc, &path)?;
            let rendered = value.dump().context("Failed to format value")?;
            write_output(output.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

/// Log filter comes from `TESSEL_LOG`, then `RUST_LOG`, defaulting to `warn`.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_env("TESSEL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn read_document(path: Option<&str>, options: ParseOptions) -> Result<Json> {
    let text = read_input(path)?;
    let source = path.unwrap_or("<stdin>");
    tessel_json::parse_with(&text, options)
        .with_context(|| format!("Failed to parse JSON from {}", source))
}

/// One-line summary: the root kind, plus the entry count for containers.
fn describe(doc: &Json) -> Result<String> {
    let kind = doc.kind()?;
    let noun = match kind {
        Kind::Array => "element",
        Kind::Object => "member",
        _ => return Ok(format!("valid {}", kind)),
    };
    let count = doc.len()?;
    let plural = if count == 1 { "" } else { "s" };
    Ok(format!("valid {} ({} {}{})", kind, count, noun, plural))
}

/// Walk a dot-separated path. Arrays take numeric segments; objects look the
/// segment up as a key. Empty segments are skipped, so `""` is the root.
fn resolve_path<'a>(doc: &'a Json, path: &str) -> Result<&'a Json> {
    let mut node = doc;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        node = match node.kind()? {
            Kind::Array => {
                let index: usize = segment.parse().with_context(|| {
                    format!("Path segment '{}' is not an array index", segment)
                })?;
                node.at(index)
                    .with_context(|| format!("No element at '{}' in path '{}'", segment, path))?
            }
            _ => node
                .get(segment)
                .with_context(|| format!("Cannot look up '{}' in path '{}'", segment, path))?
                .with_context(|| format!("No member '{}' in path '{}'", segment, path))?,
        };
    }
    Ok(node)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{}\n", content))
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
