use clap::{ArgAction, Parser, Subcommand};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tetra_tools::io::{self, ele, node};
use tetra_tools::prelude::*;
use tracing::Level;

#[derive(Parser)]
#[command(name = "tetra-cli")]
#[command(about = "A CLI tool for TetGen .node/.ele meshes and their binary form")]
struct Cli {
    /// Log more (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pack a .node/.ele pair into a binary mesh file
    ToBin {
        /// Point set (.node) path
        #[arg(long)]
        node: PathBuf,

        /// Element set (.ele) path
        #[arg(long)]
        ele: PathBuf,

        /// Point attribute stored as the per-point scalar
        #[arg(short, long, default_value_t = 0)]
        attribute: u32,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Reject files whose record count differs from their header
        #[arg(long)]
        strict: bool,
    },

    /// Print a JSON summary of a binary mesh file
    Info {
        /// Binary mesh path
        input: PathBuf,
    },

    /// Rewrite a .node or .ele file with comments dropped and records renumbered
    Normalize {
        /// Input file path
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Reject files whose record count differs from their header
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::ToBin { node, ele, attribute, output, strict } => {
            to_bin(&node, &ele, attribute, &output, &read_config(strict))
        }
        Command::Info { input } => info(&input),
        Command::Normalize { input, output, strict } => normalize(&input, &output, &read_config(strict)),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_config(strict: bool) -> io::Config {
    if strict {
        io::Config::strict()
    } else {
        io::Config::default()
    }
}

fn to_bin(node_path: &Path, ele_path: &Path, attribute: u32, output: &Path, cfg: &io::Config) -> Result<()> {
    encode::export_binary_mesh_with(node_path, ele_path, attribute, output, cfg)
        .with_context(|| format!(
            "Failed to convert {} and {} to {}",
            node_path.display(),
            ele_path.display(),
            output.display()
        ))?;
    Ok(())
}

fn info(input: &Path) -> Result<()> {
    let mesh = import_binary_mesh(input)
        .with_context(|| format!("Failed to read binary mesh {}", input.display()))?;
    let summary = serde_json::to_string_pretty(&mesh.summary())?;
    println!("{}", summary);
    Ok(())
}

fn normalize(input: &Path, output: &Path, cfg: &io::Config) -> Result<()> {
    let ext = extension(input);
    if extension(output) != ext {
        anyhow::bail!("Output file must have the same extension as the input (.{})", ext);
    }

    match ext {
        "node" => {
            let set = node::parse_point_set_with(input, cfg)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            node::write_point_set(output, &set)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }
        "ele" => {
            let set = ele::parse_element_set_with(input, cfg)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            ele::write_element_set(output, &set)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }
        _ => anyhow::bail!("Input file must be a .node or .ele file"),
    }
    Ok(())
}

fn extension(path: &Path) -> &str {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn arguments_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_to_bin() {
        let cli = Cli::try_parse_from([
            "tetra-cli", "-v", "to-bin", "--node", "a.node", "--ele", "a.ele", "-a", "2", "-o", "a.bin",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::ToBin { attribute, strict, output, .. } => {
                assert_eq!(attribute, 2);
                assert!(!strict);
                assert_eq!(output, PathBuf::from("a.bin"));
            }
            _ => panic!("expected to-bin"),
        }
    }

    #[test]
    fn normalize_checks_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("mesh.node");
        std::fs::write(&input, "# c\n1 3 0 0\n\n7 1 2 3\n").unwrap();

        let wrong = dir.path().join("mesh.ele");
        assert!(normalize(&input, &wrong, &read_config(false)).is_err());

        let output = dir.path().join("clean.node");
        normalize(&input, &output, &read_config(false)).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "1 3 0 0\n0 1 2 3\n");
    }
}
