//! Developer front end for the column transform engine: reads a document as
//! interchange JSON, applies one transform, and writes the result back out.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use colonnade_config::Config;
use colonnade_engine::{
    LayoutOptions, Node, NodeType, SchemaCapability, Selection, Transaction, apply_columns,
    remove_columns,
};

/// Column layout transforms for structured documents.
#[derive(Parser)]
#[command(name = "colonnade", about = "Column layout transforms for structured documents")]
struct Cli {
    /// Path to a TOML config file overriding the layout options.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wrap the selected blocks in a column layout.
    Apply {
        /// Document JSON file ("-" for stdin).
        doc: PathBuf,

        /// Number of columns to create.
        #[arg(long, short = 'n', default_value_t = 2)]
        count: usize,

        /// Keep the selected content in the first column.
        #[arg(long)]
        keep_content: bool,

        /// Selection anchor position.
        #[arg(long, default_value_t = 0)]
        anchor: usize,

        /// Selection head position (defaults to the anchor).
        #[arg(long)]
        head: Option<usize>,
    },
    /// Unwrap the enclosing column layout back to flat blocks.
    Remove {
        /// Document JSON file ("-" for stdin).
        doc: PathBuf,

        /// Selection anchor position.
        #[arg(long, default_value_t = 0)]
        anchor: usize,
    },
}

/// Containment policy for documents handled by the CLI: any block may sit
/// anywhere, except that column blocks may only appear under the document
/// root or under a column.
struct CliSchema {
    options: LayoutOptions,
}

impl SchemaCapability for CliSchema {
    fn allows_child(&self, parent: &NodeType, child: &NodeType) -> bool {
        if *child == self.options.column_block {
            parent.as_str() == "doc" || *parent == self.options.column
        } else {
            *parent != self.options.column_block
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let options = load_layout_options(cli.config.as_deref())?;

    match cli.command {
        Commands::Apply {
            doc,
            count,
            keep_content,
            anchor,
            head,
        } => {
            let root = read_document(&doc)?;
            let selection = Selection::range(anchor, head.unwrap_or(anchor));
            let mut tr = Transaction::new(root, selection);
            let schema = CliSchema {
                options: options.clone(),
            };
            apply_columns(&mut tr, &schema, &options, count, keep_content)
                .context("column layout rejected")?;
            write_document(tr.doc())?;
        }
        Commands::Remove { doc, anchor } => {
            let root = read_document(&doc)?;
            let mut tr = Transaction::new(root, Selection::collapsed(anchor));
            let removed = remove_columns(&mut tr, &options).context("column unwrap failed")?;
            if !removed {
                tracing::info!("selection is not inside a column block; document unchanged");
            }
            write_document(tr.doc())?;
        }
    }

    Ok(())
}

fn load_layout_options(config_path: Option<&Path>) -> Result<LayoutOptions> {
    let config = match config_path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().context("failed to load config")?,
    };
    Ok(config.unwrap_or_default().layout)
}

fn read_document(path: &Path) -> Result<Node> {
    let text = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read document from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read document from {}", path.display()))?
    };
    serde_json::from_str(&text).context("document is not valid interchange JSON")
}

fn write_document(root: &Node) -> Result<()> {
    let json = serde_json::to_string_pretty(root)?;
    println!("{json}");
    Ok(())
}
