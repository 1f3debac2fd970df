use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use shadow_query::dom::{Document, NodeId};
use shadow_query::{find_all, find_first, flatten, load_from_path, Depth, QueryOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shadow-query")]
#[command(about = "Selector lookup across nested shadow roots", long_about = None)]
#[command(version)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find elements matching a selector, inside shadow roots too
    Find {
        /// Markup file to search
        file: PathBuf,

        /// CSS selector, e.g. "slot[name='blah']"
        selector: String,

        /// Print only the first match; exit 1 if there is none
        #[arg(short, long)]
        first: bool,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// List every node and open shadow root the lookup would visit
    Flatten {
        /// Markup file to walk
        file: PathBuf,

        #[command(flatten)]
        query: QueryArgs,
    },
}

#[derive(Args)]
struct QueryArgs {
    /// Maximum nested shadow roots to enter: a positive integer or "unbounded"
    #[arg(short, long)]
    depth: Option<Depth>,

    /// TOML file with query options (`depth = 2`)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl QueryArgs {
    /// Options from `--config`, with an explicit `--depth` taking precedence.
    fn resolve(&self) -> Result<QueryOptions> {
        let mut options = match &self.config {
            Some(path) => load_from_path(path)?,
            None => QueryOptions::default(),
        };
        if let Some(depth) = self.depth {
            options = options.with_depth(depth);
        }
        Ok(options)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shadow_query=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Find {
            file,
            selector,
            first,
            query,
        } => cmd_find(&file, &selector, first, &query),

        Commands::Flatten { file, query } => cmd_flatten(&file, &query),
    }
}

fn load_document(path: &Path) -> Result<Document> {
    let markup = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Document::parse(&markup).with_context(|| format!("failed to parse {}", path.display()))
}

fn cmd_find(file: &Path, selector: &str, first: bool, query: &QueryArgs) -> Result<()> {
    let options = query.resolve()?;
    let doc = load_document(file)?;

    if first {
        let found = find_first(&doc, doc.root(), selector, &options)
            .with_context(|| format!("invalid selector '{selector}'"))?;
        match found {
            Some(node) => println!("{}", render(&doc, node)),
            None => {
                println!("{}", "(no match)".dimmed());
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let found = find_all(&doc, doc.root(), selector, &options)
        .with_context(|| format!("invalid selector '{selector}'"))?;
    for node in &found {
        println!("{}", render(&doc, *node));
    }
    eprintln!(
        "{} {} (depth: {})",
        found.len().to_string().bold(),
        if found.len() == 1 { "match" } else { "matches" },
        options.depth
    );
    Ok(())
}

fn cmd_flatten(file: &Path, query: &QueryArgs) -> Result<()> {
    let options = query.resolve()?;
    let doc = load_document(file)?;

    let nodes = flatten(&doc, doc.root(), &options).context("failed to flatten document")?;
    for node in &nodes {
        println!("{}", render(&doc, *node));
    }
    eprintln!(
        "{} nodes (depth: {})",
        nodes.len().to_string().bold(),
        options.depth
    );
    Ok(())
}

/// Node path with shadow-root segments highlighted.
fn render(doc: &Document, node: NodeId) -> String {
    doc.describe(node)
        .split(" > ")
        .map(|segment| {
            if segment.starts_with("#shadow-root") {
                segment.cyan().to_string()
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}
