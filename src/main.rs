//! projtree - browse and edit project-scoped directories.
//!
//! Usage:
//!   projtree ls [PATH]           List a directory
//!   projtree cat PATH            Stream a file to stdout
//!   projtree write PATH          Replace a file's content from stdin or --from
//!   projtree get [PATH]          List a directory or stream a file
//!   projtree --help              Show help

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail, eyre};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use projtree_core::{ListingEntry, ProjtreeSettings, StaticMembership, TreeConfig};
use projtree_fs::{ReadOutcome, ResourceTreeService, WriteOutcome};

#[derive(Parser)]
#[command(
    name = "projtree",
    version,
    about = "Browse and edit project-scoped directories",
    long_about = "projtree serves the directories under a resource root. Each directory \
                  directly under the root is a project, shown under the name in its \
                  marker file and only to callers with access to that project."
)]
struct Cli {
    /// Settings file (defaults to <config dir>/projtree/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Resource root, overriding the settings file
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Identity whose project membership is applied
    #[arg(short, long, global = true, default_value = "anonymous")]
    user: String,

    /// Grant the user access to a project (repeatable, replaces the membership table)
    #[arg(short = 'p', long = "project", global = true)]
    projects: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List a directory
    Ls {
        /// Logical path to list
        #[arg(default_value = "/")]
        path: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Stream a file to stdout
    Cat {
        /// Logical path of the file
        path: String,
    },

    /// Replace the content of an existing file
    Write {
        /// Logical path of the file
        path: String,

        /// Read new content from this file instead of stdin
        #[arg(short, long)]
        from: Option<PathBuf>,
    },

    /// List a directory or stream a file, whichever the path is
    Get {
        /// Logical path to read
        #[arg(default_value = "/")]
        path: String,

        /// Output format for listings
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("projtree=info".parse()?)
                .add_directive("projtree_fs=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let service = build_service(&cli)?;

    match cli.command {
        Command::Ls { ref path, format } => {
            let entries = service
                .list(&cli.user, path)
                .await
                .with_context(|| format!("Cannot list {path}"))?;
            print_listing(&entries, format)?;
        }
        Command::Cat { ref path } => {
            let mut stdout = tokio::io::stdout();
            match service.read(&cli.user, path, &mut stdout).await? {
                ReadOutcome::Content { bytes_written } => report_streamed(bytes_written),
                ReadOutcome::Listing { .. } => bail!("{path} is a directory"),
            }
        }
        Command::Write { ref path, ref from } => {
            let content = read_input(from.as_ref()).await?;
            match service.write(&cli.user, path, &content).await? {
                WriteOutcome::Replaced { bytes_written } => {
                    eprintln!("Wrote {} to {path}", format_size(bytes_written));
                }
                WriteOutcome::Noop => {
                    eprintln!("No file at {path}; nothing written");
                }
            }
        }
        Command::Get { ref path, format } => {
            let mut stdout = tokio::io::stdout();
            match service.read(&cli.user, path, &mut stdout).await? {
                ReadOutcome::Listing { entries } => print_listing(&entries, format)?,
                ReadOutcome::Content { bytes_written } => report_streamed(bytes_written),
            }
        }
    }

    Ok(())
}

/// Assemble the service from the settings file and command-line overrides.
fn build_service(cli: &Cli) -> Result<ResourceTreeService<StaticMembership>> {
    let settings = match &cli.config {
        Some(path) => Some(
            ProjtreeSettings::load(path)
                .with_context(|| format!("Cannot load settings from {}", path.display()))?,
        ),
        None => {
            let path = ProjtreeSettings::default_path();
            if path.exists() {
                Some(ProjtreeSettings::load(&path).context("Cannot load default settings")?)
            } else {
                None
            }
        }
    };

    let (mut tree, members) = match settings {
        Some(settings) => (Some(settings.tree), settings.members),
        None => (None, StaticMembership::new()),
    };

    if let Some(root) = &cli.root {
        match tree.as_mut() {
            Some(tree) => tree.root = root.clone(),
            None => tree = Some(TreeConfig::new(root)),
        }
    }

    let tree = tree.ok_or_else(|| eyre!("No resource root configured; pass --root or --config"))?;

    let members = if cli.projects.is_empty() {
        members
    } else {
        StaticMembership::new().with_member(cli.user.clone(), cli.projects.iter().cloned())
    };

    let service = ResourceTreeService::new(&tree, members)
        .with_context(|| format!("Cannot open resource root {}", tree.root.display()))?;

    tracing::debug!(
        root = %service.resolver().root().display(),
        user = %cli.user,
        "starting projtree"
    );
    Ok(service)
}

/// Print a listing as a table or JSON.
fn print_listing(entries: &[ListingEntry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            if entries.is_empty() {
                println!(" (empty)");
            }
            for entry in entries {
                println!("{:<10} {:<32} {}", entry.kind, entry.label, entry.path);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(entries)?);
        }
    }
    Ok(())
}

/// Read replacement content from a file or stdin.
async fn read_input(from: Option<&PathBuf>) -> Result<Vec<u8>> {
    match from {
        Some(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("Cannot read {}", path.display())),
        None => {
            let mut content = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut content)
                .await
                .context("Cannot read stdin")?;
            Ok(content)
        }
    }
}

fn report_streamed(bytes: u64) {
    eprintln!();
    eprintln!("{} streamed", format_size(bytes));
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
