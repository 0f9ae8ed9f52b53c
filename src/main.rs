mod config;
mod error;
mod fetch;
mod filename;
mod identifier;
mod logging;
mod paper;
mod registry;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueHint};
use tracing::warn;

use self::fetch::notion::NotionClient;
use self::paper::extract_and_resolve;
use self::registry::{DatabaseRegistry, ENV_PREFIX};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the configuration file that should be used
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Show more log output (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the metadata of a paper
    Info {
        /// An arXiv URL, or any text containing an arXiv identifier
        url: String,

        /// Print the metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a paper to one of your Notion databases
    Add {
        /// An arXiv URL, or any text containing an arXiv identifier
        url: String,

        /// Name of the database to add the paper to (see `databases`)
        #[arg(short, long)]
        database: String,
    },

    /// Download the PDF of a paper
    Download {
        /// An arXiv URL, or any text containing an arXiv identifier
        url: String,

        /// Directory to save the PDF in (defaults to the directory from the config, or the current one)
        #[arg(short, long, value_name = "DIR", value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },

    /// Open the PDF of a paper in the web viewer
    View {
        /// An arXiv URL, or any text containing an arXiv identifier
        url: String,

        /// Only print the viewer link instead of opening a browser
        #[arg(short, long)]
        print: bool,
    },

    /// List the Notion databases papers can be added to
    Databases,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    logging::init(cli_args.verbose);
    let conf = config::load(cli_args.config)?;
    let registry =
        DatabaseRegistry::from(conf.notion.databases.clone()).with_vars(std::env::vars());

    match cli_args.command {
        Command::Info { url, json } => {
            let paper = extract_and_resolve(&url)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&paper)?);
            } else {
                print!("{paper}");
            }
        }
        Command::Add { url, database } => {
            // fail on a bad database name before going to arXiv
            registry.get(&database)?;
            let paper = extract_and_resolve(&url)?;
            NotionClient::new(conf.notion.token)
                .with_base_url(conf.notion.api_url)
                .submit_record(
                    &registry,
                    &database,
                    &paper.id,
                    &paper.title,
                    paper.published,
                    &paper.abs_url,
                )?;
        }
        Command::Download { url, dir } => {
            let paper = extract_and_resolve(&url)?;
            let path = dir
                .or(conf.download_dir)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(&paper.file_name);
            fetch::download_pdf(&paper.pdf_url, &path)
                .with_context(|| format!("Failed to download {}", paper.pdf_url))?;
            println!("{}", path.display());
        }
        Command::View { url, print } => {
            let link = extract_and_resolve(&url)?.viewer_url(&conf.viewer);
            if print {
                println!("{link}");
            } else {
                open::that(&link).with_context(|| format!("Could not open {link}"))?;
            }
        }
        Command::Databases => {
            if registry.is_empty() {
                warn!("No Notion databases configured (set {ENV_PREFIX}<NAME> or [notion.databases])");
            }
            for name in registry.names() {
                println!("{name}");
            }
        }
    }
    Ok(())
}
