//! CLI entry point for polaris-site

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use polaris_site::Site;

#[derive(Parser)]
#[command(name = "polaris-site")]
#[command(author = "Polaris Team")]
#[command(version)]
#[command(about = "Builds and previews the Polaris Protocol website and blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new blog post
    New {
        /// Title of the new post
        title: String,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Start a local preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Delete the output folder
    Clean,

    /// List blog posts
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "polaris_site=debug,info"
    } else {
        "polaris_site=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };

    match cli.command {
        Commands::New { title } => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let path = site.new_post(&title)?;
            println!("Created: {}", path.display());
        }

        Commands::Generate => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.generate()?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let site = Site::new(&base_dir)?;
            site.posts().validate()?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            polaris_site::server::start(&site, &ip, port).await?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Cleaning output folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let site = Site::new(&base_dir)?;
            polaris_site::commands::list::run(&site)?;
        }

        Commands::Version => {
            println!("polaris-site version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
