//! CLI entry point for handbook-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "handbook")]
#[command(version)]
#[command(about = "A static handbook site generator with a searchable index", long_about = None)]
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
    /// Initialize a new handbook site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new article
    New {
        /// Title of the new article
        title: String,

        /// Category the article is listed under
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Route for the article (defaults to the slugified title)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Remove the public folder
    Clean,

    /// List articles grouped by category
    List,

    /// Filter articles by title or category, like the index search box
    Search {
        /// Case-insensitive text to look for
        #[arg(default_value = "")]
        query: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "handbook=debug,info"
    } else {
        "handbook=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing handbook site in {:?}", target_dir);
            handbook::commands::init::init_site(&target_dir)?;
            println!("Initialized handbook site in {:?}", target_dir);
        }

        Commands::New {
            title,
            category,
            path,
        } => {
            let site = handbook::Handbook::new(&base_dir)?;
            let file = handbook::commands::new::create_post(
                &site,
                &title,
                category.as_deref(),
                path.as_deref(),
            )?;
            println!("Created: {:?}", file);
        }

        Commands::Generate { watch } => {
            let site = handbook::Handbook::new(&base_dir)?;
            tracing::info!("Generating static files...");

            site.generate()?;
            println!("Generated successfully!");

            if watch {
                handbook::commands::generate::watch(&site).await?;
            }
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let site = handbook::Handbook::new(&base_dir)?;

            tracing::info!("Generating static files...");
            site.generate()?;

            handbook::server::start(&site, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let site = handbook::Handbook::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let site = handbook::Handbook::new(&base_dir)?;
            handbook::commands::list::run(&site)?;
        }

        Commands::Search { query } => {
            let site = handbook::Handbook::new(&base_dir)?;
            handbook::commands::search::run(&site, &query)?;
        }

        Commands::Version => {
            println!("handbook-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
