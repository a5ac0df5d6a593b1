//! CLI entry point for postmap

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postmap")]
#[command(version)]
#[command(about = "Build and query the posts index of a Markdown/MDX blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Defaults to `build`
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the posts index
    #[command(alias = "b")]
    Build,

    /// List posts, categories or tags from the index
    List {
        /// Type of content to list (post, category, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show a single post
    Show {
        slug: String,

        /// Print the post as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Category directory to create the post in
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Generate sitemap.xml and robots.txt
    #[command(alias = "g")]
    Generate {
        /// Rebuild the index first
        #[arg(short, long)]
        build: bool,
    },

    /// Remove the index and generated files
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postmap=debug,info"
    } else {
        "postmap=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => {
            let site = postmap::Site::new(&base_dir)?;
            site.build_index().await?;
        }

        Commands::List { r#type } => {
            let site = postmap::Site::new(&base_dir)?;
            postmap::commands::list::run(&site, &r#type)?;
        }

        Commands::Show { slug, json } => {
            let site = postmap::Site::new(&base_dir)?;
            postmap::commands::show::run(&site, &slug, json)?;
        }

        Commands::New { title, category } => {
            let site = postmap::Site::new(&base_dir)?;
            let path = postmap::commands::new::create_post(&site, &title, category.as_deref())?;
            println!("Created: {}", path.display());
        }

        Commands::Generate { build } => {
            let site = postmap::Site::new(&base_dir)?;
            if build {
                site.build_index().await?;
            }
            postmap::commands::generate::run(&site)?;
            println!("Generated successfully!");
        }

        Commands::Clean => {
            let site = postmap::Site::new(&base_dir)?;
            tracing::info!("Cleaning generated files...");
            postmap::commands::clean::run(&site)?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("postmap version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
