use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod store;

#[derive(Debug, Parser)]
#[command(name = "shopscope")]
#[command(about = "Extract structured store intelligence from Shopify storefronts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the record for a store, extracting it if none is stored
    Extract {
        /// Store URL, e.g. `cool-mugs.myshopify.com` or `https://shop.example`
        url: String,
        /// Re-extract even when a stored record exists
        #[arg(long)]
        refresh: bool,
        /// Extract without reading or writing the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the stored record for a store
    Show {
        url: String,
    },
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    Ping,
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse first so `--help` and usage errors never depend on the environment.
    let cli = Cli::parse();
    let config = shopscope_core::load_app_config()?;

    // Logs go to stderr so stdout carries only the JSON record.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Some(Commands::Extract {
            url,
            refresh,
            dry_run,
        }) => store::run_extract(&config, &url, refresh, dry_run).await?,
        Some(Commands::Show { url }) => store::run_show(&config, &url).await?,
        Some(Commands::Db { command }) => {
            let pool = shopscope_db::connect_pool_from_config(&config).await?;
            match command {
                DbCommands::Ping => {
                    shopscope_db::ping(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = shopscope_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        None => println!("shopscope ready; run `shopscope --help` for commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
