//! # Recipe Manager CLI (`recipe-manager`)
//!
//! Starts the ingredient catalog front-ends over one shared in-memory store.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `recipe-manager serve http` | JSON API, HTML pages, `/tools/*` and `/mcp` |
//! | `recipe-manager serve mcp` | MCP server over stdio |
//! | `recipe-manager tools` | List the tools offered to agents |
//! | `recipe-manager seed` | Show the demo pantry list as it would be stored |
//!
//! ## Examples
//!
//! ```bash
//! recipe-manager serve http --bind 0.0.0.0:8080 --seed
//! RUST_LOG=debug recipe-manager --config ./config/recipes.toml serve http
//! ```
//!
//! For an MCP client configuration:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "recipe-manager": {
//!       "command": "recipe-manager",
//!       "args": ["serve", "mcp", "--seed"]
//!     }
//!   }
//! }
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use recipe_manager::config::{self, Config};
use recipe_manager::mcp::{self, McpBridge};
use recipe_manager::seed::{self, PANTRY_STAPLES};
use recipe_manager::server;
use recipe_manager::traits::{ToolContext, ToolRegistry};
use recipe_manager::{InMemoryStore, IngredientStore};

/// Recipe Manager: an in-memory ingredient catalog served over a JSON API,
/// HTML pages, and MCP tools.
#[derive(Parser)]
#[command(name = "recipe-manager", version)]
struct Cli {
    /// Path to a configuration file (TOML).
    ///
    /// Without it, built-in defaults are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a server.
    Serve {
        #[command(subcommand)]
        service: ServeService,
    },

    /// List the tools offered to agents.
    Tools,

    /// Print the demo pantry list as it would be stored, without keeping it.
    Seed,
}

#[derive(Subcommand)]
enum ServeService {
    /// HTTP server: JSON API, HTML pages, tool endpoints, and MCP at `/mcp`.
    Http {
        /// Override `[server].bind`.
        #[arg(long)]
        bind: Option<String>,

        /// Populate the store with demo data at startup.
        #[arg(long)]
        seed: bool,
    },

    /// MCP server over stdin/stdout.
    Mcp {
        /// Populate the store with demo data at startup.
        #[arg(long)]
        seed: bool,
    },
}

fn init_tracing() {
    // stderr keeps stdout free for the MCP stdio transport.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(seed_requested: bool) -> anyhow::Result<Arc<dyn IngredientStore>> {
    let store: Arc<dyn IngredientStore> = Arc::new(InMemoryStore::new());
    if seed_requested {
        let created = seed::seed_store(store.as_ref()).context("Failed to seed ingredient store")?;
        tracing::info!(count = created.len(), "seeded ingredient store");
    }
    Ok(store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Serve { service } => match service {
            ServeService::Http { bind, seed } => {
                if let Some(bind) = bind {
                    cfg.server.bind = bind;
                    cfg.validate()?;
                }
                let store = open_store(seed || cfg.store.seed)?;
                server::run_server(&cfg, store).await?;
            }
            ServeService::Mcp { seed } => {
                let store = open_store(seed || cfg.store.seed)?;
                let bridge = McpBridge::new(
                    Arc::new(ToolRegistry::with_builtins()),
                    ToolContext::new(store),
                );
                mcp::run_stdio(bridge).await?;
            }
        },
        Commands::Tools => {
            let registry = ToolRegistry::with_builtins();
            println!("Registered {} tools:", registry.len());
            for t in registry.tools() {
                let mode = if t.is_read_only() { "read" } else { "write" };
                println!("  {} ({}): {}", t.name(), mode, t.description());
            }
        }
        Commands::Seed => {
            // Seed a throwaway store so duplicates show up exactly as they would.
            let scratch = InMemoryStore::new();
            let report = seed::seed_names(&scratch, PANTRY_STAPLES)?;
            for ingredient in &report.created {
                println!("{:>3}  {}", ingredient.id, ingredient.name);
            }
            for (raw, e) in &report.skipped {
                println!("     {} (skipped: {})", raw, e);
            }
        }
    }

    Ok(())
}
