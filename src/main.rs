use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use souk::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for souk::AppCommand {
    fn from(cmd: Commands) -> souk::AppCommand {
        match cmd {
            Commands::Show { id } => souk::AppCommand::Show { id },
            Commands::Products => souk::AppCommand::Products,
            Commands::Accessories => souk::AppCommand::Accessories,
            Commands::Categories => souk::AppCommand::Categories,
            Commands::Convert { amount, from, to } => {
                souk::AppCommand::Convert { amount, from, to }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Resolve and display one catalog item by id
    Show {
        /// Product or accessory identifier
        id: String,
    },
    /// List all products
    Products,
    /// List all accessories
    Accessories,
    /// List all categories
    Categories,
    /// Convert an amount between currencies
    Convert {
        amount: f64,
        /// Source currency code (MAD, EUR, USD, XOF)
        from: String,
        /// Target currency code
        to: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => souk::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = souk::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
api:
  base_url: "http://localhost:1337"

currency: "MAD"
locale: "en"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
