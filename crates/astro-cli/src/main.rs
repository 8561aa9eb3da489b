use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "astro")]
#[command(about = "Astro CLI - headless client for the Astro event pipeline", long_about = None)]
struct Cli {
    /// Directory holding config.toml and logs (defaults to ~/.config/astro)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with an access token and follow realtime notifications
    Listen {
        #[command(flatten)]
        auth: commands::AuthArgs,
    },
    /// Complete an achievement screen and print where navigation goes next
    Badge {
        #[command(flatten)]
        auth: commands::AuthArgs,
        /// Achievement name, e.g. RedPlanetVoyager or achievedRedPlanetVoyager
        achievement: String,
        /// Achievement screens still pending after this one
        #[arg(long = "pending")]
        pending: Vec<String>,
    },
    /// Change the dialogue reading speed (slow, medium, fast)
    TextSpeed {
        #[command(flatten)]
        auth: commands::AuthArgs,
        speed: String,
    },
    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Write the default configuration file if none exists
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_service = astro_infrastructure::ConfigService::new(cli.config_dir.as_deref());
    let config = config_service.get_config()?;
    let _log_guard = commands::logging::init(&config.logging, config_service.paths())?;

    match cli.command {
        Commands::Listen { auth } => commands::listen::run(&config, auth).await?,
        Commands::Badge {
            auth,
            achievement,
            pending,
        } => commands::badge::run(&config, auth, &achievement, pending).await?,
        Commands::TextSpeed { auth, speed } => {
            commands::settings::text_speed(&config, auth, &speed).await?
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config)?,
            ConfigAction::Init => commands::config::init(&config_service)?,
        },
    }

    Ok(())
}
