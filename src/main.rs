use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use dcon::app::App;
use dcon::cli::{Cli, Commands};
use dcon::core::resource::short_id;
use dcon::core::{DockerClient, ResourceClient, ResourceKind};
use dcon::utils::logging::init_logging;
use dcon::utils::{truncate_string, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    // Without an explicit host bollard's local defaults honour DOCKER_HOST
    cli.apply_overrides(&mut config);

    let _log_guard = init_logging(config.log_file.as_deref(), &config.log_level)?;

    // Engine unreachable is only fatal here, before the console starts
    let client = DockerClient::connect(&config.engine_settings())
        .await
        .context("Failed to connect to the container engine")?;

    match cli.command {
        None => {
            let mut app = App::new(client);
            app.run().await?;
        }
        Some(Commands::List { kind, json }) => {
            handle_list(&client, kind, json).await?;
        }
        Some(Commands::Logs { container }) => {
            let logs = client.fetch_logs(&container).await?;
            print!("{}", logs);
        }
    }

    Ok(())
}

async fn handle_list(client: &DockerClient, kind: ResourceKind, json: bool) -> Result<()> {
    let entries = client.list(kind).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{}\n", kind.title().bold());
    println!("{:<14} {}", "ID".bold(), "NAME".bold());
    println!("{}", "-".repeat(70));
    for entry in &entries {
        println!(
            "{:<14} {}",
            short_id(&entry.id).cyan(),
            truncate_string(&entry.label, 80)
        );
    }
    if entries.is_empty() {
        println!("{}", "(none)".dimmed());
    }

    Ok(())
}
