// assay/src/main.rs

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug assay check ... pour voir les requêtes
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: RUN A SUITE ---
        Commands::Check { config, output, json } => {
            let success = commands::check::execute(&config, output.as_deref(), json).await?;
            if !success {
                // Exit with error code for CI/CD
                std::process::exit(1);
            }
        }

        // --- USE CASE: RENDER ONE TEMPLATE ---
        Commands::Render {
            file,
            name,
            template_dir,
            params,
        } => {
            commands::render::execute(&template_dir, &file, &name, params)?;
        }

        // --- USE CASE: LIST TEMPLATES ---
        Commands::List { file, template_dir } => {
            commands::list::execute(&template_dir, file.as_deref())?;
        }
    }

    Ok(())
}
