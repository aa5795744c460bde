use anyhow::Context;
use clap::Parser;
use edu_content_rag::cli::{self, Cli};
use edu_content_rag::infrastructure::logging::init_logging;
use edu_content_rag::{create_app_context, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging);

    let ctx = create_app_context(config).await?;

    cli::run(&ctx, cli.command).await
}
