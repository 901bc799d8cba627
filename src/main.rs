mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::relations::RelationOptions;
use dkg_client::render::OutputFormat;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only results
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::Cli::parse();
    let format: OutputFormat = cli.global.format.into();
    let client = commands::connect(cli.global.api_url.as_deref(), cli.global.timeout)?;

    let output = match cli.command {
        cli::Commands::Ground { text, namespaces } => {
            commands::ground::run(&client, &text, &namespaces, format).await?
        }
        cli::Commands::Entity { curie } => commands::entity::run(&client, &curie, format).await?,
        cli::Commands::Relations {
            target,
            relations,
            source,
            direction,
            limit,
            max_hops,
            distinct,
            full,
        } => {
            let options = RelationOptions {
                relations,
                source,
                direction: direction.map(Into::into),
                limit,
                max_hops,
                distinct,
                full,
            };
            commands::relations::run(&client, &target, &options, format).await?
        }
        cli::Commands::Search {
            text,
            limit,
            offset,
        } => commands::search::run(&client, &text, limit, offset, format).await?,
    };

    println!("{}", output);
    Ok(())
}
