mod cli;
mod client;
mod config;
mod images;
mod report;
mod search;

use std::rc::Rc;

use clap::Parser;
use cli::{CliArgs, Command, ImagesCommand};
use client::ApiClient;
use color_eyre::Result;
use config::Config;
use t20_core::{Endpoint, Page, PlayerCache, PlayerRecord};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    init_tracing(args.debug);

    let config = config::init_app_config();
    tracing::debug!("using {} and {}", config.api_url, config.images_dir.display());

    run(args.command, &config).await
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(command: Command, config: &Config) -> Result<()> {
    let client = ApiClient::new(&config.api_url)?;

    match command {
        Command::Team { name, json } => {
            let records = client.fetch(&Endpoint::Team(name.clone())).await?;
            if records.is_empty() {
                tracing::warn!("no players found for team {name}");
            }
            print_records(&records, json, || report::team_report(&name, &records))
        }
        Command::Category { id, json } => {
            let page = Page::category(id);
            let records = client.fetch(&page.endpoint()).await?;
            print_records(&records, json, || report::category_report(&page, &records))
        }
        Command::Search { query, json } => {
            let players = all_players(client).await?;
            let results = search::search(&query, &players);
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", search::render(&results));
            }
            Ok(())
        }
        Command::Images { action } => {
            let players = all_players(client).await?;
            run_images(action, &players, config)
        }
    }
}

async fn all_players(client: ApiClient) -> Result<Rc<[PlayerRecord]>> {
    let cache = PlayerCache::new(Rc::new(client));
    let players = cache.get().await?;
    tracing::info!("loaded {} players", players.len());
    Ok(players)
}

fn print_records(
    records: &[PlayerRecord],
    json: bool,
    table: impl FnOnce() -> String,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
    } else {
        print!("{}", table());
    }
    Ok(())
}

fn run_images(action: ImagesCommand, players: &[PlayerRecord], config: &Config) -> Result<()> {
    let dir = &config.images_dir;

    match action {
        ImagesCommand::Names => {
            for (name, file) in images::expected_names(players) {
                println!("{name} -> {file}");
            }
        }
        ImagesCommand::Audit { csv, json } => {
            let report = images::audit(dir, players);
            if let Some(path) = &csv {
                images::write_missing_csv(path, &report.missing)?;
                tracing::info!("wrote {}", path.display());
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", images::render_audit(&report));
            }
        }
        ImagesCommand::Placeholders { dry_run } => {
            let report = images::audit(dir, players);
            if report.missing.is_empty() {
                println!("No changes needed; every player has an image");
                return Ok(());
            }
            let written = images::write_placeholders(dir, &report.missing, dry_run)?;
            let verb = if dry_run { "Would write" } else { "Wrote" };
            println!("{verb} {} SVG placeholders", written.len());
            for path in written {
                println!("- {}", path.display());
            }
        }
    }
    Ok(())
}
