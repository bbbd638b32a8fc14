use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod backend;
mod config;
mod dashboard;
mod refresh;
mod view;

use api::{ApiStatus, HttpBackend};
use backend::Backend;
use config::{Cli, Command, WatchArgs};
use dashboard::Dashboard;
use view::DashboardView;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = cli.api_config();
    if api.is_none() {
        warn!("CLIMATE_API_URL or CLIMATE_API_KEY missing; every request falls back to mock data");
    }
    let backend: Arc<dyn Backend> =
        Arc::new(HttpBackend::new(api).context("failed to build HTTP client")?);

    match cli.command {
        Command::Watch(args) => watch(backend, &args).await,
        Command::Status => print_json(&ApiStatus::from_result(backend.status().await)),
        Command::Seed => {
            backend.seed().await.context("seeding failed")?;
            info!("database seeded");
            Ok(())
        }
        Command::AddClimate(args) => {
            let row = backend.add_climate(args.into()).await?;
            print_json(&row)
        }
        Command::ReportDisaster(args) => {
            let row = backend.report_disaster(args.into()).await?;
            print_json(&row)
        }
        Command::AddEnvironmental(args) => {
            let row = backend.add_environmental(args.into()).await?;
            print_json(&row)
        }
    }
}

async fn watch(backend: Arc<dyn Backend>, args: &WatchArgs) -> anyhow::Result<()> {
    let view = args.view();
    let mut dashboard = Dashboard::new(backend, args.options());
    let json = args.json;

    if args.once {
        dashboard.cycle().await;
        if let Some(refresh) = dashboard.state().current() {
            publish(&view, refresh, json);
        }
        return Ok(());
    }

    info!(
        category = %view.category,
        interval_secs = args.interval_secs,
        "watching; press Ctrl-C to stop"
    );
    dashboard
        .run(shutdown_signal(), |refresh| publish(&view, refresh, json))
        .await;
    Ok(())
}

fn publish(view: &DashboardView, refresh: &refresh::Refresh, json: bool) {
    let frame = view.render(refresh);
    if json {
        match serde_json::to_string(&frame) {
            Ok(line) => println!("{line}"),
            Err(err) => warn!("failed to encode frame: {err}"),
        }
    } else {
        print!("{frame}");
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
