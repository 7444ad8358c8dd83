// ABOUTME: Entry point for the maillist binary.
// ABOUTME: Parses CLI arguments, initializes tracing, and runs the servers or the demo client.

mod cli;
mod client;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use maillist_server::config::{grpc_addr_from_env, parse_bind};
use maillist_server::{AppState, MaillistConfig};
use maillist_store::EmailStore;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, ServeArgs};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("maillist=debug,maillist_store=debug,maillist_rpc=debug,maillist_server=debug,tower_http=debug")
        }))
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or_else(|| Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => cmd_serve(MaillistConfig::from_env()?, args).await,
        Commands::Client { addr, action } => {
            client::run(addr.unwrap_or_else(grpc_addr_from_env), action).await
        }
    }
}

async fn cmd_serve(mut config: MaillistConfig, args: ServeArgs) -> Result<()> {
    if let Some(db) = args.db {
        config.db_path = db;
    }
    if let Some(bind) = args.bind_json {
        config.bind_json = parse_bind("--bind-json", bind)?;
    }
    if let Some(bind) = args.bind_grpc {
        config.bind_grpc = parse_bind("--bind-grpc", bind)?;
    }

    info!("using database '{}'", config.db_path.display());
    let store = EmailStore::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    store
        .init_schema()
        .await
        .context("failed to create the emails table")?;

    let json_listener = TcpListener::bind(config.bind_json)
        .await
        .with_context(|| format!("failed to bind JSON API to {}", config.bind_json))?;
    let grpc_listener = TcpListener::bind(config.bind_grpc)
        .await
        .with_context(|| format!("failed to bind gRPC API to {}", config.bind_grpc))?;

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown requested");
                let _ = stop_tx.send(true);
            }
            Err(e) => {
                warn!("cannot listen for ctrl-c, running until killed: {}", e);
                std::future::pending::<()>().await;
            }
        }
    });

    let state = Arc::new(AppState::new(store.clone()));
    let json_stop = stopped(stop_rx.clone());
    let grpc_stop = stopped(stop_rx);

    info!("starting JSON API server...");
    info!("starting gRPC API server...");
    tokio::try_join!(
        async {
            maillist_server::serve(state, json_listener, json_stop)
                .await
                .context("JSON API server failed")
        },
        async {
            maillist_rpc::serve(store, grpc_listener, grpc_stop)
                .await
                .context("gRPC API server failed")
        },
    )?;

    info!("maillist stopped");
    Ok(())
}

/// Resolves once the stop flag flips to true.
async fn stopped(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}
