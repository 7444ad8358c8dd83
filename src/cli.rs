// ABOUTME: Command-line definitions for the maillist binary.
// ABOUTME: `serve` runs both front ends; `client` calls the gRPC API once per invocation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Mailing-list subscriber registry served over gRPC and JSON/HTTP.
#[derive(Parser)]
#[command(
    name = "maillist",
    version,
    about = "Mailing-list subscriber registry",
    long_about = "Stores subscriber addresses in one SQLite file and serves them over a \
                  JSON/HTTP API and a gRPC API at the same time."
)]
pub struct Cli {
    /// Defaults to `serve` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the JSON and gRPC servers against one database file.
    Serve(ServeArgs),

    /// Call the gRPC API of a running server.
    Client {
        /// Server endpoint (overrides MAILINGLIST_GRPC_ADDR).
        #[arg(long)]
        addr: Option<String>,

        #[command(subcommand)]
        action: ClientAction,
    },
}

/// Overrides for the MAILINGLIST_* environment settings.
#[derive(Args, Default)]
pub struct ServeArgs {
    /// SQLite database file.
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Listen address for the JSON API.
    #[arg(long)]
    pub bind_json: Option<String>,

    /// Listen address for the gRPC API.
    #[arg(long)]
    pub bind_grpc: Option<String>,
}

#[derive(Subcommand)]
pub enum ClientAction {
    /// Subscribe an address.
    Create { email: String },

    /// Look up one address.
    Get { email: String },

    /// List one page of subscribed addresses.
    Batch {
        #[arg(long, default_value_t = 1)]
        page: i32,

        #[arg(long, default_value_t = 10)]
        count: i32,
    },

    /// Insert or overwrite the entry for an address.
    Update {
        email: String,

        /// Confirmation time in seconds since the Unix epoch.
        #[arg(long, default_value_t = 0)]
        confirmed_at: i64,

        #[arg(long)]
        opt_out: bool,
    },

    /// Opt an address out.
    Delete { email: String },
}
