use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dayframe",
    about = "Dayframe — one image per calendar date",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Register an admin account against the local catalog
    Register(RegisterArgs),
    /// Insert catalog rows for on-disk images that lack one
    Reconcile,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Override the configured bind address.
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct RegisterArgs {
    pub email: String,
    /// Password for the new account. Falls back to $DAYFRAME_PASSWORD.
    #[arg(long)]
    pub password: Option<String>,
}
