//! CLI interface for Turnstile

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "turnstile")]
#[command(version = "0.1.0")]
#[command(about = "Username/password authentication service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new turnstile.toml configuration file
    Init,

    /// Start the HTTP authentication server
    Serve {
        /// Host to bind to (overrides [server].host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides [server].port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
