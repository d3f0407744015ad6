use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "storedesk")]
#[command(bin_name = "storedesk")]
#[command(version)]
#[command(about = "Terminal admin console for managing stores")]
pub struct Cli {
    /// Write a timestamped diagnostics log under the config directory.
    #[arg(long, global = true)]
    pub diagnostics: bool,

    /// Open the console on a store's settings instead of the switcher.
    #[arg(long, value_name = "STORE_ID")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Run environment and configuration checks")]
    Doctor,
    #[command(about = "List stores from the configured backend")]
    Stores,
}
