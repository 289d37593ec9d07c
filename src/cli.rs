use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "godrive")]
#[command(about = "Upload files and directories to Google Drive")]
#[command(disable_help_flag = true, disable_help_subcommand = true)]
pub struct Cli {
    /// Without a subcommand the interactive upload wizard starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the version
    Version,

    /// Describe the tool
    Info,
}
