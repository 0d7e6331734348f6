// ABOUTME: Command-line interface definitions using clap
// ABOUTME: Defines all subcommands and global flags

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quipex")]
#[command(about = "Export a Quip folder tree to local Markdown files", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API bearer token (overrides config file and env)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// REST API base URL
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Web UI domain, e.g. https://your-company.quip.com
    #[arg(long, global = true)]
    pub domain: Option<String>,

    /// Output folder for exported files
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Folder ID to start from (defaults to the private folder)
    #[arg(long, global = true)]
    pub folder: Option<String>,

    /// Export even when a same-named local file exists
    #[arg(long, global = true)]
    pub no_dupe_check: bool,

    /// Use the example folder, rooted at test-export/
    #[arg(long, global = true)]
    pub testing: bool,

    /// Slow down browser actions for debugging
    #[arg(long, global = true)]
    pub slow_mo: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Export the folder tree (default)
    Export,

    /// Print the authenticated user's private folder id
    Whoami,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_export() {
        let cli = Cli::parse_from(["quipex"]);
        assert!(matches!(cli.command(), Commands::Export));
    }

    #[test]
    fn test_global_flags_with_subcommand() {
        let cli = Cli::parse_from(["quipex", "whoami", "--token", "abc"]);
        assert!(matches!(cli.command(), Commands::Whoami));
        assert_eq!(cli.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_folder_and_output_flags() {
        let cli = Cli::parse_from(["quipex", "--folder", "fold1", "--output", "out"]);
        assert_eq!(cli.folder.as_deref(), Some("fold1"));
        assert_eq!(cli.output, Some(PathBuf::from("out")));
    }
}
