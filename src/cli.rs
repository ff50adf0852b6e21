//! CLI definitions for tvnav.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tvnav CLI.
#[derive(Parser)]
#[command(name = "tvnav")]
#[command(about = "Spatial remote-control navigation for web-based TV interfaces")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults apply when it does not exist)
    #[arg(
        short,
        long,
        env = "TVNAV_CONFIG",
        default_value = "config/tvnav.toml",
        global = true
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the status service in foreground (default)
    Serve {
        /// Listen host (overrides [server].host)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides [server].port)
        #[arg(long)]
        port: Option<u16>,

        /// Page snapshot to drive; exposes its navigator at /api/navigator
        #[arg(long)]
        page: Option<PathBuf>,
    },

    /// Replay remote keys against a page snapshot and print each step as JSON
    Replay {
        /// Page snapshot (JSON)
        #[arg(long)]
        page: PathBuf,

        /// Comma-separated keys, e.g. `ArrowDown,ArrowRight,Enter,Ctrl+ArrowLeft@12`
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,
    },

    /// Load and validate the configuration file
    CheckConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::parse_from(["tvnav"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("config/tvnav.toml"));
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::parse_from(["tvnav", "serve", "--port", "9000", "--page", "demos/browse.json"]);
        match cli.command {
            Some(Commands::Serve { host, port, page }) => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9000));
                assert_eq!(page, Some(PathBuf::from("demos/browse.json")));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_replay_keys_are_split() {
        let cli = Cli::parse_from([
            "tvnav",
            "--config",
            "custom.toml",
            "replay",
            "--page",
            "page.json",
            "--keys",
            "ArrowDown,Enter,Ctrl+ArrowLeft@3",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        match cli.command {
            Some(Commands::Replay { page, keys }) => {
                assert_eq!(page, PathBuf::from("page.json"));
                assert_eq!(keys, vec!["ArrowDown", "Enter", "Ctrl+ArrowLeft@3"]);
            }
            _ => panic!("expected replay"),
        }
    }
}
