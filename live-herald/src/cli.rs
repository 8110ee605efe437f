use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Announce watched Twitch channels when they go live.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "LIVE_HERALD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Roster file (overrides `roster_path`)
    #[arg(short, long)]
    pub roster: Option<PathBuf>,

    /// Run a single polling cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Log announcements instead of publishing them
    #[arg(long)]
    pub dry_run: bool,

    /// Directory for rolling log files (overrides `log_dir`)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Maximum announcement length (overrides `max_message_chars`)
    #[arg(long)]
    pub max_chars: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Poll the roster and publish announcements (default)
    Run,
    /// Load the roster, report problems and list entries
    CheckRoster,
    /// Check publisher credentials and the Twitch client id
    Verify {
        /// Channel used to exercise the Twitch client id
        #[arg(long, default_value = "twitch")]
        channel: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_run() {
        let args = Args::try_parse_from(["live-herald"]).unwrap();
        assert!(args.command.is_none());
        assert!(!args.once);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "live-herald",
            "--roster",
            "people.txt",
            "--once",
            "--dry-run",
            "--max-chars",
            "280",
            "check-roster",
        ])
        .unwrap();
        assert_eq!(args.roster, Some(PathBuf::from("people.txt")));
        assert!(args.once);
        assert!(args.dry_run);
        assert_eq!(args.max_chars, Some(280));
        assert_eq!(args.command, Some(Commands::CheckRoster));
    }

    #[test]
    fn test_verify_channel() {
        let args = Args::try_parse_from(["live-herald", "verify"]).unwrap();
        assert_eq!(
            args.command,
            Some(Commands::Verify {
                channel: "twitch".to_string()
            })
        );
    }
}
