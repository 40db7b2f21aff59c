use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "farm-dashboard")]
#[command(about = "Farm inspection dashboard: browse records by farm and severity, download photos", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CSV path or http(s) URL (overrides config and FARM_DASHBOARD_SOURCE)
    #[arg(long, global = true)]
    pub source: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the farms in the dataset
    Farms,

    /// Show the records of one farm
    Show {
        /// Farm name (case and surrounding whitespace are ignored)
        #[arg(short, long)]
        farm_name: Option<String>,

        /// Severity level, or "all"
        #[arg(short, long)]
        severity: Option<String>,

        /// Write fetched images and images.zip into this directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pick farm and severity interactively
    Browse {
        /// Preselected farm name
        #[arg(short, long)]
        farm_name: Option<String>,

        /// Preselected severity
        #[arg(short, long)]
        severity: Option<String>,

        /// Write fetched images and images.zip into this directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the dashboard over HTTP
    Serve {
        /// Bind address (default from config)
        #[arg(long)]
        host: Option<String>,

        /// Port (default from config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show or edit the configuration
    Config {
        /// Store a default data source
        #[arg(long)]
        set_source: Option<String>,

        /// Print the configuration
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show() {
        let cli = Cli::parse_from([
            "farm-dashboard", "--source", "data.csv", "show", "--farm-name", "acme", "-s", "High",
        ]);
        assert_eq!(cli.source.as_deref(), Some("data.csv"));
        match cli.command {
            Commands::Show { farm_name, severity, output } => {
                assert_eq!(farm_name.as_deref(), Some("acme"));
                assert_eq!(severity.as_deref(), Some("High"));
                assert!(output.is_none());
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::parse_from(["farm-dashboard", "serve", "-p", "9000", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Serve { port: Some(9000), host: None }));
    }
}
