//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Overrides;

/// Compose a daily quote image and publish it.
#[derive(Parser, Debug)]
#[command(name = "quotecard", version, about)]
pub struct Cli {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// History log path (overrides the config file).
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Output image path (overrides the config file).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Photo search query for the background.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Compose the image but do not upload, notify, or touch the history log.
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The subset of flags that override config file values.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            history: self.history.clone(),
            output: self.output.clone(),
            query: self.query.clone(),
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cli = Cli::parse_from(["quotecard"]);
        assert!(cli.config.is_none());
        assert!(cli.history.is_none());
        assert!(cli.output.is_none());
        assert!(cli.query.is_none());
        assert!(!cli.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn all_options() {
        let cli = Cli::parse_from([
            "quotecard",
            "--config",
            "c.toml",
            "--history",
            "h.txt",
            "-o",
            "out.jpg",
            "-q",
            "mountains",
            "--dry-run",
            "-v",
        ]);
        assert_eq!(cli.config.as_deref(), Some("c.toml"));
        assert!(cli.verbose);

        let overrides = cli.overrides();
        assert_eq!(overrides.history, Some(PathBuf::from("h.txt")));
        assert_eq!(overrides.output, Some(PathBuf::from("out.jpg")));
        assert_eq!(overrides.query.as_deref(), Some("mountains"));
        assert!(overrides.dry_run);
    }
}
