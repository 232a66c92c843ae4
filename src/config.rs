use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_URL: &str = "https://unit.cloud";
pub const DEFAULT_OUTPUT: &str = "scraped-content.json";
const DEFAULT_USER_AGENT: &str = concat!("site-snapshot/", env!("CARGO_PKG_VERSION"));

/// Scrape one page into the JSON snapshot the site is built from.
#[derive(Debug, Parser)]
#[command(name = "site-snapshot", version, about)]
pub struct Config {
    /// Page to scrape.
    #[arg(long, env = "SITE_SNAPSHOT_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Where the snapshot is written. Any existing file is replaced.
    #[arg(long, env = "SITE_SNAPSHOT_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Read HTML from this file instead of fetching `--url`.
    #[arg(long, env = "SITE_SNAPSHOT_FROM_FILE")]
    pub from_file: Option<PathBuf>,

    /// Give up on the request after this many seconds. Unset waits forever.
    #[arg(long, env = "SITE_SNAPSHOT_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with the request.
    #[arg(long, env = "SITE_SNAPSHOT_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn help_describes_the_tool_and_every_flag() {
        let command = Config::command();
        let about = command.get_about().map(|a| a.to_string()).unwrap_or_default();
        assert!(!about.trim().is_empty());
        for arg in command.get_arguments() {
            if matches!(arg.get_id().as_str(), "help" | "version") {
                continue;
            }
            assert!(arg.get_help().is_some(), "--{} has no help text", arg.get_id());
        }
    }

    #[test]
    fn defaults_match_the_original_script() {
        let config = Config::try_parse_from(["site-snapshot"]).unwrap();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(config.from_file.is_none());
        assert!(config.timeout().is_none());
        assert!(config.user_agent.starts_with("site-snapshot/"));
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "site-snapshot",
            "--url",
            "http://localhost:3000/",
            "--output",
            "out/snapshot.json",
            "--timeout-secs",
            "30",
        ])
        .unwrap();
        assert_eq!(config.url, "http://localhost:3000/");
        assert_eq!(config.output, PathBuf::from("out/snapshot.json"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }
}
