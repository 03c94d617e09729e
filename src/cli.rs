//! Command-line interface for paneldeck.

use clap::Parser;
use std::time::Duration;

/// paneldeck - agent-driven widget workspace over MCP
#[derive(Parser, Debug)]
#[command(name = "paneldeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Per-command execution budget in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 5000)]
    pub deadline_ms: u64,

    /// Human-readable title for the session tab
    #[arg(long, value_name = "TITLE")]
    pub tab_title: Option<String>,
}

impl Cli {
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_deadline_is_five_seconds() {
        let cli = Cli::parse_from(["paneldeck"]);
        assert_eq!(cli.deadline(), Duration::from_secs(5));
    }

    #[test]
    fn test_deadline_override() {
        let cli = Cli::parse_from(["paneldeck", "--deadline-ms", "250"]);
        assert_eq!(cli.deadline(), Duration::from_millis(250));
    }

    #[test]
    fn test_tab_title_flag() {
        let cli = Cli::parse_from(["paneldeck"]);
        assert_eq!(cli.tab_title, None);

        let cli = Cli::parse_from(["paneldeck", "--tab-title", "agent session"]);
        assert_eq!(cli.tab_title.as_deref(), Some("agent session"));
    }
}
