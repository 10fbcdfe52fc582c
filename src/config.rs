//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "focus-flow")]
#[command(about = "A state-managed HTTP server for a Pomodoro focus timer and productivity dashboard")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Countdown value loaded on startup, in seconds
    #[arg(short, long, default_value = "1500")]
    pub initial_time: u64,

    /// Number of focus sessions planned for the day
    #[arg(short, long, default_value = "8")]
    pub total_sessions: u32,

    /// Start with the sample tasks and statistics loaded
    #[arg(long)]
    pub sample_data: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let config = Config::try_parse_from(["focus-flow"]).unwrap();
        assert_eq!(config.port, 20554);
        assert_eq!(config.initial_time, 1500);
        assert_eq!(config.total_sessions, 8);
        assert!(!config.sample_data);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn parses_overrides() {
        let config = Config::try_parse_from([
            "focus-flow", "--port", "8080", "--host", "127.0.0.1", "-i", "90", "--sample-data", "-v",
        ])
        .unwrap();
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.initial_time, 90);
        assert!(config.sample_data);
        assert_eq!(config.log_level(), "debug");
    }
}
