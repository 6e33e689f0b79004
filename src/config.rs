//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

use crate::state::preferences::default_preferences_path;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "zeno")]
#[command(about = "A menu-bar style focus timer with desktop notifications")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Timer duration in seconds
    #[arg(short, long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    pub duration: u64,

    /// Preferences file (defaults to the user config directory)
    #[arg(long)]
    pub preferences: Option<PathBuf>,

    /// Stream a status bar line to stdout on every change
    #[arg(long)]
    pub status_line: bool,

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

    pub fn timer_duration(&self) -> Duration {
        Duration::from_secs(self.duration)
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.preferences.clone().unwrap_or_else(default_preferences_path)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
