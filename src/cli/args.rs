//! Command line argument parsing

use crate::platform::client::{HttpClientConfig, DEFAULT_BASE_URL};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// yoat - resolve the best audio stream of a video
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Video ID or video URL to resolve
    pub id: Option<String>,

    /// Run the HTTP resolver service instead of a one-shot lookup
    #[arg(long)]
    pub serve: bool,

    /// Address the service listens on
    #[arg(long, value_name = "ADDR", default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,

    /// Platform origin to fetch pages and scripts from
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// HTTP timeout (e.g., 30s, 1m)
    #[arg(long, value_name = "DURATION", default_value = "30s")]
    pub timeout: humantime::Duration,

    /// HTTP retries after a timeout
    #[arg(long, default_value = "1")]
    pub retries: u32,

    /// Override User-Agent header
    #[arg(long, value_name = "USER_AGENT")]
    pub user_agent: Option<String>,

    /// Proxy URL (http/https/socks)
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Print the resolution as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Get HTTP timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        self.timeout.into()
    }

    /// Build the platform client configuration
    pub fn client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout_duration(),
            max_retries: self.retries,
            user_agent: self.user_agent.clone(),
            proxy_url: self.proxy.clone(),
        }
    }

    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal
    Normal,
    /// Verbose (debug info)
    Verbose,
}

impl VerbosityLevel {
    /// Log filter used when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "error",
            VerbosityLevel::Normal => "info",
            VerbosityLevel::Verbose => "debug",
        }
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            id: None,
            serve: false,
            listen: SocketAddr::from(([127, 0, 0, 1], 8080)),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: humantime::Duration::from(Duration::from_secs(30)),
            retries: 1,
            user_agent: None,
            proxy: None,
            json: false,
            verbose: false,
            quiet: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["yoat"]).unwrap();
        assert_eq!(args.id, None);
        assert!(!args.serve);
        assert_eq!(args.listen, SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(args.base_url, DEFAULT_BASE_URL);
        assert_eq!(args.timeout_duration(), Duration::from_secs(30));
        assert_eq!(args.retries, 1);
        assert!(!args.json);
        assert_eq!(args.verbosity_level(), VerbosityLevel::Normal);
    }

    #[test]
    fn test_parse_custom_values() {
        let args = Args::try_parse_from([
            "yoat",
            "dQw4w9WgXcQ",
            "--timeout",
            "1m",
            "--retries",
            "3",
            "--base-url",
            "http://localhost:9000",
            "--proxy",
            "socks5://proxy:1080",
            "--json",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.id.as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(args.timeout_duration(), Duration::from_secs(60));
        assert!(args.json);
        assert_eq!(args.verbosity_level(), VerbosityLevel::Verbose);

        let config = args.client_config();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.proxy_url.as_deref(), Some("socks5://proxy:1080"));
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_parse_serve() {
        let args = Args::try_parse_from(["yoat", "--serve", "--listen", "0.0.0.0:3000"]).unwrap();
        assert!(args.serve);
        assert_eq!(args.listen.port(), 3000);
        assert!(Args::try_parse_from(["yoat", "--listen", "nowhere"]).is_err());
    }

    #[test]
    fn test_args_verbosity_level() {
        let args = Args {
            quiet: true,
            verbose: true,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level(), VerbosityLevel::Quiet);
        assert_eq!(args.verbosity_level().log_filter(), "error");

        let args = Args {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level().log_filter(), "debug");
        assert_eq!(Args::default().verbosity_level().log_filter(), "info");
    }
}
