use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::errors::ServeError;

pub const DEFAULT_PORT: &str = "8080";
pub const DEFAULT_INDEX: &str = "README.md";
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Command-line flags
#[derive(Debug, Clone, Parser)]
#[command(name = "godown", about = "Serve a directory of Markdown documents as HTML")]
pub struct Cli {
    /// HTTP server port (or PORT env var)
    #[arg(long, default_value = DEFAULT_PORT)]
    pub port: String,

    /// Custom CSS file path (or STYLE env var)
    #[arg(long, default_value = "")]
    pub style: String,

    /// Default index file (or INDEX env var)
    #[arg(long, default_value = DEFAULT_INDEX)]
    pub index: String,

    /// Directory to serve
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Address to bind
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            style: String::new(),
            index: DEFAULT_INDEX.to_string(),
            root: PathBuf::from("."),
            host: DEFAULT_HOST.to_string(),
        }
    }
}

/// Application configuration, fixed for the lifetime of the process
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub port: u16,
    pub host: String,
    pub style_path: Option<PathBuf>,
    pub index_file: String,
}

impl Config {
    /// Create a configuration with default values serving `root`
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            port: 8080,
            host: DEFAULT_HOST.to_string(),
            style_path: None,
            index_file: DEFAULT_INDEX.to_string(),
        }
    }

    /// Layer environment over flags over defaults.
    ///
    /// `env` returns the value of an environment variable; empty values count
    /// as unset.
    pub fn resolve<F>(cli: Cli, env: F) -> Result<Self, ServeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, flag: String| -> String {
            env(key).filter(|v| !v.is_empty()).unwrap_or(flag)
        };

        let port_raw = pick("PORT", cli.port);
        let port = port_raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ServeError::InvalidConfig(format!("invalid port '{}'", port_raw)))?;

        let style = pick("STYLE", cli.style);
        let style_path = if style.is_empty() { None } else { Some(PathBuf::from(style)) };

        let index_file = pick("INDEX", cli.index);
        if index_file.is_empty() {
            return Err(ServeError::InvalidConfig("index file name is empty".to_string()));
        }

        Ok(Self { root: cli.root, port, host: cli.host, style_path, index_file })
    }

    /// Resolve from the real process environment
    pub fn from_env(cli: Cli) -> Result<Self, ServeError> {
        Self::resolve(cli, |key| std::env::var(key).ok())
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, ServeError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ServeError::InvalidConfig(format!("invalid listen address '{}:{}'", self.host, self.port)))
    }
}
