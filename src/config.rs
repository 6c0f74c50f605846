// Configuration management for the route table sorter
// Supports CLI arguments, config file (TOML), and environment variables

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use anyhow::Context;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Route Table Sorter - IPv4 routing table with click-to-sort columns
#[derive(Parser, Debug, Clone)]
#[command(name = "route-table-sorter")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Web server port
    #[arg(short, long, env = "RTS_PORT")]
    pub port: Option<u16>,

    /// Bind address (IPv4 or IPv6)
    #[arg(short, long, env = "RTS_BIND")]
    pub bind: Option<String>,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(short, long, env = "RTS_LOG")]
    pub log_level: Option<String>,

    /// Path to configuration file
    #[arg(short, long, env = "RTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Route data file (JSON)
    #[arg(short, long, env = "RTS_ROUTES")]
    pub routes: Option<PathBuf>,

    /// Where to take routes from
    #[arg(short, long, value_enum, env = "RTS_SOURCE")]
    pub source: Option<RouteSource>,

    /// Page title
    #[arg(short, long, env = "RTS_TITLE")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
    /// Static JSON routes file
    #[default]
    File,
    /// The host's IPv4 routing table
    System,
}

/// Configuration file structure (TOML format)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Route data settings
    #[serde(default)]
    pub data: DataConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Web server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bind address (default: 127.0.0.1)
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Directory served under /static
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Page title
    #[serde(default = "default_title")]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub source: RouteSource,

    #[serde(default = "default_routes_file")]
    pub routes_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_port() -> u16 {
    8080
}
fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}
fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}
fn default_title() -> String {
    "Active IPv4 routes".to_string()
}
fn default_routes_file() -> PathBuf {
    PathBuf::from("data/routes.json")
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: default_port(),
            bind_address: default_bind_address(),
            static_dir: default_static_dir(),
            title: default_title(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            source: RouteSource::default(),
            routes_file: default_routes_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

/// Merged configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_address: IpAddr,
    pub static_dir: PathBuf,
    pub title: String,
    pub log_level: Level,
    pub source: RouteSource,
    pub routes_file: PathBuf,
    /// Config file that was read, if any
    pub loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources (CLI args, config file, defaults)
    /// Priority: CLI args / environment > Config file > Defaults
    pub fn load() -> anyhow::Result<Self> {
        let cli_args = CliArgs::parse();
        let (config_file, loaded_from) = load_config_file(&cli_args)?;
        let mut config = Config::merge(cli_args, config_file)?;
        config.loaded_from = loaded_from;
        Ok(config)
    }

    fn merge(cli_args: CliArgs, config_file: ConfigFile) -> anyhow::Result<Self> {
        let level_str = cli_args.log_level.unwrap_or(config_file.logging.level);
        let log_level = parse_log_level(&level_str)?;

        let bind_str = cli_args.bind.unwrap_or(config_file.server.bind_address);
        let bind_address: IpAddr = bind_str
            .parse()
            .with_context(|| format!("Invalid bind address: {}", bind_str))?;

        Ok(Config {
            port: cli_args.port.unwrap_or(config_file.server.port),
            bind_address,
            static_dir: config_file.server.static_dir,
            title: cli_args.title.unwrap_or(config_file.server.title),
            log_level,
            source: cli_args.source.unwrap_or(config_file.data.source),
            routes_file: cli_args.routes.unwrap_or(config_file.data.routes_file),
            loaded_from: None,
        })
    }
}

/// Read the config file named on the command line, or the first default
/// location that exists. Returns the path alongside the parsed file.
fn load_config_file(cli_args: &CliArgs) -> anyhow::Result<(ConfigFile, Option<PathBuf>)> {
    if let Some(config_path) = &cli_args.config {
        let config_file = read_config_file(config_path)?;
        return Ok((config_file, Some(config_path.clone())));
    }

    // Try loading from default locations
    let default_paths = [
        PathBuf::from("config.toml"),
        PathBuf::from("route-table.toml"),
    ];

    for path in default_paths {
        if path.exists() {
            let config_file = read_config_file(&path)?;
            return Ok((config_file, Some(path)));
        }
    }

    Ok((ConfigFile::default(), None))
}

fn read_config_file(path: &Path) -> anyhow::Result<ConfigFile> {
    let config_content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str::<ConfigFile>(&config_content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_log_level(level_str: &str) -> anyhow::Result<Level> {
    match level_str.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        _ => Err(anyhow::anyhow!("Invalid log level: {}", level_str)),
    }
}
