use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::time::Duration;

use camino::{Utf8Path as Path, Utf8PathBuf as PathBuf};
use chrono_tz::Tz;
use color_eyre::eyre::{Context, Result};
use reqwest::Url;
use serde::Deserialize;
use tracing::warn;

use crate::timeline::SortOrder;

pub const BACKEND_URL_ENV: &str = "ANOTHERSKY_BACKEND_URL";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 20;
const DEFAULT_TITLE: &str = "ANOTHER SKY";
const DEFAULT_TIME_ZONE: Tz = chrono_tz::Asia::Tokyo;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct TomlServer {
    address: Option<String>,
    port: Option<u16>,
    static_dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct TomlBackend {
    url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct TomlDisplay {
    title: Option<String>,
    time_zone: Option<String>,
    default_sort: Option<String>,
    theme: Option<String>,
    link_previews: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct TomlConfig {
    #[serde(rename = "Server", default)]
    pub server: TomlServer,
    #[serde(rename = "Backend", default)]
    pub backend: TomlBackend,
    #[serde(rename = "Display", default)]
    pub display: TomlDisplay,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// `None` if no usable URL was configured, pages then render an error state
    pub url: Option<Url>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub title: String,
    pub time_zone: Tz,
    pub default_sort: SortOrder,
    pub theme: Theme,
    pub link_previews: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub display: DisplayConfig,
}

/// Reads the config file if there is one and applies `ANOTHERSKY_BACKEND_URL` on top.
/// Relative paths in the file are relative to the file's directory.
pub async fn read_config(path: Option<&Path>) -> Result<Config> {
    let toml_str = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .context(format!("Error reading config file {}", path))?,
        None => String::new(),
    };
    let mut config = parse_config(&toml_str, std::env::var(BACKEND_URL_ENV).ok())?;
    if let (Some(config_dir), Some(static_dir)) =
        (path.and_then(|p| p.parent()), config.server.static_dir.as_mut())
    {
        if static_dir.is_relative() {
            let joined = config_dir.join(&*static_dir);
            *static_dir = joined;
        }
    }
    Ok(config)
}

pub fn parse_config(toml_str: &str, backend_url_override: Option<String>) -> Result<Config> {
    let toml_config: TomlConfig = toml::from_str(toml_str).context("Error parsing config file")?;

    let address = toml_config
        .server
        .address
        .as_deref()
        .map(|a| a.parse::<IpAddr>().wrap_err("error parsing listening address"))
        .transpose()?
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
    let server = ServerConfig {
        address,
        port: toml_config.server.port.unwrap_or(DEFAULT_PORT),
        static_dir: toml_config.server.static_dir.map(PathBuf::from),
    };

    let backend = BackendConfig {
        url: backend_url_override
            .or(toml_config.backend.url)
            .and_then(|url| parse_backend_url(&url)),
        timeout: Duration::from_secs(
            toml_config
                .backend
                .timeout_secs
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
    };

    let display = DisplayConfig {
        title: toml_config
            .display
            .title
            .unwrap_or_else(|| DEFAULT_TITLE.to_owned()),
        time_zone: toml_config
            .display
            .time_zone
            .as_deref()
            .map(|tz| {
                Tz::from_str(tz).map_err(|e| color_eyre::eyre::eyre!("invalid time_zone: {}", e))
            })
            .transpose()?
            .unwrap_or(DEFAULT_TIME_ZONE),
        default_sort: toml_config
            .display
            .default_sort
            .as_deref()
            .map(|s| SortOrder::from_str(s).wrap_err("default_sort must be 'asc' or 'desc'"))
            .transpose()?
            .unwrap_or_default(),
        theme: toml_config
            .display
            .theme
            .as_deref()
            .map(|s| Theme::from_str(s).wrap_err("theme must be 'dark' or 'light'"))
            .transpose()?
            .unwrap_or_default(),
        link_previews: toml_config.display.link_previews.unwrap_or(false),
    };

    Ok(Config {
        server,
        backend,
        display,
    })
}

fn parse_backend_url(url: &str) -> Option<Url> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    match Url::parse(url) {
        Ok(url) => Some(url),
        Err(err) => {
            warn!(%err, "ignoring invalid backend URL '{}'", url);
            None
        }
    }
}
