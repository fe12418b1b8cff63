//! Configuration for voxcal.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (VOXCAL_CALENDAR_ID, VOXCAL_CREDENTIALS,
//!    VOXCAL_TIMEZONE, VOXCAL_CAPTURE_SECONDS, VOXCAL_WHISPER_MODEL)
//! 2. Config file (.voxcal/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .voxcal/config.yaml
//! - Relative paths in the config file resolve against the config
//!   file's parent directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const DEFAULT_CALENDAR_ID: &str = "primary";
const DEFAULT_TIMEZONE: &str = "Asia/Karachi";
const DEFAULT_CAPTURE_SECONDS: u64 = 10;
const DEFAULT_WHISPER_MODEL: &str = "base";
const DEFAULT_CREDENTIALS_FILE: &str = "service-account.json";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub calendar: CalendarSection,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub capture: CaptureSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarSection {
    /// Target calendar identifier
    pub id: Option<String>,
    /// Service-account key file (relative to the config file)
    pub credentials: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaptureSection {
    pub seconds: Option<u64>,
    pub whisper_model: Option<String>,
}

/// Resolved configuration with absolute paths and a parsed timezone
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub calendar_id: String,
    pub credentials_path: PathBuf,
    pub timezone: Tz,
    pub capture_seconds: u64,
    pub whisper_model: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".voxcal").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Parse an IANA timezone name; invalid names are startup-fatal
fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("Invalid timezone {:?}: {}", name, e))
}

/// Default credentials location (~/.voxcal/service-account.json)
fn default_credentials_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home.join(".voxcal").join(DEFAULT_CREDENTIALS_FILE))
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();
    let file = match &config_file {
        Some(path) => Some(load_config_file(path)?),
        None => None,
    };
    let file_dir = config_file
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf);

    let calendar_id = std::env::var("VOXCAL_CALENDAR_ID")
        .ok()
        .or_else(|| file.as_ref().and_then(|f| f.calendar.id.clone()))
        .unwrap_or_else(|| DEFAULT_CALENDAR_ID.to_string());

    let credentials_path = match std::env::var("VOXCAL_CREDENTIALS") {
        Ok(path) => PathBuf::from(path),
        Err(_) => match (
            file.as_ref().and_then(|f| f.calendar.credentials.as_deref()),
            &file_dir,
        ) {
            (Some(path), Some(dir)) => resolve_path(dir, path),
            _ => default_credentials_path()?,
        },
    };

    let timezone_name = std::env::var("VOXCAL_TIMEZONE")
        .ok()
        .or_else(|| file.as_ref().and_then(|f| f.timezone.clone()))
        .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
    let timezone = parse_timezone(&timezone_name)?;

    let capture_seconds = match std::env::var("VOXCAL_CAPTURE_SECONDS") {
        Ok(value) => value
            .parse::<u64>()
            .with_context(|| format!("Invalid VOXCAL_CAPTURE_SECONDS: {:?}", value))?,
        Err(_) => file
            .as_ref()
            .and_then(|f| f.capture.seconds)
            .unwrap_or(DEFAULT_CAPTURE_SECONDS),
    };

    let whisper_model = std::env::var("VOXCAL_WHISPER_MODEL")
        .ok()
        .or_else(|| file.as_ref().and_then(|f| f.capture.whisper_model.clone()))
        .unwrap_or_else(|| DEFAULT_WHISPER_MODEL.to_string());

    Ok(ResolvedConfig {
        calendar_id,
        credentials_path,
        timezone,
        capture_seconds,
        whisper_model,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
