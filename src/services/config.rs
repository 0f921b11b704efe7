//! User configuration
//!
//! Stored as JSON in `~/.spendtrack/config.json`. Pins the time zone used
//! for day/week bucketing and optionally the default data path.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::FixedOffset;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::types::{Result, SpendtrackError};

/// Time zone used for day and week boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ZoneSetting {
    #[default]
    Utc,
    /// Process-local zone (`chrono::Local`)
    Local,
    Fixed(FixedOffset),
}

impl FromStr for ZoneSetting {
    type Err = SpendtrackError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "utc" | "z" => return Ok(Self::Utc),
            "local" => return Ok(Self::Local),
            _ => {}
        }
        parse_offset(trimmed).map(Self::Fixed).ok_or_else(|| {
            SpendtrackError::Config(format!(
                "invalid timezone '{}': expected utc, local or +HH:MM",
                s
            ))
        })
    }
}

impl TryFrom<String> for ZoneSetting {
    type Error = SpendtrackError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ZoneSetting> for String {
    fn from(value: ZoneSetting) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ZoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => write!(f, "utc"),
            Self::Local => write!(f, "local"),
            Self::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

/// Parse "+HH:MM", "-HH:MM" or "+HHMM"
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timezone: ZoneSetting,
    /// Expense file or directory used when `--path` is not given
    #[serde(default)]
    pub data_path: Option<PathBuf>,
}

impl Config {
    /// Default location: `~/.spendtrack/config.json`
    pub fn default_path() -> Result<PathBuf> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| SpendtrackError::Config("Cannot determine home directory".into()))?;
        Ok(base_dirs.home_dir().join(".spendtrack").join("config.json"))
    }

    /// Load from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            SpendtrackError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SpendtrackError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ========== ZoneSetting ==========

    #[test]
    fn test_zone_named() {
        assert_eq!("utc".parse::<ZoneSetting>().unwrap(), ZoneSetting::Utc);
        assert_eq!("UTC".parse::<ZoneSetting>().unwrap(), ZoneSetting::Utc);
        assert_eq!("local".parse::<ZoneSetting>().unwrap(), ZoneSetting::Local);
    }

    #[test]
    fn test_zone_fixed_offsets() {
        let east = "+09:00".parse::<ZoneSetting>().unwrap();
        assert_eq!(east, ZoneSetting::Fixed(FixedOffset::east_opt(9 * 3600).unwrap()));

        let west = "-0530".parse::<ZoneSetting>().unwrap();
        assert_eq!(
            west,
            ZoneSetting::Fixed(FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap())
        );
    }

    #[test]
    fn test_zone_invalid() {
        for bad in ["", "Europe/Madrid", "+9", "+25:00", "+09:75", "09:00"] {
            let err = bad.parse::<ZoneSetting>().unwrap_err();
            assert!(matches!(err, SpendtrackError::Config(_)), "{}", bad);
        }
    }

    #[test]
    fn test_zone_display_round_trip() {
        let zone = "+09:00".parse::<ZoneSetting>().unwrap();
        assert_eq!(zone.to_string(), "+09:00");
        assert_eq!(zone.to_string().parse::<ZoneSetting>().unwrap(), zone);
    }

    // ========== Config file ==========

    #[test]
    fn test_load_missing_file_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_from(&tmp.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.timezone, ZoneSetting::Utc);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{"timezone": "-03:00", "data_path": "/data/expenses"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.timezone,
            ZoneSetting::Fixed(FixedOffset::west_opt(3 * 3600).unwrap())
        );
        assert_eq!(config.data_path, Some(PathBuf::from("/data/expenses")));
    }

    #[test]
    fn test_load_rejects_bad_timezone() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{"timezone": "mars/olympus"}"#).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, SpendtrackError::Config(_)));
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.json");
        let config = Config {
            timezone: ZoneSetting::Local,
            data_path: None,
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
