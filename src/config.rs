//! # Configuration
//!
//! Process-wide settings for the crosshair controller and the debug listener.
//! Everything is loaded once at startup from a TOML file and never changes
//! while the process runs.
//!
//! Lookup order:
//! 1. an explicit path (`--config`)
//! 2. `<config dir>/crosshair-controller/config.toml`
//! 3. built-in defaults
//!
//! Every section carries `#[serde(default)]`, so a file only needs the values
//! it wants to change.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "crosshair-controller";
const CONFIG_FILE: &str = "config.toml";

/// Errors raised while loading, validating or writing configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Failed to write config file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No config directory available on this platform")]
    NoConfigDir,

    #[error("Invalid configuration: {0}")]
    InvalidValue(String),
}

/// Which destination the emitter sends to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetMode {
    /// The lighting console at `production_ip`
    Production,
    /// This machine's own address, for use with `udp-listener`
    #[default]
    Local,
}

/// Drawable area, side panel and loop timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
    /// Width of the text panel to the right of the drawable area
    pub panel_width: u32,
    pub grid_spacing: u32,
    pub circle_spacing: u32,
    /// Delay between two frame loop ticks
    pub frame_interval_ms: u64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            panel_width: 200,
            grid_spacing: 50,
            circle_spacing: 75,
            frame_interval_ms: 30,
        }
    }
}

/// Tracker movement tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Half-length of a crosshair arm, also the clamp margin
    pub crosshair_size: i32,
    pub speed: i32,
    /// Speed while shift or a trigger is held
    pub boost_speed: i32,
    /// Stick magnitudes at or below this value are ignored
    pub dead_zone: f32,
    /// Trigger values above this switch the tracker to `boost_speed`
    pub trigger_threshold: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            crosshair_size: 10,
            speed: 5,
            boost_speed: 10,
            dead_zone: 0.1,
            trigger_threshold: 0.1,
        }
    }
}

/// Output coordinate ranges sent to the console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Horizontal output spans `[-x_range / 2, x_range / 2]`
    pub x_range: f64,
    /// Vertical output spans `[-y_range / 2, y_range / 2]`
    pub y_range: f64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            x_range: 20.0,
            y_range: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub mode: TargetMode,
    /// Address of the lighting console
    pub production_ip: IpAddr,
    /// Destination port for the emitter and bind port for the listener
    pub port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            mode: TargetMode::Local,
            production_ip: IpAddr::V4(Ipv4Addr::new(10, 99, 59, 173)),
            port: 6549,
        }
    }
}

/// Per-tracker wire identity and appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Numeric channel the console uses to tell trackers apart
    pub channel: u32,
    /// Name label appended to every datagram
    pub label: String,
    /// Prefix shown in the side panel
    pub display_name: String,
    pub color: (u8, u8, u8),
}

/// Background colors as RGB tuples, same layout as egui's `Color32::from_rgb`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub background: (u8, u8, u8),
    pub grid: (u8, u8, u8),
    pub circle: (u8, u8, u8),
    pub panel: (u8, u8, u8),
    pub text: (u8, u8, u8),
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: (0, 0, 0),
            grid: (80, 80, 80),
            circle: (100, 100, 100),
            panel: (50, 50, 50),
            text: (255, 255, 255),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Maximum tracing level (error, warn, info, debug, trace)
    pub log_level: String,
    pub screen: ScreenConfig,
    pub motion: MotionConfig,
    pub output: OutputConfig,
    pub network: NetworkConfig,
    pub colors: ColorConfig,
    /// Tracker 1 (mouse, keyboard, left stick) then Tracker 2 (right stick)
    pub trackers: [TrackerConfig; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            screen: ScreenConfig::default(),
            motion: MotionConfig::default(),
            output: OutputConfig::default(),
            network: NetworkConfig::default(),
            colors: ColorConfig::default(),
            trackers: [
                TrackerConfig {
                    channel: 4,
                    label: "trackerName1".to_string(),
                    display_name: "Blue".to_string(),
                    color: (0, 0, 255),
                },
                TrackerConfig {
                    channel: 5,
                    label: "trackerName2".to_string(),
                    display_name: "Red".to_string(),
                    color: (255, 0, 0),
                },
            ],
        }
    }
}

impl AppConfig {
    /// Loads configuration following the lookup order of this module.
    ///
    /// An explicit path that does not exist is an error. A missing file at
    /// the default location silently yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/crosshair-controller/config.toml`, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Writes the defaults to `path`, or to [`AppConfig::default_path`] when
    /// no path is given. Parent directories are created as needed.
    pub fn write_default(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path().ok_or(ConfigError::NoConfigDir)?,
        };

        let text = toml::to_string_pretty(&Self::default())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::WriteError {
                path: path.clone(),
                source,
            })?;
        }
        fs::write(&path, text).map_err(|source| ConfigError::WriteError {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let screen = &self.screen;
        if screen.width == 0 || screen.height == 0 {
            return Err(ConfigError::InvalidValue(format!(
                "screen must have a non-zero size, got {}x{}",
                screen.width, screen.height
            )));
        }
        if screen.grid_spacing == 0 || screen.circle_spacing == 0 {
            return Err(ConfigError::InvalidValue(
                "grid_spacing and circle_spacing must be non-zero".to_string(),
            ));
        }

        let motion = &self.motion;
        if motion.crosshair_size <= 0 {
            return Err(ConfigError::InvalidValue(format!(
                "crosshair_size must be positive, got {}",
                motion.crosshair_size
            )));
        }
        if !(0.0..1.0).contains(&motion.dead_zone) {
            return Err(ConfigError::InvalidValue(format!(
                "dead_zone must be within [0, 1), got {}",
                motion.dead_zone
            )));
        }

        if self.output.x_range <= 0.0 || self.output.y_range <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "output ranges must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_console_setup() {
        let config = AppConfig::default();
        assert_eq!(config.screen.width, 800);
        assert_eq!(config.screen.height, 600);
        assert_eq!(config.network.port, 6549);
        assert_eq!(config.network.mode, TargetMode::Local);
        assert_eq!(config.trackers[0].channel, 4);
        assert_eq!(config.trackers[1].label, "trackerName2");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [network]
            mode = "production"
            port = 7000

            [motion]
            speed = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.network.mode, TargetMode::Production);
        assert_eq!(config.network.port, 7000);
        assert_eq!(config.motion.speed, 3);
        assert_eq!(config.motion.boost_speed, 10);
        assert_eq!(config.screen, ScreenConfig::default());
    }

    #[test]
    fn test_tracker_list_must_have_two_entries() {
        let result = AppConfig::from_toml(
            r#"
            [[trackers]]
            channel = 1
            label = "only"
            display_name = "One"
            color = [1, 2, 3]
            "#,
        );
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_rejects_zero_size_screen() {
        let result = AppConfig::from_toml("[screen]\nwidth = 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_rejects_dead_zone_out_of_range() {
        let result = AppConfig::from_toml("[motion]\ndead_zone = 1.5\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"debug\"\n[screen]\nframe_interval_ms = 16").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.screen.frame_interval_ms, 16);
    }

    #[test]
    fn test_written_defaults_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("config.toml");

        let written = AppConfig::write_default(Some(&target)).unwrap();
        assert_eq!(written, target);
        assert_eq!(AppConfig::from_file(&target).unwrap(), AppConfig::default());
    }
}
