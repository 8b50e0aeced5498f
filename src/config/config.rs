use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::display::matrix::{Rgb, Rotation};
use crate::pomodoro::pomodoro::Phase;
use crate::pomodoro::timer;

pub const DEFAULT_WORK_MINUTES: f64 = 25.0;
pub const DEFAULT_SHORT_BREAK_MINUTES: f64 = 5.0;
pub const DEFAULT_LONG_BREAK_MINUTES: f64 = 30.0;
pub const DEFAULT_SCROLL_SPEED_SECS: f64 = 0.1;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid duration for {name}: {value} (must be a positive number of minutes)")]
    InvalidDuration { name: &'static str, value: f64 },

    #[error("Invalid scroll speed: {0} (must be zero or more seconds)")]
    InvalidScrollSpeed(f64),

    #[error("Invalid rotation: {0} (must be 0, 90, 180 or 270)")]
    InvalidRotation(u16),

    #[error("Invalid color: {0} (expected \"#rrggbb\", \"r,g,b\" or [r, g, b])")]
    InvalidColor(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Colours for every element of the clock face.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    #[serde(deserialize_with = "deserialize_color")]
    pub check: Rgb,
    #[serde(deserialize_with = "deserialize_color")]
    pub work_tick: Rgb,
    #[serde(deserialize_with = "deserialize_color")]
    pub break_tick: Rgb,
    #[serde(deserialize_with = "deserialize_color")]
    pub work_face: Rgb,
    #[serde(deserialize_with = "deserialize_color")]
    pub break_face: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            check: Rgb::WHITE,
            work_tick: Rgb::GREEN,
            break_tick: Rgb::RED,
            work_face: Rgb::TOMATO,
            break_face: Rgb::BLUE,
        }
    }
}

impl Palette {
    pub fn tick(&self, phase: Phase) -> Rgb {
        if phase.is_break() {
            self.break_tick
        } else {
            self.work_tick
        }
    }

    pub fn face(&self, phase: Phase) -> Rgb {
        if phase.is_break() {
            self.break_face
        } else {
            self.work_face
        }
    }
}

/// Everything fixed at startup. Every field has a default, so an empty JSON
/// object is a complete config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub work_minutes: f64,
    pub short_break_minutes: f64,
    pub long_break_minutes: f64,
    pub colors: Palette,
    pub low_light: bool,
    #[serde(deserialize_with = "deserialize_rotation")]
    pub rotation: Rotation,
    pub scroll_speed_secs: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_minutes: DEFAULT_WORK_MINUTES,
            short_break_minutes: DEFAULT_SHORT_BREAK_MINUTES,
            long_break_minutes: DEFAULT_LONG_BREAK_MINUTES,
            colors: Palette::default(),
            low_light: false,
            rotation: Rotation::default(),
            scroll_speed_secs: DEFAULT_SCROLL_SPEED_SECS,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("work_minutes", self.work_minutes),
            ("short_break_minutes", self.short_break_minutes),
            ("long_break_minutes", self.long_break_minutes),
        ];
        for (name, value) in durations {
            if value <= 0.0 || Duration::try_from_secs_f64(value * 60.0).is_err() {
                return Err(ConfigError::InvalidDuration { name, value });
            }
        }

        // try_from_secs_f64 also rejects NaN, negatives and anything too long
        if Duration::try_from_secs_f64(self.scroll_speed_secs).is_err() {
            return Err(ConfigError::InvalidScrollSpeed(self.scroll_speed_secs));
        }

        Ok(())
    }

    pub fn duration(&self, phase: Phase) -> Duration {
        timer::minutes(self.minutes(phase))
    }

    pub fn minutes(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Work => self.work_minutes,
            Phase::ShortBreak => self.short_break_minutes,
            Phase::LongBreak => self.long_break_minutes,
        }
    }

    pub fn scroll_speed(&self) -> Duration {
        Duration::try_from_secs_f64(self.scroll_speed_secs).unwrap_or(Duration::MAX)
    }
}

/// Parse `"#rrggbb"` or `"r,g,b"`.
pub fn parse_color(text: &str) -> Result<Rgb, ConfigError> {
    let patterns = [
        (
            r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$",
            16,
        ),
        (r"^\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*$", 10),
    ];

    for (pattern_str, radix) in patterns {
        if let Ok(pattern) = Regex::new(pattern_str) {
            if let Some(captures) = pattern.captures(text.trim()) {
                let mut channels = [0u8; 3];
                for (i, channel) in channels.iter_mut().enumerate() {
                    let digits = captures.get(i + 1).map_or("", |m| m.as_str());
                    *channel = u8::from_str_radix(digits, radix)
                        .map_err(|_| ConfigError::InvalidColor(text.to_string()))?;
                }
                let [r, g, b] = channels;
                return Ok(Rgb::new(r, g, b));
            }
        }
    }

    Err(ConfigError::InvalidColor(text.to_string()))
}

pub fn parse_rotation(degrees: u16) -> Result<Rotation, ConfigError> {
    Rotation::from_degrees(degrees).ok_or(ConfigError::InvalidRotation(degrees))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Triple([u8; 3]),
    Text(String),
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Rgb, D::Error>
where
    D: Deserializer<'de>,
{
    match ColorSpec::deserialize(deserializer)? {
        ColorSpec::Triple([r, g, b]) => Ok(Rgb::new(r, g, b)),
        ColorSpec::Text(text) => parse_color(&text).map_err(serde::de::Error::custom),
    }
}

fn deserialize_rotation<'de, D>(deserializer: D) -> Result<Rotation, D::Error>
where
    D: Deserializer<'de>,
{
    let degrees = u16::deserialize(deserializer)?;
    parse_rotation(degrees).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.work_minutes, 25.0);
        assert_eq!(config.short_break_minutes, 5.0);
        assert_eq!(config.long_break_minutes, 30.0);
        assert_eq!(config.colors.check, Rgb::WHITE);
        assert_eq!(config.colors.work_tick, Rgb::GREEN);
        assert_eq!(config.colors.break_tick, Rgb::RED);
        assert!(!config.low_light);
        assert_eq!(config.rotation, Rotation::Deg0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_json_overrides() {
        let json = r##"{
            "work_minutes": 50,
            "long_break_minutes": 15.5,
            "low_light": true,
            "rotation": 180,
            "colors": { "check": [1, 2, 3], "work_face": "#00ff7f", "break_tick": "10, 20, 30" }
        }"##;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.work_minutes, 50.0);
        assert_eq!(config.short_break_minutes, 5.0);
        assert_eq!(config.long_break_minutes, 15.5);
        assert!(config.low_light);
        assert_eq!(config.rotation, Rotation::Deg180);
        assert_eq!(config.colors.check, Rgb::new(1, 2, 3));
        assert_eq!(config.colors.work_face, Rgb::new(0, 255, 127));
        assert_eq!(config.colors.break_tick, Rgb::new(10, 20, 30));
        assert_eq!(config.colors.work_tick, Rgb::GREEN);
    }

    #[test]
    fn test_json_rejects_bad_values() {
        assert!(serde_json::from_str::<Config>(r#"{"rotation": 45}"#).is_err());
        assert!(serde_json::from_str::<Config>(r#"{"colors": {"check": "purple"}}"#).is_err());
        assert!(serde_json::from_str::<Config>(r#"{"colors": {"check": [256, 0, 0]}}"#).is_err());
        assert!(serde_json::from_str::<Config>(r#"{"work": 25}"#).is_err());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#FF6347").unwrap(), Rgb::TOMATO);
        assert_eq!(parse_color(" 0,255,0 ").unwrap(), Rgb::GREEN);
        assert!(matches!(parse_color("300,0,0"), Err(ConfigError::InvalidColor(_))));
        assert!(matches!(parse_color("#12345"), Err(ConfigError::InvalidColor(_))));
        assert!(matches!(parse_color("red"), Err(ConfigError::InvalidColor(_))));
    }

    #[test]
    fn test_validate_durations() {
        let config = Config {
            short_break_minutes: 0.0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDuration {
                name: "short_break_minutes",
                ..
            })
        ));

        let config = Config {
            work_minutes: f64::NAN,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            scroll_speed_secs: -1.0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidScrollSpeed(_))));
    }

    #[test]
    fn test_validate_rejects_durations_too_long_to_sleep() {
        let config = Config {
            work_minutes: 1e300,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDuration {
                name: "work_minutes",
                ..
            })
        ));

        let config = Config {
            long_break_minutes: f64::INFINITY,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            scroll_speed_secs: 1e300,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidScrollSpeed(_))));

        // A week-long phase is silly but still a valid sleep
        let config = Config {
            work_minutes: 7.0 * 24.0 * 60.0,
            scroll_speed_secs: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.duration(Phase::Work), Duration::from_secs(7 * 24 * 3600));
        assert_eq!(config.scroll_speed(), Duration::ZERO);
    }

    #[test]
    fn test_unvalidated_huge_values_do_not_panic() {
        let config = Config {
            work_minutes: 1e300,
            scroll_speed_secs: 1e300,
            ..Config::default()
        };
        assert_eq!(config.duration(Phase::Work), Duration::MAX);
        assert_eq!(config.scroll_speed(), Duration::MAX);
    }

    #[test]
    fn test_phase_lookups() {
        let config = Config::default();
        assert_eq!(config.duration(Phase::Work), Duration::from_secs(25 * 60));
        assert_eq!(config.duration(Phase::LongBreak), Duration::from_secs(30 * 60));
        assert_eq!(config.minutes(Phase::ShortBreak), 5.0);
        assert_eq!(config.colors.tick(Phase::ShortBreak), Rgb::RED);
        assert_eq!(config.colors.face(Phase::Work), Rgb::TOMATO);
        assert_eq!(config.colors.face(Phase::LongBreak), Rgb::BLUE);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"short_break_minutes": 3}}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.short_break_minutes, 3.0);

        let missing = Config::load(Path::new("/nonexistent/pomodoro.json"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
