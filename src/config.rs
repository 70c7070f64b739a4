use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use tracing_subscriber::EnvFilter;

use crate::core::{OverlayFilter, Thresholds};

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const CMD = 1 << 0;
        const SHIFT = 1 << 1;
        const ALT = 1 << 2;
        const CTRL = 1 << 3;
    }
}

impl FromStr for Modifiers {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut modifiers = Modifiers::empty();
        for m in s.split('+').map(str::trim) {
            modifiers |= match m {
                "cmd" => Modifiers::CMD,
                "shift" => Modifiers::SHIFT,
                "alt" => Modifiers::ALT,
                "ctrl" => Modifiers::CTRL,
                _ => return Err(anyhow!("Unknown modifier: {m:?}")),
            };
        }
        Ok(modifiers)
    }
}

impl<'de> Deserialize<'de> for Modifiers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn default_hide_threshold() -> f64 {
    3.0
}

fn default_show_threshold() -> f64 {
    44.0
}

fn default_bouncer_threshold() -> f64 {
    5.0
}

fn default_bounce_target_offset() -> f64 {
    6.0
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_override_modifier() -> Modifiers {
    Modifiers::CMD
}

// kCGPopUpMenuWindowLevel
fn default_popup_level() -> i64 {
    101
}

fn default_overlay_exclusions() -> Vec<String> {
    [
        "^screencaptureui$",
        "^Screenshot$",
        "^CleanShot X$",
        "^Shottr$",
        "^Kap$",
        "^sketchybar$",
        "^Window Server$",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_bar_executable() -> PathBuf {
    PathBuf::from("/opt/homebrew/bin/sketchybar")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_hide_threshold")]
    pub hide_threshold: f64,
    #[serde(default = "default_show_threshold")]
    pub show_threshold: f64,
    #[serde(default = "default_bouncer_threshold")]
    pub bouncer_threshold: f64,
    #[serde(default = "default_bounce_target_offset")]
    pub bounce_target_offset: f64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_override_modifier")]
    pub override_modifier: Modifiers,
    #[serde(default = "default_popup_level")]
    pub popup_level: i64,
    #[serde(default = "default_overlay_exclusions")]
    pub overlay_exclusions: Vec<String>,
    #[serde(default = "default_bar_executable")]
    pub bar_executable: PathBuf,
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            hide_threshold: default_hide_threshold(),
            show_threshold: default_show_threshold(),
            bouncer_threshold: default_bouncer_threshold(),
            bounce_target_offset: default_bounce_target_offset(),
            poll_interval_ms: default_poll_interval_ms(),
            debounce_ms: default_debounce_ms(),
            override_modifier: default_override_modifier(),
            popup_level: default_popup_level(),
            overlay_exclusions: default_overlay_exclusions(),
            bar_executable: default_bar_executable(),
            log_level: None,
        }
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("edgebar").join("config.toml")
    }

    /// A missing file means defaults. Anything else that goes wrong is an error: running with
    /// thresholds the user didn't ask for would be worse than not running.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content)
                .with_context(|| format!("invalid config {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read config {}", path.display()));
            }
        };
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds()?;
        self.overlay_filter()?;
        if self.poll_interval_ms == 0 {
            bail!("poll_interval_ms must be greater than zero");
        }
        self.log_filter()?;
        Ok(())
    }

    pub fn thresholds(&self) -> Result<Thresholds> {
        Thresholds::new(
            self.hide_threshold,
            self.show_threshold,
            self.bouncer_threshold,
            self.bounce_target_offset,
        )
    }

    pub fn overlay_filter(&self) -> Result<OverlayFilter> {
        let exclusions = self
            .overlay_exclusions
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("invalid overlay exclusion {p:?}")))
            .collect::<Result<Vec<_>>>()?;
        Ok(OverlayFilter::new(self.popup_level, exclusions))
    }

    /// The `log_level` directive as a tracing filter, `None` when unset.
    pub fn log_filter(&self) -> Result<Option<EnvFilter>> {
        self.log_level
            .as_deref()
            .map(|level| {
                EnvFilter::try_new(level).with_context(|| format!("invalid log_level {level:?}"))
            })
            .transpose()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
