use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use ratatui::style::Color;
use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;

// ─── Embedded Default ────────────────────────────────────────────────────
/// Baked into the binary at compile time. This is always available as the
/// base layer, whether or not a config file exists.
const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

// ─── CLI Arguments (override layer) ─────────────────────────────────────
/// square-bi-end: tap to animate a chain of square bi-end shapes
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "square-bi-end", version, about, long_about = None)]
pub struct CliArgs {
    /// Path to a custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Tick period in milliseconds (overrides config file)
    #[arg(short, long)]
    pub tick_ms: Option<u64>,

    /// Progress added per tick (overrides config file)
    #[arg(short, long)]
    pub gap: Option<f32>,

    /// Log level filter (overrides config file)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log file path (logging disabled if not specified)
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// Disable mouse support
    #[arg(long)]
    pub no_mouse: bool,

    /// Print the default config to stdout and exit
    #[arg(long)]
    pub print_default_config: bool,
}

// ─── TOML Structs ───────────────────────────────────────────────────────

/// Root configuration, parsed from TOML, then overridden by CLI flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub shape: ShapeConfig,
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Not part of the file; set from `--no-mouse`.
    #[serde(skip_deserializing, default = "default_true")]
    pub mouse_support: bool,
    /// Not part of the file; set from `--log`.
    #[serde(skip_deserializing)]
    pub log_file: Option<PathBuf>,
    /// File the values were read from; `None` for the built-in defaults.
    #[serde(skip_deserializing)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Milliseconds between ticks
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Progress added per tick
    #[serde(default = "default_gap")]
    pub gap: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    #[serde(default = "default_size_factor")]
    pub size_factor: f64,

    #[serde(default = "default_stroke_factor")]
    pub stroke_factor: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(
        deserialize_with = "deserialize_color",
        default = "default_background"
    )]
    pub background: Color,

    #[serde(deserialize_with = "deserialize_color", default = "default_color_white")]
    pub status_fg: Color,

    #[serde(
        deserialize_with = "deserialize_color",
        default = "default_color_darkgray"
    )]
    pub status_bg: Color,

    /// One chain node per entry
    #[serde(deserialize_with = "deserialize_palette", default = "default_palette")]
    pub palette: Vec<Color>,
}

// ─── Defaults ───────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        // Parse the embedded TOML; it is checked in by us and cannot fail
        toml::from_str(DEFAULT_CONFIG_TOML)
            .expect("BUG: embedded default_config.toml is invalid TOML")
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            gap: default_gap(),
        }
    }
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            size_factor: default_size_factor(),
            stroke_factor: default_stroke_factor(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            status_fg: default_color_white(),
            status_bg: default_color_darkgray(),
            palette: default_palette(),
        }
    }
}

// ─── Color Deserializers ────────────────────────────────────────────────

fn deserialize_color<'de, D>(deserializer: D) -> std::result::Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: \"{s}\"")))
}

fn deserialize_palette<'de, D>(deserializer: D) -> std::result::Result<Vec<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    raw.iter()
        .map(|s| {
            parse_color(s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid color: \"{s}\"")))
        })
        .collect()
}

/// Parse a color string into a ratatui Color.
/// Supports: named colors, "reset", "#RRGGBB" hex.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "reset" | "default" | "transparent" => Some(Color::Reset),
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" | "dark_gray" | "dark_grey" => Some(Color::DarkGray),
        hex if hex.starts_with('#') && hex.len() == 7 && hex.is_ascii() => {
            let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
            let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
            let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

// ─── Serde Default Helpers ──────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".into()
}
fn default_tick_ms() -> u64 {
    20
}
fn default_gap() -> f32 {
    0.02 / crate::ui::shape::PARTS as f32
}
fn default_size_factor() -> f64 {
    5.9
}
fn default_stroke_factor() -> f64 {
    90.0
}
fn default_background() -> Color {
    Color::Rgb(0xBD, 0xBD, 0xBD)
}
fn default_color_white() -> Color {
    Color::White
}
fn default_color_darkgray() -> Color {
    Color::DarkGray
}
fn default_palette() -> Vec<Color> {
    vec![
        Color::Rgb(0xF4, 0x43, 0x36),
        Color::Rgb(0xFF, 0x98, 0x00),
        Color::Rgb(0x31, 0x1B, 0x92),
        Color::Rgb(0x1B, 0x5E, 0x20),
        Color::Rgb(0x00, 0xC8, 0x53),
    ]
}

// ─── Accessors ──────────────────────────────────────────────────────────

impl Config {
    /// Standard config file path: ~/.config/square-bi-end/config.toml
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("square-bi-end")
            .join("config.toml")
    }

    /// Parse a config document; `path` is only used for error messages.
    pub fn from_toml_str(toml_str: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Tick period as Duration
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.animation.tick_ms)
    }

    /// Chain length: one node per palette color
    pub fn chain_len(&self) -> usize {
        self.theme.palette.len()
    }

    /// Apply CLI flags on top of the file values
    pub fn apply_overrides(&mut self, cli: &CliArgs) {
        if let Some(tick_ms) = cli.tick_ms {
            self.animation.tick_ms = tick_ms;
        }
        if let Some(gap) = cli.gap {
            self.animation.gap = gap;
        }
        if let Some(ref level) = cli.log_level {
            self.general.log_level = level.clone();
        }
        if cli.no_mouse {
            self.mouse_support = false;
        }
        if cli.log.is_some() {
            self.log_file = cli.log.clone();
        }
    }

    /// Reject values the animation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.theme.palette.is_empty() {
            return Err(ConfigError::invalid(
                "theme.palette",
                "needs at least one color",
            ));
        }
        if self.animation.tick_ms == 0 {
            return Err(ConfigError::invalid("animation.tick_ms", "must be >= 1"));
        }
        let gap = self.animation.gap;
        if !(gap > 0.0 && gap <= 1.0) {
            return Err(ConfigError::invalid(
                "animation.gap",
                format!("must be in (0, 1], got {gap}"),
            ));
        }
        if !(self.shape.size_factor > 0.0) {
            return Err(ConfigError::invalid("shape.size_factor", "must be positive"));
        }
        if !(self.shape.stroke_factor > 0.0) {
            return Err(ConfigError::invalid(
                "shape.stroke_factor",
                "must be positive",
            ));
        }
        Ok(())
    }
}

// ─── Bootloader ─────────────────────────────────────────────────────────

/// The single entry point for configuration. Called exactly once at startup.
///
/// 1. Resolve config file path (CLI override or default)
/// 2. Missing default file falls back to the embedded defaults
/// 3. Parse TOML from disk into Config
/// 4. Apply CLI overrides on top, then validate
pub fn load(cli: &CliArgs) -> Result<Config, ConfigError> {
    let explicit = cli.config.is_some();
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    // Logging is not up yet; main reports `source` once it is
    let mut config = if !explicit && !config_path.exists() {
        Config::default()
    } else {
        let toml_str =
            std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                path: config_path.clone(),
                source,
            })?;
        let mut config = Config::from_toml_str(&toml_str, &config_path)?;
        config.source = Some(config_path);
        config
    };

    config.apply_overrides(cli);
    config.validate()?;
    Ok(config)
}

/// Returns the embedded default config TOML string.
pub fn default_config_toml() -> &'static str {
    DEFAULT_CONFIG_TOML
}
