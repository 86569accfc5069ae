//! Configuration system
//!
//! [`LabelTextConfig`] carries everything the font catalog and the label
//! facade need to know that is not baked into the atlas images themselves:
//! where fonts live, which names to probe, layout thresholds and the
//! default tint. It loads from TOML or RON through the [`Config`] trait.

pub use serde::{Deserialize, Serialize};

use crate::foundation::Color;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Anti-bleed padding policy for atlas UV rectangles
///
/// Textures at most `wide_texture_threshold` pixels wide get `narrow_px`
/// of padding on each cell edge, wider ones get `wide_px`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddingConfig {
    /// Width (pixels) above which the wide padding applies
    pub wide_texture_threshold: u32,
    /// Padding in pixels for narrow textures
    pub narrow_px: f32,
    /// Padding in pixels for wide textures
    pub wide_px: f32,
}

impl PaddingConfig {
    /// Pixel padding for a texture of the given width
    pub fn pixels_for(&self, texture_width: u32) -> f32 {
        if texture_width > self.wide_texture_threshold {
            self.wide_px
        } else {
            self.narrow_px
        }
    }
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self {
            wide_texture_threshold: 600,
            narrow_px: 2.0,
            wide_px: 4.0,
        }
    }
}

/// Font catalog and label appearance settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelTextConfig {
    /// Content folder scanned for `{name}/Font` atlases
    pub fonts_folder: String,
    /// Font names probed directly at `{fonts_folder}/{name}/Font`
    pub known_fonts: Vec<String>,
    /// Font selected as default whenever it is registered
    pub preferred_default: String,
    /// Atlas images wider than this use the legacy single-row layout
    pub legacy_width_threshold: u32,
    /// Fonts whose atlases are packed as a 32x32 grid
    pub extended_grid_fonts: Vec<String>,
    /// Anti-bleed padding policy
    pub padding: PaddingConfig,
    /// Tint used when a label has no color of its own
    pub default_color: Color,
    /// Label opacity in percent (1-100)
    pub opacity_percent: u8,
}

impl LabelTextConfig {
    /// Whether `name` is configured as a 32x32 grid font
    pub fn uses_extended_grid(&self, name: &str) -> bool {
        self.extended_grid_fonts.iter().any(|f| f == name)
    }
}

impl Default for LabelTextConfig {
    fn default() -> Self {
        Self {
            fonts_folder: "Fonts".to_string(),
            known_fonts: [
                "JetBrainsMono",
                "JetBrainsMonoBold",
                "JetBrainsMonoLight",
                "Medieval",
                "Consolas",
                "ConsolasExtended",
                "Classic",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            preferred_default: "Classic".to_string(),
            legacy_width_threshold: 2000,
            extended_grid_fonts: Vec::new(),
            padding: PaddingConfig::default(),
            default_color: Color::WHITE,
            opacity_percent: 100,
        }
    }
}

impl Config for LabelTextConfig {}
