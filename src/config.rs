//! Chart Configuration Module
//! Layout, palette and timing settings, loadable from a JSON file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),
}

/// An sRGB color written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (case-insensitive, leading `#` required).
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(text.to_string());
        let hex = text.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channel-wise linear blend, `t` in `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// Fill colors keyed by bar classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub base: HexColor,
    pub positive: HexColor,
    pub negative: HexColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base: HexColor::new(0xE1, 0xE1, 0xE1),
            positive: HexColor::new(0xb2, 0xe6, 0x72),
            negative: HexColor::new(0xfc, 0x5c, 0x9c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 50.0,
            bottom: 50.0,
            left: 50.0,
        }
    }
}

/// Everything the renderer and its adapters need to lay out a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Outer surface width in pixels, margins included.
    pub width: f64,
    /// Outer surface height in pixels, margins included.
    pub height: f64,
    pub margin: Margin,
    /// Inner and outer padding of the band scale, as a fraction of a step.
    pub band_padding: f64,
    pub transition_ms: u64,
    /// Gap between a bar's top edge and its value label.
    pub label_offset: f64,
    pub min_bar_height: f64,
    pub font_size: f64,
    pub palette: Palette,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 450.0,
            margin: Margin::default(),
            band_padding: 0.3,
            transition_ms: 1500,
            label_offset: 10.0,
            min_bar_height: 1.0,
            font_size: 12.0,
            palette: Palette::default(),
        }
    }
}

impl ChartConfig {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Drawable width inside the margins.
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Drawable height inside the margins.
    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn transition_secs(&self) -> f64 {
        self.transition_ms as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_chart_surface() {
        let cfg = ChartConfig::default();
        assert_eq!(cfg.inner_width(), 700.0);
        assert_eq!(cfg.inner_height(), 350.0);
        assert_eq!(cfg.transition_ms, 1500);
        assert_eq!(cfg.palette.base.to_string(), "#e1e1e1");
        assert_eq!(cfg.palette.positive.to_string(), "#b2e672");
        assert_eq!(cfg.palette.negative.to_string(), "#fc5c9c");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ChartConfig::from_json(r##"{"width": 1000, "palette": {"base": "#000000"}}"##)
            .unwrap();
        assert_eq!(cfg.width, 1000.0);
        assert_eq!(cfg.height, 450.0);
        assert_eq!(cfg.palette.base, HexColor::new(0, 0, 0));
        assert_eq!(cfg.palette.negative, Palette::default().negative);
    }

    #[test]
    fn bad_color_is_rejected() {
        assert!(ChartConfig::from_json(r#"{"palette": {"base": "red"}}"#).is_err());
        assert!(HexColor::parse("#12345").is_err());
        assert!(HexColor::parse("123456").is_err());
        assert_eq!(HexColor::parse("#FC5C9C").unwrap(), HexColor::new(252, 92, 156));
    }

    #[test]
    fn color_lerp_endpoints() {
        let a = HexColor::new(0, 100, 200);
        let b = HexColor::new(200, 100, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), HexColor::new(100, 100, 100));
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        std::fs::write(&path, r#"{"transition_ms": 250}"#).unwrap();
        let cfg = ChartConfig::from_file(&path).unwrap();
        assert_eq!(cfg.transition_ms, 250);
        assert!((cfg.transition_secs() - 0.25).abs() < 1e-12);
    }
}
