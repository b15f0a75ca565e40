//! Ellipsis component defaults loaded from TOML.
//!
//! ```toml
//! rows = 2
//! dots = "..."
//! expand_text = " more"
//! collapse_text = " less"
//! position = "end"
//!
//! [style]
//! width = 60
//! padding_left = 1
//! padding_right = 1
//! padding_top = "4px"
//! line_height = 16
//! wrap = "word"
//! ```
//!
//! Every key is optional. Vertical lengths accept a number of pixels or a
//! CSS-like string (`"16px"`, `"1.5"`).

use std::path::Path;

use serde::Deserialize;

use crate::error::EllipsisError;
use crate::layout::{px_to_num, ContainerStyle, DEFAULT_LINE_HEIGHT};
use crate::types::{Position, WrapMode};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EllipsisConfig {
    pub rows: u16,
    pub dots: String,
    pub expand_text: String,
    pub collapse_text: String,
    pub position: Position,
    pub style: Option<StyleConfig>,
}

impl Default for EllipsisConfig {
    fn default() -> Self {
        Self {
            rows: 1,
            dots: "...".to_string(),
            expand_text: String::new(),
            collapse_text: String::new(),
            position: Position::End,
            style: None,
        }
    }
}

/// Pixel length written as a number or a CSS-like string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PxLength {
    Number(f32),
    Css(String),
}

impl PxLength {
    pub fn to_px(&self) -> f32 {
        match self {
            Self::Number(n) => *n,
            Self::Css(s) => px_to_num(s),
        }
    }
}

impl Default for PxLength {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Columns. Absent or 0 follows the terminal width.
    pub width: Option<u16>,
    pub padding_left: u16,
    pub padding_right: u16,
    pub padding_top: PxLength,
    pub padding_bottom: PxLength,
    /// Absent means the terminal cell height default.
    pub line_height: Option<PxLength>,
    pub wrap: WrapMode,
}

impl StyleConfig {
    pub fn to_style(&self) -> ContainerStyle {
        ContainerStyle {
            width: self.width.unwrap_or(0),
            padding_left: self.padding_left,
            padding_right: self.padding_right,
            padding_top: self.padding_top.to_px(),
            padding_bottom: self.padding_bottom.to_px(),
            line_height: self
                .line_height
                .as_ref()
                .map_or(DEFAULT_LINE_HEIGHT, PxLength::to_px),
            wrap: self.wrap,
        }
    }
}

impl EllipsisConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, EllipsisError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file. Missing or invalid files log a warning and yield
    /// `None`.
    pub fn load(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read ellipsis config at {:?}: {}", path, err);
                return None;
            }
        };

        match Self::from_toml_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!("Failed to parse ellipsis config at {:?}: {}", path, err);
                None
            }
        }
    }

    /// The configured container style, or the default style.
    pub fn container_style(&self) -> ContainerStyle {
        self.style
            .as_ref()
            .map_or_else(ContainerStyle::default, StyleConfig::to_style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EllipsisConfig::from_toml_str("").unwrap();
        assert_eq!(config, EllipsisConfig::default());
        assert_eq!(config.rows, 1);
        assert_eq!(config.dots, "...");
        assert_eq!(config.position, Position::End);
        assert_eq!(config.container_style(), ContainerStyle::default());
    }

    #[test]
    fn test_full_config() {
        let config = EllipsisConfig::from_toml_str(
            r#"
            rows = 2
            dots = "~"
            expand_text = " more"
            collapse_text = " less"
            position = "Start"

            [style]
            width = 60
            padding_left = 1
            padding_right = 2
            padding_top = "4px"
            padding_bottom = 2.5
            line_height = "20px"
            wrap = "char"
            "#,
        )
        .unwrap();

        assert_eq!(config.rows, 2);
        assert_eq!(config.dots, "~");
        assert_eq!(config.collapse_text, " less");
        assert_eq!(config.position, Position::Start);

        let style = config.container_style();
        assert_eq!(style.width, 60);
        assert_eq!(style.content_width(), 57);
        assert_eq!(style.padding_top, 4.0);
        assert_eq!(style.padding_bottom, 2.5);
        assert_eq!(style.line_height, 20.0);
        assert_eq!(style.wrap, WrapMode::Char);
    }

    #[test]
    fn test_integer_line_height() {
        let config = EllipsisConfig::from_toml_str("[style]\nline_height = 18").unwrap();
        assert_eq!(config.container_style().line_height, 18.0);
    }

    #[test]
    fn test_unknown_position_rejected() {
        let err = EllipsisConfig::from_toml_str(r#"position = "center""#).unwrap_err();
        assert!(matches!(err, EllipsisError::Config(_)));
        assert!(err.to_string().contains("center"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rows = 4\nposition = \"middle\"").unwrap();

        let config = EllipsisConfig::load(file.path()).unwrap();
        assert_eq!(config.rows, 4);
        assert_eq!(config.position, Position::Middle);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(EllipsisConfig::load(dir.path().join("ellipsis.toml")).is_none());
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rows = \"many\"").unwrap();
        assert!(EllipsisConfig::load(file.path()).is_none());
    }
}
