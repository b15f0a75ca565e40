//! Core types for spark-ellipsis.
//!
//! These types flow between the truncation engine, the measurement
//! container and the reactive component.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::EllipsisError;

// =============================================================================
// Ellipsis Position
// =============================================================================

/// Where the ellipsis marker is inserted when content is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
#[repr(u8)]
pub enum Position {
    /// Keep the tail, cut the head: `...fox jumps`.
    Start = 0,
    /// Keep head and tail, cut the middle: `The qu......jumps`.
    Middle = 1,
    /// Keep the head, cut the tail: `The quick ...`.
    #[default]
    End = 2,
}

impl Position {
    /// Number of markers the final text carries for this position.
    pub const fn marker_count(self) -> usize {
        match self {
            Self::Middle => 2,
            Self::Start | Self::End => 1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl From<u8> for Position {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Start,
            1 => Self::Middle,
            _ => Self::End,
        }
    }
}

impl FromStr for Position {
    type Err = EllipsisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "middle" => Ok(Self::Middle),
            "end" => Ok(Self::End),
            _ => Err(EllipsisError::InvalidPosition(s.to_string())),
        }
    }
}

impl TryFrom<String> for Position {
    type Error = EllipsisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Wrap Mode
// =============================================================================

/// Line-breaking rule used by the measurement container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum WrapMode {
    /// Break at Unicode word boundaries, fall back to graphemes for long words.
    #[default]
    Word = 0,
    /// Break at any grapheme boundary.
    Char = 1,
}

impl From<u8> for WrapMode {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Char,
            _ => Self::Word,
        }
    }
}

// =============================================================================
// Truncation Result
// =============================================================================

/// Outcome of one truncation pass.
///
/// `truncated == false` means the content fit (or could not be measured)
/// and `text` is the content unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TruncationResult {
    pub text: String,
    pub truncated: bool,
}

impl TruncationResult {
    /// Content returned as-is, no marker.
    pub fn unchanged(content: &str) -> Self {
        Self {
            text: content.to_string(),
            truncated: false,
        }
    }

    pub fn truncated(text: String) -> Self {
        Self {
            text,
            truncated: true,
        }
    }
}

// =============================================================================
// Pass Triggers (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Which inputs changed since the previous truncation pass.
    ///
    /// Combine with bitwise OR: `Trigger::CONTENT | Trigger::WIDTH`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Trigger: u8 {
        const NONE = 0;
        const MOUNT = 1 << 0;
        const CONTENT = 1 << 1;
        const ROWS = 1 << 2;
        const POSITION = 1 << 3;
        const WIDTH = 1 << 4;
        const LINE_HEIGHT = 1 << 5;
    }
}

// =============================================================================
// Tests
// =============================================================================
