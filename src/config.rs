use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::booking::{BookingStatus, StatusFilter};
use crate::layout::{RowColor, TooltipGeometry};

pub const DEFAULT_PALETTE: [&str; 8] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
];

pub const DEFAULT_UNASSIGNED_COLOR: &str = "#9ca3af";

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Serialization(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "io error: {err}"),
            ConfigError::Serialization(err) => write!(f, "config parse error: {err}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Presentation settings that influence the computed layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub palette: Vec<String>,
    pub unassigned_color: String,
    pub unassigned_label: String,
    pub tooltip: TooltipGeometry,
    pub default_statuses: Vec<BookingStatus>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            unassigned_color: DEFAULT_UNASSIGNED_COLOR.to_string(),
            unassigned_label: "Unassigned".to_string(),
            tooltip: TooltipGeometry::default(),
            default_statuses: StatusFilter::default().iter().collect(),
        }
    }
}

impl BoardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: BoardConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must contain at least one color".into()));
        }
        if let Some(blank) = self.palette.iter().position(|c| c.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("palette entry #{blank} is empty")));
        }
        if self.palette.iter().any(|c| c == &self.unassigned_color) {
            return Err(ConfigError::Invalid(format!(
                "unassigned color {} must not be part of the palette",
                self.unassigned_color
            )));
        }
        let geometry = [
            ("tooltip.width", self.tooltip.width),
            ("tooltip.height", self.tooltip.height),
            ("tooltip.min_margin", self.tooltip.min_margin),
            ("tooltip.gap", self.tooltip.gap),
        ];
        for (name, value) in geometry {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number (got {value})"
                )));
            }
        }
        Ok(())
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.default_statuses.iter().copied().collect()
    }

    pub fn palette_size(&self) -> usize {
        self.palette.len()
    }

    pub fn color_hex(&self, color: RowColor) -> &str {
        match color {
            RowColor::Palette(index) => self
                .palette
                .get(index % self.palette.len().max(1))
                .map(String::as_str)
                .unwrap_or(&self.unassigned_color),
            RowColor::Unassigned => &self.unassigned_color,
        }
    }
}
