//! Tool configuration loaded from `~/.config/game-producer/config.toml`.
//!
//! Every field is optional; a missing file means defaults.
//!
//! ```toml
//! ffmpeg = "/opt/ffmpeg/bin/ffmpeg"
//! format = "matroska"
//! caption_dir = "."
//! overwrite = true
//!
//! [video]
//! width = 640
//! height = 480
//!
//! [fonts]
//! caption = 16
//! label = 18
//! alliance = 24
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::compose::{ComposeSettings, FilterStyle};
use crate::error::{ProducerError, Result};

/// Size of each team's pane before stacking
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VideoConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Font sizes of the burned-in text
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FontConfig {
    pub caption: u32,
    pub label: u32,
    pub alliance: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            caption: 16,
            label: 18,
            alliance: 24,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProducerConfig {
    /// ffmpeg binary; looked up on `PATH` when unset
    pub ffmpeg: Option<String>,
    /// ffmpeg container format
    pub format: String,
    /// Where caption files are written; the working directory when unset
    pub caption_dir: Option<PathBuf>,
    pub overwrite: bool,
    pub video: VideoConfig,
    pub fonts: FontConfig,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            ffmpeg: None,
            format: "matroska".to_string(),
            caption_dir: None,
            overwrite: true,
            video: VideoConfig::default(),
            fonts: FontConfig::default(),
        }
    }
}

impl ProducerConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields defaults; an explicitly named file must
    /// exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };

        if !path.exists() {
            if required {
                return Err(ProducerError::Config(format!(
                    "{} does not exist",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| ProducerError::Config(format!("failed to read {}: {e}", path.display())))?;
        let config = Self::parse(&content)
            .map_err(|e| ProducerError::Config(format!("invalid TOML in {}: {e}", path.display())))?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration text.
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Composition settings derived from this configuration
    #[must_use]
    pub fn compose_settings(&self) -> ComposeSettings {
        let mut settings = ComposeSettings::default().with_style(FilterStyle {
            width: self.video.width,
            height: self.video.height,
            caption_font_size: self.fonts.caption,
            label_font_size: self.fonts.label,
            alliance_font_size: self.fonts.alliance,
        });
        if let Some(ref ffmpeg) = self.ffmpeg {
            settings = settings.with_ffmpeg_path(ffmpeg.clone());
        }
        if let Some(ref dir) = self.caption_dir {
            settings = settings.with_caption_dir(dir.clone());
        }
        settings.format.clone_from(&self.format);
        settings.overwrite = self.overwrite;
        settings
    }
}

/// Return the path to the default config file.
#[must_use]
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("game-producer")
        .join("config.toml")
}
