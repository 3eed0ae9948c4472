use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, File};
use mfm_types::{Font, TextStyle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceSettings {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    pub font_family: String,
    pub font_size: f32,
    pub color: String,
    pub line_height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    pub file: Option<PathBuf>,
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub instance: InstanceSettings,
    pub render: RenderSettings,
    pub http: HttpSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Load from the usual places: `~/.mfm/settings.toml`, then `./mfm.toml`
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_files(&Self::candidate_files())
    }

    /// Settings files in increasing priority; missing ones are skipped
    pub fn candidate_files() -> Vec<PathBuf> {
        let mut files = Vec::new();
        if let Some(home) = dirs::home_dir() {
            files.push(home.join(".mfm").join("settings.toml"));
        }
        files.push(PathBuf::from("mfm.toml"));
        files
    }

    pub fn from_files<P: AsRef<Path>>(files: &[P]) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("render.font_family", "Helvetica")?
            .set_default("render.font_size", 15.0)?
            .set_default("render.color", "#DDDDDD")?
            .set_default("render.line_height", 30.0)?
            .set_default("http.timeout_secs", 10)?
            .set_default("log.level", "info")?;

        for path in files {
            let path = path.as_ref();
            if path.exists() {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        // Environment wins over any file
        if let Ok(size) = std::env::var("MFM_FONT_SIZE") {
            builder = builder.set_override("render.font_size", size)?;
        }
        if let Ok(height) = std::env::var("MFM_LINE_HEIGHT") {
            builder = builder.set_override("render.line_height", height)?;
        }
        if let Ok(timeout) = std::env::var("MFM_HTTP_TIMEOUT") {
            builder = builder.set_override("http.timeout_secs", timeout)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Style handed to the segment renderer
    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            font: Font {
                family: self.render.font_family.clone(),
                size: self.render.font_size,
            },
            color_hex: self.render.color.clone(),
            line_height: self.render.line_height,
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}
