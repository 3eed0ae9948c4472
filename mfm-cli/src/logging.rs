use log::LevelFilter;
use simplelog::*;
use std::fs::File;
use std::path::PathBuf;

use crate::config::LogSettings;

/// Logging configuration for the mfm binary
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Master switch to enable/disable all logging
    pub enabled: bool,
    /// Path to the log file
    pub log_file: PathBuf,
    /// Whether to clear the log file on startup
    pub clear_on_startup: bool,
    /// Overall log level
    pub level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: PathBuf::from("mfm_debug.log"),
            clear_on_startup: true,
            level: LevelFilter::Debug,
        }
    }
}

impl LogConfig {
    /// Create a log configuration that discards everything
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Create a minimal log configuration (only errors and warnings)
    pub fn minimal() -> Self {
        Self {
            level: LevelFilter::Warn,
            ..Default::default()
        }
    }

    /// Create a verbose log configuration, engine trace events included
    pub fn verbose() -> Self {
        Self {
            level: LevelFilter::Trace,
            ..Default::default()
        }
    }

    /// File logging is only on when the settings name a file
    pub fn from_settings(settings: &LogSettings) -> Self {
        match &settings.file {
            Some(file) => Self {
                log_file: file.clone(),
                clear_on_startup: false,
                level: settings.level.parse().unwrap_or(LevelFilter::Info),
                ..Default::default()
            },
            None => Self::disabled(),
        }
    }
}

/// Initialize the logging system with the given configuration
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    if !config.enabled {
        // Initialize with no-op logger
        let _ = WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink());
        return Ok(());
    }

    // Clear log file if requested
    if config.clear_on_startup {
        let _ = File::create(&config.log_file)?;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|builder| builder)
        .build();

    WriteLogger::init(config.level, log_config, log_file)?;

    log::info!(
        "Logging initialized: file={}, level={:?}",
        config.log_file.display(),
        config.level
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(!LogConfig::disabled().enabled);
        assert_eq!(LogConfig::minimal().level, LevelFilter::Warn);
        assert_eq!(LogConfig::verbose().level, LevelFilter::Trace);
    }

    #[test]
    fn test_from_settings() {
        let off = LogConfig::from_settings(&LogSettings {
            file: None,
            level: "debug".to_string(),
        });
        assert!(!off.enabled);

        let on = LogConfig::from_settings(&LogSettings {
            file: Some(PathBuf::from("render.log")),
            level: "WARN".to_string(),
        });
        assert!(on.enabled);
        assert!(!on.clear_on_startup);
        assert_eq!(on.level, LevelFilter::Warn);
        assert_eq!(on.log_file, PathBuf::from("render.log"));

        let fallback = LogConfig::from_settings(&LogSettings {
            file: Some(PathBuf::from("render.log")),
            level: "loud".to_string(),
        });
        assert_eq!(fallback.level, LevelFilter::Info);
    }
}
