//! Configuration Module
//! Command line flags layered over an optional JSON config file layered over defaults.

use crate::charts::ExportFormat;
use crate::data::AlignmentMode;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_AVERAGES: &str = "docs/weather_data_flatbush.csv";
pub const DEFAULT_EXTREMES: &str = "docs/flatbush_extremes.csv";
pub const DEFAULT_WIDTH: u32 = 1024;
pub const DEFAULT_HEIGHT: u32 = 768;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid size '{0}', expected WIDTHxHEIGHT")]
    Size(String),
}

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Monthly weather summaries with line, bar and pie charts"
)]
pub struct Args {
    /// Average weather CSV (month, high, low, rain)
    #[arg(long)]
    pub averages: Option<PathBuf>,

    /// Extreme weather CSV (month, record high, record low, snow)
    #[arg(long)]
    pub extremes: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// How rows of the two files are matched
    #[arg(long, value_enum)]
    pub alignment: Option<AlignmentMode>,

    /// Write static charts into this directory
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Static chart format
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Static chart size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Print summaries only, do not open the chart window
    #[arg(long)]
    pub no_gui: bool,

    /// Print the summary report as JSON
    #[arg(long)]
    pub json: bool,

    /// Open the export directory when done
    #[arg(long)]
    pub open: bool,
}

fn parse_size(raw: &str) -> Result<(u32, u32), ConfigError> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| ConfigError::Size(raw.to_string()))?;
    match (w.trim().parse::<u32>(), h.trim().parse::<u32>()) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(ConfigError::Size(raw.to_string())),
    }
}

/// Export settings as they appear in the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportFileConfig {
    pub dir: Option<PathBuf>,
    pub format: Option<ExportFormat>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Contents of the JSON config file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub averages: Option<PathBuf>,
    pub extremes: Option<PathBuf>,
    pub alignment: Option<AlignmentMode>,
    pub gui: Option<bool>,
    pub export: ExportFileConfig,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Static export settings after layering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSettings {
    pub dir: PathBuf,
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub averages: PathBuf,
    pub extremes: PathBuf,
    pub alignment: AlignmentMode,
    pub gui: bool,
    pub json: bool,
    pub open_export: bool,
    pub export: Option<ExportSettings>,
    pub width: u32,
    pub height: u32,
    pub format: ExportFormat,
}

impl Settings {
    /// Read the config file named by `--config`, if any, and merge.
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(args, file))
    }

    /// Flags win over file values, file values win over defaults.
    pub fn merge(args: Args, file: FileConfig) -> Self {
        let (width, height) = args.size.unwrap_or((
            file.export.width.unwrap_or(DEFAULT_WIDTH),
            file.export.height.unwrap_or(DEFAULT_HEIGHT),
        ));
        let format = args.format.or(file.export.format).unwrap_or_default();
        let export = args.export.or(file.export.dir).map(|dir| ExportSettings {
            dir,
            format,
            width,
            height,
        });

        Self {
            averages: args
                .averages
                .or(file.averages)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_AVERAGES)),
            extremes: args
                .extremes
                .or(file.extremes)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXTREMES)),
            alignment: args.alignment.or(file.alignment).unwrap_or_default(),
            gui: !args.no_gui && file.gui.unwrap_or(true),
            json: args.json,
            open_export: args.open,
            export,
            width,
            height,
            format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_without_flags_or_file() {
        let settings = Settings::merge(Args::default(), FileConfig::default());
        assert_eq!(settings.averages, PathBuf::from(DEFAULT_AVERAGES));
        assert_eq!(settings.extremes, PathBuf::from(DEFAULT_EXTREMES));
        assert_eq!(settings.alignment, AlignmentMode::ByMonth);
        assert!(settings.gui);
        assert!(settings.export.is_none());
        assert_eq!((settings.width, settings.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
    }

    #[test]
    fn flags_override_file_values() {
        let file: FileConfig = serde_json::from_str(
            r#"{
                "averages": "file/avg.csv",
                "extremes": "file/ext.csv",
                "alignment": "positional",
                "gui": true,
                "export": { "dir": "file_out", "format": "svg", "width": 800, "height": 600 }
            }"#,
        )
        .unwrap();
        let args = Args::parse_from([
            "flatbush-weather",
            "--averages",
            "cli/avg.csv",
            "--format",
            "png",
            "--no-gui",
        ]);

        let settings = Settings::merge(args, file);
        assert_eq!(settings.averages, PathBuf::from("cli/avg.csv"));
        assert_eq!(settings.extremes, PathBuf::from("file/ext.csv"));
        assert_eq!(settings.alignment, AlignmentMode::Positional);
        assert!(!settings.gui);

        let export = settings.export.unwrap();
        assert_eq!(export.dir, PathBuf::from("file_out"));
        assert_eq!(export.format, ExportFormat::Png);
        assert_eq!((export.width, export.height), (800, 600));
    }

    #[test]
    fn size_flag_parses() {
        let args = Args::parse_from(["flatbush-weather", "--size", "640x480", "-e", "out"]);
        let settings = Settings::merge(args, FileConfig::default());
        let export = settings.export.unwrap();
        assert_eq!((export.width, export.height), (640, 480));
        assert!(parse_size("640").is_err());
        assert!(parse_size("0x480").is_err());
    }

    #[test]
    fn alignment_flag_uses_kebab_case() {
        let args = Args::parse_from(["flatbush-weather", "--alignment", "by-month"]);
        assert_eq!(args.alignment, Some(AlignmentMode::ByMonth));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{ "averages": "a.csv", "colour": "red" }"#)
            .unwrap();
        assert!(matches!(
            FileConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let args = Args::parse_from(["flatbush-weather", "--config", "no/such/config.json"]);
        assert!(matches!(
            Settings::from_args(args),
            Err(ConfigError::Read { .. })
        ));
    }
}
