//! Configuration for todogather

use eyre::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;
use crate::pipeline::RunOptions;
use crate::scanner::{DEFAULT_EXCLUDE_MARKER, DEFAULT_EXTENSION, DEFAULT_OPT_OUT_FILE, ScanOptions};
use crate::writer::OutputOptions;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Directory tree to scan
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Summary document to write
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// File name skipped while scanning (defaults to the output's file name)
    #[serde(default)]
    pub exclude: Option<String>,

    /// Extension of scanned documents
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Comment that excludes a document
    #[serde(default = "default_exclude_marker")]
    pub exclude_marker: String,

    /// Marker file that excludes a directory
    #[serde(default = "default_opt_out_file")]
    pub opt_out_file: String,

    /// Write the Completed section
    #[serde(default)]
    pub include_done: bool,

    /// Drop `[[source]]` links
    #[serde(default)]
    pub exclude_links: bool,

    /// Delay between watch iterations
    #[serde(default = "default_watch_interval_ms")]
    pub watch_interval_ms: u64,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_root() -> PathBuf {
    PathBuf::from("notes")
}

fn default_output() -> PathBuf {
    PathBuf::from("notes").join("TODO.md")
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_exclude_marker() -> String {
    DEFAULT_EXCLUDE_MARKER.to_string()
}

fn default_opt_out_file() -> String {
    DEFAULT_OPT_OUT_FILE.to_string()
}

fn default_watch_interval_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            output: default_output(),
            exclude: None,
            extension: default_extension(),
            exclude_marker: default_exclude_marker(),
            opt_out_file: default_opt_out_file(),
            include_done: false,
            exclude_links: false,
            watch_interval_ms: default_watch_interval_ms(),
            log_level: None,
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::from_file(config_path);
        }

        let default_paths = [
            dirs::config_dir().map(|p| p.join("todogather").join("config.yml")),
            Some(PathBuf::from("todogather.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Ok(Config::default())
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Apply command line overrides
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(root) = &cli.root {
            self.root = root.clone();
        }
        if let Some(output) = &cli.output {
            self.output = output.clone();
        }
        if let Some(exclude) = &cli.exclude {
            self.exclude = Some(exclude.clone());
        }
        if cli.include_done {
            self.include_done = true;
        }
        if cli.exclude_links {
            self.exclude_links = true;
        }
        if cli.log_level.is_some() {
            self.log_level = cli.log_level.clone();
        }
        self
    }

    /// File name excluded from scanning: the explicit setting, else the output's name
    pub fn excluded_filename(&self) -> Option<String> {
        self.exclude.clone().or_else(|| {
            self.output
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
        })
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms)
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            root: self.root.clone(),
            output: self.output.clone(),
            scan: ScanOptions {
                extension: self.extension.clone(),
                exclude: self.excluded_filename(),
                exclude_marker: self.exclude_marker.clone(),
                opt_out_file: self.opt_out_file.clone(),
            },
            output_options: OutputOptions {
                include_completed: self.include_done,
                exclude_links: self.exclude_links,
            },
        }
    }
}
