//! JSON configuration for the `cloud_export` tool.
//!
//! A config names the depth export, the optional annotation files, the
//! output locations, and the pipeline parameters. Omitted sections fall
//! back to defaults; omitted annotation files simply produce empty or null
//! entries in the output.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::exporter::ExportParams;

/// Input file locations.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// The H×W×3 `xyz.npy` depth export.
    pub xyz_npy: PathBuf,
    #[serde(default)]
    pub mesh_paths_json: Option<PathBuf>,
    #[serde(default)]
    pub measurements_json: Option<PathBuf>,
    #[serde(default)]
    pub keypoints_json: Option<PathBuf>,
}

/// Output file locations.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// The viewer-facing `pointcloud.json` (compact).
    pub cloud_json: PathBuf,
    /// Optional pretty-printed pipeline trace.
    #[serde(default)]
    pub trace_json: Option<PathBuf>,
    /// Optional directory for debug artifacts (validity mask, Z preview).
    #[serde(default)]
    pub debug_dir: Option<PathBuf>,
}

/// Complete tool configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportToolConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub params: ExportParams,
    pub output: OutputConfig,
}

/// Load and parse a config file.
pub fn load_config(path: &Path) -> Result<ExportToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

/// Parse the tool command line: a single config-file argument.
pub fn parse_cli(program: &str) -> Result<ExportToolConfig, String> {
    let mut args = env::args().skip(1);
    let config_path = match args.next() {
        Some(arg) if arg == "-h" || arg == "--help" => {
            return Err(usage(program));
        }
        Some(arg) => PathBuf::from(arg),
        None => return Err(usage(program)),
    };
    if args.next().is_some() {
        return Err(usage(program));
    }
    load_config(&config_path)
}

fn usage(program: &str) -> String {
    format!("Usage: {program} <config.json>")
}
