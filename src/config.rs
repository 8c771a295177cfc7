//! Runtime configuration: command line flags layered over an optional TOML file.
//!
//! ```toml
//! seed = 42
//! randomizer = "bag"   # or "uniform" (default)
//! fps = 60
//! muted = false
//! cell_width = 2
//! log_file = "neon-tetris.log"
//! ```
//!
//! Flags given on the command line win over the file; anything left unset
//! falls back to the defaults below.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::core::Randomizer;
use crate::engine::{MAX_FPS, MIN_FPS};
use crate::term::{MAX_CELL_WIDTH, MIN_CELL_WIDTH};
use crate::types::TARGET_FPS;

pub const DEFAULT_CELL_WIDTH: u16 = 2;

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "neon-tetris", version, about = "Neon falling-block puzzle game")]
pub struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    pub config: Option<PathBuf>,

    /// Seed for the piece generator (defaults to the clock)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Piece randomizer: "uniform" or "bag"
    #[arg(long, value_name = "KIND")]
    pub randomizer: Option<String>,

    /// Frame rate cap
    #[arg(long)]
    pub fps: Option<u32>,

    /// Start with sound effects muted
    #[arg(long)]
    pub muted: bool,

    /// Terminal columns per board cell
    #[arg(long, value_name = "COLS")]
    pub cell_width: Option<u16>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Contents of the TOML file. Every key is optional.
#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub seed: Option<u32>,
    pub randomizer: Option<String>,
    pub fps: Option<u32>,
    pub muted: Option<bool>,
    pub cell_width: Option<u16>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid configuration")
    }

    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("in {}", path.display()))
    }
}

/// Fully resolved settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub seed: u32,
    pub randomizer: Randomizer,
    pub fps: u32,
    pub muted: bool,
    pub cell_width: u16,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Read the file named by `--config` (if any) and merge it with `args`.
    pub fn load(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::from_toml(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(args, file, clock_seed())
    }

    /// Merge CLI flags over file values over defaults.
    pub fn resolve(args: &Args, file: FileConfig, fallback_seed: u32) -> Result<Self> {
        let randomizer = match args.randomizer.as_deref().or(file.randomizer.as_deref()) {
            Some(name) => Randomizer::from_str(name)
                .ok_or_else(|| anyhow!("unknown randomizer {name:?} (expected \"uniform\" or \"bag\")"))?,
            None => Randomizer::default(),
        };

        Ok(Self {
            seed: args.seed.or(file.seed).unwrap_or(fallback_seed),
            randomizer,
            fps: args
                .fps
                .or(file.fps)
                .unwrap_or(TARGET_FPS)
                .clamp(MIN_FPS, MAX_FPS),
            muted: args.muted || file.muted.unwrap_or(false),
            cell_width: args
                .cell_width
                .or(file.cell_width)
                .unwrap_or(DEFAULT_CELL_WIDTH)
                .clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH),
            log_file: args.log_file.clone().or(file.log_file),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 1,
            randomizer: Randomizer::default(),
            fps: TARGET_FPS,
            muted: false,
            cell_width: DEFAULT_CELL_WIDTH,
            log_file: None,
        }
    }
}

/// Seed derived from the wall clock.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file_or_flags() {
        let cfg = Config::resolve(&Args::default(), FileConfig::default(), 99).unwrap();
        assert_eq!(
            cfg,
            Config {
                seed: 99,
                ..Config::default()
            }
        );
    }

    #[test]
    fn file_values_are_used() {
        let file = FileConfig::from_toml_str(
            r#"
            seed = 42
            randomizer = "bag"
            fps = 30
            muted = true
            cell_width = 3
            log_file = "game.log"
            "#,
        )
        .unwrap();
        let cfg = Config::resolve(&Args::default(), file, 0).unwrap();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.randomizer, Randomizer::Bag);
        assert_eq!(cfg.fps, 30);
        assert!(cfg.muted);
        assert_eq!(cfg.cell_width, 3);
        assert_eq!(cfg.log_file, Some(PathBuf::from("game.log")));
    }

    #[test]
    fn flags_override_file() {
        let file = FileConfig::from_toml_str("seed = 1\nrandomizer = \"bag\"\nfps = 30").unwrap();
        let args = Args::try_parse_from([
            "neon-tetris",
            "--seed",
            "7",
            "--randomizer",
            "uniform",
            "--fps",
            "120",
        ])
        .unwrap();
        let cfg = Config::resolve(&args, file, 0).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.randomizer, Randomizer::Uniform);
        assert_eq!(cfg.fps, 120);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let file = FileConfig::from_toml_str("fps = 0\ncell_width = 10").unwrap();
        let cfg = Config::resolve(&Args::default(), file, 0).unwrap();
        assert_eq!(cfg.fps, 1);
        assert_eq!(cfg.cell_width, 4);

        let args = Args::try_parse_from(["neon-tetris", "--fps", "1000", "--cell-width", "0"]).unwrap();
        let cfg = Config::resolve(&args, FileConfig::default(), 0).unwrap();
        assert_eq!(cfg.fps, 240);
        assert_eq!(cfg.cell_width, 1);
    }

    #[test]
    fn unknown_randomizer_is_an_error() {
        let file = FileConfig::from_toml_str("randomizer = \"lottery\"").unwrap();
        let err = Config::resolve(&Args::default(), file, 0).unwrap_err();
        assert!(err.to_string().contains("lottery"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml_str("speed = 3").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = FileConfig::from_toml("/definitely/not/here.toml").unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.toml"));
    }

    #[test]
    fn muted_flag_parses() {
        let args = Args::try_parse_from(["neon-tetris", "--muted"]).unwrap();
        assert!(args.muted);
        let cfg = Config::resolve(&args, FileConfig::default(), 0).unwrap();
        assert!(cfg.muted);
    }
}
