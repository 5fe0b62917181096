//! Configuration discovery and effective settings resolution.
//!
//! tmplint reads `tmplint.toml|yaml|yml` from the project root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `paths`: `["."]`
//! - `exclude`: none
//! - `extensions`: `["twig"]`
//! - `severity`: `warning`
//! - `display`: `all`
//! - `reporter`: `console`
//! - `ruleset`: `official`
//! - `language_version`: `3`
//! - `throw_syntax_error`: false
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILES: [&str; 3] = ["tmplint.toml", "tmplint.yaml", "tmplint.yml"];

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `tmplint.toml|yaml`.
pub struct FileConfig {
    pub paths: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub severity: Option<String>,
    pub display: Option<String>,
    pub reporter: Option<String>,
    pub ruleset: Option<String>,
    pub language_version: Option<u8>,
    pub throw_syntax_error: Option<bool>,
}

/// Values given on the command line; `None`/empty means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub project_root: Option<String>,
    pub paths: Vec<String>,
    pub exclude: Vec<String>,
    pub extensions: Vec<String>,
    pub severity: Option<String>,
    pub display: Option<String>,
    pub reporter: Option<String>,
    pub ruleset: Option<String>,
    pub language_version: Option<u8>,
    pub throw_syntax_error: bool,
}

#[derive(Debug, Clone, PartialEq)]
/// Fully-resolved configuration used by the run after applying precedence.
///
/// String enums are validated later, in one place, before any file is read.
pub struct Effective {
    pub project_root: PathBuf,
    pub config_file: Option<PathBuf>,
    pub paths: Vec<String>,
    pub exclude: Vec<String>,
    pub extensions: Vec<String>,
    pub severity: String,
    pub display: String,
    pub reporter: String,
    pub ruleset: String,
    pub language_version: u8,
    pub throw_syntax_error: bool,
}

impl Default for Effective {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            config_file: None,
            paths: vec![".".to_string()],
            exclude: Vec::new(),
            extensions: vec!["twig".to_string()],
            severity: "warning".to_string(),
            display: "all".to_string(),
            reporter: "console".to_string(),
            ruleset: "official".to_string(),
            language_version: 3,
            throw_syntax_error: false,
        }
    }
}

/// Walk upward from `start` to detect the project root.
///
/// Stops when a `tmplint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_project_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) if !p.as_os_str().is_empty() => cur = p,
            _ => return start.to_path_buf(),
        }
    }
}

/// Load `FileConfig` from the first config file present under `root`.
///
/// A file that exists but does not parse is an error, not a silent default.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, FileConfig)>, ConfigError> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let text = fs::read_to_string(&path).map_err(|e| ConfigError::InvalidConfigFile {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<FileConfig>(&text).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<FileConfig>(&text).map_err(|e| e.to_string())
        };
        let cfg = parsed.map_err(|message| ConfigError::InvalidConfigFile {
            path: path.clone(),
            message,
        })?;
        tracing::debug!(file = %path.display(), "config loaded");
        return Ok(Some((path, cfg)));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli.project_root.as_deref().unwrap_or("."));
    // `Path::parent` of a relative "." is "", so walk up from the absolute form.
    let start = fs::canonicalize(&start).unwrap_or(start);
    let project_root = detect_project_root(&start);
    let (config_file, cfg) = match load_config(&project_root)? {
        Some((path, cfg)) => (Some(path), cfg),
        None => (None, FileConfig::default()),
    };
    let d = Effective::default();

    let non_empty = |v: &Vec<String>| if v.is_empty() { None } else { Some(v.clone()) };
    // Paths from the config file are relative to the file, not to the cwd.
    let cfg_paths: Option<Vec<String>> = cfg
        .paths
        .map(|ps| ps.iter().map(|p| rooted(&project_root, p)).collect());

    Ok(Effective {
        paths: non_empty(&cli.paths).or(cfg_paths).unwrap_or(d.paths),
        exclude: non_empty(&cli.exclude).or(cfg.exclude).unwrap_or(d.exclude),
        extensions: non_empty(&cli.extensions)
            .or(cfg.extensions)
            .unwrap_or(d.extensions),
        severity: cli.severity.clone().or(cfg.severity).unwrap_or(d.severity),
        display: cli.display.clone().or(cfg.display).unwrap_or(d.display),
        reporter: cli.reporter.clone().or(cfg.reporter).unwrap_or(d.reporter),
        ruleset: cli.ruleset.clone().or(cfg.ruleset).unwrap_or(d.ruleset),
        language_version: cli
            .language_version
            .or(cfg.language_version)
            .unwrap_or(d.language_version),
        // The flag can only switch throwing on; the file decides otherwise.
        throw_syntax_error: cli.throw_syntax_error
            || cfg.throw_syntax_error.unwrap_or(d.throw_syntax_error),
        project_root,
        config_file,
    })
}

/// Config-file paths are relative to the project root. When the root is the
/// working directory they stay as written so display paths remain short.
fn rooted(root: &Path, p: &str) -> String {
    let at_cwd = std::env::current_dir()
        .and_then(fs::canonicalize)
        .map(|cwd| cwd == root)
        .unwrap_or(false);
    if at_cwd || root == Path::new(".") || Path::new(p).is_absolute() {
        return p.to_string();
    }
    root.join(p).to_string_lossy().into_owned()
}
