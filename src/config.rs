use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for the extractor.
///
/// Every field has a default, so a config file only needs the keys it wants
/// to change. Command-line flags override whatever the file says.
///
/// # Loading
///
/// ```rust,no_run
/// use gps_exif_extractor::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("config.json".as_ref())).unwrap();
///
/// // Or use defaults and customize
/// let mut config = Config::default();
/// config.scan.strict = true;
/// let request = config.scan_request(Some("./photos".into())).unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How the directory tree is scanned.
    pub scan: ScanOptions,
    /// How results are presented.
    pub output: OutputConfig,
}

/// Scan behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Abort the whole scan on the first file that is not a JPEG or has no
    /// readable GPS data, instead of skipping it.
    pub strict: bool,
    /// Emit per-file debug diagnostics. Never changes the results.
    pub verbose: bool,
    /// Worker threads. `1` scans sequentially, `0` uses one per CPU.
    pub jobs: usize,
    /// Directory to scan when none is given on the command line.
    pub directory: Option<PathBuf>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            strict: false,
            verbose: false,
            jobs: 1,
            directory: None,
        }
    }
}

/// Result rendering used by the command-line tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
    Html,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// The immutable input to one scan.
///
/// ```rust
/// use gps_exif_extractor::config::ScanRequest;
///
/// let request = ScanRequest::new("./photos").strict(true).jobs(4);
/// assert!(request.is_strict());
/// assert!(!request.is_verbose());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    root_directory: PathBuf,
    strict: bool,
    verbose: bool,
    jobs: usize,
}

impl ScanRequest {
    /// A non-strict, quiet, sequential scan of `root_directory`.
    pub fn new(root_directory: impl Into<PathBuf>) -> Self {
        Self {
            root_directory: root_directory.into(),
            strict: false,
            verbose: false,
            jobs: 1,
        }
    }

    /// A request for the current working directory.
    pub fn current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self::new(cwd))
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn root_directory(&self) -> &Path {
        &self.root_directory
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn worker_count(&self) -> usize {
        self.jobs
    }
}

impl Config {
    /// Resolve the config file path — same directory as the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(config_path)
    }

    /// Build the request for one scan. `directory` wins over the configured
    /// directory, which wins over the current working directory.
    pub fn scan_request(&self, directory: Option<PathBuf>) -> Result<ScanRequest> {
        let request = match directory.or_else(|| self.scan.directory.clone()) {
            Some(dir) => ScanRequest::new(dir),
            None => ScanRequest::current_dir()?,
        };
        Ok(request
            .strict(self.scan.strict)
            .verbose(self.scan.verbose)
            .jobs(self.scan.jobs))
    }
}
