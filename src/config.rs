use log::{ debug, info };
use serde::{ Deserialize, Serialize };
use std::fs;
use std::path::{ Path, PathBuf };
use std::time::Duration;
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILENAME: &str = "mcftest.yaml";

/// Overrides `tools.bin_dir`
pub const BIN_DIR_ENV_VAR: &str = "MCRL2_BIN_DIR";

/// Where the macOS app bundle installs the mCRL2 command line tools
pub const MACOS_APP_BIN_DIR: &str = "/Applications/mCRL2.app/Contents/bin";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid value for `{key}`: {message}")]
    InvalidValue { key: String, message: String },
}

/// Configuration for the harness
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HarnessConfig {
    /// Behavioral template every trace is spliced into
    pub template: PathBuf,

    /// Directory scanned for `*.mcf` and `*.mcf-pc` files
    pub properties_dir: PathBuf,

    /// Maximum number of concurrent checker invocations (defaults to the
    /// available parallelism)
    pub jobs: Option<usize>,

    /// External tool settings
    pub tools: ToolsConfig,
}

/// Configuration for the external mCRL2 tools
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ToolsConfig {
    /// Directory holding the tool binaries; `PATH` lookup when unset
    pub bin_dir: Option<PathBuf>,
    pub mcrl22lps: String,
    pub lps2pbes: String,
    pub pbessolve: String,
    /// Per tool invocation
    pub timeout_secs: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("test-template.mcrl2"),
            properties_dir: PathBuf::from("properties"),
            jobs: None,
            tools: ToolsConfig::default(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            bin_dir: None,
            mcrl22lps: "mcrl22lps".to_string(),
            lps2pbes: "lps2pbes".to_string(),
            pbessolve: "pbessolve".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: HarnessConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the explicit config file, or `mcftest.yaml` if present, or defaults.
    /// Environment overrides are applied afterwards.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None if Path::new(DEFAULT_CONFIG_FILENAME).is_file() => {
                info!("Loading configuration from {}", DEFAULT_CONFIG_FILENAME);
                Self::from_file(Path::new(DEFAULT_CONFIG_FILENAME))?
            }
            None => {
                debug!("No configuration file, using defaults");
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) where F: Fn(&str) -> Option<String> {
        if let Some(dir) = lookup(BIN_DIR_ENV_VAR).filter(|d| !d.trim().is_empty()) {
            debug!("{} overrides tool directory: {}", BIN_DIR_ENV_VAR, dir);
            self.tools.bin_dir = Some(PathBuf::from(dir));
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jobs == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "jobs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.tools.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "tools.timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Effective worker pool size
    pub fn jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

impl ToolsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Directory to resolve tool names against, if any
    pub fn effective_bin_dir(&self) -> Option<PathBuf> {
        match &self.bin_dir {
            Some(dir) => Some(dir.clone()),
            None => {
                let app_dir = Path::new(MACOS_APP_BIN_DIR);
                if app_dir.is_dir() { Some(app_dir.to_path_buf()) } else { None }
            }
        }
    }

    /// Path (or bare name for `PATH` lookup) of a tool
    pub fn resolve(&self, tool: &str) -> PathBuf {
        match self.effective_bin_dir() {
            Some(dir) => dir.join(tool),
            None => PathBuf::from(tool),
        }
    }
}
