//! Configuration for the AMMA workspace.
//!
//! Configuration is TOML, layered with later sources overriding earlier ones:
//! 1. Bundled defaults (`amma.toml` at the workspace root, compiled in)
//! 2. `~/.config/amma/amma.toml` (optional)
//! 3. `./amma.toml` (optional)
//!
//! An explicit file replaces layers 2 and 3. Credentials come from the
//! environment (`OPENAI_API_KEY`, `SUPABASE_KEY`).

use amma_error::{AmmaError, AmmaResult, ConfigError};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

/// Environment variable holding the language-model and video credential.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable holding the persistence service key.
pub const SUPABASE_KEY_ENV: &str = "SUPABASE_KEY";

const DEFAULT_CONFIG: &str = include_str!("../../../amma.toml");

/// Persistence service settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Service key; `SUPABASE_KEY` wins when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Table holding patient files
    pub files_table: String,
    /// Table holding user accounts
    pub users_table: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "https://chlfrkennmepvlqfsfzy.supabase.co".to_string(),
            api_key: None,
            files_table: "patient_files".to_string(),
            users_table: "users".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Resolve the service key from the environment or this config.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when neither source provides a key.
    pub fn resolve_api_key(&self) -> AmmaResult<String> {
        std::env::var(SUPABASE_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|key| !key.trim().is_empty()))
            .ok_or_else(|| {
                AmmaError::from(ConfigError::new(format!(
                    "{SUPABASE_KEY_ENV} not set and database.api_key missing from configuration"
                )))
            })
    }
}

/// OpenAI endpoint settings shared by the chat and video clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API base URL
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

impl OpenAiConfig {
    /// Read the API key from `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the variable is unset or blank.
    pub fn resolve_api_key(&self) -> AmmaResult<String> {
        std::env::var(OPENAI_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AmmaError::from(ConfigError::new(format!("{OPENAI_API_KEY_ENV} not set")))
            })
    }
}

/// Script agent settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Chat model identifier
    pub model: String,
    /// Maximum model turns before the run is abandoned
    pub max_turns: usize,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4.1".to_string(),
            max_turns: 10,
            temperature: None,
        }
    }
}

/// Limits for deriving a video prompt from a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Number of leading script lines inspected
    pub scan_lines: usize,
    /// Maximum tagged lines joined into the prompt
    pub max_parts: usize,
    /// A tagged line must be longer than this to count
    pub min_part_chars: usize,
    /// Character ceiling of the derived prompt
    pub max_chars: usize,
    /// Shorter derived prompts are replaced by the fallback
    pub min_chars: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            scan_lines: 20,
            max_parts: 4,
            min_part_chars: 10,
            max_chars: 500,
            min_chars: 30,
        }
    }
}

/// Video job settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Video model identifier
    pub model: String,
    /// Output resolution
    pub size: String,
    /// Duration in seconds, as the string the service expects
    pub seconds: String,
    /// Delay between status polls
    pub poll_interval_secs: u64,
    /// Status polls before giving up
    pub max_attempts: u32,
    /// Prompt derivation limits
    pub prompt: PromptConfig,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            model: "sora-2".to_string(),
            size: "1280x720".to_string(),
            seconds: "12".to_string(),
            poll_interval_secs: 5,
            max_attempts: 60,
            prompt: PromptConfig::default(),
        }
    }
}

impl VideoConfig {
    /// Poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// File retrieval settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Per-download timeout
    pub download_timeout_secs: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            download_timeout_secs: 30,
        }
    }
}

impl RetrievalConfig {
    /// Download timeout as a [`Duration`].
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

/// Top-level AMMA configuration.
///
/// # Example
///
/// ```no_run
/// use amma_core::AmmaConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AmmaConfig::load()?;
/// println!("Polling every {:?}", config.video.poll_interval());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AmmaConfig {
    /// Persistence service
    pub database: DatabaseConfig,
    /// OpenAI endpoint
    pub openai: OpenAiConfig,
    /// Script agent
    pub agent: AgentConfig,
    /// Video jobs
    pub video: VideoConfig,
    /// File retrieval
    pub retrieval: RetrievalConfig,
}

impl AmmaConfig {
    /// Load bundled defaults overridden by the user's config files.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> AmmaResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/amma/amma.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("amma").required(false));

        Self::finish(builder)
    }

    /// Load bundled defaults overridden by one explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> AmmaResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));

        Self::finish(builder)
    }

    /// Use `path` when given, otherwise the layered lookup.
    pub fn load_from(path: Option<&Path>) -> AmmaResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> AmmaResult<Self> {
        builder
            .build()
            .map_err(|e| {
                AmmaError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                AmmaError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
