//! Process configuration loaded from the environment.
//!
//! [`AppConfig`] is built exactly once at process start and handed to the
//! command handlers by reference. Nothing in the crate reads credentials from
//! a global; tests construct alternate configurations with
//! [`AppConfig::from_lookup`] and never touch the real process environment.
//!
//! # Groups
//!
//! | Group      | Variables                                   |
//! |------------|---------------------------------------------|
//! | `openai`   | `OPENAI_API_KEY`                            |
//! | `supabase` | `SUPABASE_URL`, `SUPABASE_KEY`              |
//! | `langfuse` | `LANGFUSE_PUBLIC_KEY`, `LANGFUSE_SECRET_KEY` |
//!
//! `LANGFUSE_HOST` is optional and defaults to [`DEFAULT_LANGFUSE_HOST`].

use crate::error::ConfigError;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Telemetry host used when `LANGFUSE_HOST` is not set.
pub const DEFAULT_LANGFUSE_HOST: &str = "https://cloud.langfuse.com";

/// Validated credentials for the services the assistant talks to.
///
/// Every field except `langfuse_host` is non-empty once constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub supabase_url: String,
    pub supabase_key: String,
    pub langfuse_public_key: String,
    pub langfuse_secret_key: String,
    pub langfuse_host: String,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("openai_api_key", &"<redacted>")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_key", &"<redacted>")
            .field("langfuse_public_key", &"<redacted>")
            .field("langfuse_secret_key", &"<redacted>")
            .field("langfuse_host", &self.langfuse_host)
            .finish()
    }
}

/// Merge a `.env` file from the working directory (or any parent) into the
/// process environment. Variables already set in the process win.
///
/// Returns the file that was read, if any. Loading twice is harmless.
pub fn load_env_file() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!("Loaded environment file {}", path.display());
            Some(path)
        }
        Err(e) => {
            debug!("No environment file loaded: {}", e);
            None
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment, after merging a
    /// `.env` file if present (see [`load_env_file`]).
    pub fn from_env() -> Result<Self, ConfigError> {
        load_env_file();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Groups are validated in order (`openai`, `supabase`, `langfuse`) and
    /// the first incomplete group is reported. Empty values count as missing.
    /// `LANGFUSE_HOST` is taken verbatim whenever it is set, even if empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let [openai_api_key] = require_group(&get, "openai", ["OPENAI_API_KEY"])?;
        let [supabase_url, supabase_key] =
            require_group(&get, "supabase", ["SUPABASE_URL", "SUPABASE_KEY"])?;
        let [langfuse_public_key, langfuse_secret_key] = require_group(
            &get,
            "langfuse",
            ["LANGFUSE_PUBLIC_KEY", "LANGFUSE_SECRET_KEY"],
        )?;
        let langfuse_host =
            lookup("LANGFUSE_HOST").unwrap_or_else(|| DEFAULT_LANGFUSE_HOST.to_string());

        Ok(Self {
            openai_api_key,
            supabase_url,
            supabase_key,
            langfuse_public_key,
            langfuse_secret_key,
            langfuse_host,
        })
    }

    /// OpenAI API key is present.
    pub fn has_openai(&self) -> bool {
        !self.openai_api_key.is_empty()
    }

    /// Both Supabase URL and key are present.
    pub fn has_supabase(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_key.is_empty()
    }

    /// Both Langfuse public and secret keys are present.
    pub fn has_langfuse(&self) -> bool {
        !self.langfuse_public_key.is_empty() && !self.langfuse_secret_key.is_empty()
    }
}

fn require_group<const N: usize>(
    get: &impl Fn(&str) -> Option<String>,
    group: &'static str,
    vars: [&'static str; N],
) -> Result<[String; N], ConfigError> {
    let values = vars.map(get);
    if values.iter().any(Option::is_none) {
        return Err(ConfigError::MissingGroup {
            group,
            vars: vars.to_vec(),
        });
    }
    Ok(values.map(Option::unwrap_or_default))
}
