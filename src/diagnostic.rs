//! The `hello` diagnostic: greets the user and reports which configuration
//! groups are present without revealing any values.

use crate::config::AppConfig;

/// Name used when `--name` is not given.
pub const DEFAULT_NAME: &str = "User";

fn mark(present: bool) -> &'static str {
    if present {
        "✓"
    } else {
        "✗"
    }
}

/// Render the greeting and the three presence indicators, one per line.
pub fn greeting(config: &AppConfig, name: &str) -> String {
    format!(
        "Hello {name}! The configuration is loaded correctly.\n\
         OpenAI API Key is configured: {}\n\
         Supabase is configured: {}\n\
         Langfuse is configured: {}\n",
        mark(config.has_openai()),
        mark(config.has_supabase()),
        mark(config.has_langfuse()),
    )
}
