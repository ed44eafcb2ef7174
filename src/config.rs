//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable holding the Pixabay API key.
pub const PIXABAY_KEY_ENV: &str = "PIXABAY_KEY";
/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_TOKEN_MOTIVATION";
/// Environment variable holding the Telegram destination chat.
pub const TELEGRAM_CHAT_ENV: &str = "TELEGRAM_CHAT_ID";
/// Environment variable holding the generic webhook URL.
pub const WEBHOOK_ENV: &str = "WEBHOOK_MOTIVATION";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Credentials and endpoints.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Local file locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Post content.
    #[serde(default)]
    pub post: PostConfig,
}

/// Credentials and endpoints. Every entry is optional.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Pixabay API key.
    pub pixabay: Option<String>,
    /// Telegram bot token.
    pub telegram_token: Option<String>,
    /// Telegram chat id.
    pub telegram_chat_id: Option<String>,
    /// Generic webhook URL.
    pub webhook: Option<String>,
}

/// Local file locations.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Append-only log of used quotes.
    pub history: PathBuf,
    /// Where the composed post is written.
    pub output: PathBuf,
    /// Cached font file reused across runs.
    pub font_cache: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            history: PathBuf::from("history.txt"),
            output: PathBuf::from("post.jpg"),
            font_cache: PathBuf::from("font.ttf"),
        }
    }
}

/// Post content.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PostConfig {
    /// Author line drawn under the quote.
    pub author: String,
    /// Caption sent along with the uploaded image.
    pub caption: String,
    /// Photo search query for the background.
    pub search_query: String,
    /// Quote used when no fresh quote could be fetched.
    pub default_quote: String,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            author: "- Lucas Hart".to_string(),
            caption: "💡 Daily Wisdom. #Motivation #LucasHart #Inspiration".to_string(),
            search_query: "nature dark landscape".to_string(),
            default_quote: "The secret of getting ahead is getting started.".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Resolve credentials, preferring `lookup` (normally the process environment)
    /// over values from the config file. Empty values count as absent.
    pub fn credentials<F>(&self, lookup: F) -> Credentials
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |env: &str, file: &Option<String>| {
            non_empty(lookup(env)).or_else(|| non_empty(file.clone()))
        };
        Credentials {
            pixabay_key: pick(PIXABAY_KEY_ENV, &self.keys.pixabay),
            telegram_token: pick(TELEGRAM_TOKEN_ENV, &self.keys.telegram_token),
            telegram_chat_id: pick(TELEGRAM_CHAT_ENV, &self.keys.telegram_chat_id),
            webhook_url: pick(WEBHOOK_ENV, &self.keys.webhook),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Secrets and endpoints after environment overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Photo search key; without it backgrounds fall back to a solid colour.
    pub pixabay_key: Option<String>,
    /// Telegram bot token.
    pub telegram_token: Option<String>,
    /// Telegram chat id.
    pub telegram_chat_id: Option<String>,
    /// Generic webhook URL.
    pub webhook_url: Option<String>,
}

impl Credentials {
    /// Telegram token and chat id, when both are present.
    #[must_use]
    pub fn telegram(&self) -> Option<(&str, &str)> {
        match (&self.telegram_token, &self.telegram_chat_id) {
            (Some(token), Some(chat)) => Some((token.as_str(), chat.as_str())),
            _ => None,
        }
    }
}

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Resolved credentials.
    pub credentials: Credentials,
    /// History log path.
    pub history_path: PathBuf,
    /// Composed artifact path.
    pub output_path: PathBuf,
    /// Cached font path.
    pub font_cache: PathBuf,
    /// Author line.
    pub author: String,
    /// Caption for sinks.
    pub caption: String,
    /// Background search query.
    pub search_query: String,
    /// Fallback quote.
    pub default_quote: String,
    /// Stop after composing.
    pub dry_run: bool,
}

impl Settings {
    /// Merge the config file with credentials and CLI overrides.
    #[must_use]
    pub fn resolve(config: Config, credentials: Credentials, overrides: Overrides) -> Self {
        let Config { paths, post, .. } = config;
        Self {
            credentials,
            history_path: overrides.history.unwrap_or(paths.history),
            output_path: overrides.output.unwrap_or(paths.output),
            font_cache: paths.font_cache,
            author: post.author,
            caption: post.caption,
            search_query: overrides.query.unwrap_or(post.search_query),
            default_quote: post.default_quote,
            dry_run: overrides.dry_run,
        }
    }
}

/// Values supplied on the command line that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// History path override.
    pub history: Option<PathBuf>,
    /// Output path override.
    pub output: Option<PathBuf>,
    /// Search query override.
    pub query: Option<String>,
    /// Dry-run flag.
    pub dry_run: bool,
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `QUOTECARD_CONFIG` environment variable
/// 3. `~/.config/quotecard/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("QUOTECARD_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/quotecard/config.toml")
    } else {
        PathBuf::from("quotecard.toml")
    }
}
