//! Run config: backend credentials, model, thread, storage and limits. Filled from
//! env vars (and `.env`), then overridden by command-line flags.

use std::time::Duration;

use chatgraph::{ExecutorConfig, ToolChoiceMode, DEFAULT_MAX_ROUND_TRIPS};

use super::CliArgs;

/// Error type used for config loading and CLI plumbing.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_THREAD_ID: &str = "1";
pub const DEFAULT_DB_PATH: &str = "chatgraph.db";

/// Everything needed to assemble a `ChatRunner`.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// OpenAI-compatible API base URL; `None` uses the client default.
    pub api_base: Option<String>,
    /// API key; required unless `mock` is set.
    pub api_key: Option<String>,
    pub model: String,
    /// Sampling temperature 0–2. Default: unset (use API default).
    pub temperature: Option<f32>,
    pub tool_choice: Option<ToolChoiceMode>,
    /// Tavily key; without it the model gets no search tool.
    pub tavily_api_key: Option<String>,
    pub system_prompt: Option<String>,
    pub thread_id: String,
    /// SQLite file for history; `None` keeps history in memory.
    pub db_path: Option<String>,
    pub max_round_trips: usize,
    pub node_timeout: Option<Duration>,
    pub mock: bool,
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            tool_choice: None,
            tavily_api_key: None,
            system_prompt: None,
            thread_id: DEFAULT_THREAD_ID.to_string(),
            db_path: Some(DEFAULT_DB_PATH.to_string()),
            max_round_trips: DEFAULT_MAX_ROUND_TRIPS,
            node_timeout: None,
            mock: false,
            verbose: false,
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>, Error>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env_nonempty(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| format!("invalid {}={:?}: {}", key, raw, e).into()),
        None => Ok(None),
    }
}

impl RunConfig {
    /// Fill config from env vars. Call `dotenv::dotenv().ok()` first to pick up `.env`.
    ///
    /// `OPENAI_API_KEY` (falls back to `API_KEY`), `OPENAI_API_BASE`, `OPENAI_MODEL`,
    /// `OPENAI_TEMPERATURE`, `OPENAI_TOOL_CHOICE`, `TAVILY_API_KEY`, `SYSTEM_PROMPT`,
    /// `THREAD_ID`, `DB_PATH`, `MAX_ROUND_TRIPS`, `NODE_TIMEOUT_SECS`. Only malformed
    /// numbers are errors; a missing key is reported when the runner is built.
    pub fn from_env() -> Result<Self, Error> {
        let defaults = Self::default();
        Ok(Self {
            api_base: env_nonempty("OPENAI_API_BASE"),
            api_key: env_nonempty("OPENAI_API_KEY").or_else(|| env_nonempty("API_KEY")),
            model: env_nonempty("OPENAI_MODEL").unwrap_or(defaults.model),
            temperature: env_parse("OPENAI_TEMPERATURE")?,
            tool_choice: env_parse("OPENAI_TOOL_CHOICE")?,
            tavily_api_key: env_nonempty("TAVILY_API_KEY"),
            system_prompt: env_nonempty("SYSTEM_PROMPT"),
            thread_id: env_nonempty("THREAD_ID").unwrap_or(defaults.thread_id),
            db_path: env_nonempty("DB_PATH").or(defaults.db_path),
            max_round_trips: env_parse("MAX_ROUND_TRIPS")?.unwrap_or(defaults.max_round_trips),
            node_timeout: env_parse::<u64>("NODE_TIMEOUT_SECS")?.map(Duration::from_secs),
            mock: false,
            verbose: false,
        })
    }

    /// Apply command-line flags; only flags that were given override.
    pub fn apply_args(&mut self, args: &CliArgs) {
        if let Some(t) = &args.thread_id {
            self.thread_id = t.clone();
        }
        if let Some(p) = &args.system_prompt {
            self.system_prompt = Some(p.clone());
        }
        if let Some(p) = &args.db_path {
            self.db_path = Some(p.clone());
        }
        if args.in_memory {
            self.db_path = None;
        }
        if let Some(n) = args.max_round_trips {
            self.max_round_trips = n;
        }
        if let Some(secs) = args.timeout_secs {
            self.node_timeout = Some(Duration::from_secs(secs));
        }
        self.mock |= args.mock;
        self.verbose |= args.verbose;
    }

    pub fn executor_config(&self) -> ExecutorConfig {
        let config = ExecutorConfig::default().with_max_round_trips(self.max_round_trips);
        match self.node_timeout {
            Some(t) => config.with_node_timeout(t),
            None => config,
        }
    }

    /// One-line summary for verbose runs. Never includes keys.
    pub fn summary(&self) -> String {
        let llm = if self.mock {
            "mock".to_string()
        } else {
            format!(
                "{} @ {}",
                self.model,
                self.api_base.as_deref().unwrap_or("default")
            )
        };
        let tools = if self.mock {
            "mock-search"
        } else if self.tavily_api_key.is_some() {
            "tavily"
        } else {
            "none"
        };
        format!(
            "llm={} tools={} thread={} history={} max_round_trips={} timeout={}",
            llm,
            tools,
            self.thread_id,
            self.db_path.as_deref().unwrap_or("memory"),
            self.max_round_trips,
            self.node_timeout
                .map(|t| format!("{}s", t.as_secs()))
                .unwrap_or_else(|| "none".to_string()),
        )
    }
}
