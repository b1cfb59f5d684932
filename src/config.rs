use custom_error::custom_error;
use std::env;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub ConfigError

    InvalidMaxDepth{value: String} = "MONKEY_MAX_DEPTH must be a non-negative integer, got \"{value}\"",
}

pub static PROMPT_VAR: &str = "MONKEY_PROMPT";
pub static MAX_DEPTH_VAR: &str = "MONKEY_MAX_DEPTH";
pub static QUIET_VAR: &str = "MONKEY_QUIET";

static DEFAULT_PROMPT: &str = ">> ";
static DEFAULT_MAX_DEPTH: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt: String,
    /// Deepest allowed nesting of function calls; `None` means unbounded.
    pub max_depth: Option<usize>,
    /// Skip the greeting banner.
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_owned(),
            max_depth: Some(DEFAULT_MAX_DEPTH),
            quiet: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(prompt) = lookup(PROMPT_VAR) {
            config.prompt = prompt;
        }

        if let Some(value) = lookup(MAX_DEPTH_VAR) {
            config.max_depth = match value.trim().parse::<usize>() {
                Ok(0) => None,
                Ok(depth) => Some(depth),
                Err(_) => return Err(ConfigError::InvalidMaxDepth { value }),
            };
        }

        config.quiet = lookup(QUIET_VAR).is_some();

        Ok(config)
    }
}
