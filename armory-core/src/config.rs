//! Runtime configuration.

use crate::rng::{EntropyError, SharedRng};
use std::str::FromStr;
use thiserror::Error;

/// Errors reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Settings for the dispatcher and its optional model layers.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmoryConfig {
    /// Model for the Claude layers (client default when unset).
    pub model: Option<String>,

    /// Maximum tokens per model call.
    pub max_tokens: usize,

    /// Sampling temperature for model calls.
    pub temperature: Option<f32>,

    /// Fixed seed for weapon rolls; OS entropy when unset.
    pub seed: Option<u64>,

    /// Route extraction and unmatched targets through Claude.
    pub use_llm: bool,

    /// Public URL advertised in the agent card.
    pub public_url: String,
}

impl Default for ArmoryConfig {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: 512,
            temperature: Some(0.0),
            seed: None,
            use_llm: false,
            public_url: "http://localhost:10003".to_string(),
        }
    }
}

impl ArmoryConfig {
    /// Defaults overridden by `ARMORY_*` and `PUBLIC_URL` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(model) = get("ARMORY_MODEL") {
            config.model = Some(model);
        }
        if let Some(v) = get("ARMORY_MAX_TOKENS") {
            config.max_tokens = parse("ARMORY_MAX_TOKENS", &v)?;
        }
        if let Some(v) = get("ARMORY_TEMPERATURE") {
            config.temperature = Some(parse("ARMORY_TEMPERATURE", &v)?);
        }
        if let Some(v) = get("ARMORY_SEED") {
            config.seed = Some(parse("ARMORY_SEED", &v)?);
        }
        if let Some(v) = get("ARMORY_USE_LLM") {
            config.use_llm = parse_flag("ARMORY_USE_LLM", &v)?;
        }
        if let Some(url) = get("PUBLIC_URL") {
            config.public_url = url;
        }
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_llm(mut self, use_llm: bool) -> Self {
        self.use_llm = use_llm;
        self
    }

    /// The generator described by this config.
    pub fn rng(&self) -> Result<SharedRng, EntropyError> {
        match self.seed {
            Some(seed) => Ok(SharedRng::seeded(seed)),
            None => SharedRng::from_entropy(),
        }
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}
