//! Claude-backed targeting.
//!
//! Both types only *read* the model's tool calls. The advisor offers
//! every weapon as a tool but never executes the one the model picks;
//! the dispatcher validates the name and performs the single strike.

use crate::catalog::Catalog;
use crate::config::ArmoryConfig;
use crate::targeting::{TargetExtractor, TargetingError, WeaponAdvisor};
use crate::Tool;
use async_trait::async_trait;
use claude::{Claude, Message, Request, Response, ToolChoice, ToolSchema};
use serde::Deserialize;
use tracing::debug;

/// System prompt shared by the extractor and the advisor.
pub const SHADOWBLADE_PROMPT: &str = "\
You are the Shadowblade, an elite combat agent on a digital battleground. \
You execute combat orders with precision and speak like a professional operative: \
concise, tactical, no filler.

Rules of engagement:
- Identify the monster named in the order before anything else.
- Each weapon tool documents which weaknesses and which monsters it is effective against. \
Choose the single weapon whose description best counters the named monster.
- If a weapon's description names the monster outright, that weapon is the choice.
- Use only the weapons provided. Never invent weapons or outcomes.";

/// Report the monster or weakness named in a combat order.
#[derive(Tool, Debug, Deserialize)]
#[tool(name = "identify_target")]
struct IdentifyTarget {
    /// The monster name or weakness exactly as written in the order. Omit it when the order names no target.
    target: Option<String>,
}

/// Shared client settings for both capabilities.
#[derive(Clone)]
struct ModelSettings {
    client: Claude,
    max_tokens: usize,
    temperature: Option<f32>,
}

impl ModelSettings {
    fn from_config(client: Claude, config: &ArmoryConfig) -> Self {
        let client = match &config.model {
            Some(model) => client.with_model(model),
            None => client,
        };
        Self {
            client,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// Send one request and log what it cost.
    async fn complete(
        &self,
        purpose: &'static str,
        request: Request,
    ) -> Result<Response, TargetingError> {
        let response = self.client.complete(request).await?;
        debug!(
            purpose,
            id = %response.id,
            model = %response.model,
            stop_reason = ?response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            total_tokens = response.usage.total(),
            "model call finished"
        );
        Ok(response)
    }

    fn request(&self, prompt: String) -> Request {
        let request = Request::new(vec![Message::user(prompt)])
            .with_system(SHADOWBLADE_PROMPT)
            .with_max_tokens(self.max_tokens);
        match self.temperature {
            Some(t) => request.with_temperature(t),
            None => request,
        }
    }
}

/// Extracts targets by forcing a call to `identify_target`.
#[derive(Clone)]
pub struct ClaudeExtractor {
    settings: ModelSettings,
}

impl ClaudeExtractor {
    pub fn new(client: Claude, config: &ArmoryConfig) -> Self {
        Self {
            settings: ModelSettings::from_config(client, config),
        }
    }
}

#[async_trait]
impl TargetExtractor for ClaudeExtractor {
    async fn extract(&self, text: &str) -> Result<Option<String>, TargetingError> {
        let request = self
            .settings
            .request(format!("Combat order: {text}"))
            .with_tools(vec![IdentifyTarget::as_tool()])
            .with_tool_choice(ToolChoice::tool(IdentifyTarget::tool_name()));

        let response = self.settings.complete("extract", request).await?;
        let call = response
            .tool_uses()
            .into_iter()
            .find(|call| call.name == IdentifyTarget::tool_name())
            .ok_or(TargetingError::NoToolCall("identify_target"))?;

        let parsed = IdentifyTarget::parse_input(&call)?;
        let target = parsed
            .target
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        debug!(?target, "model extracted target");
        Ok(target)
    }
}

/// Lets the model pick a weapon from the catalog's tool descriptions.
#[derive(Clone)]
pub struct ClaudeAdvisor {
    settings: ModelSettings,
}

impl ClaudeAdvisor {
    pub fn new(client: Claude, config: &ArmoryConfig) -> Self {
        Self {
            settings: ModelSettings::from_config(client, config),
        }
    }
}

#[async_trait]
impl WeaponAdvisor for ClaudeAdvisor {
    async fn advise(
        &self,
        label: &str,
        catalog: &Catalog,
    ) -> Result<Option<String>, TargetingError> {
        let request = self
            .settings
            .request(format!(
                "Attack {label}. Call exactly one weapon: the one most effective against this target."
            ))
            .with_tools(catalog.tools())
            .with_tool_choice(ToolChoice::Any);

        let response = self.settings.complete("advise", request).await?;
        let choice = response.tool_uses().into_iter().next().map(|call| call.name);
        debug!(label, ?choice, "model advised weapon");
        Ok(choice)
    }
}
