//! Agent card advertising the Shadowblade to other agents.

use serde::{Deserialize, Serialize};

const TEXT_MODES: [&str; 2] = ["text", "text/plain"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    pub streaming: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub examples: Vec<String>,
}

/// Public identity of the combat agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub url: String,
    pub version: String,
    pub default_input_modes: Vec<String>,
    pub default_output_modes: Vec<String>,
    pub capabilities: AgentCapabilities,
    pub skills: Vec<AgentSkill>,
}

impl AgentCard {
    /// Card for the Shadowblade combat agent served at `url`.
    pub fn shadowblade(url: impl Into<String>) -> Self {
        let modes: Vec<String> = TEXT_MODES.iter().map(|m| m.to_string()).collect();
        Self {
            name: "Shadowblade Combat Agent".to_string(),
            description: "Elite combat agent. Given an attack order it identifies the target, \
                          picks the single armory weapon that counters the target's weakness, \
                          strikes once and reports damage points and effects."
                .to_string(),
            url: url.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            default_input_modes: modes.clone(),
            default_output_modes: modes,
            capabilities: AgentCapabilities { streaming: false },
            skills: vec![AgentSkill {
                id: "combat_dispatch".to_string(),
                name: "Combat dispatch".to_string(),
                description: "Selects the most effective weapon against a named monster, \
                              or a random weapon when no target is given, and reports the outcome."
                    .to_string(),
                tags: vec!["combat".to_string(), "armory".to_string()],
                examples: vec![
                    "attack The Colossus of a Thousand Patches".to_string(),
                    "attack".to_string(),
                ],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_serializes_camel_case() {
        let card = AgentCard::shadowblade("https://agents.example/shadowblade");
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["url"], "https://agents.example/shadowblade");
        assert_eq!(value["defaultInputModes"][1], "text/plain");
        assert_eq!(value["capabilities"]["streaming"], false);
        assert_eq!(value["skills"][0]["id"], "combat_dispatch");

        let back: AgentCard = serde_json::from_value(value).unwrap();
        assert_eq!(back, card);
    }
}
