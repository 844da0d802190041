//! Commands and the capabilities that read targets out of them.
//!
//! Target extraction and weapon advice are seams: the keyword extractor
//! is deterministic, while the Claude-backed implementations in
//! [`crate::llm`] plug in behind the same traits.

use crate::catalog::Catalog;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from a targeting capability. The dispatcher never fails a
/// command because of one; it falls back to a random weapon.
#[derive(Debug, Error)]
pub enum TargetingError {
    #[error("language model error: {0}")]
    Model(#[from] claude::Error),

    #[error("model did not answer with {0}")]
    NoToolCall(&'static str),
}

/// An incoming order such as "attack The Colossus of a Thousand Patches".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub text: String,
    /// A label the host already parsed; skips extraction when set.
    pub target: Option<String>,
}

impl Command {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Pulls an adversary label out of free text.
#[async_trait]
pub trait TargetExtractor: Send + Sync {
    /// `Ok(None)` means the command names no target.
    async fn extract(&self, text: &str) -> Result<Option<String>, TargetingError>;
}

/// Suggests a weapon for a label the explicit mapping could not resolve.
#[async_trait]
pub trait WeaponAdvisor: Send + Sync {
    /// Name of a catalog weapon, or `None` when nothing fits.
    async fn advise(&self, label: &str, catalog: &Catalog)
        -> Result<Option<String>, TargetingError>;
}

const VERBS: &[&str] = &[
    "attack", "strike", "engage", "fight", "hit", "slay", "smite", "target",
];
const FILLERS: &[&str] = &["at", "on", "against"];

/// Deterministic extractor: strips attack verbs and fillers from the front
/// of the command and treats whatever remains as the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordExtractor;

impl KeywordExtractor {
    pub fn parse(text: &str) -> Option<String> {
        let mut rest = text.trim();
        loop {
            let (head, tail) = rest
                .split_once(char::is_whitespace)
                .unwrap_or((rest, ""));
            let word = head
                .trim_end_matches([',', ':', '!', '.'])
                .to_lowercase();
            let known = VERBS.contains(&word.as_str()) || FILLERS.contains(&word.as_str());
            if !known || head.is_empty() {
                break;
            }
            rest = tail.trim_start();
        }

        let target = rest
            .trim()
            .trim_end_matches(['!', '.', '?', ','])
            .trim();
        let target = strip_wrapping_quotes(target).trim();

        (!target.is_empty()).then(|| target.to_string())
    }
}

fn strip_wrapping_quotes(s: &str) -> &str {
    for (open, close) in [('"', '"'), ('\'', '\''), ('\u{201c}', '\u{201d}')] {
        if let Some(inner) = s.strip_prefix(open).and_then(|s| s.strip_suffix(close)) {
            return inner;
        }
    }
    s
}

#[async_trait]
impl TargetExtractor for KeywordExtractor {
    async fn extract(&self, text: &str) -> Result<Option<String>, TargetingError> {
        Ok(Self::parse(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_attack_has_no_target() {
        assert_eq!(KeywordExtractor::parse("attack"), None);
        assert_eq!(KeywordExtractor::parse("  Attack!  "), None);
        assert_eq!(KeywordExtractor::parse(""), None);
    }

    #[test]
    fn test_strips_verbs_and_fillers() {
        assert_eq!(
            KeywordExtractor::parse("attack The Colossus of a Thousand Patches"),
            Some("The Colossus of a Thousand Patches".to_string())
        );
        assert_eq!(
            KeywordExtractor::parse("Strike at Hype!"),
            Some("Hype".to_string())
        );
        assert_eq!(
            KeywordExtractor::parse("engage: 'Obfuscation'"),
            Some("Obfuscation".to_string())
        );
    }

    #[test]
    fn test_keeps_inner_quotes() {
        assert_eq!(
            KeywordExtractor::parse("attack Apathy: The Spectre of \"It Works on My Machine\""),
            Some("Apathy: The Spectre of \"It Works on My Machine\"".to_string())
        );
    }

    #[test]
    fn test_plain_label_passes_through() {
        assert_eq!(
            KeywordExtractor::parse("The Weaver of Spaghetti Code"),
            Some("The Weaver of Spaghetti Code".to_string())
        );
    }

    #[tokio::test]
    async fn test_extractor_trait() {
        let target = KeywordExtractor.extract("attack Dogma").await.unwrap();
        assert_eq!(target.as_deref(), Some("Dogma"));
    }

    #[test]
    fn test_command_builder() {
        let cmd = Command::new("attack").with_target("Hype");
        assert_eq!(cmd.target.as_deref(), Some("Hype"));
    }
}
