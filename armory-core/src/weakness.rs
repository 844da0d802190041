//! Matching an adversary label against the weapons that counter it.
//!
//! Tiers are tried strongest first and the first-declared weapon wins
//! inside a tier, so the same label always resolves to the same weapon.

use crate::weapon::WeaponSpec;
use serde::Serialize;
use std::fmt;

/// Words that never identify an adversary on their own.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "at", "by", "for", "in", "it", "my", "of", "on", "the", "to", "with",
];

/// How a label was matched to a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Label is one of the weapon's documented adversaries.
    Exact,
    /// Label is the title or the epithet of a `Title: Epithet` adversary.
    Alias,
    /// Label names the weakness family the weapon exploits.
    Archetype,
    /// Label and an adversary name share a whole-word run, stop words aside.
    Partial,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchKind::Exact => "exact",
            MatchKind::Alias => "alias",
            MatchKind::Archetype => "archetype",
            MatchKind::Partial => "partial",
        };
        f.write_str(s)
    }
}

/// A resolved weapon for a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaknessMatch {
    /// Position of the weapon in its catalog.
    pub index: usize,
    pub kind: MatchKind,
}

/// Case-fold and strip a label down to words.
///
/// Quotes and punctuation vanish, so `Apathy: The Spectre of "It Works on My Machine"`
/// and `apathy the spectre of it works on my machine` normalize alike.
pub fn normalize(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else if c == '\'' || c == '"' || c == '\u{2019}' {
                '\0'
            } else {
                ' '
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The halves of a `Title: Epithet` adversary name.
fn aliases(counter: &str) -> impl Iterator<Item = String> + '_ {
    counter
        .split_once(':')
        .into_iter()
        .flat_map(|(title, epithet)| [normalize(title), normalize(epithet)])
        .filter(|alias| !alias.is_empty())
}

fn counters_normalized(weapon: &WeaponSpec) -> impl Iterator<Item = String> + '_ {
    weapon.counters.iter().map(|c| normalize(c))
}

/// Words of a normalized label that carry meaning.
fn content_words(normalized: &str) -> Vec<&str> {
    normalized
        .split(' ')
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(w))
        .collect()
}

/// `needle` appears in `haystack` as consecutive words. An empty needle never does.
fn contains_run(haystack: &[&str], needle: &[&str]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|run| run == needle)
}

fn matches_tier(weapon: &WeaponSpec, label: &str, kind: MatchKind) -> bool {
    match kind {
        MatchKind::Exact => counters_normalized(weapon).any(|c| c == label),
        MatchKind::Alias => weapon
            .counters
            .iter()
            .any(|c| aliases(c).any(|alias| alias == label)),
        MatchKind::Archetype => weapon.archetype.is_some_and(|a| normalize(a) == label),
        MatchKind::Partial => {
            let words = content_words(label);
            !words.is_empty()
                && counters_normalized(weapon).any(|c| {
                    let counter = content_words(&c);
                    contains_run(&words, &counter) || contains_run(&counter, &words)
                })
        }
    }
}

/// Resolve `label` against `weapons`, or `None` when nothing counters it.
pub fn find_counter(weapons: &[WeaponSpec], label: &str) -> Option<WeaknessMatch> {
    let label = normalize(label);
    if label.is_empty() {
        return None;
    }

    [
        MatchKind::Exact,
        MatchKind::Alias,
        MatchKind::Archetype,
        MatchKind::Partial,
    ]
    .into_iter()
    .find_map(|kind| {
        weapons
            .iter()
            .position(|w| matches_tier(w, &label, kind))
            .map(|index| WeaknessMatch { index, kind })
    })
}
