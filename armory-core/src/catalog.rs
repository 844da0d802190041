//! The armory: a fixed catalog of weapons and the provider seam over it.

use crate::rng::{EntropyError, SharedRng};
use crate::weakness::{self, WeaknessMatch};
use crate::weapon::{ActionResult, Chance, Damage, DamageType, WeaponSpec};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

const ELEGANT_SUFFICIENCY: &str = "Elegant Sufficiency";
const REVOLUTIONARY_REWRITE: &str = "Revolutionary Rewrite";
const INESCAPABLE_REALITY: &str = "Confrontation with Inescapable Reality";
const UNBROKEN_COLLABORATION: &str = "Unbroken Collaboration";

const WEAVER: &str = "The Weaver of Spaghetti Code";
const APATHY: &str = "Apathy: The Spectre of \"It Works on My Machine\"";

/// The twelve legendary weapons, in declaration order.
pub static ARSENAL: [WeaponSpec; 12] = [
    WeaponSpec {
        name: "forge_broadsword",
        title: "Forged Broadsword",
        description: "A well-balanced blade against 'The Weaver of Spaghetti Code'.",
        damage_type: DamageType::Slashing,
        damage: Damage::Between(15, 25),
        crit: Chance::Between(0.15, 0.25),
        effect: "Cleave - has a chance to hit multiple tangled lines of code at once.",
        archetype: None,
        counters: &[WEAVER],
    },
    WeaponSpec {
        name: "enchant_soulshard_dagger",
        title: "Soulshard Dagger",
        description: "Effective against 'Revolutionary Rewrite' weaknesses like 'The Colossus of a Thousand Patches'.",
        damage_type: DamageType::ArcanePiercing,
        damage: Damage::Between(12, 18),
        crit: Chance::Between(0.25, 0.40),
        effect: "Phase Strike - ignores a portion of the target's legacy complexity.",
        archetype: Some(REVOLUTIONARY_REWRITE),
        counters: &["The Colossus of a Thousand Patches"],
    },
    WeaponSpec {
        name: "hone_refactoring_sickle",
        title: "Refactoring Sickle",
        description: "Effective against 'Elegant Sufficiency' weaknesses like 'The Weaver of Spaghetti Code'.",
        damage_type: DamageType::Cleansing,
        damage: Damage::Between(10, 15),
        crit: Chance::Between(0.10, 0.20),
        effect: "Pruning - improves code health and maintainability with each strike.",
        archetype: Some(ELEGANT_SUFFICIENCY),
        counters: &[WEAVER],
    },
    WeaponSpec {
        name: "fire_quickstart_crossbow",
        title: "Quickstart Crossbow",
        description: "Effective against 'Confrontation with Inescapable Reality' weaknesses like 'Procrastination: The Timeless Slumber'.",
        damage_type: DamageType::Initiative,
        damage: Damage::Between(1, 5),
        crit: Chance::Between(0.90, 1.0),
        effect: "Project Scaffolding - creates a `main.rs`, `README.md`, and `Cargo.toml`.",
        archetype: Some(INESCAPABLE_REALITY),
        counters: &["Procrastination: The Timeless Slumber"],
    },
    WeaponSpec {
        name: "strike_the_gilded_gavel",
        title: "The Gilded Gavel",
        description: "Effective against 'Elegant Sufficiency' weaknesses like 'Perfectionism: The Gilded Cage'.",
        damage_type: DamageType::Finality,
        damage: Damage::Fixed(0),
        crit: Chance::Fixed(1.0),
        effect: "Seal of Shipping - marks a feature as complete and ready for deployment.",
        archetype: Some(ELEGANT_SUFFICIENCY),
        counters: &["Perfectionism: The Gilded Cage"],
    },
    WeaponSpec {
        name: "wield_daggers_of_pair_programming",
        title: "Daggers of Pair Programming",
        description: "Effective against 'Unbroken Collaboration' weaknesses like 'Apathy: The Spectre of \"It Works on My Machine\"'.",
        damage_type: DamageType::Collaborative,
        damage: Damage::Between(40, 60),
        crit: Chance::Between(0.30, 0.50),
        effect: "Synergy - automatically resolves merge conflicts and shares knowledge.",
        archetype: Some(UNBROKEN_COLLABORATION),
        counters: &[APATHY],
    },
    WeaponSpec {
        name: "craft_granite_maul",
        title: "Granite Maul",
        description: "Effective against 'Revolutionary Rewrite' weaknesses like 'Dogma: The Zealot of Stubborn Conventions'.",
        damage_type: DamageType::Bludgeoning,
        damage: Damage::Between(25, 40),
        crit: Chance::Between(0.05, 0.15),
        effect: "Shatter - has a high chance to ignore the target's 'best practice' armor.",
        archetype: Some(REVOLUTIONARY_REWRITE),
        counters: &["Dogma: The Zealot of Stubborn Conventions"],
    },
    WeaponSpec {
        name: "focus_lens_of_clarity",
        title: "Lens of Clarity",
        description: "Effective against 'Elegant Sufficiency' weaknesses by revealing the truth behind 'Obfuscation'.",
        damage_type: DamageType::Revelation,
        damage: Damage::Fixed(0),
        crit: Chance::Fixed(1.0),
        effect: "Reveal Constants - highlights all magic numbers and suggests converting them to named constants.",
        archetype: Some(ELEGANT_SUFFICIENCY),
        counters: &["Obfuscation"],
    },
    WeaponSpec {
        name: "scribe_with_codex_of_openapi",
        title: "Codex of OpenAPI",
        description: "Effective against 'Confrontation with Inescapable Reality' weaknesses like 'Hype: The Prophet of Alpha Versions'.",
        damage_type: DamageType::Documentation,
        damage: Damage::Fixed(5),
        crit: Chance::Between(0.5, 0.8),
        effect: "Clarity - makes an API discoverable and usable by other agents and teams.",
        archetype: Some(INESCAPABLE_REALITY),
        counters: &["Hype: The Prophet of Alpha Versions"],
    },
    WeaponSpec {
        name: "forge_container_gauntlet",
        title: "Container Gauntlet",
        description: "Effective against 'Unbroken Collaboration' weaknesses by defeating 'Apathy: The Spectre of \"It Works on My Machine\"'.",
        damage_type: DamageType::Consistency,
        damage: Damage::Fixed(10),
        crit: Chance::Fixed(1.0),
        effect: "Encapsulate - generates a valid Dockerfile for the project.",
        archetype: Some(UNBROKEN_COLLABORATION),
        counters: &[APATHY],
    },
    WeaponSpec {
        name: "raise_shield_of_lts",
        title: "Shield of LTS",
        description: "Effective against 'Confrontation with Inescapable Reality' weaknesses by grounding 'Hype' with stability.",
        damage_type: DamageType::StabilityDefensive,
        damage: Damage::Fixed(0),
        crit: Chance::Fixed(0.0),
        effect: "Stabilize - pins dependencies to stable versions and adds health checks.",
        archetype: Some(INESCAPABLE_REALITY),
        counters: &["Hype"],
    },
    WeaponSpec {
        name: "use_simple_sling",
        title: "Simple Sling",
        description: "The ultimate weapon against 'Elegant Sufficiency' weaknesses, especially 'The Archon of Over-Engineering'.",
        damage_type: DamageType::Minimalism,
        damage: Damage::Between(50, 100),
        crit: Chance::Between(0.6, 0.8),
        effect: "KISS (Keep It Simple, Stupid) - solves a problem with 90% less code than expected.",
        archetype: Some(ELEGANT_SUFFICIENCY),
        counters: &["The Archon of Over-Engineering"],
    },
];

/// Problems building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog has no weapons")]
    Empty,
    #[error("weapon {0} declared twice")]
    Duplicate(&'static str),
}

/// Failures invoking a weapon.
#[derive(Debug, Error)]
pub enum ArmoryError {
    #[error("no weapon named {0} in the armory")]
    UnknownWeapon(String),
    #[error("strike aborted: {0}")]
    Entropy(#[from] EntropyError),
}

/// Immutable set of weapons, built once and shared freely.
#[derive(Debug, Clone)]
pub struct Catalog {
    weapons: Arc<[WeaponSpec]>,
}

impl Catalog {
    /// The standard twelve-weapon armory.
    pub fn armory() -> Self {
        Self {
            weapons: Arc::from(&ARSENAL[..]),
        }
    }

    /// A custom catalog. Names must be unique and at least one weapon given.
    pub fn new(weapons: Vec<WeaponSpec>) -> Result<Self, CatalogError> {
        if weapons.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for weapon in &weapons {
            if !seen.insert(weapon.name) {
                return Err(CatalogError::Duplicate(weapon.name));
            }
        }
        Ok(Self {
            weapons: weapons.into(),
        })
    }

    /// No weapons at all. Only the testing helpers build one.
    pub(crate) fn empty_for_tests() -> Self {
        Self {
            weapons: Arc::from(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeaponSpec> {
        self.weapons.iter()
    }

    pub fn weapons(&self) -> &[WeaponSpec] {
        &self.weapons
    }

    pub fn get(&self, name: &str) -> Option<&WeaponSpec> {
        self.weapons.iter().find(|w| w.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.weapons.iter().position(|w| w.name == name)
    }

    /// Tool definitions for every weapon. Weapons take no input.
    pub fn tools(&self) -> Vec<claude::Tool> {
        self.weapons
            .iter()
            .map(|w| claude::Tool {
                name: w.name.to_string(),
                description: w.description.to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            })
            .collect()
    }

    /// The weapon documented to counter `label`, if any.
    pub fn match_weakness(&self, label: &str) -> Option<WeaknessMatch> {
        weakness::find_counter(&self.weapons, label)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::armory()
    }
}

/// Tool provider seam between the dispatcher and the weapons.
pub trait Armory: Send + Sync {
    /// Everything that can be enumerated and invoked.
    fn catalog(&self) -> &Catalog;

    /// Strike with the named weapon exactly once.
    fn invoke(&self, name: &str, rng: &SharedRng) -> Result<ActionResult, ArmoryError>;
}

impl Armory for Catalog {
    fn catalog(&self) -> &Catalog {
        self
    }

    fn invoke(&self, name: &str, rng: &SharedRng) -> Result<ActionResult, ArmoryError> {
        let weapon = self
            .get(name)
            .ok_or_else(|| ArmoryError::UnknownWeapon(name.to_string()))?;
        Ok(weapon.strike(rng)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_armory_is_valid() {
        let catalog = Catalog::new(ARSENAL.to_vec()).unwrap();
        assert_eq!(catalog.len(), 12);
        assert_eq!(Catalog::armory().len(), 12);
    }

    #[test]
    fn test_rejects_empty_and_duplicates() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));

        let twice = vec![ARSENAL[0].clone(), ARSENAL[0].clone()];
        assert!(matches!(
            Catalog::new(twice),
            Err(CatalogError::Duplicate("forge_broadsword"))
        ));
    }

    #[test]
    fn test_tools_enumerate_every_weapon() {
        let catalog = Catalog::armory();
        let tools = catalog.tools();
        assert_eq!(tools.len(), catalog.len());
        for (tool, weapon) in tools.iter().zip(catalog.iter()) {
            assert_eq!(tool.name, weapon.name);
            assert!(!tool.description.is_empty());
            assert_eq!(tool.input_schema["type"], "object");
        }
    }

    #[test]
    fn test_invoke_unknown_weapon() {
        let catalog = Catalog::armory();
        let rng = SharedRng::seeded(1);
        assert!(matches!(
            catalog.invoke("summon_dragon", &rng),
            Err(ArmoryError::UnknownWeapon(name)) if name == "summon_dragon"
        ));
    }

    #[test]
    fn test_invoke_reports_title_and_type() {
        let catalog = Catalog::armory();
        let rng = SharedRng::seeded(2);
        let result = catalog.invoke("raise_shield_of_lts", &rng).unwrap();
        assert_eq!(result.weapon_name, "Shield of LTS");
        assert_eq!(result.damage_type, DamageType::StabilityDefensive);
        assert_eq!(result.base_damage, 0);
        assert_eq!(result.critical_hit_chance, 0.0);
    }
}
