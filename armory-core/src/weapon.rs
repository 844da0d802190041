//! Weapons and the results they produce.
//!
//! A weapon is static data: a damage rule, a critical-chance rule and
//! some descriptive text. Striking samples both rules afresh.

use crate::rng::{EntropyError, SharedRng};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Damage categories a weapon can deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Slashing,
    #[serde(rename = "Arcane/Piercing")]
    ArcanePiercing,
    Cleansing,
    Initiative,
    Finality,
    Collaborative,
    Bludgeoning,
    Revelation,
    Documentation,
    Consistency,
    #[serde(rename = "Stability/Defensive")]
    StabilityDefensive,
    Minimalism,
}

impl DamageType {
    pub fn label(&self) -> &'static str {
        match self {
            DamageType::Slashing => "Slashing",
            DamageType::ArcanePiercing => "Arcane/Piercing",
            DamageType::Cleansing => "Cleansing",
            DamageType::Initiative => "Initiative",
            DamageType::Finality => "Finality",
            DamageType::Collaborative => "Collaborative",
            DamageType::Bludgeoning => "Bludgeoning",
            DamageType::Revelation => "Revelation",
            DamageType::Documentation => "Documentation",
            DamageType::Consistency => "Consistency",
            DamageType::StabilityDefensive => "Stability/Defensive",
            DamageType::Minimalism => "Minimalism",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Base damage rule: a constant or an inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Damage {
    Fixed(u32),
    Between(u32, u32),
}

impl Damage {
    /// Inclusive `(lo, hi)`.
    pub fn bounds(&self) -> (u32, u32) {
        match *self {
            Damage::Fixed(v) => (v, v),
            Damage::Between(lo, hi) => (lo, hi),
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        let (lo, hi) = self.bounds();
        (lo..=hi).contains(&value)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        match *self {
            Damage::Fixed(v) => v,
            Damage::Between(lo, hi) => rng.gen_range(lo..=hi),
        }
    }
}

impl fmt::Display for Damage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Damage::Fixed(v) => write!(f, "{v}"),
            Damage::Between(lo, hi) => write!(f, "{lo}-{hi}"),
        }
    }
}

/// Critical-hit chance rule, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Chance {
    Fixed(f64),
    Between(f64, f64),
}

impl Chance {
    /// Inclusive `(lo, hi)`.
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            Chance::Fixed(v) => (v, v),
            Chance::Between(lo, hi) => (lo, hi),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        let (lo, hi) = self.bounds();
        value >= lo && value <= hi
    }

    /// Uniform draw rounded to two decimals.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Chance::Fixed(v) => v,
            Chance::Between(lo, hi) => round2(rng.gen_range(lo..=hi)),
        }
    }
}

impl fmt::Display for Chance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chance::Fixed(v) => write!(f, "{v:.2}"),
            Chance::Between(lo, hi) => write!(f, "{lo:.2}-{hi:.2}"),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One entry in the armory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponSpec {
    /// Tool identifier, snake_case.
    pub name: &'static str,
    /// Display name reported in results.
    pub title: &'static str,
    /// Capability text offered to a language model when it picks tools.
    pub description: &'static str,
    pub damage_type: DamageType,
    pub damage: Damage,
    pub crit: Chance,
    pub effect: &'static str,
    /// Weakness family this weapon exploits, e.g. "Elegant Sufficiency".
    pub archetype: Option<&'static str>,
    /// Adversaries this weapon is documented to counter.
    pub counters: &'static [&'static str],
}

impl WeaponSpec {
    /// Strike once. Both numbers are drawn fresh on every call.
    pub fn strike(&self, rng: &SharedRng) -> Result<ActionResult, EntropyError> {
        let (base_damage, critical_hit_chance) =
            rng.with(|rng| (self.damage.sample(rng), self.crit.sample(rng)))?;

        Ok(ActionResult {
            weapon_name: self.title.to_string(),
            damage_type: self.damage_type,
            base_damage,
            critical_hit_chance,
            special_effect: self.effect.to_string(),
        })
    }
}

/// Outcome of a single strike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub weapon_name: String,
    pub damage_type: DamageType,
    pub base_damage: u32,
    pub critical_hit_chance: f64,
    pub special_effect: String,
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} damage points [{}], crit {:.0}%",
            self.weapon_name,
            self.base_damage,
            self.damage_type,
            self.critical_hit_chance * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_two_decimals(v: f64) -> bool {
        ((v * 100.0).round() - v * 100.0).abs() < 1e-9
    }

    #[test]
    fn test_damage_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let damage = Damage::Between(12, 18);
        for _ in 0..500 {
            assert!(damage.contains(damage.sample(&mut rng)));
        }
        assert_eq!(Damage::Fixed(10).sample(&mut rng), 10);
        assert_eq!(Damage::Fixed(0).bounds(), (0, 0));
    }

    #[test]
    fn test_chance_rounds_to_two_decimals() {
        let mut rng = StdRng::seed_from_u64(5);
        let chance = Chance::Between(0.25, 0.40);
        for _ in 0..500 {
            let v = chance.sample(&mut rng);
            assert!(chance.contains(v), "{v} escaped its range");
            assert!(is_two_decimals(v), "{v} not rounded");
        }
        assert_eq!(Chance::Fixed(1.0).sample(&mut rng), 1.0);
    }

    #[test]
    fn test_damage_type_serializes_as_label() {
        let json = serde_json::to_string(&DamageType::ArcanePiercing).unwrap();
        assert_eq!(json, "\"Arcane/Piercing\"");
        assert_eq!(DamageType::StabilityDefensive.to_string(), "Stability/Defensive");
    }

    #[test]
    fn test_action_result_wire_keys() {
        let result = ActionResult {
            weapon_name: "Granite Maul".into(),
            damage_type: DamageType::Bludgeoning,
            base_damage: 31,
            critical_hit_chance: 0.07,
            special_effect: "Shatter".into(),
        };
        let value = serde_json::to_value(&result).unwrap();
        for key in [
            "weapon_name",
            "damage_type",
            "base_damage",
            "critical_hit_chance",
            "special_effect",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["damage_type"], "Bludgeoning");
        assert!(result.to_string().contains("31 damage points"));
    }
}
