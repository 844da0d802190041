//! Combat dispatcher.
//!
//! Turns one command into exactly one weapon strike:
//!
//! 1. Take the host's pre-parsed target or ask the [`TargetExtractor`].
//! 2. Resolve the target through the catalog's explicit weakness mapping.
//! 3. If that fails and a [`WeaponAdvisor`] is configured, ask it.
//! 4. Otherwise pick uniformly at random.
//! 5. Invoke the chosen weapon once and report.
//!
//! Nothing carries over between commands.

use crate::catalog::{Armory, ArmoryError, Catalog};
use crate::rng::{EntropyError, SharedRng};
use crate::targeting::{Command, KeywordExtractor, TargetExtractor, WeaponAdvisor};
use crate::weakness::MatchKind;
use crate::weapon::{ActionResult, WeaponSpec};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that fail a whole command.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("the armory is empty; there is nothing to select")]
    EmptyCatalog,

    #[error("could not draw a random weapon: {0}")]
    Selection(#[from] EntropyError),

    #[error("weapon {weapon} failed: {source}")]
    Invocation {
        weapon: String,
        #[source]
        source: ArmoryError,
    },
}

/// Why a weapon was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum SelectionReason {
    /// The explicit weakness mapping resolved the label.
    Matched { label: String, kind: MatchKind },
    /// The advisor resolved a label the mapping could not.
    Advised { label: String },
    /// No usable target; `label` is the unresolved target, if there was one.
    Random { label: Option<String> },
}

/// The weapon picked for a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// Position in the catalog.
    pub index: usize,
    pub weapon: WeaponSpec,
    pub reason: SelectionReason,
}

/// A finished command: what was targeted, what was used, what happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Engagement {
    pub target: Option<String>,
    pub selection: Selection,
    pub result: ActionResult,
}

impl Engagement {
    /// Tactical summary. Always reports the base damage as damage points.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Engagement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = self.target.as_deref().unwrap_or("unspecified target");
        let how = match &self.selection.reason {
            SelectionReason::Matched { kind, .. } => format!("{kind} weakness match"),
            SelectionReason::Advised { .. } => "advised match".to_string(),
            SelectionReason::Random { .. } => "random draw".to_string(),
        };
        let r = &self.result;
        write!(
            f,
            "Target: {target}. Weapon: {} ({how}). Hit for {} damage points [{}], critical chance {:.0}%. Effect: {}",
            r.weapon_name,
            r.base_damage,
            r.damage_type,
            r.critical_hit_chance * 100.0,
            r.special_effect
        )
    }
}

/// Stateless command handler over an [`Armory`].
pub struct Dispatcher<A: Armory = Catalog> {
    armory: A,
    rng: SharedRng,
    extractor: Box<dyn TargetExtractor>,
    advisor: Option<Box<dyn WeaponAdvisor>>,
}

impl<A: Armory> Dispatcher<A> {
    /// A dispatcher using the keyword extractor and no advisor.
    pub fn new(armory: A, rng: SharedRng) -> Self {
        Self {
            armory,
            rng,
            extractor: Box::new(KeywordExtractor),
            advisor: None,
        }
    }

    pub fn with_extractor(mut self, extractor: impl TargetExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn with_advisor(mut self, advisor: impl WeaponAdvisor + 'static) -> Self {
        self.advisor = Some(Box::new(advisor));
        self
    }

    pub fn armory(&self) -> &A {
        &self.armory
    }

    pub fn catalog(&self) -> &Catalog {
        self.armory.catalog()
    }

    /// Resolve a label through the explicit mapping, else draw at random.
    pub fn select(&self, label: Option<&str>) -> Result<Selection, DispatchError> {
        let catalog = self.armory.catalog();
        if catalog.is_empty() {
            return Err(DispatchError::EmptyCatalog);
        }

        if let Some(label) = label {
            if let Some(found) = catalog.match_weakness(label) {
                debug!(label, kind = %found.kind, weapon = catalog.weapons()[found.index].name, "weakness matched");
                return Ok(Selection {
                    index: found.index,
                    weapon: catalog.weapons()[found.index].clone(),
                    reason: SelectionReason::Matched {
                        label: label.to_string(),
                        kind: found.kind,
                    },
                });
            }
        }

        self.random(label)
    }

    fn random(&self, label: Option<&str>) -> Result<Selection, DispatchError> {
        let catalog = self.armory.catalog();
        if catalog.is_empty() {
            return Err(DispatchError::EmptyCatalog);
        }
        let index = self.rng.pick(catalog.len())?;
        debug!(?label, weapon = catalog.weapons()[index].name, "random weapon drawn");
        Ok(Selection {
            index,
            weapon: catalog.weapons()[index].clone(),
            reason: SelectionReason::Random {
                label: label.map(str::to_string),
            },
        })
    }

    async fn target_of(&self, command: &Command) -> Option<String> {
        if let Some(target) = &command.target {
            return Some(target.clone());
        }
        match self.extractor.extract(&command.text).await {
            Ok(target) => target,
            Err(e) => {
                warn!(error = %e, "target extraction failed, attacking at random");
                None
            }
        }
    }

    async fn choose(&self, target: Option<&str>) -> Result<Selection, DispatchError> {
        let selection = self.select(target)?;
        if !matches!(selection.reason, SelectionReason::Random { .. }) {
            return Ok(selection);
        }
        let (Some(advisor), Some(label)) = (&self.advisor, target) else {
            return Ok(selection);
        };

        let catalog = self.armory.catalog();
        match advisor.advise(label, catalog).await {
            Ok(Some(name)) => match catalog.position(&name) {
                Some(index) => {
                    debug!(label, weapon = %name, "advisor resolved target");
                    Ok(Selection {
                        index,
                        weapon: catalog.weapons()[index].clone(),
                        reason: SelectionReason::Advised {
                            label: label.to_string(),
                        },
                    })
                }
                None => {
                    warn!(label, weapon = %name, "advisor named a weapon outside the armory");
                    Ok(selection)
                }
            },
            Ok(None) => Ok(selection),
            Err(e) => {
                warn!(label, error = %e, "weapon advisor failed, keeping random draw");
                Ok(selection)
            }
        }
    }

    /// Handle one command: select a weapon, strike once, report.
    pub async fn engage(&self, command: &Command) -> Result<Engagement, DispatchError> {
        let target = self.target_of(command).await;
        let selection = self.choose(target.as_deref()).await?;

        let result = self
            .armory
            .invoke(selection.weapon.name, &self.rng)
            .map_err(|source| DispatchError::Invocation {
                weapon: selection.weapon.name.to_string(),
                source,
            })?;

        info!(
            target = target.as_deref().unwrap_or("-"),
            weapon = selection.weapon.name,
            damage = result.base_damage,
            "engagement resolved"
        );

        Ok(Engagement {
            target,
            selection,
            result,
        })
    }
}
