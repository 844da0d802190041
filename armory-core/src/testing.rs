//! Testing utilities for the dispatcher.
//!
//! This module provides deterministic stand-ins for the dispatcher's collaborators:
//! - `RecordingArmory` counts strikes and can be told to fail
//! - `ScriptedExtractor` / `ScriptedAdvisor` replace the model layers

use crate::catalog::{Armory, ArmoryError, Catalog};
use crate::rng::{EntropyError, SharedRng};
use crate::targeting::{TargetExtractor, TargetingError, WeaponAdvisor};
use crate::weapon::ActionResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// An armory that records every invocation.
#[derive(Clone)]
pub struct RecordingArmory {
    catalog: Catalog,
    calls: Arc<Mutex<Vec<String>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingArmory {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            calls: Arc::default(),
            failing: Arc::default(),
        }
    }

    /// Make every subsequent strike fail with an entropy error.
    pub fn fail_strikes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Weapon names invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    /// Invocation counts keyed by weapon name.
    pub fn tally(&self) -> HashMap<String, usize> {
        let mut tally = HashMap::new();
        for name in self.calls() {
            *tally.entry(name).or_insert(0) += 1;
        }
        tally
    }
}

impl Armory for RecordingArmory {
    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn invoke(&self, name: &str, rng: &SharedRng) -> Result<ActionResult, ArmoryError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(name.to_string());
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(ArmoryError::Entropy(EntropyError::Unavailable(
                "strike disabled by test".to_string(),
            )));
        }
        self.catalog.invoke(name, rng)
    }
}

/// An armory whose catalog view is empty; nothing can be selected.
pub struct EmptyArmory {
    catalog: Catalog,
}

impl EmptyArmory {
    pub fn new() -> Self {
        Self {
            catalog: Catalog::empty_for_tests(),
        }
    }
}

impl Default for EmptyArmory {
    fn default() -> Self {
        Self::new()
    }
}

impl Armory for EmptyArmory {
    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn invoke(&self, name: &str, _rng: &SharedRng) -> Result<ActionResult, ArmoryError> {
        Err(ArmoryError::UnknownWeapon(name.to_string()))
    }
}

/// Extractor that returns a fixed answer and remembers what it was asked.
#[derive(Clone, Default)]
pub struct ScriptedExtractor {
    answer: Option<String>,
    fail: bool,
    seen: Arc<Mutex<Vec<String>>>,
}

impl ScriptedExtractor {
    pub fn answering(target: impl Into<String>) -> Self {
        Self {
            answer: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn silent() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TargetExtractor for ScriptedExtractor {
    async fn extract(&self, text: &str) -> Result<Option<String>, TargetingError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(text.to_string());
        }
        if self.fail {
            return Err(TargetingError::NoToolCall("identify_target"));
        }
        Ok(self.answer.clone())
    }
}

/// Advisor that names a fixed weapon.
#[derive(Clone, Default)]
pub struct ScriptedAdvisor {
    weapon: Option<String>,
    fail: bool,
}

impl ScriptedAdvisor {
    pub fn naming(weapon: impl Into<String>) -> Self {
        Self {
            weapon: Some(weapon.into()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            weapon: None,
            fail: true,
        }
    }
}

#[async_trait]
impl WeaponAdvisor for ScriptedAdvisor {
    async fn advise(
        &self,
        _label: &str,
        _catalog: &Catalog,
    ) -> Result<Option<String>, TargetingError> {
        if self.fail {
            return Err(TargetingError::NoToolCall("weapon"));
        }
        Ok(self.weapon.clone())
    }
}
