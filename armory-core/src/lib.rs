//! Shadowblade armory: weapon tools and the combat dispatcher that picks among them.
//!
//! This crate provides:
//! - A fixed catalog of twelve parameterless weapon tools
//! - An explicit mapping from adversary weaknesses to weapons
//! - A stateless dispatcher that turns one attack order into one strike
//! - Optional Claude-backed target extraction and weapon advice
//!
//! # Quick Start
//!
//! ```ignore
//! use armory_core::{Catalog, Command, Dispatcher, SharedRng};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dispatcher = Dispatcher::new(Catalog::armory(), SharedRng::from_entropy()?);
//!
//!     let engagement = dispatcher
//!         .engage(&Command::new("attack The Colossus of a Thousand Patches"))
//!         .await?;
//!     println!("{}", engagement.summary());
//!     Ok(())
//! }
//! ```

pub mod card;
pub mod catalog;
pub mod config;
pub mod dispatcher;
pub mod llm;
pub mod rng;
pub mod targeting;
pub mod testing;
pub mod weakness;
pub mod weapon;

// Re-export for convenience
pub use armory_macros::Tool;

// Primary public API
pub use card::AgentCard;
pub use catalog::{Armory, ArmoryError, Catalog, CatalogError, ARSENAL};
pub use config::{ArmoryConfig, ConfigError};
pub use dispatcher::{DispatchError, Dispatcher, Engagement, Selection, SelectionReason};
pub use llm::{ClaudeAdvisor, ClaudeExtractor};
pub use rng::{EntropyError, SharedRng};
pub use targeting::{Command, KeywordExtractor, TargetExtractor, TargetingError, WeaponAdvisor};
pub use weakness::MatchKind;
pub use weapon::{ActionResult, Chance, Damage, DamageType, WeaponSpec};
