//! Core types for Auriga: the world arena, its entities, progression state,
//! scripted events, the content format, and save files.
//!
//! This crate knows nothing about command text. You can build a [`World`]
//! programmatically, from a [`WorldContent`] JSON file, or from a save
//! directory.

/// The JSON authoring format.
pub mod content;
/// Spaces, exits, items, characters, and directions.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Typed entity identifiers.
pub mod id;
/// Level-indexed text.
pub mod level;
/// Saving and loading worlds on disk.
pub mod persist;
/// The player.
pub mod player;
/// Progression level and milestone flags.
pub mod progression;
/// Milestones, reactions, conditions, and effects.
pub mod script;
/// Flat record sets of a world.
pub mod snapshot;
/// The central world arena.
pub mod world;

/// Re-export content types.
pub use content::WorldContent;
/// Re-export entity types.
pub use entity::{Character, Direction, Exit, Item, ItemLocation, Space};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export identifiers.
pub use id::{CharacterId, ExitId, ItemId, SpaceId};
/// Re-export level text.
pub use level::LevelText;
/// Re-export persistence entry points.
pub use persist::{SaveSummary, default_save_name, list_saves, load_game, save_dir, save_game};
/// Re-export the player.
pub use player::Player;
/// Re-export progression state.
pub use progression::Progression;
/// Re-export script types.
pub use script::{Condition, Effect, ExitRef, Milestone, Reaction, ScriptVerb, Trigger};
/// Re-export snapshot types.
pub use snapshot::{GameRecord, Snapshot};
/// Re-export world model types.
pub use world::{Aliases, World, WorldMeta};
