//! Scripted events: milestones, reactions, and the conditions and effects
//! they are built from.
//!
//! Everything here is plain data referring to entities by name, so it can be
//! authored in content files and saved alongside the world. Evaluation lives
//! in the fiction engine.

use serde::{Deserialize, Serialize};

use crate::entity::Direction;
use crate::level::LevelText;

/// The interaction verbs that can trigger scripted events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptVerb {
    /// Using a carried item.
    Use,
    /// Pushing an item in the room.
    Push,
    /// Pulling an item in the room.
    Pull,
}

/// What sets a scripted event off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "on", rename_all = "snake_case")]
pub enum Trigger {
    /// Checked after every turn.
    Passive,
    /// `use <item>`; no item means any item.
    Use {
        /// Item name, case-insensitive.
        #[serde(default)]
        item: Option<String>,
    },
    /// `push <item>`.
    Push {
        /// Item name, case-insensitive.
        #[serde(default)]
        item: Option<String>,
    },
    /// `pull <item>`.
    Pull {
        /// Item name, case-insensitive.
        #[serde(default)]
        item: Option<String>,
    },
}

impl Trigger {
    /// Whether this trigger fires for `verb` applied to `item`.
    pub fn matches(&self, verb: ScriptVerb, item: &str) -> bool {
        let (expected, wanted) = match self {
            Trigger::Passive => return false,
            Trigger::Use { item } => (ScriptVerb::Use, item),
            Trigger::Push { item } => (ScriptVerb::Push, item),
            Trigger::Pull { item } => (ScriptVerb::Pull, item),
        };
        expected == verb
            && wanted
                .as_deref()
                .is_none_or(|name| name.eq_ignore_ascii_case(item))
    }

    /// The item name this trigger requires, if any.
    pub fn item(&self) -> Option<&str> {
        match self {
            Trigger::Passive => None,
            Trigger::Use { item } | Trigger::Push { item } | Trigger::Pull { item } => {
                item.as_deref()
            }
        }
    }
}

/// A guard evaluated against the world.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// The player is in the named space.
    PlayerAt {
        /// Space name.
        space: String,
    },
    /// The player carries the named item.
    Holding {
        /// Item name.
        item: String,
    },
    /// The named item lies in the player's current space.
    ItemHere {
        /// Item name.
        item: String,
    },
    /// The named character is in the player's current space.
    CharacterHere {
        /// Character name.
        character: String,
    },
    /// The named milestone has fired.
    MilestoneReached {
        /// Milestone name.
        milestone: String,
    },
    /// The progression level is at least `level`.
    LevelAtLeast {
        /// Minimum level.
        level: u32,
    },
    /// Logical NOT.
    Not {
        /// Negated condition.
        condition: Box<Condition>,
    },
    /// Logical AND.
    All {
        /// Conditions that must all hold.
        conditions: Vec<Condition>,
    },
    /// Logical OR.
    Any {
        /// Conditions of which one must hold.
        conditions: Vec<Condition>,
    },
    /// Always true.
    #[default]
    Always,
}

/// Names an exit by its owning space and exit type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitRef {
    /// Name of the space the exit leaves from.
    pub space: String,
    /// Exit type name.
    pub name: String,
    /// Narrows the match when a space has several exits of one type.
    #[serde(default)]
    pub direction: Option<Direction>,
}

/// A one-time or repeatable change to the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    /// Make a hidden item visible.
    RevealItem {
        /// Item name.
        item: String,
    },
    /// Hide an item.
    HideItem {
        /// Item name.
        item: String,
    },
    /// Allow an item to be taken.
    UnlockItem {
        /// Item name.
        item: String,
    },
    /// Fix an item in place.
    LockItem {
        /// Item name.
        item: String,
    },
    /// Unlock an exit.
    UnlockExit {
        /// Target exit.
        exit: ExitRef,
    },
    /// Lock an exit.
    LockExit {
        /// Target exit.
        exit: ExitRef,
    },
    /// Make a hidden exit visible.
    RevealExit {
        /// Target exit.
        exit: ExitRef,
    },
    /// Hide an exit.
    HideExit {
        /// Target exit.
        exit: ExitRef,
    },
    /// Replace a character's level-indexed responses.
    ReplaceResponses {
        /// Character name.
        character: String,
        /// New responses.
        responses: LevelText,
    },
    /// Move a character to another space.
    MoveCharacter {
        /// Character name.
        character: String,
        /// Destination space name.
        to: String,
    },
    /// Remove an item from play.
    ConsumeItem {
        /// Item name.
        item: String,
    },
    /// Put an item into a space.
    PlaceItem {
        /// Item name.
        item: String,
        /// Space name.
        space: String,
    },
    /// Take energy from the player.
    DrainEnergy {
        /// Energy to remove.
        amount: u32,
    },
    /// Halve the player's energy.
    HalveEnergy,
}

/// A one-shot scripted event that advances the progression level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique milestone name.
    pub name: String,
    /// What sets it off.
    pub trigger: Trigger,
    /// Guard that must hold.
    #[serde(default)]
    pub condition: Condition,
    /// World changes applied when it fires.
    #[serde(default)]
    pub effects: Vec<Effect>,
    /// Narration shown when it fires.
    #[serde(default)]
    pub message: String,
}

/// A repeatable scripted response that never changes the level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// What sets it off.
    pub trigger: Trigger,
    /// Guard that must hold.
    #[serde(default)]
    pub condition: Condition,
    /// World changes applied each time.
    #[serde(default)]
    pub effects: Vec<Effect>,
    /// Narration shown each time.
    #[serde(default)]
    pub message: String,
}
