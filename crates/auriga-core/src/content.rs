//! The JSON authoring format for worlds.
//!
//! Content refers to everything by name. [`WorldContent::build`] resolves
//! names to ids and rejects unknown or duplicated ones, so a built world
//! never holds a dangling reference.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::{Character, Direction, Exit, Item, ItemLocation, Space};
use crate::error::{CoreError, CoreResult};
use crate::level::LevelText;
use crate::player::{DEFAULT_CAPACITY, DEFAULT_ENERGY, Player};
use crate::script::{Milestone, Reaction};
use crate::world::{Aliases, World, WorldMeta};

/// A complete world as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldContent {
    /// Game title.
    pub title: String,
    /// Introduction shown at the start of a new game.
    #[serde(default)]
    pub intro: String,
    /// The player character.
    pub player: PlayerContent,
    /// Spaces, in listing order.
    pub spaces: Vec<SpaceContent>,
    /// Exits; each is one-way.
    #[serde(default)]
    pub exits: Vec<ExitContent>,
    /// Items.
    #[serde(default)]
    pub items: Vec<ItemContent>,
    /// Non-player characters.
    #[serde(default)]
    pub characters: Vec<CharacterContent>,
    /// Alternative names.
    #[serde(default)]
    pub aliases: Aliases,
    /// One-shot milestones, in priority order.
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Repeatable reactions, in priority order.
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

/// The player as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerContent {
    /// Name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Name of the starting space.
    pub start: String,
    /// Carrying capacity.
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Starting and maximum energy.
    #[serde(default)]
    pub energy: Option<u32>,
    /// Names of items carried at the start.
    #[serde(default)]
    pub items: Vec<String>,
}

/// A space as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceContent {
    /// Unique name.
    pub name: String,
    /// Description for revisits.
    pub short: String,
    /// Full descriptions by level.
    #[serde(default)]
    pub long: LevelText,
}

/// An exit as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitContent {
    /// Space the exit leaves.
    pub from: String,
    /// Space the exit leads to.
    pub to: String,
    /// Exit type name.
    pub name: String,
    /// Side of `from` the exit is on.
    pub direction: Direction,
    /// Listing description.
    #[serde(default)]
    pub description: String,
    /// Starts locked.
    #[serde(default)]
    pub locked: bool,
    /// Starts visible.
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    /// Item that opens it while locked.
    #[serde(default)]
    pub unlock_item: Option<String>,
}

/// An item as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemContent {
    /// Unique name.
    pub name: String,
    /// Weight.
    #[serde(default)]
    pub weight: u32,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Starting space.
    #[serde(default)]
    pub at: Option<String>,
    /// Starts in the player's bag.
    #[serde(default)]
    pub carried: bool,
    /// Starts visible.
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    /// Starts fixed in place.
    #[serde(default)]
    pub locked: bool,
}

/// A character as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterContent {
    /// Unique name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Starting space.
    pub at: String,
    /// Responses by level.
    #[serde(default)]
    pub responses: LevelText,
}

fn visible_by_default() -> bool {
    true
}

impl WorldContent {
    /// Parse content from JSON text.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a content file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| CoreError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve every name and build the world.
    pub fn build(&self) -> CoreResult<World> {
        let spaces: Vec<Space> = self
            .spaces
            .iter()
            .map(|s| Space::new(&s.name, &s.short).with_long_description(s.long.clone()))
            .collect();
        let start = spaces
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(&self.player.start))
            .map(|s| s.id)
            .ok_or_else(|| CoreError::invalid_reference("space", &self.player.start))?;

        let mut player = Player::new(&self.player.name, start)
            .with_capacity(self.player.capacity.unwrap_or(DEFAULT_CAPACITY))
            .with_energy(self.player.energy.unwrap_or(DEFAULT_ENERGY));
        player.description = self.player.description.clone();

        let meta = WorldMeta {
            title: self.title.clone(),
            intro: self.intro.clone(),
        };
        let mut world = World::new(meta, player);
        for space in spaces {
            world.add_space(space)?;
        }

        let carried: HashSet<String> = self
            .player
            .items
            .iter()
            .map(|name| name.to_lowercase())
            .collect();
        for content in &self.items {
            let location = if content.carried || carried.contains(&content.name.to_lowercase()) {
                ItemLocation::Player
            } else {
                let at = content.at.as_deref().ok_or_else(|| {
                    CoreError::Validation(format!(
                        "item \"{}\" needs either \"at\" or \"carried\"",
                        content.name
                    ))
                })?;
                ItemLocation::Space(space_id(&world, at)?)
            };
            let mut item = Item::new(&content.name, content.weight)
                .with_description(&content.description);
            item.visible = content.visible;
            item.locked = content.locked;
            world.add_item(item, location)?;
        }
        for name in &self.player.items {
            if world.find_item(name).is_none() {
                return Err(CoreError::invalid_reference("item", name));
            }
        }

        for content in &self.characters {
            let at = space_id(&world, &content.at)?;
            let character = Character::new(&content.name, &content.description)
                .with_responses(content.responses.clone());
            world.add_character(character, at)?;
        }

        for content in &self.exits {
            let from = space_id(&world, &content.from)?;
            let to = space_id(&world, &content.to)?;
            let unlock_item = match &content.unlock_item {
                Some(name) => Some(
                    world
                        .find_item(name)
                        .map(|i| i.id)
                        .ok_or_else(|| CoreError::invalid_reference("item", name))?,
                ),
                None => None,
            };
            let mut exit =
                Exit::new(&content.name, content.direction, to).with_description(&content.description);
            exit.locked = content.locked;
            exit.visible = content.visible;
            exit.unlock_item = unlock_item;
            world.add_exit(from, exit)?;
        }

        self.check_aliases(&world)?;
        world.set_aliases(self.aliases.clone());
        world.set_script(self.milestones.clone(), self.reactions.clone());
        world.validate()?;

        tracing::debug!(
            title = %world.meta.title,
            spaces = world.space_count(),
            items = world.item_count(),
            "world built"
        );
        Ok(world)
    }

    fn check_aliases(&self, world: &World) -> CoreResult<()> {
        for target in self.aliases.exits.values() {
            if !world.exits().any(|e| e.name.eq_ignore_ascii_case(target)) {
                return Err(CoreError::invalid_reference("exit type", target));
            }
        }
        for target in self.aliases.items.values() {
            if world.find_item(target).is_none() {
                return Err(CoreError::invalid_reference("item", target));
            }
        }
        for target in self.aliases.characters.values() {
            if world.find_character(target).is_none() {
                return Err(CoreError::invalid_reference("character", target));
            }
        }
        Ok(())
    }
}

fn space_id(world: &World, name: &str) -> CoreResult<crate::id::SpaceId> {
    world
        .find_space(name)
        .map(|s| s.id)
        .ok_or_else(|| CoreError::invalid_reference("space", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "title": "Small",
        "intro": "Hello.",
        "player": { "name": "bot", "start": "Lab", "capacity": 10, "energy": 20, "items": ["badge"] },
        "spaces": [
            { "name": "Lab", "short": "the lab", "long": ["A bright lab.", "A dim lab."] },
            { "name": "Hall", "short": "the hall" }
        ],
        "exits": [
            { "from": "Lab", "to": "Hall", "name": "sliding door", "direction": "north",
              "locked": true, "unlock_item": "badge" },
            { "from": "Hall", "to": "Lab", "name": "sliding door", "direction": "south" }
        ],
        "items": [
            { "name": "badge", "weight": 1 },
            { "name": "lever", "at": "Lab", "locked": true },
            { "name": "chip", "weight": 2, "at": "Hall", "visible": false }
        ],
        "characters": [
            { "name": "PR2", "description": "a robot", "at": "Hall", "responses": { "0": "Beep." } }
        ],
        "aliases": { "items": { "card": "badge" }, "exits": { "door": "sliding door" } },
        "milestones": [
            { "name": "pulled", "trigger": { "on": "pull", "item": "lever" },
              "effects": [ { "kind": "reveal_item", "item": "chip" } ] }
        ]
    }"#;

    #[test]
    fn builds_small_world() {
        let world = WorldContent::from_json(SMALL).unwrap().build().unwrap();
        assert_eq!(world.meta.title, "Small");
        assert_eq!(world.space_count(), 2);
        assert_eq!(world.exit_count(), 2);
        assert_eq!(world.player().capacity, 10);
        assert_eq!(world.player().max_energy, 20);

        let badge = world.find_item("badge").unwrap();
        assert_eq!(badge.location(), Some(ItemLocation::Player));
        assert!(!world.find_item("chip").unwrap().visible);
        assert!(world.find_item("lever").unwrap().locked);

        let lab = world.find_space("lab").unwrap();
        let door = world.exits_from(lab.id)[0];
        assert!(door.locked);
        assert_eq!(door.unlock_item, Some(badge.id));
        assert_eq!(world.current_space().unwrap().id, lab.id);
        assert_eq!(world.progression().flags(), &[false]);
    }

    fn with(edit: impl FnOnce(&mut WorldContent)) -> CoreResult<World> {
        let mut content = WorldContent::from_json(SMALL).unwrap();
        edit(&mut content);
        content.build()
    }

    #[test]
    fn starting_bag_over_capacity_rejected() {
        let result = with(|c| c.player.capacity = Some(1));
        assert!(matches!(result, Err(CoreError::Validation(_))));

        let world = with(|c| c.player.capacity = Some(2)).unwrap();
        assert_eq!(world.carried_weight(), 1);
    }

    #[test]
    fn unknown_start_rejected() {
        let result = with(|c| c.player.start = "Moon".into());
        assert!(matches!(result, Err(CoreError::InvalidReference { kind: "space", .. })));
    }

    #[test]
    fn unknown_unlock_item_rejected() {
        let result = with(|c| c.exits[0].unlock_item = Some("key".into()));
        assert!(matches!(result, Err(CoreError::InvalidReference { kind: "item", .. })));
    }

    #[test]
    fn duplicate_item_rejected() {
        let result = with(|c| {
            let copy = c.items[1].clone();
            c.items.push(copy);
        });
        assert!(matches!(result, Err(CoreError::DuplicateName { kind: "item", .. })));
    }

    #[test]
    fn item_without_location_rejected() {
        let result = with(|c| c.items[1].at = None);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn alias_to_unknown_target_rejected() {
        let result = with(|c| {
            c.aliases.characters.insert("robot".into(), "R2".into());
        });
        assert!(matches!(
            result,
            Err(CoreError::InvalidReference { kind: "character", .. })
        ));
    }

    #[test]
    fn script_reference_rejected() {
        let result = with(|c| {
            c.milestones[0].trigger = crate::script::Trigger::Pull {
                item: Some("rope".into()),
            };
        });
        assert!(matches!(result, Err(CoreError::InvalidReference { kind: "item", .. })));
    }

    #[test]
    fn malformed_json_is_content_error() {
        assert!(matches!(
            WorldContent::from_json("{ \"title\": 3 }"),
            Err(CoreError::Content(_))
        ));
    }
}
