//! A flat, serializable record set of a whole world.
//!
//! Back-references (item and character locations) are not stored; they are
//! rebuilt from the container lists when a snapshot is turned back into a
//! [`World`].

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Character, Exit, Item, ItemLocation, Space};
use crate::error::{CoreError, CoreResult};
use crate::id::{CharacterId, ExitId, ItemId, SpaceId};
use crate::player::Player;
use crate::progression::Progression;
use crate::script::{Milestone, Reaction};
use crate::world::{Aliases, World, WorldMeta};

/// Game-wide state that is not an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// World title.
    pub title: String,
    /// Introduction text.
    #[serde(default)]
    pub intro: String,
    /// Progression level.
    pub level: u32,
    /// One flag per milestone.
    pub flags: Vec<bool>,
    /// Scripted milestones.
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Scripted reactions.
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    /// Alias tables.
    #[serde(default)]
    pub aliases: Aliases,
    /// Space ids in listing order.
    #[serde(default)]
    pub space_order: Vec<SpaceId>,
    /// Exit ids in listing order.
    #[serde(default)]
    pub exit_order: Vec<ExitId>,
    /// Item ids in listing order.
    #[serde(default)]
    pub item_order: Vec<ItemId>,
    /// Character ids in listing order.
    #[serde(default)]
    pub character_order: Vec<CharacterId>,
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
}

/// Every record needed to rebuild a [`World`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Game-wide state.
    pub game: GameRecord,
    /// The player.
    pub player: Player,
    /// All spaces, with their containment lists.
    pub spaces: Vec<Space>,
    /// All exits.
    pub exits: Vec<Exit>,
    /// All items.
    pub items: Vec<Item>,
    /// All characters.
    pub characters: Vec<Character>,
}

impl World {
    /// Capture the full state of the world.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            game: GameRecord {
                title: self.meta.title.clone(),
                intro: self.meta.intro.clone(),
                level: self.progression.level(),
                flags: self.progression.flags().to_vec(),
                milestones: self.milestones.clone(),
                reactions: self.reactions.clone(),
                aliases: self.aliases.clone(),
                space_order: self.space_order.clone(),
                exit_order: self.exit_order.clone(),
                item_order: self.item_order.clone(),
                character_order: self.character_order.clone(),
                saved_at: Utc::now(),
            },
            player: self.player.clone(),
            spaces: self.spaces().cloned().collect(),
            exits: self.exits().cloned().collect(),
            items: self.items().cloned().collect(),
            characters: self.characters().cloned().collect(),
        }
    }

    /// Rebuild a world from a snapshot, re-linking back-references and
    /// checking every id.
    pub fn from_snapshot(snapshot: Snapshot) -> CoreResult<World> {
        let Snapshot {
            game,
            player,
            spaces,
            exits,
            items,
            characters,
        } = snapshot;

        let meta = WorldMeta {
            title: game.title,
            intro: game.intro,
        };
        let mut world = World::new(meta, player);
        world.progression = Progression::restore(game.level, game.flags);
        world.milestones = game.milestones;
        world.reactions = game.reactions;
        world.aliases = game.aliases;

        let mut spaces: HashMap<SpaceId, Space> = spaces.into_iter().map(|s| (s.id, s)).collect();
        let mut order: Vec<SpaceId> = game
            .space_order
            .into_iter()
            .filter(|id| spaces.contains_key(id))
            .collect();
        let listed: HashSet<SpaceId> = order.iter().copied().collect();
        let mut rest: Vec<&Space> = spaces.values().filter(|s| !listed.contains(&s.id)).collect();
        rest.sort_by(|a, b| a.name.cmp(&b.name));
        order.extend(rest.into_iter().map(|s| s.id));

        for id in order {
            let Some(space) = spaces.remove(&id) else {
                continue;
            };
            let key = space.name.to_lowercase();
            if world.space_by_name.insert(key, id).is_some() {
                return Err(CoreError::DuplicateName {
                    kind: "space",
                    name: space.name,
                });
            }
            world.space_order.push(id);
            world.spaces.insert(id, space);
        }

        let exits = in_order(exits, &game.exit_order, |e| e.id);
        let items = in_order(items, &game.item_order, |i| i.id);
        let characters = in_order(characters, &game.character_order, |c| c.id);

        for exit in exits {
            world.exit_order.push(exit.id);
            world.exits.insert(exit.id, exit);
        }
        for mut item in items {
            if world
                .item_by_name
                .insert(item.name.to_lowercase(), item.id)
                .is_some()
            {
                return Err(CoreError::DuplicateName {
                    kind: "item",
                    name: item.name,
                });
            }
            item.location = None;
            world.item_order.push(item.id);
            world.items.insert(item.id, item);
        }
        for mut character in characters {
            if world
                .character_by_name
                .insert(character.name.to_lowercase(), character.id)
                .is_some()
            {
                return Err(CoreError::DuplicateName {
                    kind: "character",
                    name: character.name,
                });
            }
            character.location = None;
            world.character_order.push(character.id);
            world.characters.insert(character.id, character);
        }

        world.relink()?;
        world.validate()?;
        Ok(world)
    }

    /// Set every back-reference from the container lists.
    fn relink(&mut self) -> CoreResult<()> {
        for item in &self.player.bag {
            let item = self
                .items
                .get_mut(item)
                .ok_or(CoreError::ItemNotFound(*item))?;
            item.location = Some(ItemLocation::Player);
        }
        for space in self.spaces.values() {
            for item in &space.items {
                let item = self
                    .items
                    .get_mut(item)
                    .ok_or(CoreError::ItemNotFound(*item))?;
                if item.location.is_some() {
                    return Err(CoreError::Validation(format!(
                        "item \"{}\" is held by more than one container",
                        item.name
                    )));
                }
                item.location = Some(ItemLocation::Space(space.id));
            }
            for character in &space.characters {
                let character = self
                    .characters
                    .get_mut(character)
                    .ok_or(CoreError::CharacterNotFound(*character))?;
                if character.location.is_some() {
                    return Err(CoreError::Validation(format!(
                        "character \"{}\" is in more than one space",
                        character.name
                    )));
                }
                character.location = Some(space.id);
            }
        }
        Ok(())
    }
}

/// Sort records into a saved listing order. Records missing from `order`
/// keep their relative order at the end.
fn in_order<T, K: Eq + Hash>(mut records: Vec<T>, order: &[K], key: impl Fn(&T) -> K) -> Vec<T> {
    let rank: HashMap<&K, usize> = order.iter().enumerate().map(|(i, k)| (k, i)).collect();
    records.sort_by_key(|r| rank.get(&key(r)).copied().unwrap_or(usize::MAX));
    records
}
