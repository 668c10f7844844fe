use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::entity::{Character, Exit, Item, ItemLocation, Space};
use crate::error::{CoreError, CoreResult};
use crate::id::{CharacterId, ExitId, ItemId, SpaceId};
use crate::player::Player;
use crate::progression::Progression;
use crate::script::{Condition, Effect, ExitRef, Milestone, Reaction, Trigger};

/// Metadata about the world itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldMeta {
    /// Title of the game.
    pub title: String,
    /// Text shown when a new game starts.
    #[serde(default)]
    pub intro: String,
}

impl WorldMeta {
    /// Create metadata with a title and no intro.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            intro: String::new(),
        }
    }
}

/// Alternative names mapped to canonical entity names, per identity space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aliases {
    /// Exit type aliases.
    #[serde(default)]
    pub exits: BTreeMap<String, String>,
    /// Item aliases.
    #[serde(default)]
    pub items: BTreeMap<String, String>,
    /// Character aliases.
    #[serde(default)]
    pub characters: BTreeMap<String, String>,
}

/// The world model: an arena of entities addressed by id.
///
/// Containment is stored twice: in the container's id list and in the
/// moved entity's location back-reference. Every transfer goes through a
/// method here so the two never disagree.
#[derive(Debug, Clone)]
pub struct World {
    /// World metadata.
    pub meta: WorldMeta,
    pub(crate) spaces: HashMap<SpaceId, Space>,
    pub(crate) exits: HashMap<ExitId, Exit>,
    pub(crate) items: HashMap<ItemId, Item>,
    pub(crate) characters: HashMap<CharacterId, Character>,
    pub(crate) player: Player,
    pub(crate) progression: Progression,
    pub(crate) milestones: Vec<Milestone>,
    pub(crate) reactions: Vec<Reaction>,
    pub(crate) aliases: Aliases,

    // Indexes
    pub(crate) space_order: Vec<SpaceId>,
    pub(crate) exit_order: Vec<ExitId>,
    pub(crate) item_order: Vec<ItemId>,
    pub(crate) character_order: Vec<CharacterId>,
    pub(crate) space_by_name: HashMap<String, SpaceId>,
    pub(crate) item_by_name: HashMap<String, ItemId>,
    pub(crate) character_by_name: HashMap<String, CharacterId>,
}

impl World {
    /// Create an empty world. The player's location must be added with
    /// [`World::add_space`] before the world is used.
    pub fn new(meta: WorldMeta, player: Player) -> Self {
        Self {
            meta,
            spaces: HashMap::new(),
            exits: HashMap::new(),
            items: HashMap::new(),
            characters: HashMap::new(),
            player,
            progression: Progression::default(),
            milestones: Vec::new(),
            reactions: Vec::new(),
            aliases: Aliases::default(),
            space_order: Vec::new(),
            exit_order: Vec::new(),
            item_order: Vec::new(),
            character_order: Vec::new(),
            space_by_name: HashMap::new(),
            item_by_name: HashMap::new(),
            character_by_name: HashMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Add a space. Its item, character and exit lists are ignored; use the
    /// other `add_*` methods to populate it.
    pub fn add_space(&mut self, mut space: Space) -> CoreResult<SpaceId> {
        let key = space.name.to_lowercase();
        if self.space_by_name.contains_key(&key) {
            return Err(CoreError::DuplicateName {
                kind: "space",
                name: space.name,
            });
        }
        space.items.clear();
        space.characters.clear();
        space.exits.clear();

        let id = space.id;
        self.space_by_name.insert(key, id);
        self.space_order.push(id);
        self.spaces.insert(id, space);
        Ok(id)
    }

    /// Add an exit leaving `from`.
    pub fn add_exit(&mut self, from: SpaceId, exit: Exit) -> CoreResult<ExitId> {
        if !self.spaces.contains_key(&exit.destination) {
            return Err(CoreError::SpaceNotFound(exit.destination));
        }
        if let Some(key) = exit.unlock_item {
            if !self.items.contains_key(&key) {
                return Err(CoreError::ItemNotFound(key));
            }
        }
        let space = self
            .spaces
            .get_mut(&from)
            .ok_or(CoreError::SpaceNotFound(from))?;

        let id = exit.id;
        space.exits.push(id);
        self.exit_order.push(id);
        self.exits.insert(id, exit);
        Ok(id)
    }

    /// Add an item to a space or to the player's bag.
    pub fn add_item(&mut self, mut item: Item, location: ItemLocation) -> CoreResult<ItemId> {
        let key = item.name.to_lowercase();
        if self.item_by_name.contains_key(&key) {
            return Err(CoreError::DuplicateName {
                kind: "item",
                name: item.name,
            });
        }
        if let ItemLocation::Space(space) = location {
            if !self.spaces.contains_key(&space) {
                return Err(CoreError::SpaceNotFound(space));
            }
        }

        let id = item.id;
        item.location = None;
        self.item_by_name.insert(key, id);
        self.item_order.push(id);
        self.items.insert(id, item);
        self.relocate_item(id, Some(location))?;
        Ok(id)
    }

    /// Add a character to a space.
    pub fn add_character(&mut self, mut character: Character, at: SpaceId) -> CoreResult<CharacterId> {
        let key = character.name.to_lowercase();
        if self.character_by_name.contains_key(&key) {
            return Err(CoreError::DuplicateName {
                kind: "character",
                name: character.name,
            });
        }
        let space = self
            .spaces
            .get_mut(&at)
            .ok_or(CoreError::SpaceNotFound(at))?;

        let id = character.id;
        space.characters.push(id);
        character.location = Some(at);
        self.character_by_name.insert(key, id);
        self.character_order.push(id);
        self.characters.insert(id, character);
        Ok(id)
    }

    /// Install the scripted events. Resets progression to level zero with one
    /// flag per milestone.
    pub fn set_script(&mut self, milestones: Vec<Milestone>, reactions: Vec<Reaction>) {
        self.progression = Progression::new(milestones.len());
        self.milestones = milestones;
        self.reactions = reactions;
    }

    /// Install the alias tables.
    pub fn set_aliases(&mut self, aliases: Aliases) {
        self.aliases = aliases;
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Get a space by ID.
    pub fn space(&self, id: SpaceId) -> Option<&Space> {
        self.spaces.get(&id)
    }

    /// Get a mutable space by ID.
    pub fn space_mut(&mut self, id: SpaceId) -> Option<&mut Space> {
        self.spaces.get_mut(&id)
    }

    /// Get an exit by ID.
    pub fn exit(&self, id: ExitId) -> Option<&Exit> {
        self.exits.get(&id)
    }

    /// Get a mutable exit by ID.
    pub fn exit_mut(&mut self, id: ExitId) -> Option<&mut Exit> {
        self.exits.get_mut(&id)
    }

    /// Get an item by ID.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Get a mutable item by ID.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    /// Get a character by ID.
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    /// Get a mutable character by ID.
    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    /// Find a space by name (case-insensitive).
    pub fn find_space(&self, name: &str) -> Option<&Space> {
        self.space_by_name
            .get(&name.to_lowercase())
            .and_then(|id| self.spaces.get(id))
    }

    /// Find an item by name (case-insensitive).
    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.item_by_name
            .get(&name.to_lowercase())
            .and_then(|id| self.items.get(id))
    }

    /// Find a character by name (case-insensitive).
    pub fn find_character(&self, name: &str) -> Option<&Character> {
        self.character_by_name
            .get(&name.to_lowercase())
            .and_then(|id| self.characters.get(id))
    }

    /// All spaces, in insertion order.
    pub fn spaces(&self) -> impl Iterator<Item = &Space> {
        self.space_order.iter().filter_map(|id| self.spaces.get(id))
    }

    /// All exits, in insertion order.
    pub fn exits(&self) -> impl Iterator<Item = &Exit> {
        self.exit_order.iter().filter_map(|id| self.exits.get(id))
    }

    /// All items, in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.item_order.iter().filter_map(|id| self.items.get(id))
    }

    /// All characters, in insertion order.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.character_order
            .iter()
            .filter_map(|id| self.characters.get(id))
    }

    /// Exits leaving a space.
    pub fn exits_from(&self, space: SpaceId) -> Vec<&Exit> {
        self.spaces
            .get(&space)
            .map(|s| s.exits.iter().filter_map(|id| self.exits.get(id)).collect())
            .unwrap_or_default()
    }

    /// Items lying in a space, hidden ones included.
    pub fn items_in(&self, space: SpaceId) -> Vec<&Item> {
        self.spaces
            .get(&space)
            .map(|s| s.items.iter().filter_map(|id| self.items.get(id)).collect())
            .unwrap_or_default()
    }

    /// Characters present in a space.
    pub fn characters_in(&self, space: SpaceId) -> Vec<&Character> {
        self.spaces
            .get(&space)
            .map(|s| {
                s.characters
                    .iter()
                    .filter_map(|id| self.characters.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Items in the player's bag.
    pub fn carried_items(&self) -> Vec<&Item> {
        self.player
            .bag
            .iter()
            .filter_map(|id| self.items.get(id))
            .collect()
    }

    /// Total weight of the player's bag.
    pub fn carried_weight(&self) -> u64 {
        self.carried_items()
            .iter()
            .map(|i| u64::from(i.weight))
            .sum()
    }

    /// Resolve an exit reference to an exit ID.
    pub fn resolve_exit(&self, exit: &ExitRef) -> CoreResult<ExitId> {
        let space = self
            .find_space(&exit.space)
            .ok_or_else(|| CoreError::invalid_reference("space", &exit.space))?;
        let matches: Vec<ExitId> = self
            .exits_from(space.id)
            .into_iter()
            .filter(|e| e.name.eq_ignore_ascii_case(&exit.name))
            .filter(|e| exit.direction.is_none_or(|d| d == e.direction))
            .map(|e| e.id)
            .collect();
        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(CoreError::invalid_reference(
                "exit",
                format!("{} in {}", exit.name, exit.space),
            )),
            _ => Err(CoreError::Validation(format!(
                "exit \"{}\" in \"{}\" is ambiguous; add a direction",
                exit.name, exit.space
            ))),
        }
    }

    // -----------------------------------------------------------------------
    // Player & progression
    // -----------------------------------------------------------------------

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The player, mutably.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// The space the player is in.
    pub fn current_space(&self) -> CoreResult<&Space> {
        let id = self.player.location;
        self.spaces.get(&id).ok_or(CoreError::SpaceNotFound(id))
    }

    /// Move the player to another space.
    pub fn move_player(&mut self, to: SpaceId) -> CoreResult<()> {
        if !self.spaces.contains_key(&to) {
            return Err(CoreError::SpaceNotFound(to));
        }
        self.player.location = to;
        Ok(())
    }

    /// The progression state.
    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    /// The progression state, mutably.
    pub fn progression_mut(&mut self) -> &mut Progression {
        &mut self.progression
    }

    /// The current progression level.
    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    /// Scripted milestones, in firing priority order.
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// Scripted reactions, in priority order.
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    /// Alias tables.
    pub fn aliases(&self) -> &Aliases {
        &self.aliases
    }

    /// Forget that any space was visited, so each shows its full
    /// description again.
    pub fn mark_all_unvisited(&mut self) {
        for space in self.spaces.values_mut() {
            space.visited = false;
        }
    }

    // -----------------------------------------------------------------------
    // Transfers
    // -----------------------------------------------------------------------

    /// Move an item to a new holder (or out of play with `None`).
    pub fn relocate_item(&mut self, id: ItemId, to: Option<ItemLocation>) -> CoreResult<()> {
        if let Some(ItemLocation::Space(space)) = to {
            if !self.spaces.contains_key(&space) {
                return Err(CoreError::SpaceNotFound(space));
            }
        }
        let from = {
            let item = self.items.get_mut(&id).ok_or(CoreError::ItemNotFound(id))?;
            std::mem::replace(&mut item.location, to)
        };

        match from {
            Some(ItemLocation::Space(space)) => {
                if let Some(space) = self.spaces.get_mut(&space) {
                    space.items.retain(|i| *i != id);
                }
            }
            Some(ItemLocation::Player) => self.player.bag.retain(|i| *i != id),
            None => {}
        }
        match to {
            Some(ItemLocation::Space(space)) => {
                if let Some(space) = self.spaces.get_mut(&space) {
                    space.items.push(id);
                }
            }
            Some(ItemLocation::Player) => self.player.bag.push(id),
            None => {}
        }
        Ok(())
    }

    /// Move an item into the player's bag.
    pub fn take_item(&mut self, id: ItemId) -> CoreResult<()> {
        self.relocate_item(id, Some(ItemLocation::Player))
    }

    /// Move an item from anywhere into the player's current space.
    pub fn drop_item(&mut self, id: ItemId) -> CoreResult<()> {
        let here = self.player.location;
        self.relocate_item(id, Some(ItemLocation::Space(here)))
    }

    /// Remove an item from play.
    pub fn consume_item(&mut self, id: ItemId) -> CoreResult<()> {
        self.relocate_item(id, None)
    }

    /// Move a character to another space.
    pub fn move_character(&mut self, id: CharacterId, to: SpaceId) -> CoreResult<()> {
        if !self.spaces.contains_key(&to) {
            return Err(CoreError::SpaceNotFound(to));
        }
        let from = {
            let character = self
                .characters
                .get_mut(&id)
                .ok_or(CoreError::CharacterNotFound(id))?;
            character.location.replace(to)
        };
        if let Some(from) = from.and_then(|s| self.spaces.get_mut(&s)) {
            from.characters.retain(|c| *c != id);
        }
        if let Some(space) = self.spaces.get_mut(&to) {
            space.characters.push(id);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Check every id reference and the containment invariant.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.spaces.contains_key(&self.player.location) {
            return Err(CoreError::SpaceNotFound(self.player.location));
        }

        let mut held: HashSet<ItemId> = HashSet::new();
        for item in &self.player.bag {
            self.check_holder(*item, Some(ItemLocation::Player), &mut held)?;
        }
        for space in self.spaces.values() {
            for item in &space.items {
                self.check_holder(*item, Some(ItemLocation::Space(space.id)), &mut held)?;
            }
            for character in &space.characters {
                let c = self
                    .characters
                    .get(character)
                    .ok_or(CoreError::CharacterNotFound(*character))?;
                if c.location != Some(space.id) {
                    return Err(CoreError::Validation(format!(
                        "character \"{}\" is listed in \"{}\" but located elsewhere",
                        c.name, space.name
                    )));
                }
            }
            for exit in &space.exits {
                let e = self.exits.get(exit).ok_or(CoreError::ExitNotFound(*exit))?;
                if !self.spaces.contains_key(&e.destination) {
                    return Err(CoreError::SpaceNotFound(e.destination));
                }
                if let Some(key) = e.unlock_item {
                    if !self.items.contains_key(&key) {
                        return Err(CoreError::ItemNotFound(key));
                    }
                }
            }
        }
        let carried = self.carried_weight();
        if !self.player.bag.is_empty() && carried >= u64::from(self.player.capacity) {
            return Err(CoreError::Validation(format!(
                "the bag weighs {carried} but capacity is {}",
                self.player.capacity
            )));
        }
        for item in self.items.values() {
            if item.location.is_some() && !held.contains(&item.id) {
                return Err(CoreError::Validation(format!(
                    "item \"{}\" has a location but no container holds it",
                    item.name
                )));
            }
        }
        self.validate_script()
    }

    fn check_holder(
        &self,
        id: ItemId,
        expected: Option<ItemLocation>,
        held: &mut HashSet<ItemId>,
    ) -> CoreResult<()> {
        let item = self.items.get(&id).ok_or(CoreError::ItemNotFound(id))?;
        if !held.insert(id) || item.location != expected {
            return Err(CoreError::Validation(format!(
                "item \"{}\" is held by more than one container",
                item.name
            )));
        }
        Ok(())
    }

    /// Check that every name used by milestones and reactions exists.
    pub fn validate_script(&self) -> CoreResult<()> {
        let mut names = HashSet::new();
        for milestone in &self.milestones {
            if !names.insert(milestone.name.to_lowercase()) {
                return Err(CoreError::DuplicateName {
                    kind: "milestone",
                    name: milestone.name.clone(),
                });
            }
        }

        let events = self
            .milestones
            .iter()
            .map(|m| (&m.trigger, &m.condition, &m.effects))
            .chain(
                self.reactions
                    .iter()
                    .map(|r| (&r.trigger, &r.condition, &r.effects)),
            );
        for (trigger, condition, effects) in events {
            self.check_trigger(trigger)?;
            self.check_condition(condition)?;
            for effect in effects {
                self.check_effect(effect)?;
            }
        }
        Ok(())
    }

    fn check_trigger(&self, trigger: &Trigger) -> CoreResult<()> {
        match trigger.item() {
            Some(item) => self.require_item(item),
            None => Ok(()),
        }
    }

    fn check_condition(&self, condition: &Condition) -> CoreResult<()> {
        match condition {
            Condition::PlayerAt { space } => self.require_space(space),
            Condition::Holding { item } | Condition::ItemHere { item } => self.require_item(item),
            Condition::CharacterHere { character } => self.require_character(character),
            Condition::MilestoneReached { milestone } => {
                if self
                    .milestones
                    .iter()
                    .any(|m| m.name.eq_ignore_ascii_case(milestone))
                {
                    Ok(())
                } else {
                    Err(CoreError::invalid_reference("milestone", milestone))
                }
            }
            Condition::Not { condition } => self.check_condition(condition),
            Condition::All { conditions } | Condition::Any { conditions } => conditions
                .iter()
                .try_for_each(|c| self.check_condition(c)),
            Condition::LevelAtLeast { .. } | Condition::Always => Ok(()),
        }
    }

    fn check_effect(&self, effect: &Effect) -> CoreResult<()> {
        match effect {
            Effect::RevealItem { item }
            | Effect::HideItem { item }
            | Effect::UnlockItem { item }
            | Effect::LockItem { item }
            | Effect::ConsumeItem { item } => self.require_item(item),
            Effect::UnlockExit { exit }
            | Effect::LockExit { exit }
            | Effect::RevealExit { exit }
            | Effect::HideExit { exit } => self.resolve_exit(exit).map(|_| ()),
            Effect::ReplaceResponses { character, .. } => self.require_character(character),
            Effect::MoveCharacter { character, to } => {
                self.require_character(character)?;
                self.require_space(to)
            }
            Effect::PlaceItem { item, space } => {
                self.require_item(item)?;
                self.require_space(space)
            }
            Effect::DrainEnergy { .. } | Effect::HalveEnergy => Ok(()),
        }
    }

    fn require_space(&self, name: &str) -> CoreResult<()> {
        self.find_space(name)
            .map(|_| ())
            .ok_or_else(|| CoreError::invalid_reference("space", name))
    }

    fn require_item(&self, name: &str) -> CoreResult<()> {
        self.find_item(name)
            .map(|_| ())
            .ok_or_else(|| CoreError::invalid_reference("item", name))
    }

    fn require_character(&self, name: &str) -> CoreResult<()> {
        self.find_character(name)
            .map(|_| ())
            .ok_or_else(|| CoreError::invalid_reference("character", name))
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Number of spaces.
    pub fn space_count(&self) -> usize {
        self.spaces.len()
    }

    /// Number of exits.
    pub fn exit_count(&self) -> usize {
        self.exits.len()
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of characters.
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }
}
