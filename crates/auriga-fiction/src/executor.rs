//! World-changing actions.
//!
//! Every action checks its preconditions before touching the world, so a
//! rejected action changes nothing and costs no energy.

use auriga_core::{Direction, Exit, Item, ItemLocation, ScriptVerb, World};

use crate::config::SessionConfig;
use crate::error::{FictionError, FictionResult};
use crate::parser::{Action, ActionRequest};
use crate::progression;

/// Runs one action against a world.
pub struct Executor<'a> {
    world: &'a mut World,
    config: &'a SessionConfig,
}

impl<'a> Executor<'a> {
    /// Create an executor over `world`.
    pub fn new(world: &'a mut World, config: &'a SessionConfig) -> Self {
        Self { world, config }
    }

    /// Perform the action in `request`.
    ///
    /// Session-level actions (help, save, load, quit) and invalid requests
    /// are not world actions and are rejected here.
    pub fn run(&mut self, request: &ActionRequest) -> FictionResult<String> {
        let item = request.item.as_deref();
        let character = request.character.as_deref();
        match request.action {
            Some(Action::Go) => self.go(request.direction, request.exit.as_deref()),
            Some(Action::Take) => self.take(item),
            Some(Action::Drop) => self.drop_item(item),
            Some(Action::Talk) => self.talk(character),
            Some(Action::Look) => self.look(),
            Some(Action::LookAt) => self.look_at(item, character),
            Some(Action::Use) => self.use_item(item),
            Some(Action::Push) => self.push(item),
            Some(Action::Pull) => self.pull(item),
            Some(Action::Listen) => Ok(self.listen()),
            Some(Action::Wait) => Ok(self.wait()),
            Some(Action::Recharge) => self.recharge(),
            Some(Action::Inventory) => Ok(self.inventory()),
            Some(Action::Help | Action::Save | Action::Load | Action::Quit) | None => {
                Err(FictionError::Unrecognized {
                    input: request.action.map(|a| a.to_string()).unwrap_or_default(),
                    suggestion: None,
                })
            }
        }
    }

    // -----------------------------------------------------------------------
    // Movement
    // -----------------------------------------------------------------------

    /// Move through the one visible exit matching `direction` and/or
    /// `exit_type`.
    ///
    /// When both are given the exit matching both wins; if none matches
    /// both but several match one, the player must be more specific.
    /// Describing the new space is left to the caller.
    pub fn go(&mut self, direction: Option<Direction>, exit_type: Option<&str>) -> FictionResult<String> {
        let here = self.world.player().location;
        let visible: Vec<&Exit> = self
            .world
            .exits_from(here)
            .into_iter()
            .filter(|e| e.visible)
            .collect();
        let same_type = |e: &&Exit| exit_type.is_some_and(|t| e.name.eq_ignore_ascii_case(t));
        let same_dir = |e: &&Exit| direction == Some(e.direction);

        let matches: Vec<&Exit> = match (direction, exit_type) {
            (None, None) => return Err(FictionError::InvalidDirection),
            (Some(_), Some(_)) => {
                let both: Vec<&Exit> = visible
                    .iter()
                    .copied()
                    .filter(|e| same_type(e) && same_dir(e))
                    .collect();
                if both.is_empty() {
                    let either: Vec<&Exit> = visible
                        .iter()
                        .copied()
                        .filter(|e| same_type(e) || same_dir(e))
                        .collect();
                    if either.is_empty() {
                        return Err(FictionError::InvalidDirection);
                    }
                    return Err(FictionError::Ambiguous(
                        "That exit isn't in that direction. Be more specific.".to_string(),
                    ));
                }
                both
            }
            (Some(_), None) => visible.iter().copied().filter(same_dir).collect(),
            (None, Some(_)) => visible.iter().copied().filter(same_type).collect(),
        };

        let exit = match matches.as_slice() {
            [] => return Err(FictionError::InvalidDirection),
            [exit] => *exit,
            [first, ..] => {
                let message = match direction {
                    Some(d) => format!("There is more than one way {d}. Which exit do you mean?"),
                    None => format!(
                        "There is more than one {} here. Which direction?",
                        first.name
                    ),
                };
                return Err(FictionError::Ambiguous(message));
            }
        };

        if exit.locked {
            let has_key = exit
                .unlock_item
                .is_some_and(|key| self.world.player().has_item(key));
            if !has_key {
                return Err(FictionError::ExitLocked {
                    name: exit.name.clone(),
                    direction: exit.direction,
                });
            }
        }

        let (id, destination) = (exit.id, exit.destination);
        let line = format!("You go {} through the {}.", exit.direction, exit.name);
        self.spend(self.config.costs.go);
        self.world.move_player(destination)?;
        tracing::debug!(exit = %id, to = %destination, "player moved");
        Ok(line)
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Pick up an item lying in the current space.
    pub fn take(&mut self, name: Option<&str>) -> FictionResult<String> {
        let item = self.named_item(name, "take")?;
        let here = self.world.player().location;
        match item.location() {
            Some(ItemLocation::Player) => return Err(FictionError::AlreadyCarried(item.name.clone())),
            Some(ItemLocation::Space(space)) if space == here && item.visible => {}
            _ => return Err(FictionError::ItemNotHere(item.name.clone())),
        }
        if item.locked {
            return Err(FictionError::ItemLocked(item.name.clone()));
        }
        let carried = self.world.carried_weight();
        if carried + u64::from(item.weight) >= u64::from(self.world.player().capacity) {
            return Err(FictionError::TooHeavy(item.name.clone()));
        }

        let (id, line) = (item.id, format!("You take the {}.", item.name));
        self.spend(self.config.costs.take);
        self.world.take_item(id)?;
        Ok(line)
    }

    /// Put down a carried item.
    pub fn drop_item(&mut self, name: Option<&str>) -> FictionResult<String> {
        let item = self.carried_item(name, "drop")?;
        let (id, line) = (item.id, format!("You drop the {}.", item.name));
        self.spend(self.config.costs.drop);
        self.world.drop_item(id)?;
        Ok(line)
    }

    /// List the bag.
    pub fn inventory(&mut self) -> String {
        self.spend(self.config.costs.inventory);
        let items = self.world.carried_items();
        if items.is_empty() {
            return "You are carrying nothing.".to_string();
        }
        let mut out = String::from("You are carrying:\n");
        for item in &items {
            out.push_str(&format!("  - {} (weight {})\n", item.name, item.weight));
        }
        out.push_str(&format!(
            "Load: {}/{}",
            self.world.carried_weight(),
            self.world.player().capacity
        ));
        out
    }

    // -----------------------------------------------------------------------
    // Looking and talking
    // -----------------------------------------------------------------------

    /// Describe the current space in full.
    pub fn look(&mut self) -> FictionResult<String> {
        self.spend(self.config.costs.look);
        self.describe_location(true)
    }

    /// Describe a visible item here or in the bag, or a character here.
    pub fn look_at(&mut self, item: Option<&str>, character: Option<&str>) -> FictionResult<String> {
        let text = match (item, character) {
            (Some(name), _) => {
                let item = self.named_item(Some(name), "look at")?;
                let here = self.world.player().location;
                let reachable = match item.location() {
                    Some(ItemLocation::Player) => true,
                    Some(ItemLocation::Space(space)) => space == here && item.visible,
                    None => false,
                };
                if !reachable {
                    return Err(FictionError::ItemNotHere(item.name.clone()));
                }
                describe_item(item)
            }
            (None, Some(name)) => {
                let here = self.world.player().location;
                let character = self
                    .world
                    .find_character(name)
                    .filter(|c| c.location() == Some(here))
                    .ok_or_else(|| FictionError::CharacterNotHere(name.to_string()))?;
                if character.description.is_empty() {
                    format!("You see nothing special about {}.", character.name)
                } else {
                    character.description.clone()
                }
            }
            (None, None) => return Err(FictionError::MissingTarget("look at")),
        };
        self.spend(self.config.costs.look_at);
        Ok(text)
    }

    /// Talk to a character in the current space.
    pub fn talk(&mut self, name: Option<&str>) -> FictionResult<String> {
        let name = name.ok_or(FictionError::MissingTarget("talk to"))?;
        let here = self.world.player().location;
        let level = self.world.level();
        let character = self
            .world
            .find_character(name)
            .filter(|c| c.location() == Some(here))
            .ok_or_else(|| FictionError::CharacterNotHere(name.to_string()))?;

        let line = match character.response_at(level) {
            Some(response) => format!("{}: \"{response}\"", character.name),
            None => format!("{} has nothing to say.", character.name),
        };
        self.spend(self.config.costs.talk);
        Ok(line)
    }

    // -----------------------------------------------------------------------
    // Interaction
    // -----------------------------------------------------------------------

    /// Use a carried item.
    pub fn use_item(&mut self, name: Option<&str>) -> FictionResult<String> {
        let item = self.carried_item(name, "use")?;
        let item_name = item.name.clone();
        self.interact(ScriptVerb::Use, &item_name, || {
            format!("You use the {item_name}, but nothing happens.")
        })
    }

    /// Push an item in the current space.
    pub fn push(&mut self, name: Option<&str>) -> FictionResult<String> {
        let item_name = self.item_here(name, "push")?;
        self.interact(ScriptVerb::Push, &item_name, || {
            format!("You push the {item_name}, and it makes you feel nice.")
        })
    }

    /// Pull an item in the current space.
    pub fn pull(&mut self, name: Option<&str>) -> FictionResult<String> {
        let item_name = self.item_here(name, "pull")?;
        self.interact(ScriptVerb::Pull, &item_name, || {
            format!("You pull the {item_name} and lose a little energy.")
        })
    }

    fn interact(
        &mut self,
        verb: ScriptVerb,
        item: &str,
        fallback: impl FnOnce() -> String,
    ) -> FictionResult<String> {
        self.spend(self.config.costs.interact);
        Ok(progression::dispatch(self.world, verb, item).unwrap_or_else(fallback))
    }

    // -----------------------------------------------------------------------
    // Energy
    // -----------------------------------------------------------------------

    /// Listen for a moment, regaining a little energy.
    pub fn listen(&mut self) -> String {
        self.world.player_mut().restore_energy(self.config.rest_gain);
        "You listen closely. Somewhere a cooling fan whirs.".to_string()
    }

    /// Rest for a moment, regaining a little energy.
    pub fn wait(&mut self) -> String {
        self.world.player_mut().restore_energy(self.config.rest_gain);
        "You power down your motors and rest for a moment.".to_string()
    }

    /// Refill energy from a charger in the current space.
    pub fn recharge(&mut self) -> FictionResult<String> {
        let here = self.world.player().location;
        let charger = self
            .world
            .find_item(&self.config.charger_item)
            .is_some_and(|c| c.visible && c.location() == Some(ItemLocation::Space(here)));
        if !charger {
            return Err(FictionError::NoCharger);
        }
        self.world.player_mut().recharge();
        Ok("You plug into the charger. Your battery is full again.".to_string())
    }

    // -----------------------------------------------------------------------
    // Descriptions
    // -----------------------------------------------------------------------

    /// Describe the current space and mark it visited.
    ///
    /// A visited space shows its short description unless `full` is set.
    pub fn describe_location(&mut self, full: bool) -> FictionResult<String> {
        let level = self.world.level();
        let space = self.world.current_space()?;
        let id = space.id;
        let text = if full {
            space.long_description_at(level)
        } else {
            space.description_at(level)
        };
        let mut out = format!("{}\n{}", space.name, text);

        let exits: Vec<&Exit> = self.world.exits_from(id).into_iter().filter(|e| e.visible).collect();
        if !exits.is_empty() {
            out.push_str("\n\nExits:");
            for exit in exits {
                out.push_str(&format!("\n  {}: {}", exit.direction, exit.name));
                if !exit.description.is_empty() {
                    out.push_str(&format!(" ({})", exit.description));
                }
            }
        }

        let characters = self.world.characters_in(id);
        if !characters.is_empty() {
            out.push('\n');
            for character in characters {
                out.push_str(&format!("\n{} is here.", character.name));
            }
        }

        let items: Vec<&str> = self
            .world
            .items_in(id)
            .into_iter()
            .filter(|i| i.visible)
            .map(|i| i.name.as_str())
            .collect();
        if !items.is_empty() {
            out.push_str(&format!("\n\nYou see: {}.", items.join(", ")));
        }

        if let Some(space) = self.world.space_mut(id) {
            space.visited = true;
        }
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn spend(&mut self, cost: u32) {
        self.world.player_mut().spend_energy(cost);
    }

    fn named_item(&self, name: Option<&str>, verb: &'static str) -> FictionResult<&Item> {
        let name = name.ok_or(FictionError::MissingTarget(verb))?;
        self.world
            .find_item(name)
            .ok_or_else(|| FictionError::ItemNotHere(name.to_string()))
    }

    fn carried_item(&self, name: Option<&str>, verb: &'static str) -> FictionResult<&Item> {
        let item = self.named_item(name, verb)?;
        if item.location() != Some(ItemLocation::Player) {
            return Err(FictionError::ItemNotCarried(item.name.clone()));
        }
        Ok(item)
    }

    fn item_here(&self, name: Option<&str>, verb: &'static str) -> FictionResult<String> {
        let item = self.named_item(name, verb)?;
        let here = self.world.player().location;
        if !item.visible || item.location() != Some(ItemLocation::Space(here)) {
            return Err(FictionError::ItemNotHere(item.name.clone()));
        }
        Ok(item.name.clone())
    }
}

fn describe_item(item: &Item) -> String {
    if item.description.is_empty() {
        format!("You see nothing special about the {}.", item.name)
    } else {
        item.description.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auriga_core::{LevelText, Player, Space, WorldMeta};

    fn depot(capacity: u32) -> World {
        let yard = Space::new("Yard", "a yard")
            .with_long_description(LevelText::new().with(0, "A gravel yard."));
        let shed = Space::new("Shed", "a shed")
            .with_long_description(LevelText::new().with(0, "A dusty shed."));
        let (yard_id, shed_id) = (yard.id, shed.id);
        let player = Player::new("bot", yard_id).with_capacity(capacity);
        let mut world = World::new(WorldMeta::new("Depot"), player);
        world.add_space(yard).unwrap();
        world.add_space(shed).unwrap();
        world
            .add_exit(yard_id, Exit::new("door", Direction::North, shed_id))
            .unwrap();
        world
            .add_item(Item::new("pebble", 1), ItemLocation::Space(yard_id))
            .unwrap();
        world
            .add_item(Item::new("boulder", u32::MAX), ItemLocation::Space(yard_id))
            .unwrap();
        world
    }

    #[test]
    fn huge_item_is_too_heavy() {
        let mut world = depot(u32::MAX);
        let config = SessionConfig::default();
        let mut executor = Executor::new(&mut world, &config);
        executor.take(Some("pebble")).unwrap();
        assert!(matches!(
            executor.take(Some("boulder")),
            Err(FictionError::TooHeavy(_))
        ));
        assert_eq!(world.carried_weight(), 1);
    }

    #[test]
    fn go_leaves_describing_to_the_caller() {
        let mut world = depot(50);
        let config = SessionConfig::default();
        let line = Executor::new(&mut world, &config)
            .go(Some(Direction::North), None)
            .unwrap();
        assert_eq!(line, "You go north through the door.");

        let shed = world.current_space().unwrap();
        assert_eq!(shed.name, "Shed");
        assert!(!shed.visited);
        assert_eq!(world.player().energy, 100 - config.costs.go);
    }
}
