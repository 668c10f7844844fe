//! Effect resolution and application.
//!
//! Effects name their targets. All of an event's effects are resolved to
//! ids first; only when every name resolves is anything applied.

use auriga_core::{
    CharacterId, CoreError, CoreResult, Effect, ExitId, ItemId, ItemLocation, LevelText, SpaceId,
    World,
};

/// An effect with every name replaced by an id.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedEffect {
    /// Set an item's visibility.
    ItemVisible(ItemId, bool),
    /// Set an item's lock.
    ItemLocked(ItemId, bool),
    /// Set an exit's lock.
    ExitLocked(ExitId, bool),
    /// Set an exit's visibility.
    ExitVisible(ExitId, bool),
    /// Replace a character's responses.
    Responses(CharacterId, LevelText),
    /// Move a character.
    MoveCharacter(CharacterId, SpaceId),
    /// Move an item, or remove it from play.
    Relocate(ItemId, Option<ItemLocation>),
    /// Spend player energy.
    Drain(u32),
    /// Halve player energy.
    Halve,
}

/// Resolve every effect, failing on the first unknown name.
pub fn resolve(effects: &[Effect], world: &World) -> CoreResult<Vec<ResolvedEffect>> {
    effects.iter().map(|e| resolve_one(e, world)).collect()
}

fn resolve_one(effect: &Effect, world: &World) -> CoreResult<ResolvedEffect> {
    let resolved = match effect {
        Effect::RevealItem { item } => ResolvedEffect::ItemVisible(item_id(world, item)?, true),
        Effect::HideItem { item } => ResolvedEffect::ItemVisible(item_id(world, item)?, false),
        Effect::UnlockItem { item } => ResolvedEffect::ItemLocked(item_id(world, item)?, false),
        Effect::LockItem { item } => ResolvedEffect::ItemLocked(item_id(world, item)?, true),
        Effect::UnlockExit { exit } => ResolvedEffect::ExitLocked(world.resolve_exit(exit)?, false),
        Effect::LockExit { exit } => ResolvedEffect::ExitLocked(world.resolve_exit(exit)?, true),
        Effect::RevealExit { exit } => ResolvedEffect::ExitVisible(world.resolve_exit(exit)?, true),
        Effect::HideExit { exit } => ResolvedEffect::ExitVisible(world.resolve_exit(exit)?, false),
        Effect::ReplaceResponses {
            character,
            responses,
        } => ResolvedEffect::Responses(character_id(world, character)?, responses.clone()),
        Effect::MoveCharacter { character, to } => {
            ResolvedEffect::MoveCharacter(character_id(world, character)?, space_id(world, to)?)
        }
        Effect::ConsumeItem { item } => ResolvedEffect::Relocate(item_id(world, item)?, None),
        Effect::PlaceItem { item, space } => ResolvedEffect::Relocate(
            item_id(world, item)?,
            Some(ItemLocation::Space(space_id(world, space)?)),
        ),
        Effect::DrainEnergy { amount } => ResolvedEffect::Drain(*amount),
        Effect::HalveEnergy => ResolvedEffect::Halve,
    };
    Ok(resolved)
}

/// Apply resolved effects in order.
pub fn apply(effects: Vec<ResolvedEffect>, world: &mut World) -> CoreResult<()> {
    for effect in effects {
        match effect {
            ResolvedEffect::ItemVisible(id, visible) => {
                world.item_mut(id).ok_or(CoreError::ItemNotFound(id))?.visible = visible;
            }
            ResolvedEffect::ItemLocked(id, locked) => {
                world.item_mut(id).ok_or(CoreError::ItemNotFound(id))?.locked = locked;
            }
            ResolvedEffect::ExitLocked(id, locked) => {
                world.exit_mut(id).ok_or(CoreError::ExitNotFound(id))?.locked = locked;
            }
            ResolvedEffect::ExitVisible(id, visible) => {
                world.exit_mut(id).ok_or(CoreError::ExitNotFound(id))?.visible = visible;
            }
            ResolvedEffect::Responses(id, responses) => {
                world
                    .character_mut(id)
                    .ok_or(CoreError::CharacterNotFound(id))?
                    .responses = responses;
            }
            ResolvedEffect::MoveCharacter(id, to) => world.move_character(id, to)?,
            ResolvedEffect::Relocate(id, to) => world.relocate_item(id, to)?,
            ResolvedEffect::Drain(amount) => world.player_mut().spend_energy(amount),
            ResolvedEffect::Halve => {
                let player = world.player_mut();
                player.energy /= 2;
            }
        }
    }
    Ok(())
}

fn item_id(world: &World, name: &str) -> CoreResult<ItemId> {
    world
        .find_item(name)
        .map(|i| i.id)
        .ok_or_else(|| CoreError::invalid_reference("item", name))
}

fn character_id(world: &World, name: &str) -> CoreResult<CharacterId> {
    world
        .find_character(name)
        .map(|c| c.id)
        .ok_or_else(|| CoreError::invalid_reference("character", name))
}

fn space_id(world: &World, name: &str) -> CoreResult<SpaceId> {
    world
        .find_space(name)
        .map(|s| s.id)
        .ok_or_else(|| CoreError::invalid_reference("space", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use auriga_core::{Direction, Exit, ExitRef, Item, Player, Space, WorldMeta};

    fn world() -> World {
        let lab = Space::new("Lab", "a lab");
        let hall = Space::new("Hall", "a hall");
        let (lab_id, hall_id) = (lab.id, hall.id);
        let mut world =
            World::new(WorldMeta::new("T"), Player::new("bot", lab_id).with_energy(40));
        world.add_space(lab).unwrap();
        world.add_space(hall).unwrap();
        world
            .add_item(Item::new("ssd", 1), ItemLocation::Player)
            .unwrap();
        world
            .add_item(Item::new("badge", 1).hidden(), ItemLocation::Space(lab_id))
            .unwrap();
        world
            .add_exit(
                lab_id,
                Exit::new("glass door", Direction::North, hall_id).hidden(),
            )
            .unwrap();
        world
    }

    fn glass_door() -> ExitRef {
        ExitRef {
            space: "Lab".into(),
            name: "glass door".into(),
            direction: None,
        }
    }

    #[test]
    fn applies_in_order() {
        let mut world = world();
        let effects = vec![
            Effect::ConsumeItem { item: "ssd".into() },
            Effect::RevealItem { item: "badge".into() },
            Effect::RevealExit { exit: glass_door() },
            Effect::HalveEnergy,
            Effect::DrainEnergy { amount: 5 },
        ];
        let resolved = resolve(&effects, &world).unwrap();
        apply(resolved, &mut world).unwrap();

        assert!(world.carried_items().is_empty());
        assert!(world.find_item("badge").unwrap().visible);
        assert!(world.exits().next().unwrap().visible);
        assert_eq!(world.player().energy, 15);
    }

    #[test]
    fn bad_reference_resolves_nothing() {
        let world = world();
        let effects = vec![
            Effect::RevealItem { item: "badge".into() },
            Effect::ConsumeItem { item: "ghost".into() },
        ];
        assert!(matches!(
            resolve(&effects, &world),
            Err(CoreError::InvalidReference { kind: "item", .. })
        ));
    }

    #[test]
    fn place_item_moves_from_bag() {
        let mut world = world();
        let effects = vec![Effect::PlaceItem {
            item: "ssd".into(),
            space: "Hall".into(),
        }];
        apply(resolve(&effects, &world).unwrap(), &mut world).unwrap();
        let hall = world.find_space("Hall").unwrap().id;
        assert_eq!(
            world.find_item("ssd").unwrap().location(),
            Some(ItemLocation::Space(hall))
        );
        assert!(world.player().items().is_empty());
    }
}
