//! Condition evaluation against the world.

use auriga_core::{Condition, ItemLocation, World};

/// Evaluate a condition. Names that do not resolve make their test false.
pub fn evaluate(condition: &Condition, world: &World) -> bool {
    let here = world.player().location;
    match condition {
        Condition::PlayerAt { space } => world.find_space(space).is_some_and(|s| s.id == here),
        Condition::Holding { item } => world
            .find_item(item)
            .is_some_and(|i| world.player().has_item(i.id)),
        Condition::ItemHere { item } => world
            .find_item(item)
            .is_some_and(|i| i.location() == Some(ItemLocation::Space(here))),
        Condition::CharacterHere { character } => world
            .find_character(character)
            .is_some_and(|c| c.location() == Some(here)),
        Condition::MilestoneReached { milestone } => world
            .milestones()
            .iter()
            .position(|m| m.name.eq_ignore_ascii_case(milestone))
            .is_some_and(|index| world.progression().has_fired(index)),
        Condition::LevelAtLeast { level } => world.level() >= *level,
        Condition::Not { condition } => !evaluate(condition, world),
        Condition::All { conditions } => conditions.iter().all(|c| evaluate(c, world)),
        Condition::Any { conditions } => conditions.iter().any(|c| evaluate(c, world)),
        Condition::Always => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auriga_core::{Character, Item, Milestone, Player, Space, Trigger, WorldMeta};

    fn world() -> World {
        let lab = Space::new("Lab", "a lab");
        let hall = Space::new("Hall", "a hall");
        let (lab_id, hall_id) = (lab.id, hall.id);
        let mut world = World::new(WorldMeta::new("T"), Player::new("bot", lab_id));
        world.add_space(lab).unwrap();
        world.add_space(hall).unwrap();
        world
            .add_item(Item::new("usb drive", 1), ItemLocation::Player)
            .unwrap();
        world
            .add_item(Item::new("lever", 1), ItemLocation::Space(lab_id))
            .unwrap();
        world
            .add_character(Character::new("Jim", "a robot"), hall_id)
            .unwrap();
        world.set_script(
            vec![Milestone {
                name: "first".into(),
                trigger: Trigger::Passive,
                condition: Condition::Always,
                effects: vec![],
                message: String::new(),
            }],
            vec![],
        );
        world
    }

    #[test]
    fn location_and_possession() {
        let world = world();
        assert!(evaluate(&Condition::PlayerAt { space: "lab".into() }, &world));
        assert!(!evaluate(&Condition::PlayerAt { space: "Hall".into() }, &world));
        assert!(evaluate(&Condition::Holding { item: "usb drive".into() }, &world));
        assert!(!evaluate(&Condition::Holding { item: "lever".into() }, &world));
        assert!(evaluate(&Condition::ItemHere { item: "lever".into() }, &world));
        assert!(!evaluate(&Condition::CharacterHere { character: "Jim".into() }, &world));
    }

    #[test]
    fn unknown_names_are_false() {
        let world = world();
        assert!(!evaluate(&Condition::Holding { item: "ghost".into() }, &world));
        assert!(!evaluate(
            &Condition::MilestoneReached { milestone: "nope".into() },
            &world
        ));
    }

    #[test]
    fn milestones_and_level() {
        let mut world = world();
        let reached = Condition::MilestoneReached { milestone: "first".into() };
        assert!(!evaluate(&reached, &world));
        world.progression_mut().fire(0);
        assert!(evaluate(&reached, &world));
        assert!(evaluate(&Condition::LevelAtLeast { level: 1 }, &world));
        assert!(!evaluate(&Condition::LevelAtLeast { level: 2 }, &world));
    }

    #[test]
    fn combinators() {
        let world = world();
        let yes = Condition::Always;
        let no = Condition::Not {
            condition: Box::new(Condition::Always),
        };
        assert!(!evaluate(&no, &world));
        assert!(evaluate(
            &Condition::Any {
                conditions: vec![no.clone(), yes.clone()]
            },
            &world
        ));
        assert!(!evaluate(
            &Condition::All {
                conditions: vec![yes, no]
            },
            &world
        ));
        assert!(evaluate(&Condition::All { conditions: vec![] }, &world));
    }
}
