//! Scripted events: firing milestones and reactions against the world.

mod condition;
mod effect;

pub use condition::evaluate;
pub use effect::{ResolvedEffect, apply, resolve};

use auriga_core::{ScriptVerb, Trigger, World};

/// Run the scripted response to `verb` applied to `item`.
///
/// The first matching unfired milestone whose condition holds fires.
/// Otherwise the first matching reaction runs. Returns the narration, or
/// `None` when nothing is scripted for this interaction.
pub fn dispatch(world: &mut World, verb: ScriptVerb, item: &str) -> Option<String> {
    let candidates: Vec<usize> = world
        .milestones()
        .iter()
        .enumerate()
        .filter(|(i, m)| !world.progression().has_fired(*i) && m.trigger.matches(verb, item))
        .map(|(i, _)| i)
        .collect();
    for index in candidates {
        if let Some(message) = fire_milestone(world, index) {
            return Some(message);
        }
    }

    let reactions: Vec<usize> = world
        .reactions()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.trigger.matches(verb, item))
        .map(|(i, _)| i)
        .collect();
    reactions
        .into_iter()
        .find_map(|index| run_reaction(world, index))
}

/// Fire every passive milestone whose condition now holds, returning their
/// messages in order.
pub fn check_passive(world: &mut World) -> Vec<String> {
    let passive: Vec<usize> = world
        .milestones()
        .iter()
        .enumerate()
        .filter(|(_, m)| m.trigger == Trigger::Passive)
        .map(|(i, _)| i)
        .collect();
    let mut messages = Vec::new();
    for index in passive {
        if world.progression().has_fired(index) {
            continue;
        }
        if let Some(message) = fire_milestone(world, index) {
            messages.push(message);
        }
    }
    messages
}

fn fire_milestone(world: &mut World, index: usize) -> Option<String> {
    let milestone = world.milestones().get(index)?;
    if !evaluate(&milestone.condition, world) {
        return None;
    }
    let resolved = match resolve(&milestone.effects, world) {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::warn!(milestone = %milestone.name, error = %e, "milestone skipped");
            return None;
        }
    };
    let name = milestone.name.clone();
    let message = milestone.message.clone();

    world.progression_mut().fire(index);
    if let Err(e) = apply(resolved, world) {
        tracing::warn!(milestone = %name, error = %e, "milestone effect failed");
    }
    world.mark_all_unvisited();
    tracing::info!(milestone = %name, level = world.level(), "milestone reached");
    Some(message)
}

fn run_reaction(world: &mut World, index: usize) -> Option<String> {
    let reaction = world.reactions().get(index)?;
    if !evaluate(&reaction.condition, world) {
        return None;
    }
    let resolved = match resolve(&reaction.effects, world) {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::warn!(error = %e, "reaction skipped");
            return None;
        }
    };
    let message = reaction.message.clone();
    if let Err(e) = apply(resolved, world) {
        tracing::warn!(error = %e, "reaction effect failed");
    }
    tracing::debug!(reaction = index, "reaction ran");
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use auriga_core::{
        Condition, Direction, Effect, Exit, ExitRef, Item, ItemLocation, Milestone, Player,
        Reaction, Space, WorldMeta,
    };

    fn world() -> World {
        let lab = Space::new("Lab", "a lab");
        let hall = Space::new("Hall", "a hall");
        let (lab_id, hall_id) = (lab.id, hall.id);
        let mut world = World::new(WorldMeta::new("T"), Player::new("bot", lab_id));
        world.add_space(lab).unwrap();
        world.add_space(hall).unwrap();
        world
            .add_item(Item::new("button", 1).fixed(), ItemLocation::Space(lab_id))
            .unwrap();
        world
            .add_item(Item::new("usb drive", 1), ItemLocation::Space(lab_id))
            .unwrap();
        world
            .add_exit(
                lab_id,
                Exit::new("sliding door", Direction::North, hall_id).locked_by(None),
            )
            .unwrap();
        world.set_script(
            vec![
                Milestone {
                    name: "door".into(),
                    trigger: Trigger::Push {
                        item: Some("button".into()),
                    },
                    condition: Condition::PlayerAt { space: "Lab".into() },
                    effects: vec![Effect::UnlockExit {
                        exit: ExitRef {
                            space: "Lab".into(),
                            name: "sliding door".into(),
                            direction: None,
                        },
                    }],
                    message: "Click.".into(),
                },
                Milestone {
                    name: "upload".into(),
                    trigger: Trigger::Passive,
                    condition: Condition::Holding {
                        item: "usb drive".into(),
                    },
                    effects: vec![],
                    message: "Uploaded.".into(),
                },
            ],
            vec![Reaction {
                trigger: Trigger::Push { item: None },
                condition: Condition::Always,
                effects: vec![Effect::DrainEnergy { amount: 10 }],
                message: "Ouch.".into(),
            }],
        );
        world
    }

    #[test]
    fn milestone_fires_once() {
        let mut world = world();
        world.space_mut(world.player().location).unwrap().visited = true;

        let first = dispatch(&mut world, ScriptVerb::Push, "button");
        assert_eq!(first.as_deref(), Some("Click."));
        assert_eq!(world.level(), 1);
        assert!(!world.exits().next().unwrap().locked);
        assert!(world.spaces().all(|s| !s.visited));

        let second = dispatch(&mut world, ScriptVerb::Push, "button");
        assert_eq!(second.as_deref(), Some("Ouch."));
        assert_eq!(world.level(), 1);
        assert_eq!(world.player().energy, 90);
    }

    #[test]
    fn unmatched_interaction_is_unscripted() {
        let mut world = world();
        assert_eq!(dispatch(&mut world, ScriptVerb::Pull, "button"), None);
        assert_eq!(world.level(), 0);
    }

    #[test]
    fn passive_milestone_fires_when_condition_holds() {
        let mut world = world();
        assert!(check_passive(&mut world).is_empty());

        let usb = world.find_item("usb drive").unwrap().id;
        world.take_item(usb).unwrap();
        assert_eq!(check_passive(&mut world), ["Uploaded."]);
        assert_eq!(world.level(), 1);
        assert!(check_passive(&mut world).is_empty());
    }

    #[test]
    fn condition_guards_milestone() {
        let mut world = world();
        let hall = world.find_space("Hall").unwrap().id;
        world.move_player(hall).unwrap();
        // Falls through to the reaction.
        assert_eq!(
            dispatch(&mut world, ScriptVerb::Push, "button").as_deref(),
            Some("Ouch.")
        );
        assert_eq!(world.level(), 0);
    }
}
