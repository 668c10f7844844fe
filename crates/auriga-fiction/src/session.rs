//! Interactive fiction session management.

use auriga_core::World;

use crate::config::SessionConfig;
use crate::error::{FictionError, FictionResult};
use crate::executor::Executor;
use crate::parser::{Action, ActionRequest, Vocabulary, interpret, lookup_verb, normalize, suggest_verb};
use crate::progression;

/// What a successful turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Text to show the player.
    Narration(String),
    /// The player asked to save; the front end picks the name.
    SaveRequested,
    /// The player asked to load; the front end picks the save.
    LoadRequested,
    /// The player quit.
    Quit(String),
}

/// An interactive fiction session.
pub struct FictionSession {
    world: World,
    config: SessionConfig,
    vocabulary: Vocabulary,
}

impl FictionSession {
    /// Create a session over `world`.
    pub fn new(world: World, config: SessionConfig) -> Self {
        let vocabulary = Vocabulary::from_world(&world);
        Self {
            world,
            config,
            vocabulary,
        }
    }

    /// Get the current world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a mutable reference to the world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The names this session recognizes.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Swap in another world, e.g. a loaded save.
    pub fn replace_world(&mut self, world: World) {
        self.vocabulary = Vocabulary::from_world(&world);
        self.world = world;
    }

    /// Consume the session, returning its world.
    pub fn into_world(self) -> World {
        self.world
    }

    /// Whether the player can still act.
    pub fn is_alive(&self) -> bool {
        self.world.player().alive
    }

    /// Title, intro and the opening location.
    pub fn introduction(&mut self) -> FictionResult<String> {
        let mut out = self.world.meta.title.clone();
        if !self.world.meta.intro.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.world.meta.intro);
        }
        out.push_str("\n\n");
        out.push_str(&self.describe_location()?);
        Ok(out)
    }

    /// Describe the player's space: the short text if visited, otherwise
    /// the long text for the current level, followed by exits, characters
    /// and items. Marks the space visited.
    pub fn describe_location(&mut self) -> FictionResult<String> {
        Executor::new(&mut self.world, &self.config).describe_location(false)
    }

    /// Process one line of player input.
    pub fn process(&mut self, input: &str) -> FictionResult<TurnOutcome> {
        if self.world.player().is_exhausted() {
            self.world.player_mut().alive = false;
            return Err(FictionError::OutOfEnergy);
        }

        let request = interpret(input, &self.vocabulary);
        if request.action == Some(Action::Help) {
            let topic = normalize(input).into_iter().nth(1);
            return Ok(TurnOutcome::Narration(Self::help(topic.as_deref())));
        }
        if !request.is_valid() {
            let suggestion = normalize(input)
                .first()
                .filter(|word| lookup_verb(word).is_none())
                .and_then(|word| suggest_verb(word))
                .map(str::to_string);
            return Err(FictionError::Unrecognized {
                input: input.trim().to_string(),
                suggestion,
            });
        }
        self.execute(&request)
    }

    /// Execute an interpreted request.
    pub fn execute(&mut self, request: &ActionRequest) -> FictionResult<TurnOutcome> {
        let Some(action) = request.action else {
            return Err(FictionError::Unrecognized {
                input: String::new(),
                suggestion: None,
            });
        };
        match action {
            Action::Help => Ok(TurnOutcome::Narration(Self::help(None))),
            Action::Save => Ok(TurnOutcome::SaveRequested),
            Action::Load => Ok(TurnOutcome::LoadRequested),
            Action::Quit => Ok(TurnOutcome::Quit("Goodbye!".to_string())),
            _ => {
                let mut executor = Executor::new(&mut self.world, &self.config);
                let mut text = executor.run(request)?;
                if action == Action::Go {
                    text.push_str("\n\n");
                    text.push_str(&executor.describe_location(false)?);
                }
                for message in progression::check_passive(&mut self.world) {
                    if !message.is_empty() {
                        text.push_str("\n\n");
                        text.push_str(&message);
                    }
                }
                Ok(TurnOutcome::Narration(text))
            }
        }
    }

    /// Help text, optionally for one topic.
    pub fn help(topic: Option<&str>) -> String {
        match topic {
            Some("movement" | "move" | "go") => "Movement\n\
                go <direction> - north, south, east, west, up, down (or n, s, e, w, u, d)\n\
                go <exit> - go through an exit, e.g. \"go through the air duct\"\n\
                Naming both picks the exit of that type in that direction."
                .to_string(),
            Some("items" | "item" | "take" | "drop") => "Items\n\
                take <item> / drop <item> - pick up or put down\n\
                inventory - list what you carry and the load\n\
                use <item> - use something you carry\n\
                push <item> / pull <item> - work something in the room"
                .to_string(),
            Some("talk" | "characters") => "Talking\n\
                talk to <character> - hear what they have to say\n\
                look at <character> - examine them"
                .to_string(),
            Some("energy" | "battery") => "Energy\n\
                Every action uses some battery. Moving costs the most.\n\
                wait / listen - regain a little\n\
                recharge - refill completely at a charger\n\
                When the battery is empty the game is over."
                .to_string(),
            Some("save" | "load" | "saving") => "Saving\n\
                save - save the game under a name you choose\n\
                load - continue a saved game"
                .to_string(),
            Some(other) => format!("No help available for '{other}'."),
            None => "Commands\n\
                north, south, east, west, up, down - move (or go <exit>)\n\
                look - describe your surroundings\n\
                look at <thing> - examine an item or character\n\
                take <item> / drop <item> - pick up or put down\n\
                use / push / pull <item> - interact\n\
                talk to <character> - talk\n\
                wait, listen, recharge - manage your battery\n\
                inventory - list what you carry\n\
                save, load, quit\n\n\
                Type 'help <topic>' for movement, items, talk, energy or save."
                .to_string(),
        }
    }
}
