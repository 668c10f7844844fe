//! The names a session can recognize.

use auriga_core::{Direction, World};

use super::identity::IdentityTable;

/// Shorthand direction words.
pub const DIRECTION_ALIASES: &[(&str, &str)] = &[
    ("n", "north"),
    ("e", "east"),
    ("s", "south"),
    ("w", "west"),
    ("u", "up"),
    ("d", "down"),
    ("above", "up"),
    ("below", "down"),
];

/// One identity table per kind of name.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Exit types.
    pub exits: IdentityTable,
    /// Items.
    pub items: IdentityTable,
    /// Characters.
    pub characters: IdentityTable,
    /// Directions.
    pub directions: IdentityTable,
}

impl Vocabulary {
    /// Collect every entity name and alias in the world.
    pub fn from_world(world: &World) -> Self {
        let mut exit_types: Vec<&str> = Vec::new();
        for exit in world.exits() {
            if !exit_types.iter().any(|t| t.eq_ignore_ascii_case(&exit.name)) {
                exit_types.push(&exit.name);
            }
        }
        let aliases = world.aliases();

        Self {
            exits: IdentityTable::new(exit_types, &aliases.exits),
            items: IdentityTable::new(world.items().map(|i| i.name.as_str()), &aliases.items),
            characters: IdentityTable::new(
                world.characters().map(|c| c.name.as_str()),
                &aliases.characters,
            ),
            directions: directions(),
        }
    }

    /// The direction named in `tokens`, if any.
    pub fn direction(&self, tokens: &[String]) -> Option<Direction> {
        self.directions.resolve(tokens).and_then(Direction::parse)
    }
}

/// The fixed direction table.
pub fn directions() -> IdentityTable {
    IdentityTable::new(
        Direction::ALL.iter().map(Direction::name),
        DIRECTION_ALIASES.iter().copied(),
    )
}
