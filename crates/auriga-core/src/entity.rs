use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{CharacterId, ExitId, ItemId, SpaceId};
use crate::level::LevelText;

/// The side of a space an exit leaves from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
    /// Up.
    Up,
    /// Down.
    Down,
}

impl Direction {
    /// Every direction, in display order.
    pub const ALL: [Direction; 6] = [
        Self::North,
        Self::East,
        Self::South,
        Self::West,
        Self::Up,
        Self::Down,
    ];

    /// Parse a canonical direction name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" => Some(Self::North),
            "south" => Some(Self::South),
            "east" => Some(Self::East),
            "west" => Some(Self::West),
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }

    /// Get the display name for this direction.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A location node in the world graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    /// Unique identifier.
    pub id: SpaceId,
    /// Display name, unique within a world.
    pub name: String,
    /// Shown when the space has already been visited.
    pub short_description: String,
    /// Full description per progression level.
    pub long_description: LevelText,
    /// Whether the full description has been shown since the last level change.
    pub visited: bool,
    pub(crate) items: Vec<ItemId>,
    pub(crate) characters: Vec<CharacterId>,
    pub(crate) exits: Vec<ExitId>,
}

impl Space {
    /// Create an empty, unvisited space.
    pub fn new(name: impl Into<String>, short_description: impl Into<String>) -> Self {
        Self {
            id: SpaceId::new(),
            name: name.into(),
            short_description: short_description.into(),
            long_description: LevelText::new(),
            visited: false,
            items: Vec::new(),
            characters: Vec::new(),
            exits: Vec::new(),
        }
    }

    /// Set the level-indexed long description.
    pub fn with_long_description(mut self, long_description: LevelText) -> Self {
        self.long_description = long_description;
        self
    }

    /// The description to show at `level`, honouring the visited flag.
    pub fn description_at(&self, level: u32) -> &str {
        if self.visited {
            return &self.short_description;
        }
        self.long_description_at(level)
    }

    /// The long description at `level`, falling back to the short one.
    pub fn long_description_at(&self, level: u32) -> &str {
        self.long_description
            .at(level)
            .unwrap_or(&self.short_description)
    }

    /// Items lying in this space, in arrival order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Characters present in this space.
    pub fn characters(&self) -> &[CharacterId] {
        &self.characters
    }

    /// Exits leaving this space.
    pub fn exits(&self) -> &[ExitId] {
        &self.exits
    }
}

/// A directed passage from one space to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exit {
    /// Unique identifier.
    pub id: ExitId,
    /// Exit type, e.g. "sliding door".
    pub name: String,
    /// Side of the owning space the exit is on.
    pub direction: Direction,
    /// Description shown in room listings.
    pub description: String,
    /// Locked exits need their unlock item to pass.
    pub locked: bool,
    /// Hidden exits are neither listed nor usable.
    pub visible: bool,
    /// Item that lets the player through while locked.
    pub unlock_item: Option<ItemId>,
    /// Where the exit leads.
    pub destination: SpaceId,
}

impl Exit {
    /// Create a visible, unlocked exit.
    pub fn new(name: impl Into<String>, direction: Direction, destination: SpaceId) -> Self {
        Self {
            id: ExitId::new(),
            name: name.into(),
            direction,
            description: String::new(),
            locked: false,
            visible: true,
            unlock_item: None,
            destination,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Lock the exit, optionally behind an item.
    pub fn locked_by(mut self, unlock_item: Option<ItemId>) -> Self {
        self.locked = true;
        self.unlock_item = unlock_item;
        self
    }

    /// Hide the exit.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Who currently holds an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "holder", content = "space", rename_all = "snake_case")]
pub enum ItemLocation {
    /// Lying in a space.
    Space(SpaceId),
    /// In the player's bag.
    Player,
}

/// A physical object that can be carried or interacted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    pub id: ItemId,
    /// Display name, unique within a world.
    pub name: String,
    /// Capacity consumed when carried.
    pub weight: u32,
    /// Text shown when looking at the item.
    pub description: String,
    /// Hidden items are not listed and cannot be resolved.
    pub visible: bool,
    /// Locked items are visible but cannot be taken.
    pub locked: bool,
    #[serde(skip)]
    pub(crate) location: Option<ItemLocation>,
}

impl Item {
    /// Create a visible, takeable item.
    pub fn new(name: impl Into<String>, weight: u32) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            weight,
            description: String::new(),
            visible: true,
            locked: false,
            location: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Hide the item until revealed.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Fix the item in place.
    pub fn fixed(mut self) -> Self {
        self.locked = true;
        self
    }

    /// The container currently holding this item, if any.
    pub fn location(&self) -> Option<ItemLocation> {
        self.location
    }
}

/// A non-player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Unique identifier.
    pub id: CharacterId,
    /// Display name, unique within a world.
    pub name: String,
    /// Text shown when looking at the character.
    pub description: String,
    /// What the character says, per progression level.
    pub responses: LevelText,
    #[serde(skip)]
    pub(crate) location: Option<SpaceId>,
}

impl Character {
    /// Create a character with no responses.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            description: description.into(),
            responses: LevelText::new(),
            location: None,
        }
    }

    /// Set the level-indexed responses.
    pub fn with_responses(mut self, responses: LevelText) -> Self {
        self.responses = responses;
        self
    }

    /// The response in effect at `level`.
    pub fn response_at(&self, level: u32) -> Option<&str> {
        self.responses.at(level)
    }

    /// The space the character is in.
    pub fn location(&self) -> Option<SpaceId> {
        self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parse_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::parse(dir.name()), Some(dir));
        }
        assert_eq!(Direction::parse("NORTH"), Some(Direction::North));
        assert_eq!(Direction::parse("n"), None);
    }

    #[test]
    fn space_description_respects_visited() {
        let mut space = Space::new("Lab", "a lab")
            .with_long_description(LevelText::new().with(0, "A long lab."));
        assert_eq!(space.description_at(0), "A long lab.");
        space.visited = true;
        assert_eq!(space.description_at(0), "a lab");
    }

    #[test]
    fn long_description_falls_back_to_short() {
        let space = Space::new("Closet", "a closet");
        assert_eq!(space.long_description_at(3), "a closet");
    }

    #[test]
    fn exit_builders() {
        let to = SpaceId::new();
        let key = ItemId::new();
        let exit = Exit::new("steel door", Direction::East, to)
            .with_description("a heavy steel door")
            .locked_by(Some(key))
            .hidden();
        assert!(exit.locked);
        assert!(!exit.visible);
        assert_eq!(exit.unlock_item, Some(key));
        assert_eq!(exit.destination, to);
    }

    #[test]
    fn item_location_is_not_serialized() {
        let mut item = Item::new("badge", 1);
        item.location = Some(ItemLocation::Player);
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("location"));
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back.location(), None);
    }
}
