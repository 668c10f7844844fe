//! Saving and loading worlds as a directory of JSON records.
//!
//! ```text
//! <root>/<name>/game.json
//! <root>/<name>/player.json
//! <root>/<name>/spaces/<id>.json
//! <root>/<name>/exits/<id>.json
//! <root>/<name>/items/<id>.json
//! <root>/<name>/characters/<id>.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::snapshot::{GameRecord, Snapshot};
use crate::world::World;

const GAME_FILE: &str = "game.json";
const PLAYER_FILE: &str = "player.json";
const SPACES_DIR: &str = "spaces";
const EXITS_DIR: &str = "exits";
const ITEMS_DIR: &str = "items";
const CHARACTERS_DIR: &str = "characters";

/// Summary of one saved game, for listings.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSummary {
    /// Save name (the directory name).
    pub name: String,
    /// Title of the saved world.
    pub title: String,
    /// Progression level at save time.
    pub level: u32,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
    /// The save directory.
    pub path: PathBuf,
}

/// A save name derived from the current time, e.g. `game_20240102T030405Z`.
pub fn default_save_name() -> String {
    format!("game_{}", Utc::now().format("%Y%m%dT%H%M%SZ"))
}

/// The directory of the save called `name` under `root`.
///
/// Names that could leave `root` are rejected.
pub fn save_dir(root: &Path, name: &str) -> CoreResult<PathBuf> {
    check_name(name)?;
    Ok(root.join(name))
}

/// Write `world` to `<root>/<name>`, replacing any save of that name.
pub fn save_game(root: &Path, name: &str, world: &World) -> CoreResult<PathBuf> {
    let dir = save_dir(root, name)?;
    let snapshot = world.to_snapshot();

    for sub in [SPACES_DIR, EXITS_DIR, ITEMS_DIR, CHARACTERS_DIR] {
        let path = dir.join(sub);
        if path.exists() {
            fs::remove_dir_all(&path).map_err(|source| CoreError::Io {
                path: path.clone(),
                source,
            })?;
        }
        create_dir(&path)?;
    }

    write_record(&dir.join(GAME_FILE), &snapshot.game)?;
    write_record(&dir.join(PLAYER_FILE), &snapshot.player)?;
    for space in &snapshot.spaces {
        write_record(&record_path(&dir, SPACES_DIR, space.id.0), space)?;
    }
    for exit in &snapshot.exits {
        write_record(&record_path(&dir, EXITS_DIR, exit.id.0), exit)?;
    }
    for item in &snapshot.items {
        write_record(&record_path(&dir, ITEMS_DIR, item.id.0), item)?;
    }
    for character in &snapshot.characters {
        write_record(&record_path(&dir, CHARACTERS_DIR, character.id.0), character)?;
    }

    tracing::info!(save = %dir.display(), level = snapshot.game.level, "game saved");
    Ok(dir)
}

/// Read a saved game directory back into a world.
pub fn load_game(dir: &Path) -> CoreResult<World> {
    let game: GameRecord = read_record(&dir.join(GAME_FILE))?;
    let player = read_record(&dir.join(PLAYER_FILE))?;
    let snapshot = Snapshot {
        game,
        player,
        spaces: read_records(&dir.join(SPACES_DIR))?,
        exits: read_records(&dir.join(EXITS_DIR))?,
        items: read_records(&dir.join(ITEMS_DIR))?,
        characters: read_records(&dir.join(CHARACTERS_DIR))?,
    };
    let world = World::from_snapshot(snapshot)?;
    tracing::info!(save = %dir.display(), level = world.level(), "game loaded");
    Ok(world)
}

/// Summaries of every save under `root`, newest first. A missing root has
/// no saves.
pub fn list_saves(root: &Path) -> CoreResult<Vec<SaveSummary>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(root).map_err(|source| CoreError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut saves = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CoreError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let game_file = path.join(GAME_FILE);
        if !game_file.is_file() {
            continue;
        }
        match read_record::<GameRecord>(&game_file) {
            Ok(game) => saves.push(SaveSummary {
                name: entry.file_name().to_string_lossy().into_owned(),
                title: game.title,
                level: game.level,
                saved_at: game.saved_at,
                path,
            }),
            Err(e) => tracing::warn!(error = %e, "skipping unreadable save"),
        }
    }
    saves.sort_by(|a, b| b.saved_at.cmp(&a.saved_at).then_with(|| a.name.cmp(&b.name)));
    Ok(saves)
}

fn check_name(name: &str) -> CoreResult<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if bad {
        return Err(CoreError::Validation(format!("invalid save name: \"{name}\"")));
    }
    Ok(())
}

fn record_path(dir: &Path, sub: &str, id: Uuid) -> PathBuf {
    dir.join(sub).join(format!("{id}.json"))
}

fn create_dir(path: &Path) -> CoreResult<()> {
    fs::create_dir_all(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_record<T: Serialize>(path: &Path, record: &T) -> CoreResult<()> {
    let json = serde_json::to_string_pretty(record).map_err(|source| CoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_record<T: DeserializeOwned>(path: &Path) -> CoreResult<T> {
    let text = fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_records<T: DeserializeOwned>(dir: &Path) -> CoreResult<Vec<T>> {
    let entries = fs::read_dir(dir).map_err(|source| CoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    paths.iter().map(|p| read_record(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Character, Direction, Exit, Item, ItemLocation, Space};
    use crate::player::Player;
    use crate::world::WorldMeta;

    fn sample() -> World {
        let lab = Space::new("Lab", "a lab");
        let hall = Space::new("Hall", "a hall");
        let (lab_id, hall_id) = (lab.id, hall.id);
        let mut world = World::new(WorldMeta::new("Test"), Player::new("bot", lab_id));
        world.add_space(lab).unwrap();
        world.add_space(hall).unwrap();
        world
            .add_item(Item::new("badge", 1), ItemLocation::Player)
            .unwrap();
        world
            .add_item(Item::new("wrench", 5), ItemLocation::Space(hall_id))
            .unwrap();
        world
            .add_exit(lab_id, Exit::new("door", Direction::North, hall_id))
            .unwrap();
        world
            .add_character(Character::new("PR2", "a robot"), lab_id)
            .unwrap();
        world
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let world = sample();
        let path = save_game(dir.path(), "first", &world).unwrap();
        assert!(path.join("game.json").is_file());
        assert!(path.join("player.json").is_file());
        assert_eq!(fs::read_dir(path.join("spaces")).unwrap().count(), 2);

        let back = load_game(&path).unwrap();
        assert_eq!(back.player().items(), world.player().items());
        for item in world.items() {
            assert_eq!(back.item(item.id).unwrap().location(), item.location());
        }
        assert_eq!(back.exit_count(), 1);
        assert_eq!(back.character_count(), 1);
    }

    #[test]
    fn resave_replaces_stale_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut world = sample();
        save_game(dir.path(), "slot", &world).unwrap();

        let wrench = world.find_item("wrench").unwrap().id;
        world.consume_item(wrench).unwrap();
        let path = save_game(dir.path(), "slot", &world).unwrap();

        let back = load_game(&path).unwrap();
        assert_eq!(back.item(wrench).unwrap().location(), None);
        assert_eq!(fs::read_dir(path.join("items")).unwrap().count(), 2);
    }

    #[test]
    fn list_saves_reads_summaries() {
        let dir = tempfile::tempdir().unwrap();
        let world = sample();
        save_game(dir.path(), "a", &world).unwrap();
        save_game(dir.path(), "b", &world).unwrap();
        fs::create_dir(dir.path().join("not-a-save")).unwrap();

        let saves = list_saves(dir.path()).unwrap();
        assert_eq!(saves.len(), 2);
        assert!(saves.iter().all(|s| s.title == "Test" && s.level == 0));
    }

    #[test]
    fn missing_root_has_no_saves() {
        let dir = tempfile::tempdir().unwrap();
        let saves = list_saves(&dir.path().join("nope")).unwrap();
        assert!(saves.is_empty());
    }

    #[test]
    fn rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        let world = sample();
        for name in ["", "..", "a/b"] {
            assert!(matches!(
                save_game(dir.path(), name, &world),
                Err(CoreError::Validation(_))
            ));
        }
    }

    #[test]
    fn save_dir_stays_under_root() {
        let root = Path::new("saves");
        assert_eq!(save_dir(root, "slot").unwrap(), root.join("slot"));
        for name in ["../x", "..", "a\\b", "/etc"] {
            assert!(matches!(
                save_dir(root, name),
                Err(CoreError::Validation(_))
            ));
        }
    }

    #[test]
    fn load_missing_save_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_game(&dir.path().join("ghost"));
        assert!(matches!(result, Err(CoreError::Io { .. })));
    }

    #[test]
    fn default_name_has_prefix() {
        assert!(default_save_name().starts_with("game_"));
    }
}
