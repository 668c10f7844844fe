pub mod check;
pub mod play;
pub mod saves;

use std::path::Path;

use auriga_core::{World, WorldContent};

/// The factory world shipped with the binary.
const BUNDLED_WORLD: &str = include_str!("../../assets/auriga.json");

/// Read world content from `path`, or the bundled world when no path is given.
fn read_content(path: Option<&Path>) -> Result<WorldContent, String> {
    match path {
        Some(path) => WorldContent::from_file(path).map_err(|e| e.to_string()),
        None => WorldContent::from_json(BUNDLED_WORLD)
            .map_err(|e| format!("bundled world is broken: {e}")),
    }
}

/// Build a playable world from content.
fn build_world(path: Option<&Path>) -> Result<World, String> {
    read_content(path)?.build().map_err(|e| e.to_string())
}
