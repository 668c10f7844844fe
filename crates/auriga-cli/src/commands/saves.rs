use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(root: &Path) -> Result<(), String> {
    let saves = auriga_core::list_saves(root).map_err(|e| e.to_string())?;

    if saves.is_empty() {
        println!("  No saved games in '{}'.", root.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "World", "Level", "Saved"]);

    for save in &saves {
        table.add_row(vec![
            save.name.clone(),
            save.title.clone(),
            save.level.to_string(),
            save.saved_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} saved games", saves.len());

    Ok(())
}
