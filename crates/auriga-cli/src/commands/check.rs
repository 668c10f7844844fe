use std::path::Path;

pub fn run(file: &Path) -> Result<(), String> {
    let world = super::build_world(Some(file))?;

    println!("  All checks passed for '{}'.", world.meta.title);
    println!(
        "  {} spaces, {} exits, {} items, {} characters",
        world.space_count(),
        world.exit_count(),
        world.item_count(),
        world.character_count()
    );
    println!(
        "  {} milestones, {} reactions",
        world.milestones().len(),
        world.reactions().len()
    );

    Ok(())
}
