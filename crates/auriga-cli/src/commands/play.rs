use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use auriga_core::{default_save_name, list_saves, load_game, save_dir, save_game};
use auriga_fiction::{FictionError, FictionSession, SessionConfig, TurnOutcome};

/// How a play session ended.
pub enum Ending {
    /// The player quit or input ran out.
    Quit,
    /// The battery ran dry.
    Exhausted,
}

pub fn run(world: Option<&Path>, load: Option<&str>, saves: &Path) -> Result<Ending, String> {
    let mut session = match load {
        Some(name) => {
            let world = save_dir(saves, name)
                .and_then(|dir| load_game(&dir))
                .map_err(|e| format!("failed to load '{name}': {e}"))?;
            FictionSession::new(world, SessionConfig::default())
        }
        None => FictionSession::new(super::build_world(world)?, SessionConfig::default()),
    };

    tracing::debug!(
        title = %session.world().meta.title,
        saves = %saves.display(),
        "session started"
    );

    let opening = if load.is_some() {
        session.describe_location()
    } else {
        session.introduction()
    };
    println!("{}\n", opening.map_err(|e| e.to_string())?);

    let stdin = io::stdin();
    let mut reader = stdin.lock();

    loop {
        let Some(input) = prompt(&mut reader, "> ")? else {
            break;
        };
        if input.is_empty() {
            continue;
        }

        match session.process(&input) {
            Ok(TurnOutcome::Narration(text)) => {
                println!("{text}\n");
                print_status(&session);
            }
            Ok(TurnOutcome::SaveRequested) => save(&mut reader, &session, saves)?,
            Ok(TurnOutcome::LoadRequested) => load_into(&mut reader, &mut session, saves)?,
            Ok(TurnOutcome::Quit(message)) => {
                println!("{message}");
                return Ok(Ending::Quit);
            }
            Err(FictionError::OutOfEnergy) => {
                println!("{}", FictionError::OutOfEnergy.to_string().red().bold());
                return Ok(Ending::Exhausted);
            }
            Err(e) => println!("{}\n", e.to_string().yellow()),
        }
    }

    Ok(Ending::Quit)
}

/// Print `label` and read one trimmed line. `None` at end of input.
fn prompt(reader: &mut impl BufRead, label: &str) -> Result<Option<String>, String> {
    print!("{label}");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(line.trim().to_string())),
        Err(e) => Err(e.to_string()),
    }
}

fn print_status(session: &FictionSession) {
    let player = session.world().player();
    let status = format!(
        "[energy {}/{} | level {}]",
        player.energy,
        player.max_energy,
        session.world().level()
    );
    println!("{}\n", status.dimmed());
}

fn save(reader: &mut impl BufRead, session: &FictionSession, root: &Path) -> Result<(), String> {
    let name = prompt(reader, "Save as (blank for a timestamp): ")?.unwrap_or_default();
    let name = if name.is_empty() {
        default_save_name()
    } else {
        name
    };

    match save_game(root, &name, session.world()) {
        Ok(_) => println!("Game saved as '{}'.\n", name.bold()),
        Err(e) => println!("{}\n", format!("Could not save: {e}").yellow()),
    }
    Ok(())
}

fn load_into(
    reader: &mut impl BufRead,
    session: &mut FictionSession,
    root: &Path,
) -> Result<(), String> {
    let saves = list_saves(root).map_err(|e| e.to_string())?;
    if saves.is_empty() {
        println!("{}\n", "There are no saved games.".yellow());
        return Ok(());
    }
    println!("Saved games:");
    for save in &saves {
        println!("  {} (level {})", save.name, save.level);
    }

    let name = prompt(reader, "Load which game? ")?.unwrap_or_default();
    if name.is_empty() {
        println!("Never mind.\n");
        return Ok(());
    }

    match save_dir(root, &name).and_then(|dir| load_game(&dir)) {
        Ok(world) => {
            session.replace_world(world);
            let here = session.describe_location().map_err(|e| e.to_string())?;
            println!("Loaded '{}'.\n\n{here}\n", name.bold());
        }
        Err(e) => println!("{}\n", format!("Could not load '{name}': {e}").yellow()),
    }
    Ok(())
}
