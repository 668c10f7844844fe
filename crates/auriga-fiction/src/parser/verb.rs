//! Verb recognition.

use std::fmt;

use strsim::jaro_winkler;

/// Minimum similarity for a "did you mean" suggestion.
const SUGGEST_THRESHOLD: f64 = 0.85;

/// A canonical action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move through an exit.
    Go,
    /// Pick an item up.
    Take,
    /// Put an item down.
    Drop,
    /// Talk to a character.
    Talk,
    /// Describe the current space.
    Look,
    /// Describe an item or character.
    LookAt,
    /// Listen for a moment.
    Listen,
    /// Pull an item.
    Pull,
    /// Push an item.
    Push,
    /// Recharge from a charger.
    Recharge,
    /// Use a carried item.
    Use,
    /// Rest for a turn.
    Wait,
    /// Show help.
    Help,
    /// List the bag.
    Inventory,
    /// Save the game.
    Save,
    /// Load a saved game.
    Load,
    /// Quit.
    Quit,
}

impl Action {
    /// The canonical name of this action.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Take => "take",
            Self::Drop => "drop",
            Self::Talk => "talk",
            Self::Look => "look",
            Self::LookAt => "look at",
            Self::Listen => "listen",
            Self::Pull => "pull",
            Self::Push => "push",
            Self::Recharge => "recharge",
            Self::Use => "use",
            Self::Wait => "wait",
            Self::Help => "help",
            Self::Inventory => "inventory",
            Self::Save => "save",
            Self::Load => "load",
            Self::Quit => "quit",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every recognized leading word and the action it names.
pub const VERBS: &[(&str, Action)] = &[
    // drop
    ("drop", Action::Drop),
    ("deposit", Action::Drop),
    ("place", Action::Drop),
    ("put", Action::Drop),
    ("set", Action::Drop),
    ("throw", Action::Drop),
    // go
    ("go", Action::Go),
    ("move", Action::Go),
    ("walk", Action::Go),
    ("enter", Action::Go),
    ("leave", Action::Go),
    // listen
    ("listen", Action::Listen),
    ("hear", Action::Listen),
    ("ears", Action::Listen),
    // look
    ("look", Action::Look),
    ("view", Action::Look),
    ("check", Action::LookAt),
    ("inspect", Action::LookAt),
    ("examine", Action::LookAt),
    // pull
    ("pull", Action::Pull),
    ("tug", Action::Pull),
    ("yank", Action::Pull),
    // push
    ("push", Action::Push),
    ("press", Action::Push),
    ("lean", Action::Push),
    // recharge
    ("recharge", Action::Recharge),
    ("charge", Action::Recharge),
    ("power", Action::Recharge),
    ("plug", Action::Recharge),
    ("boost", Action::Recharge),
    ("reboost", Action::Recharge),
    ("restore", Action::Recharge),
    ("battery", Action::Recharge),
    ("energize", Action::Recharge),
    ("reenergize", Action::Recharge),
    ("re-energize", Action::Recharge),
    // take
    ("take", Action::Take),
    ("clutch", Action::Take),
    ("gather", Action::Take),
    ("grab", Action::Take),
    ("pick", Action::Take),
    ("pilfer", Action::Take),
    ("steal", Action::Take),
    // talk
    ("talk", Action::Talk),
    ("say", Action::Talk),
    ("speak", Action::Talk),
    ("tell", Action::Talk),
    // use
    ("use", Action::Use),
    ("utilize", Action::Use),
    // wait
    ("wait", Action::Wait),
    ("chill", Action::Wait),
    ("nap", Action::Wait),
    ("pause", Action::Wait),
    ("relax", Action::Wait),
    ("rest", Action::Wait),
    ("sleep", Action::Wait),
    // utilities
    ("help", Action::Help),
    ("h", Action::Help),
    ("?", Action::Help),
    ("inventory", Action::Inventory),
    ("list", Action::Inventory),
    ("i", Action::Inventory),
    ("loadgame", Action::Load),
    ("load", Action::Load),
    ("savegame", Action::Save),
    ("save", Action::Save),
    ("quit", Action::Quit),
    ("bye", Action::Quit),
    ("exit", Action::Quit),
];

/// Look a single word up in the verb table.
pub fn lookup_verb(word: &str) -> Option<Action> {
    VERBS
        .iter()
        .find(|(verb, _)| *verb == word)
        .map(|(_, action)| *action)
}

/// Resolve the leading token to an action, removing it on success.
pub fn resolve_verb(tokens: &mut Vec<String>) -> Option<Action> {
    let action = lookup_verb(tokens.first()?)?;
    tokens.remove(0);
    Some(action)
}

/// The known verb closest to `word`, if any is close enough.
pub fn suggest_verb(word: &str) -> Option<&'static str> {
    let word = word.to_lowercase();
    VERBS
        .iter()
        .map(|(verb, _)| (*verb, jaro_winkler(&word, verb)))
        .filter(|(_, score)| *score >= SUGGEST_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(verb, _)| verb)
}
