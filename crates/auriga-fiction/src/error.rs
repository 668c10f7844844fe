//! Error types for the fiction engine.

use auriga_core::{CoreError, Direction};
use thiserror::Error;

/// Result type for fiction operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors that can occur during a turn.
///
/// Everything except [`FictionError::Core`] and [`FictionError::OutOfEnergy`]
/// is ordinary player feedback: the turn is rejected and nothing changed.
#[derive(Debug, Error)]
pub enum FictionError {
    /// The input did not resolve to an action.
    #[error("I don't understand \"{input}\".{}", suggestion_hint(.suggestion))]
    Unrecognized {
        /// The raw input.
        input: String,
        /// A close known verb, if there is one.
        suggestion: Option<String>,
    },

    /// The request matched more than one thing.
    #[error("{0}")]
    Ambiguous(String),

    /// No usable exit in the requested direction or of the requested type.
    #[error("You can't go that way.")]
    InvalidDirection,

    /// The exit is locked and the player lacks the unlock item.
    #[error("The way {direction} through the {name} is locked.")]
    ExitLocked {
        /// Exit type.
        name: String,
        /// Side of the space.
        direction: Direction,
    },

    /// The item is not in the current space.
    #[error("There is no {0} here.")]
    ItemNotHere(String),

    /// The item is not in the bag.
    #[error("You aren't carrying the {0}.")]
    ItemNotCarried(String),

    /// The item is already in the bag.
    #[error("You already have the {0}.")]
    AlreadyCarried(String),

    /// The character is not in the current space.
    #[error("{0} isn't here.")]
    CharacterNotHere(String),

    /// Taking the item would exceed capacity.
    #[error("The {0} is too heavy to carry with everything else you have.")]
    TooHeavy(String),

    /// The item is fixed in place.
    #[error("The {0} won't budge.")]
    ItemLocked(String),

    /// Recharge requested without a charger present.
    #[error("There is nothing here to recharge from.")]
    NoCharger,

    /// The action needs an object that was not given.
    #[error("What do you want to {0}?")]
    MissingTarget(&'static str),

    /// The player has no energy left.
    #[error("Your battery is empty. You power down for good.")]
    OutOfEnergy,

    /// A world operation failed.
    #[error("world error: {0}")]
    Core(#[from] CoreError),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(verb) => format!(" Did you mean \"{verb}\"?"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_with_suggestion() {
        let err = FictionError::Unrecognized {
            input: "tkae ssd".into(),
            suggestion: Some("take".into()),
        };
        assert_eq!(
            err.to_string(),
            "I don't understand \"tkae ssd\". Did you mean \"take\"?"
        );
    }

    #[test]
    fn unrecognized_without_suggestion() {
        let err = FictionError::Unrecognized {
            input: "xyzzy".into(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "I don't understand \"xyzzy\".");
    }

    #[test]
    fn exit_locked_names_direction() {
        let err = FictionError::ExitLocked {
            name: "saloon doors".into(),
            direction: Direction::East,
        };
        assert_eq!(err.to_string(), "The way east through the saloon doors is locked.");
    }
}
