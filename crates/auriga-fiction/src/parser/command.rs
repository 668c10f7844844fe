//! Turning a line of input into an action request.

use auriga_core::Direction;

use super::normalize::normalize;
use super::verb::{Action, resolve_verb};
use super::vocabulary::Vocabulary;

/// Prepositions recognized for verb-sense refinement.
pub const PREPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "among", "around", "at", "before",
    "behind", "below", "beneath", "beside", "between", "by", "down", "during", "except", "for",
    "from", "front", "in", "inside", "instead", "into", "like", "near", "of", "off", "on", "onto",
    "out", "outside", "over", "past", "since", "through", "to", "top", "toward", "under",
    "underneath", "until", "up", "upon", "with", "within", "without",
];

/// A fully disambiguated request. An empty action means the input was not
/// understood.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRequest {
    /// The canonical action.
    pub action: Option<Action>,
    /// Exit type named for movement.
    pub exit: Option<String>,
    /// Direction named for movement.
    pub direction: Option<Direction>,
    /// Canonical item name.
    pub item: Option<String>,
    /// Canonical character name.
    pub character: Option<String>,
}

impl ActionRequest {
    /// A request for `action` with no objects.
    pub fn new(action: Action) -> Self {
        Self {
            action: Some(action),
            ..Self::default()
        }
    }

    /// Whether the input resolved to an action.
    pub fn is_valid(&self) -> bool {
        self.action.is_some()
    }
}

/// Refines a verb when a preposition is present and another is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SenseRule {
    /// The verb as resolved from the leading word.
    pub verb: Action,
    /// Preposition that must appear.
    pub requires: &'static str,
    /// Preposition that must not appear.
    pub forbids: Option<&'static str>,
    /// The verb to use instead.
    pub refined: Action,
}

/// Verb-sense rules, tried in order; the first match wins.
pub const SENSE_RULES: &[SenseRule] = &[SenseRule {
    verb: Action::Look,
    requires: "at",
    forbids: Some("around"),
    refined: Action::LookAt,
}];

/// Interpret one line of input.
pub fn interpret(line: &str, vocab: &Vocabulary) -> ActionRequest {
    let mut tokens = normalize(line);
    if tokens.is_empty() {
        return ActionRequest::default();
    }

    let request = match resolve_verb(&mut tokens) {
        None | Some(Action::Go) => movement(&tokens, vocab),
        Some(action) => {
            let found = prepositions(&tokens);
            ActionRequest {
                action: Some(refine(action, &found)),
                item: vocab.items.resolve(&tokens).map(str::to_string),
                character: vocab.characters.resolve(&tokens).map(str::to_string),
                ..ActionRequest::default()
            }
        }
    };
    tracing::debug!(input = line, request = ?request, "interpreted");
    request
}

fn movement(tokens: &[String], vocab: &Vocabulary) -> ActionRequest {
    let exit = vocab.exits.resolve(tokens).map(str::to_string);
    let direction = vocab.direction(tokens);
    if exit.is_none() && direction.is_none() {
        return ActionRequest::default();
    }
    ActionRequest {
        action: Some(Action::Go),
        exit,
        direction,
        ..ActionRequest::default()
    }
}

fn prepositions(tokens: &[String]) -> Vec<&str> {
    tokens
        .iter()
        .map(String::as_str)
        .filter(|word| PREPOSITIONS.contains(word))
        .collect()
}

fn refine(action: Action, prepositions: &[&str]) -> Action {
    SENSE_RULES
        .iter()
        .find(|rule| {
            rule.verb == action
                && prepositions.contains(&rule.requires)
                && rule.forbids.is_none_or(|p| !prepositions.contains(&p))
        })
        .map_or(action, |rule| rule.refined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::IdentityTable;
    use crate::parser::vocabulary::directions;

    fn vocab() -> Vocabulary {
        Vocabulary {
            exits: IdentityTable::new(
                ["sliding door", "air duct", "hallway"],
                [("vent", "air duct"), ("hall", "hallway")],
            ),
            items: IdentityTable::new(
                ["usb drive", "usb cord", "button", "ssd"],
                [("usb", "usb drive"), ("usb cable", "usb cord"), ("switch", "button")],
            ),
            characters: IdentityTable::new(["PR2", "Jim"], [("robot", "PR2")]),
            directions: directions(),
        }
    }

    fn request(line: &str) -> ActionRequest {
        interpret(line, &vocab())
    }

    #[test]
    fn bare_direction_moves() {
        let r = request("north");
        assert_eq!(r.action, Some(Action::Go));
        assert_eq!(r.direction, Some(Direction::North));
        assert_eq!(r.exit, None);
        assert_eq!(request("n").direction, Some(Direction::North));
    }

    #[test]
    fn go_through_exit_type() {
        let r = request("go through the vent");
        assert_eq!(r.action, Some(Action::Go));
        assert_eq!(r.exit.as_deref(), Some("air duct"));
        assert_eq!(r.direction, None);
    }

    #[test]
    fn exit_and_direction_both_kept() {
        let r = request("walk west down the hallway");
        assert_eq!(r.action, Some(Action::Go));
        assert_eq!(r.exit.as_deref(), Some("hallway"));
        assert_eq!(r.direction, Some(Direction::West));
    }

    #[test]
    fn movement_with_nothing_is_invalid() {
        assert!(!request("go").is_valid());
        assert!(!request("dance wildly").is_valid());
        assert!(!request("").is_valid());
        assert_eq!(request("go nowhere"), ActionRequest::default());
    }

    #[test]
    fn take_multi_word_alias() {
        let r = request("grab the usb cable");
        assert_eq!(r.action, Some(Action::Take));
        assert_eq!(r.item.as_deref(), Some("usb cord"));
    }

    #[test]
    fn look_at_refinement() {
        let r = request("look at the switch");
        assert_eq!(r.action, Some(Action::LookAt));
        assert_eq!(r.item.as_deref(), Some("button"));

        assert_eq!(request("look").action, Some(Action::Look));
        assert_eq!(request("look around at everything").action, Some(Action::Look));
        assert_eq!(request("inspect ssd").action, Some(Action::LookAt));
    }

    #[test]
    fn talk_resolves_character_alias() {
        let r = request("talk to the robot");
        assert_eq!(r.action, Some(Action::Talk));
        assert_eq!(r.character.as_deref(), Some("PR2"));
    }

    #[test]
    fn utility_verbs() {
        assert_eq!(request("inventory"), ActionRequest::new(Action::Inventory));
        assert_eq!(request("bye"), ActionRequest::new(Action::Quit));
        assert_eq!(request("SAVE").action, Some(Action::Save));
    }
}
