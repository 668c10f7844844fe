//! Command interpretation: normalization, verb and name resolution, and
//! disambiguation into an [`ActionRequest`].

mod command;
mod identity;
mod normalize;
mod verb;
mod vocabulary;

pub use command::{ActionRequest, PREPOSITIONS, SENSE_RULES, SenseRule, interpret};
pub use identity::{IdentityTable, resolve};
pub use normalize::{ARTICLES, normalize};
pub use verb::{Action, VERBS, lookup_verb, resolve_verb, suggest_verb};
pub use vocabulary::{DIRECTION_ALIASES, Vocabulary, directions};
