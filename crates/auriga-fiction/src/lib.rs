//! Interactive fiction engine for Auriga.
//!
//! Turns a line of player input into an action request, checks it against
//! the world, applies it, and fires any scripted milestones or reactions
//! it triggers. The front end only deals with [`FictionSession`].

/// Energy costs and session tuning.
pub mod config;
/// Error types for the fiction engine.
pub mod error;
/// World-changing actions.
pub mod executor;
/// Command parsing and name resolution.
pub mod parser;
/// Milestone and reaction dispatch.
pub mod progression;
/// Interactive fiction session management.
pub mod session;

pub use config::{EnergyCosts, SessionConfig};
pub use error::{FictionError, FictionResult};
pub use executor::Executor;
pub use parser::{Action, ActionRequest, Vocabulary, interpret};
pub use session::{FictionSession, TurnOutcome};
