//! Interactive composition engine: live surface, logical scene cache and commands.

/// Document engine.
pub mod composer;
pub(crate) mod history;
/// Tickets for asynchronous bitmap loads.
pub mod loads;

pub use composer::{Composer, ComposerOpts, LayerKind};
pub use loads::{LoadKind, LoadOutcome, LoadTicket};
