//! Front-desk operations vocabulary
//!
//! - Commands: requests from staff terminals to mutate the entity store
//! - Domain events: closed set of facts that trigger dispatch fan-out
//! - Responses: outcome of a command, success or a coded error

pub mod command;
pub mod event;
pub mod types;

// Re-exports
pub use command::{OpsCommand, OpsCommandPayload};
pub use event::DomainEvent;
pub use types::*;
