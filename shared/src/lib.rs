//! Shared types for the front-desk workspace
//!
//! Entity models, the operations vocabulary (commands, domain events,
//! command responses) and small utilities used by the engine and by any
//! presentation layer that consumes it.

pub mod models;
pub mod ops;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use ops::{
    CommandError, CommandErrorCode, CommandResponse, DomainEvent, OpsCommand, OpsCommandPayload,
};
