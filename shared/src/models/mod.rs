//! Data models
//!
//! Entity types owned by the front-desk entity store and consumed by the
//! presentation layer. All IDs are `String`; timestamps are Unix millis.

pub mod booking;
pub mod conversation;
pub mod feedback;
pub mod guest;
pub mod menu;
pub mod notification;
pub mod room;
pub mod section;
pub mod staff;
pub mod task;

// Re-exports
pub use booking::*;
pub use conversation::*;
pub use feedback::*;
pub use guest::*;
pub use menu::*;
pub use notification::*;
pub use room::*;
pub use section::*;
pub use staff::*;
pub use task::*;
