//! Domain types for the assistant
//!
//! Core abstractions shared across the conversation controller, the model
//! client, and the tool registry.

mod message;
mod outcome;
mod tool;

pub use message::*;
pub use outcome::*;
pub use tool::*;
