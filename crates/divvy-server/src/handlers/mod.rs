//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod bills;
pub mod health;
pub mod process;

// Re-export all handlers for use in router
pub use bills::*;
pub use health::*;
pub use process::*;
