//! Generic utility primitives with zero domain knowledge.
//!
//! - `expand` - `~` and environment expansion for user-supplied paths
//! - `io` - File I/O with consistent error handling

pub mod expand;
pub mod io;
