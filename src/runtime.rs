//! Instance registry, tick scheduling and the head manager.
//!
//! ## Modes
//!
//! - **Live**: the manager owns a surface and reconciles it once per tick
//! - **Static**: the manager accumulates declarations for one render pass and
//!   hands out the serialized head through `rewind`

pub use reinhardt_head_runtime::*;
