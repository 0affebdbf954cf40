//! Rendering surfaces and the head reconciler.
//!
//! This module provides access to the [`HeadSurface`](reinhardt_head_dom::HeadSurface)
//! abstraction over a live document, an in-memory implementation, and the
//! reconciler that applies a head state with minimal mutations.

pub use reinhardt_head_dom::*;
