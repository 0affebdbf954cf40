//! # Reinhardt Head
//!
//! Document head management for Rust web applications.
//!
//! Any number of nested components declare the head elements they need
//! (title, `<meta>`, `<link>`, `<script>` and friends, plus attributes on the
//! root and title elements). Reinhardt Head merges those declarations so the
//! innermost one wins, removes duplicates by identity, and then either
//! serializes the result for server-side rendering or applies it to a live
//! document with as few mutations as possible.
//!
//! ## Feature Flags
//!
//! - `core` - Declarations, reducer, serializer and configuration
//! - `dom` - Rendering surfaces and the reconciler
//! - `runtime` - Instance registry, tick scheduling and the head manager
//! - `full` (default) - All of the above
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_head::prelude::*;
//!
//! let mut manager = HeadManager::server(HeadConfig::default()).unwrap();
//! manager
//!     .register(FragmentDeclaration::new().title_template("%s | Shop"))
//!     .unwrap();
//! manager
//!     .register(
//!         FragmentDeclaration::new()
//!             .title("Cart")
//!             .meta(Tag::meta("robots", "noindex")),
//!     )
//!     .unwrap();
//!
//! let head = manager.rewind().unwrap();
//! assert!(head.to_head_html().contains("Cart | Shop"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

#[cfg(feature = "core")]
pub mod core;
#[cfg(feature = "dom")]
pub mod dom;
#[cfg(feature = "runtime")]
pub mod runtime;

// Re-export core types
#[cfg(feature = "core")]
pub use reinhardt_head_core::{
	FragmentDeclaration, HeadConfig, HeadError, HeadResult, HeadState, SerializedHead, Tag,
	TagKind, reduce, serialize,
};

// Re-export reconciliation
#[cfg(feature = "dom")]
pub use reinhardt_head_dom::{HeadSurface, MemoryDocument, ReconcileReport, Reconciler};

// Re-export the manager
#[cfg(feature = "runtime")]
pub use reinhardt_head_runtime::{HeadManager, InstanceId, ManualScheduler, TickScheduler};

/// Prelude module for convenient imports
pub mod prelude {
	#[cfg(feature = "core")]
	pub use reinhardt_head_core::prelude::*;

	#[cfg(feature = "dom")]
	pub use crate::{HeadSurface, MemoryDocument, ReconcileReport, Reconciler};

	#[cfg(feature = "runtime")]
	pub use crate::{HeadManager, InstanceId, ManualScheduler, TickScheduler};
}
