//! Live head reconciliation for reinhardt-head.
//!
//! This crate applies a [`HeadState`](reinhardt_head_core::HeadState) to a
//! live document with as few mutations as possible:
//!
//! - [`HeadSurface`]: the document operations the engine needs
//! - [`MemoryDocument`]: an in-memory surface with a mutation counter
//! - [`Reconciler`]: the diffing pass and its [`ReconcileReport`]
//!
//! Only nodes carrying the marker attribute are ever removed, so head content
//! rendered by other means coexists with managed content.
//!
//! # Example
//!
//! ```
//! use reinhardt_head_core::prelude::*;
//! use reinhardt_head_dom::{HeadSurface, MemoryDocument, Reconciler};
//!
//! let config = HeadConfig::default();
//! let page = FragmentDeclaration::new()
//!     .title("Home")
//!     .meta(Tag::meta("description", "Welcome"));
//! let state = reduce([&page], &config);
//!
//! let mut document = MemoryDocument::new();
//! let reconciler = Reconciler::from_config(&config);
//!
//! let report = reconciler.apply(&mut document, &state).unwrap();
//! assert!(report.title_changed);
//! assert_eq!(document.title(), "Home");
//!
//! // Nothing left to do the second time.
//! assert!(reconciler.apply(&mut document, &state).unwrap().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod memory;
pub mod reconciler;
pub mod surface;

pub use memory::MemoryDocument;
pub use reconciler::{ReconcileReport, Reconciler};
pub use surface::{ElementTarget, HeadSurface, NodeId};
