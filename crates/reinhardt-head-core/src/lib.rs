//! Document head aggregation for the Reinhardt framework.
//!
//! Independent, nested components each declare the head content they need:
//! a title, meta and link tags, scripts, styles, a base URL and root element
//! attributes. This crate merges those *fragment declarations* into one
//! canonical, conflict-free [`HeadState`] and renders it as text.
//!
//! - **Tags**: [`Tag`] and [`TagKind`] model the managed head elements
//! - **Validation**: [`validator`] resolves the primary identity of a tag
//! - **Declarations**: [`FragmentDeclaration`] with a builder API and lenient JSON parsing
//! - **Reduction**: [`reduce`] merges declarations, innermost first in precedence
//! - **Serialization**: [`serialize`] renders a state for server-side output
//! - **Configuration**: [`HeadConfig`], loadable from TOML
//!
//! Applying a state to a live document lives in `reinhardt-head-dom`; the
//! instance registry and change notification live in `reinhardt-head-runtime`.
//!
//! # Quick Start
//!
//! ```
//! use reinhardt_head_core::prelude::*;
//!
//! let config = HeadConfig::default();
//! let layout = FragmentDeclaration::new()
//!     .title_template("%s | My Site")
//!     .default_title("My Site")
//!     .html_attribute("lang", "en")
//!     .meta(Tag::charset("utf-8"));
//! let page = FragmentDeclaration::new()
//!     .title("Blog")
//!     .meta(Tag::meta("description", "Latest posts"));
//!
//! let state = reduce([&layout, &page], &config);
//! assert_eq!(state.title, "Blog | My Site");
//! assert_eq!(state.meta.len(), 2);
//!
//! let head = serialize(&state, &config);
//! assert_eq!(head.html_attributes.to_string(), "lang=\"en\"");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod declaration;
pub mod descriptor;
pub mod error;
pub mod prelude;
pub mod reducer;
pub mod serializer;
pub mod state;
pub mod tag;
pub mod util;
pub mod validator;

// Re-export commonly used types at crate root
pub use config::{DEFAULT_MARKER_ATTRIBUTE, HeadConfig};
pub use declaration::FragmentDeclaration;
pub use descriptor::TagDescriptor;
pub use error::{HeadError, HeadResult};
pub use reducer::reduce;
pub use serializer::{SerializedHead, serialize};
pub use state::{ClientStateCallback, HeadState, TagChanges};
pub use tag::{Attributes, Tag, TagKind};
