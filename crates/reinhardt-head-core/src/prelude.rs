//! Convenience re-exports for common usage.
//!
//! ```
//! use reinhardt_head_core::prelude::*;
//!
//! let declaration = FragmentDeclaration::new().title("Home");
//! let state = reduce([&declaration], &HeadConfig::default());
//! assert_eq!(state.title, "Home");
//! ```

// Error types
pub use crate::error::{HeadError, HeadResult};

// Model
pub use crate::declaration::FragmentDeclaration;
pub use crate::descriptor::TagDescriptor;
pub use crate::state::{ClientStateCallback, HeadState, TagChanges};
pub use crate::tag::{Attributes, Tag, TagKind};

// Engine
pub use crate::config::HeadConfig;
pub use crate::reducer::reduce;
pub use crate::serializer::{SerializedHead, serialize};
