//! Head model, reducer and serializer module.
//!
//! This module provides access to the fragment declarations, the reducer that
//! merges them into one head state, and the server-side serializer.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_head::core::{FragmentDeclaration, HeadConfig, reduce, serialize};
//!
//! let config = HeadConfig::default();
//! let layout = FragmentDeclaration::new().title_template("%s | Site");
//! let page = FragmentDeclaration::new().title("Home");
//! let head = serialize(&reduce([&layout, &page], &config), &config);
//! assert!(head.title.to_string().contains("Home | Site"));
//! ```

#[cfg(feature = "core")]
pub use reinhardt_head_core::*;
