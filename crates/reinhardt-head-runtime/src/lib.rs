//! Runtime for reinhardt-head.
//!
//! Ties the pieces together for a running application:
//!
//! - [`InstanceRegistry`]: the mounted declarations in nesting order
//! - [`TickScheduler`]: batching of reconciliations per tick
//! - [`HeadManager`]: live or static consumption of the head state
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use reinhardt_head_core::prelude::*;
//! use reinhardt_head_dom::{HeadSurface, MemoryDocument};
//! use reinhardt_head_runtime::{HeadManager, ManualScheduler};
//!
//! let document = Rc::new(RefCell::new(MemoryDocument::new()));
//! let tick = ManualScheduler::new();
//! let mut manager = HeadManager::live(Rc::clone(&document), HeadConfig::default())
//!     .unwrap()
//!     .with_scheduler(tick.clone());
//!
//! manager.register(FragmentDeclaration::new().title("Layout")).unwrap();
//! manager.register(FragmentDeclaration::new().title("Page")).unwrap();
//! assert_eq!(tick.request_count(), 1);
//!
//! if tick.take() {
//!     manager.flush().unwrap();
//! }
//! assert_eq!(document.borrow().title(), "Page");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod manager;
pub mod registry;
pub mod scheduler;

pub use manager::HeadManager;
pub use registry::{InstanceId, InstanceRegistry};
pub use scheduler::{ManualScheduler, TickScheduler};
