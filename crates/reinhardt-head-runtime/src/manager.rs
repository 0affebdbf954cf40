//! Head manager: registry, mode switch and change notification.
//!
//! A [`HeadManager`] runs in one of two modes, chosen at construction:
//!
//! - **live** ([`HeadManager::live`]): a [`HeadSurface`] is attached. Every
//!   registry change recomputes the state and schedules a reconciliation.
//!   Deferred states are batched into one flush per tick; a state with
//!   `defer` switched off is applied immediately and replaces the pending
//!   flush.
//! - **static** ([`HeadManager::server`]): no surface. The state accumulates
//!   until [`HeadManager::rewind`] serializes and resets it, once per render
//!   pass.
//!
//! [`HeadManager::peek`] reads the current state in either mode.

use std::fmt;

use reinhardt_head_core::{
	FragmentDeclaration, HeadConfig, HeadError, HeadResult, HeadState, SerializedHead, reduce,
	serialize,
};
use reinhardt_head_dom::{HeadSurface, ReconcileReport, Reconciler};

use crate::registry::{InstanceId, InstanceRegistry};
use crate::scheduler::TickScheduler;

/// Owner of the registered declarations and of the resulting head state.
pub struct HeadManager {
	config: HeadConfig,
	registry: InstanceRegistry,
	state: HeadState,
	reconciler: Reconciler,
	surface: Option<Box<dyn HeadSurface>>,
	scheduler: Option<Box<dyn TickScheduler>>,
	flush_pending: bool,
	last_report: Option<ReconcileReport>,
}

impl HeadManager {
	/// Creates a manager applying changes to a live surface.
	///
	/// Fails with [`HeadError::InvalidConfig`] if `config` does not validate.
	pub fn live(surface: impl HeadSurface + 'static, config: HeadConfig) -> HeadResult<Self> {
		let mut manager = Self::server(config)?;
		manager.surface = Some(Box::new(surface));
		Ok(manager)
	}

	/// Creates a manager for rendering without a document.
	///
	/// Fails with [`HeadError::InvalidConfig`] if `config` does not validate.
	pub fn server(config: HeadConfig) -> HeadResult<Self> {
		config.validate()?;
		let state = reduce(std::iter::empty::<&FragmentDeclaration>(), &config);
		Ok(Self {
			reconciler: Reconciler::from_config(&config),
			config,
			registry: InstanceRegistry::new(),
			state,
			surface: None,
			scheduler: None,
			flush_pending: false,
			last_report: None,
		})
	}

	/// Sets the scheduler that requests flushes. Without one, the host calls
	/// [`HeadManager::flush`] itself.
	pub fn with_scheduler(mut self, scheduler: impl TickScheduler + 'static) -> Self {
		self.scheduler = Some(Box::new(scheduler));
		self
	}

	/// Returns `true` in live mode.
	pub fn can_use_dom(&self) -> bool {
		self.surface.is_some()
	}

	/// The active configuration.
	pub fn config(&self) -> &HeadConfig {
		&self.config
	}

	/// Registers a declaration as the innermost instance.
	///
	/// If an immediate reconciliation fails, the instance is removed again and
	/// the error is returned; the previous state is restored on the next flush.
	pub fn register(&mut self, declaration: FragmentDeclaration) -> HeadResult<InstanceId> {
		let id = self.registry.register(declaration);
		if let Err(error) = self.on_registry_change() {
			self.registry.unregister(id)?;
			self.state = reduce(self.registry.declarations(), &self.config);
			tracing::warn!(instance = %id, error = %error, "Rolled back head instance registration");
			return Err(error);
		}
		tracing::debug!(instance = %id, "Registered head instance");
		Ok(id)
	}

	/// Replaces the declaration of a registered instance.
	pub fn update(&mut self, id: InstanceId, declaration: FragmentDeclaration) -> HeadResult<()> {
		self.registry.update(id, declaration)?;
		self.on_registry_change()
	}

	/// Removes an instance. Its contribution disappears with the next
	/// reconciliation.
	pub fn unregister(&mut self, id: InstanceId) -> HeadResult<()> {
		self.registry.unregister(id)?;
		tracing::debug!(instance = %id, "Unregistered head instance");
		self.on_registry_change()
	}

	/// Number of registered instances.
	pub fn instance_count(&self) -> usize {
		self.registry.len()
	}

	/// Returns `true` if a deferred reconciliation is waiting for a flush.
	pub fn is_flush_pending(&self) -> bool {
		self.flush_pending
	}

	/// Runs the pending reconciliation, if any.
	///
	/// Returns the report of the pass, or `None` when nothing was pending. A
	/// failed pass stays pending and is requested again from the scheduler.
	pub fn flush(&mut self) -> HeadResult<Option<ReconcileReport>> {
		if !self.flush_pending {
			return Ok(None);
		}
		self.flush_pending = false;
		self.commit()
	}

	/// The current head state. Available in both modes and never consumes
	/// anything.
	pub fn peek(&self) -> &HeadState {
		&self.state
	}

	/// Serializes the accumulated state, then clears the registry and resets
	/// the state.
	///
	/// Only available without a surface; in live mode use
	/// [`HeadManager::peek`].
	pub fn rewind(&mut self) -> HeadResult<SerializedHead> {
		if self.can_use_dom() {
			return Err(HeadError::RewindInLiveMode);
		}
		let serialized = serialize(&self.state, &self.config);
		self.registry.clear();
		self.state = reduce(std::iter::empty::<&FragmentDeclaration>(), &self.config);
		Ok(serialized)
	}

	/// Report of the most recent reconciliation.
	pub fn applied_report(&self) -> Option<&ReconcileReport> {
		self.last_report.as_ref()
	}

	/// The attached surface, in live mode.
	pub fn surface(&self) -> Option<&dyn HeadSurface> {
		self.surface.as_deref()
	}

	fn on_registry_change(&mut self) -> HeadResult<()> {
		self.state = reduce(self.registry.declarations(), &self.config);
		if !self.can_use_dom() {
			return Ok(());
		}

		if self.state.defer {
			self.schedule_flush();
			return Ok(());
		}

		if self.flush_pending {
			self.flush_pending = false;
			if let Some(scheduler) = &self.scheduler {
				scheduler.cancel_flush();
			}
		}
		self.commit().map(|_| ())
	}

	fn schedule_flush(&mut self) {
		if self.flush_pending {
			return;
		}
		self.flush_pending = true;
		if let Some(scheduler) = &self.scheduler {
			scheduler.request_flush();
		}
		tracing::debug!("Scheduled head flush");
	}

	fn commit(&mut self) -> HeadResult<Option<ReconcileReport>> {
		let Some(surface) = self.surface.as_deref_mut() else {
			return Ok(None);
		};
		let report = match self.reconciler.apply(surface, &self.state) {
			Ok(report) => report,
			Err(error) => {
				tracing::warn!(error = %error, "Head reconciliation failed; retrying on the next flush");
				self.schedule_flush();
				return Err(error);
			}
		};

		if !report.is_empty()
			&& let Some(callback) = &self.state.on_change_client_state
		{
			callback(&self.state, &report.added, &report.removed);
		}

		self.last_report = Some(report.clone());
		Ok(Some(report))
	}
}

impl fmt::Debug for HeadManager {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HeadManager")
			.field("config", &self.config)
			.field("registry", &self.registry)
			.field("state", &self.state)
			.field("can_use_dom", &self.can_use_dom())
			.field("has_scheduler", &self.scheduler.is_some())
			.field("flush_pending", &self.flush_pending)
			.field("last_report", &self.last_report)
			.finish()
	}
}
