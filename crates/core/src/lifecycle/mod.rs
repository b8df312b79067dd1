//! Configuration lifecycle for payroll configuration.
//!
//! Every approvable configuration kind shares one state machine:
//! drafts are created and edited, then approved or rejected exactly once.
//! Only drafts may be edited or deleted.
//!
//! # Modules
//!
//! - `types` - Lifecycle domain types (ConfigStatus, Decision, ConfigRecord)
//! - `error` - Lifecycle and storage error types
//! - `transition` - State transition logic
//! - `entity` - The trait each configuration kind implements
//! - `store` - Persistence collaborator interface
//! - `guard` - Deletion-eligibility guard
//! - `memory` - In-memory persistence collaborator
//! - `engine` - The generic engine tying the above together

pub mod engine;
pub mod entity;
pub mod error;
pub mod guard;
pub mod memory;
pub mod store;
pub mod transition;
pub mod types;

#[cfg(test)]
mod tests;
#[cfg(test)]
mod transition_props;

pub use engine::LifecycleEngine;
pub use entity::{ConfigEntity, ListOrder, NaturalKey};
pub use error::{LifecycleAction, LifecycleError, StoreError};
pub use guard::{PermissiveGuard, ReferenceGuard};
pub use memory::MemoryConfigStore;
pub use store::ConfigStore;
pub use transition::Transitions;
pub use types::{ActorId, ConfigRecord, ConfigStatus, Decision, EntityKind, ListFilter};
