//! Community bounty board core.
//!
//! Users post tasks carrying a point bounty, stack pledges onto open tasks,
//! claim work, submit proof and validate completed tasks. Every transition
//! is checked by the domain state machine and written back conditioned on
//! the task revision, so racing writers cannot silently overwrite each
//! other. Contributor statistics are projected from the stored tasks.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
