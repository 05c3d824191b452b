//! Bountyboard: community bounty board core.
//!
//! This crate models tasks that carry a point bounty through their
//! lifecycle (posted, claimed, completed, validated) and projects
//! contributor leaderboards and dashboards from the stored tasks.
//!
//! # Architecture
//!
//! Bountyboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, blob storage, identity)
//!
//! # Modules
//!
//! - [`bounty`]: Task lifecycle, pledging and contribution aggregation

pub mod bounty;
