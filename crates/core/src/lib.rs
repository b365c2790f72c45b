//! Domain logic for the Majlis membership platform.
//!
//! This crate holds everything that does not touch the database or the
//! network: the profile draft model, per-step validators, the wizard step
//! sequencer, the change tracker, and the entry-list reconciler. The `db`
//! and `api` crates build on these types.

pub mod auth;
pub mod choice;
pub mod draft;
pub mod entry;
pub mod error;
pub mod reconcile;
pub mod tracker;
pub mod types;
pub mod validate;
pub mod wizard;
