//! The remote collection view controller.
//!
//! Keeps a paginated, filtered, periodically refreshed local view of the
//! job collection consistent with user-issued create/update/delete
//! operations, while tolerating network latency and failure. One
//! controller task owns the [`state::ViewState`] snapshot and publishes
//! it over a `watch` channel; presentation issues
//! [`controller::Command`]s and renders whatever it observes.

pub mod config;
pub mod controller;
pub mod mutation;
pub mod scheduler;
pub mod state;
