//! Domain model and pure view logic for the jobdeck dashboard.
//!
//! Holds the job record types and draft validation, the text filter
//! engine, the pagination window, and the shared error taxonomy. This
//! crate has zero internal deps and performs no I/O so it can be used by
//! the HTTP client, the view controller, and any future tooling.

pub mod error;
pub mod filter;
pub mod job;
pub mod paging;
pub mod types;
