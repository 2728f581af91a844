//! HTTP client for the job collection resource.
//!
//! Wraps the paginated REST endpoint (`GET ?page=N`, `POST`, `PUT`,
//! `DELETE`) with typed requests. Transport failures, non-success
//! statuses, and malformed payloads stay distinct errors so callers can
//! tell "server unreachable" from "server returned garbage". The
//! [`CollectionClient`] trait is the seam the view controller consumes;
//! tests substitute an in-memory collection behind it.

pub mod api;

pub use api::{ClientError, CollectionClient, JobPage, JobsApi};
