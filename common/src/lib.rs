//! # mmcollect common
//!
//! Domain model and boundaries shared by every crate of the workspace.
//!
//! * **[`network`]**: interface, flow and remediation records.
//! * **[`ingest`]**: normalization of collected command output into line tables.
//! * **[`remote`]**: the port through which corrective commands reach a controller.
//! * **[`config`]**: run and connection settings.
//! * **[`error`]**: error types raised by the library crates.

pub mod config;
pub mod error;
pub mod ingest;
pub mod network;
pub mod remote;
