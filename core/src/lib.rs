//! The locality flow classifier and the deduplicated remediation engine.
//!
//! Stages run strictly in this order and each one returns a fresh value for
//! the next:
//!
//! 1. [`registry`]: interface lines to a [`NetworkRegistry`](mmcollect_common::network::NetworkRegistry).
//! 2. [`parser`]: session lines to flow records.
//! 3. [`classifier`]: locality verdict for each flow.
//! 4. [`collector`]: matched lines and the deduplicated affected addresses.
//! 5. [`dispatcher`]: one remote call per affected address, failures kept as data.
//! 6. [`report`]: matched lines followed by status lines.
//!
//! [`diagnosis::DiagnosisService`] chains them for one controller.

pub mod classifier;
pub mod collector;
pub mod diagnosis;
pub mod dispatcher;
pub mod parser;
pub mod registry;
pub mod report;
