//! # Network Model
//!
//! Records produced and consumed by the diagnosis pipeline.

pub mod device;
pub mod flow;
pub mod interface;
pub mod remediation;

pub use device::DeviceContext;
pub use flow::{ClassifiedFlow, FlowRecord};
pub use interface::{InterfaceRecord, NetworkRegistry};
pub use remediation::{Outcome, RemediationResult};
