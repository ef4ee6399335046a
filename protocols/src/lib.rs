//! Client for the controllers' REST API (`https://<controller>:4343/v1`).
//!
//! A [`Controller`] holds the HTTP client and credentials; a [`Session`] is
//! one logged-in token used to run show commands and post configuration
//! objects. `Session` implements
//! [`RemoteCommand`](mmcollect_common::remote::RemoteCommand).

pub mod controller;
pub mod error;
pub mod response;
pub mod session;

pub use controller::Controller;
pub use error::ApiError;
pub use session::Session;
