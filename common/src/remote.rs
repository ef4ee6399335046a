//! # Remote Command Port
//!
//! The only way the pipeline acts on a controller. Implemented by the REST
//! session in `mmcollect-protocols`, and by scripted fakes in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::RemoteError;

/// Parameters of a remote command, sent as a flat JSON object.
pub type Payload = BTreeMap<String, String>;

#[async_trait]
pub trait RemoteCommand: Send + Sync {
    /// Runs `action` (e.g. `object/aaa_user_delete`) under `config_path`
    /// (e.g. `/md`) and waits for the controller's answer.
    ///
    /// Returns the response body on success.
    async fn execute(
        &self,
        config_path: &str,
        action: &str,
        payload: &Payload,
    ) -> Result<String, RemoteError>;
}
