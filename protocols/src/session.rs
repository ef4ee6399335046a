use async_trait::async_trait;
use mmcollect_common::error::RemoteError;
use mmcollect_common::remote::{Payload, RemoteCommand};
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};

use crate::controller::Controller;
use crate::error::ApiError;
use crate::response;

/// Configuration node show commands run under.
const SHOW_CONFIG_PATH: &str = "/mm";

/// A logged-in API token on one controller.
///
/// Close it with [`Session::close`]; dropping it leaves the token to expire
/// on the controller.
pub struct Session {
    controller: Controller,
    token: String,
}

impl Session {
    pub(crate) fn new(controller: Controller, token: String) -> Self {
        Self { controller, token }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Runs a CLI show command and returns its JSON output with normalized keys.
    pub async fn show(&self, command: &str) -> Result<Value, ApiError> {
        debug!("{}: {command}", self.controller.address());
        let request = self
            .request(Method::GET, SHOW_CONFIG_PATH, "showcommand")
            .query(&[("command", command)]);
        let body: Value = send_json(Method::GET, request).await?;
        Ok(response::normalize_keys(body))
    }

    /// Addresses of the controllers that this one (a conductor) reports as up.
    pub async fn switches(&self) -> Result<Vec<String>, ApiError> {
        let listing: Value = self.show("show switches").await?;
        response::switches_up(&listing)
    }

    /// Posts a configuration object and checks the controller accepted it.
    pub async fn post(&self, config_path: &str, endpoint: &str, payload: &Payload) -> Result<Value, ApiError> {
        let request = self.request(Method::POST, config_path, endpoint).json(payload);
        let body: Value = send_json(Method::POST, request).await?;
        response::check_global_result(&body)?;
        Ok(body)
    }

    /// Logs out. Failures are logged too, since callers tend to ignore them.
    pub async fn close(self) -> Result<(), ApiError> {
        let result = self.logout().await;
        if let Err(e) = &result {
            warn!("Error closing session to {}: {e}", self.controller.address());
        }
        result
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let url = format!("{}/api/logout", self.controller.base_url);
        let response = self
            .controller
            .http
            .get(&url)
            .query(&[("UIDARUBA", self.token.as_str())])
            .send()
            .await?;
        expect_ok("GET", "api/logout", &response)
    }

    fn request(&self, method: Method, config_path: &str, endpoint: &str) -> RequestBuilder {
        let endpoint: &str = endpoint.trim_start_matches('/');
        let url = format!("{}/configuration/{endpoint}", self.controller.base_url);
        self.controller
            .http
            .request(method, &url)
            .query(&[
                ("config_path", config_path),
                ("json", "1"),
                ("UIDARUBA", self.token.as_str()),
            ])
            .header(reqwest::header::COOKIE, format!("SESSION={}", self.token))
    }
}

async fn send_json(method: Method, request: RequestBuilder) -> Result<Value, ApiError> {
    let response: Response = request.send().await?;
    // Path only: the query string carries the session token
    expect_ok(method.as_str(), response.url().path(), &response)?;
    let body: Value = response.json().await?;
    Ok(body)
}

fn expect_ok(method: &str, path: &str, response: &Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(ApiError::Status {
        method: method.to_string(),
        url: path.to_string(),
        status: status.as_u16(),
    })
}

#[async_trait]
impl RemoteCommand for Session {
    async fn execute(&self, config_path: &str, action: &str, payload: &Payload) -> Result<String, RemoteError> {
        let body: Value = self.post(config_path, action, payload).await?;
        Ok(body.to_string())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
