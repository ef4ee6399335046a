use std::time::Duration;

use mmcollect_common::config::ControllerConfig;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::response;
use crate::session::Session;

/// HTTPS port of the REST API.
pub const API_PORT: u16 = 4343;

/// Connection to one controller. Cheap to clone.
#[derive(Clone)]
pub struct Controller {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    address: String,
    username: String,
    password: String,
}

impl Controller {
    pub fn new(address: &str, cfg: &ControllerConfig) -> Result<Self, ApiError> {
        let base_url = format!("https://{address}:{API_PORT}/v1");
        Self::with_base_url(address, &base_url, cfg)
    }

    /// Same as [`Controller::new`] but against an explicit API root.
    pub fn with_base_url(address: &str, base_url: &str, cfg: &ControllerConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(cfg.timeout.max(Duration::from_secs(1)))
            .danger_accept_invalid_certs(!cfg.verify_tls)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            address: address.to_string(),
            username: cfg.username.clone(),
            password: cfg.password.clone(),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Logs in and returns a new session.
    pub async fn session(&self) -> Result<Session, ApiError> {
        let url = format!("{}/api/login", self.base_url);
        debug!("Logging in to {} as {}", self.address, self.username);

        let response = self
            .http
            .post(&url)
            .form(&[("username", self.username.as_str()), ("password", self.password.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.login_error());
        }

        let body: Value = response.json().await?;
        let token: String = response::login_token(&body).ok_or_else(|| self.login_error())?;

        Ok(Session::new(self.clone(), token))
    }

    fn login_error(&self) -> ApiError {
        ApiError::Login {
            controller: self.address.clone(),
            username: self.username.clone(),
        }
    }
}
