//! HTTP client for the Kea Control Agent command API.
//!
//! Every command is a JSON POST to the agent's base URL:
//! `{"command": ..., "arguments": {...}, "service": ["dhcp4"]}`.

use super::response::CommandResponse;
use crate::config::Config;
use colored::Colorize;
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;

/// Service list used when a caller does not name one.
pub const DEFAULT_SERVICE: &[&str] = &["dhcp4"];

/// Something that can run a Kea command.
pub trait CommandApi {
    fn call(
        &self,
        command: &str,
        arguments: Option<&Value>,
        service: &[&str],
    ) -> Result<Vec<CommandResponse>, Box<dyn Error>>;
}

#[derive(Serialize, Debug)]
struct CommandRequest<'a> {
    command: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    arguments: Option<&'a Value>,
    service: &'a [&'a str],
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    url: Url,
    http: Client,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, Box<dyn Error>> {
        let normalized = format!("{}/", config.api_url.trim_end_matches('/'));
        let url = Url::parse(&normalized)
            .map_err(|e| format!("Invalid API URL {:?}: {e}", config.api_url))?;
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("kea-dhcp-summary/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("Error building HTTP client: {e}"))?;
        Ok(Self { url, http })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl CommandApi for ApiClient {
    fn call(
        &self,
        command: &str,
        arguments: Option<&Value>,
        service: &[&str],
    ) -> Result<Vec<CommandResponse>, Box<dyn Error>> {
        log::debug!(
            "call({command}) service={service:?} url={url}",
            command = command.on_blue(),
            url = self.url()
        );
        let body = CommandRequest {
            command,
            arguments,
            service,
        };

        let response = self
            .http
            .post(self.url().clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(&body)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| format!("{command} request failed: {e}"))?;

        let text = response
            .text()
            .map_err(|e| format!("{command} reading response body: {e}"))?;
        log::trace!("{command} response.len()={}", text.len());

        let responses = decode_responses(&text).map_err(|e| format!("{command}: {e}"))?;
        for (i, r) in responses.iter().enumerate() {
            if let Some(code) = r.result.filter(|c| *c != 0) {
                log::debug!(
                    "{command} item#{i} result={code} text={text:?}",
                    text = r.text.as_deref().unwrap_or("")
                );
            }
        }
        Ok(responses)
    }
}

/// Decode a command response body. A bare object counts as a one-item list.
pub fn decode_responses(text: &str) -> Result<Vec<CommandResponse>, Box<dyn Error>> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| format!("Error parsing response JSON: {e}"))?;
    let responses: Vec<CommandResponse> = match value {
        Value::Array(_) => serde_path_to_error::deserialize(value).map_err(|e| {
            format!(
                "Error decoding response: path={} error={}",
                e.path(),
                e.inner()
            )
        })?,
        Value::Object(_) => {
            let single: CommandResponse =
                serde_path_to_error::deserialize(value).map_err(|e| {
                    format!(
                        "Error decoding response: path={} error={}",
                        e.path(),
                        e.inner()
                    )
                })?;
            vec![single]
        }
        other => return Err(format!("Unexpected response type: {other}").into()),
    };
    Ok(responses)
}
