use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::config::Config;
use crate::error::SourceError;

/// One client shared by every source so connections are pooled across the fan-out.
pub fn build_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs.max(1)))
        .user_agent(config.user_agent.clone())
        .build()
}

/// Turns a non-2xx response into [SourceError::Status].
pub(crate) fn ensure_success(service: &'static str, response: Response) -> Result<Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(SourceError::Status {
            service,
            status: status.as_u16(),
        })
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
