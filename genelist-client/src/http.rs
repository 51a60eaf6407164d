use std::io::Read;
use std::time::Duration;

use log::debug;
use ureq::{Agent, Error as UreqError};

use genelist_core::errors::TransportError;

///
/// Build an agent whose every request is bounded by `timeout`.
///
pub fn build_agent(timeout: Duration) -> Agent {
    let config = Agent::config_builder()
        .timeout_global(Some(timeout))
        .build();
    Agent::new_with_config(config)
}

///
/// Fetch a url and return its body as text.
///
/// Non-success statuses are [TransportError::Status]; timeouts and connection
/// failures are [TransportError::Unreachable].
///
pub fn get_text(agent: &Agent, url: &str) -> Result<String, TransportError> {
    debug!("GET {}", url);

    let response = match agent.get(url).call() {
        Ok(resp) => resp,
        Err(UreqError::StatusCode(code)) => {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: code,
            });
        }
        Err(e) => {
            return Err(TransportError::Unreachable {
                url: url.to_string(),
                reason: e.to_string(),
            });
        }
    };

    let mut text = String::new();
    response
        .into_body()
        .into_reader()
        .read_to_string(&mut text)
        .map_err(|e| TransportError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    Ok(text)
}
