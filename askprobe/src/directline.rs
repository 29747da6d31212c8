use std::time::Duration;

use miette::{Diagnostic, IntoDiagnostic, Result, WrapErr};
use thiserror::Error;

use crate::APP_USER_AGENT;

mod activities;
mod conversation;

pub use activities::Activity;

/// Default base endpoint of the Asksuite Directline gateway.
pub const DEFAULT_BASE_URL: &str = "https://directline.asksuite.com/directline";

/// How long to wait between sending a question and fetching the reply.
/// The gateway exposes no completion signal, so this is a fixed-wait
/// heuristic rather than a poll.
pub const DEFAULT_RESPONSE_DELAY: Duration = Duration::from_secs(5);

/// Failure of a single outbound gateway call. None of these are retried.
#[derive(Error, Diagnostic, Debug)]
pub enum GatewayError {
    #[error("request to conversation gateway failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("gateway returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("no conversation id in gateway response")]
    MissingConversationId,
}

#[derive(Debug, Clone)]
pub struct Config {
    base_url: String,
    response_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            response_delay: DEFAULT_RESPONSE_DELAY,
        }
    }
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads `DIRECTLINE_BASE_URL` when set, otherwise uses the default
    /// gateway endpoint.
    pub fn from_env() -> Self {
        match std::env::var("DIRECTLINE_BASE_URL") {
            Ok(base_url) => Self::new(base_url),
            Err(_) => Self::default(),
        }
    }

    pub fn response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    /// No request timeout is configured on purpose: the reference client
    /// relies on whatever the networking layer defaults to.
    pub fn client(&self) -> Result<Client> {
        let http = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .into_diagnostic()
            .wrap_err("Could not build gateway http client")?;

        Ok(Client {
            http,
            config: self.clone(),
        })
    }
}

/// HTTP client for the conversation gateway. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: Config,
}

impl Client {
    pub(crate) fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn response_delay(&self) -> Duration {
        self.config.response_delay
    }
}
