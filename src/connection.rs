//! Backend connection: transport, session lookup and response decoding.
//!
//! Every endpoint wrapper funnels through [`Connection::execute`]:
//! - the auth policy is resolved against the session store once, before dispatch
//! - non-2xx replies become [`DrobbError::Api`] with the server's message
//! - a 401 to a request that carried a token clears the stored session
//! - 2xx bodies are decoded into the endpoint's typed payload

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DrobbError, Result, GENERIC_FAILURE};
use crate::request::{ApiRequest, ApiResponse, AuthPolicy};
use crate::session::SessionStore;
use crate::transport::Transport;

/// Message used when a required token is missing.
pub const NOT_LOGGED_IN: &str = "User not logged in";

/// Wraps a [`Transport`] and the [`SessionStore`] it authenticates with.
pub struct Connection {
    transport: Box<dyn Transport>,
    session: Arc<dyn SessionStore>,
}

impl Connection {
    pub fn new(transport: Box<dyn Transport>, session: Arc<dyn SessionStore>) -> Self {
        Self { transport, session }
    }

    /// The session store backing this connection.
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// True when a token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.session.token(), Ok(Some(_)))
    }

    /// Resolve auth, dispatch, and return the raw response if it is 2xx.
    pub fn send(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        request.bearer = match request.auth {
            AuthPolicy::None => None,
            AuthPolicy::Optional => self.session.token()?,
            AuthPolicy::Required => match self.session.token()? {
                Some(token) => Some(token),
                None => {
                    tracing::warn!(route = %request.route(), "no session token; request not sent");
                    return Err(DrobbError::Auth(NOT_LOGGED_IN.to_string()));
                }
            },
        };

        tracing::debug!(route = %request.route(), url = %request.url_path(), "dispatching request");
        let response = self.transport.send(&request)?;

        if !response.is_success() {
            if response.status == 401 && request.bearer.is_some() {
                self.forget_session(&request);
            }
            let message = error_message(&response.body);
            tracing::warn!(
                route = %request.route(),
                status = response.status,
                "request failed: {}",
                message
            );
            return Err(DrobbError::Api {
                status: response.status,
                message,
            });
        }
        Ok(response)
    }

    /// The server rejected the stored token; drop it so later calls fail
    /// locally with an auth error.
    fn forget_session(&self, request: &ApiRequest) {
        tracing::info!(route = %request.route(), "session token rejected; clearing");
        if let Err(e) = self.session.clear() {
            tracing::warn!("failed to clear rejected session: {}", e);
        }
    }

    /// Execute a request and parse the body as JSON (`Null` for an empty body).
    pub fn execute(&self, request: ApiRequest) -> Result<Value> {
        let route = request.route();
        let response = self.send(request)?;
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body)
            .map_err(|e| DrobbError::Decode(format!("{}: {}", route, e)))
    }

    /// Execute a request and decode the body into `T`.
    pub fn execute_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let route = request.route();
        let value = self.execute(request)?;
        decode(&route, value)
    }

    /// Execute a request and decode the field `key` of the JSON body into `T`.
    ///
    /// Most list endpoints wrap their payload, e.g. `{"items": [...]}`.
    pub fn execute_field<T: DeserializeOwned>(&self, request: ApiRequest, key: &str) -> Result<T> {
        let route = request.route();
        let mut value = self.execute(request)?;
        let field = value
            .get_mut(key)
            .map(Value::take)
            .ok_or_else(|| DrobbError::Decode(format!("{}: missing field `{}`", route, key)))?;
        decode(&route, field)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

fn decode<T: DeserializeOwned>(route: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| DrobbError::Decode(format!("{}: {}", route, e)))
}

/// Pull a human-readable message out of an error body.
///
/// Tries `message`, then `error`; anything else yields the generic fallback.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error"].iter().find_map(|key| {
                v.get(*key)
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.trim().is_empty())
                    .map(|m| m.to_string())
            })
        })
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}
