//! Generic request and response envelopes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Status code for answered requests, including rejections.
pub const STATUS_OK: u16 = 200;

/// Status code for store failures and unreadable requests.
pub const STATUS_SERVER_ERROR: u16 = 500;

/// Incoming request: path parameters and an optional JSON-encoded body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    /// Named path parameters, for example `taskId`.
    #[serde(default)]
    pub path_parameters: HashMap<String, String>,
    /// JSON-encoded request body.
    #[serde(default)]
    pub body: Option<String>,
}

impl ApiRequest {
    /// Creates a request with no parameters and no body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path parameter.
    #[must_use]
    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters.insert(name.into(), value.into());
        self
    }

    /// Sets the raw body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the body to the JSON encoding of `value`.
    #[must_use]
    pub fn with_json_body(self, value: &serde_json::Value) -> Self {
        self.with_body(value.to_string())
    }

    /// Returns a path parameter.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingPathParameter`] when it is absent.
    pub fn path_parameter(&self, name: &'static str) -> Result<&str, RequestError> {
        self.path_parameters
            .get(name)
            .map(String::as_str)
            .ok_or(RequestError::MissingPathParameter(name))
    }

    /// Decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingBody`] when there is no body, or
    /// [`RequestError::MalformedBody`] when it does not decode as `T`.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        let body = self.body.as_deref().ok_or(RequestError::MissingBody)?;
        serde_json::from_str(body).map_err(RequestError::MalformedBody)
    }
}

/// Errors raised while reading an [`ApiRequest`].
#[derive(Debug, Error)]
pub enum RequestError {
    /// A required path parameter was not supplied.
    #[error("missing path parameter: {0}")]
    MissingPathParameter(&'static str),
    /// The request carried no body.
    #[error("missing request body")]
    MissingBody,
    /// The body is not valid JSON of the expected shape.
    #[error("malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),
}

/// Outgoing response: status code and JSON-encoded body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// HTTP-style status code.
    pub status_code: u16,
    /// JSON-encoded [`ResponseBody`].
    pub body: String,
}

impl ApiResponse {
    /// Builds a 200 response.
    #[must_use]
    pub fn ok(body: &ResponseBody) -> Self {
        Self {
            status_code: STATUS_OK,
            body: body.encode(),
        }
    }

    /// Builds a 500 response.
    #[must_use]
    pub fn server_error(body: &ResponseBody) -> Self {
        Self {
            status_code: STATUS_SERVER_ERROR,
            body: body.encode(),
        }
    }

    /// Decodes the body back into a [`ResponseBody`].
    ///
    /// # Errors
    ///
    /// Returns the JSON error when the body is not a response body.
    pub fn decode_body(&self) -> serde_json::Result<ResponseBody> {
        serde_json::from_str(&self.body)
    }
}

/// Body shared by every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    /// Outcome description.
    pub message: String,
    /// Payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Error text on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
}

impl ResponseBody {
    /// Creates a body carrying only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            error_msg: None,
        }
    }

    /// Creates a failure body carrying the error's display text.
    #[must_use]
    pub fn failure(message: impl Into<String>, error: &dyn fmt::Display) -> Self {
        Self {
            message: message.into(),
            data: None,
            error_msg: Some(error.to_string()),
        }
    }

    /// Attaches a serializable payload.
    ///
    /// # Errors
    ///
    /// Returns the JSON error when `data` cannot be serialized.
    pub fn with_data(mut self, data: &impl Serialize) -> serde_json::Result<Self> {
        self.data = Some(serde_json::to_value(data)?);
        Ok(self)
    }

    /// Attaches an empty JSON object as payload.
    #[must_use]
    pub fn with_empty_data(mut self) -> Self {
        self.data = Some(serde_json::Value::Object(serde_json::Map::new()));
        self
    }

    /// Encodes the body as JSON.
    #[must_use]
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to encode response body");
            String::from(r#"{"message":"Failed to encode response."}"#)
        })
    }
}
