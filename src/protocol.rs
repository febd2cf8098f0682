//! Wire types for the stdio protocol: one request in, one response out.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;

/// Per-invocation context sent alongside `args`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplyContext {
    /// Simulate changes without touching the filesystem.
    pub dry_run: bool,
}

/// A decoded request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Command name, resolved by the dispatcher.
    pub command: String,
    /// Command arguments; `null` when absent.
    #[serde(default)]
    pub args: Value,
    /// Caller correlation token, echoed in the response.
    #[serde(default)]
    pub request_id: Option<String>,
    /// Optional execution context.
    #[serde(default)]
    pub context: Option<ApplyContext>,
}

impl Request {
    /// Decode a request from the raw text read on standard input.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::EmptyRequest`] for blank input and
    /// [`ProtocolError::Malformed`] for anything that is not a request object.
    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        if raw.trim().is_empty() {
            return Err(ProtocolError::EmptyRequest);
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// The effective context; an absent or `null` context means no dry run.
    #[must_use]
    pub fn context(&self) -> ApplyContext {
        self.context.unwrap_or_default()
    }
}

/// Best-effort extraction of `requestId` from input that failed to decode.
#[must_use]
pub fn recover_request_id(raw: &str) -> Option<String> {
    let value: Value = serde_json::from_str(raw).ok()?;
    value.get("requestId")?.as_str().map(str::to_string)
}

/// Successful handler payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    /// Whether the command changed (or would change) state.
    pub changed: Option<bool>,
    /// Command-specific result data.
    pub data: Option<Value>,
}

impl Outcome {
    /// Outcome of a mutating command.
    #[must_use]
    pub const fn changed(changed: bool) -> Self {
        Self {
            changed: Some(changed),
            data: None,
        }
    }

    /// Outcome of a query command.
    #[must_use]
    pub const fn data(data: Value) -> Self {
        Self {
            changed: None,
            data: Some(data),
        }
    }
}

/// The single response envelope written to standard output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Echo of the request's `requestId`; `null` when it had none.
    pub request_id: Option<String>,
    /// Whether the command completed.
    pub success: bool,
    /// Whether state changed; only set by mutating commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed: Option<bool>,
    /// Command-specific result data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// A successful response carrying `outcome`.
    #[must_use]
    pub fn success(request_id: Option<String>, outcome: Outcome) -> Self {
        Self {
            request_id,
            success: true,
            changed: outcome.changed,
            data: outcome.data,
            error: None,
        }
    }

    /// A failure response; the message includes the full error chain.
    #[must_use]
    pub fn failure(request_id: Option<String>, err: &anyhow::Error) -> Self {
        Self {
            request_id,
            success: false,
            changed: None,
            data: None,
            error: Some(format!("{err:#}")),
        }
    }

    /// Convert any handler result into a response.
    #[must_use]
    pub fn from_result(request_id: Option<String>, result: anyhow::Result<Outcome>) -> Self {
        match result {
            Ok(outcome) => Self::success(request_id, outcome),
            Err(err) => Self::failure(request_id, &err),
        }
    }

    /// Serialize as a single JSON line (without the trailing newline).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
