//! Domain-specific error types for the adapter.
//!
//! Internal modules return typed errors (e.g. [`ProtocolError`],
//! [`SettingsError`]) while handlers at the dispatch boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error families
//!
//! ```text
//! ProtocolError  : request decoding, unknown commands, bad arguments
//! SettingsError  : unsupported setting values
//! PackageError   : malformed package identifiers
//! PlatformError  : default location resolution
//! ```

use thiserror::Error;

/// Errors raised while decoding and routing a request.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Standard input was empty.
    #[error("empty request: expected a JSON object on standard input")]
    EmptyRequest,

    /// Standard input held bytes that are not UTF-8.
    #[error("request is not valid UTF-8")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    /// The request body is not a valid request object.
    #[error("malformed request")]
    Malformed(#[from] serde_json::Error),

    /// The `command` field names no known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A command received arguments it cannot use.
    #[error("invalid arguments for '{command}': {reason}")]
    InvalidArgs {
        /// Canonical name of the command.
        command: &'static str,
        /// Human-readable reason.
        reason: String,
    },
}

/// Errors raised while interpreting a settings mapping.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// `settings` was present but not a JSON object.
    #[error("settings must be an object, got {0}")]
    NotAnObject(&'static str),

    /// A setting value is not a boolean, integer or string.
    #[error("unsupported value for setting '{name}': {kind}")]
    UnsupportedValue {
        /// Setting name.
        name: String,
        /// JSON kind of the rejected value.
        kind: &'static str,
    },
}

/// Errors raised while parsing a package identifier.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PackageError {
    /// The identifier is not of the form `author/name`.
    #[error("invalid package id '{0}': expected 'author/name'")]
    InvalidId(String),
}

/// Errors raised while resolving platform default locations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlatformError {
    /// None of the environment variables naming a base directory are set.
    #[error("cannot resolve {what}: none of {vars} is set")]
    MissingBaseDir {
        /// Which directory was being resolved.
        what: &'static str,
        /// Environment variables that were consulted.
        vars: &'static str,
    },
}
