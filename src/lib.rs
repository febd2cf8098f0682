//! Neovim plugin adapter.
//!
//! Serves one JSON request per process over standard input and output:
//! reports whether a package is installed, installs and removes packages,
//! and renders editor settings into a managed `init.lua`.
//!
//! The public API is organised into four layers:
//!
//! - **[`protocol`]**: request and response envelopes
//! - **[`settings`]** and **[`serializer`]**: the settings model and its Lua rendering
//! - **[`resources`]**: idempotent `check + apply` primitives (config file, package directory)
//! - **[`commands`]**: the command set, its handlers and the dispatcher
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod package;
pub mod platform;
pub mod protocol;
pub mod resources;
pub mod serializer;
pub mod settings;
