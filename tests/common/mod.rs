// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed Neovim layout (config directory and
// plugin root) and a fluent builder so each integration test can set up an
// isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::sync::{Arc, Mutex};

use nvim_adapter::commands::Dispatcher;
use nvim_adapter::config::AdapterConfig;
use nvim_adapter::exec::{ExecResult, Executor};
use nvim_adapter::protocol::Response;

/// An [`Executor`] that records every call and fakes `git clone` by creating
/// the destination directory.
#[derive(Debug, Default)]
pub struct FakeGit {
    calls: Mutex<Vec<String>>,
}

impl FakeGit {
    /// All recorded command lines, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl Executor for FakeGit {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        let mut line = vec![program];
        line.extend_from_slice(args);
        self.calls.lock().expect("calls lock").push(line.join(" "));
        if args.first() == Some(&"clone")
            && let Some(dest) = args.last()
        {
            std::fs::create_dir_all(dest)?;
        }
        Ok(ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        })
    }

    fn which(&self, _program: &str) -> bool {
        true
    }
}

/// An isolated Neovim layout backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct IntegrationTestContext {
    /// Temporary directory holding `nvim/` and `start/`.
    pub root: tempfile::TempDir,
    /// Executor shared with every dispatcher built from this context.
    pub git: Arc<FakeGit>,
}

impl IntegrationTestContext {
    /// Create a new context with nothing on disk yet.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
            git: Arc::new(FakeGit::default()),
        }
    }

    /// The Neovim configuration directory (not created until written).
    pub fn config_dir(&self) -> PathBuf {
        self.root.path().join("nvim")
    }

    /// The managed `init.lua`.
    pub fn init_lua(&self) -> PathBuf {
        self.config_dir().join("init.lua")
    }

    /// The plugin root (not created until a package is installed).
    pub fn plugin_root(&self) -> PathBuf {
        self.root.path().join("start")
    }

    /// Resolved configuration pointing into the temporary directory.
    pub fn config(&self) -> AdapterConfig {
        AdapterConfig::new(&self.config_dir(), &self.plugin_root())
    }

    /// A dispatcher over [`Self::config`] using the fake `git`.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.config(), self.git.clone())
    }

    /// Dispatch one raw request.
    pub fn send(&self, raw: &str) -> Response {
        self.dispatcher().handle_raw(raw)
    }

    /// Current content of `init.lua`.
    pub fn read_init_lua(&self) -> String {
        std::fs::read_to_string(self.init_lua()).expect("read init.lua")
    }

    /// Run the compiled binary against this layout, feeding `stdin`.
    pub fn run_binary(&self, stdin: &str, extra_args: &[&str]) -> Output {
        self.run_binary_bytes(stdin.as_bytes(), extra_args)
    }

    /// Like [`Self::run_binary`], but feeds raw bytes to standard input.
    pub fn run_binary_bytes(&self, stdin: &[u8], extra_args: &[&str]) -> Output {
        use std::io::Write as _;

        let mut child = Command::new(env!("CARGO_BIN_EXE_nvim-adapter"))
            .arg("--config-dir")
            .arg(self.config_dir())
            .arg("--plugin-root")
            .arg(self.plugin_root())
            .args(extra_args)
            .env("XDG_CONFIG_HOME", self.root.path().join("xdg-config"))
            .env("XDG_DATA_HOME", self.root.path().join("xdg-data"))
            .env_remove("NVIM_ADAPTER_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn nvim-adapter");
        child
            .stdin
            .take()
            .expect("child stdin")
            .write_all(stdin)
            .expect("write request");
        child.wait_with_output().expect("wait for nvim-adapter")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new, empty context.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Pretend `name` is already installed under the plugin root.
    pub fn with_package(self, name: &str) -> Self {
        let dir = self.ctx.plugin_root().join(name);
        std::fs::create_dir_all(dir.join("plugin")).expect("create package dir");
        self
    }

    /// Write `content` to `init.lua`.
    pub fn with_init_lua(self, content: &str) -> Self {
        std::fs::create_dir_all(self.ctx.config_dir()).expect("create config dir");
        std::fs::write(self.ctx.init_lua(), content).expect("write init.lua");
        self
    }

    /// Finalise the builder.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
