//! `nvim-adapter` binary: one request on standard input, one response line on
//! standard output.
use anyhow::{Context as _, Result};
use clap::Parser;
use std::io::{self, Read as _, Write as _};
use std::sync::Arc;

use nvim_adapter::cli::Cli;
use nvim_adapter::commands::Dispatcher;
use nvim_adapter::config::AdapterConfig;
use nvim_adapter::exec::SystemExecutor;
use nvim_adapter::logging;
use nvim_adapter::platform::{Platform, process_env};
use nvim_adapter::protocol::{Response, recover_request_id};

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init_subscriber(args.verbose);

    let mut raw = Vec::new();
    io::stdin()
        .read_to_end(&mut raw)
        .context("read request from standard input")?;

    let response = match AdapterConfig::resolve(&args.global, &Platform::detect(), &process_env) {
        Ok(config) => Dispatcher::new(config, Arc::new(SystemExecutor))
            .with_dry_run(args.global.dry_run)
            .handle_bytes(&raw),
        Err(err) => {
            tracing::error!("{err:#}");
            Response::failure(recover_request_id(&String::from_utf8_lossy(&raw)), &err)
        }
    };

    let line = response.to_line().context("encode response")?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{line}").context("write response to standard output")?;
    stdout.flush().context("flush standard output")?;
    Ok(())
}
