mod commands;
mod config;
mod main_lib;
mod render;

use std::sync::Arc;

use commands::{dispatch, parse_line, HELP};
use config::Config;
use main_lib::{build_settings, build_source, init_tracing};
use render::TerminalSink;
use tickerbar_core::{Error, TickerEngine};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    let settings = build_settings(&config)?;
    let source = build_source(&config)?;
    let sink = Arc::new(TerminalSink::new());
    let handle = TickerEngine::new(config.engine.clone(), settings, source, sink.clone()).spawn();

    sink.message(HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                match parse_line(&line) {
                    Ok(Some(command)) => {
                        if !dispatch(command, &handle, &sink).await? {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => sink.message(&e.to_string()),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("Interrupted");
                break;
            }
        }
    }

    match handle.quit().await {
        Ok(()) | Err(Error::EngineStopped) => {}
        Err(e) => return Err(e.into()),
    }
    sink.message("");
    Ok(())
}
