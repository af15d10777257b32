use std::future::IntoFuture;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use log::{error, info, warn, Level};
use reqwest::Client;
use tokio::net::TcpListener;
use url::Url;

use crate::types::config::{Config, Variant};

pub mod client;
pub mod fetch;
pub mod handlers;
pub mod influx;
pub mod logging;
pub mod render;
pub mod types;

pub struct State {
    pub client: Client,
    pub feed: Url,
    pub variant: Variant,
    pub requests_served: AtomicU64,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::setup()?;

    // get config
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config_toml = std::fs::read_to_string(config_path)
        .context("couldn't read config file")?;
    let config: Config = toml::from_str(&config_toml)
        .context("couldn't parse config file")?;

    let state = Arc::new(State {
        client: fetch::http_client()?,
        feed: config.feed.url.clone(),
        variant: config.server.variant,
        requests_served: AtomicU64::default(),
    });

    // set up server
    let listener = TcpListener::bind(&config.server.address).await?;
    info!("Listening on http://{}/", listener.local_addr()?);

    let (quit_tx, mut quit_rx) = tokio::sync::mpsc::channel(1);
    let (fetch_tx, mut fetch_rx) = tokio::sync::mpsc::channel::<bool>(1);

    std::thread::spawn(move || {
        let mut editor = match rustyline::DefaultEditor::new() {
            Ok(e) => e,
            Err(e) => {
                error!("error creating line editor: {:#?}", e);
                return;
            }
        };

        loop {
            let line = match editor.readline("> ") {
                Ok(l) => l,
                Err(rustyline::error::ReadlineError::Interrupted)
                | Err(rustyline::error::ReadlineError::Eof) => {
                    quit_tx.blocking_send(()).ok();
                    return;
                }
                Err(e) => {
                    error!("error reading input: {:#?}", e);
                    continue;
                }
            };

            let command: Vec<_> = line.splitn(2, ' ').collect();
            match command[0] {
                "exit" | "quit" => {
                    quit_tx.blocking_send(()).ok();
                    return;
                }
                "fetch" => {
                    let beta = command.len() == 2 && command[1].trim() == "beta";
                    fetch_tx.blocking_send(beta).ok();
                }
                "log" | "level" => {
                    if command.len() == 2 {
                        match Level::from_str(command[1]) {
                            Ok(level) => *logging::LOG_LEVEL.write() = level,
                            Err(_) => warn!("invalid log level"),
                        }
                    } else {
                        info!("usage: log <trace|debug|info|warn|error>");
                    }
                }
                "" => {}
                x => warn!("unknown command: {}", x),
            }
        }
    });

    {
        let state = Arc::clone(&state);
        tokio::task::spawn(async move {
            let mut last_requests = 0;

            loop {
                let requests = state.requests_served.load(Ordering::SeqCst);
                let diff = requests - last_requests;
                last_requests = requests;

                info!("Requests served: {} (+{})", requests, diff);
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
        });
    }

    influx::spawn(&config, Arc::clone(&state));

    // operator smoke tests from the console
    {
        let state = Arc::clone(&state);
        tokio::task::spawn(async move {
            while let Some(beta) = fetch_rx.recv().await {
                let announcement = fetch::announcement(&state.client, &state.feed, beta).await;
                info!("current announcement: {:?}", announcement);
            }
        });
    }

    let app = handlers::router(Arc::clone(&state));

    tokio::select! {
        res = axum::serve(listener, app).into_future() => {
            res.context("server error")?;
        }
        _ = quit_rx.recv() => {}
    }

    info!("quitting");
    Ok(())
}
