//! Reversi - interactive command loop over a [`Clash`] session.

#![warn(missing_docs)]

mod cli;
mod command;
mod view;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use command::Command;
use strictly_clash::{AutoRefresh, Clash, ClashConfig, ClashError, StopReason};
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the board on stdout.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = ClashConfig::load_or_default(&cli.config)?;
    if let Some(storage) = cli.storage {
        config = config.with_storage(storage);
    }
    info!(storage = %config.storage(), "Starting reversi");

    let storage = config.open_storage()?;
    run(Clash::new(storage), &config).await
}

/// Reads commands until `exit`, end of input or Ctrl-C, then finishes the
/// session.
async fn run(mut clash: Clash, config: &ClashConfig) -> Result<()> {
    println!("Commands: new [BLACK|WHITE] [name], join <name>, play <pos>, pass, refresh, wait, targets on|off, show, exit");
    println!("Ctrl-C stops `wait`; at the prompt it finishes the session and exits.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        // Once `wait` has installed a Ctrl-C handler the default SIGINT exit
        // is gone, so the prompt handles Ctrl-C itself.
        let line = match next_input(&mut lines, tokio::signal::ctrl_c()).await? {
            Input::Line(line) => line,
            Input::Closed => break,
            Input::Interrupted => {
                info!("Interrupted at the prompt");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if command == Command::Exit {
            break;
        }
        clash = step(clash, command, config).await;
    }

    if clash.is_running() {
        match clash.finish() {
            Ok(_) => debug!("Session finished"),
            Err(e) => println!("{}", e),
        }
    }
    Ok(())
}

/// What the prompt received.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Line(String),
    Closed,
    Interrupted,
}

/// Next line of input, unless `interrupt` resolves first.
async fn next_input<R, F>(lines: &mut Lines<R>, interrupt: F) -> std::io::Result<Input>
where
    R: AsyncBufRead + Unpin,
    F: Future,
{
    tokio::select! {
        line = lines.next_line() => Ok(line?.map_or(Input::Closed, Input::Line)),
        _ = interrupt => Ok(Input::Interrupted),
    }
}

/// Applies one command and prints the result. Errors leave the session as
/// it was, except a vanished remote game, which ends the session.
#[instrument(skip(clash, config))]
async fn step(clash: Clash, command: Command, config: &ClashConfig) -> Clash {
    let result = match command {
        Command::New { color, name } => clash
            .new_game(name, color)
            .and_then(|c| c.targets(*config.show_targets())),
        Command::Join(name) => clash
            .join(name)
            .and_then(|c| c.targets(*config.show_targets())),
        Command::Play(pos) => clash.play(pos),
        Command::Pass => clash.pass(),
        Command::Refresh => clash.refresh(),
        Command::Targets(enabled) => clash.targets(enabled),
        Command::Show => {
            print!("{}", view::render(&clash));
            return clash;
        }
        Command::Wait => return wait(clash, config).await,
        Command::Exit => return clash,
    };

    match result {
        Ok(next) => {
            print!("{}", view::render(&next));
            next
        }
        Err(ClashError::GameNotFound) if clash.is_remote() => {
            println!("{}", ClashError::GameNotFound);
            clash.unstarted()
        }
        Err(e) => {
            println!("{}", e);
            clash
        }
    }
}

/// Polls a remote game until this side may act; Ctrl-C stops early.
async fn wait(clash: Clash, config: &ClashConfig) -> Clash {
    let (poller, cancel) = AutoRefresh::new(config.poll_interval(), config.refresh_delay());
    println!("Waiting for the opponent (Ctrl-C to stop)...");

    let poll = tokio::spawn(poller.run(clash.clone()));
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
        // Holding `cancel` until here keeps the poller alive.
        drop(cancel);
    });

    let outcome = poll.await;
    watcher.abort();

    match outcome {
        Ok(outcome) => {
            match outcome.reason {
                StopReason::Available | StopReason::GameOver => {
                    print!("{}", view::render(&outcome.clash))
                }
                StopReason::NotFound => println!("{}", ClashError::GameNotFound),
                StopReason::Cancelled => println!("Stopped waiting"),
                StopReason::Unsupported(e) => println!("{}", e),
            }
            outcome.clash
        }
        Err(e) => {
            warn!(error = %e, "Poller task failed");
            clash
        }
    }
}
