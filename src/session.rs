//! Interactive session: feeds user input and fetch completions into the
//! dashboard from a single loop.
//!
//! Fetches run as spawned tasks and post their result back on the same channel
//! as input, so handlers never interleave. Overlapping refreshes are not
//! de-duplicated; whichever completes last wins.
//!
//! Input is read on a plain thread. A blocking read cannot be cancelled, and
//! the session must be able to end while one is still outstanding.

use anyhow::Result;
use std::io::BufRead;
use std::thread;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::chart::ChartEngine;
use crate::dashboard::{Command, Dashboard, DashboardEvent, DashboardView};
use crate::source::DataSource;

pub const HELP: &str = "Commands: /search <text> (or type any text), /cluster <id|all>, /refresh, /help, /quit";

/// One line of user input, interpreted.
#[derive(Debug, PartialEq)]
pub enum Input {
    Search(String),
    Cluster(String),
    Refresh,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    /// Only the line terminator is stripped; search text and topic ids are
    /// taken exactly as typed.
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.strip_prefix('/') else {
            return Input::Search(line.to_string());
        };

        let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
        match name {
            "search" | "s" => Input::Search(arg.to_string()),
            "cluster" | "c" if !arg.is_empty() => Input::Cluster(arg.to_string()),
            "refresh" | "r" => Input::Refresh,
            "help" | "h" | "?" => Input::Help,
            "quit" | "q" | "exit" => Input::Quit,
            _ => Input::Unknown(line.to_string()),
        }
    }

    fn into_event(self) -> Option<DashboardEvent> {
        match self {
            Input::Search(term) => Some(DashboardEvent::SearchChanged(term)),
            Input::Cluster(value) => Some(DashboardEvent::ClusterChanged(value)),
            Input::Refresh => Some(DashboardEvent::RefreshRequested),
            Input::Help | Input::Quit | Input::Unknown(_) => None,
        }
    }
}

enum Message {
    Input(Input),
    Event(DashboardEvent),
    InputClosed,
}

fn spawn_input_reader<R>(input: R, tx: mpsc::UnboundedSender<Message>)
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in input.lines() {
            match line {
                Ok(line) => {
                    if tx.send(Message::Input(Input::parse(&line))).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!("Failed to read input: {}", e);
                    break;
                }
            }
        }
        let _ = tx.send(Message::InputClosed);
    });
}

fn spawn_fetch(source: &DataSource, tx: &mpsc::UnboundedSender<Message>) {
    let source = source.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = source.load().await;
        if tx.send(Message::Event(DashboardEvent::DataLoaded(result))).is_err() {
            debug!("Session ended before fetch completed");
        }
    });
}

/// Runs until `/quit` or end of input. Loads the dataset once on start.
///
/// `/quit` returns immediately, even while the reader thread is still blocked
/// on `input`.
pub async fn run_session<E, V, R>(
    dashboard: &mut Dashboard<E>,
    view: &mut V,
    source: DataSource,
    input: R,
) -> Result<()>
where
    E: ChartEngine,
    V: DashboardView + ?Sized,
    R: BufRead + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_input_reader(input, tx.clone());

    info!("Starting dashboard session against {}", source.url());
    spawn_fetch(&source, &tx);
    let mut pending_fetches = 1usize;
    let mut input_open = true;

    while let Some(message) = rx.recv().await {
        let event = match message {
            Message::Input(Input::Quit) => break,
            Message::Input(Input::Help) => {
                println!("{}", HELP);
                continue;
            }
            Message::Input(Input::Unknown(line)) => {
                println!("Unknown command: {}\n{}", line, HELP);
                continue;
            }
            Message::Input(input) => match input.into_event() {
                Some(event) => event,
                None => continue,
            },
            Message::Event(event) => {
                pending_fetches = pending_fetches.saturating_sub(1);
                event
            }
            Message::InputClosed => {
                input_open = false;
                if pending_fetches == 0 {
                    break;
                }
                continue;
            }
        };

        if let Some(Command::Fetch) = dashboard.handle(event, view) {
            pending_fetches += 1;
            spawn_fetch(&source, &tx);
        }

        // With input gone, stay only long enough to apply outstanding loads.
        if !input_open && pending_fetches == 0 {
            break;
        }
    }

    info!("Dashboard session finished");
    Ok(())
}
