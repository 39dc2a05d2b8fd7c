//! Terminal host: adapters for the engine's outside-world contracts and the
//! event loop that feeds signals into the Director.

pub mod media;
pub mod scheduler;
pub mod stage;

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};
use vignette_core::event::DomainEvent;
use vignette_core::signal::Signal;
use vignette_narrative::Director;

use crate::error::AppError;
use crate::input::{Command, parse_command};
use media::SimulatedMediaPlayer;
use scheduler::DeadlineScheduler;
use stage::TerminalStage;

/// The Director as wired by the terminal host.
pub type HostDirector<W> = Director<TerminalStage<W>, DeadlineScheduler, SimulatedMediaPlayer>;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// "The End" was reached.
    Finished,
    /// The user quit.
    Quit,
    /// Input closed before the end.
    InputClosed,
}

/// Delivers every media signal and timer due at `now`, repeating until
/// nothing further is due.
pub fn pump<W: Write>(director: &mut HostDirector<W>, now: Instant) {
    loop {
        let mut signals = director.media_mut().take_signals(now);
        signals.extend(
            director
                .scheduler_mut()
                .take_due(now)
                .into_iter()
                .map(Signal::TimerElapsed),
        );
        if signals.is_empty() {
            break;
        }
        for signal in signals {
            debug!(signal = signal.name(), "delivering host signal");
            director.handle(signal);
        }
    }
    for event in director.drain_events() {
        debug!(
            event_type = event.event_type(),
            sequence_number = event.metadata().sequence_number,
            payload = %event.to_payload(),
            "narrative event"
        );
    }
}

fn next_deadline<W: Write>(director: &HostDirector<W>) -> Option<Instant> {
    match (
        director.scheduler().next_deadline(),
        director.media().next_deadline(),
    ) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Runs a started Director until it ends, the user quits or input closes.
///
/// # Errors
///
/// Returns `AppError::Io` if reading input fails.
pub async fn drive<W, R>(director: &mut HostDirector<W>, input: R) -> Result<Exit, AppError>
where
    W: Write,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        pump(director, Instant::now());
        if director.is_ended() {
            info!("playthrough finished");
            return Ok(Exit::Finished);
        }
        let deadline = next_deadline(director);
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("input closed");
                    return Ok(Exit::InputClosed);
                };
                match parse_command(&line) {
                    Some(Command::Quit) => {
                        info!("quit requested");
                        return Ok(Exit::Quit);
                    }
                    Some(Command::Signal(signal)) => director.handle(signal),
                    None => warn!(input = %line, "unrecognised input; use Enter, s, p or q"),
                }
            }
            () = wait_until(deadline) => {}
        }
    }
}
