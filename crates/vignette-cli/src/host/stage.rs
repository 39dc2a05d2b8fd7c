//! Line-oriented terminal stage.

use std::io::Write;

use tracing::warn;
use vignette_core::stage::{
    BubbleContent, BubbleSide, ChatMessage, ChatRole, DialogueOverlay, EndReason, MediaKind,
    Stage, StageCommand,
};

fn dialogue(overlay: &DialogueOverlay) -> String {
    let mut out = match &overlay.speaker {
        Some(speaker) => format!("{speaker}: {}", overlay.line),
        None => format!("* {}", overlay.line),
    };
    if let Some(action) = &overlay.action {
        out.push_str(&format!(" ({action})"));
    }
    out
}

fn chat(message: &ChatMessage) -> String {
    let body = match (message.role, &message.speaker) {
        (ChatRole::Sent, _) => {
            let line = format!("{} <", message.text);
            format!("{line:>40}")
        }
        (ChatRole::Received, Some(speaker)) => format!("> {speaker}: {}", message.text),
        (ChatRole::Received, None) => format!("> {}", message.text),
        (ChatRole::System, _) => format!("  -- {} --", message.text),
    };
    match &message.meta {
        Some(meta) => format!("{body}  [{meta}]"),
        None => body,
    }
}

fn kind_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Combat => "Combat",
        MediaKind::Cinematic => "Cinematic",
    }
}

fn ended_notice(kind: MediaKind, reason: EndReason) -> String {
    let what = match reason {
        EndReason::Finished => "finished",
        EndReason::Skipped => "skipped",
        EndReason::MissingAsset => "unavailable",
        EndReason::PlaybackFailed => "could not be played",
    };
    format!("{} {what}. Press Enter to continue.", kind_label(kind))
}

/// Text for one command, or `None` for commands with no terminal output.
#[must_use]
pub fn describe(command: &StageCommand) -> Option<String> {
    let text = match command {
        StageCommand::HideAll
        | StageCommand::ClearOverlay
        | StageCommand::ClearCaption
        | StageCommand::SetBackground(None)
        | StageCommand::SetSkipVisible(false) => return None,
        StageCommand::SetBackground(Some(background)) => format!("[scene: {background}]"),
        StageCommand::ShowNarration { text } => text.clone(),
        StageCommand::ShowFixedDialogue(overlay) => dialogue(overlay),
        StageCommand::ClearChat => "-- chat closed --".to_owned(),
        StageCommand::AppendChat(message) => chat(message),
        StageCommand::ShowComic { panels } => panels
            .iter()
            .map(|group| {
                let bubbles: Vec<String> = group
                    .bubbles
                    .iter()
                    .map(|bubble| {
                        let side = match bubble.side {
                            BubbleSide::Left => "<",
                            BubbleSide::Right => ">",
                        };
                        match &bubble.content {
                            BubbleContent::Speech(overlay) => format!("  {side} {}", dialogue(overlay)),
                            BubbleContent::Narration(text) => format!("  {side} [{text}]"),
                        }
                    })
                    .collect();
                format!("Panel {}\n{}", group.panel, bubbles.join("\n"))
            })
            .collect::<Vec<_>>()
            .join("\n"),
        StageCommand::ShowComicFallback { text } => format!("[comic] {text}"),
        StageCommand::ShowMedia {
            kind,
            asset,
            looping,
        } => {
            let looped = if *looping { ", looping" } else { "" };
            format!("[{} playing {asset}{looped}]", kind_label(*kind))
        }
        StageCommand::SetSkipVisible(true) => "(s to skip)".to_owned(),
        StageCommand::ShowOverlay(overlay) => format!("  >> {}", dialogue(overlay)),
        StageCommand::ShowCaption(text) => format!("  ~ {text} ~"),
        StageCommand::ShowMediaFallback {
            kind,
            asset,
            message,
        } => match asset {
            Some(asset) => format!("[{}] {message}: {asset}", kind_label(*kind)),
            None => format!("[{}] {message}", kind_label(*kind)),
        },
        StageCommand::ShowMediaEnded { kind, reason } => ended_notice(*kind, *reason),
        StageCommand::ShowPlaceholder { tag } => format!("[unsupported event type: {tag}]"),
        StageCommand::ShowEnd => "\n*** The End ***".to_owned(),
    };
    Some(text)
}

/// Writes every visible command as text lines.
#[derive(Debug)]
pub struct TerminalStage<W> {
    out: W,
}

impl<W: Write> TerminalStage<W> {
    /// Creates a stage writing to `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying writer.
    #[must_use]
    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Stage for TerminalStage<W> {
    fn apply(&mut self, command: StageCommand) {
        if command == StageCommand::HideAll {
            if let Err(err) = writeln!(self.out) {
                warn!(%err, "terminal write failed");
            }
            return;
        }
        let Some(text) = describe(&command) else {
            return;
        };
        if let Err(err) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            warn!(%err, "terminal write failed");
        }
    }
}
