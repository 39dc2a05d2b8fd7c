//! Presentation target contract.
//!
//! The single active view is driven exclusively through [`StageCommand`]s.
//! Layout and pixels belong to the host; the engine only says what is shown.

use serde::{Deserialize, Serialize};

/// Which media event family a command concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    /// Full-motion combat sequence.
    Combat,
    /// Cinematic cutscene.
    Cinematic,
}

/// Why a media event stopped playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The media reached its natural end.
    Finished,
    /// The user skipped.
    Skipped,
    /// The event declared no asset.
    MissingAsset,
    /// The resource could not start.
    PlaybackFailed,
}

/// Classification of a chat bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    /// Written by the player persona.
    Sent,
    /// Written by anyone else.
    Received,
    /// Action or system line.
    System,
}

/// One revealed chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Bubble classification.
    pub role: ChatRole,
    /// Speaker label; omitted for sent and system messages.
    pub speaker: Option<String>,
    /// Message body.
    pub text: String,
    /// Timestamp or status line.
    pub meta: Option<String>,
}

/// A line laid over the current view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueOverlay {
    /// Speaker label.
    pub speaker: Option<String>,
    /// Line text.
    pub line: String,
    /// Stage direction.
    pub action: Option<String>,
}

/// Which side of a panel a bubble hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BubbleSide {
    /// Left edge.
    Left,
    /// Right edge.
    Right,
}

/// What a comic bubble contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BubbleContent {
    /// Speech.
    Speech(DialogueOverlay),
    /// Narration box.
    Narration(String),
}

/// A bubble within a comic panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComicBubble {
    /// Placement.
    pub side: BubbleSide,
    /// Content.
    pub content: BubbleContent,
}

/// All bubbles belonging to one panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelGroup {
    /// Panel number from the script.
    pub panel: u32,
    /// Bubbles in script order.
    pub bubbles: Vec<ComicBubble>,
}

/// A presentation side effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageCommand {
    /// Hide every view.
    HideAll,
    /// Show or clear the background image.
    SetBackground(Option<String>),
    /// Show narration text.
    ShowNarration {
        /// The text.
        text: String,
    },
    /// Show one line of fixed-view dialogue.
    ShowFixedDialogue(DialogueOverlay),
    /// Remove every chat message.
    ClearChat,
    /// Append one chat message.
    AppendChat(ChatMessage),
    /// Show comic panels.
    ShowComic {
        /// Panels in ascending panel order.
        panels: Vec<PanelGroup>,
    },
    /// Show a text stand-in for a comic with no usable panels.
    ShowComicFallback {
        /// The stand-in text.
        text: String,
    },
    /// Show the media view for a resource.
    ShowMedia {
        /// Event family.
        kind: MediaKind,
        /// Asset being played.
        asset: String,
        /// Whether it loops.
        looping: bool,
    },
    /// Show or hide the skip affordance.
    SetSkipVisible(bool),
    /// Show a dialogue overlay over the media view.
    ShowOverlay(DialogueOverlay),
    /// Remove the dialogue overlay.
    ClearOverlay,
    /// Show a caption.
    ShowCaption(String),
    /// Remove the caption.
    ClearCaption,
    /// Static stand-in for media that could not play.
    ShowMediaFallback {
        /// Event family.
        kind: MediaKind,
        /// The asset that failed, if any.
        asset: Option<String>,
        /// User-visible explanation.
        message: String,
    },
    /// Media has stopped; show the notice and a continue prompt.
    ShowMediaEnded {
        /// Event family.
        kind: MediaKind,
        /// Why it stopped.
        reason: EndReason,
    },
    /// Stand-in for an event type the engine does not know.
    ShowPlaceholder {
        /// The unknown tag.
        tag: String,
    },
    /// Terminal presentation.
    ShowEnd,
}

/// The host's presentation surface.
pub trait Stage {
    /// Applies one presentation command.
    fn apply(&mut self, command: StageCommand);
}
