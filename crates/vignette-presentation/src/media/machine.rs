//! Media playback transition table.
//!
//! `step` is a pure function from (state, input, guards) to the next state
//! and the ordered effects needed to get there. It never touches a player,
//! stage or scheduler; [`super::controller::MediaPhaseController`] executes
//! the effects.

use vignette_core::stage::EndReason;

/// Playback state of one media event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaState {
    /// Created, nothing loaded yet.
    Idle,
    /// A resource is playing. `phase` is `None` for the main media.
    Playing {
        /// Active phase index.
        phase: Option<usize>,
    },
    /// Swapping to a phase resource; waiting for it to start.
    PhaseTransition {
        /// Phase being entered.
        phase: usize,
    },
    /// Playback is over; waiting for dismissal.
    Ended(EndReason),
}

impl MediaState {
    /// Returns `true` once playback has stopped for good.
    #[must_use]
    pub fn is_ended(self) -> bool {
        matches!(self, Self::Ended(_))
    }
}

/// Inputs the machine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaInput {
    /// The event became current.
    Begin,
    /// The active resource started.
    Started,
    /// The active resource could not start.
    StartFailed,
    /// The active resource reached its natural end.
    ReachedEnd,
    /// User skip.
    Skip,
    /// Request for the next phase.
    PhaseTrigger,
    /// User continue.
    Continue,
}

/// Event-derived conditions the transitions depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guards {
    /// The event names a main asset.
    pub has_asset: bool,
    /// Restart on natural end.
    pub looping: bool,
    /// Skip input is honored.
    pub skip_allowed: bool,
    /// Number of playable phases.
    pub phase_count: usize,
}

/// Side effects, executed in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEffect {
    /// Load the main asset and show the media view.
    LoadMain,
    /// Load the asset of the given phase and show it.
    LoadPhase(usize),
    /// Start the loaded resource.
    Play,
    /// Restart the active resource from the beginning.
    Restart,
    /// Move the active resource to just before its end.
    SeekToEnd,
    /// Pause the active resource.
    Pause,
    /// Release the active resource and detach its signals.
    Release,
    /// Begin the fixed-interval timed dialogue rotation.
    StartRotation,
    /// Cancel the rotation and clear the overlay.
    StopRotation,
    /// Show the dialogue attached to a phase.
    ShowPhaseDialogue(usize),
    /// Show the static stand-in for media that did not play.
    ShowFallback(EndReason),
    /// Show the ended notice and continue prompt.
    ShowEnded(EndReason),
    /// Report that playback ended.
    NotifyEnded,
    /// Report that the user dismissed the ended media.
    NotifyDismissed,
}

/// Result of a successful step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the step.
    pub next: MediaState,
    /// Effects to execute, in order.
    pub effects: Vec<MediaEffect>,
}

impl Transition {
    fn to(next: MediaState, effects: Vec<MediaEffect>) -> Self {
        Self { next, effects }
    }
}

fn end(reason: EndReason, mut prefix: Vec<MediaEffect>) -> Transition {
    match reason {
        EndReason::MissingAsset | EndReason::PlaybackFailed => {
            prefix.push(MediaEffect::ShowFallback(reason));
        }
        EndReason::Finished | EndReason::Skipped => {}
    }
    prefix.push(MediaEffect::ShowEnded(reason));
    prefix.push(MediaEffect::NotifyEnded);
    Transition::to(MediaState::Ended(reason), prefix)
}

/// Computes the transition for `input` in `state`. Returns `None` when the
/// input has no effect in that state.
#[must_use]
pub fn step(state: MediaState, input: MediaInput, guards: &Guards) -> Option<Transition> {
    use MediaEffect::{
        LoadMain, LoadPhase, Pause, Play, Release, Restart, SeekToEnd, ShowPhaseDialogue,
        StartRotation, StopRotation,
    };

    match (state, input) {
        (MediaState::Idle, MediaInput::Begin) if !guards.has_asset => {
            Some(end(EndReason::MissingAsset, Vec::new()))
        }
        (MediaState::Idle, MediaInput::Begin) => Some(Transition::to(
            MediaState::Playing { phase: None },
            vec![LoadMain, Play, StartRotation],
        )),

        (MediaState::Playing { .. }, MediaInput::ReachedEnd) if guards.looping => {
            Some(Transition::to(state, vec![Restart]))
        }
        (MediaState::Playing { .. }, MediaInput::ReachedEnd) => Some(end(
            EndReason::Finished,
            vec![StopRotation, Release],
        )),
        (MediaState::Playing { .. }, MediaInput::Skip) if guards.skip_allowed => Some(end(
            EndReason::Skipped,
            vec![SeekToEnd, StopRotation, Release],
        )),
        (MediaState::Playing { phase }, MediaInput::PhaseTrigger) => {
            let next = phase.map_or(0, |p| p + 1);
            (next < guards.phase_count).then(|| {
                Transition::to(
                    MediaState::PhaseTransition { phase: next },
                    vec![
                        Pause,
                        StopRotation,
                        Release,
                        LoadPhase(next),
                        ShowPhaseDialogue(next),
                        Play,
                    ],
                )
            })
        }
        (MediaState::Playing { .. } | MediaState::PhaseTransition { .. }, MediaInput::StartFailed) => {
            Some(end(
                EndReason::PlaybackFailed,
                vec![StopRotation, Release],
            ))
        }

        (MediaState::PhaseTransition { phase }, MediaInput::Started) => Some(Transition::to(
            MediaState::Playing { phase: Some(phase) },
            Vec::new(),
        )),
        (MediaState::PhaseTransition { .. }, MediaInput::Skip) if guards.skip_allowed => Some(
            end(EndReason::Skipped, vec![StopRotation, Release]),
        ),
        // Hosts need not report a start; a phase that ends or is followed
        // by another trigger is treated as having started.
        (
            MediaState::PhaseTransition { phase },
            MediaInput::ReachedEnd | MediaInput::PhaseTrigger,
        ) => step(MediaState::Playing { phase: Some(phase) }, input, guards),

        (MediaState::Ended(_), MediaInput::Continue) => Some(Transition::to(
            state,
            vec![MediaEffect::NotifyDismissed],
        )),

        _ => None,
    }
}
