//! Test stage — records every presentation command.

use vignette_core::stage::{ChatMessage, Stage, StageCommand};

/// A stage that records every command it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingStage {
    commands: Vec<StageCommand>,
}

impl RecordingStage {
    /// All commands received so far.
    #[must_use]
    pub fn commands(&self) -> &[StageCommand] {
        &self.commands
    }

    /// Returns and forgets all recorded commands.
    pub fn take(&mut self) -> Vec<StageCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Returns `true` if `command` was ever applied.
    #[must_use]
    pub fn contains(&self, command: &StageCommand) -> bool {
        self.commands.contains(command)
    }

    /// Number of times a command matching `pred` was applied.
    pub fn count(&self, pred: impl Fn(&StageCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    /// The chat log as it would currently be displayed, replaying every
    /// `AppendChat` and `ClearChat` in order.
    #[must_use]
    pub fn visible_chat(&self) -> Vec<ChatMessage> {
        let mut visible = Vec::new();
        for command in &self.commands {
            match command {
                StageCommand::ClearChat => visible.clear(),
                StageCommand::AppendChat(message) => visible.push(message.clone()),
                _ => {}
            }
        }
        visible
    }

    /// The last command applied.
    #[must_use]
    pub fn last(&self) -> Option<&StageCommand> {
        self.commands.last()
    }
}

impl Stage for RecordingStage {
    fn apply(&mut self, command: StageCommand) {
        self.commands.push(command);
    }
}
