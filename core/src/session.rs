//! Keyboard session state: the editing mode and the command input.
//!
//! `Mode` is the single source of truth for how keys are interpreted. It only
//! changes through the explicit transition methods on [`KeyboardSession`];
//! typing never changes it as a side effect.

use std::fmt;

use crate::command_bar::CommandBuffer;

/// The three linguistic commands the keyboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Translate,
    Conjugate,
    Plural,
}

impl CommandKind {
    /// All kinds, in toolbar order.
    pub const ALL: [CommandKind; 3] = [Self::Translate, Self::Conjugate, Self::Plural];

    pub fn name(self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Conjugate => "conjugate",
            Self::Plural => "plural",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current editing mode of the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Plain typing into the host document
    #[default]
    Idle,
    /// Command bar open, no command chosen yet
    SelectingCommand,
    AwaitingTranslateInput,
    AwaitingConjugateInput,
    AwaitingPluralInput,
}

impl Mode {
    /// The mode that waits for input of `kind`.
    pub fn awaiting(kind: CommandKind) -> Self {
        match kind {
            CommandKind::Translate => Self::AwaitingTranslateInput,
            CommandKind::Conjugate => Self::AwaitingConjugateInput,
            CommandKind::Plural => Self::AwaitingPluralInput,
        }
    }

    /// Command whose input is being typed, if any.
    pub fn command_kind(self) -> Option<CommandKind> {
        match self {
            Self::AwaitingTranslateInput => Some(CommandKind::Translate),
            Self::AwaitingConjugateInput => Some(CommandKind::Conjugate),
            Self::AwaitingPluralInput => Some(CommandKind::Plural),
            Self::Idle | Self::SelectingCommand => None,
        }
    }

    /// Buffer that receives typed text in this mode.
    pub fn edit_target(self) -> EditTarget {
        if self.command_kind().is_some() {
            EditTarget::CommandBar
        } else {
            EditTarget::Main
        }
    }

    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }
}

/// Which buffer an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// The host document, reached through the text cursor
    Main,
    /// The command bar's own input
    CommandBar,
}

/// Mode plus the command input it owns.
#[derive(Debug, Clone, Default)]
pub struct KeyboardSession {
    mode: Mode,
    command_input: CommandBuffer,
}

impl KeyboardSession {
    /// Create a session in `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn command_input(&self) -> &CommandBuffer {
        &self.command_input
    }

    pub fn command_input_mut(&mut self) -> &mut CommandBuffer {
        &mut self.command_input
    }

    /// `Idle` → `SelectingCommand`. Returns whether the transition happened.
    pub fn select_command(&mut self) -> bool {
        if self.mode != Mode::Idle {
            return false;
        }
        self.mode = Mode::SelectingCommand;
        true
    }

    /// `SelectingCommand` → `Awaiting*Input` for `kind`.
    pub fn select_command_kind(&mut self, kind: CommandKind) -> bool {
        if self.mode != Mode::SelectingCommand {
            return false;
        }
        self.command_input.clear();
        self.mode = Mode::awaiting(kind);
        true
    }

    /// Any non-idle mode → `Idle`, discarding command input.
    pub fn cancel_command(&mut self) -> bool {
        if self.mode == Mode::Idle {
            return false;
        }
        self.command_input.clear();
        self.mode = Mode::Idle;
        true
    }

    /// `Awaiting*Input` → `Idle` after a submitted command.
    pub(crate) fn complete_command(&mut self) {
        debug_assert!(self.mode.command_kind().is_some());
        self.command_input.clear();
        self.mode = Mode::Idle;
    }

    /// Reset to a fresh session.
    pub fn clear(&mut self) {
        self.command_input.clear();
        self.mode = Mode::Idle;
    }
}
