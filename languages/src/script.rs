//! Text key scripts.
//!
//! A script is one line of input: plain characters are typed, and actions
//! are written in angle brackets:
//!
//! `<del> <shift> <enter> <mode> <space> <cmd> <translate> <conjugate>
//! <plural> <cancel> <emoji N>`
//!
//! A `<` that does not start a known action bracket is typed as-is.

use anyhow::{bail, Context, Result};
use scribe_core::{CommandKind, KeyEvent, KeyResult, KeyboardEngine, TextCursor};

/// One step of a key script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptAction {
    Key(KeyEvent),
    /// Open the command bar
    SelectCommand,
    /// Pick a command from the open bar
    Choose(CommandKind),
    Cancel,
    /// Insert the N-th offered emoji (0-based)
    Emoji(usize),
}

impl ScriptAction {
    /// Run the action against `engine`. A transition that does not apply in
    /// the current mode yields `Transition(false)`.
    pub fn apply<C: TextCursor>(self, engine: &mut KeyboardEngine<C>) -> ActionResult {
        match self {
            ScriptAction::Key(key) => ActionResult::Key(engine.on_key(key)),
            ScriptAction::SelectCommand => ActionResult::Transition(engine.select_command()),
            ScriptAction::Choose(kind) => ActionResult::Transition(engine.select_command_kind(kind)),
            ScriptAction::Cancel => ActionResult::Transition(engine.cancel_command()),
            ScriptAction::Emoji(index) => ActionResult::Key(engine.insert_emoji(index)),
        }
    }
}

/// Outcome of one script action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    Key(KeyResult),
    /// Whether a mode transition was available
    Transition(bool),
}

/// Parse a key script into actions.
pub fn parse_script(line: &str) -> Result<Vec<ScriptAction>> {
    let mut actions = Vec::new();
    let mut rest = line;

    while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            if let Some(end) = rest.find('>') {
                let token = &rest[1..end];
                if let Some(action) = parse_action(token)? {
                    actions.push(action);
                    rest = &rest[end + 1..];
                    continue;
                }
            }
        }
        actions.push(match ch {
            ' ' => ScriptAction::Key(KeyEvent::Space),
            '\n' => ScriptAction::Key(KeyEvent::Enter),
            c => ScriptAction::Key(KeyEvent::Char(c)),
        });
        rest = &rest[ch.len_utf8()..];
    }
    Ok(actions)
}

/// Returns `None` when `token` is not an action name at all, so the bracket
/// is typed literally.
fn parse_action(token: &str) -> Result<Option<ScriptAction>> {
    let token = token.trim();
    let action = match token {
        "del" => ScriptAction::Key(KeyEvent::Delete),
        "shift" => ScriptAction::Key(KeyEvent::Shift),
        "enter" => ScriptAction::Key(KeyEvent::Enter),
        "mode" => ScriptAction::Key(KeyEvent::ModeChange),
        "space" => ScriptAction::Key(KeyEvent::Space),
        "cmd" => ScriptAction::SelectCommand,
        "translate" => ScriptAction::Choose(CommandKind::Translate),
        "conjugate" => ScriptAction::Choose(CommandKind::Conjugate),
        "plural" => ScriptAction::Choose(CommandKind::Plural),
        "cancel" => ScriptAction::Cancel,
        _ => match token.strip_prefix("emoji") {
            Some(index) => {
                let index = index.trim();
                let index = if index.is_empty() {
                    0
                } else {
                    index
                        .parse()
                        .with_context(|| format!("invalid emoji index {:?}", index))?
                };
                ScriptAction::Emoji(index)
            }
            None if token.chars().all(|c| c.is_ascii_lowercase()) && !token.is_empty() => {
                bail!("unknown action <{}>", token)
            }
            None => return Ok(None),
        },
    };
    Ok(Some(action))
}
