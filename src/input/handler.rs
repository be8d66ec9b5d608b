use std::collections::HashMap;
use std::fmt::Debug;

use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use crate::error::ConfigError;

/// Shows the game console
pub const CONSOLE_SHOW_KEY: KeyCode = KeyCode::PageUp;
/// Hides the game console
pub const CONSOLE_HIDE_KEY: KeyCode = KeyCode::PageDown;
/// Flips between autonomous and demonstration mode
pub const MODE_TOGGLE_KEY: KeyCode = KeyCode::Backspace;

/// One input read from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    /// A key was pressed
    Key(KeyCode),
    /// Nothing happened before the tick delay ran out
    NoInput,
    /// Some other terminal event, such as a resize
    Other,
}

impl From<KeyEvent> for Input {
    fn from(key: KeyEvent) -> Self {
        Input::Key(key.code)
    }
}

impl From<KeyCode> for Input {
    fn from(code: KeyCode) -> Self {
        Input::Key(code)
    }
}

/// What an input means to the UI loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction<A> {
    ShowConsole,
    HideConsole,
    ToggleMode,
    /// The input is bound to a game action
    GameAction(A),
    /// Nothing was pressed and nothing is bound to the timeout
    Idle,
    None,
}

/// Mapping from inputs to game actions
#[derive(Debug, Clone)]
pub struct KeyBindings<A> {
    bindings: HashMap<Input, A>,
}

impl<A: Clone + Debug> KeyBindings<A> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind an input to an action, replacing any earlier binding
    pub fn bind(mut self, input: impl Into<Input>, action: A) -> Self {
        self.bindings.insert(input.into(), action);
        self
    }

    /// Bind the "no input" timeout to an action
    pub fn bind_idle(self, action: A) -> Self {
        self.bind(Input::NoInput, action)
    }

    pub fn get(&self, input: &Input) -> Option<&A> {
        self.bindings.get(input)
    }

    /// Reject bindings on the console keys
    ///
    /// Bindings on the mode toggle key are allowed but can never fire.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (input, action) in &self.bindings {
            match input {
                Input::Key(code) if *code == CONSOLE_SHOW_KEY || *code == CONSOLE_HIDE_KEY => {
                    return Err(ConfigError::ReservedKey {
                        key: format!("{code:?}"),
                        action: format!("{action:?}"),
                    });
                }
                Input::Key(code) if *code == MODE_TOGGLE_KEY => {
                    warn!(?action, "Action bound to the mode toggle key will never fire");
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Decide what an input means, before the mode is taken into account
    pub fn handle_input(&self, input: Input) -> KeyAction<A> {
        match input {
            Input::Key(code) if code == CONSOLE_SHOW_KEY => KeyAction::ShowConsole,
            Input::Key(code) if code == CONSOLE_HIDE_KEY => KeyAction::HideConsole,
            Input::Key(code) if code == MODE_TOGGLE_KEY => KeyAction::ToggleMode,
            other => match (self.bindings.get(&other), other) {
                (Some(action), _) => KeyAction::GameAction(action.clone()),
                (None, Input::NoInput) => KeyAction::Idle,
                (None, _) => KeyAction::None,
            },
        }
    }
}

impl<A: Clone + Debug> Default for KeyBindings<A> {
    fn default() -> Self {
        Self::new()
    }
}
