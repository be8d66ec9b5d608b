pub mod handler;

pub use handler::{
    CONSOLE_HIDE_KEY, CONSOLE_SHOW_KEY, Input, KeyAction, KeyBindings, MODE_TOGGLE_KEY,
};
