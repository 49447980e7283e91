//! Keyboard input: the host actions a key can trigger.

mod keyboard;

pub use keyboard::KeyAction;
