//! Input mapping: mouse drags and key presses mapped to shared actions.
//!
//! # Invariants
//! - The app consumes [`Action`]s, never raw window events.
//! - A project only receives actions for the features it has.

pub mod action;
mod map;

pub use action::Action;
pub use map::{Button, InputMap, Key, Modifiers};

pub fn crate_info() -> &'static str {
    "shadelab-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
