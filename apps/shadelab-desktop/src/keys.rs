use shadelab_input::{Button, Key, Modifiers};
use winit::event::MouseButton;
use winit::keyboard::{KeyCode, ModifiersState};

pub fn key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::F1 => Key::F1,
        KeyCode::F6 => Key::F6,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyN => Key::N,
        KeyCode::Digit0 | KeyCode::Numpad0 => Key::Digit0,
        KeyCode::Digit1 | KeyCode::Numpad1 => Key::Digit1,
        KeyCode::Digit2 | KeyCode::Numpad2 => Key::Digit2,
        KeyCode::Digit3 | KeyCode::Numpad3 => Key::Digit3,
        _ => return None,
    })
}

pub fn button(button: MouseButton) -> Option<Button> {
    match button {
        MouseButton::Left => Some(Button::Left),
        MouseButton::Right => Some(Button::Right),
        _ => None,
    }
}

pub fn modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        ctrl: state.control_key(),
        alt: state.alt_key(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_project_keys() {
        assert_eq!(key(KeyCode::KeyP), Some(Key::P));
        assert_eq!(key(KeyCode::Numpad2), Some(Key::Digit2));
        assert_eq!(key(KeyCode::F6), Some(Key::F6));
        assert_eq!(key(KeyCode::KeyW), None);
    }

    #[test]
    fn maps_buttons() {
        assert_eq!(button(MouseButton::Left), Some(Button::Left));
        assert_eq!(button(MouseButton::Middle), None);
    }

    #[test]
    fn maps_modifiers() {
        let m = modifiers(ModifiersState::CONTROL | ModifiersState::SHIFT);
        assert!(m.ctrl);
        assert!(!m.alt);
    }
}
