// Keybindings for the gallery window
// Translates GDK key events into the toolkit-free KeyInput the controller routes.

use gdk4::{Key, ModifierType};
use gtk4::prelude::*;
use gtk4::{EventControllerKey, PropagationPhase, Widget};
use std::cell::RefCell;
use std::rc::Rc;

use crate::controller::KeyInput;

/// Callback for a translated key press; returns true when the key was consumed.
pub type KeyCallback = Box<dyn Fn(KeyInput) -> bool>;

/// Map a GDK key to the router's input, ignoring shortcuts held with Ctrl, Alt or Super.
pub fn key_input(keyval: Key, state: ModifierType) -> Option<KeyInput> {
    if state.intersects(ModifierType::CONTROL_MASK | ModifierType::ALT_MASK | ModifierType::SUPER_MASK)
    {
        return None;
    }

    let input = match keyval {
        Key::Left | Key::KP_Left => KeyInput::Left,
        Key::Right | Key::KP_Right => KeyInput::Right,
        Key::Escape => KeyInput::Escape,
        Key::ISO_Left_Tab => KeyInput::BackTab,
        Key::Tab | Key::KP_Tab => {
            if state.contains(ModifierType::SHIFT_MASK) {
                KeyInput::BackTab
            } else {
                KeyInput::Tab
            }
        }
        Key::plus | Key::KP_Add => KeyInput::Char('+'),
        Key::equal => KeyInput::Char('='),
        Key::minus | Key::KP_Subtract => KeyInput::Char('-'),
        Key::underscore => KeyInput::Char('_'),
        Key::question => KeyInput::Char('?'),
        Key::f => KeyInput::Char('f'),
        Key::F => KeyInput::Char('F'),
        Key::s => KeyInput::Char('s'),
        Key::S => KeyInput::Char('S'),
        Key::r => KeyInput::Char('r'),
        Key::R => KeyInput::Char('R'),
        _ => return None,
    };
    Some(input)
}

pub struct Keybindings {
    controller: EventControllerKey,
    on_key: Rc<RefCell<Option<KeyCallback>>>,
}

impl Keybindings {
    pub fn new() -> Self {
        let controller = EventControllerKey::new();
        // Capture phase so Tab reaches the router before GTK's own focus chain.
        controller.set_propagation_phase(PropagationPhase::Capture);

        let on_key: Rc<RefCell<Option<KeyCallback>>> = Rc::new(RefCell::new(None));

        let on_key_clone = on_key.clone();
        controller.connect_key_pressed(move |_controller, keyval, _keycode, state| {
            let Some(input) = key_input(keyval, state) else {
                return glib::Propagation::Proceed;
            };
            let handled = match *on_key_clone.borrow() {
                Some(ref callback) => callback(input),
                None => false,
            };
            if handled {
                glib::Propagation::Stop
            } else {
                glib::Propagation::Proceed
            }
        });

        Self { controller, on_key }
    }

    /// Attach keybindings to a widget (typically the main window)
    pub fn attach(&self, widget: &impl IsA<Widget>) {
        widget.add_controller(self.controller.clone());
    }

    pub fn connect_key<F>(&self, callback: F)
    where
        F: Fn(KeyInput) -> bool + 'static,
    {
        *self.on_key.borrow_mut() = Some(Box::new(callback));
    }
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keys() {
        let none = ModifierType::empty();
        assert_eq!(key_input(Key::Left, none), Some(KeyInput::Left));
        assert_eq!(key_input(Key::KP_Right, none), Some(KeyInput::Right));
        assert_eq!(key_input(Key::Escape, none), Some(KeyInput::Escape));
        assert_eq!(key_input(Key::Tab, none), Some(KeyInput::Tab));
        assert_eq!(key_input(Key::ISO_Left_Tab, none), Some(KeyInput::BackTab));
        assert_eq!(
            key_input(Key::Tab, ModifierType::SHIFT_MASK),
            Some(KeyInput::BackTab)
        );
    }

    #[test]
    fn test_character_keys() {
        let none = ModifierType::empty();
        assert_eq!(key_input(Key::equal, none), Some(KeyInput::Char('=')));
        assert_eq!(key_input(Key::KP_Add, none), Some(KeyInput::Char('+')));
        assert_eq!(key_input(Key::underscore, none), Some(KeyInput::Char('_')));
        assert_eq!(
            key_input(Key::question, ModifierType::SHIFT_MASK),
            Some(KeyInput::Char('?'))
        );
        assert_eq!(key_input(Key::S, ModifierType::SHIFT_MASK), Some(KeyInput::Char('S')));
        assert_eq!(key_input(Key::x, none), None);
    }

    #[test]
    fn test_modified_shortcuts_pass_through() {
        assert_eq!(key_input(Key::r, ModifierType::CONTROL_MASK), None);
        assert_eq!(key_input(Key::f, ModifierType::ALT_MASK), None);
    }
}
