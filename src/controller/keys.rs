// Keyboard routing for the gallery
//
// Keys (modal open):
// - Left / Right: previous / next item
// - f: Toggle fullscreen
// - s: Toggle slideshow
// - r: Random item
// - + / =, - / _: Zoom in / out
// - Tab / Shift+Tab: Cycle focus inside the modal
//
// Keys (anywhere):
// - Escape: Close help, else leave fullscreen, else close the modal
// - ?: Open help (only when neither the modal nor help is showing)

use tracing::warn;

use super::focus::FocusDirection;
use super::host::Host;
use super::modal::{ModalController, ZOOM_STEP};

/// Toolkit-independent key events the router understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Left,
    Right,
    Escape,
    Tab,
    BackTab,
    Char(char),
}

/// Route a key press. Returns true when the key was consumed.
pub fn route_key<H: Host>(controller: &mut ModalController<H>, key: KeyInput) -> bool {
    let modal_open = controller.state().is_open();
    let help_open = controller.state().help_open();

    if key == KeyInput::Char('?') && !modal_open && !help_open {
        return controller.open_help();
    }

    if key == KeyInput::Escape {
        if help_open {
            controller.close_help();
            return true;
        }
        if controller.host().is_fullscreen() {
            // Leaving fullscreen is the whole keystroke; closing is only the fallback.
            if let Err(err) = controller.exit_fullscreen() {
                warn!(error = %err, "Failed to exit fullscreen, closing modal instead");
                controller.close();
            }
            return true;
        }
        if modal_open {
            controller.close();
            return true;
        }
        return false;
    }

    if !modal_open {
        return false;
    }

    match key {
        KeyInput::Left => {
            controller.prev();
        }
        KeyInput::Right => {
            controller.next();
        }
        KeyInput::Tab => {
            controller.move_focus(FocusDirection::Forward);
        }
        KeyInput::BackTab => {
            controller.move_focus(FocusDirection::Backward);
        }
        KeyInput::Char('f' | 'F') => {
            controller.toggle_fullscreen();
        }
        KeyInput::Char('s' | 'S') => {
            controller.toggle_slideshow();
        }
        KeyInput::Char('r' | 'R') => {
            controller.random();
        }
        KeyInput::Char('+' | '=') => {
            controller.zoom_by(ZOOM_STEP);
        }
        KeyInput::Char('-' | '_') => {
            controller.zoom_by(-ZOOM_STEP);
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::focus::ModalControl;
    use crate::controller::host::Timer;
    use crate::controller::testing::controller;

    #[test]
    fn test_keys_ignored_while_closed() {
        let mut ctrl = controller(4);
        for key in [
            KeyInput::Left,
            KeyInput::Right,
            KeyInput::Tab,
            KeyInput::Char('f'),
            KeyInput::Char('s'),
            KeyInput::Char('r'),
            KeyInput::Char('+'),
            KeyInput::Escape,
        ] {
            assert!(!route_key(&mut ctrl, key), "{:?} should be ignored", key);
        }
        assert!(!ctrl.state().is_open());
        assert!(ctrl.host().timers.is_empty());
    }

    #[test]
    fn test_navigation_and_zoom_keys() {
        let mut ctrl = controller(4);
        ctrl.open(1);
        assert!(route_key(&mut ctrl, KeyInput::Right));
        assert_eq!(ctrl.state().open_index(), Some(2));
        assert!(route_key(&mut ctrl, KeyInput::Left));
        assert!(route_key(&mut ctrl, KeyInput::Left));
        assert_eq!(ctrl.state().open_index(), Some(0));

        assert!(route_key(&mut ctrl, KeyInput::Char('=')));
        assert!(route_key(&mut ctrl, KeyInput::Char('+')));
        assert!((ctrl.state().zoom() - 1.4).abs() < 1e-9);
        assert!(route_key(&mut ctrl, KeyInput::Char('_')));
        assert!((ctrl.state().zoom() - 1.2).abs() < 1e-9);

        assert!(!route_key(&mut ctrl, KeyInput::Char('x')));
    }

    #[test]
    fn test_slideshow_random_and_fullscreen_keys() {
        let mut ctrl = controller(4);
        ctrl.open(0);
        assert!(route_key(&mut ctrl, KeyInput::Char('S')));
        assert!(ctrl.state().slideshow_active());
        assert!(ctrl.host().timer(Timer::SlideshowAdvance).is_some());

        ctrl.host_mut().random_values.push_back(2);
        assert!(route_key(&mut ctrl, KeyInput::Char('r')));
        assert_eq!(ctrl.state().open_index(), Some(2));

        assert!(route_key(&mut ctrl, KeyInput::Char('f')));
        assert!(ctrl.host().fullscreen);
    }

    #[test]
    fn test_escape_leaves_fullscreen_before_closing() {
        let mut ctrl = controller(3);
        ctrl.open(0);
        route_key(&mut ctrl, KeyInput::Char('F'));
        assert!(ctrl.host().fullscreen);

        assert!(route_key(&mut ctrl, KeyInput::Escape));
        assert!(!ctrl.host().fullscreen);
        assert!(ctrl.state().is_open());

        assert!(route_key(&mut ctrl, KeyInput::Escape));
        assert!(!ctrl.state().is_open());
    }

    #[test]
    fn test_escape_falls_back_to_close_when_fullscreen_exit_fails() {
        let mut ctrl = controller(3);
        ctrl.open(0);
        route_key(&mut ctrl, KeyInput::Char('f'));
        ctrl.host_mut().exit_fullscreen_fails = true;

        assert!(route_key(&mut ctrl, KeyInput::Escape));
        assert!(!ctrl.state().is_open());
    }

    #[test]
    fn test_help_key_precedence() {
        let mut ctrl = controller(3);
        assert!(route_key(&mut ctrl, KeyInput::Char('?')));
        assert!(ctrl.state().help_open());
        assert!(!route_key(&mut ctrl, KeyInput::Char('?')));

        assert!(route_key(&mut ctrl, KeyInput::Escape));
        assert!(!ctrl.state().help_open());

        ctrl.open(0);
        assert!(!route_key(&mut ctrl, KeyInput::Char('?')));
        assert!(!ctrl.state().help_open());
    }

    #[test]
    fn test_tab_cycles_inside_modal() {
        let mut ctrl = controller(3);
        ctrl.open(0);
        assert_eq!(ctrl.host().focused_control, Some(ModalControl::Close));

        assert!(route_key(&mut ctrl, KeyInput::BackTab));
        assert_eq!(ctrl.host().focused_control, Some(ModalControl::ZoomIn));
        assert!(route_key(&mut ctrl, KeyInput::Tab));
        assert_eq!(ctrl.host().focused_control, Some(ModalControl::Close));
        assert!(route_key(&mut ctrl, KeyInput::Tab));
        assert_eq!(ctrl.host().focused_control, Some(ModalControl::Prev));
    }
}
