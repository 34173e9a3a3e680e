// Keyboard shortcut overlay, opened with `?`.

use gtk4::prelude::*;
use gtk4::{Align, Box as GtkBox, Button, GestureClick, Grid, Label, Orientation, PickFlags};
use std::cell::RefCell;
use std::rc::Rc;

/// Shortcut table shown in the overlay.
pub const SHORTCUTS: &[(&str, &str)] = &[
    ("\u{2190} / \u{2192}", "Previous / next GIF"),
    ("Esc", "Close help, leave fullscreen, or close the viewer"),
    ("F", "Toggle fullscreen"),
    ("S", "Start or stop the slideshow"),
    ("R", "Random GIF"),
    ("+ / -", "Zoom in / out"),
    ("Tab", "Move between viewer controls"),
    ("?", "Show this help"),
];

pub struct HelpOverlay {
    backdrop: GtkBox,
    on_close: Rc<RefCell<Option<Box<dyn Fn()>>>>,
}

impl HelpOverlay {
    pub fn new() -> Self {
        let backdrop = GtkBox::new(Orientation::Vertical, 0);
        backdrop.add_css_class("help-backdrop");
        backdrop.set_hexpand(true);
        backdrop.set_vexpand(true);
        backdrop.set_visible(false);

        let card = GtkBox::new(Orientation::Vertical, 12);
        card.add_css_class("help-card");
        card.set_halign(Align::Center);
        card.set_valign(Align::Center);
        card.set_vexpand(true);

        let header = GtkBox::new(Orientation::Horizontal, 8);
        let title = Label::new(Some("Keyboard Shortcuts"));
        title.add_css_class("section-title");
        title.set_hexpand(true);
        title.set_halign(Align::Start);
        let close_button = Button::with_label("\u{2715}");
        close_button.set_tooltip_text(Some("Close (Esc)"));
        header.append(&title);
        header.append(&close_button);

        let table = Grid::new();
        table.set_row_spacing(6);
        table.set_column_spacing(24);
        for (row, (keys, action)) in SHORTCUTS.iter().enumerate() {
            let keys_label = Label::new(Some(keys));
            keys_label.add_css_class("help-key");
            keys_label.set_halign(Align::Start);
            let action_label = Label::new(Some(action));
            action_label.set_halign(Align::Start);
            table.attach(&keys_label, 0, row as i32, 1, 1);
            table.attach(&action_label, 1, row as i32, 1, 1);
        }

        card.append(&header);
        card.append(&table);
        backdrop.append(&card);

        let on_close: Rc<RefCell<Option<Box<dyn Fn()>>>> = Rc::new(RefCell::new(None));

        let on_close_clone = on_close.clone();
        close_button.connect_clicked(move |_| {
            if let Some(ref callback) = *on_close_clone.borrow() {
                callback();
            }
        });

        // Clicks that land on the backdrop itself (not the card) dismiss the overlay.
        let click = GestureClick::new();
        let on_close_clone = on_close.clone();
        let backdrop_weak = backdrop.downgrade();
        click.connect_released(move |_gesture, _n_press, x, y| {
            let Some(backdrop) = backdrop_weak.upgrade() else {
                return;
            };
            let hit = backdrop.pick(x, y, PickFlags::DEFAULT);
            if hit.as_ref() == Some(backdrop.upcast_ref::<gtk4::Widget>()) {
                if let Some(ref callback) = *on_close_clone.borrow() {
                    callback();
                }
            }
        });
        backdrop.add_controller(click);

        Self { backdrop, on_close }
    }

    pub fn widget(&self) -> &GtkBox {
        &self.backdrop
    }

    pub fn set_visible(&self, visible: bool) {
        self.backdrop.set_visible(visible);
    }

    pub fn connect_close<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        *self.on_close.borrow_mut() = Some(Box::new(callback));
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}
