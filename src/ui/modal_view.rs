// Modal detail view
// Backdrop + card showing the open item, its controls and the animated frames.

use gdk4::{MemoryFormat, MemoryTexture, Texture};
use gtk4::prelude::*;
use gtk4::{
    Align, Box as GtkBox, Button, ContentFit, GestureClick, Label, Orientation, PickFlags,
    Picture, PolicyType, ScrolledWindow,
};
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::controller::{ModalControl, ModalView};
use crate::image_loader::{dimensions_label, FrameData};

pub type ControlCallback = Box<dyn Fn(ModalControl)>;

/// Decoded frames of one item, uploaded as textures.
pub struct AnimatedFrames {
    pub width: u32,
    pub height: u32,
    /// Decoded RGBA bytes behind the textures.
    pub byte_size: usize,
    frames: Vec<(Texture, Duration)>,
}

impl AnimatedFrames {
    pub fn from_decoded(decoded: Vec<FrameData>) -> Option<Self> {
        let (width, height) = decoded.first().map(|f| (f.width, f.height))?;
        let byte_size = decoded.iter().map(|frame| frame.pixels.len()).sum();
        let frames = decoded
            .into_iter()
            .map(|frame| {
                let stride = frame.width as usize * 4;
                let bytes = glib::Bytes::from_owned(frame.pixels);
                let texture = MemoryTexture::new(
                    frame.width as i32,
                    frame.height as i32,
                    MemoryFormat::R8g8b8a8,
                    &bytes,
                    stride,
                );
                (texture.upcast::<Texture>(), frame.delay)
            })
            .collect();
        Some(Self {
            width,
            height,
            byte_size,
            frames,
        })
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }
}

fn control_label(control: ModalControl) -> &'static str {
    match control {
        ModalControl::Close => "\u{2715}",
        ModalControl::Prev => "\u{2039}",
        ModalControl::Next => "\u{203a}",
        ModalControl::Download => "Download",
        ModalControl::CopyLink => "Copy Link",
        ModalControl::Fullscreen => "Fullscreen",
        ModalControl::ZoomOut => "\u{2212}",
        ModalControl::ZoomReset => "100%",
        ModalControl::ZoomIn => "+",
    }
}

fn zoom_label(zoom: f64) -> String {
    format!("{:.0}%", zoom * 100.0)
}

pub struct ModalOverlay {
    self_weak: RefCell<Weak<ModalOverlay>>,
    backdrop: GtkBox,
    title_label: Label,
    position_label: Label,
    meta_label: Label,
    scroller: ScrolledWindow,
    picture: Picture,
    buttons: Vec<(ModalControl, Button)>,
    media: RefCell<Option<Rc<AnimatedFrames>>>,
    frame_index: Cell<usize>,
    frame_timer: RefCell<Option<glib::SourceId>>,
    zoom: Cell<f64>,
    on_control: Rc<RefCell<Option<ControlCallback>>>,
    on_backdrop: Rc<RefCell<Option<Box<dyn Fn()>>>>,
}

impl ModalOverlay {
    pub fn new() -> Rc<Self> {
        let backdrop = GtkBox::new(Orientation::Vertical, 0);
        backdrop.add_css_class("modal-backdrop");
        backdrop.set_hexpand(true);
        backdrop.set_vexpand(true);
        backdrop.set_visible(false);

        let card = GtkBox::new(Orientation::Vertical, 8);
        card.add_css_class("modal-card");
        card.set_halign(Align::Fill);
        card.set_valign(Align::Fill);
        card.set_hexpand(true);
        card.set_vexpand(true);
        card.set_margin_start(32);
        card.set_margin_end(32);
        card.set_margin_top(24);
        card.set_margin_bottom(24);

        let buttons: Vec<(ModalControl, Button)> = ModalControl::ORDER
            .iter()
            .map(|&control| {
                let button = Button::with_label(control_label(control));
                button.set_tooltip_text(Some(control.tooltip()));
                button.add_css_class("modal-control");
                (control, button)
            })
            .collect();
        let button = |control: ModalControl| {
            buttons
                .iter()
                .find(|(c, _)| *c == control)
                .map(|(_, b)| b.clone())
        };

        // Header: title, position, close
        let header = GtkBox::new(Orientation::Horizontal, 8);
        let title_label = Label::new(None);
        title_label.add_css_class("modal-title");
        title_label.set_hexpand(true);
        title_label.set_halign(Align::Start);
        title_label.set_ellipsize(gtk4::pango::EllipsizeMode::End);
        let position_label = Label::new(None);
        position_label.add_css_class("muted");
        header.append(&title_label);
        header.append(&position_label);
        if let Some(close) = button(ModalControl::Close) {
            header.append(&close);
        }

        // Stage: prev, image, next
        let stage = GtkBox::new(Orientation::Horizontal, 8);
        stage.set_vexpand(true);
        let picture = Picture::new();
        picture.set_content_fit(ContentFit::Contain);
        picture.set_can_shrink(true);
        picture.set_halign(Align::Center);
        picture.set_valign(Align::Center);
        picture.add_css_class("modal-image");
        let scroller = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Automatic)
            .vscrollbar_policy(PolicyType::Automatic)
            .hexpand(true)
            .vexpand(true)
            .child(&picture)
            .build();
        if let Some(prev) = button(ModalControl::Prev) {
            prev.set_valign(Align::Center);
            stage.append(&prev);
        }
        stage.append(&scroller);
        if let Some(next) = button(ModalControl::Next) {
            next.set_valign(Align::Center);
            stage.append(&next);
        }

        let meta_label = Label::new(None);
        meta_label.add_css_class("muted");
        meta_label.set_halign(Align::Start);

        // Footer: actions and zoom
        let footer = GtkBox::new(Orientation::Horizontal, 6);
        footer.set_halign(Align::Center);
        for control in [
            ModalControl::Download,
            ModalControl::CopyLink,
            ModalControl::Fullscreen,
            ModalControl::ZoomOut,
            ModalControl::ZoomReset,
            ModalControl::ZoomIn,
        ] {
            if let Some(b) = button(control) {
                footer.append(&b);
            }
        }

        card.append(&header);
        card.append(&stage);
        card.append(&meta_label);
        card.append(&footer);
        backdrop.append(&card);

        let on_control: Rc<RefCell<Option<ControlCallback>>> = Rc::new(RefCell::new(None));
        let on_backdrop: Rc<RefCell<Option<Box<dyn Fn()>>>> = Rc::new(RefCell::new(None));

        for (control, button) in &buttons {
            let control = *control;
            let on_control = on_control.clone();
            button.connect_clicked(move |_| {
                if let Some(ref callback) = *on_control.borrow() {
                    callback(control);
                }
            });
        }

        let click = GestureClick::new();
        let on_backdrop_clone = on_backdrop.clone();
        let backdrop_weak = backdrop.downgrade();
        click.connect_released(move |_gesture, _n_press, x, y| {
            let Some(backdrop) = backdrop_weak.upgrade() else {
                return;
            };
            let hit = backdrop.pick(x, y, PickFlags::DEFAULT);
            if hit.as_ref() == Some(backdrop.upcast_ref::<gtk4::Widget>()) {
                if let Some(ref callback) = *on_backdrop_clone.borrow() {
                    callback();
                }
            }
        });
        backdrop.add_controller(click);

        let overlay = Rc::new(Self {
            self_weak: RefCell::new(Weak::new()),
            backdrop,
            title_label,
            position_label,
            meta_label,
            scroller,
            picture,
            buttons,
            media: RefCell::new(None),
            frame_index: Cell::new(0),
            frame_timer: RefCell::new(None),
            zoom: Cell::new(1.0),
            on_control,
            on_backdrop,
        });
        *overlay.self_weak.borrow_mut() = Rc::downgrade(&overlay);
        overlay
    }

    pub fn widget(&self) -> &GtkBox {
        &self.backdrop
    }

    pub fn button(&self, control: ModalControl) -> Option<&Button> {
        self.buttons
            .iter()
            .find(|(c, _)| *c == control)
            .map(|(_, b)| b)
    }

    /// The control a focused widget belongs to, if any.
    pub fn control_for(&self, widget: &gtk4::Widget) -> Option<ModalControl> {
        self.buttons
            .iter()
            .find(|(_, b)| b.upcast_ref::<gtk4::Widget>() == widget)
            .map(|(c, _)| *c)
    }

    pub fn connect_control<F>(&self, callback: F)
    where
        F: Fn(ModalControl) + 'static,
    {
        *self.on_control.borrow_mut() = Some(Box::new(callback));
    }

    pub fn connect_backdrop_clicked<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        *self.on_backdrop.borrow_mut() = Some(Box::new(callback));
    }

    /// Show `view`. Media is swapped separately once it has been decoded.
    pub fn present(&self, view: &ModalView) {
        self.backdrop.set_visible(true);
        self.title_label.set_text(&view.title);
        self.position_label.set_text(&view.position_text);

        if let Some(reset) = self.button(ModalControl::ZoomReset) {
            reset.set_label(&zoom_label(view.zoom));
        }
        if let Some(copy) = self.button(ModalControl::CopyLink) {
            if view.copied_feedback {
                copy.set_label("Copied!");
                copy.set_tooltip_text(Some("Copied!"));
                copy.add_css_class("copied");
            } else {
                copy.set_label(control_label(ModalControl::CopyLink));
                copy.set_tooltip_text(Some(ModalControl::CopyLink.tooltip()));
                copy.remove_css_class("copied");
            }
        }

        if self.zoom.replace(view.zoom) != view.zoom {
            self.apply_zoom();
        }
    }

    pub fn hide(&self) {
        self.stop_animation();
        self.media.replace(None);
        self.picture.set_paintable(None::<&gdk4::Paintable>);
        self.meta_label.set_text("");
        self.zoom.set(1.0);
        self.backdrop.set_visible(false);
    }

    pub fn is_visible(&self) -> bool {
        self.backdrop.is_visible()
    }

    pub fn set_fullscreen_state(&self, fullscreen: bool) {
        if let Some(button) = self.button(ModalControl::Fullscreen) {
            let text = if fullscreen {
                "Exit Fullscreen"
            } else {
                "Fullscreen"
            };
            button.set_label(text);
            button.set_tooltip_text(Some(text));
        }
    }

    /// Placeholder shown while frames are decoded off the main thread.
    pub fn show_loading(&self, source: &Path) {
        self.stop_animation();
        self.media.replace(None);
        self.picture.set_filename(Some(source));
        self.meta_label.set_text("Dimensions: loading");
    }

    pub fn show_unavailable(&self) {
        self.meta_label.set_text("Dimensions: unavailable");
    }

    /// Display decoded frames, looping them when `animate` is set.
    pub fn set_media(&self, media: Rc<AnimatedFrames>, animate: bool) {
        self.stop_animation();
        self.meta_label
            .set_text(&dimensions_label(media.width, media.height));
        self.frame_index.set(0);
        if let Some((texture, _)) = media.frames.first() {
            self.picture.set_paintable(Some(texture));
        }
        let should_loop = animate && media.is_animated();
        self.media.replace(Some(media));
        self.apply_zoom();
        if should_loop {
            self.schedule_next_frame();
        }
    }

    fn schedule_next_frame(&self) {
        let delay = {
            let media = self.media.borrow();
            let Some(media) = media.as_ref() else {
                return;
            };
            match media.frames.get(self.frame_index.get()) {
                Some((_, delay)) => *delay,
                None => return,
            }
        };

        let weak_self = self.self_weak.borrow().clone();
        let source = glib::timeout_add_local_once(delay, move || {
            if let Some(overlay) = weak_self.upgrade() {
                // This source has fired; forget it before scheduling the next one.
                overlay.frame_timer.replace(None);
                overlay.advance_frame();
            }
        });
        self.frame_timer.replace(Some(source));
    }

    fn advance_frame(&self) {
        {
            let media = self.media.borrow();
            let Some(media) = media.as_ref() else {
                return;
            };
            if media.frames.is_empty() {
                return;
            }
            let next = (self.frame_index.get() + 1) % media.frames.len();
            self.frame_index.set(next);
            self.picture.set_paintable(Some(&media.frames[next].0));
        }
        self.schedule_next_frame();
    }

    fn stop_animation(&self) {
        if let Some(source) = self.frame_timer.take() {
            source.remove();
        }
    }

    fn apply_zoom(&self) {
        let zoom = self.zoom.get();
        let natural = self
            .media
            .borrow()
            .as_ref()
            .map(|media| (media.width as f64, media.height as f64));
        let Some((width, height)) = natural.filter(|(w, h)| *w > 0.0 && *h > 0.0) else {
            self.picture.set_size_request(-1, -1);
            return;
        };

        let avail_w = f64::from(self.scroller.width().max(1));
        let avail_h = f64::from(self.scroller.height().max(1));
        let fit = (avail_w / width).min(avail_h / height).min(1.0);
        let req_w = (width * fit * zoom).round() as i32;
        let req_h = (height * fit * zoom).round() as i32;
        self.picture.set_size_request(req_w.max(1), req_h.max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_label() {
        assert_eq!(zoom_label(1.0), "100%");
        assert_eq!(zoom_label(1.4), "140%");
        assert_eq!(zoom_label(0.5), "50%");
    }

    #[test]
    fn test_every_control_has_a_label() {
        for control in ModalControl::ORDER {
            assert!(!control_label(control).is_empty());
        }
    }
}
