// Gallery grid widget
// Draws a GalleryProjection: every render clears the grid and attaches fresh cards.

use gtk4::prelude::*;
use gtk4::{
    Align, Box as GtkBox, Button, ContentFit, Grid, Label, Orientation, Picture, Widget,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::layout::{Card, GalleryProjection};

const CARD_SPACING: i32 = 12;
const CARD_IMAGE_HEIGHT: i32 = 180;

pub type OpenCardCallback = Box<dyn Fn(usize)>;
pub type LoadMoreCallback = Box<dyn Fn()>;

pub struct GalleryGrid {
    root: GtkBox,
    grid: Grid,
    load_more_button: Button,
    empty_label: Label,
    on_open: Rc<RefCell<Option<OpenCardCallback>>>,
    on_load_more: Rc<RefCell<Option<LoadMoreCallback>>>,
}

impl GalleryGrid {
    pub fn new() -> Self {
        let root = GtkBox::new(Orientation::Vertical, CARD_SPACING);
        root.add_css_class("gallery");
        root.set_margin_start(CARD_SPACING);
        root.set_margin_end(CARD_SPACING);
        root.set_margin_top(CARD_SPACING);
        root.set_margin_bottom(CARD_SPACING);

        let grid = Grid::new();
        grid.set_column_homogeneous(true);
        grid.set_row_spacing(CARD_SPACING as u32);
        grid.set_column_spacing(CARD_SPACING as u32);
        grid.add_css_class("gallery-grid");

        let empty_label = Label::new(Some("No GIFs to show"));
        empty_label.add_css_class("muted");
        empty_label.set_visible(false);

        let load_more_button = Button::with_label("Load More");
        load_more_button.set_halign(Align::Center);
        load_more_button.add_css_class("load-more");

        root.append(&grid);
        root.append(&empty_label);
        root.append(&load_more_button);

        let on_open: Rc<RefCell<Option<OpenCardCallback>>> = Rc::new(RefCell::new(None));
        let on_load_more: Rc<RefCell<Option<LoadMoreCallback>>> = Rc::new(RefCell::new(None));

        let on_load_more_clone = on_load_more.clone();
        load_more_button.connect_clicked(move |_| {
            if let Some(ref callback) = *on_load_more_clone.borrow() {
                callback();
            }
        });

        Self {
            root,
            grid,
            load_more_button,
            empty_label,
            on_open,
            on_load_more,
        }
    }

    pub fn widget(&self) -> &GtkBox {
        &self.root
    }

    pub fn connect_open<F>(&self, callback: F)
    where
        F: Fn(usize) + 'static,
    {
        *self.on_open.borrow_mut() = Some(Box::new(callback));
    }

    pub fn connect_load_more<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        *self.on_load_more.borrow_mut() = Some(Box::new(callback));
    }

    /// Replace the grid contents with `projection`.
    pub fn render(&self, projection: &GalleryProjection) {
        while let Some(child) = self.grid.first_child() {
            self.grid.remove(&child);
        }

        for card in &projection.cards {
            let widget = self.build_card(card);
            self.grid
                .attach(&widget, card.col as i32, card.row as i32, 1, 1);
        }

        self.empty_label.set_visible(projection.cards.is_empty());
        self.load_more_button
            .set_visible(projection.load_more_visible);
        tracing::debug!(
            cards = projection.cards.len(),
            columns = projection.columns,
            rows = projection.row_count(),
            "Rendered gallery"
        );
    }

    fn build_card(&self, card: &Card) -> Widget {
        let content = GtkBox::new(Orientation::Vertical, 6);

        let picture = Picture::new();
        picture.set_content_fit(ContentFit::Cover);
        picture.set_can_shrink(true);
        picture.set_size_request(-1, CARD_IMAGE_HEIGHT);
        picture.set_alternative_text(Some(&card.title));
        picture.add_css_class("card-image");

        // The file is only read once the card is on screen.
        let source: PathBuf = card.source.clone();
        picture.connect_map(move |picture| {
            if picture.paintable().is_none() {
                picture.set_filename(Some(&source));
            }
        });

        let title = Label::new(Some(&card.title));
        title.set_ellipsize(gtk4::pango::EllipsizeMode::End);
        title.set_halign(Align::Start);
        title.add_css_class("card-title");

        content.append(&picture);
        content.append(&title);

        let button = Button::builder().child(&content).build();
        button.add_css_class("gif-card");
        button.set_tooltip_text(Some(&card.title));

        let filtered_index = card.filtered_index;
        let on_open = self.on_open.clone();
        button.connect_clicked(move |_| {
            if let Some(ref callback) = *on_open.borrow() {
                callback(filtered_index);
            }
        });

        button.upcast()
    }
}

impl Default for GalleryGrid {
    fn default() -> Self {
        Self::new()
    }
}
