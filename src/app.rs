use gtk4::prelude::*;
use gtk4::Application;
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::GalleryConfig;
use crate::models::{Catalog, PreferenceBackend};
use crate::theme::ThemeStore;
use crate::ui::MainWindow;

const APP_ID: &str = "com.gifshelf.Gallery";

/// Everything the first window needs, handed over on activation.
struct Startup {
    config: GalleryConfig,
    catalog: Catalog,
    preferences: Box<dyn PreferenceBackend>,
}

pub struct GalleryApp {
    app: Application,
}

impl GalleryApp {
    pub fn new(
        config: GalleryConfig,
        catalog: Catalog,
        preferences: Box<dyn PreferenceBackend>,
    ) -> Self {
        let app = Application::builder()
            .application_id(APP_ID)
            .flags(gio::ApplicationFlags::NON_UNIQUE)
            .build();

        let pending = RefCell::new(Some(Startup {
            config,
            catalog,
            preferences,
        }));
        // Keeps the window alive for the lifetime of the application.
        let window_slot: Rc<RefCell<Option<Rc<MainWindow>>>> = Rc::new(RefCell::new(None));

        app.connect_activate(move |app| {
            if let Some(window) = window_slot.borrow().as_ref() {
                window.present();
                return;
            }
            let Some(startup) = pending.borrow_mut().take() else {
                return;
            };
            let theme = ThemeStore::load(startup.preferences);
            let window = MainWindow::new(app, &startup.config, startup.catalog, theme);
            window.present();
            *window_slot.borrow_mut() = Some(window);
        });

        Self { app }
    }

    /// Run the main loop. Command line parsing already happened, so GTK sees no arguments.
    pub fn run(&self) -> i32 {
        let program = std::env::args().next().unwrap_or_else(|| "gifshelf".to_string());
        self.app.run_with_args(&[program]).into()
    }
}
