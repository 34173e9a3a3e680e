// Main window for gifshelf
// GTK4 ApplicationWindow hosting the gallery grid, the modal and the help overlay.
// The window owns the modal controller and implements its host capabilities.

use gdk4::Display;
use gtk4::prelude::*;
use gtk4::{
    Align, Application, ApplicationWindow, Box as GtkBox, Button, CssProvider, Label,
    Orientation, Overlay, PolicyType, ScrolledWindow, Settings, Stack, StackTransitionType,
    Widget, STYLE_PROVIDER_PRIORITY_APPLICATION,
};
use rand::Rng;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::gallery_grid::GalleryGrid;
use super::help::HelpOverlay;
use super::keybindings::Keybindings;
use super::media_cache::{MediaCache, MEDIA_CACHE_BYTES, MEDIA_CACHE_ENTRIES};
use super::modal_view::{AnimatedFrames, ModalOverlay};
use crate::config::GalleryConfig;
use crate::controller::{
    route_key, Host, HostError, KeyInput, ModalControl, ModalController, SlideshowToggle, Timer,
    TimerHandle, ZOOM_STEP,
};
use crate::image_loader::{spawn_decode_worker, DecodeLimits, MediaLoad, MediaRequest};
use crate::layout::GalleryProjection;
use crate::models::{Catalog, ColumnPreset, PreferenceBackend};
use crate::theme::{Theme, ThemeStore};

const APP_TITLE: &str = "gifshelf";
const BACK_TO_TOP_THRESHOLD: f64 = 500.0;

const ABOUT_TEXT: &str = "gifshelf\n\nA shelf of animated GIFs. Click a card to open it, \
use the arrow keys to move between GIFs and press ? for every shortcut.";

/// Embedded stylesheet; `theme-dark` / `theme-light` on the window pick the palette.
const FALLBACK_CSS: &str = r#"
window.theme-dark {
    background-color: #101014;
    color: #e6e6e6;
}

window.theme-light {
    background-color: #f6f6f4;
    color: #1c1c1c;
}

.toolbar {
    padding: 6px 12px;
    border-bottom: 1px solid alpha(currentColor, 0.12);
}

.brand {
    font-weight: bold;
    font-size: 16px;
    margin-right: 12px;
}

.nav-active,
.density-active {
    background-color: alpha(#8a5cf6, 0.35);
}

.gif-card {
    padding: 6px;
    border-radius: 8px;
}

.gif-card:hover {
    background-color: alpha(currentColor, 0.06);
}

.card-title {
    font-size: 12px;
}

.load-more {
    padding: 8px 24px;
}

.back-to-top {
    border-radius: 999px;
    min-width: 40px;
    min-height: 40px;
}

.modal-backdrop,
.help-backdrop {
    background-color: rgba(0, 0, 0, 0.85);
}

window.theme-dark .modal-card,
window.theme-dark .help-card {
    background-color: #1b1b22;
    border-radius: 12px;
    padding: 16px;
}

window.theme-light .modal-card,
window.theme-light .help-card {
    background-color: #ffffff;
    border-radius: 12px;
    padding: 16px;
}

.modal-title {
    font-size: 18px;
    font-weight: bold;
}

.copied {
    background-color: alpha(#22c55e, 0.35);
}

.help-key {
    font-family: monospace;
    font-weight: bold;
}

.muted {
    opacity: 0.7;
}

.status-bar {
    padding: 4px 12px;
    border-top: 1px solid alpha(currentColor, 0.12);
}
"#;

/// Load and apply the embedded stylesheet
fn load_css() {
    let provider = CssProvider::new();
    provider.load_from_string(FALLBACK_CSS);

    if let Some(display) = Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

fn prefers_reduced_motion() -> bool {
    Settings::default().is_some_and(|settings| !settings.is_gtk_enable_animations())
}

fn download_dir() -> Option<PathBuf> {
    let dirs = directories::UserDirs::new()?;
    Some(
        dirs.download_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dirs.home_dir().to_path_buf()),
    )
}

/// Address of the gallery page used as the base of copied links.
fn page_url_for(catalog_path: &Path) -> String {
    let absolute =
        std::fs::canonicalize(catalog_path).unwrap_or_else(|_| catalog_path.to_path_buf());
    format!("gifshelf://{}", absolute.display())
}

fn location_text(page_url: &str, fragment: Option<&str>) -> String {
    match fragment {
        Some(fragment) => format!("{}#{}", page_url, fragment),
        None => page_url.to_string(),
    }
}

fn window_title(fragment: Option<&str>) -> String {
    match fragment {
        Some(fragment) => format!("{} #{}", APP_TITLE, fragment),
        None => APP_TITLE.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavTarget {
    Home,
    Gallery,
    About,
}

impl NavTarget {
    const ALL: [NavTarget; 3] = [Self::Home, Self::Gallery, Self::About];

    fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Gallery => "Gallery",
            Self::About => "About",
        }
    }
}

/// Host capabilities backed by GTK and glib.
pub struct GtkHost {
    owner: Weak<MainWindow>,
    window: ApplicationWindow,
    modal: Rc<ModalOverlay>,
    content: GtkBox,
    location_label: Label,
    page_url: String,
    timers: Rc<RefCell<HashMap<u64, glib::SourceId>>>,
    next_timer: u64,
}

impl Host for GtkHost {
    type Focus = glib::WeakRef<Widget>;

    fn schedule(&mut self, timer: Timer, delay: Duration, repeat: bool) -> TimerHandle {
        self.next_timer += 1;
        let id = self.next_timer;
        let owner = self.owner.clone();

        let source = if repeat {
            glib::timeout_add_local(delay, move || {
                let Some(window) = owner.upgrade() else {
                    return glib::ControlFlow::Break;
                };
                window.dispatch_timer(timer);
                glib::ControlFlow::Continue
            })
        } else {
            let timers = self.timers.clone();
            glib::timeout_add_local_once(delay, move || {
                // Fired sources must never be removed again.
                timers.borrow_mut().remove(&id);
                if let Some(window) = owner.upgrade() {
                    window.dispatch_timer(timer);
                }
            })
        };
        self.timers.borrow_mut().insert(id, source);
        debug!(?timer, id, ?delay, repeat, "Scheduled timer");
        TimerHandle(id)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let source = self.timers.borrow_mut().remove(&handle.0);
        if let Some(source) = source {
            source.remove();
            debug!(id = handle.0, "Cancelled timer");
        }
    }

    fn set_fragment(&mut self, fragment: Option<&str>) {
        self.window.set_title(Some(&window_title(fragment)));
        self.location_label
            .set_text(&location_text(&self.page_url, fragment));
    }

    fn page_url(&self) -> String {
        self.page_url.clone()
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), HostError> {
        let display =
            Display::default().ok_or_else(|| HostError::Clipboard("no display".to_string()))?;
        display.clipboard().set_text(text);
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.window.is_fullscreen()
    }

    fn request_fullscreen(&mut self) -> Result<(), HostError> {
        if !self.window.is_realized() {
            return Err(HostError::Fullscreen("window is not realized".to_string()));
        }
        self.window.fullscreen();
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), HostError> {
        if !self.window.is_realized() {
            return Err(HostError::Fullscreen("window is not realized".to_string()));
        }
        self.window.unfullscreen();
        Ok(())
    }

    fn save_media(&mut self, source: &Path, file_name: &str) -> Result<PathBuf, HostError> {
        let dir = download_dir().ok_or(HostError::NoDownloadDir)?;
        let target = dir.join(file_name);
        std::fs::create_dir_all(&dir)
            .and_then(|_| std::fs::copy(source, &target))
            .map_err(|error| HostError::Download {
                source_path: source.to_path_buf(),
                target: target.clone(),
                error,
            })?;
        Ok(target)
    }

    fn prefers_reduced_motion(&self) -> bool {
        prefers_reduced_motion()
    }

    fn random_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::rng().random_range(0..len)
    }

    fn focused(&self) -> Option<Self::Focus> {
        GtkWindowExt::focus(&self.window).map(|widget| widget.downgrade())
    }

    fn focused_control(&self) -> Option<ModalControl> {
        GtkWindowExt::focus(&self.window).and_then(|widget| self.modal.control_for(&widget))
    }

    fn focus_control(&mut self, control: ModalControl) {
        if let Some(button) = self.modal.button(control) {
            button.grab_focus();
        }
    }

    fn restore_focus(&mut self, target: &Self::Focus) -> bool {
        let Some(widget) = target.upgrade() else {
            return false;
        };
        // The background is insensitive while the modal is up.
        self.content.set_sensitive(true);
        if widget.root().is_none() || !widget.is_visible() {
            return false;
        }
        widget.grab_focus()
    }
}

/// Main window for the gallery
pub struct MainWindow {
    self_weak: Weak<MainWindow>,
    window: ApplicationWindow,
    controller: RefCell<ModalController<GtkHost>>,
    theme: RefCell<ThemeStore<Box<dyn PreferenceBackend>>>,
    keybindings: Keybindings,
    stack: Stack,
    content: GtkBox,
    scroller: ScrolledWindow,
    grid: GalleryGrid,
    modal: Rc<ModalOverlay>,
    help: HelpOverlay,
    status_label: Label,
    notice_label: Label,
    theme_button: Button,
    slideshow_button: Button,
    back_to_top: Button,
    density_buttons: Vec<(ColumnPreset, Button)>,
    nav_buttons: Vec<(NavTarget, Button)>,
    last_projection: RefCell<Option<GalleryProjection>>,
    shown_source: RefCell<Option<PathBuf>>,
    media_generation: Arc<AtomicU64>,
    media_cache: RefCell<MediaCache<Rc<AnimatedFrames>>>,
    media_requests: async_channel::Sender<MediaRequest>,
}

impl MainWindow {
    pub fn new(
        app: &Application,
        config: &GalleryConfig,
        catalog: Catalog,
        theme: ThemeStore<Box<dyn PreferenceBackend>>,
    ) -> Rc<Self> {
        // Load CSS before creating widgets
        load_css();

        let window = ApplicationWindow::builder()
            .application(app)
            .title(APP_TITLE)
            .default_width(1200)
            .default_height(800)
            .build();

        // Toolbar: brand, navigation, density, actions
        let toolbar = GtkBox::new(Orientation::Horizontal, 6);
        toolbar.add_css_class("toolbar");

        let brand = Label::new(Some(APP_TITLE));
        brand.add_css_class("brand");
        toolbar.append(&brand);

        let nav_buttons: Vec<(NavTarget, Button)> = NavTarget::ALL
            .iter()
            .map(|&target| {
                let button = Button::with_label(target.label());
                button.add_css_class("flat");
                toolbar.append(&button);
                (target, button)
            })
            .collect();

        let spacer = GtkBox::new(Orientation::Horizontal, 0);
        spacer.set_hexpand(true);
        toolbar.append(&spacer);

        let density_label = Label::new(Some("Columns"));
        density_label.add_css_class("muted");
        toolbar.append(&density_label);
        let density_buttons: Vec<(ColumnPreset, Button)> = ColumnPreset::ALL
            .iter()
            .map(|&preset| {
                let button = Button::with_label(&preset.count().to_string());
                button.set_tooltip_text(Some(&format!("{} columns", preset.count())));
                toolbar.append(&button);
                (preset, button)
            })
            .collect();

        let random_button = Button::with_label("Random");
        random_button.set_tooltip_text(Some("Random GIF (R)"));
        toolbar.append(&random_button);

        let slideshow_button = Button::with_label("Start Slideshow");
        slideshow_button.set_tooltip_text(Some("Start Slideshow (S)"));
        toolbar.append(&slideshow_button);

        let help_button = Button::with_label("?");
        help_button.set_tooltip_text(Some("Keyboard shortcuts (?)"));
        toolbar.append(&help_button);

        let theme_button = Button::with_label(Theme::default().indicator_glyph());
        toolbar.append(&theme_button);

        // Gallery page with a floating back-to-top button
        let grid = GalleryGrid::new();
        let scroller = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Never)
            .vscrollbar_policy(PolicyType::Automatic)
            .vexpand(true)
            .hexpand(true)
            .child(grid.widget())
            .build();

        let back_to_top = Button::with_label("\u{2191}");
        back_to_top.set_tooltip_text(Some("Back to top"));
        back_to_top.add_css_class("back-to-top");
        back_to_top.set_halign(Align::End);
        back_to_top.set_valign(Align::End);
        back_to_top.set_margin_end(24);
        back_to_top.set_margin_bottom(24);
        back_to_top.set_visible(false);

        let gallery_page = Overlay::new();
        gallery_page.set_child(Some(&scroller));
        gallery_page.add_overlay(&back_to_top);

        let about_label = Label::new(Some(ABOUT_TEXT));
        about_label.set_wrap(true);
        about_label.set_justify(gtk4::Justification::Center);
        about_label.set_valign(Align::Center);

        let stack = Stack::new();
        stack.set_transition_type(StackTransitionType::Crossfade);
        stack.set_transition_duration(150);
        stack.set_vexpand(true);
        stack.add_named(&gallery_page, Some("gallery"));
        stack.add_named(&about_label, Some("about"));
        stack.set_visible_child_name("gallery");

        // Status bar: counts, location, transient notices
        let status_bar = GtkBox::new(Orientation::Horizontal, 12);
        status_bar.add_css_class("status-bar");
        let status_label = Label::new(None);
        status_label.set_halign(Align::Start);
        let location_label = Label::new(None);
        location_label.add_css_class("muted");
        location_label.set_hexpand(true);
        location_label.set_halign(Align::Start);
        location_label.set_selectable(true);
        location_label.set_ellipsize(gtk4::pango::EllipsizeMode::Start);
        let notice_label = Label::new(None);
        notice_label.set_halign(Align::End);
        notice_label.add_css_class("muted");
        status_bar.append(&status_label);
        status_bar.append(&location_label);
        status_bar.append(&notice_label);

        let content = GtkBox::new(Orientation::Vertical, 0);
        content.append(&toolbar);
        content.append(&stack);
        content.append(&status_bar);

        let modal = ModalOverlay::new();
        let help = HelpOverlay::new();

        let root = Overlay::new();
        root.set_child(Some(&content));
        root.add_overlay(modal.widget());
        root.add_overlay(help.widget());
        window.set_child(Some(&root));

        let page_url = page_url_for(&config.catalog_path);
        location_label.set_text(&page_url);

        // One decode worker; results come back on the main loop.
        let (media_requests, request_receiver) = async_channel::unbounded::<MediaRequest>();
        let (media_sender, media_receiver) = async_channel::unbounded::<MediaLoad>();
        let media_generation = Arc::new(AtomicU64::new(0));
        spawn_decode_worker(
            request_receiver,
            media_sender,
            media_generation.clone(),
            DecodeLimits::default(),
        );

        let main_window = Rc::new_cyclic(|self_weak: &Weak<MainWindow>| {
            let host = GtkHost {
                owner: self_weak.clone(),
                window: window.clone(),
                modal: modal.clone(),
                content: content.clone(),
                location_label: location_label.clone(),
                page_url,
                timers: Rc::new(RefCell::new(HashMap::new())),
                next_timer: 0,
            };
            let controller = ModalController::new(
                Rc::new(catalog),
                config.page_size,
                config.columns,
                host,
                config.timings,
            );
            Self {
                self_weak: self_weak.clone(),
                window: window.clone(),
                controller: RefCell::new(controller),
                theme: RefCell::new(theme),
                keybindings: Keybindings::new(),
                stack,
                content: content.clone(),
                scroller: scroller.clone(),
                grid,
                modal,
                help,
                status_label,
                notice_label,
                theme_button: theme_button.clone(),
                slideshow_button: slideshow_button.clone(),
                back_to_top: back_to_top.clone(),
                density_buttons,
                nav_buttons,
                last_projection: RefCell::new(None),
                shown_source: RefCell::new(None),
                media_generation,
                media_cache: RefCell::new(MediaCache::new(
                    MEDIA_CACHE_ENTRIES,
                    MEDIA_CACHE_BYTES,
                )),
                media_requests,
            }
        });

        // Decoded media arrives back on the main loop
        let window_weak = Rc::downgrade(&main_window);
        glib::spawn_future_local(async move {
            while let Ok(load) = media_receiver.recv().await {
                if let Some(window) = window_weak.upgrade() {
                    window.apply_media_load(load);
                } else {
                    break;
                }
            }
        });

        main_window.setup_keybindings();
        main_window.setup_handlers(&random_button, &help_button);

        let initial_theme = main_window.theme.borrow().get();
        main_window.apply_theme(initial_theme);
        main_window.set_nav_active(NavTarget::Home);
        main_window.sync();

        let item_count = main_window.controller.borrow().catalog().len();
        info!(items = item_count, "Gallery ready");

        if let Some(link) = config.initial_link.as_deref() {
            if !main_window
                .controller
                .borrow_mut()
                .restore_from_fragment(link)
            {
                info!(link, "Ignoring startup link");
            }
        }

        main_window
    }

    fn setup_keybindings(&self) {
        self.keybindings.attach(&self.window);

        let window_weak = self.self_weak.clone();
        self.keybindings.connect_key(move |key| match window_weak.upgrade() {
            Some(window) => window.handle_key(key),
            None => false,
        });
    }

    fn setup_handlers(&self, random_button: &Button, help_button: &Button) {
        let window_weak = self.self_weak.clone();
        self.grid.connect_open(move |index| {
            if let Some(window) = window_weak.upgrade() {
                window.update(|ctrl| ctrl.open(index));
            }
        });

        let window_weak = self.self_weak.clone();
        self.grid.connect_load_more(move || {
            if let Some(window) = window_weak.upgrade() {
                window.update(|ctrl| ctrl.load_more());
            }
        });

        let window_weak = self.self_weak.clone();
        self.modal.connect_control(move |control| {
            if let Some(window) = window_weak.upgrade() {
                window.activate_control(control);
            }
        });

        let window_weak = self.self_weak.clone();
        self.modal.connect_backdrop_clicked(move || {
            if let Some(window) = window_weak.upgrade() {
                window.update(|ctrl| ctrl.close());
            }
        });

        let window_weak = self.self_weak.clone();
        self.help.connect_close(move || {
            if let Some(window) = window_weak.upgrade() {
                window.update(|ctrl| ctrl.close_help());
            }
        });

        for (preset, button) in &self.density_buttons {
            let preset = *preset;
            let window_weak = self.self_weak.clone();
            button.connect_clicked(move |_| {
                if let Some(window) = window_weak.upgrade() {
                    window.update(|ctrl| ctrl.set_columns(preset));
                }
            });
        }

        for (target, button) in &self.nav_buttons {
            let target = *target;
            let window_weak = self.self_weak.clone();
            button.connect_clicked(move |_| {
                if let Some(window) = window_weak.upgrade() {
                    window.navigate(target);
                }
            });
        }

        let window_weak = self.self_weak.clone();
        random_button.connect_clicked(move |_| {
            if let Some(window) = window_weak.upgrade() {
                window.update(|ctrl| ctrl.random());
            }
        });

        let window_weak = self.self_weak.clone();
        self.slideshow_button.connect_clicked(move |_| {
            if let Some(window) = window_weak.upgrade() {
                window.toggle_slideshow();
            }
        });

        let window_weak = self.self_weak.clone();
        help_button.connect_clicked(move |_| {
            if let Some(window) = window_weak.upgrade() {
                window.update(|ctrl| ctrl.open_help());
            }
        });

        let window_weak = self.self_weak.clone();
        self.theme_button.connect_clicked(move |_| {
            if let Some(window) = window_weak.upgrade() {
                window.toggle_theme();
            }
        });

        let window_weak = self.self_weak.clone();
        self.back_to_top.connect_clicked(move |_| {
            if let Some(window) = window_weak.upgrade() {
                window.scroll_to_top();
            }
        });

        let window_weak = self.self_weak.clone();
        self.scroller
            .vadjustment()
            .connect_value_changed(move |adjustment| {
                if let Some(window) = window_weak.upgrade() {
                    window
                        .back_to_top
                        .set_visible(adjustment.value() > BACK_TO_TOP_THRESHOLD);
                }
            });

        // Only touches the modal widget; the controller may be borrowed while this fires.
        let modal = Rc::downgrade(&self.modal);
        self.window.connect_fullscreened_notify(move |window| {
            if let Some(modal) = modal.upgrade() {
                modal.set_fullscreen_state(window.is_fullscreen());
            }
        });
    }

    /// Run a controller operation, then re-project the widgets from state.
    fn update<R>(&self, op: impl FnOnce(&mut ModalController<GtkHost>) -> R) -> R {
        let result = op(&mut self.controller.borrow_mut());
        self.sync();
        result
    }

    fn handle_key(&self, key: KeyInput) -> bool {
        let handled = route_key(&mut self.controller.borrow_mut(), key);
        if handled {
            self.sync();
        }
        handled
    }

    fn dispatch_timer(&self, timer: Timer) {
        debug!(?timer, "Timer fired");
        self.update(|ctrl| ctrl.timer_fired(timer));
    }

    fn activate_control(&self, control: ModalControl) {
        match control {
            ModalControl::Close => self.update(|ctrl| ctrl.close()),
            ModalControl::Prev => {
                self.update(|ctrl| ctrl.prev());
            }
            ModalControl::Next => {
                self.update(|ctrl| ctrl.next());
            }
            ModalControl::Download => self.download_current(),
            ModalControl::CopyLink => {
                self.update(|ctrl| ctrl.copy_link());
            }
            ModalControl::Fullscreen => {
                self.update(|ctrl| ctrl.toggle_fullscreen());
            }
            ModalControl::ZoomOut => {
                self.update(|ctrl| ctrl.zoom_by(-ZOOM_STEP));
            }
            ModalControl::ZoomReset => {
                self.update(|ctrl| ctrl.reset_zoom());
            }
            ModalControl::ZoomIn => {
                self.update(|ctrl| ctrl.zoom_by(ZOOM_STEP));
            }
        }
    }

    fn download_current(&self) {
        match self.update(|ctrl| ctrl.download_current()) {
            Ok(Some(path)) => self.set_notice(&format!("Saved {}", path.display())),
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "Download failed");
                self.set_notice(&format!("Download failed: {}", err));
            }
        }
    }

    fn toggle_slideshow(&self) {
        if self.update(|ctrl| ctrl.toggle_slideshow()) == SlideshowToggle::Refused {
            let reason = if prefers_reduced_motion() {
                "Slideshow unavailable: reduced motion is preferred"
            } else {
                "Slideshow unavailable: nothing to show"
            };
            self.set_notice(reason);
        }
    }

    fn toggle_theme(&self) {
        let theme = self.theme.borrow_mut().toggle();
        self.apply_theme(theme);
    }

    fn apply_theme(&self, theme: Theme) {
        if let Some(settings) = Settings::default() {
            settings.set_gtk_application_prefer_dark_theme(theme.is_dark());
        }
        let (add, remove) = if theme.is_dark() {
            ("theme-dark", "theme-light")
        } else {
            ("theme-light", "theme-dark")
        };
        self.window.remove_css_class(remove);
        self.window.add_css_class(add);

        self.theme_button.set_label(theme.indicator_glyph());
        let tooltip = if theme.is_dark() {
            "Switch to light theme"
        } else {
            "Switch to dark theme"
        };
        self.theme_button.set_tooltip_text(Some(tooltip));
    }

    fn navigate(&self, target: NavTarget) {
        match target {
            NavTarget::Home => {
                self.stack.set_visible_child_name("gallery");
                self.scroll_to_top();
            }
            NavTarget::Gallery => self.stack.set_visible_child_name("gallery"),
            NavTarget::About => self.stack.set_visible_child_name("about"),
        }
        self.set_nav_active(target);
    }

    fn set_nav_active(&self, active: NavTarget) {
        for (target, button) in &self.nav_buttons {
            if *target == active {
                button.add_css_class("nav-active");
            } else {
                button.remove_css_class("nav-active");
            }
        }
    }

    fn scroll_to_top(&self) {
        self.scroller.vadjustment().set_value(0.0);
    }

    fn set_notice(&self, text: &str) {
        self.notice_label.set_text(text);
    }

    /// Re-project every widget from controller state.
    fn sync(&self) {
        let (
            projection,
            view,
            refocus,
            help_open,
            slideshow_active,
            slideshow_available,
            visible,
            total,
        ) = {
            let ctrl = self.controller.borrow();
            let state = ctrl.state();
            (
                ctrl.gallery(),
                ctrl.modal_view(),
                ctrl.refocus_target(),
                state.help_open(),
                state.slideshow_active(),
                ctrl.slideshow_available(),
                state.visible_count(),
                state.filtered_len(),
            )
        };

        // The grid is only rebuilt when its projection changes so focused cards survive.
        let grid_changed = self.last_projection.borrow().as_ref() != Some(&projection);
        if grid_changed {
            self.grid.render(&projection);
            for (preset, button) in &self.density_buttons {
                if preset.count() == projection.columns {
                    button.add_css_class("density-active");
                } else {
                    button.remove_css_class("density-active");
                }
            }
            self.last_projection.replace(Some(projection));
        }

        self.status_label
            .set_text(&format!("Showing {} of {} GIFs", visible, total));

        if slideshow_active {
            self.slideshow_button.set_label("Stop Slideshow");
            self.slideshow_button
                .set_tooltip_text(Some("Stop Slideshow (S)"));
        } else {
            self.slideshow_button.set_label("Start Slideshow");
            let tooltip = if slideshow_available {
                "Start Slideshow (S)"
            } else {
                "Slideshow disabled: reduced motion is preferred"
            };
            self.slideshow_button.set_tooltip_text(Some(tooltip));
        }
        self.slideshow_button
            .set_sensitive(slideshow_active || slideshow_available);

        self.help.set_visible(help_open);

        match view {
            Some(view) => {
                self.content.set_sensitive(false);
                self.modal.present(&view);
                if let Some(button) = refocus.and_then(|control| self.modal.button(control)) {
                    button.grab_focus();
                }
                let source_changed =
                    self.shown_source.borrow().as_ref() != Some(&view.source);
                if source_changed {
                    self.shown_source.replace(Some(view.source.clone()));
                    self.request_media(&view.source);
                }
            }
            None => {
                self.content.set_sensitive(true);
                if self.modal.is_visible() {
                    self.modal.hide();
                }
                if self.shown_source.replace(None).is_some() {
                    // Anything still decoding is stale now.
                    self.media_generation.fetch_add(1, Ordering::AcqRel);
                }
            }
        }
    }

    fn request_media(&self, source: &Path) {
        let generation = self
            .media_generation
            .fetch_add(1, Ordering::AcqRel)
            .wrapping_add(1);

        let cached = self.media_cache.borrow_mut().get(source);
        if let Some(media) = cached {
            self.modal.set_media(media, !prefers_reduced_motion());
            return;
        }

        self.modal.show_loading(source);
        let request = MediaRequest {
            generation,
            path: source.to_path_buf(),
        };
        if self.media_requests.try_send(request).is_err() {
            warn!("Decode worker is gone");
            self.modal.show_unavailable();
        }
    }

    fn apply_media_load(&self, load: MediaLoad) {
        let current = load.generation == self.media_generation.load(Ordering::Acquire);
        match load.result {
            Ok(decoded) => {
                let Some(media) = AnimatedFrames::from_decoded(decoded).map(Rc::new) else {
                    return;
                };
                {
                    let mut cache = self.media_cache.borrow_mut();
                    cache.put(load.path.clone(), media.clone(), media.byte_size);
                    debug!(
                        entries = cache.len(),
                        bytes = cache.total_bytes(),
                        "Cached decoded media"
                    );
                }
                if current {
                    self.modal.set_media(media, !prefers_reduced_motion());
                } else {
                    debug!(path = %load.path.display(), "Dropping stale media load");
                }
            }
            Err(err) => {
                warn!(path = %load.path.display(), error = %err, "Failed to decode media");
                if current {
                    self.modal.show_unavailable();
                }
            }
        }
    }

    /// Present the window
    pub fn present(&self) {
        self.window.present();
    }
}
