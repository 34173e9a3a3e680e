//! Modal controller: the state machine behind the detail view.
//!
//! States are `Closed` and `Open(index, zoom)` with an orthogonal slideshow
//! flag that is only ever set while open. The controller owns the
//! [`ViewState`], the slideshow timer and the focus ring; everything the user
//! can observe (fragment, clipboard, fullscreen, focus) goes through the
//! [`Host`] capabilities so the same machine drives the GTK window and the
//! tests.

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::focus::{FocusDirection, FocusRing, ModalControl};
use super::host::{Host, HostError, Timer, TimerHandle};
use crate::layout::{self, GalleryProjection};
use crate::link;
use crate::models::{Catalog, ColumnPreset, MediaItem, ViewState};

/// Zoom change for one zoom-in / zoom-out step.
pub const ZOOM_STEP: f64 = 0.2;

#[derive(Debug, Clone, Copy)]
pub struct Timings {
    pub slideshow_interval: Duration,
    pub copied_feedback: Duration,
    pub deep_link_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            slideshow_interval: Duration::from_millis(3000),
            copied_feedback: Duration::from_millis(2000),
            deep_link_delay: link::DEEP_LINK_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideshowToggle {
    Started,
    Stopped,
    /// Reduced motion is preferred, or there is nothing to show.
    Refused,
}

/// What the modal shows for the open item.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub title: String,
    pub position_text: String,
    pub source: PathBuf,
    pub catalog_index: usize,
    pub zoom: f64,
    pub slideshow_active: bool,
    pub copied_feedback: bool,
}

pub struct ModalController<H: Host> {
    catalog: Rc<Catalog>,
    state: ViewState,
    host: H,
    timings: Timings,
    focus: FocusRing,
    restore_target: Option<H::Focus>,
    slideshow_timer: Option<TimerHandle>,
    feedback_timer: Option<TimerHandle>,
    deep_link_timer: Option<TimerHandle>,
}

impl<H: Host> ModalController<H> {
    pub fn new(
        catalog: Rc<Catalog>,
        page_size: usize,
        columns: ColumnPreset,
        host: H,
        timings: Timings,
    ) -> Self {
        let state = ViewState::new(catalog.len(), page_size, columns);
        Self {
            catalog,
            state,
            host,
            timings,
            focus: FocusRing::default(),
            restore_target: None,
            slideshow_timer: None,
            feedback_timer: None,
            deep_link_timer: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn focus_ring(&self) -> &FocusRing {
        &self.focus
    }

    /// Whether the slideshow may start at all.
    pub fn slideshow_available(&self) -> bool {
        !self.host.prefers_reduced_motion()
    }

    // Grid

    pub fn gallery(&self) -> GalleryProjection {
        layout::project(&self.catalog, &self.state)
    }

    pub fn load_more(&mut self) -> bool {
        let grew = self.state.load_more();
        if grew {
            debug!(visible = self.state.visible_count(), "Loaded more cards");
        }
        grew
    }

    pub fn set_columns(&mut self, columns: ColumnPreset) -> bool {
        self.state.set_columns(columns)
    }

    // Modal transitions

    pub fn current_item(&self) -> Option<&MediaItem> {
        let index = self.state.open_index()?;
        let catalog_index = self.state.catalog_index(index)?;
        self.catalog.get(catalog_index)
    }

    pub fn modal_view(&self) -> Option<ModalView> {
        let index = self.state.open_index()?;
        let catalog_index = self.state.catalog_index(index)?;
        let item = self.catalog.get(catalog_index)?;
        Some(ModalView {
            title: item.title.clone(),
            position_text: format!("{} of {}", index + 1, self.state.filtered_len()),
            source: item.resolved_source(self.catalog.base_dir()),
            catalog_index,
            zoom: self.state.zoom(),
            slideshow_active: self.state.slideshow_active(),
            copied_feedback: self.state.copied_feedback(),
        })
    }

    /// Open the item at filtered position `index`. Returns false for an invalid index.
    pub fn open(&mut self, index: usize) -> bool {
        let was_open = self.state.is_open();
        if !self.state.open(index) {
            debug!(
                index,
                len = self.state.filtered_len(),
                "Ignoring open for out-of-range index"
            );
            return false;
        }

        if !was_open {
            self.restore_target = self.host.focused();
            self.focus.activate();
            if let Some(first) = self.focus.advance(None, FocusDirection::Forward) {
                self.host.focus_control(first);
            }
        }

        if let Some(catalog_index) = self.state.catalog_index(index) {
            let fragment = link::fragment_for(catalog_index);
            self.host.set_fragment(Some(fragment.as_str()));
        }
        info!(index, "Opened item");
        true
    }

    /// Close the modal. Closing an already closed modal is a no-op.
    pub fn close(&mut self) {
        if !self.state.is_open() {
            return;
        }

        self.stop_slideshow();
        if self.host.is_fullscreen() {
            if let Err(err) = self.host.exit_fullscreen() {
                warn!(error = %err, "Failed to exit fullscreen while closing");
            }
        }
        if let Some(handle) = self.feedback_timer.take() {
            self.host.cancel(handle);
        }

        self.state.close();
        self.focus.deactivate();
        if let Some(target) = self.restore_target.take() {
            if !self.host.restore_focus(&target) {
                debug!("Previously focused control is gone; not restoring focus");
            }
        }
        self.host.set_fragment(None);
        info!("Closed modal");
    }

    pub fn next(&mut self) -> bool {
        let Some(index) = self.state.open_index() else {
            return false;
        };
        if index + 1 < self.state.filtered_len() {
            self.open(index + 1)
        } else if self.state.slideshow_active() {
            self.open(0)
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        match self.state.open_index() {
            Some(index) if index > 0 => self.open(index - 1),
            _ => false,
        }
    }

    pub fn random(&mut self) -> bool {
        let len = self.state.filtered_len();
        if len == 0 {
            return false;
        }
        let index = self.host.random_index(len).min(len - 1);
        self.open(index)
    }

    pub fn zoom_by(&mut self, delta: f64) -> bool {
        if !self.state.is_open() {
            return false;
        }
        self.state.zoom_by(delta);
        true
    }

    pub fn reset_zoom(&mut self) -> bool {
        if !self.state.is_open() {
            return false;
        }
        self.state.reset_zoom();
        true
    }

    pub fn toggle_slideshow(&mut self) -> SlideshowToggle {
        if self.state.slideshow_active() {
            self.stop_slideshow();
            info!("Slideshow stopped");
            return SlideshowToggle::Stopped;
        }

        if self.host.prefers_reduced_motion() {
            info!("Slideshow refused: reduced motion preferred");
            return SlideshowToggle::Refused;
        }
        if !self.state.is_open() && !self.open(0) {
            return SlideshowToggle::Refused;
        }

        self.state.set_slideshow_active(true);
        if let Some(stale) = self.slideshow_timer.take() {
            self.host.cancel(stale);
        }
        self.slideshow_timer = Some(self.host.schedule(
            Timer::SlideshowAdvance,
            self.timings.slideshow_interval,
            true,
        ));
        info!("Slideshow started");
        SlideshowToggle::Started
    }

    fn stop_slideshow(&mut self) {
        if let Some(handle) = self.slideshow_timer.take() {
            self.host.cancel(handle);
        }
        self.state.set_slideshow_active(false);
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        if !self.state.is_open() {
            return false;
        }
        let result = if self.host.is_fullscreen() {
            self.host.exit_fullscreen()
        } else {
            self.host.request_fullscreen()
        };
        if let Err(err) = result {
            debug!(error = %err, "Fullscreen toggle failed");
        }
        true
    }

    /// Leave fullscreen without touching the modal.
    pub fn exit_fullscreen(&mut self) -> Result<(), HostError> {
        self.host.exit_fullscreen()
    }

    /// Save the open item. `Ok(None)` when the modal is closed.
    pub fn download_current(&mut self) -> Result<Option<PathBuf>, HostError> {
        let Some(item) = self.current_item() else {
            return Ok(None);
        };
        let source = item.resolved_source(self.catalog.base_dir());
        let file_name = item.download_file_name();
        let saved = self.host.save_media(&source, &file_name)?;
        info!(path = %saved.display(), "Downloaded item");
        Ok(Some(saved))
    }

    /// Copy the open item's absolute deep link. Failures are swallowed.
    pub fn copy_link(&mut self) -> bool {
        let Some(catalog_index) = self
            .state
            .open_index()
            .and_then(|i| self.state.catalog_index(i))
        else {
            return false;
        };
        let url = link::absolute_link(&self.host.page_url(), catalog_index);
        match self.host.write_clipboard(&url) {
            Ok(()) => {
                self.state.set_copied_feedback(true);
                if let Some(pending) = self.feedback_timer.take() {
                    self.host.cancel(pending);
                }
                self.feedback_timer = Some(self.host.schedule(
                    Timer::CopiedFeedbackExpired,
                    self.timings.copied_feedback,
                    false,
                ));
                true
            }
            Err(err) => {
                debug!(error = %err, "Clipboard write failed");
                false
            }
        }
    }

    // Help overlay

    /// Open help; only allowed while neither the modal nor help is showing.
    pub fn open_help(&mut self) -> bool {
        if self.state.is_open() || self.state.help_open() {
            return false;
        }
        self.state.set_help_open(true);
        true
    }

    pub fn close_help(&mut self) -> bool {
        let was_open = self.state.help_open();
        self.state.set_help_open(false);
        was_open
    }

    // Focus

    pub fn move_focus(&mut self, direction: FocusDirection) -> Option<ModalControl> {
        if !self.state.is_open() {
            return None;
        }
        let from = self.host.focused_control();
        let control = self.focus.advance(from, direction)?;
        self.host.focus_control(control);
        Some(control)
    }

    /// Control that should take focus back when the open modal lost it, e.g.
    /// because the host could not focus a control that was not yet shown.
    pub fn refocus_target(&self) -> Option<ModalControl> {
        if !self.state.is_open() || self.host.focused_control().is_some() {
            return None;
        }
        Some(self.focus.current().unwrap_or(ModalControl::ORDER[0]))
    }

    // Deep links and timers

    /// Schedule the startup open for a `#gif-<N>` fragment. Invalid or
    /// out-of-range fragments are ignored.
    pub fn restore_from_fragment(&mut self, fragment: &str) -> bool {
        let Some(catalog_index) = link::startup_target(fragment, self.catalog.len()) else {
            debug!(fragment, "Ignoring deep link");
            return false;
        };
        if let Some(stale) = self.deep_link_timer.take() {
            self.host.cancel(stale);
        }
        self.deep_link_timer = Some(self.host.schedule(
            Timer::DeepLinkOpen(catalog_index),
            self.timings.deep_link_delay,
            false,
        ));
        true
    }

    /// Entry point for elapsed host timers.
    pub fn timer_fired(&mut self, timer: Timer) {
        match timer {
            Timer::SlideshowAdvance => {
                if self.state.slideshow_active() && self.state.is_open() {
                    self.next();
                } else {
                    debug!("Dropping stale slideshow tick");
                }
            }
            Timer::DeepLinkOpen(catalog_index) => {
                self.deep_link_timer = None;
                match self.state.filtered_position(catalog_index) {
                    Some(index) => {
                        self.open(index);
                    }
                    None => debug!(catalog_index, "Deep link target is not in view"),
                }
            }
            Timer::CopiedFeedbackExpired => {
                self.feedback_timer = None;
                self.state.set_copied_feedback(false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::{controller, FakeHost};
    use crate::models::{MAX_ZOOM, MIN_ZOOM};

    fn fire(ctrl: &mut ModalController<FakeHost>, timer: Timer) {
        assert!(
            ctrl.host_mut().expire(timer),
            "timer {:?} was not scheduled",
            timer
        );
        ctrl.timer_fired(timer);
    }

    #[test]
    fn test_position_text_for_every_item() {
        let mut ctrl = controller(12);
        for i in 0..12 {
            assert!(ctrl.open(i));
            let view = ctrl.modal_view().unwrap();
            assert_eq!(view.position_text, format!("{} of 12", i + 1));
            assert_eq!(view.title, format!("Item {}", i));
        }
    }

    #[test]
    fn test_open_out_of_range_is_rejected() {
        let mut ctrl = controller(3);
        assert!(!ctrl.open(3));
        assert!(!ctrl.state().is_open());
        assert_eq!(ctrl.host().fragment, None);
    }

    #[test]
    fn test_open_sets_fragment_and_close_clears_it() {
        let mut ctrl = controller(5);
        ctrl.open(2);
        assert_eq!(ctrl.host().fragment.as_deref(), Some("gif-3"));
        ctrl.close();
        assert_eq!(ctrl.host().fragment, None);
        assert!(!ctrl.state().is_open());
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut ctrl = controller(5);
        ctrl.close();
        assert!(!ctrl.state().is_open());
        assert!(ctrl.host().fragment_writes.is_empty());
        assert!(ctrl.host().restored.is_empty());
    }

    #[test]
    fn test_fragment_uses_catalog_number_in_filtered_view() {
        let mut ctrl = controller(6);
        ctrl.state.set_filtered(vec![5, 3]);
        ctrl.open(1);
        assert_eq!(ctrl.host().fragment.as_deref(), Some("gif-4"));
        assert_eq!(ctrl.modal_view().unwrap().position_text, "2 of 2");
    }

    #[test]
    fn test_next_and_prev_at_edges() {
        let mut ctrl = controller(3);
        ctrl.open(0);
        assert!(!ctrl.prev());
        assert_eq!(ctrl.state().open_index(), Some(0));

        assert!(ctrl.next());
        assert!(ctrl.next());
        assert_eq!(ctrl.state().open_index(), Some(2));
        assert!(!ctrl.next());
        assert_eq!(ctrl.state().open_index(), Some(2));

        assert!(ctrl.prev());
        assert_eq!(ctrl.state().open_index(), Some(1));
    }

    #[test]
    fn test_slideshow_wraps_from_last_to_first() {
        let mut ctrl = controller(3);
        ctrl.open(2);
        assert_eq!(ctrl.toggle_slideshow(), SlideshowToggle::Started);
        assert!(ctrl.next());
        assert_eq!(ctrl.state().open_index(), Some(0));
    }

    #[test]
    fn test_zoom_resets_on_navigation() {
        let mut ctrl = controller(3);
        assert!(!ctrl.zoom_by(ZOOM_STEP));
        ctrl.open(0);
        ctrl.zoom_by(ZOOM_STEP);
        ctrl.zoom_by(ZOOM_STEP);
        assert!((ctrl.state().zoom() - 1.4).abs() < 1e-9);
        ctrl.next();
        assert_eq!(ctrl.state().zoom(), 1.0);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut ctrl = controller(2);
        ctrl.open(0);
        for _ in 0..4 {
            ctrl.zoom_by(10.0);
            assert!(ctrl.state().zoom() <= MAX_ZOOM);
        }
        for _ in 0..4 {
            ctrl.zoom_by(-10.0);
            assert!(ctrl.state().zoom() >= MIN_ZOOM);
        }
        ctrl.reset_zoom();
        assert_eq!(ctrl.state().zoom(), 1.0);
    }

    #[test]
    fn test_slideshow_from_closed_opens_first_item_and_ticks() {
        let mut ctrl = controller(3);
        assert_eq!(ctrl.toggle_slideshow(), SlideshowToggle::Started);
        assert_eq!(ctrl.state().open_index(), Some(0));
        assert!(ctrl.state().slideshow_active());

        let (_, _, interval, repeat) = ctrl.host().timer(Timer::SlideshowAdvance).unwrap();
        assert_eq!(interval, Duration::from_millis(3000));
        assert!(repeat);

        fire(&mut ctrl, Timer::SlideshowAdvance);
        fire(&mut ctrl, Timer::SlideshowAdvance);
        fire(&mut ctrl, Timer::SlideshowAdvance);
        assert_eq!(ctrl.state().open_index(), Some(0));
    }

    #[test]
    fn test_reduced_motion_refuses_slideshow() {
        let mut ctrl = controller(3);
        ctrl.host_mut().reduced_motion = true;
        assert!(!ctrl.slideshow_available());
        assert_eq!(ctrl.toggle_slideshow(), SlideshowToggle::Refused);
        assert!(!ctrl.state().slideshow_active());
        assert!(!ctrl.state().is_open());
        assert!(ctrl.host().timers.is_empty());
    }

    #[test]
    fn test_close_cancels_slideshow_timer() {
        let mut ctrl = controller(3);
        ctrl.toggle_slideshow();
        assert!(ctrl.host().timer(Timer::SlideshowAdvance).is_some());
        ctrl.close();
        assert!(ctrl.host().timer(Timer::SlideshowAdvance).is_none());
        assert!(!ctrl.state().slideshow_active());

        // A tick that raced the cancel must not reopen the modal.
        ctrl.timer_fired(Timer::SlideshowAdvance);
        assert!(!ctrl.state().is_open());
    }

    #[test]
    fn test_toggle_slideshow_off_cancels_timer() {
        let mut ctrl = controller(3);
        ctrl.open(1);
        assert_eq!(ctrl.toggle_slideshow(), SlideshowToggle::Started);
        assert_eq!(ctrl.toggle_slideshow(), SlideshowToggle::Stopped);
        assert!(ctrl.host().timers.is_empty());
        assert!(ctrl.state().is_open());

        // Without the slideshow the last item no longer wraps.
        assert!(ctrl.next());
        assert!(!ctrl.next());
        assert_eq!(ctrl.state().open_index(), Some(2));
    }

    #[test]
    fn test_slideshow_on_empty_catalog_is_refused() {
        let mut ctrl = controller(0);
        assert_eq!(ctrl.toggle_slideshow(), SlideshowToggle::Refused);
        assert!(ctrl.host().timers.is_empty());
    }

    #[test]
    fn test_random_uses_host_index_and_guards_empty() {
        let mut ctrl = controller(5);
        ctrl.host_mut().random_values.push_back(3);
        assert!(ctrl.random());
        assert_eq!(ctrl.state().open_index(), Some(3));

        let mut empty = controller(0);
        assert!(!empty.random());
        assert!(!empty.state().is_open());
    }

    #[test]
    fn test_close_exits_fullscreen_best_effort() {
        let mut ctrl = controller(2);
        ctrl.open(0);
        ctrl.toggle_fullscreen();
        assert!(ctrl.host().fullscreen);

        ctrl.host_mut().exit_fullscreen_fails = true;
        ctrl.close();
        assert!(!ctrl.state().is_open());
        assert_eq!(ctrl.host().fragment, None);
    }

    #[test]
    fn test_toggle_fullscreen_requires_open_modal() {
        let mut ctrl = controller(2);
        assert!(!ctrl.toggle_fullscreen());
        assert!(!ctrl.host().fullscreen);
        ctrl.open(1);
        ctrl.toggle_fullscreen();
        assert!(ctrl.host().fullscreen);
        ctrl.toggle_fullscreen();
        assert!(!ctrl.host().fullscreen);
    }

    #[test]
    fn test_download_uses_resolved_source_and_title() {
        let mut ctrl = controller(3);
        assert_eq!(ctrl.download_current().unwrap(), None);

        ctrl.open(1);
        let saved = ctrl.download_current().unwrap().unwrap();
        assert_eq!(saved, PathBuf::from("/downloads/Item_1.gif"));
        assert_eq!(
            ctrl.host().saved,
            vec![(PathBuf::from("Gif_Dump/item_1.gif"), "Item_1.gif".to_string())]
        );
    }

    #[test]
    fn test_copy_link_feedback_expires() {
        let mut ctrl = controller(4);
        assert!(!ctrl.copy_link());

        ctrl.open(3);
        assert!(ctrl.copy_link());
        assert_eq!(
            ctrl.host().clipboard,
            vec!["gifshelf:///tmp/catalog.json#gif-4".to_string()]
        );
        assert!(ctrl.modal_view().unwrap().copied_feedback);
        let (_, _, delay, repeat) = ctrl.host().timer(Timer::CopiedFeedbackExpired).unwrap();
        assert_eq!(delay, Duration::from_millis(2000));
        assert!(!repeat);

        fire(&mut ctrl, Timer::CopiedFeedbackExpired);
        assert!(!ctrl.modal_view().unwrap().copied_feedback);
    }

    #[test]
    fn test_copy_link_failure_is_silent() {
        let mut ctrl = controller(4);
        ctrl.open(0);
        ctrl.host_mut().clipboard_fails = true;
        assert!(!ctrl.copy_link());
        assert!(!ctrl.state().copied_feedback());
        assert!(ctrl.host().timers.is_empty());
    }

    #[test]
    fn test_deep_link_round_trip() {
        let mut ctrl = controller(30);
        ctrl.open(11);
        let fragment = ctrl.host().fragment.clone().unwrap();
        assert_eq!(fragment, "gif-12");

        // A fresh session started with that fragment reopens the same item.
        let mut reloaded = controller(30);
        assert!(reloaded.restore_from_fragment(&format!("#{}", fragment)));
        assert!(!reloaded.state().is_open());
        let (_, _, delay, _) = reloaded.host().timer(Timer::DeepLinkOpen(11)).unwrap();
        assert_eq!(delay, Duration::from_millis(100));

        fire(&mut reloaded, Timer::DeepLinkOpen(11));
        assert_eq!(reloaded.state().open_index(), Some(11));
    }

    #[test]
    fn test_out_of_range_deep_link_is_ignored() {
        let mut ctrl = controller(5);
        assert!(!ctrl.restore_from_fragment("#gif-6"));
        assert!(!ctrl.restore_from_fragment("#gif-abc"));
        assert!(!ctrl.restore_from_fragment(""));
        assert!(ctrl.host().timers.is_empty());
        assert!(!ctrl.state().is_open());
    }

    #[test]
    fn test_deep_link_to_filtered_out_item_stays_closed() {
        let mut ctrl = controller(10);
        assert!(ctrl.restore_from_fragment("#gif-4"));
        ctrl.state.set_filtered(vec![0, 1, 2, 5]);

        fire(&mut ctrl, Timer::DeepLinkOpen(3));
        assert!(!ctrl.state().is_open());
        assert_eq!(ctrl.host().fragment, None);
        assert!(ctrl.host().timers.is_empty());
    }

    #[test]
    fn test_focus_is_contained_and_restored() {
        let mut ctrl = controller(3);
        ctrl.host_mut().focused = Some("random-button");
        ctrl.open(0);
        assert!(ctrl.focus_ring().is_active());
        assert_eq!(ctrl.host().focused_control, Some(ModalControl::Close));

        ctrl.host_mut().focused_control = Some(ModalControl::ZoomIn);
        assert_eq!(
            ctrl.move_focus(FocusDirection::Forward),
            Some(ModalControl::Close)
        );
        assert_eq!(
            ctrl.move_focus(FocusDirection::Backward),
            Some(ModalControl::ZoomIn)
        );

        ctrl.close();
        assert!(!ctrl.focus_ring().is_active());
        assert_eq!(ctrl.host().restored, vec!["random-button"]);
        assert_eq!(ctrl.move_focus(FocusDirection::Forward), None);
    }

    #[test]
    fn test_refocus_target_when_focus_leaves_open_modal() {
        let mut ctrl = controller(3);
        assert_eq!(ctrl.refocus_target(), None);

        ctrl.open(0);
        assert_eq!(ctrl.refocus_target(), None);

        // The host dropped focus before the modal was on screen.
        ctrl.host_mut().focused_control = None;
        assert_eq!(ctrl.refocus_target(), Some(ModalControl::Close));

        ctrl.host_mut().focused_control = Some(ModalControl::Prev);
        ctrl.move_focus(FocusDirection::Forward);
        ctrl.host_mut().focused_control = None;
        assert_eq!(ctrl.refocus_target(), Some(ModalControl::Next));

        ctrl.close();
        assert_eq!(ctrl.refocus_target(), None);
    }

    #[test]
    fn test_focus_not_restored_when_target_detached() {
        let mut ctrl = controller(3);
        ctrl.host_mut().focused = Some("card-7");
        ctrl.open(0);
        ctrl.host_mut().focus_restorable = false;
        ctrl.close();
        assert!(ctrl.host().restored.is_empty());
    }

    #[test]
    fn test_help_only_opens_when_nothing_else_is_showing() {
        let mut ctrl = controller(3);
        assert!(ctrl.open_help());
        assert!(!ctrl.open_help());
        assert!(ctrl.close_help());
        assert!(!ctrl.close_help());

        ctrl.open(0);
        assert!(!ctrl.open_help());
        assert!(!ctrl.state().help_open());
    }

    #[test]
    fn test_grid_operations() {
        let mut ctrl = controller(30);
        assert_eq!(ctrl.gallery().cards.len(), 24);
        assert!(ctrl.load_more());
        assert_eq!(ctrl.gallery().cards.len(), 30);
        assert!(!ctrl.gallery().load_more_visible);
        assert!(!ctrl.load_more());

        assert!(ctrl.set_columns(ColumnPreset::Six));
        assert_eq!(ctrl.gallery().columns, 6);
        assert!(!ctrl.set_columns(ColumnPreset::Six));
    }
}
