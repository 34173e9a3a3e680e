// Capabilities the modal controller borrows from its host toolkit.
// The controller never touches widgets directly; everything observable goes through here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use super::focus::ModalControl;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    #[error("fullscreen request failed: {0}")]
    Fullscreen(String),
    #[error("failed to save {source_path:?} to {target:?}: {error}")]
    Download {
        source_path: PathBuf,
        target: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("no download directory available")]
    NoDownloadDir,
}

/// Deferred callbacks the controller schedules. The host hands each one back
/// through `ModalController::timer_fired` when it elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    SlideshowAdvance,
    DeepLinkOpen(usize),
    CopiedFeedbackExpired,
}

/// Opaque handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

pub trait Host {
    /// Token identifying a focused control outside the modal.
    type Focus;

    /// Schedule `timer` after `delay`, repeating every `delay` when `repeat` is set.
    fn schedule(&mut self, timer: Timer, delay: Duration, repeat: bool) -> TimerHandle;
    /// Cancel a timer. Cancelling an already finished timer is a no-op.
    fn cancel(&mut self, handle: TimerHandle);

    /// Replace the location fragment; `None` clears it without a history entry.
    fn set_fragment(&mut self, fragment: Option<&str>);
    /// Address of the page, used to build absolute deep links.
    fn page_url(&self) -> String;

    fn write_clipboard(&mut self, text: &str) -> Result<(), HostError>;

    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&mut self) -> Result<(), HostError>;
    fn exit_fullscreen(&mut self) -> Result<(), HostError>;

    /// Save a copy of `source` named `file_name`, returning where it landed.
    fn save_media(&mut self, source: &Path, file_name: &str) -> Result<PathBuf, HostError>;

    fn prefers_reduced_motion(&self) -> bool;

    /// Uniform index in `0..len`; `len` is never zero.
    fn random_index(&mut self, len: usize) -> usize;

    fn focused(&self) -> Option<Self::Focus>;
    /// Modal control holding focus, if focus is inside the modal.
    fn focused_control(&self) -> Option<ModalControl>;
    fn focus_control(&mut self, control: ModalControl);
    /// Return focus to `target` if it is still attached and focusable.
    fn restore_focus(&mut self, target: &Self::Focus) -> bool;
}
