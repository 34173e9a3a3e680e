// Recording host for controller tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use super::focus::ModalControl;
use super::host::{Host, HostError, Timer, TimerHandle};
use super::modal::{ModalController, Timings};
use crate::models::{Catalog, ColumnPreset, MediaItem};

pub(crate) struct FakeHost {
    next_handle: u64,
    pub timers: Vec<(TimerHandle, Timer, Duration, bool)>,
    pub fragment: Option<String>,
    pub fragment_writes: Vec<Option<String>>,
    pub clipboard: Vec<String>,
    pub clipboard_fails: bool,
    pub fullscreen: bool,
    pub exit_fullscreen_fails: bool,
    pub saved: Vec<(PathBuf, String)>,
    pub reduced_motion: bool,
    pub random_values: VecDeque<usize>,
    pub focused: Option<&'static str>,
    pub focused_control: Option<ModalControl>,
    pub focus_restorable: bool,
    pub restored: Vec<&'static str>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            timers: Vec::new(),
            fragment: None,
            fragment_writes: Vec::new(),
            clipboard: Vec::new(),
            clipboard_fails: false,
            fullscreen: false,
            exit_fullscreen_fails: false,
            saved: Vec::new(),
            reduced_motion: false,
            random_values: VecDeque::new(),
            focused: None,
            focused_control: None,
            focus_restorable: true,
            restored: Vec::new(),
        }
    }

    pub fn timer(&self, timer: Timer) -> Option<(TimerHandle, Timer, Duration, bool)> {
        self.timers.iter().copied().find(|(_, t, _, _)| *t == timer)
    }

    /// Simulate `timer` elapsing: one-shot timers are forgotten, repeating ones stay.
    pub fn expire(&mut self, timer: Timer) -> bool {
        let Some(pos) = self.timers.iter().position(|(_, t, _, _)| *t == timer) else {
            return false;
        };
        if !self.timers[pos].3 {
            self.timers.remove(pos);
        }
        true
    }
}

impl Host for FakeHost {
    type Focus = &'static str;

    fn schedule(&mut self, timer: Timer, delay: Duration, repeat: bool) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.timers.push((handle, timer, delay, repeat));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|(h, _, _, _)| *h != handle);
    }

    fn set_fragment(&mut self, fragment: Option<&str>) {
        self.fragment = fragment.map(str::to_string);
        self.fragment_writes.push(self.fragment.clone());
    }

    fn page_url(&self) -> String {
        "gifshelf:///tmp/catalog.json".to_string()
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), HostError> {
        if self.clipboard_fails {
            return Err(HostError::Clipboard("denied".to_string()));
        }
        self.clipboard.push(text.to_string());
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), HostError> {
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), HostError> {
        if self.exit_fullscreen_fails {
            return Err(HostError::Fullscreen("exit rejected".to_string()));
        }
        self.fullscreen = false;
        Ok(())
    }

    fn save_media(&mut self, source: &Path, file_name: &str) -> Result<PathBuf, HostError> {
        self.saved.push((source.to_path_buf(), file_name.to_string()));
        Ok(PathBuf::from("/downloads").join(file_name))
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn random_index(&mut self, len: usize) -> usize {
        self.random_values.pop_front().unwrap_or(0) % len
    }

    fn focused(&self) -> Option<Self::Focus> {
        self.focused
    }

    fn focused_control(&self) -> Option<ModalControl> {
        self.focused_control
    }

    fn focus_control(&mut self, control: ModalControl) {
        self.focused_control = Some(control);
    }

    fn restore_focus(&mut self, target: &Self::Focus) -> bool {
        if self.focus_restorable {
            self.restored.push(*target);
            self.focused_control = None;
        }
        self.focus_restorable
    }
}

/// Controller over `len` items titled `Item <i>` with sources `item_<i>.gif`.
pub(crate) fn controller(len: usize) -> ModalController<FakeHost> {
    let items = (0..len)
        .map(|i| MediaItem::new(format!("Item {}", i), format!("item_{}.gif", i)))
        .collect();
    let catalog = Rc::new(Catalog::new(items, "Gif_Dump"));
    ModalController::new(
        catalog,
        24,
        ColumnPreset::Four,
        FakeHost::new(),
        Timings::default(),
    )
}
