// Focus containment for the modal: Tab and Shift+Tab cycle through the
// modal's own controls only, wrapping first <-> last.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalControl {
    Close,
    Prev,
    Next,
    Download,
    CopyLink,
    Fullscreen,
    ZoomOut,
    ZoomReset,
    ZoomIn,
}

impl ModalControl {
    /// Tab order inside the modal.
    pub const ORDER: [ModalControl; 9] = [
        Self::Close,
        Self::Prev,
        Self::Next,
        Self::Download,
        Self::CopyLink,
        Self::Fullscreen,
        Self::ZoomOut,
        Self::ZoomReset,
        Self::ZoomIn,
    ];

    pub fn tooltip(self) -> &'static str {
        match self {
            Self::Close => "Close (Esc)",
            Self::Prev => "Previous (Left)",
            Self::Next => "Next (Right)",
            Self::Download => "Download",
            Self::CopyLink => "Copy Link",
            Self::Fullscreen => "Fullscreen",
            Self::ZoomOut => "Zoom Out (-)",
            Self::ZoomReset => "Reset Zoom",
            Self::ZoomIn => "Zoom In (+)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    Forward,
    Backward,
}

#[derive(Debug, Default)]
pub struct FocusRing {
    active: bool,
    current: Option<usize>,
}

impl FocusRing {
    pub fn activate(&mut self) {
        self.active = true;
        self.current = None;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.current = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current(&self) -> Option<ModalControl> {
        self.current.map(|i| ModalControl::ORDER[i])
    }

    /// Move focus one step from `from` (or the last known position).
    ///
    /// With nothing focused yet, Tab lands on the first control and Shift+Tab
    /// on the last. Returns `None` while inactive.
    pub fn advance(
        &mut self,
        from: Option<ModalControl>,
        direction: FocusDirection,
    ) -> Option<ModalControl> {
        if !self.active {
            return None;
        }
        let len = ModalControl::ORDER.len();
        let start = from
            .and_then(|control| ModalControl::ORDER.iter().position(|&c| c == control))
            .or(self.current);
        let next = match (start, direction) {
            (None, FocusDirection::Forward) => 0,
            (None, FocusDirection::Backward) => len - 1,
            (Some(i), FocusDirection::Forward) => (i + 1) % len,
            (Some(i), FocusDirection::Backward) => (i + len - 1) % len,
        };
        self.current = Some(next);
        Some(ModalControl::ORDER[next])
    }
}
