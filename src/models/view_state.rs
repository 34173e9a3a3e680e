/// Number of cards revealed per "load more" step.
pub const DEFAULT_PAGE_SIZE: usize = 24;

/// Zoom bounds for the modal image.
pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Column density presets offered by the gallery toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnPreset {
    Two,
    Three,
    #[default]
    Four,
    Six,
}

impl ColumnPreset {
    pub const ALL: [ColumnPreset; 4] = [Self::Two, Self::Three, Self::Four, Self::Six];

    pub fn count(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Six => 6,
        }
    }

    /// Snap an arbitrary column count to the closest preset (ties go to the denser one).
    pub fn nearest(columns: usize) -> Self {
        Self::ALL
            .into_iter()
            .min_by_key(|preset| (preset.count().abs_diff(columns), usize::MAX - preset.count()))
            .unwrap_or_default()
    }
}

/// Mutable view state for one gallery session.
///
/// Every mutator keeps the invariants: `open_index` indexes `filtered`,
/// `visible_count <= filtered.len()`, `zoom` stays in `[MIN_ZOOM, MAX_ZOOM]`
/// and the slideshow is only active while an item is open.
#[derive(Debug, Clone)]
pub struct ViewState {
    page_size: usize,
    visible_count: usize,
    columns: ColumnPreset,
    filtered: Vec<usize>,
    open_index: Option<usize>,
    zoom: f64,
    slideshow_active: bool,
    help_open: bool,
    copied_feedback: bool,
}

impl ViewState {
    /// Create the state for a catalog of `catalog_len` items with an identity filter.
    pub fn new(catalog_len: usize, page_size: usize, columns: ColumnPreset) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            visible_count: page_size.min(catalog_len),
            columns,
            filtered: (0..catalog_len).collect(),
            open_index: None,
            zoom: DEFAULT_ZOOM,
            slideshow_active: false,
            help_open: false,
            copied_feedback: false,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn columns(&self) -> ColumnPreset {
        self.columns
    }

    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Catalog index for a position in the filtered view.
    pub fn catalog_index(&self, filtered_index: usize) -> Option<usize> {
        self.filtered.get(filtered_index).copied()
    }

    /// Position of a catalog item within the filtered view.
    pub fn filtered_position(&self, catalog_index: usize) -> Option<usize> {
        self.filtered.iter().position(|&i| i == catalog_index)
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open_index
    }

    pub fn is_open(&self) -> bool {
        self.open_index.is_some()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn slideshow_active(&self) -> bool {
        self.slideshow_active
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn copied_feedback(&self) -> bool {
        self.copied_feedback
    }

    pub fn has_more(&self) -> bool {
        self.visible_count < self.filtered.len()
    }

    /// Reveal the next page of cards. Returns false when everything is already shown.
    pub fn load_more(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.visible_count = (self.visible_count + self.page_size).min(self.filtered.len());
        true
    }

    /// Change the column density. Returns true when the preset changed.
    pub fn set_columns(&mut self, columns: ColumnPreset) -> bool {
        let changed = self.columns != columns;
        self.columns = columns;
        changed
    }

    /// Replace the filtered view. Out-of-range catalog indices are the caller's
    /// responsibility; an open item that drops out of the view closes the modal.
    pub fn set_filtered(&mut self, filtered: Vec<usize>) {
        self.filtered = filtered;
        self.visible_count = self
            .page_size
            .max(self.visible_count)
            .min(self.filtered.len());
        if self.open_index.is_some_and(|i| i >= self.filtered.len()) {
            self.close();
        }
    }

    /// Point the modal at `index`, resetting zoom. Fails for an invalid index.
    pub(crate) fn open(&mut self, index: usize) -> bool {
        if index >= self.filtered.len() {
            return false;
        }
        self.open_index = Some(index);
        self.zoom = DEFAULT_ZOOM;
        true
    }

    pub(crate) fn close(&mut self) {
        self.open_index = None;
        self.zoom = DEFAULT_ZOOM;
        self.slideshow_active = false;
        self.copied_feedback = false;
    }

    pub(crate) fn zoom_by(&mut self, delta: f64) {
        self.zoom = clamp_zoom(self.zoom + delta);
    }

    pub(crate) fn reset_zoom(&mut self) {
        self.zoom = DEFAULT_ZOOM;
    }

    pub(crate) fn set_slideshow_active(&mut self, active: bool) {
        self.slideshow_active = active && self.is_open();
    }

    pub(crate) fn set_help_open(&mut self, open: bool) {
        self.help_open = open;
    }

    pub(crate) fn set_copied_feedback(&mut self, shown: bool) {
        self.copied_feedback = shown && self.is_open();
    }
}

pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return DEFAULT_ZOOM;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_page_is_capped() {
        let state = ViewState::new(10, DEFAULT_PAGE_SIZE, ColumnPreset::Four);
        assert_eq!(state.visible_count(), 10);
        assert!(!state.has_more());

        let state = ViewState::new(0, DEFAULT_PAGE_SIZE, ColumnPreset::Four);
        assert_eq!(state.visible_count(), 0);
        assert!(!state.has_more());
    }

    #[test]
    fn test_load_more_caps_at_length() {
        let mut state = ViewState::new(30, 24, ColumnPreset::Four);
        assert_eq!(state.visible_count(), 24);
        assert!(state.has_more());

        assert!(state.load_more());
        assert_eq!(state.visible_count(), 30);
        assert!(!state.has_more());

        assert!(!state.load_more());
        assert_eq!(state.visible_count(), 30);
    }

    #[test]
    fn test_zoom_clamping() {
        let mut state = ViewState::new(3, 24, ColumnPreset::Four);
        assert!(state.open(1));
        for _ in 0..5 {
            state.zoom_by(10.0);
            assert!(state.zoom() <= MAX_ZOOM);
        }
        assert_eq!(state.zoom(), MAX_ZOOM);

        for _ in 0..5 {
            state.zoom_by(-10.0);
            assert!(state.zoom() >= MIN_ZOOM);
        }
        assert_eq!(state.zoom(), MIN_ZOOM);

        state.reset_zoom();
        assert_eq!(state.zoom(), DEFAULT_ZOOM);
    }

    #[test]
    fn test_open_resets_zoom_and_rejects_out_of_range() {
        let mut state = ViewState::new(3, 24, ColumnPreset::Four);
        assert!(state.open(0));
        state.zoom_by(0.6);
        assert!(state.open(2));
        assert_eq!(state.zoom(), DEFAULT_ZOOM);

        assert!(!state.open(3));
        assert_eq!(state.open_index(), Some(2));
    }

    #[test]
    fn test_slideshow_requires_open_modal() {
        let mut state = ViewState::new(3, 24, ColumnPreset::Four);
        state.set_slideshow_active(true);
        assert!(!state.slideshow_active());

        state.open(0);
        state.set_slideshow_active(true);
        assert!(state.slideshow_active());

        state.close();
        assert!(!state.slideshow_active());
        assert_eq!(state.open_index(), None);
    }

    #[test]
    fn test_set_filtered_closes_vanished_item() {
        let mut state = ViewState::new(5, 2, ColumnPreset::Four);
        state.open(4);
        state.set_filtered(vec![0, 2]);
        assert_eq!(state.open_index(), None);
        assert_eq!(state.visible_count(), 2);
        assert_eq!(state.catalog_index(1), Some(2));
        assert_eq!(state.filtered_position(2), Some(1));
        assert_eq!(state.filtered_position(4), None);
    }

    #[test]
    fn test_column_preset_snapping() {
        assert_eq!(ColumnPreset::nearest(4), ColumnPreset::Four);
        assert_eq!(ColumnPreset::nearest(1), ColumnPreset::Two);
        assert_eq!(ColumnPreset::nearest(5), ColumnPreset::Six);
        assert_eq!(ColumnPreset::nearest(12), ColumnPreset::Six);
        assert_eq!(ColumnPreset::Three.count(), 3);
    }
}
