// Gallery grid projection
// Pure function of catalog + view state; the widget layer only draws what this returns.

use std::path::PathBuf;

use crate::models::{Catalog, ViewState};

/// One card in the gallery grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Position in the filtered view (what the modal opens).
    pub filtered_index: usize,
    /// Position in the full catalog (what deep links name).
    pub catalog_index: usize,
    pub title: String,
    pub source: PathBuf,
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryProjection {
    pub columns: usize,
    pub cards: Vec<Card>,
    pub load_more_visible: bool,
}

impl GalleryProjection {
    pub fn row_count(&self) -> usize {
        self.cards.len().div_ceil(self.columns.max(1))
    }
}

/// Project the first `visible_count` filtered items into a grid.
pub fn project(catalog: &Catalog, state: &ViewState) -> GalleryProjection {
    let columns = state.columns().count();
    let cards = state
        .filtered()
        .iter()
        .take(state.visible_count())
        .enumerate()
        .filter_map(|(filtered_index, &catalog_index)| {
            let item = catalog.get(catalog_index)?;
            Some(Card {
                filtered_index,
                catalog_index,
                title: item.title.clone(),
                source: item.resolved_source(catalog.base_dir()),
                row: filtered_index / columns,
                col: filtered_index % columns,
            })
        })
        .collect();

    GalleryProjection {
        columns,
        cards,
        load_more_visible: state.has_more(),
    }
}
