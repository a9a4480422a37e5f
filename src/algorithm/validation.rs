//! Post-assignment consistency checks
//!
//! Lock state and layout contents are checked separately: manual edits to a
//! layout can reintroduce duplicate tiles without touching any lock.

use crate::spatial::layout::MosaicLayout;
use crate::spatial::store::TileStore;
use crate::spatial::tiles::Tile;
use bitvec::prelude::*;

/// True iff every tile in the store has been locked by an assignment
pub fn all_tiles_consumed(store: &TileStore) -> bool {
    store.iter().all(|(_, tile)| tile.is_locked())
}

/// True iff the layout uses every identifier `1..=cell_count` at least once
///
/// With as many cells as identifiers this means exactly once.
pub fn mosaic_completeness(layout: &MosaicLayout, store: &TileStore) -> bool {
    let count = layout.shape().cell_count();
    let mut present = bitvec![0; count];

    for (_, position) in layout.iter() {
        let no = store.tile(position.tile).map_or(0, Tile::no);
        if (1..=count).contains(&no) {
            present.set(no - 1, true);
        }
    }

    present.all()
}

/// Detailed breakdown of identifier usage in a layout
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletenessReport {
    /// Identifiers never referenced
    pub missing: Vec<usize>,
    /// Identifiers referenced more than once
    pub duplicated: Vec<usize>,
    /// Referenced identifiers outside `1..=cell_count`, or handles outside the store
    pub out_of_range: Vec<usize>,
}

impl CompletenessReport {
    /// Whether every identifier is used exactly once
    pub const fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.duplicated.is_empty() && self.out_of_range.is_empty()
    }
}

/// Count identifier usage across the layout
///
/// Handles that fall outside the store are reported as identifier 0 in
/// `out_of_range`.
pub fn check_completeness(layout: &MosaicLayout, store: &TileStore) -> CompletenessReport {
    let count = layout.shape().cell_count();
    let mut uses = vec![0usize; count];
    let mut report = CompletenessReport::default();

    for (_, position) in layout.iter() {
        let no = store.tile(position.tile).map_or(0, Tile::no);
        match no.checked_sub(1).and_then(|index| uses.get_mut(index)) {
            Some(used) => *used += 1,
            None => report.out_of_range.push(no),
        }
    }

    for (index, &used) in uses.iter().enumerate() {
        match used {
            0 => report.missing.push(index + 1),
            1 => {}
            _ => report.duplicated.push(index + 1),
        }
    }

    report
}
