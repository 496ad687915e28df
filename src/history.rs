//! Snapshot-based undo and redo.

use crate::grid::Grid;
use crate::map::MapState;
use crate::object::ObjectInstance;

/// Deep copy of a map's grids, dimensions included.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub(crate) tiles: Grid<u32>,
    pub(crate) objects: Grid<Option<ObjectInstance>>,
}

impl Snapshot {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.tiles.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.tiles.cols()
    }

    /// Tile ids at the time of the snapshot.
    pub fn tiles(&self) -> &Grid<u32> {
        &self.tiles
    }

    /// Objects at the time of the snapshot.
    pub fn objects(&self) -> &Grid<Option<ObjectInstance>> {
        &self.objects
    }
}

/// Undo and redo stacks of whole-map snapshots.
#[derive(Debug, Default)]
pub struct EditHistory {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
}

impl EditHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `map` as it is before a user action; invalidates redo.
    pub fn record(&mut self, map: &MapState) {
        self.undo.push(map.snapshot());
        self.redo.clear();
    }

    /// Step back one action. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self, map: &mut MapState) -> bool {
        let Some(snap) = self.undo.pop() else {
            return false;
        };
        self.redo.push(map.snapshot());
        map.restore(snap);
        true
    }

    /// Re-apply the last undone action. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self, map: &mut MapState) -> bool {
        let Some(snap) = self.redo.pop() else {
            return false;
        };
        self.undo.push(map.snapshot());
        map.restore(snap);
        true
    }

    /// Whether [`undo`](Self::undo) would do anything.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether [`redo`](Self::redo) would do anything.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Forget every step, e.g. after loading another map.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
