//! The edited map: tile and object grids with their editing operations.

use crate::catalog::objects::{ObjectCatalog, ObjectDef};
use crate::grid::Grid;
use crate::history::Snapshot;
use crate::object::{Direction, ObjectId, ObjectInstance};
use crate::spatial::coords::{anchor_bounds, bounds_contain, cell_to_anchor};
use macroquad::math::Vec2;

/// Maps are never smaller than this in either dimension.
pub const MIN_DIMENSION: usize = 10;
/// Maps are never larger than this in either dimension.
pub const MAX_DIMENSION: usize = 500;

/// Clamp requested map dimensions into `[MIN_DIMENSION, MAX_DIMENSION]`.
pub fn clamp_dimensions(rows: usize, cols: usize) -> (usize, usize) {
    (
        rows.clamp(MIN_DIMENSION, MAX_DIMENSION),
        cols.clamp(MIN_DIMENSION, MAX_DIMENSION),
    )
}

/// Attribute values given to a newly placed object whose kind declares them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectAttrs {
    /// Given to kinds with a direction
    pub direction: Direction,
    /// Given to kinds that patrol
    pub patrol_distance: i32,
}

/// A located object, as returned by hit tests and lookups.
#[derive(Debug, Clone, Copy)]
pub struct ObjectHit<'a> {
    /// The located object
    pub object: &'a ObjectInstance,
    /// Row of the cell
    pub row: usize,
    /// Column of the cell
    pub col: usize,
}

/// The map being edited: tile ids and placed objects on the same `rows × cols` grid.
#[derive(Debug, Clone)]
pub struct MapState {
    tiles: Grid<u32>,
    objects: Grid<Option<ObjectInstance>>,
    /// Map name; also the stem of saved files
    pub name: String,
    /// Free text stored alongside published maps
    pub description: String,
    next_id: u32,
}

impl MapState {
    /// Empty map; dimensions are clamped with [`clamp_dimensions`].
    pub fn new(rows: usize, cols: usize, name: impl Into<String>) -> Self {
        let (rows, cols) = clamp_dimensions(rows, cols);
        MapState {
            tiles: Grid::new(rows, cols),
            objects: Grid::new(rows, cols),
            name: name.into(),
            description: String::new(),
            next_id: 1,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.tiles.rows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.tiles.cols()
    }

    /// Tile ids; `0` is empty.
    pub fn tiles(&self) -> &Grid<u32> {
        &self.tiles
    }

    /// Objects in their cells; `None` is empty.
    pub fn objects(&self) -> &Grid<Option<ObjectInstance>> {
        &self.objects
    }

    /// Tile id at a cell; `None` outside the grid.
    pub fn tile(&self, row: usize, col: usize) -> Option<u32> {
        self.tiles.get(row, col).copied()
    }

    /// Object in a cell; `None` if empty or outside the grid.
    pub fn object(&self, row: usize, col: usize) -> Option<&ObjectInstance> {
        self.objects.get(row, col).and_then(Option::as_ref)
    }

    /// Change the dimensions, keeping the overlapping region. Values outside
    /// `[MIN_DIMENSION, MAX_DIMENSION]` are clamped.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let (rows, cols) = clamp_dimensions(rows, cols);
        if rows == self.rows() && cols == self.cols() {
            return;
        }
        log::debug!("resize {}x{} -> {}x{}", self.rows(), self.cols(), rows, cols);
        self.tiles = self.tiles.resized(rows, cols);
        self.objects = self.objects.resized(rows, cols);
    }

    /// Set a tile id. Returns `false` when out of bounds or nothing changed.
    pub fn paint_tile(&mut self, row: usize, col: usize, tile_id: u32) -> bool {
        match self.tiles.get_mut(row, col) {
            Some(cell) if *cell != tile_id => {
                *cell = tile_id;
                true
            }
            _ => false,
        }
    }

    /// Place a new instance of `def` at a cell.
    ///
    /// Placing a singleton kind first removes every existing instance of it.
    /// Any object already in the target cell is replaced.
    pub fn place_object(
        &mut self,
        row: usize,
        col: usize,
        offset_x: f32,
        def: &ObjectDef,
        attrs: ObjectAttrs,
    ) -> Option<ObjectId> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        if def.singleton {
            for (_, _, cell) in self.objects.iter_mut() {
                if cell.as_ref().is_some_and(|o| o.key == def.key) {
                    *cell = None;
                }
            }
        }

        let id = self.alloc_id();
        let inst = ObjectInstance {
            id,
            key: def.key.clone(),
            kind: def.display_type.clone(),
            category: def.category,
            offset_x,
            direction: def.has_direction.then_some(attrs.direction),
            patrol_distance: def.has_patrol_distance.then_some(attrs.patrol_distance),
        };
        self.set_object(row, col, inst);
        Some(id)
    }

    /// Put an already built instance into a cell, giving it a fresh id.
    pub(crate) fn insert_object(&mut self, row: usize, col: usize, mut inst: ObjectInstance) {
        inst.id = self.alloc_id();
        self.set_object(row, col, inst);
    }

    fn set_object(&mut self, row: usize, col: usize, inst: ObjectInstance) {
        if let Some(cell) = self.objects.get_mut(row, col) {
            *cell = Some(inst);
        }
    }

    fn alloc_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Remove and return the object in a cell.
    pub fn erase_object(&mut self, row: usize, col: usize) -> Option<ObjectInstance> {
        self.objects.get_mut(row, col).and_then(Option::take)
    }

    /// Move the object at `from` into the empty cell `to`.
    ///
    /// Returns `false` (and changes nothing) if `from` is empty, `to` is occupied
    /// or either cell is outside the grid.
    pub fn move_object(&mut self, from: (usize, usize), to: (usize, usize)) -> bool {
        if !matches!(self.objects.get(to.0, to.1), Some(None)) {
            return false;
        }
        let Some(inst) = self.erase_object(from.0, from.1) else {
            return false;
        };
        self.set_object(to.0, to.1, inst);
        true
    }

    /// Topmost-row, then leftmost-column object whose sprite rectangle contains `p`.
    pub fn find_object_at(&self, p: Vec2, catalog: &ObjectCatalog) -> Option<ObjectHit<'_>> {
        self.placed().find(|hit| {
            let (w, h) = catalog.icon_size(&hit.object.key);
            let anchor = cell_to_anchor(hit.row, hit.col, hit.object.offset_x);
            bounds_contain(&anchor_bounds(anchor, w, h), p)
        })
    }

    /// Every placed object in row-major order.
    pub fn placed(&self) -> impl Iterator<Item = ObjectHit<'_>> {
        self.objects.iter().filter_map(|(row, col, cell)| {
            cell.as_ref().map(|object| ObjectHit { object, row, col })
        })
    }

    /// First placed instance (row-major) with catalog key `key`.
    pub fn find_key(&self, key: &str) -> Option<ObjectHit<'_>> {
        self.placed().find(|hit| hit.object.key == key)
    }

    /// Where the object with identity `id` is.
    pub fn find_by_id(&self, id: ObjectId) -> Option<ObjectHit<'_>> {
        self.placed().find(|hit| hit.object.id == id)
    }

    /// Mutable access to the object with identity `id`.
    pub fn object_by_id_mut(&mut self, id: ObjectId) -> Option<&mut ObjectInstance> {
        self.objects
            .iter_mut()
            .find_map(|(_, _, cell)| cell.as_mut().filter(|o| o.id == id))
    }

    /// Empty every cell, keeping the dimensions.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.objects.clear();
    }

    /// Deep copy of the grids.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tiles: self.tiles.clone(),
            objects: self.objects.clone(),
        }
    }

    /// Replace the grids (and with them the dimensions) by a snapshot.
    pub fn restore(&mut self, snap: Snapshot) {
        self.tiles = snap.tiles;
        self.objects = snap.objects;
    }
}
