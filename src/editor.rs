//! The editing session driven by user input.

use crate::catalog::objects::{IconLookup, ObjectCatalog};
use crate::catalog::tiles::TileCatalog;
use crate::codec::{self, files, ExportedMap};
use crate::config::EditorConfig;
use crate::error::MapError;
use crate::history::EditHistory;
use crate::map::{clamp_dimensions, MapState, ObjectAttrs, ObjectHit};
use crate::object::{Direction, ObjectId};
use crate::session::{MapRecord, MapRepository, SessionProvider};
use crate::spatial::coords::{world_to_cell, world_to_col_offset, world_to_row};
use anyhow::Context;
use macroquad::math::vec2;
use std::path::{Path, PathBuf};

/// What pointer input does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Paint (or erase) tiles
    #[default]
    Tiles,
    /// Place (or erase) objects
    Objects,
}

/// One editing session over one map.
///
/// Every user action that changes the map records an undo snapshot first.
/// Drag gestures are split in two: [`Editor::begin_gesture`] records the
/// snapshot once, then [`Editor::apply_at_point`] is called for every pointer
/// position without touching the history.
pub struct Editor {
    config: EditorConfig,
    tiles: TileCatalog,
    objects: ObjectCatalog,
    map: MapState,
    history: EditHistory,
    tool: Tool,
    selected_tile: Option<u32>,
    selected_object: Option<String>,
    selected_placed: Option<ObjectId>,
    attrs: ObjectAttrs,
}

impl Editor {
    /// Editor over an empty map sized and named from `config`.
    pub fn new(config: EditorConfig, tiles: TileCatalog, objects: ObjectCatalog) -> Self {
        let map = MapState::new(config.default_rows, config.default_cols, config.default_name.clone());
        let attrs = ObjectAttrs {
            direction: config.default_direction,
            patrol_distance: config.default_patrol_distance,
        };
        Editor {
            config,
            tiles,
            objects,
            map,
            history: EditHistory::new(),
            tool: Tool::default(),
            selected_tile: None,
            selected_object: None,
            selected_placed: None,
            attrs,
        }
    }

    /// Editor over the standard tile atlas and object set found under `config.asset_root`.
    pub fn with_standard_catalogs(config: EditorConfig, icons: &dyn IconLookup) -> Self {
        let tiles = TileCatalog::standard(&config.asset_root);
        let objects = ObjectCatalog::standard(&config.asset_root, icons);
        Self::new(config, tiles, objects)
    }

    /// The map being edited.
    pub fn map(&self) -> &MapState {
        &self.map
    }

    /// Settings the editor was created with.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Tiles the editor can paint.
    pub fn tile_catalog(&self) -> &TileCatalog {
        &self.tiles
    }

    /// Object kinds the editor can place.
    pub fn object_catalog(&self) -> &ObjectCatalog {
        &self.objects
    }

    /// What pointer input currently does.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools without changing the selection.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Rename the map; also the stem of saved files.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.map.name = name.into();
    }

    /// Set the description stored with published maps.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.map.description = description.into();
    }

    // ----- palette -----

    /// Select the tile at an atlas position for painting. Returns `false` if there is none.
    pub fn select_tile(&mut self, visual_id: u32) -> bool {
        let Some(def) = self.tiles.by_visual_id(visual_id) else {
            return false;
        };
        self.selected_tile = Some(def.id);
        self.selected_object = None;
        self.tool = Tool::Tiles;
        true
    }

    /// Tile id painted by the tile tool.
    pub fn selected_tile(&self) -> Option<u32> {
        self.selected_tile
    }

    /// Select an object kind for placement. Returns `false` for unknown keys.
    pub fn select_object(&mut self, key: &str) -> bool {
        if self.objects.get(key).is_none() {
            return false;
        }
        self.selected_object = Some(key.to_owned());
        self.selected_tile = None;
        self.tool = Tool::Objects;
        true
    }

    /// Catalog key placed by the object tool.
    pub fn selected_object(&self) -> Option<&str> {
        self.selected_object.as_deref()
    }

    /// Values given to newly placed objects.
    pub fn attrs(&self) -> ObjectAttrs {
        self.attrs
    }

    // ----- gestures -----

    /// Start a paint/erase gesture: record one undo step for everything the
    /// following [`apply_at_point`](Self::apply_at_point) calls change.
    pub fn begin_gesture(&mut self) {
        self.history.record(&self.map);
    }

    /// Apply the current tool at a world point. Does not record history.
    ///
    /// With the tile tool this paints the selected tile, or clears the cell when
    /// `erase` is set. With the object tool it places the selected object kind,
    /// or removes the object under the point when `erase` is set.
    /// Returns `true` if the map changed.
    pub fn apply_at_point(&mut self, world_x: f32, world_y: f32, erase: bool) -> bool {
        match self.tool {
            Tool::Tiles => {
                let Some((row, col)) = world_to_cell(vec2(world_x, world_y), self.map.rows(), self.map.cols())
                else {
                    return false;
                };
                let id = match (erase, self.selected_tile) {
                    (true, _) => 0,
                    (false, Some(id)) => id,
                    (false, None) => return false,
                };
                self.map.paint_tile(row, col, id)
            }
            Tool::Objects if erase => self.remove_object_at(world_x, world_y),
            Tool::Objects => self.put_object_at(world_x, world_y).is_some(),
        }
    }

    fn placement_target(&self, world_x: f32, world_y: f32) -> Option<(usize, usize, f32)> {
        self.selected_object.as_ref()?;
        let row = world_to_row(world_y, self.map.rows())?;
        let (col, offset_x) = world_to_col_offset(world_x, self.map.cols());
        Some((row, col, offset_x))
    }

    fn put_object_at(&mut self, world_x: f32, world_y: f32) -> Option<ObjectId> {
        let (row, col, offset_x) = self.placement_target(world_x, world_y)?;
        let def = self.objects.get(self.selected_object.as_deref()?)?;
        self.map.place_object(row, col, offset_x, def, self.attrs)
    }

    fn remove_object_at(&mut self, world_x: f32, world_y: f32) -> bool {
        let Some(hit) = self.map.find_object_at(vec2(world_x, world_y), &self.objects) else {
            return false;
        };
        let (row, col) = (hit.row, hit.col);
        self.map.erase_object(row, col).is_some()
    }

    // ----- single-step object actions -----

    /// Place the selected object kind at a world point as its own undo step.
    pub fn place_object_at(&mut self, world_x: f32, world_y: f32) -> Option<ObjectId> {
        self.placement_target(world_x, world_y)?;
        self.history.record(&self.map);
        self.put_object_at(world_x, world_y)
    }

    /// Remove the object under a world point as its own undo step.
    pub fn erase_object_at_point(&mut self, world_x: f32, world_y: f32) -> bool {
        if self.map.find_object_at(vec2(world_x, world_y), &self.objects).is_none() {
            return false;
        }
        self.history.record(&self.map);
        self.remove_object_at(world_x, world_y)
    }

    /// Move an object to an empty cell as its own undo step.
    pub fn move_object(&mut self, from: (usize, usize), to: (usize, usize)) -> bool {
        let movable = self.map.object(from.0, from.1).is_some()
            && to.0 < self.map.rows()
            && to.1 < self.map.cols()
            && self.map.object(to.0, to.1).is_none();
        if !movable {
            return false;
        }
        self.history.record(&self.map);
        self.map.move_object(from, to)
    }

    // ----- placed-object selection -----

    /// Select the placed object under a world point (or clear the selection).
    ///
    /// The defaults for new objects are synced from the selected object's attributes.
    pub fn select_object_at(&mut self, world_x: f32, world_y: f32) -> Option<ObjectId> {
        let hit = self.map.find_object_at(vec2(world_x, world_y), &self.objects);
        self.selected_placed = hit.map(|h| h.object.id);
        if let Some(hit) = hit {
            if let Some(d) = hit.object.patrol_distance {
                self.attrs.patrol_distance = d;
            }
            if let Some(d) = hit.object.direction {
                self.attrs.direction = d;
            }
        }
        self.selected_placed
    }

    /// The selected placed object, if it still exists.
    pub fn selected_placed(&self) -> Option<ObjectHit<'_>> {
        self.selected_placed.and_then(|id| self.map.find_by_id(id))
    }

    /// Set the patrol distance for new objects and for the selected object, if it patrols.
    pub fn set_patrol_distance(&mut self, distance: i32) {
        self.attrs.patrol_distance = distance;
        if let Some(obj) = self.selected_placed.and_then(|id| self.map.object_by_id_mut(id)) {
            if obj.patrol_distance.is_some() {
                obj.patrol_distance = Some(distance);
            }
        }
    }

    /// Set the direction for new objects and for the selected object, if it has one.
    pub fn set_direction(&mut self, direction: Direction) {
        self.attrs.direction = direction;
        if let Some(obj) = self.selected_placed.and_then(|id| self.map.object_by_id_mut(id)) {
            if obj.direction.is_some() {
                obj.direction = Some(direction);
            }
        }
    }

    // ----- whole-map actions -----

    /// Resize the map as one undo step; dimensions are clamped with [`clamp_dimensions`].
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let (rows, cols) = clamp_dimensions(rows, cols);
        if (rows, cols) == (self.map.rows(), self.map.cols()) {
            return;
        }
        self.history.record(&self.map);
        self.map.resize(rows, cols);
    }

    /// Empty the map as one undo step.
    pub fn clear(&mut self) {
        self.history.record(&self.map);
        self.map.clear();
    }

    /// Step back one action. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.map)
    }

    /// Re-apply the last undone action. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.map)
    }

    /// Whether [`undo`](Self::undo) would do anything.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether [`redo`](Self::redo) would do anything.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ----- save / load -----

    /// Serialize the map into both documents.
    pub fn export(&self) -> Result<ExportedMap, MapError> {
        codec::export_map(&self.map, &self.objects, &self.config)
    }

    /// Replace the map with the one described by both documents.
    ///
    /// On error the current map is left untouched. On success the history is
    /// cleared; name and description are kept.
    pub fn load(&mut self, tiles_json: &str, objects_json: &str) -> Result<(), MapError> {
        let mut map = codec::import_map(tiles_json, objects_json, &self.tiles, &self.map.name)?;
        map.description = std::mem::take(&mut self.map.description);
        self.replace_map(map);
        Ok(())
    }

    fn replace_map(&mut self, map: MapState) {
        self.map = map;
        self.history.clear();
        self.selected_placed = None;
    }

    /// Write both documents into `dir`, named after the map.
    pub fn save_to_dir(&self, dir: &Path) -> Result<(PathBuf, PathBuf), MapError> {
        files::write_map_files(dir, &self.map.name, &self.export()?)
    }

    /// Load map `name` from `dir`; the map takes that name.
    pub fn load_from_dir(&mut self, dir: &Path, name: &str) -> Result<(), MapError> {
        let docs = files::read_map_files(dir, name)?;
        let map = codec::import_map(&docs.tiles_json, &docs.objects_json, &self.tiles, name)?;
        self.replace_map(map);
        Ok(())
    }

    /// Store the map for the logged-in user. Returns `Ok(None)` when nobody is logged in.
    pub fn publish(
        &self,
        repo: &mut dyn MapRepository,
        session: &dyn SessionProvider,
    ) -> anyhow::Result<Option<i64>> {
        let Some(user_id) = session.current_user_id() else {
            log::warn!("not logged in, map '{}' not published", self.map.name);
            return Ok(None);
        };
        let out = self.export()?;
        let record = MapRecord {
            id: None,
            name: self.map.name.clone(),
            description: self.map.description.clone(),
            user_id,
            tiles_json: out.tiles_json,
            objects_json: out.objects_json,
        };
        let id = repo
            .save(&record)
            .with_context(|| format!("Saving map '{}'", record.name))?;
        Ok(Some(id))
    }

    /// Open a stored map, taking its name and description. Returns `Ok(false)` if there is no such map.
    pub fn open_record(&mut self, repo: &dyn MapRepository, id: i64) -> anyhow::Result<bool> {
        let Some(record) = repo.load_by_id(id).with_context(|| format!("Loading map {id}"))? else {
            return Ok(false);
        };
        let mut map = codec::import_map(&record.tiles_json, &record.objects_json, &self.tiles, &record.name)
            .with_context(|| format!("Opening map '{}'", record.name))?;
        map.description = record.description;
        self.replace_map(map);
        Ok(true)
    }
}
