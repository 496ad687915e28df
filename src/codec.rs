//! Export and import of a [`MapState`] as the two JSON documents the game loads.

pub mod files;
pub mod manifest;
pub mod tile_layer;

use crate::catalog::objects::ObjectCatalog;
use crate::catalog::tiles::TileCatalog;
use crate::config::EditorConfig;
use crate::error::MapError;
use crate::map::MapState;
use manifest::ObjectManifest;

/// The pair of documents a map is saved as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedMap {
    /// Tiled-compatible tile layer
    pub tiles_json: String,
    /// Object manifest
    pub objects_json: String,
}

/// Serialize `map` into both documents.
pub fn export_map(
    map: &MapState,
    objects: &ObjectCatalog,
    config: &EditorConfig,
) -> Result<ExportedMap, MapError> {
    let tiles_json = tile_layer::encode(map, &config.layer_name, &config.tileset_source)?;
    let objects_json = ObjectManifest::from_map(map, objects).to_json()?;
    log::debug!(
        "exported '{}' ({}x{}, {} objects)",
        map.name,
        map.rows(),
        map.cols(),
        map.placed().count()
    );
    Ok(ExportedMap {
        tiles_json,
        objects_json,
    })
}

/// Build a new map from both documents.
///
/// Both documents are fully parsed and validated before the map is built, so
/// a failure never yields a half-loaded map. A blank `objects_json` means the
/// map has no objects.
pub fn import_map(
    tiles_json: &str,
    objects_json: &str,
    tiles: &TileCatalog,
    name: &str,
) -> Result<MapState, MapError> {
    if tiles_json.trim().is_empty() {
        return Err(MapError::MalformedDocument("tile layer document is empty".into()));
    }
    let grid = tile_layer::decode(tiles_json, tiles)?;
    let manifest = ObjectManifest::from_json(objects_json)?;

    let mut map = MapState::new(grid.rows(), grid.cols(), name);
    for (row, col, &id) in grid.iter() {
        map.paint_tile(row, col, id);
    }
    manifest.apply_to(&mut map);
    log::debug!(
        "imported '{}' ({}x{}, {} objects)",
        name,
        map.rows(),
        map.cols(),
        map.placed().count()
    );
    Ok(map)
}
