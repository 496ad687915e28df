//! The tile atlas and its palette layout.

use std::collections::HashSet;

/// Columns in the tile atlas.
pub const ATLAS_COLUMNS: u32 = 17;
/// Rows in the tile atlas.
pub const ATLAS_ROWS: u32 = 5;
/// Number of tiles in the atlas.
pub const TILE_COUNT: u32 = 85;

/// Atlas positions that hold blank artwork; they paint as "no tile".
pub const EMPTY_VISUAL_IDS: [u32; 38] = [
    4, 6, 9, 12, 15, 17, 21, 23, 26, 29, 32, 38, 40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51,
    52, 53, 54, 55, 56, 57, 60, 63, 66, 72, 74, 77, 80, 83,
];

// Inclusive atlas column ranges shown as palette groups; columns between them are spacers.
const PALETTE_GROUPS: [(u32, u32); 3] = [(0, 4), (6, 10), (12, 16)];

/// One atlas entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDef {
    /// Id written into the tile layer; `0` means empty
    pub id: u32,
    /// 1-based position in the atlas
    pub visual_id: u32,
    /// Image path of the tile
    pub asset_ref: String,
}

impl TileDef {
    /// True when painting this tile clears the cell.
    pub fn is_empty(&self) -> bool {
        self.id == 0
    }
}

/// Static registry of the tiles the editor can paint.
#[derive(Debug, Clone)]
pub struct TileCatalog {
    tiles: Vec<TileDef>,
    valid_ids: HashSet<u32>,
}

impl TileCatalog {
    /// Build the catalog for the standard 17×5 atlas whose images live in `asset_root`.
    pub fn standard(asset_root: &str) -> Self {
        let empty: HashSet<u32> = EMPTY_VISUAL_IDS.iter().copied().collect();
        let tiles = (1..=TILE_COUNT)
            .map(|visual_id| TileDef {
                id: if empty.contains(&visual_id) { 0 } else { visual_id },
                visual_id,
                asset_ref: format!("{asset_root}/tile_{visual_id}.png"),
            })
            .collect();
        Self::from_tiles(tiles)
    }

    /// Build a catalog from explicit definitions.
    pub fn from_tiles(tiles: Vec<TileDef>) -> Self {
        let valid_ids = tiles.iter().map(|t| t.id).filter(|&id| id != 0).collect();
        TileCatalog { tiles, valid_ids }
    }

    /// All tiles in atlas order.
    pub fn tiles(&self) -> &[TileDef] {
        &self.tiles
    }

    /// Tile at an atlas position.
    pub fn by_visual_id(&self, visual_id: u32) -> Option<&TileDef> {
        self.tiles.iter().find(|t| t.visual_id == visual_id)
    }

    /// First tile that paints `id`, used to draw a stored cell.
    pub fn by_id(&self, id: u32) -> Option<&TileDef> {
        if id == 0 {
            return None;
        }
        self.tiles.iter().find(|t| t.id == id)
    }

    /// Whether `id` may appear in a map: `0` or the id of a non-empty tile.
    pub fn is_valid_id(&self, id: u32) -> bool {
        id == 0 || self.valid_ids.contains(&id)
    }

    /// Palette groups: each group lists its atlas columns row by row.
    pub fn palette_groups(&self) -> Vec<Vec<&TileDef>> {
        PALETTE_GROUPS
            .iter()
            .map(|&(first, last)| {
                let mut group = Vec::new();
                for row in 0..ATLAS_ROWS {
                    for col in first..=last {
                        let visual_id = row * ATLAS_COLUMNS + col + 1;
                        if let Some(tile) = self.by_visual_id(visual_id) {
                            group.push(tile);
                        }
                    }
                }
                group
            })
            .collect()
    }
}
