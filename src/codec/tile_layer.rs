//! Tiled-compatible tile layer document.

use crate::catalog::tiles::TileCatalog;
use crate::error::{Document, MapError};
use crate::grid::Grid;
use crate::map::{MapState, MAX_DIMENSION, MIN_DIMENSION};
use crate::spatial::coords::CELL_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct TiledMapOut<'a> {
    version: f64,
    tiledversion: &'static str,
    orientation: &'static str,
    renderorder: &'static str,
    width: usize,
    height: usize,
    tilewidth: u32,
    tileheight: u32,
    infinite: bool,
    nextobjectid: u32,
    layers: [TileLayerOut<'a>; 1],
    tilesets: [TilesetRefOut<'a>; 1],
}

#[derive(Serialize)]
struct TileLayerOut<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    visible: bool,
    opacity: u8,
    x: i32,
    y: i32,
    width: usize,
    height: usize,
    data: &'a [u32],
}

#[derive(Serialize)]
struct TilesetRefOut<'a> {
    firstgid: u32,
    source: &'a str,
}

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    data: Option<Vec<u32>>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct JsonMap {
    width: usize,
    height: usize,
    layers: Vec<JsonLayer>,
}

/// Serialize the tile grid of `map` as a Tiled map with a single tile layer.
pub fn encode(map: &MapState, layer_name: &str, tileset_source: &str) -> Result<String, MapError> {
    let doc = TiledMapOut {
        version: 1.1,
        tiledversion: "1.11.5",
        orientation: "orthogonal",
        renderorder: "right-down",
        width: map.cols(),
        height: map.rows(),
        tilewidth: CELL_SIZE as u32,
        tileheight: CELL_SIZE as u32,
        infinite: false,
        nextobjectid: 1,
        layers: [TileLayerOut {
            name: layer_name,
            kind: "tilelayer",
            visible: true,
            opacity: 1,
            x: 0,
            y: 0,
            width: map.cols(),
            height: map.rows(),
            data: map.tiles().as_slice(),
        }],
        tilesets: [TilesetRefOut {
            firstgid: 1,
            source: tileset_source,
        }],
    };
    serde_json::to_string_pretty(&doc).map_err(|source| MapError::Json {
        document: Document::TileLayer,
        source,
    })
}

/// Read the first tile layer of a Tiled map into a grid.
///
/// The grid takes the document's `width`/`height` (raised to the minimum
/// dimension if smaller); cells the `data` array does not reach are `0`.
/// Dimensions over [`MAX_DIMENSION`] are rejected before anything is allocated.
pub fn decode(json: &str, catalog: &TileCatalog) -> Result<Grid<u32>, MapError> {
    let j: JsonMap = serde_json::from_str(json).map_err(|source| MapError::parse(Document::TileLayer, source))?;

    let (width, height) = (j.width, j.height);
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(MapError::MalformedDocument(format!(
            "tile layer is {width}x{height}, over the {MAX_DIMENSION} cell maximum"
        )));
    }

    let layer = j
        .layers
        .iter()
        .find(|l| l.kind.as_deref().unwrap_or("tilelayer") == "tilelayer")
        .ok_or_else(|| MapError::MalformedDocument("tile layer document has no tile layer".into()))?;
    let data = layer.data.as_deref().ok_or_else(|| {
        MapError::MalformedDocument(format!("layer '{}' has no data array", layer.name))
    })?;

    for (index, &id) in data.iter().enumerate() {
        if !catalog.is_valid_id(id) {
            return Err(MapError::InvalidTileId { index, id });
        }
    }

    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        log::warn!("tile layer is {width}x{height}, raising to the {MIN_DIMENSION} cell minimum");
    }
    if data.len() < width * height {
        log::warn!(
            "tile layer data has {} entries for a {}x{} map, padding with empty tiles",
            data.len(),
            width,
            height
        );
    }

    let mut grid = Grid::new(height.max(MIN_DIMENSION), width.max(MIN_DIMENSION));
    for row in 0..height {
        for col in 0..width {
            let id = data.get(row * width + col).copied().unwrap_or(0);
            if let Some(cell) = grid.get_mut(row, col) {
                *cell = id;
            }
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn catalog() -> TileCatalog {
        TileCatalog::standard("tiles")
    }

    #[test]
    fn encodes_row_major_with_boilerplate() {
        let mut map = MapState::new(21, 34, "m");
        map.paint_tile(0, 0, 5);
        map.paint_tile(1, 2, 7);
        let json = encode(&map, "Walls", "../../tileset.xml").unwrap();

        let v: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["width"], 34);
        assert_eq!(v["height"], 21);
        assert_eq!(v["tilewidth"], 32);
        assert_eq!(v["orientation"], "orthogonal");
        assert_eq!(v["layers"][0]["type"], "tilelayer");
        assert_eq!(v["layers"][0]["name"], "Walls");
        assert_eq!(v["tilesets"][0]["firstgid"], 1);
        assert_eq!(v["tilesets"][0]["source"], "../../tileset.xml");

        let data = v["layers"][0]["data"].as_array().unwrap();
        assert_eq!(data.len(), 21 * 34);
        assert_eq!(data[0], 5);
        assert_eq!(data[34 + 2], 7);
        assert_eq!(data.iter().filter(|d| **d != 0).count(), 2);
    }

    #[test]
    fn decode_pads_truncated_data() {
        let json = r#"{ "width": 10, "height": 10, "layers": [ { "data": [1, 2, 3] } ] }"#;
        let grid = decode(json, &catalog()).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (10, 10));
        assert_eq!(grid.as_slice()[..4], [1, 2, 3, 0]);
    }

    #[test]
    fn decode_skips_object_layers() {
        let json = r#"{ "width": 10, "height": 10, "layers": [
            { "type": "objectgroup", "objects": [] },
            { "type": "tilelayer", "data": [0, 8] }
        ] }"#;
        let grid = decode(json, &catalog()).unwrap();
        assert_eq!(grid.get(0, 1), Some(&8));
    }

    #[test]
    fn decode_reads_small_maps_with_declared_width() {
        let json = r#"{ "width": 2, "height": 2, "layers": [ { "data": [1, 2, 3, 5] } ] }"#;
        let grid = decode(json, &catalog()).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (10, 10));
        assert_eq!(grid.get(0, 1), Some(&2));
        assert_eq!(grid.get(1, 0), Some(&3));
        assert_eq!(grid.get(1, 1), Some(&5));
    }

    #[test]
    fn decode_errors() {
        let cat = catalog();
        let err = decode("{ not json", &cat).unwrap_err();
        assert!(matches!(err, MapError::Json { document: Document::TileLayer, .. }));

        let err = decode(r#"{ "height": 10, "layers": [] }"#, &cat).unwrap_err();
        assert!(matches!(err, MapError::MalformedDocument(msg) if msg.contains("width")));

        let err = decode(r#"{ "width": 10, "height": 10, "layers": [] }"#, &cat).unwrap_err();
        assert!(matches!(err, MapError::MalformedDocument(_)));

        let err = decode(r#"{ "width": 10, "height": 10, "layers": [ { "name": "L" } ] }"#, &cat)
            .unwrap_err();
        assert!(matches!(err, MapError::MalformedDocument(msg) if msg.contains("'L'")));

        let err = decode(r#"{ "width": 10, "height": 10, "layers": [ { "data": "AAAA" } ] }"#, &cat)
            .unwrap_err();
        assert!(matches!(err, MapError::MalformedDocument(_)));

        let err = decode("[1, 2]", &cat).unwrap_err();
        assert!(matches!(err, MapError::MalformedDocument(_)));

        let err = decode(r#"{ "width": 10, "height": 10, "layers": [ { "data": [0, 4] } ] }"#, &cat)
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidTileId { index: 1, id: 4 }));
    }

    #[test]
    fn decode_rejects_oversized_maps() {
        let cat = catalog();
        for (w, h) in [(4_294_967_296usize, 4_294_967_296usize), (100_000, 100_000), (10, MAX_DIMENSION + 1)] {
            let json = format!(r#"{{ "width": {w}, "height": {h}, "layers": [ {{ "data": [] }} ] }}"#);
            let err = decode(&json, &cat).unwrap_err();
            assert!(matches!(err, MapError::MalformedDocument(msg) if msg.contains("maximum")));
        }

        let json = format!(r#"{{ "width": {MAX_DIMENSION}, "height": 10, "layers": [ {{ "data": [] }} ] }}"#);
        let grid = decode(&json, &cat).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (10, MAX_DIMENSION));
    }
}
