//! Editor settings.

use crate::error::{Document, MapError};
use crate::object::Direction;
use serde::Deserialize;
use std::path::Path;

/// Editor settings passed into an [`Editor`](crate::Editor) at construction.
///
/// Every field is optional in the JSON form; missing fields take the defaults
/// listed on [`EditorConfig::default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Name given to a fresh map; also the stem of saved files
    pub default_name: String,
    /// Rows of a fresh map
    pub default_rows: usize,
    /// Columns of a fresh map
    pub default_cols: usize,
    /// `source` of the tileset reference written into the tile layer
    pub tileset_source: String,
    /// Name of the single exported tile layer
    pub layer_name: String,
    /// Directory holding `tile_<n>.png` and `icons/`
    pub asset_root: String,
    /// Patrol distance given to newly placed patrolling enemies
    pub default_patrol_distance: i32,
    /// Direction given to newly placed directional objects
    pub default_direction: Direction,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            default_name: "map".to_owned(),
            default_rows: 21,
            default_cols: 34,
            tileset_source: "../../tileset.xml".to_owned(),
            layer_name: "Walls".to_owned(),
            asset_root: "tiles".to_owned(),
            default_patrol_distance: 100,
            default_direction: Direction::Left,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        serde_json::from_str(json).map_err(|source| MapError::parse(Document::Config, source))
    }

    /// Load a config from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let p = path.as_ref();
        let txt = std::fs::read_to_string(p).map_err(|source| MapError::Io {
            path: p.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&txt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = EditorConfig::from_json_str(r#"{ "default_rows": 40, "default_direction": "RIGHT" }"#)
            .expect("config");
        assert_eq!(cfg.default_rows, 40);
        assert_eq!(cfg.default_cols, 34);
        assert_eq!(cfg.default_direction, Direction::Right);
        assert_eq!(cfg.layer_name, "Walls");
    }

    #[test]
    fn rejects_wrong_types() {
        let err = EditorConfig::from_json_str(r#"{ "default_rows": "many" }"#).unwrap_err();
        assert!(matches!(err, MapError::MalformedDocument(msg) if msg.starts_with("editor config")));
        let err = EditorConfig::from_json_str("{ default_rows: 3 }").unwrap_err();
        assert!(matches!(err, MapError::Json { document: Document::Config, .. }));
    }
}
