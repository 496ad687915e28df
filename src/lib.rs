#![warn(missing_docs)]

//! Core of a 2D tile-map level editor: tile and object catalogs, the edited
//! grid, undo/redo, and the Tiled-compatible save format, with Macroquad math
//! types for world coordinates.

pub mod codec;
pub mod config;
pub mod editor;
pub mod error;
pub mod grid;
pub mod history;
pub mod map;
pub mod object;
pub mod session;
/// Registries of what can be painted and placed.
pub mod catalog {
    pub mod objects;
    pub mod tiles;
}
/// Geometry between world pixels and grid cells.
pub mod spatial {
    pub mod coords;
}

pub use catalog::objects::{IconLookup, NoIcons, ObjectCatalog, ObjectDef};
pub use catalog::tiles::{TileCatalog, TileDef};
pub use codec::{export_map, import_map, ExportedMap};
pub use config::EditorConfig;
pub use editor::{Editor, Tool};
pub use error::MapError;
pub use grid::Grid;
pub use history::{EditHistory, Snapshot};
pub use map::{MapState, ObjectAttrs, ObjectHit};
pub use object::{Category, Direction, ObjectId, ObjectInstance};
pub use session::{MapRecord, MapRepository, MapSummary, SessionProvider};
