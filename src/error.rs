//! Errors from reading, parsing and writing maps.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Which of the two exported documents an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    /// The Tiled-compatible tile layer (`<name>.json`)
    TileLayer,
    /// The object manifest (`<name>_objects.json`)
    ObjectManifest,
    /// The editor configuration file
    Config,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::TileLayer => write!(f, "tile layer"),
            Document::ObjectManifest => write!(f, "object manifest"),
            Document::Config => write!(f, "editor config"),
        }
    }
}

/// Error type for loading, importing and saving maps
#[derive(Debug)]
pub enum MapError {
    /// File I/O error
    Io {
        /// File that could not be read or written
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// The text is not valid JSON, or serializing failed
    Json {
        /// Document being parsed
        document: Document,
        /// Underlying error
        source: serde_json::Error,
    },
    /// The document is valid JSON but has the wrong shape: a missing field,
    /// a wrong value type, no tile layer, or a map larger than allowed
    MalformedDocument(String),
    /// A tile layer entry references a tile id the catalog does not know
    InvalidTileId {
        /// Row-major position in the layer `data` array
        index: usize,
        /// Offending tile id
        id: u32,
    },
}

impl MapError {
    /// Sort a deserialization failure: bad syntax stays [`MapError::Json`],
    /// shape errors become [`MapError::MalformedDocument`].
    pub(crate) fn parse(document: Document, source: serde_json::Error) -> Self {
        match source.classify() {
            serde_json::error::Category::Data => {
                MapError::MalformedDocument(format!("{document}: {source}"))
            }
            _ => MapError::Json { document, source },
        }
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            MapError::Json { document, source } => {
                write!(f, "Failed to parse {}: {}", document, source)
            }
            MapError::MalformedDocument(msg) => write!(f, "Malformed document: {}", msg),
            MapError::InvalidTileId { index, id } => {
                write!(f, "Unknown tile id {} at data index {}", id, index)
            }
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Io { source, .. } => Some(source),
            MapError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
