//! Interfaces the editor consumes from the surrounding application: map
//! storage and the logged-in user. Their failures are opaque to the editor,
//! so they report through `anyhow`.

/// A stored map: metadata plus both exported documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapRecord {
    /// `None` for a map that has not been stored yet
    pub id: Option<i64>,
    /// Map name
    pub name: String,
    /// Map description
    pub description: String,
    /// Owner
    pub user_id: String,
    /// Tile layer document
    pub tiles_json: String,
    /// Object manifest document
    pub objects_json: String,
}

/// Listing entry for a stored map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSummary {
    /// Identity
    pub id: i64,
    /// Map name
    pub name: String,
    /// Map description
    pub description: String,
    /// Owner
    pub user_id: String,
}

/// Persistent storage of maps.
pub trait MapRepository {
    /// Insert (no id) or update (with id) a record, returning its id.
    fn save(&mut self, record: &MapRecord) -> anyhow::Result<i64>;
    /// Every stored map.
    fn list(&self) -> anyhow::Result<Vec<MapSummary>>;
    /// A stored map, or `None` if `id` is unknown.
    fn load_by_id(&self, id: i64) -> anyhow::Result<Option<MapRecord>>;
}

/// Who is using the editor.
pub trait SessionProvider {
    /// Id of the logged-in user, `None` when nobody is logged in.
    fn current_user_id(&self) -> Option<String>;
}
