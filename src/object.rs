//! Placed objects and their attribute types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Section an object kind belongs to; also the manifest array it is exported into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Player start and level finish
    Special,
    /// Enemies
    Enemies,
    /// Coins, potions and other collectibles
    Pickables,
    /// Hazards and props
    Objects,
}

impl Category {
    /// All categories in palette order.
    pub const ALL: [Category; 4] = [
        Category::Special,
        Category::Enemies,
        Category::Pickables,
        Category::Objects,
    ];

    /// Identifier used in asset paths and the manifest.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Special => "special",
            Category::Enemies => "enemies",
            Category::Pickables => "pickables",
            Category::Objects => "objects",
        }
    }

    /// Human readable section label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Special => "Player & Finish",
            Category::Enemies => "Enemies",
            Category::Pickables => "Pickables",
            Category::Objects => "Objects",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facing direction of directional objects (cannons).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Facing left
    #[default]
    Left,
    /// Facing right
    Right,
}

/// Identity of a placed object; survives moves, undo and redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// A placed object owned by exactly one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInstance {
    /// Identity
    pub id: ObjectId,
    /// Catalog key, e.g. `sharkman`
    pub key: String,
    /// Exported type name, e.g. `Sharkman`
    pub kind: String,
    /// Section of the kind
    pub category: Category,
    /// Horizontal offset of the anchor from the cell center, in pixels
    pub offset_x: f32,
    /// Present iff the kind has a direction
    pub direction: Option<Direction>,
    /// Present iff the kind patrols
    pub patrol_distance: Option<i32>,
}

impl ObjectInstance {
    /// True when both instances describe the same placement, ignoring identity.
    pub fn same_placement(&self, other: &ObjectInstance) -> bool {
        self.key == other.key
            && self.kind == other.kind
            && self.category == other.category
            && self.direction == other.direction
            && self.patrol_distance == other.patrol_distance
            && (self.offset_x - other.offset_x).abs() < 1e-3
    }
}
