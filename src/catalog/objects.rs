//! Placeable object kinds and their icons.

use crate::object::Category;
use crate::spatial::coords::CELL_SIZE;

/// Resolves the pixel size of an icon image.
///
/// Implemented by whatever owns the image files; the catalog only asks once, at load time.
pub trait IconLookup {
    /// Width and height of the icon at `asset_ref`, or `None` if it cannot be read.
    fn icon_dimensions(&self, asset_ref: &str) -> Option<(u32, u32)>;
}

/// Lookup that knows no icons; every object gets the one-cell fallback size.
pub struct NoIcons;

impl IconLookup for NoIcons {
    fn icon_dimensions(&self, _asset_ref: &str) -> Option<(u32, u32)> {
        None
    }
}

impl<F> IconLookup for F
where
    F: Fn(&str) -> Option<(u32, u32)>,
{
    fn icon_dimensions(&self, asset_ref: &str) -> Option<(u32, u32)> {
        self(asset_ref)
    }
}

/// A placeable object kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDef {
    /// Unique catalog key, e.g. `goldCoin`
    pub key: String,
    /// Type name written to the manifest, e.g. `GoldCoin`
    pub display_type: String,
    /// Palette section and manifest array
    pub category: Category,
    /// Instances carry a facing direction
    pub has_direction: bool,
    /// Instances carry a patrol distance
    pub has_patrol_distance: bool,
    /// At most one instance may exist on the map
    pub singleton: bool,
    /// Image path of the icon
    pub icon_ref: String,
    /// Icon width in pixels
    pub icon_width: u32,
    /// Icon height in pixels
    pub icon_height: u32,
}

// key, type, category, direction, patrol, singleton
const STANDARD_KINDS: [(&str, &str, Category, bool, bool, bool); 11] = [
    ("player", "Player", Category::Special, false, false, true),
    ("finish", "Finish", Category::Special, false, false, true),
    ("sharkman", "Sharkman", Category::Enemies, false, true, false),
    ("crabby", "Crabby", Category::Enemies, false, false, false),
    ("goldenSkull", "GoldenSkull", Category::Pickables, false, false, false),
    ("healthPotion", "HealthPotion", Category::Pickables, false, false, false),
    ("diamond", "Diamond", Category::Pickables, false, false, false),
    ("goldCoin", "GoldCoin", Category::Pickables, false, false, false),
    ("silverCoin", "SilverCoin", Category::Pickables, false, false, false),
    ("cannon", "Cannon", Category::Objects, true, false, false),
    ("spikes", "Spikes", Category::Objects, false, false, false),
];

/// Static registry of placeable object kinds.
#[derive(Debug, Clone)]
pub struct ObjectCatalog {
    defs: Vec<ObjectDef>,
}

impl ObjectCatalog {
    /// The standard object set, with icon sizes resolved through `icons`.
    pub fn standard(asset_root: &str, icons: &dyn IconLookup) -> Self {
        let defs = STANDARD_KINDS
            .iter()
            .map(|&(key, ty, category, has_direction, has_patrol_distance, singleton)| {
                let icon_ref = format!("{asset_root}/icons/{}/{ty}.png", category.as_str());
                let (icon_width, icon_height) = match icons.icon_dimensions(&icon_ref) {
                    Some(dims) => dims,
                    None => {
                        log::debug!("no icon size for {icon_ref}, using one cell");
                        (CELL_SIZE as u32, CELL_SIZE as u32)
                    }
                };
                ObjectDef {
                    key: key.to_owned(),
                    display_type: ty.to_owned(),
                    category,
                    has_direction,
                    has_patrol_distance,
                    singleton,
                    icon_ref,
                    icon_width,
                    icon_height,
                }
            })
            .collect();
        ObjectCatalog { defs }
    }

    /// Build a catalog from explicit definitions.
    pub fn from_defs(defs: Vec<ObjectDef>) -> Self {
        ObjectCatalog { defs }
    }

    /// All definitions in palette order.
    pub fn defs(&self) -> &[ObjectDef] {
        &self.defs
    }

    /// Definition for a catalog key.
    pub fn get(&self, key: &str) -> Option<&ObjectDef> {
        self.defs.iter().find(|d| d.key == key)
    }

    /// Definitions grouped by category in palette order, empty sections omitted.
    pub fn sections(&self) -> Vec<(Category, Vec<&ObjectDef>)> {
        Category::ALL
            .iter()
            .map(|&c| (c, self.defs.iter().filter(|d| d.category == c).collect::<Vec<_>>()))
            .filter(|(_, defs)| !defs.is_empty())
            .collect()
    }

    /// Icon size in pixels for `key`; one cell for kinds the catalog does not know.
    pub fn icon_size(&self, key: &str) -> (f32, f32) {
        match self.get(key) {
            Some(def) => (def.icon_width as f32, def.icon_height as f32),
            None => (CELL_SIZE, CELL_SIZE),
        }
    }
}
