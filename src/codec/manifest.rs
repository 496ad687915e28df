//! Object manifest: where the player starts, where the level ends, and every
//! enemy, pickable and prop, in the game's up-positive coordinate system.

use crate::catalog::objects::ObjectCatalog;
use crate::error::{Document, MapError};
use crate::map::MapState;
use crate::object::{Category, Direction, ObjectId, ObjectInstance};
use crate::spatial::coords::{cell_to_anchor, export_to_cell, map_height_px, to_export_y};
use macroquad::math::vec2;
use serde::{Deserialize, Serialize, Serializer};

/// A bare position, used for the player start and the finish.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Anchor X in pixels from the left edge
    #[serde(serialize_with = "coord")]
    pub x: f32,
    /// Sprite center Y in pixels from the bottom edge
    #[serde(serialize_with = "coord")]
    pub y: f32,
}

/// One enemy, pickable or prop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Exported type name, e.g. `Sharkman`
    #[serde(rename = "type")]
    pub kind: String,
    /// Anchor X in pixels from the left edge
    #[serde(serialize_with = "coord")]
    pub x: f32,
    /// Sprite center Y in pixels from the bottom edge
    #[serde(serialize_with = "coord")]
    pub y: f32,
    /// Only for kinds that patrol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patrol_distance: Option<i32>,
    /// Only for directional kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

/// The whole manifest document. Field order is the key order of the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectManifest {
    /// Player start
    #[serde(default)]
    pub player: Option<Point>,
    /// Everything in the enemies section
    #[serde(default)]
    pub enemies: Vec<Entry>,
    /// Everything in the pickables section
    #[serde(default)]
    pub pickables: Vec<Entry>,
    /// Hazards and props
    #[serde(default)]
    pub objects: Vec<Entry>,
    /// Level end, with a whole-pixel `y`
    #[serde(default)]
    pub finish: Option<Point>,
}

// Whole numbers are written without a fraction, as the game's own tools write them.
fn coord<S: Serializer>(v: &f32, s: S) -> Result<S::Ok, S::Error> {
    if v.fract() == 0.0 && v.abs() < 1e9 {
        s.serialize_i64(*v as i64)
    } else {
        s.serialize_f64(f64::from(*v))
    }
}

// type, key, category
const KNOWN_TYPES: [(&str, &str, Category); 11] = [
    ("Player", "player", Category::Special),
    ("Finish", "finish", Category::Special),
    ("Sharkman", "sharkman", Category::Enemies),
    ("Crabby", "crabby", Category::Enemies),
    ("GoldenSkull", "goldenSkull", Category::Pickables),
    ("HealthPotion", "healthPotion", Category::Pickables),
    ("Diamond", "diamond", Category::Pickables),
    ("GoldCoin", "goldCoin", Category::Pickables),
    ("SilverCoin", "silverCoin", Category::Pickables),
    ("Cannon", "cannon", Category::Objects),
    ("Spikes", "spikes", Category::Objects),
];

/// Catalog key for an exported type name; unknown names get a lower-cased first letter.
pub fn type_to_key(kind: &str) -> String {
    if let Some(&(_, key, _)) = KNOWN_TYPES.iter().find(|(t, _, _)| *t == kind) {
        return key.to_owned();
    }
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Category for an exported type name, if it is one of the known kinds.
pub fn type_category(kind: &str) -> Option<Category> {
    KNOWN_TYPES
        .iter()
        .find(|(t, _, _)| *t == kind)
        .map(|&(_, _, c)| c)
}

impl ObjectManifest {
    /// Collect every placed object of `map`, scanning cells row-major.
    pub fn from_map(map: &MapState, catalog: &ObjectCatalog) -> Self {
        let map_h = map_height_px(map.rows());
        let mut out = ObjectManifest::default();

        for hit in map.placed() {
            let obj = hit.object;
            let (_, h) = catalog.icon_size(&obj.key);
            let anchor = cell_to_anchor(hit.row, hit.col, obj.offset_x);
            let y = to_export_y(anchor.y, h, map_h);

            match obj.key.as_str() {
                "player" => {
                    out.player.get_or_insert(Point { x: anchor.x, y });
                }
                // the runtime expects a whole-pixel finish line
                "finish" => {
                    out.finish.get_or_insert(Point {
                        x: anchor.x,
                        y: y.round_ties_even(),
                    });
                }
                _ => {
                    let entry = Entry {
                        kind: obj.kind.clone(),
                        x: anchor.x,
                        y,
                        patrol_distance: obj.patrol_distance,
                        direction: obj.direction,
                    };
                    match obj.category {
                        Category::Enemies => out.enemies.push(entry),
                        Category::Pickables => out.pickables.push(entry),
                        Category::Objects => out.objects.push(entry),
                        Category::Special => {
                            log::warn!("skipping special object '{}' with no manifest slot", obj.key)
                        }
                    }
                }
            }
        }
        out
    }

    /// Place every entry onto `map`. Later entries overwrite earlier ones that
    /// land in the same cell.
    pub fn apply_to(&self, map: &mut MapState) {
        let map_h = map_height_px(map.rows());
        let (rows, cols) = (map.rows(), map.cols());

        let singles = [("Player", self.player), ("Finish", self.finish)];
        let singles = singles.iter().filter_map(|(kind, p)| {
            p.map(|p| (*kind, p.x, p.y, None, None, Category::Special))
        });
        let sections = [
            (Category::Enemies, &self.enemies),
            (Category::Pickables, &self.pickables),
            (Category::Objects, &self.objects),
        ];
        let listed = sections.into_iter().flat_map(|(section, entries)| {
            entries.iter().map(move |e| {
                let category = type_category(&e.kind).unwrap_or(section);
                (e.kind.as_str(), e.x, e.y, e.patrol_distance, e.direction, category)
            })
        });

        for (kind, x, y, patrol_distance, direction, category) in singles.chain(listed) {
            let pos = export_to_cell(vec2(x, y), map_h, rows, cols);
            if map.object(pos.row, pos.col).is_some() {
                log::warn!("'{}' overwrites another object at ({}, {})", kind, pos.row, pos.col);
            }
            map.insert_object(
                pos.row,
                pos.col,
                ObjectInstance {
                    id: ObjectId(0),
                    key: type_to_key(kind),
                    kind: kind.to_owned(),
                    category,
                    offset_x: pos.offset_x,
                    direction,
                    patrol_distance,
                },
            );
        }
    }

    /// Pretty-printed JSON in document key order.
    pub fn to_json(&self) -> Result<String, MapError> {
        serde_json::to_string_pretty(self).map_err(|source| MapError::Json {
            document: Document::ObjectManifest,
            source,
        })
    }

    /// Parse a manifest; blank input is an empty manifest.
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        if json.trim().is_empty() {
            return Ok(ObjectManifest::default());
        }
        serde_json::from_str(json).map_err(|source| MapError::parse(Document::ObjectManifest, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::objects::NoIcons;
    use crate::map::ObjectAttrs;
    use serde_json::{json, Value};

    const ATTRS: ObjectAttrs = ObjectAttrs {
        direction: Direction::Left,
        patrol_distance: 100,
    };

    fn catalog() -> ObjectCatalog {
        ObjectCatalog::standard("tiles", &NoIcons)
    }

    #[test]
    fn type_table_matches_catalog() {
        for def in catalog().defs() {
            assert_eq!(type_to_key(&def.display_type), def.key);
            assert_eq!(type_category(&def.display_type), Some(def.category));
        }
        assert_eq!(type_to_key("FlyingFish"), "flyingFish");
        assert_eq!(type_to_key(""), "");
        assert_eq!(type_category("FlyingFish"), None);
    }

    #[test]
    fn finish_y_is_rounded_but_player_y_is_not() {
        let tall = |r: &str| r.ends_with(".png").then_some((32u32, 33u32));
        let cat = ObjectCatalog::standard("tiles", &tall);
        let mut map = MapState::new(21, 34, "m");
        map.place_object(2, 3, 0.0, cat.get("finish").unwrap(), ATTRS);
        map.place_object(5, 3, 0.0, cat.get("player").unwrap(), ATTRS);

        let m = ObjectManifest::from_map(&map, &cat);
        // 672 - (96 - 16.5) = 592.5, ties to even
        assert_eq!(m.finish, Some(Point { x: 112.0, y: 592.0 }));
        // 672 - (192 - 16.5) = 496.5
        assert_eq!(m.player, Some(Point { x: 112.0, y: 496.5 }));
    }

    #[test]
    fn serializes_in_document_order() {
        let cat = catalog();
        let mut map = MapState::new(21, 34, "m");
        map.place_object(0, 5, -16.0, cat.get("cannon").unwrap(), ATTRS);
        map.place_object(0, 1, 0.0, cat.get("sharkman").unwrap(), ATTRS);
        map.place_object(3, 0, 0.0, cat.get("goldCoin").unwrap(), ATTRS);
        map.place_object(1, 0, 0.0, cat.get("diamond").unwrap(), ATTRS);

        let json = ObjectManifest::from_map(&map, &cat).to_json().unwrap();
        let keys: Vec<_> = ["\"player\"", "\"enemies\"", "\"pickables\"", "\"objects\"", "\"finish\""]
            .iter()
            .map(|k| json.find(k).unwrap())
            .collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));

        let v: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["player"], Value::Null);
        assert_eq!(
            v["enemies"],
            json!([{ "type": "Sharkman", "x": 48, "y": 656, "patrol_distance": 100 }])
        );
        assert_eq!(v["objects"][0]["direction"], "LEFT");
        assert_eq!(v["objects"][0]["x"], 160);
        assert!(v["objects"][0].get("patrol_distance").is_none());
        let pick: Vec<_> = v["pickables"].as_array().unwrap().iter().map(|e| e["type"].clone()).collect();
        assert_eq!(pick, [json!("Diamond"), json!("GoldCoin")]);
        assert!(json.contains("\"x\": 48,"));
    }

    #[test]
    fn apply_uses_type_tables() {
        let json = r#"{
            "player": { "x": 16, "y": 656 },
            "enemies": [ { "type": "Crabby", "x": 64, "y": 592 } ],
            "pickables": [ { "type": "Spikes", "x": 208, "y": 592 }, { "type": "Mushroom", "x": 112, "y": 592 } ],
            "objects": [ { "type": "Cannon", "x": 144, "y": 560, "direction": "RIGHT" } ],
            "finish": null
        }"#;
        let manifest = ObjectManifest::from_json(json).unwrap();
        let mut map = MapState::new(21, 34, "m");
        manifest.apply_to(&mut map);
        assert_eq!(map.placed().count(), 5);

        let player = map.object(0, 0).unwrap();
        assert_eq!((player.key.as_str(), player.category, player.offset_x), ("player", Category::Special, 0.0));

        let crabby = map.object(2, 2).unwrap();
        assert_eq!((crabby.key.as_str(), crabby.kind.as_str()), ("crabby", "Crabby"));
        assert_eq!((crabby.category, crabby.offset_x), (Category::Enemies, -16.0));

        // known types keep their own category whatever array they were listed in
        let spikes = map.object(2, 6).unwrap();
        assert_eq!((spikes.key.as_str(), spikes.category), ("spikes", Category::Objects));

        let mushroom = map.object(2, 3).unwrap();
        assert_eq!((mushroom.key.as_str(), mushroom.category), ("mushroom", Category::Pickables));

        let cannon = map.object(3, 4).unwrap();
        assert_eq!((cannon.key.as_str(), cannon.direction), ("cannon", Some(Direction::Right)));
    }

    #[test]
    fn blank_manifest_is_empty() {
        assert_eq!(ObjectManifest::from_json("  \n").unwrap(), ObjectManifest::default());
    }

    #[test]
    fn rejects_bad_shapes() {
        for bad in [
            r#"{ "enemies": { "type": "Crabby" } }"#,
            r#"{ "enemies": [ { "x": 1, "y": 2 } ] }"#,
            r#"{ "objects": [ { "type": "Cannon", "x": 1, "y": 2, "direction": "UP" } ] }"#,
            r#"{ "player": { "x": 1 } }"#,
            "42",
        ] {
            let err = ObjectManifest::from_json(bad).unwrap_err();
            assert!(
                matches!(&err, MapError::MalformedDocument(msg) if msg.starts_with("object manifest")),
                "{bad}: {err}"
            );
        }
        let err = ObjectManifest::from_json(r#"{ "enemies": [ "#).unwrap_err();
        assert!(matches!(err, MapError::Json { document: Document::ObjectManifest, .. }));
    }
}
