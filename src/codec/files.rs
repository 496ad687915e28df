//! Saved map files on disk.

use crate::codec::ExportedMap;
use crate::error::MapError;
use std::path::{Path, PathBuf};

/// Paths of the tile layer and manifest files for a map called `name` in `dir`.
pub fn map_file_paths(dir: &Path, name: &str) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("{name}.json")),
        dir.join(format!("{name}_objects.json")),
    )
}

fn write(path: &Path, contents: &str) -> Result<(), MapError> {
    std::fs::write(path, contents).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `<name>.json` and `<name>_objects.json` into `dir`.
pub fn write_map_files(dir: &Path, name: &str, out: &ExportedMap) -> Result<(PathBuf, PathBuf), MapError> {
    let (tiles_path, objects_path) = map_file_paths(dir, name);
    write(&tiles_path, &out.tiles_json)?;
    write(&objects_path, &out.objects_json)?;
    log::debug!("saved {} and {}", tiles_path.display(), objects_path.display());
    Ok((tiles_path, objects_path))
}

/// Read the documents of map `name` from `dir`.
///
/// The tile layer file must exist; a missing manifest reads as "no objects".
pub fn read_map_files(dir: &Path, name: &str) -> Result<ExportedMap, MapError> {
    let (tiles_path, objects_path) = map_file_paths(dir, name);
    let tiles_json = std::fs::read_to_string(&tiles_path).map_err(|source| MapError::Io {
        path: tiles_path.clone(),
        source,
    })?;
    let objects_json = match std::fs::read_to_string(&objects_path) {
        Ok(txt) => txt,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("{} not found, loading tiles only", objects_path.display());
            String::new()
        }
        Err(source) => {
            return Err(MapError::Io {
                path: objects_path,
                source,
            })
        }
    };
    Ok(ExportedMap {
        tiles_json,
        objects_json,
    })
}
