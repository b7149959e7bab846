//! Discovery of the photo set used to draw cards.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::{CELLS, MAX_VALUE};

/// A media folder must supply one photo per card value.
pub const REQUIRED_IMAGES: usize = CELLS;
const EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to read media folder {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("expected 25 images, but found {found} in {path}")]
    WrongCount { path: PathBuf, found: usize },
}

/// Maps card values 1..=25 to photo files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMap {
    paths: Vec<PathBuf>,
}

impl ImageMap {
    /// Collect the JPEG files in `folder`, sorted by file name, and number them 1..=25.
    pub fn load(folder: &Path) -> Result<Self, MediaError> {
        let io_err = |source| MediaError::Io {
            path: folder.to_path_buf(),
            source,
        };
        let mut paths = Vec::new();
        for entry in fs::read_dir(folder).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && is_jpeg(&path) {
                paths.push(path);
            }
        }
        if paths.len() != REQUIRED_IMAGES {
            return Err(MediaError::WrongCount {
                path: folder.to_path_buf(),
                found: paths.len(),
            });
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(Self { paths })
    }

    pub fn get(&self, value: u8) -> Option<&Path> {
        if value == 0 || value > MAX_VALUE {
            return None;
        }
        self.paths.get(value as usize - 1).map(PathBuf::as_path)
    }

    /// `(value, path)` pairs in value order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Path)> {
        self.paths
            .iter()
            .enumerate()
            .map(|(idx, path)| (idx as u8 + 1, path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn numbers_files_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for i in (0..25).rev() {
            let ext = if i % 3 == 0 { "JPG" } else { "jpeg" };
            touch(dir.path(), &format!("photo_{i:02}.{ext}"));
        }
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "cover.png");

        let map = ImageMap::load(dir.path()).unwrap();
        assert_eq!(map.len(), 25);
        assert_eq!(
            map.get(1).unwrap().file_name().unwrap(),
            "photo_00.JPG"
        );
        assert_eq!(
            map.get(25).unwrap().file_name().unwrap(),
            "photo_24.JPG"
        );
        assert_eq!(map.get(0), None);
        assert_eq!(map.get(26), None);
        let values: Vec<u8> = map.iter().map(|(v, _)| v).collect();
        assert_eq!(values, (1..=25).collect::<Vec<u8>>());
    }

    #[test]
    fn wrong_count_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..24 {
            touch(dir.path(), &format!("{i}.jpg"));
        }
        let err = ImageMap::load(dir.path()).unwrap_err();
        assert!(matches!(err, MediaError::WrongCount { found: 24, .. }));
        assert!(err.to_string().starts_with("expected 25 images, but found 24"));
    }

    #[test]
    fn missing_folder_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageMap::load(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, MediaError::Io { .. }));
    }
}
